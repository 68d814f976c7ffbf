//! Statements.

use super::{
    index_label, MapResult, Mapper, CONDITION, EXPRESSION, EXPRESSIONS, IDENTIFIERS, KEYWORD,
    OPERAND, OPERATOR, STATEMENTS,
};
use crate::native::{
    AssignStmt, BlockStmt, BranchStmt, CaseClause, Expr, ForStmt, IfStmt, IncDecStmt, NativeKey,
    NativeRef, RangeStmt, ReturnStmt, Spanned, Stmt, SwitchStmt, Tok, TypeSwitchStmt,
};
use crate::tree::{fields, FieldValue, Fields, NodeId, NodeType};

impl<'a> Mapper<'a> {
    pub(crate) fn map_stmt(&mut self, stmt: &Stmt, label: &str) -> MapResult {
        let key = stmt.key();
        let mapped = match stmt {
            Stmt::Bad(_)
            | Stmt::Empty(_)
            | Stmt::Labeled(_)
            | Stmt::Send(_)
            | Stmt::Go(_)
            | Stmt::Defer(_)
            | Stmt::CommClause(_)
            | Stmt::Select(_) => None,
            Stmt::Decl(decl) => return self.map_gen_decl(decl, label),
            Stmt::Block(block) => return self.map_block(block, label),
            Stmt::Expr(s) => {
                let mut children = Vec::new();
                let x = self.map_expr(&s.x, "X")?;
                self.builder.append(&mut children, x)?;
                let fields = Fields::from([(EXPRESSION, FieldValue::Node(x))]);
                self.builder
                    .create_node(Some(key), children, NodeType::ExpressionStatement, fields)?
            }
            Stmt::IncDec(s) => self.map_inc_dec(key, s)?,
            Stmt::Assign(s) => self.map_assign(key, s)?,
            Stmt::Return(s) => self.map_return(key, s)?,
            Stmt::Branch(s) => self.map_branch(key, s)?,
            Stmt::If(s) => self.map_if(key, s)?,
            Stmt::CaseClause(s) => self.map_case_clause(key, s)?,
            Stmt::Switch(s) => self.map_switch(key, s)?,
            Stmt::TypeSwitch(s) => self.map_type_switch(key, s)?,
            Stmt::For(s) => self.map_for(key, s)?,
            Stmt::Range(s) => self.map_range(key, s)?,
        };
        match mapped {
            Some(id) => Ok(Some(id)),
            None => self.map_native(NativeRef::Stmt(stmt), label),
        }
    }

    pub(crate) fn map_opt_stmt(&mut self, stmt: Option<&Stmt>, label: &str) -> MapResult {
        match stmt {
            Some(stmt) => self.map_stmt(stmt, label),
            None => Ok(None),
        }
    }

    pub(crate) fn map_block(&mut self, block: &BlockStmt, _label: &str) -> MapResult {
        let mut children = Vec::new();
        let lbrace = self.builder.token_from_pos(Some(block.lbrace), Tok::LBrace, "Lbrace")?;
        self.builder.append(&mut children, lbrace)?;
        for (i, stmt) in block.list.iter().enumerate() {
            let id = self.map_stmt(stmt, &index_label(i))?;
            self.builder.append(&mut children, id)?;
        }
        let rbrace = self.builder.token_from_pos(Some(block.rbrace), Tok::RBrace, "Rbrace")?;
        self.builder.append(&mut children, rbrace)?;

        let inner = match children.len() {
            0..=2 => Vec::new(),
            len => self.builder.filter_out_comments(&children[1..len - 1]),
        };
        let fields = Fields::from([(STATEMENTS, FieldValue::Nodes(inner))]);
        self.builder
            .create_node(Some(block.key()), children, NodeType::Block, fields)
    }

    fn map_return(&mut self, key: NativeKey, stmt: &ReturnStmt) -> MapResult {
        let mut children = Vec::new();
        let keyword = self
            .builder
            .token_from_pos(Some(stmt.return_pos), Tok::Return, "Return")?;
        self.builder.append(&mut children, keyword)?;
        let mut expressions = Vec::with_capacity(stmt.results.len());
        for (i, result) in stmt.results.iter().enumerate() {
            let id = self.map_expr(result, &index_label(i))?;
            expressions.extend(id);
            self.builder.append(&mut children, id)?;
        }
        let fields = Fields::from([
            (KEYWORD, self.range_field(keyword)),
            (EXPRESSIONS, FieldValue::Nodes(expressions)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::Return, fields)
    }

    // ---- Assignments ----

    fn map_assign(&mut self, key: NativeKey, stmt: &AssignStmt) -> MapResult {
        if stmt.tok == Tok::Define {
            return self.map_define(key, stmt);
        }
        let Some(operator) = assign_operator(stmt.tok) else {
            return Ok(None);
        };
        let mut children = Vec::new();
        let lhs = self.map_hand_side(&stmt.lhs)?;
        self.builder.append(&mut children, lhs)?;
        let tok = self.builder.token_from_pos(Some(stmt.tok_pos), stmt.tok, "Tok")?;
        self.builder.append(&mut children, tok)?;
        let rhs = self.map_hand_side(&stmt.rhs)?;
        self.builder.append(&mut children, rhs)?;

        let fields = Fields::from([
            (OPERATOR, FieldValue::Str(operator.to_string())),
            ("leftHandSide", FieldValue::Node(lhs)),
            ("statementOrExpression", FieldValue::Node(rhs)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::AssignmentExpression, fields)
    }

    /// One side of a tuple assignment; several expressions are grouped.
    fn map_hand_side(&mut self, exprs: &[Expr]) -> MapResult {
        match exprs {
            [] => Ok(None),
            [single] => self.map_expr(single, "[0]"),
            _ => {
                let mut list = Vec::with_capacity(exprs.len());
                for (i, expr) in exprs.iter().enumerate() {
                    let id = self.map_expr(expr, &index_label(i))?;
                    self.builder.append(&mut list, id)?;
                }
                let fields = Fields::from([(
                    fields::CHILDREN,
                    FieldValue::Nodes(self.builder.filter_out_comments(&list)),
                )]);
                self.builder
                    .create_node(None, list, NodeType::LeftRightHandSide, fields)
            }
        }
    }

    /// `a, b := x, y`.
    fn map_define(&mut self, key: NativeKey, stmt: &AssignStmt) -> MapResult {
        let mut children = Vec::new();
        let mut identifiers = Vec::with_capacity(stmt.lhs.len());
        for (i, expr) in stmt.lhs.iter().enumerate() {
            let id = self.map_expr(expr, &index_label(i))?;
            identifiers.extend(id);
            self.builder.append(&mut children, id)?;
        }
        let tok = self.builder.token_from_pos(Some(stmt.tok_pos), stmt.tok, "Tok")?;
        self.builder.append(&mut children, tok)?;
        let mut initializers = Vec::with_capacity(stmt.rhs.len());
        for (i, expr) in stmt.rhs.iter().enumerate() {
            let id = self.map_expr(expr, &index_label(i))?;
            initializers.extend(id);
            self.builder.append(&mut children, id)?;
        }

        let fields = Fields::from([
            ("isVal", FieldValue::Bool(false)),
            (IDENTIFIERS, FieldValue::Nodes(identifiers)),
            ("type", FieldValue::Null),
            ("initializers", FieldValue::Nodes(initializers)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::VariableDeclaration, fields)
    }

    fn map_inc_dec(&mut self, key: NativeKey, stmt: &IncDecStmt) -> MapResult {
        let operator = if stmt.tok == Tok::Inc {
            "INCREMENT"
        } else {
            "DECREMENT"
        };
        let mut children = Vec::new();
        let operand = self.map_expr(&stmt.x, "X")?;
        self.builder.append(&mut children, operand)?;
        let tok = self.builder.token_from_pos(Some(stmt.tok_pos), stmt.tok, "Tok")?;
        self.builder.append(&mut children, tok)?;

        let fields = Fields::from([
            (OPERAND, FieldValue::Node(operand)),
            (OPERATOR, FieldValue::Str(operator.to_string())),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::UnaryExpression, fields)
    }

    // ---- Control flow ----

    fn map_branch(&mut self, key: NativeKey, stmt: &BranchStmt) -> MapResult {
        let kind = match stmt.tok {
            Tok::Break => "BREAK",
            Tok::Continue => "CONTINUE",
            _ => return Ok(None),
        };
        let mut children = Vec::new();
        let keyword = self
            .builder
            .token_from_pos(Some(stmt.tok_pos), stmt.tok, &format!("Tok{kind}"))?;
        self.builder.append(&mut children, keyword)?;
        let label = match &stmt.label {
            Some(label) => self.map_ident(label, "Label")?,
            None => None,
        };
        self.builder.append(&mut children, label)?;

        let fields = Fields::from([
            (KEYWORD, self.range_field(keyword)),
            ("kind", FieldValue::Str(kind.to_string())),
            ("label", FieldValue::Node(label)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::Jump, fields)
    }

    fn map_if(&mut self, key: NativeKey, stmt: &IfStmt) -> MapResult {
        let mut children = Vec::new();
        let keyword = self.builder.token_from_pos(Some(stmt.if_pos), Tok::If, "If")?;
        self.builder.append(&mut children, keyword)?;

        let condition = match &stmt.init {
            Some(init) => {
                let mut header = Vec::new();
                let init = self.map_stmt(init, "Init")?;
                self.builder.append(&mut header, init)?;
                let cond = self.map_expr(&stmt.cond, "Cond")?;
                self.builder.append(&mut header, cond)?;
                self.builder.create_native(None, header, "InitAndCond")?
            }
            None => self.map_expr(&stmt.cond, "Cond")?,
        };
        self.builder.append(&mut children, condition)?;
        let then_branch = self.map_block(&stmt.body, "Body")?;
        self.builder.append(&mut children, then_branch)?;
        let else_branch = self.map_opt_stmt(stmt.else_branch.as_deref(), "Else")?;
        self.builder.append(&mut children, else_branch)?;

        // The `else` keyword is synthesized right before the else branch.
        let else_keyword = else_branch.and_then(|else_branch| {
            let visible = self.builder.filter_out_comments(&children);
            let at = visible.iter().rposition(|&id| id == else_branch)?;
            at.checked_sub(1).map(|before| visible[before])
        });
        let else_keyword = match else_keyword {
            Some(id) => self.range_field(Some(id)),
            None => FieldValue::Null,
        };

        let fields = Fields::from([
            ("ifKeyword", self.range_field(keyword)),
            (CONDITION, FieldValue::Node(condition)),
            ("thenBranch", FieldValue::Node(then_branch)),
            ("elseKeyword", else_keyword),
            ("elseBranch", FieldValue::Node(else_branch)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::If, fields)
    }

    fn map_for(&mut self, key: NativeKey, stmt: &ForStmt) -> MapResult {
        let mut children = Vec::new();
        let keyword = self.builder.token_from_pos(Some(stmt.for_pos), Tok::For, "For")?;
        self.builder.append(&mut children, keyword)?;

        let (condition, kind) = if stmt.init.is_none() && stmt.post.is_none() {
            (self.map_opt_expr(stmt.cond.as_ref(), "Cond")?, "WHILE")
        } else {
            let mut header = Vec::new();
            let init = self.map_opt_stmt(stmt.init.as_deref(), "Init")?;
            self.builder.append(&mut header, init)?;
            let cond = self.map_opt_expr(stmt.cond.as_ref(), "Cond")?;
            self.builder.append(&mut header, cond)?;
            let post = self.map_opt_stmt(stmt.post.as_deref(), "Post")?;
            self.builder.append(&mut header, post)?;
            (self.builder.create_native(None, header, "ForHeader")?, "FOR")
        };
        self.builder.append(&mut children, condition)?;
        let body = self.map_block(&stmt.body, "Body")?;
        self.builder.append(&mut children, body)?;

        let fields = Fields::from([
            (KEYWORD, self.range_field(keyword)),
            (CONDITION, FieldValue::Node(condition)),
            ("kind", FieldValue::Str(kind.to_string())),
            ("body", FieldValue::Node(body)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::Loop, fields)
    }

    fn map_range(&mut self, key: NativeKey, stmt: &RangeStmt) -> MapResult {
        let mut children = Vec::new();
        let keyword = self.builder.token_from_pos(Some(stmt.for_pos), Tok::For, "For")?;
        self.builder.append(&mut children, keyword)?;

        let mut header = Vec::new();
        let range_key = self.map_opt_expr(stmt.key.as_ref(), "Key")?;
        self.builder.append(&mut header, range_key)?;
        let value = self.map_opt_expr(stmt.value.as_ref(), "Value")?;
        self.builder.append(&mut header, value)?;
        if let Some(tok) = stmt.tok {
            let tok = self.builder.token_from_pos(stmt.tok_pos, tok, "Tok")?;
            self.builder.append(&mut header, tok)?;
        }
        let x = self.map_expr(&stmt.x, "X")?;
        self.builder.append(&mut header, x)?;
        let condition = self.builder.create_native(None, header, "RangeHeader")?;
        self.builder.append(&mut children, condition)?;
        let body = self.map_block(&stmt.body, "Body")?;
        self.builder.append(&mut children, body)?;

        let fields = Fields::from([
            (KEYWORD, self.range_field(keyword)),
            (CONDITION, FieldValue::Node(condition)),
            ("body", FieldValue::Node(body)),
            ("kind", FieldValue::Str("FOR".to_string())),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::Loop, fields)
    }

    // ---- Switches ----

    fn map_case_clause(&mut self, key: NativeKey, clause: &CaseClause) -> MapResult {
        let mut children = Vec::new();
        let tok = if clause.list.is_empty() {
            Tok::Default
        } else {
            Tok::Case
        };
        let keyword = self.builder.token_from_pos(Some(clause.case), tok, "Case")?;
        self.builder.append(&mut children, keyword)?;

        let mut list = Vec::with_capacity(clause.list.len());
        for (i, expr) in clause.list.iter().enumerate() {
            let id = self.map_expr(expr, &index_label(i))?;
            self.builder.append(&mut list, id)?;
        }
        let expression = self.builder.create_native(None, list, "CaseExprList")?;
        self.builder.append(&mut children, expression)?;
        let colon = self.builder.token_from_pos(Some(clause.colon), Tok::Colon, "Colon")?;
        self.builder.append(&mut children, colon)?;

        let mut body = Vec::with_capacity(clause.body.len());
        for (i, stmt) in clause.body.iter().enumerate() {
            let id = self.map_stmt(stmt, &index_label(i))?;
            self.builder.append(&mut body, id)?;
        }
        let visible = self.builder.filter_out_comments(&body);
        let body = match visible.as_slice() {
            [only] if self.node_type(Some(*only)) == Some(NodeType::Block) => Some(*only),
            _ => {
                let fields = Fields::from([(STATEMENTS, FieldValue::Nodes(visible))]);
                self.builder.create_node(None, body, NodeType::Block, fields)?
            }
        };
        self.builder.append(&mut children, body)?;

        let fields = Fields::from([
            (EXPRESSION, FieldValue::Node(expression)),
            ("body", FieldValue::Node(body)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::MatchCase, fields)
    }

    fn map_switch(&mut self, key: NativeKey, stmt: &SwitchStmt) -> MapResult {
        let mut header = Vec::new();
        let keyword = self.builder.token_from_pos(Some(stmt.switch), Tok::Switch, "Switch")?;
        let init = self.map_opt_stmt(stmt.init.as_deref(), "Init")?;
        self.builder.append(&mut header, init)?;
        let tag = self.map_opt_expr(stmt.tag.as_ref(), "Tag")?;
        self.builder.append(&mut header, tag)?;
        let expression = self.builder.create_native(None, header, "InitAndTag")?;
        self.finish_match(key, keyword, expression, &stmt.body)
    }

    fn map_type_switch(&mut self, key: NativeKey, stmt: &TypeSwitchStmt) -> MapResult {
        let mut header = Vec::new();
        let keyword = self.builder.token_from_pos(Some(stmt.switch), Tok::Switch, "Switch")?;
        let init = self.map_opt_stmt(stmt.init.as_deref(), "Init")?;
        self.builder.append(&mut header, init)?;
        let assign = self.map_stmt(&stmt.assign, "Assign")?;
        self.builder.append(&mut header, assign)?;
        let expression = self.builder.create_native(None, header, "InitAndAssign")?;
        self.finish_match(key, keyword, expression, &stmt.body)
    }

    fn finish_match(
        &mut self,
        key: NativeKey,
        keyword: Option<NodeId>,
        expression: Option<NodeId>,
        body: &BlockStmt,
    ) -> MapResult {
        let mut children = Vec::new();
        self.builder.append(&mut children, keyword)?;
        self.builder.append(&mut children, expression)?;
        let body = self.map_block(body, "Body")?;
        self.builder.append(&mut children, body)?;

        let cases = match body {
            Some(body) => self
                .builder
                .filter_out_comments(&self.builder.node(body).children)
                .into_iter()
                .filter(|&id| self.builder.node(id).node_type == NodeType::MatchCase)
                .collect(),
            None => Vec::new(),
        };
        let fields = Fields::from([
            (KEYWORD, self.range_field(keyword)),
            (EXPRESSION, FieldValue::Node(expression)),
            ("cases", FieldValue::Nodes(cases)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::Match, fields)
    }
}

fn assign_operator(tok: Tok) -> Option<&'static str> {
    let operator = match tok {
        Tok::Assign => "EQUAL",
        Tok::AddAssign => "PLUS_EQUAL",
        Tok::SubAssign => "SUB_ASSIGN",
        Tok::MulAssign => "TIMES_ASSIGN",
        Tok::QuoAssign => "DIVIDED_BY_ASSIGN",
        Tok::RemAssign => "MODULO_ASSIGN",
        Tok::AndAssign => "BITWISE_AND_ASSIGN",
        Tok::OrAssign => "BITWISE_OR_ASSIGN",
        Tok::XorAssign => "BITWISE_XOR_ASSIGN",
        Tok::ShlAssign => "BITWISE_SHL_ASSIGN",
        Tok::ShrAssign => "BITWISE_SHR_ASSIGN",
        Tok::AndNotAssign => "BITWISE_AND_NOT_ASSIGN",
        _ => return None,
    };
    Some(operator)
}
