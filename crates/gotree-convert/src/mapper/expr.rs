//! Expressions, identifiers and literals.

use super::{index_label, MapResult, Mapper, EXPRESSION, IDENTIFIER, OPERAND, OPERATOR};
use crate::native::{
    ArrayType, BasicLit, BinaryExpr, CallExpr, CompositeLit, Ellipsis, Expr, Ident, IndexExpr,
    IndexListExpr, KeyValueExpr, LitKind, MapType, NativeKey, NativeRef, ParenExpr, SelectorExpr,
    SliceExpr, Spanned, StarExpr, Tok, TypeAssertExpr, UnaryExpr,
};
use crate::tree::{FieldValue, Fields, NodeType, TokenKind};

impl<'a> Mapper<'a> {
    pub(crate) fn map_expr(&mut self, expr: &Expr, label: &str) -> MapResult {
        let key = expr.key();
        let mapped = match expr {
            Expr::Bad(_)
            | Expr::StructType(_)
            | Expr::FuncType(_)
            | Expr::InterfaceType(_)
            | Expr::ChanType(_) => None,
            Expr::Ident(ident) => return self.map_ident(ident, label),
            Expr::BasicLit(lit) => return self.map_basic_lit(lit, label),
            Expr::FuncLit(lit) => self.map_func_lit(key, lit)?,
            Expr::Call(call) => self.map_call(call, label)?,
            Expr::Ellipsis(e) => self.map_ellipsis(key, e)?,
            Expr::CompositeLit(e) => self.map_composite_lit(key, e)?,
            Expr::Paren(e) => self.map_paren(key, e)?,
            Expr::Selector(e) => self.map_selector(key, e)?,
            Expr::Index(e) => self.map_index(key, e)?,
            Expr::IndexList(e) => self.map_index_list(key, e)?,
            Expr::Slice(e) => self.map_slice(key, e)?,
            Expr::TypeAssert(e) => self.map_type_assert(key, e)?,
            Expr::Star(e) => self.map_star(key, e)?,
            Expr::Unary(e) => self.map_unary(key, e)?,
            Expr::Binary(e) => self.map_binary(key, e)?,
            Expr::KeyValue(e) => self.map_key_value(key, e)?,
            Expr::ArrayType(e) => self.map_array_type(key, e)?,
            Expr::MapType(e) => self.map_map_type(key, e)?,
        };
        match mapped {
            Some(id) => Ok(Some(id)),
            None => self.map_native(NativeRef::Expr(expr), label),
        }
    }

    pub(crate) fn map_opt_expr(&mut self, expr: Option<&Expr>, label: &str) -> MapResult {
        match expr {
            Some(expr) => self.map_expr(expr, label),
            None => Ok(None),
        }
    }

    fn map_opt_boxed(&mut self, expr: Option<&Box<Expr>>, label: &str) -> MapResult {
        self.map_opt_expr(expr.map(|e| &**e), label)
    }

    // ---- Leaves ----

    pub(crate) fn map_ident(&mut self, ident: &Ident, _label: &str) -> MapResult {
        let key = ident.key();
        let mut children = Vec::new();
        let (node_type, fields) = match ident.name.as_str() {
            "true" | "false" | "nil" => (
                NodeType::Literal,
                Fields::from([("value", FieldValue::Str(ident.name.clone()))]),
            ),
            "_" => {
                let token = self.builder.create_expected_token(
                    ident.name_pos as usize,
                    "_",
                    "PlaceHolder",
                    TokenKind::Keyword,
                )?;
                self.builder.append(&mut children, token)?;
                (
                    NodeType::PlaceHolder,
                    Fields::from([("placeHolderToken", self.range_field(token))]),
                )
            }
            name => {
                let mut fields = Fields::from([("name", FieldValue::Str(name.to_string()))]);
                if self.options.identifier_info {
                    let info = self.enricher.identifier_info(ident);
                    fields.insert("id", FieldValue::Int(info.id));
                    fields.insert("type", FieldValue::Str(info.type_name));
                    fields.insert("package", FieldValue::Str(info.package));
                }
                (NodeType::Identifier, fields)
            }
        };
        self.builder.create_node(Some(key), children, node_type, fields)
    }

    /// Literals become typed leaves, except raw strings and runes which stay
    /// plain tokens.
    pub(crate) fn map_basic_lit(&mut self, lit: &BasicLit, label: &str) -> MapResult {
        let offset = lit.value_pos as usize;
        let value = FieldValue::Str(lit.value.clone());
        let (node_type, fields) = match lit.kind {
            LitKind::String if !lit.value.starts_with('`') => {
                let content = lit
                    .value
                    .get(1..lit.value.len().saturating_sub(1))
                    .unwrap_or("")
                    .to_string();
                let fields = Fields::from([
                    ("content", FieldValue::Str(content)),
                    ("value", value),
                ]);
                return self.builder.create_expected_leaf(
                    offset,
                    &lit.value,
                    TokenKind::StringLiteral,
                    NodeType::StringLiteral,
                    fields,
                );
            }
            LitKind::Int => (NodeType::IntegerLiteral, Fields::from([("value", value)])),
            LitKind::Float => (NodeType::FloatLiteral, Fields::from([("value", value)])),
            LitKind::Imag => (NodeType::ImaginaryLiteral, Fields::from([("value", value)])),
            LitKind::String | LitKind::Char => {
                return self.builder.create_expected_token(
                    offset,
                    &lit.value,
                    &format!("{label}(BasicLit)"),
                    TokenKind::Other,
                );
            }
        };
        self.builder
            .create_expected_leaf(offset, &lit.value, TokenKind::Other, node_type, fields)
    }

    // ---- Operators ----

    fn map_unary(&mut self, key: NativeKey, expr: &UnaryExpr) -> MapResult {
        let operator = match expr.op {
            Tok::Add => "PLUS",
            Tok::Sub => "MINUS",
            Tok::Not => "NEGATE",
            Tok::And => "ADDRESS_OF",
            Tok::Arrow => "ARROW",
            Tok::Xor => "BITWISE_COMPLEMENT",
            _ => return Ok(None),
        };
        let mut children = Vec::new();
        let op = self.builder.token_from_pos(Some(expr.op_pos), expr.op, "Op")?;
        self.builder.append(&mut children, op)?;
        let operand = self.map_expr(&expr.x, "X")?;
        self.builder.append(&mut children, operand)?;

        let fields = Fields::from([
            (OPERATOR, FieldValue::Str(operator.to_string())),
            (OPERAND, FieldValue::Node(operand)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::UnaryExpression, fields)
    }

    fn map_binary(&mut self, key: NativeKey, expr: &BinaryExpr) -> MapResult {
        let Some(operator) = binary_operator(expr.op) else {
            return Ok(None);
        };
        let mut children = Vec::new();
        let left = self.map_expr(&expr.x, OPERAND)?;
        self.builder.append(&mut children, left)?;
        let op = self.builder.token_from_pos(Some(expr.op_pos), expr.op, "Op")?;
        self.builder.append(&mut children, op)?;
        let right = self.map_expr(&expr.y, OPERAND)?;
        self.builder.append(&mut children, right)?;

        let fields = Fields::from([
            ("leftOperand", FieldValue::Node(left)),
            (OPERATOR, FieldValue::Str(operator.to_string())),
            ("operatorToken", self.range_field(op)),
            ("rightOperand", FieldValue::Node(right)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::BinaryExpression, fields)
    }

    fn map_star(&mut self, key: NativeKey, expr: &StarExpr) -> MapResult {
        let mut children = Vec::new();
        let star = self.builder.token_from_pos(Some(expr.star), Tok::Mul, "Star")?;
        self.builder.append(&mut children, star)?;
        let x = self.map_expr(&expr.x, "X")?;
        self.builder.append(&mut children, x)?;

        let fields = Fields::from([(EXPRESSION, FieldValue::Node(x))]);
        self.builder
            .create_node(Some(key), children, NodeType::StarExpression, fields)
    }

    // ---- Calls and composites ----

    pub(crate) fn map_call(&mut self, call: &CallExpr, _label: &str) -> MapResult {
        let mut children = Vec::new();
        let fun = self.map_expr(&call.fun, "Fun")?;
        self.builder.append(&mut children, fun)?;
        let lparen = self.builder.token_from_pos(Some(call.lparen), Tok::LParen, "Lparen")?;
        self.builder.append(&mut children, lparen)?;
        let mut arguments = Vec::with_capacity(call.args.len());
        for (i, arg) in call.args.iter().enumerate() {
            let id = self.map_expr(arg, &index_label(i))?;
            arguments.extend(id);
            self.builder.append(&mut children, id)?;
        }
        let ellipsis = self.builder.token_from_pos(call.ellipsis, Tok::Ellipsis, "Ellipsis")?;
        self.builder.append(&mut children, ellipsis)?;
        let rparen = self.builder.token_from_pos(Some(call.rparen), Tok::RParen, "Rparen")?;
        self.builder.append(&mut children, rparen)?;

        let fields = Fields::from([
            ("memberSelect", FieldValue::Node(fun)),
            (
                "returnType",
                FieldValue::Strings(self.enricher.call_result_types(call)),
            ),
            ("arguments", FieldValue::Nodes(arguments)),
        ]);
        self.builder
            .create_node(Some(call.key()), children, NodeType::FunctionInvocation, fields)
    }

    fn map_composite_lit(&mut self, key: NativeKey, lit: &CompositeLit) -> MapResult {
        let mut children = Vec::new();
        let ty = self.map_opt_boxed(lit.ty.as_ref(), "Type")?;
        self.builder.append(&mut children, ty)?;
        let lbrace = self.builder.token_from_pos(Some(lit.lbrace), Tok::LBrace, "Lbrace")?;
        self.builder.append(&mut children, lbrace)?;
        let mut elements = Vec::with_capacity(lit.elts.len());
        for (i, elt) in lit.elts.iter().enumerate() {
            let id = self.map_expr(elt, &index_label(i))?;
            elements.extend(id);
            self.builder.append(&mut children, id)?;
        }
        let rbrace = self.builder.token_from_pos(Some(lit.rbrace), Tok::RBrace, "Rbrace")?;
        self.builder.append(&mut children, rbrace)?;

        let fields = Fields::from([
            ("type", FieldValue::Node(ty)),
            ("elements", FieldValue::Nodes(elements)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::CompositeLiteral, fields)
    }

    fn map_key_value(&mut self, key: NativeKey, expr: &KeyValueExpr) -> MapResult {
        let mut children = Vec::new();
        let k = self.map_expr(&expr.key, "Key")?;
        self.builder.append(&mut children, k)?;
        let colon = self.builder.token_from_pos(Some(expr.colon), Tok::Colon, "Colon")?;
        self.builder.append(&mut children, colon)?;
        let value = self.map_expr(&expr.value, "Value")?;
        self.builder.append(&mut children, value)?;

        let fields = Fields::from([
            ("key", FieldValue::Node(k)),
            ("value", FieldValue::Node(value)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::KeyValue, fields)
    }

    fn map_ellipsis(&mut self, key: NativeKey, expr: &Ellipsis) -> MapResult {
        let mut children = Vec::new();
        let token = self
            .builder
            .token_from_pos(Some(expr.ellipsis), Tok::Ellipsis, "Ellipsis")?;
        self.builder.append(&mut children, token)?;
        let element = self.map_opt_boxed(expr.elt.as_ref(), "Elt")?;
        self.builder.append(&mut children, element)?;

        let fields = Fields::from([
            ("ellipsis", self.range_field(token)),
            ("element", FieldValue::Node(element)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::Ellipsis, fields)
    }

    // ---- Selectors and indexing ----

    fn map_paren(&mut self, key: NativeKey, expr: &ParenExpr) -> MapResult {
        let mut children = Vec::new();
        let lparen = self.builder.token_from_pos(Some(expr.lparen), Tok::LParen, "Lparen")?;
        self.builder.append(&mut children, lparen)?;
        let x = self.map_expr(&expr.x, "X")?;
        self.builder.append(&mut children, x)?;
        let rparen = self.builder.token_from_pos(Some(expr.rparen), Tok::RParen, "Rparen")?;
        self.builder.append(&mut children, rparen)?;

        let fields = Fields::from([
            ("leftParenthesis", self.range_field(lparen)),
            (EXPRESSION, FieldValue::Node(x)),
            ("rightParenthesis", self.range_field(rparen)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::ParenthesizedExpression, fields)
    }

    fn map_selector(&mut self, key: NativeKey, expr: &SelectorExpr) -> MapResult {
        let mut children = Vec::new();
        let x = self.map_expr(&expr.x, "X")?;
        self.builder.append(&mut children, x)?;
        let sel = self.map_ident(&expr.sel, "Sel")?;
        self.builder.append(&mut children, sel)?;

        let fields = Fields::from([
            (EXPRESSION, FieldValue::Node(x)),
            (IDENTIFIER, FieldValue::Node(sel)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::MemberSelect, fields)
    }

    fn map_index(&mut self, key: NativeKey, expr: &IndexExpr) -> MapResult {
        let mut children = Vec::new();
        let x = self.map_expr(&expr.x, "X")?;
        self.builder.append(&mut children, x)?;
        let lbrack = self.builder.token_from_pos(Some(expr.lbrack), Tok::LBrack, "Lbrack")?;
        self.builder.append(&mut children, lbrack)?;
        let index = self.map_expr(&expr.index, "Index")?;
        self.builder.append(&mut children, index)?;
        let rbrack = self.builder.token_from_pos(Some(expr.rbrack), Tok::RBrack, "Rbrack")?;
        self.builder.append(&mut children, rbrack)?;

        let fields = Fields::from([
            (EXPRESSION, FieldValue::Node(x)),
            ("index", FieldValue::Node(index)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::IndexExpression, fields)
    }

    fn map_index_list(&mut self, key: NativeKey, expr: &IndexListExpr) -> MapResult {
        let mut children = Vec::new();
        let x = self.map_expr(&expr.x, "X")?;
        self.builder.append(&mut children, x)?;
        let lbrack = self.builder.token_from_pos(Some(expr.lbrack), Tok::LBrack, "Lbrack")?;
        self.builder.append(&mut children, lbrack)?;
        let mut indices = Vec::with_capacity(expr.indices.len());
        for (i, index) in expr.indices.iter().enumerate() {
            let id = self.map_expr(index, &index_label(i))?;
            indices.extend(id);
            self.builder.append(&mut children, id)?;
        }
        let rbrack = self.builder.token_from_pos(Some(expr.rbrack), Tok::RBrack, "Rbrack")?;
        self.builder.append(&mut children, rbrack)?;

        let fields = Fields::from([
            (EXPRESSION, FieldValue::Node(x)),
            ("indices", FieldValue::Nodes(indices)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::IndexListExpression, fields)
    }

    fn map_slice(&mut self, key: NativeKey, expr: &SliceExpr) -> MapResult {
        let mut children = Vec::new();
        let x = self.map_expr(&expr.x, "X")?;
        self.builder.append(&mut children, x)?;
        let lbrack = self.builder.token_from_pos(Some(expr.lbrack), Tok::LBrack, "Lbrack")?;
        self.builder.append(&mut children, lbrack)?;
        let low = self.map_opt_boxed(expr.low.as_ref(), "Low")?;
        self.builder.append(&mut children, low)?;
        let high = self.map_opt_boxed(expr.high.as_ref(), "High")?;
        self.builder.append(&mut children, high)?;
        let max = self.map_opt_boxed(expr.max.as_ref(), "Max")?;
        self.builder.append(&mut children, max)?;
        let rbrack = self.builder.token_from_pos(Some(expr.rbrack), Tok::RBrack, "Rbrack")?;
        self.builder.append(&mut children, rbrack)?;

        let fields = Fields::from([
            (EXPRESSION, FieldValue::Node(x)),
            ("low", FieldValue::Node(low)),
            ("high", FieldValue::Node(high)),
            ("max", FieldValue::Node(max)),
            ("slice3", FieldValue::Bool(expr.slice3)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::Slice, fields)
    }

    fn map_type_assert(&mut self, key: NativeKey, expr: &TypeAssertExpr) -> MapResult {
        let mut children = Vec::new();
        let x = self.map_expr(&expr.x, "X")?;
        self.builder.append(&mut children, x)?;
        let lparen = self.builder.token_from_pos(Some(expr.lparen), Tok::LParen, "Lparen")?;
        self.builder.append(&mut children, lparen)?;
        let ty = self.map_opt_boxed(expr.ty.as_ref(), "Type")?;
        self.builder.append(&mut children, ty)?;
        let rparen = self.builder.token_from_pos(Some(expr.rparen), Tok::RParen, "Rparen")?;
        self.builder.append(&mut children, rparen)?;

        let fields = Fields::from([
            (EXPRESSION, FieldValue::Node(x)),
            ("type", FieldValue::Node(ty)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::TypeAssertionExpression, fields)
    }

    // ---- Types ----

    fn map_array_type(&mut self, key: NativeKey, ty: &ArrayType) -> MapResult {
        let mut children = Vec::new();
        let lbrack = self.builder.token_from_pos(Some(ty.lbrack), Tok::LBrack, "Lbrack")?;
        self.builder.append(&mut children, lbrack)?;
        let length = match &ty.len {
            Some(len) => {
                let id = self.map_expr(len, "Len")?;
                self.builder.append(&mut children, id)?;
                FieldValue::Node(id)
            }
            None => FieldValue::Null,
        };
        let element = self.map_expr(&ty.elt, "Elt")?;
        self.builder.append(&mut children, element)?;

        let fields = Fields::from([
            ("length", length),
            ("element", FieldValue::Node(element)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::ArrayType, fields)
    }

    fn map_map_type(&mut self, key: NativeKey, ty: &MapType) -> MapResult {
        let mut children = Vec::new();
        let map = self.builder.token_from_pos(Some(ty.map), Tok::Map, "Map")?;
        self.builder.append(&mut children, map)?;
        let k = self.map_expr(&ty.key, "Key")?;
        self.builder.append(&mut children, k)?;
        let value = self.map_expr(&ty.value, "Value")?;
        self.builder.append(&mut children, value)?;

        let fields = Fields::from([
            ("key", FieldValue::Node(k)),
            ("value", FieldValue::Node(value)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::MapType, fields)
    }
}

fn binary_operator(tok: Tok) -> Option<&'static str> {
    let operator = match tok {
        Tok::Add => "PLUS",
        Tok::Sub => "MINUS",
        Tok::Mul => "TIMES",
        Tok::Quo => "DIVIDED_BY",
        Tok::Eql => "EQUAL_TO",
        Tok::Neq => "NOT_EQUAL_TO",
        Tok::Gtr => "GREATER_THAN",
        Tok::Geq => "GREATER_THAN_OR_EQUAL_TO",
        Tok::Lss => "LESS_THAN",
        Tok::Leq => "LESS_THAN_OR_EQUAL_TO",
        Tok::LAnd => "CONDITIONAL_AND",
        Tok::LOr => "CONDITIONAL_OR",
        Tok::And => "BITWISE_AND",
        Tok::Or => "BITWISE_OR",
        Tok::Xor => "BITWISE_XOR",
        Tok::Shl => "BITWISE_SHL",
        Tok::Shr => "BITWISE_SHR",
        Tok::AndNot => "BITWISE_AND_NOT",
        _ => return None,
    };
    Some(operator)
}
