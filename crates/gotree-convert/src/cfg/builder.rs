//! Structured basic-block construction over a native function body.
//!
//! Blocks are numbered in creation order; block 0 is the entry. Every call
//! is assumed to return, so only `return`, branches and the structured
//! statements end a block.

use gotree_core::collections::{FxHashMap, SmallVec2};

use crate::native::{
    BlockStmt, BranchStmt, CaseClause, CommClause, Expr, ForStmt, NativeKey, RangeStmt,
    SelectStmt, Spanned, Spec, Stmt, SwitchStmt, Tok, TypeSwitchStmt,
};

/// A block as built, referencing native nodes by key.
#[derive(Debug, Clone, Default)]
pub struct RawBlock {
    pub nodes: Vec<NativeKey>,
    pub succs: SmallVec2<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Targets {
    brk: Option<usize>,
    cont: Option<usize>,
    fallthrough: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct LabelBlock {
    goto: usize,
    brk: Option<usize>,
    cont: Option<usize>,
}

pub struct BlockBuilder<'a> {
    blocks: Vec<RawBlock>,
    current: usize,
    labels: FxHashMap<&'a str, LabelBlock>,
    targets: Vec<Targets>,
}

impl<'a> BlockBuilder<'a> {
    pub fn build(body: &'a BlockStmt) -> Vec<RawBlock> {
        let mut builder = Self {
            blocks: Vec::new(),
            current: 0,
            labels: FxHashMap::default(),
            targets: Vec::new(),
        };
        builder.current = builder.new_block();
        builder.stmt_list(&body.list);
        builder.blocks
    }

    // ---- Block plumbing ----

    fn new_block(&mut self) -> usize {
        self.blocks.push(RawBlock::default());
        self.blocks.len() - 1
    }

    fn add(&mut self, key: NativeKey) {
        self.blocks[self.current].nodes.push(key);
    }

    fn jump(&mut self, target: usize) {
        self.blocks[self.current].succs.push(target);
    }

    fn if_else(&mut self, then: usize, otherwise: usize) {
        let succs = &mut self.blocks[self.current].succs;
        succs.push(then);
        succs.push(otherwise);
    }

    /// Branches on `expr`, splitting `&&`, `||` and `!` into their own
    /// blocks and looking through parentheses.
    fn cond(&mut self, expr: &'a Expr, then: usize, otherwise: usize) {
        match expr {
            Expr::Binary(binary) if binary.op == Tok::LAnd => {
                let cond_true = self.new_block();
                self.cond(&binary.x, cond_true, otherwise);
                self.current = cond_true;
                self.cond(&binary.y, then, otherwise);
            }
            Expr::Binary(binary) if binary.op == Tok::LOr => {
                let cond_false = self.new_block();
                self.cond(&binary.x, then, cond_false);
                self.current = cond_false;
                self.cond(&binary.y, then, otherwise);
            }
            Expr::Unary(unary) if unary.op == Tok::Not => self.cond(&unary.x, otherwise, then),
            Expr::Paren(paren) => self.cond(&paren.x, then, otherwise),
            _ => {
                self.add(expr.key());
                self.if_else(then, otherwise);
            }
        }
    }

    fn label_block(&mut self, name: &'a str) -> LabelBlock {
        if let Some(block) = self.labels.get(name) {
            return *block;
        }
        let goto = self.new_block();
        let block = LabelBlock {
            goto,
            brk: None,
            cont: None,
        };
        self.labels.insert(name, block);
        block
    }

    fn bind_label(&mut self, label: Option<&'a str>, brk: usize, cont: Option<usize>) {
        if let Some(block) = label.and_then(|name| self.labels.get_mut(name)) {
            block.brk = Some(brk);
            if cont.is_some() {
                block.cont = cont;
            }
        }
    }

    fn with_targets(&mut self, targets: Targets, body: &'a [Stmt]) {
        self.targets.push(targets);
        self.stmt_list(body);
        self.targets.pop();
    }

    // ---- Statements ----

    fn stmt_list(&mut self, list: &'a [Stmt]) {
        for stmt in list {
            self.stmt(stmt, None);
        }
    }

    fn stmt(&mut self, stmt: &'a Stmt, label: Option<&'a str>) {
        match stmt {
            Stmt::Bad(_)
            | Stmt::Send(_)
            | Stmt::IncDec(_)
            | Stmt::Go(_)
            | Stmt::Defer(_)
            | Stmt::Empty(_)
            | Stmt::Assign(_)
            | Stmt::Expr(_) => self.add(stmt.key()),

            Stmt::Decl(decl) => {
                if decl.tok == Tok::Var {
                    for spec in &decl.specs {
                        if let Spec::Value(_) = spec {
                            self.add(spec.key());
                        }
                    }
                }
            }

            Stmt::Labeled(labeled) => {
                let name = labeled.label.name.as_str();
                let target = self.label_block(name).goto;
                self.jump(target);
                self.current = target;
                self.stmt(&labeled.stmt, Some(name));
            }

            Stmt::Return(_) => {
                self.add(stmt.key());
                self.current = self.new_block();
            }

            Stmt::Branch(branch) => self.branch_stmt(branch),

            Stmt::Block(block) => self.stmt_list(&block.list),

            Stmt::If(if_stmt) => {
                if let Some(init) = &if_stmt.init {
                    self.stmt(init, None);
                }
                let then = self.new_block();
                let done = self.new_block();
                let otherwise = match if_stmt.else_branch {
                    Some(_) => self.new_block(),
                    None => done,
                };
                self.cond(&if_stmt.cond, then, otherwise);
                self.current = then;
                self.stmt_list(&if_stmt.body.list);
                self.jump(done);
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.current = otherwise;
                    self.stmt(else_branch, None);
                    self.jump(done);
                }
                self.current = done;
            }

            Stmt::Switch(switch) => self.switch_stmt(switch, label),
            Stmt::TypeSwitch(switch) => self.type_switch_stmt(switch, label),
            Stmt::Select(select) => self.select_stmt(select, label),
            Stmt::For(for_stmt) => self.for_stmt(for_stmt, label),
            Stmt::Range(range) => self.range_stmt(range, label),

            // Only reachable through their switch or select.
            Stmt::CaseClause(_) | Stmt::CommClause(_) => {}
        }
    }

    fn branch_stmt(&mut self, branch: &'a BranchStmt) {
        let label = branch.label.as_ref().map(|l| l.name.as_str());
        let target = match branch.tok {
            Tok::Break => match label {
                Some(name) => self.label_block(name).brk,
                None => self.targets.iter().rev().find_map(|t| t.brk),
            },
            Tok::Continue => match label {
                Some(name) => self.label_block(name).cont,
                None => self.targets.iter().rev().find_map(|t| t.cont),
            },
            Tok::Fallthrough => self.targets.iter().rev().find_map(|t| t.fallthrough),
            Tok::Goto => label.map(|name| self.label_block(name).goto),
            _ => None,
        };
        // Ill-formed jumps (continue outside a loop) go nowhere reachable.
        let target = match target {
            Some(block) => block,
            None => self.new_block(),
        };
        self.jump(target);
        self.current = self.new_block();
    }

    fn switch_stmt(&mut self, switch: &'a SwitchStmt, label: Option<&'a str>) {
        if let Some(init) = &switch.init {
            self.stmt(init, None);
        }
        if let Some(tag) = &switch.tag {
            self.add(tag.key());
        }
        let done = self.new_block();
        self.bind_label(label, done, None);

        let clauses = case_clauses(&switch.body);
        let mut default: Option<(&'a [Stmt], usize, usize)> = None;
        let mut fallthru: Option<usize> = None;
        for (i, clause) in clauses.iter().copied().enumerate() {
            let body = match fallthru {
                Some(block) => block,
                None => self.new_block(),
            };
            // Fallthrough targets the next clause in source order even though
            // the default clause is evaluated last.
            let next_body = if i + 1 < clauses.len() {
                self.new_block()
            } else {
                done
            };
            fallthru = Some(next_body);

            if clause.list.is_empty() {
                default = Some((clause.body.as_slice(), body, next_body));
                continue;
            }

            let mut next_cond = self.current;
            for cond in &clause.list {
                next_cond = self.new_block();
                self.add(cond.key());
                self.if_else(body, next_cond);
                self.current = next_cond;
            }
            self.current = body;
            self.with_targets(
                Targets {
                    brk: Some(done),
                    cont: None,
                    fallthrough: Some(next_body),
                },
                &clause.body,
            );
            self.jump(done);
            self.current = next_cond;
        }
        if let Some((body, block, next_body)) = default {
            self.jump(block);
            self.current = block;
            self.with_targets(
                Targets {
                    brk: Some(done),
                    cont: None,
                    fallthrough: Some(next_body),
                },
                body,
            );
        }
        self.jump(done);
        self.current = done;
    }

    fn type_switch_stmt(&mut self, switch: &'a TypeSwitchStmt, label: Option<&'a str>) {
        if let Some(init) = &switch.init {
            self.stmt(init, None);
        }
        self.stmt(&switch.assign, None);
        let done = self.new_block();
        self.bind_label(label, done, None);

        let mut default: Option<&'a CaseClause> = None;
        for clause in case_clauses(&switch.body) {
            if clause.list.is_empty() {
                default = Some(clause);
                continue;
            }
            let body = self.new_block();
            let mut next = self.current;
            // Case types are not evaluated, only branched on.
            for _ in &clause.list {
                next = self.new_block();
                self.if_else(body, next);
                self.current = next;
            }
            self.current = body;
            self.type_case_body(clause, done);
            self.current = next;
        }
        match default {
            Some(clause) => self.type_case_body(clause, done),
            None => self.jump(done),
        }
        self.current = done;
    }

    fn type_case_body(&mut self, clause: &'a CaseClause, done: usize) {
        self.with_targets(
            Targets {
                brk: Some(done),
                ..Targets::default()
            },
            &clause.body,
        );
        self.jump(done);
    }

    fn select_stmt(&mut self, select: &'a SelectStmt, label: Option<&'a str>) {
        let clauses = comm_clauses(&select.body);
        for clause in clauses.iter().copied() {
            if let Some(comm) = &clause.comm {
                self.stmt(comm, None);
            }
        }
        let done = self.new_block();
        self.bind_label(label, done, None);

        let mut default: Option<&'a [Stmt]> = None;
        for clause in clauses.iter().copied() {
            let Some(comm) = &clause.comm else {
                default = Some(clause.body.as_slice());
                continue;
            };
            let body = self.new_block();
            let next = self.new_block();
            self.if_else(body, next);
            self.current = body;
            if let Stmt::Assign(assign) = comm.as_ref() {
                if let Some(lhs) = assign.lhs.first() {
                    self.add(lhs.key());
                }
            }
            self.with_targets(
                Targets {
                    brk: Some(done),
                    ..Targets::default()
                },
                &clause.body,
            );
            self.jump(done);
            self.current = next;
        }
        if let Some(body) = default {
            self.with_targets(
                Targets {
                    brk: Some(done),
                    ..Targets::default()
                },
                body,
            );
            self.jump(done);
        }
        self.current = done;
    }

    fn for_stmt(&mut self, for_stmt: &'a ForStmt, label: Option<&'a str>) {
        if let Some(init) = &for_stmt.init {
            self.stmt(init, None);
        }
        let body = self.new_block();
        let done = self.new_block();
        let loop_block = match for_stmt.cond {
            Some(_) => self.new_block(),
            None => body,
        };
        let cont = match for_stmt.post {
            Some(_) => self.new_block(),
            None => loop_block,
        };
        self.bind_label(label, done, Some(cont));

        self.jump(loop_block);
        self.current = loop_block;
        if let Some(cond) = &for_stmt.cond {
            self.cond(cond, body, done);
            self.current = body;
        }
        self.with_targets(
            Targets {
                brk: Some(done),
                cont: Some(cont),
                fallthrough: None,
            },
            &for_stmt.body.list,
        );
        self.jump(cont);

        if let Some(post) = &for_stmt.post {
            self.current = cont;
            self.stmt(post, None);
            self.jump(loop_block);
        }
        self.current = done;
    }

    fn range_stmt(&mut self, range: &'a RangeStmt, label: Option<&'a str>) {
        self.add(range.x.key());
        if let Some(key) = &range.key {
            self.add(key.key());
        }
        if let Some(value) = &range.value {
            self.add(value.key());
        }

        let loop_block = self.new_block();
        self.jump(loop_block);
        self.current = loop_block;

        let body = self.new_block();
        let done = self.new_block();
        self.if_else(body, done);
        self.current = body;
        self.bind_label(label, done, Some(loop_block));

        self.with_targets(
            Targets {
                brk: Some(done),
                cont: Some(loop_block),
                fallthrough: None,
            },
            &range.body.list,
        );
        self.jump(loop_block);
        self.current = done;
    }
}

fn case_clauses(body: &BlockStmt) -> Vec<&CaseClause> {
    body.list
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::CaseClause(clause) => Some(clause),
            _ => None,
        })
        .collect()
}

fn comm_clauses(body: &BlockStmt) -> Vec<&CommClause> {
    body.list
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::CommClause(clause) => Some(clause),
            _ => None,
        })
        .collect()
}
