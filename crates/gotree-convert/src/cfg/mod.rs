//! Control-flow graph of one function body, expressed in generic-node ids.

pub mod builder;
pub mod ids;

use serde::{Serialize, Serializer};

pub use builder::{BlockBuilder, RawBlock};
pub use ids::{IdScope, IdScopes};

use crate::native::BlockStmt;

/// Basic blocks of a function, entry first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cfg {
    #[serde(rename = "Blocks")]
    pub blocks: Vec<CfgBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CfgBlock {
    /// `__cfgId`s of the nodes evaluated in this block, in order.
    #[serde(rename = "Node", serialize_with = "empty_as_null")]
    pub node_ids: Vec<i32>,
    /// Indexes into [`Cfg::blocks`].
    #[serde(rename = "Successors", serialize_with = "empty_as_null")]
    pub successors: Vec<i32>,
}

/// Blocks with no nodes or no successors carry `null` rather than `[]`.
fn empty_as_null<S: Serializer>(list: &[i32], serializer: S) -> Result<S::Ok, S::Error> {
    if list.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.collect_seq(list)
    }
}

impl Cfg {
    /// Builds the graph of `body` and translates native keys through
    /// `scope`. Nodes that never received an id keep their slot as 0.
    pub fn extract(body: &BlockStmt, scope: &IdScope) -> Self {
        let raw = BlockBuilder::build(body);
        let blocks: Vec<CfgBlock> = raw
            .into_iter()
            .map(|block| CfgBlock {
                node_ids: block.nodes.iter().map(|key| scope.get(key).unwrap_or(0)).collect(),
                successors: block.succs.iter().map(|&s| s as i32).collect(),
            })
            .collect();
        tracing::debug!(blocks = blocks.len(), ids = scope.len(), "extracted cfg");
        Self { blocks }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("null"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::*;

    fn ident(pos: Pos, name: &str) -> Expr {
        Expr::Ident(Ident::new(pos, name))
    }

    fn expr_stmt(pos: Pos) -> Stmt {
        Stmt::Expr(ExprStmt { x: ident(pos, "x") })
    }

    fn block(pos: Pos, list: Vec<Stmt>) -> BlockStmt {
        BlockStmt {
            lbrace: pos,
            list,
            rbrace: pos + 50,
        }
    }

    fn scope_for(keys: &[NativeKey]) -> IdScope {
        let mut scope = IdScope::default();
        for key in keys {
            scope.assign(*key);
        }
        scope
    }

    #[test]
    fn test_straight_line_body_is_one_block() {
        let a = expr_stmt(10);
        let b = expr_stmt(20);
        let scope = scope_for(&[a.key(), b.key()]);
        let body = block(0, vec![a, b]);

        let cfg = Cfg::extract(&body, &scope);
        assert_eq!(cfg.blocks.len(), 1);
        assert_eq!(cfg.blocks[0].node_ids, vec![1, 2]);
        assert!(cfg.blocks[0].successors.is_empty());
    }

    #[test]
    fn test_if_without_else_joins_at_done() {
        let cond = ident(14, "c");
        let then_stmt = expr_stmt(20);
        let scope = scope_for(&[cond.key(), then_stmt.key()]);
        let body = block(
            0,
            vec![Stmt::If(IfStmt {
                if_pos: 11,
                init: None,
                cond,
                body: block(16, vec![then_stmt]),
                else_branch: None,
            })],
        );

        let cfg = Cfg::extract(&body, &scope);
        // entry, then, done
        assert_eq!(cfg.blocks.len(), 3);
        assert_eq!(cfg.blocks[0].node_ids, vec![1]);
        assert_eq!(cfg.blocks[0].successors, vec![1, 2]);
        assert_eq!(cfg.blocks[1].node_ids, vec![2]);
        assert_eq!(cfg.blocks[1].successors, vec![2]);
    }

    fn and_or(x: Expr, op: Tok, y: Expr) -> Expr {
        Expr::Binary(BinaryExpr {
            op_pos: x.end() + 1,
            x: Box::new(x),
            op,
            y: Box::new(y),
        })
    }

    fn if_stmt(cond: Expr, then_stmt: Stmt) -> Stmt {
        Stmt::If(IfStmt {
            if_pos: 11,
            init: None,
            cond,
            body: block(30, vec![then_stmt]),
            else_branch: None,
        })
    }

    #[test]
    fn test_and_condition_gets_a_block_per_operand() {
        let a = ident(14, "a");
        let b = ident(19, "b");
        let cond = and_or(a.clone(), Tok::LAnd, b.clone());
        let then_stmt = expr_stmt(32);
        let scope = scope_for(&[a.key(), b.key(), cond.key(), then_stmt.key()]);
        let body = block(0, vec![if_stmt(cond, then_stmt)]);

        let cfg = Cfg::extract(&body, &scope);
        // entry, then, done, cond.true
        assert_eq!(cfg.blocks.len(), 4);
        assert_eq!(cfg.blocks[0].node_ids, vec![1]);
        assert_eq!(cfg.blocks[0].successors, vec![3, 2]);
        assert_eq!(cfg.blocks[3].node_ids, vec![2]);
        assert_eq!(cfg.blocks[3].successors, vec![1, 2]);
        assert_eq!(cfg.blocks[1].node_ids, vec![4]);
        assert!(cfg.blocks.iter().all(|block| !block.node_ids.contains(&3)));
    }

    #[test]
    fn test_or_condition_falls_through_to_second_operand() {
        let a = ident(14, "a");
        let b = ident(19, "b");
        let cond = and_or(a.clone(), Tok::LOr, b.clone());
        let then_stmt = expr_stmt(32);
        let scope = scope_for(&[a.key(), b.key(), then_stmt.key()]);
        let body = block(0, vec![if_stmt(cond, then_stmt)]);

        let cfg = Cfg::extract(&body, &scope);
        // entry, then, done, cond.false
        assert_eq!(cfg.blocks.len(), 4);
        assert_eq!(cfg.blocks[0].successors, vec![1, 3]);
        assert_eq!(cfg.blocks[3].node_ids, vec![2]);
        assert_eq!(cfg.blocks[3].successors, vec![1, 2]);
    }

    #[test]
    fn test_negated_paren_condition_swaps_targets() {
        let a = ident(16, "a");
        let cond = Expr::Unary(UnaryExpr {
            op_pos: 14,
            op: Tok::Not,
            x: Box::new(Expr::Paren(ParenExpr {
                lparen: 15,
                x: Box::new(a.clone()),
                rparen: 17,
            })),
        });
        let then_stmt = expr_stmt(32);
        let scope = scope_for(&[a.key(), then_stmt.key()]);
        let body = block(0, vec![if_stmt(cond, then_stmt)]);

        let cfg = Cfg::extract(&body, &scope);
        assert_eq!(cfg.blocks.len(), 3);
        assert_eq!(cfg.blocks[0].node_ids, vec![1]);
        assert_eq!(cfg.blocks[0].successors, vec![2, 1]);
    }

    #[test]
    fn test_for_condition_is_split_like_if() {
        let a = ident(14, "a");
        let b = ident(19, "b");
        let inner = expr_stmt(32);
        let scope = scope_for(&[a.key(), b.key(), inner.key()]);
        let body = block(
            0,
            vec![Stmt::For(ForStmt {
                for_pos: 10,
                init: None,
                cond: Some(and_or(a, Tok::LAnd, b)),
                post: None,
                body: block(30, vec![inner]),
            })],
        );

        let cfg = Cfg::extract(&body, &scope);
        // entry, body, done, loop, cond.true
        assert_eq!(cfg.blocks.len(), 5);
        assert_eq!(cfg.blocks[0].successors, vec![3]);
        assert_eq!(cfg.blocks[3].node_ids, vec![1]);
        assert_eq!(cfg.blocks[3].successors, vec![4, 2]);
        assert_eq!(cfg.blocks[4].node_ids, vec![2]);
        assert_eq!(cfg.blocks[4].successors, vec![1, 2]);
        assert_eq!(cfg.blocks[1].node_ids, vec![3]);
        assert_eq!(cfg.blocks[1].successors, vec![3]);
    }

    #[test]
    fn test_infinite_for_loops_back_to_body() {
        let inner = expr_stmt(30);
        let scope = scope_for(&[inner.key()]);
        let body = block(
            0,
            vec![Stmt::For(ForStmt {
                for_pos: 10,
                init: None,
                cond: None,
                post: None,
                body: block(14, vec![inner]),
            })],
        );

        let cfg = Cfg::extract(&body, &scope);
        // entry, body (also loop and continue target), done
        assert_eq!(cfg.blocks[0].successors, vec![1]);
        assert_eq!(cfg.blocks[1].node_ids, vec![1]);
        assert_eq!(cfg.blocks[1].successors, vec![1]);
        assert!(cfg.blocks[2].node_ids.is_empty());
    }

    #[test]
    fn test_return_opens_unreachable_block() {
        let ret = Stmt::Return(ReturnStmt {
            return_pos: 10,
            results: Vec::new(),
        });
        let after = expr_stmt(30);
        let scope = scope_for(&[ret.key(), after.key()]);
        let body = block(0, vec![ret, after]);

        let cfg = Cfg::extract(&body, &scope);
        assert_eq!(cfg.blocks.len(), 2);
        assert_eq!(cfg.blocks[0].node_ids, vec![1]);
        assert!(cfg.blocks[0].successors.is_empty());
        assert_eq!(cfg.blocks[1].node_ids, vec![2]);
    }

    #[test]
    fn test_break_without_target_goes_to_fresh_block() {
        let brk = Stmt::Branch(BranchStmt {
            tok_pos: 10,
            tok: Tok::Break,
            label: None,
        });
        let body = block(0, vec![brk]);

        let cfg = Cfg::extract(&body, &IdScope::default());
        // entry jumps to a fresh block, then a third unreachable block opens.
        assert_eq!(cfg.blocks.len(), 3);
        assert_eq!(cfg.blocks[0].successors, vec![1]);
    }

    #[test]
    fn test_nodes_without_ids_keep_a_zero_slot() {
        let a = expr_stmt(10);
        let b = expr_stmt(20);
        let scope = scope_for(&[b.key()]);
        let body = block(0, vec![a, b]);

        let cfg = Cfg::extract(&body, &scope);
        assert_eq!(cfg.blocks[0].node_ids, vec![0, 1]);
    }

    #[test]
    fn test_json_shape() {
        let cfg = Cfg {
            blocks: vec![
                CfgBlock {
                    node_ids: vec![1, 2],
                    successors: vec![1],
                },
                CfgBlock {
                    node_ids: Vec::new(),
                    successors: Vec::new(),
                },
            ],
        };
        assert_eq!(
            cfg.to_json(),
            r#"{"Blocks":[{"Node":[1,2],"Successors":[1]},{"Node":null,"Successors":null}]}"#
        );
    }
}
