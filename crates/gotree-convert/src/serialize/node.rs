//! Writers for nodes, comments and tokens.

use gotree_core::errors::ConvertError;

use super::json::{write_str, write_value};
use crate::tree::{FieldValue, NodeId, TextRange, Tree, TokenKind};

/// Writes the node `id` (or `null`) starting at `prefix`, nesting children
/// one `indent` deeper.
pub(crate) fn write_node(
    dst: &mut String,
    tree: &Tree,
    id: Option<NodeId>,
    prefix: &str,
    indent: &str,
) {
    let Some(id) = id else {
        dst.push_str(prefix);
        dst.push_str("null");
        return;
    };
    let node = tree.get(id);
    dst.push_str(prefix);
    dst.push_str("{\"@type\": ");
    write_str(dst, node.node_type.as_str());
    dst.push_str(", \"metaData\": ");
    write_range(dst, &node.range);

    let nested = format!("{prefix}{indent}");
    for (name, value) in node.fields.iter().rev() {
        if matches!(value, FieldValue::Suppressed) {
            continue;
        }
        dst.push_str(",\"");
        dst.push_str(name);
        dst.push_str("\":");
        match value {
            FieldValue::Node(child) => {
                dst.push('\n');
                write_node(dst, tree, *child, &nested, indent);
            }
            FieldValue::Nodes(children) => write_node_list(dst, tree, children, prefix, indent),
            scalar => write_scalar(dst, scalar),
        }
    }
    dst.push('}');
}

fn write_node_list(dst: &mut String, tree: &Tree, ids: &[NodeId], prefix: &str, indent: &str) {
    if ids.is_empty() {
        dst.push_str("[]");
        return;
    }
    let nested = format!("{prefix}{indent}");
    dst.push_str("[\n");
    for (i, &id) in ids.iter().enumerate() {
        if i > 0 {
            dst.push_str(",\n");
        }
        write_node(dst, tree, Some(id), &nested, indent);
    }
    dst.push('\n');
    dst.push_str(prefix);
    dst.push(']');
}

fn write_scalar(dst: &mut String, value: &FieldValue) {
    match value {
        FieldValue::Range(Some(range)) => write_range(dst, range),
        FieldValue::Str(s) => write_str(dst, s),
        FieldValue::Int(n) => dst.push_str(&n.to_string()),
        FieldValue::Bool(b) => dst.push_str(if *b { "true" } else { "false" }),
        FieldValue::Strings(items) => write_value(dst, items),
        FieldValue::Cfg(Some(cfg)) => dst.push_str(&cfg.to_json()),
        FieldValue::Range(None)
        | FieldValue::Cfg(None)
        | FieldValue::Null
        | FieldValue::Node(_)
        | FieldValue::Nodes(_)
        | FieldValue::Suppressed => dst.push_str("null"),
    }
}

pub(crate) fn write_range(dst: &mut String, range: &TextRange) {
    write_str(dst, &range.to_string());
}

/// `{"text":…, "contentText":…, "range":…, "contentRange": …}` with the
/// comment markers stripped from the content.
pub(crate) fn write_comment(dst: &mut String, tree: &Tree, id: NodeId) -> Result<(), ConvertError> {
    let node = tree.get(id);
    let Some(token) = &node.token else {
        return Err(ConvertError::Comment {
            text: String::new(),
        });
    };
    let text = token.text.as_str();
    let mut content_range = token.range;
    content_range.start_column += 2;
    let content = if let Some(rest) = text.strip_prefix("//") {
        rest
    } else if text.starts_with("/*") && text.len() >= 4 {
        content_range.end_column = content_range.end_column.saturating_sub(2);
        &text[2..text.len() - 2]
    } else {
        return Err(ConvertError::Comment {
            text: text.to_string(),
        });
    };

    dst.push_str("{\"text\":");
    write_str(dst, text);
    dst.push_str(", \"contentText\":");
    write_str(dst, content);
    dst.push_str(", \"range\":");
    write_range(dst, &token.range);
    dst.push_str(", \"contentRange\": ");
    write_range(dst, &content_range);
    dst.push('}');
    Ok(())
}

/// `{"text":…,"textRange":…}` plus `"type"` for anything but `OTHER`.
pub(crate) fn write_token(dst: &mut String, tree: &Tree, id: NodeId, prefix: &str) {
    let Some(token) = &tree.get(id).token else {
        return;
    };
    dst.push_str(prefix);
    dst.push_str("{\"text\":");
    write_str(dst, &token.text);
    dst.push_str(",\"textRange\":");
    write_range(dst, &token.range);
    if token.kind != TokenKind::Other {
        dst.push_str(",\"type\":");
        write_str(dst, token.kind.as_str());
    }
    dst.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Fields, Node, NodeType, Token};

    fn leaf(tree: &mut Tree, text: &str, range: TextRange, kind: TokenKind) -> NodeId {
        tree.push(Node {
            node_type: NodeType::Native,
            range,
            offset: 0,
            end_offset: text.len(),
            token: Some(Token {
                text: text.to_string(),
                range,
                kind,
            }),
            children: Vec::new(),
            fields: Fields::new(),
        })
    }

    #[test]
    fn test_line_comment_content() {
        let mut tree = Tree::new();
        let id = leaf(
            &mut tree,
            "// hi",
            TextRange::new(1, 0, 1, 5),
            TokenKind::Comment,
        );
        let mut out = String::new();
        write_comment(&mut out, &tree, id).unwrap();
        assert_eq!(
            out,
            r#"{"text":"// hi", "contentText":" hi", "range":"1:0::5", "contentRange": "1:2::5"}"#
        );
    }

    #[test]
    fn test_block_comment_content() {
        let mut tree = Tree::new();
        let id = leaf(
            &mut tree,
            "/* a\nb */",
            TextRange::new(2, 4, 3, 4),
            TokenKind::Comment,
        );
        let mut out = String::new();
        write_comment(&mut out, &tree, id).unwrap();
        assert_eq!(
            out,
            r#"{"text":"/* a\nb */", "contentText":" a\nb ", "range":"2:4:3:4", "contentRange": "2:6:3:2"}"#
        );
    }

    #[test]
    fn test_unknown_comment_is_rejected() {
        let mut tree = Tree::new();
        let id = leaf(&mut tree, "# no", TextRange::new(1, 0, 1, 4), TokenKind::Comment);
        let err = write_comment(&mut String::new(), &tree, id).unwrap_err();
        assert!(matches!(err, ConvertError::Comment { text } if text == "# no"));
    }

    #[test]
    fn test_other_tokens_have_no_type() {
        let mut tree = Tree::new();
        let paren = leaf(&mut tree, "(", TextRange::new(1, 4, 1, 5), TokenKind::Other);
        let func = leaf(&mut tree, "func", TextRange::new(1, 0, 1, 4), TokenKind::Keyword);
        let mut out = String::new();
        write_token(&mut out, &tree, paren, "");
        write_token(&mut out, &tree, func, " ");
        assert_eq!(
            out,
            r#"{"text":"(","textRange":"1:4::5"} {"text":"func","textRange":"1:0::4","type":"KEYWORD"}"#
        );
    }

    #[test]
    fn test_fields_in_reverse_name_order() {
        let mut tree = Tree::new();
        let x = leaf(&mut tree, "x", TextRange::new(1, 0, 1, 1), TokenKind::Other);
        let root = tree.push(Node {
            node_type: NodeType::ExpressionStatement,
            range: TextRange::new(1, 0, 1, 1),
            offset: 0,
            end_offset: 1,
            token: None,
            children: vec![x],
            fields: Fields::from([
                ("alpha", FieldValue::Int(1)),
                ("beta", FieldValue::Nodes(Vec::new())),
                ("gamma", FieldValue::Node(None)),
                ("hidden", FieldValue::Suppressed),
                ("zeta", FieldValue::Range(None)),
            ]),
        });
        let mut out = String::new();
        write_node(&mut out, &tree, Some(root), "", "  ");
        assert_eq!(
            out,
            "{\"@type\": \"ExpressionStatement\", \"metaData\": \"1:0::1\",\"zeta\":null,\"gamma\":\n  null,\"beta\":[],\"alpha\":1}"
        );
    }

    #[test]
    fn test_node_lists_are_one_per_line() {
        let mut tree = Tree::new();
        let a = leaf(&mut tree, "a", TextRange::new(1, 0, 1, 1), TokenKind::Other);
        let b = leaf(&mut tree, "b", TextRange::new(1, 2, 1, 3), TokenKind::Other);
        let root = tree.push(Node {
            node_type: NodeType::Native,
            range: TextRange::new(1, 0, 1, 3),
            offset: 0,
            end_offset: 3,
            token: None,
            children: vec![a, b],
            fields: Fields::from([("children", FieldValue::Nodes(vec![a, b]))]),
        });
        let mut out = String::new();
        write_node(&mut out, &tree, Some(root), "  ", "  ");
        let expected = "  {\"@type\": \"Native\", \"metaData\": \"1:0::3\",\"children\":[\n    {\"@type\": \"Native\", \"metaData\": \"1:0::1\"},\n    {\"@type\": \"Native\", \"metaData\": \"1:2::3\"}\n  ]}";
        assert_eq!(out, expected);
    }
}
