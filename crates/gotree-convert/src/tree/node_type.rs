//! Generic node types understood by the downstream analyzers.

use std::fmt;

/// `Native` for untyped wrappers and tokens, otherwise a canonical construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Native,
    TopLevel,
    PackageDeclaration,
    ImportDeclaration,
    ImportSpecification,
    ClassDeclaration,
    VariableDeclaration,
    FunctionDeclaration,
    Parameter,
    Block,
    Return,
    Identifier,
    Literal,
    PlaceHolder,
    StringLiteral,
    IntegerLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    AssignmentExpression,
    LeftRightHandSide,
    Jump,
    MatchCase,
    Match,
    ExpressionStatement,
    Loop,
    If,
    UnaryExpression,
    ArrayType,
    BinaryExpression,
    FunctionInvocation,
    CompositeLiteral,
    Ellipsis,
    IndexExpression,
    IndexListExpression,
    KeyValue,
    MapType,
    ParenthesizedExpression,
    MemberSelect,
    Slice,
    StarExpression,
    TypeAssertionExpression,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Native => "Native",
            NodeType::TopLevel => "TopLevel",
            NodeType::PackageDeclaration => "PackageDeclaration",
            NodeType::ImportDeclaration => "ImportDeclaration",
            NodeType::ImportSpecification => "ImportSpecification",
            NodeType::ClassDeclaration => "ClassDeclaration",
            NodeType::VariableDeclaration => "VariableDeclaration",
            NodeType::FunctionDeclaration => "FunctionDeclaration",
            NodeType::Parameter => "Parameter",
            NodeType::Block => "Block",
            NodeType::Return => "Return",
            NodeType::Identifier => "Identifier",
            NodeType::Literal => "Literal",
            NodeType::PlaceHolder => "PlaceHolder",
            NodeType::StringLiteral => "StringLiteral",
            NodeType::IntegerLiteral => "IntegerLiteral",
            NodeType::FloatLiteral => "FloatLiteral",
            NodeType::ImaginaryLiteral => "ImaginaryLiteral",
            NodeType::AssignmentExpression => "AssignmentExpression",
            NodeType::LeftRightHandSide => "LeftRightHandSide",
            NodeType::Jump => "Jump",
            NodeType::MatchCase => "MatchCase",
            NodeType::Match => "Match",
            NodeType::ExpressionStatement => "ExpressionStatement",
            NodeType::Loop => "Loop",
            NodeType::If => "If",
            NodeType::UnaryExpression => "UnaryExpression",
            NodeType::ArrayType => "ArrayType",
            NodeType::BinaryExpression => "BinaryExpression",
            NodeType::FunctionInvocation => "FunctionInvocation",
            NodeType::CompositeLiteral => "CompositeLiteral",
            NodeType::Ellipsis => "Ellipsis",
            NodeType::IndexExpression => "IndexExpression",
            NodeType::IndexListExpression => "IndexListExpression",
            NodeType::KeyValue => "KeyValue",
            NodeType::MapType => "MapType",
            NodeType::ParenthesizedExpression => "ParenthesizedExpression",
            NodeType::MemberSelect => "MemberSelect",
            NodeType::Slice => "Slice",
            NodeType::StarExpression => "StarExpression",
            NodeType::TypeAssertionExpression => "TypeAssertionExpression",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
