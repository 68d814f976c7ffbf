//! Closed enumeration of native node kinds and the identity key used to
//! cross-reference native nodes from the control-flow graph.

use super::ast::Pos;

/// Every struct kind of the native syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    // ---- Leaves and structure ----
    File,
    Ident,
    BasicLit,
    Comment,
    CommentGroup,
    Field,
    FieldList,

    // ---- Expressions ----
    BadExpr,
    Ellipsis,
    FuncLit,
    CompositeLit,
    ParenExpr,
    SelectorExpr,
    IndexExpr,
    IndexListExpr,
    SliceExpr,
    TypeAssertExpr,
    CallExpr,
    StarExpr,
    UnaryExpr,
    BinaryExpr,
    KeyValueExpr,
    ArrayType,
    StructType,
    FuncType,
    InterfaceType,
    MapType,
    ChanType,

    // ---- Statements ----
    BadStmt,
    DeclStmt,
    EmptyStmt,
    LabeledStmt,
    ExprStmt,
    SendStmt,
    IncDecStmt,
    AssignStmt,
    GoStmt,
    DeferStmt,
    ReturnStmt,
    BranchStmt,
    BlockStmt,
    IfStmt,
    CaseClause,
    SwitchStmt,
    TypeSwitchStmt,
    CommClause,
    SelectStmt,
    ForStmt,
    RangeStmt,

    // ---- Specifications and declarations ----
    ImportSpec,
    ValueSpec,
    TypeSpec,
    BadDecl,
    GenDecl,
    FuncDecl,
}

/// How the mapper produces a generic node for a native kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Always mapped to a typed node by dedicated code.
    Typed,
    /// Typed when the node fits a canonical construct, native otherwise.
    TypedOrNative,
    /// Always mapped by the declarative native schema.
    Native,
    /// Never mapped as a node of its own.
    Internal,
}

impl NodeKind {
    pub const ALL: [NodeKind; 55] = [
        NodeKind::File,
        NodeKind::Ident,
        NodeKind::BasicLit,
        NodeKind::Comment,
        NodeKind::CommentGroup,
        NodeKind::Field,
        NodeKind::FieldList,
        NodeKind::BadExpr,
        NodeKind::Ellipsis,
        NodeKind::FuncLit,
        NodeKind::CompositeLit,
        NodeKind::ParenExpr,
        NodeKind::SelectorExpr,
        NodeKind::IndexExpr,
        NodeKind::IndexListExpr,
        NodeKind::SliceExpr,
        NodeKind::TypeAssertExpr,
        NodeKind::CallExpr,
        NodeKind::StarExpr,
        NodeKind::UnaryExpr,
        NodeKind::BinaryExpr,
        NodeKind::KeyValueExpr,
        NodeKind::ArrayType,
        NodeKind::StructType,
        NodeKind::FuncType,
        NodeKind::InterfaceType,
        NodeKind::MapType,
        NodeKind::ChanType,
        NodeKind::BadStmt,
        NodeKind::DeclStmt,
        NodeKind::EmptyStmt,
        NodeKind::LabeledStmt,
        NodeKind::ExprStmt,
        NodeKind::SendStmt,
        NodeKind::IncDecStmt,
        NodeKind::AssignStmt,
        NodeKind::GoStmt,
        NodeKind::DeferStmt,
        NodeKind::ReturnStmt,
        NodeKind::BranchStmt,
        NodeKind::BlockStmt,
        NodeKind::IfStmt,
        NodeKind::CaseClause,
        NodeKind::SwitchStmt,
        NodeKind::TypeSwitchStmt,
        NodeKind::CommClause,
        NodeKind::SelectStmt,
        NodeKind::ForStmt,
        NodeKind::RangeStmt,
        NodeKind::ImportSpec,
        NodeKind::ValueSpec,
        NodeKind::TypeSpec,
        NodeKind::BadDecl,
        NodeKind::GenDecl,
        NodeKind::FuncDecl,
    ];

    /// Grammar name of the kind, used in native labels.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::File => "File",
            NodeKind::Ident => "Ident",
            NodeKind::BasicLit => "BasicLit",
            NodeKind::Comment => "Comment",
            NodeKind::CommentGroup => "CommentGroup",
            NodeKind::Field => "Field",
            NodeKind::FieldList => "FieldList",
            NodeKind::BadExpr => "BadExpr",
            NodeKind::Ellipsis => "Ellipsis",
            NodeKind::FuncLit => "FuncLit",
            NodeKind::CompositeLit => "CompositeLit",
            NodeKind::ParenExpr => "ParenExpr",
            NodeKind::SelectorExpr => "SelectorExpr",
            NodeKind::IndexExpr => "IndexExpr",
            NodeKind::IndexListExpr => "IndexListExpr",
            NodeKind::SliceExpr => "SliceExpr",
            NodeKind::TypeAssertExpr => "TypeAssertExpr",
            NodeKind::CallExpr => "CallExpr",
            NodeKind::StarExpr => "StarExpr",
            NodeKind::UnaryExpr => "UnaryExpr",
            NodeKind::BinaryExpr => "BinaryExpr",
            NodeKind::KeyValueExpr => "KeyValueExpr",
            NodeKind::ArrayType => "ArrayType",
            NodeKind::StructType => "StructType",
            NodeKind::FuncType => "FuncType",
            NodeKind::InterfaceType => "InterfaceType",
            NodeKind::MapType => "MapType",
            NodeKind::ChanType => "ChanType",
            NodeKind::BadStmt => "BadStmt",
            NodeKind::DeclStmt => "DeclStmt",
            NodeKind::EmptyStmt => "EmptyStmt",
            NodeKind::LabeledStmt => "LabeledStmt",
            NodeKind::ExprStmt => "ExprStmt",
            NodeKind::SendStmt => "SendStmt",
            NodeKind::IncDecStmt => "IncDecStmt",
            NodeKind::AssignStmt => "AssignStmt",
            NodeKind::GoStmt => "GoStmt",
            NodeKind::DeferStmt => "DeferStmt",
            NodeKind::ReturnStmt => "ReturnStmt",
            NodeKind::BranchStmt => "BranchStmt",
            NodeKind::BlockStmt => "BlockStmt",
            NodeKind::IfStmt => "IfStmt",
            NodeKind::CaseClause => "CaseClause",
            NodeKind::SwitchStmt => "SwitchStmt",
            NodeKind::TypeSwitchStmt => "TypeSwitchStmt",
            NodeKind::CommClause => "CommClause",
            NodeKind::SelectStmt => "SelectStmt",
            NodeKind::ForStmt => "ForStmt",
            NodeKind::RangeStmt => "RangeStmt",
            NodeKind::ImportSpec => "ImportSpec",
            NodeKind::ValueSpec => "ValueSpec",
            NodeKind::TypeSpec => "TypeSpec",
            NodeKind::BadDecl => "BadDecl",
            NodeKind::GenDecl => "GenDecl",
            NodeKind::FuncDecl => "FuncDecl",
        }
    }

    /// Classification of the kind for the mapper.
    pub fn shape(self) -> Shape {
        use NodeKind::*;
        match self {
            File | Ident | BasicLit | FuncDecl | FuncLit | ImportSpec | BlockStmt | ReturnStmt
            | ExprStmt | IfStmt | ForStmt | RangeStmt | SwitchStmt | TypeSwitchStmt
            | CaseClause | IncDecStmt | DeclStmt | ArrayType | CallExpr | CompositeLit
            | Ellipsis | IndexExpr | IndexListExpr | KeyValueExpr | MapType | ParenExpr
            | SelectorExpr | SliceExpr | StarExpr | TypeAssertExpr => Shape::Typed,

            GenDecl | AssignStmt | BranchStmt | UnaryExpr | BinaryExpr | Field => {
                Shape::TypedOrNative
            }

            BadExpr | BadStmt | BadDecl | EmptyStmt | LabeledStmt | SendStmt | GoStmt
            | DeferStmt | CommClause | SelectStmt | ValueSpec | TypeSpec | FieldList
            | FuncType | StructType | InterfaceType | ChanType => Shape::Native,

            Comment | CommentGroup => Shape::Internal,
        }
    }

    /// Kinds mapped as a single leaf token covering their whole span.
    pub fn is_forced_leaf(self) -> bool {
        matches!(self, NodeKind::BadExpr | NodeKind::BadStmt | NodeKind::BadDecl)
    }

    /// Fields the kind exposes to the native schema, in grammar order.
    /// A position paired with its token value counts as one field.
    pub fn fields(self) -> &'static [&'static str] {
        use NodeKind::*;
        match self {
            File => &["Package", "Name", "Decls"],
            Ident => &["Name"],
            BasicLit => &["Value"],
            Comment => &["Text"],
            CommentGroup => &["List"],
            Field => &["Names", "Type", "Tag"],
            FieldList => &["Opening", "List", "Closing"],
            BadExpr | BadStmt | BadDecl => &[],
            Ellipsis => &["Ellipsis", "Elt"],
            FuncLit => &["Type", "Body"],
            CompositeLit => &["Type", "Lbrace", "Elts", "Rbrace"],
            ParenExpr => &["Lparen", "X", "Rparen"],
            SelectorExpr => &["X", "Sel"],
            IndexExpr => &["X", "Lbrack", "Index", "Rbrack"],
            IndexListExpr => &["X", "Lbrack", "Indices", "Rbrack"],
            SliceExpr => &["X", "Lbrack", "Low", "High", "Max", "Rbrack"],
            TypeAssertExpr => &["X", "Lparen", "Type", "Rparen"],
            CallExpr => &["Fun", "Lparen", "Args", "Ellipsis", "Rparen"],
            StarExpr => &["Star", "X"],
            UnaryExpr => &["Op", "X"],
            BinaryExpr => &["X", "Op", "Y"],
            KeyValueExpr => &["Key", "Colon", "Value"],
            ArrayType => &["Lbrack", "Len", "Elt"],
            StructType => &["Struct", "Fields"],
            FuncType => &["Func", "TypeParams", "Params", "Results"],
            InterfaceType => &["Interface", "Methods"],
            MapType => &["Map", "Key", "Value"],
            ChanType => &["Begin", "Arrow", "Dir", "Value"],
            DeclStmt => &["Decl"],
            EmptyStmt => &["Semicolon"],
            LabeledStmt => &["Label", "Colon", "Stmt"],
            ExprStmt => &["X"],
            SendStmt => &["Chan", "Arrow", "Value"],
            IncDecStmt => &["X", "Tok"],
            AssignStmt => &["Lhs", "Tok", "Rhs"],
            GoStmt => &["Go", "Call"],
            DeferStmt => &["Defer", "Call"],
            ReturnStmt => &["Return", "Results"],
            BranchStmt => &["Tok", "Label"],
            BlockStmt => &["Lbrace", "List", "Rbrace"],
            IfStmt => &["If", "Init", "Cond", "Body", "Else"],
            CaseClause => &["Case", "List", "Colon", "Body"],
            SwitchStmt => &["Switch", "Init", "Tag", "Body"],
            TypeSwitchStmt => &["Switch", "Init", "Assign", "Body"],
            CommClause => &["Case", "Comm", "Colon", "Body"],
            SelectStmt => &["Select", "Body"],
            ForStmt => &["For", "Init", "Cond", "Post", "Body"],
            RangeStmt => &["For", "Key", "Value", "Tok", "X", "Body"],
            ImportSpec => &["Name", "Path"],
            ValueSpec => &["Names", "Type", "Values"],
            TypeSpec => &["Name", "TypeParams", "Assign", "Type"],
            GenDecl => &["Tok", "Lparen", "Specs", "Rparen"],
            FuncDecl => &["Recv", "Name", "Type", "Body"],
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a native node: its kind and exact span.
///
/// Two distinct native nodes never share all three, except for an identifier
/// and the parameter built from it, which the mapper treats as one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeKey {
    pub kind: NodeKind,
    pub pos: Pos,
    pub end: Pos,
}

impl NativeKey {
    pub fn new(kind: NodeKind, pos: Pos, end: Pos) -> Self {
        Self { kind, pos, end }
    }
}
