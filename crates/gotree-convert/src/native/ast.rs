//! Native syntax tree — the parsed Go file handed over by the parser.
//!
//! Shapes follow the Go grammar one struct per construct. Positions are byte
//! offsets into the file's source text; `Option<Pos>` marks positions the
//! parser may leave unset (absent delimiters, implicit tokens).

use super::token::Tok;

/// Byte offset into the source text of one file.
pub type Pos = u32;

// ---- Leaves ----

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name_pos: Pos,
    pub name: String,
    /// Position of the declaring identifier as recorded by the parser's own
    /// scope resolution. Used only when the type checker reports an invalid
    /// type for the symbol.
    pub decl: Option<Pos>,
}

impl Ident {
    pub fn new(name_pos: Pos, name: impl Into<String>) -> Self {
        Self {
            name_pos,
            name: name.into(),
            decl: None,
        }
    }

    pub fn with_decl(mut self, decl: Pos) -> Self {
        self.decl = Some(decl);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
    pub value_pos: Pos,
    pub kind: LitKind,
    /// Literal text as written, quotes included. Carriage returns inside raw
    /// strings are already stripped by the scanner.
    pub value: String,
}

impl BasicLit {
    pub fn new(value_pos: Pos, kind: LitKind, value: impl Into<String>) -> Self {
        Self {
            value_pos,
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub slash: Pos,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

// ---- Fields ----

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: Expr,
    pub tag: Option<BasicLit>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    pub opening: Option<Pos>,
    pub list: Vec<Field>,
    pub closing: Option<Pos>,
}

// ---- Expressions ----

#[derive(Debug, Clone, PartialEq)]
pub struct BadExpr {
    pub from: Pos,
    pub to: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsis {
    pub ellipsis: Pos,
    pub elt: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncLit {
    pub ty: FuncType,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    pub ty: Option<Box<Expr>>,
    pub lbrace: Pos,
    pub elts: Vec<Expr>,
    pub rbrace: Pos,
    pub incomplete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub lparen: Pos,
    pub x: Box<Expr>,
    pub rparen: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    pub x: Box<Expr>,
    pub sel: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub x: Box<Expr>,
    pub lbrack: Pos,
    pub index: Box<Expr>,
    pub rbrack: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexListExpr {
    pub x: Box<Expr>,
    pub lbrack: Pos,
    pub indices: Vec<Expr>,
    pub rbrack: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub x: Box<Expr>,
    pub lbrack: Pos,
    pub low: Option<Box<Expr>>,
    pub high: Option<Box<Expr>>,
    pub max: Option<Box<Expr>>,
    pub slice3: bool,
    pub rbrack: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssertExpr {
    pub x: Box<Expr>,
    pub lparen: Pos,
    /// `None` for the `x.(type)` form of a type switch.
    pub ty: Option<Box<Expr>>,
    pub rparen: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub fun: Box<Expr>,
    pub lparen: Pos,
    pub args: Vec<Expr>,
    pub ellipsis: Option<Pos>,
    pub rparen: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarExpr {
    pub star: Pos,
    pub x: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op_pos: Pos,
    pub op: Tok,
    pub x: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub x: Box<Expr>,
    pub op_pos: Pos,
    pub op: Tok,
    pub y: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueExpr {
    pub key: Box<Expr>,
    pub colon: Pos,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub lbrack: Pos,
    /// `None` for slices, an `Ellipsis` for `[...]T`.
    pub len: Option<Box<Expr>>,
    pub elt: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub struct_pos: Pos,
    pub fields: FieldList,
    pub incomplete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    /// Unset for method signatures inside interfaces.
    pub func: Option<Pos>,
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    pub results: Option<FieldList>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub interface: Pos,
    pub methods: FieldList,
    pub incomplete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub map: Pos,
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChanType {
    pub begin: Pos,
    pub arrow: Option<Pos>,
    pub dir: ChanDir,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bad(BadExpr),
    Ident(Ident),
    Ellipsis(Ellipsis),
    BasicLit(BasicLit),
    FuncLit(FuncLit),
    CompositeLit(CompositeLit),
    Paren(ParenExpr),
    Selector(SelectorExpr),
    Index(IndexExpr),
    IndexList(IndexListExpr),
    Slice(SliceExpr),
    TypeAssert(TypeAssertExpr),
    Call(CallExpr),
    Star(StarExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    KeyValue(KeyValueExpr),
    ArrayType(ArrayType),
    StructType(StructType),
    FuncType(FuncType),
    InterfaceType(InterfaceType),
    MapType(MapType),
    ChanType(ChanType),
}

// ---- Statements ----

#[derive(Debug, Clone, PartialEq)]
pub struct BadStmt {
    pub from: Pos,
    pub to: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyStmt {
    pub semicolon: Pos,
    /// Set when the semicolon was inserted by the scanner.
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStmt {
    pub label: Ident,
    pub colon: Pos,
    pub stmt: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub x: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendStmt {
    pub chan: Expr,
    pub arrow: Pos,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncDecStmt {
    pub x: Expr,
    pub tok_pos: Pos,
    pub tok: Tok,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub lhs: Vec<Expr>,
    pub tok_pos: Pos,
    pub tok: Tok,
    pub rhs: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoStmt {
    pub go: Pos,
    pub call: CallExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeferStmt {
    pub defer: Pos,
    pub call: CallExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub return_pos: Pos,
    pub results: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchStmt {
    pub tok_pos: Pos,
    pub tok: Tok,
    pub label: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub lbrace: Pos,
    pub list: Vec<Stmt>,
    pub rbrace: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub if_pos: Pos,
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub body: BlockStmt,
    /// Either another `IfStmt` or a `BlockStmt`.
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub case: Pos,
    /// Empty for the `default` clause.
    pub list: Vec<Expr>,
    pub colon: Pos,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub switch: Pos,
    pub init: Option<Box<Stmt>>,
    pub tag: Option<Expr>,
    /// Holds `CaseClause` statements only.
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSwitchStmt {
    pub switch: Pos,
    pub init: Option<Box<Stmt>>,
    /// `x := y.(type)` or `y.(type)`.
    pub assign: Box<Stmt>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommClause {
    pub case: Pos,
    /// `None` for the `default` clause.
    pub comm: Option<Box<Stmt>>,
    pub colon: Pos,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub select: Pos,
    /// Holds `CommClause` statements only.
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub for_pos: Pos,
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStmt {
    pub for_pos: Pos,
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    /// Position of `:=` or `=`; unset for `for range x`.
    pub tok_pos: Option<Pos>,
    pub tok: Option<Tok>,
    pub range: Pos,
    pub x: Expr,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Bad(BadStmt),
    /// Declaration statement; only general declarations occur inside bodies.
    Decl(GenDecl),
    Empty(EmptyStmt),
    Labeled(LabeledStmt),
    Expr(ExprStmt),
    Send(SendStmt),
    IncDec(IncDecStmt),
    Assign(AssignStmt),
    Go(GoStmt),
    Defer(DeferStmt),
    Return(ReturnStmt),
    Branch(BranchStmt),
    Block(BlockStmt),
    If(IfStmt),
    CaseClause(CaseClause),
    Switch(SwitchStmt),
    TypeSwitch(TypeSwitchStmt),
    CommClause(CommClause),
    Select(SelectStmt),
    For(ForStmt),
    Range(RangeStmt),
}

// ---- Specifications and declarations ----

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub name: Option<Ident>,
    pub path: BasicLit,
    pub end_pos: Option<Pos>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: Option<FieldList>,
    /// Set for alias declarations (`type A = B`).
    pub assign: Option<Pos>,
    pub ty: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BadDecl {
    pub from: Pos,
    pub to: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub tok_pos: Pos,
    /// One of `import`, `const`, `type`, `var`.
    pub tok: Tok,
    pub lparen: Option<Pos>,
    pub specs: Vec<Spec>,
    pub rparen: Option<Pos>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    /// `None` for functions implemented outside Go.
    pub body: Option<BlockStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Bad(BadDecl),
    Gen(GenDecl),
    Func(FuncDecl),
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: Pos,
    pub name: Ident,
    pub decls: Vec<Decl>,
    /// Every comment of the file, in source order.
    pub comments: Vec<CommentGroup>,
}
