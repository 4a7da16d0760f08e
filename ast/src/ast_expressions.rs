use omegasl_text::Located;

#[derive(PartialEq, Debug, Clone)]
pub enum Expr {
    Id(String),
    Literal(Literal),
    Member(Box<Located<Expr>>, String),
    Array(Vec<Located<Expr>>),
    Call(
        /// Function to invoke
        Box<Located<Expr>>,
        /// Arguments
        Vec<Located<Expr>>,
    ),
    UnaryOp(UnaryOp, Box<Located<Expr>>),
    BinaryOp(BinOp, Box<Located<Expr>>, Box<Located<Expr>>),
    Pointer(PointerOp, Box<Located<Expr>>),
    Index(Box<Located<Expr>>, Box<Located<Expr>>),
}

/// Constant value written in the source
///
/// There is no double literal as the language has no double type.
#[derive(PartialEq, Debug, Clone)]
pub enum Literal {
    Int(i32),
    UInt(u32),
    Float(f32),
    String(String),
}

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum UnaryOp {
    PrefixIncrement,
    PrefixDecrement,
    PostfixIncrement,
    PostfixDecrement,
    LogicalNot,
}

impl UnaryOp {
    pub fn is_prefix(&self) -> bool {
        !matches!(self, UnaryOp::PostfixIncrement | UnaryOp::PostfixDecrement)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::PrefixIncrement | UnaryOp::PostfixIncrement => "++",
            UnaryOp::PrefixDecrement | UnaryOp::PostfixDecrement => "--",
            UnaryOp::LogicalNot => "!",
        }
    }
}

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum BinOp {
    Assignment,
    SumAssignment,
    DifferenceAssignment,
    Add,
    Subtract,
    Multiply,
    Divide,
    Equality,
    Inequality,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Assignment => "=",
            BinOp::SumAssignment => "+=",
            BinOp::DifferenceAssignment => "-=",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Equality => "==",
            BinOp::Inequality => "!=",
            BinOp::LessThan => "<",
            BinOp::LessEqual => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterEqual => ">=",
        }
    }
}

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum PointerOp {
    AddressOf,
    Dereference,
}
