use crate::*;
use omegasl_text::Located;

/// A statement inside a shader body
#[derive(PartialEq, Debug, Clone)]
pub enum Stmt {
    /// Variable or return declaration
    Decl(Decl),
    Expr(Located<Expr>),
}
