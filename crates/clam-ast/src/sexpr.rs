//! S-expression rendering of a parsed tree, used by the `parse` command and
//! the REPL.

use std::fmt::{self, Display, Formatter};

use crate::ast::{Ast, AstIndex, Literal, NodeKind};

pub struct SExpr<'a, 'src> {
    ast: &'a Ast<'src>,
    root: AstIndex,
}

impl<'src> Ast<'src> {
    /// Display adapter printing the subtree at `root`.
    pub fn sexpr(&self, root: AstIndex) -> SExpr<'_, 'src> {
        SExpr { ast: self, root }
    }
}

impl Display for SExpr<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_node(self.ast, self.root, f)
    }
}

fn write_literal(lit: &Literal, f: &mut Formatter<'_>) -> fmt::Result {
    match lit {
        Literal::Unit => f.write_str("unit"),
        Literal::Bool(b) => write!(f, "{b}"),
        Literal::Int(n) => write!(f, "{n}"),
        Literal::Float(x) => write!(f, "{x:.6}"),
        Literal::Str(s) => write!(f, "\"{}\"", s.escape_default()),
    }
}

fn write_node(ast: &Ast<'_>, index: AstIndex, f: &mut Formatter<'_>) -> fmt::Result {
    match &ast[index].kind {
        NodeKind::Literal(lit) => write_literal(lit, f),
        NodeKind::Ident(name) => f.write_str(name),
        NodeKind::List(items) => {
            f.write_str("(list")?;
            for &item in items {
                f.write_str(" ")?;
                write_node(ast, item, f)?;
            }
            f.write_str(")")
        }
        NodeKind::LetIn { bindings, body } => {
            f.write_str("(let [")?;
            for (i, bind) in bindings.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "({} ", bind.name)?;
                write_node(ast, bind.value, f)?;
                f.write_str(")")?;
            }
            f.write_str("] ")?;
            write_node(ast, *body, f)?;
            f.write_str(")")
        }
        NodeKind::Abstraction { param, body } => {
            write!(f, "(fun [{param}] ")?;
            write_node(ast, *body, f)?;
            f.write_str(")")
        }
        NodeKind::Application { function, argument } => {
            f.write_str("(app ")?;
            write_node(ast, *function, f)?;
            f.write_str(" ")?;
            write_node(ast, *argument, f)?;
            f.write_str(")")
        }
        NodeKind::Print(expr) => {
            f.write_str("(print ")?;
            write_node(ast, *expr, f)?;
            f.write_str(")")
        }
        NodeKind::IfElse {
            condition,
            then,
            else_,
        } => {
            f.write_str("(if ")?;
            write_node(ast, *condition, f)?;
            f.write_str(" :then ")?;
            write_node(ast, *then, f)?;
            f.write_str(" :else ")?;
            write_node(ast, *else_, f)?;
            f.write_str(")")
        }
        NodeKind::UnaryOp { op, operand, .. } => {
            write!(f, "({op} ")?;
            write_node(ast, *operand, f)?;
            f.write_str(")")
        }
        NodeKind::BinaryOp { op, lhs, rhs, .. } => {
            write!(f, "({op} ")?;
            write_node(ast, *lhs, f)?;
            f.write_str(" ")?;
            write_node(ast, *rhs, f)?;
            f.write_str(")")
        }
        NodeKind::ListIndex { list, index } => {
            f.write_str("(get ")?;
            write_node(ast, *list, f)?;
            f.write_str(" ")?;
            write_node(ast, *index, f)?;
            f.write_str(")")
        }
    }
}
