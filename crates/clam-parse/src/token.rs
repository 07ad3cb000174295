use clam_ast::op::{BinOp, UnOp};
use clam_ast::span::Span;

/// Token classes. Operator variants carry the tag of the AST operator they
/// produce, so `kind as u8` is also the operator's tag; a clash between the
/// two numbering schemes fails to compile as a duplicate discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokKind {
    // keywords
    Let,
    In,
    Fun,
    If,
    Then,
    Else,
    Print,
    // literals
    True,
    False,
    Unit,
    Int,
    Float,
    Str,
    // misc
    Ident,
    Assign,   // =
    Arrow,    // =>
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
    Comma,
    // special
    Invalid,
    Eof,
    // operators
    Pipe = BinOp::Pipe as u8,
    ColonColon = BinOp::Append as u8,
    Plus = BinOp::Add as u8,
    Minus = BinOp::Sub as u8,
    Star = BinOp::Mul as u8,
    Slash = BinOp::Div as u8,
    Percent = BinOp::Mod as u8,
    PlusPlus = BinOp::Concat as u8,
    And = BinOp::And as u8,
    Or = BinOp::Or as u8,
    Lt = BinOp::Lt as u8,
    Le = BinOp::Le as u8,
    Gt = BinOp::Gt as u8,
    Ge = BinOp::Ge as u8,
    EqEq = BinOp::Eq as u8,
    BangEq = BinOp::Ne as u8,
    Not = UnOp::Not as u8,
}

impl TokKind {
    /// The infix operator this token denotes, if any.
    pub fn binary_op(self) -> Option<BinOp> {
        Some(match self {
            TokKind::Pipe => BinOp::Pipe,
            TokKind::ColonColon => BinOp::Append,
            TokKind::Plus => BinOp::Add,
            TokKind::Minus => BinOp::Sub,
            TokKind::Star => BinOp::Mul,
            TokKind::Slash => BinOp::Div,
            TokKind::Percent => BinOp::Mod,
            TokKind::PlusPlus => BinOp::Concat,
            TokKind::And => BinOp::And,
            TokKind::Or => BinOp::Or,
            TokKind::Lt => BinOp::Lt,
            TokKind::Le => BinOp::Le,
            TokKind::Gt => BinOp::Gt,
            TokKind::Ge => BinOp::Ge,
            TokKind::EqEq => BinOp::Eq,
            TokKind::BangEq => BinOp::Ne,
            TokKind::Let
            | TokKind::In
            | TokKind::Fun
            | TokKind::If
            | TokKind::Then
            | TokKind::Else
            | TokKind::Print
            | TokKind::True
            | TokKind::False
            | TokKind::Unit
            | TokKind::Int
            | TokKind::Float
            | TokKind::Str
            | TokKind::Ident
            | TokKind::Assign
            | TokKind::Arrow
            | TokKind::LParen
            | TokKind::RParen
            | TokKind::LBracket
            | TokKind::RBracket
            | TokKind::LBrace
            | TokKind::RBrace
            | TokKind::Comma
            | TokKind::Invalid
            | TokKind::Eof
            | TokKind::Not => return None,
        })
    }

    /// The prefix operator this token denotes, if any.
    pub fn prefix_op(self) -> Option<UnOp> {
        match self {
            TokKind::Not => Some(UnOp::Not),
            TokKind::Minus => Some(UnOp::Negate),
            _ => None,
        }
    }

    /// Whether a term can begin with this token. Used to detect application
    /// by juxtaposition, so `-` is left out: in operator position it is
    /// always subtraction.
    pub fn starts_term(self) -> bool {
        matches!(
            self,
            TokKind::Unit
                | TokKind::True
                | TokKind::False
                | TokKind::Int
                | TokKind::Float
                | TokKind::Str
                | TokKind::Ident
                | TokKind::LParen
                | TokKind::LBrace
                | TokKind::Let
                | TokKind::Fun
                | TokKind::If
                | TokKind::Print
                | TokKind::Not
        )
    }

    /// Tokens that end an expression without being part of it.
    pub fn terminates_expr(self) -> bool {
        matches!(
            self,
            TokKind::RParen
                | TokKind::RBracket
                | TokKind::RBrace
                | TokKind::Comma
                | TokKind::In
                | TokKind::Then
                | TokKind::Else
                | TokKind::Eof
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokKind::Let => "let",
            TokKind::In => "in",
            TokKind::Fun => "fun",
            TokKind::If => "if",
            TokKind::Then => "then",
            TokKind::Else => "else",
            TokKind::Print => "print",
            TokKind::True => "true",
            TokKind::False => "false",
            TokKind::Unit => "unit",
            TokKind::Int => "integer literal",
            TokKind::Float => "float literal",
            TokKind::Str => "string literal",
            TokKind::Ident => "identifier",
            TokKind::Assign => "=",
            TokKind::Arrow => "=>",
            TokKind::LParen => "(",
            TokKind::RParen => ")",
            TokKind::LBracket => "[",
            TokKind::RBracket => "]",
            TokKind::LBrace => "{",
            TokKind::RBrace => "}",
            TokKind::Comma => ",",
            TokKind::Invalid => "invalid token",
            TokKind::Eof => "EOF",
            TokKind::Pipe => "|>",
            TokKind::ColonColon => "::",
            TokKind::Plus => "+",
            TokKind::Minus => "-",
            TokKind::Star => "*",
            TokKind::Slash => "/",
            TokKind::Percent => "%",
            TokKind::PlusPlus => "++",
            TokKind::And => "and",
            TokKind::Or => "or",
            TokKind::Lt => "<",
            TokKind::Le => "<=",
            TokKind::Gt => ">",
            TokKind::Ge => ">=",
            TokKind::EqEq => "==",
            TokKind::BangEq => "!=",
            TokKind::Not => "not",
        }
    }
}

impl std::fmt::Display for TokKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tok {
    pub kind: TokKind,
    pub span: Span,
}

impl Tok {
    /// The token's text as a slice of `src`.
    pub fn text(self, src: &str) -> &str {
        &src[self.span.range()]
    }
}
