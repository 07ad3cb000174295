use std::borrow::Cow;

use crate::error::SyntaxError;
use crate::lexer::Lexer;
use crate::token::{Tok, TokKind};
use clam_ast::ast::{Ast, AstIndex, LetBind, Literal, Node, NodeKind};
use clam_ast::op::UnOp;
use clam_ast::span::Span;
use tracing::{debug, trace};

pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Binding powers of function application by juxtaposition. Tighter than
/// every infix operator, looser than prefix `-`.
const APPLICATION_BP: (u8, u8) = (16, 17);

/// Parses `src` as one complete expression.
pub fn parse_str(src: &str) -> Result<(Ast<'_>, AstIndex)> {
    let mut p = Parser::new(src);
    let root = p.parse()?;
    Ok((p.into_ast(), root))
}

/// Precedence-climbing parser. Owns its lexer and the arena it fills.
pub struct Parser<'src> {
    lex: Lexer<'src>,
    ast: Ast<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            lex: Lexer::new(src),
            ast: Ast::new(),
        }
    }

    pub fn ast(&self) -> &Ast<'src> {
        &self.ast
    }

    pub fn into_ast(self) -> Ast<'src> {
        self.ast
    }

    /// Parses a complete expression and requires the input to end after it.
    pub fn parse(&mut self) -> Result<AstIndex> {
        let result = self.parse_expr_bp(0).and_then(|root| {
            let tok = self.bump();
            if tok.kind == TokKind::Eof {
                Ok(root)
            } else {
                Err(SyntaxError::unexpected("end of input", tok))
            }
        });
        match &result {
            Ok(root) => debug!(nodes = self.ast.len(), root = %root, "parsed expression"),
            Err(e) => debug!(error = %e, "parse failed"),
        }
        result
    }

    fn peek(&mut self) -> Tok {
        *self.lex.peek_tok()
    }

    fn bump(&mut self) -> Tok {
        self.lex.next_tok()
    }

    fn expect(&mut self, kind: TokKind) -> Result<Tok> {
        let tok = self.bump();
        if tok.kind == kind {
            Ok(tok)
        } else {
            let expected: Cow<'static, str> = match kind {
                TokKind::Ident => "identifier".into(),
                _ => format!("'{kind}'").into(),
            };
            Err(SyntaxError::unexpected(expected, tok))
        }
    }

    fn push(&mut self, kind: NodeKind<'src>, span: Span) -> AstIndex {
        self.ast.push(Node::new(kind, span))
    }

    fn span_between(&self, first: AstIndex, last: AstIndex) -> Span {
        self.ast.span(first).to(self.ast.span(last))
    }

    // ======= expressions (Pratt parser) =======
    //
    // Binding powers (left, right), low -> high:
    //   or                       (2, 3)
    //   and                      (4, 5)
    //   == != < > <= >= |>       (7, 6)
    //   ::                       (9, 8)
    //   + -                      (10, 11)
    //   * / %                    (12, 13)
    //   ++                       (14, 15)
    //   application              (16, 17)
    // prefix `-` parses its operand at 18, prefix `not` at 1.
    // Postfix `[index]` attaches to whatever operand precedes it.

    pub fn parse_expr_bp(&mut self, min_bp: u8) -> Result<AstIndex> {
        let mut lhs = self.parse_term()?;

        loop {
            let tok = self.peek();

            if let Some(op) = tok.kind.binary_op() {
                let (lbp, rbp) = op.binding_power();
                if lbp < min_bp {
                    break;
                }
                self.bump(); // consume operator
                let rhs = self.parse_expr_bp(rbp)?;
                let span = self.span_between(lhs, rhs);
                lhs = self.push(
                    NodeKind::BinaryOp {
                        op,
                        op_span: tok.span,
                        lhs,
                        rhs,
                    },
                    span,
                );
            } else if tok.kind.starts_term() {
                let (lbp, rbp) = APPLICATION_BP;
                if lbp < min_bp {
                    break;
                }
                let argument = self.parse_expr_bp(rbp)?;
                let span = self.span_between(lhs, argument);
                lhs = self.push(
                    NodeKind::Application {
                        function: lhs,
                        argument,
                    },
                    span,
                );
            } else if tok.kind == TokKind::LBracket {
                lhs = self.parse_list_index(lhs)?;
            } else if tok.kind.terminates_expr() {
                break;
            } else {
                self.bump();
                return Err(SyntaxError::unexpected(
                    "operator or expression terminator",
                    tok,
                ));
            }
        }

        Ok(lhs)
    }

    /// Parses exactly one primary expression, prefix operation or
    /// parenthesized group.
    pub fn parse_term(&mut self) -> Result<AstIndex> {
        let tok = self.peek();
        trace!(kind = %tok.kind, start = tok.span.start, "term");

        match tok.kind {
            TokKind::Unit
            | TokKind::True
            | TokKind::False
            | TokKind::Int
            | TokKind::Float
            | TokKind::Str => {
                self.bump();
                let lit = self.parse_literal(tok)?;
                Ok(self.push(NodeKind::Literal(lit), tok.span))
            }
            TokKind::Ident => {
                self.bump();
                let name = tok.text(self.lex.source());
                Ok(self.push(NodeKind::Ident(name), tok.span))
            }
            TokKind::LBrace => self.parse_list(),
            TokKind::Let => self.parse_let(),
            TokKind::Fun => self.parse_fun(),
            TokKind::Print => self.parse_print(),
            TokKind::If => self.parse_if(),
            TokKind::Not => self.parse_unary(UnOp::Not),
            TokKind::Minus => self.parse_unary(UnOp::Negate),
            TokKind::LParen => self.parse_group(),
            _ => {
                self.bump();
                Err(SyntaxError::unexpected("expression", tok))
            }
        }
    }

    /// `op` is the operator of the current token, which is consumed here.
    fn parse_unary(&mut self, op: UnOp) -> Result<AstIndex> {
        let tok = self.bump();
        let operand = self.parse_expr_bp(op.binding_power())?;
        let span = tok.span.to(self.ast.span(operand));
        Ok(self.push(
            NodeKind::UnaryOp {
                op,
                op_span: tok.span,
                operand,
            },
            span,
        ))
    }

    /// `( expr )`. Returns the inner node with its span widened over the
    /// parentheses; no node is created for the group itself.
    fn parse_group(&mut self) -> Result<AstIndex> {
        let lparen = self.bump();
        let inner = self.parse_expr_bp(0)?;
        let rparen = self.expect(TokKind::RParen)?;
        self.ast
            .widen_span(inner, Span::new(lparen.span.start, rparen.span.end));
        Ok(inner)
    }

    /// `{ a, b, c }`, trailing comma allowed.
    fn parse_list(&mut self) -> Result<AstIndex> {
        let lbrace = self.bump();
        let mut items = Vec::new();

        let rbrace = loop {
            if self.peek().kind == TokKind::RBrace {
                break self.bump();
            }
            items.push(self.parse_expr_bp(0)?);
            let tok = self.bump();
            match tok.kind {
                TokKind::Comma => continue,
                TokKind::RBrace => break tok,
                _ => return Err(SyntaxError::unexpected("',' or '}'", tok)),
            }
        };

        Ok(self.push(
            NodeKind::List(items),
            Span::new(lbrace.span.start, rbrace.span.end),
        ))
    }

    /// `list [ index ]`, with `list` already parsed.
    fn parse_list_index(&mut self, list: AstIndex) -> Result<AstIndex> {
        self.bump(); // '['
        let index = self.parse_expr_bp(0)?;
        let rbracket = self.expect(TokKind::RBracket)?;
        let span = Span::new(self.ast.span(list).start, rbracket.span.end);
        Ok(self.push(NodeKind::ListIndex { list, index }, span))
    }

    /// `let x = e1, y = e2 in body`
    fn parse_let(&mut self) -> Result<AstIndex> {
        let start = self.bump().span.start;
        let mut bindings = Vec::new();

        loop {
            let ident = self.expect(TokKind::Ident)?;
            self.expect(TokKind::Assign)?;
            let value = self.parse_expr_bp(0)?;
            bindings.push(LetBind {
                span: ident.span,
                name: ident.text(self.lex.source()),
                value,
            });
            if self.peek().kind == TokKind::Comma {
                self.bump();
            } else {
                break;
            }
        }

        self.expect(TokKind::In)?;
        let body = self.parse_expr_bp(0)?;
        let span = Span::new(start, self.ast.span(body).end);
        Ok(self.push(NodeKind::LetIn { bindings, body }, span))
    }

    /// `fun a b c => body`, curried into nested single-parameter
    /// abstractions built from the last parameter inward.
    fn parse_fun(&mut self) -> Result<AstIndex> {
        let start = self.bump().span.start;
        let src = self.lex.source();

        let mut params = vec![self.expect(TokKind::Ident)?.text(src)];
        while self.peek().kind == TokKind::Ident {
            params.push(self.bump().text(src));
        }
        self.expect(TokKind::Arrow)?;

        let mut body = self.parse_expr_bp(0)?;
        let span = Span::new(start, self.ast.span(body).end);
        for param in params.into_iter().rev() {
            body = self.push(NodeKind::Abstraction { param, body }, span);
        }
        Ok(body)
    }

    /// `print expr`
    fn parse_print(&mut self) -> Result<AstIndex> {
        let start = self.bump().span.start;
        let expr = self.parse_expr_bp(0)?;
        let span = Span::new(start, self.ast.span(expr).end);
        Ok(self.push(NodeKind::Print(expr), span))
    }

    /// `if cond then a else b`
    fn parse_if(&mut self) -> Result<AstIndex> {
        let start = self.bump().span.start;
        let condition = self.parse_expr_bp(0)?;
        self.expect(TokKind::Then)?;
        let then = self.parse_expr_bp(0)?;
        self.expect(TokKind::Else)?;
        let else_ = self.parse_expr_bp(0)?;
        let span = Span::new(start, self.ast.span(else_).end);
        Ok(self.push(
            NodeKind::IfElse {
                condition,
                then,
                else_,
            },
            span,
        ))
    }

    // ======= literals =======

    fn parse_literal(&self, tok: Tok) -> Result<Literal> {
        let text = tok.text(self.lex.source());
        Ok(match tok.kind {
            TokKind::Unit => Literal::Unit,
            TokKind::True => Literal::Bool(true),
            TokKind::False => Literal::Bool(false),
            TokKind::Int => Literal::Int(parse_int(text)),
            TokKind::Float => Literal::Float(parse_float(text)),
            TokKind::Str => Literal::Str(parse_string(text, tok.span)?),
            _ => return Err(SyntaxError::unexpected("literal", tok)),
        })
    }
}

/// Accumulates decimal digits into an `i32`, wrapping on overflow.
fn parse_int(digits: &str) -> i32 {
    digits.bytes().fold(0i32, |acc, d| {
        acc.wrapping_mul(10).wrapping_add(i32::from(d - b'0'))
    })
}

/// `integer_part + fraction_digits / 10^digit_count`, digit by digit.
fn parse_float(text: &str) -> f64 {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    let accumulate = |s: &str| {
        s.bytes()
            .fold(0.0f64, |acc, d| acc * 10.0 + f64::from(d - b'0'))
    };
    let digits = i32::try_from(frac_part.len()).unwrap_or(i32::MAX);
    accumulate(int_part) + accumulate(frac_part) / 10f64.powi(digits)
}

/// Resolves escapes inside a string token's text, quotes included.
fn parse_string(text: &str, span: Span) -> Result<String> {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            break;
        };
        let resolved = match esc {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0' => '\0',
            '"' => '"',
            '\\' => '\\',
            other => {
                // +1 skips the opening quote.
                let start = span.start + 1 + i as u32;
                let end = start + 1 + other.len_utf8() as u32;
                return Err(SyntaxError::InvalidEscapeSequence {
                    string_span: span,
                    escape_span: Span::new(start, end),
                    escape: other,
                });
            }
        };
        out.push(resolved);
    }

    Ok(out)
}
