use crate::token::{Tok, TokKind};
use clam_ast::span::Span;

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    peeked: Option<Tok>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            peeked: None,
            finished: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.src
    }

    /// Looks at the next token without consuming it. Repeated calls return
    /// the same token.
    pub fn peek_tok(&mut self) -> &Tok {
        let tok = self.next_tok();
        self.peeked.insert(tok)
    }

    /// Consumes and returns the next token. After the end of input this keeps
    /// returning `Eof`.
    pub fn next_tok(&mut self) -> Tok {
        match self.peeked.take() {
            Some(tok) => tok,
            None => self.scan(),
        }
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    /// Consumes the next byte if it is `expected`.
    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn tok(&self, kind: TokKind, start: usize) -> Tok {
        Tok {
            kind,
            span: Span::new(start as u32, self.pos as u32),
        }
    }

    fn skip_ws_and_comments(&mut self) {
        loop {
            while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
                self.pos += 1;
            }
            // line comment: #
            if self.peek() == Some(b'#') {
                while let Some(b) = self.peek() {
                    if b == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    fn scan(&mut self) -> Tok {
        self.skip_ws_and_comments();
        let start = self.pos;
        let Some(b) = self.bump() else {
            return self.tok(TokKind::Eof, start);
        };

        let kind = match b {
            b'(' => TokKind::LParen,
            b')' => TokKind::RParen,
            b'[' => TokKind::LBracket,
            b']' => TokKind::RBracket,
            b'{' => TokKind::LBrace,
            b'}' => TokKind::RBrace,
            b',' => TokKind::Comma,
            b'-' => TokKind::Minus,
            b'*' => TokKind::Star,
            b'/' => TokKind::Slash,
            b'%' => TokKind::Percent,
            b'|' if self.eat(b'>') => TokKind::Pipe,
            b':' if self.eat(b':') => TokKind::ColonColon,
            b'!' if self.eat(b'=') => TokKind::BangEq,
            b'+' if self.eat(b'+') => TokKind::PlusPlus,
            b'+' => TokKind::Plus,
            b'=' if self.eat(b'=') => TokKind::EqEq,
            b'=' if self.eat(b'>') => TokKind::Arrow,
            b'=' => TokKind::Assign,
            b'<' if self.eat(b'=') => TokKind::Le,
            b'<' => TokKind::Lt,
            b'>' if self.eat(b'=') => TokKind::Ge,
            b'>' => TokKind::Gt,
            b'"' => self.string(),
            b'0'..=b'9' => self.number(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.ident_or_keyword(start),
            _ => {
                // Keep spans on char boundaries so diagnostics can slice them.
                let width = self.src[start..].chars().next().map_or(1, char::len_utf8);
                self.pos = start + width;
                TokKind::Invalid
            }
        };
        self.tok(kind, start)
    }

    /// Scans up to and including the closing quote. Escapes are only skipped
    /// here; the parser resolves them.
    fn string(&mut self) -> TokKind {
        while let Some(b) = self.bump() {
            match b {
                b'"' => return TokKind::Str,
                b'\\' => {
                    self.bump();
                }
                _ => {}
            }
        }
        TokKind::Invalid
    }

    fn number(&mut self) -> TokKind {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') && matches!(self.peek2(), Some(b'0'..=b'9')) {
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            TokKind::Float
        } else {
            TokKind::Int
        }
    }

    fn ident_or_keyword(&mut self, start: usize) -> TokKind {
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        match &self.src[start..self.pos] {
            "let" => TokKind::Let,
            "in" => TokKind::In,
            "fun" => TokKind::Fun,
            "if" => TokKind::If,
            "then" => TokKind::Then,
            "else" => TokKind::Else,
            "print" => TokKind::Print,
            "true" => TokKind::True,
            "false" => TokKind::False,
            "unit" => TokKind::Unit,
            "not" => TokKind::Not,
            "and" => TokKind::And,
            "or" => TokKind::Or,
            _ => TokKind::Ident,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Tok;

    /// Yields every token including a final `Eof`, then stops.
    fn next(&mut self) -> Option<Tok> {
        if self.finished {
            return None;
        }
        let tok = self.next_tok();
        if tok.kind == TokKind::Eof {
            self.finished = true;
        }
        Some(tok)
    }
}
