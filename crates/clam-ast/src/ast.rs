//! Arena-backed abstract syntax tree.
//!
//! Every node lives in one flat [`Ast`] and refers to its children by
//! [`AstIndex`]. Children are always pushed before their parent, so the
//! graph is acyclic by construction and teardown is a single drop of the
//! node vector.

use std::ops::Index;

use serde::Serialize;

use crate::op::{BinOp, UnOp};
use crate::span::Span;

/// Position of a node inside its [`Ast`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AstIndex(usize);

impl AstIndex {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for AstIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Unit,
    Bool(bool),
    Int(i32),
    Float(f64),
    /// Contents with escape sequences already resolved.
    Str(String),
}

/// One `name = value` binding of a `let ... in` expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetBind<'src> {
    pub span: Span,
    pub name: &'src str,
    pub value: AstIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind<'src> {
    Literal(Literal),
    /// Borrowed straight from the source text.
    Ident(&'src str),
    List(Vec<AstIndex>),
    LetIn {
        bindings: Vec<LetBind<'src>>,
        body: AstIndex,
    },
    /// Single-parameter function; `fun a b => e` nests two of these.
    Abstraction {
        param: &'src str,
        body: AstIndex,
    },
    Application {
        function: AstIndex,
        argument: AstIndex,
    },
    Print(AstIndex),
    IfElse {
        condition: AstIndex,
        then: AstIndex,
        else_: AstIndex,
    },
    UnaryOp {
        op: UnOp,
        op_span: Span,
        operand: AstIndex,
    },
    BinaryOp {
        op: BinOp,
        op_span: Span,
        lhs: AstIndex,
        rhs: AstIndex,
    },
    ListIndex {
        list: AstIndex,
        index: AstIndex,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node<'src> {
    pub kind: NodeKind<'src>,
    pub span: Span,
}

impl<'src> Node<'src> {
    pub fn new(kind: NodeKind<'src>, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Append-only store of AST nodes.
#[derive(Debug, Default, Serialize)]
pub struct Ast<'src> {
    nodes: Vec<Node<'src>>,
}

impl<'src> Ast<'src> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends `node` and returns its index. Indices are never invalidated.
    pub fn push(&mut self, node: Node<'src>) -> AstIndex {
        let index = AstIndex(self.nodes.len());
        self.nodes.push(node);
        index
    }

    /// Trusted lookup; panics if `index` came from a different arena.
    pub fn get(&self, index: AstIndex) -> &Node<'src> {
        &self.nodes[index.0]
    }

    pub fn try_get(&self, index: AstIndex) -> Option<&Node<'src>> {
        self.nodes.get(index.0)
    }

    pub fn span(&self, index: AstIndex) -> Span {
        self.nodes[index.0].span
    }

    /// Replaces the span of an existing node, leaving its payload untouched.
    ///
    /// This is the one mutation allowed after a node is pushed: grouping
    /// parentheses widen their inner expression's span to cover themselves.
    pub fn widen_span(&mut self, index: AstIndex, span: Span) {
        let node = &mut self.nodes[index.0];
        node.span = node.span.to(span);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AstIndex, &Node<'src>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (AstIndex(i), n))
    }

    /// Releases the arena together with every list, binding vector and
    /// string buffer owned by its nodes.
    pub fn free(self) {
        drop(self);
    }
}

impl<'src> Index<AstIndex> for Ast<'src> {
    type Output = Node<'src>;

    fn index(&self, index: AstIndex) -> &Self::Output {
        self.get(index)
    }
}
