// AST (Abstract Syntax Tree) definitions for arithmetic expressions

use std::fmt;
use std::mem;

use crate::parser::printer::print;

/// Binary operators recognised by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<BinOp> {
        match symbol {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            _ => None,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// AST node.
///
/// A node is either a leaf literal or a binary application that owns exactly
/// two children, so a one-child node cannot be constructed. Children are boxed
/// and uniquely owned; dropping the root frees the whole tree.
///
/// A left-leaning chain is as deep as it has operators, so drop, equality and
/// formatting walk the tree with an explicit stack instead of recursing.
#[derive(Debug, Eq)]
pub enum AstNode {
    IntLiteral {
        text: String,
    },
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
}

impl AstNode {
    pub fn int(text: impl Into<String>) -> Self {
        AstNode::IntLiteral { text: text.into() }
    }

    pub fn binary(op: BinOp, left: AstNode, right: AstNode) -> Self {
        AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Literal text for leaves, operator symbol for binary nodes
    pub fn value(&self) -> &str {
        match self {
            AstNode::IntLiteral { text } => text,
            AstNode::BinaryOp { op, .. } => op.symbol(),
        }
    }

    pub fn left(&self) -> Option<&AstNode> {
        match self {
            AstNode::IntLiteral { .. } => None,
            AstNode::BinaryOp { left, .. } => Some(left),
        }
    }

    pub fn right(&self) -> Option<&AstNode> {
        match self {
            AstNode::IntLiteral { .. } => None,
            AstNode::BinaryOp { right, .. } => Some(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, AstNode::IntLiteral { .. })
    }

    /// Total number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        print(self, 0).count()
    }

    /// Move both children out, leaving empty leaves behind
    fn take_children(&mut self, out: &mut Vec<AstNode>) {
        if let AstNode::BinaryOp { left, right, .. } = self {
            out.push(mem::replace(&mut **left, AstNode::int(String::new())));
            out.push(mem::replace(&mut **right, AstNode::int(String::new())));
        }
    }
}

impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            // `node` is a leaf by the time it goes out of scope
            node.take_children(&mut pending);
        }
    }
}

impl PartialEq for AstNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some(pair) = pairs.pop() {
            match pair {
                (AstNode::IntLiteral { text: a }, AstNode::IntLiteral { text: b }) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    AstNode::BinaryOp { op: op_a, left: left_a, right: right_a },
                    AstNode::BinaryOp { op: op_b, left: left_b, right: right_b },
                ) => {
                    if op_a != op_b {
                        return false;
                    }
                    pairs.push((&**right_a, &**right_b));
                    pairs.push((&**left_a, &**left_b));
                }
                _ => return false,
            }
        }
        true
    }
}

/// Fully parenthesised infix form, e.g. `(2+(3*4))`
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Node(&'a AstNode),
            Text(&'a str),
        }

        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(AstNode::IntLiteral { text }) => f.write_str(text)?,
                Piece::Node(AstNode::BinaryOp { op, left, right }) => {
                    pieces.push(Piece::Text(")"));
                    pieces.push(Piece::Node(right));
                    pieces.push(Piece::Text(op.symbol()));
                    pieces.push(Piece::Node(left));
                    pieces.push(Piece::Text("("));
                }
            }
        }
        Ok(())
    }
}
