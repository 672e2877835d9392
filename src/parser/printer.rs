//! Indented tree printer
//!
//! [`print`] walks a tree depth-first in pre-order (node, then left, then
//! right) and yields one [`TreeLine`] per node. The walk is lazy: nothing is
//! formatted until a line is pulled from the iterator.

use crate::parser::ast::AstNode;
use crate::parser::constants::DEFAULT_INDENT_WIDTH;
use std::fmt;

/// One printed node: its depth below the starting node and its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLine<'a> {
    pub depth: usize,
    pub value: &'a str,
}

impl TreeLine<'_> {
    pub fn render(&self, indent_width: usize) -> String {
        format!("{}{}", " ".repeat(self.depth * indent_width), self.value)
    }
}

impl fmt::Display for TreeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:indent$}{}",
            "",
            self.value,
            indent = self.depth * DEFAULT_INDENT_WIDTH
        )
    }
}

/// Pre-order iterator over a tree
#[derive(Debug, Clone)]
pub struct TreeLines<'a> {
    pending: Vec<(&'a AstNode, usize)>,
}

impl<'a> Iterator for TreeLines<'a> {
    type Item = TreeLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.pending.pop()?;
        if let AstNode::BinaryOp { left, right, .. } = node {
            // right first so left is popped next
            self.pending.push((right, depth + 1));
            self.pending.push((left, depth + 1));
        }
        Some(TreeLine {
            depth,
            value: node.value(),
        })
    }
}

/// Lines for `node` and its subtree, with `node` itself at `depth`
pub fn print(node: &AstNode, depth: usize) -> TreeLines<'_> {
    TreeLines {
        pending: vec![(node, depth)],
    }
}

/// Render the whole tree, one newline-terminated line per node
pub fn render_tree(node: &AstNode, indent_width: usize) -> String {
    print(node, 0)
        .map(|line| line.render(indent_width) + "\n")
        .collect()
}
