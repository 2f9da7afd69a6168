//! Graphviz output for Lab1 syntax trees.
//!
//! Every node of the tree, named and anonymous, becomes a DOT vertex labelled
//! with its kind; edges point from parent to child in source order.

use std::io::{self, Write};

use thiserror::Error;
use tree_sitter::Tree;

use crate::verify::ConstructionFailure;

#[derive(Debug, Error)]
pub enum DumpError {
    #[error(transparent)]
    Load(#[from] ConstructionFailure),

    #[error("parse failed (no tree)")]
    Parse,

    #[error("failed to write DOT output")]
    Io(#[from] io::Error),
}

/// Parses `source` with the Lab1 grammar and writes the tree as DOT.
///
/// # Errors
///
/// Returns [`DumpError::Load`] if the grammar cannot be loaded,
/// [`DumpError::Parse`] if the runtime gives up without a tree and
/// [`DumpError::Io`] if writing fails.
pub fn dump_source<W: Write>(source: &str, out: &mut W) -> Result<(), DumpError> {
    let mut parser = crate::loader().parser()?;
    let tree = parser.parse(source, None).ok_or(DumpError::Parse)?;
    write_dot(&tree, out)?;
    Ok(())
}

/// Writes `tree` as a `digraph AST`, numbering nodes `n0, n1, ...` in pre-order.
pub fn write_dot<W: Write>(tree: &Tree, out: &mut W) -> io::Result<()> {
    writeln!(out, "digraph AST {{")?;

    let mut cursor = tree.walk();
    let mut parents: Vec<usize> = Vec::new();
    let mut next_id = 0;
    loop {
        let id = next_id;
        next_id += 1;
        writeln!(out, "  n{id} [label={}];", label(cursor.node().kind()))?;
        if let Some(parent) = parents.last() {
            writeln!(out, "  n{parent} -> n{id};")?;
        }

        if cursor.goto_first_child() {
            parents.push(id);
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return writeln!(out, "}}");
            }
            parents.pop();
        }
    }
}

fn label(kind: &str) -> String {
    let mut quoted = String::with_capacity(kind.len() + 2);
    quoted.push('"');
    for ch in kind.chars() {
        match ch {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
