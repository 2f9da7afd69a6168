//! Rust bindings for the `tree-sitter-lab1` grammar.
//!
//! The build script compiles the generated parser in `src/parser.c` (produced
//! by `tree-sitter generate` from `grammar.js`) and links it into this crate,
//! so [`language`] can hand out a `tree_sitter::Language` for it.

pub mod dot;
pub mod verify;

pub use dot::{dump_source, write_dot, DumpError};
pub use verify::{load, ConstructionFailure, GrammarLoader, TreeSitterLoader};

use tree_sitter::Language;

/// Name reported when the grammar fails to load.
pub const GRAMMAR_NAME: &str = "Lab1";

extern "C" {
    fn tree_sitter_lab1() -> Language;
}

/// Returns the Tree-sitter [`Language`] for this grammar.
pub fn language() -> Language {
    unsafe { tree_sitter_lab1() }
}

/// Returns a loader for the linked Lab1 grammar.
pub fn loader() -> TreeSitterLoader {
    TreeSitterLoader::new(GRAMMAR_NAME, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_load_grammar() {
        if let Err(err) = load(&loader()) {
            panic!("{err}");
        }
    }

    #[test]
    fn loads_are_repeatable() {
        let first = load(&loader()).map(|language| language.version());
        let second = load(&loader()).map(|language| language.version());
        assert_eq!(first, second);
        assert_eq!(first, Ok(tree_sitter::LANGUAGE_VERSION));
    }

    #[test]
    fn parses_a_method() {
        let mut parser = loader().parser().expect("Error loading Lab1 grammar");
        let tree = parser
            .parse("method main() begin x := 1 + 2; end;", None)
            .unwrap();
        let root = tree.root_node();
        assert_eq!(root.kind(), "source_file");
        assert!(!root.has_error());
        assert_eq!(
            root.to_sexp(),
            "(source_file (sourceItem (funcDef (funcSignature (identifier)) \
             (body (block (statement (expr_stmt (expr (assign_expr \
             (postfix (primary (identifier))) (expr (binary_expr \
             (expr (postfix (primary (literal (dec))))) (binOp) \
             (expr (postfix (primary (literal (dec))))))))))))))))"
        );
    }

    #[test]
    fn reports_syntax_errors() {
        let mut parser = loader().parser().expect("Error loading Lab1 grammar");
        let tree = parser.parse("method broken( begin end;", None).unwrap();
        assert!(tree.root_node().has_error());
    }
}
