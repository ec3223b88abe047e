pub mod assembler;
pub mod classify;
pub mod config;
pub mod definitions;
pub mod node;
pub mod options;
pub mod resolver;
pub mod scanner;
pub mod source;
pub mod syntax;
pub mod tree;

use std::ops::Range;

pub use classify::CharClasses;
pub use definitions::{DefinitionTable, ReferenceDefinition, ReferenceDefinitions};
pub use node::{InlineNode, InlineNodeKind, Reference, ReferenceKind};
pub use options::ParseOptions;
pub use source::InlineSource;
pub use syntax::build_syntax_tree;
pub use tree::{InlineTree, NodeId, dump};

/// Parses an entire source as one inline span with default options.
///
/// Parsing never fails: markup that does not resolve is kept as literal
/// text, so the top-level nodes always cover the whole input.
///
/// # Examples
///
/// ```rust
/// use inlinemark::{DefinitionTable, InlineNodeKind, parse};
///
/// let tree = parse("**a**", &DefinitionTable::new());
/// let root = tree.roots().next().unwrap();
/// assert_eq!(root.kind, InlineNodeKind::Emphasis(2));
/// ```
pub fn parse<S, D>(source: &S, definitions: &D) -> InlineTree<S::Pos>
where
    S: InlineSource + ?Sized,
    D: ReferenceDefinitions + ?Sized,
{
    parse_with(source, definitions, ParseOptions::default())
}

/// Parses an entire source as one inline span.
pub fn parse_with<S, D>(source: &S, definitions: &D, options: ParseOptions) -> InlineTree<S::Pos>
where
    S: InlineSource + ?Sized,
    D: ReferenceDefinitions + ?Sized,
{
    parse_range(source, source.start()..source.end(), definitions, options)
}

/// Parses `bounds` of `source` as one inline span.
///
/// # Arguments
///
/// * `source` - The host character sequence; it is only read and sliced
/// * `bounds` - The inline region isolated by the block pass
/// * `definitions` - Read-only reference definitions for label lookup
/// * `options` - Emphasis markers and flanking classification
pub fn parse_range<S, D>(
    source: &S,
    bounds: Range<S::Pos>,
    definitions: &D,
    options: ParseOptions,
) -> InlineTree<S::Pos>
where
    S: InlineSource + ?Sized,
    D: ReferenceDefinitions + ?Sized,
{
    if bounds.start >= bounds.end {
        return InlineTree::default();
    }
    let nodes = resolver::resolve(source, bounds.clone(), definitions, options);
    assembler::assemble(source, bounds, nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_empty_tree() {
        let tree = parse("", &DefinitionTable::new());
        assert!(tree.is_empty());
    }

    #[test]
    fn sub_range_parsing() {
        let source = "> *quoted*\n";
        let tree = parse_range(source, 2..10, &DefinitionTable::new(), ParseOptions::default());
        let kinds: Vec<_> = tree.roots().map(|n| (n.kind.clone(), n.range())).collect();
        assert_eq!(kinds, vec![(InlineNodeKind::Emphasis(1), 2..10)]);
    }

    #[test]
    fn str_and_char_sources_agree() {
        let input = "a *b* `c` [d](e)  \nf";
        let chars: Vec<char> = input.chars().collect();
        let table = DefinitionTable::new();

        let from_str = dump(&parse(input, &table), input);
        let from_chars = dump(&parse(chars.as_slice(), &table), chars.as_slice());
        assert_eq!(from_str, from_chars);
    }

    #[test]
    fn non_ascii_positions_differ_but_structure_matches() {
        let input = "é *ü*";
        let chars: Vec<char> = input.chars().collect();
        let table = DefinitionTable::new();

        let by_bytes: Vec<_> = parse(input, &table).roots().map(|n| n.range()).collect();
        let by_chars: Vec<_> = parse(chars.as_slice(), &table)
            .roots()
            .map(|n| n.range())
            .collect();
        assert_eq!(by_bytes, vec![0..3, 3..7]);
        assert_eq!(by_chars, vec![0..2, 2..5]);
    }
}
