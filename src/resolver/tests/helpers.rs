use crate::definitions::{DefinitionTable, ReferenceDefinition};
use crate::tree::{InlineTree, dump};
use crate::{ParseOptions, parse_with};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn table(entries: &[(&str, &str, Option<&str>)]) -> DefinitionTable {
    entries
        .iter()
        .map(|&(label, destination, title)| {
            (
                label,
                ReferenceDefinition::new(destination, title.map(str::to_string)),
            )
        })
        .collect()
}

pub fn parse_str(input: &str, definitions: &DefinitionTable) -> InlineTree<usize> {
    init_logger();
    parse_with(input, definitions, ParseOptions::default())
}

/// One line per node, as produced by `dump`.
pub fn outline(input: &str, definitions: &DefinitionTable) -> Vec<String> {
    let tree = parse_str(input, definitions);
    dump(&tree, input).lines().map(str::to_string).collect()
}

pub fn assert_outline(input: &str, expected: &[&str]) {
    assert_outline_with(input, &DefinitionTable::new(), expected);
}

pub fn assert_outline_with(input: &str, definitions: &DefinitionTable, expected: &[&str]) {
    let actual = outline(input, definitions);
    assert_eq!(
        actual, expected,
        "Outline did not match for input:\n{}",
        input
    );
}
