use crate::definitions::DefinitionTable;
use crate::node::InlineNodeKind;
use crate::resolver::tests::helpers::{assert_outline, parse_str};

#[test]
fn trailing_spaces_make_hard_break() {
    assert_outline(
        "a  \nb",
        &["Text 0..1 \"a\"", "Hardbreak 1..4 \"  \\n\"", "Text 4..5 \"b\""],
    );
}

#[test]
fn plain_newline_is_soft_break() {
    assert_outline(
        "a\nb",
        &["Text 0..1 \"a\"", "Softbreak 1..2 \"\\n\"", "Text 2..3 \"b\""],
    );
}

#[test]
fn single_trailing_space_is_still_soft() {
    assert_outline(
        "a \nb",
        &["Text 0..2 \"a \"", "Softbreak 2..3 \"\\n\"", "Text 3..4 \"b\""],
    );
}

#[test]
fn backslash_newline_is_hard_break() {
    assert_outline(
        "a\\\nb",
        &["Text 0..1 \"a\"", "Hardbreak 1..3 \"\\\\\\n\"", "Text 3..4 \"b\""],
    );
}

#[test]
fn breaks_have_no_children() {
    let tree = parse_str("a  \nb\nc", &DefinitionTable::new());
    for (_, id) in tree.walk() {
        let node = &tree[id];
        if matches!(node.kind, InlineNodeKind::Softbreak | InlineNodeKind::Hardbreak) {
            assert!(node.children().is_empty());
        }
    }
}

#[test]
fn breaks_nest_inside_emphasis() {
    assert_outline(
        "*a\nb*",
        &[
            "Emphasis(1) 0..5 \"*a\\nb*\"",
            "  Text 1..2 \"a\"",
            "  Softbreak 2..3 \"\\n\"",
            "  Text 3..4 \"b\"",
        ],
    );
}
