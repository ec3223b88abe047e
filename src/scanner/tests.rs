use crate::node::ReferenceKind;
use crate::options::ParseOptions;
use crate::scanner::{TokenKind, tokenize};

fn token_texts(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input, 0..input.len(), ParseOptions::default())
        .into_iter()
        .map(|t| (t.kind, input[t.start..t.end].to_string()))
        .collect()
}

fn kinds(input: &str) -> Vec<TokenKind> {
    token_texts(input).into_iter().map(|(kind, _)| kind).collect()
}

fn delim(marker: char, len: usize, can_open: bool, can_close: bool) -> TokenKind {
    TokenKind::Delimiter {
        marker,
        len,
        can_open,
        can_close,
    }
}

#[test]
fn scanner_covers_every_character() {
    let input = "a *b* `c` [d](e) ![f]  \ng\nh\\\ni é";
    let tokens = tokenize(input, 0..input.len(), ParseOptions::default());
    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.start, offset, "gap before {token:?}");
        assert!(token.end > token.start, "empty token {token:?}");
        offset = token.end;
    }
    assert_eq!(offset, input.len());
}

#[test]
fn scanner_emphasis_runs() {
    let tokens = token_texts("**a** b*");
    assert_eq!(
        tokens,
        vec![
            (delim('*', 2, true, false), "**".to_string()),
            (TokenKind::Text, "a".to_string()),
            (delim('*', 2, false, true), "**".to_string()),
            (TokenKind::Text, " b".to_string()),
            (delim('*', 1, false, true), "*".to_string()),
        ]
    );
}

#[test]
fn scanner_intraword_underscore() {
    assert_eq!(
        kinds("snake_case"),
        vec![TokenKind::Text, delim('_', 1, false, false), TokenKind::Text]
    );
}

#[test]
fn scanner_underscore_can_be_disabled() {
    let options = ParseOptions {
        underscore_emphasis: false,
        ..ParseOptions::default()
    };
    let input = "_a_";
    let tokens = tokenize(input, 0..input.len(), options);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Text);
}

#[test]
fn scanner_backtick_runs() {
    assert_eq!(
        token_texts("``a`"),
        vec![
            (TokenKind::Backticks(2), "``".to_string()),
            (TokenKind::Text, "a".to_string()),
            (TokenKind::Backticks(1), "`".to_string()),
        ]
    );
}

#[test]
fn scanner_brackets() {
    assert_eq!(
        token_texts("![a] [b]!"),
        vec![
            (
                TokenKind::OpenBracket(ReferenceKind::Unwrapped),
                "![".to_string()
            ),
            (TokenKind::Text, "a".to_string()),
            (TokenKind::CloseBracket, "]".to_string()),
            (TokenKind::Text, " ".to_string()),
            (
                TokenKind::OpenBracket(ReferenceKind::Normal),
                "[".to_string()
            ),
            (TokenKind::Text, "b".to_string()),
            (TokenKind::CloseBracket, "]".to_string()),
            (TokenKind::Text, "!".to_string()),
        ]
    );
}

#[test]
fn scanner_line_breaks() {
    assert_eq!(
        token_texts("a  \nb \nc\\\nd"),
        vec![
            (TokenKind::Text, "a".to_string()),
            (TokenKind::Hardbreak, "  \n".to_string()),
            (TokenKind::Text, "b ".to_string()),
            (TokenKind::Softbreak, "\n".to_string()),
            (TokenKind::Text, "c".to_string()),
            (TokenKind::Hardbreak, "\\\n".to_string()),
            (TokenKind::Text, "d".to_string()),
        ]
    );
}

#[test]
fn scanner_spaces_without_newline_stay_text() {
    assert_eq!(token_texts("a   b"), vec![(TokenKind::Text, "a   b".to_string())]);
    assert_eq!(token_texts("  a"), vec![(TokenKind::Text, "  a".to_string())]);
}

#[test]
fn scanner_escapes_are_text() {
    assert_eq!(
        token_texts(r"\*a\["),
        vec![
            (TokenKind::Text, r"\*".to_string()),
            (TokenKind::Text, "a".to_string()),
            (TokenKind::Text, r"\[".to_string()),
        ]
    );
    assert_eq!(
        token_texts(r"\a"),
        vec![
            (TokenKind::Text, r"\".to_string()),
            (TokenKind::Text, "a".to_string()),
        ]
    );
}

#[test]
fn scanner_leaves_backtick_after_backslash() {
    assert_eq!(
        token_texts(r"\`a"),
        vec![
            (TokenKind::Text, r"\".to_string()),
            (TokenKind::Backticks(1), "`".to_string()),
            (TokenKind::Text, "a".to_string()),
        ]
    );
}

#[test]
fn scanner_flanking_respects_span_bounds() {
    // The run sits at the start of the sub-range, so the preceding `a`
    // outside the range must not count against it.
    let input = "a*b";
    let tokens = tokenize(input, 1..3, ParseOptions::default());
    assert_eq!(tokens[0].kind, delim('*', 1, true, false));
}

#[test]
fn scanner_empty_input() {
    assert!(kinds("").is_empty());
}

#[test]
fn scanner_char_slice_source() {
    let chars: Vec<char> = "é*x*".chars().collect();
    let tokens = tokenize(chars.as_slice(), 0..chars.len(), ParseOptions::default());
    let spans: Vec<_> = tokens.iter().map(|t| (t.start, t.end)).collect();
    assert_eq!(spans, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
}
