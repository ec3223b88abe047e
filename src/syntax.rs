use rowan::{GreenNodeBuilder, Language};

use crate::node::InlineNodeKind;
use crate::tree::{InlineTree, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    TEXT = 0,
    EmphasisMarker, // * _
    CodeMarker,     // `
    CodeContent,
    ReferenceOpen, // [ or ![
    ReferenceTail, // ](dest "title"), ][label], ]
    Softbreak,
    Hardbreak,

    // Composite nodes
    ROOT,
    Emphasis,
    CodeSpan,
    Reference,
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineLanguage {}

impl Language for InlineLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::Reference as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<InlineLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<InlineLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<InlineLanguage>;

/// Build a lossless rowan tree over a parsed `str` span: the root's text is
/// exactly the parsed range, with markers kept as tokens.
pub fn build_syntax_tree(source: &str, tree: &InlineTree<usize>) -> SyntaxNode {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::ROOT.into());
    for &id in tree.root_ids() {
        emit(source, tree, id, &mut builder);
    }
    builder.finish_node();
    SyntaxNode::new_root(builder.finish())
}

fn token(builder: &mut GreenNodeBuilder<'static>, kind: SyntaxKind, text: &str) {
    if !text.is_empty() {
        builder.token(kind.into(), text);
    }
}

fn emit(source: &str, tree: &InlineTree<usize>, id: NodeId, builder: &mut GreenNodeBuilder<'static>) {
    let node = &tree[id];
    let (start, end) = (node.start, node.end);
    let content = node.content_range(source);

    let children = |builder: &mut GreenNodeBuilder<'static>| {
        for &child in node.children() {
            emit(source, tree, child, builder);
        }
    };

    match &node.kind {
        InlineNodeKind::Text => token(builder, SyntaxKind::TEXT, &source[start..end]),
        InlineNodeKind::Softbreak => token(builder, SyntaxKind::Softbreak, &source[start..end]),
        InlineNodeKind::Hardbreak => token(builder, SyntaxKind::Hardbreak, &source[start..end]),
        InlineNodeKind::Code(_) => {
            builder.start_node(SyntaxKind::CodeSpan.into());
            token(builder, SyntaxKind::CodeMarker, &source[start..content.start]);
            token(builder, SyntaxKind::CodeContent, &source[content.clone()]);
            token(builder, SyntaxKind::CodeMarker, &source[content.end..end]);
            builder.finish_node();
        }
        InlineNodeKind::Emphasis(_) => {
            builder.start_node(SyntaxKind::Emphasis.into());
            token(builder, SyntaxKind::EmphasisMarker, &source[start..content.start]);
            children(builder);
            token(builder, SyntaxKind::EmphasisMarker, &source[content.end..end]);
            builder.finish_node();
        }
        InlineNodeKind::Reference(_) => {
            builder.start_node(SyntaxKind::Reference.into());
            token(builder, SyntaxKind::ReferenceOpen, &source[start..content.start]);
            children(builder);
            token(builder, SyntaxKind::ReferenceTail, &source[content.end..end]);
            builder.finish_node();
        }
    }
}
