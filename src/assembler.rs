use std::ops::Range;

use crate::node::{InlineNode, InlineNodeKind};
use crate::source::InlineSource;
use crate::tree::{InlineTree, NodeId};

/// Fill the gaps between markup with `Text` nodes and nest everything by
/// containment.
///
/// Nodes arrive flat and in discovery order. After sorting by start, a node
/// becomes a child of the nearest open container whose content range holds
/// it. Only references and emphasis accept children; code spans are opaque.
pub fn assemble<S>(
    source: &S,
    bounds: Range<S::Pos>,
    mut nodes: Vec<InlineNode<S::Pos>>,
) -> InlineTree<S::Pos>
where
    S: InlineSource + ?Sized,
{
    fill_text(source, bounds, &mut nodes);
    nodes.sort_by_key(InlineNode::sort_key);

    let mut roots = Vec::new();
    let mut open: Vec<(NodeId, Range<S::Pos>)> = Vec::new();

    for index in 0..nodes.len() {
        let id = NodeId(index);
        let (start, end) = (nodes[index].start, nodes[index].end);

        let mut attached = false;
        while let Some((parent, content)) = open.last() {
            if content.start <= start && end <= content.end {
                nodes[parent.index()].children.push(id);
                attached = true;
                break;
            }
            open.pop();
        }
        if !attached {
            roots.push(id);
        }

        if nodes[index].is_container() {
            open.push((id, nodes[index].content_range(source)));
        }
    }

    log::debug!(
        "Assembled {} nodes, {} at top level",
        nodes.len(),
        roots.len()
    );
    InlineTree { nodes, roots }
}

/// Every position not taken by markup is literal text.
fn fill_text<S>(source: &S, bounds: Range<S::Pos>, nodes: &mut Vec<InlineNode<S::Pos>>)
where
    S: InlineSource + ?Sized,
{
    let mut markup: Vec<Range<S::Pos>> = nodes
        .iter()
        .flat_map(|node| node.markup_ranges(source))
        .flatten()
        .collect();
    markup.sort_by_key(|range| range.start);

    let mut cursor = bounds.start;
    for range in markup {
        if cursor < range.start {
            nodes.push(InlineNode::new(InlineNodeKind::Text, cursor, range.start));
        }
        cursor = cursor.max(range.end);
    }
    if cursor < bounds.end {
        nodes.push(InlineNode::new(InlineNodeKind::Text, cursor, bounds.end));
    }
}
