use std::collections::{HashMap, VecDeque};

use super::{Mark, Resolver};
use crate::definitions::ReferenceDefinitions;
use crate::node::{InlineNode, InlineNodeKind};
use crate::scanner::TokenKind;
use crate::source::InlineSource;

impl<S, D> Resolver<'_, S, D>
where
    S: InlineSource + ?Sized,
    D: ReferenceDefinitions + ?Sized,
{
    /// Whether the backtick run at `index` directly follows a lone `\`.
    /// Such a run may close a span but never opens one.
    fn is_escaped_run(&self, index: usize) -> bool {
        let Some(prev) = index.checked_sub(1).map(|i| self.tokens[i]) else {
            return false;
        };
        prev.kind == TokenKind::Text
            && prev.end == self.tokens[index].start
            && self.source.char_at(prev.start) == Some('\\')
            && self.source.step_forward(prev.start) == prev.end
    }

    /// Pair each backtick run with the next run of the same length. The
    /// interior of a span is opaque: every token inside it is claimed.
    /// Runs left unpaired stay live and end up as literal text.
    pub(super) fn resolve_code_spans(&mut self) {
        let mut by_length: HashMap<usize, VecDeque<usize>> = HashMap::new();
        let mut runs = Vec::new();
        for (index, token) in self.tokens.iter().enumerate() {
            if let TokenKind::Backticks(len) = token.kind {
                by_length.entry(len).or_default().push_back(index);
                runs.push((index, len));
            }
        }

        for (index, len) in runs {
            if self.marks[index] != Mark::Live || self.is_escaped_run(index) {
                continue;
            }
            let Some(queue) = by_length.get_mut(&len) else {
                continue;
            };
            while queue.front().is_some_and(|&candidate| candidate <= index) {
                queue.pop_front();
            }
            let Some(closer) = queue.pop_front() else {
                log::trace!("Unmatched backtick run of length {len}");
                continue;
            };

            let start = self.tokens[index].start;
            let end = self.tokens[closer].end;
            self.marks[index] = Mark::Code;
            for mark in &mut self.marks[index + 1..=closer] {
                *mark = Mark::Inert;
            }
            log::trace!("Code span {start:?}..{end:?} (width {len})");
            self.nodes
                .push(InlineNode::new(InlineNodeKind::Code(len), start, end));
        }
    }
}
