//! Replace-pair detection and intra-line word diffs.

use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};

use crate::{DiffLine, LineKind, SpanKind, WordSpan};

/// How removed and added lines are matched for word highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingStrategy {
    /// Only a removed line immediately followed by an added line forms a pair.
    #[default]
    Adjacent,
    /// The k-th line of a removed block pairs with the k-th line of the added
    /// block that directly follows it.
    Greedy,
}

/// Attach word diffs to replace pairs.
#[must_use]
pub fn pair_and_word_diff(mut lines: Vec<DiffLine>, strategy: PairingStrategy) -> Vec<DiffLine> {
    let pairs = match strategy {
        PairingStrategy::Adjacent => adjacent_pairs(&lines),
        PairingStrategy::Greedy => greedy_pairs(&lines),
    };

    for &(removed, added) in &pairs {
        let spans = word_diff(lines[removed].content(), lines[added].content());
        let (removed_spans, added_spans) = split_spans(spans);
        attach(&mut lines[removed], removed_spans);
        attach(&mut lines[added], added_spans);
    }

    tracing::debug!(pairs = pairs.len(), ?strategy, "paired replaced lines");
    lines
}

/// Word-level diff between two lines.
///
/// Tokens follow Unicode word boundaries, so punctuation and whitespace runs
/// are tokens of their own. Consecutive tokens with the same classification
/// are merged into one span, so concatenating the non-added spans reproduces
/// `old` and the non-removed spans reproduce `new`.
#[must_use]
pub fn word_diff(old: &str, new: &str) -> Vec<WordSpan> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_unicode_words(old, new);

    let mut spans: Vec<WordSpan> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SpanKind::Unchanged,
            ChangeTag::Delete => SpanKind::Removed,
            ChangeTag::Insert => SpanKind::Added,
        };
        match spans.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => spans.push(WordSpan::new(change.value(), kind)),
        }
    }
    spans
}

fn adjacent_pairs(lines: &[DiffLine]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut index = 0;
    while index + 1 < lines.len() {
        if lines[index].kind() == LineKind::Removed && lines[index + 1].kind() == LineKind::Added {
            pairs.push((index, index + 1));
            index += 2;
        } else {
            index += 1;
        }
    }
    pairs
}

fn greedy_pairs(lines: &[DiffLine]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut index = 0;
    while index < lines.len() {
        if lines[index].kind() != LineKind::Removed {
            index += 1;
            continue;
        }

        let removed_start = index;
        while index < lines.len() && lines[index].kind() == LineKind::Removed {
            index += 1;
        }
        let added_start = index;
        while index < lines.len() && lines[index].kind() == LineKind::Added {
            index += 1;
        }

        let removed_count = added_start - removed_start;
        let added_count = index - added_start;
        pairs.extend(
            (0..removed_count.min(added_count))
                .map(|offset| (removed_start + offset, added_start + offset)),
        );
    }
    pairs
}

fn split_spans(spans: Vec<WordSpan>) -> (Vec<WordSpan>, Vec<WordSpan>) {
    let removed = spans
        .iter()
        .filter(|span| span.kind != SpanKind::Added)
        .cloned()
        .collect();
    let added = spans
        .into_iter()
        .filter(|span| span.kind != SpanKind::Removed)
        .collect();
    (removed, added)
}

fn attach(line: &mut DiffLine, spans: Vec<WordSpan>) {
    match line {
        DiffLine::Removed { word_diff, .. } | DiffLine::Added { word_diff, .. } => {
            *word_diff = Some(spans);
        }
        DiffLine::Unchanged { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_lines;

    fn joined(spans: &[WordSpan]) -> String {
        spans.iter().map(|span| span.text.as_str()).collect()
    }

    #[test]
    fn word_diff_keeps_whitespace() {
        let spans = word_diff("the quick fox", "the slow fox");
        assert_eq!(
            spans,
            vec![
                WordSpan::new("the ", SpanKind::Unchanged),
                WordSpan::new("quick", SpanKind::Removed),
                WordSpan::new("slow", SpanKind::Added),
                WordSpan::new(" fox", SpanKind::Unchanged),
            ]
        );
    }

    #[test]
    fn punctuation_is_its_own_token() {
        let spans = word_diff("Hello, world", "Hello! world");
        assert_eq!(
            spans,
            vec![
                WordSpan::new("Hello", SpanKind::Unchanged),
                WordSpan::new(",", SpanKind::Removed),
                WordSpan::new("!", SpanKind::Added),
                WordSpan::new(" world", SpanKind::Unchanged),
            ]
        );

        let spans = word_diff("approved the budget.", "approved the budget!");
        assert_eq!(spans[0], WordSpan::new("approved the budget", SpanKind::Unchanged));
        assert_eq!(
            spans[1..],
            [
                WordSpan::new(".", SpanKind::Removed),
                WordSpan::new("!", SpanKind::Added),
            ]
        );
    }

    #[test]
    fn adjacent_pair_gets_filtered_spans() {
        let lines = pair_and_word_diff(
            diff_lines("keep\nold value\nkeep", "keep\nnew value\nkeep"),
            PairingStrategy::Adjacent,
        );

        let removed = &lines[1];
        let added = &lines[2];
        assert!(removed.has_pair());
        assert!(added.has_pair());

        let removed_spans = removed.word_diff().expect("removed spans");
        assert!(removed_spans.iter().all(|s| s.kind != SpanKind::Added));
        assert_eq!(joined(removed_spans), "old value");

        let added_spans = added.word_diff().expect("added spans");
        assert!(added_spans.iter().all(|s| s.kind != SpanKind::Removed));
        assert_eq!(joined(added_spans), "new value");

        assert!(!lines[0].has_pair());
        assert!(!lines[3].has_pair());
    }

    #[test]
    fn lone_changes_are_not_paired() {
        let lines = pair_and_word_diff(diff_lines("a\nb", "a"), PairingStrategy::Adjacent);
        assert_eq!(lines[1].kind(), LineKind::Removed);
        assert!(!lines[1].has_pair());

        let lines = pair_and_word_diff(diff_lines("a", "a\nb"), PairingStrategy::Adjacent);
        assert!(!lines[1].has_pair());
    }

    #[test]
    fn adjacent_only_pairs_block_boundary() {
        let lines = pair_and_word_diff(
            diff_lines("r1\nr2\nr3", "a1\na2\na3"),
            PairingStrategy::Adjacent,
        );
        let paired: Vec<bool> = lines.iter().map(DiffLine::has_pair).collect();
        assert_eq!(paired, vec![false, false, true, true, false, false]);
    }

    #[test]
    fn greedy_pairs_blocks_positionally() {
        let lines = pair_and_word_diff(
            diff_lines("r1\nr2\nr3", "a1\na2"),
            PairingStrategy::Greedy,
        );
        let paired: Vec<bool> = lines.iter().map(DiffLine::has_pair).collect();
        assert_eq!(paired, vec![true, true, false, true, true]);
    }

    #[test]
    fn strategy_uses_snake_case() {
        let json = serde_json::to_string(&PairingStrategy::Greedy).expect("serialize strategy");
        assert_eq!(json, "\"greedy\"");
    }
}
