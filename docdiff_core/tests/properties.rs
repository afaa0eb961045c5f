use docdiff_core::collapse::{collapsible_regions, mark_collapsible};
use docdiff_core::diff::{diff_lines, split_lines};
use docdiff_core::navigation::{CollapsedState, NavigationCursor, NavigationIndex};
use docdiff_core::normalize::normalize;
use docdiff_core::pairing::{pair_and_word_diff, PairingStrategy};
use docdiff_core::{DiffLine, DiffSummary, LineKind, SpanKind};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec("[abc]{0,2}", 0..24).prop_map(|lines| lines.join("\n"))
}

fn side_numbers(lines: &[DiffLine], number: fn(&DiffLine) -> Option<usize>) -> Vec<usize> {
    lines.iter().filter_map(number).collect()
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in "[ a-c\t\r\n]{0,60}") {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn each_side_is_reconstructed(old in text(), new in text()) {
        let lines = diff_lines(&old, &new);

        let old_side: Vec<&str> = lines
            .iter()
            .filter(|line| line.kind() != LineKind::Added)
            .map(DiffLine::content)
            .collect();
        let new_side: Vec<&str> = lines
            .iter()
            .filter(|line| line.kind() != LineKind::Removed)
            .map(DiffLine::content)
            .collect();

        prop_assert_eq!(old_side, split_lines(&old));
        prop_assert_eq!(new_side, split_lines(&new));
    }

    #[test]
    fn line_numbers_count_up_from_one(old in text(), new in text()) {
        let lines = diff_lines(&old, &new);

        let old_numbers = side_numbers(&lines, DiffLine::old_line_number);
        let new_numbers = side_numbers(&lines, DiffLine::new_line_number);
        prop_assert_eq!(old_numbers, (1..=split_lines(&old).len()).collect::<Vec<_>>());
        prop_assert_eq!(new_numbers, (1..=split_lines(&new).len()).collect::<Vec<_>>());
    }

    #[test]
    fn summary_matches_line_kinds(old in text(), new in text()) {
        let lines = diff_lines(&old, &new);
        let summary = DiffSummary::from_lines(&lines);

        prop_assert_eq!(summary.changes, summary.additions + summary.deletions);
        prop_assert_eq!(
            summary.additions,
            lines.iter().filter(|line| line.kind() == LineKind::Added).count()
        );
    }

    #[test]
    fn pairs_never_mix_sides(old in text(), new in text(), greedy in any::<bool>()) {
        let strategy = if greedy { PairingStrategy::Greedy } else { PairingStrategy::Adjacent };
        let lines = pair_and_word_diff(diff_lines(&old, &new), strategy);

        for line in &lines {
            let Some(spans) = line.word_diff() else { continue };
            let forbidden = match line.kind() {
                LineKind::Removed => SpanKind::Added,
                LineKind::Added => SpanKind::Removed,
                LineKind::Unchanged => {
                    return Err(TestCaseError::fail("unchanged line carries spans"));
                }
            };
            prop_assert!(spans.iter().all(|span| span.kind != forbidden));
            let rebuilt: String = spans.iter().map(|span| span.text.as_str()).collect();
            prop_assert_eq!(rebuilt.as_str(), line.content());
        }
    }

    #[test]
    fn collapse_leaves_context_around_changes(run_len in 0usize..40, context in 0usize..6) {
        let mut lines = vec![DiffLine::removed("start", 1)];
        lines.extend((0..run_len).map(|n| DiffLine::unchanged("same", n + 2, n + 1)));
        lines.push(DiffLine::added("end", run_len + 1));

        mark_collapsible(&mut lines, context);
        let regions = collapsible_regions(&lines);

        if run_len > 2 * context {
            prop_assert_eq!(regions.len(), 1);
            prop_assert_eq!(regions[0].start, 1 + context);
            prop_assert_eq!(regions[0].count, run_len - 2 * context);
        } else {
            prop_assert!(regions.is_empty());
        }
    }

    #[test]
    fn navigation_cycles(old in text(), new in text()) {
        let mut lines = diff_lines(&old, &new);
        mark_collapsible(&mut lines, 3);
        let index = NavigationIndex::build(&lines, &CollapsedState::all_collapsed(&lines));
        let len = index.len();

        prop_assert_eq!(len, lines.iter().filter(|line| line.is_change()).count());

        let mut cursor = NavigationCursor::new();
        for _ in 0..len {
            cursor.next(len);
        }
        prop_assert_eq!(cursor.position(), 0);

        cursor.previous(len);
        prop_assert_eq!(cursor.position(), len.saturating_sub(1));
    }
}
