use docdiff_core::collapse::collapsible_regions;
use docdiff_core::navigation::{CollapsedState, NavigationIndex};
use docdiff_core::{
    format_document, DiffDocument, DiffOptions, DiffSummary, LineKind, PairingStrategy, SpanKind,
};

fn format(old: &str, new: &str) -> DiffDocument {
    format_document(old, new, "doc.md", false, &DiffOptions::default())
}

#[test]
fn single_replacement_is_paired() {
    let document = format("a\nb\nc", "a\nx\nc");

    let shape: Vec<_> = document
        .lines
        .iter()
        .map(|line| {
            (
                line.kind(),
                line.content(),
                line.old_line_number(),
                line.new_line_number(),
            )
        })
        .collect();
    assert_eq!(
        shape,
        vec![
            (LineKind::Unchanged, "a", Some(1), Some(1)),
            (LineKind::Removed, "b", Some(2), None),
            (LineKind::Added, "x", None, Some(2)),
            (LineKind::Unchanged, "c", Some(3), Some(3)),
        ]
    );
    assert_eq!(document.summary, DiffSummary::new(1, 1));
    assert_eq!(document.summary.changes, 2);
    assert!(document.lines[1].has_pair());
    assert!(document.lines[2].has_pair());
}

#[test]
fn identical_inputs_produce_no_changes() {
    let document = format("one\ntwo\nthree", "one\ntwo\nthree");

    assert_eq!(document.summary, DiffSummary::ZERO);
    assert!(document.lines.iter().all(|line| !line.is_change()));
    let state = CollapsedState::all_collapsed(&document.lines);
    let index = NavigationIndex::build(&document.lines, &state);
    assert!(index.is_empty());
}

#[test]
fn empty_original_yields_one_addition() {
    let document = format("", "line1");

    assert_eq!(document.lines.len(), 1);
    assert_eq!(document.lines[0].kind(), LineKind::Added);
    assert_eq!(document.lines[0].new_line_number(), Some(1));
    assert_eq!(document.summary, DiffSummary::new(1, 0));
    assert!(!document.lines[0].has_pair());
}

#[test]
fn long_unchanged_run_collapses_interior() {
    let shared: Vec<String> = (1..=20).map(|n| format!("shared {n}")).collect();
    let old = format!("before\n{}\nafter", shared.join("\n"));
    let new = format!("BEFORE\n{}\nAFTER", shared.join("\n"));

    let document = format(&old, &new);
    let regions = collapsible_regions(&document.lines);

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].count, 14);
    // removed, added, then three context lines
    assert_eq!(regions[0].start, 5);
    assert_eq!(document.lines[regions[0].start].content(), "shared 4");
}

#[test]
fn word_spans_cover_each_side() {
    let document = format(
        "The committee approved the budget.",
        "The committee rejected the budget.",
    );

    let removed = document.lines[0].word_diff().expect("removed spans");
    let added = document.lines[1].word_diff().expect("added spans");

    let removed_words: Vec<&str> = removed
        .iter()
        .filter(|span| span.kind == SpanKind::Removed)
        .map(|span| span.text.as_str())
        .collect();
    let added_words: Vec<&str> = added
        .iter()
        .filter(|span| span.kind == SpanKind::Added)
        .map(|span| span.text.as_str())
        .collect();
    assert_eq!(removed_words, vec!["approved"]);
    assert_eq!(added_words, vec!["rejected"]);

    let rebuilt: String = added.iter().map(|span| span.text.as_str()).collect();
    assert_eq!(rebuilt, "The committee rejected the budget.");
}

#[test]
fn greedy_pairing_highlights_whole_blocks() {
    let old = "keep\nalpha one\nbeta two\nkeep";
    let new = "keep\nalpha uno\nbeta dos\nkeep";

    let adjacent = format(old, new);
    let paired: usize = adjacent.lines.iter().filter(|line| line.has_pair()).count();
    assert_eq!(paired, 2);

    let greedy = format_document(
        old,
        new,
        "doc.md",
        false,
        &DiffOptions::default().with_pairing(PairingStrategy::Greedy),
    );
    assert!(greedy.lines.iter().filter(|line| line.is_change()).all(|line| line.has_pair()));
}

#[test]
fn document_serializes_with_tagged_lines() {
    let document = format("a\nb", "a\nc");
    let json = serde_json::to_value(&document).expect("serialize document");

    assert_eq!(json["file_name"], "doc.md");
    assert_eq!(json["summary"]["changes"], 2);
    assert_eq!(json["lines"][0]["type"], "unchanged");
    assert_eq!(json["lines"][1]["type"], "removed");
    assert_eq!(json["lines"][1]["word_diff"][0]["kind"], "removed");
    assert_eq!(json["lines"][2]["type"], "added");
}
