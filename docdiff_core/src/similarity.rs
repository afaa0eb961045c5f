//! Bag-of-words similarity between the paragraphs of two texts.

use std::collections::HashMap;

use crate::{ParagraphMatch, SimilarityReport};

/// Words of this many characters or fewer are ignored.
const MIN_WORD_CHARS: usize = 2;

/// Split text into paragraphs separated by blank lines.
///
/// Paragraphs are trimmed; empty ones are dropped.
#[must_use]
pub fn split_into_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            push_paragraph(&mut paragraphs, &mut current);
        } else {
            current.push(line);
        }
    }
    push_paragraph(&mut paragraphs, &mut current);
    paragraphs
}

fn push_paragraph(paragraphs: &mut Vec<String>, current: &mut Vec<&str>) {
    let paragraph = current.join("\n");
    current.clear();
    let trimmed = paragraph.trim();
    if !trimmed.is_empty() {
        paragraphs.push(trimmed.to_string());
    }
}

/// Cosine similarity of the word-count vectors of two texts.
///
/// Text is lowercased and stripped of punctuation; words of two characters
/// or fewer are ignored. Returns `0.0` when either side has no words.
#[must_use]
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let left = word_counts(a);
    let right = word_counts(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let dot: f64 = left
        .iter()
        .filter_map(|(word, &count)| right.get(word).map(|&other| count * other))
        .sum();
    let magnitude =
        |counts: &HashMap<String, f64>| counts.values().map(|c| c * c).sum::<f64>().sqrt();

    dot / (magnitude(&left) * magnitude(&right))
}

/// Match each original paragraph to its most similar modified paragraph.
#[must_use]
pub fn paragraph_similarities(original: &str, modified: &str) -> SimilarityReport {
    let candidates = split_into_paragraphs(modified);

    let matches: Vec<ParagraphMatch> = split_into_paragraphs(original)
        .into_iter()
        .map(|paragraph| {
            let best = candidates
                .iter()
                .map(|candidate| (candidate, cosine_similarity(&paragraph, candidate)))
                .fold(None::<(&String, f64)>, |best, (candidate, score)| match best {
                    Some((_, best_score)) if best_score >= score => best,
                    _ => Some((candidate, score)),
                });

            let (transformed, similarity) =
                best.map_or_else(|| (String::new(), 0.0), |(text, score)| (text.clone(), score));
            ParagraphMatch {
                original: paragraph,
                transformed,
                similarity,
            }
        })
        .collect();

    let overall = if matches.is_empty() {
        0.0
    } else {
        matches.iter().map(|m| m.similarity).sum::<f64>() / count_as_f64(matches.len())
    };

    tracing::debug!(
        paragraphs = matches.len(),
        candidates = candidates.len(),
        overall,
        "scored paragraph similarity"
    );
    SimilarityReport { matches, overall }
}

fn word_counts(text: &str) -> HashMap<String, f64> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let mut counts = HashMap::new();
    for word in cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_WORD_CHARS)
    {
        *counts.entry(word.to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

#[allow(clippy::cast_precision_loss)]
const fn count_as_f64(count: usize) -> f64 {
    count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let paragraphs = split_into_paragraphs("  first\nstill first \n\n \t\nsecond\n\n\n");
        assert_eq!(paragraphs, vec!["first\nstill first", "second"]);
        assert!(split_into_paragraphs(" \n\n ").is_empty());
    }

    #[test]
    fn identical_text_scores_one() {
        assert!(close(cosine_similarity("The quick fox", "the QUICK fox!"), 1.0));
    }

    #[test]
    fn short_words_and_punctuation_are_ignored() {
        assert!(close(cosine_similarity("an ox is", "to be or"), 0.0));
        assert!(close(cosine_similarity("", "something"), 0.0));
        assert!(close(cosine_similarity("don't", "dont"), 1.0));
    }

    #[test]
    fn partial_overlap() {
        // {alpha, beta} vs {alpha, gamma}: dot 1, magnitudes sqrt(2)
        assert!(close(cosine_similarity("alpha beta", "alpha gamma"), 0.5));
    }

    #[test]
    fn each_paragraph_takes_best_match() {
        let report = paragraph_similarities(
            "red apples grow\n\nblue ocean waves",
            "blue ocean waves\n\nred apples grow",
        );
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.matches[0].transformed, "red apples grow");
        assert_eq!(report.matches[1].transformed, "blue ocean waves");
        assert!(close(report.overall, 1.0));
    }

    #[test]
    fn missing_candidates_score_zero() {
        let report = paragraph_similarities("lonely paragraph here", "");
        assert_eq!(report.matches.len(), 1);
        assert!(report.matches[0].transformed.is_empty());
        assert!(close(report.overall, 0.0));

        assert_eq!(paragraph_similarities("", "text"), SimilarityReport::default());
    }
}
