use serde::{Deserialize, Serialize};

/// Best match for one paragraph of the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphMatch {
    /// Paragraph from the original text.
    pub original: String,
    /// Most similar paragraph from the modified text (empty if there is none).
    pub transformed: String,
    /// Cosine similarity in `[0, 1]`.
    pub similarity: f64,
}

/// Paragraph-level similarity between two texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimilarityReport {
    /// One entry per original paragraph, in order.
    #[serde(default)]
    pub matches: Vec<ParagraphMatch>,
    /// Mean similarity over all matches, `0.0` when there are none.
    #[serde(default)]
    pub overall: f64,
}

/// Outcome counts of a pixel comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelDiffStats {
    /// Width of the compared area in pixels.
    pub width: u32,
    /// Height of the compared area in pixels.
    pub height: u32,
    /// Number of pixels that differ beyond the threshold.
    pub diff_pixels: u64,
    /// `diff_pixels` as a percentage of the compared area.
    pub percent_diff: f64,
}

impl PixelDiffStats {
    /// Whether any pixel differed.
    #[must_use]
    pub const fn has_differences(&self) -> bool {
        self.diff_pixels > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults_are_applied() {
        let report: SimilarityReport = serde_json::from_str("{}").expect("deserialize report");
        assert!(report.matches.is_empty());
        assert!(report.overall.abs() < f64::EPSILON);
    }

    #[test]
    fn pixel_stats_flags_differences() {
        let stats = PixelDiffStats {
            width: 2,
            height: 2,
            diff_pixels: 1,
            percent_diff: 25.0,
        };
        assert!(stats.has_differences());
        let json = serde_json::to_value(stats).expect("serialize stats");
        assert_eq!(json["diff_pixels"], 1);
    }
}
