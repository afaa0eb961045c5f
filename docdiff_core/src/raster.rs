//! Pixel comparison of rendered pages.
//!
//! Pages are compared in YIQ colour space after blending translucent pixels
//! onto white. Anti-aliased edges are not detected and count as differences.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::{PixelDiffStats, Result};

/// Squared YIQ distance between pure black and pure white.
const MAX_YIQ_DELTA: f64 = 35215.0;

/// Tunables for [`compare_pixels`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelDiffOptions {
    /// Matching threshold in `[0, 1]`; smaller is more sensitive.
    pub threshold: f64,
    /// Opacity of unchanged pixels drawn into the diff image.
    pub alpha: f64,
    /// Colour of differing pixels in the diff image.
    pub diff_color: [u8; 3],
}

impl Default for PixelDiffOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            alpha: 0.5,
            diff_color: [255, 0, 0],
        }
    }
}

impl PixelDiffOptions {
    /// Override the threshold, clamped into `[0, 1]`.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// Result of a pixel comparison.
#[derive(Debug, Clone)]
pub struct PixelDiff {
    /// Visualization with differing pixels highlighted.
    pub image: RgbaImage,
    /// Difference counts.
    pub stats: PixelDiffStats,
}

/// Compare two images pixel by pixel.
///
/// Images of different sizes are padded with transparent pixels to the
/// larger width and height before comparison.
#[must_use]
pub fn compare_pixels(
    original: &RgbaImage,
    modified: &RgbaImage,
    options: &PixelDiffOptions,
) -> PixelDiff {
    let width = original.width().max(modified.width());
    let height = original.height().max(modified.height());
    let max_delta = MAX_YIQ_DELTA * options.threshold * options.threshold;
    let [red, green, blue] = options.diff_color;
    let transparent = Rgba([0, 0, 0, 0]);

    let mut output = RgbaImage::new(width, height);
    let mut diff_pixels: u64 = 0;
    for (x, y, out) in output.enumerate_pixels_mut() {
        let a = pixel_or(original, x, y, transparent);
        let b = pixel_or(modified, x, y, transparent);

        if yiq_delta(a, b) > max_delta {
            diff_pixels += 1;
            *out = Rgba([red, green, blue, 255]);
        } else {
            let gray = faded_gray(a, options.alpha);
            *out = Rgba([gray, gray, gray, 255]);
        }
    }

    let area = u64::from(width) * u64::from(height);
    let percent_diff = if area == 0 {
        0.0
    } else {
        ratio(diff_pixels, area) * 100.0
    };

    tracing::debug!(width, height, diff_pixels, percent_diff, "compared page images");
    PixelDiff {
        image: output,
        stats: PixelDiffStats {
            width,
            height,
            diff_pixels,
            percent_diff,
        },
    }
}

/// Load two images from disk and compare them.
///
/// # Errors
///
/// Returns [`crate::Error::Image`] when either file cannot be opened or
/// decoded.
pub fn compare_image_files(
    original: impl AsRef<Path>,
    modified: impl AsRef<Path>,
    options: &PixelDiffOptions,
) -> Result<PixelDiff> {
    let original = image::open(original.as_ref())?.to_rgba8();
    let modified = image::open(modified.as_ref())?.to_rgba8();
    Ok(compare_pixels(&original, &modified, options))
}

fn pixel_or(image: &RgbaImage, x: u32, y: u32, fallback: Rgba<u8>) -> Rgba<u8> {
    image.get_pixel_checked(x, y).copied().unwrap_or(fallback)
}

fn blend_white(channel: u8, alpha: f64) -> f64 {
    255.0 + (f64::from(channel) - 255.0) * alpha
}

fn yiq(pixel: Rgba<u8>) -> (f64, f64, f64) {
    let [r, g, b, a] = pixel.0;
    let alpha = f64::from(a) / 255.0;
    let (r, g, b) = (blend_white(r, alpha), blend_white(g, alpha), blend_white(b, alpha));
    (
        r * 0.298_895_31 + g * 0.586_622_47 + b * 0.114_482_23,
        r * 0.595_977_99 - g * 0.274_176_10 - b * 0.321_801_89,
        r * 0.211_470_17 - g * 0.522_617_11 + b * 0.311_146_94,
    )
}

fn yiq_delta(a: Rgba<u8>, b: Rgba<u8>) -> f64 {
    if a == b {
        return 0.0;
    }
    let (y1, i1, q1) = yiq(a);
    let (y2, i2, q2) = yiq(b);
    let (dy, di, dq) = (y1 - y2, i1 - i2, q1 - q2);
    0.5053 * dy * dy + 0.299 * di * di + 0.1957 * dq * dq
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn faded_gray(pixel: Rgba<u8>, alpha: f64) -> u8 {
    let (luma, _, _) = yiq(pixel);
    let faded = 255.0 + (luma - 255.0) * alpha;
    faded.round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: u64, whole: u64) -> f64 {
    part as f64 / whole as f64
}
