//! Foreground extraction by Otsu-threshold background subtraction
//!
//! Runs before the conversion pipeline when requested. Pixels whose
//! luminance falls at or below the Otsu threshold are treated as background
//! and zeroed; the pipeline then sees them as black blocks.

use ndarray::Array3;

const HISTOGRAM_BINS: usize = 256;

/// Compute the Otsu threshold of a luminance histogram
///
/// Picks the gray level that maximizes between-class variance of the
/// background/foreground split. Returns 0 for an empty histogram.
fn otsu_threshold(histogram: &[u64; HISTOGRAM_BINS]) -> u8 {
    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 0;
    }

    let weighted_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut background_count = 0.0;
    let mut background_sum = 0.0;
    let mut best_variance = 0.0;
    let mut best_level = 0u8;

    for (level, &count) in histogram.iter().enumerate() {
        background_count += count as f64;
        if background_count == 0.0 {
            continue;
        }
        let foreground_count = total as f64 - background_count;
        if foreground_count == 0.0 {
            break;
        }

        background_sum += level as f64 * count as f64;
        let background_mean = background_sum / background_count;
        let foreground_mean = (weighted_total - background_sum) / foreground_count;
        let mean_difference = background_mean - foreground_mean;
        let variance = background_count * foreground_count * mean_difference * mean_difference;

        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }

    best_level
}

/// Zero out background pixels in place
///
/// Luminance is the per-pixel channel mean. Every pixel at or below the Otsu
/// threshold has all three channels set to zero; brighter pixels pass
/// through untouched.
pub fn subtract_background(pixels: &mut Array3<f64>) {
    let (height, width, _) = pixels.dim();

    let mut histogram = [0u64; HISTOGRAM_BINS];
    for i in 0..height {
        for j in 0..width {
            let luminance = pixel_luminance(pixels, i, j);
            let bin = (luminance.round() as usize).min(HISTOGRAM_BINS - 1);
            if let Some(count) = histogram.get_mut(bin) {
                *count += 1;
            }
        }
    }

    let threshold = f64::from(otsu_threshold(&histogram));
    for i in 0..height {
        for j in 0..width {
            if pixel_luminance(pixels, i, j) <= threshold {
                for c in 0..3 {
                    if let Some(channel) = pixels.get_mut((i, j, c)) {
                        *channel = 0.0;
                    }
                }
            }
        }
    }
}

fn pixel_luminance(pixels: &Array3<f64>, i: usize, j: usize) -> f64 {
    (pixels[(i, j, 0)] + pixels[(i, j, 1)] + pixels[(i, j, 2)]) / 3.0
}
