//! Color reduction by averaging and by k-means clustering
//!
//! Averaging emits each block's mean color directly. Clustering pools all
//! block means into a bounded palette: seeded k-means with a fixed
//! iteration/convergence policy and a best-of-N restart scheme, so results
//! are reproducible for a given seed.

use crate::classify::symbol::Symbol;
use crate::io::configuration::{KMEANS_EPSILON, KMEANS_MAX_ITERATIONS, KMEANS_RESTARTS};
use crate::io::error::{GlyphError, Result, invalid_parameter};
use crate::pipeline::canvas::Cell;
use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Emit each block's mean color as a cell with an empty symbol
///
/// The symbol field is never written by the color merge policy; it stays
/// empty for API uniformity.
pub fn average_colors(mean_colors: &Array3<f64>) -> Array2<Cell> {
    let (rows, cols, _) = mean_colors.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| Cell {
        symbol: Symbol::Empty,
        color: to_rgb([
            mean_colors[(i, j, 0)],
            mean_colors[(i, j, 1)],
            mean_colors[(i, j, 2)],
        ]),
    })
}

/// Reduces block colors to a bounded palette with seeded k-means
#[derive(Debug, Clone)]
pub struct ColorClusterer {
    clusters: usize,
    seed: u64,
}

impl ColorClusterer {
    /// Create a clusterer for a palette size and RNG seed
    pub const fn new(clusters: usize, seed: u64) -> Self {
        Self { clusters, seed }
    }

    /// Cluster the block mean colors and emit each block's palette color
    ///
    /// Runs [`KMEANS_RESTARTS`] independent restarts of at most
    /// [`KMEANS_MAX_ITERATIONS`] iterations each, stopping a restart early
    /// once the largest center movement drops below [`KMEANS_EPSILON`], and
    /// keeps the lowest-cost result. An empty grid yields an empty output.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster count is zero, or if the grid holds
    /// fewer distinct block colors than the requested cluster count.
    pub fn reduce(&self, mean_colors: &Array3<f64>) -> Result<Array2<Cell>> {
        let (rows, cols, _) = mean_colors.dim();
        if rows == 0 || cols == 0 {
            return Ok(Array2::from_elem((rows, cols), Cell::default()));
        }
        if self.clusters == 0 {
            return Err(invalid_parameter(
                "color_bins",
                &self.clusters,
                &"cluster count must be at least 1",
            ));
        }

        let points: Vec<[f64; 3]> = (0..rows * cols)
            .map(|index| {
                let (i, j) = (index / cols, index % cols);
                [
                    mean_colors[(i, j, 0)],
                    mean_colors[(i, j, 1)],
                    mean_colors[(i, j, 2)],
                ]
            })
            .collect();

        let distinct = distinct_points(&points);
        if distinct.len() < self.clusters {
            return Err(GlyphError::InsufficientSamples {
                requested: self.clusters,
                available: distinct.len(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<KMeansRun> = None;
        for _ in 0..KMEANS_RESTARTS {
            let centers = initial_centers(&distinct, self.clusters, &mut rng);
            let run = lloyd_iterations(&points, centers);
            if best.as_ref().is_none_or(|current| run.cost < current.cost) {
                best = Some(run);
            }
        }

        // A restart always exists: KMEANS_RESTARTS > 0 and clusters >= 1
        let run = best.ok_or_else(|| {
            invalid_parameter("restarts", &KMEANS_RESTARTS, &"no clustering run produced")
        })?;

        Ok(Array2::from_shape_fn((rows, cols), |(i, j)| {
            let assignment = run.assignments.get(i * cols + j).copied().unwrap_or(0);
            let center = run.centers.get(assignment).copied().unwrap_or([0.0; 3]);
            Cell {
                symbol: Symbol::Empty,
                color: to_rgb(center),
            }
        }))
    }
}

struct KMeansRun {
    centers: Vec<[f64; 3]>,
    assignments: Vec<usize>,
    cost: f64,
}

/// Deduplicate points by exact bit pattern, preserving first-seen order
fn distinct_points(points: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for &point in points {
        let key = point.map(f64::to_bits);
        if seen.insert(key) {
            distinct.push(point);
        }
    }
    distinct
}

/// Draw distinct initial centers for one restart
fn initial_centers(distinct: &[[f64; 3]], clusters: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    rand::seq::index::sample(rng, distinct.len(), clusters)
        .iter()
        .filter_map(|index| distinct.get(index).copied())
        .collect()
}

fn distance_squared(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter()
        .zip(&b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

fn nearest_center(point: [f64; 3], centers: &[[f64; 3]]) -> usize {
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;
    for (index, &center) in centers.iter().enumerate() {
        let distance = distance_squared(point, center);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}

/// One k-means restart: assign, recenter, repeat until converged
fn lloyd_iterations(points: &[[f64; 3]], mut centers: Vec<[f64; 3]>) -> KMeansRun {
    let mut assignments = vec![0usize; points.len()];

    for _ in 0..KMEANS_MAX_ITERATIONS {
        for (slot, &point) in assignments.iter_mut().zip(points) {
            *slot = nearest_center(point, &centers);
        }

        let mut sums = vec![[0.0f64; 3]; centers.len()];
        let mut counts = vec![0usize; centers.len()];
        for (&assignment, &point) in assignments.iter().zip(points) {
            if let Some(sum) = sums.get_mut(assignment) {
                for (slot, channel) in sum.iter_mut().zip(point) {
                    *slot += channel;
                }
            }
            if let Some(count) = counts.get_mut(assignment) {
                *count += 1;
            }
        }

        let mut largest_shift = 0.0f64;
        for (index, center) in centers.iter_mut().enumerate() {
            let count = counts.get(index).copied().unwrap_or(0);
            if count == 0 {
                // Empty cluster: leave the center where it is
                continue;
            }
            let sum = sums.get(index).copied().unwrap_or([0.0; 3]);
            let updated = sum.map(|channel| channel / count as f64);
            largest_shift = largest_shift.max(distance_squared(*center, updated).sqrt());
            *center = updated;
        }

        if largest_shift < KMEANS_EPSILON {
            break;
        }
    }

    for (slot, &point) in assignments.iter_mut().zip(points) {
        *slot = nearest_center(point, &centers);
    }
    let cost = assignments
        .iter()
        .zip(points)
        .map(|(&assignment, &point)| {
            let center = centers.get(assignment).copied().unwrap_or([0.0; 3]);
            distance_squared(point, center)
        })
        .sum();

    KMeansRun {
        centers,
        assignments,
        cost,
    }
}

/// Round a floating color to 8-bit channels
fn to_rgb(color: [f64; 3]) -> [u8; 3] {
    color.map(|channel| channel.round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_means(rows: usize, cols: usize, color: [f64; 3]) -> Array3<f64> {
        Array3::from_shape_fn((rows, cols, 3), |(_, _, c)| {
            color.get(c).copied().unwrap_or(0.0)
        })
    }

    #[test]
    fn test_averaging_is_exact_on_constant_blocks() {
        let means = solid_means(2, 3, [12.0, 34.0, 56.0]);
        let cells = average_colors(&means);
        assert_eq!(cells.dim(), (2, 3));
        assert!(cells.iter().all(|cell| cell.color == [12, 34, 56]));
        assert!(cells.iter().all(|cell| cell.symbol.is_empty()));
    }

    #[test]
    fn test_single_cluster_maps_every_block_to_global_mean() {
        let mut means = solid_means(1, 4, [0.0, 0.0, 0.0]);
        for j in 0..4 {
            means[(0, j, 0)] = (j * 40) as f64;
        }
        let clusterer = ColorClusterer::new(1, 7);
        let cells = clusterer
            .reduce(&means)
            .unwrap_or_else(|e| unreachable!("reduce: {e}"));
        // Global mean of 0, 40, 80, 120 is 60
        assert!(cells.iter().all(|cell| cell.color == [60, 0, 0]));
    }

    #[test]
    fn test_two_well_separated_clusters_recover_their_means() {
        let mut means = solid_means(1, 6, [0.0, 0.0, 0.0]);
        for j in 3..6 {
            for c in 0..3 {
                means[(0, j, c)] = 250.0;
            }
        }
        // Perturb one dark block so more than two distinct colors exist
        means[(0, 1, 0)] = 4.0;

        let clusterer = ColorClusterer::new(2, 42);
        let cells = clusterer
            .reduce(&means)
            .unwrap_or_else(|e| unreachable!("reduce: {e}"));

        let dark = cells[(0, 0)].color;
        let bright = cells[(0, 5)].color;
        assert!(dark[2] < 10, "dark cluster stays dark: {dark:?}");
        assert_eq!(bright, [250, 250, 250]);
        assert_eq!(cells[(0, 4)].color, bright);
    }

    #[test]
    fn test_same_seed_reproduces_identical_palettes() {
        let mut means = solid_means(3, 3, [0.0, 0.0, 0.0]);
        for ((i, j, c), value) in means.indexed_iter_mut() {
            *value = ((i * 83 + j * 29 + c * 7) % 256) as f64;
        }
        let first = ColorClusterer::new(3, 42).reduce(&means);
        let second = ColorClusterer::new(3, 42).reduce(&means);
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            _ => unreachable!("clustering failed"),
        }
    }

    #[test]
    fn test_fewer_distinct_colors_than_clusters_fails() {
        let means = solid_means(2, 2, [10.0, 10.0, 10.0]);
        let clusterer = ColorClusterer::new(3, 42);
        assert!(matches!(
            clusterer.reduce(&means),
            Err(GlyphError::InsufficientSamples {
                requested: 3,
                available: 1
            })
        ));
    }

    #[test]
    fn test_empty_grid_reduces_to_empty_output() {
        let means = Array3::zeros((0, 0, 3));
        let clusterer = ColorClusterer::new(4, 42);
        let cells = clusterer
            .reduce(&means)
            .unwrap_or_else(|e| unreachable!("reduce: {e}"));
        assert_eq!(cells.dim(), (0, 0));
    }
}
