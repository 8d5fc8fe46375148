use super::zeros::zeros;
use crate::error::{InfluenceError, InfluenceResult};
use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Largest register the grid is laid out for.
const MAX_GRID_QUBITS: usize = 20;

/// Parameters of the influence map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceConfig {
    /// Gaussian falloff width.
    pub sigma: f64,
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
    /// How many zeros of the table contribute.
    pub zeros: usize,
    /// Normalized weight a cell needs to be marked.
    pub threshold: f64,
}

impl Default for InfluenceConfig {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            re_min: 0.0,
            re_max: 1.0,
            im_min: 0.0,
            im_max: 50.0,
            zeros: 10,
            threshold: 0.5,
        }
    }
}

impl InfluenceConfig {
    fn validate(&self) -> InfluenceResult<()> {
        if !(self.sigma > 0.0) {
            return Err(InfluenceError::InvalidConfig(format!(
                "sigma must be positive, got {}",
                self.sigma
            )));
        }
        if !self.threshold.is_finite() {
            return Err(InfluenceError::InvalidConfig(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        if !(self.re_max > self.re_min) || !(self.im_max > self.im_min) {
            return Err(InfluenceError::InvalidConfig(
                "empty coordinate range".to_string(),
            ));
        }
        Ok(())
    }
}

fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    lo + t * (hi - lo)
}

/// Gaussian influence of the Riemann zeros over a grid of `2^n` cells.
///
/// The grid has `2^floor(n/2)` rows spanning the imaginary range and
/// `2^ceil(n/2)` columns spanning the real range. Cell `(r, c)` is the basis
/// state `r * cols + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceMap {
    weights: DMatrix<f64>,
}

impl InfluenceMap {
    pub fn generate(num_qubits: usize, config: &InfluenceConfig) -> InfluenceResult<Self> {
        if num_qubits < 1 || num_qubits > MAX_GRID_QUBITS {
            return Err(InfluenceError::InvalidRegisterSize(num_qubits));
        }
        config.validate()?;

        let rows = 1usize << (num_qubits / 2);
        let cols = 1usize << (num_qubits - num_qubits / 2);
        let sources = zeros(config.zeros);
        let two_sigma_sq = 2.0 * config.sigma * config.sigma;

        let weights = DMatrix::from_fn(rows, cols, |r, c| {
            let re = lerp(config.re_min, config.re_max, (c as f64 + 0.5) / cols as f64);
            let im = lerp(config.im_min, config.im_max, (r as f64 + 0.5) / rows as f64);
            let z = Complex64::new(re, im);
            sources
                .iter()
                .map(|rho| (-(z - rho).norm_sqr() / two_sigma_sq).exp())
                .sum::<f64>()
        });

        Ok(Self { weights })
    }

    /// Generates the map and marks the cells at `config.threshold`.
    pub fn marked_states(
        num_qubits: usize,
        config: &InfluenceConfig,
    ) -> InfluenceResult<BTreeSet<u64>> {
        Ok(Self::generate(num_qubits, config)?.marked(config.threshold))
    }

    pub fn rows(&self) -> usize {
        self.weights.nrows()
    }

    pub fn cols(&self) -> usize {
        self.weights.ncols()
    }

    /// Raw weight of basis state `index`, if it lies on the grid.
    pub fn weight(&self, index: u64) -> Option<f64> {
        let index = usize::try_from(index).ok()?;
        let (r, c) = (index / self.cols(), index % self.cols());
        self.weights.get((r, c)).copied()
    }

    pub fn max_weight(&self) -> f64 {
        self.weights.max()
    }

    fn cells(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |r| {
            (0..cols).map(move |c| ((r * cols + c) as u64, self.weights[(r, c)]))
        })
    }

    /// States whose weight relative to the heaviest cell is at least
    /// `threshold`.
    pub fn marked(&self, threshold: f64) -> BTreeSet<u64> {
        let max = self.max_weight();
        if max <= 0.0 {
            return BTreeSet::new();
        }
        self.cells()
            .filter(|&(_, w)| w / max >= threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// The `k` heaviest states, heaviest first; ties go to the lower index.
    pub fn top(&self, k: usize) -> Vec<u64> {
        let mut cells: Vec<(u64, f64)> = self.cells().collect();
        cells.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        cells.into_iter().take(k).map(|(i, _)| i).collect()
    }
}
