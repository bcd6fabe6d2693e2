//! Point-set loading and synthetic data generation using Polars

use ndarray::{Array2, Axis};
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use polars::prelude::*;
use rand::Rng;

/// Immutable 2D point set, one row per point
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Array2<f64>,
}

impl PointSet {
    /// Wrap an N×2 coordinate matrix, rejecting degenerate input
    pub fn new(points: Array2<f64>) -> crate::Result<Self> {
        if points.nrows() == 0 {
            anyhow::bail!("Point set must contain at least one point");
        }
        if points.ncols() != 2 {
            anyhow::bail!(
                "Points must have exactly 2 dimensions, got {}",
                points.ncols()
            );
        }
        Ok(Self { points })
    }

    /// Build a point set from (x, y) pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> crate::Result<Self> {
        let mut data = Vec::with_capacity(pairs.len() * 2);
        for &(x, y) in pairs {
            data.extend_from_slice(&[x, y]);
        }
        let points = Array2::from_shape_vec((pairs.len(), 2), data)?;
        Self::new(points)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Coordinate matrix (N×2)
    pub fn coords(&self) -> &Array2<f64> {
        &self.points
    }

    /// X coordinates as a vector
    pub fn xs(&self) -> Vec<f64> {
        self.points.column(0).to_vec()
    }

    /// Y coordinates as a vector
    pub fn ys(&self) -> Vec<f64> {
        self.points.column(1).to_vec()
    }
}

/// Load a 2D point set from a CSV file with `x` and `y` columns
///
/// # Arguments
/// * `file_path` - Path to the CSV file
///
/// # Returns
/// * Validated `PointSet`
pub fn load_points(file_path: &str) -> crate::Result<PointSet> {
    let df = CsvReader::from_path(file_path)?.has_header(true).finish()?;

    if df.height() == 0 {
        anyhow::bail!("No points found in {}", file_path);
    }

    let xs: Vec<f64> = df
        .column("x")?
        .cast(&DataType::Float64)?
        .f64()?
        .into_no_null_iter()
        .collect();

    let ys: Vec<f64> = df
        .column("y")?
        .cast(&DataType::Float64)?
        .f64()?
        .into_no_null_iter()
        .collect();

    if xs.len() != df.height() || ys.len() != df.height() {
        anyhow::bail!("CSV contains null coordinates");
    }

    let n_samples = xs.len();
    let mut data = Vec::with_capacity(n_samples * 2);
    for i in 0..n_samples {
        data.extend_from_slice(&[xs[i], ys[i]]);
    }

    PointSet::new(Array2::from_shape_vec((n_samples, 2), data)?)
}

/// Generate Gaussian blobs around the given centers
///
/// # Arguments
/// * `centers` - Blob centers as (x, y) pairs
/// * `points_per_blob` - Number of points sampled around each center
/// * `std_dev` - Standard deviation of each blob
/// * `rng` - Random source (seed it for reproducible output)
pub fn generate_blobs<R: Rng>(
    centers: &[(f64, f64)],
    points_per_blob: usize,
    std_dev: f64,
    rng: &mut R,
) -> crate::Result<PointSet> {
    if centers.is_empty() || points_per_blob == 0 {
        anyhow::bail!("Blob generation needs at least one center and one point per blob");
    }
    if std_dev < 0.0 {
        anyhow::bail!("Blob standard deviation must be non-negative, got {}", std_dev);
    }

    let mut blobs = Vec::with_capacity(centers.len());
    for &(cx, cy) in centers {
        let noise = Array2::random_using(
            (points_per_blob, 2),
            Normal::new(0.0, std_dev.max(f64::EPSILON))?,
            rng,
        );
        let mut blob = noise;
        for mut row in blob.rows_mut() {
            row[0] += cx;
            row[1] += cy;
        }
        blobs.push(blob);
    }

    let views: Vec<_> = blobs.iter().map(|b| b.view()).collect();
    let points = ndarray::concatenate(Axis(0), &views)?;
    PointSet::new(points)
}
