//! DBSCAN model fitting and point-role derivation

use crate::data::PointSet;
use linfa::traits::Transformer;
use linfa_clustering::Dbscan;
use linfa_nn::distance::L2Dist;
use linfa_nn::CommonNearestNeighbour;
use ndarray::Array1;
use std::collections::VecDeque;

/// Sentinel label for points assigned to no cluster
pub const NOISE_LABEL: i64 = -1;

/// Role of a point in the fitted density structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRole {
    /// Satisfies the density criterion directly
    Core,
    /// In a cluster but not core
    Border,
    /// In no cluster
    Noise,
}

impl PointRole {
    /// Display name used in legends and statistics
    pub fn name(&self) -> &'static str {
        match self {
            PointRole::Core => "Core",
            PointRole::Border => "Border",
            PointRole::Noise => "Noise",
        }
    }
}

/// Fitted DBSCAN result over a point set
#[derive(Debug)]
pub struct DbscanModel {
    /// Cluster label per point, `NOISE_LABEL` for noise
    pub labels: Array1<i64>,
    /// Indices of points satisfying the density criterion
    pub core_sample_indices: Vec<usize>,
    /// Neighborhood radius used for the fit
    pub eps: f64,
    /// Minimum neighborhood size (self included) used for the fit
    pub min_samples: usize,
}

impl DbscanModel {
    /// Role per point, aligned with `labels`
    ///
    /// Every point gets exactly one role: core points come straight from the
    /// fitted core-sample set, noise points are those carrying the sentinel
    /// label, and the remaining clustered points are border points.
    pub fn point_roles(&self) -> Vec<PointRole> {
        let mut roles = vec![PointRole::Border; self.labels.len()];
        for &idx in &self.core_sample_indices {
            roles[idx] = PointRole::Core;
        }
        for (i, &label) in self.labels.iter().enumerate() {
            if label == NOISE_LABEL {
                roles[i] = PointRole::Noise;
            }
        }
        roles
    }

    /// Distinct labels present, ascending, noise sentinel first when present
    pub fn cluster_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.labels.iter().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Number of clusters found (noise excluded)
    pub fn n_clusters(&self) -> usize {
        self.cluster_ids()
            .iter()
            .filter(|&&id| id != NOISE_LABEL)
            .count()
    }

    /// Number of noise points
    pub fn n_noise(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE_LABEL).count()
    }

    /// Point count per label, keyed in `cluster_ids()` order
    pub fn cluster_sizes(&self) -> Vec<(i64, usize)> {
        self.cluster_ids()
            .into_iter()
            .map(|id| {
                let size = self.labels.iter().filter(|&&l| l == id).count();
                (id, size)
            })
            .collect()
    }
}

/// Fit DBSCAN over a 2D point set
///
/// # Arguments
/// * `points` - Validated 2D point set
/// * `eps` - Neighborhood radius (> 0)
/// * `min_samples` - Minimum neighbor count, self included (>= 1)
///
/// # Returns
/// * Fitted `DbscanModel` with per-point labels and core-sample indices
pub fn fit_dbscan(points: &PointSet, eps: f64, min_samples: usize) -> crate::Result<DbscanModel> {
    if !(eps > 0.0) || !eps.is_finite() {
        anyhow::bail!("eps must be a positive finite number, got {}", eps);
    }
    if min_samples == 0 {
        anyhow::bail!("min_samples must be at least 1");
    }
    if points.is_empty() {
        anyhow::bail!("Cannot fit DBSCAN on an empty point set");
    }

    // linfa rejects min_points of 1, but with min_samples = 1 every point
    // is core and clusters are exactly the eps-connected components, so
    // that case is labeled directly.
    let labels: Array1<i64> = if min_samples == 1 {
        connectivity_labels(points, eps)
    } else {
        // Delegate clustering to linfa. Labels come back as Option<usize>:
        // None marks noise, Some(k) cluster membership.
        let memberships =
            Dbscan::params_with(min_samples, L2Dist, CommonNearestNeighbour::KdTree)
                .tolerance(eps)
                .transform(points.coords())?;

        memberships.map(|m| m.map(|c| c as i64).unwrap_or(NOISE_LABEL))
    };

    let core_sample_indices = find_core_samples(points, eps, min_samples);

    Ok(DbscanModel {
        labels,
        core_sample_indices,
        eps,
        min_samples,
    })
}

/// Label points by eps-connectivity: each connected component of the
/// "within eps" graph becomes one cluster, expanded breadth-first
fn connectivity_labels(points: &PointSet, eps: f64) -> Array1<i64> {
    let coords = points.coords();
    let n = coords.nrows();
    let eps_sq = eps * eps;
    let mut labels = Array1::from_elem(n, NOISE_LABEL);
    let mut current_cluster = 0i64;

    for start in 0..n {
        if labels[start] != NOISE_LABEL {
            continue;
        }
        labels[start] = current_cluster;

        let mut queue = VecDeque::from([start]);
        while let Some(i) = queue.pop_front() {
            for j in 0..n {
                if labels[j] != NOISE_LABEL {
                    continue;
                }
                let dx = coords[[i, 0]] - coords[[j, 0]];
                let dy = coords[[i, 1]] - coords[[j, 1]];
                if dx * dx + dy * dy <= eps_sq {
                    labels[j] = current_cluster;
                    queue.push_back(j);
                }
            }
        }

        current_cluster += 1;
    }

    labels
}

/// Indices of points with at least `min_samples` neighbors (self included)
/// within `eps`, i.e. the DBSCAN core criterion
fn find_core_samples(points: &PointSet, eps: f64, min_samples: usize) -> Vec<usize> {
    let coords = points.coords();
    let n = coords.nrows();
    let eps_sq = eps * eps;
    let mut core = Vec::new();

    for i in 0..n {
        let mut neighbors = 0;
        for j in 0..n {
            let dx = coords[[i, 0]] - coords[[j, 0]];
            let dy = coords[[i, 1]] - coords[[j, 1]];
            if dx * dx + dy * dy <= eps_sq {
                neighbors += 1;
            }
        }
        if neighbors >= min_samples {
            core.push(i);
        }
    }

    core
}
