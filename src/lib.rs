//! Densiplot: DBSCAN clustering with scatter-plot visualization
//!
//! This library fits a DBSCAN model over a 2D point set and renders two
//! scatter plots of the result: one colored by cluster assignment, one
//! additionally encoding each point's role (core/border/noise) as a
//! marker symbol.

pub mod cli;
pub mod data;
pub mod model;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{generate_blobs, load_points, PointSet};
pub use model::{fit_dbscan, DbscanModel, PointRole, NOISE_LABEL};
pub use viz::DbscanVisualizer;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
