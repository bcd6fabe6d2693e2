//! Command-line interface definitions and argument parsing

use clap::Parser;
use std::path::Path;

/// DBSCAN clustering and visualization of 2D point data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file with `x` and `y` columns
    #[arg(short, long, default_value = "points.csv")]
    pub input: String,

    /// Neighborhood radius for DBSCAN
    #[arg(short, long, default_value = "0.5")]
    pub eps: f64,

    /// Minimum neighborhood size (including the point itself)
    #[arg(short, long, default_value = "5")]
    pub min_samples: usize,

    /// Output path for the cluster plot; the point-type plot lands next to
    /// it with a `_types` suffix
    #[arg(short, long, default_value = "dbscan_plot.png")]
    pub output: String,

    /// Generate synthetic Gaussian blobs instead of reading a CSV
    #[arg(long)]
    pub demo: bool,

    /// Random seed for demo data generation
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Output path for the point-type plot: the cluster plot's file stem
    /// with a `_types` suffix, keeping directory and extension
    pub fn point_types_output(&self) -> String {
        let path = Path::new(&self.output);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dbscan_plot");
        let file_name = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}_types.{}", stem, ext),
            None => format!("{}_types", stem),
        };
        path.with_file_name(file_name)
            .to_string_lossy()
            .into_owned()
    }

    /// Check parameter ranges before running the pipeline
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.eps > 0.0) || !self.eps.is_finite() {
            anyhow::bail!("--eps must be a positive finite number, got {}", self.eps);
        }
        if self.min_samples == 0 {
            anyhow::bail!("--min-samples must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args() -> Args {
        Args {
            input: "points.csv".to_string(),
            eps: 0.5,
            min_samples: 5,
            output: "dbscan_plot.png".to_string(),
            demo: false,
            seed: 42,
            verbose: false,
        }
    }

    #[test]
    fn test_point_types_output() {
        let args = test_args();
        assert_eq!(args.point_types_output(), "dbscan_plot_types.png");
    }

    #[test]
    fn test_point_types_output_without_extension() {
        let mut args = test_args();
        args.output = "plots/result".to_string();

        // The two plots must never collide on the same path
        let derived = args.point_types_output();
        assert_eq!(derived, "plots/result_types");
        assert_ne!(derived, args.output);
    }

    #[test]
    fn test_point_types_output_ignores_png_in_directory() {
        let mut args = test_args();
        args.output = "out.png.d/plot.svg".to_string();
        assert_eq!(args.point_types_output(), "out.png.d/plot_types.svg");
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(test_args().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_eps() {
        let mut args = test_args();
        args.eps = 0.0;
        assert!(args.validate().is_err());

        args.eps = -1.0;
        assert!(args.validate().is_err());

        args.eps = f64::NAN;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_min_samples() {
        let mut args = test_args();
        args.min_samples = 0;
        assert!(args.validate().is_err());
    }
}
