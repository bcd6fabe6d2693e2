//! Densiplot: DBSCAN clustering CLI for 2D point data
//!
//! This is the main entrypoint that orchestrates data loading, model
//! fitting and visualization.

use anyhow::Result;
use clap::Parser;
use densiplot::model::{PointRole, NOISE_LABEL};
use densiplot::{generate_blobs, load_points, Args, DbscanVisualizer, PointSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    args.validate()?;

    if args.verbose {
        println!("Densiplot - DBSCAN Clustering and Visualization");
        println!("===============================================\n");
    }

    run_pipeline(&args)
}

/// Run the full clustering and plotting pipeline
fn run_pipeline(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Load or generate points
    if args.verbose {
        println!("Step 1: Loading point data");
    }

    let data_start = Instant::now();
    let points = load_input(args)?;
    let data_time = data_start.elapsed();

    println!("✓ Data loaded: {} points", points.len());
    if args.verbose {
        println!("  Loading time: {:.2}s", data_time.as_secs_f64());
    }

    // Step 2: Fit DBSCAN
    if args.verbose {
        println!("\nStep 2: Fitting DBSCAN model");
        println!("  eps: {}", args.eps);
        println!("  min_samples: {}", args.min_samples);
    }

    let fit_start = Instant::now();
    let viz = DbscanVisualizer::fit(points, args.eps, args.min_samples)?;
    let fit_time = fit_start.elapsed();

    println!("✓ Model fitted successfully");
    if args.verbose {
        println!("  Fitting time: {:.2}s", fit_time.as_secs_f64());
    }

    // Step 3: Print cluster statistics
    print_statistics(&viz);

    // Step 4: Render both plots
    if args.verbose {
        println!("\nStep 3: Generating visualizations");
    }

    let viz_start = Instant::now();
    viz.plot_clusters(&args.output)?;
    viz.plot_point_types(&args.point_types_output())?;
    let viz_time = viz_start.elapsed();

    println!("\n✓ Visualizations generated");
    if args.verbose {
        println!("  Rendering time: {:.2}s", viz_time.as_secs_f64());
    }

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());
    println!("Cluster plot saved to: {}", args.output);
    println!("Point-type plot saved to: {}", args.point_types_output());

    Ok(())
}

/// Read points from the input CSV, or synthesize blobs in demo mode
fn load_input(args: &Args) -> Result<PointSet> {
    if args.demo {
        if args.verbose {
            println!("  Demo mode: generating 3 Gaussian blobs (seed {})", args.seed);
        }
        let mut rng = StdRng::seed_from_u64(args.seed);
        generate_blobs(&[(0.0, 0.0), (4.0, 4.0), (0.0, 5.0)], 50, 0.3, &mut rng)
    } else {
        if args.verbose {
            println!("  Input file: {}", args.input);
        }
        load_points(&args.input)
    }
}

/// Print cluster and point-role statistics to the console
fn print_statistics(viz: &DbscanVisualizer) {
    let model = viz.model();
    let total = viz.points().len();

    println!("\n=== Cluster Statistics ===");
    println!("Clusters found: {}", model.n_clusters());
    println!("Noise points: {}", model.n_noise());

    println!("\nCluster sizes:");
    for (label, size) in model.cluster_sizes() {
        let percentage = (size as f64 / total as f64) * 100.0;
        if label == NOISE_LABEL {
            println!("  Noise: {} points ({:.1}%)", size, percentage);
        } else {
            println!("  Cluster {}: {} points ({:.1}%)", label, size, percentage);
        }
    }

    let roles = model.point_roles();
    let core = roles.iter().filter(|r| **r == PointRole::Core).count();
    let border = roles.iter().filter(|r| **r == PointRole::Border).count();
    let noise = roles.iter().filter(|r| **r == PointRole::Noise).count();

    println!("\nPoint roles:");
    println!("  Core: {} | Border: {} | Noise: {}", core, border, noise);
}
