//! Integration tests for Densiplot

use densiplot::{
    fit_dbscan, generate_blobs, load_points, DbscanVisualizer, PointRole, PointSet, NOISE_LABEL,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

/// Create a test CSV file with two tight groups and one stray point
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "x,y").unwrap();

    // Group near (1, 1)
    writeln!(file, "1.0,1.0").unwrap();
    writeln!(file, "1.1,1.0").unwrap();
    writeln!(file, "1.0,1.1").unwrap();
    writeln!(file, "1.1,1.1").unwrap();

    // Group near (8, 8)
    writeln!(file, "8.0,8.0").unwrap();
    writeln!(file, "8.1,8.0").unwrap();
    writeln!(file, "8.0,8.1").unwrap();
    writeln!(file, "8.1,8.1").unwrap();

    // Stray point
    writeln!(file, "20.0,1.0").unwrap();

    file
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();
    let file_path = test_file.path().to_str().unwrap();

    let points = load_points(file_path).unwrap();
    assert_eq!(points.len(), 9);

    let viz = DbscanVisualizer::fit(points, 0.5, 3).unwrap();
    let model = viz.model();

    assert_eq!(model.n_clusters(), 2);
    assert_eq!(model.n_noise(), 1);

    // Render both plots
    let temp_dir = tempdir().unwrap();
    let cluster_plot = temp_dir.path().join("clusters.png");
    let types_plot = temp_dir.path().join("types.png");

    viz.plot_clusters(cluster_plot.to_str().unwrap()).unwrap();
    viz.plot_point_types(types_plot.to_str().unwrap()).unwrap();

    assert!(Path::new(&cluster_plot).exists());
    assert!(Path::new(&types_plot).exists());
}

#[test]
fn test_two_separated_blobs() {
    // Two well-separated Gaussian blobs of 50 points each
    let mut rng = StdRng::seed_from_u64(7);
    let points = generate_blobs(&[(0.0, 0.0), (10.0, 10.0)], 50, 0.1, &mut rng).unwrap();

    let model = fit_dbscan(&points, 0.5, 5).unwrap();

    assert_eq!(model.n_clusters(), 2);
    // Tight blobs leave essentially no stragglers
    assert!(model.n_noise() <= 2);
}

#[test]
fn test_scattered_points_all_noise() {
    // Uniformly scattered points with an eps far too small to connect any
    let mut rng = StdRng::seed_from_u64(3);
    let pairs: Vec<(f64, f64)> = (0..40)
        .map(|_| (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect();
    let points = PointSet::from_pairs(&pairs).unwrap();

    let model = fit_dbscan(&points, 0.01, 5).unwrap();

    assert_eq!(model.n_clusters(), 0);
    assert_eq!(model.n_noise(), points.len());
    assert!(model
        .point_roles()
        .iter()
        .all(|r| *r == PointRole::Noise));
}

#[test]
fn test_repeated_point_all_core() {
    // One coordinate repeated often enough to satisfy the density criterion
    let points = PointSet::from_pairs(&[(3.0, -2.0); 10]).unwrap();
    let model = fit_dbscan(&points, 0.5, 5).unwrap();

    assert_eq!(model.n_clusters(), 1);
    assert_eq!(model.n_noise(), 0);
    assert_eq!(model.core_sample_indices.len(), 10);
    assert!(model.point_roles().iter().all(|r| *r == PointRole::Core));
}

#[test]
fn test_every_cluster_contains_a_core_point() {
    let mut rng = StdRng::seed_from_u64(11);
    let points = generate_blobs(&[(0.0, 0.0), (6.0, 0.0), (3.0, 5.0)], 40, 0.2, &mut rng).unwrap();

    let model = fit_dbscan(&points, 0.5, 5).unwrap();
    let roles = model.point_roles();

    for cluster_id in model.cluster_ids() {
        if cluster_id == NOISE_LABEL {
            continue;
        }
        let has_core = model
            .labels
            .iter()
            .enumerate()
            .any(|(i, &l)| l == cluster_id && roles[i] == PointRole::Core);
        assert!(has_core, "cluster {} has no core point", cluster_id);
    }
}

#[test]
fn test_role_partition_is_exhaustive_and_exclusive() {
    let test_file = create_test_csv();
    let points = load_points(test_file.path().to_str().unwrap()).unwrap();
    let model = fit_dbscan(&points, 0.5, 3).unwrap();
    let roles = model.point_roles();

    assert_eq!(roles.len(), points.len());

    let core = roles.iter().filter(|r| **r == PointRole::Core).count();
    let border = roles.iter().filter(|r| **r == PointRole::Border).count();
    let noise = roles.iter().filter(|r| **r == PointRole::Noise).count();
    assert_eq!(core + border + noise, points.len());

    // Noise roles coincide with the sentinel label
    for (i, role) in roles.iter().enumerate() {
        assert_eq!(*role == PointRole::Noise, model.labels[i] == NOISE_LABEL);
    }

    // Core roles coincide with the core-sample index set
    for (i, role) in roles.iter().enumerate() {
        assert_eq!(
            *role == PointRole::Core,
            model.core_sample_indices.contains(&i)
        );
    }
}

#[test]
fn test_error_handling_invalid_parameters() {
    let points = PointSet::from_pairs(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();

    assert!(fit_dbscan(&points, 0.0, 5).is_err());
    assert!(fit_dbscan(&points, -0.5, 5).is_err());
    assert!(fit_dbscan(&points, 0.5, 0).is_err());
}

#[test]
fn test_error_handling_missing_input() {
    let result = load_points("/nonexistent/points.csv");
    assert!(result.is_err());
}
