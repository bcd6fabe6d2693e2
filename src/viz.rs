//! Scatter-plot visualization of DBSCAN results using Plotters

use crate::data::PointSet;
use crate::model::{fit_dbscan, DbscanModel, PointRole, NOISE_LABEL};
use plotters::prelude::*;
use std::collections::HashMap;

/// Qualitative palette for cluster colors (Google G10)
const CLUSTER_COLORS: [RGBColor; 10] = [
    RGBColor(0x33, 0x66, 0xCC),
    RGBColor(0xDC, 0x39, 0x12),
    RGBColor(0xFF, 0x99, 0x00),
    RGBColor(0x10, 0x96, 0x18),
    RGBColor(0x99, 0x00, 0x99),
    RGBColor(0x00, 0x99, 0xC6),
    RGBColor(0xDD, 0x44, 0x77),
    RGBColor(0x66, 0xAA, 0x00),
    RGBColor(0xB8, 0x2E, 0x2E),
    RGBColor(0x31, 0x63, 0x95),
];

/// Neutral color reserved for noise points
pub const NOISE_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Fixed square canvas so equal data spans render with equal aspect
const CANVAS_SIZE: (u32, u32) = (600, 600);
const MARKER_SIZE: i32 = 4;

/// Build the label-to-color mapping for a set of cluster labels
///
/// The noise sentinel always maps to grey. Remaining labels are assigned
/// palette colors in ascending label order; with more than ten clusters the
/// palette cycles, so distant labels may share a color.
pub fn color_map(labels: &[i64]) -> HashMap<i64, RGBColor> {
    let mut unique: Vec<i64> = labels.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let mut map = HashMap::new();
    let mut next_color = 0;
    for label in unique {
        if label == NOISE_LABEL {
            map.insert(label, NOISE_COLOR);
        } else {
            map.insert(label, CLUSTER_COLORS[next_color % CLUSTER_COLORS.len()]);
            next_color += 1;
        }
    }
    map
}

/// Legend text for a cluster label
fn label_name(label: i64) -> String {
    if label == NOISE_LABEL {
        "Noise".to_string()
    } else {
        format!("Cluster {}", label)
    }
}

/// Equal-aspect plot ranges: both axes get the larger data span, padded
fn square_ranges(points: &PointSet) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let xs = points.xs();
    let ys = points.ys();
    let x_min = xs.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let x_max = xs.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let y_min = ys.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let y_max = ys.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    let span = (x_max - x_min).max(y_max - y_min);
    let half = (span / 2.0 + span * 0.05).max(0.5);
    let x_center = (x_min + x_max) / 2.0;
    let y_center = (y_min + y_max) / 2.0;

    (
        (x_center - half)..(x_center + half),
        (y_center - half)..(y_center + half),
    )
}

/// Fitted DBSCAN model bundled with its input points and rendering operations
///
/// Fitting happens once at construction; both plots read the same cached
/// labels and core-sample set, so their cluster colors always agree.
#[derive(Debug)]
pub struct DbscanVisualizer {
    points: PointSet,
    model: DbscanModel,
}

impl DbscanVisualizer {
    /// Fit DBSCAN over the points with the given parameters
    pub fn fit(points: PointSet, eps: f64, min_samples: usize) -> crate::Result<Self> {
        let model = fit_dbscan(&points, eps, min_samples)?;
        Ok(Self { points, model })
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn model(&self) -> &DbscanModel {
        &self.model
    }

    /// Render a scatter plot colored by cluster assignment
    ///
    /// # Arguments
    /// * `output_path` - Path to save the PNG plot
    pub fn plot_clusters(&self, output_path: &str) -> crate::Result<()> {
        let colors = color_map(self.model.labels.as_slice().unwrap_or(&[]));
        let (x_range, y_range) = square_ranges(&self.points);

        let root = BitMapBackend::new(output_path, CANVAS_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Data - DBSCAN Algorithm", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("x")
            .y_desc("y")
            .axis_desc_style(("sans-serif", 15))
            .draw()?;

        let xs = self.points.xs();
        let ys = self.points.ys();

        // One series per label so each cluster gets a legend entry
        for label in self.model.cluster_ids() {
            let color = colors[&label];
            let cluster_points: Vec<(f64, f64)> = self
                .model
                .labels
                .iter()
                .enumerate()
                .filter(|(_, &l)| l == label)
                .map(|(i, _)| (xs[i], ys[i]))
                .collect();

            chart
                .draw_series(
                    cluster_points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled())),
                )?
                .label(label_name(label))
                .legend(move |(x, y)| Circle::new((x + 5, y), MARKER_SIZE, color.filled()));
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;

        root.present()?;

        Ok(())
    }

    /// Render a scatter plot colored by cluster with point role as symbol
    ///
    /// Core points draw as filled circles, border points as open circles and
    /// noise points as open circles with a center dot.
    ///
    /// # Arguments
    /// * `output_path` - Path to save the PNG plot
    pub fn plot_point_types(&self, output_path: &str) -> crate::Result<()> {
        let colors = color_map(self.model.labels.as_slice().unwrap_or(&[]));
        let roles = self.model.point_roles();
        let (x_range, y_range) = square_ranges(&self.points);

        let root = BitMapBackend::new(output_path, CANVAS_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Data - DBSCAN Algorithm", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("x")
            .y_desc("y")
            .axis_desc_style(("sans-serif", 15))
            .draw()?;

        let xs = self.points.xs();
        let ys = self.points.ys();

        // One series per role so the legend reads "Point Type"; colors
        // within a series still follow the cluster color map
        for role in [PointRole::Core, PointRole::Border, PointRole::Noise] {
            let role_points: Vec<(f64, f64, RGBColor)> = roles
                .iter()
                .enumerate()
                .filter(|(_, r)| **r == role)
                .map(|(i, _)| (xs[i], ys[i], colors[&self.model.labels[i]]))
                .collect();

            if role_points.is_empty() {
                continue;
            }

            chart
                .draw_series(role_points.iter().map(|&(x, y, color)| {
                    let style = match role {
                        PointRole::Core => color.filled(),
                        PointRole::Border | PointRole::Noise => color.stroke_width(2),
                    };
                    Circle::new((x, y), MARKER_SIZE, style)
                }))?
                .label(role.name())
                .legend(move |(x, y)| {
                    let style = match role {
                        PointRole::Core => BLACK.filled(),
                        PointRole::Border | PointRole::Noise => BLACK.stroke_width(2),
                    };
                    Circle::new((x + 5, y), MARKER_SIZE, style)
                });

            // Center dot distinguishing noise from border
            if role == PointRole::Noise {
                chart.draw_series(
                    role_points
                        .iter()
                        .map(|&(x, y, color)| Circle::new((x, y), 1, color.filled())),
                )?;
            }
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;

        root.present()?;

        Ok(())
    }
}
