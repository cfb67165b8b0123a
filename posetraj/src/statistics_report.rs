use std::{fmt, io};

use posevis_core::{Camera, PointCoordinates, Real};
use posevis_sensor::PinholeCamera;

use crate::trajectory_stats::TrajectoryStats;

const BANNER_WIDTH: usize = 60;
const GEOMETRY_PRECISION: usize = 3;
const INTRINSICS_PRECISION: usize = 2;

/// Renders an optional value at fixed precision, or `N/A` when it is absent.
pub fn format_optional(value: Option<Real>, precision: usize) -> String {
    match value {
        Some(value) => format!("{value:.precision$}"),
        None => String::from("N/A"),
    }
}

/// Text block summarising a capture: camera metadata followed by trajectory
/// statistics.
pub struct StatisticsReport<'a> {
    pub stats: &'a TrajectoryStats,
    pub camera: &'a PinholeCamera,
}

impl fmt::Display for StatisticsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(BANNER_WIDTH);
        let stats = self.stats;
        let camera = self.camera;
        let p = GEOMETRY_PRECISION;
        let ip = INTRINSICS_PRECISION;

        writeln!(f)?;
        writeln!(f, "{banner}")?;
        writeln!(f, "CAMERA POSE STATISTICS")?;
        writeln!(f, "{banner}")?;
        writeln!(f, "Number of frames: {}", stats.frame_count)?;

        writeln!(f)?;
        let side = |value: Option<usize>| {
            value.map_or_else(|| "Unknown".to_owned(), |v| v.to_string())
        };
        match (camera.cols(), camera.rows()) {
            (None, None) => writeln!(f, "Image dimensions: Unknown")?,
            (width, height) => writeln!(f, "Image dimensions: {} x {}", side(width), side(height))?,
        }
        writeln!(
            f,
            "Camera model: {}",
            camera.camera_model.as_deref().unwrap_or("Unknown")
        )?;

        writeln!(f)?;
        writeln!(
            f,
            "Focal length: fl_x={}, fl_y={}",
            format_optional(camera.fl_x, ip),
            format_optional(camera.fl_y, ip)
        )?;
        writeln!(
            f,
            "Principal point: cx={}, cy={}",
            format_optional(camera.cx, ip),
            format_optional(camera.cy, ip)
        )?;

        writeln!(f)?;
        writeln!(f, "--- Position Statistics ---")?;
        for (name, range) in ["X", "Y", "Z"].iter().zip(stats.ranges.iter()) {
            writeln!(f, "{name} range: [{:.p$}, {:.p$}]", range.min, range.max)?;
        }

        let center = stats.centroid;
        writeln!(f)?;
        writeln!(
            f,
            "Scene center: [{:.p$}, {:.p$}, {:.p$}]",
            center.x, center.y, center.z
        )?;
        writeln!(
            f,
            "Average distance from center: {:.p$}",
            stats.mean_centroid_distance
        )?;
        writeln!(
            f,
            "Max distance from center: {:.p$}",
            stats.max_centroid_distance
        )?;

        if let Some(length) = stats.trajectory_length {
            writeln!(f)?;
            writeln!(f, "Total trajectory length: {length:.p$}")?;
        }

        writeln!(f, "{banner}")?;
        writeln!(f)
    }
}

/// Writes the statistics block for `positions`. Nothing is written for an
/// empty trajectory.
pub fn print_camera_statistics<W: io::Write>(
    out: &mut W,
    positions: &[PointCoordinates],
    camera: &PinholeCamera,
) -> io::Result<Option<TrajectoryStats>> {
    let Some(stats) = TrajectoryStats::compute(positions) else {
        log::warn!("no camera positions, skipping statistics");
        return Ok(None);
    };
    write!(out, "{}", StatisticsReport { stats: &stats, camera })?;
    Ok(Some(stats))
}
