use std::path::PathBuf;

use posevis_core::pose::{positions, CameraPose};
use rerun::RecordingStream;

use crate::{
    error::{PlotError, Result},
    raster_renderer::PoseRenderer,
};

fn viewer_error(err: impl std::fmt::Display) -> PlotError {
    PlotError::Viewer(err.to_string())
}

fn to_f32(v: &posevis_core::PointCoordinates) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

/// Streams the trajectory to a rerun recording, usually a spawned viewer.
pub struct RerunViewer {
    rec: RecordingStream,
    arrow_scale: f64,
}

impl RerunViewer {
    pub fn new(rec: RecordingStream, arrow_scale: f64) -> Self {
        Self { rec, arrow_scale }
    }

    pub fn spawn(app_id: &str, arrow_scale: f64) -> Result<Self> {
        let rec = rerun::RecordingStreamBuilder::new(app_id)
            .spawn()
            .map_err(viewer_error)?;
        Ok(Self::new(rec, arrow_scale))
    }

    fn forward_vectors(&self, poses: &[CameraPose]) -> Vec<[f32; 3]> {
        poses
            .iter()
            .map(|pose| to_f32(&(pose.forward * self.arrow_scale)))
            .collect()
    }

    fn log_scene(&self, poses: &[CameraPose]) -> Result<()> {
        let points: Vec<[f32; 3]> = positions(poses).iter().map(to_f32).collect();
        let labels: Vec<String> = (0..poses.len()).map(|i| i.to_string()).collect();
        let vectors = self.forward_vectors(poses);

        self.rec
            .log_static(
                "world/cameras",
                &rerun::Points3D::new(points.clone())
                    .with_colors([[255u8, 0, 0]])
                    .with_labels(labels),
            )
            .map_err(viewer_error)?;
        self.rec
            .log_static(
                "world/forward",
                &rerun::Arrows3D::from_vectors(vectors)
                    .with_origins(points.clone())
                    .with_colors([[77u8, 77, 255]]),
            )
            .map_err(viewer_error)?;
        self.rec
            .log_static(
                "world/trajectory",
                &rerun::LineStrips3D::new([points]).with_colors([[128u8, 192, 128]]),
            )
            .map_err(viewer_error)?;
        Ok(())
    }

    fn log_series(&self, poses: &[CameraPose]) -> Result<()> {
        for (index, pose) in poses.iter().enumerate() {
            self.rec.set_time_sequence("frame", index as i64);
            self.rec
                .log("plots/height", &rerun::Scalar::new(pose.position.z))
                .map_err(viewer_error)?;
            self.rec
                .log(
                    "plots/distance_from_origin",
                    &rerun::Scalar::new(pose.position.norm()),
                )
                .map_err(viewer_error)?;
        }
        Ok(())
    }
}

impl PoseRenderer for RerunViewer {
    fn name(&self) -> &str {
        "rerun"
    }

    fn render(&mut self, poses: &[CameraPose]) -> Result<Vec<PathBuf>> {
        if poses.is_empty() {
            return Err(PlotError::EmptyTrajectory);
        }
        self.log_scene(poses)?;
        self.log_series(poses)?;
        log::info!("streamed {} camera poses to the viewer", poses.len());
        Ok(Vec::new())
    }
}
