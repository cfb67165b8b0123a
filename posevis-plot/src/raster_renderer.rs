use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbImage};
use posevis_core::pose::CameraPose;

use crate::{
    error::{PlotError, Result},
    figure_cfg::FigureStyle,
    figures::{render_overview, render_side_views},
};

pub const OVERVIEW_FILE_STEM: &str = "camera_poses_3d";
pub const SIDE_VIEWS_FILE_STEM: &str = "camera_poses_side_views";

/// Something that presents a camera trajectory.
pub trait PoseRenderer {
    fn name(&self) -> &str;

    /// Presents `poses`, returning the files written, if any.
    fn render(&mut self, poses: &[CameraPose]) -> Result<Vec<PathBuf>>;
}

/// Writes the overview and side-view figures as image files.
///
/// Both figures land or neither does: they are encoded next to their final
/// names and only moved into place once every encode succeeded.
pub struct RasterRenderer {
    style: FigureStyle,
    format: ImageFormat,
    extension: String,
    output_dir: PathBuf,
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    if let Some(file_name) = path.file_name() {
        name.push(file_name);
    }
    name.push(".partial");
    path.with_file_name(name)
}

fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = fs::remove_file(path) {
            log::warn!("could not remove {}: {err}", path.display());
        }
    }
}

impl RasterRenderer {
    pub(crate) fn new(
        style: FigureStyle,
        format: ImageFormat,
        extension: String,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            style,
            format,
            extension,
            output_dir,
        }
    }

    /// Overview path, then side-views path.
    pub fn figure_paths(&self) -> [PathBuf; 2] {
        [OVERVIEW_FILE_STEM, SIDE_VIEWS_FILE_STEM]
            .map(|stem| self.output_dir.join(format!("{stem}.{}", self.extension)))
    }

    fn save(&self, image: &RgbImage, path: &Path) -> Result<()> {
        image.save_with_format(path, self.format)?;
        log::debug!(
            "encoded {}x{} figure to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(())
    }

    /// Encodes every figure to its staging path, removing the staged files
    /// again if one of them fails.
    fn stage(&self, figures: &[(RgbImage, PathBuf)]) -> Result<Vec<PathBuf>> {
        let mut staged = Vec::with_capacity(figures.len());
        for (image, path) in figures {
            let staging = staging_path(path);
            if let Err(err) = self.save(image, &staging) {
                // a failed encode may leave a truncated file behind
                if staging.exists() {
                    staged.push(staging);
                }
                discard(&staged);
                return Err(err);
            }
            staged.push(staging);
        }
        Ok(staged)
    }

    fn publish(staged: &[PathBuf], targets: &[PathBuf]) -> Result<()> {
        for (index, (from, to)) in staged.iter().zip(targets).enumerate() {
            if let Err(err) = fs::rename(from, to) {
                discard(&targets[..index]);
                discard(&staged[index..]);
                return Err(err.into());
            }
            log::info!("saved figure to {}", to.display());
        }
        Ok(())
    }
}

impl PoseRenderer for RasterRenderer {
    fn name(&self) -> &str {
        "raster"
    }

    fn render(&mut self, poses: &[CameraPose]) -> Result<Vec<PathBuf>> {
        if poses.is_empty() {
            return Err(PlotError::EmptyTrajectory);
        }
        let [overview_path, side_views_path] = self.figure_paths();
        let figures = [
            (render_overview(poses, &self.style), overview_path),
            (render_side_views(poses, &self.style), side_views_path),
        ];

        fs::create_dir_all(&self.output_dir)?;
        let staged = self.stage(&figures)?;
        let targets: Vec<PathBuf> = figures.into_iter().map(|(_, path)| path).collect();
        Self::publish(&staged, &targets)?;
        Ok(targets)
    }
}
