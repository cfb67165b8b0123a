pub mod canvas;
pub mod error;
pub mod figure_cfg;
pub mod figures;
pub mod glyphs;
pub mod panel;
pub mod raster_renderer;
pub mod viewer;

pub use error::{PlotError, Result};
pub use figure_cfg::{FigureCfg, FigureStyle};
pub use raster_renderer::{PoseRenderer, RasterRenderer, OVERVIEW_FILE_STEM, SIDE_VIEWS_FILE_STEM};
pub use viewer::RerunViewer;

#[cfg(test)]
mod tests {
    use posevis_core::{pose::CameraPose, Direction, PointCoordinates};
    use tempfile::tempdir;

    use super::*;

    fn line_of_cameras() -> Vec<CameraPose> {
        (0..4)
            .map(|i| {
                CameraPose::new(
                    PointCoordinates::new(i as f64, 0.5 * i as f64, 1.0),
                    Direction::new(0.0, 1.0, -1.0).normalize(),
                )
            })
            .collect()
    }

    fn low_res_cfg(format: &str) -> FigureCfg {
        FigureCfg {
            dpi: 20,
            image_format: format.to_owned(),
            ..Default::default()
        }
    }

    fn entries(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_both_figures() {
        let root = tempdir().unwrap();
        let dir = root.path().join("figures");
        let mut renderer = low_res_cfg("png").finalize(&dir).unwrap();
        let written = renderer.render(&line_of_cameras()).unwrap();

        assert_eq!(
            written,
            vec![dir.join("camera_poses_3d.png"), dir.join("camera_poses_side_views.png")]
        );
        for path in &written {
            let image = image::open(path).unwrap();
            assert!(image.width() > 0 && image.height() > 0);
        }
        assert_eq!(
            entries(&dir),
            vec!["camera_poses_3d.png", "camera_poses_side_views.png"]
        );
    }

    #[test]
    fn extension_follows_format() {
        let root = tempdir().unwrap();
        let renderer = low_res_cfg("JPG").finalize(root.path()).unwrap();
        let [overview, side_views] = renderer.figure_paths();
        assert_eq!(overview, root.path().join("camera_poses_3d.jpg"));
        assert_eq!(side_views, root.path().join("camera_poses_side_views.jpg"));
    }

    #[test]
    fn empty_trajectory_writes_nothing() {
        let root = tempdir().unwrap();
        let dir = root.path().join("figures");
        let mut renderer = low_res_cfg("png").finalize(&dir).unwrap();
        assert!(matches!(renderer.render(&[]), Err(PlotError::EmptyTrajectory)));
        assert!(!dir.exists());
    }

    #[test]
    fn failed_second_figure_leaves_no_first_figure() {
        let root = tempdir().unwrap();
        // a directory where the side views should go makes the final move fail
        std::fs::create_dir(root.path().join("camera_poses_side_views.png")).unwrap();
        let mut renderer = low_res_cfg("png").finalize(root.path()).unwrap();

        assert!(matches!(
            renderer.render(&line_of_cameras()),
            Err(PlotError::Io(_))
        ));
        assert_eq!(entries(root.path()), vec!["camera_poses_side_views.png"]);
    }
}
