use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use posetraj::{extract_camera_poses, print_camera_statistics, TrajectoryStats};
use posevis_core::pose::{positions, CameraPose};
use posevis_dataset_reader::{TransformsError, TransformsReader, TRANSFORMS_FILE_NAME};
use posevis_plot::{FigureCfg, PoseRenderer, RerunViewer};

/// Visualize camera poses from transforms.json
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory containing transforms.json
    #[arg(long = "input_dir")]
    pub input_dir: PathBuf,

    /// Directory to save visualizations (optional)
    #[arg(long = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// Figure settings as JSON; missing keys keep their defaults
    #[arg(long = "plot_config")]
    pub plot_config: Option<PathBuf>,

    /// Output resolution, overrides the figure settings
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Output image format: png, jpg, bmp or tiff
    #[arg(long)]
    pub format: Option<String>,

    /// Stream the poses to a rerun viewer
    #[arg(long)]
    pub show: bool,
}

impl Args {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
            plot_config: None,
            dpi: None,
            format: None,
            show: false,
        }
    }

    /// Whether any figure is saved or displayed.
    pub fn presents_figures(&self) -> bool {
        self.output_dir.is_some() || self.show
    }

    fn figure_cfg(&self) -> anyhow::Result<FigureCfg> {
        let mut cfg = match &self.plot_config {
            Some(path) => FigureCfg::from_json_file(path)
                .with_context(|| format!("failed to load plot config {}", path.display()))?,
            None => FigureCfg::default(),
        };
        if let Some(dpi) = self.dpi {
            cfg.dpi = dpi;
        }
        if let Some(format) = &self.format {
            cfg.image_format = format.clone();
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// The input directory has no transforms file; nothing was done.
    MissingInput,
    Completed {
        poses: Vec<CameraPose>,
        stats: Option<TrajectoryStats>,
        written: Vec<PathBuf>,
    },
}

impl RunOutcome {
    pub fn written(&self) -> &[PathBuf] {
        match self {
            RunOutcome::MissingInput => &[],
            RunOutcome::Completed { written, .. } => written,
        }
    }
}

fn not_found(out: &mut impl Write, input_dir: &Path) -> anyhow::Result<RunOutcome> {
    writeln!(
        out,
        "Error: {TRANSFORMS_FILE_NAME} not found in {}",
        input_dir.display()
    )?;
    Ok(RunOutcome::MissingInput)
}

/// Loads the poses, prints their statistics and renders every requested
/// output, writing user-facing messages to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<RunOutcome> {
    let reader = TransformsReader::new(&args.input_dir);
    let transforms_path = reader.transforms_path();
    if !transforms_path.is_file() {
        return not_found(out, &args.input_dir);
    }

    // validate figure settings before any work
    let cfg = args.figure_cfg()?;
    let arrow_scale = cfg.arrow_scale;
    let raster = match &args.output_dir {
        Some(output_dir) => Some(cfg.finalize(output_dir)?),
        None => None,
    };

    writeln!(out, "Loading transforms from: {}", transforms_path.display())?;
    let document = match reader.load() {
        Ok(document) => document,
        Err(TransformsError::NotFound { .. }) => return not_found(out, &args.input_dir),
        Err(err) => return Err(err.into()),
    };

    let poses = extract_camera_poses(&document)?;
    let stats = print_camera_statistics(out, &positions(&poses), &document.camera())?;

    // files are written last so no other presenter can fail after them
    let mut renderers: Vec<Box<dyn PoseRenderer>> = Vec::new();
    if args.show {
        renderers.push(Box::new(RerunViewer::spawn("camera_pose_display", arrow_scale)?));
    }
    if let Some(raster) = raster {
        renderers.push(Box::new(raster));
    }
    if !args.presents_figures() {
        log::info!("no figures requested; pass --output_dir to save them or --show to view them");
    }

    let mut written = Vec::new();
    if !renderers.is_empty() {
        writeln!(out, "Creating 3D visualization...")?;
        writeln!(out, "Creating side view visualizations...")?;
    }
    for renderer in renderers.iter_mut() {
        log::info!("rendering with {}", renderer.name());
        written.extend(renderer.render(&poses)?);
    }

    if let Some(output_dir) = &args.output_dir {
        writeln!(out)?;
        writeln!(out, "Visualizations saved to: {}", output_dir.display())?;
    }

    Ok(RunOutcome::Completed {
        poses,
        stats,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figures_need_an_output_or_the_viewer() {
        let args = Args::new("scene");
        assert!(!args.presents_figures());
        assert!(Args {
            output_dir: Some("figures".into()),
            ..args.clone()
        }
        .presents_figures());
        assert!(Args { show: true, ..args }.presents_figures());
    }

    #[test]
    fn parses_snake_case_flags() {
        let args = Args::try_parse_from([
            "camera_pose_display",
            "--input_dir",
            "scene",
            "--output_dir",
            "figures",
            "--dpi",
            "72",
        ])
        .unwrap();
        assert_eq!(args.input_dir, PathBuf::from("scene"));
        assert_eq!(args.output_dir, Some(PathBuf::from("figures")));
        assert_eq!(args.dpi, Some(72));
        assert!(!args.show);
    }
}
