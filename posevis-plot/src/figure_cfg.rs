use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::Deserialize;

use crate::{
    error::{PlotError, Result},
    raster_renderer::RasterRenderer,
};

/// Figure settings in physical units, mirroring a print-oriented plotting
/// setup: sizes in inches and points, resolved to pixels through `dpi`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureCfg {
    pub dpi: u32,
    // length factor applied to every forward vector
    pub arrow_scale: f64,
    pub image_format: String,

    pub figure_3d_size_inches: [f32; 2],
    pub side_views_size_inches: [f32; 2],

    // planar arrow heads, in data units
    pub head_width: f64,
    pub head_length: f64,
    // 3D arrow heads, as a fraction of the arrow
    pub arrow_length_ratio: f64,

    // marker area in pt^2
    pub marker_size_points: f32,
    pub line_width_points: f32,
    pub font_size_points: f32,
    pub pad_inches: f32,
}

impl Default for FigureCfg {
    fn default() -> Self {
        Self {
            dpi: 300,
            arrow_scale: 0.5,
            image_format: String::from("png"),

            figure_3d_size_inches: [15.0, 10.0],
            side_views_size_inches: [15.0, 12.0],

            head_width: 0.1,
            head_length: 0.15,
            arrow_length_ratio: 0.3,

            marker_size_points: 100.0,
            line_width_points: 1.5,
            font_size_points: 8.0,
            pad_inches: 0.1,
        }
    }
}

/// Pixel-space quantities derived from a [`FigureCfg`].
#[derive(Debug, Clone)]
pub struct FigureStyle {
    pub dpi: f32,
    pub arrow_scale: f64,
    pub head_width: f64,
    pub head_length: f64,
    pub arrow_length_ratio: f64,

    pub figure_3d_px: (u32, u32),
    pub side_views_px: (u32, u32),

    pub marker_radius: f32,
    pub small_marker_radius: f32,
    pub line_width: f32,
    pub thin_line_width: f32,
    pub label_height: f32,
    pub tick_label_height: f32,
    pub tick_length: f32,
    pub pad: u32,
}

impl FigureStyle {
    pub fn points(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }
}

fn image_format_for(extension: &str) -> Result<ImageFormat> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "bmp" => Ok(ImageFormat::Bmp),
        "tif" | "tiff" => Ok(ImageFormat::Tiff),
        _ => Err(PlotError::UnsupportedFormat(extension.to_owned())),
    }
}

fn pixels(size_inches: [f32; 2], dpi: f32) -> (u32, u32) {
    (
        (size_inches[0] * dpi).round() as u32,
        (size_inches[1] * dpi).round() as u32,
    )
}

impl FigureCfg {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn style(&self) -> Result<FigureStyle> {
        if self.dpi == 0 {
            return Err(PlotError::Config("dpi must be positive".into()));
        }
        let sizes = self
            .figure_3d_size_inches
            .iter()
            .chain(self.side_views_size_inches.iter());
        for size in sizes {
            if !size.is_finite() || *size <= 0.0 {
                return Err(PlotError::Config(format!(
                    "figure sizes must be positive, got {size}"
                )));
            }
        }
        if !(self.arrow_scale.is_finite() && self.arrow_scale >= 0.0) {
            return Err(PlotError::Config(format!(
                "arrow_scale must be non-negative, got {}",
                self.arrow_scale
            )));
        }

        let dpi = self.dpi as f32;
        let pt = |points: f32| points * dpi / 72.0;
        let line_width = pt(self.line_width_points).max(1.0);
        let label_height = pt(self.font_size_points * 0.72).max(5.0);
        let style = FigureStyle {
            dpi,
            arrow_scale: self.arrow_scale,
            head_width: self.head_width,
            head_length: self.head_length,
            arrow_length_ratio: self.arrow_length_ratio,

            figure_3d_px: pixels(self.figure_3d_size_inches, dpi),
            side_views_px: pixels(self.side_views_size_inches, dpi),

            // marker size is an area; its side is the diameter
            marker_radius: (pt(self.marker_size_points.max(0.0).sqrt()) / 2.0).max(1.0),
            small_marker_radius: pt(3.0).max(1.0),
            line_width,
            thin_line_width: (line_width / 2.0).max(1.0),
            label_height,
            tick_label_height: label_height * 1.25,
            tick_length: pt(3.5).max(2.0),
            pad: pt(self.pad_inches * 72.0).round().max(0.0) as u32,
        };
        log::debug!(
            "figure style at {} dpi: overview {:?} px, side views {:?} px",
            self.dpi,
            style.figure_3d_px,
            style.side_views_px
        );
        Ok(style)
    }

    /// Validates the settings and builds a renderer writing into `output_dir`.
    pub fn finalize(self, output_dir: impl Into<PathBuf>) -> Result<RasterRenderer> {
        let style = self.style()?;
        let format = image_format_for(&self.image_format)?;
        Ok(RasterRenderer::new(
            style,
            format,
            self.image_format.to_ascii_lowercase(),
            output_dir.into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn default_matches_print_figures() {
        let style = FigureCfg::default().style().unwrap();
        assert_eq!(style.figure_3d_px, (4500, 3000));
        assert_eq!(style.side_views_px, (4500, 3600));
        assert_relative_eq!(style.arrow_scale, 0.5);
        // 100 pt^2 marker: 10 pt across
        assert_relative_eq!(style.marker_radius, 5.0 * 300.0 / 72.0, epsilon = 1e-4);
        assert_eq!(style.pad, 30);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: FigureCfg = serde_json::from_str(r#"{"dpi": 72, "image_format": "jpg"}"#).unwrap();
        assert_eq!(cfg.dpi, 72);
        assert_eq!(cfg.image_format, "jpg");
        assert_relative_eq!(cfg.head_length, 0.15);
        assert_eq!(cfg.style().unwrap().figure_3d_px, (1080, 720));
    }

    #[test]
    fn rejects_bad_settings() {
        let cfg = FigureCfg {
            dpi: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.style(), Err(PlotError::Config(_))));

        let cfg = FigureCfg {
            side_views_size_inches: [15.0, -1.0],
            ..Default::default()
        };
        assert!(matches!(cfg.style(), Err(PlotError::Config(_))));

        let cfg = FigureCfg {
            image_format: "svg".into(),
            ..Default::default()
        };
        assert!(matches!(
            cfg.finalize(std::env::temp_dir()),
            Err(PlotError::UnsupportedFormat(_))
        ));
    }
}
