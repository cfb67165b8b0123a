use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use posevis_core::{Dataset, Real, TransformMatrix};
use posevis_sensor::PinholeCamera;
use serde::Deserialize;

use crate::error::{Result, TransformsError};

pub const TRANSFORMS_FILE_NAME: &str = "transforms.json";

/// Camera metadata plus one transform per captured frame.
///
/// Unknown keys are ignored so nerfstudio-style documents with distortion
/// coefficients, masks or depth paths load unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformDocument {
    #[serde(rename = "w", alias = "image_width")]
    pub image_width: Option<usize>,
    #[serde(rename = "h", alias = "image_height")]
    pub image_height: Option<usize>,
    pub camera_model: Option<String>,

    pub fl_x: Option<Real>,
    pub fl_y: Option<Real>,
    pub cx: Option<Real>,
    pub cy: Option<Real>,

    pub frames: Vec<FrameRecord>,
}

/// A frame as it appears on disk; the matrix is validated lazily so shape
/// errors can name the frame they come from.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameRecord {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub transform_matrix: serde_json::Value,
}

impl FrameRecord {
    /// Converts the nested row lists into a 4x4 matrix.
    pub fn transform(&self, frame: usize) -> Result<TransformMatrix> {
        let rows = match &self.transform_matrix {
            serde_json::Value::Array(rows) => rows,
            serde_json::Value::Null => {
                return Err(TransformsError::shape(frame, "is missing"));
            }
            _ => return Err(TransformsError::shape(frame, "is not a list of rows")),
        };
        if rows.len() != 4 {
            return Err(TransformsError::shape(
                frame,
                format!("has {} rows, expected 4", rows.len()),
            ));
        }

        let mut transform = TransformMatrix::zeros();
        for (r, row) in rows.iter().enumerate() {
            let row = row
                .as_array()
                .ok_or_else(|| TransformsError::shape(frame, format!("row {r} is not a list")))?;
            if row.len() != 4 {
                return Err(TransformsError::shape(
                    frame,
                    format!("row {r} has {} columns, expected 4", row.len()),
                ));
            }
            for (c, value) in row.iter().enumerate() {
                transform[(r, c)] = value.as_f64().ok_or_else(|| {
                    TransformsError::shape(frame, format!("element ({r}, {c}) is not a number"))
                })?;
            }
        }
        Ok(transform)
    }
}

impl TransformDocument {
    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        let document: TransformDocument =
            serde_json::from_str(text).map_err(|source| TransformsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if document.frames.is_empty() {
            return Err(TransformsError::MissingFrames {
                path: path.to_path_buf(),
            });
        }
        Ok(document)
    }

    pub fn camera(&self) -> PinholeCamera {
        PinholeCamera::new(self.image_width, self.image_height)
            .with_model(self.camera_model.clone())
            .with_focal_length(self.fl_x, self.fl_y)
            .with_principal_point(self.cx, self.cy)
    }
}

impl Dataset<FrameRecord> for TransformDocument {
    fn get(&self, index: usize) -> Option<FrameRecord> {
        self.frames.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.frames.len()
    }
}

/// Reads `transforms.json` from a capture directory.
pub struct TransformsReader {
    dataset_path: PathBuf,
}

impl TransformsReader {
    pub fn new(dataset_path: impl AsRef<Path>) -> Self {
        TransformsReader {
            dataset_path: dataset_path.as_ref().to_path_buf(),
        }
    }

    pub fn transforms_path(&self) -> PathBuf {
        self.dataset_path.join(TRANSFORMS_FILE_NAME)
    }

    pub fn load(&self) -> Result<TransformDocument> {
        load_transforms(&self.transforms_path())
    }
}

pub fn load_transforms(path: &Path) -> Result<TransformDocument> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(TransformsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(TransformsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let document = TransformDocument::from_json(&text, path)?;
    log::info!(
        "loaded {} frames from {} ({:?} x {:?})",
        document.frames.len(),
        path.display(),
        document.image_width,
        document.image_height
    );
    Ok(document)
}
