mod dataset;
pub use dataset::*;
mod camera;
pub use camera::*;
pub mod pose;

use sophus::nalgebra::{Matrix4, Vector3};

pub type Real = f64;
pub type PointCoordinates = Vector3<Real>;
pub type Direction = Vector3<Real>;
/// Homogeneous camera-to-world transform.
pub type TransformMatrix = Matrix4<Real>;
