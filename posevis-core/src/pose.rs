use crate::{Direction, PointCoordinates, TransformMatrix};

/// Position and viewing direction of one camera, in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: PointCoordinates,
    // -Z column of the rotation block; local +Z points away from the scene
    pub forward: Direction,
}

impl CameraPose {
    pub fn new(position: PointCoordinates, forward: Direction) -> Self {
        Self { position, forward }
    }

    /// Reads the translation column and the negated third rotation column.
    /// The homogeneous bottom row is ignored.
    pub fn from_transform(transform: &TransformMatrix) -> Self {
        let position = PointCoordinates::new(
            transform[(0, 3)],
            transform[(1, 3)],
            transform[(2, 3)],
        );
        let forward = -Direction::new(
            transform[(0, 2)],
            transform[(1, 2)],
            transform[(2, 2)],
        );
        Self { position, forward }
    }

    /// Tip of the forward arrow drawn for this camera.
    pub fn arrow_tip(&self, scale: f64) -> PointCoordinates {
        self.position + self.forward * scale
    }
}

pub fn positions(poses: &[CameraPose]) -> Vec<PointCoordinates> {
    poses.iter().map(|pose| pose.position).collect()
}
