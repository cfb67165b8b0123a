use posevis_core::{PointCoordinates, Real};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: Real,
    pub max: Real,
}

/// Summary of where the cameras are and how far they travelled.
#[derive(Clone, Debug)]
pub struct TrajectoryStats {
    pub frame_count: usize,
    // X, Y, Z
    pub ranges: [AxisRange; 3],
    pub centroid: PointCoordinates,
    pub centroid_distances: Vec<Real>,
    pub mean_centroid_distance: Real,
    pub max_centroid_distance: Real,
    // only defined with at least two frames
    pub trajectory_length: Option<Real>,
}

impl TrajectoryStats {
    pub fn compute(positions: &[PointCoordinates]) -> Option<Self> {
        let centroid = centroid(positions)?;

        let mut ranges = [AxisRange {
            min: Real::INFINITY,
            max: Real::NEG_INFINITY,
        }; 3];
        for position in positions {
            for (axis, range) in ranges.iter_mut().enumerate() {
                range.min = range.min.min(position[axis]);
                range.max = range.max.max(position[axis]);
            }
        }

        let centroid_distances: Vec<Real> = positions
            .iter()
            .map(|position| (position - centroid).norm())
            .collect();
        let mean_centroid_distance =
            centroid_distances.iter().sum::<Real>() / centroid_distances.len() as Real;
        let max_centroid_distance = centroid_distances
            .iter()
            .copied()
            .fold(0.0, Real::max);

        Some(Self {
            frame_count: positions.len(),
            ranges,
            centroid,
            centroid_distances,
            mean_centroid_distance,
            max_centroid_distance,
            trajectory_length: trajectory_length(positions),
        })
    }
}

pub fn centroid(positions: &[PointCoordinates]) -> Option<PointCoordinates> {
    if positions.is_empty() {
        return None;
    }
    let sum = positions
        .iter()
        .fold(PointCoordinates::zeros(), |acc, position| acc + position);
    Some(sum / positions.len() as Real)
}

/// Sum of the distances between consecutive positions.
pub fn trajectory_length(positions: &[PointCoordinates]) -> Option<Real> {
    if positions.len() < 2 {
        return None;
    }
    Some(
        positions
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum(),
    )
}
