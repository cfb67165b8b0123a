use posevis_core::{pose::CameraPose, Dataset};
use posevis_dataset_reader::{FrameRecord, Result};

/// Converts every frame into a [`CameraPose`], keeping capture order.
///
/// Stops at the first frame whose matrix is not 4x4; the error carries that
/// frame's index.
pub fn extract_camera_poses<D>(dataset: &D) -> Result<Vec<CameraPose>>
where
    D: Dataset<FrameRecord>,
{
    let mut poses = Vec::with_capacity(dataset.len());
    for (index, frame) in dataset.iter().enumerate() {
        let transform = frame.transform(index)?;
        let pose = CameraPose::from_transform(&transform);
        log::debug!(
            "frame {index} ({}): position {:?}, forward {:?}",
            frame.file_path.as_deref().unwrap_or("-"),
            pose.position.as_slice(),
            pose.forward.as_slice()
        );
        poses.push(pose);
    }
    Ok(poses)
}
