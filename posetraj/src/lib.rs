pub mod pose_extractor;
pub mod statistics_report;
pub mod trajectory_stats;

pub use pose_extractor::extract_camera_poses;
pub use statistics_report::{format_optional, print_camera_statistics, StatisticsReport};
pub use trajectory_stats::{AxisRange, TrajectoryStats};

#[cfg(test)]
mod tests {
    use std::path::Path;

    use approx::assert_relative_eq;
    use posevis_core::{pose, PointCoordinates};
    use posevis_dataset_reader::{TransformDocument, TransformsError};
    use posevis_sensor::PinholeCamera;

    use super::*;

    fn document(frames: &[[Real4; 4]]) -> TransformDocument {
        let frames: Vec<_> = frames
            .iter()
            .map(|matrix| serde_json::json!({ "transform_matrix": matrix }))
            .collect();
        let text = serde_json::json!({ "w": 800, "h": 600, "frames": frames }).to_string();
        TransformDocument::from_json(&text, Path::new("transforms.json")).unwrap()
    }

    type Real4 = [f64; 4];

    fn translation(x: f64, y: f64, z: f64) -> [Real4; 4] {
        [
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    fn points(coords: &[(f64, f64, f64)]) -> Vec<PointCoordinates> {
        coords
            .iter()
            .map(|&(x, y, z)| PointCoordinates::new(x, y, z))
            .collect()
    }

    fn report(positions: &[PointCoordinates], camera: &PinholeCamera) -> String {
        let mut out = Vec::new();
        print_camera_statistics(&mut out, positions, camera).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn extracts_one_pose_per_frame_in_order() {
        let doc = document(&[
            translation(0.0, 0.0, 0.0),
            translation(1.0, 2.0, 3.0),
            translation(-4.0, 0.5, 9.0),
        ]);
        let poses = extract_camera_poses(&doc).unwrap();
        assert_eq!(poses.len(), 3);
        assert_eq!(poses[1].position, PointCoordinates::new(1.0, 2.0, 3.0));
        assert_eq!(poses[2].position, PointCoordinates::new(-4.0, 0.5, 9.0));
        for pose in &poses {
            assert_relative_eq!(pose.forward.z, -1.0);
        }
    }

    #[test]
    fn extraction_stops_at_bad_frame() {
        let text = r#"{"frames": [
            {"transform_matrix": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]},
            {"transform_matrix": [[1,0,0,0],[0,1,0,0]]}
        ]}"#;
        let doc = TransformDocument::from_json(text, Path::new("transforms.json")).unwrap();
        assert!(matches!(
            extract_camera_poses(&doc),
            Err(TransformsError::Shape { frame: 1, .. })
        ));
    }

    #[test]
    fn centroid_and_distances() {
        let positions = points(&[(0.0, 0.0, 0.0), (2.0, 0.0, 0.0), (1.0, 2.0, 0.0)]);
        let stats = TrajectoryStats::compute(&positions).unwrap();

        assert_relative_eq!(stats.centroid.x, 1.0);
        assert_relative_eq!(stats.centroid.y, 2.0 / 3.0);
        assert_relative_eq!(stats.centroid.z, 0.0);

        let farthest = positions
            .iter()
            .map(|p| (p - stats.centroid).norm())
            .fold(0.0, f64::max);
        assert_relative_eq!(stats.max_centroid_distance, farthest);
        assert_relative_eq!(stats.max_centroid_distance, 4.0 / 3.0, epsilon = 1e-12);
        assert_eq!(stats.centroid_distances.len(), 3);

        assert_eq!(stats.ranges[0], AxisRange { min: 0.0, max: 2.0 });
        assert_eq!(stats.ranges[1], AxisRange { min: 0.0, max: 2.0 });
        assert_eq!(stats.ranges[2], AxisRange { min: 0.0, max: 0.0 });
    }

    #[test]
    fn trajectory_length_needs_two_frames() {
        let single = points(&[(1.0, 1.0, 1.0)]);
        assert_eq!(TrajectoryStats::compute(&single).unwrap().trajectory_length, None);

        let pair = points(&[(0.0, 0.0, 0.0), (3.0, 4.0, 0.0)]);
        assert_relative_eq!(
            TrajectoryStats::compute(&pair).unwrap().trajectory_length.unwrap(),
            5.0
        );

        assert!(TrajectoryStats::compute(&[]).is_none());
    }

    #[test]
    fn report_layout() {
        let camera = PinholeCamera::new(Some(800), Some(600))
            .with_model(Some("OPENCV".to_owned()))
            .with_focal_length(Some(1111.111), Some(1111.0))
            .with_principal_point(Some(400.0), Some(300.0));
        let positions = points(&[(0.0, 0.0, 0.0), (3.0, 4.0, 0.0)]);
        let text = report(&positions, &camera);

        let banner = "=".repeat(60);
        let expected = format!(
            "\n{banner}\nCAMERA POSE STATISTICS\n{banner}\nNumber of frames: 2\n\
             \nImage dimensions: 800 x 600\nCamera model: OPENCV\n\
             \nFocal length: fl_x=1111.11, fl_y=1111.00\nPrincipal point: cx=400.00, cy=300.00\n\
             \n--- Position Statistics ---\nX range: [0.000, 3.000]\n\
             Y range: [0.000, 4.000]\nZ range: [0.000, 0.000]\n\
             \nScene center: [1.500, 2.000, 0.000]\nAverage distance from center: 2.500\n\
             Max distance from center: 2.500\n\
             \nTotal trajectory length: 5.000\n{banner}\n\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn report_placeholders() {
        let camera = PinholeCamera::default().with_focal_length(None, Some(500.0));
        let text = report(&points(&[(1.0, 2.0, 3.0)]), &camera);

        assert!(text.contains("Image dimensions: Unknown\n"));
        assert!(text.contains("Camera model: Unknown\n"));
        assert!(text.contains("Focal length: fl_x=N/A, fl_y=500.00\n"));
        assert!(text.contains("Principal point: cx=N/A, cy=N/A\n"));
        assert!(text.contains("Scene center: [1.000, 2.000, 3.000]\n"));
        assert!(!text.contains("trajectory length"));
    }

    #[test]
    fn report_keeps_known_image_side() {
        let positions = points(&[(0.0, 0.0, 0.0)]);

        let text = report(&positions, &PinholeCamera::new(Some(640), None));
        assert!(text.contains("Image dimensions: 640 x Unknown\n"), "{text}");

        let text = report(&positions, &PinholeCamera::new(None, Some(480)));
        assert!(text.contains("Image dimensions: Unknown x 480\n"), "{text}");
    }

    #[test]
    fn empty_trajectory_writes_nothing() {
        assert_eq!(report(&[], &PinholeCamera::default()), "");
    }

    #[test]
    fn placeholder_formatting() {
        assert_eq!(format_optional(Some(2.0 / 3.0), 3), "0.667");
        assert_eq!(format_optional(None, 2), "N/A");
    }

    #[test]
    fn positions_follow_poses() {
        let doc = document(&[translation(1.0, 0.0, 0.0), translation(2.0, 0.0, 0.0)]);
        let poses = extract_camera_poses(&doc).unwrap();
        assert_eq!(
            pose::positions(&poses),
            points(&[(1.0, 0.0, 0.0), (2.0, 0.0, 0.0)])
        );
    }
}
