use posevis_core::Real;

/// Camera description carried next to the poses of a capture.
///
/// Every field is optional: datasets routinely omit the model name or part of
/// the calibration, and consumers decide how absence is presented.
#[derive(Clone, Debug, Default)]
pub struct PinholeCamera {
    // image size in pixels; either side may be unknown
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub camera_model: Option<String>,

    // focal lengths in pixels
    pub fl_x: Option<Real>,
    pub fl_y: Option<Real>,
    // principal point in pixels
    pub cx: Option<Real>,
    pub cy: Option<Real>,
}

impl posevis_core::Camera for PinholeCamera {
    fn cols(&self) -> Option<usize> {
        self.width
    }

    fn rows(&self) -> Option<usize> {
        self.height
    }
}

impl PinholeCamera {
    pub fn new(width: Option<usize>, height: Option<usize>) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, camera_model: Option<String>) -> Self {
        self.camera_model = camera_model;
        self
    }

    pub fn with_focal_length(mut self, fl_x: Option<Real>, fl_y: Option<Real>) -> Self {
        self.fl_x = fl_x;
        self.fl_y = fl_y;
        self
    }

    pub fn with_principal_point(mut self, cx: Option<Real>, cy: Option<Real>) -> Self {
        self.cx = cx;
        self.cy = cy;
        self
    }
}
