/// Image geometry a camera description can report.
///
/// Datasets may omit the image size entirely, so both accessors are optional.
pub trait Camera {
    fn rows(&self) -> Option<usize>;
    fn cols(&self) -> Option<usize>;
}
