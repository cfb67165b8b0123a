pub mod error;
pub mod transforms_reader;

pub use error::{Result, TransformsError};
pub use transforms_reader::{
    load_transforms, FrameRecord, TransformDocument, TransformsReader, TRANSFORMS_FILE_NAME,
};
