mod bbox;
pub mod encoder;
pub mod error;
mod processing;

pub use bbox::bounding_box::{read_boxes_from_slice, BoundingBox, BOX_SIZE};
pub use encoder::box_encoder::BoxEncoder;
pub use encoder::{EncodedSample, SampleEncoder};
pub use error::errors::{Error, InvalidArgumentError};
