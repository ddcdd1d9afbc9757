pub mod camera;
pub mod detection;
pub mod source;
pub mod types;

pub use camera::{CameraDevice, CameraSession, FrameStream};
pub use source::{PickedFile, load_image, payload_from_file};
pub use types::{DataUriError, ImagePayload};
