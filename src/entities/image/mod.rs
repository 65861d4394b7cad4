mod image_key;
mod image_size;
mod mime_type;

pub use image_key::ImageKey;
pub use image_size::{ImageSize, ImageSizeTryFromError, MAX_IMAGE_SIZE};
pub use mime_type::{MimeType, MimeTypeTryFromError};
