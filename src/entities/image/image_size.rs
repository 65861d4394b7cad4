use derive_more::Into;
use thiserror::Error;

// 20 MB
pub const MAX_IMAGE_SIZE: usize = 20 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageSizeTryFromError {
    #[error("The submitted file is empty.")]
    Empty,
    #[error("Image size exceeds maximum limit of {} bytes", MAX_IMAGE_SIZE)]
    TooLarge,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Into)]
pub struct ImageSize(usize);

impl TryFrom<usize> for ImageSize {
    type Error = ImageSizeTryFromError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(ImageSizeTryFromError::Empty)
        } else if value > MAX_IMAGE_SIZE {
            Err(ImageSizeTryFromError::TooLarge)
        } else {
            Ok(Self(value))
        }
    }
}
