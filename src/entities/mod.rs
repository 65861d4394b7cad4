mod certification;
mod elapsed_time;
mod image;
mod record;

pub use certification::{Certification, CertificationId, Description, DescriptionTryFromError};
pub use elapsed_time::ElapsedTime;
pub use image::{
    ImageKey, ImageSize, ImageSizeTryFromError, MimeType, MimeTypeTryFromError, MAX_IMAGE_SIZE,
};
pub use record::{Msec, MsecTryFromError, Record, RecordId, RecordOrdering};
