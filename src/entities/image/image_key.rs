use super::MimeType;
use chrono::{DateTime, Utc};
use derive_more::{Display, Into};
use ulid::Ulid;

const CERTIFICATIONS_DIR: &str = "certifications";

/// Path of a stored image relative to the media root.
#[derive(Clone, Debug, Display, Eq, PartialEq, Hash, PartialOrd, Ord, Into)]
pub struct ImageKey(String);

impl ImageKey {
    pub fn new(now: DateTime<Utc>, mime_type: &MimeType) -> Self {
        let key = format!(
            "{}/{}.{}",
            CERTIFICATIONS_DIR,
            Ulid::from_datetime(now.into()),
            mime_type.extension()
        );
        Self(key)
    }

    // for repository
    pub fn from_unchecked(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
