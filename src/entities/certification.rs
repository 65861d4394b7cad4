use super::{ImageKey, RecordId};
use chrono::{DateTime, Utc};
use derive_more::{Display, From, Into};
use thiserror::Error;

#[derive(Clone, Debug, Display, Into, From, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CertificationId(i64);

#[derive(Clone, Debug, Eq, PartialEq, Hash, Into)]
pub struct Description(String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptionTryFromError {
    #[error("Description must not be blank")]
    Blank,
}

impl TryFrom<String> for Description {
    type Error = DescriptionTryFromError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(DescriptionTryFromError::Blank)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl Description {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certification {
    pub id: CertificationId,
    pub record_id: RecordId,
    pub image: ImageKey,
    pub description: Description,
    pub created_at: DateTime<Utc>,
}
