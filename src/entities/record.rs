use super::ElapsedTime;
use chrono::{DateTime, Utc};
use derive_more::{Display, From, Into};
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, Display, Into, From, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RecordId(i64);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Into, Serialize)]
#[serde(transparent)]
pub struct Msec(i64);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MsecTryFromError {
    #[error("Ensure this value is greater than or equal to 0.")]
    Negative,
}

impl TryFrom<i64> for Msec {
    type Error = MsecTryFromError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            Err(MsecTryFromError::Negative)
        } else {
            Ok(Self(value))
        }
    }
}

/// Which column decides the "latest" record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordOrdering {
    CreateAt,
    Id,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub msec: Msec,
    pub create_at: DateTime<Utc>,
}

impl Record {
    pub fn elapsed_time(&self) -> ElapsedTime {
        ElapsedTime::from(self.msec)
    }
}
