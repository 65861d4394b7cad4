use crate::entities;
use chrono::{DateTime, Utc};

pub trait RecordsRepository {
    type Error;

    async fn create(
        &mut self,
        now: DateTime<Utc>,
        msec: entities::Msec,
    ) -> Result<entities::Record, Self::Error>;

    async fn get(
        &mut self,
        id: entities::RecordId,
    ) -> Result<Option<entities::Record>, Self::Error>;

    /// Record with the greatest value of `ordering`, or `None` when the table is empty.
    async fn latest(
        &mut self,
        ordering: entities::RecordOrdering,
    ) -> Result<Option<entities::Record>, Self::Error>;

    async fn list(&mut self) -> Result<Vec<entities::Record>, Self::Error>;

    async fn update(
        &mut self,
        id: entities::RecordId,
        msec: entities::Msec,
    ) -> Result<Option<entities::Record>, Self::Error>;

    /// Returns `false` when no record had the id.
    async fn delete(&mut self, id: entities::RecordId) -> Result<bool, Self::Error>;
}
