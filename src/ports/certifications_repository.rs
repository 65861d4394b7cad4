use crate::entities;
use chrono::{DateTime, Utc};

pub trait CertificationsRepository {
    type Error;

    async fn create(
        &mut self,
        now: DateTime<Utc>,
        record_id: entities::RecordId,
        image: entities::ImageKey,
        description: entities::Description,
    ) -> Result<entities::Certification, Self::Error>;

    async fn get_by_record(
        &mut self,
        record_id: entities::RecordId,
    ) -> Result<Vec<entities::Certification>, Self::Error>;
}
