use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::forms::ValidatedCertification;
use crate::{entities, ports};

/// Stores the image and inserts a certification tied to `record`.
/// The stored image is removed again when the insert fails.
pub async fn persist<C, S>(
    certifications: &mut C,
    storage: &mut S,
    now: DateTime<Utc>,
    validated: ValidatedCertification,
    record: &entities::Record,
) -> anyhow::Result<entities::Certification>
where
    C: ports::CertificationsRepository<Error = anyhow::Error>,
    S: ports::Storage<Error = anyhow::Error>,
{
    let key = entities::ImageKey::new(now, &validated.mime_type);

    storage
        .save(&key, &validated.image)
        .await
        .context("save certification image")?;

    let result = certifications
        .create(now, record.id, key.clone(), validated.description)
        .await
        .context("create certification");

    if result.is_err() {
        if let Err(e) = storage.delete(&key).await {
            log::warn!("failed to remove orphaned image {}: {:?}", key, e);
        }
    }

    result
}
