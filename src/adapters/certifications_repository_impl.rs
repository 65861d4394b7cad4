use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::{Acquire, Postgres};

use crate::{entities, ports};

#[derive(Debug, Clone, sqlx::FromRow)]
struct CertificationModel {
    id: i64,
    record_id: i64,
    image: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl CertificationModel {
    fn into_entity(self) -> anyhow::Result<entities::Certification> {
        Ok(entities::Certification {
            id: entities::CertificationId::from(self.id),
            record_id: entities::RecordId::from(self.record_id),
            image: entities::ImageKey::from_unchecked(self.image),
            description: entities::Description::try_from(self.description)
                .context("description conversion error")?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CertificationsRepositoryImpl<A> {
    db: A,
}

impl<A> CertificationsRepositoryImpl<A> {
    pub fn new(db: A) -> Self {
        Self { db }
    }
}

impl<A> ports::CertificationsRepository for CertificationsRepositoryImpl<A>
where
    A: Send,
    for<'c> &'c A: Acquire<'c, Database = Postgres>,
{
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        now: DateTime<Utc>,
        record_id: entities::RecordId,
        image: entities::ImageKey,
        description: entities::Description,
    ) -> Result<entities::Certification, Self::Error> {
        let mut trx = self.db.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
                INSERT INTO certifications (record_id, image, description, created_at)
                VALUES ($1, $2, $3, $4)
                RETURNING id
            "#,
        )
        .bind(i64::from(record_id))
        .bind(image.as_str())
        .bind(description.as_str())
        .bind(now)
        .fetch_one(&mut *trx)
        .await
        .context("insert certification")?;

        trx.commit().await?;

        Ok(entities::Certification {
            id: entities::CertificationId::from(id),
            record_id,
            image,
            description,
            created_at: now,
        })
    }

    async fn get_by_record(
        &mut self,
        record_id: entities::RecordId,
    ) -> Result<Vec<entities::Certification>, Self::Error> {
        let mut conn = self.db.acquire().await?;

        let models = sqlx::query_as::<_, CertificationModel>(
            r#"
                SELECT
                    id,
                    record_id,
                    image,
                    description,
                    created_at
                FROM
                    certifications
                WHERE
                    record_id = $1
                ORDER BY
                    id ASC
            "#,
        )
        .bind(i64::from(record_id))
        .fetch_all(&mut *conn)
        .await
        .context("fetch certifications")?;

        models
            .into_iter()
            .map(CertificationModel::into_entity)
            .collect::<anyhow::Result<Vec<_>>>()
            .context("convert Certification")
    }
}
