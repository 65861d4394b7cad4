use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::{Acquire, Postgres};

use crate::{entities, ports};

#[derive(Debug, Clone, sqlx::FromRow)]
struct RecordModel {
    id: i64,
    msec: i64,
    create_at: DateTime<Utc>,
}

impl RecordModel {
    fn into_entity(self) -> anyhow::Result<entities::Record> {
        Ok(entities::Record {
            id: entities::RecordId::from(self.id),
            msec: entities::Msec::try_from(self.msec).context("msec conversion error")?,
            create_at: self.create_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecordsRepositoryImpl<A> {
    db: A,
}

impl<A> RecordsRepositoryImpl<A> {
    pub fn new(db: A) -> Self {
        Self { db }
    }
}

impl<A> ports::RecordsRepository for RecordsRepositoryImpl<A>
where
    A: Send,
    for<'c> &'c A: Acquire<'c, Database = Postgres>,
{
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        now: DateTime<Utc>,
        msec: entities::Msec,
    ) -> Result<entities::Record, Self::Error> {
        let mut conn = self.db.acquire().await?;

        let model = sqlx::query_as::<_, RecordModel>(
            r#"
                INSERT INTO records (msec, create_at)
                VALUES ($1, $2)
                RETURNING id, msec, create_at
            "#,
        )
        .bind(i64::from(msec))
        .bind(now)
        .fetch_one(&mut *conn)
        .await
        .context("insert record")?;

        model.into_entity()
    }

    async fn get(
        &mut self,
        id: entities::RecordId,
    ) -> Result<Option<entities::Record>, Self::Error> {
        let mut conn = self.db.acquire().await?;

        let model = sqlx::query_as::<_, RecordModel>(
            r#"
                SELECT
                    id,
                    msec,
                    create_at
                FROM
                    records
                WHERE
                    id = $1
            "#,
        )
        .bind(i64::from(id))
        .fetch_optional(&mut *conn)
        .await
        .context("fetch record")?;

        model.map(RecordModel::into_entity).transpose()
    }

    async fn latest(
        &mut self,
        ordering: entities::RecordOrdering,
    ) -> Result<Option<entities::Record>, Self::Error> {
        let mut conn = self.db.acquire().await?;

        let sql = match ordering {
            entities::RecordOrdering::CreateAt => {
                r#"
                    SELECT id, msec, create_at
                    FROM records
                    ORDER BY create_at DESC, id DESC
                    LIMIT 1
                "#
            }
            entities::RecordOrdering::Id => {
                r#"
                    SELECT id, msec, create_at
                    FROM records
                    ORDER BY id DESC
                    LIMIT 1
                "#
            }
        };

        let model = sqlx::query_as::<_, RecordModel>(sql)
            .fetch_optional(&mut *conn)
            .await
            .context("fetch latest record")?;

        model.map(RecordModel::into_entity).transpose()
    }

    async fn list(&mut self) -> Result<Vec<entities::Record>, Self::Error> {
        let mut conn = self.db.acquire().await?;

        let models = sqlx::query_as::<_, RecordModel>(
            r#"
                SELECT
                    id,
                    msec,
                    create_at
                FROM
                    records
                ORDER BY
                    id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .context("fetch records")?;

        models
            .into_iter()
            .map(RecordModel::into_entity)
            .collect::<anyhow::Result<Vec<_>>>()
            .context("convert Record")
    }

    async fn update(
        &mut self,
        id: entities::RecordId,
        msec: entities::Msec,
    ) -> Result<Option<entities::Record>, Self::Error> {
        let mut conn = self.db.acquire().await?;

        let model = sqlx::query_as::<_, RecordModel>(
            r#"
                UPDATE records
                    SET
                        msec = $1
                    WHERE
                        id = $2
                    RETURNING id, msec, create_at
            "#,
        )
        .bind(i64::from(msec))
        .bind(i64::from(id))
        .fetch_optional(&mut *conn)
        .await
        .context("update record")?;

        model.map(RecordModel::into_entity).transpose()
    }

    async fn delete(&mut self, id: entities::RecordId) -> Result<bool, Self::Error> {
        let mut conn = self.db.acquire().await?;

        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *conn)
            .await
            .context("delete record")?;

        Ok(result.rows_affected() > 0)
    }
}
