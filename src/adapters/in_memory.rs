use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use chrono::{DateTime, Utc};

use crate::{entities, ports};

#[derive(Debug, Default)]
struct State {
    records: Vec<entities::Record>,
    certifications: Vec<entities::Certification>,
    images: HashMap<entities::ImageKey, Vec<u8>>,
    last_record_id: i64,
    last_certification_id: i64,
    fail_certification_insert: bool,
}

/// Shared in-process store implementing every port. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn insert_record(&self, msec: i64, create_at: DateTime<Utc>) -> entities::Record {
        let mut state = self.state();
        state.last_record_id += 1;
        let record = entities::Record {
            id: entities::RecordId::from(state.last_record_id),
            msec: entities::Msec::try_from(msec).unwrap(),
            create_at,
        };
        state.records.push(record.clone());
        record
    }

    pub fn certifications(&self) -> Vec<entities::Certification> {
        self.state().certifications.clone()
    }

    pub fn image(&self, key: &entities::ImageKey) -> Option<Vec<u8>> {
        self.state().images.get(key).cloned()
    }

    pub fn image_count(&self) -> usize {
        self.state().images.len()
    }

    pub fn fail_certification_insert(&self) {
        self.state().fail_certification_insert = true;
    }
}

impl ports::RecordsRepository for InMemoryStore {
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        now: DateTime<Utc>,
        msec: entities::Msec,
    ) -> Result<entities::Record, Self::Error> {
        Ok(self.insert_record(i64::from(msec), now))
    }

    async fn get(
        &mut self,
        id: entities::RecordId,
    ) -> Result<Option<entities::Record>, Self::Error> {
        Ok(self.state().records.iter().find(|r| r.id == id).cloned())
    }

    async fn latest(
        &mut self,
        ordering: entities::RecordOrdering,
    ) -> Result<Option<entities::Record>, Self::Error> {
        let state = self.state();
        let latest = match ordering {
            entities::RecordOrdering::CreateAt => {
                state.records.iter().max_by_key(|r| (r.create_at, r.id))
            }
            entities::RecordOrdering::Id => state.records.iter().max_by_key(|r| r.id),
        };
        Ok(latest.cloned())
    }

    async fn list(&mut self) -> Result<Vec<entities::Record>, Self::Error> {
        let mut records = self.state().records.clone();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    async fn update(
        &mut self,
        id: entities::RecordId,
        msec: entities::Msec,
    ) -> Result<Option<entities::Record>, Self::Error> {
        let mut state = self.state();
        Ok(state.records.iter_mut().find(|r| r.id == id).map(|r| {
            r.msec = msec;
            r.clone()
        }))
    }

    async fn delete(&mut self, id: entities::RecordId) -> Result<bool, Self::Error> {
        let mut state = self.state();
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        state.certifications.retain(|c| c.record_id != id);
        Ok(state.records.len() != before)
    }
}

impl ports::CertificationsRepository for InMemoryStore {
    type Error = anyhow::Error;

    async fn create(
        &mut self,
        now: DateTime<Utc>,
        record_id: entities::RecordId,
        image: entities::ImageKey,
        description: entities::Description,
    ) -> Result<entities::Certification, Self::Error> {
        let mut state = self.state();
        if state.fail_certification_insert {
            return Err(anyhow!("insert certification"));
        }
        if !state.records.iter().any(|r| r.id == record_id) {
            return Err(anyhow!("record {} does not exist", record_id));
        }
        state.last_certification_id += 1;
        let certification = entities::Certification {
            id: entities::CertificationId::from(state.last_certification_id),
            record_id,
            image,
            description,
            created_at: now,
        };
        state.certifications.push(certification.clone());
        Ok(certification)
    }

    async fn get_by_record(
        &mut self,
        record_id: entities::RecordId,
    ) -> Result<Vec<entities::Certification>, Self::Error> {
        Ok(self
            .state()
            .certifications
            .iter()
            .filter(|c| c.record_id == record_id)
            .cloned()
            .collect())
    }
}

impl ports::Storage for InMemoryStore {
    type Error = anyhow::Error;

    async fn save(&mut self, key: &entities::ImageKey, data: &[u8]) -> Result<(), Self::Error> {
        self.state().images.insert(key.clone(), data.to_vec());
        Ok(())
    }

    async fn delete(&mut self, key: &entities::ImageKey) -> Result<(), Self::Error> {
        self.state().images.remove(key);
        Ok(())
    }
}
