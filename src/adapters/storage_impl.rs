use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context};

use crate::{entities, ports::Storage};

/// Stores images as files below `root`.
#[derive(Debug, Clone)]
pub struct StorageImpl {
    root: PathBuf,
}

impl StorageImpl {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, key: &entities::ImageKey) -> anyhow::Result<PathBuf> {
        let relative = Path::new(key.as_str());
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(anyhow!("invalid image key: {}", key));
        }
        Ok(self.root.join(relative))
    }
}

impl Storage for StorageImpl {
    type Error = anyhow::Error;

    async fn save(&mut self, key: &entities::ImageKey, data: &[u8]) -> Result<(), Self::Error> {
        let path = self.path_of(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }
        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    async fn delete(&mut self, key: &entities::ImageKey) -> Result<(), Self::Error> {
        let path = self.path_of(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", path.display())),
        }
    }
}
