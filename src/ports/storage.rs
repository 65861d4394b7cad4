use crate::entities;

pub trait Storage {
    type Error;

    async fn save(&mut self, key: &entities::ImageKey, data: &[u8]) -> Result<(), Self::Error>;

    async fn delete(&mut self, key: &entities::ImageKey) -> Result<(), Self::Error>;
}
