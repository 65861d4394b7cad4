mod certifications_repository_impl;
#[cfg(test)]
mod in_memory;
mod records_repository_impl;
mod storage_impl;

pub use certifications_repository_impl::CertificationsRepositoryImpl;
#[cfg(test)]
pub use in_memory::InMemoryStore;
pub use records_repository_impl::RecordsRepositoryImpl;
pub use storage_impl::StorageImpl;
