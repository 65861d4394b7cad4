mod certifications_repository;
mod records_repository;
mod storage;

pub use certifications_repository::*;
pub use records_repository::*;
pub use storage::*;
