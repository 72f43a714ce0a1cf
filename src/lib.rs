pub mod models;
pub mod storage;
pub mod store;

pub use models::{EducationEntry, Gender, ProfileRecord, EDUCATION_LEVELS};
pub use storage::{LoadError, ProfileStorage, SaveError, PROFILE_FILE_NAME};
pub use store::{BasicInfoUpdate, ProfileSnapshot, ProfileStore};
