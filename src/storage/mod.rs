pub mod store;

pub use store::{AudioStore, StorageError};
