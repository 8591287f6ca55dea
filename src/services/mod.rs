// Service exports
pub mod compatibility;
pub mod directory;
pub mod sessions;

pub use compatibility::CompatibilityClient;
pub use directory::{DirectoryClient, DirectoryError};
pub use sessions::SessionStore;
