//! dock-registry: durable application registry for AppDock.
//!
//! Provides:
//! - The `Application` record persisted to a flat JSON file
//! - `RegistryStore`: load/save/add/remove with duplicate prevention
//! - Default seed entries written on first use

mod error;
mod store;
mod types;

pub use error::RegistryError;
pub use store::RegistryStore;
pub use types::{Application, seed_applications};
