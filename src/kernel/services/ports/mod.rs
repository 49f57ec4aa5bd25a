//! Service ports: traits + data contracts.

pub mod config;
pub mod persistence;
pub mod settings;

pub use config::{SessionConfig, DEFAULT_EDITOR_STATE_CAPACITY};
pub use persistence::{NullPersistenceAdapter, SessionPersistence};
pub use settings::Settings;
