//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the session kernel.
//! - `adapters`: OS specific implementations (filesystem).

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{session_bus, SessionEventReceiver, SessionEventSender};
