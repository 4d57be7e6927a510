//! World session glue and configuration for the viewer.

pub mod config;
pub mod debounce;
pub mod error;
pub mod session;

pub use config::ClientConfig;
pub use debounce::LoadDebouncer;
pub use error::SessionError;
pub use session::{Hud, SessionSettings, WorldSession};
