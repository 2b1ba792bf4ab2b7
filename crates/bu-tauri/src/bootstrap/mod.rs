pub mod config;
pub mod plugin;
pub mod tracing;
pub mod wiring;

pub use config::{resolve_config, CONFIG_PATH_ENV};
pub use plugin::{init, PLUGIN_NAME};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::wire_session;
