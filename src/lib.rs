//! BlinkUp provisioning bridge for Tauri apps.
//!
//! ```ignore
//! fn main() {
//!     blinkup_bridge_lib::init_default_tracing().expect("Failed to initialize tracing");
//!
//!     tauri::Builder::default()
//!         .plugin(blinkup_bridge_lib::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```

pub use bu_core::{DeviceInfo, PluginErrorCode, ResultEnvelope, StatusCode};
pub use bu_tauri::{init, init_tracing_subscriber, BridgeRuntime, ResultEventPayload, RESULT_EVENT};

/// Initializes tracing with file output under the platform data directory.
pub fn init_default_tracing() -> anyhow::Result<()> {
    let log_dir = bu_infra::default_data_dir()?.join("logs");
    init_tracing_subscriber(Some(&log_dir))
}
