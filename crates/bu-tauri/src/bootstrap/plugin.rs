//! Plugin entry point.

use std::path::PathBuf;
use std::sync::Arc;

use tauri::plugin::{Builder, PluginApi, TauriPlugin};
use tauri::{AppHandle, Manager, Runtime};
use tracing::info;

use bu_core::ports::ProvisioningGatewayPort;

use super::config::{resolve_config, CONFIG_PATH_ENV};
use super::wiring::wire_session;
use crate::adapters::TauriEventResultSink;
use crate::commands;
use crate::state::BridgeRuntime;

pub const PLUGIN_NAME: &str = "blinkup";

#[cfg(target_os = "android")]
const ANDROID_PLUGIN_PACKAGE: &str = "com.electricimp.blinkup";
#[cfg(target_os = "android")]
const ANDROID_PLUGIN_CLASS: &str = "BlinkUpPlugin";

/// Builds the BlinkUp bridge plugin.
///
/// Register it on the app builder; results are emitted on
/// [`RESULT_EVENT`](crate::adapters::RESULT_EVENT).
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            commands::execute,
            commands::start_blinkup,
            commands::abort_blinkup,
            commands::clear_blinkup_data,
        ])
        .setup(|app, api| {
            let data_dir = app.path().app_local_data_dir()?;
            let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
            let config = resolve_config(config_path, data_dir)?;

            let gateway = build_gateway(app, api)?;
            let sink = Arc::new(TauriEventResultSink::new(app.clone()));
            let session = wire_session(gateway, sink, &config);
            app.manage(BridgeRuntime::new(session));

            info!(
                plan_id_dir = %config.plan_id_dir.display(),
                max_timeout_ms = config.max_timeout_ms,
                "BlinkUp bridge ready"
            );
            Ok(())
        })
        .build()
}

#[cfg(target_os = "android")]
fn build_gateway<R: Runtime>(
    _app: &AppHandle<R>,
    api: PluginApi<R, ()>,
) -> Result<Arc<dyn ProvisioningGatewayPort>, Box<dyn std::error::Error>> {
    use crate::adapters::MobileProvisioningGateway;

    let handle = api.register_android_plugin(ANDROID_PLUGIN_PACKAGE, ANDROID_PLUGIN_CLASS)?;
    Ok(Arc::new(MobileProvisioningGateway::new(handle)))
}

#[cfg(not(target_os = "android"))]
fn build_gateway<R: Runtime>(
    _app: &AppHandle<R>,
    _api: PluginApi<R, ()>,
) -> Result<Arc<dyn ProvisioningGatewayPort>, Box<dyn std::error::Error>> {
    tracing::warn!("no BlinkUp SDK on this platform, every flow will report an SDK error");
    Ok(Arc::new(crate::adapters::UnsupportedGateway))
}
