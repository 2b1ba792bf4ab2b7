const COMMANDS: &[&str] = &[
    "execute",
    "start_blinkup",
    "abort_blinkup",
    "clear_blinkup_data",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
