//! Stratify — Tauri application entry point and library root.
//!
//! The library half (`llm`, `serve`) builds without Tauri. The app shell
//! below only wires state, plugins and the command registry; no business
//! logic lives here.
//!
//! Commands are split across:
//!   - commands.rs  — window controls and provider status
//!   - pipeline.rs  — model-backed commands (paths, execute, CSV)

pub mod llm;
pub mod serve;

#[cfg(feature = "desktop")]
mod commands;
#[cfg(feature = "desktop")]
mod pipeline;

/// Load `.env.local`, else `.env`, from the project root.
///
/// Uses CARGO_MANIFEST_DIR (compile-time path to src-tauri/) to reliably
/// find the project root regardless of the binary's working directory.
/// Runs before the logger exists, so it reports on stderr.
pub fn load_env_files() {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let project_root = manifest_dir.parent().unwrap_or(manifest_dir);

    for env_file in [".env.local", ".env"] {
        let path = project_root.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            return;
        }
    }
}

/// Entry point, called by the Tauri runtime.
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    load_env_files();
    env_logger::init();

    let gateway = llm::GeminiClient::from_env();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(gateway)
        .invoke_handler(tauri::generate_handler![
            // Window + status commands (commands.rs)
            commands::window_minimize,
            commands::window_maximize,
            commands::window_close,
            commands::window_is_maximized,
            commands::get_provider_status,
            // Model-backed commands (pipeline.rs)
            pipeline::send_to_llm,
            pipeline::generate_thinking_paths,
            pipeline::generate_updated_paths,
            pipeline::execute_thinking_path,
            pipeline::execute_thinking_steps,
            pipeline::analyze_csv,
            pipeline::analyze_csv_file,
        ])
        .setup(|_app| {
            log::info!("Stratify starting up");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running Stratify");
}
