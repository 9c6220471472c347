//! `stratify-serve` — static file server for working on the UI in a
//! browser.
//!
//! Usage: `stratify-serve [ROOT]` (defaults to `STATIC_ROOT`, then `.`).
//! Port comes from `PORT` (default 5500).

use stratify_lib::serve::{self, ServeConfig};

#[tokio::main]
async fn main() {
    stratify_lib::load_env_files();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root_arg = std::env::args().nth(1);
    let config = match ServeConfig::from_env(root_arg.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("[SERVE] {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve::run(config).await {
        log::error!("[SERVE] {}", e);
        std::process::exit(1);
    }
}
