//! Build script for Stratify.
//!
//! Only the desktop shell needs Tauri's code generation. The gateway
//! library and the static server build without it.

fn main() {
    println!("cargo:rustc-check-cfg=cfg(mobile)");

    #[cfg(feature = "desktop")]
    tauri_build::build();
}
