//! Build script for Todo Sidebar
//!
//! Embeds the Windows application manifest for DPI awareness and
//! links the Windows libraries used for autostart and pointer polling.

fn main() {
    // Only run on Windows
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    // Embed Windows manifest for DPI awareness via .rc file
    if let Err(e) =
        embed_resource::compile("resources/app.rc", embed_resource::NONE).manifest_required()
    {
        panic!("failed to embed resources/app.rc: {e}");
    }

    // Link Windows libraries
    println!("cargo:rustc-link-lib=user32");
    println!("cargo:rustc-link-lib=advapi32");

    // Re-run if resources change
    println!("cargo:rerun-if-changed=resources/app.rc");
    println!("cargo:rerun-if-changed=resources/app.manifest");
}
