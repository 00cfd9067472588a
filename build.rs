use anyhow::*;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    // This tells Cargo to rerun this script if something in /assets/ changes.
    println!("cargo:rerun-if-changed=assets");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");
    if !assets_src.exists() {
        println!(
            "cargo:warning=asset directory {} is missing, the scene will fail to load",
            assets_src.display()
        );
    }
    // Native builds resolve asset paths against this root regardless of the working directory.
    println!(
        "cargo:rustc-env=DONUT_SCENE_ASSET_ROOT={}",
        assets_src.display()
    );

    Ok(())
}
