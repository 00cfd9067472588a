//! Asset loading.
//!
//! Native builds read from the crate's `assets/` directory; the web build
//! fetches the same relative paths from the page origin.

use anyhow::Context;

use crate::{assembly::SceneAssets, config::SceneConfig};

pub mod font;
pub mod texture;

pub use font::load_font;
pub use texture::load_matcap;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().context("no window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("could not read page origin: {:?}", e))?;
    let base = reqwest::Url::parse(&format!("{}/", origin))?;
    Ok(base.join(file_name)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn asset_path(file_name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("DONUT_SCENE_ASSET_ROOT")).join(file_name)
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url)
            .await?
            .error_for_status()?
            .text()
            .await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = asset_path(file_name);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?
    };

    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url)
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = asset_path(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?
    };

    Ok(data)
}

/// Load the font and the matcap concurrently; both must succeed.
pub async fn load_scene_assets(config: &SceneConfig) -> anyhow::Result<SceneAssets> {
    let (font, matcap) = futures::try_join!(
        load_font(&config.font_path),
        load_matcap(&config.matcap_path)
    )?;
    log::info!(
        "loaded font \"{}\" and matcap {}",
        font.family_name(),
        matcap.name()
    );
    Ok(SceneAssets { font, matcap })
}
