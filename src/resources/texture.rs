use anyhow::Context;

use crate::{data_structures::material::MatcapTexture, resources::load_binary};

/// Fetch and decode a matcap image.
pub async fn load_matcap(file_name: &str) -> anyhow::Result<MatcapTexture> {
    let data = load_binary(file_name)
        .await
        .with_context(|| format!("loading matcap {}", file_name))?;
    MatcapTexture::from_bytes(file_name, &data)
}
