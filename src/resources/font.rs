use anyhow::Context;

use crate::{font::Font, resources::load_string};

/// Fetch and parse a typeface JSON font.
pub async fn load_font(file_name: &str) -> anyhow::Result<Font> {
    let json = load_string(file_name)
        .await
        .with_context(|| format!("loading font {}", file_name))?;
    Font::parse(&json).with_context(|| format!("parsing font {}", file_name))
}
