//! Asset IO: matcap images and typeface fonts.
//!
//! Natively assets are read from `./assets/`, on the web they are fetched from
//! `<origin>/assets/`. Loading runs in the background through [`loader`].

pub mod loader;

use anyhow::Context;

use crate::text::Font;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().context("no browser window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|err| anyhow::anyhow!("could not read page origin: {err:?}"))?;
    let base = reqwest::Url::parse(&format!("{origin}/assets/"))?;
    Ok(base.join(file_name)?)
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
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?
    };

    Ok(data)
}

/// Fetches and decodes a matcap image. Uploading happens on the render thread.
pub async fn load_matcap_image(file_name: &str) -> anyhow::Result<image::DynamicImage> {
    let bytes = load_binary(file_name).await?;
    image::load_from_memory(&bytes).with_context(|| format!("decoding matcap {file_name}"))
}

pub async fn load_font(file_name: &str) -> anyhow::Result<Font> {
    let bytes = load_binary(file_name).await?;
    Font::from_slice(&bytes).with_context(|| format!("parsing typeface {file_name}"))
}
