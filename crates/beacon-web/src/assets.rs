use beacon_core::{BlockFont, ImageSlot, TextureImage};
use std::sync::mpsc::Sender;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("GET {} -> {}", url, resp.status());
    }
    let text = resp.text().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("response body is not text"))
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("GET {} -> {}", url, resp.status());
    }
    let buffer = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetch and decode one scene image. On failure the objects using it keep
/// their untextured look.
pub async fn load_image(slot: ImageSlot, url: String, sender: Sender<TextureImage>) {
    let result = async {
        let bytes = fetch_bytes(&url).await?;
        let image = TextureImage::decode(slot, &bytes)?;
        anyhow::Ok(image)
    }
    .await;
    match result {
        Ok(image) => {
            log::info!("[texture] {:?} {}x{} from {}", slot, image.width(), image.height(), url);
            if sender.send(image).is_err() {
                log::warn!("[texture] runtime no longer accepts images");
            }
        }
        Err(e) => log::warn!("[texture] {}: {:?}", url, e),
    }
}

/// Fetch and parse the signage font, then hand it to the runtime. Failure
/// only means the signage never appears.
pub async fn load_font(url: String, sender: Sender<BlockFont>) {
    let result = async {
        let source = fetch_text(&url).await?;
        let font = BlockFont::parse(&source)?;
        anyhow::Ok(font)
    }
    .await;
    match result {
        Ok(font) => {
            log::info!("[font] loaded {} glyphs from {}", font.len(), url);
            if sender.send(font).is_err() {
                log::warn!("[font] runtime no longer accepts a font");
            }
        }
        Err(e) => log::error!("[font] {}: {:?}", url, e),
    }
}
