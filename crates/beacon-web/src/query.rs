// Page URL query handling. Kept free of web-sys so host tests can include it.

use beacon_core::scene::{SceneConfig, SceneVariant};

/// Value of `key` in a `?a=1&b=2` style query string. The leading `?` is
/// optional; the first occurrence wins.
pub fn query_value<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .strip_prefix('?')
        .unwrap_or(search)
        .split('&')
        .filter_map(|pair| {
            let mut it = pair.splitn(2, '=');
            Some((it.next()?, it.next().unwrap_or("")))
        })
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Decode one `application/x-www-form-urlencoded` component: `+` is a space
/// and `%XX` is a byte. Malformed escapes are kept literally; invalid UTF-8
/// is replaced.
pub fn decode_component(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Variant named by `?scene=`; unknown or missing names fall back to classic.
pub fn variant_from_query(search: &str) -> SceneVariant {
    match query_value(search, "scene") {
        Some(name) => decode_component(name).parse().unwrap_or_else(|e| {
            log::warn!("[config] {}; using {}", e, SceneVariant::default());
            SceneVariant::default()
        }),
        None => SceneVariant::default(),
    }
}

/// Startup configuration for a page with the given query string and canvas size.
pub fn config_from_query(search: &str, width: u32, height: u32) -> SceneConfig {
    let mut config = SceneConfig {
        variant: variant_from_query(search),
        width,
        height,
        ..SceneConfig::default()
    };
    if let Some(text) = query_value(search, "text").filter(|t| !t.is_empty()) {
        config.signage_text = decode_component(text);
    }
    config
}
