//! Scan-artifact cleanup applied before any classification.

use crate::patterns;

/// Strip embedded image references, arrow glyphs and per-line bullet/heading
/// markers, drop empty lines and decode the common HTML entities. Total
/// function; empty input yields an empty string.
pub fn clean_text(text: &str) -> String {
    let lib = patterns::library();
    let without_images = lib.image_artifact.replace_all(text, "");
    let without_arrows = lib.arrow.replace_all(&without_images, "");

    let joined = without_arrows
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .map(|line| lib.bullet.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    decode_entities(&joined)
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}
