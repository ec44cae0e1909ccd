//! Decoded QR payload parsing. A payload is a vCard, a `mailto:`/`tel:`
//! URI, a bare URL, or free text that falls back to OCR classification.

mod vcard;

pub use vcard::VCardParser;

use shared_types::{ContactValue, ExtractedContact};

use crate::ocr_text::extract_contact_from_text;

/// Parse a decoded QR string into an [`ExtractedContact`].
///
/// Dispatches on a case-insensitive prefix; anything unrecognized degrades
/// to free-text classification. `raw_text` is always populated, with the
/// empty string for empty input.
pub fn extract_contact_from_qr_payload(payload: &str) -> ExtractedContact {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return ExtractedContact {
            raw_text: Some(String::new()),
            ..Default::default()
        };
    }

    let upper = trimmed.to_uppercase();
    if upper.starts_with("BEGIN:VCARD") {
        return VCardParser::new().parse(trimmed);
    }

    if upper.starts_with("MAILTO:") {
        let email = trimmed["mailto:".len()..].trim().to_string();
        return ExtractedContact {
            emails: Some(vec![email]),
            raw_text: Some(trimmed.to_string()),
            ..Default::default()
        };
    }

    if upper.starts_with("TEL:") {
        let phone = trimmed["tel:".len()..].trim().to_string();
        return ExtractedContact {
            phones: Some(vec![ContactValue::Text(phone)]),
            raw_text: Some(trimmed.to_string()),
            ..Default::default()
        };
    }

    if upper.starts_with("HTTP") || upper.starts_with("WWW.") {
        return ExtractedContact {
            websites: Some(vec![trimmed.to_string()]),
            raw_text: Some(trimmed.to_string()),
            ..Default::default()
        };
    }

    tracing::debug!("QR payload has no recognized prefix, classifying as free text");
    extract_contact_from_text(trimmed)
}
