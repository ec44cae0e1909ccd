use shared_types::{AddressField, ContactValue, ExtractedContact};

use crate::values::opt_vec;

/// Minimal vCard 3.0 reader covering the keys business-card QR codes
/// actually carry. Unknown keys are ignored.
pub struct VCardParser;

impl VCardParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, payload: &str) -> ExtractedContact {
        let lines = unfold_lines(payload);

        let mut contact = ExtractedContact::default();
        let mut emails = Vec::new();
        let mut phones = Vec::new();
        let mut websites = Vec::new();

        for line in &lines {
            let Some((key_part, value_part)) = line.split_once(':') else {
                continue;
            };
            let value = value_part.trim();
            if value.is_empty() {
                continue;
            }
            let key = key_part
                .split(';')
                .next()
                .unwrap_or_default()
                .to_uppercase();

            match key.as_str() {
                "FN" => contact.name = Some(value.to_string()),
                "N" => {
                    // Last-name-first component order per the vCard spec;
                    // FN wins when both are present.
                    let mut components = value.split(';');
                    let last = components.next().unwrap_or_default();
                    let first = components.next().unwrap_or_default();
                    let full = format!("{} {}", first, last).trim().to_string();
                    if contact.name.is_none() && !full.is_empty() {
                        contact.name = Some(full);
                    }
                }
                "ORG" => contact.company = Some(value.to_string()),
                "TITLE" => contact.title = Some(value.to_string()),
                "EMAIL" => emails.push(value.to_string()),
                "TEL" => phones.push(ContactValue::Text(value.to_string())),
                "URL" => websites.push(value.to_string()),
                "ADR" => {
                    let parts: Vec<&str> = value
                        .split(';')
                        .map(str::trim)
                        .filter(|part| !part.is_empty())
                        .collect();
                    if !parts.is_empty() {
                        contact.address = Some(AddressField::Text(parts.join(", ")));
                    }
                }
                "NOTE" => contact.notes = Some(value.to_string()),
                _ => {}
            }
        }

        contact.emails = opt_vec(emails);
        contact.phones = opt_vec(phones);
        contact.websites = opt_vec(websites);
        contact.raw_text = Some(payload.to_string());
        contact
    }
}

impl Default for VCardParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Continuation lines (leading whitespace) are appended to the previous
/// logical line.
fn unfold_lines(payload: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in payload.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        if line.starts_with([' ', '\t']) && !lines.is_empty() {
            let last = lines.last_mut().unwrap();
            last.push_str(line.trim());
        } else {
            lines.push(line.trim().to_string());
        }
    }
    lines
}
