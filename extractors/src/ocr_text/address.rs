//! Address-block extraction: label-grouped first pass plus a postal-code
//! fallback for cards without office/branch markers.

use shared_types::LabeledValue;

use crate::patterns;
use crate::values::opt_string;

struct AddressBlock {
    label: Option<String>,
    parts: Vec<String>,
}

/// Group consecutive lines following an office/branch marker into one
/// address entry per label. A contact-channel line terminates the block;
/// contact fragments inside a line are stripped before it is appended.
pub(crate) fn extract_addresses(lines: &[String]) -> Vec<LabeledValue> {
    let lib = patterns::library();
    let mut addresses: Vec<LabeledValue> = Vec::new();
    let mut current: Option<AddressBlock> = None;

    fn flush(current: &mut Option<AddressBlock>, addresses: &mut Vec<LabeledValue>) {
        if let Some(block) = current.take() {
            if !block.parts.is_empty() {
                addresses.push(LabeledValue {
                    label: block.label,
                    value: block.parts.join(" ").trim().to_string(),
                });
            }
        }
    }

    for line in lines {
        if lib.looks_like_contact_line(line) {
            flush(&mut current, &mut addresses);
            continue;
        }

        if lib.label_office.is_match(line) || lib.label_branch.is_match(line) {
            flush(&mut current, &mut addresses);
            current = Some(AddressBlock {
                label: opt_string(lib.derive_label(line)),
                parts: vec![lib.collapse_whitespace(line)],
            });
            continue;
        }

        if let Some(block) = current.as_mut() {
            let cleaned = lib.strip_contact_from_address_line(line);
            if !cleaned.is_empty() {
                block.parts.push(lib.collapse_whitespace(&cleaned));
            }
        }
    }

    flush(&mut current, &mut addresses);
    addresses
}

/// Fallback when no labeled block exists: a postal-code line (plus its
/// street-looking predecessor) becomes one `office`-labeled entry.
pub(crate) fn infer_address(lines: &[String]) -> Vec<LabeledValue> {
    let lib = patterns::library();
    let mut addresses = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if lib.address_label_line.is_match(line) {
            continue;
        }
        if lib.looks_like_contact_line(line) {
            continue;
        }
        if lib.hours_header.is_match(line)
            || lib.hours_line.is_match(line)
            || lib.time_token.is_match(line)
        {
            continue;
        }
        if !lib.postal.is_match(line) || !lib.letter.is_match(line) {
            continue;
        }

        let mut parts = Vec::new();
        if index > 0 {
            let prev = &lines[index - 1];
            if lib.street.is_match(prev) || prev.chars().any(|c| c.is_ascii_digit()) {
                let cleaned_prev = lib.strip_contact_from_address_line(prev);
                if !cleaned_prev.is_empty() {
                    parts.push(cleaned_prev);
                }
            }
        }
        let cleaned_line = lib.strip_contact_from_address_line(line);
        if !cleaned_line.is_empty() {
            parts.push(cleaned_line);
        }
        if !parts.is_empty() {
            addresses.push(LabeledValue {
                label: Some("office".to_string()),
                value: parts.join(" "),
            });
        }
    }

    addresses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_addresses_groups_by_label() {
        let input = lines(&[
            "Văn phòng: Ho Chi Minh",
            "12 Nguyen Hue",
            "District 1",
            "Tel: 028 1234 5678",
            "CN: Hà Nội",
            "34 Tran Phu",
        ]);
        let addresses = extract_addresses(&input);
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].label.as_deref(), Some("office-hcm"));
        assert!(addresses[0].value.contains("12 Nguyen Hue"));
        assert!(addresses[0].value.contains("District 1"));
        assert_eq!(addresses[1].label.as_deref(), Some("branch-hanoi"));
        assert!(addresses[1].value.contains("34 Tran Phu"));
    }

    #[test]
    fn test_contact_line_terminates_block() {
        let input = lines(&[
            "Office: Main",
            "Musterweg 1",
            "Tel: 030 123456",
            "trailing line",
        ]);
        let addresses = extract_addresses(&input);
        assert_eq!(addresses.len(), 1);
        assert!(!addresses[0].value.contains("trailing"));
    }

    #[test]
    fn test_infer_address_from_postal_code() {
        let input = lines(&["Musterstraße 12", "10115 Berlin"]);
        let addresses = infer_address(&input);
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].label.as_deref(), Some("office"));
        assert_eq!(addresses[0].value, "Musterstraße 12 10115 Berlin");
    }

    #[test]
    fn test_infer_address_skips_hours_lines() {
        let input = lines(&["Öffnungszeiten", "Mo-Fr 9:00 - 18:00"]);
        assert!(infer_address(&input).is_empty());
    }
}
