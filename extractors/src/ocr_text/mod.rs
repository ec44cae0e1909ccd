//! Heuristic classification of normalized OCR text into a structured
//! contact record.

mod address;
pub mod cleanup;

use shared_types::{AddressField, ContactValue, ExtractedContact, LabeledValue};

use crate::patterns;
use crate::values::{opt_string, opt_vec, unique_labeled, unique_strings};

/// Classify a raw OCR text block into an [`ExtractedContact`].
///
/// Total function: malformed or empty input degrades to a contact whose only
/// populated field is `raw_text`.
pub fn extract_contact_from_text(text: &str) -> ExtractedContact {
    let lib = patterns::library();
    let cleaned_text = cleanup::clean_text(text);
    let lines: Vec<String> = cleaned_text
        .split('\n')
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    // Emails and URL-shaped tokens are harvested from the whole text first,
    // so values embedded inline with other content are not lost. Hosts that
    // merely repeat an email's domain are not promoted to websites.
    let mut emails = unique_strings(lib.email.find_iter(&cleaned_text).map(|m| m.as_str()));
    let email_domains: Vec<String> = emails
        .iter()
        .filter_map(|email| email.split('@').nth(1))
        .map(|domain| domain.to_lowercase())
        .collect();
    let mut websites: Vec<String> = lib
        .clean_urls(lib.url.find_iter(&cleaned_text).map(|m| m.as_str().to_string()))
        .into_iter()
        .filter(|value| {
            let host = value.to_lowercase();
            let host = host.strip_prefix("www.").unwrap_or(&host);
            !email_domains.iter().any(|domain| domain.as_str() == host)
        })
        .collect();

    let mut phones: Vec<LabeledValue> = Vec::new();
    let mut faxes: Vec<LabeledValue> = Vec::new();
    let mut remaining: Vec<&str> = Vec::new();
    let mut context_label = String::new();

    for line in &lines {
        if lib.label_office.is_match(line) || lib.label_branch.is_match(line) {
            context_label = lib.derive_label(line);
            continue;
        }
        if lib.label_email.is_match(line) {
            let value = lib.parse_label_value(line);
            emails.extend(lib.email.find_iter(&value).map(|m| m.as_str().to_string()));
            continue;
        }
        if lib.label_web.is_match(line) {
            let value = lib.parse_label_value(line);
            websites.extend(lib.url.find_iter(&value).map(|m| m.as_str().to_string()));
            continue;
        }
        if lib.label_phone.is_match(line) {
            let value = lib.parse_label_value(line);
            let source = if value.is_empty() { line.as_str() } else { value.as_str() };
            for number in lib.parse_numbers(source) {
                phones.push(LabeledValue {
                    label: opt_string(context_label.clone()),
                    value: number,
                });
            }
            continue;
        }
        if line.contains("T ") || line.contains(" M ") || lib.inline_short_label.is_match(line) {
            let labeled = lib.extract_labeled_numbers(line);
            if !labeled.is_empty() {
                phones.extend(labeled);
                continue;
            }
        }
        if lib.label_fax.is_match(line) {
            let value = lib.parse_label_value(line);
            let source = if value.is_empty() { line.as_str() } else { value.as_str() };
            for number in lib.parse_numbers(source) {
                faxes.push(LabeledValue {
                    label: opt_string(context_label.clone()),
                    value: number,
                });
            }
            continue;
        }
        remaining.push(line);
    }

    let mut addresses = address::extract_addresses(&lines);
    if addresses.is_empty() {
        addresses = address::infer_address(&lines);
    }

    // The document's first detected address label doubles as the default
    // label for any channel entry that has none.
    let default_label = addresses.first().and_then(|entry| entry.label.clone());
    let normalize_label = |value: LabeledValue| LabeledValue {
        label: value
            .label
            .filter(|label| !label.is_empty())
            .or_else(|| default_label.clone()),
        value: value.value,
    };

    let company_line = remaining
        .iter()
        .find(|line| lib.company_hint.is_match(line))
        .or_else(|| {
            remaining
                .iter()
                .find(|line| lib.corporate_suffix.is_match(line))
        })
        .copied();

    let inferred_name = lines
        .first()
        .filter(|line| lib.is_likely_person_name(line))
        .map(|line| line.as_str());
    let name_line = inferred_name.or_else(|| {
        remaining
            .iter()
            .find(|line| {
                Some(**line) != company_line
                    && (lib.is_mostly_uppercase(line) || lib.company_marker.is_match(line))
            })
            .copied()
    });

    // Honorific lines override the single-candidate selection; cards naming
    // several people keep all of them.
    let person_lines: Vec<&str> = remaining
        .iter()
        .filter(|line| lib.person_hint.is_match(line))
        .copied()
        .collect();
    let name_final = if person_lines.is_empty() {
        name_line.map(str::to_string)
    } else {
        Some(person_lines.join(" / "))
    };

    let title_line = remaining
        .iter()
        .find(|line| {
            Some(**line) != company_line
                && name_final.as_deref() != Some(**line)
                && lib.title_hint.is_match(line)
        })
        .copied();

    // Safety net for numbers the label rules missed.
    let extra_phones = remaining
        .iter()
        .flat_map(|line| lib.phone.find_iter(line))
        .map(|m| LabeledValue::unlabeled(m.as_str()));
    let raw_phones = unique_labeled(
        phones
            .into_iter()
            .chain(extra_phones)
            .map(normalize_label)
            .collect::<Vec<_>>(),
    );
    let raw_faxes = unique_labeled(faxes.into_iter().map(normalize_label).collect::<Vec<_>>());

    let hours_index = lines.iter().position(|line| lib.hours_header.is_match(line));
    let note_source: Vec<&str> = match hours_index {
        Some(index) => lines[index..].iter().map(String::as_str).collect(),
        None => remaining.clone(),
    };
    let notes = note_source
        .iter()
        .filter(|line| {
            if Some(**line) == company_line
                || name_final.as_deref() == Some(**line)
                || Some(**line) == title_line
                || lib.address_label_line.is_match(line)
            {
                return false;
            }
            if lib.label_phone.is_match(line)
                || lib.label_fax.is_match(line)
                || lib.label_email.is_match(line)
                || lib.label_web.is_match(line)
            {
                return false;
            }
            if lib.marketing.is_match(line) {
                return false;
            }
            if hours_index.is_some() {
                return lib.hours_header.is_match(line)
                    || lib.hours_line.is_match(line)
                    || lib.time_token.is_match(line);
            }
            true
        })
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let contact = ExtractedContact {
        name: name_final.and_then(opt_string),
        company: company_line.map(str::to_string),
        title: title_line.map(str::to_string),
        emails: opt_vec(unique_strings(&emails)),
        phones: opt_vec(
            raw_phones
                .into_iter()
                .map(ContactValue::Labeled)
                .collect::<Vec<_>>(),
        ),
        faxes: opt_vec(
            raw_faxes
                .into_iter()
                .map(ContactValue::Labeled)
                .collect::<Vec<_>>(),
        ),
        websites: opt_vec(lib.clean_urls(unique_strings(&websites))),
        address: opt_vec(
            addresses
                .into_iter()
                .map(ContactValue::Labeled)
                .collect::<Vec<_>>(),
        )
        .map(AddressField::Entries),
        notes: opt_string(notes),
        raw_text: Some(cleaned_text),
    };
    tracing::debug!(
        emails = contact.emails.as_ref().map_or(0, Vec::len),
        phones = contact.phones.as_ref().map_or(0, Vec::len),
        "classified OCR text block"
    );
    contact
}
