//! Lossless union of two partial contact extractions (front OCR, back OCR,
//! QR) into one record.

use shared_types::{AddressField, ContactValue, ExtractedContact, LabeledValue};

use crate::values::{opt_string, opt_vec, to_labeled, unique_labeled, unique_strings};

/// Merge `extra` into `base`. Scalar fields are left-biased (the first
/// non-empty value wins); sequence fields are concatenated and deduplicated
/// case-insensitively with first-seen order preserved. Merging a contact
/// with itself is a no-op.
pub fn merge_contacts(base: &ExtractedContact, extra: &ExtractedContact) -> ExtractedContact {
    tracing::debug!("merging contact extractions");

    let address_values: Vec<LabeledValue> = to_labeled_list(base.address.as_ref())
        .into_iter()
        .chain(to_labeled_list(extra.address.as_ref()))
        .collect();
    let addresses = unique_labeled(address_values);

    ExtractedContact {
        name: first_non_empty(&base.name, &extra.name),
        company: first_non_empty(&base.company, &extra.company),
        title: first_non_empty(&base.title, &extra.title),
        emails: opt_vec(unique_strings(
            base.emails
                .iter()
                .flatten()
                .chain(extra.emails.iter().flatten()),
        )),
        phones: merge_labeled(&base.phones, &extra.phones),
        faxes: merge_labeled(&base.faxes, &extra.faxes),
        websites: opt_vec(unique_strings(
            base.websites
                .iter()
                .flatten()
                .chain(extra.websites.iter().flatten()),
        )),
        address: opt_vec(
            addresses
                .into_iter()
                .map(ContactValue::Labeled)
                .collect::<Vec<_>>(),
        )
        .map(AddressField::Entries),
        notes: join_distinct(&base.notes, &extra.notes),
        raw_text: join_distinct(&base.raw_text, &extra.raw_text),
    }
}

/// Adapter for the legacy address shapes: a bare string becomes one
/// unlabeled entry, labeled entries pass through unchanged.
pub fn to_labeled_list(value: Option<&AddressField>) -> Vec<LabeledValue> {
    match value {
        None => Vec::new(),
        Some(AddressField::Text(text)) => vec![LabeledValue::unlabeled(text.clone())],
        Some(AddressField::Entries(entries)) => to_labeled(entries, None),
    }
}

fn first_non_empty(base: &Option<String>, extra: &Option<String>) -> Option<String> {
    base.clone()
        .and_then(opt_string)
        .or_else(|| extra.clone().and_then(opt_string))
}

fn merge_labeled(
    base: &Option<Vec<ContactValue>>,
    extra: &Option<Vec<ContactValue>>,
) -> Option<Vec<ContactValue>> {
    let combined: Vec<LabeledValue> = to_labeled(base.as_deref().unwrap_or(&[]), None)
        .into_iter()
        .chain(to_labeled(extra.as_deref().unwrap_or(&[]), None))
        .collect();
    opt_vec(
        unique_labeled(combined)
            .into_iter()
            .map(ContactValue::Labeled)
            .collect(),
    )
}

/// Distinct non-empty strings joined with a newline, base first.
fn join_distinct(base: &Option<String>, extra: &Option<String>) -> Option<String> {
    opt_string(unique_strings([base.as_deref(), extra.as_deref()].into_iter().flatten()).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: Option<&str>, emails: &[&str]) -> ExtractedContact {
        ExtractedContact {
            name: name.map(str::to_string),
            emails: opt_vec(emails.iter().map(|e| e.to_string()).collect()),
            ..Default::default()
        }
    }

    fn phone(label: Option<&str>, value: &str) -> ContactValue {
        ContactValue::Labeled(LabeledValue {
            label: label.map(str::to_string),
            value: value.to_string(),
        })
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = ExtractedContact {
            name: Some("Ada Lovelace".to_string()),
            emails: Some(vec!["ada@example.com".to_string()]),
            phones: Some(vec![phone(Some("T"), "123")]),
            notes: Some("note".to_string()),
            ..Default::default()
        };
        assert_eq!(merge_contacts(&a, &a), a);
    }

    #[test]
    fn test_scalar_fields_are_left_biased() {
        let a = contact(Some("Ada Lovelace"), &[]);
        let b = contact(Some("A. Lovelace"), &[]);
        assert_eq!(merge_contacts(&a, &b).name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(merge_contacts(&b, &a).name.as_deref(), Some("A. Lovelace"));
    }

    #[test]
    fn test_empty_scalar_is_treated_as_absent() {
        let a = contact(Some(""), &[]);
        let b = contact(Some("Ada Lovelace"), &[]);
        assert_eq!(merge_contacts(&a, &b).name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_sequence_membership_is_commutative() {
        let a = contact(None, &["ada@example.com", "shared@example.com"]);
        let b = contact(None, &["b@example.com", "shared@example.com"]);
        let ab = merge_contacts(&a, &b).emails.unwrap();
        let ba = merge_contacts(&b, &a).emails.unwrap();
        let mut ab_sorted = ab.clone();
        let mut ba_sorted = ba.clone();
        ab_sorted.sort();
        ba_sorted.sort();
        assert_eq!(ab_sorted, ba_sorted);
        assert_eq!(ab.len(), 3);
    }

    #[test]
    fn test_phone_dedup_respects_labels() {
        let a = ExtractedContact {
            phones: Some(vec![phone(None, "123")]),
            ..Default::default()
        };
        let same = merge_contacts(&a, &a).phones.unwrap();
        assert_eq!(same.len(), 1);

        let t = ExtractedContact {
            phones: Some(vec![phone(Some("T"), "123")]),
            ..Default::default()
        };
        let m = ExtractedContact {
            phones: Some(vec![phone(Some("M"), "123")]),
            ..Default::default()
        };
        let merged = merge_contacts(&t, &m).phones.unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_legacy_string_address_merges_with_entries() {
        let a = ExtractedContact {
            address: Some(AddressField::Text("Musterweg 1, Berlin".to_string())),
            ..Default::default()
        };
        let b = ExtractedContact {
            address: Some(AddressField::Entries(vec![phone(
                Some("office"),
                "Alsterweg 3, Hamburg",
            )])),
            ..Default::default()
        };
        let merged = merge_contacts(&a, &b);
        match merged.address {
            Some(AddressField::Entries(entries)) => {
                assert_eq!(entries.len(), 2);
            }
            other => panic!("expected labeled entries, got {:?}", other),
        }
    }

    #[test]
    fn test_notes_join_without_duplicates() {
        let a = ExtractedContact {
            notes: Some("Öffnungszeiten".to_string()),
            ..Default::default()
        };
        let b = ExtractedContact {
            notes: Some("Parkplätze im Hof".to_string()),
            ..Default::default()
        };
        assert_eq!(
            merge_contacts(&a, &b).notes.as_deref(),
            Some("Öffnungszeiten\nParkplätze im Hof")
        );
        assert_eq!(merge_contacts(&a, &a).notes.as_deref(), Some("Öffnungszeiten"));
    }

    #[test]
    fn test_merging_disjoint_contacts_unions_fields() {
        let a = contact(Some("Ada Lovelace"), &["ada@example.com"]);
        let b = ExtractedContact {
            company: Some("Analytical Engines".to_string()),
            websites: Some(vec!["www.example.com".to_string()]),
            ..Default::default()
        };
        let merged = merge_contacts(&a, &b);
        assert_eq!(merged.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(merged.company.as_deref(), Some("Analytical Engines"));
        assert_eq!(merged.websites.unwrap().len(), 1);
        assert_eq!(merged.emails.unwrap().len(), 1);
    }

    #[test]
    fn test_empty_merge_result_stays_absent() {
        let merged = merge_contacts(&ExtractedContact::default(), &ExtractedContact::default());
        assert_eq!(merged, ExtractedContact::default());
    }
}
