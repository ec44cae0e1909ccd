//! Flat primary-field projection used for list and search display.

use shared_types::{ExtractedContact, NormalizedContact};

use crate::values::to_labeled;

/// Project an [`ExtractedContact`] onto its primary fields. Pure read-only
/// derivation; absent source fields stay absent.
pub fn normalize_contact(contact: &ExtractedContact) -> NormalizedContact {
    let phones = to_labeled(contact.phones.as_deref().unwrap_or(&[]), None);

    NormalizedContact {
        full_name: contact.name.clone(),
        company: contact.company.clone(),
        title: contact.title.clone(),
        primary_email: contact
            .emails
            .as_ref()
            .and_then(|emails| emails.first())
            .cloned(),
        primary_phone: phones.first().map(|phone| phone.value.clone()),
        primary_website: contact
            .websites
            .as_ref()
            .and_then(|websites| websites.first())
            .cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr_text::extract_contact_from_text;
    use shared_types::ContactValue;

    #[test]
    fn test_projection_takes_first_entries() {
        let contact = ExtractedContact {
            name: Some("Ada Lovelace".to_string()),
            emails: Some(vec![
                "ada@example.com".to_string(),
                "lovelace@example.com".to_string(),
            ]),
            phones: Some(vec![ContactValue::Text("+1 202 555 0123".to_string())]),
            websites: Some(vec!["www.example.com".to_string()]),
            ..Default::default()
        };
        let normalized = normalize_contact(&contact);
        assert_eq!(normalized.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(normalized.primary_email.as_deref(), Some("ada@example.com"));
        assert_eq!(normalized.primary_phone.as_deref(), Some("+1 202 555 0123"));
        assert_eq!(normalized.primary_website.as_deref(), Some("www.example.com"));
    }

    #[test]
    fn test_absent_fields_project_to_absent() {
        let normalized = normalize_contact(&ExtractedContact::default());
        assert_eq!(normalized, NormalizedContact::default());
    }

    #[test]
    fn test_round_trip_with_classifier() {
        let contact = extract_contact_from_text("Ada Lovelace\nada@example.com");
        let normalized = normalize_contact(&contact);
        assert_eq!(
            normalized.primary_email,
            contact.emails.as_ref().map(|emails| emails[0].clone())
        );
    }
}
