//! Small list helpers shared by the classifier, merger and projector.

use std::collections::HashSet;

use shared_types::{ContactValue, LabeledValue};

/// Trim entries, drop empties and deduplicate case-insensitively while
/// preserving first-seen order.
pub(crate) fn unique_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            result.push(trimmed.to_string());
        }
    }
    result
}

/// Deduplicate by case-insensitive `(label, value)`, keeping the first-seen
/// label when the same value recurs.
pub(crate) fn unique_labeled<I>(values: I) -> Vec<LabeledValue>
where
    I: IntoIterator<Item = LabeledValue>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for value in values {
        if seen.insert(value.dedup_key()) {
            result.push(value);
        }
    }
    result
}

/// Normalize mixed-shape entries to labeled values, applying `fallback` to
/// entries that carry no label of their own.
pub(crate) fn to_labeled(values: &[ContactValue], fallback: Option<&str>) -> Vec<LabeledValue> {
    values
        .iter()
        .map(|entry| match entry {
            ContactValue::Text(value) => LabeledValue {
                label: fallback.map(str::to_string),
                value: value.clone(),
            },
            ContactValue::Labeled(labeled) => LabeledValue {
                label: labeled
                    .label
                    .clone()
                    .filter(|label| !label.is_empty())
                    .or_else(|| fallback.map(str::to_string)),
                value: labeled.value.clone(),
            },
        })
        .collect()
}

/// Absent and empty sequences are equivalent; collapse to `None`.
pub(crate) fn opt_vec<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Absent and empty strings are equivalent; collapse to `None`.
pub(crate) fn opt_string(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_strings_case_insensitive() {
        let values = unique_strings(["info@acme.com", " INFO@acme.com ", "", "sales@acme.com"]);
        assert_eq!(values, vec!["info@acme.com", "sales@acme.com"]);
    }

    #[test]
    fn test_unique_labeled_distinct_labels_are_distinct_keys() {
        let values = unique_labeled([
            LabeledValue {
                label: Some("T".to_string()),
                value: "123".to_string(),
            },
            LabeledValue {
                label: Some("M".to_string()),
                value: "123".to_string(),
            },
            LabeledValue {
                label: Some("t".to_string()),
                value: "123".to_string(),
            },
        ]);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_to_labeled_applies_fallback() {
        let values = to_labeled(
            &[
                ContactValue::Text("123".to_string()),
                ContactValue::Labeled(LabeledValue {
                    label: Some("branch".to_string()),
                    value: "456".to_string(),
                }),
            ],
            Some("office"),
        );
        assert_eq!(values[0].label.as_deref(), Some("office"));
        assert_eq!(values[1].label.as_deref(), Some("branch"));
    }
}
