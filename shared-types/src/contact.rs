use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A contact channel value optionally tagged with the context it was found
/// in, e.g. which office or branch a phone number belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabeledValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: String,
}

impl LabeledValue {
    pub fn unlabeled(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
        }
    }

    /// Case-insensitive deduplication key over `(label, value)`.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.label.as_deref().unwrap_or(""), self.value).to_lowercase()
    }
}

/// Either a bare string (legacy shape) or a labeled value. Phones, faxes and
/// address entries arrive in both shapes depending on the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ContactValue {
    Text(String),
    Labeled(LabeledValue),
}

/// The address field carries two legacy shapes: a single free-text string
/// (QR vCards) or one entry per distinct physical location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AddressField {
    Text(String),
    Entries(Vec<ContactValue>),
}

/// Structured contact record produced from one OCR or QR source and merged
/// across card sides. Absent fields are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<ContactValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faxes: Option<Vec<ContactValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub websites: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

/// Flat projection of an [`ExtractedContact`] used for list and search
/// display. Recomputed whenever the source record changes, never edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormalizedContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_website: Option<String>,
}
