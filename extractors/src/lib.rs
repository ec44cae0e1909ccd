//! Extractors Crate
//!
//! This crate turns raw, noisy business-card input (OCR text per card side,
//! decoded QR payloads) into structured contact records. It is pure,
//! synchronous computation over in-memory strings; acquisition and
//! persistence live with the callers.
//!
//! # Architecture
//!
//! - **Types**: Contact and OCR geometry types are defined in the
//!   `shared-types` crate
//! - **Implementations**: The pattern library, classifier, QR parser and
//!   merger are implemented in this crate
//!
//! # Pipeline
//!
//! OCR text goes through [`extract_contact_from_text`], QR payloads through
//! [`extract_contact_from_qr_payload`]; the partial results from front, back
//! and QR are combined with [`merge_contacts`] and projected for display
//! with [`normalize_contact`].

pub mod merge;
pub mod normalize;
pub mod ocr_boxes;
pub mod ocr_text;
pub mod patterns;
pub mod qr_payload;
mod values;

// Re-export the public extraction surface
pub use merge::{merge_contacts, to_labeled_list};
pub use normalize::normalize_contact;
pub use ocr_boxes::{extract_ocr_boxes, extract_ocr_dimensions};
pub use ocr_text::extract_contact_from_text;
pub use qr_payload::extract_contact_from_qr_payload;
