pub mod contact;
pub mod ocr;

pub use contact::{
    AddressField, ContactValue, ExtractedContact, LabeledValue, NormalizedContact,
};
pub use ocr::{BoundingBox, OcrBox, OcrBoxLevel, OcrDimensions};
