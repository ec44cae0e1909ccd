use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Granularity of a recognized text region, guessed from where the region
/// sat inside the provider payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum OcrBoxLevel {
    Line,
    Word,
    Block,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One recognized text region from a raw OCR provider payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OcrBox {
    pub id: String,
    pub text: String,
    pub level: OcrBoxLevel,
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OcrDimensions {
    pub width: f64,
    pub height: f64,
}
