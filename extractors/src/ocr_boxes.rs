//! Best-effort recovery of positioned text regions from a raw OCR provider
//! payload. Providers disagree on shape, so this walks arbitrary JSON and
//! recognizes the handful of text/geometry conventions seen in the wild.

use std::collections::HashSet;

use serde_json::Value;
use shared_types::{BoundingBox, OcrBox, OcrBoxLevel, OcrDimensions};

const TEXT_KEYS: &[&str] = &["text", "content", "value", "utf8", "word", "line"];
const BOX_KEYS: &[&str] = &[
    "bbox",
    "bounding_box",
    "boundingBox",
    "box",
    "bounds",
    "rect",
    "rectangle",
    "polygon",
];

struct BoxCandidate {
    text: String,
    level: OcrBoxLevel,
    bbox: BoundingBox,
}

/// Collect every text region with usable geometry from `raw`, deduplicated
/// by `(text, geometry)`. Unrecognized payloads yield an empty list.
pub fn extract_ocr_boxes(raw: &Value) -> Vec<OcrBox> {
    let mut candidates = Vec::new();
    walk(raw, &mut Vec::new(), &mut candidates);

    let mut seen = HashSet::new();
    let mut boxes = Vec::new();
    for (index, candidate) in candidates.into_iter().enumerate() {
        let key = format!(
            "{}:{}:{}:{}:{}",
            candidate.text,
            candidate.bbox.x,
            candidate.bbox.y,
            candidate.bbox.width,
            candidate.bbox.height
        );
        if seen.insert(key) {
            boxes.push(OcrBox {
                id: format!("box-{}", index),
                text: candidate.text,
                level: candidate.level,
                bbox: candidate.bbox,
            });
        }
    }
    boxes
}

/// Page dimensions from a `pages[0].dimensions` payload, when present.
pub fn extract_ocr_dimensions(raw: &Value) -> Option<OcrDimensions> {
    let pages = raw.get("pages")?.as_array()?;
    let dims = pages.first()?.get("dimensions")?;
    let width = dims.get("width").and_then(to_number).filter(|w| *w != 0.0)?;
    let height = dims.get("height").and_then(to_number).filter(|h| *h != 0.0)?;
    Some(OcrDimensions { width, height })
}

fn walk(node: &Value, path: &mut Vec<String>, out: &mut Vec<BoxCandidate>) {
    match node {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                walk(item, path, out);
                path.pop();
            }
        }
        Value::Object(map) => {
            if let Some(text) = node_text(node) {
                let bbox = BOX_KEYS
                    .iter()
                    .find_map(|key| map.get(*key).and_then(parse_box_value))
                    .filter(|bbox| bbox.width > 0.0 && bbox.height > 0.0);
                if let Some(bbox) = bbox {
                    out.push(BoxCandidate {
                        text,
                        level: guess_level(path),
                        bbox,
                    });
                }
            }
            for (key, value) in map {
                if value.is_object() || value.is_array() {
                    path.push(key.clone());
                    walk(value, path, out);
                    path.pop();
                }
            }
        }
        _ => {}
    }
}

fn node_text(node: &Value) -> Option<String> {
    let candidate = TEXT_KEYS.iter().find_map(|key| {
        node.get(*key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    })?;
    let trimmed = candidate.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 240 {
        return None;
    }
    Some(trimmed.to_string())
}

fn guess_level(path: &[String]) -> OcrBoxLevel {
    let joined = path.join(".").to_lowercase();
    if joined.contains("word") {
        OcrBoxLevel::Word
    } else if joined.contains("line") {
        OcrBoxLevel::Line
    } else if joined.contains("block") {
        OcrBoxLevel::Block
    } else {
        OcrBoxLevel::Unknown
    }
}

fn to_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// First present non-null key, JS `??`-style: a present but non-numeric
/// value stops the search.
fn pick(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<f64> {
    for key in keys {
        if let Some(value) = map.get(*key) {
            if !value.is_null() {
                return to_number(value);
            }
        }
    }
    None
}

fn parse_array_box(values: &[f64]) -> Option<BoundingBox> {
    if values.len() < 4 {
        return None;
    }
    let (a, b, c, d) = (values[0], values[1], values[2], values[3]);
    if c > a && d > b {
        return Some(BoundingBox {
            x: a,
            y: b,
            width: c - a,
            height: d - b,
        });
    }
    if c >= 0.0 && d >= 0.0 {
        return Some(BoundingBox {
            x: a,
            y: b,
            width: c,
            height: d,
        });
    }
    None
}

fn parse_box_value(value: &Value) -> Option<BoundingBox> {
    match value {
        Value::Array(items) => {
            // Flat numeric array: either [x, y, w, h] or [x0, y0, x1, y1].
            let numbers: Vec<f64> = items.iter().filter_map(to_number).collect();
            if numbers.len() == items.len() {
                return parse_array_box(&numbers);
            }

            // Mixed array with nested coordinate pairs, e.g. [[x0,y0],[x1,y1]].
            if items.len() >= 4 && items[0].is_number() {
                let flat: Vec<f64> = items
                    .iter()
                    .flat_map(|item| match item {
                        Value::Array(inner) => inner.iter().filter_map(to_number).collect(),
                        _ => to_number(item).into_iter().collect::<Vec<_>>(),
                    })
                    .collect();
                if flat.len() >= 4 {
                    return parse_array_box(&flat);
                }
            }

            // Vertex points with x/y members.
            if items.len() >= 2 && items[0].is_object() {
                let xs: Vec<f64> = items
                    .iter()
                    .filter_map(|point| point.get("x"))
                    .filter_map(to_number)
                    .collect();
                let ys: Vec<f64> = items
                    .iter()
                    .filter_map(|point| point.get("y"))
                    .filter_map(to_number)
                    .collect();
                if !xs.is_empty() && !ys.is_empty() {
                    let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
                    let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
                    let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    return Some(BoundingBox {
                        x: min_x,
                        y: min_y,
                        width: max_x - min_x,
                        height: max_y - min_y,
                    });
                }
            }
            None
        }
        Value::Object(map) => {
            let x = pick(map, &["x", "left", "x0", "minX"]);
            let y = pick(map, &["y", "top", "y0", "minY"]);
            let width = map.get("width").and_then(to_number);
            let height = map.get("height").and_then(to_number);
            let right = pick(map, &["right", "x1", "maxX"]);
            let bottom = pick(map, &["bottom", "y1", "maxY"]);

            if let (Some(x), Some(y), Some(width), Some(height)) = (x, y, width, height) {
                return Some(BoundingBox {
                    x,
                    y,
                    width,
                    height,
                });
            }
            if let (Some(x), Some(y), Some(right), Some(bottom)) = (x, y, right, bottom) {
                return Some(BoundingBox {
                    x,
                    y,
                    width: right - x,
                    height: bottom - y,
                });
            }
            if let Some(vertices) = map
                .get("vertices")
                .filter(|v| v.is_array())
                .or_else(|| map.get("polygon").filter(|v| v.is_array()))
            {
                return parse_box_value(vertices);
            }
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_boxes_from_nested_pages() {
        let raw = json!({
            "pages": [{
                "blocks": [{
                    "lines": [
                        { "text": "Acme GmbH", "bbox": [10.0, 10.0, 120.0, 30.0] },
                        { "text": "Musterweg 1", "bbox": [10.0, 40.0, 140.0, 60.0] }
                    ]
                }]
            }]
        });
        let boxes = extract_ocr_boxes(&raw);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].text, "Acme GmbH");
        assert_eq!(boxes[0].level, OcrBoxLevel::Line);
        // [x0, y0, x1, y1] converts to width/height
        assert_eq!(boxes[0].bbox.width, 110.0);
        assert_eq!(boxes[0].bbox.height, 20.0);
    }

    #[test]
    fn test_object_box_with_ltrb_keys() {
        let raw = json!({
            "words": [
                { "word": "Acme", "boundingBox": { "x0": 5.0, "y0": 5.0, "x1": 45.0, "y1": 20.0 } }
            ]
        });
        let boxes = extract_ocr_boxes(&raw);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].level, OcrBoxLevel::Word);
        assert_eq!(boxes[0].bbox.width, 40.0);
    }

    #[test]
    fn test_vertex_polygon_box() {
        let raw = json!({
            "lines": [{
                "content": "Acme",
                "polygon": [
                    { "x": 0.0, "y": 0.0 },
                    { "x": 50.0, "y": 0.0 },
                    { "x": 50.0, "y": 12.0 },
                    { "x": 0.0, "y": 12.0 }
                ]
            }]
        });
        let boxes = extract_ocr_boxes(&raw);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].bbox.width, 50.0);
        assert_eq!(boxes[0].bbox.height, 12.0);
    }

    #[test]
    fn test_duplicate_regions_are_dropped() {
        let raw = json!({
            "lines": [
                { "text": "Acme", "bbox": [0.0, 0.0, 10.0, 10.0] },
                { "text": "Acme", "bbox": [0.0, 0.0, 10.0, 10.0] }
            ]
        });
        assert_eq!(extract_ocr_boxes(&raw).len(), 1);
    }

    #[test]
    fn test_text_without_geometry_is_ignored() {
        let raw = json!({ "text": "no box here", "pages": [] });
        assert!(extract_ocr_boxes(&raw).is_empty());
    }

    #[test]
    fn test_overlong_text_is_ignored() {
        let raw = json!({
            "lines": [{ "text": "x".repeat(300), "bbox": [0.0, 0.0, 10.0, 10.0] }]
        });
        assert!(extract_ocr_boxes(&raw).is_empty());
    }

    #[test]
    fn test_dimensions_from_first_page() {
        let raw = json!({ "pages": [{ "dimensions": { "width": 1200, "height": 800 } }] });
        assert_eq!(
            extract_ocr_dimensions(&raw),
            Some(OcrDimensions {
                width: 1200.0,
                height: 800.0
            })
        );
        assert_eq!(extract_ocr_dimensions(&json!({ "pages": [] })), None);
        assert_eq!(extract_ocr_dimensions(&json!("not an object")), None);
    }
}
