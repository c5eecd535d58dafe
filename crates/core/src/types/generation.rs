//! Generation records: the AI-produced bundle of listing fields for one
//! uploaded photo.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category names displayed in a fixed order, ahead of any extra fields the
/// backend may add.
pub const CATEGORY_ORDER: &[&str] = &[
    "price",
    "listing_title",
    "description",
    "category",
    "subcategory",
    "length",
    "type",
    "fit",
    "occasion",
    "material",
    "body_fit",
    "condition",
    "color",
    "source",
    "age",
    "style",
];

/// Histogram payload keys that accompany the price estimate but are never
/// shown as listing fields.
const HIDDEN_FIELDS: &[&str] = &["bin_links", "bin_edges", "hist_values"];

/// A single generated listing field: a scalar or a list of tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free-form text (title, description, condition, ...).
    Text(String),
    /// Numeric value (price estimate).
    Number(f64),
    /// A list of tags (style keywords, occasions, ...).
    Tags(Vec<String>),
    /// Anything else the backend sends; kept verbatim.
    Other(serde_json::Value),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Tags(tags) => write!(f, "{}", tags.join(", ")),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Classification of a fetched generation record, before any user gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The backend flagged the generation as failed (model overloaded).
    Error,
    /// The classifier decided the photo does not show clothing.
    NotClothing,
    /// A usable listing was generated.
    Valid,
}

/// One generation: listing fields keyed by category name, plus the uploaded
/// image reference and the backend's error / classification markers.
///
/// While a generation is in flight the record is absent from the user
/// payload; completion is detected purely by its appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    /// Object key of the photo this generation was produced from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pic_url: Option<String>,

    /// Error marker. The backend is loose about the shape here (boolean,
    /// message string, ...), so any truthy value counts as an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,

    /// Whether the classifier recognized the photo as clothing. Absent on
    /// older records, which are treated as clothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_clothing: Option<bool>,

    /// Listing fields keyed by category name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Generation {
    /// Whether the backend flagged this generation as failed.
    ///
    /// Mirrors the loose truthiness the backend relies on: absent, `null`,
    /// `false`, `0`, and `""` all mean "no error".
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.as_ref().is_some_and(is_truthy)
    }

    /// Classify this record in isolation from any user state.
    #[must_use]
    pub fn outcome(&self) -> RecordOutcome {
        if self.has_error() {
            RecordOutcome::Error
        } else if self.is_clothing == Some(false) {
            RecordOutcome::NotClothing
        } else {
            RecordOutcome::Valid
        }
    }

    /// Look up a single listing field by category name.
    #[must_use]
    pub fn field(&self, category: &str) -> Option<&FieldValue> {
        self.fields.get(category)
    }

    /// Listing fields in display order: the known categories first, in
    /// [`CATEGORY_ORDER`], then any extra fields the backend added, minus
    /// the histogram payload.
    #[must_use]
    pub fn display_fields(&self) -> Vec<(&str, &FieldValue)> {
        let mut out: Vec<(&str, &FieldValue)> = CATEGORY_ORDER
            .iter()
            .filter_map(|&category| self.fields.get(category).map(|v| (category, v)))
            .collect();

        out.extend(
            self.fields
                .iter()
                .filter(|(name, _)| {
                    !CATEGORY_ORDER.contains(&name.as_str())
                        && !HIDDEN_FIELDS.contains(&name.as_str())
                })
                .map(|(name, value)| (name.as_str(), value)),
        );

        out
    }
}

/// JavaScript-style truthiness, which is what the original backend contract
/// assumes for the `error` marker.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Generation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_full_record() {
        let generation = record(json!({
            "pic_url": "upload-u1.jpg",
            "price": 24.5,
            "listing_title": "Off-White, Anything Tee",
            "description": "Lightly worn off-white t-shirt in great condition.",
            "style": ["casual", "streetwear"],
        }));

        assert_eq!(generation.pic_url.as_deref(), Some("upload-u1.jpg"));
        assert_eq!(
            generation.field("price"),
            Some(&FieldValue::Number(24.5))
        );
        assert_eq!(
            generation.field("style"),
            Some(&FieldValue::Tags(vec![
                "casual".to_owned(),
                "streetwear".to_owned()
            ]))
        );
        assert_eq!(generation.outcome(), RecordOutcome::Valid);
    }

    #[test]
    fn test_error_marker_truthiness() {
        assert!(record(json!({ "error": true })).has_error());
        assert!(record(json!({ "error": "model overloaded" })).has_error());
        assert!(record(json!({ "error": 1 })).has_error());

        assert!(!record(json!({ "error": false })).has_error());
        assert!(!record(json!({ "error": null })).has_error());
        assert!(!record(json!({ "error": "" })).has_error());
        assert!(!record(json!({ "error": 0 })).has_error());
        assert!(!record(json!({})).has_error());
    }

    #[test]
    fn test_error_wins_over_other_markers() {
        let generation = record(json!({
            "error": true,
            "is_clothing": false,
            "price": 10,
        }));
        assert_eq!(generation.outcome(), RecordOutcome::Error);
    }

    #[test]
    fn test_not_clothing() {
        assert_eq!(
            record(json!({ "is_clothing": false })).outcome(),
            RecordOutcome::NotClothing
        );
        // Absent marker means the classifier predates the check.
        assert_eq!(record(json!({})).outcome(), RecordOutcome::Valid);
        assert_eq!(
            record(json!({ "is_clothing": true })).outcome(),
            RecordOutcome::Valid
        );
    }

    #[test]
    fn test_display_fields_order_and_hidden_keys() {
        let generation = record(json!({
            "pic_url": "upload-u1.png",
            "description": "A jacket.",
            "price": 30,
            "brand_confidence": "high",
            "bin_edges": [0, 10, 20],
            "hist_values": [1, 2],
            "bin_links": ["a"],
        }));

        let names: Vec<&str> = generation
            .display_fields()
            .iter()
            .map(|(name, _)| *name)
            .collect();

        // Known categories first in canonical order, extras after, histogram
        // payload and pic_url never shown.
        assert_eq!(names, vec!["price", "description", "brand_confidence"]);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("Like new".to_owned()).to_string(), "Like new");
        assert_eq!(FieldValue::Number(24.5).to_string(), "24.5");
        assert_eq!(
            FieldValue::Tags(vec!["casual".to_owned(), "y2k".to_owned()]).to_string(),
            "casual, y2k"
        );
    }

    #[test]
    fn test_serde_roundtrip_keeps_flattened_fields() {
        let generation = record(json!({
            "pic_url": "upload-u1.jpg",
            "listing_title": "Tee",
        }));
        let json = serde_json::to_value(&generation).unwrap();
        assert_eq!(json["listing_title"], "Tee");
        assert_eq!(json["pic_url"], "upload-u1.jpg");
    }
}
