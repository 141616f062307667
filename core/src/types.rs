//! Domain records returned by the PharmVar API.
//!
//! # Design
//! Field names follow Rust conventions; the serde attributes map them to the
//! camelCase keys used on the wire. Every named key must be present in a
//! record, so a truncated record fails to decode instead of silently
//! producing blanks. Any of them may be `null`. Keys the struct does not
//! name are kept in `extra` and written back by `to_record`.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single PharmVar variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// HGVS description of the variant.
    #[serde(deserialize_with = "Option::deserialize")]
    pub hgvs: Option<String>,
    /// Amino acid impact, when the variant has one.
    #[serde(deserialize_with = "Option::deserialize")]
    pub impact: Option<String>,
    /// Position string as stored by PharmVar.
    #[serde(deserialize_with = "Option::deserialize")]
    pub position: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub reference_collections: Option<Vec<String>>,
    /// Reference location type that defines where position counting starts.
    #[serde(deserialize_with = "Option::deserialize")]
    pub reference_location: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub reference_sequence: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub rs_id: Option<String>,
    /// PharmVar page for the variant.
    #[serde(deserialize_with = "Option::deserialize")]
    pub url: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub variant_frequency: Option<Vec<Value>>,
    /// Transient identifier linking positions of the same variant across
    /// reference sequences.
    #[serde(deserialize_with = "Option::deserialize")]
    pub variant_id: Option<String>,
    /// Keys sent by the service that have no field above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Variant {
    /// Decode a variant from one JSON record.
    pub fn from_record(record: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(record)
    }

    /// Encode the variant back into its JSON record.
    pub fn to_record(&self) -> Value {
        // String keys and JSON values only: serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show(field: &Option<String>) -> &str {
            field.as_deref().unwrap_or("-")
        }
        write!(
            f,
            "Variant(hgvs={}, impact={}, position={}, reference_sequence={}, rs_id={}, variant_id={})",
            show(&self.hgvs),
            show(&self.impact),
            show(&self.position),
            show(&self.reference_sequence),
            show(&self.rs_id),
            show(&self.variant_id),
        )
    }
}

/// Ordered variants from one response, in the order the service sent them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantCollection {
    variants: Vec<Variant>,
}

impl VariantCollection {
    /// Decode every record, failing on the first one that does not match the
    /// variant shape.
    pub fn from_records(records: Vec<Value>) -> Result<Self, serde_json::Error> {
        records
            .into_iter()
            .map(Variant::from_record)
            .collect::<Result<Vec<_>, _>>()
            .map(|variants| Self { variants })
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Variant> {
        self.variants.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variant> {
        self.variants.iter()
    }

    /// Variants that carry an amino acid impact.
    pub fn with_impact(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(|v| v.impact.is_some())
    }

    pub fn into_vec(self) -> Vec<Variant> {
        self.variants
    }
}

impl Index<usize> for VariantCollection {
    type Output = Variant;

    fn index(&self, index: usize) -> &Variant {
        &self.variants[index]
    }
}

impl From<Vec<Variant>> for VariantCollection {
    fn from(variants: Vec<Variant>) -> Self {
        Self { variants }
    }
}

impl FromIterator<Variant> for VariantCollection {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        Self {
            variants: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for VariantCollection {
    type Item = Variant;
    type IntoIter = std::vec::IntoIter<Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariantCollection {
    type Item = &'a Variant;
    type IntoIter = std::slice::Iter<'a, Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}
