//! Recommended spot model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Category tag of a spot. Costing and scoring key off this.
///
/// Known tags match exactly; anything else, including other casings, is kept
/// verbatim as `Other`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum SpotKind {
    Museum,
    Beach,
    Park,
    Market,
    Tour,
    Garden,
    Cafe,
    Brewery,
    Mall,
    Walking,
    /// Any free-form tag, e.g. from the generative service
    Other(String),
}

impl SpotKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SpotKind::Museum => "museum",
            SpotKind::Beach => "beach",
            SpotKind::Park => "park",
            SpotKind::Market => "market",
            SpotKind::Tour => "tour",
            SpotKind::Garden => "garden",
            SpotKind::Cafe => "cafe",
            SpotKind::Brewery => "brewery",
            SpotKind::Mall => "mall",
            SpotKind::Walking => "walking",
            SpotKind::Other(tag) => tag,
        }
    }
}

impl From<String> for SpotKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "museum" => SpotKind::Museum,
            "beach" => SpotKind::Beach,
            "park" => SpotKind::Park,
            "market" => SpotKind::Market,
            "tour" => SpotKind::Tour,
            "garden" => SpotKind::Garden,
            "cafe" => SpotKind::Cafe,
            "brewery" => SpotKind::Brewery,
            "mall" => SpotKind::Mall,
            "walking" => SpotKind::Walking,
            _ => SpotKind::Other(tag),
        }
    }
}

impl From<SpotKind> for String {
    fn from(kind: SpotKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SpotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_kind() -> SpotKind {
    SpotKind::Tour
}

// null and absent are treated alike
fn kind_or_default<'de, D>(deserializer: D) -> Result<SpotKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map_or_else(default_kind, SpotKind::from))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A place to visit, in display order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecommendedSpot {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(rename = "type", default = "default_kind", deserialize_with = "kind_or_default")]
    pub kind: SpotKind,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub reason: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub best_time: String,
}

impl RecommendedSpot {
    #[must_use]
    pub fn new(name: &str, kind: SpotKind, reason: &str, best_time: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            reason: reason.to_string(),
            best_time: best_time.to_string(),
        }
    }
}
