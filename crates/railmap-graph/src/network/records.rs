//! Raw station and platform records, shaped like the loader's JSON export.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Service category of a platform. Only rendering cares about it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceKind {
    #[default]
    X,
    Y,
    A,
    Other(String),
}

impl ServiceKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::A => "A",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for ServiceKind {
    fn from(value: String) -> Self {
        match value.trim() {
            "X" => Self::X,
            "Y" => Self::Y,
            "A" => Self::A,
            _ => Self::Other(value),
        }
    }
}

impl From<ServiceKind> for String {
    fn from(value: ServiceKind) -> Self {
        match value {
            ServiceKind::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A directed connection from the owning station to `to`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub to: String,
    #[serde(default, alias = "type")]
    pub kind: ServiceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl PlatformRecord {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: ServiceKind) -> Self {
        self.kind = kind;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub cx: Option<f64>,
    #[serde(default)]
    pub cz: Option<f64>,
    /// Platform id -> outgoing connection.
    #[serde(default)]
    pub platforms: IndexMap<String, PlatformRecord>,
}

impl StationRecord {
    pub fn anchored(cx: f64, cz: f64) -> Self {
        Self {
            cx: Some(cx),
            cz: Some(cz),
            ..Default::default()
        }
    }

    /// Authoritative coordinate in source units, if any.
    ///
    /// A missing component reads as zero, and `(0, 0)` means "no coordinate": the loader
    /// exports blank cells for unsurveyed stations and the origin doubles as the unplaced
    /// sentinel during seeding.
    pub fn fixed_coordinate(&self) -> Option<(f64, f64)> {
        let cx = self.cx.unwrap_or(0.0);
        let cz = self.cz.unwrap_or(0.0);
        if !(cx.is_finite() && cz.is_finite()) || (cx == 0.0 && cz == 0.0) {
            return None;
        }
        Some((cx, cz))
    }

    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.platforms.values().map(|p| p.to.as_str())
    }

    pub fn connects_to(&self, shortcode: &str) -> bool {
        self.destinations().any(|to| to == shortcode)
    }
}
