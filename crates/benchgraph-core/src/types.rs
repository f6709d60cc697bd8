//! Core domain types for the benchgraph drive catalog.
//!
//! These types represent nodes and relationships in the catalog graph:
//! drives, the controllers they ship with, benchmark runs recorded against
//! them, and the individual measured values of each run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Identifier of a node, assigned by the graph store at creation.
///
/// Never generated client-side and never changes after creation.
pub type NodeId = i64;

// ── Node Types ────────────────────────────────────────────────────

/// A storage drive. Root entity of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    pub id: NodeId,
    pub name: Option<String>,
    pub model: Option<String>,
    pub vendor: Option<String>,
    /// Capacity in GB.
    pub capacity: Option<f64>,
    /// Server-assigned creation time, epoch milliseconds.
    pub created_at: Option<i64>,
}

/// A drive controller, linked from the drive(s) it was created for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub id: NodeId,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<i64>,
}

/// A named benchmark run. `name` is its merge key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    pub id: NodeId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<i64>,
}

/// A single measured result. `(record_type, name)` is its merge key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredValue {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: RecordName,
    pub unit: RecordUnit,
    pub value: f64,
    pub created_at: Option<i64>,
}

// ── Create Inputs ─────────────────────────────────────────────────

/// Attributes of a drive to insert. Always creates a new node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDrive {
    pub name: String,
    pub model: String,
    pub vendor: String,
    pub capacity: f64,
}

/// Attributes of a controller to insert, optionally linked from a drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewController {
    pub drive_id: Option<NodeId>,
    pub model: String,
    pub vendor: String,
    pub description: String,
}

/// A benchmark run and its records, merged onto a drive in one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBenchmarkRun {
    pub drive_id: NodeId,
    pub name: String,
    pub description: String,
    pub records: Vec<NewMeasuredValue>,
}

/// One measured value to merge under a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "graphql",
    derive(async_graphql::InputObject),
    graphql(name = "RecordValueInput")
)]
pub struct NewMeasuredValue {
    #[serde(rename = "type")]
    #[cfg_attr(feature = "graphql", graphql(name = "type"))]
    pub record_type: RecordType,
    pub name: RecordName,
    pub unit: RecordUnit,
    pub value: f64,
}

/// Flat drive payload accepted by the legacy insert endpoint.
///
/// Carries fields (`interface`, `date`, `price`) that the typed schema
/// never exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyDrivePayload {
    pub name: String,
    pub model: String,
    pub vendor: String,
    /// Storage GB.
    pub capacity: i64,
    /// Interface type (typec, sata, usb, ...).
    pub interface: String,
    /// Release date.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in RMB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

// ── Graph Vocabulary ──────────────────────────────────────────────

/// Node labels used in the graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Drive,
    Controller,
    BenchmarkRun,
    MeasuredValue,
}

impl Label {
    /// The label as stored in the graph.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Drive => "Driver",
            Label::Controller => "ControllerMeta",
            Label::BenchmarkRun => "ASSSDBenchMark",
            Label::MeasuredValue => "RecordValue",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed relationship types. Each one connects exactly one pair of labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Drive → Controller
    Controller,
    /// Drive → BenchmarkRun
    BenchmarkRun,
    /// BenchmarkRun → MeasuredValue
    MeasuredValue,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Controller => "CONTROLLER_META",
            Relationship::BenchmarkRun => "ASSSD_BENCHMARK",
            Relationship::MeasuredValue => "RECORD_VALUE",
        }
    }

    /// `(from, to)` labels this relationship connects.
    pub fn endpoints(&self) -> (Label, Label) {
        match self {
            Relationship::Controller => (Label::Drive, Label::Controller),
            Relationship::BenchmarkRun => (Label::Drive, Label::BenchmarkRun),
            Relationship::MeasuredValue => (Label::BenchmarkRun, Label::MeasuredValue),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Enums ─────────────────────────────────────────────────────────

/// Generates `as_str`, `FromStr` and `Display` from one string table so the
/// stored representation of each variant is defined exactly once.
macro_rules! canonical_strings {
    ($ty:ident, $kind:literal, { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Canonical representation used as a store parameter.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $s),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok($ty::$variant),)+
                    other => Err(CatalogError::InvalidEnum {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    Read,
    Write,
    Mix,
}

canonical_strings!(RecordType, "record type", {
    Read => "READ",
    Write => "WRITE",
    Mix => "MIX",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordUnit {
    Iops,
    Mbps,
    Latency,
}

canonical_strings!(RecordUnit, "record unit", {
    Iops => "IOPS",
    Mbps => "MBPS",
    Latency => "LATENCY",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordName {
    Seq,
    Rand,
    SeqLatency,
    RandLatency,
}

canonical_strings!(RecordName, "record name", {
    Seq => "SEQ",
    Rand => "RAND",
    SeqLatency => "SEQ_LATENCY",
    RandLatency => "RAND_LATENCY",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_strings_roundtrip() {
        for t in RecordType::ALL {
            assert_eq!(t.as_str().parse::<RecordType>().unwrap(), *t);
        }
        for u in RecordUnit::ALL {
            assert_eq!(u.as_str().parse::<RecordUnit>().unwrap(), *u);
        }
        for n in RecordName::ALL {
            assert_eq!(n.as_str().parse::<RecordName>().unwrap(), *n);
        }
    }

    #[test]
    fn serde_matches_store_representation() {
        for n in RecordName::ALL {
            let json = serde_json::to_string(n).unwrap();
            assert_eq!(json, format!("\"{}\"", n.as_str()));
        }
        let json = serde_json::to_string(&RecordUnit::Mbps).unwrap();
        assert_eq!(json, "\"MBPS\"");
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let err = "seq".parse::<RecordName>().unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidEnum {
                kind: "record name",
                value: "seq".to_string()
            }
        );
    }

    #[test]
    fn relationships_connect_distinct_label_pairs() {
        let all = [
            Relationship::Controller,
            Relationship::BenchmarkRun,
            Relationship::MeasuredValue,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.endpoints(), b.endpoints());
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn legacy_payload_optional_fields_default() {
        let payload: LegacyDrivePayload = serde_json::from_str(
            r#"{"name":"970","model":"EVO","vendor":"Samsung","capacity":500,
                "interface":"nvme","date":"2018-04"}"#,
        )
        .unwrap();
        assert_eq!(payload.description, None);
        assert_eq!(payload.price, None);
    }
}
