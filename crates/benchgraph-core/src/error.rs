use thiserror::Error;

/// Top-level error type for the benchgraph domain layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid {kind} value: {value:?}")]
    InvalidEnum { kind: &'static str, value: String },

    #[error("Missing property {property} on {label} node {id}")]
    MissingProperty {
        label: &'static str,
        property: &'static str,
        id: i64,
    },
}
