//! Error types for blueprint stamping.

use crate::host::HostError;

/// Errors that can occur while parsing, patching, or stamping a blueprint.
#[derive(Debug, thiserror::Error)]
pub enum BlueprintError {
    /// Orientation code is malformed (wrong length, bad letter, repeated axis).
    #[error("invalid orientation code '{code}': {detail}")]
    InvalidOrientation {
        /// The code as written.
        code: String,
        /// Description of the problem.
        detail: String,
    },

    /// A two-character code was used on a stack with more than one layer.
    #[error("orientation code '{code}' has no layer axis but the stack has {layers} layers")]
    LayerAxisUnmapped { code: String, layers: usize },

    /// A slice character has no legend entry.
    #[error("character '{ch}' at layer {layer}, row {row}, column {column} is not in the legend")]
    UnmappedCharacter {
        ch: char,
        layer: usize,
        row: usize,
        column: usize,
    },

    /// A legend key in a blueprint file is not exactly one character.
    #[error("legend key '{key}' must be a single character")]
    InvalidLegendKey { key: String },

    /// A blueprint file gives both or neither of `layers` and `rows`.
    #[error("blueprint must define exactly one of `layers` or `rows`")]
    MissingSlices,

    /// Space cannot be given a legend entry.
    #[error("the space character is reserved for empty cells")]
    ReservedCharacter,

    /// A patch addresses a layer or row the stack does not have.
    #[error("patch target layer {layer}, row {row} is outside the slice stack")]
    PatchOutOfRange { layer: usize, row: usize },

    /// The host rejected a primitive call.
    #[error(transparent)]
    Host(#[from] HostError),

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A plan could not be encoded for digesting.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading blueprint files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for blueprint operations.
pub type Result<T> = std::result::Result<T, BlueprintError>;
