/// Error types for scene edits and model persistence
use thiserror::Error;

use crate::scene::SceneGraph;

/// Errors from index-addressed scene edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("no parts or element with index {0}")]
    NotFound(usize),

    /// The index names an element where a parts node is required.
    #[error("index {0} is not a parts node")]
    NotParts(usize),

    /// The index names a parts node where an element is required.
    #[error("index {0} is not an element")]
    NotElement(usize),
}

/// Errors while decoding persisted records.
///
/// `record` fields are 1-indexed positions in the record list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Malformed comma-separated text.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("record {record}: expected {expected}, found {found:?}")]
    UnexpectedTag {
        record: usize,
        expected: &'static str,
        found: String,
    },

    #[error("record {record}: missing field {field}")]
    MissingField { record: usize, field: &'static str },

    #[error("record {record}: invalid number {value:?}")]
    InvalidNumber { record: usize, value: String },

    #[error("unknown primitive {0:?}")]
    UnknownPrimitive(String),

    #[error("unknown construction plane {0:?}")]
    UnknownPlane(String),

    #[error("unknown topology {0:?}")]
    UnknownTopology(String),

    #[error("unknown color {0:?}")]
    UnknownColor(String),

    /// Arc segment count of zero or above the configured limit.
    #[error("record {record}: arc divisions {divisions} outside 1..={max}")]
    ArcDivisions {
        record: usize,
        divisions: usize,
        max: usize,
    },

    /// Matrix record that is not 4×4 or has the wrong number of values.
    #[error("record {record}: invalid matrix")]
    InvalidMatrix { record: usize },

    #[error("records ended before {expected}")]
    Truncated { expected: &'static str },

    #[error("parts nested deeper than {max}")]
    TooDeep { max: usize },

    #[error("no records")]
    Empty,
}

/// A decode that failed part way.
///
/// Carries the tree assembled before the failure so a host can still show
/// what was readable.
#[derive(Error, Debug)]
#[error("model only partially loaded: {source}")]
pub struct PartialLoad {
    pub source: CodecError,
    pub graph: Box<SceneGraph>,
}

impl PartialLoad {
    pub fn new(source: CodecError, graph: SceneGraph) -> Self {
        Self {
            source,
            graph: Box::new(graph),
        }
    }

    pub fn into_graph(self) -> SceneGraph {
        *self.graph
    }
}
