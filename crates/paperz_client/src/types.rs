//! Payloads and results of the paperz zome functions.

use holo_hash::{ActionHash, EntryHash};
use serde::{Deserialize, Serialize};

/// An uploaded paper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// File name, extension included.
    pub filename: String,
    /// The file contents, encoded as a string.
    pub blob_str: String,
}

/// A correction proposed against one paragraph of a paper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Entry hash of the annotated paper.
    pub paper_ref: EntryHash,
    pub page_num: u64,
    pub paragraph_num: u64,
    pub what_it_says: String,
    pub what_it_should_say: String,
}

/// A paper with the hash of its entry.
pub type PaperOutput = (EntryHash, Paper);

/// An annotation with the hash of its entry.
pub type AnnotationOutput = (EntryHash, Annotation);

/// Receipt of a ledger write: the entry hash and the hash of the action
/// that created it.
pub type HolochainOutput = (EntryHash, ActionHash);

/// Binds an expression at a state machine path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMachineInput {
    pub path: String,
    pub expr: String,
}

impl StateMachineInput {
    pub fn new(path: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expr: expr.into(),
        }
    }
}

/// Asks the sensemaker to apply `action` to the state held for
/// `entry_hash` at `path`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStateMachineInput {
    pub path: String,
    pub entry_hash: EntryHash,
    pub action: String,
}

/// An expression or value stored by the sensemaker.
///
/// The client never evaluates these, it only carries them. This layout is
/// assumed: the sensemaker's own entry type is not part of this workspace,
/// so a node whose entry differs will surface as a
/// [DecodeError](crate::ConductorApiError::DecodeError) on the reading calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensemakerEntry {
    pub operator: String,
    pub operands: Vec<String>,
    pub output_scheme: String,
    /// The flattened expression or value.
    pub output_flat: String,
    pub start_gas: u64,
}

/// A sensemaker entry with the hash it is stored under.
pub type SensemakerOutput = (EntryHash, SensemakerEntry);
