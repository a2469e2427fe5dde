//! Identifiers and payload containers used inside zome calls.

use holo_hash::{AgentPubKey, DnaHash};
use holochain_serialized_bytes::{decode, encode, SerializedBytesError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The name an app is installed under in the node.
pub type InstalledAppId = String;

/// The unique identifier for a running cell.
///
/// Serialized as a two element sequence `[dna_hash, agent_pubkey]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(DnaHash, AgentPubKey);

impl CellId {
    /// Create a new CellId from its parts.
    pub fn new(dna_hash: DnaHash, agent_pubkey: AgentPubKey) -> Self {
        Self(dna_hash, agent_pubkey)
    }

    /// The dna hash of this cell.
    pub fn dna_hash(&self) -> &DnaHash {
        &self.0
    }

    /// The agent of this cell.
    pub fn agent_pubkey(&self) -> &AgentPubKey {
        &self.1
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CellId({}, {})", self.dna_hash(), self.agent_pubkey())
    }
}

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrow as a plain str.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_newtype!(
    /// The name of a zome within a dna.
    ZomeName
);

string_newtype!(
    /// The name of an extern function exposed by a zome.
    FunctionName
);

/// A capability secret, for calls gated by a capability grant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapSecret(#[serde(with = "serde_bytes")] pub Vec<u8>);

impl std::fmt::Debug for CapSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CapSecret(<redacted>)")
    }
}

/// Msgpack encoded input to, or output from, a zome function.
///
/// The node never interprets these bytes, the two ends of a call agree
/// on the shape. [ExternIO::decode] is where a disagreement shows up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternIO(#[serde(with = "serde_bytes")] pub Vec<u8>);

impl ExternIO {
    /// Encode any serializable value.
    pub fn encode<I>(input: I) -> Result<Self, SerializedBytesError>
    where
        I: Serialize + std::fmt::Debug,
    {
        Ok(Self(encode(&input)?))
    }

    /// Decode into the type the caller expects.
    pub fn decode<O>(&self) -> Result<O, SerializedBytesError>
    where
        O: DeserializeOwned + std::fmt::Debug,
    {
        decode(&self.0)
    }
}
