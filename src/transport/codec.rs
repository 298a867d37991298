use std::fmt;
use std::str::FromStr;

use crate::protocol::Message;

/// Payload encoding used inside each length-prefixed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// serde_json, what the game engine speaks.
    #[default]
    Json,
    /// bincode, compact and Rust-to-Rust only.
    Bincode,
}

impl Codec {
    pub fn encode(self, msg: &Message) -> anyhow::Result<Vec<u8>> {
        match self {
            Codec::Json => serde_json::to_vec(msg)
                .map_err(|e| anyhow::anyhow!("Serialization error: {}", e)),
            Codec::Bincode => bincode::serialize(msg)
                .map_err(|e| anyhow::anyhow!("Serialization error: {}", e)),
        }
    }

    /// Decode one whole frame. Failures carry a [`DecodeError`], so callers
    /// can tell a bad payload from a broken connection.
    pub fn decode(self, data: &[u8]) -> anyhow::Result<Message> {
        let decoded = match self {
            Codec::Json => serde_json::from_slice(data).map_err(|e| DecodeError(e.to_string())),
            Codec::Bincode => bincode::deserialize(data).map_err(|e| DecodeError(e.to_string())),
        };
        Ok(decoded?)
    }
}

/// A complete frame arrived but its payload is not a valid message. The
/// stream itself is still in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError(pub String);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deserialization error: {}", self.0)
    }
}

impl std::error::Error for DecodeError {}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Json => write!(f, "json"),
            Codec::Bincode => write!(f, "bincode"),
        }
    }
}

impl FromStr for Codec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Codec::Json),
            "bincode" => Ok(Codec::Bincode),
            other => Err(anyhow::anyhow!("unknown codec: {}", other)),
        }
    }
}
