//! JSON envelope exchanged with the control server.
//!
//! Every message is an object with a single `type` field, e.g.
//! `{"type":"TICK"}`.

use serde::{Deserialize, Serialize};

/// Control channel message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlMessage {
    /// Server pulse; starts a drip.
    Tick,
    /// Sent back once a drip has reached the end of the strip.
    DripEnd,
}

impl ControlMessage {
    /// Decode a text frame.
    ///
    /// Unknown types and malformed JSON yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    pub fn to_json(self) -> serde_json::Result<String> {
        serde_json::to_string(&self)
    }
}
