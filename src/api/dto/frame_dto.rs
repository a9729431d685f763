//! Frame action payloads posted by Farcaster clients.

use serde::Deserialize;

use crate::domain::Fid;

/// Body of a frame button press.
///
/// Only the unsigned half of the packet is read; `trustedData` carries the
/// signed message and is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameActionPayload {
    /// Client-reported action fields.
    #[serde(default)]
    pub untrusted_data: Option<UntrustedData>,
}

/// Unsigned action fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    /// User who pressed the button.
    #[serde(default)]
    pub fid: Option<Fid>,
    /// Contents of the frame's text input.
    #[serde(default)]
    pub input_text: Option<String>,
}

impl FrameActionPayload {
    /// Parses a POST body, treating an empty or unreadable body as an
    /// action with no fields.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unreadable frame action body");
            Self::default()
        })
    }

    /// Fid of the user who pressed the button.
    #[must_use]
    pub fn fid(&self) -> Option<Fid> {
        self.untrusted_data.as_ref().and_then(|d| d.fid)
    }

    /// Text typed into the frame input, if any.
    #[must_use]
    pub fn input_text(&self) -> Option<&str> {
        self.untrusted_data
            .as_ref()
            .and_then(|d| d.input_text.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Query string of the leaderboard frame.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    /// Requesting user, carried over from the stats frame's button.
    #[serde(default)]
    pub fid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_untrusted_data() {
        let body = br#"{
            "untrustedData": {"fid": 42, "buttonIndex": 1, "inputText": " 99 "},
            "trustedData": {"messageBytes": "00"}
        }"#;
        let payload = FrameActionPayload::from_body(body);
        assert_eq!(payload.fid(), Some(Fid::new(42)));
        assert_eq!(payload.input_text(), Some("99"));
    }

    #[test]
    fn blank_input_is_none() {
        let payload = FrameActionPayload::from_body(br#"{"untrustedData": {"inputText": "  "}}"#);
        assert_eq!(payload.input_text(), None);
        assert_eq!(payload.fid(), None);
    }

    #[test]
    fn bad_bodies_fall_back_to_empty() {
        assert!(FrameActionPayload::from_body(b"").untrusted_data.is_none());
        assert!(FrameActionPayload::from_body(b"not json").untrusted_data.is_none());
    }
}
