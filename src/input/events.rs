//! Frames read from the host, one JSON object per line.

use crate::error::Result;
use crate::shared::messages::InboundMessage;
use serde::Deserialize;

/// A key press relayed by the host while the overlay has focus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyEvent {
    pub key: String,
}

/// Anything carrying a `type` is a message, even when it also has a `key` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HostFrame {
    Message(InboundMessage),
    Key(KeyEvent),
}

pub fn parse_frame(line: &str) -> Result<HostFrame> {
    Ok(serde_json::from_str(line)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HudError;

    #[test]
    fn key_frames_and_messages_are_told_apart() {
        assert_eq!(
            parse_frame(r#"{"key":"e"}"#).unwrap(),
            HostFrame::Key(KeyEvent { key: "e".into() })
        );
        assert!(matches!(
            parse_frame(r#"{"type":"hideHUD"}"#).unwrap(),
            HostFrame::Message(InboundMessage::HideHud)
        ));
        assert!(matches!(
            parse_frame(r#"{"type":"brandNew","x":[1,2]}"#).unwrap(),
            HostFrame::Message(InboundMessage::Unknown)
        ));
    }

    #[test]
    fn typed_frame_with_key_field_stays_a_message() {
        match parse_frame(r#"{"type":"notification","title":"hi","key":"e"}"#).unwrap() {
            HostFrame::Message(InboundMessage::Notification { title, .. }) => {
                assert_eq!(title, "hi")
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse_frame(r#"{"type":"somethingElse","key":"e"}"#).unwrap(),
            HostFrame::Message(InboundMessage::Unknown)
        ));
    }

    #[test]
    fn garbage_is_a_frame_error() {
        assert!(matches!(parse_frame("not json"), Err(HudError::Frame(_))));
        assert!(matches!(parse_frame(r#"{"foo":1}"#), Err(HudError::Frame(_))));
    }
}
