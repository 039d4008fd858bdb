//! Speechlet response builders
//!
//! Pure functions that assemble the fixed-shape payload the voice platform
//! expects. No validation is performed on the inputs.

use serde::{Deserialize, Serialize};

use super::SessionAttributes;

/// Protocol version tag carried by every envelope
pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechType {
    PlainText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Simple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: SpeechType,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: CardType,
    pub title: String,
    pub content: String,
}

/// Reprompt speech; a `null` text means "do not reprompt"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepromptSpeech {
    #[serde(rename = "type")]
    pub kind: SpeechType,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: RepromptSpeech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub reprompt: Reprompt,
    pub should_end_session: bool,
}

/// Final payload returned to the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: SessionAttributes,
    pub response: SpeechletResponse,
}

/// Build the speech/card/reprompt payload. The card body repeats the spoken text.
pub fn build_speechlet_response(
    title: &str,
    output: &str,
    reprompt_text: Option<&str>,
    should_end_session: bool,
) -> SpeechletResponse {
    SpeechletResponse {
        output_speech: OutputSpeech {
            kind: SpeechType::PlainText,
            text: output.to_string(),
        },
        card: Card {
            kind: CardType::Simple,
            title: title.to_string(),
            content: output.to_string(),
        },
        reprompt: Reprompt {
            output_speech: RepromptSpeech {
                kind: SpeechType::PlainText,
                text: reprompt_text.map(ToString::to_string),
            },
        },
        should_end_session,
    }
}

/// Wrap a speechlet response with session attributes and the version tag
pub fn build_response(
    session_attributes: SessionAttributes,
    speechlet_response: SpeechletResponse,
) -> ResponseEnvelope {
    ResponseEnvelope {
        version: PROTOCOL_VERSION.to_string(),
        session_attributes,
        response: speechlet_response,
    }
}
