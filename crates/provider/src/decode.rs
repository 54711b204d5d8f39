//! Extraction of the generated artifact from a terminal operation.

use base64::Engine as _;

use crate::wire::OperationResponse;

/// A generated video, in whichever channel the provider delivered it.
#[derive(Debug)]
pub enum Artifact {
    /// Decoded video bytes, ready to persist.
    Inline(Vec<u8>),
    /// Reference into the provider's own store.
    Remote(String),
}

/// Errors extracting an artifact from an operation response.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The operation completed but carried no video in either channel.
    #[error("No artifact in response")]
    NoArtifact,

    /// The inline payload was present but not valid base64.
    #[error("Invalid inline video payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}

/// Pick the artifact out of a terminal response.
///
/// Only the first video is considered. When both channels are populated the
/// inline payload wins, since its bytes are already in hand.
pub fn decode_artifact(response: Option<&OperationResponse>) -> Result<Artifact, DecodeError> {
    let video = response
        .and_then(|r| r.videos.first())
        .ok_or(DecodeError::NoArtifact)?;

    if let Some(encoded) = &video.inline_payload {
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
        return Ok(Artifact::Inline(bytes));
    }

    if let Some(uri) = &video.remote_uri {
        return Ok(Artifact::Remote(uri.clone()));
    }

    Err(DecodeError::NoArtifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;

    fn response(json: &str) -> OperationResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn inline_payload_decodes_to_original_bytes() {
        let bytes = b"fake mp4 bytes \x00\x01\x02";
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        let response = response(&format!(r#"{{"videos":[{{"inlinePayload":"{encoded}"}}]}}"#));

        let artifact = decode_artifact(Some(&response)).unwrap();

        assert_matches!(artifact, Artifact::Inline(decoded) => {
            assert_eq!(decoded, bytes);
        });
    }

    #[test]
    fn remote_uri_passes_through() {
        let response = response(r#"{"videos":[{"remoteUri":"store://videos/a.mp4"}]}"#);

        let artifact = decode_artifact(Some(&response)).unwrap();

        assert_matches!(artifact, Artifact::Remote(uri) => {
            assert_eq!(uri, "store://videos/a.mp4");
        });
    }

    #[test]
    fn inline_wins_over_remote() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"bytes");
        let response = response(&format!(
            r#"{{"videos":[{{"inlinePayload":"{encoded}","remoteUri":"store://videos/a.mp4"}}]}}"#
        ));

        assert_matches!(
            decode_artifact(Some(&response)).unwrap(),
            Artifact::Inline(_)
        );
    }

    #[test]
    fn only_the_first_video_is_considered() {
        let response = response(
            r#"{"videos":[{"remoteUri":"store://first.mp4"},{"remoteUri":"store://second.mp4"}]}"#,
        );

        assert_matches!(decode_artifact(Some(&response)).unwrap(), Artifact::Remote(uri) => {
            assert_eq!(uri, "store://first.mp4");
        });
    }

    // -- Missing artifact --

    #[test]
    fn missing_response_is_no_artifact() {
        assert_matches!(decode_artifact(None), Err(DecodeError::NoArtifact));
    }

    #[test]
    fn empty_video_list_is_no_artifact() {
        let response = response(r#"{"videos":[]}"#);
        assert_matches!(decode_artifact(Some(&response)), Err(DecodeError::NoArtifact));
    }

    #[test]
    fn video_with_neither_channel_is_no_artifact() {
        let response = response(r#"{"videos":[{}]}"#);
        assert_matches!(decode_artifact(Some(&response)), Err(DecodeError::NoArtifact));
    }

    #[test]
    fn invalid_base64_is_reported() {
        let response = response(r#"{"videos":[{"inlinePayload":"@@not base64@@"}]}"#);
        assert_matches!(
            decode_artifact(Some(&response)),
            Err(DecodeError::InvalidPayload(_))
        );
    }
}
