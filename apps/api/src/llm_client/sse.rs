//! Incremental parser for the Chat Completions server-sent-event stream.
//!
//! Bytes arrive in arbitrary slices; a line is only decoded once its
//! terminating newline has been seen, so multi-byte UTF-8 sequences split
//! across network chunks stay intact.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Delta(String),
    Done,
    Error(String),
}

#[derive(Debug, Default)]
pub struct SseLineBuffer {
    pending: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct StreamPayload {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: String,
}

impl SseLineBuffer {
    /// Feeds raw bytes and returns every event completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = parse_line(line.trim()) {
                events.push(event);
            }
        }
        events
    }
}

fn parse_line(line: &str) -> Option<SseEvent> {
    // blank keep-alives, comments and `event:` lines carry no text
    let data = line.strip_prefix("data:")?.trim_start();
    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }

    let payload: StreamPayload = serde_json::from_str(data).ok()?;
    if let Some(err) = payload.error {
        return Some(SseEvent::Error(err.message));
    }

    payload
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|text| !text.is_empty())
        .map(SseEvent::Delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(text: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({"choices": [{"delta": {"content": text}}]})
        )
    }

    #[test]
    fn test_parses_complete_events() {
        let mut buffer = SseLineBuffer::default();
        let input = format!("{}{}data: [DONE]\n", delta("Dear"), delta(" Hiring Manager"));
        let events = buffer.push(input.as_bytes());
        assert_eq!(
            events,
            vec![
                SseEvent::Delta("Dear".to_string()),
                SseEvent::Delta(" Hiring Manager".to_string()),
                SseEvent::Done,
            ]
        );
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut buffer = SseLineBuffer::default();
        let input = delta("Grüße");
        let bytes = input.as_bytes();
        // split inside the two-byte 'ü'
        let split = input.find('ü').unwrap() + 1;

        assert!(buffer.push(&bytes[..split]).is_empty());
        assert_eq!(
            buffer.push(&bytes[split..]),
            vec![SseEvent::Delta("Grüße".to_string())]
        );
    }

    #[test]
    fn test_ignores_comments_role_only_and_empty_deltas() {
        let mut buffer = SseLineBuffer::default();
        let input = ": keep-alive\n\
            data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\
            data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n\
            data: {\"choices\":[]}\n";
        assert!(buffer.push(input.as_bytes()).is_empty());
    }

    #[test]
    fn test_error_payload() {
        let mut buffer = SseLineBuffer::default();
        let input = "data: {\"error\":{\"message\":\"overloaded\"}}\n";
        assert_eq!(
            buffer.push(input.as_bytes()),
            vec![SseEvent::Error("overloaded".to_string())]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut buffer = SseLineBuffer::default();
        let input = "data: [DONE]\r\n";
        assert_eq!(buffer.push(input.as_bytes()), vec![SseEvent::Done]);
    }
}
