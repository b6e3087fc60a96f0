//! Hook input decoding.

use std::io::Read;

use serde_json::Value;
use tracing::warn;

/// Read hook stdin and extract the prompt.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so
/// the prompt always reaches the host.
pub fn read_prompt(mut reader: impl Read) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    let _ = reader.read_to_end(&mut bytes)?;
    let raw = match String::from_utf8(bytes) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e.utf8_error(), "prompt is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(extract_prompt(&raw))
}

/// Extract the user prompt from hook stdin.
///
/// Accepts a JSON object carrying a string `prompt` field, or raw text. Raw
/// text loses one trailing line terminator.
pub fn extract_prompt(raw: &str) -> String {
    if raw.trim_start().starts_with('{') {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
            if let Some(Value::String(prompt)) = map.get("prompt") {
                return prompt.clone();
            }
        }
    }
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let bytes: &[u8] = b"create a table \xff\xfe page\n";
        let prompt = read_prompt(bytes).unwrap();
        assert_eq!(prompt, "create a table \u{fffd}\u{fffd} page");
    }

    #[test]
    fn read_prompt_decodes_json() {
        let bytes: &[u8] = br#"{"prompt": "hello"}"#;
        assert_eq!(read_prompt(bytes).unwrap(), "hello");
    }

    #[test]
    fn json_payload() {
        let raw = r#"{"session_id": "abc", "prompt": "create a table\nplease"}"#;
        assert_eq!(extract_prompt(raw), "create a table\nplease");
    }

    #[test]
    fn raw_text_drops_one_newline() {
        assert_eq!(extract_prompt("create a table\n"), "create a table");
        assert_eq!(extract_prompt("two\n\n"), "two\n");
        assert_eq!(extract_prompt("crlf\r\n"), "crlf");
    }

    #[test]
    fn json_without_prompt_is_raw_text() {
        assert_eq!(extract_prompt(r#"{"other": 1}"#), r#"{"other": 1}"#);
        assert_eq!(extract_prompt("{not json"), "{not json");
    }
}
