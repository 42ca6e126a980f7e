//! Workflow command formatting.
//!
//! The runner scans an action's stdout for lines of the form
//! `::command key=value,key=value::message` and reads key/value file
//! commands (`GITHUB_OUTPUT`, `GITHUB_ENV`) as heredoc-style blocks.

use crate::error::{ActionError, Result};

const CMD_STRING: &str = "::";
const DELIMITER_PREFIX: &str = "ghadelimiter_";

/// Escape a command message.
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value. Stricter than [`escape_data`] because
/// `:` and `,` delimit properties.
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// Render a workflow command line (without the trailing newline).
pub fn format_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut out = String::from(CMD_STRING);
    out.push_str(command);

    let props: Vec<String> = properties
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}={}", escape_property(v)))
        .collect();
    if !props.is_empty() {
        out.push(' ');
        out.push_str(&props.join(","));
    }

    out.push_str(CMD_STRING);
    out.push_str(&escape_data(message));
    out
}

/// Render a `key<<delimiter` block for a file command, with a fresh
/// random delimiter.
pub fn key_value_message(key: &str, value: &str) -> Result<String> {
    let delimiter = format!("{DELIMITER_PREFIX}{}", uuid::Uuid::new_v4());
    key_value_message_with(key, value, &delimiter)
}

pub(crate) fn key_value_message_with(key: &str, value: &str, delimiter: &str) -> Result<String> {
    if key.contains(delimiter) {
        return Err(ActionError::DelimiterCollision {
            field: "name".to_string(),
            delimiter: delimiter.to_string(),
        });
    }
    if value.contains(delimiter) {
        return Err(ActionError::DelimiterCollision {
            field: "value".to_string(),
            delimiter: delimiter.to_string(),
        });
    }
    Ok(format!("{key}<<{delimiter}\n{value}\n{delimiter}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_message_data() {
        assert_eq!(escape_data("100%\r\ndone"), "100%25%0D%0Adone");
    }

    #[test]
    fn escapes_property_separators() {
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }

    #[test]
    fn formats_command_without_properties() {
        assert_eq!(format_command("error", &[], "boom"), "::error::boom");
    }

    #[test]
    fn formats_command_with_properties() {
        assert_eq!(
            format_command("set-output", &[("name", "time")], "12:00:00"),
            "::set-output name=time::12:00:00"
        );
    }

    #[test]
    fn skips_empty_properties() {
        assert_eq!(
            format_command("warning", &[("file", ""), ("line", "3")], "careful"),
            "::warning line=3::careful"
        );
    }

    #[test]
    fn key_value_block_uses_delimiter() {
        let msg = key_value_message_with("message", "hi\nthere", "ghadelimiter_x").unwrap();
        assert_eq!(msg, "message<<ghadelimiter_x\nhi\nthere\nghadelimiter_x");
    }

    #[test]
    fn key_value_rejects_delimiter_in_value() {
        let err = key_value_message_with("k", "a ghadelimiter_x b", "ghadelimiter_x").unwrap_err();
        assert!(matches!(err, ActionError::DelimiterCollision { ref field, .. } if field == "value"));
    }

    #[test]
    fn random_delimiters_differ() {
        let a = key_value_message("k", "v").unwrap();
        let b = key_value_message("k", "v").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("k<<ghadelimiter_"));
    }
}
