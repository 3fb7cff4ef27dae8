//! Chat message text normalization and validation.
//!
//! Clients have historically sent a mix of CRLF, bare CR, and literal
//! backslash-n sequences; everything is normalized to LF before storage
//! so transcripts render the same regardless of the sender's platform.

use crate::error::CoreError;

/// Maximum length for a chat message after normalization.
pub const MAX_MESSAGE_LENGTH: usize = 4_000;

/// Normalize raw message text: CRLF and CR become LF, literal `\n`
/// escape sequences become real newlines, and the result is trimmed.
pub fn normalize_message_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace("\\n", "\n")
        .trim()
        .to_string()
}

/// Validate normalized message text: non-empty and within length.
pub fn validate_message_text(text: &str) -> Result<(), CoreError> {
    if text.is_empty() {
        return Err(CoreError::Validation("Texto vacio".to_string()));
    }
    if text.len() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "El mensaje supera el máximo de {MAX_MESSAGE_LENGTH} caracteres"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(normalize_message_text("hola\r\nmundo"), "hola\nmundo");
        assert_eq!(normalize_message_text("hola\rmundo"), "hola\nmundo");
    }

    #[test]
    fn test_literal_escape_normalized() {
        assert_eq!(normalize_message_text("hola\\nmundo"), "hola\nmundo");
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(normalize_message_text("  hola  "), "hola");
        assert_eq!(normalize_message_text(" \r\n "), "");
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(validate_message_text("").is_err());
        assert!(validate_message_text("hola").is_ok());
    }

    #[test]
    fn test_length_capped() {
        assert!(validate_message_text(&"x".repeat(MAX_MESSAGE_LENGTH)).is_ok());
        assert!(validate_message_text(&"x".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }
}
