//! Typewriter pacing helpers for presentation clients.

/// Default delay between characters, in milliseconds.
pub const BASE_TYPING_SPEED_MS: f64 = 40.0;

const IDENTIFIER: &str = "H:";

/// Per-character delay for `text`: short texts type slower, long texts faster.
pub fn typing_speed(text: &str, base_speed_ms: f64) -> f64 {
    let len = text.chars().count();
    if len < 20 {
        base_speed_ms * 1.2
    } else if len > 100 {
        base_speed_ms * 0.5
    } else if len > 50 {
        base_speed_ms * 0.7
    } else {
        base_speed_ms
    }
}

/// Strips a leading `H:` / `H: ` marker.
pub fn strip_identifier(text: &str) -> &str {
    text.strip_prefix("H: ")
        .or_else(|| text.strip_prefix(IDENTIFIER))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_speed_bands() {
        assert_eq!(typing_speed("short", 40.0), 48.0);
        assert_eq!(typing_speed(&"x".repeat(30), 40.0), 40.0);
        assert_eq!(typing_speed(&"x".repeat(60), 40.0), 28.0);
        assert_eq!(typing_speed(&"x".repeat(101), 40.0), 20.0);
    }

    #[test]
    fn test_identifier_handling() {
        assert_eq!(strip_identifier("H: Hello"), "Hello");
        assert_eq!(strip_identifier("H:Hello"), "Hello");
        assert_eq!(strip_identifier("Hello"), "Hello");
    }
}
