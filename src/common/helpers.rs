// Helper functions for safe logging

/// Masks usernames for safe logging
/// Shows the first character only, preserving enough to correlate log lines
///
/// # Example
/// ```
/// let masked = safe_username_log("jdoe");
/// // Returns: "j***"
/// ```
pub fn safe_username_log(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        Some(first) if username.chars().count() > 1 => format!("{}***", first),
        _ => "***".to_string(),
    }
}

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
///
/// # Example
/// ```
/// let masked = safe_token_log("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
/// // Returns: "eyJh...VCJ9"
/// ```
#[allow(dead_code)]
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_username_log() {
        assert_eq!(safe_username_log("jdoe"), "j***");
        assert_eq!(safe_username_log("a"), "***");
        assert_eq!(safe_username_log(""), "***");
    }

    #[test]
    fn test_safe_token_log() {
        let masked = safe_token_log("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
        assert_eq!(masked, "eyJh...VCJ9");
        assert_eq!(safe_token_log("short"), "***");
    }
}
