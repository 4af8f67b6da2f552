//! Gravatar profile image derivation
//!
//! Profile images are not uploaded; they are derived from the account email
//! via Gravatar's md5-addressed URL scheme.

/// Build the Gravatar URL for an email address.
///
/// The hash input is the trimmed, lowercased email. Size 200px, rating "x",
/// "retro" generated fallback for addresses without a Gravatar account.
pub fn profile_image_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = md5::compute(normalized.as_bytes());
    format!("https://s.gravatar.com/avatar/{:x}?s=200&r=x&d=retro", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        assert_eq!(
            profile_image_url("user@example.com"),
            profile_image_url("user@example.com")
        );
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            profile_image_url("User@Example.COM"),
            profile_image_url("  user@example.com  ")
        );
    }

    #[test]
    fn test_known_hash() {
        // md5("user@example.com") = b58996c504c5638798eb6b511e6f49af
        assert_eq!(
            profile_image_url("user@example.com"),
            "https://s.gravatar.com/avatar/b58996c504c5638798eb6b511e6f49af?s=200&r=x&d=retro"
        );
    }
}
