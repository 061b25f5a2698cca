//! Record validation for incoming account payloads.
//!
//! Free-text fields are sanitized in place before any rule runs, so a draft
//! that comes back from a failed validation is already in its persisted
//! form. Sanitization is idempotent: running it over an already-sanitized
//! string is a no-op, including for strings that arrived pre-escaped.

use lazy_regex::regex;
use thiserror::Error;

use crate::domain::account::{AccessTier, AccountDraft};

/// Single field-level validation failure. Validation short-circuits, so a
/// result never aggregates more than one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username cannot be empty")]
    EmptyUsername,
    #[error("invalid email format")]
    InvalidEmail,
    #[error("credential cannot be empty")]
    EmptyCredential,
    #[error("access tier out of range: {0}")]
    InvalidAccessTier(u8),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyUsername => "EMPTY_USERNAME",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::EmptyCredential => "EMPTY_CREDENTIAL",
            ValidationError::InvalidAccessTier(_) => "INVALID_ACCESS_TIER",
        }
    }
}

/// Entities the escaper emits. A `&` that already begins one of these is
/// left untouched, which is what makes `sanitize` idempotent.
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

/// Trim surrounding whitespace, then escape markup-significant characters.
pub fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '&' if ENTITIES.iter().any(|e| trimmed[i..].starts_with(e)) => out.push('&'),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_valid_email(email: &str) -> bool {
    regex!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_match(email)
}

/// Sanitize and validate an incoming draft.
///
/// Sanitization runs unconditionally over `username`, `email` and
/// `credential`, then the rules apply in order and the first failure wins.
/// `credential` is required only when `updating` is false. No hashing
/// happens here; that belongs to the service layer.
pub fn validate(draft: &mut AccountDraft, updating: bool) -> Result<(), ValidationError> {
    draft.username = sanitize(&draft.username);
    draft.email = sanitize(&draft.email);
    draft.credential = sanitize(&draft.credential);

    if draft.username.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if draft.email.is_empty() || !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !updating && draft.credential.is_empty() {
        return Err(ValidationError::EmptyCredential);
    }
    if AccessTier::try_from(draft.access).is_err() {
        return Err(ValidationError::InvalidAccessTier(draft.access));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn draft(username: &str, email: &str, credential: &str, access: u8) -> AccountDraft {
        AccountDraft {
            username: username.to_string(),
            email: email.to_string(),
            credential: credential.to_string(),
            access,
        }
    }

    #[test]
    fn sanitize_trims_and_escapes() {
        assert_eq!(sanitize("  alice  "), "alice");
        assert_eq!(sanitize("<script>"), "&lt;script&gt;");
        assert_eq!(sanitize(r#"a"b'c&d"#), "a&quot;b&#39;c&amp;d");
    }

    #[test]
    fn sanitize_leaves_escaped_sequences_alone() {
        assert_eq!(sanitize("&amp;"), "&amp;");
        assert_eq!(sanitize("&lt;p&gt;"), "&lt;p&gt;");
        assert_eq!(sanitize("&#39;quoted&#39;"), "&#39;quoted&#39;");
        // A bare ampersand that does not begin a known entity still escapes.
        assert_eq!(sanitize("&ampx"), "&amp;ampx");
    }

    #[test]
    fn sanitize_is_idempotent_on_fixed_cases() {
        for input in ["  <b>&amp;</b> ", "plain", "&quot;&gt;", "a & b < c"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(input in ".*") {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once.clone());
        }
    }

    #[test]
    fn empty_username_rejected_first() {
        // Both username and email are bad; the username rule wins.
        let mut d = draft("   ", "not-an-email", "secret", 0);
        assert_eq!(validate(&mut d, false), Err(ValidationError::EmptyUsername));
    }

    #[test]
    fn bad_email_rejected() {
        for email in ["", "plain", "a@b", "a b@c.d", "@example.com"] {
            let mut d = draft("alice", email, "secret", 0);
            assert_eq!(validate(&mut d, false), Err(ValidationError::InvalidEmail));
        }
        let mut ok = draft("alice", "alice@example.com", "secret", 0);
        assert_eq!(validate(&mut ok, false), Ok(()));
    }

    #[test]
    fn credential_required_only_on_create() {
        let mut create = draft("alice", "alice@example.com", "", 1);
        assert_eq!(
            validate(&mut create, false),
            Err(ValidationError::EmptyCredential)
        );

        let mut update = draft("alice", "alice@example.com", "", 1);
        assert_eq!(validate(&mut update, true), Ok(()));
    }

    #[test]
    fn access_tier_range_enforced() {
        for access in 0..=2u8 {
            let mut d = draft("alice", "alice@example.com", "secret", access);
            assert_eq!(validate(&mut d, false), Ok(()));
        }
        let mut d = draft("alice", "alice@example.com", "secret", 3);
        assert_eq!(
            validate(&mut d, false),
            Err(ValidationError::InvalidAccessTier(3))
        );
    }

    #[test]
    fn fields_are_sanitized_even_when_validation_fails() {
        let mut d = draft("  <em>bob</em>  ", "", "  pass<word>  ", 0);
        let _ = validate(&mut d, false);
        assert_eq!(d.username, "&lt;em&gt;bob&lt;/em&gt;");
        assert_eq!(d.credential, "pass&lt;word&gt;");
    }

    #[test]
    fn second_validate_pass_is_a_no_op() {
        let mut d = draft(" <bob> ", " bob@example.com ", " s3cret& ", 2);
        validate(&mut d, false).unwrap();
        let after_first = d.clone();
        validate(&mut d, false).unwrap();
        assert_eq!(d.username, after_first.username);
        assert_eq!(d.email, after_first.email);
        assert_eq!(d.credential, after_first.credential);
    }
}
