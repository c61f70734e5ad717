//! Account rules: email normalization and password policy.

use crate::error::CoreError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Trim the address and lowercase its domain part.
///
/// The local part is left as typed: `Jane.Doe@Example.COM` becomes
/// `Jane.Doe@example.com`. Addresses without an `@` are returned trimmed.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Reject passwords shorter than [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "password: must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn domain_is_lowercased() {
        let cases = [
            ("test1@EXAMPLE.com", "test1@example.com"),
            ("Test2@Example.com", "Test2@example.com"),
            ("TEST3@EXAMPLE.COM", "TEST3@example.com"),
            ("test4@example.COM", "test4@example.com"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_email(input), expected);
        }
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize_email("  me@Host.io \n"), "me@host.io");
    }

    #[test]
    fn address_without_at_is_kept() {
        assert_eq!(normalize_email("not-an-email"), "not-an-email");
    }

    #[test]
    fn short_password_is_rejected() {
        assert_matches!(validate_password("pw"), Err(CoreError::Validation(_)));
        assert!(validate_password("pass1").is_ok());
    }
}
