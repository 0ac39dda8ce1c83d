//! SMS verification codes.
//!
//! Codes are generated and compared here; storing them between the send and
//! the check is left to the caller.

use rand::Rng;

use crate::signature::secure_compare;

/// Digits in a code when no length is given.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates a numeric code of `length` digits.
///
/// Leading zeros are kept, so every code has exactly `length` characters.
#[must_use]
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Text of the SMS carrying `code`.
#[must_use]
pub fn verification_message(code: &str) -> String {
    format!("Your verification code is {code}")
}

/// Compares a submitted code with the issued one in constant time.
///
/// Surrounding whitespace in the submission is ignored.
#[must_use]
pub fn verify_code(expected: &str, submitted: &str) -> bool {
    !expected.is_empty() && secure_compare(expected, submitted.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_code_has_requested_length() {
        for length in [1, 4, DEFAULT_CODE_LENGTH, 10] {
            assert_eq!(generate_code(length).len(), length);
        }
    }

    #[test]
    fn generated_code_is_numeric() {
        let code = generate_code(64);

        assert!(code.chars().all(|c| c.is_ascii_digit()), "Got {code}");
    }

    #[test]
    fn zero_length_gives_empty_code() {
        assert_eq!(generate_code(0), "");
    }

    #[test]
    fn message_embeds_code() {
        assert_eq!(
            verification_message("042137"),
            "Your verification code is 042137"
        );
    }

    #[test]
    fn matching_code_verifies() {
        assert!(verify_code("042137", "042137"));
        assert!(verify_code("042137", " 042137\n"));
    }

    #[test]
    fn wrong_code_fails() {
        assert!(!verify_code("042137", "042138"));
        assert!(!verify_code("042137", "42137"));
        assert!(!verify_code("042137", ""));
    }

    #[test]
    fn empty_expected_never_verifies() {
        assert!(!verify_code("", ""));
    }
}
