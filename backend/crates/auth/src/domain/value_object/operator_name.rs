//! Operator Name Value Object
//!
//! オペレーター名はサインインに使用される識別子。
//!
//! ## 設計方針
//! - ASCII文字のみ許可（a-z, 0-9, _ . -）
//! - 大文字入力は受け付けるが、canonical（正規形）は小文字
//! - NFKC正規化 → 検証 → 小文字化 の順で処理
//!
//! ## 不変条件
//! - 長さ: 3〜30文字（正規化後）
//! - 先頭・末尾: 英数字または `_`
//! - 英数字を最低1文字含む
//! - 空白禁止、予約語禁止

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for operator name (in characters)
pub const OPERATOR_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for operator name (in characters)
pub const OPERATOR_NAME_MAX_LENGTH: usize = 30;

/// Allowed special characters in operator name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Names that cannot be used for the operator account
const RESERVED_WORDS: &[&str] = &[
    "admin", "root", "system", "support", "api", "auth", "login", "logout",
    "signin", "signout", "password", "me", "null", "undefined", "guest",
];

/// Error returned when operator name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorNameError {
    /// Name is empty after normalization
    Empty,

    /// Name is too short (minimum: OPERATOR_NAME_MIN_LENGTH)
    TooShort { length: usize, min: usize },

    /// Name is too long (maximum: OPERATOR_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Name contains invalid character
    InvalidCharacter { char: char, position: usize },

    /// Name starts or ends with invalid character (must be alphanumeric or _)
    InvalidBoundary { char: char },

    /// Name contains no alphanumeric characters
    NoAlphanumeric,

    /// Name contains whitespace
    ContainsWhitespace,

    /// Name is a reserved word
    Reserved { word: String },
}

impl fmt::Display for OperatorNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Operator name cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Operator name is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Operator name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only a-z, 0-9, _, ., - are allowed"
                )
            }
            Self::InvalidBoundary { char } => {
                write!(
                    f,
                    "Operator name cannot start or end with '{char}'. Use a-z, 0-9, or _"
                )
            }
            Self::NoAlphanumeric => {
                write!(f, "Operator name must contain at least one letter or digit")
            }
            Self::ContainsWhitespace => {
                write!(f, "Operator name cannot contain whitespace")
            }
            Self::Reserved { word } => {
                write!(f, "'{word}' is a reserved operator name")
            }
        }
    }
}

impl std::error::Error for OperatorNameError {}

/// Validated, normalized operator name
///
/// # Invariants
/// - Non-empty, 3..=30 characters after NFKC normalization
/// - ASCII alphanumeric plus `_ . -`, no whitespace
/// - Starts and ends with alphanumeric or underscore
/// - Not a reserved word
///
/// # Storage
/// - `original`: The operator's input (trimmed, NFKC normalized, preserves case)
/// - `canonical`: Lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperatorName {
    /// Original input (preserves case)
    original: String,
    /// Canonical form (lowercase) for uniqueness
    canonical: String,
}

impl OperatorName {
    /// Create a new OperatorName from raw input
    ///
    /// Applies normalization (NFKC, trim) and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, OperatorNameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original operator name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (normalized, lowercase) operator name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Alias for canonical() for compatibility
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    /// Validate the canonical operator name
    fn validate(canonical: &str) -> Result<(), OperatorNameError> {
        if canonical.is_empty() {
            return Err(OperatorNameError::Empty);
        }

        let length = canonical.chars().count();
        if length < OPERATOR_NAME_MIN_LENGTH {
            return Err(OperatorNameError::TooShort {
                length,
                min: OPERATOR_NAME_MIN_LENGTH,
            });
        }
        if length > OPERATOR_NAME_MAX_LENGTH {
            return Err(OperatorNameError::TooLong {
                length,
                max: OPERATOR_NAME_MAX_LENGTH,
            });
        }

        if canonical.chars().any(|c| c.is_whitespace()) {
            return Err(OperatorNameError::ContainsWhitespace);
        }

        for (pos, ch) in canonical.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(OperatorNameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        let first_char = canonical.chars().next().unwrap();
        if !Self::is_valid_boundary_char(first_char) {
            return Err(OperatorNameError::InvalidBoundary { char: first_char });
        }

        let last_char = canonical.chars().next_back().unwrap();
        if !Self::is_valid_boundary_char(last_char) {
            return Err(OperatorNameError::InvalidBoundary { char: last_char });
        }

        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(OperatorNameError::NoAlphanumeric);
        }

        if RESERVED_WORDS.iter().any(|&w| w == canonical) {
            return Err(OperatorNameError::Reserved {
                word: canonical.to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    #[inline]
    fn is_valid_boundary_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for OperatorName {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for OperatorName {
    type Error = OperatorNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OperatorName {
    type Error = OperatorNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OperatorName> for String {
    fn from(name: OperatorName) -> Self {
        name.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_whitespace() {
            let name = OperatorName::new("  mehmet  ").unwrap();
            assert_eq!(name.as_str(), "mehmet");
        }

        #[test]
        fn test_lowercase_canonical() {
            let name = OperatorName::new("Mehmet").unwrap();
            assert_eq!(name.as_str(), "mehmet");
            assert_eq!(name.original(), "Mehmet");
        }

        #[test]
        fn test_nfkc_normalization() {
            // Full-width 'Ｍ' (U+FF2D) should normalize to ASCII
            let name = OperatorName::new("Ｍehmet").unwrap();
            assert_eq!(name.as_str(), "mehmet");
        }
    }

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert!(matches!(
                OperatorName::new(""),
                Err(OperatorNameError::Empty)
            ));
        }

        #[test]
        fn test_too_short() {
            assert!(matches!(
                OperatorName::new("ab"),
                Err(OperatorNameError::TooShort { length: 2, min: 3 })
            ));
        }

        #[test]
        fn test_bounds() {
            assert!(OperatorName::new("abc").is_ok());
            assert!(OperatorName::new("a".repeat(OPERATOR_NAME_MAX_LENGTH)).is_ok());
            assert!(matches!(
                OperatorName::new("a".repeat(OPERATOR_NAME_MAX_LENGTH + 1)),
                Err(OperatorNameError::TooLong { .. })
            ));
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_names() {
            assert!(OperatorName::new("mehmet42").is_ok());
            assert!(OperatorName::new("mapos_op").is_ok());
            assert!(OperatorName::new("satis.birimi").is_ok());
            assert!(OperatorName::new("ofis-1").is_ok());
        }

        #[test]
        fn test_invalid_special_char() {
            assert!(matches!(
                OperatorName::new("mehmet@ofis"),
                Err(OperatorNameError::InvalidCharacter { char: '@', .. })
            ));
        }

        #[test]
        fn test_invalid_boundary() {
            assert!(matches!(
                OperatorName::new(".mehmet"),
                Err(OperatorNameError::InvalidBoundary { char: '.' })
            ));
            assert!(matches!(
                OperatorName::new("mehmet-"),
                Err(OperatorNameError::InvalidBoundary { char: '-' })
            ));
        }

        #[test]
        fn test_whitespace_in_middle_fails() {
            let result = OperatorName::new("mehmet bey");
            assert!(matches!(
                result,
                Err(OperatorNameError::ContainsWhitespace)
                    | Err(OperatorNameError::InvalidCharacter { .. })
            ));
        }

        #[test]
        fn test_symbols_only_fails() {
            assert!(matches!(
                OperatorName::new("___"),
                Err(OperatorNameError::NoAlphanumeric)
            ));
        }
    }

    mod reserved_words {
        use super::*;

        #[test]
        fn test_reserved() {
            assert!(matches!(
                OperatorName::new("admin"),
                Err(OperatorNameError::Reserved { word }) if word == "admin"
            ));
            assert!(matches!(
                OperatorName::new("ROOT"),
                Err(OperatorNameError::Reserved { .. })
            ));
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serde_roundtrip() {
            let name = OperatorName::new("mehmet").unwrap();
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, "\"mehmet\"");

            let back: OperatorName = serde_json::from_str(&json).unwrap();
            assert_eq!(back.as_str(), "mehmet");
        }

        #[test]
        fn test_deserialize_invalid() {
            let result: Result<OperatorName, _> = serde_json::from_str("\"ab\"");
            assert!(result.is_err());
        }
    }
}
