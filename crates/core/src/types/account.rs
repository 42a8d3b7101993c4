//! Validated account fields: email address and username.
//!
//! Both are parsed once at the edge (signup form, CLI flags) and carried as
//! newtypes afterwards, so repository code never sees unvalidated input.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`] or [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountFieldError {
    /// The input is empty after trimming.
    #[error("{field} cannot be empty")]
    Empty {
        /// Which field was empty.
        field: &'static str,
    },
    /// The input is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Which field was too long.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
    /// The email does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The email local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The email domain (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The username contains a character outside `[A-Za-z0-9_.-]`.
    #[error("username may only contain letters, digits, '_', '.' and '-' (found {0:?})")]
    InvalidUsernameChar(char),
}

/// An email address, stored lowercased.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Must contain an @ symbol with a non-empty local part and domain
///
/// ```
/// use larder_core::Email;
///
/// let email = Email::parse("  Cook@Example.com ").unwrap();
/// assert_eq!(email.as_str(), "cook@example.com");
/// assert!(Email::parse("no-at-symbol").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email`, trimming surrounding whitespace and lowercasing.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 254
    /// characters, has no @ symbol, or has an empty local part or domain.
    pub fn parse(s: &str) -> Result<Self, AccountFieldError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AccountFieldError::Empty { field: "email" });
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(AccountFieldError::TooLong {
                field: "email",
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s
            .split_once('@')
            .ok_or(AccountFieldError::MissingAtSymbol)?;

        if local.is_empty() {
            return Err(AccountFieldError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(AccountFieldError::EmptyDomain);
        }

        Ok(Self(s.to_lowercase()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A username used to log in.
///
/// Case is preserved as typed at signup; lookups are exact.
///
/// ```
/// use larder_core::Username;
///
/// assert!(Username::parse("chef_anna").is_ok());
/// assert!(Username::parse("chef anna").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Username`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 64
    /// characters, or contains characters other than ASCII letters, digits,
    /// `_`, `.` and `-`.
    pub fn parse(s: &str) -> Result<Self, AccountFieldError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AccountFieldError::Empty { field: "username" });
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(AccountFieldError::TooLong {
                field: "username",
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
        {
            return Err(AccountFieldError::InvalidUsernameChar(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Shared string-wrapper plumbing: `Display`, `FromStr`, `AsRef<str>` and
/// `TEXT` column support.
macro_rules! text_field {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = AccountFieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        // Rows are written through `parse`, so stored values are trusted.
        #[cfg(feature = "postgres")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(Self(s))
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

text_field!(Email);
text_field!(Username);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name+tag@example.co.uk").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
    }

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        let email = Email::parse("  Chef@Example.COM\n").unwrap();
        assert_eq!(email.as_str(), "chef@example.com");
    }

    #[test]
    fn test_email_rejections() {
        assert_eq!(
            Email::parse("   "),
            Err(AccountFieldError::Empty { field: "email" })
        );
        assert_eq!(
            Email::parse("no-at-symbol"),
            Err(AccountFieldError::MissingAtSymbol)
        );
        assert_eq!(
            Email::parse("@domain.com"),
            Err(AccountFieldError::EmptyLocalPart)
        );
        assert_eq!(Email::parse("user@"), Err(AccountFieldError::EmptyDomain));

        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(AccountFieldError::TooLong { field: "email", .. })
        ));
    }

    #[test]
    fn test_username_valid() {
        let name = Username::parse(" Chef.Anna-2 ").unwrap();
        assert_eq!(name.as_str(), "Chef.Anna-2");
    }

    #[test]
    fn test_username_rejections() {
        assert_eq!(
            Username::parse(""),
            Err(AccountFieldError::Empty { field: "username" })
        );
        assert_eq!(
            Username::parse("chef anna"),
            Err(AccountFieldError::InvalidUsernameChar(' '))
        );
        assert!(matches!(
            Username::parse(&"x".repeat(65)),
            Err(AccountFieldError::TooLong { max: 64, .. })
        ));
    }

    #[test]
    fn test_from_str_and_display() {
        let email: Email = "cook@example.com".parse().unwrap();
        assert_eq!(format!("{email}"), "cook@example.com");

        let name: Username = "cook".parse().unwrap();
        let s: &str = name.as_ref();
        assert_eq!(s, "cook");
    }

    #[test]
    fn test_serde_transparent() {
        let name = Username::parse("cook").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"cook\"");
    }
}
