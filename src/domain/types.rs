//! Validated value objects shared by the post entities and forms.
//!
//! Constructors are the only way in, so a `PostId` is always positive, an
//! `AuthorEmail` is lower-cased and well formed, and an `SvgImage` holds an
//! `<svg>` document.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Reasons a raw value was refused by one of the constructors below.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TypeConstraintError {
    #[error("id must be greater than zero")]
    NonPositiveId,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("value cannot be empty")]
    EmptyString,
    /// Catch-all for payload fields with a bespoke format, such as dates.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("image is not a well-formed svg document")]
    InvalidImage,
}

macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier, rejecting zero and negative values.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value <= 0 {
                    return Err(TypeConstraintError::NonPositiveId);
                }
                Ok(Self(value))
            }

            /// Returns the raw `i64` value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

id_newtype!(PostId, "Identifier the service assigned to a post.");
id_newtype!(AuthorId, "Identifier of a post author.");

/// Lower-cased email of a post author.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AuthorEmail(String);

impl AuthorEmail {
    /// Trims, lower-cases and validates an email address.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let email = email.into().trim().to_lowercase();
        if !email.validate_email() {
            return Err(TypeConstraintError::InvalidEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the normalized email.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AuthorEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text that is trimmed on construction and never blank.
macro_rules! text_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Trims the value and rejects blank input.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                match value.trim() {
                    "" => Err(TypeConstraintError::EmptyString),
                    trimmed if trimmed.len() == value.len() => Ok(Self(value)),
                    trimmed => Ok(Self(trimmed.to_string())),
                }
            }

            /// Borrow the trimmed text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

text_newtype!(PostContent, "Text body of a post.");
text_newtype!(CategoryName, "Category label attached to a post.");

/// Inline vector image attached to a post.
///
/// Only documents whose root element is `<svg>` are accepted. An optional XML
/// prolog and leading comments are tolerated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub struct SvgImage(String);

impl SvgImage {
    /// Accepts a trimmed `<svg>` document, optionally preceded by a prolog or comments.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let document = value.into().trim().to_string();
        if !is_svg_document(&document) {
            return Err(TypeConstraintError::InvalidImage);
        }
        Ok(Self(document))
    }

    /// Borrow the svg markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_svg_document(document: &str) -> bool {
    let mut rest = document;
    // Skip the prolog and any comments preceding the root element.
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("<?") {
            match after.find("?>") {
                Some(end) => rest = &after[end + 2..],
                None => return false,
            }
        } else if let Some(after) = rest.strip_prefix("<!--") {
            match after.find("-->") {
                Some(end) => rest = &after[end + 3..],
                None => return false,
            }
        } else {
            break;
        }
    }

    let opens_root = rest.starts_with("<svg")
        && rest[4..]
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/');

    opens_root && (rest.ends_with("</svg>") || rest.ends_with("/>"))
}

impl Display for SvgImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SvgImage {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
