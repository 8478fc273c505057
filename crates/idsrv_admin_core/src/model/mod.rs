//! Domain model for identity-server configuration documents.
//!
//! # Responsibility
//! - Define the canonical shapes persisted by the admin stores.
//! - Own the default values of every configurable field.
//!
//! # Invariants
//! - Defaults come from entity constructors only (`Client::new`, `Scope::new`).
//! - `validate()` must pass before a document is persisted.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Implements `NAMES`, `name()` and a case-insensitive `FromStr` for a
/// fieldless enum whose external names are its variant names.
///
/// `name()` is an exhaustive match, so a variant missing from the list fails
/// to compile.
macro_rules! named_variants {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl $ty {
            const TABLE: &'static [(&'static str, $ty)] =
                &[$((stringify!($variant), $ty::$variant)),+];

            /// External names accepted by parameter binding.
            pub const NAMES: &'static [&'static str] = &[$(stringify!($variant)),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant)),+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::model::UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                $crate::model::match_name(value, Self::TABLE).ok_or_else(|| {
                    $crate::model::UnknownVariant {
                        kind: $kind,
                        value: value.to_string(),
                    }
                })
            }
        }
    };
}

pub mod client;
pub mod scope;
pub mod secret;

/// Upper bound shared by every lifetime-like integer field.
pub const MAX_LIFETIME_SECONDS: u32 = i32::MAX as u32;

/// Error returned when an enum name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for UnknownVariant {}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace.
    BlankField(&'static str),
    /// A lifetime field exceeds `MAX_LIFETIME_SECONDS`.
    LifetimeOutOfRange { field: &'static str, value: u32 },
    /// A nested element (claim, secret) failed validation.
    Element {
        field: &'static str,
        index: usize,
        source: Box<ValidationError>,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::LifetimeOutOfRange { field, value } => write!(
                f,
                "{field} ({value}) must be <= {MAX_LIFETIME_SECONDS}"
            ),
            Self::Element {
                field,
                index,
                source,
            } => write!(f, "{field}[{index}]: {source}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Element { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_lifetime(value: u32, field: &'static str) -> Result<(), ValidationError> {
    if value > MAX_LIFETIME_SECONDS {
        return Err(ValidationError::LifetimeOutOfRange { field, value });
    }
    Ok(())
}

pub(crate) fn validate_each<T>(
    items: &[T],
    field: &'static str,
    validate: impl Fn(&T) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        validate(item).map_err(|err| ValidationError::Element {
            field,
            index,
            source: Box::new(err),
        })?;
    }
    Ok(())
}

/// Parses an enum name case-insensitively against its known variant names.
pub(crate) fn match_name<T: Copy>(value: &str, table: &[(&'static str, T)]) -> Option<T> {
    let trimmed = value.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        .map(|(_, variant)| *variant)
}
