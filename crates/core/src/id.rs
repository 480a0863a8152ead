//! Strongly-typed identifiers used across the domain.
//!
//! Ids are integers assigned by the store on insert; the application never
//! mints them.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a project.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(i64);

/// Identifier of a project member.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

/// Identifier of a task.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

/// Identifier of a comment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

/// Numeric coercion of a trimmed path segment.
///
/// Accepts decimal integers, `0x`/`0o`/`0b` prefixed literals and decimal or
/// exponent forms that denote a whole number (`"1.0"`, `"1e1"`). Fractions,
/// non-finite values and anything outside `i64` yield `None`.
fn coerce_integer(s: &str) -> Option<i64> {
    if let Ok(value) = s.parse::<i64>() {
        return Some(value);
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return i64::from_str_radix(digits, radix).ok();
    }

    // `f64::from_str` also takes "inf" and "NaN"; the finiteness check drops them.
    let value = s.parse::<f64>().ok()?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    if value.is_finite() && value.fract() == 0.0 && in_range {
        Some(value as i64)
    } else {
        None
    }
}

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        /// Parses a path segment.
        ///
        /// A blank segment is a missing identifier (`Validation`). Anything
        /// [`coerce_integer`] cannot turn into a whole number is `InvalidId`.
        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(DomainError::validation(concat!($name, " is required")));
                }
                coerce_integer(s)
                    .map(Self)
                    .ok_or_else(|| DomainError::invalid_id(format!("{}: not an integer: {s}", $name)))
            }
        }
    };
}

impl_int_newtype!(ProjectId, "ProjectId");
impl_int_newtype!(MemberId, "MemberId");
impl_int_newtype!(TaskId, "TaskId");
impl_int_newtype!(CommentId, "CommentId");
