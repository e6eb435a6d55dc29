//! Computability-tagged values
//!
//! Ratio statistics are undefined when their denominator is zero. Rather than
//! leaking NaN or infinity, every such value is wrapped in [`Estimate`] so
//! callers must decide how to display the undefined case.

use serde::{Deserialize, Serialize};

/// A value that may be undefined because of a zero denominator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Estimate<T> {
    /// The value is defined
    Computable(T),
    /// A required denominator was zero
    NotComputable,
}

impl<T> Estimate<T> {
    /// Borrow the value if computable
    pub fn value(&self) -> Option<&T> {
        match self {
            Estimate::Computable(v) => Some(v),
            Estimate::NotComputable => None,
        }
    }

    /// Consume into an `Option`
    pub fn into_option(self) -> Option<T> {
        match self {
            Estimate::Computable(v) => Some(v),
            Estimate::NotComputable => None,
        }
    }

    /// Whether the value is defined
    pub fn is_computable(&self) -> bool {
        matches!(self, Estimate::Computable(_))
    }

    /// Transform the computable value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Estimate<U> {
        match self {
            Estimate::Computable(v) => Estimate::Computable(f(v)),
            Estimate::NotComputable => Estimate::NotComputable,
        }
    }

    /// Chain a computation that may itself be undefined
    pub fn and_then<U, F: FnOnce(T) -> Estimate<U>>(self, f: F) -> Estimate<U> {
        match self {
            Estimate::Computable(v) => f(v),
            Estimate::NotComputable => Estimate::NotComputable,
        }
    }

    /// Return the value or a fallback
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Estimate::Computable(v) => v,
            Estimate::NotComputable => default,
        }
    }
}

impl<T> From<Option<T>> for Estimate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Estimate::Computable(v),
            None => Estimate::NotComputable,
        }
    }
}
