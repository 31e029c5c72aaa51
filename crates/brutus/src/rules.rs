//! Fluent password rule configuration.

use serde::Serialize;

use crate::error::{BrutusError, Result};

/// A rule set. Every rule is off until set.
///
/// # Examples
///
/// ```
/// use brutus::PasswordRules;
///
/// let rules = PasswordRules::new()
///     .min_length(10)
///     .min_digits(2)
///     .min_entropy_bits(50.0);
/// assert_eq!(rules.min_length, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PasswordRules {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_uppercase: Option<usize>,
    pub min_lowercase: Option<usize>,
    pub min_digits: Option<usize>,
    pub min_symbols: Option<usize>,
    pub min_entropy_bits: Option<f64>,
    pub forbid_whitespace: bool,
}

impl PasswordRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// 12+ characters, one of each class, 60 bits of entropy, no whitespace.
    pub fn strict() -> Self {
        Self::new()
            .min_length(12)
            .min_uppercase(1)
            .min_lowercase(1)
            .min_digits(1)
            .min_symbols(1)
            .min_entropy_bits(60.0)
            .forbid_whitespace(true)
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn min_uppercase(mut self, n: usize) -> Self {
        self.min_uppercase = Some(n);
        self
    }

    pub fn min_lowercase(mut self, n: usize) -> Self {
        self.min_lowercase = Some(n);
        self
    }

    pub fn min_digits(mut self, n: usize) -> Self {
        self.min_digits = Some(n);
        self
    }

    pub fn min_symbols(mut self, n: usize) -> Self {
        self.min_symbols = Some(n);
        self
    }

    pub fn min_entropy_bits(mut self, bits: f64) -> Self {
        self.min_entropy_bits = Some(bits);
        self
    }

    pub fn forbid_whitespace(mut self, forbid: bool) -> Self {
        self.forbid_whitespace = forbid;
        self
    }

    /// Check that the rules can be satisfied at all.
    ///
    /// # Errors
    ///
    /// Returns [`BrutusError::InvalidRules`] if `max_length` is below
    /// `min_length`, if the class minimums together exceed `max_length`, or
    /// if the entropy threshold is negative or not a number.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if max < min {
                return Err(BrutusError::InvalidRules(format!(
                    "max_length {max} is below min_length {min}"
                )));
            }
        }
        if let Some(max) = self.max_length {
            // An overflowing total exceeds any max_length.
            let required = [
                self.min_uppercase,
                self.min_lowercase,
                self.min_digits,
                self.min_symbols,
            ]
            .iter()
            .flatten()
            .fold(0usize, |total, n| total.saturating_add(*n));
            if required > max {
                return Err(BrutusError::InvalidRules(format!(
                    "character class minimums need {required} characters but max_length is {max}"
                )));
            }
        }
        if let Some(bits) = self.min_entropy_bits {
            if bits.is_nan() || bits < 0.0 {
                return Err(BrutusError::InvalidRules(format!(
                    "min_entropy_bits must be a non-negative number, got {bits}"
                )));
            }
        }
        Ok(())
    }
}
