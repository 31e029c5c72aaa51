//! Password evaluation against a [`PasswordRules`] set.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::rules::PasswordRules;

/// Pool sizes used for the entropy estimate.
const UPPERCASE_POOL: u32 = 26;
const LOWERCASE_POOL: u32 = 26;
const DIGIT_POOL: u32 = 10;
/// ASCII punctuation plus space.
const SYMBOL_POOL: u32 = 33;
/// Anything outside printable ASCII.
const OTHER_POOL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    MinLength,
    MaxLength,
    MinUppercase,
    MinLowercase,
    MinDigits,
    MinSymbols,
    MinEntropy,
    NoWhitespace,
}

/// Outcome of one active rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleCheck {
    pub rule: Rule,
    /// The configured threshold (for `NoWhitespace`, the allowed count: 0).
    pub required: f64,
    /// What the password actually has.
    pub actual: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// One entry per active rule, in [`Rule`] declaration order.
    pub checks: Vec<RuleCheck>,
    pub entropy_bits: f64,
    /// `true` iff every check passed.
    pub passed: bool,
}

impl Evaluation {
    pub fn failures(&self) -> impl Iterator<Item = &RuleCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Character class counts for a password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Composition {
    length: usize,
    uppercase: usize,
    lowercase: usize,
    digits: usize,
    symbols: usize,
    whitespace: usize,
    other: usize,
}

impl Composition {
    fn of(password: &str) -> Self {
        let mut c = Composition::default();
        for ch in password.chars() {
            c.length += 1;
            if ch.is_whitespace() {
                c.whitespace += 1;
            }
            if ch.is_ascii_uppercase() {
                c.uppercase += 1;
            } else if ch.is_ascii_lowercase() {
                c.lowercase += 1;
            } else if ch.is_ascii_digit() {
                c.digits += 1;
            } else if ch.is_ascii_punctuation() || ch == ' ' {
                c.symbols += 1;
            } else {
                c.other += 1;
            }
        }
        c
    }

    fn pool_size(&self) -> u32 {
        [
            (self.uppercase, UPPERCASE_POOL),
            (self.lowercase, LOWERCASE_POOL),
            (self.digits, DIGIT_POOL),
            (self.symbols, SYMBOL_POOL),
            (self.other, OTHER_POOL),
        ]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(_, pool)| pool)
        .sum()
    }
}

/// Estimated entropy in bits: `length * log2(pool)`, where the pool is the
/// combined size of every character class that appears in `password`.
pub fn entropy_bits(password: &str) -> f64 {
    let c = Composition::of(password);
    let pool = c.pool_size();
    if pool == 0 {
        return 0.0;
    }
    c.length as f64 * f64::from(pool).log2()
}

fn at_least(rule: Rule, min: usize, actual: usize) -> RuleCheck {
    RuleCheck {
        rule,
        required: min as f64,
        actual: actual as f64,
        passed: actual >= min,
    }
}

/// Evaluate `password` against every active rule in `rules`.
///
/// # Errors
///
/// Returns [`BrutusError::InvalidRules`](crate::BrutusError::InvalidRules) if
/// the rules fail [`PasswordRules::validate`].
///
/// # Examples
///
/// ```
/// use brutus::{evaluate, PasswordRules};
///
/// let rules = PasswordRules::new().min_length(8).min_digits(1);
/// assert!(evaluate("hunter2hunter", &rules).unwrap().passed);
/// assert!(!evaluate("hunter", &rules).unwrap().passed);
/// ```
pub fn evaluate(password: &str, rules: &PasswordRules) -> Result<Evaluation> {
    rules.validate()?;

    let c = Composition::of(password);
    let entropy = entropy_bits(password);
    let checks: Vec<RuleCheck> = [
        rules.min_length.map(|min| at_least(Rule::MinLength, min, c.length)),
        rules.max_length.map(|max| RuleCheck {
            rule: Rule::MaxLength,
            required: max as f64,
            actual: c.length as f64,
            passed: c.length <= max,
        }),
        rules.min_uppercase.map(|min| at_least(Rule::MinUppercase, min, c.uppercase)),
        rules.min_lowercase.map(|min| at_least(Rule::MinLowercase, min, c.lowercase)),
        rules.min_digits.map(|min| at_least(Rule::MinDigits, min, c.digits)),
        rules.min_symbols.map(|min| at_least(Rule::MinSymbols, min, c.symbols)),
        rules.min_entropy_bits.map(|bits| RuleCheck {
            rule: Rule::MinEntropy,
            required: bits,
            actual: entropy,
            passed: entropy >= bits,
        }),
        rules.forbid_whitespace.then(|| RuleCheck {
            rule: Rule::NoWhitespace,
            required: 0.0,
            actual: c.whitespace as f64,
            passed: c.whitespace == 0,
        }),
    ]
    .into_iter()
    .flatten()
    .collect();

    let passed = checks.iter().all(|check| check.passed);
    debug!(passed, entropy_bits = entropy, checks = checks.len(), "password evaluated");

    Ok(Evaluation {
        checks,
        entropy_bits: entropy,
        passed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(eval: &Evaluation, rule: Rule) -> &RuleCheck {
        eval.checks.iter().find(|c| c.rule == rule).unwrap()
    }

    // ── entropy ────────────────────────────────────────────────────────

    #[test]
    fn test_entropy_pools() {
        assert_eq!(entropy_bits(""), 0.0);
        // 8 lowercase: 8 * log2(26)
        assert!((entropy_bits("abcdefgh") - 8.0 * 26f64.log2()).abs() < 1e-9);
        // 4 chars over lower + upper + digits + symbols = 95
        assert!((entropy_bits("aA1!") - 4.0 * 95f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_counts_chars_not_bytes() {
        // Two non-ASCII chars: 2 * log2(100)
        assert!((entropy_bits("éü") - 2.0 * 100f64.log2()).abs() < 1e-9);
    }

    // ── evaluate ───────────────────────────────────────────────────────

    #[test]
    fn test_no_rules_always_passes() {
        let eval = evaluate("", &PasswordRules::new()).unwrap();
        assert!(eval.passed);
        assert!(eval.checks.is_empty());
    }

    #[test]
    fn test_strict_accepts_strong_password() {
        let eval = evaluate("Correct-Horse-42-Battery", &PasswordRules::strict()).unwrap();
        assert!(eval.passed, "failures: {:?}", eval.failures().collect::<Vec<_>>());
        assert_eq!(eval.checks.len(), 7);
    }

    #[test]
    fn test_strict_reports_each_failure() {
        let eval = evaluate("password", &PasswordRules::strict()).unwrap();
        assert!(!eval.passed);
        let failed: Vec<Rule> = eval.failures().map(|c| c.rule).collect();
        assert_eq!(
            failed,
            vec![
                Rule::MinLength,
                Rule::MinUppercase,
                Rule::MinDigits,
                Rule::MinSymbols,
                Rule::MinEntropy
            ]
        );
        assert!(check(&eval, Rule::MinLowercase).passed);
        assert_eq!(check(&eval, Rule::MinLength).actual, 8.0);
    }

    #[test]
    fn test_max_length_and_whitespace() {
        let rules = PasswordRules::new().max_length(5).forbid_whitespace(true);
        let eval = evaluate("a b c d", &rules).unwrap();
        assert!(!check(&eval, Rule::MaxLength).passed);
        assert_eq!(check(&eval, Rule::NoWhitespace).actual, 3.0);
        assert!(!eval.passed);
    }

    #[test]
    fn test_checks_follow_rule_order() {
        let rules = PasswordRules::new()
            .forbid_whitespace(true)
            .min_digits(1)
            .max_length(20)
            .min_length(4);
        let eval = evaluate("abc1", &rules).unwrap();
        let order: Vec<Rule> = eval.checks.iter().map(|c| c.rule).collect();
        assert_eq!(
            order,
            vec![Rule::MinLength, Rule::MaxLength, Rule::MinDigits, Rule::NoWhitespace]
        );
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let rules = PasswordRules::new().min_length(9).max_length(4);
        assert!(evaluate("whatever", &rules).is_err());

        let rules = PasswordRules::new()
            .max_length(5)
            .min_digits(usize::MAX)
            .min_symbols(1);
        let err = evaluate("12345", &rules).unwrap_err();
        assert!(err.to_string().contains("Invalid rules"), "got: {err}");
    }
}
