//! Assertions used by the scenario suites.
//!
//! Each check returns an [`AssertionResult`] instead of panicking so a
//! scenario can turn a failure into a [`ProbeError::AssertionFailed`] with `?`.

use crate::money::{approx_eq, format_price};
use crate::result::{ProbeError, ProbeResult};
use std::fmt::Debug;

/// Result of an assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Failure message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Prefix the failure message with what was being checked
    #[must_use]
    pub fn context(mut self, what: &str) -> Self {
        if !self.passed {
            self.message = format!("{what}: {}", self.message);
        }
        self
    }

    /// Convert to a result for `?` propagation
    pub fn into_result(self) -> ProbeResult<()> {
        if self.passed {
            Ok(())
        } else {
            Err(ProbeError::assertion(self.message))
        }
    }
}

/// Assertion helpers
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    #[must_use]
    pub fn equals<T: PartialEq + Debug>(actual: &T, expected: &T) -> AssertionResult {
        if actual == expected {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    /// Assert text contains a fragment
    #[must_use]
    pub fn contains(haystack: &str, needle: &str) -> AssertionResult {
        if haystack.contains(needle) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected '{haystack}' to contain '{needle}'"))
        }
    }

    /// Assert text contains a fragment, ignoring case
    #[must_use]
    pub fn contains_ignore_case(haystack: &str, needle: &str) -> AssertionResult {
        if haystack.to_lowercase().contains(&needle.to_lowercase()) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!(
                "expected '{haystack}' to contain '{needle}' (any case)"
            ))
        }
    }

    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(message)
        }
    }

    /// Assert a condition is false
    #[must_use]
    pub fn is_false(condition: bool, message: &str) -> AssertionResult {
        Self::is_true(!condition, message)
    }

    /// Assert two amounts agree to the cent
    #[must_use]
    pub fn money_eq(actual: f64, expected: f64) -> AssertionResult {
        if approx_eq(actual, expected) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!(
                "expected {}, got {}",
                format_price(expected),
                format_price(actual)
            ))
        }
    }

    /// Assert a sequence never decreases
    #[must_use]
    pub fn non_decreasing<T: PartialOrd + Debug>(values: &[T]) -> AssertionResult {
        match values.windows(2).position(|pair| pair[0] > pair[1]) {
            None => AssertionResult::pass(),
            Some(i) => AssertionResult::fail(format!(
                "{:?} > {:?} at position {i}",
                values[i],
                values[i + 1]
            )),
        }
    }

    /// Assert a sequence never increases
    #[must_use]
    pub fn non_increasing<T: PartialOrd + Debug>(values: &[T]) -> AssertionResult {
        match values.windows(2).position(|pair| pair[0] < pair[1]) {
            None => AssertionResult::pass(),
            Some(i) => AssertionResult::fail(format!(
                "{:?} < {:?} at position {i}",
                values[i],
                values[i + 1]
            )),
        }
    }

    /// Assert a collection has expected length
    #[must_use]
    pub fn has_length<T>(collection: &[T], expected: usize) -> AssertionResult {
        if collection.len() == expected {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!(
                "expected length {expected}, got {}",
                collection.len()
            ))
        }
    }

    /// Assert a URL path ends with `path`
    #[must_use]
    pub fn url_ends_with(url: &str, path: &str) -> AssertionResult {
        if url.ends_with(path) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected URL ending in '{path}', got '{url}'"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod assertion_result_tests {
        use super::*;

        #[test]
        fn test_pass_converts_to_ok() {
            assert!(AssertionResult::pass().into_result().is_ok());
        }

        #[test]
        fn test_fail_converts_to_assertion_error() {
            let err = AssertionResult::fail("badge hidden")
                .context("cart badge")
                .into_result()
                .unwrap_err();
            assert!(matches!(err, ProbeError::AssertionFailed { .. }));
            assert_eq!(err.to_string(), "Assertion failed: cart badge: badge hidden");
        }

        #[test]
        fn test_context_leaves_pass_untouched() {
            assert_eq!(AssertionResult::pass().context("x"), AssertionResult::pass());
        }
    }

    mod helper_tests {
        use super::*;

        #[test]
        fn test_equals() {
            assert!(Assertion::equals(&3, &3).passed);
            let failed = Assertion::equals(&"a", &"b");
            assert!(!failed.passed);
            assert!(failed.message.contains("\"b\""));
        }

        #[test]
        fn test_contains() {
            assert!(Assertion::contains("Sauce Labs Backpack", "Backpack").passed);
            assert!(!Assertion::contains("Sauce Labs Backpack", "backpack").passed);
            assert!(Assertion::contains_ignore_case("Thank you for your order!", "THANK YOU").passed);
        }

        #[test]
        fn test_money_eq_tolerates_float_noise() {
            assert!(Assertion::money_eq(29.99 + 2.40, 32.39).passed);
            let failed = Assertion::money_eq(32.30, 32.39);
            assert_eq!(failed.message, "expected $32.39, got $32.30");
        }

        #[test]
        fn test_ordering() {
            assert!(Assertion::non_decreasing(&[7.99, 9.99, 9.99, 49.99]).passed);
            assert!(!Assertion::non_decreasing(&[9.99, 7.99]).passed);
            assert!(Assertion::non_increasing(&["c", "b", "a"]).passed);
            assert!(!Assertion::non_increasing(&[1, 2]).passed);
            assert!(Assertion::non_decreasing::<u8>(&[]).passed);
        }

        #[test]
        fn test_length_and_url() {
            assert!(Assertion::has_length(&[1, 2], 2).passed);
            assert!(!Assertion::has_length(&[1], 2).passed);
            assert!(Assertion::url_ends_with("https://www.saucedemo.com/cart.html", "/cart.html").passed);
            assert!(Assertion::is_false(false, "unused").passed);
            assert!(!Assertion::is_true(false, "flag").passed);
        }
    }
}
