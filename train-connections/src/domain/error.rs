//! Domain error types.
//!
//! These errors represent validation failures on user-supplied input.
//! They are distinct from fetch and cache errors.

/// Error returned when a day-of-week filter isn't recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid day '{input}'. Valid options: sun, mon, tue, wed, thu, fri, sat (or full names)"
)]
pub struct InvalidDay {
    input: String,
}

impl InvalidDay {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected input, trimmed and lowercased.
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InvalidDay::new("funday");
        assert_eq!(
            err.to_string(),
            "invalid day 'funday'. Valid options: sun, mon, tue, wed, thu, fri, sat (or full names)"
        );
        assert_eq!(err.input(), "funday");
    }
}
