#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Argument '{argument}' must not be empty.")]
pub struct ArgumentError {
    argument: &'static str,
}

impl ArgumentError {
    pub fn new(argument: &'static str) -> Self {
        ArgumentError { argument }
    }

    /// Name of the argument that failed validation.
    pub fn argument(&self) -> &'static str {
        self.argument
    }
}

pub struct Guard;

impl Guard {
    /// Returns the value unchanged, or an `ArgumentError` naming `argument` when it is empty.
    ///
    /// Whitespace is a value here, so secrets such as passphrases pass through untouched.
    pub fn not_empty<'a>(value: &'a str, argument: &'static str) -> Result<&'a str, ArgumentError> {
        if value.is_empty() {
            return Err(ArgumentError::new(argument));
        }
        Ok(value)
    }

    /// Like `not_empty`, but also rejects values made only of whitespace.
    pub fn not_blank<'a>(value: &'a str, argument: &'static str) -> Result<&'a str, ArgumentError> {
        if value.trim().is_empty() {
            return Err(ArgumentError::new(argument));
        }
        Ok(value)
    }
}
