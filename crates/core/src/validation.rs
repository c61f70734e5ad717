//! Bridge between `validator` derive rules on request DTOs and [`CoreError`].

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run the derived `validator` rules on `input`.
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(CoreError::from)
}

/// Flatten field errors into one human-readable line, sorted by field name.
///
/// Uses the rule's message when one was given, otherwise its code
/// (e.g. `length`, `email`, `range`).
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let reasons: Vec<String> = field_errors
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
