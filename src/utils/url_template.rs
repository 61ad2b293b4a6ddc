//! Placeholder extraction for playground URL templates.
//!
//! A URL template may embed `{name}` placeholders that clients substitute at
//! render time, e.g. `https://play.example.com/run?code={code}`. This module
//! parses a template into its placeholder names, rejecting malformed syntax
//! (unbalanced braces, empty or non-word placeholder names).

use thiserror::Error;

/// Template syntax violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unbalanced braces in URL template")]
    UnbalancedBraces,
    #[error("invalid placeholder name in URL template")]
    InvalidPlaceholder,
}

/// Extracts the placeholder names appearing in `template`, in order.
///
/// Placeholder names are restricted to word characters (`[A-Za-z0-9_]`).
/// Nested, unclosed, or unopened braces and empty placeholders are
/// syntax errors.
///
/// # Errors
///
/// Returns [`TemplateError`] when the template syntax is malformed.
pub fn template_variables(template: &str) -> Result<Vec<String>, TemplateError> {
    let mut variables = Vec::new();
    let mut open_at: Option<usize> = None;

    for (i, c) in template.char_indices() {
        match c {
            '{' => {
                if open_at.is_some() {
                    return Err(TemplateError::UnbalancedBraces);
                }
                open_at = Some(i);
            }
            '}' => {
                let Some(start) = open_at.take() else {
                    return Err(TemplateError::UnbalancedBraces);
                };

                let name = &template[start + 1..i];
                if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    return Err(TemplateError::InvalidPlaceholder);
                }
                variables.push(name.to_string());
            }
            _ => {}
        }
    }

    if open_at.is_some() {
        return Err(TemplateError::UnbalancedBraces);
    }

    Ok(variables)
}
