//! Positional message formatting.
//!
//! Templates use `{0}`, `{1}` … placeholders. A format type after a comma
//! (`{0,number}`) is accepted and ignored; the argument's `Display` form is
//! always used. Single quotes escape literal text: `''` is one quote and
//! anything between quotes, braces included, is copied as-is.

use std::fmt;

use thiserror::Error;

/// Errors raised by malformed templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{` without its closing `}`.
    #[error("unmatched braces in template")]
    UnmatchedBrace,

    /// A placeholder whose index is not a non-negative integer.
    #[error("invalid argument index '{0}'")]
    InvalidIndex(String),
}

/// Substitutes `args` into `template`.
///
/// Placeholders referring past the end of `args` are left in the output
/// unchanged.
///
/// ## Errors
///
/// Returns a [`TemplateError`] for unterminated or non-numeric placeholders.
pub fn format_message(template: &str, args: &[&dyn fmt::Display]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut quoted = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            '\'' => quoted = !quoted,
            '{' if !quoted => {
                let mut placeholder = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(inner) => placeholder.push(inner),
                        None => return Err(TemplateError::UnmatchedBrace),
                    }
                }
                push_argument(&mut out, &placeholder, args)?;
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn push_argument(
    out: &mut String,
    placeholder: &str,
    args: &[&dyn fmt::Display],
) -> Result<(), TemplateError> {
    let index_text = placeholder.split(',').next().unwrap_or_default();
    let index: usize = index_text
        .parse()
        .map_err(|_| TemplateError::InvalidIndex(index_text.to_string()))?;

    match args.get(index) {
        Some(arg) => out.push_str(&arg.to_string()),
        None => {
            out.push('{');
            out.push_str(index_text);
            out.push('}');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_arguments() {
        let out = format_message("{1} before {0}", &[&"a", &"b"]).unwrap();
        assert_eq!(out, "b before a");
    }

    #[test]
    fn repeated_placeholder_is_substituted_each_time() {
        let out = format_message("{0}-{0}", &[&7]).unwrap();
        assert_eq!(out, "7-7");
    }

    #[test]
    fn format_type_is_ignored() {
        let out = format_message("count: {0,number,integer}", &[&42]).unwrap();
        assert_eq!(out, "count: 42");
    }

    #[test]
    fn missing_argument_is_left_in_place() {
        let out = format_message("{0} and {1}", &[&"only"]).unwrap();
        assert_eq!(out, "only and {1}");
    }

    #[test]
    fn quotes_escape_literal_text() {
        let out = format_message("it''s '{0}' = {0}", &[&"x"]).unwrap();
        assert_eq!(out, "it's {0} = x");
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        assert_eq!(
            format_message("oops {0", &[&"x"]),
            Err(TemplateError::UnmatchedBrace)
        );
    }

    #[test]
    fn padded_index_is_an_error() {
        assert_eq!(
            format_message("{ 0 }", &[&"x"]),
            Err(TemplateError::InvalidIndex(" 0 ".to_string()))
        );
    }

    #[test]
    fn non_numeric_index_is_an_error() {
        assert_eq!(
            format_message("{name}", &[&"x"]),
            Err(TemplateError::InvalidIndex("name".to_string()))
        );
    }
}
