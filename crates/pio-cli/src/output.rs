//! Output formatting utilities.

use pio_spi::GrantDescriptor;

use crate::cli::OutputFormat;
use crate::commands::TokenOutcome;
use crate::CliResult;

/// Renders a token request outcome.
///
/// ## Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_outcome(outcome: &TokenOutcome, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => Ok(match outcome {
            TokenOutcome::Authenticated { identity } => format!(
                "authenticated: accountName={} accountType={}",
                identity.account_name, identity.account_type
            ),
            TokenOutcome::Rejected => "rejected: credentials not accepted".to_string(),
            TokenOutcome::Error { status, response } => match &response.error_description {
                Some(description) => format!("{status} {}: {description}", response.error),
                None => format!("{status} {}", response.error),
            },
        }),
    }
}

/// Renders plugin descriptors.
///
/// ## Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_descriptors(descriptors: &[GrantDescriptor], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(descriptors)?),
        OutputFormat::Text if descriptors.is_empty() => Ok("No plugins registered.".to_string()),
        OutputFormat::Text => Ok(descriptors
            .iter()
            .map(|d| format!("{}\t{}\t{}", d.category, d.grant_type, d.account_type))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pio_spi::{AuthPluginError, AuthenticatedIdentity};

    #[test]
    fn text_outcomes() {
        let authenticated = TokenOutcome::Authenticated {
            identity: AuthenticatedIdentity::new("alice", "auth:sample"),
        };
        assert_eq!(
            render_outcome(&authenticated, OutputFormat::Text).unwrap(),
            "authenticated: accountName=alice accountType=auth:sample"
        );

        let error = TokenOutcome::from(AuthPluginError::invalid_request(
            "Required parameter [Body] missing.",
        ));
        assert_eq!(
            render_outcome(&error, OutputFormat::Text).unwrap(),
            "400 invalid_request: Required parameter [Body] missing."
        );
    }

    #[test]
    fn json_outcome_uses_camel_case_identity() {
        let outcome = TokenOutcome::Authenticated {
            identity: AuthenticatedIdentity::new("alice", "auth:sample"),
        };
        let json = render_outcome(&outcome, OutputFormat::Json).unwrap();
        assert!(json.contains("\"accountName\": \"alice\""), "{json}");
    }

    #[test]
    fn text_descriptors() {
        let descriptors = vec![GrantDescriptor {
            category: "auth".to_string(),
            grant_type: "urn:x-personium:auth:sample".to_string(),
            account_type: "auth:sample".to_string(),
        }];
        assert_eq!(
            render_descriptors(&descriptors, OutputFormat::Text).unwrap(),
            "auth\turn:x-personium:auth:sample\tauth:sample"
        );
        assert_eq!(
            render_descriptors(&[], OutputFormat::Text).unwrap(),
            "No plugins registered."
        );
    }
}
