// crates/jira-bridge-cli/src/render.rs
// ============================================================================
// Module: Output Rendering
// Description: Canonical JSON rendering of result envelopes.
// Purpose: Give every front end one byte-stable output form per format.
// Dependencies: jira-bridge-core, serde_jcs, clap
// ============================================================================

//! ## Overview
//! Envelopes render as one line of RFC 8785 canonical JSON. The `envelope`
//! format prints `{"ok":..,"data"|"error":..}`; the `flat` format prints the
//! bare data on success and `{"error":{..}}` on failure.

use clap::ValueEnum;
use jira_bridge_core::ResultEnvelope;
use thiserror::Error;

/// Output shape for rendered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tagged `ok` envelope.
    #[default]
    Envelope,
    /// Bare data, or an `error` object.
    Flat,
}

/// Rendering failures.
#[derive(Debug, Error)]
#[error("failed to render result: {0}")]
pub struct RenderError(String);

/// Renders an envelope as a single canonical JSON line (without newline).
///
/// # Errors
///
/// Returns [`RenderError`] when canonicalization fails.
pub fn render(envelope: &ResultEnvelope, format: OutputFormat) -> Result<String, RenderError> {
    let value = match format {
        OutputFormat::Envelope => envelope.to_value(),
        OutputFormat::Flat => envelope.clone().into_flat(),
    };
    serde_jcs::to_string(&value).map_err(|err| RenderError(err.to_string()))
}
