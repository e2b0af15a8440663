// crates/jira-bridge-core/src/lib.rs
// ============================================================================
// Module: Jira Bridge Core
// Description: Operation catalog, argument validation, and result envelopes.
// Purpose: Provide the backend-independent contract shared by every front end.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Jira Bridge Core defines the fixed catalog of issue-tracker operations, the
//! validator that re-anchors loosely-typed argument bags to those static
//! schemas, and the uniform [`ResultEnvelope`] every invocation path returns.
//! Nothing in this crate talks to the backend.
//!
//! ## Invariants
//! - The operation set is fixed at compile time; there is no dynamic registration.
//! - A [`ValidatedCall`] can only be produced by [`validate`].
//! - Envelopes carry exactly one of `data` or `error`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod envelope;
pub mod model;
pub mod operation;
pub mod registry;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use envelope::ErrorBody;
pub use envelope::ErrorCategory;
pub use envelope::ErrorKind;
pub use envelope::ResultEnvelope;
pub use operation::OperationName;
pub use registry::DefaultValue;
pub use registry::Operation;
pub use registry::ParameterKind;
pub use registry::ParameterSpec;
pub use registry::Presence;
pub use registry::RegistryError;
pub use registry::ToolDefinition;
pub use registry::lookup;
pub use registry::operations;
pub use registry::tool_definitions;
pub use validation::ArgValue;
pub use validation::ValidatedCall;
pub use validation::ValidationError;
pub use validation::json_type_name;
pub use validation::validate;
