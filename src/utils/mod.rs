//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and error reporting
//! - Resource lookup
//! - Error types and result types

pub mod diagnostics;
pub mod error;
pub mod resources;

// Re-export commonly used items
pub use diagnostics::{
    check_settings, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel,
};
pub use error::{SettingsError, SettingsResult};
pub use resources::{
    load_resource_text, read_resource_text, EmbeddedResourceProvider, MemoryResourceProvider,
    ResourceError, ResourceProvider, StdResourceProvider,
};
