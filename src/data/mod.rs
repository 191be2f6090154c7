//! Data layer - schema constants and the built-in resource
//!
//! This module contains the static data the parser works from:
//! - Section, element and attribute names
//! - Table sizes
//! - The embedded default settings resource

pub mod constants;
pub mod defaults;

// Re-export commonly used items
pub use constants::{MappingKind, CHAR_TABLE_SIZE, NUMBER_OF_CHAR_CODES, SECTION_KINDS};
pub use defaults::{default_settings, DEFAULT_SETTINGS_XML, RESOURCE_NAME};
