//! # texmaps
//!
//! Character mapping tables for math typesetting, loaded from an XML
//! settings resource.
//!
//! A settings resource holds up to three sections, each a list of `Map`
//! elements:
//!
//! - `CharacterToSymbolMappings`: character → symbol name (`symbol` attribute)
//! - `CharacterToFormulaMappings`: character → predefined formula name (`formula` attribute)
//! - `CharacterToDelimiterMappings`: character → delimiter symbol name (`symbol` attribute)
//!
//! Each section fills a fixed-size table indexed by the character's UTF-16
//! code unit. Loading is strict: the first malformed entry aborts the parse.
//!
//! ## Usage Examples
//!
//! ```rust
//! use texmaps::{parse_symbol_mappings, SettingsDocument};
//!
//! let xml = r#"<root>
//!   <CharacterToSymbolMappings>
//!     <Map char="+" symbol="plus"/>
//!     <Map char="-" symbol="minus"/>
//!   </CharacterToSymbolMappings>
//! </root>"#;
//!
//! let doc = SettingsDocument::parse(xml, "example.xml").unwrap();
//! let table = parse_symbol_mappings(&doc).unwrap();
//! assert_eq!(table.get_char('+'), Some("plus"));
//! assert_eq!(table.get_char('*'), None);
//! ```
//!
//! ### Built-in resource
//!
//! ```rust
//! let settings = texmaps::default_settings().unwrap();
//! assert_eq!(settings.delimiter('('), Some("lbrack"));
//! ```

/// Core loading modules
pub mod core;

/// Data layer - schema constants and the built-in resource
pub mod data;

/// Utility modules
pub mod utils;

// Re-export core loading
pub use crate::core::{
    parse_delimiter_mappings, parse_delimiter_mappings_into, parse_formula_mappings,
    parse_formula_mappings_into, parse_mappings, parse_mappings_into,
    parse_mappings_with_options, parse_symbol_mappings, parse_symbol_mappings_into,
    FormulaSettings, MappingTable, ParseOptions, SettingsDocument, SettingsSource,
};

// Re-export data
pub use data::constants;
pub use data::{default_settings, MappingKind, NUMBER_OF_CHAR_CODES, RESOURCE_NAME};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{SettingsError, SettingsResult};
pub use utils::resources;

/// Load all three tables from XML text
///
/// # Arguments
/// * `xml` - settings resource text
/// * `name` - resource name used in error messages
pub fn load_settings_str(xml: &str, name: &str) -> SettingsResult<FormulaSettings> {
    let doc = SettingsDocument::parse(xml, name)?;
    FormulaSettings::load(&doc)
}

/// Load all three tables from a byte stream
pub fn load_settings_reader<R: std::io::Read>(
    reader: R,
    name: &str,
) -> SettingsResult<FormulaSettings> {
    let source = SettingsSource::from_reader(reader, name)?;
    FormulaSettings::load(&source.document()?)
}
