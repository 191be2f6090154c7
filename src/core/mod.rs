//! Core loading modules
//!
//! - `document`: parsed settings resources
//! - `mappings`: the section parser
//! - `table`: fixed-size character code tables
//! - `settings`: all three tables together

pub mod context;
pub mod document;
pub mod mappings;
pub mod settings;
pub mod table;

pub use context::ParseOptions;
pub use document::{Element, SettingsDocument, SettingsSource};
pub use mappings::{
    parse_delimiter_mappings, parse_delimiter_mappings_into, parse_formula_mappings,
    parse_formula_mappings_into, parse_mappings, parse_mappings_into,
    parse_mappings_with_options, parse_symbol_mappings, parse_symbol_mappings_into, read_entry,
    MappingEntry,
};
pub use settings::FormulaSettings;
pub use table::MappingTable;
