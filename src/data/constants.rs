//! Names and sizes that make up the settings resource schema
//!
//! The settings resource groups `Map` elements into three optional
//! sections. Each section fills one table indexed by character code.

use phf::phf_map;

/// Element tag of a single mapping entry
pub const MAP_ELEMENT: &str = "Map";

/// Attribute holding the mapped character
pub const CHAR_ATTR: &str = "char";

/// Value attribute of symbol and delimiter entries
pub const SYMBOL_ATTR: &str = "symbol";

/// Value attribute of formula entries
pub const FORMULA_ATTR: &str = "formula";

pub const SYMBOL_SECTION: &str = "CharacterToSymbolMappings";
pub const FORMULA_SECTION: &str = "CharacterToFormulaMappings";
pub const DELIMITER_SECTION: &str = "CharacterToDelimiterMappings";

/// Size of the symbol and formula tables (every UTF-16 code unit)
pub const CHAR_TABLE_SIZE: usize = 65536;

/// Number of character codes addressable in a font, which bounds the
/// delimiter table
pub const NUMBER_OF_CHAR_CODES: usize = 256;

/// The kind of table a mapping section fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    /// Character to symbol name
    Symbol,
    /// Character to predefined formula name
    Formula,
    /// Character to delimiter symbol name
    Delimiter,
}

impl MappingKind {
    pub const ALL: [MappingKind; 3] = [
        MappingKind::Symbol,
        MappingKind::Formula,
        MappingKind::Delimiter,
    ];

    /// Tag name of the section element
    pub fn section(self) -> &'static str {
        match self {
            MappingKind::Symbol => SYMBOL_SECTION,
            MappingKind::Formula => FORMULA_SECTION,
            MappingKind::Delimiter => DELIMITER_SECTION,
        }
    }

    /// Tag name of the entries inside the section
    pub fn element(self) -> &'static str {
        MAP_ELEMENT
    }

    /// Attribute carrying the mapped name
    pub fn value_attribute(self) -> &'static str {
        match self {
            MappingKind::Symbol | MappingKind::Delimiter => SYMBOL_ATTR,
            MappingKind::Formula => FORMULA_ATTR,
        }
    }

    /// Number of entries in a table of this kind
    pub fn table_size(self) -> usize {
        match self {
            MappingKind::Symbol | MappingKind::Formula => CHAR_TABLE_SIZE,
            MappingKind::Delimiter => NUMBER_OF_CHAR_CODES,
        }
    }

    /// Look up a kind by its section name
    pub fn from_section(section: &str) -> Option<Self> {
        SECTION_KINDS.get(section).copied()
    }
}

impl std::fmt::Display for MappingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingKind::Symbol => write!(f, "symbol"),
            MappingKind::Formula => write!(f, "formula"),
            MappingKind::Delimiter => write!(f, "delimiter"),
        }
    }
}

/// Section element name to the kind of table it fills
pub static SECTION_KINDS: phf::Map<&'static str, MappingKind> = phf_map! {
    "CharacterToSymbolMappings" => MappingKind::Symbol,
    "CharacterToFormulaMappings" => MappingKind::Formula,
    "CharacterToDelimiterMappings" => MappingKind::Delimiter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lookup_round_trips() {
        for kind in MappingKind::ALL {
            assert_eq!(MappingKind::from_section(kind.section()), Some(kind));
        }
        assert_eq!(MappingKind::from_section("Map"), None);
    }

    #[test]
    fn test_value_attributes() {
        assert_eq!(MappingKind::Symbol.value_attribute(), "symbol");
        assert_eq!(MappingKind::Formula.value_attribute(), "formula");
        assert_eq!(MappingKind::Delimiter.value_attribute(), "symbol");
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(MappingKind::Symbol.table_size(), 65536);
        assert_eq!(MappingKind::Formula.table_size(), 65536);
        assert_eq!(MappingKind::Delimiter.table_size(), NUMBER_OF_CHAR_CODES);
    }
}
