//! The three mapping tables loaded together

use crate::core::context::ParseOptions;
use crate::core::document::{SettingsDocument, SettingsSource};
use crate::core::mappings::parse_mappings_with_options;
use crate::core::table::MappingTable;
use crate::data::constants::MappingKind;
use crate::utils::error::{SettingsError, SettingsResult};
use crate::utils::resources::ResourceProvider;

/// Symbol, formula and delimiter tables of one or more settings resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaSettings {
    pub symbols: MappingTable,
    pub formulas: MappingTable,
    pub delimiters: MappingTable,
}

impl Default for FormulaSettings {
    fn default() -> Self {
        Self {
            symbols: MappingTable::for_kind(MappingKind::Symbol),
            formulas: MappingTable::for_kind(MappingKind::Formula),
            delimiters: MappingTable::for_kind(MappingKind::Delimiter),
        }
    }
}

impl FormulaSettings {
    /// Empty tables of the standard sizes
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all three sections of `doc`
    pub fn load(doc: &SettingsDocument<'_>) -> SettingsResult<Self> {
        Self::load_with_options(doc, &ParseOptions::default())
    }

    pub fn load_with_options(
        doc: &SettingsDocument<'_>,
        options: &ParseOptions,
    ) -> SettingsResult<Self> {
        let mut settings = Self::new();
        settings.merge_with_options(doc, options)?;
        Ok(settings)
    }

    /// Layer the sections of `doc` over the current tables
    pub fn merge(&mut self, doc: &SettingsDocument<'_>) -> SettingsResult<()> {
        self.merge_with_options(doc, &ParseOptions::default())
    }

    /// Sections are read symbol, formula, delimiter. Without `fail_fast`
    /// the failures of all three are reported together.
    pub fn merge_with_options(
        &mut self,
        doc: &SettingsDocument<'_>,
        options: &ParseOptions,
    ) -> SettingsResult<()> {
        let mut errors = Vec::new();
        for kind in MappingKind::ALL {
            let table = self.table_mut(kind);
            if let Err(err) = parse_mappings_with_options(doc, kind, table, options) {
                if options.fail_fast {
                    return Err(err);
                }
                errors.extend(err.into_errors());
            }
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(SettingsError::Multiple(errors)),
        }
    }

    /// Load the named resources from `provider` and merge them in order
    pub fn from_provider<P: ResourceProvider + ?Sized>(
        provider: &P,
        names: &[&str],
        options: &ParseOptions,
    ) -> SettingsResult<Self> {
        let mut settings = Self::new();
        for name in names {
            let source = SettingsSource::from_provider(provider, name)?;
            settings.merge_with_options(&source.document()?, options)?;
        }
        Ok(settings)
    }

    pub fn table(&self, kind: MappingKind) -> &MappingTable {
        match kind {
            MappingKind::Symbol => &self.symbols,
            MappingKind::Formula => &self.formulas,
            MappingKind::Delimiter => &self.delimiters,
        }
    }

    pub fn table_mut(&mut self, kind: MappingKind) -> &mut MappingTable {
        match kind {
            MappingKind::Symbol => &mut self.symbols,
            MappingKind::Formula => &mut self.formulas,
            MappingKind::Delimiter => &mut self.delimiters,
        }
    }

    pub fn symbol(&self, c: char) -> Option<&str> {
        self.symbols.get_char(c)
    }

    pub fn formula(&self, c: char) -> Option<&str> {
        self.formulas.get_char(c)
    }

    pub fn delimiter(&self, c: char) -> Option<&str> {
        self.delimiters.get_char(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::resources::MemoryResourceProvider;

    const BASE: &str = r#"<TeXFormulaSettings>
  <CharacterToSymbolMappings>
    <Map char="+" symbol="plus"/>
    <Map char="(" symbol="lbrack"/>
  </CharacterToSymbolMappings>
  <CharacterToFormulaMappings>
    <Map char="≠" formula="neq"/>
  </CharacterToFormulaMappings>
  <CharacterToDelimiterMappings>
    <Map char="(" symbol="lbrack"/>
  </CharacterToDelimiterMappings>
</TeXFormulaSettings>"#;

    const OVERRIDE: &str = r#"<TeXFormulaSettings>
  <CharacterToSymbolMappings>
    <Map char="+" symbol="dotplus"/>
  </CharacterToSymbolMappings>
</TeXFormulaSettings>"#;

    #[test]
    fn test_load_all_sections() {
        let doc = SettingsDocument::parse(BASE, "base.xml").unwrap();
        let settings = FormulaSettings::load(&doc).unwrap();
        assert_eq!(settings.symbol('+'), Some("plus"));
        assert_eq!(settings.formula('≠'), Some("neq"));
        assert_eq!(settings.delimiter('('), Some("lbrack"));
        assert_eq!(settings.delimiter('+'), None);
        assert_eq!(settings.table(MappingKind::Delimiter).len(), 256);
    }

    #[test]
    fn test_from_provider_merges_in_order() {
        let provider = MemoryResourceProvider::new()
            .with_resource("base.xml", BASE)
            .with_resource("override.xml", OVERRIDE);
        let settings = FormulaSettings::from_provider(
            &provider,
            &["base.xml", "override.xml"],
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(settings.symbol('+'), Some("dotplus"));
        assert_eq!(settings.symbol('('), Some("lbrack"));
        assert_eq!(settings.formula('≠'), Some("neq"));
    }

    #[test]
    fn test_from_provider_missing_resource() {
        let provider = MemoryResourceProvider::new();
        let err =
            FormulaSettings::from_provider(&provider, &["nope.xml"], &ParseOptions::default())
                .unwrap_err();
        assert!(
            matches!(err, SettingsError::ResourceParse { ref resource, .. } if resource == "nope.xml")
        );
    }

    #[test]
    fn test_merge_collects_across_sections() {
        let doc = SettingsDocument::parse(
            r#"<root>
  <CharacterToSymbolMappings><Map char="" symbol="x"/></CharacterToSymbolMappings>
  <CharacterToFormulaMappings><Map char="y"/></CharacterToFormulaMappings>
</root>"#,
            "bad.xml",
        )
        .unwrap();
        let err =
            FormulaSettings::load_with_options(&doc, &ParseOptions::exhaustive()).unwrap_err();
        let sections: Vec<_> = err
            .into_errors()
            .iter()
            .filter_map(|e| e.section().map(str::to_string))
            .collect();
        assert_eq!(
            sections,
            vec!["CharacterToSymbolMappings", "CharacterToFormulaMappings"]
        );
    }
}
