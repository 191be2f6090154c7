//! Mapping section parser
//!
//! Every section is read the same way: find the section element, walk its
//! `Map` children in document order, validate `char` and the value
//! attribute, then write the value at the character's code unit. Later
//! entries overwrite earlier ones.

use crate::core::context::ParseOptions;
use crate::core::document::{Element, SettingsDocument};
use crate::core::table::MappingTable;
use crate::data::constants::{MappingKind, CHAR_ATTR};
use crate::utils::error::{SettingsError, SettingsResult};

/// One validated `Map` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingEntry<'a> {
    /// UTF-16 code unit of `char`
    pub code: u16,
    /// Value of the section's value attribute
    pub name: &'a str,
}

/// Validate one `Map` element of a `kind` section.
///
/// Checks run in order: `char` present, `char` exactly one code unit,
/// value attribute present.
pub fn read_entry<'a, 'input>(
    doc: &SettingsDocument<'input>,
    kind: MappingKind,
    element: Element<'a, 'input>,
) -> SettingsResult<MappingEntry<'a>> {
    let tag = doc.tag_name(element);
    let ch = doc.attribute(element, CHAR_ATTR);
    if ch.is_empty() {
        return Err(SettingsError::missing(
            doc.resource_name(),
            kind.section(),
            tag,
            CHAR_ATTR,
        ));
    }

    let mut units = ch.encode_utf16();
    let code = match (units.next(), units.next()) {
        (Some(unit), None) => unit,
        _ => {
            return Err(SettingsError::invalid(
                doc.resource_name(),
                kind.section(),
                tag,
                CHAR_ATTR,
                "must be exactly one character",
            ))
        }
    };

    let name = doc.attribute(element, kind.value_attribute());
    if name.is_empty() {
        return Err(SettingsError::missing(
            doc.resource_name(),
            kind.section(),
            tag,
            kind.value_attribute(),
        ));
    }

    Ok(MappingEntry { code, name })
}

/// `char` addresses a slot past the end of a `size`-entry table
pub(crate) fn out_of_range(
    doc: &SettingsDocument<'_>,
    kind: MappingKind,
    tag: &str,
    size: usize,
) -> SettingsError {
    SettingsError::invalid(
        doc.resource_name(),
        kind.section(),
        tag,
        CHAR_ATTR,
        format!("must be a character code below {}", size),
    )
}

/// Fill `table` from the `kind` section of `doc`.
///
/// An absent section leaves the table untouched. Entries written before a
/// failure stay in the table.
pub fn parse_mappings_with_options(
    doc: &SettingsDocument<'_>,
    kind: MappingKind,
    table: &mut MappingTable,
    options: &ParseOptions,
) -> SettingsResult<()> {
    let section = match doc.find_first_element_by_tag(kind.section()) {
        Some(section) => section,
        None => {
            log::debug!(
                "{}: no {} section, {} table left unchanged",
                doc.resource_name(),
                kind.section(),
                kind
            );
            return Ok(());
        }
    };

    let mut errors = Vec::new();
    let mut written = 0usize;

    for element in doc.elements_by_tag(section, kind.element()) {
        let entry = read_entry(doc, kind, element).and_then(|entry| {
            if table.contains_code(entry.code) {
                Ok(entry)
            } else {
                Err(out_of_range(doc, kind, doc.tag_name(element), table.len()))
            }
        });

        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if options.fail_fast => return Err(err),
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        log::trace!("{} U+{:04X} -> {}", kind, entry.code, entry.name);
        if let Ok(Some(previous)) = table.set(entry.code, entry.name) {
            if options.warn_on_override && previous != entry.name {
                log::warn!(
                    "{}: {} U+{:04X} remapped from '{}' to '{}'",
                    doc.resource_name(),
                    kind.section(),
                    entry.code,
                    previous,
                    entry.name
                );
            }
        }
        written += 1;
    }

    log::debug!(
        "{}: read {} {} mappings",
        doc.resource_name(),
        written,
        kind
    );

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(SettingsError::Multiple(errors)),
    }
}

/// Fill `table` from the `kind` section, stopping at the first invalid entry
pub fn parse_mappings_into(
    doc: &SettingsDocument<'_>,
    kind: MappingKind,
    table: &mut MappingTable,
) -> SettingsResult<()> {
    parse_mappings_with_options(doc, kind, table, &ParseOptions::default())
}

/// Build a fresh table from the `kind` section
pub fn parse_mappings(
    doc: &SettingsDocument<'_>,
    kind: MappingKind,
) -> SettingsResult<MappingTable> {
    let mut table = MappingTable::for_kind(kind);
    parse_mappings_into(doc, kind, &mut table)?;
    Ok(table)
}

/// Character to symbol names (`CharacterToSymbolMappings`)
pub fn parse_symbol_mappings(doc: &SettingsDocument<'_>) -> SettingsResult<MappingTable> {
    parse_mappings(doc, MappingKind::Symbol)
}

pub fn parse_symbol_mappings_into(
    doc: &SettingsDocument<'_>,
    table: &mut MappingTable,
) -> SettingsResult<()> {
    parse_mappings_into(doc, MappingKind::Symbol, table)
}

/// Character to predefined formula names (`CharacterToFormulaMappings`)
pub fn parse_formula_mappings(doc: &SettingsDocument<'_>) -> SettingsResult<MappingTable> {
    parse_mappings(doc, MappingKind::Formula)
}

pub fn parse_formula_mappings_into(
    doc: &SettingsDocument<'_>,
    table: &mut MappingTable,
) -> SettingsResult<()> {
    parse_mappings_into(doc, MappingKind::Formula, table)
}

/// Character to delimiter names (`CharacterToDelimiterMappings`)
pub fn parse_delimiter_mappings(doc: &SettingsDocument<'_>) -> SettingsResult<MappingTable> {
    parse_mappings(doc, MappingKind::Delimiter)
}

pub fn parse_delimiter_mappings_into(
    doc: &SettingsDocument<'_>,
    table: &mut MappingTable,
) -> SettingsResult<()> {
    parse_mappings_into(doc, MappingKind::Delimiter, table)
}
