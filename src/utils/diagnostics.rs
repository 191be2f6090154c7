//! Settings resource diagnostics
//!
//! `check_settings` walks every mapping section once and reports all
//! problems instead of stopping at the first one:
//!
//! - Entries the parser would reject (errors)
//! - Characters mapped more than once in a section (warnings)
//! - Sections that are absent (notes)
//! - Top-level elements that are not a known section (warnings)
//!
//! ## Example
//!
//! ```rust
//! use texmaps::diagnostics::check_settings;
//! use texmaps::SettingsDocument;
//!
//! let doc = SettingsDocument::parse(
//!     r#"<root><CharacterToSymbolMappings><Map char="" symbol="x"/></CharacterToSymbolMappings></root>"#,
//!     "example.xml",
//! )
//! .unwrap();
//! assert!(check_settings(&doc).has_errors());
//! ```

use std::fmt;

use fxhash::FxHashMap;

use crate::core::document::SettingsDocument;
use crate::core::mappings::{out_of_range, read_entry};
use crate::data::constants::{MappingKind, CHAR_ATTR};
use crate::utils::error::SettingsError;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the resource loads, but probably not as intended
    Warning,
    /// Error - loading the resource fails
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Section the diagnostic belongs to
    pub section: Option<&'static str>,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            section: None,
            line: None,
            suggestion: None,
        }
    }

    pub fn with_section(mut self, section: &'static str) -> Self {
        self.section = Some(section);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        match (self.section, self.line) {
            (Some(section), Some(line)) => write!(f, "\n  --> {} (line {})", section, line)?,
            (Some(section), None) => write!(f, "\n  --> {}", section)?,
            (None, Some(line)) => write!(f, "\n  --> line {}", line)?,
            (None, None) => {}
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
    /// Errors per section, in the order the sections first failed
    pub section_errors: Vec<(&'static str, usize)>,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => {
                self.errors += 1;
                if let Some(section) = diag.section {
                    self.tally_error(section);
                }
            }
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    fn tally_error(&mut self, section: &'static str) {
        match self.section_errors.iter_mut().find(|(s, _)| *s == section) {
            Some((_, count)) => *count += 1,
            None => self.section_errors.push((section, 1)),
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Errors reported against `section`
    pub fn errors_in(&self, section: &str) -> usize {
        self.section_errors
            .iter()
            .find(|(s, _)| *s == section)
            .map_or(0, |(_, count)| *count)
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics of one severity
    pub fn of_level(&self, level: DiagnosticLevel) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.level == level)
    }

    /// One line summary, e.g. `2 errors (CharacterToSymbolMappings: 2), 1 note`
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            let mut errors = counted(self.errors, "error");
            if !self.section_errors.is_empty() {
                let tally: Vec<String> = self
                    .section_errors
                    .iter()
                    .map(|(section, count)| format!("{}: {}", section, count))
                    .collect();
                errors.push_str(&format!(" ({})", tally.join(", ")));
            }
            parts.push(errors);
        }
        if self.warnings > 0 {
            parts.push(counted(self.warnings, "warning"));
        }
        if self.infos > 0 {
            parts.push(counted(self.infos, "note"));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn counted(n: usize, noun: &str) -> String {
    format!("{} {}{}", n, noun, if n == 1 { "" } else { "s" })
}

fn suggestion_for(err: &SettingsError, kind: MappingKind) -> Option<String> {
    match err {
        SettingsError::MissingAttribute { attribute, .. } if attribute == CHAR_ATTR => {
            Some("give the mapped character, e.g. char=\"+\"".to_string())
        }
        SettingsError::MissingAttribute { .. } => Some(format!(
            "give the {} name, e.g. {}=\"plus\"",
            kind,
            kind.value_attribute()
        )),
        SettingsError::InvalidAttribute { .. } if kind == MappingKind::Delimiter => Some(format!(
            "delimiters must be single characters below U+{:04X}",
            kind.table_size()
        )),
        SettingsError::InvalidAttribute { .. } => {
            Some("split multi-character keys into separate <Map> elements".to_string())
        }
        _ => None,
    }
}

/// Check every mapping section of `doc`
pub fn check_settings(doc: &SettingsDocument<'_>) -> CheckResult {
    let mut result = CheckResult::new();

    for element in doc.top_level_elements() {
        let tag = doc.tag_name(element);
        if MappingKind::from_section(tag).is_some() {
            continue;
        }
        let mut diag = Diagnostic::new(
            DiagnosticLevel::Warning,
            format!("unknown section <{}> is ignored", tag),
        )
        .with_line(doc.line_of(element));
        if let Some(kind) = MappingKind::ALL
            .into_iter()
            .find(|kind| kind.section().eq_ignore_ascii_case(tag))
        {
            diag = diag.with_suggestion(format!("did you mean <{}>?", kind.section()));
        }
        result.add(diag);
    }

    for kind in MappingKind::ALL {
        let section = match doc.find_first_element_by_tag(kind.section()) {
            Some(section) => section,
            None => {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Info,
                        format!(
                            "no {} section, the {} table stays empty",
                            kind.section(),
                            kind
                        ),
                    )
                    .with_section(kind.section()),
                );
                continue;
            }
        };

        // code unit -> line of the entry that currently owns it
        let mut seen: FxHashMap<u16, usize> = FxHashMap::default();

        for element in doc.elements_by_tag(section, kind.element()) {
            let line = doc.line_of(element);
            let checked = read_entry(doc, kind, element).and_then(|entry| {
                if usize::from(entry.code) < kind.table_size() {
                    Ok(entry)
                } else {
                    Err(out_of_range(
                        doc,
                        kind,
                        doc.tag_name(element),
                        kind.table_size(),
                    ))
                }
            });

            let entry = match checked {
                Ok(entry) => entry,
                Err(err) => {
                    let mut diag = Diagnostic::new(DiagnosticLevel::Error, err.to_string())
                        .with_section(kind.section())
                        .with_line(line);
                    if let Some(s) = suggestion_for(&err, kind) {
                        diag = diag.with_suggestion(s);
                    }
                    result.add(diag);
                    continue;
                }
            };

            if let Some(previous) = seen.insert(entry.code, line) {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!(
                            "U+{:04X} is mapped again; the entry on line {} overrides line {}",
                            entry.code, line, previous
                        ),
                    )
                    .with_section(kind.section())
                    .with_line(line),
                );
            }
        }
    }

    result
}

fn paint(level: DiagnosticLevel) -> &'static str {
    match level {
        DiagnosticLevel::Error => "\x1b[31m",
        DiagnosticLevel::Warning => "\x1b[33m",
        DiagnosticLevel::Info => "\x1b[34m",
    }
}

/// Format diagnostics for terminal output, grouped under a heading per
/// section in the order they were reported
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();
    let mut current: Option<&'static str> = None;

    for diag in &result.diagnostics {
        if diag.section.is_some() && diag.section != current {
            current = diag.section;
            if let Some(section) = current {
                match result.errors_in(section) {
                    0 => output.push_str(&format!("[{}]\n", section)),
                    n => output.push_str(&format!("[{}] {}\n", section, counted(n, "error"))),
                }
            }
        }
        if use_color {
            output.push_str(&format!("{}{}\x1b[0m\n\n", paint(diag.level), diag));
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    let summary = format!("Summary: {}", result.summary());
    if use_color {
        let color = if result.has_errors() {
            paint(DiagnosticLevel::Error)
        } else if result.warnings > 0 {
            paint(DiagnosticLevel::Warning)
        } else {
            "\x1b[32m"
        };
        output.push_str(&format!("{}{}\x1b[0m", color, summary));
    } else {
        output.push_str(&summary);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::defaults::{DEFAULT_SETTINGS_XML, RESOURCE_NAME};

    fn check(xml: &str) -> CheckResult {
        let doc = SettingsDocument::parse(xml, "check.xml").unwrap();
        check_settings(&doc)
    }

    #[test]
    fn test_builtin_resource_is_clean() {
        let doc = SettingsDocument::parse(DEFAULT_SETTINGS_XML, RESOURCE_NAME).unwrap();
        let result = check_settings(&doc);
        assert!(result.is_empty(), "{}", format_diagnostics(&result, false));
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_reports_every_error() {
        let result = check(
            r#"<root>
<CharacterToSymbolMappings>
  <Map char="" symbol="a"/>
  <Map char="xy" symbol="b"/>
  <Map char="z"/>
</CharacterToSymbolMappings>
<CharacterToFormulaMappings/>
<CharacterToDelimiterMappings/>
</root>"#,
        );
        assert_eq!(result.errors, 3);
        assert_eq!(result.warnings, 0);
        let lines: Vec<_> = result
            .of_level(DiagnosticLevel::Error)
            .map(|d| d.line)
            .collect();
        assert_eq!(lines, vec![Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn test_duplicate_is_warning() {
        let result = check(
            r#"<root>
<CharacterToSymbolMappings>
  <Map char="+" symbol="plus"/>
  <Map char="+" symbol="dotplus"/>
</CharacterToSymbolMappings>
<CharacterToFormulaMappings/>
<CharacterToDelimiterMappings/>
</root>"#,
        );
        assert!(!result.has_errors());
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("line 4 overrides line 3"));
    }

    #[test]
    fn test_absent_sections_are_notes() {
        let result = check("<root/>");
        assert_eq!(result.infos, 3);
        assert!(!result.has_errors());
        assert_eq!(result.summary(), "3 notes");
    }

    #[test]
    fn test_delimiter_range() {
        let result = check(
            r#"<root><CharacterToDelimiterMappings><Map char="⌈" symbol="lceil"/></CharacterToDelimiterMappings></root>"#,
        );
        assert_eq!(result.errors, 1);
        let diag = result.of_level(DiagnosticLevel::Error).next().unwrap();
        assert!(diag.message.contains("below 256"));
        assert!(diag.suggestion.is_some());
    }

    #[test]
    fn test_format_plain() {
        let result = check(
            r#"<root><CharacterToSymbolMappings><Map char="" symbol="a"/></CharacterToSymbolMappings></root>"#,
        );
        let output = format_diagnostics(&result, false);
        assert!(output.contains("error: check.xml"));
        assert!(output.contains("= help:"));
        assert!(output.starts_with("[CharacterToSymbolMappings] 1 error\n"));
        assert!(output.ends_with("Summary: 1 error (CharacterToSymbolMappings: 1), 2 notes"));
    }

    #[test]
    fn test_errors_tallied_per_section() {
        let result = check(
            r#"<root>
<CharacterToSymbolMappings>
  <Map char="" symbol="a"/>
  <Map char="b"/>
</CharacterToSymbolMappings>
<CharacterToFormulaMappings/>
<CharacterToDelimiterMappings>
  <Map char="⌈" symbol="lceil"/>
</CharacterToDelimiterMappings>
</root>"#,
        );
        assert_eq!(
            result.section_errors,
            vec![
                ("CharacterToSymbolMappings", 2),
                ("CharacterToDelimiterMappings", 1)
            ]
        );
        assert_eq!(result.errors_in("CharacterToFormulaMappings"), 0);
        assert_eq!(
            result.summary(),
            "3 errors (CharacterToSymbolMappings: 2, CharacterToDelimiterMappings: 1)"
        );

        let output = format_diagnostics(&result, false);
        assert!(output.contains("[CharacterToDelimiterMappings] 1 error\n"));
    }

    #[test]
    fn test_unknown_section_is_warning() {
        let result = check(
            r#"<root>
<CharacterToSymbolMappings/>
<charactertoformulamappings/>
<Extras/>
<CharacterToDelimiterMappings/>
</root>"#,
        );
        let unknown: Vec<_> = result.of_level(DiagnosticLevel::Warning).collect();
        assert_eq!(unknown.len(), 2);
        assert!(unknown[0].message.contains("<charactertoformulamappings>"));
        assert_eq!(unknown[0].line, Some(3));
        assert_eq!(
            unknown[0].suggestion.as_deref(),
            Some("did you mean <CharacterToFormulaMappings>?")
        );
        assert!(unknown[1].message.contains("<Extras>"));
        assert!(unknown[1].suggestion.is_none());
        // the misspelled section does not count as the formula section
        assert_eq!(result.infos, 1);
    }
}
