//! Built-in settings resource
//!
//! The default `TeXFormulaSettings.xml` is compiled into the crate and
//! parsed once, on first use.

use lazy_static::lazy_static;

use crate::core::document::SettingsDocument;
use crate::core::settings::FormulaSettings;
use crate::utils::error::SettingsResult;

/// Logical name of the built-in resource
pub const RESOURCE_NAME: &str = "TeXFormulaSettings.xml";

/// Text of the built-in resource
pub const DEFAULT_SETTINGS_XML: &str = include_str!("TeXFormulaSettings.xml");

lazy_static! {
    static ref DEFAULT_SETTINGS: SettingsResult<FormulaSettings> =
        SettingsDocument::parse(DEFAULT_SETTINGS_XML, RESOURCE_NAME)
            .and_then(|doc| FormulaSettings::load(&doc));
}

/// Tables of the built-in resource
pub fn default_settings() -> SettingsResult<&'static FormulaSettings> {
    DEFAULT_SETTINGS.as_ref().map_err(Clone::clone)
}
