//! Parsed settings documents
//!
//! `SettingsDocument` wraps a `roxmltree` tree and exposes only what the
//! mapping parser needs: finding elements by tag and reading attributes.
//! Comments, processing instructions and whitespace text never show up
//! through this API.

use std::io::Read;

use roxmltree::{Document, Node, ParsingOptions};

use crate::utils::error::{SettingsError, SettingsResult};
use crate::utils::resources::{load_resource_text, read_resource_text, ResourceProvider};

/// An element handle borrowed from a `SettingsDocument`
pub type Element<'a, 'input> = Node<'a, 'input>;

/// A read-only, well-formed settings resource
pub struct SettingsDocument<'input> {
    name: String,
    tree: Document<'input>,
}

impl<'input> SettingsDocument<'input> {
    /// Parse `text` as XML. `name` is only used in error messages.
    pub fn parse(text: &'input str, name: impl Into<String>) -> SettingsResult<Self> {
        let name = name.into();
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let tree = Document::parse_with_options(text, options)
            .map_err(|e| SettingsError::resource(name.as_str(), e))?;
        log::debug!("parsed settings resource '{}'", name);
        Ok(Self { name, tree })
    }

    /// Display name of the resource
    pub fn resource_name(&self) -> &str {
        &self.name
    }

    /// Tag name of the document element
    pub fn root_tag(&self) -> &str {
        self.tree.root_element().tag_name().name()
    }

    /// First element named `tag` below the document element, in document order
    pub fn find_first_element_by_tag<'a>(&'a self, tag: &str) -> Option<Element<'a, 'input>> {
        self.elements_by_tag(self.tree.root_element(), tag).next()
    }

    /// All elements named `tag` below `parent`, in document order.
    ///
    /// Nested elements are included; `parent` itself is not.
    pub fn elements_by_tag<'a>(
        &self,
        parent: Element<'a, 'input>,
        tag: &str,
    ) -> impl Iterator<Item = Element<'a, 'input>> + 'a {
        let tag = tag.to_string();
        parent
            .descendants()
            .skip(1)
            .filter(move |node| node.is_element() && node.tag_name().name() == tag)
    }

    /// Element children of the document element
    pub fn top_level_elements<'a>(&'a self) -> impl Iterator<Item = Element<'a, 'input>> + 'a {
        self.tree
            .root_element()
            .children()
            .filter(|node| node.is_element())
    }

    /// Attribute value, or the empty string when absent
    pub fn attribute<'a>(&self, element: Element<'a, 'input>, name: &str) -> &'a str {
        element.attribute(name).unwrap_or("")
    }

    pub fn tag_name<'a>(&self, element: Element<'a, 'input>) -> &'a str {
        element.tag_name().name()
    }

    /// 1-based line of an element, for diagnostics
    pub fn line_of(&self, element: Element<'_, 'input>) -> usize {
        self.tree.text_pos_at(element.range().start).row as usize
    }
}

impl std::fmt::Debug for SettingsDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsDocument")
            .field("name", &self.name)
            .field("root", &self.root_tag())
            .finish()
    }
}

/// Owned source text for a `SettingsDocument`.
///
/// `roxmltree` borrows from its input, so stream-based loading keeps the
/// text here and hands out documents that borrow from it.
#[derive(Debug, Clone)]
pub struct SettingsSource {
    name: String,
    text: String,
}

impl SettingsSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a whole stream
    pub fn from_reader<R: Read>(reader: R, name: impl Into<String>) -> SettingsResult<Self> {
        let name = name.into();
        let text = read_resource_text(reader, &name)?;
        Ok(Self { name, text })
    }

    /// Fetch a named resource from `provider`
    pub fn from_provider<P: ResourceProvider + ?Sized>(
        provider: &P,
        name: &str,
    ) -> SettingsResult<Self> {
        let text = load_resource_text(provider, name)?;
        Ok(Self::new(name, text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse the text into a document
    pub fn document(&self) -> SettingsResult<SettingsDocument<'_>> {
        SettingsDocument::parse(&self.text, self.name.as_str())
    }
}
