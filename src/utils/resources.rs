//! Resource acquisition for settings files
//!
//! Settings resources are looked up by a logical name such as
//! `TeXFormulaSettings.xml`. The `ResourceProvider` trait hides where the
//! bytes come from:
//! - `EmbeddedResourceProvider`: resources compiled into the crate
//! - `MemoryResourceProvider`: in-memory storage (testing, hosts with preloaded data)
//! - `StdResourceProvider`: the real file system (CLI)

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::data::defaults::{DEFAULT_SETTINGS_XML, RESOURCE_NAME};
use crate::utils::error::{SettingsError, SettingsResult};

/// Trait for looking up settings resources by name
pub trait ResourceProvider: Send + Sync {
    /// Read a resource's raw bytes
    fn read_resource(&self, name: &str) -> Result<Vec<u8>, ResourceError>;

    /// Check if a resource exists
    fn has_resource(&self, name: &str) -> bool;
}

/// Error type for resource lookup
#[derive(Debug, Clone)]
pub enum ResourceError {
    NotFound(String),
    ReadError(String),
}

impl std::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceError::NotFound(name) => write!(f, "Resource not found: {}", name),
            ResourceError::ReadError(msg) => write!(f, "Read error: {}", msg),
        }
    }
}

impl std::error::Error for ResourceError {}

/// Read a whole resource stream into a UTF-8 string.
///
/// Any I/O failure or invalid UTF-8 is reported as a `ResourceParse` error
/// carrying `name`.
pub fn read_resource_text<R: Read>(mut reader: R, name: &str) -> SettingsResult<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| SettingsError::resource(name, e))?;
    String::from_utf8(bytes).map_err(|e| SettingsError::resource(name, e))
}

/// Fetch a resource from a provider as text
pub fn load_resource_text<P: ResourceProvider + ?Sized>(
    provider: &P,
    name: &str,
) -> SettingsResult<String> {
    let bytes = provider
        .read_resource(name)
        .map_err(|e| SettingsError::resource(name, e))?;
    read_resource_text(bytes.as_slice(), name)
}

/// Resources shipped inside the crate
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedResourceProvider;

impl EmbeddedResourceProvider {
    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            RESOURCE_NAME => Some(DEFAULT_SETTINGS_XML),
            _ => None,
        }
    }
}

impl ResourceProvider for EmbeddedResourceProvider {
    fn read_resource(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        Self::lookup(name)
            .map(|text| text.as_bytes().to_vec())
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }

    fn has_resource(&self, name: &str) -> bool {
        Self::lookup(name).is_some()
    }
}

/// Memory-based provider
#[derive(Debug, Default, Clone)]
pub struct MemoryResourceProvider {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the in-memory storage
    pub fn add_resource(&mut self, name: &str, content: impl Into<Vec<u8>>) {
        self.resources.insert(name.to_string(), content.into());
    }

    /// Builder form of `add_resource`
    pub fn with_resource(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        self.add_resource(name, content);
        self
    }
}

impl ResourceProvider for MemoryResourceProvider {
    fn read_resource(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }

    fn has_resource(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }
}

/// Standard filesystem provider
#[derive(Debug, Default, Clone)]
pub struct StdResourceProvider {
    /// Directories searched in order after the name itself
    search_paths: Vec<PathBuf>,
}

impl StdResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self {
            search_paths: vec![base_dir.as_ref().to_path_buf()],
        }
    }

    pub fn add_search_path(&mut self, path: impl AsRef<Path>) {
        self.search_paths.push(path.as_ref().to_path_buf());
    }

    fn find_file(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        self.search_paths
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

impl ResourceProvider for StdResourceProvider {
    fn read_resource(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self
            .find_file(name)
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))?;
        std::fs::read(&path)
            .map_err(|e| ResourceError::ReadError(format!("{}: {}", path.display(), e)))
    }

    fn has_resource(&self, name: &str) -> bool {
        self.find_file(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_embedded_provider() {
        let provider = EmbeddedResourceProvider;
        assert!(provider.has_resource(RESOURCE_NAME));
        assert!(!provider.has_resource("Other.xml"));
        let text = load_resource_text(&provider, RESOURCE_NAME).unwrap();
        assert!(text.contains("CharacterToSymbolMappings"));
    }

    #[test]
    fn test_memory_provider() {
        let provider = MemoryResourceProvider::new().with_resource("a.xml", "<root/>");
        assert!(provider.has_resource("a.xml"));
        assert_eq!(load_resource_text(&provider, "a.xml").unwrap(), "<root/>");
    }

    #[test]
    fn test_missing_resource_is_parse_error() {
        let provider = MemoryResourceProvider::new();
        match load_resource_text(&provider, "absent.xml") {
            Err(SettingsError::ResourceParse { resource, cause }) => {
                assert_eq!(resource, "absent.xml");
                assert!(cause.contains("not found"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_io_failure_is_parse_error() {
        let err = read_resource_text(FailingReader, "broken.xml").unwrap_err();
        assert!(
            matches!(err, SettingsError::ResourceParse { ref resource, .. } if resource == "broken.xml")
        );
        assert!(err.to_string().contains("device gone"));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = read_resource_text(&[0xffu8, 0xfe][..], "bin.xml").unwrap_err();
        assert!(matches!(err, SettingsError::ResourceParse { .. }));
    }

    #[test]
    fn test_std_provider_missing_file() {
        let provider = StdResourceProvider::with_base_dir("/nonexistent-texmaps-dir");
        assert!(!provider.has_resource("nothing.xml"));
        assert!(matches!(
            provider.read_resource("nothing.xml"),
            Err(ResourceError::NotFound(_))
        ));
    }
}
