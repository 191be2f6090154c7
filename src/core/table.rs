//! Fixed-size character code tables

use crate::data::constants::MappingKind;

/// A dense table from character code to identifier name.
///
/// The size is fixed when the table is created. Entries that were never
/// written read back as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<Option<String>>,
}

impl MappingTable {
    /// Create an empty table with `size` slots
    pub fn with_size(size: usize) -> Self {
        Self {
            entries: vec![None; size],
        }
    }

    /// Create an empty table sized for `kind`
    pub fn for_kind(kind: MappingKind) -> Self {
        Self::with_size(kind.table_size())
    }

    /// Number of slots (not the number of set entries)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of set entries
    pub fn count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// True when no entry is set
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Whether `code` addresses a slot of this table
    pub fn contains_code(&self, code: u16) -> bool {
        usize::from(code) < self.entries.len()
    }

    pub fn get(&self, code: u16) -> Option<&str> {
        self.entries
            .get(usize::from(code))
            .and_then(|e| e.as_deref())
    }

    /// Look up a character; characters outside the BMP are never mapped
    pub fn get_char(&self, c: char) -> Option<&str> {
        u16::try_from(u32::from(c))
            .ok()
            .and_then(|code| self.get(code))
    }

    /// Store `name` at `code`, returning the value it replaced.
    ///
    /// Returns `Err(name)` untouched when `code` is outside the table.
    pub fn set(&mut self, code: u16, name: impl Into<String>) -> Result<Option<String>, String> {
        let name = name.into();
        match self.entries.get_mut(usize::from(code)) {
            Some(slot) => Ok(slot.replace(name)),
            None => Err(name),
        }
    }

    /// Unset every entry, keeping the size
    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
    }

    /// Set entries in ascending code order
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(code, e)| e.as_deref().map(|name| (code as u16, name)))
    }

    /// Consume the table into its raw slots
    pub fn into_vec(self) -> Vec<Option<String>> {
        self.entries
    }
}

#[cfg(feature = "json")]
mod json {
    use super::MappingTable;
    use serde::ser::{Serialize, SerializeMap, Serializer};

    /// Serializes as an object from character to name, in code order
    impl Serialize for MappingTable {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.count()))?;
            for (code, name) in self.iter() {
                let key = char::from_u32(u32::from(code))
                    .map(String::from)
                    .unwrap_or_else(|| format!("\\u{:04x}", code));
                map.serialize_entry(&key, name)?;
            }
            map.end()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_json_keys_in_code_order() {
            let mut table = MappingTable::with_size(65536);
            table.set(0xD800, "high").unwrap();
            table.set(b'+' as u16, "plus").unwrap();

            let text = serde_json::to_string(&table).unwrap();
            // lone surrogates have no char, so they are keyed by escape text
            assert_eq!(text, r#"{"+":"plus","\\ud800":"high"}"#);
        }

        #[test]
        fn test_empty_table_is_empty_object() {
            let table = MappingTable::with_size(256);
            assert_eq!(serde_json::to_string(&table).unwrap(), "{}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = MappingTable::for_kind(MappingKind::Delimiter);
        assert_eq!(table.len(), 256);
        assert_eq!(table.count(), 0);
        assert!(table.is_empty());
        assert_eq!(table.get(b'(' as u16), None);
    }

    #[test]
    fn test_set_and_replace() {
        let mut table = MappingTable::with_size(128);
        assert_eq!(table.set(b'+' as u16, "plus"), Ok(None));
        assert_eq!(table.set(b'+' as u16, "add"), Ok(Some("plus".to_string())));
        assert_eq!(table.get_char('+'), Some("add"));
        assert_eq!(table.count(), 1);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut table = MappingTable::with_size(4);
        assert!(!table.contains_code(4));
        assert_eq!(table.set(4, "four"), Err("four".to_string()));
        assert!(table.is_empty());
    }

    #[test]
    fn test_get_char_outside_bmp() {
        let table = MappingTable::for_kind(MappingKind::Symbol);
        assert_eq!(table.get_char('𝔸'), None);
    }

    #[test]
    fn test_iter_in_code_order() {
        let mut table = MappingTable::with_size(256);
        table.set(b'b' as u16, "bee").unwrap();
        table.set(b'a' as u16, "ay").unwrap();
        let items: Vec<_> = table.iter().collect();
        assert_eq!(items, vec![(b'a' as u16, "ay"), (b'b' as u16, "bee")]);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.len(), 256);
    }
}
