use indexmap::IndexMap;
use serde::Serialize;

// ----------------------------------------------------------------------------
// Label Table: text symbol -> instruction address

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Labels(IndexMap<String, u32>);

impl Labels {
    pub fn new() -> Self {
        Labels(IndexMap::new())
    }

    pub fn insert(&mut self, name: String, addr: u32) -> Option<u32> {
        self.0.insert(name, addr)
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u32)> {
        self.0.iter()
    }
}

// ----------------------------------------------------------------------------
// Data Table: data symbol -> entry

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataEntry {
    pub label: String,
    pub directive: String,
    pub value: String,
    pub address: u32,
}

impl DataEntry {
    /// Parse `label: .directive value...`.
    pub fn parse(stmt: &str, address: u32) -> Option<DataEntry> {
        let (label, rest) = stmt.split_once(':')?;
        let label = label.trim();
        if label.is_empty() || label.contains(char::is_whitespace) {
            return None;
        }
        let mut words = rest.split_whitespace();
        let directive = words.next()?;
        if !directive.starts_with('.') {
            return None;
        }
        Some(DataEntry {
            label: label.to_string(),
            directive: directive.to_string(),
            value: words.collect::<Vec<_>>().join(" "),
            address,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataTable(IndexMap<String, DataEntry>);

impl DataTable {
    pub fn new() -> Self {
        DataTable(IndexMap::new())
    }

    pub fn insert(&mut self, entry: DataEntry) -> Option<DataEntry> {
        self.0.insert(entry.label.clone(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&DataEntry> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataEntry> {
        self.0.values()
    }
}
