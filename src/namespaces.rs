// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Namespace and server URI tables shared by the codec and its caller.

use hashbrown::HashMap;

/// The namespace URI that always occupies index 0.
pub const OPC_UA_NAMESPACE: &str = "http://opcfoundation.org/UA/";

/// An ordered table mapping namespace index to namespace URI, used to resolve
/// `NodeId`/`ExpandedNodeId` namespaces in non-reversible form.
#[derive(Debug, Clone)]
pub struct NamespaceTable {
    uris: Vec<String>,
    index: HashMap<String, u16>,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTable {
    /// A table seeded with just the base OPC UA namespace at index 0.
    pub fn new() -> Self {
        let mut table = Self {
            uris: Vec::new(),
            index: HashMap::new(),
        };
        table.add_namespace(OPC_UA_NAMESPACE);
        table
    }

    /// A table with an explicit URI list, index 0 expected to be the base namespace.
    pub fn new_full(uris: Vec<String>) -> Self {
        let mut index = HashMap::new();
        for (i, uri) in uris.iter().enumerate() {
            index.insert(uri.clone(), i as u16);
        }
        Self { uris, index }
    }

    /// Append a namespace, returning its assigned index (or the existing one if already present).
    pub fn add_namespace(&mut self, uri: &str) -> u16 {
        if let Some(idx) = self.index.get(uri) {
            return *idx;
        }
        let idx = self.uris.len() as u16;
        self.uris.push(uri.to_string());
        self.index.insert(uri.to_string(), idx);
        idx
    }

    /// Look up the URI for an index.
    pub fn get_uri(&self, index: u16) -> Option<&str> {
        self.uris.get(index as usize).map(|s| s.as_str())
    }

    /// Look up the index for a URI.
    pub fn get_index(&self, uri: &str) -> Option<u16> {
        self.index.get(uri).copied()
    }
}

/// An ordered table mapping server index to server URI. Index 0 is always the local server.
#[derive(Debug, Clone)]
pub struct ServerTable {
    uris: Vec<String>,
    index: HashMap<String, u32>,
}

impl Default for ServerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerTable {
    /// A table seeded with the local server (empty URI) at index 0.
    pub fn new() -> Self {
        let mut table = Self {
            uris: Vec::new(),
            index: HashMap::new(),
        };
        table.add_server("");
        table
    }

    /// Append a server URI, returning its assigned index (or the existing one).
    pub fn add_server(&mut self, uri: &str) -> u32 {
        if let Some(idx) = self.index.get(uri) {
            return *idx;
        }
        let idx = self.uris.len() as u32;
        self.uris.push(uri.to_string());
        self.index.insert(uri.to_string(), idx);
        idx
    }

    /// Look up the URI for an index.
    pub fn get_uri(&self, index: u32) -> Option<&str> {
        self.uris.get(index as usize).map(|s| s.as_str())
    }

    /// Look up the index for a URI.
    pub fn get_index(&self, uri: &str) -> Option<u32> {
        self.index.get(uri).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_namespace_seeded() {
        let table = NamespaceTable::new();
        assert_eq!(table.get_uri(0), Some(OPC_UA_NAMESPACE));
    }

    #[test]
    fn add_namespace_is_idempotent() {
        let mut table = NamespaceTable::new();
        let a = table.add_namespace("http://example.com/");
        let b = table.add_namespace("http://example.com/");
        assert_eq!(a, b);
    }
}
