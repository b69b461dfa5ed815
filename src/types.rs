//! Library data model as returned by the API

use serde::Deserialize;

/// A folder node. Folders form a forest; `children` may be absent or empty
/// for leaves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Option<Vec<Folder>>,
}

impl Folder {
    pub fn children(&self) -> &[Folder] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// An item inside a single folder
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
}

/// Envelope shared by the list endpoints: `{ "data": [...] }`
#[derive(Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: serde_json::Value,
}
