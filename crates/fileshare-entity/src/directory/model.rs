//! Directory entity model.

use serde::{Deserialize, Deserializer, Serialize};

use fileshare_core::types::DirectoryId;

use super::kind::DirType;

/// A directory in the shared tree.
///
/// A directory physically owns its `children`; `parent_id` mirrors that
/// position and is never changed after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    /// Unique directory identifier.
    pub id: DirectoryId,
    /// Display name.
    pub name: String,
    /// Logical parent (None for roots).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub parent_id: Option<DirectoryId>,
    /// Whether the directory is visible in the shared view.
    #[serde(default)]
    pub is_shared: bool,
    /// Access password; empty means none is required.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Storage or link directory.
    #[serde(default, deserialize_with = "dir_type_or_default")]
    pub dir_type: DirType,
    /// Owned child directories, in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Directory>,
}

impl Directory {
    /// Build a fresh, unshared, childless directory from a create request.
    pub fn create(req: CreateDirectory) -> Self {
        Self {
            id: DirectoryId::generate(),
            name: req.name,
            parent_id: req.parent_id,
            is_shared: false,
            password: String::new(),
            dir_type: req.dir_type,
            children: Vec::new(),
        }
    }

    /// Check if this is a root directory (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether a password must be supplied to open this directory.
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    /// Whether `supplied` opens this directory.
    pub fn accepts_password(&self, supplied: &str) -> bool {
        !self.has_password() || self.password == supplied
    }

    /// Copy every field except `children`, which is left empty.
    pub fn shallow_copy(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            parent_id: self.parent_id.clone(),
            is_shared: self.is_shared,
            password: self.password.clone(),
            dir_type: self.dir_type,
            children: Vec::new(),
        }
    }
}

/// Data required to create a new directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectory {
    /// Directory name.
    pub name: String,
    /// Parent directory (None for a root).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub parent_id: Option<DirectoryId>,
    /// Directory type.
    #[serde(default, deserialize_with = "dir_type_or_default")]
    pub dir_type: DirType,
}

impl CreateDirectory {
    /// A storage-type directory request.
    pub fn new(name: impl Into<String>, parent_id: Option<DirectoryId>) -> Self {
        Self {
            name: name.into(),
            parent_id,
            dir_type: DirType::Storage,
        }
    }

    /// Set the directory type.
    pub fn with_type(mut self, dir_type: DirType) -> Self {
        self.dir_type = dir_type;
        self
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<DirectoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(DirectoryId::from))
}

fn dir_type_or_default<'de, D>(deserializer: D) -> Result<DirType, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw.parse().map_err(serde::de::Error::custom),
        None => Ok(DirType::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_legacy_layout() {
        let json = r#"[{
            "id": "1",
            "name": "root",
            "parentId": "",
            "isShared": false,
            "children": [
                {"id": "2", "name": "docs", "parentId": "1", "isShared": true,
                 "password": "x", "dirType": "link"}
            ]
        }]"#;

        let forest: Vec<Directory> = serde_json::from_str(json).expect("parse");
        assert_eq!(forest.len(), 1);
        assert!(forest[0].is_root());
        assert_eq!(forest[0].dir_type, DirType::Storage);
        let child = &forest[0].children[0];
        assert_eq!(child.parent_id.as_ref().map(|p| p.as_str()), Some("1"));
        assert_eq!(child.dir_type, DirType::Link);
        assert!(child.has_password());
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let dir = Directory::create(CreateDirectory::new("root", None));
        let value = serde_json::to_value(&dir).expect("serialize");
        assert!(value.get("parentId").is_none());
        assert!(value.get("password").is_none());
        assert!(value.get("children").is_none());
        assert_eq!(value["dirType"], "storage");
        assert_eq!(value["isShared"], false);
    }

    #[test]
    fn test_accepts_password() {
        let mut dir = Directory::create(CreateDirectory::new("d", None));
        assert!(dir.accepts_password(""));
        assert!(dir.accepts_password("anything"));

        dir.password = "x".to_string();
        assert!(!dir.accepts_password(""));
        assert!(!dir.accepts_password("y"));
        assert!(dir.accepts_password("x"));
    }

    #[test]
    fn test_shallow_copy_drops_children() {
        let mut parent = Directory::create(CreateDirectory::new("p", None));
        let child = Directory::create(CreateDirectory::new("c", Some(parent.id.clone())));
        parent.children.push(child);

        let copy = parent.shallow_copy();
        assert_eq!(copy.id, parent.id);
        assert!(copy.children.is_empty());
    }
}
