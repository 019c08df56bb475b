use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Node of the hierarchical holdings view.
///
/// Serialized the way tree widgets expect it:
/// `{"type": "directory", "name", "extra", "files": [...]}` or
/// `{"type": "file", "name", "extra", "value", "href"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Directory {
        name: String,
        extra: String,
        #[schema(no_recursion)]
        files: Vec<TreeNode>,
    },
    File {
        /// Account address.
        name: String,
        extra: String,
        value: f64,
        /// Explorer link of the account.
        href: String,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Directory { name, .. } | Self::File { name, .. } => name,
        }
    }

    pub fn extra(&self) -> &str {
        match self {
            Self::Directory { extra, .. } | Self::File { extra, .. } => extra,
        }
    }

    /// Children of a directory, empty for a file.
    pub fn files(&self) -> &[Self] {
        match self {
            Self::Directory { files, .. } => files,
            Self::File { .. } => &[],
        }
    }

    /// Raw value of a file, `None` for a directory.
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Directory { .. } => None,
            Self::File { value, .. } => Some(*value),
        }
    }

    /// Finds a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.files().iter().find(|node| node.name() == name)
    }
}

/// One bar or line point: an epoch label and its total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}
