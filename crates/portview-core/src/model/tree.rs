// ── Display tree types ──
//
// The reconciled view is a forest of nodes linked by parent id: group
// headers at the roots, ports beneath them, action leaves beneath the
// ports. The whole set is rebuilt on every refresh and node ids are
// never stable across rebuilds.

use serde::{Deserialize, Serialize};

/// Host command attached to a node, invoked when the node is activated.
/// Arguments are host-opaque JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCommand {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<serde_json::Value>,
}

/// A single display unit in the endpoints forest: a group header, a
/// port, or an action leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique within one rebuild; regenerated on every refresh.
    pub id: String,
    pub name: String,
    pub tooltip: String,
    /// Icon key understood by the host theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Root nodes carry no parent id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<NodeCommand>,
    /// `Some(true)` renders expanded, `Some(false)` collapsed,
    /// `None` not expandable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
}

impl TreeNode {
    pub fn new(id: String, name: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tooltip: tooltip.into(),
            icon: None,
            parent_id: None,
            command: None,
            expanded: None,
        }
    }
}

/// Expansion state of a rendered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collapsible {
    Expanded,
    Collapsed,
    None,
}

/// Renderable record handed to the host view for a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeItem {
    pub label: String,
    pub tooltip: String,
    pub collapsible: Collapsible,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<NodeCommand>,
}

impl From<&TreeNode> for TreeItem {
    fn from(node: &TreeNode) -> Self {
        let collapsible = match node.expanded {
            Some(true) => Collapsible::Expanded,
            Some(false) => Collapsible::Collapsed,
            None => Collapsible::None,
        };

        Self {
            label: node.name.clone(),
            tooltip: node.tooltip.clone(),
            collapsible,
            icon: node.icon.clone(),
            command: node.command.clone(),
        }
    }
}
