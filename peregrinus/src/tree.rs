//! Folder tree that organizes features of a user.
//!
//! A tree consists of [branches](Branch), which are folders, and [leaves](FeatureLeaf), each holding one feature.
//! Nodes are tagged with a `_type` member on the wire, like feature properties.

use peregrinus_types::{AccessControlList, BranchSettings};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::feature::Feature;

/// Metadata shared by all nodes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeMeta {
    /// Node id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created: Option<OffsetDateTime>,
    /// Creator's user name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Time of the last modification.
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub modified: Option<OffsetDateTime>,
    /// User name of the last modifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    /// Access control list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<AccessControlList>,
    /// Id of the parent branch. Root branches have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Node of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Node {
    /// Folder.
    Branch(Branch),
    /// Feature.
    FeatureLeaf(FeatureLeaf),
}

impl Node {
    /// Node metadata.
    pub fn meta(&self) -> &NodeMeta {
        match self {
            Node::Branch(branch) => &branch.meta,
            Node::FeatureLeaf(leaf) => &leaf.meta,
        }
    }

    /// Mutable node metadata.
    pub fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            Node::Branch(branch) => &mut branch.meta,
            Node::FeatureLeaf(leaf) => &mut leaf.meta,
        }
    }

    /// Node id.
    pub fn id(&self) -> Option<&str> {
        self.meta().id.as_deref()
    }
}

impl From<Branch> for Node {
    fn from(value: Branch) -> Self {
        Node::Branch(value)
    }
}

impl From<FeatureLeaf> for Node {
    fn from(value: FeatureLeaf) -> Self {
        Node::FeatureLeaf(value)
    }
}

/// Folder of the tree.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    /// Node metadata.
    #[serde(flatten)]
    pub meta: NodeMeta,
    /// Settings of the current user.
    pub settings: BranchSettings,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Branch {
    /// Creates an empty branch.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta {
                id: Some(id.into()),
                name: Some(name.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Appends a child node and makes this branch its parent.
    pub fn push(&mut self, node: impl Into<Node>) {
        let mut node = node.into();
        node.meta_mut().parent_id = self.meta.id.clone();
        self.children.push(node);
    }

    /// Finds a descendant node by id, searching depth first.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.children.iter().find_map(|child| {
            if child.id() == Some(id) {
                return Some(child);
            }
            match child {
                Node::Branch(branch) => branch.find(id),
                Node::FeatureLeaf(_) => None,
            }
        })
    }

    /// Iterates over the features of all leaves below this branch, depth first.
    pub fn features(&self) -> Features<'_> {
        Features {
            stack: vec![self.children.iter()],
        }
    }
}

/// Leaf of the tree holding one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureLeaf {
    /// Node metadata.
    #[serde(flatten)]
    pub meta: NodeMeta,
    /// The feature.
    pub feature: Feature,
}

impl FeatureLeaf {
    /// Creates a leaf. The node takes the id of the feature.
    pub fn new(feature: Feature) -> Self {
        Self {
            meta: NodeMeta {
                id: feature.id().map(str::to_string),
                name: feature.name().map(str::to_string),
                ..Default::default()
            },
            feature,
        }
    }
}

/// Depth-first iterator over the features of a branch. See [`Branch::features`].
pub struct Features<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Features<'a> {
    type Item = &'a Feature;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(level) = self.stack.last_mut() {
            match level.next() {
                Some(Node::FeatureLeaf(leaf)) => return Some(&leaf.feature),
                Some(Node::Branch(branch)) => self.stack.push(branch.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }

        None
    }
}
