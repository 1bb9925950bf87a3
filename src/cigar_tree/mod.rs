//! Cigar trees: a phylogenetic tree whose leaves carry the gap pattern of
//! their aligned sequence as a [CigarString].
//!
//! The [CigarTreeBuilder] combines a [PhyloTree](crate::model::PhyloTree) with
//! a [SequenceIndex](crate::alignment::SequenceIndex). The result has the same
//! shape as the input tree: internal vertices become [CigarInternal] nodes
//! with their children in the same order, leaves become [CigarLeaf] nodes.
//!
//! # Serialized form
//! ```json
//! {"child": [
//!     {"name": "A", "cigar": "2M1D1M", "seq": "AC-T", "distance": 1.0},
//!     {"name": "B", "cigar": "4M", "seq": "ACGT", "distance": 1.0}
//! ]}
//! ```
//! `seq` is left out when sequences are omitted; `name` (internal nodes only)
//! and `distance` are left out when absent.

mod builder;
mod options;

pub use self::builder::CigarTreeBuilder;
pub use self::options::CigarTreeOptions;

use crate::cigar::CigarString;
use crate::model::BranchLength;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =#========================================================================#=
// NODES
// =#========================================================================#=
/// Leaf of a [CigarTree].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CigarLeaf {
    pub name: String,
    pub cigar: CigarString,
    /// Aligned row, unless sequences are omitted
    #[serde(rename = "seq", default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<BranchLength>,
}

/// Internal node of a [CigarTree].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CigarInternal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "child")]
    pub children: Vec<CigarNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<BranchLength>,
}

/// Node of a [CigarTree]; in JSON, internal nodes are the ones with a `child` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CigarNode {
    Leaf(CigarLeaf),
    Internal(CigarInternal),
}

impl CigarNode {
    /// Leaf name, or label of an internal node if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            CigarNode::Leaf(leaf) => Some(&leaf.name),
            CigarNode::Internal(internal) => internal.name.as_deref(),
        }
    }

    /// Length of the branch to the parent, if known.
    pub fn distance(&self) -> Option<BranchLength> {
        match self {
            CigarNode::Leaf(leaf) => leaf.distance,
            CigarNode::Internal(internal) => internal.distance,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, CigarNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&CigarLeaf> {
        match self {
            CigarNode::Leaf(leaf) => Some(leaf),
            CigarNode::Internal(_) => None,
        }
    }

    /// Children in order; empty for leaves.
    pub fn children(&self) -> &[CigarNode] {
        match self {
            CigarNode::Leaf(_) => &[],
            CigarNode::Internal(internal) => &internal.children,
        }
    }
}

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// Rooted tree of [CigarNode]s; serializes as its root node.
///
/// Decoding does not recurse per tree level, so documents of arbitrarily
/// deep trees can be read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CigarTree {
    root: CigarNode,
}

impl CigarTree {
    pub fn new(root: CigarNode) -> Self {
        CigarTree { root }
    }

    pub fn root(&self) -> &CigarNode {
        &self.root
    }

    pub fn into_root(self) -> CigarNode {
        self.root
    }

    /// Iterates over all nodes in pre-order, children in order.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![&self.root] }
    }

    /// Leaves in pre-order, children in order.
    pub fn leaves(&self) -> impl Iterator<Item = &CigarLeaf> {
        self.iter().filter_map(CigarNode::as_leaf)
    }

    /// Returns the leaf named `name`, if present.
    pub fn leaf(&self, name: &str) -> Option<&CigarLeaf> {
        self.leaves().find(|leaf| leaf.name == name)
    }

    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    pub fn num_nodes(&self) -> usize {
        self.iter().count()
    }

    /// Alignment width covered by the leaf CIGARs (they all share it).
    pub fn width(&self) -> usize {
        self.leaves().next().map_or(0, |leaf| leaf.cigar.width())
    }

    /// Compact JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON document, as written to the diagnostic stream.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Decodes a JSON document of any nesting depth.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        CigarTree::try_from(value)
    }
}

impl<'de> Deserialize<'de> for CigarTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        CigarTree::try_from(value).map_err(D::Error::custom)
    }
}

// Open internal nodes are kept on an explicit stack while their children are decoded
impl TryFrom<Value> for CigarTree {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut open: Vec<OpenInternal> = Vec::new();
        let mut value = value;
        loop {
            let mut completed = match decode_node(value)? {
                DecodedNode::Leaf(leaf) => Some(CigarNode::Leaf(leaf)),
                DecodedNode::Internal(internal) => {
                    open.push(internal);
                    None
                }
            };

            // Attach finished nodes upwards until an open node has an unread child
            value = loop {
                let Some(parent) = open.last_mut() else {
                    return completed
                        .map(CigarTree::new)
                        .ok_or_else(|| serde_json::Error::custom("empty cigar tree"));
                };
                if let Some(node) = completed.take() {
                    parent.children.push(node);
                }
                if let Some(child) = parent.unread.next() {
                    break child;
                }
                if let Some(finished) = open.pop() {
                    completed = Some(CigarNode::Internal(finished.close()));
                }
            };
        }
    }
}

/// Fields of an internal node besides its children.
#[derive(Deserialize)]
struct InternalFields {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    distance: Option<BranchLength>,
}

/// Internal node whose children are still being decoded.
struct OpenInternal {
    fields: InternalFields,
    unread: std::vec::IntoIter<Value>,
    children: Vec<CigarNode>,
}

impl OpenInternal {
    fn close(self) -> CigarInternal {
        CigarInternal {
            name: self.fields.name,
            children: self.children,
            distance: self.fields.distance,
        }
    }
}

enum DecodedNode {
    Leaf(CigarLeaf),
    Internal(OpenInternal),
}

/// Decodes one node object; the children of an internal node are left unread.
fn decode_node(value: Value) -> serde_json::Result<DecodedNode> {
    let Value::Object(mut object) = value else {
        return Err(serde_json::Error::custom("expected a cigar tree node object"));
    };
    match object.remove("child") {
        None => serde_json::from_value(Value::Object(object)).map(DecodedNode::Leaf),
        Some(Value::Array(children)) => {
            let fields: InternalFields = serde_json::from_value(Value::Object(object))?;
            Ok(DecodedNode::Internal(OpenInternal {
                fields,
                children: Vec::with_capacity(children.len()),
                unread: children.into_iter(),
            }))
        }
        Some(_) => Err(serde_json::Error::custom("'child' of a cigar tree node must be an array")),
    }
}

/// Pre-order iterator over the nodes of a [CigarTree].
pub struct PreOrderIter<'a> {
    stack: Vec<&'a CigarNode>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a CigarNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
