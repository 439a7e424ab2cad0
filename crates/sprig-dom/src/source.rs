//! JSON document source.
//!
//! Builds a [`DomTree`] from a JSON description of the document:
//!
//! ```json
//! {
//!   "tag": "html",
//!   "children": [
//!     { "tag": "body", "attrs": { "class": "main" }, "children": [
//!       { "tag": "div", "attrs": { "id": "a", "class": "cls" } },
//!       { "text": "hello" },
//!       { "comment": "note" }
//!     ] }
//!   ]
//! }
//! ```
//!
//! The top level is either one element or an array of nodes; either way the
//! nodes are attached under the Document node in order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

/// Errors raised while loading a document source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source file could not be read.
    #[error("failed to read document '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The source text is not a valid document description.
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One node of the JSON description.
///
/// Variants are tried in order, so an object with a `tag` key is always an
/// element.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceNode {
    Element {
        tag: String,
        #[serde(default)]
        attrs: AttributesMap,
        #[serde(default)]
        children: Vec<SourceNode>,
    },
    Text {
        text: String,
    },
    Comment {
        comment: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceRoot {
    Many(Vec<SourceNode>),
    One(SourceNode),
}

/// Parse a JSON document description into a new tree.
///
/// # Errors
/// Returns [`SourceError::Json`] if `json` is not valid JSON or does not
/// describe a document.
pub fn parse_json(json: &str) -> Result<DomTree, SourceError> {
    let root: SourceRoot = serde_json::from_str(json)?;
    let nodes = match root {
        SourceRoot::Many(nodes) => nodes,
        SourceRoot::One(node) => vec![node],
    };

    let mut tree = DomTree::new();
    for node in nodes {
        attach(&mut tree, NodeId::ROOT, node);
    }
    Ok(tree)
}

/// Read and parse a JSON document description from `path`.
///
/// # Errors
/// Returns [`SourceError::Io`] if the file cannot be read and
/// [`SourceError::Json`] if its contents do not describe a document.
pub fn load_json_file(path: impl AsRef<Path>) -> Result<DomTree, SourceError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&json)
}

fn attach(tree: &mut DomTree, parent: NodeId, node: SourceNode) {
    let (node_type, children) = match node {
        SourceNode::Element {
            tag,
            attrs,
            children,
        } => (
            NodeType::Element(ElementData {
                tag_name: tag,
                attrs,
            }),
            children,
        ),
        SourceNode::Text { text } => (NodeType::Text(text), Vec::new()),
        SourceNode::Comment { comment } => (NodeType::Comment(comment), Vec::new()),
    };

    let id = tree.alloc(node_type);
    tree.append_child(parent, id);
    for child in children {
        attach(tree, id, child);
    }
}
