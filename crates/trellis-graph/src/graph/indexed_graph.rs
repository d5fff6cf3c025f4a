//! petgraph::StableGraph wrapper with typed entity nodes and edges.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use trellis_core::constants::{EDGE_AUTHORED, EDGE_CONTAINS};
use trellis_core::errors::GraphStoreError;
use trellis_core::models::{AuthorRef, Corpus, DocumentRef, FragmentRef};
use trellis_core::traits::IGraphStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Fragment,
    Document,
    Author,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityNode {
    Fragment(FragmentRef),
    Document(DocumentRef),
    Author(AuthorRef),
}

impl EntityNode {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityNode::Fragment(_) => EntityKind::Fragment,
            EntityNode::Document(_) => EntityKind::Document,
            EntityNode::Author(_) => EntityKind::Author,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityNode::Fragment(f) => &f.id,
            EntityNode::Document(d) => &d.id,
            EntityNode::Author(a) => &a.id,
        }
    }
}

/// `document -Contains-> fragment`, `author -Authored-> document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Contains,
    Authored,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Contains => EDGE_CONTAINS,
            EdgeKind::Authored => EDGE_AUTHORED,
        }
    }
}

pub type EntityGraph = StableGraph<EntityNode, EdgeKind, Directed>;

/// Entity graph with O(1) node lookup by kind and id.
pub struct IndexedGraph {
    pub graph: EntityGraph,
    pub node_index: HashMap<(EntityKind, String), NodeIndex>,
}

impl IndexedGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Build from a corpus. Edges to entities the corpus does not define
    /// are dropped, so the relation reads as missing.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut graph = Self::new();
        for author in &corpus.authors {
            graph.ensure_node(EntityNode::Author(AuthorRef {
                id: author.id.clone(),
                name: author.name.clone(),
            }));
        }
        for document in &corpus.documents {
            let doc = graph.ensure_node(EntityNode::Document(DocumentRef {
                id: document.id.clone(),
                title: document.title.clone(),
            }));
            if let Some(author) = document
                .author_id
                .as_deref()
                .and_then(|id| graph.get_node(EntityKind::Author, id))
            {
                graph.link(author, doc, EdgeKind::Authored);
            }
        }
        for fragment in &corpus.fragments {
            let frag = graph.ensure_node(EntityNode::Fragment(FragmentRef {
                id: fragment.id.clone(),
                text: fragment.text.clone(),
            }));
            if let Some(doc) = fragment
                .document_id
                .as_deref()
                .and_then(|id| graph.get_node(EntityKind::Document, id))
            {
                graph.link(doc, frag, EdgeKind::Contains);
            }
        }
        graph
    }

    /// Get or create the node. An existing node keeps its payload.
    pub fn ensure_node(&mut self, node: EntityNode) -> NodeIndex {
        let key = (node.kind(), node.id().to_string());
        if let Some(&idx) = self.node_index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.node_index.insert(key, idx);
        idx
    }

    /// Add an edge unless an identical one exists.
    pub fn link(&mut self, source: NodeIndex, target: NodeIndex, kind: EdgeKind) {
        let exists = self
            .graph
            .edges_directed(source, Direction::Outgoing)
            .any(|e| e.target() == target && *e.weight() == kind);
        if !exists {
            self.graph.add_edge(source, target, kind);
        }
    }

    pub fn get_node(&self, kind: EntityKind, id: &str) -> Option<NodeIndex> {
        self.node_index.get(&(kind, id.to_string())).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, idx: NodeIndex, kind: EdgeKind, dir: Direction) -> impl Iterator<Item = &EntityNode> {
        self.graph
            .edges_directed(idx, dir)
            .filter(move |e| *e.weight() == kind)
            .filter_map(move |e| {
                let other = match dir {
                    Direction::Incoming => e.source(),
                    Direction::Outgoing => e.target(),
                };
                self.graph.node_weight(other)
            })
    }

    pub fn document_of(&self, fragment_id: &str) -> Option<DocumentRef> {
        let idx = self.get_node(EntityKind::Fragment, fragment_id)?;
        self.neighbors(idx, EdgeKind::Contains, Direction::Incoming)
            .filter_map(|n| match n {
                EntityNode::Document(d) => Some(d.clone()),
                _ => None,
            })
            .min()
    }

    pub fn author_of(&self, document_id: &str) -> Option<AuthorRef> {
        let idx = self.get_node(EntityKind::Document, document_id)?;
        self.neighbors(idx, EdgeKind::Authored, Direction::Incoming)
            .filter_map(|n| match n {
                EntityNode::Author(a) => Some(a.clone()),
                _ => None,
            })
            .min()
    }

    pub fn fragments_of(&self, document_id: &str, exclude: &str, limit: usize) -> Vec<FragmentRef> {
        let Some(idx) = self.get_node(EntityKind::Document, document_id) else {
            return Vec::new();
        };
        let mut fragments: Vec<FragmentRef> = self
            .neighbors(idx, EdgeKind::Contains, Direction::Outgoing)
            .filter_map(|n| match n {
                EntityNode::Fragment(f) if f.id != exclude => Some(f.clone()),
                _ => None,
            })
            .collect();
        fragments.sort_by(|a, b| a.id.cmp(&b.id));
        fragments.truncate(limit);
        fragments
    }

    pub fn documents_of(&self, author_id: &str, exclude: &str, limit: usize) -> Vec<DocumentRef> {
        let Some(idx) = self.get_node(EntityKind::Author, author_id) else {
            return Vec::new();
        };
        let mut documents: Vec<DocumentRef> = self
            .neighbors(idx, EdgeKind::Authored, Direction::Outgoing)
            .filter_map(|n| match n {
                EntityNode::Document(d) if d.id != exclude => Some(d.clone()),
                _ => None,
            })
            .collect();
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        documents.truncate(limit);
        documents
    }
}

impl Default for IndexedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl IGraphStore for IndexedGraph {
    async fn fragment_document(&self, fragment_id: &str) -> Result<Option<DocumentRef>, GraphStoreError> {
        Ok(self.document_of(fragment_id))
    }

    async fn document_author(&self, document_id: &str) -> Result<Option<AuthorRef>, GraphStoreError> {
        Ok(self.author_of(document_id))
    }

    async fn document_fragments(
        &self,
        document_id: &str,
        exclude_fragment: &str,
        limit: usize,
    ) -> Result<Vec<FragmentRef>, GraphStoreError> {
        Ok(self.fragments_of(document_id, exclude_fragment, limit))
    }

    async fn author_documents(
        &self,
        author_id: &str,
        exclude_document: &str,
        limit: usize,
    ) -> Result<Vec<DocumentRef>, GraphStoreError> {
        Ok(self.documents_of(author_id, exclude_document, limit))
    }
}
