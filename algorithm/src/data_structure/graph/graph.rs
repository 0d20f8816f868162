use std::fmt;
use fnv::{FnvHashMap, FnvHashSet};
use serde_json::{Map, Value};
use data_structure::graph::anchor::AnchorKey;
use data_structure::graph::node::Node;
use data_structure::graph::edge::Edge;
use data_structure::graph::graph_iter::{IterEdge, IterNode};
use string::explode;

/// Flavor implied by a framework name, used when a graph does not state one.
pub fn flavor_of_framework(framework: &str) -> Option<u8> {
    match framework {
        "dm" | "psd" => Some(0),
        "eds" | "ucca" | "ptg" => Some(1),
        "amr" | "drg" => Some(2),
        _ => None
    }
}

/// A semantic graph: a list of nodes and a set of edges between them.
///
/// Nodes are kept in insertion order and looked up either by position (what the
/// matching algorithms work with) or by id (what edges refer to). Edges are a set
/// under the `(tgt, src, label)` identity; adding an edge that is already present
/// is a no-op.
#[derive(Debug, Clone)]
pub struct Graph {
    pub id: String,
    pub flavor: Option<u8>,
    pub framework: Option<String>,
    pub input: Option<String>,
    pub n_nodes: usize,
    pub n_edges: usize,
    pub(super) nodes: Vec<Node>,
    pub(super) edges: Vec<Edge>,
    node_index_id: FnvHashMap<usize, usize>,
    edge_index_key: FnvHashSet<(usize, usize, Option<String>)>
}

impl Graph {
    pub fn new(id: &str, flavor: Option<u8>, framework: Option<&str>) -> Graph {
        Graph {
            id: id.to_owned(),
            flavor: flavor.or_else(|| framework.and_then(flavor_of_framework)),
            framework: framework.map(|f| f.to_owned()),
            input: None,
            n_nodes: 0,
            n_edges: 0,
            nodes: Vec::with_capacity(32),
            edges: Vec::with_capacity(31),
            node_index_id: Default::default(),
            edge_index_key: Default::default()
        }
    }

    /// An empty graph standing in for a missing counterpart of `g`
    pub fn empty_like(g: &Graph) -> Graph {
        let mut graph = Graph::new(&g.id, g.flavor, g.framework.as_ref().map(|f| f.as_str()));
        graph.input = g.input.clone();
        graph
    }

    /// Add a node to the graph and return its position
    pub fn add_node(&mut self, mut node: Node) -> usize {
        debug_assert!(!self.node_index_id.contains_key(&node.id), "Duplicated node id: {}", node.id);
        node.incoming_edges.clear();
        node.outgoing_edges.clear();

        self.node_index_id.insert(node.id, self.n_nodes);
        self.nodes.push(node);
        self.n_nodes += 1;
        self.n_nodes - 1
    }

    /// Add an edge and return its position, or `None` if an identical edge exists.
    ///
    /// Endpoints are not validated here; edges whose endpoints are unknown are
    /// stored but not registered with any node.
    pub fn add_edge(&mut self, mut edge: Edge) -> Option<usize> {
        let key = (edge.tgt, edge.src, edge.label.clone());
        if self.edge_index_key.contains(&key) {
            return None;
        }
        self.edge_index_key.insert(key);

        edge.id = self.n_edges;
        if let Some(&i) = self.node_index_id.get(&edge.src) {
            self.nodes[i].add_outgoing_edge(&edge);
        }
        if let Some(&i) = self.node_index_id.get(&edge.tgt) {
            self.nodes[i].add_incoming_edge(&edge);
        }

        self.edges.push(edge);
        self.n_edges += 1;
        Some(self.n_edges - 1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_nodes == 0
    }

    /// Whether nodes carry an intrinsic (token) order
    pub fn is_bilexical(&self) -> bool {
        self.flavor == Some(0) || match self.framework {
            Some(ref f) => f == "dm" || f == "psd" || f == "pas" || f == "ccd",
            None => false
        }
    }

    pub fn is_framework(&self, framework: &str) -> bool {
        self.framework.as_ref().map(|f| f == framework).unwrap_or(false)
    }

    #[inline]
    pub fn get_node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    #[inline]
    pub fn get_node_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    /// Position of the node with the given id
    #[inline]
    pub fn position(&self, id: usize) -> Option<usize> {
        self.node_index_id.get(&id).cloned()
    }

    pub fn find_node(&self, id: usize) -> Option<&Node> {
        self.position(id).map(|i| &self.nodes[i])
    }

    pub fn find_node_mut(&mut self, id: usize) -> Option<&mut Node> {
        match self.position(id) {
            None => None,
            Some(i) => Some(&mut self.nodes[i])
        }
    }

    pub fn iter_nodes(&self) -> IterNode {
        IterNode::new(&self.nodes)
    }

    pub fn iter_edges(&self) -> IterEdge {
        IterEdge::all(self)
    }

    pub fn input_chars(&self) -> Option<Vec<char>> {
        match self.input {
            Some(ref input) if !input.is_empty() => Some(input.chars().collect()),
            _ => None
        }
    }

    /// Comparable anchoring of `node`, if it has any. Pass the pre-computed
    /// `input_chars()` when calling this in a loop.
    pub fn anchor_key(&self, node: &Node, input: Option<&[char]>) -> Option<AnchorKey> {
        if node.anchors.is_none() {
            return None;
        }

        let spans = node.anchor_spans();
        Some(match input {
            Some(input) => AnchorKey::Positions(explode(input, &spans)),
            None => AnchorKey::Spans(spans)
        })
    }

    pub fn to_dict(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".to_owned(), json!(self.id));
        if let Some(flavor) = self.flavor {
            obj.insert("flavor".to_owned(), json!(flavor));
        }
        if let Some(ref framework) = self.framework {
            obj.insert("framework".to_owned(), json!(framework));
        }
        if let Some(ref input) = self.input {
            obj.insert("input".to_owned(), json!(input));
        }
        obj.insert("tops".to_owned(), json!(self.nodes.iter().filter(|n| n.is_top).map(|n| n.id).collect::<Vec<_>>()));
        obj.insert("nodes".to_owned(), Value::Array(self.nodes.iter().map(|n| n.to_dict()).collect()));
        obj.insert("edges".to_owned(), Value::Array(self.edges.iter().map(|e| e.to_dict()).collect()));

        Value::Object(obj)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Graph(id={}, framework={:?}\n", self.id, self.framework)?;
        for e in self.iter_edges() {
            let label = |id: usize| self.find_node(id).and_then(|n| n.label.clone()).unwrap_or_else(|| format!("#{}", id));
            write!(f, "\t+ {}---{}---{}\n", label(e.src), e.label.as_ref().map(|l| l.as_str()).unwrap_or(""), label(e.tgt))?;
        }

        write!(f, ")")
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Graph) -> bool {
        if self.id != other.id || self.framework != other.framework || self.flavor != other.flavor || self.input != other.input {
            return false;
        }
        if self.n_nodes != other.n_nodes || self.n_edges != other.n_edges {
            return false;
        }

        for (a, b) in self.nodes.iter().zip(other.nodes.iter()) {
            if a != b {
                return false;
            }
        }

        for e in self.iter_edges() {
            if !other.edge_index_key.contains(&(e.tgt, e.src, e.label.clone())) {
                return false;
            }
        }

        return true;
    }
}

impl Eq for Graph {}
