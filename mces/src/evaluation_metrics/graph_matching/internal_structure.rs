use std::rc::Rc;
use algorithm::prelude::*;
use fnv::{FnvHashMap, FnvHashSet};
use im::ordmap::OrdMap;
use errors::*;

/// A node decoration (label, top flag, anchoring or property) turned into a
/// pseudo-edge towards a shared sink node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decoration<'a> {
    Label(Option<&'a str>),
    Top,
    Anchor(AnchorKey),
    Property(&'a str, &'a str)
}

/// Sink numbering shared by the gold and the system graph of one pair, so that the
/// same decoration gets the same sink on both sides.
///
/// Sinks are negative (`-2 - k` for the k-th distinct decoration), which keeps them
/// apart from node positions and from the `-1` used for "not mapped".
#[derive(Debug, Default)]
pub struct DecorationIndex<'a> {
    index: FnvHashMap<Decoration<'a>, usize>
}

impl<'a> DecorationIndex<'a> {
    pub fn new() -> DecorationIndex<'a> {
        Default::default()
    }

    pub fn sink(&mut self, decoration: Decoration<'a>) -> i32 {
        let next = self.index.len();
        let k = *self.index.entry(decoration).or_insert(next);
        -2 - k as i32
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeLabel<'a> {
    Plain(Option<&'a str>),
    /// an edge attribute, compared by name and value only
    Attribute(&'a str, &'a str),
    Decoration
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternalEdge<'a> {
    pub src: i32,
    pub tgt: i32,
    pub label: EdgeLabel<'a>
}

/// A graph over node positions where every decoration is an edge.
#[derive(Debug)]
pub struct InternalGraph<'a> {
    pub n_nodes: usize,
    pub edges: Vec<InternalEdge<'a>>
}

impl<'a> InternalGraph<'a> {
    pub fn new(graph: &'a Graph, index: &mut DecorationIndex<'a>) -> Result<InternalGraph<'a>> {
        let mut edges = Vec::with_capacity(graph.n_edges + 2 * graph.n_nodes);
        let position = |id: usize, role: &str| -> Result<i32> {
            graph.position(id)
                .map(|i| i as i32)
                .ok_or_else(|| ErrorKind::MalformedGraph(graph.id.clone(), format!("invalid {} node {}", role, id)).into())
        };

        for edge in graph.iter_edges() {
            let src = position(edge.src, "source")?;
            let tgt = position(edge.tgt, "target")?;
            edges.push(InternalEdge { src, tgt, label: EdgeLabel::Plain(edge.label.as_ref().map(|l| l.as_str())) });
            for (attribute, value) in edge.iter_attributes() {
                edges.push(InternalEdge { src, tgt, label: EdgeLabel::Attribute(attribute, value) });
            }
        }

        let input = graph.input_chars();
        for (i, node) in graph.iter_nodes().enumerate() {
            let src = i as i32;
            let mut decorations = vec![Decoration::Label(node.label.as_ref().map(|l| l.as_str()))];
            if node.is_top {
                decorations.push(Decoration::Top);
            }
            if let Some(key) = graph.anchor_key(node, input.as_ref().map(|x| x.as_slice())) {
                decorations.push(Decoration::Anchor(key));
            }
            decorations.extend(node.iter_properties().map(|(p, v)| Decoration::Property(p, v)));

            for decoration in decorations {
                edges.push(InternalEdge { src, tgt: index.sink(decoration), label: EdgeLabel::Decoration });
            }
        }

        Ok(InternalGraph { n_nodes: graph.n_nodes, edges })
    }
}

/// Distinct gold edges, with the edges touching each gold node.
pub struct EdgeTable<'a> {
    pub edges: Vec<InternalEdge<'a>>,
    touching: Vec<Vec<usize>>
}

impl<'a> EdgeTable<'a> {
    pub fn new(graph: &InternalGraph<'a>) -> EdgeTable<'a> {
        let mut seen: FnvHashSet<&InternalEdge<'a>> = Default::default();
        let mut edges = Vec::new();
        for edge in &graph.edges {
            if seen.insert(edge) {
                edges.push(edge.clone());
            }
        }

        let mut touching = vec![Vec::new(); graph.n_nodes];
        for (k, edge) in edges.iter().enumerate() {
            touching[edge.src as usize].push(k);
            if edge.tgt >= 0 && edge.tgt != edge.src {
                touching[edge.tgt as usize].push(k);
            }
        }

        EdgeTable { edges, touching }
    }

    #[inline]
    pub fn touching(&self, i: usize) -> &[usize] {
        &self.touching[i]
    }
}

pub type CandidateSet = Rc<FnvHashSet<(i32, i32)>>;

/// For every gold edge still matchable, the system edges (as `(src, tgt)`) it may
/// be matched with under the partial correspondence built so far.
///
/// Persistent: narrowing returns a new value sharing the untouched sets.
#[derive(Debug, Clone)]
pub struct EdgeCandidates {
    candidates: OrdMap<usize, CandidateSet>
}

impl EdgeCandidates {
    /// A decoration edge only matches a system edge to the same sink; a regular edge
    /// only matches a regular system edge with the same label.
    pub fn new<'a>(table: &EdgeTable<'a>, system: &InternalGraph<'a>) -> EdgeCandidates {
        let mut by_label: FnvHashMap<&EdgeLabel<'a>, Vec<(i32, i32)>> = Default::default();
        for edge in &system.edges {
            by_label.entry(&edge.label).or_insert_with(Vec::new).push((edge.src, edge.tgt));
        }

        let mut candidates = OrdMap::new();
        for (k, edge) in table.edges.iter().enumerate() {
            let set: FnvHashSet<(i32, i32)> = match by_label.get(&edge.label) {
                None => continue,
                Some(system_edges) => system_edges.iter()
                    .filter(|&&(_, tgt2)| if edge.tgt < 0 { tgt2 == edge.tgt } else { tgt2 >= 0 })
                    .cloned()
                    .collect()
            };

            if !set.is_empty() {
                candidates.insert(k, Rc::new(set));
            }
        }

        EdgeCandidates { candidates }
    }

    /// Restrict candidates to those consistent with mapping gold node `i` to system
    /// node `j` (`-1` for unmapped). Edges left without candidates are dropped.
    pub fn narrow(&self, table: &EdgeTable, i: usize, j: i32) -> EdgeCandidates {
        let mut candidates = self.candidates.clone();
        let node = i as i32;
        for &k in table.touching(i) {
            let current = match self.candidates.get(&k) {
                None => continue,
                Some(current) => current
            };

            let edge = &table.edges[k];
            let remained: FnvHashSet<(i32, i32)> = current.iter()
                .filter(|&&(src2, tgt2)| if edge.src == edge.tgt {
                    src2 == j && tgt2 == j
                } else {
                    (edge.src == node && src2 == j) || (edge.tgt == node && tgt2 == j)
                })
                .cloned()
                .collect();

            if remained.is_empty() {
                candidates.remove(&k);
            } else if remained.len() != current.len() {
                candidates.insert(k, Rc::new(remained));
            }
        }

        EdgeCandidates { candidates }
    }

    /// Number of gold edges that may still be matched, an upper bound on the edges
    /// matched by any completion of the current correspondence
    #[inline]
    pub fn potential(&self) -> usize {
        self.candidates.len()
    }

    /// Total number of remaining (gold edge, system edge) options
    pub fn n_options(&self) -> usize {
        self.candidates.values().map(|c| c.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph(id: &str, edge: bool) -> Graph {
        let mut g = Graph::new(id, None, Some("eds"));
        g.add_node(Node::with_label(0, "a"));
        let mut b = Node::with_label(1, "b");
        b.is_top = true;
        b.set_property("pos", "n");
        g.add_node(b);
        if edge {
            g.add_edge(Edge::with_label(1, 0, "ARG1"));
        }
        g
    }

    #[test]
    pub fn test_shared_sinks() {
        let gold = two_node_graph("1", true);
        let system = two_node_graph("1", false);
        let mut index = DecorationIndex::new();
        let g = InternalGraph::new(&gold, &mut index).unwrap();
        let s = InternalGraph::new(&system, &mut index).unwrap();

        // label a, label b, top, property pos=n
        assert_eq!(index.len(), 4);
        assert_eq!(g.edges.len(), 5);
        assert_eq!(g.edges[0], InternalEdge { src: 1, tgt: 0, label: EdgeLabel::Plain(Some("ARG1")) });
        assert_eq!(&g.edges[1..], &s.edges[..]);
        assert_eq!(s.edges[0].tgt, -2);
    }

    #[test]
    pub fn test_narrow() {
        let gold = two_node_graph("1", true);
        let system = two_node_graph("1", true);
        let mut index = DecorationIndex::new();
        let g = InternalGraph::new(&gold, &mut index).unwrap();
        let s = InternalGraph::new(&system, &mut index).unwrap();
        let table = EdgeTable::new(&g);
        let ce = EdgeCandidates::new(&table, &s);
        assert_eq!(ce.potential(), 5);

        // mapping b onto a loses the edge and every decoration of b
        let wrong = ce.narrow(&table, 1, 0);
        assert_eq!(wrong.potential(), 1);
        let right = ce.narrow(&table, 1, 1).narrow(&table, 0, 0);
        assert_eq!(right.potential(), 5);
        assert_eq!(right.n_options(), 5);
        let unmapped = ce.narrow(&table, 0, -1);
        assert_eq!(unmapped.potential(), 3);
    }

    #[test]
    pub fn test_narrow_self_loop() {
        let mut gold = Graph::new("1", None, Some("eds"));
        gold.add_node(Node::with_label(0, "a"));
        gold.add_edge(Edge::with_label(0, 0, "L"));
        let mut system = Graph::new("1", None, Some("eds"));
        system.add_node(Node::with_label(0, "a"));
        system.add_node(Node::with_label(1, "b"));
        system.add_edge(Edge::with_label(0, 1, "L"));
        system.add_edge(Edge::with_label(1, 0, "L"));

        let mut index = DecorationIndex::new();
        let g = InternalGraph::new(&gold, &mut index).unwrap();
        let s = InternalGraph::new(&system, &mut index).unwrap();
        let table = EdgeTable::new(&g);
        let ce = EdgeCandidates::new(&table, &s);
        assert_eq!(ce.n_options(), 3);

        // a loop survives only on a system loop at the image of its node
        let narrowed = ce.narrow(&table, 0, 0);
        assert_eq!(narrowed.potential(), 1);
        assert_eq!(narrowed.n_options(), 1);
    }

    #[test]
    pub fn test_dangling_edge() {
        let mut gold = two_node_graph("7", false);
        gold.add_edge(Edge::with_label(1, 5, "ARG2"));
        let mut index = DecorationIndex::new();
        match InternalGraph::new(&gold, &mut index) {
            Err(Error(ErrorKind::MalformedGraph(id, _), _)) => assert_eq!(id, "7"),
            x => panic!("expect malformed graph, got {:?}", x.map(|g| g.n_nodes))
        }
    }
}
