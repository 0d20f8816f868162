use std::collections::BTreeSet;
use algorithm::prelude::*;
use fnv::FnvHashSet;

/// Structural identity of UCCA units: the nodes a unit dominates through primary
/// (non-remote) edges, and the text positions it yields.
///
/// Both are indexed by node position.
#[derive(Debug, Clone)]
pub struct Identities {
    pub dominated: Vec<FnvHashSet<usize>>,
    pub yields: Vec<BTreeSet<usize>>
}

impl Identities {
    /// Identities are only computed for UCCA graphs that come with their input text
    pub fn new(graph: &Graph) -> Option<Identities> {
        if !graph.is_framework("ucca") {
            return None;
        }
        let input = graph.input_chars()?;

        let mut children = vec![Vec::new(); graph.n_nodes];
        for edge in graph.iter_edges() {
            if edge.is_remote() {
                continue;
            }
            if let (Some(src), Some(tgt)) = (graph.position(edge.src), graph.position(edge.tgt)) {
                children[src].push(tgt);
            }
        }

        let mut dominated = Vec::with_capacity(graph.n_nodes);
        let mut yields = Vec::with_capacity(graph.n_nodes);
        for i in 0..graph.n_nodes {
            let reachable = descendants(&children, i);
            let mut spans = graph.get_node(i).anchor_spans();
            for &k in &reachable {
                spans.extend(graph.get_node(k).anchor_spans());
            }

            yields.push(explode(&input, &spans));
            dominated.push(reachable);
        }

        Some(Identities { dominated, yields })
    }

    /// Identities of both sides, or `None` unless both can be computed
    pub fn for_pair(gold: &Graph, system: &Graph) -> Option<(Identities, Identities)> {
        match (Identities::new(gold), Identities::new(system)) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None
        }
    }
}

fn descendants(children: &[Vec<usize>], start: usize) -> FnvHashSet<usize> {
    let mut visited: FnvHashSet<usize> = Default::default();
    let mut stack = children[start].clone();
    while let Some(node) = stack.pop() {
        if visited.insert(node) {
            stack.extend(children[node].iter().cloned());
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_ucca_identities() {
        let mut g = Graph::new("1", None, Some("ucca"));
        g.input = Some("Pierre left.".to_owned());
        let mut pierre = Node::new(0, None);
        pierre.add_anchor(Anchor::new(0, 6));
        let mut left = Node::new(1, None);
        left.add_anchor(Anchor::new(7, 12));
        g.add_node(pierre);
        g.add_node(left);
        g.add_node(Node::new(2, None));
        g.add_node(Node::new(3, None));
        g.add_edge(Edge::with_label(2, 0, "A"));
        g.add_edge(Edge::with_label(2, 1, "P"));
        let mut remote = Edge::with_label(3, 0, "A");
        remote.set_attribute("remote", "true");
        g.add_edge(remote);

        let identities = Identities::new(&g).unwrap();
        assert_eq!(identities.dominated[2], vec![0, 1].into_iter().collect());
        assert!(identities.dominated[0].is_empty());
        assert!(identities.dominated[3].is_empty());
        assert_eq!(identities.yields[2].iter().cloned().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5, 7, 8, 9, 10]);
        assert!(identities.yields[3].is_empty());

        g.input = None;
        assert!(Identities::new(&g).is_none());
    }
}
