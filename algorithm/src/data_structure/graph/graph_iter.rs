use data_structure::graph::graph::Graph;
use data_structure::graph::edge::Edge;
use data_structure::graph::node::Node;

/// Iterate over edges of a graph, either all of them or those at the given positions.
pub struct IterEdge<'a> {
    current_idx: usize,
    n_elements: usize,
    pub(super) edges: Option<&'a [usize]>,
    pub(super) graph: &'a Graph
}

pub struct IterNode<'a> {
    current_idx: usize,
    pub(super) nodes: &'a [Node]
}

impl<'a> IterEdge<'a> {
    pub fn new(edges: &'a [usize], graph: &'a Graph) -> IterEdge<'a> {
        IterEdge {
            current_idx: 0,
            n_elements: edges.len(),
            edges: Some(edges),
            graph
        }
    }

    pub fn all(graph: &'a Graph) -> IterEdge<'a> {
        IterEdge {
            current_idx: 0,
            n_elements: graph.edges.len(),
            edges: None,
            graph
        }
    }
}

impl<'a> Iterator for IterEdge<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<&'a Edge> {
        if self.current_idx == self.n_elements {
            return None;
        }

        let idx = match self.edges {
            None => self.current_idx,
            Some(edges) => edges[self.current_idx]
        };
        self.current_idx += 1;
        Some(&self.graph.edges[idx])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.n_elements - self.current_idx;
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for IterEdge<'a> {}

impl<'a> IterNode<'a> {
    pub fn new(nodes: &'a [Node]) -> IterNode<'a> {
        IterNode { current_idx: 0, nodes }
    }
}

impl<'a> Iterator for IterNode<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        if self.current_idx == self.nodes.len() {
            None
        } else {
            self.current_idx += 1;
            Some(&self.nodes[self.current_idx - 1])
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.nodes.len() - self.current_idx;
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for IterNode<'a> {}
