use algorithm::prelude::*;

/// A graph whose node ids are the positions of `labels`; the first node is the top
pub fn quick_graph(id: &str, framework: &str, labels: &[&str], edges: &[(usize, usize, &str)]) -> Graph {
    let mut g = Graph::new(id, None, Some(framework));
    for (i, label) in labels.iter().enumerate() {
        g.add_node(Node::with_label(i, label));
    }
    if !labels.is_empty() {
        g.get_node_mut(0).is_top = true;
    }
    for &(src, tgt, label) in edges {
        g.add_edge(Edge::with_label(src, tgt, label));
    }
    g
}

/// A copy of `graph` with node ids shifted by `offset` and nodes in reverse order
pub fn shuffled_copy(graph: &Graph, offset: usize) -> Graph {
    let mut copy = Graph::empty_like(graph);
    for node in graph.iter_nodes().collect::<Vec<_>>().into_iter().rev() {
        let mut node = node.clone();
        node.id += offset;
        copy.add_node(node);
    }
    for edge in graph.iter_edges() {
        let mut edge = edge.clone();
        edge.src += offset;
        edge.tgt += offset;
        copy.add_edge(edge);
    }
    copy
}
