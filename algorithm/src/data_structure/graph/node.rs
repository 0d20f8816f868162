use serde_json::{Map, Value};
use fnv::FnvHashSet;
use data_structure::graph::anchor::Anchor;
use data_structure::graph::edge::Edge;
use data_structure::graph::graph::Graph;
use data_structure::graph::graph_iter::IterEdge;

/// Node-local facts shared by two nodes versus those found in only one of them.
///
/// `delta` is `shared - only_in_self - only_in_other`; it is what guides the
/// correspondence search (it is not monotone, which the search does not need).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeComparison {
    pub delta: i64,
    pub only_in_self: usize,
    pub shared: usize,
    pub only_in_other: usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: usize,
    pub label: Option<String>,
    pub properties: Option<Vec<String>>,
    pub values: Option<Vec<String>>,
    pub anchors: Option<Vec<Anchor>>,
    pub is_top: bool,
    pub incoming_edges: Vec<usize>,
    pub outgoing_edges: Vec<usize>
}

impl Node {
    pub fn new(id: usize, label: Option<String>) -> Node {
        Node {
            id,
            label,
            properties: None,
            values: None,
            anchors: None,
            is_top: false,
            incoming_edges: Vec::new(),
            outgoing_edges: Vec::new()
        }
    }

    pub fn with_label(id: usize, label: &str) -> Node {
        Node::new(id, Some(label.to_owned()))
    }

    pub fn set_property(&mut self, name: &str, value: &str) {
        match (&mut self.properties, &mut self.values) {
            (Some(properties), Some(values)) if !properties.is_empty() && properties.len() == values.len() => {
                match properties.iter().position(|p| p == name) {
                    Some(i) => values[i] = value.to_owned(),
                    None => {
                        properties.push(name.to_owned());
                        values.push(value.to_owned());
                    }
                }
                return;
            },
            _ => {}
        }

        self.properties = Some(vec![name.to_owned()]);
        self.values = Some(vec![value.to_owned()]);
    }

    pub fn add_anchor(&mut self, anchor: Anchor) {
        match self.anchors {
            None => self.anchors = Some(vec![anchor]),
            Some(ref mut anchors) => {
                if !anchors.contains(&anchor) {
                    anchors.push(anchor);
                }
            }
        }
    }

    /// (property, value) pairs of the node; a property without a value is skipped
    pub fn iter_properties<'a>(&'a self) -> impl Iterator<Item=(&'a str, &'a str)> + 'a {
        let properties = self.properties.as_ref().map(|ps| ps.as_slice()).unwrap_or(&[]);
        let values = self.values.as_ref().map(|vs| vs.as_slice()).unwrap_or(&[]);
        izip!(properties, values).map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// (from, to) pairs of the anchors, in the order they were given
    pub fn anchor_spans(&self) -> Vec<(usize, usize)> {
        match self.anchors {
            None => Vec::new(),
            Some(ref anchors) => anchors.iter().map(|a| (a.from, a.to)).collect()
        }
    }

    pub fn add_incoming_edge(&mut self, edge: &Edge) {
        self.incoming_edges.push(edge.id);
    }

    pub fn add_outgoing_edge(&mut self, edge: &Edge) {
        self.outgoing_edges.push(edge.id);
    }

    pub fn iter_incoming_edges<'a>(&'a self, graph: &'a Graph) -> IterEdge<'a> {
        IterEdge::new(&self.incoming_edges, graph)
    }

    pub fn iter_outgoing_edges<'a>(&'a self, graph: &'a Graph) -> IterEdge<'a> {
        IterEdge::new(&self.outgoing_edges, graph)
    }

    /// Compare the top flag, label and properties of two nodes. Comparing against
    /// no node at all counts every fact of `self` as a deletion.
    pub fn compare(&self, node: Option<&Node>) -> NodeComparison {
        let mut count1 = 0;
        let mut both = 0;
        let mut count2 = 0;

        let node = match node {
            None => {
                if self.is_top {
                    count1 += 1;
                }
                if self.label.is_some() {
                    count1 += 1;
                }
                if let Some(ref properties) = self.properties {
                    count1 += properties.len();
                }
                return NodeComparison::new(count1, both, count2);
            },
            Some(node) => node
        };

        if self.is_top {
            if node.is_top { both += 1; } else { count1 += 1; }
        } else {
            if node.is_top { count2 += 1; } else { both += 1; }
        }

        if let Some(ref label) = self.label {
            if node.label.as_ref() == Some(label) {
                both += 1;
            } else {
                count1 += 1;
                if node.label.is_some() {
                    count2 += 1;
                }
            }
        }

        match (&self.properties, &node.properties) {
            (Some(_), Some(_)) => {
                let properties1: FnvHashSet<(&str, &str)> = self.iter_properties().collect();
                let properties2: FnvHashSet<(&str, &str)> = node.iter_properties().collect();
                let n = properties1.intersection(&properties2).count();
                count1 += properties1.len() - n;
                both += n;
                count2 += properties2.len() - n;
            },
            (Some(properties), None) => count1 += properties.len(),
            (None, Some(properties)) => count2 += properties.len(),
            (None, None) => {}
        }

        NodeComparison::new(count1, both, count2)
    }

    pub fn to_dict(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".to_owned(), json!(self.id));
        if let Some(ref label) = self.label {
            obj.insert("label".to_owned(), json!(label));
        }
        if let Some(ref properties) = self.properties {
            obj.insert("properties".to_owned(), json!(properties));
            obj.insert("values".to_owned(), json!(self.values.clone().unwrap_or_default()));
        }
        if let Some(ref anchors) = self.anchors {
            obj.insert("anchors".to_owned(), json!(anchors));
        }

        Value::Object(obj)
    }
}

impl NodeComparison {
    fn new(only_in_self: usize, shared: usize, only_in_other: usize) -> NodeComparison {
        NodeComparison {
            delta: shared as i64 - only_in_self as i64 - only_in_other as i64,
            only_in_self,
            shared,
            only_in_other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_compare_against_nothing() {
        let mut node = Node::with_label(0, "dog");
        node.is_top = true;
        node.set_property("pos", "n");
        node.set_property("num", "sg");

        let cmp = node.compare(None);
        assert_eq!((cmp.delta, cmp.only_in_self, cmp.shared, cmp.only_in_other), (-4, 4, 0, 0));
    }

    #[test]
    pub fn test_compare_nodes() {
        let mut a = Node::with_label(0, "dog");
        a.set_property("pos", "n");
        a.set_property("num", "sg");
        let mut b = Node::with_label(3, "dog");
        b.set_property("num", "pl");
        b.set_property("pos", "n");
        b.is_top = true;

        // top: b only; label: shared; properties: one shared, one on each side
        let cmp = a.compare(Some(&b));
        assert_eq!((cmp.only_in_self, cmp.shared, cmp.only_in_other), (1, 2, 2));
        assert_eq!(cmp.delta, -1);

        // neither top counts as a shared fact; unlabeled other side only costs self
        let c = Node::with_label(1, "cat");
        let d = Node::new(2, None);
        let cmp = c.compare(Some(&d));
        assert_eq!((cmp.only_in_self, cmp.shared, cmp.only_in_other), (1, 1, 0));
    }

    #[test]
    pub fn test_set_property_overrides() {
        let mut node = Node::new(0, None);
        node.set_property("pos", "n");
        node.set_property("pos", "v");
        assert_eq!(node.iter_properties().collect::<Vec<_>>(), vec![("pos", "v")]);
    }
}
