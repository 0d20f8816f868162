use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error;
use serde_json::Value;
use data_structure::graph::anchor::Anchor;
use data_structure::graph::edge::Edge;
use data_structure::graph::graph::Graph;
use data_structure::graph::node::Node;

/// Graph in the MRP interchange layout, one JSON object per graph.
#[derive(Deserialize)]
struct MrpGraph {
    id: Value,
    #[serde(default)]
    flavor: Option<u8>,
    #[serde(default)]
    framework: Option<String>,
    #[serde(default)]
    input: Option<String>,
    #[serde(default)]
    tops: Option<Vec<usize>>,
    #[serde(default)]
    nodes: Option<Vec<MrpNode>>,
    #[serde(default)]
    edges: Option<Vec<MrpEdge>>
}

#[derive(Deserialize)]
struct MrpNode {
    id: usize,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    properties: Option<Vec<String>>,
    #[serde(default)]
    values: Option<Vec<Value>>,
    #[serde(default)]
    anchors: Option<Vec<Anchor>>
}

#[derive(Deserialize)]
struct MrpEdge {
    source: usize,
    target: usize,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    normal: Option<String>,
    #[serde(default)]
    attributes: Option<Vec<String>>,
    #[serde(default)]
    values: Option<Vec<Value>>,
    #[serde(default)]
    anchors: Option<Vec<Anchor>>
}

/// Property and attribute values are strings in the model; MRP also uses bare
/// booleans and numbers (e.g. UCCA `remote: true`).
fn value2string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        v => v.to_string()
    }
}

impl MrpGraph {
    fn into_graph(self) -> Result<Graph, String> {
        let id = match self.id {
            Value::String(s) => s,
            v => v.to_string()
        };
        let mut graph = Graph::new(&id, self.flavor, self.framework.as_ref().map(|f| f.as_str()));
        graph.input = self.input;

        for raw in self.nodes.unwrap_or_default() {
            if graph.position(raw.id).is_some() {
                return Err(format!("graph #{}: duplicate node id {}", id, raw.id));
            }
            let mut node = Node::new(raw.id, raw.label);
            node.properties = raw.properties;
            node.values = raw.values.map(|vs| vs.into_iter().map(value2string).collect());
            node.anchors = raw.anchors;
            graph.add_node(node);
        }

        for top in self.tops.unwrap_or_default() {
            match graph.find_node_mut(top) {
                None => return Err(format!("graph #{}: invalid top node {}", id, top)),
                Some(node) => node.is_top = true
            }
        }

        for raw in self.edges.unwrap_or_default() {
            if graph.position(raw.source).is_none() {
                return Err(format!("graph #{}: invalid source node {}", id, raw.source));
            }
            if graph.position(raw.target).is_none() {
                return Err(format!("graph #{}: invalid target node {}", id, raw.target));
            }

            let mut edge = Edge::new(raw.source, raw.target, raw.label);
            edge.normal = raw.normal;
            edge.attributes = raw.attributes;
            edge.values = raw.values.map(|vs| vs.into_iter().map(value2string).collect());
            edge.anchors = raw.anchors;
            graph.add_edge(edge);
        }

        Ok(graph)
    }
}

impl Serialize for Graph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {

        self.to_dict().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D>(deserializer: D) -> Result<Graph, D::Error>
        where D: Deserializer<'de> {

        MrpGraph::deserialize(deserializer)?
            .into_graph()
            .map_err(D::Error::custom)
    }
}
