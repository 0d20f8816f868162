use std::collections::BTreeSet;
use serde_json::Value;

/// A half-open character span `[from, to)` into the input string of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Anchor {
    pub from: usize,
    pub to: usize
}

impl Anchor {
    pub fn new(from: usize, to: usize) -> Anchor {
        Anchor { from, to }
    }
}

/// Comparable form of the anchoring of a node.
///
/// When the graph carries its input text, spans are exploded into sets of
/// character positions so that trivially different spans (extra punctuation or
/// whitespace) still compare equal. Without input, the raw spans are used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnchorKey {
    Positions(BTreeSet<usize>),
    Spans(Vec<(usize, usize)>)
}

impl AnchorKey {
    pub fn to_dict(&self) -> Value {
        match self {
            AnchorKey::Positions(positions) => json!(positions.iter().collect::<Vec<_>>()),
            AnchorKey::Spans(spans) => Value::Array(spans.iter().map(|&(from, to)| json!([from, to])).collect())
        }
    }
}
