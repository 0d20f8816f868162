use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use serde_json::{Map, Value};
use data_structure::graph::anchor::Anchor;

/// A labelled edge between two nodes, referenced by node id.
///
/// Two edges are the same edge when they agree on `(tgt, src, label)`, in that
/// order; `id`, the normalized label, attributes and anchors do not take part in
/// equality, hashing or ordering.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: usize,
    pub src: usize,
    pub tgt: usize,
    pub label: Option<String>,
    pub normal: Option<String>,
    pub attributes: Option<Vec<String>>,
    pub values: Option<Vec<String>>,
    pub anchors: Option<Vec<Anchor>>
}

impl Edge {
    pub fn new(src: usize, tgt: usize, label: Option<String>) -> Edge {
        Edge {
            id: 182731897,
            src,
            tgt,
            label,
            normal: None,
            attributes: None,
            values: None,
            anchors: None
        }
    }

    pub fn with_label(src: usize, tgt: usize, label: &str) -> Edge {
        Edge::new(src, tgt, Some(label.to_owned()))
    }

    #[inline]
    pub fn key(&self) -> (usize, usize, Option<&str>) {
        (self.tgt, self.src, self.label.as_ref().map(|l| l.as_str()))
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let attributes = self.attributes.get_or_insert_with(Vec::new);
        let values = self.values.get_or_insert_with(Vec::new);
        match attributes.iter().position(|a| a == name) {
            Some(i) if i < values.len() => values[i] = value.to_owned(),
            _ => {
                attributes.push(name.to_owned());
                values.push(value.to_owned());
            }
        }
    }

    /// (attribute, value) pairs of the edge
    pub fn iter_attributes<'a>(&'a self) -> impl Iterator<Item=(&'a str, &'a str)> + 'a {
        let attributes = self.attributes.as_ref().map(|xs| xs.as_slice()).unwrap_or(&[]);
        let values = self.values.as_ref().map(|xs| xs.as_slice()).unwrap_or(&[]);
        izip!(attributes, values).map(|(a, v)| (a.as_str(), v.as_str()))
    }

    /// Remote edges (UCCA) carry a `remote` attribute; all others are primary.
    pub fn is_remote(&self) -> bool {
        match self.attributes {
            None => false,
            Some(ref attributes) => attributes.iter().any(|a| a == "remote")
        }
    }

    pub fn to_dict(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".to_owned(), json!(self.id));
        obj.insert("source".to_owned(), json!(self.src));
        obj.insert("target".to_owned(), json!(self.tgt));
        if let Some(ref label) = self.label {
            obj.insert("label".to_owned(), json!(label));
        }
        if let Some(ref normal) = self.normal {
            obj.insert("normal".to_owned(), json!(normal));
        }
        if let Some(ref attributes) = self.attributes {
            obj.insert("attributes".to_owned(), json!(attributes));
            obj.insert("values".to_owned(), json!(self.values.clone().unwrap_or_default()));
        }
        if let Some(ref anchors) = self.anchors {
            obj.insert("anchors".to_owned(), json!(anchors));
        }

        Value::Object(obj)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Edge) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Edge) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Edge) -> Ordering {
        self.key().cmp(&other.key())
    }
}
