use std::collections::BTreeMap;
use std::hash::Hash;
use algorithm::prelude::*;
use fnv::{FnvHashMap, FnvHashSet};
use serde_json::Value;
use errors::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Tops,
    Labels,
    Properties,
    Anchors,
    Edges,
    Attributes
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Tops, Dimension::Labels, Dimension::Properties,
        Dimension::Anchors, Dimension::Edges, Dimension::Attributes
    ];

    pub fn name(&self) -> &'static str {
        match *self {
            Dimension::Tops => "tops",
            Dimension::Labels => "labels",
            Dimension::Properties => "properties",
            Dimension::Anchors => "anchors",
            Dimension::Edges => "edges",
            Dimension::Attributes => "attributes"
        }
    }
}

/// Precision, recall and F1 from raw counts; every ratio with a zero denominator is 0
pub fn fscore(gold: usize, system: usize, correct: usize) -> (f64, f64, f64) {
    let precision = if system > 0 { correct as f64 / system as f64 } else { 0.0 };
    let recall = if gold > 0 { correct as f64 / gold as f64 } else { 0.0 };
    let f1 = if precision + recall > 0.0 { 2.0 * precision * recall / (precision + recall) } else { 0.0 };
    (precision, recall, f1)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub gold_count: usize,
    pub system_count: usize,
    pub matched_count: usize
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub gold_count: usize,
    pub system_count: usize,
    pub matched_count: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64
}

impl Counts {
    pub fn new(gold_count: usize, system_count: usize, matched_count: usize) -> Counts {
        Counts { gold_count, system_count, matched_count }
    }

    pub fn update(&mut self, other: &Counts) {
        self.gold_count += other.gold_count;
        self.system_count += other.system_count;
        self.matched_count += other.matched_count;
    }

    pub fn finalize(&self) -> Score {
        let (precision, recall, f1) = fscore(self.gold_count, self.system_count, self.matched_count);
        Score {
            gold_count: self.gold_count,
            system_count: self.system_count,
            matched_count: self.matched_count,
            precision,
            recall,
            f1
        }
    }
}

/// Counts of every scoring dimension for one or more pairs of graphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionCounts {
    pub tops: Counts,
    pub labels: Counts,
    pub properties: Counts,
    pub anchors: Counts,
    pub edges: Counts,
    pub attributes: Counts
}

impl DimensionCounts {
    pub fn get(&self, dimension: Dimension) -> &Counts {
        match dimension {
            Dimension::Tops => &self.tops,
            Dimension::Labels => &self.labels,
            Dimension::Properties => &self.properties,
            Dimension::Anchors => &self.anchors,
            Dimension::Edges => &self.edges,
            Dimension::Attributes => &self.attributes
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut Counts {
        match dimension {
            Dimension::Tops => &mut self.tops,
            Dimension::Labels => &mut self.labels,
            Dimension::Properties => &mut self.properties,
            Dimension::Anchors => &mut self.anchors,
            Dimension::Edges => &mut self.edges,
            Dimension::Attributes => &mut self.attributes
        }
    }

    pub fn update(&mut self, other: &DimensionCounts) {
        for &dimension in Dimension::ALL.iter() {
            self.get_mut(dimension).update(other.get(dimension));
        }
    }

    /// The sum over all dimensions
    pub fn all(&self) -> Counts {
        let mut total = Counts::default();
        for &dimension in Dimension::ALL.iter() {
            total.update(self.get(dimension));
        }
        total
    }
}

/// Items of one side that have no counterpart on the other, in native node ids
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Discrepancies {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub surplus: Vec<Value>
}

#[derive(Debug, Clone, Default)]
pub struct GraphScore {
    pub counts: DimensionCounts,
    /// matched (gold node id, system node id) pairs, only kept on request
    pub correspondences: Vec<(usize, usize)>,
    pub discrepancies: BTreeMap<Dimension, Discrepancies>
}

struct ItemSets<'a> {
    tops: FnvHashSet<usize>,
    labels: FnvHashSet<(usize, &'a str)>,
    properties: FnvHashSet<(usize, &'a str, String)>,
    anchors: FnvHashSet<(usize, AnchorKey)>,
    edges: FnvHashSet<(usize, usize, Option<&'a str>)>,
    attributes: FnvHashSet<(usize, usize, Option<&'a str>, &'a str, &'a str)>
}

impl<'a> ItemSets<'a> {
    fn new(graph: &'a Graph, identities: &FnvHashMap<usize, usize>) -> Result<ItemSets<'a>> {
        let identify = |id: usize, role: &str| -> Result<usize> {
            identities.get(&id)
                .cloned()
                .ok_or_else(|| ErrorKind::MalformedGraph(graph.id.clone(), format!("invalid {} {}", role, id)).into())
        };

        let mut items = ItemSets {
            tops: Default::default(),
            labels: Default::default(),
            properties: Default::default(),
            anchors: Default::default(),
            edges: Default::default(),
            attributes: Default::default()
        };

        let input = graph.input_chars();
        for node in graph.iter_nodes() {
            let identity = identify(node.id, "node")?;
            if node.is_top {
                items.tops.insert(identity);
            }
            if let Some(ref label) = node.label {
                items.labels.insert((identity, label.as_str()));
            }
            for (property, value) in node.iter_properties() {
                items.properties.insert((identity, property, value.to_lowercase()));
            }
            if let Some(key) = graph.anchor_key(node, input.as_ref().map(|x| x.as_slice())) {
                items.anchors.insert((identity, key));
            }
        }

        for edge in graph.iter_edges() {
            let (src, tgt, label) = (identify(edge.src, "source node")?, identify(edge.tgt, "target node")?, edge.label.as_ref().map(|l| l.as_str()));
            items.edges.insert((src, tgt, label));
            for (attribute, value) in edge.iter_attributes() {
                items.attributes.insert((src, tgt, label, attribute, value));
            }
        }

        Ok(items)
    }
}

fn count<T: Hash + Eq>(gold: &FnvHashSet<T>, system: &FnvHashSet<T>) -> Counts {
    Counts::new(gold.len(), system.len(), gold.intersection(system).count())
}

fn discrepancies<T, F1, F2>(gold: &FnvHashSet<T>, system: &FnvHashSet<T>, describe_gold: F1, describe_system: F2) -> Discrepancies
    where T: Hash + Eq, F1: Fn(&T) -> Value, F2: Fn(&T) -> Value {

    let mut missing = gold.difference(system).map(describe_gold).collect::<Vec<_>>();
    let mut surplus = system.difference(gold).map(describe_system).collect::<Vec<_>>();
    missing.sort_by_key(|v| v.to_string());
    surplus.sort_by_key(|v| v.to_string());
    Discrepancies { missing, surplus }
}

/// Score `system` against `gold` under a node correspondence given as (gold
/// position, system position or `None`).
///
/// Corresponding nodes share an identity and every other node gets a fresh one, so
/// items of the two graphs are compared as plain sets. With `trace`, the matched
/// node ids and the missing/surplus items are kept as well.
pub fn score(gold: &Graph, system: &Graph, correspondences: &[(usize, Option<usize>)], trace: bool) -> Result<GraphScore> {
    let mut identities1: FnvHashMap<usize, usize> = Default::default();
    let mut identities2: FnvHashMap<usize, usize> = Default::default();
    for (k, &(i, j)) in correspondences.iter().enumerate() {
        identities1.insert(gold.get_node(i).id, k);
        if let Some(j) = j {
            identities2.insert(system.get_node(j).id, k);
        }
    }

    let mut next = correspondences.len();
    for node in gold.iter_nodes() {
        if !identities1.contains_key(&node.id) {
            identities1.insert(node.id, next);
            next += 1;
        }
    }
    for node in system.iter_nodes() {
        if !identities2.contains_key(&node.id) {
            identities2.insert(node.id, next);
            next += 1;
        }
    }

    let items1 = ItemSets::new(gold, &identities1)?;
    let items2 = ItemSets::new(system, &identities2)?;
    let counts = DimensionCounts {
        tops: count(&items1.tops, &items2.tops),
        labels: count(&items1.labels, &items2.labels),
        properties: count(&items1.properties, &items2.properties),
        anchors: count(&items1.anchors, &items2.anchors),
        edges: count(&items1.edges, &items2.edges),
        attributes: count(&items1.attributes, &items2.attributes)
    };

    let mut result = GraphScore { counts, correspondences: Vec::new(), discrepancies: BTreeMap::new() };
    if !trace {
        return Ok(result);
    }

    result.correspondences = correspondences.iter()
        .filter_map(|&(i, j)| j.map(|j| (gold.get_node(i).id, system.get_node(j).id)))
        .collect();

    let native1: FnvHashMap<usize, usize> = identities1.iter().map(|(&id, &k)| (k, id)).collect();
    let native2: FnvHashMap<usize, usize> = identities2.iter().map(|(&id, &k)| (k, id)).collect();
    let reports = vec![
        (Dimension::Tops, discrepancies(&items1.tops, &items2.tops,
            |&k| json!(native1[&k]), |&k| json!(native2[&k]))),
        (Dimension::Labels, discrepancies(&items1.labels, &items2.labels,
            |&(k, l)| json!([native1[&k], l]), |&(k, l)| json!([native2[&k], l]))),
        (Dimension::Properties, discrepancies(&items1.properties, &items2.properties,
            |&(k, p, ref v)| json!([native1[&k], p, v]), |&(k, p, ref v)| json!([native2[&k], p, v]))),
        (Dimension::Anchors, discrepancies(&items1.anchors, &items2.anchors,
            |&(k, ref a)| json!([native1[&k], a.to_dict()]), |&(k, ref a)| json!([native2[&k], a.to_dict()]))),
        (Dimension::Edges, discrepancies(&items1.edges, &items2.edges,
            |&(s, t, l)| json!([native1[&s], native1[&t], l]), |&(s, t, l)| json!([native2[&s], native2[&t], l]))),
        (Dimension::Attributes, discrepancies(&items1.attributes, &items2.attributes,
            |&(s, t, l, a, v)| json!([native1[&s], native1[&t], l, a, v]), |&(s, t, l, a, v)| json!([native2[&s], native2[&t], l, a, v])))
    ];

    for (dimension, report) in reports {
        if !report.missing.is_empty() || !report.surplus.is_empty() {
            result.discrepancies.insert(dimension, report);
        }
    }

    Ok(result)
}
