use algorithm::prelude::*;
use fnv::{FnvHashMap, FnvHashSet};
use super::identities::Identities;

/// Node correspondence as (gold position, system position or `None`), in the order
/// the gold nodes are to be processed.
pub type Pairs = Vec<(usize, Option<usize>)>;

/// Reward of mapping gold node `i` to system node `j`, with the last column for
/// leaving `i` unmapped.
///
/// The node comparison dominates (scaled by 1000), then shared anchoring of UCCA
/// units (by 10), then edges with the same label leaving/entering both nodes.
pub fn rewards(gold: &Graph, system: &Graph, identities: Option<&(Identities, Identities)>) -> Matrix<i64> {
    reward_candidates(gold, system, identities).0
}

struct Candidate {
    delta: i64,
    edges: usize,
    anchors: usize,
    i: usize,
    j: Option<usize>
}

fn reward_candidates(gold: &Graph, system: &Graph, identities: Option<&(Identities, Identities)>) -> (Matrix<i64>, Vec<Candidate>) {
    let mut matrix = Matrix::new(gold.n_nodes, system.n_nodes + 1);
    let mut candidates = Vec::with_capacity(gold.n_nodes * (system.n_nodes + 1));
    for (i, node1) in gold.iter_nodes().enumerate() {
        let outgoing = label_counts(node1.iter_outgoing_edges(gold));
        let incoming = label_counts(node1.iter_incoming_edges(gold));

        for j in 0..system.n_nodes + 1 {
            let node2 = if j < system.n_nodes { Some(system.get_node(j)) } else { None };
            let delta = node1.compare(node2).delta;

            let mut edges = 0;
            let mut anchors = 0;
            if let Some(node2) = node2 {
                edges += node2.iter_outgoing_edges(system).map(|e| count_of(&outgoing, e)).sum::<usize>();
                edges += node2.iter_incoming_edges(system).map(|e| count_of(&incoming, e)).sum::<usize>();
                if let Some(&(ref identities1, ref identities2)) = identities {
                    anchors = identities1.yields[i].intersection(&identities2.yields[j]).count();
                }
            }

            matrix[(i, j)] = delta * 1000 + anchors as i64 * 10 + edges as i64;
            candidates.push(Candidate { delta, edges, anchors, i, j: node2.map(|_| j) });
        }
    }

    (matrix, candidates)
}

fn label_counts<'a, I: Iterator<Item=&'a Edge>>(edges: I) -> FnvHashMap<Option<&'a str>, usize> {
    let mut counts: FnvHashMap<Option<&'a str>, usize> = Default::default();
    for edge in edges {
        *counts.entry(edge.label.as_ref().map(|l| l.as_str())).or_insert(0) += 1;
    }
    counts
}

#[inline]
fn count_of(counts: &FnvHashMap<Option<&str>, usize>, edge: &Edge) -> usize {
    counts.get(&edge.label.as_ref().map(|l| l.as_str())).cloned().unwrap_or(0)
}

/// Greedy seed for graphs without node order: take (gold, system) candidates by
/// decreasing node agreement, then anchoring, then edges, skipping nodes already
/// taken. Leaving a node unmapped never blocks another gold node.
fn greedy_pairs(mut queue: Vec<Candidate>) -> Pairs {
    // stable: ties keep the (i, j) enumeration order
    queue.sort_by(|a, b| (b.delta, b.anchors, b.edges).cmp(&(a.delta, a.anchors, a.edges)));

    let mut sources: FnvHashSet<usize> = Default::default();
    let mut targets: FnvHashSet<usize> = Default::default();
    let mut pairs = Vec::new();
    for candidate in queue {
        if sources.contains(&candidate.i) {
            continue;
        }
        if let Some(j) = candidate.j {
            if targets.contains(&j) {
                continue;
            }
            targets.insert(j);
        }

        sources.insert(candidate.i);
        pairs.push((candidate.i, candidate.j));
    }

    pairs
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Deletion,
    Insertion,
    Alignment
}

impl Default for Step {
    fn default() -> Step {
        Step::Deletion
    }
}

/// Order-preserving seed for bilexical graphs: the alignment of both node sequences
/// that maximizes the number of shared node facts. Ties prefer deletion, then
/// insertion, then alignment.
pub fn levenshtein_pairs(gold: &Graph, system: &Graph) -> Pairs {
    let m = gold.n_nodes;
    let n = system.n_nodes;
    let mut distances = Matrix::<i64>::new(m + 1, n + 1);
    let mut steps = Matrix::<Step>::new(m + 1, n + 1);
    for i in 1..m + 1 {
        steps[(i, 0)] = Step::Deletion;
    }
    for j in 1..n + 1 {
        steps[(0, j)] = Step::Insertion;
    }

    for j in 1..n + 1 {
        for i in 1..m + 1 {
            let mut best = distances[(i - 1, j)];
            let mut step = Step::Deletion;
            if distances[(i, j - 1)] > best {
                best = distances[(i, j - 1)];
                step = Step::Insertion;
            }
            let shared = gold.get_node(i - 1).compare(Some(system.get_node(j - 1))).shared as i64;
            if distances[(i - 1, j - 1)] + shared > best {
                best = distances[(i - 1, j - 1)] + shared;
                step = Step::Alignment;
            }

            distances[(i, j)] = best;
            steps[(i, j)] = step;
        }
    }

    let mut aligned = vec![None; m];
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        match steps[(i, j)] {
            Step::Deletion => i -= 1,
            Step::Insertion => j -= 1,
            Step::Alignment => {
                aligned[i - 1] = Some(j - 1);
                i -= 1;
                j -= 1;
            }
        }
    }

    aligned.into_iter().enumerate().collect()
}

/// Reward matrix and seed correspondence of a pair of graphs
pub fn initial_node_correspondences(gold: &Graph, system: &Graph, identities: Option<&(Identities, Identities)>, bilexical: bool) -> (Pairs, Matrix<i64>) {
    let (rewards, candidates) = reward_candidates(gold, system, identities);
    let pairs = if bilexical {
        levenshtein_pairs(gold, system)
    } else {
        greedy_pairs(candidates)
    };

    (pairs, rewards)
}
