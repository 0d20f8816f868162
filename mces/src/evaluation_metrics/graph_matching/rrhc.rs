use algorithm::prelude::*;
use fnv::FnvHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use super::initialization::Pairs;

/// Produces a full node mapping to seed the exact search with.
pub trait SeedMatcher: Sync {
    /// Mapping for every gold node (by position, in order) together with the number
    /// of triples it matches, trying at most `limit` restarts
    fn find_mapping(&self, gold: &Graph, system: &Graph, limit: usize) -> Option<(Pairs, usize)>;
}

/// Random-restart hill climbing over triples (node instances, node attributes and
/// relations between nodes). The first restart starts from a label-driven mapping,
/// the others from random ones drawn from an RNG seeded per call.
pub struct HillClimbing {
    pub seed: u64
}

impl HillClimbing {
    pub fn new(seed: u64) -> HillClimbing {
        HillClimbing { seed }
    }
}

type Relation<'a> = (usize, usize, Option<&'a str>);

struct Triples<'a> {
    n_nodes: usize,
    instances: Vec<Option<&'a str>>,
    attributes: Vec<FnvHashSet<(&'a str, &'a str)>>,
    relations: Vec<Relation<'a>>
}

impl<'a> Triples<'a> {
    fn new(graph: &'a Graph) -> Triples<'a> {
        let mut instances = Vec::with_capacity(graph.n_nodes);
        let mut attributes = Vec::with_capacity(graph.n_nodes);
        for node in graph.iter_nodes() {
            let label = node.label.as_ref().map(|l| l.as_str());
            instances.push(label);

            let mut node_attributes: FnvHashSet<(&'a str, &'a str)> = node.iter_properties().collect();
            if node.is_top {
                node_attributes.insert(("TOP", label.unwrap_or("")));
            }
            attributes.push(node_attributes);
        }

        // edges with unknown endpoints are reported when the graph is searched
        let relations = graph.iter_edges()
            .filter_map(|e| match (graph.position(e.src), graph.position(e.tgt)) {
                (Some(src), Some(tgt)) => Some((src, tgt, e.label.as_ref().map(|l| l.as_str()))),
                _ => None
            })
            .collect();

        Triples { n_nodes: graph.n_nodes, instances, attributes, relations }
    }
}

struct Climber<'a> {
    n_system: usize,
    node_scores: Matrix<i64>,
    gold_relations: Vec<Relation<'a>>,
    system_relations: FnvHashSet<Relation<'a>>,
    touching: Vec<Vec<usize>>,
    candidates: Vec<Vec<usize>>
}

impl<'a> Climber<'a> {
    fn new(gold: Triples<'a>, system: Triples<'a>) -> Climber<'a> {
        let mut node_scores = Matrix::new(gold.n_nodes, system.n_nodes);
        for i in 0..gold.n_nodes {
            for j in 0..system.n_nodes {
                let mut score = gold.attributes[i].intersection(&system.attributes[j]).count() as i64;
                if gold.instances[i].is_some() && gold.instances[i] == system.instances[j] {
                    score += 1;
                }
                node_scores[(i, j)] = score;
            }
        }

        let mut touching = vec![Vec::new(); gold.n_nodes];
        let mut gold_roles: Vec<FnvHashSet<(bool, Option<&'a str>)>> = vec![Default::default(); gold.n_nodes];
        for (k, &(src, tgt, label)) in gold.relations.iter().enumerate() {
            touching[src].push(k);
            if tgt != src {
                touching[tgt].push(k);
            }
            gold_roles[src].insert((true, label));
            gold_roles[tgt].insert((false, label));
        }

        let mut system_roles: FnvHashSet<(usize, bool, Option<&'a str>)> = Default::default();
        for &(src, tgt, label) in &system.relations {
            system_roles.insert((src, true, label));
            system_roles.insert((tgt, false, label));
        }

        let candidates: Vec<Vec<usize>> = (0..gold.n_nodes)
            .map(|i| (0..system.n_nodes)
                .filter(|&j| node_scores[(i, j)] > 0 || gold_roles[i].iter().any(|&(is_src, label)| system_roles.contains(&(j, is_src, label))))
                .collect())
            .collect();

        Climber {
            n_system: system.n_nodes,
            node_scores,
            gold_relations: gold.relations,
            system_relations: system.relations.into_iter().collect(),
            touching,
            candidates
        }
    }

    fn relation_score(&self, k: usize, mapping: &[i32]) -> i64 {
        let (src, tgt, label) = self.gold_relations[k];
        if mapping[src] < 0 || mapping[tgt] < 0 {
            return 0;
        }
        if self.system_relations.contains(&(mapping[src] as usize, mapping[tgt] as usize, label)) { 1 } else { 0 }
    }

    fn total_score(&self, mapping: &[i32]) -> i64 {
        let nodes: i64 = mapping.iter().enumerate()
            .filter(|&(_, &j)| j >= 0)
            .map(|(i, &j)| self.node_scores[(i, j as usize)])
            .sum();
        let relations: i64 = (0..self.gold_relations.len()).map(|k| self.relation_score(k, mapping)).sum();
        nodes + relations
    }

    /// Score of the triples involving any of the given gold nodes
    fn local_score(&self, mapping: &[i32], nodes: &[usize]) -> i64 {
        let mut relations: Vec<usize> = nodes.iter().flat_map(|&i| self.touching[i].iter().cloned()).collect();
        relations.sort();
        relations.dedup();

        let mut score = relations.into_iter().map(|k| self.relation_score(k, mapping)).sum::<i64>();
        for &i in nodes {
            if mapping[i] >= 0 {
                score += self.node_scores[(i, mapping[i] as usize)];
            }
        }
        score
    }

    fn smart_init(&self) -> Vec<i32> {
        let mut used = vec![false; self.n_system];
        let mut mapping = vec![-1; self.candidates.len()];
        for (i, candidates) in self.candidates.iter().enumerate() {
            let mut best: Option<(i64, usize)> = None;
            for &j in candidates {
                let score = self.node_scores[(i, j)];
                if !used[j] && score > 0 && best.map(|(s, _)| score > s).unwrap_or(true) {
                    best = Some((score, j));
                }
            }

            if let Some((_, j)) = best {
                used[j] = true;
                mapping[i] = j as i32;
            }
        }
        mapping
    }

    fn random_init(&self, rng: &mut StdRng) -> Vec<i32> {
        let mut used = vec![false; self.n_system];
        let mut mapping = vec![-1; self.candidates.len()];
        for (i, candidates) in self.candidates.iter().enumerate() {
            let free = candidates.iter().filter(|&&j| !used[j]).cloned().collect::<Vec<_>>();
            if !free.is_empty() {
                let j = free[rng.gen_range(0..free.len())];
                used[j] = true;
                mapping[i] = j as i32;
            }
        }
        mapping
    }

    /// Apply the best improving move (reassigning one gold node to a free candidate
    /// or to nothing, or swapping the images of two gold nodes) until none is left
    fn climb(&self, mapping: &mut Vec<i32>) -> i64 {
        let mut used = vec![false; self.n_system];
        for &j in mapping.iter() {
            if j >= 0 {
                used[j as usize] = true;
            }
        }

        let mut score = self.total_score(mapping);
        loop {
            let mut best_gain = 0;
            let mut best_move: Option<(usize, usize, i32, i32)> = None;

            for i in 0..mapping.len() {
                let current = mapping[i];
                let before = self.local_score(mapping, &[i]);
                let options = self.candidates[i].iter().filter(|&&j| !used[j]).map(|&j| j as i32)
                    .chain(if current >= 0 { Some(-1) } else { None });
                for j in options.collect::<Vec<_>>() {
                    mapping[i] = j;
                    let gain = self.local_score(mapping, &[i]) - before;
                    mapping[i] = current;
                    if gain > best_gain {
                        best_gain = gain;
                        best_move = Some((i, i, current, j));
                    }
                }
            }

            for i1 in 0..mapping.len() {
                for i2 in (i1 + 1)..mapping.len() {
                    let (j1, j2) = (mapping[i1], mapping[i2]);
                    if j1 == j2 {
                        continue;
                    }
                    let before = self.local_score(mapping, &[i1, i2]);
                    mapping[i1] = j2;
                    mapping[i2] = j1;
                    let gain = self.local_score(mapping, &[i1, i2]) - before;
                    mapping[i1] = j1;
                    mapping[i2] = j2;
                    if gain > best_gain {
                        best_gain = gain;
                        best_move = Some((i1, i2, j2, j1));
                    }
                }
            }

            match best_move {
                None => return score,
                Some((i1, i2, j1, j2)) => {
                    if i1 == i2 {
                        if mapping[i1] >= 0 {
                            used[mapping[i1] as usize] = false;
                        }
                        if j2 >= 0 {
                            used[j2 as usize] = true;
                        }
                        mapping[i1] = j2;
                    } else {
                        mapping[i1] = j1;
                        mapping[i2] = j2;
                    }
                    score += best_gain;
                }
            }
        }
    }
}

impl SeedMatcher for HillClimbing {
    fn find_mapping(&self, gold: &Graph, system: &Graph, limit: usize) -> Option<(Pairs, usize)> {
        if limit == 0 {
            return None;
        }

        let climber = Climber::new(Triples::new(gold), Triples::new(system));
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<(i64, Vec<i32>)> = None;
        for restart in 0..limit {
            let mut mapping = if restart == 0 { climber.smart_init() } else { climber.random_init(&mut rng) };
            let score = climber.climb(&mut mapping);
            trace!("graph #{}: restart {} matches {} triples", gold.id, restart, score);
            if best.as_ref().map(|&(s, _)| score > s).unwrap_or(true) {
                best = Some((score, mapping));
            }
        }

        best.map(|(score, mapping)| {
            let pairs = mapping.into_iter().enumerate()
                .map(|(i, j)| (i, if j < 0 { None } else { Some(j as usize) }))
                .collect();
            (pairs, score as usize)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(labels: &[&str], edges: &[(usize, usize, &str)]) -> Graph {
        let mut g = Graph::new("1", None, Some("amr"));
        for (i, label) in labels.iter().enumerate() {
            g.add_node(Node::with_label(i, label));
        }
        g.get_node_mut(0).is_top = true;
        for &(src, tgt, label) in edges {
            g.add_edge(Edge::with_label(src, tgt, label));
        }
        g
    }

    #[test]
    pub fn test_identical_graphs() {
        let gold = graph(&["want-01", "boy", "go-02"], &[(0, 1, "ARG0"), (0, 2, "ARG1"), (2, 1, "ARG0")]);
        let system = graph(&["want-01", "go-02", "boy"], &[(0, 2, "ARG0"), (0, 1, "ARG1"), (1, 2, "ARG0")]);

        let (pairs, n) = HillClimbing::new(120).find_mapping(&gold, &system, 5).unwrap();
        assert_eq!(pairs, vec![(0, Some(0)), (1, Some(2)), (2, Some(1))]);
        // three instances, the top and three relations
        assert_eq!(n, 7);
    }

    #[test]
    pub fn test_same_seed_same_mapping() {
        let gold = graph(&["a", "a", "b", "a"], &[(0, 1, "x"), (1, 2, "y"), (3, 2, "x")]);
        let system = graph(&["a", "b", "a", "a"], &[(2, 1, "y"), (0, 2, "x"), (3, 1, "x")]);

        let matcher = HillClimbing::new(7);
        let first = matcher.find_mapping(&gold, &system, 10);
        assert_eq!(first, matcher.find_mapping(&gold, &system, 10));
        assert!(first.unwrap().1 >= 4);
        assert_eq!(matcher.find_mapping(&gold, &system, 0), None);
    }
}
