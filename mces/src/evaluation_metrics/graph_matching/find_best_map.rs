use algorithm::prelude::*;
use fnv::FnvHashSet;
use im::vector::Vector as IVector;
use errors::*;
use super::identities::Identities;
use super::initialization::Pairs;
use super::internal_structure::*;

/// Partial correspondence in the order gold nodes were decided: (gold position,
/// system position or `-1`)
pub type Correspondence = IVector<(usize, i32)>;

pub struct FindBestMapArgs<'a> {
    pub gold: &'a Graph,
    pub system: &'a Graph,
    /// seed correspondence, also fixing the order in which gold nodes are decided
    pub pairs: &'a Pairs,
    pub rewards: &'a Matrix<i64>,
    pub identities: Option<&'a (Identities, Identities)>,
    pub bilexical: bool,
    pub limit: usize
}

/// Number of candidate mappings tried so far, against a budget
#[derive(Debug, Clone, Copy)]
pub struct StepCounter {
    pub steps: usize,
    pub limit: usize
}

impl StepCounter {
    pub fn new(limit: usize) -> StepCounter {
        StepCounter { steps: 0, limit }
    }

    #[inline]
    pub fn tick(&mut self) {
        self.steps += 1;
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.steps > self.limit
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// best complete correspondence found, empty if none was completed
    pub correspondence: Pairs,
    /// (gold edge, system edge) options left by it; each gold edge keeps at most one
    /// once every gold node is decided
    pub matches: usize,
    pub steps: usize,
    /// whether the search ran to the end within its budget
    pub exact: bool
}

/// Ordered choices of system nodes for one gold node. Each choice comes with the
/// system nodes left for the gold nodes that follow; the last choice leaves the
/// gold node unmapped and keeps all of them.
struct Splits {
    candidates: Vec<i32>,
    cursor: usize
}

impl Splits {
    fn new(i: usize, mut xs: Vec<i32>, seed: i32, args: &FindBestMapArgs) -> Splits {
        let n_col = args.rewards.shape().1;
        let reward = |x: i32| -> i64 {
            let j = if x < 0 { n_col - 1 } else { x as usize };
            args.rewards[(i, j)]
        };

        // best first
        if args.bilexical {
            let i = i as i64;
            let key = |x: i32| (-(x as i64 - i).abs(), reward(x), -x);
            xs.sort_by(|&a, &b| key(b).cmp(&key(a)));
        } else {
            xs.sort_by(|&a, &b| (reward(b), -b).cmp(&(reward(a), -a)));
        }

        // the seed choice goes first; a seed of "unmapped" is prepended even when
        // `-1` is already among the choices
        if seed < 0 {
            xs.insert(0, seed);
        } else if let Some(k) = xs.iter().position(|&x| x == seed) {
            xs.remove(k);
            xs.insert(0, seed);
        }

        Splits { candidates: xs, cursor: 0 }
    }

    fn next(&mut self) -> Option<(i32, Vec<i32>)> {
        let k = self.cursor;
        if k > self.candidates.len() {
            return None;
        }

        self.cursor += 1;
        if k == self.candidates.len() {
            return Some((-1, self.candidates.clone()));
        }

        let mut untried = self.candidates.clone();
        let x = untried.remove(k);
        Some((x, untried))
    }
}

struct Frame {
    cv: Correspondence,
    ce: EdgeCandidates,
    depth: usize,
    splits: Splits
}

/// Mapping gold node `i` to system node `j` conflicts with the partial
/// correspondence when one is a leaf and the other is not, or when a node already
/// mapped below `i` is not mapped below `j`.
fn domination_conflict(identities: &(Identities, Identities), cv: &Correspondence, i: usize, j: i32) -> bool {
    if j < 0 {
        return false;
    }

    let dominated1: &FnvHashSet<usize> = &identities.0.dominated[i];
    let dominated2: &FnvHashSet<usize> = &identities.1.dominated[j as usize];
    if dominated1.is_empty() != dominated2.is_empty() {
        return true;
    }

    cv.iter().any(|&(i2, j2)| j2 >= 0 && dominated1.contains(&i2) && !dominated2.contains(&(j2 as usize)))
}

/// Enumerate complete correspondences, each one matching strictly more gold edges
/// than the previous, until the search space or the step budget is exhausted.
///
/// `func` receives every improved correspondence together with the edge candidates
/// left under it and the number of steps taken so far.
pub fn iter_correspondences<'a, F>(args: &FindBestMapArgs<'a>, table: &EdgeTable<'a>, ce: EdgeCandidates, counter: &mut StepCounter, mut func: F)
    where F: FnMut(&Correspondence, &EdgeCandidates, usize) -> () {

    let order: Vec<usize> = args.pairs.iter().map(|p| p.0).collect();
    if order.is_empty() {
        return;
    }

    let mut seeds = vec![-1; args.gold.n_nodes];
    for &(i, j) in args.pairs {
        seeds[i] = j.map(|j| j as i32).unwrap_or(-1);
    }

    let xs = (0..args.system.n_nodes as i32).collect::<Vec<_>>();
    let mut call_stack = vec![Frame {
        cv: IVector::new(),
        ce,
        depth: 0,
        splits: Splits::new(order[0], xs, seeds[order[0]], args)
    }];
    let mut n_matched = 0;

    while !call_stack.is_empty() && !counter.is_exhausted() {
        let next = match call_stack.last_mut() {
            None => break,
            Some(frame) => frame.splits.next()
        };
        let (j, untried) = match next {
            None => {
                call_stack.pop();
                continue;
            },
            Some(split) => split
        };

        let frame = match call_stack.last() {
            None => break,
            Some(frame) => frame
        };
        let i = order[frame.depth];

        if !frame.cv.is_empty() {
            if args.bilexical {
                // keep the order of the nodes aligned so far
                let max_j = frame.cv.iter().filter(|&&(i2, _)| i2 < i).map(|&(_, j2)| j2).max().unwrap_or(-1);
                if 0 <= j && j < max_j + 1 {
                    continue;
                }
            } else if let Some(identities) = args.identities {
                if domination_conflict(identities, &frame.cv, i, j) {
                    continue;
                }
            }
        }

        counter.tick();
        trace!("step {}: gold node {} -> system node {}", counter.steps, i, j);

        let mut cv = frame.cv.clone();
        cv.push_back((i, j));
        let ce = frame.ce.narrow(table, i, j);
        let potential = ce.potential();
        if potential > n_matched {
            let depth = frame.depth + 1;
            if depth < order.len() {
                let splits = Splits::new(order[depth], untried, seeds[order[depth]], args);
                call_stack.push(Frame { cv, ce, depth, splits });
            } else {
                func(&cv, &ce, counter.steps);
                n_matched = potential;
            }
        }
    }
}

/// Search for the correspondence of a pair of graphs matching the most gold edges
pub fn find_best_map(args: &FindBestMapArgs) -> Result<SearchOutcome> {
    let mut index = DecorationIndex::new();
    let gold = InternalGraph::new(args.gold, &mut index)?;
    let system = InternalGraph::new(args.system, &mut index)?;
    let table = EdgeTable::new(&gold);
    let ce = EdgeCandidates::new(&table, &system);

    let mut counter = StepCounter::new(args.limit);
    let mut best_cv: Option<Correspondence> = None;
    let mut best_matches = 0;

    iter_correspondences(args, &table, ce, &mut counter, |cv, ce, steps| {
        let n = ce.n_options();
        if n > best_matches {
            debug!("graph #{}: [{}] solution with {} matches", args.gold.id, steps, n);
            best_matches = n;
            best_cv = Some(cv.clone());
        }
    });

    Ok(SearchOutcome {
        correspondence: best_cv.map(|cv| cv.iter().map(|&(i, j)| (i, if j < 0 { None } else { Some(j as usize) })).collect()).unwrap_or_default(),
        matches: best_matches,
        steps: counter.steps,
        exact: !counter.is_exhausted()
    })
}
