use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use algorithm::prelude::*;
use fnv::{FnvHashMap, FnvHashSet};
use itertools::Itertools;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde_json::Value;
use errors::*;
use settings::{Limits, Settings};
use utils::Timer;
use super::find_best_map::*;
use super::identities::Identities;
use super::initialization::*;
use super::rrhc::{HillClimbing, SeedMatcher};
use super::scoring::*;

/// Outcome of comparing one gold graph with its system counterpart
#[derive(Debug, Clone)]
pub struct PairResult {
    pub id: String,
    pub framework: String,
    pub counts: DimensionCounts,
    /// gold edges (decorations included) matched by the best correspondence
    pub matches: usize,
    pub steps: usize,
    pub exact: bool,
    /// the system graph has no nodes
    pub null: bool,
    /// per-pair breakdown when tracing, absent for an empty system graph
    pub details: Option<Value>
}

#[derive(Debug, Clone)]
pub enum PairOutcome {
    Scored(PairResult),
    Failed { id: String, framework: String, null: bool, error: String }
}

fn framework_name(graph: &Graph) -> String {
    graph.framework.clone().unwrap_or_else(|| "none".to_owned())
}

/// Take the hill-climbing mapping over the local seed when it decides the same gold
/// nodes but differs in some pair.
fn reconcile(pairs: Pairs, mapping: Pairs) -> Pairs {
    let covered = |xs: &Pairs| xs.iter().map(|p| p.0).collect::<FnvHashSet<_>>();
    if covered(&pairs) != covered(&mapping) {
        debug!("hill climbing covers other gold nodes than the seed, ignored");
        return pairs;
    }

    let local: FnvHashSet<(usize, Option<usize>)> = pairs.iter().cloned().collect();
    if local == mapping.iter().cloned().collect() {
        pairs
    } else {
        mapping
    }
}

/// Compare one pair of graphs: seed, optionally refine the seed by hill climbing,
/// search for the best correspondence within `limits.mces` steps and score it.
pub fn schedule(gold: &Graph, system: &Graph, limits: &Limits, matcher: Option<&dyn SeedMatcher>, trace: bool) -> Result<PairResult> {
    let mut timer = Timer::start();
    let bilexical = gold.is_bilexical();
    let identities = Identities::for_pair(gold, system);
    let (mut pairs, rewards) = initial_node_correspondences(gold, system, identities.as_ref(), bilexical);
    debug!("graph #{} ({:?}; {:?}): {} gold nodes, {} system nodes, {} gold edges",
        gold.id, gold.flavor, gold.framework, gold.n_nodes, system.n_nodes, gold.n_edges);
    trace!("rewards and pairs:\n{}\n{:?}", rewards, pairs);

    if (gold.is_framework("eds") || gold.is_framework("amr")) && limits.rrhc > 0 {
        if let Some(matcher) = matcher {
            if let Some((mapping, smatches)) = matcher.find_mapping(gold, system, limits.rrhc) {
                let all = score(gold, system, &mapping, false)?.counts.all().matched_count;
                if smatches > all {
                    debug!("graph #{}: hill climbing claims {} matches, scoring finds {}", gold.id, smatches, all);
                }
                pairs = reconcile(pairs, mapping);
            }
        }
    }

    let mut outcome = SearchOutcome { correspondence: Vec::new(), matches: 0, steps: 0, exact: true };
    if !gold.is_empty() && limits.mces > 0 {
        outcome = find_best_map(&FindBestMapArgs {
            gold,
            system,
            pairs: &pairs,
            rewards: &rewards,
            identities: identities.as_ref(),
            bilexical,
            limit: limits.mces
        })?;
    }

    let correspondence = if outcome.correspondence.is_empty() { &pairs } else { &outcome.correspondence };
    let graph_score = score(gold, system, correspondence, trace)?;
    let exact = !(limits.mces == 0 || outcome.steps > limits.mces);

    if log_enabled!(::log::Level::Debug) {
        let (_, elapsed) = timer.lap();
        debug!("graph #{}: {} matches in {} steps ({:.3}s){}",
            gold.id, outcome.matches, outcome.steps, elapsed, if exact { "" } else { ", inexact" });
    }

    // pairs against an empty system graph only count in the totals
    let details = if trace && !system.is_empty() {
        let mut details = json!(graph_score.counts);
        details["exact"] = json!(exact);
        details["steps"] = json!(outcome.steps);
        details["matches"] = json!(outcome.matches);
        details["correspondences"] = json!(graph_score.correspondences);
        if !graph_score.discrepancies.is_empty() {
            details["errors"] = json!(graph_score.discrepancies);
        }
        Some(details)
    } else {
        None
    };

    Ok(PairResult {
        id: gold.id.clone(),
        framework: framework_name(gold),
        counts: graph_score.counts,
        matches: outcome.matches,
        steps: outcome.steps,
        exact,
        null: system.is_empty(),
        details
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}

/// `schedule` with every failure, panics included, turned into a failed outcome
pub fn run_pair(gold: &Graph, system: &Graph, limits: &Limits, matcher: Option<&dyn SeedMatcher>, trace: bool) -> PairOutcome {
    let failed = |message: String| {
        let error = Error::from(ErrorKind::PairFailure(framework_name(gold), gold.id.clone(), message));
        error!("{}", error);
        PairOutcome::Failed { id: gold.id.clone(), framework: framework_name(gold), null: system.is_empty(), error: error.to_string() }
    };

    match panic::catch_unwind(AssertUnwindSafe(|| schedule(gold, system, limits, matcher, trace))) {
        Ok(Ok(result)) => PairOutcome::Scored(result),
        Ok(Err(e)) => failed(e.iter().map(|e| e.to_string()).join(": ")),
        Err(payload) => failed(panic_message(payload))
    }
}

/// Pair gold and system graphs by (framework, id), in gold order. A gold graph
/// without system counterpart is paired with `None`.
pub fn intersect<'a>(golds: &'a [Graph], systems: &'a [Graph]) -> Vec<(&'a Graph, Option<&'a Graph>)> {
    let mut index: FnvHashMap<(Option<&str>, &str), &'a Graph> = Default::default();
    for graph in systems {
        let key = (graph.framework.as_ref().map(|f| f.as_str()), graph.id.as_str());
        if index.insert(key, graph).is_some() {
            warn!("duplicate {} system graph #{}, keeping the last one", framework_name(graph), graph.id);
        }
    }

    let mut seen: FnvHashSet<(Option<&str>, &str)> = Default::default();
    let mut pairs = Vec::with_capacity(golds.len());
    for gold in golds {
        let key = (gold.framework.as_ref().map(|f| f.as_str()), gold.id.as_str());
        if !seen.insert(key) {
            warn!("duplicate {} gold graph #{}", framework_name(gold), gold.id);
        }
        let system = index.get(&key).cloned();
        if system.is_none() {
            warn!("no system graph for {} graph #{}, scoring against an empty graph", framework_name(gold), gold.id);
        }
        pairs.push((gold, system));
    }

    for graph in systems {
        let key = (graph.framework.as_ref().map(|f| f.as_str()), graph.id.as_str());
        if !seen.contains(&key) {
            warn!("ignoring {} system graph #{} without gold counterpart", framework_name(graph), graph.id);
        }
    }

    pairs
}

/// Totals over all pairs of an evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// pairs scored
    pub n: usize,
    /// pairs whose system graph is empty
    pub null: usize,
    /// pairs whose search completed within budget
    pub exact: usize,
    pub failed: usize,
    pub matches: usize,
    pub steps: usize,
    pub tops: Score,
    pub labels: Score,
    pub properties: Score,
    pub anchors: Score,
    pub edges: Score,
    pub attributes: Score,
    pub all: Score,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<BTreeMap<String, BTreeMap<String, Value>>>
}

impl EvaluationResult {
    /// Sum per-pair outcomes; the order of `outcomes` does not matter
    pub fn aggregate(outcomes: &[PairOutcome], trace: bool) -> EvaluationResult {
        let mut totals = DimensionCounts::default();
        let (mut n, mut null, mut exact, mut failed, mut matches, mut steps) = (0, 0, 0, 0, 0, 0);
        let mut scores: BTreeMap<String, BTreeMap<String, Value>> = BTreeMap::new();

        for outcome in outcomes {
            match outcome {
                PairOutcome::Scored(result) => {
                    n += 1;
                    if result.null {
                        null += 1;
                    }
                    if result.exact {
                        exact += 1;
                    }
                    matches += result.matches;
                    steps += result.steps;
                    totals.update(&result.counts);

                    if let Some(ref details) = result.details {
                        let graphs = scores.entry(result.framework.clone()).or_insert_with(BTreeMap::new);
                        if graphs.insert(result.id.clone(), details.clone()).is_some() {
                            warn!("duplicate {} graph identifier: {}", result.framework, result.id);
                        }
                    }
                },
                PairOutcome::Failed { id, framework, null: is_null, error } => {
                    failed += 1;
                    if *is_null {
                        null += 1;
                    }
                    if trace {
                        scores.entry(framework.clone()).or_insert_with(BTreeMap::new)
                            .insert(id.clone(), json!({ "error": error }));
                    }
                }
            }
        }

        EvaluationResult {
            n,
            null,
            exact,
            failed,
            matches,
            steps,
            tops: totals.tops.finalize(),
            labels: totals.labels.finalize(),
            properties: totals.properties.finalize(),
            anchors: totals.anchors.finalize(),
            edges: totals.edges.finalize(),
            attributes: totals.attributes.finalize(),
            all: totals.all().finalize(),
            scores: if trace { Some(scores) } else { None }
        }
    }

    pub fn get(&self, dimension: Dimension) -> &Score {
        match dimension {
            Dimension::Tops => &self.tops,
            Dimension::Labels => &self.labels,
            Dimension::Properties => &self.properties,
            Dimension::Anchors => &self.anchors,
            Dimension::Edges => &self.edges,
            Dimension::Attributes => &self.attributes
        }
    }
}

/// Score every gold graph against its system counterpart on a pool of
/// `settings.n_workers` threads (one per core when 0)
pub fn evaluate(golds: &[Graph], systems: &[Graph], settings: &Settings) -> Result<EvaluationResult> {
    let limits = settings.limits()?;
    info!("RRHC limit: {}; MCES limit: {}", limits.rrhc, limits.mces);

    let pairs = intersect(golds, systems);
    let hill_climbing = HillClimbing::new(settings.manual_seed);
    let matcher: Option<&dyn SeedMatcher> = Some(&hill_climbing);
    let pool = ThreadPoolBuilder::new().num_threads(settings.n_workers).build()?;
    info!("scoring {} pairs of graphs on {} workers", pairs.len(), pool.current_num_threads());

    let mut timer = Timer::start();
    let outcomes: Vec<PairOutcome> = pool.install(|| {
        pairs.par_iter()
            .map(|&(gold, system)| match system {
                Some(system) => run_pair(gold, system, &limits, matcher, settings.trace),
                None => run_pair(gold, &Graph::empty_like(gold), &limits, matcher, settings.trace)
            })
            .collect()
    });
    timer.lap_and_report("finish scoring");

    Ok(EvaluationResult::aggregate(&outcomes, settings.trace))
}
