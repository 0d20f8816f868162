use std::collections::HashSet;
use algorithm::prelude::*;
use mces::prelude::*;
use serde_json;
use serde_json::Value;
use evaluation_metrics::helper::*;

fn eds_sentence() -> Graph {
    let mut g = Graph::new("20001001", None, Some("eds"));
    g.input = Some("The dog barked loudly.".to_owned());
    for &(id, label, from, to) in [(0, "_bark_v_1", 8, 14), (1, "_dog_n_1", 4, 7), (2, "_the_q", 0, 3), (3, "_loud_a_1", 15, 22)].iter() {
        let mut node = Node::with_label(id, label);
        node.add_anchor(Anchor::new(from, to));
        g.add_node(node);
    }
    g.get_node_mut(0).is_top = true;
    g.get_node_mut(0).set_property("tense", "past");
    g.get_node_mut(1).set_property("num", "sg");
    g.add_edge(Edge::with_label(0, 1, "ARG1"));
    g.add_edge(Edge::with_label(2, 1, "BV"));
    let mut edge = Edge::with_label(3, 0, "ARG1");
    edge.set_attribute("remote", "true");
    g.add_edge(edge);
    g
}

fn scenario(system_edges: &[(usize, usize, &str)]) -> (Graph, Graph) {
    let gold = quick_graph("1", "eds", &["bark", "dog", "loud"], &[(0, 1, "ARG1"), (0, 2, "ARG2")]);
    let system = quick_graph("1", "eds", &["bark", "dog", "loud", "noise"], system_edges);
    (gold, system)
}

fn run(gold: &Graph, system: &Graph, limits: Limits) -> PairResult {
    let matcher: &dyn SeedMatcher = &HillClimbing::new(120);
    schedule(gold, system, &limits, Some(matcher), true).unwrap()
}

fn assert_injective(result: &PairResult) {
    let pairs = result.details.as_ref().unwrap()["correspondences"].as_array().unwrap().clone();
    let golds: HashSet<u64> = pairs.iter().map(|p| p[0].as_u64().unwrap()).collect();
    let systems: HashSet<u64> = pairs.iter().map(|p| p[1].as_u64().unwrap()).collect();
    assert_eq!(golds.len(), pairs.len());
    assert_eq!(systems.len(), pairs.len());
}

#[test]
pub fn test_identity_round_trip() {
    let gold = eds_sentence();
    let system = shuffled_copy(&gold, 100);

    let result = evaluate(&[gold], &[system], &Settings::default()).unwrap();
    assert_eq!((result.n, result.exact, result.failed), (1, 1, 0));
    for &dimension in Dimension::ALL.iter() {
        let score = result.get(dimension);
        assert!(score.gold_count > 0, "{:?} should not be empty", dimension);
        assert_eq!((score.precision, score.recall, score.f1), (1.0, 1.0, 1.0), "{:?}", dimension);
    }
    assert_eq!((result.all.gold_count, result.all.matched_count), (15, 15));
}

#[test]
pub fn test_empty_system() {
    let gold = eds_sentence();

    let result = evaluate(&[gold], &[], &Settings::default()).unwrap();
    assert_eq!((result.n, result.null), (1, 1));
    for &dimension in Dimension::ALL.iter() {
        let score = result.get(dimension);
        assert_eq!((score.system_count, score.matched_count), (0, 0));
        assert_eq!((score.precision, score.recall, score.f1), (0.0, 0.0, 0.0));
    }
    assert_eq!(result.all.gold_count, 15);
}

#[test]
pub fn test_scenario_missing_edge() {
    let (gold, system) = scenario(&[]);
    let result = run(&gold, &system, Limits::default());

    assert_eq!(result.counts.tops, Counts::new(1, 1, 1));
    assert_eq!(result.counts.labels, Counts::new(3, 4, 3));
    assert_eq!(result.counts.edges, Counts::new(2, 0, 0));
    assert_eq!(result.counts.all(), Counts::new(6, 5, 4));
    assert!(result.exact);

    let details = result.details.as_ref().unwrap();
    assert_eq!(details["errors"]["labels"]["surplus"], json!([[3, "noise"]]));
    assert!(details["errors"]["labels"].get("missing").is_none());
    assert_eq!(details["correspondences"], json!([[0, 0], [1, 1], [2, 2]]));

    let score = result.counts.all().finalize();
    assert_eq!(score.precision, 0.8);
    assert!((score.recall - 4.0 / 6.0).abs() < 1e-9);
}

#[test]
pub fn test_scenario_one_edge_kept() {
    let (gold, system) = scenario(&[(0, 1, "ARG1")]);
    let result = run(&gold, &system, Limits::default());

    assert_eq!(result.counts.labels, Counts::new(3, 4, 3));
    assert_eq!(result.counts.edges, Counts::new(2, 1, 1));
    assert_eq!(result.counts.all(), Counts::new(6, 6, 5));
    assert_injective(&result);
}

#[test]
pub fn test_budget_monotonicity() {
    let gold = quick_graph("7", "eds", &["x", "x", "x", "y", "x", "z"],
        &[(0, 1, "a"), (1, 2, "a"), (2, 3, "b"), (3, 4, "a"), (4, 0, "b"), (5, 1, "a")]);
    let system = quick_graph("7", "eds", &["x", "y", "x", "x", "x", "x"],
        &[(0, 2, "a"), (2, 1, "b"), (1, 3, "a"), (3, 4, "a"), (5, 0, "b"), (4, 5, "a")]);

    let mut previous = 0;
    for &limit in [1, 2, 3, 5, 10, 50, 200, 1000, 500000].iter() {
        let result = run(&gold, &system, Limits { rrhc: 0, mces: limit });
        assert!(result.matches >= previous, "{} matches with {} steps, {} before", result.matches, limit, previous);
        assert_injective(&result);
        previous = result.matches;
    }

    let result = run(&gold, &system, Limits { rrhc: 0, mces: 500000 });
    assert!(result.exact);
    assert_eq!(run(&gold, &system, Limits { rrhc: 0, mces: 0 }).exact, false);
}

#[test]
pub fn test_bilexical_identity() {
    let gold = quick_graph("3", "dm", &["a", "b", "a", "b", "a"],
        &[(1, 0, "ARG1"), (1, 2, "ARG2"), (3, 2, "ARG1"), (3, 4, "ARG2")]);
    let system = gold.clone();

    let result = run(&gold, &system, Limits::default());
    assert_eq!(result.details.unwrap()["correspondences"], json!([[0, 0], [1, 1], [2, 2], [3, 3], [4, 4]]));
    assert_eq!(result.counts.all(), Counts::new(10, 10, 10));
}

#[test]
pub fn test_parallel_determinism() {
    let mut golds = vec![eds_sentence()];
    let mut systems = vec![shuffled_copy(&eds_sentence(), 10)];
    for i in 0..6 {
        let id = format!("{}", i);
        let gold = quick_graph(&id, if i % 2 == 0 { "eds" } else { "dm" }, &["x", "y", "x", "z"],
            &[(0, 1, "a"), (1, 2, "b"), (3, 2, "a")]);
        let mut system = quick_graph(&id, if i % 2 == 0 { "eds" } else { "dm" }, &["x", "x", "y", "z"][..(i % 4 + 1)],
            &[]);
        if i % 4 == 3 {
            system.add_edge(Edge::with_label(0, 2, "a"));
            system.add_edge(Edge::with_label(3, 1, "a"));
        }
        golds.push(gold);
        systems.push(system);
    }

    let mut settings = Settings::default();
    settings.trace = true;
    settings.n_workers = 1;
    let sequential = evaluate(&golds, &systems, &settings).unwrap();
    settings.n_workers = 4;
    let parallel = evaluate(&golds, &systems, &settings).unwrap();

    assert_eq!(sequential.n, 7);
    assert_eq!(serde_json::to_value(&sequential).unwrap(), serde_json::to_value(&parallel).unwrap());
}

#[test]
pub fn test_negative_budget() {
    let mut settings = Settings::default();
    settings.limits.mces = -5;
    match evaluate(&[eds_sentence()], &[], &settings) {
        Err(Error(ErrorKind::InvalidConfiguration(msg), _)) => assert!(msg.contains("-5")),
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("a negative budget must be rejected")
    }
}

#[test]
pub fn test_trace_output() {
    let (gold, system) = scenario(&[]);
    let mut settings = Settings::default();
    settings.trace = true;
    let result = evaluate(&[gold], &[system], &settings).unwrap();

    let value: Value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["labels"]["matched_count"], json!(3));
    assert_eq!(value["scores"]["eds"]["1"]["edges"], json!({"gold_count": 2, "system_count": 0, "matched_count": 0}));
    assert_eq!(value["scores"]["eds"]["1"]["exact"], json!(true));

    settings.trace = false;
    let (gold, system) = scenario(&[]);
    let value = serde_json::to_value(&evaluate(&[gold], &[system], &settings).unwrap()).unwrap();
    assert!(value.get("scores").is_none());
}

#[test]
pub fn test_trace_skips_empty_system() {
    let mut settings = Settings::default();
    settings.trace = true;
    let result = evaluate(&[eds_sentence()], &[], &settings).unwrap();

    assert_eq!((result.n, result.null), (1, 1));
    let value: Value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["scores"], json!({}));
}
