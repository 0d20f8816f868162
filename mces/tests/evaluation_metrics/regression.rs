use std::ffi::OsStr;
use std::fs::File;
use std::path::PathBuf;
use algorithm::prelude::*;
use mces::prelude::*;
use serde_json;

#[derive(Deserialize)]
struct TestCase {
    comment: String,
    gold: Graph,
    system: Graph,
    #[serde(default)]
    limits: LimitsConf,
    counts: DimensionCounts,
    exact: bool
}

#[test]
fn run_test_from_data() {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("tests/evaluation_metrics/data");

    let mut n_cases = 0;
    for entry in dir.read_dir().unwrap() {
        if let Ok(entry) = entry {
            if entry.path().extension().unwrap_or(OsStr::new("")) == "json" {
                let input: TestCase = serde_json::from_reader(File::open(entry.path()).unwrap()).unwrap();
                let limits = input.limits.validate().unwrap();
                let matcher: &dyn SeedMatcher = &HillClimbing::new(120);

                let result = schedule(&input.gold, &input.system, &limits, Some(matcher), false).unwrap();
                assert_eq!(result.counts, input.counts, "{:?}: {}", entry.path(), input.comment);
                assert_eq!(result.exact, input.exact, "{:?}: {}", entry.path(), input.comment);
                n_cases += 1;
            }
        }
    }

    assert!(n_cases >= 4);
}
