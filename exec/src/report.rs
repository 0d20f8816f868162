use prettytable::Table;
use mces::prelude::{Dimension, EvaluationResult, Score};

fn score_row(name: &str, score: &Score) -> ::prettytable::Row {
    row![name, score.gold_count, score.system_count, score.matched_count,
         format!("{:.4}", score.precision), format!("{:.4}", score.recall), format!("{:.4}", score.f1)]
}

pub fn build_table(result: &EvaluationResult) -> Table {
    let mut table = Table::new();
    table.add_row(row!["dimension", "gold", "system", "matched", "precision", "recall", "f1"]);
    for &dimension in Dimension::ALL.iter() {
        table.add_row(score_row(dimension.name(), result.get(dimension)));
    }
    table.add_row(score_row("all", &result.all));
    table.add_row(row!["pairs", result.n, "exact", result.exact, "null", result.null, format!("failed: {}", result.failed)]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use algorithm::prelude::*;
    use mces::prelude::{evaluate, Settings};

    #[test]
    pub fn test_build_table() {
        let mut gold = Graph::new("1", None, Some("eds"));
        gold.add_node(Node::with_label(0, "a"));
        let result = evaluate(&[gold.clone()], &[gold], &Settings::default()).unwrap();

        let text = build_table(&result).to_string();
        assert!(text.contains("labels"));
        assert!(text.contains("1.0000"));
        assert_eq!(text.matches("attributes").count(), 1);
    }
}
