use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use algorithm::prelude::*;
use serde_json;
use errors::*;

/// Read graphs in MRP format, one JSON object per line
pub fn read_graphs(fpath: &Path) -> Result<Vec<Graph>> {
    let file = File::open(fpath).chain_err(|| format!("cannot open {:?}", fpath))?;
    parse_graphs(BufReader::new(file), &fpath.to_string_lossy())
}

pub fn parse_graphs<R: BufRead>(reader: R, source: &str) -> Result<Vec<Graph>> {
    let mut graphs = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let graph: Graph = serde_json::from_str(&line)
            .chain_err(|| format!("{}:{}: invalid graph", source, i + 1))?;
        graphs.push(graph);
    }

    Ok(graphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    pub fn test_parse_graphs() {
        let text = r#"{"id": "1", "framework": "eds", "tops": [0], "nodes": [{"id": 0, "label": "a"}], "edges": []}

{"id": 2, "framework": "dm", "nodes": [{"id": 0, "label": "b"}, {"id": 1, "label": "c"}], "edges": [{"source": 1, "target": 0, "label": "ARG1"}]}
"#;
        let graphs = parse_graphs(Cursor::new(text), "test").unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[1].id, "2");
        assert_eq!(graphs[1].flavor, Some(0));
        assert_eq!(graphs[1].n_edges, 1);
    }

    #[test]
    pub fn test_invalid_line() {
        let text = "{\"id\": \"1\", \"nodes\": [{\"id\": 0}]}\n{\"id\": \"2\", \"nodes\": [{\"id\": 0}], \"edges\": [{\"source\": 0, \"target\": 3}]}\n";
        let error = parse_graphs(Cursor::new(text), "test").unwrap_err();
        assert_eq!(error.to_string(), "test:2: invalid graph");
        assert!(error.iter().nth(1).unwrap().to_string().contains("invalid target node 3"));
    }
}
