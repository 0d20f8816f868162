pub mod graph_matching;
