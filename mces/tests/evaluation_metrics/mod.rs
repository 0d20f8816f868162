pub mod helper;
pub mod graph_matching;
pub mod regression;
