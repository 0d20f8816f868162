// Create the Error, ErrorKind, ResultExt, and Result types
error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
        Yaml(::serde_yaml::Error);
        ThreadPool(::rayon::ThreadPoolBuildError);
    }

    errors {
        InvalidConfiguration(msg: String) {
            description("invalid configuration")
            display("invalid configuration: {}", msg)
        }
        MalformedGraph(graph_id: String, msg: String) {
            description("malformed graph")
            display("graph #{}: {}", graph_id, msg)
        }
        PairFailure(framework: String, graph_id: String, msg: String) {
            description("failed to score a pair of graphs")
            display("{} graph #{}: {}", framework, graph_id, msg)
        }
    }
}
