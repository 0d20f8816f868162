// Create the Error, ErrorKind, ResultExt, and Result types
error_chain! {
    links {
        Mces(::mces::errors::Error, ::mces::errors::ErrorKind);
    }

    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }
}
