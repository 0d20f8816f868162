// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate serde_yaml;
extern crate algorithm;
extern crate fnv;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate im;
extern crate rand;
extern crate rayon;
extern crate time;
#[macro_use]
extern crate error_chain;

pub mod errors;
pub mod settings;
pub mod evaluation_metrics;
pub mod utils;
pub mod prelude;
