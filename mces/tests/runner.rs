extern crate algorithm;
extern crate mces;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;

pub mod evaluation_metrics;
