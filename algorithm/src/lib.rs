extern crate serde;
#[macro_use]
extern crate serde_json;
#[macro_use]
extern crate serde_derive;
extern crate fnv;
#[macro_use(izip)]
extern crate itertools;

pub mod string;
pub mod data_structure;
pub mod prelude;
