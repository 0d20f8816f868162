// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

extern crate mces;
extern crate algorithm;

#[macro_use]
extern crate error_chain;
extern crate serde_json;
#[macro_use]
extern crate log;
extern crate env_logger;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate prettytable;

use std::path::Path;
use clap::ArgMatches;
use mces::prelude::{evaluate, Settings, Timer};

mod errors;
mod input;
mod report;

use errors::*;

fn main() {
    env_logger::init();

    let app_m = clap_app!(mces =>
        (version: crate_version!())
        (about: "Score system semantic graphs against gold graphs")
        (@arg gold: -g --gold +required +takes_value "gold graphs, one MRP JSON object per line")
        (@arg system: -s --system +required +takes_value "system graphs, one MRP JSON object per line")
        (@arg settings: -c --settings +takes_value "settings file (YAML)")
        (@arg workers: -w --workers +takes_value "number of workers [default: one per core]")
        (@arg rrhc_limit: --rrhc_limit +takes_value "hill-climbing restarts for EDS and AMR [default: 20]")
        (@arg mces_limit: --mces_limit +takes_value "search steps per pair of graphs [default: 500000]")
        (@arg trace: -t --trace "report scores of every pair of graphs")
        (@arg table: --table "print a table instead of JSON")
    ).get_matches();

    if let Err(ref e) = run(&app_m) {
        eprintln!("error: {}", e);
        for e in e.iter().skip(1) {
            eprintln!("caused by: {}", e);
        }

        // The backtrace is not always generated. Try to run this example
        // with `RUST_BACKTRACE=1`.
        if let Some(backtrace) = e.backtrace() {
            eprintln!("{:?}", backtrace);
        }

        ::std::process::exit(1);
    }
}

fn parse_arg<T>(app_m: &ArgMatches, name: &str) -> Result<Option<T>>
    where T: ::std::str::FromStr, T::Err: ::std::error::Error + Send + 'static {

    match app_m.value_of(name) {
        None => Ok(None),
        Some(value) => value.parse::<T>()
            .map(Some)
            .chain_err(|| format!("invalid value of --{}: {}", name, value))
    }
}

fn run(app_m: &ArgMatches) -> Result<()> {
    let mut timer = Timer::start();

    let mut settings = match app_m.value_of("settings") {
        None => Settings::default(),
        Some(fsettings) => Settings::from_file(Path::new(fsettings))?
    };
    if let Some(n_workers) = parse_arg(app_m, "workers")? {
        settings.n_workers = n_workers;
    }
    if let Some(rrhc) = parse_arg(app_m, "rrhc_limit")? {
        settings.limits.rrhc = rrhc;
    }
    if let Some(mces) = parse_arg(app_m, "mces_limit")? {
        settings.limits.mces = mces;
    }
    if app_m.is_present("trace") {
        settings.trace = true;
    }
    debug!("Current settings: {:?}", settings);

    let fgold = app_m.value_of("gold").ok_or("missing gold graphs")?;
    let fsystem = app_m.value_of("system").ok_or("missing system graphs")?;
    let golds = input::read_graphs(Path::new(fgold))?;
    let systems = input::read_graphs(Path::new(fsystem))?;
    info!("read {} gold and {} system graphs", golds.len(), systems.len());
    timer.lap_and_report("finish reading graphs");

    let result = evaluate(&golds, &systems, &settings)?;
    if result.failed > 0 {
        warn!("{} pairs of graphs could not be scored", result.failed);
    }

    if app_m.is_present("table") {
        report::build_table(&result).printstd();
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    timer.lap_and_report("!! Finish the program !!");
    Ok(())
}
