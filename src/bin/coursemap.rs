//! Command-line interface for coursemap
//! This binary loads a catalog JSON file and answers prerequisite pathway
//! queries against it.
//!
//! Usage:
//!   coursemap pathways `<catalog>` `<code>` [--completed A,B] [--excluded X] [--budget N]
//!   coursemap all-pathways `<catalog>` `<code>`
//!   coursemap tree `<catalog>` `<code>`

use clap::{Arg, Command};
use coursemap::catalog::{load_catalog_json, CourseCode, CourseGraph};
use std::collections::BTreeSet;
use std::fs;
use std::process;

fn main() {
    let matches = Command::new("coursemap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve course prerequisite pathways from a catalog")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("pathways")
                .about("Rank the pathways still open under completed courses and a credit budget")
                .arg(catalog_arg())
                .arg(course_arg())
                .arg(
                    Arg::new("completed")
                        .long("completed")
                        .help("Comma-separated course codes already completed")
                        .default_value(""),
                )
                .arg(
                    Arg::new("excluded")
                        .long("excluded")
                        .help("Comma-separated course codes to avoid")
                        .default_value(""),
                )
                .arg(
                    Arg::new("budget")
                        .long("budget")
                        .help("Maximum total credit cost of a pathway")
                        .default_value("20.0"),
                ),
        )
        .subcommand(
            Command::new("all-pathways")
                .about("List every minimal pathway satisfying a course's requirement")
                .arg(catalog_arg())
                .arg(course_arg()),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the display tree of a course's requirement")
                .arg(catalog_arg())
                .arg(course_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("pathways", sub)) => {
            let graph = load_graph(sub.get_one::<String>("catalog").unwrap());
            let code = parse_code(sub.get_one::<String>("course").unwrap());
            let completed = parse_code_list(sub.get_one::<String>("completed").unwrap());
            let excluded = parse_code_list(sub.get_one::<String>("excluded").unwrap());
            let budget = parse_budget(sub.get_one::<String>("budget").unwrap());
            match graph.prerequisite_pathways(&code, &completed, &excluded, budget) {
                Ok(set) => print_pathways(set.as_slice()),
                Err(e) => fail(&e.to_string()),
            }
        }
        Some(("all-pathways", sub)) => {
            let graph = load_graph(sub.get_one::<String>("catalog").unwrap());
            let code = parse_code(sub.get_one::<String>("course").unwrap());
            match graph.all_prerequisite_pathways(&code) {
                Ok(set) => print_pathways(set.as_slice()),
                Err(e) => fail(&e.to_string()),
            }
        }
        Some(("tree", sub)) => {
            let graph = load_graph(sub.get_one::<String>("catalog").unwrap());
            let code = parse_code(sub.get_one::<String>("course").unwrap());
            match graph.course(&code) {
                Ok(course) => println!("{}", course.display_tree().render()),
                Err(e) => fail(&e.to_string()),
            }
        }
        _ => unreachable!(),
    }
}

fn catalog_arg() -> Arg {
    Arg::new("catalog")
        .help("Path to the catalog JSON file")
        .required(true)
        .index(1)
}

fn course_arg() -> Arg {
    Arg::new("course")
        .help("Course code to query")
        .required(true)
        .index(2)
}

/// Load the catalog, draining load warnings to stderr.
fn load_graph(path: &str) -> CourseGraph {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => fail(&format!("cannot read {path}: {e}")),
    };
    match load_catalog_json(&json) {
        Ok((graph, warnings)) => {
            for warning in &warnings {
                eprintln!("warning: {warning}");
            }
            graph
        }
        Err(e) => fail(&format!("cannot parse {path}: {e}")),
    }
}

fn parse_code(raw: &str) -> CourseCode {
    match CourseCode::parse(&raw.to_uppercase()) {
        Ok(code) => code,
        Err(e) => fail(&e.to_string()),
    }
}

fn parse_code_list(raw: &str) -> BTreeSet<CourseCode> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_code)
        .collect()
}

fn parse_budget(raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(budget) if budget >= 0.0 => budget,
        _ => fail(&format!("invalid credit budget {raw:?}")),
    }
}

fn print_pathways(pathways: &[coursemap::catalog::Pathway]) {
    if pathways.is_empty() {
        println!("no pathways");
        return;
    }
    for pathway in pathways {
        println!("{:>4.1}  {}", pathway.cost(), pathway);
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}
