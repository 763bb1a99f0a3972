//! Example: Compare two XML documents by path
//!
//! Builds both documents, compares them, and prints each path with its
//! status on the left side, followed by paths only on the right.
//!
//! Usage: cargo run --example compare <left.xml> <right.xml>

use std::env;
use std::fs;

use xmlpath_diff::{compare_documents, resolve_status, BuildSettings, Side};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} <left.xml> <right.xml>", args[0]);
        std::process::exit(1);
    }

    let left = fs::read_to_string(&args[1])?;
    let right = fs::read_to_string(&args[2])?;

    let comparison = compare_documents(&left, &right, &BuildSettings::default())?;
    let report = &comparison.report;

    for node in comparison.left.iter() {
        let status = resolve_status(node.path(), Some(report), Side::Left);
        println!("{:<9} {}", status, node.path());
    }
    for path in report.right_only() {
        println!("{:<9} {} (right)", "extra", path);
    }

    let stats = report.stats();
    eprintln!(
        "{} matched, {} different, {} left only, {} right only",
        stats.matched, stats.different, stats.left_only, stats.right_only
    );
    Ok(())
}
