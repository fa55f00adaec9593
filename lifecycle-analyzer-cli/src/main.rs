#![doc = include_str!("../README.md")]

use clap::Parser;
use lifecycle_analyzer_cli::cli::Args;

fn main() {
    lifecycle_analyzer_cli::run(&Args::parse());
}
