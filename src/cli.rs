//! Command line interface.
//!
//! Parses arguments, pulls CIDR blocks from the command line or stdin,
//! runs the merge or split pass and renders the result.

use std::error::Error;
use std::io::Read;

use clap::Parser;
use colored::Colorize;

use crate::models::{Addr, CidrBlock};
use crate::output::{format_blocks, format_blocks_json};
use crate::processing::{merge_blocks, split_range};

/// Merge CIDR blocks into the smallest equivalent set, or split an
/// address range into the CIDR blocks covering it exactly.
#[derive(Parser, Debug)]
#[command(name = "cidr-merge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CIDR blocks to merge; read from stdin when omitted
    #[arg(value_name = "CIDR")]
    pub cidrs: Vec<String>,

    /// Split the inclusive range FIRST..LAST instead of merging
    #[arg(long, num_args = 2, value_names = ["FIRST", "LAST"], conflicts_with = "cidrs")]
    pub range: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

/// Run the parsed command and return the rendered output.
///
/// # Arguments
/// * `cli` - Parsed command line
///
/// # Returns
/// * `Ok(String)` - Rendered result, empty for empty input
pub fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    log::info!("#Start run() format={:?}", cli.format);

    let blocks = match &cli.range {
        Some(range) => {
            let [first, last] = range.as_slice() else {
                return Err("--range takes exactly two addresses".into());
            };
            let first: Addr = first.parse()?;
            let last: Addr = last.parse()?;
            split_range(first, last)?
        }
        None => {
            let tokens = if cli.cidrs.is_empty() {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                input_tokens(&input)
            } else {
                cli.cidrs.clone()
            };
            if tokens.is_empty() {
                log::warn!("#{}# no CIDR blocks to merge", "WARN".on_red());
            }
            let mut parsed = Vec::with_capacity(tokens.len());
            for token in &tokens {
                parsed.push(token.parse::<CidrBlock>()?);
            }
            merge_blocks(&parsed)?
        }
    };

    match cli.format {
        OutputFormat::Plain => Ok(format_blocks(&blocks)),
        OutputFormat::Json => Ok(format_blocks_json(&blocks)?),
    }
}

/// Extract CIDR tokens from free-form text: whitespace separated, with
/// blank lines and `#` comment lines skipped.
pub fn input_tokens(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}
