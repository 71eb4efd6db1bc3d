use std::io::{self, Read};

use anyhow::Result;
use regex_tree::{parse, score};

use crate::cli::Config;

pub fn run(cfg: Config) -> Result<i32> {
    let mut patterns = cfg.patterns;
    if patterns.is_empty() {
        // no arguments: read patterns from stdin, one per line
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        patterns = buffer
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
    }

    let mut failed = false;
    for pattern in &patterns {
        match parse(pattern) {
            Ok(regex) => {
                if !cfg.quiet {
                    print!("{}", regex.to_tree_text());
                }
                println!("pattern: {}", regex.to_pattern_text());
                println!("score: {}", score(&regex));
            }
            Err(err) => {
                eprintln!("{pattern}: {err}");
                failed = true;
            }
        }
    }

    Ok(if failed { 1 } else { 0 })
}
