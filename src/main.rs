use std::env;
use std::process;

mod app;
mod cli;

// Usage: regex-tree [-q] [PATTERN...]; with no patterns, reads stdin.
fn main() {
    let cfg = cli::parse_args(env::args().collect());
    match app::run(cfg) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    }
}
