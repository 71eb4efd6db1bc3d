#[derive(Debug, Clone)]
pub struct Config {
    pub quiet: bool,
    pub patterns: Vec<String>,
}

pub fn parse_args(args: Vec<String>) -> Config {
    let quiet = args.iter().any(|a| a == "-q" || a == "--quiet");
    let patterns = args
        .into_iter()
        .skip(1)
        .filter(|a| a != "-q" && a != "--quiet")
        .collect();

    Config { quiet, patterns }
}
