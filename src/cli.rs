//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bugbuster",
    version,
    about = "Run multiple static-analysis tools over C files",
    long_about = "Bugbuster — drives splint, cppcheck, and TenDRA's tchk over C source files and normalizes their diagnostics into one report format.\n\nConfiguration precedence: CLI > .bugbuster.toml > defaults.",
    after_help = "Examples:\n  bugbuster -f src/main.c\n  bugbuster -l splint -l cppcheck -f 'src/*.c' --suppress\n  bugbuster -c ci/.bugbuster.toml -f src/io.c -i \"exported but not declared\""
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(
        short,
        long = "lint",
        value_name = "TOOL",
        help = "Lint tool to run, twice to add more (default: cppcheck, tendra, splint)"
    )]
    pub lint: Vec<String>,
    #[arg(
        short,
        long = "env",
        value_name = "KEY=VALUE",
        help = "Environment pair injected into every tool process, twice to add more"
    )]
    pub env: Vec<String>,
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = "./.bugbuster.toml",
        help = "Configuration file (TOML, or YAML by extension)"
    )]
    pub config: String,
    #[arg(
        short,
        long = "files",
        value_name = "FILE",
        help = "File to process, twice to add more; glob patterns are expanded"
    )]
    pub files: Vec<String>,
    #[arg(
        short,
        long,
        action = clap::ArgAction::SetTrue,
        help = "Suppress diagnostics reported against other files"
    )]
    pub suppress: bool,
    #[arg(
        short,
        long = "ignore",
        value_name = "SUBSTR",
        help = "Drop diagnostics containing this substring, twice to add more"
    )]
    pub ignore: Vec<String>,
}
