//! Configuration loading and effective-options resolution.
//!
//! Bugbuster reads `.bugbuster.toml` (or `.yaml`/`.yml`, chosen by file
//! extension) and merges it with CLI flags into one immutable `Effective`
//! snapshot per batch. Precedence: CLI > config file > built-in defaults.
//! A missing or unreadable file means built-in defaults, never an error.
//!
//! List-valued keys are colon-separated strings, each entry trimmed of
//! surrounding space/CR/LF. `[global]` applies to every runner; one table
//! per tool alias holds variant-specific overrides.

use crate::cli::Cli;
use crate::registry;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize, Clone)]
/// `[global]` section: options applying to every runner.
pub struct GlobalCfg {
    /// Colon-separated include directories, one `-I<dir>` flag each.
    pub includes: Option<String>,
    pub suppress: Option<bool>,
    /// Colon-separated tool aliases replacing the built-in default tool
    /// list when `--lint` is not given.
    pub defaults: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// One table per tool alias, e.g. `[splint]`.
pub struct ToolCfg {
    /// Colon-separated extra invocation flags.
    pub flags: Option<String>,
    /// Colon-separated ignore substrings; replaces the effective list for
    /// this runner only.
    pub ignore: Option<String>,
    /// Strip every `-I` flag from the resolved list.
    pub noincludes: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration file model.
pub struct BusterConfig {
    pub global: Option<GlobalCfg>,
    #[serde(flatten)]
    pub tools: HashMap<String, ToolCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved per-batch options snapshot.
///
/// Computed once before any runner executes and never mutated afterwards;
/// every runner reads from the same snapshot, so no construction-time side
/// effect can leak across runners.
pub struct Effective {
    pub tools: Vec<String>,
    pub files: Vec<String>,
    pub suppress: bool,
    pub ignore: Vec<String>,
    pub env: Vec<(String, String)>,
    pub includes: Vec<String>,
    pub tool_sections: HashMap<String, ToolCfg>,
}

/// Load the configuration file if present and well-formed.
pub fn load_config(path: &Path) -> Option<BusterConfig> {
    let raw = fs::read_to_string(path).ok()?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if matches!(ext, "yaml" | "yml") {
        serde_yaml::from_str(&raw).ok()
    } else {
        toml::from_str(&raw).ok()
    }
}

/// Merge CLI flags, loaded configuration, and built-in defaults into the
/// per-batch snapshot.
pub fn resolve_effective(cli: &Cli, cfg: &BusterConfig) -> Effective {
    let global = cfg.global.clone().unwrap_or_default();
    let tools = if !cli.lint.is_empty() {
        cli.lint.clone()
    } else if let Some(defaults) = global.defaults.as_deref() {
        split_colon_list(defaults)
    } else {
        registry::DEFAULT_TOOLS.iter().map(|t| t.to_string()).collect()
    };
    let suppress = cli.suppress || global.suppress.unwrap_or(false);
    let includes = global
        .includes
        .as_deref()
        .map(split_colon_list)
        .unwrap_or_default();
    Effective {
        tools,
        files: expand_files(&cli.files),
        suppress,
        ignore: cli.ignore.clone(),
        env: parse_env_pairs(&cli.env),
        includes,
        tool_sections: cfg.tools.clone(),
    }
}

/// Split a colon-separated config value, trimming surrounding space/CR/LF
/// from each entry and dropping empties.
pub fn split_colon_list(value: &str) -> Vec<String> {
    value
        .split(':')
        .map(|part| part.trim_matches(|c| c == ' ' || c == '\n' || c == '\r').to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Expand `--files` values: entries with glob metacharacters expand to
/// their matches; plain paths pass through verbatim, present or not.
pub fn expand_files(patterns: &[String]) -> Vec<String> {
    let mut files = Vec::new();
    for pat in patterns {
        if !pat.contains(['*', '?', '[']) {
            files.push(pat.clone());
            continue;
        }
        if let Ok(entries) = glob::glob(pat) {
            for path in entries.flatten() {
                files.push(path.to_string_lossy().to_string());
            }
        }
    }
    files
}

/// Parse `KEY=VALUE` pairs from `--env`; bare tokens carry no value and
/// are dropped.
pub fn parse_env_pairs(values: &[String]) -> Vec<(String, String)> {
    values
        .iter()
        .filter_map(|v| v.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["bugbuster"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_load_toml_and_resolve() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".bugbuster.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "{}",
            r#"
[global]
includes = "/a:/b"
suppress = true
defaults = "splint:cppcheck"

[splint]
flags = "-weak"
noincludes = true
"#
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        let cli = parse(&["-f", "x.c"]);
        let eff = resolve_effective(&cli, &cfg);
        assert_eq!(eff.includes, vec!["/a", "/b"]);
        assert!(eff.suppress);
        assert_eq!(eff.tools, vec!["splint", "cppcheck"]);
        let splint = eff.tool_sections.get("splint").unwrap();
        assert_eq!(splint.flags.as_deref(), Some("-weak"));
        assert_eq!(splint.noincludes, Some(true));
    }

    #[test]
    fn test_load_yaml_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".bugbuster.yaml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "{}",
            r#"
global:
  suppress: true
cppcheck:
  flags: "--std=c99"
"#
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.global.as_ref().unwrap().suppress, Some(true));
        assert_eq!(
            cfg.tools.get("cppcheck").unwrap().flags.as_deref(),
            Some("--std=c99")
        );
    }

    #[test]
    fn test_missing_config_means_defaults() {
        let dir = tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_none());
        let cli = parse(&["-f", "x.c"]);
        let eff = resolve_effective(&cli, &BusterConfig::default());
        assert_eq!(eff.tools, registry::DEFAULT_TOOLS.to_vec());
        assert!(!eff.suppress);
        assert!(eff.includes.is_empty());
    }

    #[test]
    fn test_cli_lint_beats_config_defaults() {
        let cfg = BusterConfig {
            global: Some(GlobalCfg {
                includes: None,
                suppress: None,
                defaults: Some("splint".to_string()),
            }),
            tools: HashMap::new(),
        };
        let cli = parse(&["-l", "tendra", "-f", "x.c"]);
        let eff = resolve_effective(&cli, &cfg);
        assert_eq!(eff.tools, vec!["tendra"]);
    }

    #[test]
    fn test_cli_suppress_flag_wins() {
        let cfg = BusterConfig {
            global: Some(GlobalCfg {
                includes: None,
                suppress: Some(false),
                defaults: None,
            }),
            tools: HashMap::new(),
        };
        let cli = parse(&["-s", "-f", "x.c"]);
        assert!(resolve_effective(&cli, &cfg).suppress);
    }

    #[test]
    fn test_split_colon_list_trims_and_drops_empties() {
        assert_eq!(split_colon_list(" a :\nb\r: :c"), vec!["a", "b", "c"]);
        assert!(split_colon_list("").is_empty());
    }

    #[test]
    fn test_no_files_resolves_empty() {
        let cli = parse(&[]);
        let eff = resolve_effective(&cli, &BusterConfig::default());
        assert!(eff.files.is_empty());
    }

    #[test]
    fn test_parse_env_pairs() {
        let values = vec![
            "CC=clang".to_string(),
            "PLAIN".to_string(),
            "PATHLIKE=/x=/y".to_string(),
        ];
        let pairs = parse_env_pairs(&values);
        assert_eq!(
            pairs,
            vec![
                ("CC".to_string(), "clang".to_string()),
                ("PATHLIKE".to_string(), "/x=/y".to_string()),
            ]
        );
    }

    #[test]
    fn test_expand_files_globs_and_literals() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.c"), "").unwrap();
        fs::write(dir.path().join("b.c"), "").unwrap();
        let pattern = dir.path().join("*.c").to_string_lossy().to_string();
        let mut expanded = expand_files(&[pattern]);
        expanded.sort();
        assert_eq!(expanded.len(), 2);
        assert!(expanded[0].ends_with("a.c"));
        assert!(expanded[1].ends_with("b.c"));
        // literal paths pass through untouched, even when absent
        let literal = expand_files(&["no-such-file.c".to_string()]);
        assert_eq!(literal, vec!["no-such-file.c"]);
    }
}
