//! Tool runners: flag resolution, process invocation, and the
//! normalization/filtering pipeline.
//!
//! A `Runner` is constructed once per requested tool and reused across all
//! requested files; its flag list and ignore sets are resolved at
//! construction and never change mid-run. The variant set is closed —
//! splint, cppcheck, and TenDRA's `tchk` — so dispatch is a plain enum
//! match rather than an open plugin surface.

use crate::config::{split_colon_list, Effective};
use crate::matcher::{Fragment, Matcher};
use crate::record::Diagnostic;
use regex::Regex;
use std::collections::HashSet;
use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The supported analysis tools.
pub enum ToolKind {
    Splint,
    CppCheck,
    Tendra,
}

impl ToolKind {
    /// Registry alias, also the name of the tool's configuration table.
    pub fn alias(&self) -> &'static str {
        match self {
            ToolKind::Splint => "splint",
            ToolKind::CppCheck => "cppcheck",
            ToolKind::Tendra => "tendra",
        }
    }

    /// Executable name invoked for this variant.
    pub fn command(&self) -> &'static str {
        match self {
            ToolKind::Splint => "splint",
            ToolKind::CppCheck => "cppcheck",
            ToolKind::Tendra => "tchk",
        }
    }

    /// Built-in invocation flags, before configuration merging.
    pub fn default_flags(&self) -> &'static [&'static str] {
        match self {
            ToolKind::Splint => &[
                "+matchanyintegral",
                "+tryrecover",
                "-sysdirerrors",
                "-syntax",
                "-indentspaces",
                "0",
                "-linelen",
                "8192",
                "-localindentspaces",
                "0",
                "-bugslimit",
                "1000",
            ],
            ToolKind::CppCheck => &[
                "--enable=style",
                "--enable=unusedFunction",
                "--enable=information",
            ],
            ToolKind::Tendra => &[
                "-Xs",
                "-Yxpg4",
                "-Yposix2",
                "-I./",
                "-I./include",
                "-I/usr/include/python2.7",
                "-I/usr/include/libxml2",
            ],
        }
    }

    /// Whether the variant's diagnostics also arrive on stderr.
    /// cppcheck reports there; splint keeps stdout clean of noise.
    pub fn merges_stderr(&self) -> bool {
        !matches!(self, ToolKind::Splint)
    }

    /// Diagnostic codes excluded out of the box when sane defaults are
    /// requested at construction. No variant ships any today.
    fn sane_default_ignore_codes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Build this variant's output matcher.
    pub fn matcher(&self) -> Matcher {
        match self {
            ToolKind::Splint => Matcher::Single(
                Regex::new(
                    r"^(?P<filename>[^:]+):(?P<line_number>[^:]+):(?P<column_number>[^:]+): (?P<description>.+)$",
                )
                .expect("splint pattern"),
            ),
            ToolKind::CppCheck => Matcher::Single(
                Regex::new(
                    r"^\[(?P<filename>[^:]+):(?P<line_number>[^:]+)\]: \((?P<level>[^\)]+)\) (?P<description>[^\r\n]+)$",
                )
                .expect("cppcheck pattern"),
            ),
            ToolKind::Tendra => Matcher::TwoLine {
                header: Regex::new(
                    r#"(?i)^"(?P<filename>[^,]+)",[ ]*line[ ]*(?P<line_number>[^:]+):[ ]*Error:[ \t]*$"#,
                )
                .expect("tchk header pattern"),
                continuation: Regex::new(r"^[ ]+(?P<description>[^\r\n]+)")
                    .expect("tchk continuation pattern"),
                carry: None,
            },
        }
    }

    /// Variant-specific post-match adjustment: assigns the fixed severity,
    /// tool tag, and code, trims the description, and may veto the record
    /// for tool-internal noise.
    pub fn fixup(&self, raw_line: &str, frag: Fragment) -> Option<Diagnostic> {
        let (level, error_type) = match self {
            ToolKind::Splint => {
                if raw_line.contains("*** Internal Bug") {
                    return None;
                }
                ("WARNING".to_string(), "SPL")
            }
            ToolKind::CppCheck => (frag.level.to_uppercase(), "CCH"),
            ToolKind::Tendra => ("WARNING".to_string(), "TCH"),
        };
        Some(Diagnostic {
            level,
            error_type: error_type.to_string(),
            error_number: "E01".to_string(),
            description: trim_edges(&frag.description),
            filename: frag.filename,
            line_number: frag.line_number,
        })
    }
}

/// Strip surrounding space/CR/LF, matching how config values are trimmed.
fn trim_edges(value: &str) -> String {
    value
        .trim_matches(|c| c == ' ' || c == '\n' || c == '\r')
        .to_string()
}

/// Caller-supplied codes merged with the variant's sane defaults: the
/// symmetric difference when sane defaults are requested, the caller set
/// verbatim otherwise.
fn resolve_ignore_codes(
    caller: &[String],
    sane_defaults: &[&str],
    use_sane_defaults: bool,
) -> HashSet<String> {
    let caller: HashSet<String> = caller.iter().cloned().collect();
    if !use_sane_defaults {
        return caller;
    }
    let defaults: HashSet<String> = sane_defaults.iter().map(|c| c.to_string()).collect();
    caller.symmetric_difference(&defaults).cloned().collect()
}

/// Drives one analysis tool end-to-end: resolved flags, invocation,
/// parsing, filtering, and printing.
pub struct Runner {
    kind: ToolKind,
    run_flags: Vec<String>,
    ignore_codes: HashSet<String>,
    ignore: Vec<String>,
    suppress: bool,
    env: Vec<(String, String)>,
    matcher: Matcher,
}

impl Runner {
    /// Resolve a runner from the effective options snapshot.
    ///
    /// Flag order: variant built-ins, then one `-I<dir>` per configured
    /// include directory, then the variant section's own flags. When the
    /// section sets `noincludes`, every `-I`-prefixed flag is stripped,
    /// built-ins included. A section-level `ignore` replaces the effective
    /// ignore-substring list for this runner only.
    pub fn new(
        kind: ToolKind,
        ignore_codes: &[String],
        use_sane_defaults: bool,
        eff: &Effective,
    ) -> Self {
        let mut run_flags: Vec<String> =
            kind.default_flags().iter().map(|f| f.to_string()).collect();
        run_flags.extend(eff.includes.iter().map(|dir| format!("-I{}", dir)));
        let mut ignore = eff.ignore.clone();
        if let Some(section) = eff.tool_sections.get(kind.alias()) {
            if let Some(flags) = section.flags.as_deref() {
                run_flags.extend(split_colon_list(flags));
            }
            if let Some(overrides) = section.ignore.as_deref() {
                ignore = split_colon_list(overrides);
            }
            if section.noincludes.unwrap_or(false) {
                run_flags.retain(|f| !f.starts_with("-I"));
            }
        }
        Runner {
            kind,
            run_flags,
            ignore_codes: resolve_ignore_codes(
                ignore_codes,
                kind.sane_default_ignore_codes(),
                use_sane_defaults,
            ),
            ignore,
            suppress: eff.suppress,
            env: eff.env.clone(),
            matcher: kind.matcher(),
        }
    }

    /// The resolved invocation flags, frozen at construction.
    pub fn flags(&self) -> &[String] {
        &self.run_flags
    }

    /// Spawn the tool against `filename` and feed its output through the
    /// normalization pipeline, printing emitted records to stdout.
    ///
    /// The call blocks until the child exits and its streams are drained.
    /// A missing executable or abnormal exit is silent degradation:
    /// whatever output was captured is processed, and an empty stream
    /// simply yields no diagnostics.
    pub fn run(&mut self, filename: &str) {
        let mut cmd = Command::new(self.kind.command());
        cmd.args(&self.run_flags).arg(filename).stdin(Stdio::null());
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        let output = match cmd.output() {
            Ok(out) => out,
            Err(_) => return,
        };
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if self.kind.merges_stderr() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }
        let stdout = std::io::stdout();
        let mut sink = stdout.lock();
        self.process_lines(filename, text.lines(), &mut sink);
    }

    /// Match → fix-up → filter → emit, one raw line at a time.
    ///
    /// Emission policy: without `suppress`, every surviving record prints
    /// once, and records attributed to `filename` itself print a second
    /// time. With `suppress`, only the same-file print remains, so
    /// diagnostics surfaced transitively (an included header, say) are
    /// dropped. Returns the number of report lines written.
    pub fn process_lines<'a, W: Write>(
        &mut self,
        filename: &str,
        lines: impl Iterator<Item = &'a str>,
        out: &mut W,
    ) -> usize {
        let mut emitted = 0;
        for line in lines {
            let Some(fragment) = self.matcher.feed(line) else {
                continue;
            };
            let Some(record) = self.kind.fixup(line, fragment) else {
                continue;
            };
            if self.ignore_codes.contains(&record.error_number) {
                continue;
            }
            if self
                .ignore
                .iter()
                .any(|sub| record.description.contains(sub.as_str()) || line.contains(sub.as_str()))
            {
                continue;
            }
            if !self.suppress {
                let _ = writeln!(out, "{}", record.render());
                emitted += 1;
            }
            if record.filename == filename {
                let _ = writeln!(out, "{}", record.render());
                emitted += 1;
            }
        }
        emitted
    }
}
