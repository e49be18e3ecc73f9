//! Report rendering shared by every `snz` subcommand.
//!
//! A command builds one value implementing [`Report`]. The same value is
//! serialized for JSON output and drawn as key/value lines otherwise, so the
//! human and machine views never drift apart.
//!
//! Mode precedence: `--format`, then `--json`, then the `FORMAT` env var
//! (`pretty` | `text` | `json`, case-insensitive), then pretty output on a
//! terminal and tab-separated text when stdout is piped.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use clap::ValueEnum;
use serde::Serialize;

/// Width of the rule under pretty headings.
const RULE_WIDTH: usize = 60;

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Headings and aligned `key: value` lines for people.
    Pretty,
    /// `key<TAB>value` lines for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Mode for this process, from flags, `FORMAT` and stdout's TTY state.
    pub fn detect(format_flag: Option<Self>, json_flag: bool) -> Self {
        let env = std::env::var("FORMAT").ok();
        Self::choose(format_flag, json_flag, env.as_deref(), io::stdout().is_terminal())
    }

    fn choose(format_flag: Option<Self>, json_flag: bool, env: Option<&str>, tty: bool) -> Self {
        format_flag
            .or_else(|| json_flag.then_some(Self::Json))
            .or_else(|| env.and_then(|value| Self::from_str(value.trim(), true).ok()))
            .unwrap_or(if tty { Self::Pretty } else { Self::Text })
    }

    /// Returns `true` if pretty output was requested.
    pub const fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty)
    }

    /// Pretty mode: the title and a rule. Text mode prints nothing.
    pub fn heading(self, w: &mut dyn Write, title: &str) -> io::Result<()> {
        if self.is_pretty() {
            writeln!(w, "{title}")?;
            writeln!(w, "{}", "-".repeat(RULE_WIDTH))?;
        }
        Ok(())
    }

    /// One `key`/`value` line in the style of this mode.
    pub fn field(self, w: &mut dyn Write, key: &str, value: impl Display) -> io::Result<()> {
        if self.is_pretty() {
            writeln!(w, "{:<16} {value}", format!("{key}:"))
        } else {
            writeln!(w, "{key}\t{value}")
        }
    }
}

/// A command result that renders either as JSON or as human-readable lines.
pub trait Report: Serialize {
    /// Draw the report in pretty or text mode.
    fn write_human(&self, mode: OutputMode, w: &mut dyn Write) -> io::Result<()>;
}

/// Print `report` to stdout.
pub fn emit<R: Report>(mode: OutputMode, report: &R) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    write_report(mode, report, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_report<R: Report>(mode: OutputMode, report: &R, w: &mut dyn Write) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        serde_json::to_writer_pretty(&mut *w, report)?;
        writeln!(w)?;
    } else {
        report.write_human(mode, w)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    causes: Vec<String>,
}

/// Print a failed command's error chain to stderr.
pub fn emit_error(mode: OutputMode, err: &anyhow::Error) -> anyhow::Result<()> {
    let mut out = io::stderr().lock();
    if mode == OutputMode::Json {
        let envelope = ErrorEnvelope {
            error: ErrorBody {
                message: err.to_string(),
                causes: err.chain().skip(1).map(ToString::to_string).collect(),
            },
        };
        serde_json::to_writer_pretty(&mut out, &envelope)?;
        writeln!(out)?;
    } else {
        writeln!(out, "error: {err:#}")?;
    }
    Ok(())
}

/// Format a score for human output.
pub fn fmt_score(value: f64) -> String {
    format!("{value:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Tally {
        nodes: usize,
    }

    impl Report for Tally {
        fn write_human(&self, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
            mode.heading(w, "Tally")?;
            mode.field(w, "nodes", self.nodes)
        }
    }

    fn rendered(mode: OutputMode) -> String {
        let mut buf = Vec::new();
        write_report(mode, &Tally { nodes: 3 }, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn format_flag_wins() {
        let mode = OutputMode::choose(Some(OutputMode::Text), true, Some("json"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn json_flag_beats_env() {
        assert_eq!(OutputMode::choose(None, true, Some("pretty"), true), OutputMode::Json);
    }

    #[test]
    fn env_value_ignores_case() {
        assert_eq!(OutputMode::choose(None, false, Some("JSON"), true), OutputMode::Json);
    }

    #[test]
    fn unknown_env_value_falls_back_to_tty() {
        assert_eq!(OutputMode::choose(None, false, Some("yaml"), true), OutputMode::Pretty);
        assert_eq!(OutputMode::choose(None, false, None, false), OutputMode::Text);
    }

    #[test]
    fn text_report_is_tab_separated_without_heading() {
        assert_eq!(rendered(OutputMode::Text), "nodes\t3\n");
    }

    #[test]
    fn pretty_report_has_heading_and_aligned_field() {
        let out = rendered(OutputMode::Pretty);
        assert!(out.starts_with("Tally\n---"), "{out}");
        assert!(out.contains("nodes:           3"), "{out}");
    }

    #[test]
    fn json_report_is_the_serialized_value() {
        let value: serde_json::Value = serde_json::from_str(&rendered(OutputMode::Json)).unwrap();
        assert_eq!(value["nodes"], 3);
    }
}
