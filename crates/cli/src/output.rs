use anyhow::{Context, Result};
use indexmap::IndexMap;
use optkit_argparse::{CommandLine, Opt};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    cmd: &'a CommandLine,
    /// Key/value pairs of property-style options (`-Dkey=value`), by option.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    properties: IndexMap<&'a str, IndexMap<String, String>>,
}

/// Pretty JSON: `{ "options": [{ "short", "long", "values" }], "args": [...] }`,
/// plus a `properties` object when property-style options matched.
pub fn to_json(cmd: &CommandLine) -> Result<String> {
    let mut properties = IndexMap::new();
    for opt in cmd {
        if opt.arg_count().is_multi() && opt.value_separator().is_some() {
            properties
                .entry(opt.key())
                .or_insert_with(|| cmd.option_properties(opt.key()));
        }
    }
    let report = JsonReport { cmd, properties };
    serde_json::to_string_pretty(&report).context("failed to serialize parsed command line")
}

/// Normalized command line: long names where available, every value and
/// leftover single-quoted, leftovers after `--`.
pub fn to_shell(cmd: &CommandLine) -> String {
    let mut words: Vec<String> = Vec::new();
    for opt in cmd {
        words.push(option_word(opt));
        words.extend(opt.values().iter().map(|v| shell_quote(v)));
    }
    if !cmd.args().is_empty() {
        words.push("--".to_string());
        words.extend(cmd.args().iter().map(|a| shell_quote(a)));
    }
    words.join(" ")
}

fn option_word(opt: &Opt) -> String {
    match opt.long() {
        Some(long) => format!("--{long}"),
        None => format!("-{}", opt.key()),
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
