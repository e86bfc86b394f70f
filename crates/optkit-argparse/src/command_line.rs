//! Result of parsing an argument vector.

use indexmap::IndexMap;
use serde::Serialize;

use crate::option::Opt;
use crate::util;

/// Parsed arguments: the matched options (one value-bearing copy per match,
/// in input order) and the leftover arguments.
///
/// A `CommandLine` is only built by the [`Parser`](crate::Parser) and is
/// read-only once returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    options: Vec<Opt>,
    args: Vec<String>,
}

impl CommandLine {
    pub(crate) fn push_option(&mut self, opt: Opt) -> usize {
        self.options.push(opt);
        self.options.len() - 1
    }

    pub(crate) fn option_mut(&mut self, index: usize) -> Option<&mut Opt> {
        self.options.get_mut(index)
    }

    pub(crate) fn option_at(&self, index: usize) -> Option<&Opt> {
        self.options.get(index)
    }

    pub(crate) fn push_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// Matched options, duplicates included.
    pub fn options(&self) -> &[Opt] {
        &self.options
    }

    /// Arguments that were not consumed by any option.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Opt> {
        self.options.iter()
    }

    fn resolve(&self, name: &str) -> Option<&Opt> {
        let name = util::strip_leading_hyphens(name);
        self.options.iter().find(|o| o.is_named(name))
    }

    fn matches_of<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Opt> + 'a {
        let target = self.resolve(name);
        self.options
            .iter()
            .filter(move |o| target.is_some_and(|t| t.same_option(o)))
    }

    /// Whether the option named `name` (short or long) was matched.
    pub fn has_option(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Number of times the option named `name` was matched.
    pub fn occurrences(&self, name: &str) -> usize {
        self.matches_of(name).count()
    }

    /// Values of every match of `name`, in input order.
    pub fn option_values(&self, name: &str) -> Vec<&str> {
        self.matches_of(name)
            .flat_map(|o| o.values().iter().map(String::as_str))
            .collect()
    }

    /// First value of `name`.
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.matches_of(name).find_map(Opt::value)
    }

    pub fn option_value_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.option_value(name).unwrap_or(default)
    }

    pub fn option_value_or_else<F>(&self, name: &str, default: F) -> String
    where
        F: FnOnce() -> String,
    {
        self.option_value(name)
            .map(str::to_string)
            .unwrap_or_else(default)
    }

    /// Key/value pairs collected by a property-style option such as
    /// `-Dkey=value`. A key without a value maps to `"true"`.
    pub fn option_properties(&self, name: &str) -> IndexMap<String, String> {
        let mut props = IndexMap::new();
        for opt in self.matches_of(name) {
            for pair in opt.values().chunks(2) {
                let value = pair.get(1).cloned().unwrap_or_else(|| "true".to_string());
                props.insert(pair[0].clone(), value);
            }
        }
        props
    }
}

impl<'a> IntoIterator for &'a CommandLine {
    type Item = &'a Opt;
    type IntoIter = std::slice::Iter<'a, Opt>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
