//! A single command-line option: its descriptor and the values collected for
//! one match.

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::util;

/// Default separator used by [`OptBuilder::value_separator_default`].
pub const DEFAULT_VALUE_SEPARATOR: char = '=';

/// Number of argument values an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgCount {
    /// The option takes no argument.
    #[default]
    Unset,
    /// At most this many values.
    Exactly(usize),
    /// Any number of values.
    Unlimited,
}

impl ArgCount {
    /// Whether the count allows two or more values (the "property-style"
    /// shape used by options such as `-Dkey=value`).
    pub fn is_multi(self) -> bool {
        match self {
            Self::Exactly(n) => n >= 2,
            Self::Unlimited => true,
            Self::Unset => false,
        }
    }
}

/// A command-line option.
///
/// Options registered in an [`Options`](crate::Options) registry are
/// templates and never carry values. Each match produced by the parser is a
/// separate value-bearing copy owned by the resulting
/// [`CommandLine`](crate::CommandLine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opt {
    #[serde(skip_serializing_if = "Option::is_none")]
    short: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    long: Option<String>,
    #[serde(skip)]
    arg_name: Option<String>,
    #[serde(skip)]
    description: Option<String>,
    #[serde(skip)]
    optional_arg: bool,
    #[serde(skip)]
    arg_count: ArgCount,
    #[serde(skip)]
    value_separator: Option<char>,
    values: Vec<String>,
}

impl Opt {
    /// Start building an option with the given short name.
    pub fn builder(short: impl Into<String>) -> OptBuilder {
        OptBuilder {
            short: Some(short.into()),
            ..OptBuilder::default()
        }
    }

    /// Start building an option that only has a long name.
    pub fn long_only(long: impl Into<String>) -> OptBuilder {
        OptBuilder {
            long: Some(long.into()),
            ..OptBuilder::default()
        }
    }

    /// Shorthand for a boolean or single-value option.
    pub fn new(
        short: impl Into<String>,
        long: Option<&str>,
        has_arg: bool,
        description: impl Into<String>,
    ) -> Result<Self> {
        let mut builder = Self::builder(short)
            .description(description)
            .has_arg(has_arg);
        if let Some(long) = long {
            builder = builder.long(long);
        }
        builder.build()
    }

    /// Identity key: the short name when present, otherwise the long name.
    pub fn key(&self) -> &str {
        self.short
            .as_deref()
            .or(self.long.as_deref())
            .unwrap_or_default()
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn has_long(&self) -> bool {
        self.long.is_some()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn arg_count(&self) -> ArgCount {
        self.arg_count
    }

    pub fn value_separator(&self) -> Option<char> {
        self.value_separator
    }

    pub fn has_optional_arg(&self) -> bool {
        self.optional_arg
    }

    /// Whether the option declares at least one argument value.
    pub fn has_arg(&self) -> bool {
        matches!(self.arg_count, ArgCount::Exactly(n) if n > 0)
            || self.arg_count == ArgCount::Unlimited
    }

    /// Whether the option declares more than one argument value.
    pub fn has_args(&self) -> bool {
        self.arg_count.is_multi()
    }

    /// Two options are the same option when their names match, whatever
    /// values they carry.
    pub fn same_option(&self, other: &Opt) -> bool {
        self.short == other.short && self.long == other.long
    }

    /// Whether `name` (hyphens stripped) is this option's short or long name.
    pub fn is_named(&self, name: &str) -> bool {
        let name = util::strip_leading_hyphens(name);
        self.short.as_deref() == Some(name) || self.long.as_deref() == Some(name)
    }

    /// Collected values, in order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// First collected value.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn value_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.value().unwrap_or(default)
    }

    /// A copy of this option with no collected values.
    pub fn with_values_cleared(&self) -> Opt {
        Opt {
            values: Vec::new(),
            ..self.clone()
        }
    }

    /// Whether another value can still be collected.
    pub fn accepts_more_values(&self) -> bool {
        if !(self.has_arg() || self.optional_arg) {
            return false;
        }
        match self.arg_count {
            ArgCount::Exactly(n) if n > 0 => self.values.len() < n,
            _ => true,
        }
    }

    /// Whether the option still needs a value before the next option starts.
    pub fn requires_more_args(&self) -> bool {
        if self.optional_arg {
            return false;
        }
        if self.arg_count == ArgCount::Unlimited {
            return self.values.is_empty();
        }
        self.accepts_more_values()
    }

    /// Append one value.
    pub fn add_value(&mut self, value: impl Into<String>) -> Result<()> {
        if !self.accepts_more_values() {
            return Err(Error::ArgumentOverflow {
                key: self.key().to_string(),
            });
        }
        self.values.push(value.into());
        Ok(())
    }

    /// Feed a raw argument to the option, splitting it on the value
    /// separator when one is configured.
    pub fn process_value(&mut self, value: &str) -> Result<()> {
        if !(self.has_arg() || self.optional_arg) {
            return Err(Error::NoArgumentAllowed {
                key: self.key().to_string(),
            });
        }
        let Some(sep) = self.value_separator else {
            return self.add_value(value);
        };
        let parts: Vec<&str> = match self.arg_count {
            ArgCount::Exactly(n) if n > 0 => value.splitn(n, sep).collect(),
            _ => value.split(sep).collect(),
        };
        for part in parts {
            self.add_value(part)?;
        }
        Ok(())
    }

    /// Label shown for the option value in help output.
    ///
    /// Uses the explicit argument name, or derives one from the long name
    /// (`outputDir` -> `OUTPUT_DIR`). Names that are not plain word
    /// characters after upper-casing are discarded.
    pub fn display_arg_name(&self) -> Option<String> {
        let raw = match (&self.arg_name, &self.long) {
            (Some(name), _) => name.clone(),
            (None, Some(long)) => util::underscore_separators(&util::un_camel_case(long)),
            (None, None) => return None,
        };
        let upper = raw.to_uppercase();
        util::is_word(&upper).then_some(upper)
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ Option {}", self.short.as_deref().unwrap_or("-"))?;
        if let Some(long) = &self.long {
            write!(f, " {long}")?;
        }
        if self.has_args() {
            f.write_str("[ARG...]")?;
        } else if self.has_arg() {
            f.write_str(" [ARG]")?;
        }
        write!(f, " :: {} ]", self.description.as_deref().unwrap_or_default())
    }
}

/// Builder for [`Opt`].
#[derive(Debug, Clone, Default)]
pub struct OptBuilder {
    short: Option<String>,
    long: Option<String>,
    arg_name: Option<String>,
    description: Option<String>,
    optional_arg: bool,
    arg_count: ArgCount,
    value_separator: Option<char>,
}

impl OptBuilder {
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn arg_name(mut self, arg_name: impl Into<String>) -> Self {
        self.arg_name = Some(arg_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Toggle a single argument value.
    pub fn has_arg(mut self, has_arg: bool) -> Self {
        self.arg_count = if has_arg {
            ArgCount::Exactly(1)
        } else {
            ArgCount::Unset
        };
        self
    }

    /// Accept any number of values.
    pub fn has_args(mut self) -> Self {
        self.arg_count = ArgCount::Unlimited;
        self
    }

    pub fn number_of_args(mut self, count: ArgCount) -> Self {
        self.arg_count = count;
        self
    }

    /// Make the argument optional. An option without a declared count
    /// becomes a single optional value.
    pub fn optional_arg(mut self, optional: bool) -> Self {
        if optional && self.arg_count == ArgCount::Unset {
            self.arg_count = ArgCount::Exactly(1);
        }
        self.optional_arg = optional;
        self
    }

    pub fn value_separator(mut self, sep: char) -> Self {
        self.value_separator = Some(sep);
        self
    }

    /// Use `=` as the value separator.
    pub fn value_separator_default(self) -> Self {
        self.value_separator(DEFAULT_VALUE_SEPARATOR)
    }

    pub fn build(self) -> Result<Opt> {
        if self.short.is_none() && self.long.is_none() {
            return Err(Error::MissingName);
        }
        if let Some(short) = &self.short {
            validate_short_name(short)?;
        }
        if self.long.as_deref().is_some_and(str::is_empty) {
            return Err(Error::InvalidOptionName {
                name: String::new(),
            });
        }
        Ok(Opt {
            short: self.short,
            long: self.long,
            arg_name: self.arg_name,
            description: self.description,
            optional_arg: self.optional_arg,
            arg_count: self.arg_count,
            value_separator: self.value_separator,
            values: Vec::new(),
        })
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Short names are identifier characters; a lone `?` or `@` is also allowed.
fn validate_short_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(c), None) => is_identifier_char(c) || c == '?' || c == '@',
        _ => name.chars().all(is_identifier_char),
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidOptionName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(short: &str) -> Opt {
        Opt::builder(short).has_arg(true).build().unwrap()
    }

    #[test]
    fn builder_requires_a_name() {
        let err = OptBuilder::default().build().unwrap_err();
        assert_eq!(err, Error::MissingName);
    }

    #[test]
    fn builder_rejects_illegal_short_names() {
        assert!(Opt::builder("?").build().is_ok());
        assert!(Opt::builder("@").build().is_ok());
        assert!(Opt::builder("x1").build().is_ok());
        assert!(matches!(
            Opt::builder("a-b").build(),
            Err(Error::InvalidOptionName { .. })
        ));
        assert!(matches!(
            Opt::builder("").build(),
            Err(Error::InvalidOptionName { .. })
        ));
    }

    #[test]
    fn key_prefers_short_name() {
        let o = Opt::builder("f").long("file").build().unwrap();
        assert_eq!(o.key(), "f");
        let o = Opt::long_only("file").build().unwrap();
        assert_eq!(o.key(), "file");
    }

    #[test]
    fn flag_accepts_no_values() {
        let mut o = Opt::builder("v").build().unwrap();
        assert!(!o.accepts_more_values());
        assert!(!o.requires_more_args());
        assert_eq!(
            o.process_value("x").unwrap_err(),
            Error::NoArgumentAllowed {
                key: "v".to_string()
            }
        );
    }

    #[test]
    fn single_value_overflows() {
        let mut o = single("f");
        assert!(o.requires_more_args());
        o.add_value("a").unwrap();
        assert!(!o.accepts_more_values());
        assert!(!o.requires_more_args());
        assert_eq!(
            o.add_value("b").unwrap_err(),
            Error::ArgumentOverflow {
                key: "f".to_string()
            }
        );
    }

    #[test]
    fn unlimited_requires_only_first_value() {
        let mut o = Opt::builder("D").has_args().build().unwrap();
        assert!(o.requires_more_args());
        o.add_value("a").unwrap();
        assert!(!o.requires_more_args());
        assert!(o.accepts_more_values());
    }

    #[test]
    fn optional_arg_never_requires() {
        let o = Opt::builder("o").optional_arg(true).build().unwrap();
        assert_eq!(o.arg_count(), ArgCount::Exactly(1));
        assert!(o.accepts_more_values());
        assert!(!o.requires_more_args());
    }

    #[test]
    fn separator_splits_up_to_arg_count() {
        let mut o = Opt::builder("D")
            .number_of_args(ArgCount::Exactly(2))
            .value_separator_default()
            .build()
            .unwrap();
        o.process_value("key=a=b").unwrap();
        assert_eq!(o.values(), ["key", "a=b"]);
    }

    #[test]
    fn separator_unlimited_splits_everything() {
        let mut o = Opt::builder("D")
            .has_args()
            .value_separator(',')
            .build()
            .unwrap();
        o.process_value("a,b,,c").unwrap();
        assert_eq!(o.values(), ["a", "b", "", "c"]);
    }

    #[test]
    fn separator_overflow_is_reported() {
        let mut o = Opt::builder("D")
            .number_of_args(ArgCount::Exactly(2))
            .value_separator_default()
            .build()
            .unwrap();
        o.add_value("first").unwrap();
        assert!(matches!(
            o.process_value("k=v"),
            Err(Error::ArgumentOverflow { .. })
        ));
    }

    #[test]
    fn display_arg_name_derivation() {
        let o = Opt::builder("o").long("outputDir").has_arg(true).build().unwrap();
        assert_eq!(o.display_arg_name().as_deref(), Some("OUTPUT_DIR"));

        let o = Opt::builder("d").long("dry-run").build().unwrap();
        assert_eq!(o.display_arg_name().as_deref(), Some("DRY_RUN"));

        let o = Opt::builder("f").long("file").arg_name("path").build().unwrap();
        assert_eq!(o.display_arg_name().as_deref(), Some("PATH"));

        let o = Opt::builder("D").arg_name("key=value").build().unwrap();
        assert_eq!(o.display_arg_name(), None);

        let o = Opt::builder("x").build().unwrap();
        assert_eq!(o.display_arg_name(), None);
    }

    #[test]
    fn cleared_copy_keeps_descriptor() {
        let mut o = single("f");
        o.add_value("a").unwrap();
        let copy = o.with_values_cleared();
        assert!(copy.values().is_empty());
        assert!(copy.same_option(&o));
        assert_eq!(copy.arg_count(), ArgCount::Exactly(1));
    }

    #[test]
    fn display_summarizes_option() {
        let o = Opt::new("f", Some("file"), true, "The file").unwrap();
        assert_eq!(o.to_string(), "[ Option f file [ARG] :: The file ]");
    }
}
