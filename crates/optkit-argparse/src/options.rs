//! Registry of the options a command recognizes.

use indexmap::IndexMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::option::Opt;
use crate::util;

/// A collection of [`Opt`] templates indexed by short and long name.
///
/// Both lookup tables keep insertion order and point at the same entry when
/// an option has both names. Names are unique across the registry.
#[derive(Debug, Clone, Default)]
pub struct Options {
    entries: Vec<Opt>,
    short_names: IndexMap<String, usize>,
    long_names: IndexMap<String, usize>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option.
    ///
    /// Fails with [`Error::DuplicateKey`] when its short or long name is
    /// already taken; the registry is left unchanged in that case.
    pub fn add(&mut self, opt: Opt) -> Result<&mut Self> {
        self.check_free(&opt)?;
        let idx = self.entries.len();
        if let Some(short) = opt.short() {
            self.short_names.insert(short.to_string(), idx);
        }
        if let Some(long) = opt.long() {
            self.long_names.insert(long.to_string(), idx);
        }
        self.entries.push(opt);
        Ok(self)
    }

    /// Register a boolean or single-value option with a short name.
    pub fn add_flag(
        &mut self,
        short: &str,
        long: Option<&str>,
        has_arg: bool,
        description: &str,
    ) -> Result<&mut Self> {
        self.add(Opt::new(short, long, has_arg, description)?)
    }

    /// Merge every option of `other` into this registry.
    ///
    /// Nothing is inserted when any incoming name already exists.
    pub fn add_many(&mut self, other: &Options) -> Result<&mut Self> {
        for opt in &other.entries {
            self.check_free(opt)?;
        }
        for opt in &other.entries {
            self.add(opt.clone())?;
        }
        Ok(self)
    }

    fn check_free(&self, opt: &Opt) -> Result<()> {
        let taken = opt
            .short()
            .filter(|s| self.short_names.contains_key(*s))
            .or_else(|| opt.long().filter(|l| self.long_names.contains_key(*l)));
        match taken {
            Some(key) => Err(Error::DuplicateKey {
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Look up an option by short name, then by long name. Up to two leading
    /// hyphens are ignored.
    pub fn find(&self, name: &str) -> Option<&Opt> {
        let clean = util::strip_leading_hyphens(name);
        self.short_names
            .get(clean)
            .or_else(|| self.long_names.get(clean))
            .map(|&idx| &self.entries[idx])
    }

    pub fn find_short(&self, name: &str) -> Option<&Opt> {
        self.short_names
            .get(util::strip_leading_hyphens(name))
            .map(|&idx| &self.entries[idx])
    }

    pub fn find_long(&self, name: &str) -> Option<&Opt> {
        self.long_names
            .get(util::strip_leading_hyphens(name))
            .map(|&idx| &self.entries[idx])
    }

    /// Long names matching `partial`.
    ///
    /// An exact long name returns only itself; otherwise every long name that
    /// starts with `partial` is returned, in registration order. More than
    /// one result means the prefix is ambiguous.
    pub fn matching_long_names(&self, partial: &str) -> Vec<String> {
        let clean = util::strip_leading_hyphens(partial);
        if self.long_names.contains_key(clean) {
            return vec![clean.to_string()];
        }
        self.long_names
            .keys()
            .filter(|name| name.starts_with(clean))
            .cloned()
            .collect()
    }

    pub fn has_short(&self, name: &str) -> bool {
        self.find_short(name).is_some()
    }

    pub fn has_long(&self, name: &str) -> bool {
        self.find_long(name).is_some()
    }

    /// Whether `name` is a registered short or long name.
    pub fn has_option(&self, name: &str) -> bool {
        self.has_short(name) || self.has_long(name)
    }

    /// Options in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Opt> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = &'a Opt;
    type IntoIter = std::slice::Iter<'a, Opt>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short: Vec<&str> = self.short_names.keys().map(String::as_str).collect();
        let long: Vec<&str> = self.long_names.keys().map(String::as_str).collect();
        write!(
            f,
            "[ Options: [ short {} ] [ long {} ] ]",
            short.join(", "),
            long.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Options {
        let mut options = Options::new();
        options
            .add_flag("f", Some("file"), true, "Input file")
            .unwrap()
            .add_flag("F", Some("filter"), true, "Filter expression")
            .unwrap()
            .add(Opt::long_only("verbose").build().unwrap())
            .unwrap();
        options
    }

    #[test]
    fn find_strips_hyphens_and_checks_both_tables() {
        let options = registry();
        assert_eq!(options.find("-f").map(Opt::key), Some("f"));
        assert_eq!(options.find("--file").map(Opt::key), Some("f"));
        assert_eq!(options.find("verbose").map(Opt::key), Some("verbose"));
        assert!(options.find("--nope").is_none());
    }

    #[test]
    fn both_names_point_to_same_entry() {
        let options = registry();
        let by_short = options.find("f").unwrap();
        let by_long = options.find("file").unwrap();
        assert!(std::ptr::eq(by_short, by_long));
    }

    #[test]
    fn exact_match_short_circuits_prefix_search() {
        let options = registry();
        assert_eq!(options.matching_long_names("--file"), vec!["file"]);
        assert_eq!(options.matching_long_names("--fil"), vec!["file", "filter"]);
        assert_eq!(options.matching_long_names("--filt"), vec!["filter"]);
        assert!(options.matching_long_names("--x").is_empty());
    }

    #[test]
    fn membership_tests_use_their_own_table() {
        let options = registry();
        assert!(options.has_short("f"));
        assert!(!options.has_short("file"));
        assert!(options.has_long("file"));
        assert!(!options.has_long("f"));
        assert!(!options.has_short("verbose"));
        assert!(options.has_option("--verbose"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut options = registry();
        let err = options.add_flag("f", None, false, "again").unwrap_err();
        assert_eq!(err, Error::DuplicateKey { key: "f".to_string() });

        let err = options
            .add(Opt::builder("x").long("file").build().unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKey {
                key: "file".to_string()
            }
        );
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn add_many_is_all_or_nothing() {
        let mut base = Options::new();
        base.add_flag("h", Some("help"), false, "Print usage").unwrap();

        let mut incoming = Options::new();
        incoming
            .add_flag("a", None, false, "a")
            .unwrap()
            .add_flag("h", None, false, "clash")
            .unwrap();

        assert_eq!(
            base.add_many(&incoming).unwrap_err(),
            Error::DuplicateKey { key: "h".to_string() }
        );
        assert_eq!(base.len(), 1);

        let mut fine = Options::new();
        fine.add_flag("a", None, false, "a").unwrap();
        base.add_many(&fine).unwrap();
        assert_eq!(base.len(), 2);
        assert!(base.has_short("a"));
    }

    #[test]
    fn iteration_keeps_registration_order() {
        let options = registry();
        let keys: Vec<&str> = options.iter().map(Opt::key).collect();
        assert_eq!(keys, ["f", "F", "verbose"]);
    }
}
