//! Token classifier and state machine that turns an argument vector into a
//! [`CommandLine`].
//!
//! Supported token shapes:
//!
//! - long options: `--file`, `--file=V`, `--file V`, unambiguous prefixes
//!   such as `--fi`, and single-dash long names (`-file`)
//! - short options: `-f`, `-fV`, `-f V`, `-f=V`
//! - bursts of short flags: `-abc`, `-abfV`
//! - long names glued to their value: `-Xmx512m`
//! - property-style options: `-Dkey=value`, `-Dflag`
//! - the `--` terminator; everything after it is a leftover argument
//!
//! When several readings of a single-dash token are possible the first one
//! that applies wins: exact short name, long-name prefix match, long name
//! with inline value, property-style, then burst.

use crate::command_line::CommandLine;
use crate::error::{Error, Result};
use crate::option::Opt;
use crate::options::Options;
use crate::util;

const TERMINATOR: &str = "--";

/// Parses argument vectors against a borrowed [`Options`] registry.
///
/// The registry is only read, so one registry can back any number of
/// parsers, including parsers running on different threads.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    options: &'r Options,
}

impl<'r> Parser<'r> {
    pub fn new(options: &'r Options) -> Self {
        Self { options }
    }

    /// Parse `args` (without the program name).
    ///
    /// The first failure aborts the parse; no partial result is returned.
    pub fn parse<I, S>(&self, args: I) -> Result<CommandLine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParseState::new(self.options);
        for arg in args {
            state.handle_token(arg.as_ref())?;
        }
        state.check_required_args()?;
        tracing::debug!(
            options = state.cmd.options().len(),
            args = state.cmd.args().len(),
            "parsed command line"
        );
        Ok(state.cmd)
    }
}

/// Parse `args` against `options`.
pub fn parse<I, S>(options: &Options, args: I) -> Result<CommandLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Parser::new(options).parse(args)
}

struct ParseState<'r> {
    options: &'r Options,
    cmd: CommandLine,
    /// Index in `cmd` of the match still waiting for values.
    current: Option<usize>,
    /// Set once `--` has been seen.
    skip_parsing: bool,
}

impl<'r> ParseState<'r> {
    fn new(options: &'r Options) -> Self {
        Self {
            options,
            cmd: CommandLine::default(),
            current: None,
            skip_parsing: false,
        }
    }

    fn handle_token(&mut self, token: &str) -> Result<()> {
        tracing::trace!(token, "dispatching token");
        if self.skip_parsing {
            self.cmd.push_arg(token);
        } else if token == TERMINATOR {
            self.check_required_args()?;
            self.skip_parsing = true;
        } else if self.current_accepts_value() && self.is_argument(token) {
            self.process_current(util::strip_enclosing_quotes(token))?;
        } else if token.starts_with("--") {
            self.handle_long_option(token)?;
        } else if token.starts_with('-') && token != "-" {
            self.handle_short_and_long_option(token)?;
        } else {
            self.handle_unknown_token(token)?;
        }

        if !self.current_accepts_value() {
            self.current = None;
        }
        Ok(())
    }

    fn current_option(&self) -> Option<&Opt> {
        self.current.and_then(|idx| self.cmd.option_at(idx))
    }

    fn current_accepts_value(&self) -> bool {
        self.current_option().is_some_and(Opt::accepts_more_values)
    }

    fn process_current(&mut self, value: &str) -> Result<()> {
        match self.current.and_then(|idx| self.cmd.option_mut(idx)) {
            Some(opt) => opt.process_value(value),
            None => Ok(()),
        }
    }

    /// Fail when the pending option still needs a value.
    ///
    /// A one-character property-style option holding a single value is let
    /// through so that `-Dflag` works as a boolean shorthand.
    fn check_required_args(&self) -> Result<()> {
        let Some(opt) = self.current_option() else {
            return Ok(());
        };
        if !opt.requires_more_args() {
            return Ok(());
        }
        let key = opt.key();
        let property_shorthand = key.chars().count() == 1
            && self.property_option(key).is_some()
            && opt.values().len() == 1;
        if property_shorthand {
            return Ok(());
        }
        Err(Error::MissingArgument {
            key: key.to_string(),
        })
    }

    /// Record a match of `opt` as a fresh value-bearing copy.
    fn handle_option(&mut self, opt: &Opt) -> Result<()> {
        self.check_required_args()?;
        let copy = opt.with_values_cleared();
        let takes_value = copy.accepts_more_values();
        tracing::trace!(key = copy.key(), "matched option");
        let idx = self.cmd.push_option(copy);
        self.current = takes_value.then_some(idx);
        Ok(())
    }

    /// Match `opt` and close it with values found inside the same token.
    fn handle_option_with_values(&mut self, opt: &Opt, values: &[&str]) -> Result<()> {
        self.handle_option(opt)?;
        for value in values {
            self.process_current(value)?;
        }
        self.current = None;
        Ok(())
    }

    fn handle_unknown_token(&mut self, token: &str) -> Result<()> {
        if token.starts_with('-') && token.chars().count() > 1 && !util::is_number(token) {
            return Err(Error::UnrecognizedOption {
                token: token.to_string(),
            });
        }
        self.cmd.push_arg(token);
        Ok(())
    }

    fn handle_long_option(&mut self, token: &str) -> Result<()> {
        if token.contains('=') {
            self.handle_long_option_with_equal(token)
        } else {
            self.handle_long_option_without_equal(token)
        }
    }

    /// Resolve a (possibly partial) long name to its option.
    ///
    /// `Ok(None)` means nothing matched.
    fn resolve_long(&self, name: &str) -> Result<Option<&'r Opt>> {
        let options = self.options;
        let matching = options.matching_long_names(name);
        if matching.len() > 1 {
            return Err(Error::AmbiguousOption {
                token: name.to_string(),
                candidates: matching,
            });
        }
        Ok(matching.first().and_then(|one| options.find_long(one)))
    }

    /// `--L`, `-L`, `--l`, `-l`
    fn handle_long_option_without_equal(&mut self, token: &str) -> Result<()> {
        match self.resolve_long(token)? {
            Some(opt) => self.handle_option(opt),
            None => self.handle_unknown_token(token),
        }
    }

    /// `--L=V`, `-L=V`, `--l=V`, `-l=V`
    fn handle_long_option_with_equal(&mut self, token: &str) -> Result<()> {
        let Some((name, value)) = token.split_once('=') else {
            return self.handle_long_option_without_equal(token);
        };
        if util::strip_leading_hyphens(name).is_empty() {
            return self.handle_unknown_token(token);
        }
        match self.resolve_long(name)? {
            Some(opt) if opt.accepts_more_values() => {
                self.handle_option_with_values(opt, &[value])
            }
            _ => self.handle_unknown_token(token),
        }
    }

    /// Every single-dash token: `-S`, `-SV`, `-S=V`, `-SV1=V2`, `-S1S2`,
    /// `-L`, `-LV`, `-L=V`.
    fn handle_short_and_long_option(&mut self, hyphen_token: &str) -> Result<()> {
        let options = self.options;
        let token = util::strip_leading_hyphens(hyphen_token);

        if token.chars().count() == 1 {
            return match options.find_short(token) {
                Some(opt) => self.handle_option(opt),
                None => self.handle_unknown_token(hyphen_token),
            };
        }

        match token.split_once('=') {
            None => {
                if let Some(opt) = options.find_short(token) {
                    return self.handle_option(opt);
                }
                if !options.matching_long_names(token).is_empty() {
                    return self.handle_long_option_without_equal(hyphen_token);
                }
                if let Some(prefix) = self.long_prefix(token)
                    && let Some(opt) = options.find_long(prefix)
                    && opt.accepts_more_values()
                {
                    return self.handle_option_with_values(opt, &[&token[prefix.len()..]]);
                }
                if let Some(opt) = self.property_option(token) {
                    let rest = after_first_char(token);
                    return self.handle_option_with_values(opt, &[rest]);
                }
                self.handle_concatenated_options(hyphen_token)
            }
            Some((name, value)) => {
                if name.chars().count() == 1 {
                    return match options.find_short(name) {
                        Some(opt) if opt.accepts_more_values() => {
                            self.handle_option_with_values(opt, &[value])
                        }
                        _ => self.handle_unknown_token(hyphen_token),
                    };
                }
                if let Some(opt) = self.property_option(name) {
                    let rest = after_first_char(name);
                    return self.handle_option_with_values(opt, &[rest, value]);
                }
                self.handle_long_option_with_equal(hyphen_token)
            }
        }
    }

    /// Burst `-abc` into `-a -b -c`.
    ///
    /// Every character must be a registered short name. The first option
    /// that takes a value consumes the rest of the token as that value.
    /// Nothing is matched unless the whole token resolves.
    fn handle_concatenated_options(&mut self, token: &str) -> Result<()> {
        let options = self.options;
        let body = &token[1..];
        let mut burst: Vec<&'r Opt> = Vec::new();
        let mut inline_value = None;
        for (i, c) in body.char_indices() {
            let end = i + c.len_utf8();
            let Some(opt) = options.find_short(&body[i..end]) else {
                return self.handle_unknown_token(token);
            };
            burst.push(opt);
            let rest = &body[end..];
            if opt.accepts_more_values() && !rest.is_empty() {
                inline_value = Some(rest);
                break;
            }
        }
        for opt in burst {
            self.handle_option(opt)?;
        }
        if let Some(value) = inline_value {
            self.process_current(value)?;
        }
        Ok(())
    }

    /// Longest registered long name that prefixes `name` (hyphens already
    /// removed) and leaves at least two characters behind (`Xmx` in
    /// `Xmx512m`).
    fn long_prefix<'t>(&self, name: &'t str) -> Option<&'t str> {
        let bounds: Vec<usize> = name.char_indices().map(|(i, _)| i).collect();
        let n = bounds.len();
        if n < 4 {
            return None;
        }
        (2..=n - 2)
            .rev()
            .map(|i| &name[..bounds[i]])
            .find(|prefix| self.options.has_long(prefix))
    }

    /// The option addressed by the first character of `token` when that
    /// option collects two or more values (`-Dkey=value`).
    fn property_option(&self, token: &str) -> Option<&'r Opt> {
        let options = self.options;
        let first = token.chars().next()?;
        options
            .find_short(&token[..first.len_utf8()])
            .filter(|opt| opt.arg_count().is_multi())
    }

    fn is_long_option(&self, token: &str) -> bool {
        if !token.starts_with('-') || token.chars().count() == 1 {
            return false;
        }
        let name = token.split_once('=').map_or(token, |(name, _)| name);
        if !self.options.matching_long_names(name).is_empty() {
            return true;
        }
        !token.starts_with("--") && self.long_prefix(&token[1..]).is_some()
    }

    fn is_short_option(&self, token: &str) -> bool {
        if !token.starts_with('-') || token.chars().count() == 1 {
            return false;
        }
        let body = &token[1..];
        let name = body.split_once('=').map_or(body, |(name, _)| name);
        if self.options.has_short(name) {
            return true;
        }
        name.chars()
            .next()
            .is_some_and(|c| self.options.has_short(&name[..c.len_utf8()]))
    }

    /// Whether `token` can be taken as a value: anything that does not look
    /// like an option, and any number.
    fn is_argument(&self, token: &str) -> bool {
        !(self.is_long_option(token) || self.is_short_option(token)) || util::is_number(token)
    }
}

fn after_first_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}
