//! Usage lines and option tables, word-wrapped to a fixed width.
//!
//! Rendering is pure: every method returns a `String` and the formatter
//! itself is never mutated, so one formatter can be shared freely.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::option::Opt;
use crate::options::Options;
use crate::util;

pub const DEFAULT_WIDTH: usize = 74;
pub const DEFAULT_LEFT_PAD: usize = 1;
pub const DEFAULT_DESC_PAD: usize = 3;
pub const DEFAULT_SYNTAX_PREFIX: &str = "Usage: ";
pub const DEFAULT_OPT_PREFIX: &str = "-";
pub const DEFAULT_LONG_OPT_PREFIX: &str = "--";
pub const DEFAULT_ARG_NAME: &str = "ARG";

/// Ordering applied to options before they are rendered.
pub type OptionComparator = fn(&Opt, &Opt) -> Ordering;

/// Case-insensitive ordering by option key.
pub fn compare_by_key(a: &Opt, b: &Opt) -> Ordering {
    a.key().to_lowercase().cmp(&b.key().to_lowercase())
}

/// Layout settings for help output.
#[derive(Debug, Clone)]
pub struct HelpFormatter {
    width: usize,
    left_pad: usize,
    desc_pad: usize,
    syntax_prefix: String,
    opt_prefix: String,
    long_opt_prefix: String,
    arg_name: String,
    new_line: String,
    comparator: Option<OptionComparator>,
}

impl Default for HelpFormatter {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            left_pad: DEFAULT_LEFT_PAD,
            desc_pad: DEFAULT_DESC_PAD,
            syntax_prefix: DEFAULT_SYNTAX_PREFIX.to_string(),
            opt_prefix: DEFAULT_OPT_PREFIX.to_string(),
            long_opt_prefix: DEFAULT_LONG_OPT_PREFIX.to_string(),
            arg_name: DEFAULT_ARG_NAME.to_string(),
            new_line: "\n".to_string(),
            comparator: Some(compare_by_key),
        }
    }
}

impl HelpFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_left_pad(mut self, left_pad: usize) -> Self {
        self.left_pad = left_pad;
        self
    }

    pub fn with_desc_pad(mut self, desc_pad: usize) -> Self {
        self.desc_pad = desc_pad;
        self
    }

    pub fn with_syntax_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.syntax_prefix = prefix.into();
        self
    }

    pub fn with_opt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.opt_prefix = prefix.into();
        self
    }

    pub fn with_long_opt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.long_opt_prefix = prefix.into();
        self
    }

    /// Placeholder used for options that take a value but have no name
    /// for it.
    pub fn with_arg_name(mut self, arg_name: impl Into<String>) -> Self {
        self.arg_name = arg_name.into();
        self
    }

    pub fn with_new_line(mut self, new_line: impl Into<String>) -> Self {
        self.new_line = new_line.into();
        self
    }

    /// `None` keeps registration order.
    pub fn with_comparator(mut self, comparator: Option<OptionComparator>) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn left_pad(&self) -> usize {
        self.left_pad
    }

    pub fn desc_pad(&self) -> usize {
        self.desc_pad
    }

    fn sorted<'o>(&self, options: &'o Options) -> Vec<&'o Opt> {
        let mut opts: Vec<&Opt> = options.iter().collect();
        if let Some(cmp) = self.comparator {
            opts.sort_by(|a, b| cmp(a, b));
        }
        opts
    }

    fn arg_label(&self, opt: &Opt) -> String {
        opt.display_arg_name()
            .unwrap_or_else(|| self.arg_name.clone())
    }

    /// One-line usage generated from the registry, e.g.
    /// `Usage: app [-a] [-f <FILE>] [--verbose]`.
    ///
    /// Continuation lines are indented past the first space.
    pub fn render_usage(&self, width: usize, app: &str, options: &Options) -> String {
        let mut buff = format!("{}{} ", self.syntax_prefix, app);
        let items: Vec<String> = self
            .sorted(options)
            .into_iter()
            .map(|opt| self.usage_item(opt))
            .collect();
        buff.push_str(&items.join(" "));

        let tab_stop = buff
            .find(' ')
            .map(|pos| buff[..pos].chars().count() + 1)
            .unwrap_or(0);
        self.render_wrapped(width, tab_stop, &buff)
    }

    fn usage_item(&self, opt: &Opt) -> String {
        let mut item = String::from("[");
        match opt.short() {
            Some(short) => {
                item.push_str(&self.opt_prefix);
                item.push_str(short);
            }
            None => {
                item.push_str(&self.long_opt_prefix);
                item.push_str(opt.key());
            }
        }
        if opt.has_arg() {
            let label = self.arg_label(opt);
            if !label.is_empty() {
                item.push_str(&format!(" <{label}>"));
            }
        }
        item.push(']');
        item
    }

    /// Usage line for a caller-supplied syntax string.
    pub fn render_syntax_usage(&self, width: usize, syntax: &str) -> String {
        let arg_pos = syntax
            .find(' ')
            .map(|pos| syntax[..pos].chars().count() + 1)
            .unwrap_or(0);
        let tab_stop = self.syntax_prefix.chars().count() + arg_pos;
        self.render_wrapped(width, tab_stop, &format!("{}{}", self.syntax_prefix, syntax))
    }

    /// Two-column options table.
    ///
    /// The left column holds `-s, --long <ARG>` padded to the widest entry;
    /// descriptions start `desc_pad` columns after it and wrap back to that
    /// column.
    pub fn render_options(
        &self,
        width: usize,
        options: &Options,
        left_pad: usize,
        desc_pad: usize,
    ) -> String {
        let lpad = " ".repeat(left_pad);
        let dpad = " ".repeat(desc_pad);
        let opts = self.sorted(options);

        let prefixes: Vec<String> = opts
            .iter()
            .map(|opt| self.table_prefix(opt, &lpad))
            .collect();
        let max = prefixes
            .iter()
            .map(|p| p.chars().count())
            .max()
            .unwrap_or(0);
        let tab_stop = max + desc_pad;

        let mut out = String::new();
        for (i, (opt, prefix)) in opts.iter().zip(&prefixes).enumerate() {
            let mut row = prefix.clone();
            row.push_str(&" ".repeat(max - prefix.chars().count()));
            row.push_str(&dpad);
            if let Some(desc) = opt.description() {
                row.push_str(desc);
            }
            self.append_wrapped_text(&mut out, width, tab_stop, &row);
            if i + 1 < opts.len() {
                out.push_str(&self.new_line);
            }
        }
        out
    }

    fn table_prefix(&self, opt: &Opt, lpad: &str) -> String {
        let mut prefix = lpad.to_string();
        match opt.short() {
            Some(short) => {
                prefix.push_str(&self.opt_prefix);
                prefix.push_str(short);
                if let Some(long) = opt.long() {
                    prefix.push_str(", ");
                    prefix.push_str(&self.long_opt_prefix);
                    prefix.push_str(long);
                }
            }
            None => {
                prefix.push_str("   ");
                prefix.push_str(&self.long_opt_prefix);
                prefix.push_str(opt.key());
            }
        }
        if opt.has_arg() {
            let label = self.arg_label(opt);
            if !label.is_empty() {
                prefix.push_str(&format!(" <{label}>"));
            }
        }
        prefix
    }

    /// Wrap every line of `text` to `width`, indenting continuation lines
    /// by `next_line_tab_stop` columns.
    pub fn render_wrapped(&self, width: usize, next_line_tab_stop: usize, text: &str) -> String {
        let mut out = String::new();
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                out.push_str(&self.new_line);
            }
            self.append_wrapped_text(&mut out, width, next_line_tab_stop, line);
        }
        out
    }

    fn append_wrapped_text(&self, out: &mut String, width: usize, tab_stop: usize, text: &str) {
        let width = width.max(1);
        let mut render: Vec<char> = text.chars().collect();

        let Some(mut pos) = wrap_pos(&render, width, 0) else {
            out.push_str(util::rtrim(text));
            return;
        };
        out.push_str(util::rtrim(&collect(&render[..pos])));
        out.push_str(&self.new_line);

        // The padding must leave room for at least one character of text.
        let tab_stop = if tab_stop >= width {
            1.min(width - 1)
        } else {
            tab_stop
        };
        let padding = " ".repeat(tab_stop);

        loop {
            let rest = collect(&render[pos..]);
            render = format!("{padding}{}", rest.trim()).chars().collect();
            match wrap_pos(&render, width, 0) {
                None => {
                    out.push_str(&collect(&render));
                    return;
                }
                Some(found) => {
                    pos = found;
                    if render.len() > width && tab_stop.checked_sub(1) == Some(pos) {
                        pos = width;
                    }
                    out.push_str(util::rtrim(&collect(&render[..pos])));
                    out.push_str(&self.new_line);
                }
            }
        }
    }

    /// Full help screen: usage, optional header, options table and optional
    /// footer, each terminated by a newline.
    pub fn render_help(&self, request: &HelpRequest<'_>) -> Result<String> {
        if request.syntax.is_empty() {
            return Err(Error::MissingSyntax);
        }
        let mut out = if request.auto_usage {
            self.render_usage(self.width, request.syntax, request.options)
        } else {
            self.render_syntax_usage(self.width, request.syntax)
        };
        out.push_str(&self.new_line);

        if let Some(header) = request.header.filter(|h| !h.trim().is_empty()) {
            out.push_str(&self.render_wrapped(self.width, 0, header));
            out.push_str(&self.new_line);
        }

        out.push_str(&self.render_options(
            self.width,
            request.options,
            self.left_pad,
            self.desc_pad,
        ));
        out.push_str(&self.new_line);

        if let Some(footer) = request.footer.filter(|f| !f.trim().is_empty()) {
            out.push_str(&self.render_wrapped(self.width, 0, footer));
            out.push_str(&self.new_line);
        }
        Ok(out)
    }
}

/// Inputs of [`HelpFormatter::render_help`].
///
/// With `auto_usage` the usage line lists every option after `syntax`;
/// otherwise `syntax` is printed as given.
#[derive(Debug, Clone, Copy)]
pub struct HelpRequest<'a> {
    pub syntax: &'a str,
    pub header: Option<&'a str>,
    pub options: &'a Options,
    pub footer: Option<&'a str>,
    pub auto_usage: bool,
}

impl<'a> HelpRequest<'a> {
    pub fn new(syntax: &'a str, options: &'a Options) -> Self {
        Self {
            syntax,
            header: None,
            options,
            footer: None,
            auto_usage: false,
        }
    }

    pub fn header(mut self, header: &'a str) -> Self {
        self.header = Some(header);
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn auto_usage(mut self, auto_usage: bool) -> Self {
        self.auto_usage = auto_usage;
        self
    }
}

/// Position at which `text` should be wrapped, looking at most `width`
/// characters past `start`. Positions are in characters.
///
/// Returns the position just after the first newline or tab inside the
/// window, else the last space at or before `start + width`, else
/// `start + width` itself. `None` means the remainder fits.
pub fn find_wrap_pos(text: &str, width: usize, start: usize) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();
    wrap_pos(&chars, width, start)
}

fn wrap_pos(text: &[char], width: usize, start: usize) -> Option<usize> {
    let limit = start + width;
    for marker in ['\n', '\t'] {
        let found = text
            .iter()
            .skip(start)
            .position(|&c| c == marker)
            .map(|p| p + start);
        if let Some(pos) = found
            && pos <= limit
        {
            return Some(pos + 1);
        }
    }
    if limit >= text.len() {
        return None;
    }

    let space = (start..=limit)
        .rev()
        .find(|&p| matches!(text[p], ' ' | '\n' | '\r'));
    if let Some(pos) = space
        && pos > start
    {
        return Some(pos);
    }
    Some(limit)
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}
