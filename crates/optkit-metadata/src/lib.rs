//! JSON description of a command and its options.
//!
//! A [`CommandSpec`] is plain data: it can be loaded from a file, checked,
//! and turned into an [`Options`] registry for the parser and the help
//! formatter.
//!
//! ```json
//! {
//!   "name": "greet",
//!   "summary": "Say hello",
//!   "options": [
//!     { "short": "n", "long": "name", "args": 1, "argName": "WHO" },
//!     { "short": "D", "args": "unlimited", "valueSeparator": "=" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use optkit_argparse::{ArgCount, HelpRequest, Opt, OptBuilder, Options};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid command description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid option: {0}")]
    Option(#[from] optkit_argparse::Error),
}

pub type Result<T> = std::result::Result<T, SpecError>;

/// How many values an option takes: a count, or the word `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgsSpec {
    Count(usize),
    Keyword(ArgsKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgsKeyword {
    Unlimited,
}

impl ArgsSpec {
    pub const UNLIMITED: Self = Self::Keyword(ArgsKeyword::Unlimited);

    pub fn to_arg_count(self) -> ArgCount {
        match self {
            Self::Count(0) => ArgCount::Unset,
            Self::Count(n) => ArgCount::Exactly(n),
            Self::Keyword(ArgsKeyword::Unlimited) => ArgCount::Unlimited,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<ArgsSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    #[serde(default)]
    pub optional_arg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_separator: Option<char>,
}

impl OptionSpec {
    pub fn to_option(&self) -> Result<Opt> {
        let mut builder = match (&self.short, &self.long) {
            (Some(short), long) => {
                let builder = Opt::builder(short.as_str());
                match long {
                    Some(long) => builder.long(long.as_str()),
                    None => builder,
                }
            }
            (None, Some(long)) => Opt::long_only(long.as_str()),
            (None, None) => OptBuilder::default(),
        };
        if !self.description.is_empty() {
            builder = builder.description(self.description.as_str());
        }
        if let Some(args) = self.args {
            builder = builder.number_of_args(args.to_arg_count());
        }
        if let Some(arg_name) = &self.arg_name {
            builder = builder.arg_name(arg_name.as_str());
        }
        if let Some(sep) = self.value_separator {
            builder = builder.value_separator(sep);
        }
        Ok(builder.optional_arg(self.optional_arg).build()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    /// Free-form usage syntax. When absent the usage line is generated from
    /// the options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Register `-h/--help` ahead of the declared options.
    #[serde(default)]
    pub help: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
}

impl CommandSpec {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn with_help(mut self) -> Self {
        self.help = true;
        self
    }

    /// Build the option registry, help flag first when enabled.
    pub fn to_options(&self) -> Result<Options> {
        let mut options = Options::new();
        if self.help {
            options.add(help_option()?)?;
        }
        for spec in &self.options {
            options.add(spec.to_option()?)?;
        }
        Ok(options)
    }

    /// Help layout for this command: the declared syntax, or a generated
    /// usage line headed by the command name.
    pub fn help_request<'a>(&'a self, options: &'a Options) -> HelpRequest<'a> {
        let mut request = match &self.syntax {
            Some(syntax) => HelpRequest::new(syntax, options),
            None => HelpRequest::new(&self.name, options).auto_usage(true),
        };
        request = request.header(self.header.as_deref().unwrap_or(&self.summary));
        if let Some(footer) = &self.footer {
            request = request.footer(footer);
        }
        request
    }
}

fn help_option() -> optkit_argparse::Result<Opt> {
    Opt::builder("h")
        .long("help")
        .description("Print usage")
        .build()
}
