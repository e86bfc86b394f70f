//! Commands that declare their own options and run against the parsed
//! result.

use crate::command_line::CommandLine;
use crate::error::{Error, Result};
use crate::help::{HelpFormatter, HelpRequest};
use crate::option::Opt;
use crate::options::Options;
use crate::parser::Parser;

/// Result of [`Command::launch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// `-h`/`--help` was given; the rendered help text is returned instead of
    /// running the command.
    Help(String),
    Completed,
}

/// A named unit of work with its own option set.
pub trait Command {
    type Error: From<Error>;

    /// Name the command is invoked by.
    fn key(&self) -> &str;

    fn description(&self) -> &str;

    /// Options specific to this command, without the help flag.
    fn options(&self) -> Result<Options> {
        Ok(Options::new())
    }

    fn run(&self, cmd: &CommandLine) -> std::result::Result<(), Self::Error>;

    /// `-h/--help` followed by [`Command::options`].
    ///
    /// Fails with [`Error::DuplicateKey`] when the command defines its own
    /// `h` or `help`.
    fn default_options(&self) -> Result<Options> {
        let mut options = Options::new();
        options.add(
            Opt::builder("h")
                .long("help")
                .description("Print usage")
                .build()?,
        )?;
        options.add_many(&self.options()?)?;
        Ok(options)
    }

    /// Parse `args` against [`Command::default_options`], then either render
    /// help or run the command.
    fn launch<I, S>(&self, program: &str, args: I) -> std::result::Result<Launch, Self::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let options = self.default_options()?;
        let cmd = Parser::new(&options).parse(args)?;
        if cmd.has_option("help") {
            let syntax = format!("{program} {} [OPTIONS]", self.key());
            let request = HelpRequest::new(&syntax, &options).header(self.description());
            let text = HelpFormatter::new().render_help(&request)?;
            return Ok(Launch::Help(text));
        }
        tracing::debug!(command = self.key(), "running command");
        self.run(&cmd)?;
        Ok(Launch::Completed)
    }
}
