//! Getopt-style option parsing and help rendering.
//!
//! - [`Options`] registers what a command understands (short and long names,
//!   argument counts, value separators).
//! - [`Parser`] turns an argument vector into a [`CommandLine`] holding one
//!   value-bearing copy per matched option plus the leftover arguments.
//! - [`HelpFormatter`] renders usage lines and aligned, word-wrapped option
//!   tables.
//! - [`Command`] ties the three together for a named unit of work.
//!
//! ```
//! use optkit_argparse::{Options, parse};
//!
//! let mut options = Options::new();
//! options
//!     .add_flag("v", Some("verbose"), false, "Chatty output")?
//!     .add_flag("f", Some("file"), true, "Input file")?;
//!
//! let cmd = parse(&options, ["-vf", "in.txt", "rest"])?;
//! assert!(cmd.has_option("verbose"));
//! assert_eq!(cmd.option_value("file"), Some("in.txt"));
//! assert_eq!(cmd.args(), ["rest"]);
//! # Ok::<(), optkit_argparse::Error>(())
//! ```

mod command;
mod command_line;
mod error;
pub mod help;
mod option;
mod options;
mod parser;
pub mod util;

pub use command::{Command, Launch};
pub use command_line::CommandLine;
pub use error::{Error, Result};
pub use help::{HelpFormatter, HelpRequest};
pub use option::{ArgCount, DEFAULT_VALUE_SEPARATOR, Opt, OptBuilder};
pub use options::Options;
pub use parser::{Parser, parse};
