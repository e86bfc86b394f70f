//! Error types for registry construction, parsing and help rendering.

use thiserror::Error;

/// Errors raised while building an option registry or parsing arguments.
///
/// Every failure aborts the current operation; the parser never returns a
/// partially filled [`CommandLine`](crate::CommandLine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A `-`-prefixed token matched no registered option.
    #[error("Unrecognized option: {token}")]
    UnrecognizedOption { token: String },

    /// A long-option prefix matched several long names and none exactly.
    #[error("Ambiguous option: '{token}' could be: {}", quote_all(.candidates))]
    AmbiguousOption {
        token: String,
        candidates: Vec<String>,
    },

    /// An option requiring a value reached the end of its scope without one.
    #[error("Missing argument for option: {key}")]
    MissingArgument { key: String },

    /// A value was added to an option that cannot take any more.
    #[error("Cannot add value to option '{key}': list full")]
    ArgumentOverflow { key: String },

    /// A value was given to an option that takes no argument.
    #[error("Option '{key}' does not take an argument")]
    NoArgumentAllowed { key: String },

    /// The same short or long name was registered twice.
    #[error("Duplicate key: {key}")]
    DuplicateKey { key: String },

    /// A short name contains characters that cannot appear in an option.
    #[error("Illegal option name '{name}'")]
    InvalidOptionName { name: String },

    /// An option was built with neither a short nor a long name.
    #[error("Either a short or a long option name must be specified")]
    MissingName,

    /// Help was requested without a command line syntax.
    #[error("Command line syntax not provided")]
    MissingSyntax,
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

fn quote_all(candidates: &[String]) -> String {
    candidates
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_message_lists_candidates() {
        let err = Error::AmbiguousOption {
            token: "--fil".to_string(),
            candidates: vec!["file".to_string(), "filter".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous option: '--fil' could be: 'file', 'filter'"
        );
    }

    #[test]
    fn missing_argument_names_key() {
        let err = Error::MissingArgument {
            key: "f".to_string(),
        };
        assert_eq!(err.to_string(), "Missing argument for option: f");
    }
}
