use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::expr::ExprError;

/// Errors raised while reading, parsing or executing calculator commands.
#[derive(Debug, Error)]
pub enum CalcError {
    /// The line does not start with a known command keyword.
    #[error("Invalid command")]
    InvalidCommand(String),

    /// A command that takes an argument was given none.
    #[error("command `{0}` needs an argument")]
    MissingArgument(&'static str),

    /// A set literal or `a` argument is not an `i64`.
    #[error("invalid integer `{0}`")]
    InvalidInteger(String),

    /// The `l` expression failed to compile or to evaluate.
    #[error(transparent)]
    Expr(#[from] ExprError),

    /// The command script could not be opened.
    #[error("cannot open `{}`: {source}", path.display())]
    Open {
        /// The script path given on the command line.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// Reading commands or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl CalcError {
    /// Returns `true` if the session cannot go on after this error.
    ///
    /// Everything except I/O failures is reported to the user and the
    /// calculator keeps reading commands.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, CalcError::Open { .. } | CalcError::Io(_))
    }
}
