//! The interactive shell over three sets named X, Y and Z.
//!
//! A session reads one command per line, runs it against the sets and prints
//! all three of them afterwards:
//!
//! ```text
//! X 5,3,8,3
//! X: 3 5 8
//! Y: null
//! Z: null
//! ```
//!
//! See [`MENU`] for the command list and [`Lambda`] for the expression
//! language accepted by `l`.

mod command;
mod error;
mod expr;
mod repl;
mod session;

pub use command::{Command, SetName};
pub use error::CalcError;
pub use expr::{ExprError, Lambda};
pub use repl::{MENU, Repl, ReplOptions};
pub use session::{Calculator, Flow};
