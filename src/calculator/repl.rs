use std::io::{BufRead, Write};

use super::command::Command;
use super::error::CalcError;
use super::session::{Calculator, Flow};

/// The command summary printed on startup and by `h`.
pub const MENU: &str = "\
----------------- Set Calculator Menu -----------------
X values    - Insert comma-separated integers into set X.
Y values    - Insert comma-separated integers into set Y.
Z values    - Insert comma-separated integers into set Z.
a i         - Insert integer i into set X.
r           - Rotate sets (Y -> X, Z -> Y, X -> Z).
s           - Swap sets X and Y.
u           - Store the union of X and Y into X.
i           - Store the intersection of X and Y into X.
c           - Store a deep copy of X into Y.
l expr      - Apply a lambda to every element of X, e.g. l {|x| x * 2}
p           - Print all sets.
h           - Print this menu.
q           - Quit.
-------------------------------------------------------
Enter your command:
";

/// Settings of an interactive session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplOptions {
    /// Print [`MENU`] before reading the first command.
    pub show_menu: bool,
    /// Write each command line, prefixed with `> `, before its output.
    pub echo: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            show_menu: true,
            echo: false,
        }
    }
}

/// Reads commands line by line and runs them against a [`Calculator`].
///
/// The session ends on `q` or at the end of the input. Bad commands are
/// reported on the output and skipped; only I/O errors stop the loop early.
///
/// # Examples
///
/// ```
/// use bst_calc::{Repl, ReplOptions};
///
/// let options = ReplOptions { show_menu: false, echo: false };
/// let mut out = Vec::new();
/// Repl::new(options).run("X 2,1\nfoo\nq\n".as_bytes(), &mut out)?;
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "X: 1 2\nY: null\nZ: null\n\nInvalid command\nExiting...\n",
/// );
/// # Ok::<(), bst_calc::CalcError>(())
/// ```
#[derive(Debug, Default)]
pub struct Repl {
    options: ReplOptions,
    calculator: Calculator,
}

impl Repl {
    /// Creates a session with three empty sets.
    #[must_use]
    pub fn new(options: ReplOptions) -> Self {
        Self {
            options,
            calculator: Calculator::new(),
        }
    }

    /// The sets as left by the commands run so far.
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Runs commands from `input` until `q` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Io`] if reading `input` or writing `out` fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), CalcError> {
        if self.options.show_menu {
            out.write_all(MENU.as_bytes())?;
        }
        log::info!("session started");

        for line in input.lines() {
            let line = line?;
            if self.options.echo {
                writeln!(out, "> {line}")?;
            }

            match Command::parse(&line).and_then(|command| self.calculator.execute(&command, &mut *out)) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => {
                    log::info!("session ended by quit");
                    return Ok(());
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    log::warn!("rejected `{line}`: {err}");
                    report(&err, out)?;
                }
            }
            out.flush()?;
        }

        log::info!("session ended at end of input");
        Ok(())
    }
}

fn report<W: Write>(err: &CalcError, out: &mut W) -> Result<(), CalcError> {
    match err {
        CalcError::InvalidCommand(_) => writeln!(out, "{err}")?,
        _ => writeln!(out, "Error: {err}")?,
    }
    Ok(())
}
