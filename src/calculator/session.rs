use std::io::Write;

use super::command::{Command, SetName};
use super::error::CalcError;
use super::repl::MENU;
use crate::BstSet;

/// What the caller should do after a command ran.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    /// Keep reading commands.
    Continue,
    /// The user asked to quit.
    Quit,
}

/// The three sets X, Y and Z and the commands that act on them.
///
/// Rotation and swapping move whole sets between the three slots; the sets
/// themselves are never modified by it.
///
/// # Examples
///
/// ```
/// use bst_calc::calculator::{Calculator, Command, SetName};
///
/// let mut calc = Calculator::new();
/// let mut out = Vec::new();
/// for line in ["X 1,2,3", "Y 2,3,4", "i"] {
///     calc.execute(&Command::parse(line)?, &mut out)?;
/// }
/// assert_eq!(calc.set(SetName::X).render(), "2 3\n");
/// # Ok::<(), bst_calc::CalcError>(())
/// ```
#[derive(Debug, Default)]
pub struct Calculator {
    sets: [BstSet<i64>; 3],
}

impl Calculator {
    /// Starts with three empty sets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The set currently labelled `name`.
    #[must_use]
    pub fn set(&self, name: SetName) -> &BstSet<i64> {
        &self.sets[name.index()]
    }

    /// Mutable access to the set currently labelled `name`.
    pub fn set_mut(&mut self, name: SetName) -> &mut BstSet<i64> {
        &mut self.sets[name.index()]
    }

    /// Relabels the sets: X takes Y's contents, Y takes Z's and Z takes X's.
    pub fn rotate(&mut self) {
        self.sets.rotate_left(1);
    }

    /// Exchanges X and Y.
    pub fn swap(&mut self) {
        self.sets.swap(SetName::X.index(), SetName::Y.index());
    }

    /// Runs `command` and writes its output to `out`.
    ///
    /// Every command except `h` and `q` ends by printing all three sets.
    ///
    /// # Errors
    ///
    /// [`CalcError::Expr`] when the `l` lambda fails on an element, in which
    /// case nothing is printed and no set changes, and [`CalcError::Io`] when
    /// writing fails.
    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<Flow, CalcError> {
        log::debug!("execute: {command:?}");

        match command {
            Command::Load { set, values } => {
                self.set_mut(*set).extend(values);
            }
            Command::Add(value) => {
                self.set_mut(SetName::X).insert(*value);
            }
            Command::Rotate => self.rotate(),
            Command::Swap => self.swap(),
            Command::Union => {
                let [x, y, _] = &mut self.sets;
                x.union_with(y);
            }
            Command::Intersect => {
                let [x, y, _] = &mut self.sets;
                x.intersect_with(y);
            }
            Command::Copy => {
                let copy = self.set(SetName::X).deep_copy();
                *self.set_mut(SetName::Y) = copy;
            }
            Command::Apply(lambda) => {
                let results = self.set(SetName::X).apply(|&value| lambda.call(value))?;
                let results: Vec<String> = results.iter().map(i64::to_string).collect();
                writeln!(out, "Result of applying the lambda expression: {lambda}: {}", results.join(" "))?;
            }
            Command::Print => {}
            Command::Help => {
                out.write_all(MENU.as_bytes())?;
                return Ok(Flow::Continue);
            }
            Command::Quit => {
                writeln!(out, "Exiting...")?;
                return Ok(Flow::Quit);
            }
        }

        self.print_sets(out)?;
        Ok(Flow::Continue)
    }

    /// Writes `X: ..`, `Y: ..` and `Z: ..` lines followed by an empty line.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn print_sets<W: Write>(&self, out: &mut W) -> Result<(), CalcError> {
        for name in SetName::ALL {
            write!(out, "{name}: {}", self.set(name).render())?;
        }
        writeln!(out)?;
        Ok(())
    }
}
