use std::fmt;

use super::error::CalcError;
use super::expr::Lambda;

/// One of the three sets the calculator works on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SetName {
    X,
    Y,
    Z,
}

impl SetName {
    /// All names, in display order.
    pub const ALL: [SetName; 3] = [SetName::X, SetName::Y, SetName::Z];

    /// Position of the set in the calculator's slots.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            SetName::X => 0,
            SetName::Y => 1,
            SetName::Z => 2,
        }
    }

    const fn keyword(self) -> &'static str {
        match self {
            SetName::X => "X",
            SetName::Y => "Y",
            SetName::Z => "Z",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "X" => Some(SetName::X),
            "Y" => Some(SetName::Y),
            "Z" => Some(SetName::Z),
            _ => None,
        }
    }
}

impl fmt::Display for SetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed calculator command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// `X 1,2,3` - insert literals into a set, keeping what is already there.
    Load {
        /// The set receiving the values.
        set: SetName,
        /// The literals, in input order.
        values: Vec<i64>,
    },
    /// `a i` - insert one value into X.
    Add(i64),
    /// `r` - X takes Y's contents, Y takes Z's, Z takes X's.
    Rotate,
    /// `s` - exchange X and Y.
    Swap,
    /// `u` - X becomes X ∪ Y.
    Union,
    /// `i` - X becomes X ∩ Y.
    Intersect,
    /// `c` - Y becomes a deep copy of X.
    Copy,
    /// `l expr` - print the lambda applied to every element of X.
    Apply(Lambda),
    /// `p` - print the three sets.
    Print,
    /// `h` - print the menu.
    Help,
    /// `q` - leave the calculator.
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// The keyword is everything up to the first whitespace; the rest of the
    /// line, trimmed, is its argument. Commands without an argument ignore
    /// any trailing text.
    ///
    /// # Errors
    ///
    /// [`CalcError::InvalidCommand`] for an unknown keyword (including an
    /// empty line), [`CalcError::MissingArgument`] when `X`/`Y`/`Z`/`a`/`l`
    /// lack one, [`CalcError::InvalidInteger`] and [`CalcError::Expr`] for a
    /// malformed argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::calculator::{Command, SetName};
    ///
    /// assert_eq!(
    ///     Command::parse("Y 3, 1,2").unwrap(),
    ///     Command::Load { set: SetName::Y, values: vec![3, 1, 2] },
    /// );
    /// assert_eq!(Command::parse("a -4").unwrap(), Command::Add(-4));
    /// assert!(Command::parse("w").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Command, CalcError> {
        let line = line.trim();
        let (keyword, arg) = match line.split_once(char::is_whitespace) {
            Some((keyword, arg)) => (keyword, arg.trim()),
            None => (line, ""),
        };

        if let Some(set) = SetName::from_keyword(keyword) {
            let values = parse_values(required(arg, set.keyword())?)?;
            return Ok(Command::Load { set, values });
        }

        Ok(match keyword {
            "a" => Command::Add(parse_integer(required(arg, "a")?)?),
            "r" => Command::Rotate,
            "s" => Command::Swap,
            "u" => Command::Union,
            "i" => Command::Intersect,
            "c" => Command::Copy,
            "l" => Command::Apply(Lambda::compile(required(arg, "l")?)?),
            "p" => Command::Print,
            "h" => Command::Help,
            "q" => Command::Quit,
            _ => return Err(CalcError::InvalidCommand(line.to_owned())),
        })
    }
}

fn required<'a>(arg: &'a str, keyword: &'static str) -> Result<&'a str, CalcError> {
    if arg.is_empty() {
        Err(CalcError::MissingArgument(keyword))
    } else {
        Ok(arg)
    }
}

fn parse_integer(text: &str) -> Result<i64, CalcError> {
    let text = text.trim();
    text.parse().map_err(|_| CalcError::InvalidInteger(text.to_owned()))
}

// Every literal is parsed before the set is touched.
fn parse_values(list: &str) -> Result<Vec<i64>, CalcError> {
    list.split(',').map(parse_integer).collect()
}
