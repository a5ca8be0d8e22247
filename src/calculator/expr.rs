//! The integer expression language of the `l` command.
//!
//! A lambda takes one integer parameter and evaluates an arithmetic body:
//!
//! ```text
//! lambda  := '{' '|' IDENT '|' expr '}'
//!          | '|' IDENT '|' expr
//!          | expr                      (parameter is `x`)
//! expr    := prefix (BINOP expr)*      (precedence climbing)
//! prefix  := '-' prefix | '+' prefix | atom
//! atom    := INT | IDENT | '(' expr ')'
//! ```
//!
//! | operator      | precedence | associativity |
//! |---------------|------------|---------------|
//! | `**`          | 4          | right         |
//! | unary `-` `+` | 3          | -             |
//! | `*` `/` `%`   | 2          | left          |
//! | `+` `-`       | 1          | left          |
//!
//! Arithmetic is checked `i64`. Division and remainder are floored: the
//! quotient rounds toward negative infinity and the remainder takes the sign
//! of the divisor, so `-7 / 2 == -4` and `-7 % 2 == 1`.
//!
//! Bodies are compiled once into a postfix program and evaluated with an
//! explicit operand stack.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

/// Maximum nesting of parentheses, prefix operators and `**` chains.
const MAX_NESTING: usize = 128;

/// Parameter name of a lambda written without a `|name|` header.
const IMPLICIT_PARAM: &str = "x";

/// Errors from compiling or evaluating a lambda expression.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ExprError {
    /// A character that starts no token.
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset in the source.
        offset: usize,
    },

    /// A token where something else was required.
    #[error("unexpected {found} at offset {offset}, expected {expected}")]
    Unexpected {
        /// Description of the token found.
        found: String,
        /// Description of what would have been accepted.
        expected: &'static str,
        /// Byte offset in the source.
        offset: usize,
    },

    /// The source ended early.
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEof {
        /// Description of what would have been accepted.
        expected: &'static str,
    },

    /// An identifier other than the lambda parameter.
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    /// An integer literal that does not fit in `i64`.
    #[error("integer literal `{0}` is out of range")]
    LiteralOutOfRange(String),

    /// Nesting deeper than the parser accepts.
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),

    /// Division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A result outside the `i64` range.
    #[error("integer overflow")]
    Overflow,

    /// `**` with a negative exponent.
    #[error("negative exponent {0}")]
    NegativeExponent(i64),
}

type ExprResult<T> = Result<T, ExprError>;

#[derive(Clone, Debug, Eq, PartialEq)]
enum TokenKind {
    Int(i64),
    Ident(String),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Pipe,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(value) => write!(f, "integer `{value}`"),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Plus => f.write_str("`+`"),
            TokenKind::Minus => f.write_str("`-`"),
            TokenKind::Star => f.write_str("`*`"),
            TokenKind::StarStar => f.write_str("`**`"),
            TokenKind::Slash => f.write_str("`/`"),
            TokenKind::Percent => f.write_str("`%`"),
            TokenKind::LParen => f.write_str("`(`"),
            TokenKind::RParen => f.write_str("`)`"),
            TokenKind::LBrace => f.write_str("`{`"),
            TokenKind::RBrace => f.write_str("`}`"),
            TokenKind::Pipe => f.write_str("`|`"),
        }
    }
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn tokenize(src: &str) -> ExprResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let kind = match ch {
            c if c.is_whitespace() => continue,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => {
                if chars.next_if(|&(_, c)| c == '*').is_some() {
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                }
            }
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '|' => TokenKind::Pipe,
            c if c.is_ascii_digit() => {
                let mut end = offset + c.len_utf8();
                while let Some((at, c)) = chars.next_if(|&(_, c)| c.is_ascii_digit() || c == '_') {
                    end = at + c.len_utf8();
                }
                let text = &src[offset..end];
                let digits: String = text.chars().filter(|&c| c != '_').collect();
                let value = digits.parse().map_err(|_| ExprError::LiteralOutOfRange(text.to_owned()))?;
                TokenKind::Int(value)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = offset + c.len_utf8();
                while let Some((at, c)) = chars.next_if(|&(_, c)| c.is_alphanumeric() || c == '_') {
                    end = at + c.len_utf8();
                }
                TokenKind::Ident(src[offset..end].to_owned())
            }
            ch => return Err(ExprError::UnexpectedChar { ch, offset }),
        };
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Assoc {
    Left,
    Right,
}

/// Binding power of prefix `-` and `+`: above `*`, below `**`.
const PREFIX_PREC: u8 = 3;

impl BinOp {
    fn from_token(kind: &TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Percent => BinOp::Rem,
            TokenKind::StarStar => BinOp::Pow,
            _ => return None,
        })
    }

    fn info(self) -> (u8, Assoc) {
        match self {
            BinOp::Add | BinOp::Sub => (1, Assoc::Left),
            BinOp::Mul | BinOp::Div | BinOp::Rem => (2, Assoc::Left),
            BinOp::Pow => (4, Assoc::Right),
        }
    }

    fn eval(self, lhs: i64, rhs: i64) -> ExprResult<i64> {
        match self {
            BinOp::Add => lhs.checked_add(rhs).ok_or(ExprError::Overflow),
            BinOp::Sub => lhs.checked_sub(rhs).ok_or(ExprError::Overflow),
            BinOp::Mul => lhs.checked_mul(rhs).ok_or(ExprError::Overflow),
            BinOp::Div => floor_div(lhs, rhs),
            BinOp::Rem => floor_rem(lhs, rhs),
            BinOp::Pow => {
                if rhs < 0 {
                    return Err(ExprError::NegativeExponent(rhs));
                }
                let exponent = u32::try_from(rhs).map_err(|_| ExprError::Overflow)?;
                lhs.checked_pow(exponent).ok_or(ExprError::Overflow)
            }
        }
    }
}

fn floor_div(lhs: i64, rhs: i64) -> ExprResult<i64> {
    if rhs == 0 {
        return Err(ExprError::DivisionByZero);
    }
    let quotient = lhs.checked_div(rhs).ok_or(ExprError::Overflow)?;
    if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

fn floor_rem(lhs: i64, rhs: i64) -> ExprResult<i64> {
    if rhs == 0 {
        return Err(ExprError::DivisionByZero);
    }
    // `i64::MIN % -1` overflows in hardware but is mathematically zero.
    let remainder = lhs.checked_rem(rhs).unwrap_or(0);
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        Ok(remainder + rhs)
    } else {
        Ok(remainder)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Op {
    Push(i64),
    Param,
    Neg,
    Binary(BinOp),
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    param: &'a str,
    depth: usize,
    program: Vec<Op>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            param: IMPLICIT_PARAM,
            depth: 0,
            program: Vec::new(),
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.current()?;
        self.pos += 1;
        Some(token)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.current().is_some_and(|token| token.kind == *kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> ExprResult<()> {
        match self.current() {
            Some(token) if token.kind == *kind => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(unexpected(token, expected)),
            None => Err(ExprError::UnexpectedEof { expected }),
        }
    }

    fn expect_end(&self) -> ExprResult<()> {
        match self.current() {
            Some(token) => Err(unexpected(token, "end of expression")),
            None => Ok(()),
        }
    }

    /// Parses a whole lambda, header included.
    fn parse_lambda(mut self) -> ExprResult<(String, Vec<Op>)> {
        let braced = self.eat(&TokenKind::LBrace);
        if braced || self.check(&TokenKind::Pipe) {
            self.expect(&TokenKind::Pipe, "`|`")?;
            self.param = self.parse_param()?;
            self.expect(&TokenKind::Pipe, "`|`")?;
        }

        self.parse_infix(0)?;

        if braced {
            self.expect(&TokenKind::RBrace, "`}`")?;
        }
        self.expect_end()?;
        Ok((self.param.to_owned(), self.program))
    }

    fn parse_param(&mut self) -> ExprResult<&'a str> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name.as_str()),
            Some(token) => Err(unexpected(token, "parameter name")),
            None => Err(ExprError::UnexpectedEof {
                expected: "parameter name",
            }),
        }
    }

    fn enter(&mut self) -> ExprResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ExprError::TooDeep(MAX_NESTING));
        }
        Ok(())
    }

    /// Precedence climbing; emits the operand(s) and then the operator.
    fn parse_infix(&mut self, min_prec: u8) -> ExprResult<()> {
        self.enter()?;
        self.parse_prefix()?;

        while let Some(op) = self.current().and_then(|token| BinOp::from_token(&token.kind)) {
            let (prec, assoc) = op.info();
            if prec < min_prec {
                break;
            }
            self.pos += 1;
            let next_min = match assoc {
                Assoc::Left => prec + 1,
                Assoc::Right => prec,
            };
            self.parse_infix(next_min)?;
            self.program.push(Op::Binary(op));
        }

        self.depth -= 1;
        Ok(())
    }

    fn parse_prefix(&mut self) -> ExprResult<()> {
        if self.eat(&TokenKind::Minus) {
            self.parse_infix(PREFIX_PREC)?;
            self.program.push(Op::Neg);
            return Ok(());
        }
        if self.eat(&TokenKind::Plus) {
            return self.parse_infix(PREFIX_PREC);
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> ExprResult<()> {
        let Some(token) = self.advance() else {
            return Err(ExprError::UnexpectedEof { expected: "operand" });
        };

        match &token.kind {
            TokenKind::Int(value) => self.program.push(Op::Push(*value)),
            TokenKind::Ident(name) if name == self.param => self.program.push(Op::Param),
            TokenKind::Ident(name) => return Err(ExprError::UnknownVariable(name.clone())),
            TokenKind::LParen => {
                self.parse_infix(0)?;
                self.expect(&TokenKind::RParen, "`)`")?;
            }
            _ => return Err(unexpected(token, "operand")),
        }
        Ok(())
    }
}

fn unexpected(token: &Token, expected: &'static str) -> ExprError {
    ExprError::Unexpected {
        found: token.kind.to_string(),
        expected,
        offset: token.offset,
    }
}

/// A compiled one-parameter integer function.
///
/// # Examples
///
/// ```
/// use bst_calc::calculator::Lambda;
///
/// let double = Lambda::compile("{|x| x * 2}").unwrap();
/// assert_eq!(double.call(21), Ok(42));
///
/// let shifted = Lambda::compile("|n| (n - 1) ** 2").unwrap();
/// assert_eq!(shifted.call(4), Ok(9));
///
/// assert_eq!(Lambda::compile("x % 3").unwrap().call(-1), Ok(2));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lambda {
    source: String,
    param: String,
    program: Vec<Op>,
}

impl Lambda {
    /// Compiles `source`, reporting syntax errors and unknown variables
    /// before anything is evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntactic error found.
    pub fn compile(source: &str) -> Result<Lambda, ExprError> {
        let tokens = tokenize(source)?;
        let (param, program) = Parser::new(&tokens).parse_lambda()?;
        log::debug!("compiled `{source}` into {} ops", program.len());
        Ok(Lambda {
            source: source.trim().to_owned(),
            param,
            program,
        })
    }

    /// The expression text, as given.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The name the body uses for its argument.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Evaluates the body with the parameter bound to `arg`.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::DivisionByZero`], [`ExprError::Overflow`] or
    /// [`ExprError::NegativeExponent`] when the arithmetic fails.
    pub fn call(&self, arg: i64) -> Result<i64, ExprError> {
        let mut stack: SmallVec<[i64; 16]> = SmallVec::new();

        for op in &self.program {
            let value = match *op {
                Op::Push(value) => value,
                Op::Param => arg,
                Op::Neg => pop(&mut stack).checked_neg().ok_or(ExprError::Overflow)?,
                Op::Binary(op) => {
                    let rhs = pop(&mut stack);
                    let lhs = pop(&mut stack);
                    op.eval(lhs, rhs)?
                }
            };
            stack.push(value);
        }

        Ok(pop(&mut stack))
    }
}

fn pop(stack: &mut SmallVec<[i64; 16]>) -> i64 {
    stack.pop().expect("`Lambda::call()` - compiled program is unbalanced!")
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
