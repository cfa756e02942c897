/// An error type for malformed predicate expressions.
#[derive(Debug)]
pub enum Error {
    /// The input ended where an expression was expected.
    ExpectedExpression,
    /// A `)` appeared without a matching `(`.
    NoBeginningParen,
    /// A `(` was never closed.
    MissingClosingParen,
    /// A `(` was immediately followed by `)`.
    EmptyInnerExpression,
    /// A `!` appeared at the end of the input.
    NoFollowingExpression,
    /// A binary operator (`-a`, `-o`) appeared where a factor was expected.
    NoExpressionBefore(String),
    /// A binary operator (`-a`, `-o`) had nothing usable after it.
    NoExpressionAfter(String),
    /// A token matched none of the registered primaries.
    UnknownPredicate(String),
    /// A primary was given fewer arguments than it needs.
    MissingArgument(String),
    /// A `-name`/`-path` glob could not be translated into a regex.
    InvalidGlob { glob: String, error: regex::Error },
    ExpectedOpeningBracket,
    ExpectedClosingBracket,
    /// `[*` or `[?` followed by something other than `]`.
    ExpectedClosingBracketAfter(char),
    ExpectedArrayPredicateType,
    ExpectedArrayIndex,
    /// Leftover characters in the token after a `]`.
    ExpectedDotOrBracket(String),
    /// A bracket or key segment with no predicate after it.
    ExpectedPredicateAfter(String),
    ExpectedKeyName,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::InvalidGlob { ref error, .. } => Some(error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Error::*;

        match *self {
            ExpectedExpression => write!(fmt, "expected a predicate expression"),
            NoBeginningParen => write!(fmt, "): no beginning '('"),
            MissingClosingParen => write!(fmt, "(: missing closing ')'"),
            EmptyInnerExpression => write!(fmt, "(): empty inner expression"),
            NoFollowingExpression => write!(fmt, "!: no following expression"),
            NoExpressionBefore(ref op) => {
                write!(fmt, "{}: no expression before {}", op, op)
            }
            NoExpressionAfter(ref op) => {
                write!(fmt, "{}: no expression after {}", op, op)
            }
            UnknownPredicate(ref token) => {
                write!(fmt, "unknown predicate {}", token)
            }
            MissingArgument(ref name) => {
                write!(fmt, "{}: requires additional arguments", name)
            }
            InvalidGlob {
                ref glob,
                ref error,
            } => write!(fmt, "{}: invalid glob: {}", glob, error),
            ExpectedOpeningBracket => write!(fmt, "expected an opening '['"),
            ExpectedClosingBracket => write!(fmt, "expected a closing ']'"),
            ExpectedClosingBracketAfter(c) => {
                write!(fmt, "expected a closing ']' after '{}'", c)
            }
            ExpectedArrayPredicateType => write!(
                fmt,
                "expected a '*', '?', or an array index inside '[]'"
            ),
            ExpectedArrayIndex => {
                write!(fmt, "expected an array index inside '[]'")
            }
            ExpectedDotOrBracket(ref rest) => write!(
                fmt,
                "expected a '.' or '[' after ']' but got {} instead",
                rest
            ),
            ExpectedPredicateAfter(ref segment) => {
                write!(fmt, "expected a predicate after {}", segment)
            }
            ExpectedKeyName => write!(fmt, "expected a key name after '.'"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
