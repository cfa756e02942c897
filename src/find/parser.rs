//! Recursive-descent parser for predicate expressions.
//!
//! The grammar is shared by every predicate domain (entries and metadata
//! values); only the set of primaries differs:
//!
//! ```text
//! Expr   := Term ('-o' Term)*
//! Term   := Factor (['-a'] Factor)*
//! Factor := '!' Factor | '(' Expr ')' | Primary
//! ```
//!
//! Parsing threads the remaining tokens through every call. A term ends at
//! the first token that cannot start a factor; outside of a group that token
//! is handed back to the caller unconsumed. A nested parser also hands back
//! `-a`, `-o`, `!` and `(` when they lead to a primary it does not know.

use super::error::{Error, Result};
use super::predicate::Expr;

const AND: &str = "-a";
const OR: &str = "-o";
const NOT: &str = "!";
const OPEN: &str = "(";
const CLOSE: &str = ")";

/// A named test that terminates the grammar.
pub trait Primary<T>: Send + Sync {
    /// Returns true if `token` starts this primary.
    fn is_primary_token(&self, token: &str) -> bool;

    /// Parses the primary from `tokens`, whose first element was accepted by
    /// `is_primary_token`. Returns the unconsumed tokens.
    fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<T>, &'a [String])>;
}

pub struct Parser<'r, T> {
    primaries: &'r [Box<dyn Primary<T>>],
    nested: bool,
}

impl<'r, T> Parser<'r, T> {
    pub fn new(primaries: &'r [Box<dyn Primary<T>>]) -> Parser<'r, T> {
        Parser {
            primaries,
            nested: false,
        }
    }

    /// Creates a parser for an expression embedded in an outer expression,
    /// such as the argument of `-meta`. Outside of groups it stops before an
    /// operator whose operand does not start with one of its own primaries,
    /// leaving the operator to the outer parser.
    pub fn nested(primaries: &'r [Box<dyn Primary<T>>]) -> Parser<'r, T> {
        Parser {
            primaries,
            nested: true,
        }
    }

    /// Parses the longest expression at the start of `tokens`.
    pub fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<T>, &'a [String])> {
        self.parse_or(tokens, self.nested)
    }

    fn parse_or<'a>(
        &self,
        tokens: &'a [String],
        nested: bool,
    ) -> Result<(Expr<T>, &'a [String])> {
        let (mut expr, mut rest) = self.parse_and(tokens, nested)?;
        while let Some((op, after)) = rest.split_first() {
            if op != OR || (nested && !self.starts_operand(after)) {
                break;
            }
            if after.first().map_or(true, |t| t == CLOSE) {
                return Err(Error::NoExpressionAfter(op.clone()));
            }

            let (rhs, after) = self.parse_and(after, nested)?;
            expr = Expr::Or(Box::new(expr), Box::new(rhs));
            rest = after;
        }

        Ok((expr, rest))
    }

    fn parse_and<'a>(
        &self,
        tokens: &'a [String],
        nested: bool,
    ) -> Result<(Expr<T>, &'a [String])> {
        let (mut expr, mut rest) = self.parse_factor(tokens)?;
        loop {
            let next = match rest.split_first() {
                Some((op, after)) if op == AND => {
                    if nested && !self.starts_operand(after) {
                        break;
                    }
                    if after.first().map_or(true, |t| t == CLOSE) {
                        return Err(Error::NoExpressionAfter(op.clone()));
                    }
                    after
                }
                Some(_) if nested => {
                    if !self.starts_operand(rest) {
                        break;
                    }
                    rest
                }
                Some((token, _)) if self.starts_factor(token) => rest,
                _ => break,
            };

            let (rhs, after) = self.parse_factor(next)?;
            expr = Expr::And(Box::new(expr), Box::new(rhs));
            rest = after;
        }

        Ok((expr, rest))
    }

    fn parse_factor<'a>(&self, tokens: &'a [String]) -> Result<(Expr<T>, &'a [String])> {
        let (token, rest) = match tokens.split_first() {
            Some(v) => v,
            None => return Err(Error::ExpectedExpression),
        };

        match token.as_str() {
            NOT => {
                if rest.is_empty() {
                    return Err(Error::NoFollowingExpression);
                }
                let (expr, rest) = self.parse_factor(rest)?;
                Ok((expr.negate(), rest))
            }
            OPEN => self.parse_group(rest),
            CLOSE => Err(Error::NoBeginningParen),
            AND | OR => Err(Error::NoExpressionBefore(token.clone())),
            _ => match self.primary(token) {
                Some(primary) => primary.parse(tokens),
                None => Err(Error::UnknownPredicate(token.clone())),
            },
        }
    }

    /// Parses a parenthesized expression; `tokens` start right after `(`.
    fn parse_group<'a>(&self, tokens: &'a [String]) -> Result<(Expr<T>, &'a [String])> {
        match tokens.first() {
            None => return Err(Error::MissingClosingParen),
            Some(token) if token == CLOSE => {
                return Err(Error::EmptyInnerExpression)
            }
            _ => {}
        }

        let (expr, rest) = self.parse_or(tokens, false)?;
        match rest.split_first() {
            Some((token, rest)) if token == CLOSE => {
                Ok((Expr::Group(Box::new(expr)), rest))
            }
            Some((token, _)) => Err(Error::UnknownPredicate(token.clone())),
            None => Err(Error::MissingClosingParen),
        }
    }

    fn starts_factor(&self, token: &str) -> bool {
        token == NOT || token == OPEN || self.primary(token).is_some()
    }

    /// Returns true if `tokens` start with one of this parser's primaries,
    /// possibly behind `!` and `(`.
    fn starts_operand(&self, tokens: &[String]) -> bool {
        match tokens.split_first() {
            Some((token, rest)) if token == NOT || token == OPEN => {
                self.starts_operand(rest)
            }
            Some((token, _)) => self.primary(token).is_some(),
            None => false,
        }
    }

    fn primary(&self, token: &str) -> Option<&dyn Primary<T>> {
        self.primaries
            .iter()
            .find(|p| p.is_primary_token(token))
            .map(|p| p.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find::predicate::Predicate;

    /// `-t` and `-f` are literals, `-x` tests the subject itself.
    struct Literal(&'static str, bool);

    impl Primary<bool> for Literal {
        fn is_primary_token(&self, token: &str) -> bool {
            token == self.0
        }

        fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<bool>, &'a [String])> {
            Ok((Expr::Literal(self.1), &tokens[1..]))
        }
    }

    #[derive(Debug)]
    struct Subject;

    impl Predicate<bool> for Subject {
        fn eval(&self, value: &bool) -> bool {
            *value
        }

        fn eval_negated(&self, value: &bool) -> bool {
            !*value
        }
    }

    impl Primary<bool> for Subject {
        fn is_primary_token(&self, token: &str) -> bool {
            token == "-x"
        }

        fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<bool>, &'a [String])> {
            Ok((Expr::primary("-x", Subject), &tokens[1..]))
        }
    }

    fn primaries() -> Vec<Box<dyn Primary<bool>>> {
        vec![
            Box::new(Literal("-t", true)),
            Box::new(Literal("-f", false)),
            Box::new(Subject),
        ]
    }

    fn tokens(input: &str) -> Vec<String> {
        input.split_whitespace().map(String::from).collect()
    }

    /// Parses `input` and returns the expression with the unconsumed tokens.
    fn parse(input: &str) -> Result<(Expr<bool>, Vec<String>)> {
        let primaries = primaries();
        let tokens = tokens(input);
        let (expr, rest) = Parser::new(&primaries).parse(&tokens)?;
        Ok((expr, rest.to_vec()))
    }

    /// Like `parse`, with a nested parser.
    fn parse_nested(input: &str) -> Result<(Expr<bool>, Vec<String>)> {
        let primaries = primaries();
        let tokens = tokens(input);
        let (expr, rest) = Parser::nested(&primaries).parse(&tokens)?;
        Ok((expr, rest.to_vec()))
    }

    fn eval(input: &str, value: bool) -> bool {
        let (expr, rest) = parse(input).unwrap();
        assert!(rest.is_empty(), "unconsumed tokens: {:?}", rest);
        expr.eval(&value)
    }

    fn parse_error(input: &str) -> String {
        match parse(input) {
            Ok((expr, _)) => panic!("expected an error, got {:?}", expr),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_primary() {
        assert!(eval("-t", false));
        assert!(!eval("-f", true));
        assert!(eval("-x", true));
        assert!(!eval("-x", false));
    }

    #[test]
    fn test_not() {
        assert!(eval("! -f", false));
        assert!(!eval("! -x", true));
        assert!(eval("! ! -x", true));
    }

    #[test]
    fn test_implicit_and() {
        assert!(eval("-t -x", true));
        assert!(!eval("-t -x", false));
        assert!(!eval("-t -f", true));
    }

    #[test]
    fn test_explicit_and() {
        assert!(eval("-t -a -x", true));
        assert!(!eval("-x -a -f", true));
    }

    #[test]
    fn test_or() {
        assert!(eval("-f -o -x", true));
        assert!(!eval("-f -o -x", false));
        assert!(eval("-f -o -f -o -t", false));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // Parsed as `-t -o (-f -a -f)`.
        assert!(eval("-t -o -f -a -f", false));
        // Parsed as `(-f -a -t) -o -x`.
        assert!(eval("-f -t -o -x", true));
        assert!(!eval("-f -t -o -x", false));
    }

    #[test]
    fn test_group() {
        assert!(!eval("( -t -o -f ) -a -f", true));
        assert!(eval("! ( -f -o -f )", false));
        assert!(eval("( ( -x ) )", true));
    }

    #[test]
    fn test_not_applies_to_factor() {
        // Parsed as `(! -f) -a -x`.
        assert!(!eval("! -f -x", false));
        assert!(eval("! -f -x", true));
    }

    #[test]
    fn test_unknown_token_is_left_unconsumed() {
        let (expr, rest) = parse("-t -x -size 10").unwrap();
        assert!(expr.eval(&true));
        assert_eq!(rest, vec!["-size", "10"]);
    }

    #[test]
    fn test_trailing_close_paren_is_left_unconsumed() {
        let (_, rest) = parse("-t )").unwrap();
        assert_eq!(rest, vec![")"]);
    }

    #[test]
    fn test_no_beginning_paren() {
        assert_eq!(parse_error(")"), "): no beginning '('");
    }

    #[test]
    fn test_missing_closing_paren() {
        assert_eq!(parse_error("("), "(: missing closing ')'");
        assert_eq!(parse_error("( -t"), "(: missing closing ')'");
        assert_eq!(parse_error("( ( -t )"), "(: missing closing ')'");
    }

    #[test]
    fn test_empty_inner_expression() {
        assert_eq!(parse_error("( )"), "(): empty inner expression");
    }

    #[test]
    fn test_unknown_predicate_inside_group() {
        assert_eq!(parse_error("( -t -f -foo"), "unknown predicate -foo");
    }

    #[test]
    fn test_unknown_predicate_in_factor_position() {
        assert_eq!(parse_error("-foo"), "unknown predicate -foo");
        assert_eq!(parse_error("! -foo"), "unknown predicate -foo");
    }

    #[test]
    fn test_operator_errors() {
        assert_eq!(parse_error("-a -t"), "-a: no expression before -a");
        assert_eq!(parse_error("-o"), "-o: no expression before -o");
        assert_eq!(parse_error("-t -a"), "-a: no expression after -a");
        assert_eq!(parse_error("-t -o"), "-o: no expression after -o");
        assert_eq!(parse_error("( -t -o )"), "-o: no expression after -o");
        assert_eq!(parse_error("-t !"), "!: no following expression");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_error(""), "expected a predicate expression");
    }

    #[test]
    fn test_nested_leaves_operators_of_unknown_operands() {
        let (expr, rest) = parse_nested("-x -o -y").unwrap();
        assert!(expr.eval(&true));
        assert_eq!(rest, vec!["-o", "-y"]);

        let (_, rest) = parse_nested("-x -a -y").unwrap();
        assert_eq!(rest, vec!["-a", "-y"]);

        let (_, rest) = parse_nested("-x ! -y").unwrap();
        assert_eq!(rest, vec!["!", "-y"]);

        let (_, rest) = parse_nested("-x -o ! ( ( -y ) )").unwrap();
        assert_eq!(rest, vec!["-o", "!", "(", "(", "-y", ")", ")"]);

        let (_, rest) = parse_nested("-x -o").unwrap();
        assert_eq!(rest, vec!["-o"]);

        let (_, rest) = parse_nested("-x -a )").unwrap();
        assert_eq!(rest, vec!["-a", ")"]);
    }

    #[test]
    fn test_nested_consumes_operators_of_known_operands() {
        let (expr, rest) = parse_nested("-f -o ! ( -f ) -a -x -y").unwrap();
        assert_eq!(rest, vec!["-y"]);
        assert!(expr.eval(&true));
        assert!(!expr.eval(&false));
    }

    #[test]
    fn test_nested_is_strict_inside_groups() {
        let error = |input: &str| match parse_nested(input) {
            Ok((expr, _)) => panic!("expected an error, got {:?}", expr),
            Err(err) => err.to_string(),
        };
        assert_eq!(error("( -x -o -y )"), "unknown predicate -y");
        assert_eq!(error("( -x -a -y )"), "unknown predicate -y");
        assert_eq!(error("( -t -f -foo"), "unknown predicate -foo");
        assert_eq!(error("-t -o ( -x -o )"), "-o: no expression after -o");
    }
}
