//! Predicates and the boolean combinators over them.
//!
//! A predicate is not a single boolean function but a pair of them: `eval`
//! and `eval_negated`. Leaf predicates define both explicitly so that a
//! subject outside of their domain (e.g. a string handed to an array
//! predicate) fails under both polarities. Combinators operate on total
//! booleans and use plain complementation for their negated form.

use std::fmt::Debug;

/// A boolean test over `T` with an explicitly defined negation.
pub trait Predicate<T>: Debug + Send + Sync {
    /// Returns true if `value` satisfies the predicate.
    fn eval(&self, value: &T) -> bool;

    /// Returns true if `value` satisfies the negation of the predicate.
    ///
    /// This is *not* required to be `!self.eval(value)`: both methods return
    /// `false` when the predicate does not apply to `value`.
    fn eval_negated(&self, value: &T) -> bool;
}

/// A compiled predicate expression.
#[derive(Debug)]
pub enum Expr<T> {
    /// A constant (`-true`, `-false` at the entry level).
    Literal(bool),
    /// A named primary, e.g. `-name` or `-meta`.
    Primary {
        name: &'static str,
        predicate: Box<dyn Predicate<T>>,
    },
    /// `! <expr>`.
    Not(Box<Expr<T>>),
    /// `<expr> [-a] <expr>`.
    And(Box<Expr<T>>, Box<Expr<T>>),
    /// `<expr> -o <expr>`.
    Or(Box<Expr<T>>, Box<Expr<T>>),
    /// `( <expr> )`.
    Group(Box<Expr<T>>),
}

impl<T> Expr<T> {
    /// Wraps a leaf predicate as a named primary.
    pub fn primary<P>(name: &'static str, predicate: P) -> Expr<T>
    where
        P: Predicate<T> + 'static,
    {
        Expr::Primary {
            name,
            predicate: Box::new(predicate),
        }
    }

    /// Returns the negation of this expression, i.e. an expression whose
    /// `eval` and `eval_negated` are swapped.
    pub fn negate(self) -> Expr<T> {
        Expr::Not(Box::new(self))
    }

    pub fn eval(&self, value: &T) -> bool {
        match self {
            Expr::Literal(b) => *b,
            Expr::Primary { predicate, .. } => predicate.eval(value),
            Expr::Not(p) => p.eval_negated(value),
            Expr::And(p, q) => p.eval(value) && q.eval(value),
            Expr::Or(p, q) => p.eval(value) || q.eval(value),
            Expr::Group(p) => p.eval(value),
        }
    }

    pub fn eval_negated(&self, value: &T) -> bool {
        match self {
            Expr::Literal(b) => !*b,
            Expr::Primary { predicate, .. } => predicate.eval_negated(value),
            Expr::Not(p) => p.eval(value),
            Expr::And(p, q) => !p.eval(value) || !q.eval(value),
            Expr::Or(p, q) => !p.eval(value) && !q.eval(value),
            Expr::Group(p) => p.eval_negated(value),
        }
    }

    /// Checks whether a primary called `name` occurs anywhere in the
    /// expression.
    pub fn uses_primary(&self, name: &str) -> bool {
        match self {
            Expr::Literal(_) => false,
            Expr::Primary { name: other, .. } => *other == name,
            Expr::Not(p) | Expr::Group(p) => p.uses_primary(name),
            Expr::And(p, q) | Expr::Or(p, q) => {
                p.uses_primary(name) || q.uses_primary(name)
            }
        }
    }
}

impl<T: Debug> Predicate<T> for Expr<T> {
    fn eval(&self, value: &T) -> bool {
        Expr::eval(self, value)
    }

    fn eval_negated(&self, value: &T) -> bool {
        Expr::eval_negated(self, value)
    }
}
