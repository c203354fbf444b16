//! # Linear expressions
//!
//! The algebra users build constraints from: a `Term` is a coefficient times a variable, an
//! `Expression` an ordered sum of terms plus a constant. The `std::ops` implementations below
//! let expressions be written in mathematical notation over owned and borrowed variables.
//!
//! A variable may appear in several terms of one expression; the solver composes such terms
//! additively when it turns the expression into a row.
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use itertools::Itertools;

use crate::data::linear_program::variable::Variable;

/// A variable scaled by a coefficient.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    variable: Variable,
    coefficient: f64,
}

impl Term {
    pub fn new(variable: Variable, coefficient: f64) -> Self {
        Self { variable, coefficient }
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }
}

/// An ordered sum of terms plus a constant.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    terms: Vec<Term>,
    constant: f64,
}

impl Expression {
    pub fn new(terms: Vec<Term>, constant: f64) -> Self {
        Self { terms, constant }
    }

    pub fn from_constant(constant: f64) -> Self {
        Self { terms: Vec::new(), constant }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::new(variable, 1f64)
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::new(vec![Term::from(variable)], 0f64)
    }
}

impl From<&Variable> for Expression {
    fn from(variable: &Variable) -> Self {
        Expression::from(variable.clone())
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Expression::new(vec![term], 0f64)
    }
}

impl From<f64> for Expression {
    fn from(constant: f64) -> Self {
        Expression::from_constant(constant)
    }
}

// Variable

impl Neg for Variable {
    type Output = Term;

    fn neg(self) -> Term {
        Term::new(self, -1f64)
    }
}

impl Neg for &Variable {
    type Output = Term;

    fn neg(self) -> Term {
        Term::new(self.clone(), -1f64)
    }
}

impl Mul<f64> for Variable {
    type Output = Term;

    fn mul(self, coefficient: f64) -> Term {
        Term::new(self, coefficient)
    }
}

impl Mul<f64> for &Variable {
    type Output = Term;

    fn mul(self, coefficient: f64) -> Term {
        Term::new(self.clone(), coefficient)
    }
}

impl Mul<Variable> for f64 {
    type Output = Term;

    fn mul(self, variable: Variable) -> Term {
        Term::new(variable, self)
    }
}

impl Mul<&Variable> for f64 {
    type Output = Term;

    fn mul(self, variable: &Variable) -> Term {
        Term::new(variable.clone(), self)
    }
}

impl Div<f64> for Variable {
    type Output = Term;

    fn div(self, divisor: f64) -> Term {
        Term::new(self, 1f64 / divisor)
    }
}

impl Div<f64> for &Variable {
    type Output = Term;

    fn div(self, divisor: f64) -> Term {
        Term::new(self.clone(), 1f64 / divisor)
    }
}

impl Add<f64> for Variable {
    type Output = Expression;

    fn add(self, constant: f64) -> Expression {
        Expression::new(vec![Term::from(self)], constant)
    }
}

impl Add<f64> for &Variable {
    type Output = Expression;

    fn add(self, constant: f64) -> Expression {
        self.clone() + constant
    }
}

impl Sub<f64> for Variable {
    type Output = Expression;

    fn sub(self, constant: f64) -> Expression {
        self + -constant
    }
}

impl Sub<f64> for &Variable {
    type Output = Expression;

    fn sub(self, constant: f64) -> Expression {
        self.clone() + -constant
    }
}

impl Add<Variable> for Variable {
    type Output = Expression;

    fn add(self, other: Variable) -> Expression {
        Expression::new(vec![Term::from(self), Term::from(other)], 0f64)
    }
}

impl Add<&Variable> for &Variable {
    type Output = Expression;

    fn add(self, other: &Variable) -> Expression {
        self.clone() + other.clone()
    }
}

impl Sub<Variable> for Variable {
    type Output = Expression;

    fn sub(self, other: Variable) -> Expression {
        Expression::new(vec![Term::from(self), -other], 0f64)
    }
}

impl Sub<&Variable> for &Variable {
    type Output = Expression;

    fn sub(self, other: &Variable) -> Expression {
        self.clone() - other.clone()
    }
}

impl Sub<Variable> for f64 {
    type Output = Expression;

    fn sub(self, variable: Variable) -> Expression {
        Expression::new(vec![-variable], self)
    }
}

impl Sub<&Variable> for f64 {
    type Output = Expression;

    fn sub(self, variable: &Variable) -> Expression {
        self - variable.clone()
    }
}

// Term

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term::new(self.variable, -self.coefficient)
    }
}

impl Mul<f64> for Term {
    type Output = Term;

    fn mul(self, factor: f64) -> Term {
        Term::new(self.variable, self.coefficient * factor)
    }
}

impl Mul<Term> for f64 {
    type Output = Term;

    fn mul(self, term: Term) -> Term {
        term * self
    }
}

impl Div<f64> for Term {
    type Output = Term;

    fn div(self, divisor: f64) -> Term {
        Term::new(self.variable, self.coefficient / divisor)
    }
}

impl Add<f64> for Term {
    type Output = Expression;

    fn add(self, constant: f64) -> Expression {
        Expression::new(vec![self], constant)
    }
}

impl Sub<f64> for Term {
    type Output = Expression;

    fn sub(self, constant: f64) -> Expression {
        self + -constant
    }
}

impl Add<Term> for Term {
    type Output = Expression;

    fn add(self, other: Term) -> Expression {
        Expression::new(vec![self, other], 0f64)
    }
}

impl Sub<Term> for Term {
    type Output = Expression;

    fn sub(self, other: Term) -> Expression {
        self + -other
    }
}

impl Add<Variable> for Term {
    type Output = Expression;

    fn add(self, variable: Variable) -> Expression {
        self + Term::from(variable)
    }
}

impl Add<&Variable> for Term {
    type Output = Expression;

    fn add(self, variable: &Variable) -> Expression {
        self + variable.clone()
    }
}

impl Sub<Variable> for Term {
    type Output = Expression;

    fn sub(self, variable: Variable) -> Expression {
        self + -variable
    }
}

impl Sub<&Variable> for Term {
    type Output = Expression;

    fn sub(self, variable: &Variable) -> Expression {
        self + -variable
    }
}

// Expression

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::new(
            self.terms.into_iter().map(Neg::neg).collect(),
            -self.constant,
        )
    }
}

impl Mul<f64> for Expression {
    type Output = Expression;

    fn mul(self, factor: f64) -> Expression {
        Expression::new(
            self.terms.into_iter().map(|term| term * factor).collect(),
            self.constant * factor,
        )
    }
}

impl Mul<Expression> for f64 {
    type Output = Expression;

    fn mul(self, expression: Expression) -> Expression {
        expression * self
    }
}

impl Div<f64> for Expression {
    type Output = Expression;

    fn div(self, divisor: f64) -> Expression {
        self * (1f64 / divisor)
    }
}

impl Add<f64> for Expression {
    type Output = Expression;

    fn add(self, constant: f64) -> Expression {
        Expression::new(self.terms, self.constant + constant)
    }
}

impl Sub<f64> for Expression {
    type Output = Expression;

    fn sub(self, constant: f64) -> Expression {
        self + -constant
    }
}

impl Add<Term> for Expression {
    type Output = Expression;

    fn add(mut self, term: Term) -> Expression {
        self.terms.push(term);
        self
    }
}

impl Sub<Term> for Expression {
    type Output = Expression;

    fn sub(self, term: Term) -> Expression {
        self + -term
    }
}

impl Add<Variable> for Expression {
    type Output = Expression;

    fn add(self, variable: Variable) -> Expression {
        self + Term::from(variable)
    }
}

impl Add<&Variable> for Expression {
    type Output = Expression;

    fn add(self, variable: &Variable) -> Expression {
        self + variable.clone()
    }
}

impl Sub<Variable> for Expression {
    type Output = Expression;

    fn sub(self, variable: Variable) -> Expression {
        self + -variable
    }
}

impl Sub<&Variable> for Expression {
    type Output = Expression;

    fn sub(self, variable: &Variable) -> Expression {
        self + -variable
    }
}

impl Add<Expression> for Expression {
    type Output = Expression;

    fn add(mut self, other: Expression) -> Expression {
        self.terms.extend(other.terms);
        Expression::new(self.terms, self.constant + other.constant)
    }
}

impl Sub<Expression> for Expression {
    type Output = Expression;

    fn sub(self, other: Expression) -> Expression {
        self + -other
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.coefficient, self.variable)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} + {}",
            self.terms.iter().map(Term::to_string).join(" + "),
            self.constant,
        )
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::expression::{Expression, Term};
    use crate::data::linear_program::variable::Variable;

    #[test]
    fn variable_arithmetic() {
        let x = Variable::named("x");
        let y = Variable::named("y");

        let expression = &x + &y - 100f64;
        assert_eq!(expression.constant(), -100f64);
        assert_eq!(expression.terms().len(), 2);
        assert_eq!(expression.terms()[0], Term::new(x.clone(), 1f64));
        assert_eq!(expression.terms()[1], Term::new(y.clone(), 1f64));

        let expression = 2f64 * &x - &y;
        assert_eq!(expression.constant(), 0f64);
        assert_eq!(expression.terms()[0].coefficient(), 2f64);
        assert_eq!(expression.terms()[1].coefficient(), -1f64);

        let expression = 5f64 - &x;
        assert_eq!(expression.constant(), 5f64);
        assert_eq!(expression.terms()[0].coefficient(), -1f64);
    }

    #[test]
    fn expression_arithmetic() {
        let x = Variable::named("x");
        let y = Variable::named("y");

        let left = &x + 1f64;
        let right = &y - 2f64;
        let expression = left - right;
        assert_eq!(expression.constant(), 3f64);
        assert_eq!(expression.terms()[0], Term::new(x.clone(), 1f64));
        assert_eq!(expression.terms()[1], Term::new(y.clone(), -1f64));

        let scaled = expression / 2f64;
        assert_eq!(scaled.constant(), 1.5f64);
        assert_eq!(scaled.terms()[0].coefficient(), 0.5f64);

        let duplicated = &x + &x;
        assert_eq!(duplicated.terms().len(), 2);
    }

    #[test]
    fn conversions() {
        let x = Variable::named("x");

        assert_eq!(Expression::from(&x).terms().len(), 1);
        assert_eq!(Expression::from(3f64).constant(), 3f64);
        assert_eq!(Expression::from(Term::new(x, 4f64)).terms()[0].coefficient(), 4f64);
    }
}
