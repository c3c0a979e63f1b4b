use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A small symbolic expression over a set of dihedral-angle variables.
///
/// Matrix entries of a [`SymMatrix4`](crate::SymMatrix4) are expressions in
/// the rotatable angles of a residue; composing transforms multiplies and
/// adds expressions, and evaluating a rotamer substitutes numeric angle
/// values in a single pass. Variables are identified by their index into the
/// angle tuple.
///
/// The smart constructors fold constants eagerly, so a composition of purely
/// numeric transforms collapses back to numeric entries:
/// ```
/// use rotascan_rotamers::Expr;
/// let e = Expr::sum(Expr::product(Expr::constant(2.0), Expr::constant(3.0)),
///                   Expr::cos(Expr::variable(0)));
/// assert_eq!(format!("{}", e), "(6 + cos(x0))");
/// assert!((e.eval(&[0.0]) - 7.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(f64),
    Var(usize),
    Neg(Box<Expr>),
    Sum(Box<Expr>, Box<Expr>),
    Product(Box<Expr>, Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
}

impl Expr {

    /// A numeric literal
    pub fn constant(value: f64) -> Expr { Expr::Const(value) }

    /// The variable of a given index
    pub fn variable(index: usize) -> Expr { Expr::Var(index) }

    /// Returns true for a literal equal to a given value
    fn is_const(&self, value: f64) -> bool {
        matches!(self, Expr::Const(c) if *c == value)
    }

    /// Builds a sum, folding constants
    pub fn sum(lhs: Expr, rhs: Expr) -> Expr {
        if lhs.is_const(0.0) { return rhs; }
        if rhs.is_const(0.0) { return lhs; }
        if let (Expr::Const(a), Expr::Const(b)) = (&lhs, &rhs) { return Expr::Const(a + b); }
        return Expr::Sum(Box::new(lhs), Box::new(rhs));
    }

    /// Builds a product, folding constants
    pub fn product(lhs: Expr, rhs: Expr) -> Expr {
        if lhs.is_const(0.0) || rhs.is_const(0.0) { return Expr::Const(0.0); }
        if lhs.is_const(1.0) { return rhs; }
        if rhs.is_const(1.0) { return lhs; }
        if let (Expr::Const(a), Expr::Const(b)) = (&lhs, &rhs) { return Expr::Const(a * b); }
        return Expr::Product(Box::new(lhs), Box::new(rhs));
    }

    /// Builds a negation, folding constants
    pub fn neg(e: Expr) -> Expr {
        match e {
            Expr::Const(c) => Expr::Const(-c),
            Expr::Neg(inner) => *inner,
            other => Expr::Neg(Box::new(other)),
        }
    }

    /// Builds the sine of an expression, folding constants
    pub fn sin(e: Expr) -> Expr {
        if let Expr::Const(c) = e { return Expr::Const(c.sin()); }
        return Expr::Sin(Box::new(e));
    }

    /// Builds the cosine of an expression, folding constants
    pub fn cos(e: Expr) -> Expr {
        if let Expr::Const(c) = e { return Expr::Const(c.cos()); }
        return Expr::Cos(Box::new(e));
    }

    /// Evaluates this expression by substituting numeric variable values.
    ///
    /// The slice must be long enough to cover every variable appearing in the
    /// expression.
    pub fn eval(&self, variables: &[f64]) -> f64 {
        match self {
            Expr::Const(c) => *c,
            Expr::Var(i) => variables[*i],
            Expr::Neg(e) => -e.eval(variables),
            Expr::Sum(a, b) => a.eval(variables) + b.eval(variables),
            Expr::Product(a, b) => a.eval(variables) * b.eval(variables),
            Expr::Sin(e) => e.eval(variables).sin(),
            Expr::Cos(e) => e.eval(variables).cos(),
        }
    }

    /// Collects the indexes of all variables appearing in this expression
    pub fn collect_variables(&self, into: &mut BTreeSet<usize>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(i) => { into.insert(*i); }
            Expr::Neg(e) | Expr::Sin(e) | Expr::Cos(e) => e.collect_variables(into),
            Expr::Sum(a, b) | Expr::Product(a, b) => {
                a.collect_variables(into);
                b.collect_variables(into);
            }
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Var(i) => write!(f, "x{}", i),
            Expr::Neg(e) => write!(f, "-{}", e),
            Expr::Sum(a, b) => write!(f, "({} + {})", a, b),
            Expr::Product(a, b) => write!(f, "{}*{}", a, b),
            Expr::Sin(e) => write!(f, "sin({})", e),
            Expr::Cos(e) => write!(f, "cos({})", e),
        }
    }
}
