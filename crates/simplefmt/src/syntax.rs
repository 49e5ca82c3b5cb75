//! Syntax definition.

use std::fmt;

/// A byte range in the source string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A name as written in the source.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Symbol<'source> {
    pub name: &'source str,
    pub span: Span,
}

/// A value in one of the numeric slots (multiplier, constant, priority).
///
/// `Symbol` is left unresolved here: depending on where it appears it may
/// name a metric or, on the right-hand side of a relation, a view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Operand<'source> {
    Number(f64, Span),
    Symbol(Symbol<'source>),
}

impl Operand<'_> {
    pub fn span(&self) -> Span {
        match self {
            Self::Number(_, span) => *span,
            Self::Symbol(symbol) => symbol.span,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

impl Relation {
    /// The relation obtained by multiplying both sides with a negative number.
    pub fn flip(self) -> Self {
        match self {
            Self::Equal => Self::Equal,
            Self::LessOrEqual => Self::GreaterOrEqual,
            Self::GreaterOrEqual => Self::LessOrEqual,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(multiplier '*')? object ('.' attribute)?`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Term<'source> {
    pub multiplier: Option<Operand<'source>>,
    pub object: Symbol<'source>,
    pub attribute: Option<Symbol<'source>>,
}

/// The right-hand side of a relation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Rhs<'source> {
    /// A reference to a second view.
    Term(Term<'source>),
    /// A bare number or identifier with no attribute.
    Value(Operand<'source>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// `('+' | '-') operand`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Offset<'source> {
    pub sign: Sign,
    pub operand: Operand<'source>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Statement<'source> {
    pub first: Term<'source>,
    pub relation: Relation,
    pub second: Rhs<'source>,
    pub constant: Option<Offset<'source>>,
    pub priority: Option<Operand<'source>>,
}

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n, _) => write!(f, "{}", n),
            Self::Symbol(symbol) => f.write_str(symbol.name),
        }
    }
}

impl fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(multiplier) = &self.multiplier {
            write!(f, "(* {} ", multiplier)?;
        }
        f.write_str(self.object.name)?;
        if let Some(attribute) = &self.attribute {
            write!(f, ".{}", attribute.name)?;
        }
        if self.multiplier.is_some() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Rhs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(term) => fmt::Display::fmt(term, f),
            Self::Value(operand) => write!(f, "(value {})", operand),
        }
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {}", self.relation, self.first, self.second)?;
        if let Some(Offset { sign, operand }) = &self.constant {
            let sign = match sign {
                Sign::Plus => '+',
                Sign::Minus => '-',
            };
            write!(f, " ({} {})", sign, operand)?;
        }
        if let Some(priority) = &self.priority {
            write!(f, " (@ {})", priority)?;
        }
        f.write_str(")")
    }
}
