//! Name resolution against the caller's views and metrics tables.

use crate::{
    attribute::Attribute,
    compile::Config,
    syntax::{Operand, Relation, Rhs, Sign, Span, Statement, Symbol, Term},
    table::SymbolTable,
};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResolutionErrorKind {
    UnknownView,
    UnknownAttribute,
    UnknownMetric,
    /// The left-hand multiplier is zero, so the relation cannot be solved
    /// for the first item.
    ZeroMultiplier,
    /// The priority is not within `(0, required]`.
    InvalidPriority,
    /// A numeric value, or a value derived from it, is infinite or NaN.
    NonFiniteValue,
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnknownView => "unknown view",
            Self::UnknownAttribute => "unknown attribute",
            Self::UnknownMetric => "unknown metric",
            Self::ZeroMultiplier => "zero multiplier on the left-hand side",
            Self::InvalidPriority => "priority out of range",
            Self::NonFiniteValue => "non-finite value",
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: `{name}`")]
pub struct ResolutionError {
    pub kind: ResolutionErrorKind,
    pub name: String,
    pub span: Span,
}

impl ResolutionError {
    fn new(kind: ResolutionErrorKind, symbol: &Symbol<'_>) -> Self {
        Self {
            kind,
            name: symbol.name.to_owned(),
            span: symbol.span,
        }
    }

    fn operand(kind: ResolutionErrorKind, operand: &Operand<'_>) -> Self {
        Self {
            kind,
            name: operand.to_string(),
            span: operand.span(),
        }
    }
}

/// A view handle together with one of its attributes.
#[derive(Debug, PartialEq)]
pub struct Item<'v, V> {
    pub view: &'v V,
    pub attribute: Attribute,
}

impl<V> Clone for Item<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for Item<'_, V> {}

#[derive(Debug, PartialEq)]
pub struct ResolvedTerm<'v, V> {
    pub multiplier: Option<f64>,
    pub item: Item<'v, V>,
}

impl<V> Clone for ResolvedTerm<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for ResolvedTerm<'_, V> {}

/// A statement whose names have all been resolved.
///
/// Omitted elements stay `None`; defaults are applied by [`crate::descriptor::build`].
#[derive(Debug, PartialEq)]
pub struct ResolvedStatement<'v, V> {
    pub first: ResolvedTerm<'v, V>,
    pub relation: Relation,
    pub second: Option<ResolvedTerm<'v, V>>,
    pub constant: Option<f64>,
    pub priority: Option<f64>,
}

impl<V> Clone for ResolvedStatement<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for ResolvedStatement<'_, V> {}

/// Resolve one term: the view first, then its attribute, then the multiplier.
pub fn resolve_term<'v, W, M>(
    term: &Term<'_>,
    views: &'v W,
    metrics: &M,
) -> Result<ResolvedTerm<'v, W::Value>, ResolutionError>
where
    W: SymbolTable + ?Sized,
    M: SymbolTable + ?Sized,
    M::Value: Copy + Into<f64>,
{
    let view = views
        .lookup(term.object.name)
        .ok_or_else(|| ResolutionError::new(ResolutionErrorKind::UnknownView, &term.object))?;

    let attribute = match &term.attribute {
        Some(attribute) => Attribute::from_name(attribute.name).ok_or_else(|| {
            ResolutionError::new(ResolutionErrorKind::UnknownAttribute, attribute)
        })?,
        None => Attribute::NotAnAttribute,
    };

    let multiplier = term
        .multiplier
        .as_ref()
        .map(|operand| metric(operand, metrics))
        .transpose()?;

    Ok(ResolvedTerm {
        multiplier,
        item: Item { view, attribute },
    })
}

/// Resolve every name in `statement`.
///
/// A bare identifier on the right-hand side is looked up in the views table
/// first and in the metrics table second.
pub fn resolve<'v, W, M>(
    statement: &Statement<'_>,
    views: &'v W,
    metrics: &M,
    config: &Config,
) -> Result<ResolvedStatement<'v, W::Value>, ResolutionError>
where
    W: SymbolTable + ?Sized,
    M: SymbolTable + ?Sized,
    M::Value: Copy + Into<f64>,
{
    let first = resolve_term(&statement.first, views, metrics)?;
    if let Some(operand) = &statement.first.multiplier {
        if first.multiplier == Some(0.0) {
            return Err(ResolutionError::operand(
                ResolutionErrorKind::ZeroMultiplier,
                operand,
            ));
        }
    }

    let (second, mut constant) = match &statement.second {
        Rhs::Term(term) => (Some(resolve_term(term, views, metrics)?), None),
        Rhs::Value(Operand::Symbol(symbol)) if views.lookup(symbol.name).is_some() => {
            let term = Term {
                multiplier: None,
                object: *symbol,
                attribute: None,
            };
            (Some(resolve_term(&term, views, metrics)?), None)
        }
        Rhs::Value(operand) => (None, Some(metric(operand, metrics)?)),
    };

    if let Some(offset) = &statement.constant {
        let value = metric(&offset.operand, metrics)?;
        let value = match offset.sign {
            Sign::Plus => value,
            Sign::Minus => -value,
        };
        let sum = constant.unwrap_or(0.0) + value;
        if !sum.is_finite() {
            return Err(ResolutionError::operand(
                ResolutionErrorKind::NonFiniteValue,
                &offset.operand,
            ));
        }
        constant = Some(sum);
    }

    // the left-hand multiplier is divided out when the descriptor is built.
    if let (Some(scale), Some(operand)) = (first.multiplier, &statement.first.multiplier) {
        let multiplier = second.and_then(|second| second.multiplier).unwrap_or(1.0);
        let constant = constant.unwrap_or(0.0);
        if !(multiplier / scale).is_finite() || !(constant / scale).is_finite() {
            return Err(ResolutionError::operand(
                ResolutionErrorKind::NonFiniteValue,
                operand,
            ));
        }
    }

    let priority = match &statement.priority {
        Some(operand) => {
            let priority = metric(operand, metrics)?;
            if !(priority > 0.0 && priority <= config.required_priority) {
                return Err(ResolutionError::operand(
                    ResolutionErrorKind::InvalidPriority,
                    operand,
                ));
            }
            Some(priority)
        }
        None => None,
    };

    Ok(ResolvedStatement {
        first,
        relation: statement.relation,
        second,
        constant,
        priority,
    })
}

/// Resolve an operand in a numeric slot; literals bypass the table.
///
/// Both literals and metric values must be finite.
fn metric<M>(operand: &Operand<'_>, metrics: &M) -> Result<f64, ResolutionError>
where
    M: SymbolTable + ?Sized,
    M::Value: Copy + Into<f64>,
{
    let value = match operand {
        Operand::Number(n, _) => *n,
        Operand::Symbol(symbol) => metrics
            .lookup(symbol.name)
            .map(|&value| value.into())
            .ok_or_else(|| ResolutionError::new(ResolutionErrorKind::UnknownMetric, symbol))?,
    };
    if !value.is_finite() {
        return Err(ResolutionError::operand(
            ResolutionErrorKind::NonFiniteValue,
            operand,
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parser::parse};
    use std::collections::HashMap;

    #[derive(Debug, PartialEq)]
    struct View(u32);

    fn views() -> HashMap<&'static str, View> {
        HashMap::from([("v", View(1)), ("s", View(2))])
    }

    fn metrics() -> HashMap<&'static str, f64> {
        HashMap::from([
            ("pad", 20.0),
            ("ratio", 0.5),
            ("high", 750.0),
            ("zero", 0.0),
            ("big", f64::INFINITY),
            ("nan", f64::NAN),
            ("huge", f64::MAX),
            ("tiny", 1e-320),
        ])
    }

    fn resolve_str<'v>(
        input: &str,
        views: &'v HashMap<&'static str, View>,
    ) -> Result<ResolvedStatement<'v, View>, ResolutionError> {
        let tokens = tokenize(input).unwrap();
        let statement = parse(&tokens).unwrap();
        resolve(&statement, views, &metrics(), &Config::default())
    }

    #[test]
    fn full_statement() {
        let views = views();
        let resolved = resolve_str("v.width = ratio * s.height - pad @ high", &views).unwrap();
        assert_eq!(resolved.first.item.view, &View(1));
        assert_eq!(resolved.first.item.attribute, Attribute::Width);
        assert_eq!(resolved.first.multiplier, None);
        let second = resolved.second.unwrap();
        assert_eq!(second.item.view, &View(2));
        assert_eq!(second.item.attribute, Attribute::Height);
        assert_eq!(second.multiplier, Some(0.5));
        assert_eq!(resolved.constant, Some(-20.0));
        assert_eq!(resolved.priority, Some(750.0));
    }

    #[test]
    fn handles_are_borrowed_not_copied() {
        let views = views();
        let resolved = resolve_str("v.top = s.top", &views).unwrap();
        assert!(std::ptr::eq(resolved.first.item.view, &views["v"]));
        assert!(std::ptr::eq(resolved.second.unwrap().item.view, &views["s"]));
    }

    #[test]
    fn constant_only() {
        let views = views();
        let resolved = resolve_str("v.width = pad + 4", &views).unwrap();
        assert!(resolved.second.is_none());
        assert_eq!(resolved.constant, Some(24.0));
    }

    #[test]
    fn bare_view_on_rhs() {
        let views = views();
        let resolved = resolve_str("v.width = s", &views).unwrap();
        let second = resolved.second.unwrap();
        assert_eq!(second.item.view, &View(2));
        assert_eq!(second.item.attribute, Attribute::NotAnAttribute);
        assert_eq!(resolved.constant, None);
    }

    #[test]
    fn unknown_view() {
        let views = HashMap::from([("v", View(1))]);
        let err = resolve_str("v.centerX = s.centerX", &views).unwrap_err();
        assert_eq!(
            err,
            ResolutionError {
                kind: ResolutionErrorKind::UnknownView,
                name: "s".into(),
                span: Span::new(12, 13),
            }
        );
    }

    #[test]
    fn unknown_attribute() {
        let views = views();
        let err = resolve_str("v.bogusAttr = 5", &views).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::UnknownAttribute);
        assert_eq!(err.name, "bogusAttr");
        assert_eq!(err.span, Span::new(2, 11));

        let err = resolve_str("v.CenterX = s.centerX", &views).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::UnknownAttribute);
    }

    #[test]
    fn unknown_metric() {
        let views = views();
        for input in [
            "v.width = margin",
            "v.width = s.width + margin",
            "v.width = margin * s.width",
            "v.width = s.width @ margin",
        ] {
            let err = resolve_str(input, &views).unwrap_err();
            assert_eq!(err.kind, ResolutionErrorKind::UnknownMetric, "{}", input);
            assert_eq!(err.name, "margin");
        }
    }

    #[test]
    fn view_is_resolved_before_attribute() {
        let views = views();
        let err = resolve_str("x.bogus = s.width", &views).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::UnknownView);
        assert_eq!(err.name, "x");
    }

    #[test]
    fn zero_left_multiplier() {
        let views = views();
        let err = resolve_str("zero * v.width = s.width", &views).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::ZeroMultiplier);
        assert_eq!(err.name, "zero");

        let err = resolve_str("0 * v.width = s.width", &views).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::ZeroMultiplier);
        assert_eq!(err.name, "0");
    }

    #[test]
    fn priority_range() {
        let views = views();
        assert_eq!(
            resolve_str("v.top = s.top @ 1000", &views)
                .unwrap()
                .priority,
            Some(1000.0)
        );
        for input in ["v.top = s.top @ 1001", "v.top = s.top @ 0", "v.top = s.top @ zero"] {
            let err = resolve_str(input, &views).unwrap_err();
            assert_eq!(err.kind, ResolutionErrorKind::InvalidPriority, "{}", input);
        }
    }

    #[test]
    fn integer_metrics() {
        let views = views();
        let tokens = tokenize("v.width = s.width + gutter").unwrap();
        let statement = parse(&tokens).unwrap();
        let metrics: HashMap<&str, i32> = HashMap::from([("gutter", 16)]);
        let resolved = resolve(&statement, &views, &metrics, &Config::default()).unwrap();
        assert_eq!(resolved.constant, Some(16.0));
    }

    #[test]
    fn bare_name_prefers_view_over_metric() {
        let views = HashMap::from([("v", View(1)), ("pad", View(3))]);
        let resolved = resolve_str("v.width = pad", &views).unwrap();
        let second = resolved.second.unwrap();
        assert_eq!(second.item.view, &View(3));
        assert_eq!(second.item.attribute, Attribute::NotAnAttribute);
        assert_eq!(resolved.constant, None);

        // in a numeric slot the same name is always a metric.
        let resolved = resolve_str("v.width = v.height + pad", &views).unwrap();
        assert_eq!(resolved.constant, Some(20.0));
    }

    #[test]
    fn non_finite_values() {
        let views = views();
        let long_literal = format!("v.width = {}", "9".repeat(400));
        for (input, name) in [
            ("big * v.width = s.width", "big"),
            ("nan * v.width = s.width", "nan"),
            ("v.width = nan * s.width", "nan"),
            ("v.width = big", "big"),
            ("v.width = s.width - nan", "nan"),
            ("v.width = s.width @ nan", "nan"),
            (long_literal.as_str(), "inf"),
            ("v.width = huge + huge", "huge"),
            ("tiny * v.width = s.width", "tiny"),
        ] {
            let err = resolve_str(input, &views).unwrap_err();
            assert_eq!(err.kind, ResolutionErrorKind::NonFiniteValue, "{}", input);
            assert_eq!(err.name, name, "{}", input);
        }
    }
}
