//! The constraint descriptor handed to the layout engine.

use crate::{
    attribute::Attribute,
    compile::Config,
    resolve::{Item, ResolvedStatement},
    syntax::Relation,
};
use std::fmt;

/// A fully resolved layout constraint:
///
/// `first.first_attribute relation multiplier * second.second_attribute + constant @ priority`
///
/// View handles are borrowed from the caller's views table.
#[derive(Debug, PartialEq)]
pub struct Constraint<'v, V> {
    pub first_item: &'v V,
    pub first_attribute: Attribute,
    pub relation: Relation,
    /// `None` for a constant-only constraint.
    pub second_item: Option<&'v V>,
    /// [`Attribute::NotAnAttribute`] when there is no second item.
    pub second_attribute: Attribute,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: f64,
}

impl<V> Clone for Constraint<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for Constraint<'_, V> {}

/// Assemble a descriptor, filling in defaults for omitted elements.
///
/// A multiplier on the left-hand side is divided out so that the descriptor
/// always has the first item alone on its side; a negative one flips the
/// relation.
pub fn build<'v, V>(resolved: &ResolvedStatement<'v, V>, config: &Config) -> Constraint<'v, V> {
    let mut relation = resolved.relation;
    let mut multiplier = resolved
        .second
        .and_then(|second| second.multiplier)
        .unwrap_or(1.0);
    let mut constant = resolved.constant.unwrap_or(0.0);

    if let Some(scale) = resolved.first.multiplier {
        if resolved.second.is_some() {
            multiplier /= scale;
        }
        constant /= scale;
        if scale < 0.0 {
            relation = relation.flip();
        }
    }

    let (second_item, second_attribute) = match resolved.second {
        Some(second) => {
            let Item { view, attribute } = second.item;
            (Some(view), attribute)
        }
        None => (None, Attribute::NotAnAttribute),
    };

    Constraint {
        first_item: resolved.first.item.view,
        first_attribute: resolved.first.item.attribute,
        relation,
        second_item,
        second_attribute,
        multiplier,
        constant,
        priority: resolved.priority.unwrap_or(config.required_priority),
    }
}

impl<V> Constraint<'_, V> {
    /// Whether the constraint relates the first item to a constant only.
    pub fn is_constant(&self) -> bool {
        self.second_item.is_none()
    }
}

/// Renders the constraint back into the format language, using the handles'
/// own `Display` as view names.
impl<V> fmt::Display for Constraint<'_, V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn item<V: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            view: &V,
            attribute: Attribute,
        ) -> fmt::Result {
            match attribute {
                Attribute::NotAnAttribute => write!(f, "{}", view),
                attribute => write!(f, "{}.{}", view, attribute),
            }
        }

        item(f, self.first_item, self.first_attribute)?;
        write!(f, " {} ", self.relation)?;
        match self.second_item {
            Some(second) => {
                if self.multiplier != 1.0 {
                    write!(f, "{} * ", self.multiplier)?;
                }
                item(f, second, self.second_attribute)?;
                if self.constant > 0.0 {
                    write!(f, " + {}", self.constant)?;
                } else if self.constant < 0.0 {
                    write!(f, " - {}", -self.constant)?;
                }
            }
            None => write!(f, "{}", self.constant)?,
        }
        write!(f, " @ {}", self.priority)
    }
}
