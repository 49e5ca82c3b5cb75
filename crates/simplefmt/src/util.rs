use std::fmt;

/// Formats a list of alternatives as `a`, `a or b`, `a, b or c`.
pub struct OneOf<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for OneOf<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(items) = self;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(if i + 1 == items.len() { " or " } else { ", " })?;
            }
            fmt::Display::fmt(item, f)?;
        }
        Ok(())
    }
}
