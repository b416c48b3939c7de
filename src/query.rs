use std::fmt;

/// A width-range media query, e.g. `(min-width: 768px) and (max-width: 1199px)`.
///
/// A `None` bound means the clause is left out of the query text. A query
/// always has at least one bound; [`MediaQuery::for_range`] returns `None`
/// for the unbounded range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MediaQuery {
    min: Option<u32>,
    max: Option<u32>,
}

impl MediaQuery {
    /// Build the query for `min..=max` pixels.
    ///
    /// `min == 0` drops the lower clause and `max == None` drops the upper one.
    pub fn for_range(min: u32, max: Option<u32>) -> Option<Self> {
        let min = (min > 0).then_some(min);
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn min_width(&self) -> Option<u32> {
        self.min
    }

    pub fn max_width(&self) -> Option<u32> {
        self.max
    }

    /// Whether a viewport of `width` pixels satisfies this query.
    ///
    /// Both bounds are inclusive, as in CSS.
    pub fn matches_width(&self, width: f64) -> bool {
        if let Some(min) = self.min
            && width < f64::from(min)
        {
            return false;
        }
        if let Some(max) = self.max
            && width > f64::from(max)
        {
            return false;
        }
        true
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                write!(f, "(min-width: {min}px) and (max-width: {max}px)")
            }
            (Some(min), None) => write!(f, "(min-width: {min}px)"),
            (None, Some(max)) => write!(f, "(max-width: {max}px)"),
            // not constructible through `for_range`
            (None, None) => Ok(()),
        }
    }
}
