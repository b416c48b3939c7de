use std::{cell::RefCell, fmt, rc::Rc};

use smallvec::SmallVec;

use crate::{
    media::{MediaListener, MediaMatcher, MediaWatcher},
    query::MediaQuery,
    subscription::BreakpointCallback,
};

/// The upper bound of a breakpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaxWidth {
    Px(u32),
    /// No upper limit.
    #[default]
    Unbounded,
}

impl MaxWidth {
    pub fn px(&self) -> Option<u32> {
        match self {
            MaxWidth::Px(px) => Some(*px),
            MaxWidth::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, MaxWidth::Unbounded)
    }
}

impl From<u32> for MaxWidth {
    fn from(px: u32) -> Self {
        MaxWidth::Px(px)
    }
}

impl fmt::Display for MaxWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxWidth::Px(px) => write!(f, "{px}px"),
            MaxWidth::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Caller input for a single breakpoint. Both bounds are optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BreakpointDefinition {
    pub min: Option<i32>,
    pub max: Option<MaxWidth>,
}

impl BreakpointDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewports at least `min` pixels wide.
    pub fn from_min(min: i32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Viewports at most `max` pixels wide.
    pub fn up_to(max: u32) -> Self {
        Self {
            min: None,
            max: Some(MaxWidth::Px(max)),
        }
    }

    /// Viewports between `min` and `max` pixels wide, both inclusive.
    pub fn between(min: i32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(MaxWidth::Px(max)),
        }
    }

    pub fn min(mut self, min: i32) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: impl Into<MaxWidth>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Resolve the definition into concrete bounds.
    ///
    /// Negative minimums and zero maximums count as unset, then the defaults
    /// (`0` and [`MaxWidth::Unbounded`]) apply.
    pub(crate) fn normalize(&self) -> (u32, MaxWidth) {
        let min = self
            .min
            .and_then(|min| u32::try_from(min).ok())
            .unwrap_or(0);
        let max = match self.max {
            Some(MaxWidth::Px(0)) | Some(MaxWidth::Unbounded) | None => MaxWidth::Unbounded,
            Some(max) => max,
        };
        (min, max)
    }
}

/// A named viewport-width range and its live watcher.
pub struct Breakpoint {
    name: String,
    min: u32,
    max: MaxWidth,
    query: Option<MediaQuery>,
    media: Option<Rc<dyn MediaWatcher>>,
    pub(crate) subscriptions: RefCell<SmallVec<[(BreakpointCallback, MediaListener); 2]>>,
}

impl Breakpoint {
    pub(crate) fn build(
        name: String,
        definition: &BreakpointDefinition,
        matcher: &dyn MediaMatcher,
    ) -> Self {
        let (min, max) = definition.normalize();
        let query = MediaQuery::for_range(min, max.px());
        let media = query.and_then(|query| match matcher.match_media(&query) {
            Ok(media) => Some(media),
            Err(err) => {
                tracing::warn!(breakpoint = %name, %query, "no watcher for breakpoint: {err}");
                None
            }
        });

        Self {
            name,
            min,
            max,
            query,
            media,
            subscriptions: RefCell::new(SmallVec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lower bound in pixels; `0` when unbounded below.
    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> MaxWidth {
        self.max
    }

    /// The media query backing this breakpoint, `None` for the unbounded
    /// range.
    pub fn query(&self) -> Option<&MediaQuery> {
        self.query.as_ref()
    }

    /// The live watcher, if one was created.
    pub fn media(&self) -> Option<&Rc<dyn MediaWatcher>> {
        self.media.as_ref()
    }

    /// Whether the viewport is currently inside this breakpoint.
    ///
    /// A breakpoint without watcher is never matched.
    pub fn is_matched(&self) -> bool {
        self.media.as_ref().is_some_and(|media| media.matches())
    }

    /// Read one field by name.
    pub fn field(&self, field: BreakpointField) -> FieldValue {
        match field {
            BreakpointField::Min => FieldValue::Min(self.min),
            BreakpointField::Max => FieldValue::Max(self.max),
            BreakpointField::Query => FieldValue::Query(self.query),
            BreakpointField::IsMatched => FieldValue::IsMatched(self.is_matched()),
        }
    }

    pub(crate) fn has_subscriptions(&self) -> bool {
        !self.subscriptions.borrow().is_empty()
    }
}

/// Two records are equal when they describe the same range; watcher identity
/// is ignored.
impl PartialEq for Breakpoint {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.min == other.min
            && self.max == other.max
            && self.query == other.query
    }
}

impl fmt::Debug for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Breakpoint")
            .field("name", &self.name)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("query", &self.query.map(|query| query.to_string()))
            .field("matched", &self.is_matched())
            .finish()
    }
}

/// The fields readable through [`Breakpoints::get_field`](crate::Breakpoints::get_field).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BreakpointField {
    Min,
    Max,
    #[strum(to_string = "query", serialize = "media")]
    Query,
    #[strum(to_string = "is_matched", serialize = "isMatched")]
    IsMatched,
}

/// The value of a single [`BreakpointField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Min(u32),
    Max(MaxWidth),
    Query(Option<MediaQuery>),
    IsMatched(bool),
}
