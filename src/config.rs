//! Loading breakpoint definitions from JSON.
//!
//! The expected shape is an object of named ranges:
//!
//! ```json
//! {
//!     "mobile": { "max": 767 },
//!     "tablet": { "min": 768, "max": 1199 },
//!     "desktop": { "min": 1200, "max": "infinity" }
//! }
//! ```
//!
//! `max` accepts a number, `null`, or one of `"none"`, `"infinity"` and
//! `"unbounded"` for an open upper end.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::{
    breakpoint::{BreakpointDefinition, MaxWidth},
    error::BreakpointError,
    registry::{Breakpoints, global},
};

const UNBOUNDED_KEYWORDS: &[&str] = &["none", "infinity", "unbounded"];

impl<'de> Deserialize<'de> for MaxWidth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MaxWidthVisitor)
    }
}

struct MaxWidthVisitor;

impl<'de> de::Visitor<'de> for MaxWidthVisitor {
    type Value = MaxWidth;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a width in pixels or one of {UNBOUNDED_KEYWORDS:?}")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MaxWidth, E> {
        Ok(MaxWidth::Px(u32::try_from(v).unwrap_or(u32::MAX)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MaxWidth, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Ok(MaxWidth::Unbounded),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MaxWidth, E> {
        Ok(max_from_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MaxWidth, E> {
        max_from_keyword(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

fn max_from_f64(v: f64) -> MaxWidth {
    if v.is_finite() && v > 0.0 {
        // `as` saturates
        MaxWidth::Px(v as u32)
    } else {
        MaxWidth::Unbounded
    }
}

fn max_from_keyword(v: &str) -> Option<MaxWidth> {
    UNBOUNDED_KEYWORDS
        .iter()
        .any(|keyword| v.eq_ignore_ascii_case(keyword))
        .then_some(MaxWidth::Unbounded)
}

impl<'de> Deserialize<'de> for BreakpointDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            min: Option<i64>,
            #[serde(default)]
            max: Option<MaxWidth>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(BreakpointDefinition {
            min: raw.min.map(saturate_i32),
            max: raw.max,
        })
    }
}

fn saturate_i32(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

/// A set of named breakpoint definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BreakpointConfig {
    pub breakpoints: BTreeMap<String, BreakpointDefinition>,
}

impl BreakpointConfig {
    /// Parse a configuration, failing on malformed JSON or field types.
    pub fn from_json(json: &str) -> Result<Self, BreakpointError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a configuration leniently.
    ///
    /// A non-object value yields an empty configuration. Fields of the wrong
    /// type are treated as unset.
    pub fn from_value(value: &Value) -> Self {
        let Some(entries) = value.as_object() else {
            tracing::debug!("breakpoint definitions are not an object, ignoring");
            return Self::default();
        };
        let breakpoints = entries
            .iter()
            .map(|(name, entry)| (name.clone(), lenient_definition(name, entry)))
            .collect();
        Self { breakpoints }
    }
}

impl IntoIterator for BreakpointConfig {
    type Item = (String, BreakpointDefinition);
    type IntoIter = std::collections::btree_map::IntoIter<String, BreakpointDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.breakpoints.into_iter()
    }
}

fn lenient_definition(name: &str, entry: &Value) -> BreakpointDefinition {
    let Some(fields) = entry.as_object() else {
        tracing::warn!(breakpoint = name, "definition is not an object, using defaults");
        return BreakpointDefinition::default();
    };

    let min = match fields.get("min") {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_f64().filter(|v| v.is_finite()) {
            // `as` saturates
            Some(v) => Some(v as i32),
            None => {
                tracing::warn!(breakpoint = name, %value, "ignoring non-numeric `min`");
                None
            }
        },
    };

    let max = match fields.get("max") {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => number.as_f64().map(max_from_f64),
        Some(Value::String(keyword)) if max_from_keyword(keyword).is_some() => {
            Some(MaxWidth::Unbounded)
        }
        Some(value) => {
            tracing::warn!(breakpoint = name, %value, "ignoring invalid `max`");
            None
        }
    };

    BreakpointDefinition { min, max }
}

impl Breakpoints {
    /// Define every breakpoint of `config`.
    pub fn define_config(&self, config: BreakpointConfig) {
        self.define(config);
    }

    /// Define breakpoints from an untyped JSON value.
    ///
    /// Anything but an object is ignored; see [`BreakpointConfig::from_value`].
    pub fn define_value(&self, value: &Value) {
        if !value.is_object() {
            tracing::debug!("breakpoint definitions are not an object, ignoring");
            return;
        }
        self.define(BreakpointConfig::from_value(value));
    }
}

/// Define breakpoints from an untyped JSON value on the thread's registry.
///
/// See [`Breakpoints::define_value`].
pub fn define_value(value: &Value) {
    match global() {
        Some(breakpoints) => breakpoints.define_value(value),
        None => tracing::warn!("breakpoints defined before `init`, ignoring"),
    }
}
