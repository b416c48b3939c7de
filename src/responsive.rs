use std::ops::{Range, RangeFrom, RangeTo};

use crate::breakpoint::BreakpointDefinition;

/// A six step width grid, in pixels.
///
/// Range ends are exclusive; they are turned into inclusive `max-width`
/// bounds by [`GridBreakpoints::definitions`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBreakpoints {
    pub xs: RangeTo<u32>,
    pub sm: Range<u32>,
    pub md: Range<u32>,
    pub lg: Range<u32>,
    pub xl: Range<u32>,
    pub xxl: RangeFrom<u32>,
}

impl Default for GridBreakpoints {
    fn default() -> Self {
        Self {
            xs: ..576,
            sm: 576..768,
            md: 768..992,
            lg: 992..1200,
            xl: 1200..1400,
            xxl: 1400..,
        }
    }
}

impl GridBreakpoints {
    /// Definitions named `xs` to `xxl`, ready for
    /// [`Breakpoints::define`](crate::Breakpoints::define).
    pub fn definitions(&self) -> [(&'static str, BreakpointDefinition); 6] {
        [
            ("xs", upper(0, self.xs.end)),
            ("sm", upper(self.sm.start, self.sm.end)),
            ("md", upper(self.md.start, self.md.end)),
            ("lg", upper(self.lg.start, self.lg.end)),
            ("xl", upper(self.xl.start, self.xl.end)),
            ("xxl", BreakpointDefinition::from_min(clamp_i32(self.xxl.start))),
        ]
    }

    /// The name of the grid step containing `width`.
    pub fn name_for_width(&self, width: u32) -> &'static str {
        if self.xs.contains(&width) {
            "xs"
        } else if self.sm.contains(&width) {
            "sm"
        } else if self.md.contains(&width) {
            "md"
        } else if self.lg.contains(&width) {
            "lg"
        } else if self.xl.contains(&width) {
            "xl"
        } else {
            // gaps between ranges fall through to the last step
            "xxl"
        }
    }
}

fn upper(start: u32, end: u32) -> BreakpointDefinition {
    BreakpointDefinition::between(clamp_i32(start), end.saturating_sub(1))
}

fn clamp_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
