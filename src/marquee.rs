//! Seamless marquee sizing.
//!
//! A banner strip is built from `repeat_count` copies of the text and animated
//! from `translateX(0)` to `translateX(-50%)`. For the loop point to be
//! invisible the strip must cover at least twice the visible track, and the
//! loop duration scales with the number of copies so the pixel speed stays put.

use log::debug;
use std::fmt;

/// Never render fewer copies than this, measured or not.
pub const MIN_REPEAT: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeSpec {
    pub text: String,
    /// Seconds one copy of the text takes to scroll past.
    pub base_speed_secs: f64,
}

impl MarqueeSpec {
    pub fn new(text: impl Into<String>, base_speed_secs: f64) -> Self {
        Self {
            text: text.into(),
            base_speed_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeLayout {
    pub repeat_count: u32,
    pub duration_secs: f64,
}

impl MarqueeLayout {
    /// Layout used until a usable measurement arrives.
    pub fn fallback(spec: &MarqueeSpec) -> Self {
        Self::with_repeat(spec, MIN_REPEAT)
    }

    fn with_repeat(spec: &MarqueeSpec, repeat_count: u32) -> Self {
        Self {
            repeat_count,
            duration_secs: spec.base_speed_secs * repeat_count as f64,
        }
    }

    /// CSS `animation` shorthand for a keyframes rule named `keyframes`.
    pub fn animation_css(&self, keyframes: &str) -> String {
        format!("{} {}s linear infinite", keyframes, self.duration_secs)
    }
}

/// Pixel widths of the visible track and of one unrepeated copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub track_width: f64,
    pub content_width: f64,
}

/// Read-only access to rendered widths.
pub trait WidthProbe {
    fn track_width(&self) -> Option<f64>;
    fn content_width(&self) -> Option<f64>;

    fn measure(&self) -> Option<Measurement> {
        Some(Measurement {
            track_width: self.track_width()?,
            content_width: self.content_width()?,
        })
    }
}

impl WidthProbe for Measurement {
    fn track_width(&self) -> Option<f64> {
        Some(self.track_width)
    }

    fn content_width(&self) -> Option<f64> {
        Some(self.content_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureError {
    /// The elements are not mounted yet.
    Unavailable,
    /// The content copy has no width yet.
    ContentNotLaidOut,
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureError::Unavailable => write!(f, "Marquee elements are not available to measure"),
            MeasureError::ContentNotLaidOut => write!(f, "Marquee content has not been laid out yet"),
        }
    }
}

impl std::error::Error for MeasureError {}

/// Repeat count and duration for one measurement, or `None` while the
/// content has no usable width.
pub fn compute_layout(spec: &MarqueeSpec, measurement: Measurement) -> Option<MarqueeLayout> {
    let content = measurement.content_width;
    if !content.is_finite() || content <= 0.0 {
        return None;
    }
    let track = if measurement.track_width.is_finite() {
        measurement.track_width.max(0.0)
    } else {
        0.0
    };
    let needed = ((track * 2.0) / content).ceil();
    // Saturating float-to-int cast; absurd ratios clamp to u32::MAX.
    let repeat = (needed as u32).max(MIN_REPEAT);
    Some(MarqueeLayout::with_repeat(spec, repeat))
}

/// One banner's sizing state. Each banner owns its own engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeEngine {
    spec: MarqueeSpec,
    layout: MarqueeLayout,
}

impl MarqueeEngine {
    pub fn new(spec: MarqueeSpec) -> Self {
        let layout = MarqueeLayout::fallback(&spec);
        Self { spec, layout }
    }

    pub fn spec(&self) -> &MarqueeSpec {
        &self.spec
    }

    pub fn layout(&self) -> MarqueeLayout {
        self.layout
    }

    /// Swap text or speed. The old measurement no longer applies, so the
    /// layout drops back to the fallback until the next remeasure.
    pub fn set_spec(&mut self, spec: MarqueeSpec) {
        if spec != self.spec {
            self.layout = MarqueeLayout::fallback(&spec);
            self.spec = spec;
        }
    }

    /// Measure and recompute. Returns whether the layout changed; on error the
    /// previous layout is kept.
    pub fn remeasure(&mut self, probe: &impl WidthProbe) -> Result<bool, MeasureError> {
        let measurement = probe.measure().ok_or(MeasureError::Unavailable)?;
        let layout =
            compute_layout(&self.spec, measurement).ok_or(MeasureError::ContentNotLaidOut)?;
        if layout == self.layout {
            return Ok(false);
        }
        debug!(
            "Marquee relayout: track {}px, copy {}px -> {} copies over {}s",
            measurement.track_width,
            measurement.content_width,
            layout.repeat_count,
            layout.duration_secs
        );
        self.layout = layout;
        Ok(true)
    }
}
