//! Core logic for the Third Spacer waitlist landing page.
//!
//! Everything here is free of DOM and timer dependencies so it can be driven
//! (and tested) without a browser. The Yew front end in `main.rs` owns the
//! timers and measurements and feeds them through these types.

pub mod config;
pub mod flash;
pub mod marquee;
pub mod typewriter;
pub mod waitlist;

pub use config::SiteConfig;
pub use flash::FlashWords;
pub use marquee::{MarqueeEngine, MarqueeLayout, MarqueeSpec, Measurement, WidthProbe};
pub use typewriter::{Typewriter, TypewriterTiming};
pub use waitlist::{FormIntake, IntakeError, Stage, WaitlistFlow, WaitlistSubmission};
