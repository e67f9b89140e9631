//! Scroll-driven alien showcase page.
//!
//! Renders a full-viewport starfield canvas behind a sequence of character
//! scenes, one per screen height of scroll:
//! - Twinkling starfield tinted with the active character's color
//! - Particle bursts on scene changes and on the secret key sequence
//! - Drifting background particles while the character section is in view
//! - Eased cursor follower, pointer parallax and typed titles
//!
//! Simulation and mapping logic is host-independent and unit tested; the
//! browser glue lives in `component` and `dom`.
//!
//! # Example
//!
//! ```ignore
//! use alien_showcase::{Showcase, ShowcaseData};
//!
//! view! { <Showcase data=ShowcaseData::default() /> }
//! ```

mod component;
pub mod cursor;
mod dom;
pub mod menu;
mod page;
pub mod particles;
mod render;
pub mod schedule;
pub mod scroll;
pub mod secret;
pub mod state;
pub mod theme;
pub mod types;
pub mod typing;

pub use component::Showcase;
pub use theme::{Color, Theme};
pub use types::{CardData, CardStat, MotionConfig, ShowcaseData};
