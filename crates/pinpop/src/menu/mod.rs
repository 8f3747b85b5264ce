pub mod action;
pub mod controller;
pub mod engine;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod motion;
pub mod theme;

pub use action::Action;
pub use controller::{Controller, Dispatch, Phase};
pub use engine::Engine;
pub use layout::{ButtonLayout, LayoutSettings, arrange};
pub use model::{Feedback, SelectionState};
pub use motion::Transition;
pub use theme::Theme;

pub const GAP_ANGLE: f64 = 30.0; // degrees between buttons
pub const BAND_ORIGIN: f64 = 90.0; // first band points straight up
pub const POP_DISTANCE: f64 = 104.0; // button orbit when engaged
pub const COMMIT_THRESHOLD: f64 = 70.0; // drag distance that commits
pub const STRETCH_RATIO: f64 = 0.05;
pub const LONG_PRESS_SECS: f64 = 0.3;
pub const BUTTON_DIAMETER: f64 = 50.0;
pub const EMPHASIS_SCALE: f64 = 1.15;
