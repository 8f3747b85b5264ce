use crate::app::Snapshot;
use async_channel::Sender;
use popctl::geom::{Offset, Point};
use popctl::protocol::Request;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Trigger held; `None` means long enough by definition.
    Press(Option<Duration>),
    Drag {
        translation: Offset,
        start: Option<Point>,
    },
    Release,
}

impl Gesture {
    pub fn from_request(request: &Request) -> Option<Self> {
        match *request {
            Request::Press { held } => Some(Self::Press(held.map(hold_duration))),
            Request::Drag { translation, start } => Some(Self::Drag { translation, start }),
            Request::Release => Some(Self::Release),
            Request::State => None,
        }
    }
}

/// Negative holds count as zero, holds too long to represent as forever.
fn hold_duration(secs: f64) -> Duration {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) => d,
        Err(_) if secs > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The resulting snapshot goes to the reply sender, if any.
    Gesture(Gesture, Option<Sender<Snapshot>>),
    ConfigReload,
}
