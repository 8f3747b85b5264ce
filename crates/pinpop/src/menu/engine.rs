use super::geometry::{self, BandTable};
use super::model::SelectionState;
use crate::config::{ConfigError, MenuConfig};
use popctl::geom::{Offset, Point};

/// Maps pointer samples to selection states. Holds no per-gesture state.
#[derive(Debug, Clone)]
pub struct Engine {
    origin: Point,
    threshold: f64,
    stretch_ratio: f64,
    bands: BandTable,
}

impl Engine {
    pub fn new(cfg: &MenuConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            origin: cfg.anchor,
            threshold: cfg.commit_threshold,
            stretch_ratio: cfg.stretch_ratio,
            bands: BandTable::new(&cfg.band_order, cfg.band_origin, cfg.gap_angle),
        })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    /// Selection for an absolute drag position.
    pub fn evaluate(&self, drag_point: Point) -> SelectionState {
        let candidate = geometry::angle_of(drag_point, self.origin)
            .and_then(|angle| self.bands.target_for_angle(angle));
        let distance = geometry::distance_of(drag_point, self.origin);

        if distance >= self.threshold {
            SelectionState::committing(candidate)
        } else {
            let progress = 1.0 - (self.threshold - distance) / self.threshold;
            SelectionState::approaching(candidate, 1.0 + self.stretch_ratio * progress)
        }
    }

    /// Selection for a drag `translation` from `start`; `None` until a drag has started.
    pub fn update(&self, translation: Offset, start: Option<Point>) -> Option<SelectionState> {
        start.map(|s| self.evaluate(s + translation))
    }
}
