use super::action::Action;
use popctl::geom::{Offset, Point};

/// Polar angle of `point` around `origin`, in degrees within `[0, 360)`.
///
/// Angles grow counter-clockwise from the +x axis as seen on screen, so with
/// y pointing down "straight up" reads 90 and "left" reads 180. Coincident
/// points have no angle.
pub fn angle_of(point: Point, origin: Point) -> Option<f64> {
    let (dx, dy) = (point.x - origin.x, point.y - origin.y);
    if (dx == 0.0 && dy == 0.0) || !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    // swapped atan2 turns the axis a quarter, 270 flips it back against y-down
    let degrees = dx.atan2(dy).to_degrees();
    Some((degrees + 360.0 + 270.0).rem_euclid(360.0))
}

pub fn distance_of(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

/// Shortest unsigned distance between two angles, in `[0, 180]`.
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Unit-length screen offset pointing along `degrees`.
pub fn direction_of(degrees: f64) -> Offset {
    let r = degrees.to_radians();
    Offset::new(r.cos(), -r.sin())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub action: Action,
    pub center: f64,
    pub half_width: f64,
}

impl Band {
    /// Closed on both edges.
    pub fn contains(&self, angle: f64) -> bool {
        angle_difference(angle, self.center) <= self.half_width
    }
}

/// Ordered mapping from angular bands to actions. Earlier bands win ties.
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    /// Band `k` of `order` is centered at `first_center + gap * k`.
    pub fn new(order: &[Action], first_center: f64, gap: f64) -> Self {
        let bands = order
            .iter()
            .enumerate()
            .map(|(k, &action)| Band {
                action,
                center: (first_center + gap * k as f64).rem_euclid(360.0),
                half_width: gap / 2.0,
            })
            .collect();
        Self { bands }
    }

    pub fn target_for_angle(&self, angle: f64) -> Option<Action> {
        self.bands
            .iter()
            .find(|band| band.contains(angle))
            .map(|band| band.action)
    }

    pub fn center_of(&self, action: Action) -> Option<f64> {
        self.bands
            .iter()
            .find(|band| band.action == action)
            .map(|band| band.center)
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }
}
