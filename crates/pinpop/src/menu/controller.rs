use super::action::Action;
use super::engine::Engine;
use super::model::SelectionState;
use popctl::geom::{Offset, Point};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Engaged,
}

/// Receives the action that fired on release, with its display index.
pub trait Dispatch {
    fn dispatch(&mut self, index: usize, action: Action);
}

impl<F> Dispatch for F
where
    F: FnMut(usize, Action),
{
    fn dispatch(&mut self, index: usize, action: Action) {
        self(index, action)
    }
}

/// Gesture wiring around the [`Engine`]. Owns the engagement phase, the
/// touch-down location of the current drag and the last emitted selection.
pub struct Controller<D> {
    engine: Engine,
    long_press: Duration,
    phase: Phase,
    start: Option<Point>,
    selection: SelectionState,
    dispatcher: D,
}

impl<D: Dispatch> Controller<D> {
    pub fn new(engine: Engine, long_press: Duration, dispatcher: D) -> Self {
        Self {
            engine,
            long_press,
            phase: Phase::Idle,
            start: None,
            selection: SelectionState::default(),
            dispatcher,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Swaps in a new engine and dispatcher, abandoning any gesture in flight.
    pub fn reconfigure(&mut self, engine: Engine, long_press: Duration, dispatcher: D) {
        self.engine = engine;
        self.long_press = long_press;
        self.dispatcher = dispatcher;
        self.reset();
        self.phase = Phase::Idle;
    }

    /// Trigger held for `held`; engages once the long-press minimum is reached.
    pub fn on_press(&mut self, held: Duration) -> bool {
        if held < self.long_press {
            return false;
        }
        self.on_long_press_recognized();
        true
    }

    pub fn on_long_press_recognized(&mut self) {
        if self.phase == Phase::Idle {
            log::debug!("Menu engaged");
        }
        self.phase = Phase::Engaged;
    }

    /// Drag moved by `translation` since touch-down. The first known `start`
    /// is kept for the rest of the gesture.
    pub fn on_drag_changed(
        &mut self,
        translation: Offset,
        start: Option<Point>,
    ) -> &SelectionState {
        if self.phase == Phase::Engaged {
            if self.start.is_none() {
                self.start = start.filter(|s| s.is_finite());
            }
            if let Some(selection) = self.engine.update(translation, self.start) {
                self.selection = selection;
            }
        }
        &self.selection
    }

    /// Finger lifted. Fires the committed action, if any, then returns to idle.
    pub fn on_drag_ended(&mut self) -> Option<Action> {
        let fired = self.selection.committed();
        if let Some(action) = fired {
            self.dispatcher.dispatch(action.index(), action);
        }
        self.reset();
        if self.phase == Phase::Engaged {
            log::debug!("Menu released");
        }
        self.phase = Phase::Idle;
        fired
    }

    fn reset(&mut self) {
        self.start = None;
        self.selection = SelectionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Fired = Rc<RefCell<Vec<(usize, Action)>>>;

    struct Recorder(Fired);

    impl Dispatch for Recorder {
        fn dispatch(&mut self, index: usize, action: Action) {
            self.0.borrow_mut().push((index, action));
        }
    }

    fn controller() -> (Controller<Recorder>, Fired) {
        let fired: Fired = Rc::default();
        let cfg = MenuConfig::default();
        let c = Controller::new(
            Engine::new(&cfg).unwrap(),
            cfg.long_press(),
            Recorder(fired.clone()),
        );
        (c, fired)
    }

    const ANCHOR: Point = Point::new(25.0, 25.0);

    #[test]
    fn test_closures_dispatch() {
        let mut seen = Vec::new();
        let cfg = MenuConfig::default();
        let mut c = Controller::new(
            Engine::new(&cfg).unwrap(),
            cfg.long_press(),
            |i: usize, a: Action| seen.push(format!("Done {} {}", i, a)),
        );
        c.on_long_press_recognized();
        c.on_drag_changed(Offset::new(0.0, -90.0), Some(ANCHOR));
        c.on_drag_ended();
        drop(c);
        assert_eq!(seen, ["Done 3 more"]);
    }

    #[test]
    fn test_drag_is_ignored_until_engaged() {
        let (mut c, _) = controller();
        let state = c.on_drag_changed(Offset::new(-80.0, 0.0), Some(ANCHOR));
        assert!(state.is_default());
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_short_press_does_not_engage() {
        let (mut c, _) = controller();
        assert!(!c.on_press(Duration::from_millis(299)));
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.on_press(Duration::from_millis(300)));
        assert_eq!(c.phase(), Phase::Engaged);
    }

    #[test]
    fn test_full_gesture_fires_committed_action() {
        let (mut c, fired) = controller();
        c.on_long_press_recognized();
        c.on_drag_changed(Offset::new(-30.0, 0.0), Some(ANCHOR));
        assert_eq!(c.selection().candidate(), Some(Action::Pin));
        assert_eq!(c.selection().committed(), None);

        c.on_drag_changed(Offset::new(-90.0, 0.0), Some(ANCHOR));
        assert_eq!(c.selection().committed(), Some(Action::Pin));

        assert_eq!(c.on_drag_ended(), Some(Action::Pin));
        assert_eq!(*fired.borrow(), vec![(0, Action::Pin)]);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.selection().is_default());
    }

    #[test]
    fn test_release_without_commit_fires_nothing() {
        let (mut c, fired) = controller();
        c.on_long_press_recognized();
        c.on_drag_changed(Offset::new(0.0, -40.0), Some(ANCHOR));
        assert_eq!(c.on_drag_ended(), None);
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_backing_out_of_commit_cancels_it() {
        let (mut c, fired) = controller();
        c.on_long_press_recognized();
        c.on_drag_changed(Offset::new(0.0, -100.0), Some(ANCHOR));
        assert_eq!(c.selection().committed(), Some(Action::More));
        c.on_drag_changed(Offset::new(0.0, -10.0), Some(ANCHOR));
        assert_eq!(c.on_drag_ended(), None);
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_start_location_is_captured_once() {
        let (mut c, _) = controller();
        c.on_long_press_recognized();
        c.on_drag_changed(Offset::ZERO, Some(ANCHOR));
        // a later sample reporting a different start keeps the first one
        let state = c.on_drag_changed(Offset::new(0.0, -75.0), Some(Point::new(500.0, 500.0)));
        assert_eq!(state.committed(), Some(Action::More));
    }

    #[test]
    fn test_non_finite_start_is_not_captured() {
        let (mut c, _) = controller();
        c.on_long_press_recognized();
        let state = c.on_drag_changed(Offset::ZERO, Some(Point::new(f64::NAN, 25.0)));
        assert!(state.is_default());

        let state = c.on_drag_changed(Offset::new(-90.0, 0.0), Some(ANCHOR));
        assert_eq!(state.committed(), Some(Action::Pin));
    }

    #[test]
    fn test_drag_without_start_keeps_state() {
        let (mut c, _) = controller();
        c.on_long_press_recognized();
        let state = c.on_drag_changed(Offset::new(-90.0, 0.0), None).clone();
        assert!(state.is_default());
    }

    #[test]
    fn test_reset_leaves_nothing_behind() {
        let (mut c, _) = controller();
        c.on_long_press_recognized();
        c.on_drag_changed(Offset::new(-90.0, 0.0), Some(ANCHOR));
        c.on_drag_ended();

        c.on_long_press_recognized();
        let state = c.on_drag_changed(Offset::ZERO, Some(ANCHOR)).clone();
        assert_eq!(state, SelectionState::default());

        let (mut fresh, _) = controller();
        fresh.on_long_press_recognized();
        let start = Some(Point::new(10.0, 40.0));
        c.on_drag_ended();
        c.on_long_press_recognized();
        assert_eq!(
            c.on_drag_changed(Offset::ZERO, start).clone(),
            fresh.on_drag_changed(Offset::ZERO, start).clone()
        );
    }

    #[test]
    fn test_reconfigure_abandons_gesture() {
        let (mut c, fired) = controller();
        c.on_long_press_recognized();
        c.on_drag_changed(Offset::new(-90.0, 0.0), Some(ANCHOR));

        let cfg = MenuConfig::default();
        c.reconfigure(
            Engine::new(&cfg).unwrap(),
            cfg.long_press(),
            Recorder(fired.clone()),
        );
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.on_drag_ended(), None);
        assert!(fired.borrow().is_empty());
    }
}
