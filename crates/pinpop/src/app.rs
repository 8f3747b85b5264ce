use crate::config::{self, AnimationConfig, Config, ConfigError};
use crate::events::{AppEvent, Gesture};
use crate::menu::{
    Action, ButtonLayout, Controller, Engine, LayoutSettings, Phase, SelectionState, Theme,
    Transition, arrange,
};
use crate::sys::dispatch::CommandDispatch;
use async_channel::Receiver;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

/// Everything a renderer needs to draw the menu after one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub selection: SelectionState,
    pub buttons: Vec<ButtonLayout>,
    pub transition: Transition,
    pub fired: Option<Action>,
}

pub type SharedSnapshot = Arc<RwLock<Snapshot>>;

/// Single owner of the menu state. Events are applied one at a time.
pub struct App {
    controller: Controller<CommandDispatch>,
    layout: LayoutSettings,
    theme: Theme,
    animation: AnimationConfig,
    published: SharedSnapshot,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let controller = Controller::new(
            Engine::new(&config.menu)?,
            config.menu.long_press(),
            CommandDispatch::new(config.actions.clone()),
        );
        let layout = LayoutSettings::from_config(&config.menu);
        let theme = Theme::from_config(&config.theme);
        let initial = Snapshot {
            phase: controller.phase(),
            selection: controller.selection().clone(),
            buttons: arrange(
                controller.engine().bands(),
                controller.selection(),
                controller.phase(),
                &layout,
                &theme,
            ),
            transition: Transition::None,
            fired: None,
        };

        Ok(Self {
            controller,
            layout,
            theme,
            animation: config.animation.clone(),
            published: Arc::new(RwLock::new(initial)),
        })
    }

    /// Last snapshot, readable from other threads between events.
    pub fn published(&self) -> SharedSnapshot {
        self.published.clone()
    }

    fn snapshot(&self, transition: Transition, fired: Option<Action>) -> Snapshot {
        let phase = self.controller.phase();
        let selection = self.controller.selection();
        Snapshot {
            phase,
            selection: selection.clone(),
            buttons: arrange(
                self.controller.engine().bands(),
                selection,
                phase,
                &self.layout,
                &self.theme,
            ),
            transition,
            fired,
        }
    }

    fn apply(&mut self, gesture: Gesture) -> Snapshot {
        let was = self.controller.phase();

        let (transition, fired) = match gesture {
            Gesture::Press(held) => {
                match held {
                    Some(held) => {
                        self.controller.on_press(held);
                    }
                    None => self.controller.on_long_press_recognized(),
                }
                let engaged = was == Phase::Idle && self.controller.phase() == Phase::Engaged;
                let transition = if engaged {
                    Transition::engage(&self.animation)
                } else {
                    Transition::None
                };
                (transition, None)
            }
            Gesture::Drag { translation, start } => {
                self.controller.on_drag_changed(translation, start);
                let transition = match was {
                    Phase::Engaged => Transition::Track,
                    Phase::Idle => Transition::None,
                };
                (transition, None)
            }
            Gesture::Release => {
                let fired = self.controller.on_drag_ended();
                (self.release_transition(was), fired)
            }
        };

        self.snapshot(transition, fired)
    }

    fn release_transition(&self, was: Phase) -> Transition {
        match was {
            Phase::Engaged => Transition::release(&self.animation),
            Phase::Idle => Transition::None,
        }
    }

    /// Rebuilds everything but the socket from `config`. On error nothing changes.
    pub fn reload(&mut self, config: &Config) -> Result<Snapshot, ConfigError> {
        let engine = Engine::new(&config.menu)?;
        let was = self.controller.phase();

        self.controller.reconfigure(
            engine,
            config.menu.long_press(),
            CommandDispatch::new(config.actions.clone()),
        );
        self.layout = LayoutSettings::from_config(&config.menu);
        self.theme = Theme::from_config(&config.theme);
        self.animation = config.animation.clone();

        Ok(self.snapshot(self.release_transition(was), None))
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Gesture(gesture, reply) => {
                let snapshot = self.apply(gesture);
                *self.published.write() = snapshot.clone();
                if let Some(reply) = reply {
                    let _ = reply.try_send(snapshot);
                }
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => match self.reload(&new_config) {
                    Ok(snapshot) => {
                        *self.published.write() = snapshot;
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Rejected reloaded config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    /// Applies events until every sender is gone.
    pub fn run(mut self, rx: Receiver<AppEvent>) {
        while let Ok(event) = rx.recv_blocking() {
            self.handle(event);
        }
    }
}
