use super::action::Action;
use super::controller::Phase;
use super::geometry::{self, BandTable};
use super::model::SelectionState;
use super::theme::{ButtonStyle, Theme};
use crate::config::MenuConfig;
use popctl::geom::Offset;
use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub pop_distance: f64,
    pub emphasis_scale: f64,
    pub diameter: f64,
}

impl LayoutSettings {
    pub fn from_config(cfg: &MenuConfig) -> Self {
        Self {
            pop_distance: cfg.pop_distance,
            emphasis_scale: cfg.emphasis_scale,
            diameter: cfg.button_diameter,
        }
    }
}

/// Where and how to draw one satellite button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonLayout {
    pub action: Action,
    pub icon: &'static str,
    /// From the trigger's center.
    pub offset: Offset,
    pub scale: f64,
    pub opacity: f64,
    pub diameter: f64,
    pub style: ButtonStyle,
}

/// Buttons in display order. Each sits on its band's center line, so what the
/// user sees is what the pointer selects.
pub fn arrange(
    bands: &BandTable,
    state: &SelectionState,
    phase: Phase,
    settings: &LayoutSettings,
    theme: &Theme,
) -> Vec<ButtonLayout> {
    let (distance, opacity) = match phase {
        Phase::Engaged => (settings.pop_distance, 1.0),
        Phase::Idle => (0.0, 0.0),
    };

    Action::iter()
        .filter_map(|action| {
            let center = bands.center_of(action)?;
            let feedback = state.feedback(action);
            Some(ButtonLayout {
                action,
                icon: action.icon_name(),
                offset: geometry::direction_of(center).scaled(distance * feedback.extension),
                scale: if feedback.emphasized {
                    settings.emphasis_scale
                } else {
                    1.0
                },
                opacity,
                diameter: settings.diameter,
                style: theme.style(feedback.emphasized),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::engine::Engine;

    fn fixture() -> (Engine, LayoutSettings, Theme) {
        let cfg = MenuConfig::default();
        (
            Engine::new(&cfg).unwrap(),
            LayoutSettings::from_config(&cfg),
            Theme::default(),
        )
    }

    fn close(a: Offset, b: Offset) -> bool {
        (a.width - b.width).abs() < 1e-9 && (a.height - b.height).abs() < 1e-9
    }

    #[test]
    fn test_idle_buttons_collapse_and_hide() {
        let (engine, settings, theme) = fixture();
        let buttons = arrange(
            engine.bands(),
            &SelectionState::default(),
            Phase::Idle,
            &settings,
            &theme,
        );
        assert_eq!(buttons.len(), 4);
        for b in &buttons {
            assert!(close(b.offset, Offset::ZERO));
            assert_eq!(b.opacity, 0.0);
        }
    }

    #[test]
    fn test_engaged_positions_fan_out_from_left_to_up() {
        let (engine, settings, theme) = fixture();
        let buttons = arrange(
            engine.bands(),
            &SelectionState::default(),
            Phase::Engaged,
            &settings,
            &theme,
        );
        let order: Vec<Action> = buttons.iter().map(|b| b.action).collect();
        assert_eq!(order, [Action::Pin, Action::Share, Action::Cross, Action::More]);
        assert!(close(buttons[0].offset, Offset::new(-104.0, 0.0)));
        assert!(close(buttons[3].offset, Offset::new(0.0, -104.0)));
        assert!(buttons.iter().all(|b| b.opacity == 1.0 && b.scale == 1.0));
        assert_eq!(buttons[1].icon, "square.and.arrow.up");
    }

    #[test]
    fn test_rendered_buttons_lie_in_their_own_band() {
        let (engine, settings, theme) = fixture();
        let buttons = arrange(
            engine.bands(),
            &SelectionState::default(),
            Phase::Engaged,
            &settings,
            &theme,
        );
        for b in buttons {
            let state = engine.evaluate(engine.origin() + b.offset);
            assert_eq!(state.committed(), Some(b.action));
        }
    }

    #[test]
    fn test_feedback_drives_extension_scale_and_style() {
        let (engine, settings, theme) = fixture();

        let approaching = SelectionState::approaching(Some(Action::Cross), 1.05);
        let buttons = arrange(engine.bands(), &approaching, Phase::Engaged, &settings, &theme);
        let cross = &buttons[Action::Cross.index()];
        assert!(
            ((cross.offset.width.hypot(cross.offset.height)) - 104.0 * 1.05).abs() < 1e-9
        );
        assert_eq!(cross.style, theme.idle);

        let committed = SelectionState::committing(Some(Action::Pin));
        let buttons = arrange(engine.bands(), &committed, Phase::Engaged, &settings, &theme);
        assert_eq!(buttons[0].scale, 1.15);
        assert_eq!(buttons[0].style, theme.focus);
        assert_eq!(buttons[1].scale, 1.0);
    }
}
