//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.
//!
//! The reducer is the UI layer in front of [`crate::WindowManager`]: it applies the geometry
//! policy (no negative positions, minimum window size, no dragging maximized windows) and
//! turns state changes into [`RuntimeEffect`] values for the host to execute.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::apps::{launch, LaunchError};
use crate::feature_flags::FeatureFlag;
use crate::model::{OpenWindowRequest, Point, Rect, Size, WindowId};
use crate::runtime_context::DesktopRuntime;
use crate::settings::Theme;
use crate::taskbar::click_taskbar_button;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Actions accepted by [`reduce_desktop`].
pub enum DesktopAction {
    /// Open an app from the catalog, subject to wallet/admin gating.
    LaunchApp {
        /// Catalog app kind.
        app_kind: String,
    },
    /// Open a window directly, bypassing the catalog.
    OpenWindow(OpenWindowRequest),
    CloseWindow {
        window_id: WindowId,
    },
    FocusWindow {
        window_id: WindowId,
    },
    /// Toggle minimized state.
    MinimizeWindow {
        window_id: WindowId,
    },
    /// Toggle maximized state against `viewport` and raise the window.
    ToggleMaximize {
        window_id: WindowId,
        viewport: Rect,
    },
    MoveWindow {
        window_id: WindowId,
        position: Point,
    },
    ResizeWindow {
        window_id: WindowId,
        size: Size,
    },
    TaskbarClick {
        window_id: WindowId,
    },
    /// Wallet adapter reported a connect (`Some`) or disconnect (`None`).
    SetWallet {
        public_key: Option<String>,
    },
    ToggleMatrix,
    ToggleSettings,
    SetTheme {
        theme: Theme,
    },
    EnableFeature {
        flag: FeatureFlag,
    },
    DisableFeature {
        flag: FeatureFlag,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Move keyboard focus into the window's content.
    FocusWindowInput(WindowId),
    PersistSettings,
    PersistFeatureFlags,
    /// Show a toast explaining why a launch was refused.
    NotifyLaunchDenied {
        title: &'static str,
        description: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReducerError {
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Applies a [`DesktopAction`] and collects the resulting side effects.
///
/// Actions naming an unknown window change nothing and emit no effects.
///
/// # Errors
///
/// Returns [`ReducerError::Launch`] when [`DesktopAction::LaunchApp`] is refused.
pub fn reduce_desktop(
    runtime: &mut DesktopRuntime,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::LaunchApp { app_kind } => {
            let window_id = launch(
                &mut runtime.windows,
                &runtime.config,
                &runtime.wallet,
                &app_kind,
            )?;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::OpenWindow(req) => {
            let window_id = runtime.windows.open(req);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if runtime.windows.close(window_id) {
                if let Some(active) = runtime.windows.active_window_id() {
                    effects.push(RuntimeEffect::FocusWindowInput(active));
                }
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if runtime.windows.focus(window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            runtime.windows.minimize(window_id);
        }
        DesktopAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            if runtime.windows.toggle_maximize(window_id, viewport) {
                runtime.windows.focus(window_id);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MoveWindow {
            window_id,
            position,
        } => {
            let maximized = runtime
                .windows
                .window(window_id)
                .is_some_and(|w| w.is_maximized);
            if !maximized {
                runtime
                    .windows
                    .move_to(window_id, position.clamped_non_negative());
            }
        }
        DesktopAction::ResizeWindow { window_id, size } => {
            let maximized = runtime
                .windows
                .window(window_id)
                .is_some_and(|w| w.is_maximized);
            if !maximized {
                let limits = &runtime.config.windows;
                runtime.windows.resize(
                    window_id,
                    size.clamped_min(limits.min_width, limits.min_height),
                );
            }
        }
        DesktopAction::TaskbarClick { window_id } => {
            click_taskbar_button(&mut runtime.windows, window_id);
        }
        DesktopAction::SetWallet { public_key } => {
            runtime.wallet.public_key = public_key;
        }
        DesktopAction::ToggleMatrix => {
            runtime.settings.toggle_matrix();
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::ToggleSettings => {
            runtime.settings.toggle_settings();
        }
        DesktopAction::SetTheme { theme } => {
            if runtime.settings.set_theme(theme) {
                effects.push(RuntimeEffect::PersistSettings);
            }
        }
        DesktopAction::EnableFeature { flag } => {
            if runtime.flags.enable(flag) {
                effects.push(RuntimeEffect::PersistFeatureFlags);
            }
        }
        DesktopAction::DisableFeature { flag } => {
            if runtime.flags.disable(flag) {
                effects.push(RuntimeEffect::PersistFeatureFlags);
            }
        }
    }

    Ok(effects)
}

#[cfg(test)]
mod tests {
    use cryptodesk_app_contract::AppKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::DesktopConfig;

    fn runtime() -> DesktopRuntime {
        DesktopRuntime::new(DesktopConfig::default())
    }

    fn open(runtime: &mut DesktopRuntime, kind: &str) -> WindowId {
        let effects = reduce_desktop(
            runtime,
            DesktopAction::OpenWindow(
                OpenWindowRequest::new(AppKind::trusted(kind), kind)
                    .at(Point::new(60, 60))
                    .sized(Size::new(800, 600)),
            ),
        )
        .expect("open window");
        match effects.as_slice() {
            [RuntimeEffect::FocusWindowInput(id)] => *id,
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn launch_refusal_surfaces_as_error() {
        let mut runtime = runtime();
        let err = reduce_desktop(
            &mut runtime,
            DesktopAction::LaunchApp {
                app_kind: "ai-agent".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReducerError::Launch(LaunchError::WalletRequired(AppKind::trusted("ai-agent")))
        );

        reduce_desktop(
            &mut runtime,
            DesktopAction::SetWallet {
                public_key: Some("user-key".to_string()),
            },
        )
        .unwrap();
        let effects = reduce_desktop(
            &mut runtime,
            DesktopAction::LaunchApp {
                app_kind: "ai-agent".to_string(),
            },
        )
        .unwrap();
        assert_eq!(effects.len(), 1);
        assert_eq!(runtime.windows.len(), 1);
    }

    #[test]
    fn move_clamps_to_desktop_origin() {
        let mut runtime = runtime();
        let id = open(&mut runtime, "wallet");
        reduce_desktop(
            &mut runtime,
            DesktopAction::MoveWindow {
                window_id: id,
                position: Point::new(-30, 45),
            },
        )
        .unwrap();
        assert_eq!(
            runtime.windows.window(id).unwrap().position,
            Point::new(0, 45)
        );
    }

    #[test]
    fn resize_clamps_to_configured_minimum() {
        let mut runtime = runtime();
        let id = open(&mut runtime, "wallet");
        reduce_desktop(
            &mut runtime,
            DesktopAction::ResizeWindow {
                window_id: id,
                size: Size::new(120, -10),
            },
        )
        .unwrap();
        assert_eq!(runtime.windows.window(id).unwrap().size, Size::new(300, 200));
    }

    #[test]
    fn maximized_windows_ignore_drag_and_resize() {
        let mut runtime = runtime();
        let first = open(&mut runtime, "wallet");
        let second = open(&mut runtime, "socials");
        let viewport = Rect::new(0, 0, 1440, 852);

        let effects = reduce_desktop(
            &mut runtime,
            DesktopAction::ToggleMaximize {
                window_id: first,
                viewport,
            },
        )
        .unwrap();
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(first)]);
        assert_eq!(runtime.windows.active_window_id(), Some(first));
        assert_ne!(runtime.windows.active_window_id(), Some(second));

        reduce_desktop(
            &mut runtime,
            DesktopAction::MoveWindow {
                window_id: first,
                position: Point::new(300, 300),
            },
        )
        .unwrap();
        reduce_desktop(
            &mut runtime,
            DesktopAction::ResizeWindow {
                window_id: first,
                size: Size::new(400, 400),
            },
        )
        .unwrap();
        let record = runtime.windows.window(first).unwrap();
        assert_eq!(record.position, viewport.origin);
        assert_eq!(record.size, viewport.size);
    }

    #[test]
    fn unknown_window_actions_emit_nothing() {
        let mut runtime = runtime();
        open(&mut runtime, "wallet");
        let ghost = WindowId(404);
        for action in [
            DesktopAction::CloseWindow { window_id: ghost },
            DesktopAction::FocusWindow { window_id: ghost },
            DesktopAction::MinimizeWindow { window_id: ghost },
            DesktopAction::TaskbarClick { window_id: ghost },
            DesktopAction::ToggleMaximize {
                window_id: ghost,
                viewport: Rect::new(0, 0, 10, 10),
            },
        ] {
            assert_eq!(reduce_desktop(&mut runtime, action).unwrap(), Vec::new());
        }
        assert_eq!(runtime.windows.len(), 1);
    }

    #[test]
    fn closing_active_window_focuses_fallback_input() {
        let mut runtime = runtime();
        let first = open(&mut runtime, "wallet");
        let second = open(&mut runtime, "socials");
        let effects =
            reduce_desktop(&mut runtime, DesktopAction::CloseWindow { window_id: second })
                .unwrap();
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(first)]);
    }

    #[test]
    fn settings_and_flags_request_persistence_on_change() {
        let mut runtime = runtime();
        assert_eq!(
            reduce_desktop(&mut runtime, DesktopAction::ToggleMatrix).unwrap(),
            vec![RuntimeEffect::PersistSettings]
        );
        assert_eq!(
            reduce_desktop(&mut runtime, DesktopAction::ToggleSettings).unwrap(),
            Vec::new()
        );
        assert_eq!(
            reduce_desktop(&mut runtime, DesktopAction::SetTheme { theme: Theme::Dark }).unwrap(),
            Vec::new()
        );
        assert_eq!(
            reduce_desktop(
                &mut runtime,
                DesktopAction::EnableFeature {
                    flag: FeatureFlag::Rewards
                }
            )
            .unwrap(),
            vec![RuntimeEffect::PersistFeatureFlags]
        );
        assert_eq!(
            reduce_desktop(
                &mut runtime,
                DesktopAction::EnableFeature {
                    flag: FeatureFlag::Rewards
                }
            )
            .unwrap(),
            Vec::new()
        );
    }
}
