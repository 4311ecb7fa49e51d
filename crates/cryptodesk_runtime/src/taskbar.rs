//! Taskbar projection over the open windows.

use cryptodesk_app_contract::AppKind;
use serde::{Deserialize, Serialize};

use crate::apps::app_descriptor;
use crate::model::WindowId;
use crate::window_manager::WindowManager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarButton {
    pub window_id: WindowId,
    pub app_kind: AppKind,
    pub title: String,
    pub icon_id: Option<String>,
    pub is_active: bool,
    pub is_minimized: bool,
}

/// One button per open window, minimized ones included, in opening order.
pub fn taskbar_buttons(manager: &WindowManager) -> Vec<TaskbarButton> {
    let active = manager.active_window_id();
    manager
        .windows()
        .iter()
        .map(|window| TaskbarButton {
            window_id: window.id,
            app_kind: window.app_kind.clone(),
            title: window.title.clone(),
            icon_id: app_descriptor(window.app_kind.as_str()).map(|d| d.icon_id.clone()),
            is_active: active == Some(window.id),
            is_minimized: window.is_minimized,
        })
        .collect()
}

/// A taskbar click toggles minimized state and nothing else.
pub fn click_taskbar_button(manager: &mut WindowManager, window_id: WindowId) -> bool {
    manager.minimize(window_id)
}
