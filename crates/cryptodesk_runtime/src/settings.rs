use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Shell-wide toggles that survive reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    /// Animated matrix-rain wallpaper.
    pub matrix_enabled: bool,
    /// Panel visibility; always starts closed.
    #[serde(skip)]
    pub settings_open: bool,
    pub theme: Theme,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            matrix_enabled: true,
            settings_open: false,
            theme: Theme::Dark,
        }
    }
}

impl SystemSettings {
    pub fn toggle_matrix(&mut self) {
        self.matrix_enabled = !self.matrix_enabled;
    }

    pub fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
    }

    /// Returns `true` when the theme actually changed.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        let changed = self.theme != theme;
        self.theme = theme;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_fills_defaults() {
        let settings: SystemSettings =
            serde_json::from_str(r#"{"theme":"light"}"#).expect("partial settings");
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.matrix_enabled);
        assert!(!settings.settings_open);
    }

    #[test]
    fn settings_panel_state_is_not_persisted() {
        let mut settings = SystemSettings::default();
        settings.toggle_settings();
        let raw = serde_json::to_string(&settings).expect("serialize");
        assert!(!raw.contains("settings_open"));
        let restored: SystemSettings = serde_json::from_str(&raw).expect("deserialize");
        assert!(!restored.settings_open);
    }

    #[test]
    fn toggles_flip_and_theme_reports_change() {
        let mut settings = SystemSettings::default();
        settings.toggle_matrix();
        settings.toggle_settings();
        assert!(!settings.matrix_enabled);
        assert!(settings.settings_open);
        assert!(!settings.set_theme(Theme::Dark));
        assert!(settings.set_theme(Theme::Light));
    }
}
