pub mod apps;
pub mod config;
pub mod events;
pub mod feature_flags;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod settings;
pub mod taskbar;
pub mod window_manager;

pub use apps::{app_descriptor, app_registry, launch, launcher_apps, AppDescriptor, LaunchError};
pub use config::{ConfigError, DesktopConfig};
pub use events::{DesktopEvent, SubscriptionId};
pub use feature_flags::{FeatureFlag, FeatureFlags};
pub use model::*;
pub use persistence::run_persistence_effects;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime_context::DesktopRuntime;
pub use settings::{SystemSettings, Theme};
pub use taskbar::{taskbar_buttons, TaskbarButton};
pub use window_manager::WindowManager;
