use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct HudConfig {
    /// Assumed eye height in meters until tracking reports a real one.
    #[serde(default = "HudConfig::default_eye_height")]
    pub eye_height: f32,
    /// Offset from eye height at which the HUD pivot rides.
    #[serde(default)]
    pub vertical_offset: f32,
    /// Distance from the player at which HUD windows hang.
    #[serde(default = "HudConfig::default_distance")]
    pub distance: f32,
}

impl HudConfig {
    fn default_eye_height() -> f32 {
        1.6
    }

    fn default_distance() -> f32 {
        0.5
    }
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            eye_height: Self::default_eye_height(),
            vertical_offset: 0.0,
            distance: Self::default_distance(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionConfig {
    /// Fingertip distance from a window plane that counts as a click.
    #[serde(default = "InteractionConfig::default_press_distance")]
    pub press_distance: f32,
    /// Window 2D content size to 3D size ratio, meters per content unit.
    #[serde(default = "InteractionConfig::default_viewport_scale")]
    pub viewport_scale: f32,
}

impl InteractionConfig {
    fn default_press_distance() -> f32 {
        crate::surface::DEFAULT_PRESS_DISTANCE
    }

    fn default_viewport_scale() -> f32 {
        crate::surface::DEFAULT_VIEWPORT_SCALE
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            press_distance: Self::default_press_distance(),
            viewport_scale: Self::default_viewport_scale(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockConfig {
    #[serde(default = "DockConfig::default_width")]
    pub width: f32,
    #[serde(default = "DockConfig::default_height")]
    pub height: f32,
    /// Lateral offset of each dock from the HUD center, meters.
    #[serde(default = "DockConfig::default_lateral_offset")]
    pub lateral_offset: f32,
    /// Yaw of each dock toward the player, degrees.
    #[serde(default = "DockConfig::default_yaw_degrees")]
    pub yaw_degrees: f32,
}

impl DockConfig {
    fn default_width() -> f32 {
        500.0
    }

    fn default_height() -> f32 {
        1000.0
    }

    fn default_lateral_offset() -> f32 {
        0.5
    }

    fn default_yaw_degrees() -> f32 {
        10.0
    }
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            lateral_offset: Self::default_lateral_offset(),
            yaw_degrees: Self::default_yaw_degrees(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub hud: HudConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub docks: DockConfig,
    #[serde(default = "ShellConfig::default_show_performance_info")]
    pub show_performance_info: bool,
}

impl ShellConfig {
    const fn default_show_performance_info() -> bool {
        true
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("[config] {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ShellConfigOverrides) {
        if let Some(distance) = overrides.hud_distance {
            self.hud.distance = distance;
        }
        if let Some(offset) = overrides.hud_offset {
            self.hud.vertical_offset = offset;
        }
        if let Some(show) = overrides.show_performance_info {
            self.show_performance_info = show;
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            hud: HudConfig::default(),
            interaction: InteractionConfig::default(),
            docks: DockConfig::default(),
            show_performance_info: Self::default_show_performance_info(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShellConfigOverrides {
    pub hud_distance: Option<f32>,
    pub hud_offset: Option<f32>,
    pub show_performance_info: Option<bool>,
}
