use vampire_engine::coords::ColorRgb;
use vampire_engine::device::GpuInit;
use vampire_engine::window::{LogicalSize, RuntimeConfig};

/// Game-level tuning. There are no config files; defaults are the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Gap in logical pixels around and between the door panels.
    pub margin: f32,
    pub left_color: ColorRgb,
    pub right_color: ColorRgb,
    pub clear_color: ColorRgb,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            left_color: ColorRgb::new(0.20, 0.35, 0.80),  // blue
            right_color: ColorRgb::new(0.80, 0.35, 0.20), // orange
            clear_color: ColorRgb::new(0.08, 0.08, 0.10),
        }
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        title: "Introverted Vampire".to_string(),
        initial_size: LogicalSize::new(1280.0, 720.0),
        ..RuntimeConfig::default()
    }
}

/// Colors are authored as final display values, so the surface must not
/// gamma-encode them.
pub fn gpu_init() -> GpuInit {
    GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    }
}
