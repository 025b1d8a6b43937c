use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_PALETTE, parse_hex, parse_palette};
use crate::command::DEFAULT_UNDO_DEPTH;
use crate::error::{PaintError, PaintResult};
use crate::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::tools::{DEFAULT_STROKE_WIDTH, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::viewport::{ZOOM_MAX, ZOOM_MIN};

/// Environment variable naming a JSON file with overrides
pub const CONFIG_ENV: &str = "MINI_PAINT_CONFIG";

/// Largest sheet edge accepted from a config file
const MAX_DIMENSION: u32 = 16_384;

/// Startup settings. Every field has a default, so a config file only needs
/// the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub primary: String,
    pub secondary: String,
    pub palette: Vec<String>,
    pub stroke_width: u32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub undo_depth: usize,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: "#FFFFFF".to_owned(),
            primary: "#000000".to_owned(),
            secondary: "#FFFFFF".to_owned(),
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }
}

impl PaintConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> PaintResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PaintError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `MINI_PAINT_CONFIG`, or the defaults when the
    /// variable is unset. Browsers have no environment, so the web build
    /// always uses the defaults.
    pub fn from_env() -> PaintResult<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(path) = std::env::var_os(CONFIG_ENV) {
                let json = std::fs::read_to_string(&path).map_err(|e| {
                    PaintError::InvalidConfig(format!("{}: {e}", path.to_string_lossy()))
                })?;
                log::info!("loading config from {}", path.to_string_lossy());
                return Self::from_json(&json);
            }
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> PaintResult<()> {
        let invalid = |msg: String| Err(PaintError::InvalidConfig(msg));

        if !(1..=MAX_DIMENSION).contains(&self.width) || !(1..=MAX_DIMENSION).contains(&self.height) {
            return invalid(format!(
                "sheet size {}x{} must be between 1 and {MAX_DIMENSION}",
                self.width, self.height
            ));
        }
        self.background_color()?;
        self.primary_color()?;
        self.secondary_color()?;
        if self.palette.is_empty() {
            return invalid("palette is empty".to_owned());
        }
        self.palette_colors()?;
        if !(MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).contains(&self.stroke_width) {
            return invalid(format!(
                "stroke width {} must be between {MIN_STROKE_WIDTH} and {MAX_STROKE_WIDTH}",
                self.stroke_width
            ));
        }
        let zoom_ok = self.zoom_min.is_finite()
            && self.zoom_max.is_finite()
            && self.zoom_min > 0.0
            && self.zoom_min <= 1.0
            && self.zoom_max >= 1.0;
        if !zoom_ok {
            return invalid(format!(
                "zoom range [{}, {}] must be positive and include 100%",
                self.zoom_min, self.zoom_max
            ));
        }
        if self.undo_depth == 0 {
            return invalid("undo depth must be at least 1".to_owned());
        }
        Ok(())
    }

    pub fn background_color(&self) -> PaintResult<Rgb<u8>> {
        parse_hex(&self.background)
    }

    pub fn primary_color(&self) -> PaintResult<Rgb<u8>> {
        parse_hex(&self.primary)
    }

    pub fn secondary_color(&self) -> PaintResult<Rgb<u8>> {
        parse_hex(&self.secondary)
    }

    pub fn palette_colors(&self) -> PaintResult<Vec<Rgb<u8>>> {
        parse_palette(&self.palette)
    }
}
