//! Configuration: optional TOML file merged over defaults, plus theme color
//! parsing with terminal capability detection.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use supports_color::Stream;

/// Manages config directory and config file operations
#[derive(Clone)]
pub struct ConfigManager {
    pub(crate) config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with a custom config directory (primarily for testing)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Create a new ConfigManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre!("Could not determine config directory"))?
            .join(app_name);

        Ok(Self { config_dir })
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get path to a specific config file
    pub fn config_path(&self, path: &str) -> PathBuf {
        self.config_dir.join(path)
    }

    /// Ensure the config directory exists
    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Default configuration as a commented-out template: every field shows
    /// its default but stays inactive until the user uncomments it.
    pub fn generate_default_config(&self) -> String {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config)
            .unwrap_or_else(|e| panic!("Failed to serialize default config: {}", e));

        let mut result = String::new();
        result.push_str("# crictui configuration file\n");
        result
            .push_str("# This file uses TOML format. See https://toml.io/ for syntax reference.\n");
        result.push_str("# Uncomment a line to override its default.\n");
        result.push('\n');
        for line in toml_str.lines() {
            if line.trim().is_empty() {
                result.push('\n');
            } else {
                result.push_str("# ");
                result.push_str(line);
                result.push('\n');
            }
        }
        result
    }

    /// Write the default config template to config.toml. Refuses to clobber
    /// an existing file.
    pub fn write_default_config(&self) -> Result<PathBuf> {
        self.ensure_config_dir()?;
        let path = self.config_path("config.toml");
        if path.exists() {
            return Err(eyre!(
                "Config file already exists at {}; remove it first",
                path.display()
            ));
        }
        std::fs::write(&path, self.generate_default_config())?;
        Ok(path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration format version (for future compatibility)
    pub version: String,
    pub display: DisplayConfig,
    pub chart: ChartConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows of the per-delivery table shown in the overview preview.
    pub preview_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Bin count for the innings run-distribution histograms.
    pub hist_bins: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub colors: ColorConfig,
}

/// Color configuration. Colors can be named ("cyan"), hex ("#ff0000"), or
/// indexed ("indexed(236)" for the 256-color palette).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub text_primary: String,
    pub text_secondary: String,
    pub table_header: String,
    pub table_header_bg: String,
    pub border: String,
    pub border_active: String,
    pub error: String,
    pub keybind_hints: String,
    pub keybind_labels: String,
    pub controls_bg: String,
    pub trend_series: String,
    pub bar_series: String,
    pub first_innings_series: String,
    pub second_innings_series: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            display: DisplayConfig::default(),
            chart: ChartConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { preview_rows: 5 }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            hist_bins: crate::chart_data::DEFAULT_HIST_BINS,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            text_primary: "default".to_string(),
            text_secondary: "indexed(240)".to_string(),
            table_header: "white".to_string(),
            table_header_bg: "indexed(235)".to_string(),
            border: "indexed(235)".to_string(),
            border_active: "yellow".to_string(),
            error: "red".to_string(),
            keybind_hints: "cyan".to_string(),
            keybind_labels: "indexed(252)".to_string(),
            controls_bg: "indexed(235)".to_string(),
            // Series colors follow the palette the dashboard has always used:
            // tomato trend line, steel-blue bars, and the per-innings pair.
            trend_series: "#ff6347".to_string(),
            bar_series: "#4682b4".to_string(),
            first_innings_series: "#4682b4".to_string(),
            second_innings_series: "#ff4500".to_string(),
        }
    }
}

// Configuration loading and merging
impl AppConfig {
    /// Load configuration from all layers (default → user)
    pub fn load(app_name: &str) -> Result<Self> {
        let mut config = AppConfig::default();

        let config_path = ConfigManager::new(app_name)
            .ok()
            .map(|m| m.config_path("config.toml"));
        if let Ok(user_config) = Self::load_user_config(app_name) {
            config.merge(user_config);
        }

        // Validate configuration (e.g. color names); report config file path on error
        config.validate().map_err(|e| {
            let path_hint = config_path
                .as_ref()
                .map(|p| format!(" in {}", p.display()))
                .unwrap_or_default();
            eyre!("Invalid configuration{}: {}", path_hint, e)
        })?;

        Ok(config)
    }

    /// Load user configuration from the platform config directory
    fn load_user_config(app_name: &str) -> Result<AppConfig> {
        let config_manager = ConfigManager::new(app_name)?;
        let config_path = config_manager.config_path("config.toml");

        if !config_path.exists() {
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            eyre!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            eyre!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            )
        })
    }

    pub fn merge(&mut self, other: Self) {
        self.display.merge(other.display);
        self.chart.merge(other.chart);
        self.theme.merge(other.theme);
    }

    fn validate(&self) -> Result<()> {
        if self.display.preview_rows == 0 {
            return Err(eyre!("display.preview_rows must be at least 1"));
        }
        if self.chart.hist_bins == 0 {
            return Err(eyre!("chart.hist_bins must be at least 1"));
        }
        let parser = ColorParser::new();
        self.theme.colors.validate(&parser)?;
        Ok(())
    }
}

impl DisplayConfig {
    pub fn merge(&mut self, other: Self) {
        let default = DisplayConfig::default();
        if other.preview_rows != default.preview_rows {
            self.preview_rows = other.preview_rows;
        }
    }
}

impl ChartConfig {
    pub fn merge(&mut self, other: Self) {
        let default = ChartConfig::default();
        if other.hist_bins != default.hist_bins {
            self.hist_bins = other.hist_bins;
        }
    }
}

impl ThemeConfig {
    pub fn merge(&mut self, other: Self) {
        self.colors.merge(other.colors);
    }
}

impl ColorConfig {
    /// Validate all color strings can be parsed
    fn validate(&self, parser: &ColorParser) -> Result<()> {
        macro_rules! validate_color {
            ($field:expr, $name:expr) => {
                parser.parse($field).map_err(|e| {
                    eyre!(
                        "theme.colors.{}: {}. Use a valid color name (e.g. red, cyan, bright_red), \
                         hex (#rrggbb), or indexed(0-255)",
                        $name,
                        e
                    )
                })?;
            };
        }

        validate_color!(&self.text_primary, "text_primary");
        validate_color!(&self.text_secondary, "text_secondary");
        validate_color!(&self.table_header, "table_header");
        validate_color!(&self.table_header_bg, "table_header_bg");
        validate_color!(&self.border, "border");
        validate_color!(&self.border_active, "border_active");
        validate_color!(&self.error, "error");
        validate_color!(&self.keybind_hints, "keybind_hints");
        validate_color!(&self.keybind_labels, "keybind_labels");
        validate_color!(&self.controls_bg, "controls_bg");
        validate_color!(&self.trend_series, "trend_series");
        validate_color!(&self.bar_series, "bar_series");
        validate_color!(&self.first_innings_series, "first_innings_series");
        validate_color!(&self.second_innings_series, "second_innings_series");

        Ok(())
    }

    pub fn merge(&mut self, other: Self) {
        let default = ColorConfig::default();
        macro_rules! merge_color {
            ($field:ident) => {
                if other.$field != default.$field {
                    self.$field = other.$field;
                }
            };
        }
        merge_color!(text_primary);
        merge_color!(text_secondary);
        merge_color!(table_header);
        merge_color!(table_header_bg);
        merge_color!(border);
        merge_color!(border_active);
        merge_color!(error);
        merge_color!(keybind_hints);
        merge_color!(keybind_labels);
        merge_color!(controls_bg);
        merge_color!(trend_series);
        merge_color!(bar_series);
        merge_color!(first_innings_series);
        merge_color!(second_innings_series);
    }
}

/// Parses color strings into terminal colors appropriate for the terminal's
/// capabilities.
pub struct ColorParser {
    supports_true_color: bool,
    supports_256: bool,
    no_color: bool,
}

impl ColorParser {
    /// Create a new ColorParser with automatic terminal capability detection
    pub fn new() -> Self {
        let no_color = std::env::var("NO_COLOR").is_ok();
        let support = supports_color::on(Stream::Stdout);

        Self {
            supports_true_color: support.as_ref().map(|s| s.has_16m).unwrap_or(false),
            supports_256: support.as_ref().map(|s| s.has_256).unwrap_or(false),
            no_color,
        }
    }

    /// Parse a color string (hex, indexed, or named) and convert to an
    /// appropriate terminal color
    pub fn parse(&self, s: &str) -> Result<Color> {
        if self.no_color {
            return Ok(Color::Reset);
        }

        let trimmed = s.trim();

        // Hex format: "#ff0000" (6-character hex)
        if trimmed.starts_with('#') && trimmed.len() == 7 {
            let (r, g, b) = parse_hex(trimmed)?;
            return Ok(self.convert_rgb_to_terminal_color(r, g, b));
        }

        // Indexed colors: "indexed(236)" for explicit 256-color palette
        if trimmed.to_lowercase().starts_with("indexed(") && trimmed.ends_with(')') {
            let num_str = &trimmed[8..trimmed.len() - 1];
            let num = num_str.parse::<u8>().map_err(|_| {
                eyre!(
                    "Invalid indexed color: '{}'. Expected format: indexed(0-255)",
                    trimmed
                )
            })?;
            return Ok(Color::Indexed(num));
        }

        // Named colors (case-insensitive)
        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            "gray" | "grey" => Ok(Color::Gray),
            "dark_gray" | "dark_grey" => Ok(Color::DarkGray),
            "bright_red" | "light_red" => Ok(Color::LightRed),
            "bright_green" | "light_green" => Ok(Color::LightGreen),
            "bright_yellow" | "light_yellow" => Ok(Color::LightYellow),
            "bright_blue" | "light_blue" => Ok(Color::LightBlue),
            "bright_magenta" | "light_magenta" => Ok(Color::LightMagenta),
            "bright_cyan" | "light_cyan" => Ok(Color::LightCyan),
            "white" => Ok(Color::White),
            "default" | "reset" => Ok(Color::Reset),
            _ => Err(eyre!("Unknown color name: '{}'", trimmed)),
        }
    }

    /// Pick the closest representation the terminal can show for an RGB value
    fn convert_rgb_to_terminal_color(&self, r: u8, g: u8, b: u8) -> Color {
        if self.supports_true_color {
            Color::Rgb(r, g, b)
        } else if self.supports_256 {
            Color::Indexed(rgb_to_256_color(r, g, b))
        } else {
            rgb_to_basic_ansi(r, g, b)
        }
    }
}

impl Default for ColorParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse hex color string (#ff0000) to RGB components
fn parse_hex(s: &str) -> Result<(u8, u8, u8)> {
    if !s.starts_with('#') || s.len() != 7 {
        return Err(eyre!("Invalid hex color: '{}'. Expected format: #rrggbb", s));
    }
    let r = u8::from_str_radix(&s[1..3], 16).map_err(|_| eyre!("Invalid hex color: '{}'", s))?;
    let g = u8::from_str_radix(&s[3..5], 16).map_err(|_| eyre!("Invalid hex color: '{}'", s))?;
    let b = u8::from_str_radix(&s[5..7], 16).map_err(|_| eyre!("Invalid hex color: '{}'", s))?;
    Ok((r, g, b))
}

/// Map RGB to the nearest entry of the xterm 256-color cube/grayscale ramp.
pub fn rgb_to_256_color(r: u8, g: u8, b: u8) -> u8 {
    // Grayscale ramp (232-255) when the channels are close together
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max - min < 10 {
        if max < 8 {
            return 16; // cube black
        }
        if max > 248 {
            return 231; // cube white
        }
        return 232 + (((max as u16 - 8) * 24 / 240).min(23)) as u8;
    }

    // 6x6x6 color cube (16-231)
    let to_cube = |c: u8| -> u16 {
        if c < 48 {
            0
        } else if c < 114 {
            1
        } else {
            ((c as u16) - 35) / 40
        }
    };
    (16 + 36 * to_cube(r) + 6 * to_cube(g) + to_cube(b)) as u8
}

/// Map RGB to the closest of the 16 basic ANSI colors.
pub fn rgb_to_basic_ansi(r: u8, g: u8, b: u8) -> Color {
    let bright = r.max(g).max(b) > 170;
    let threshold = 85;
    match (r > threshold, g > threshold, b > threshold) {
        (false, false, false) => Color::Black,
        (true, false, false) => {
            if bright {
                Color::LightRed
            } else {
                Color::Red
            }
        }
        (false, true, false) => {
            if bright {
                Color::LightGreen
            } else {
                Color::Green
            }
        }
        (false, false, true) => {
            if bright {
                Color::LightBlue
            } else {
                Color::Blue
            }
        }
        (true, true, false) => {
            if bright {
                Color::LightYellow
            } else {
                Color::Yellow
            }
        }
        (true, false, true) => {
            if bright {
                Color::LightMagenta
            } else {
                Color::Magenta
            }
        }
        (false, true, true) => {
            if bright {
                Color::LightCyan
            } else {
                Color::Cyan
            }
        }
        (true, true, true) => {
            if bright {
                Color::White
            } else {
                Color::Gray
            }
        }
    }
}

/// Resolved theme: color-name keys mapped to terminal colors.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub colors: HashMap<String, Color>,
}

impl Theme {
    /// Create a Theme from a ThemeConfig by parsing all color strings
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        let parser = ColorParser::new();
        let c = &config.colors;
        let mut colors = HashMap::new();

        colors.insert("text_primary".to_string(), parser.parse(&c.text_primary)?);
        colors.insert(
            "text_secondary".to_string(),
            parser.parse(&c.text_secondary)?,
        );
        colors.insert("table_header".to_string(), parser.parse(&c.table_header)?);
        colors.insert(
            "table_header_bg".to_string(),
            parser.parse(&c.table_header_bg)?,
        );
        colors.insert("border".to_string(), parser.parse(&c.border)?);
        colors.insert("border_active".to_string(), parser.parse(&c.border_active)?);
        colors.insert("error".to_string(), parser.parse(&c.error)?);
        colors.insert("keybind_hints".to_string(), parser.parse(&c.keybind_hints)?);
        colors.insert(
            "keybind_labels".to_string(),
            parser.parse(&c.keybind_labels)?,
        );
        colors.insert("controls_bg".to_string(), parser.parse(&c.controls_bg)?);
        colors.insert("trend_series".to_string(), parser.parse(&c.trend_series)?);
        colors.insert("bar_series".to_string(), parser.parse(&c.bar_series)?);
        colors.insert(
            "first_innings_series".to_string(),
            parser.parse(&c.first_innings_series)?,
        );
        colors.insert(
            "second_innings_series".to_string(),
            parser.parse(&c.second_innings_series)?,
        );

        Ok(Self { colors })
    }

    /// Look up a color by key. Unknown keys fall back to the terminal default.
    pub fn get(&self, key: &str) -> Color {
        self.colors.get(key).copied().unwrap_or(Color::Reset)
    }
}
