//! Presentation preferences
//!
//! Read from the page URL query string. Nothing here affects the simulation,
//! and nothing is persisted between page loads.

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Whether to draw the horizontal scanline accents
    pub fn scanlines_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Whether skyline bar heights flicker every frame
    pub fn skyline_jitter(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Reduced motion (freeze skyline flicker)
    pub reduced_motion: bool,
    /// Silence all sound cues
    pub muted: bool,
    /// Fixed run seed (otherwise seeded from the clock)
    pub seed: Option<u64>,
}

impl Settings {
    /// Parse `?quality=low&reduced_motion=1&mute=1&seed=42`.
    /// Unknown keys and malformed values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            match key {
                "quality" => {
                    if let Some(preset) = QualityPreset::parse(value) {
                        settings.quality = preset;
                    }
                }
                "reduced_motion" => settings.reduced_motion = parse_flag(value),
                "mute" | "muted" => settings.muted = parse_flag(value),
                "seed" => settings.seed = value.parse().ok(),
                _ => log::debug!("Ignoring unknown setting `{}`", key),
            }
        }

        settings
    }

    /// Effective skyline flicker (respects reduced_motion)
    pub fn effective_skyline_jitter(&self) -> bool {
        self.quality.skyline_jitter() && !self.reduced_motion
    }

    /// Load settings from the current page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&search);
        log::info!(
            "Settings: quality={} reduced_motion={} muted={}",
            settings.quality.as_str(),
            settings.reduced_motion,
            settings.muted
        );
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "on" | "yes")
}
