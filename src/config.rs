/// Page-level tuning constants
///
/// Stored in the `config` object of a site markup file. Every field has a
/// default, so a markup file may omit the object entirely or set only the
/// values it wants to change.
use serde::{Deserialize, Serialize};

/// Scroll-spy section order used when a page does not override it
pub const DEFAULT_SECTIONS: [&str; 4] = ["home", "about", "gallery", "schedule"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Viewports at or below this width use the mobile layout
    pub mobile_breakpoint: f32,

    /// Space left between the fixed navbar and an anchor-scrolled section
    pub anchor_gap: f32,

    /// How far above a section its scroll-spy band starts (on top of the navbar)
    pub spy_offset: f32,

    /// Height of the fixed navigation bar
    pub navbar_height: f32,

    /// Section ids checked by scroll-spy, in priority order (last match wins)
    pub sections: Vec<String>,

    // ========== Carousel ==========

    /// Number of images in the carousel strip
    pub carousel_total: usize,

    /// Images visible at once on narrow viewports
    pub carousel_visible_narrow: usize,

    /// Images visible at once on wide viewports
    pub carousel_visible_wide: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            anchor_gap: 20.0,
            spy_offset: 100.0,
            navbar_height: 70.0,
            sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            carousel_total: 5,
            carousel_visible_narrow: 1,
            carousel_visible_wide: 3,
        }
    }
}

impl SiteConfig {
    /// Whether a viewport of this width gets the mobile layout
    pub fn is_narrow(&self, width: f32) -> bool {
        width <= self.mobile_breakpoint
    }

    /// Carousel images visible at once for a viewport width
    pub fn visible_for_width(&self, width: f32) -> usize {
        if self.is_narrow(width) {
            self.carousel_visible_narrow
        } else {
            self.carousel_visible_wide
        }
    }

    /// Track translation per carousel slide, as a percentage of the track
    ///
    /// Narrow: each image fills the track, so one slide is 100%. Wide: the
    /// track lays the whole strip side by side, so one slide is
    /// `100 / carousel_total` (20% for five images).
    pub fn carousel_step_percent(&self, width: f32) -> f32 {
        if self.is_narrow(width) || self.carousel_total == 0 {
            100.0
        } else {
            100.0 / self.carousel_total as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        let config = SiteConfig::default();
        assert!(config.is_narrow(768.0));
        assert!(!config.is_narrow(768.5));
        assert_eq!(config.visible_for_width(375.0), 1);
        assert_eq!(config.visible_for_width(1024.0), 3);
    }

    #[test]
    fn test_carousel_step() {
        let mut config = SiteConfig::default();
        assert_eq!(config.carousel_step_percent(600.0), 100.0);
        assert_eq!(config.carousel_step_percent(1024.0), 20.0);
        config.carousel_total = 8;
        assert_eq!(config.carousel_step_percent(1024.0), 12.5);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SiteConfig = serde_json::from_str(r#"{ "anchor_gap": 32 }"#).unwrap();
        assert_eq!(config.anchor_gap, 32.0);
        assert_eq!(config.mobile_breakpoint, 768.0);
        assert_eq!(config.sections, vec!["home", "about", "gallery", "schedule"]);
        assert_eq!(config.carousel_total, 5);
    }
}
