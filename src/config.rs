//! Page configuration: element hooks, asset paths, timings and texts.
//!
//! Every field has a default matching the shipped page. With the `serde`
//! feature the struct deserializes from a partial document (missing fields keep
//! their defaults); `serde_json` adds [`ProposalConfig::from_json`].

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::error::ProposalError;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProposalConfig {
    pub elements: ElementIds,
    /// Directory (URL prefix) holding the sound clips.
    pub asset_root: String,
    /// Looping track started on success, relative to `asset_root`.
    pub ambient_track: String,
    pub clip_volume: f64,
    /// Seconds into the ambient track where playback starts.
    pub ambient_offset_secs: f64,
    pub fade: FadeConfig,
    /// Viewports narrower than this grow the Yes button faster.
    pub narrow_breakpoint_px: f64,
    pub teleport_margin_px: f64,
    pub decoy_margin_px: f64,
    /// Gap kept between the subtitle's bottom edge and any decoy.
    pub decoy_subtitle_gap_px: f64,
    pub haptic_ms: u32,
    pub envelope_open_delay_ms: i32,
    pub heart_interval_ms: i32,
    pub heart_lifetime_ms: i32,
    pub typewriter_interval_ms: i32,
    pub success_title: String,
    pub success_image: String,
    pub final_message: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FadeConfig {
    pub step: f64,
    pub max_volume: f64,
    pub interval_ms: i32,
}

/// DOM ids (`#` omitted) and CSS selectors the page binds to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    pub envelope: String,
    pub letter: String,
    pub no_button: String,
    pub yes_button_selector: String,
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub buttons: String,
    pub final_text: String,
    pub sound_toggle: String,
    pub letter_window_selector: String,
    pub content_wrapper_selector: String,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            asset_root: "sound-effects".to_string(),
            ambient_track: "background_yes_music.mp3".to_string(),
            clip_volume: 0.5,
            ambient_offset_secs: 10.0,
            fade: FadeConfig::default(),
            narrow_breakpoint_px: 768.0,
            teleport_margin_px: 10.0,
            decoy_margin_px: 20.0,
            decoy_subtitle_gap_px: 15.0,
            haptic_ms: 40,
            envelope_open_delay_ms: 50,
            heart_interval_ms: 150,
            heart_lifetime_ms: 3000,
            typewriter_interval_ms: 50,
            success_title: "Yippeeee!".to_string(),
            success_image: "cat_dance.gif".to_string(),
            final_message:
                "EU TE AMO! ❤️ Valentine Date: Be ready to get wet and dress fancy! ❤️"
                    .to_string(),
        }
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            step: 0.008,
            max_volume: 0.5,
            interval_ms: 100,
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            envelope: "envelope-container".to_string(),
            letter: "letter-container".to_string(),
            no_button: "no-btn".to_string(),
            yes_button_selector: ".yes-btn".to_string(),
            title: "letter-title".to_string(),
            subtitle: "letter-subtitle".to_string(),
            image: "letter-cat".to_string(),
            buttons: "letter-buttons".to_string(),
            final_text: "final-text".to_string(),
            sound_toggle: "sound-toggle".to_string(),
            letter_window_selector: ".letter-window".to_string(),
            content_wrapper_selector: ".content-wrapper".to_string(),
        }
    }
}

impl ProposalConfig {
    /// Full URL of a clip listed in the sound manifest.
    pub fn clip_url(&self, relative: &str) -> String {
        join_asset(&self.asset_root, relative)
    }

    pub fn ambient_url(&self) -> String {
        join_asset(&self.asset_root, &self.ambient_track)
    }

    /// Rejects values the page timers and placement cannot work with.
    pub fn validate(&self) -> Result<(), ProposalError> {
        let fade = &self.fade;
        if !(fade.step > 0.0 && fade.step.is_finite()) {
            return Err(invalid(format!("fade.step must be positive, got {}", fade.step)));
        }
        if !(fade.max_volume > 0.0 && fade.max_volume <= 1.0) {
            return Err(invalid(format!(
                "fade.max_volume must be in (0, 1], got {}",
                fade.max_volume
            )));
        }
        if !(0.0..=1.0).contains(&self.clip_volume) {
            return Err(invalid(format!("clip_volume must be in [0, 1], got {}", self.clip_volume)));
        }
        for (name, ms) in [
            ("fade.interval_ms", fade.interval_ms),
            ("heart_interval_ms", self.heart_interval_ms),
            ("heart_lifetime_ms", self.heart_lifetime_ms),
            ("typewriter_interval_ms", self.typewriter_interval_ms),
        ] {
            if ms <= 0 {
                return Err(invalid(format!("{name} must be positive, got {ms}")));
            }
        }
        if self.envelope_open_delay_ms < 0 {
            return Err(invalid(format!(
                "envelope_open_delay_ms must not be negative, got {}",
                self.envelope_open_delay_ms
            )));
        }
        for (name, px) in [
            ("teleport_margin_px", self.teleport_margin_px),
            ("decoy_margin_px", self.decoy_margin_px),
            ("decoy_subtitle_gap_px", self.decoy_subtitle_gap_px),
        ] {
            if px.is_nan() || px < 0.0 {
                return Err(invalid(format!("{name} must not be negative, got {px}")));
            }
        }
        Ok(())
    }

    /// Parses a partial override and validates the result.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ProposalError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn invalid(msg: String) -> ProposalError {
    ProposalError::Config(msg)
}

fn join_asset(root: &str, relative: &str) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        relative.to_string()
    } else {
        format!("{root}/{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_urls_join_under_asset_root() {
        let cfg = ProposalConfig::default();
        assert_eq!(cfg.clip_url("yes/1.mp3"), "sound-effects/yes/1.mp3");
        assert_eq!(cfg.ambient_url(), "sound-effects/background_yes_music.mp3");
    }

    #[test]
    fn trailing_slash_and_empty_root() {
        assert_eq!(join_asset("assets/", "a.mp3"), "assets/a.mp3");
        assert_eq!(join_asset("", "a.mp3"), "a.mp3");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ProposalConfig::from_json(
            r#"{ "success_title": "Yay", "fade": { "max_volume": 0.8 }, "elements": { "no_button": "nope" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.success_title, "Yay");
        assert_eq!(cfg.fade.max_volume, 0.8);
        assert_eq!(cfg.fade.step, 0.008);
        assert_eq!(cfg.elements.no_button, "nope");
        assert_eq!(cfg.elements.subtitle, "letter-subtitle");
        assert_eq!(cfg.narrow_breakpoint_px, 768.0);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ProposalConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ProposalError::Config(_)));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(ProposalConfig::default().validate().is_ok());
    }

    #[test]
    fn stalled_fade_and_zero_intervals_are_rejected() {
        let mut cfg = ProposalConfig::default();
        cfg.fade.step = 0.0;
        assert!(matches!(cfg.validate(), Err(ProposalError::Config(_))));

        let mut cfg = ProposalConfig::default();
        cfg.fade.max_volume = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = ProposalConfig::default();
        cfg.heart_interval_ms = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = ProposalConfig::default();
        cfg.decoy_margin_px = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_with_unusable_timings_is_a_config_error() {
        let err = ProposalConfig::from_json(
            r#"{ "fade": { "step": 0.0 }, "heart_interval_ms": 0, "typewriter_interval_ms": -5 }"#,
        )
        .unwrap_err();
        match err {
            ProposalError::Config(msg) => assert!(msg.contains("fade.step"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
        let err = ProposalConfig::from_json(r#"{ "typewriter_interval_ms": -5 }"#).unwrap_err();
        assert!(err.to_string().contains("typewriter_interval_ms"));
    }
}
