//! Terminal "Yes" transition: one-shot guard, typewriter reveal, heart rain.

use rand::Rng;

use crate::audio::VolumeFade;
use crate::config::ProposalConfig;

/// Timings and texts for the celebration, resolved from config once.
#[derive(Clone, Debug, PartialEq)]
pub struct SuccessPlan {
    pub title: String,
    pub image: String,
    pub ambient_offset_secs: f64,
    pub fade: VolumeFade,
    pub fade_interval_ms: i32,
    pub rain: HeartRain,
    pub message: String,
    pub typewriter_interval_ms: i32,
}

impl SuccessPlan {
    pub fn from_config(cfg: &ProposalConfig) -> Self {
        Self {
            title: cfg.success_title.clone(),
            image: cfg.success_image.clone(),
            ambient_offset_secs: cfg.ambient_offset_secs,
            fade: VolumeFade {
                step: cfg.fade.step,
                cap: cfg.fade.max_volume,
            },
            fade_interval_ms: cfg.fade.interval_ms,
            rain: HeartRain {
                interval_ms: cfg.heart_interval_ms,
                lifetime_ms: cfg.heart_lifetime_ms,
            },
            message: cfg.final_message.clone(),
            typewriter_interval_ms: cfg.typewriter_interval_ms,
        }
    }

    /// Time until the final message is fully shown.
    pub fn reveal_duration_ms(&self) -> u64 {
        Typewriter::new(&self.message).total_duration_ms(self.typewriter_interval_ms)
    }
}

/// Fires at most once.
#[derive(Debug, Default)]
pub struct SuccessSequencer {
    fired: bool,
}

impl SuccessSequencer {
    pub fn begin(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Reveals a message one `char` per tick.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    shown: usize, // byte offset of the revealed prefix
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            shown: 0,
        }
    }

    pub fn next_char(&mut self) -> Option<char> {
        let c = self.text[self.shown..].chars().next()?;
        self.shown += c.len_utf8();
        Some(c)
    }

    pub fn revealed(&self) -> &str {
        &self.text[..self.shown]
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.text.len()
    }

    pub fn total_ticks(&self) -> usize {
        self.text.chars().count()
    }

    pub fn total_duration_ms(&self, interval_ms: i32) -> u64 {
        self.total_ticks() as u64 * interval_ms.max(0) as u64
    }
}

/// Falling-heart spawner parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartRain {
    pub interval_ms: i32,
    pub lifetime_ms: i32,
}

impl HeartRain {
    pub const GLYPH: &'static str = "❤️";

    /// Horizontal start position in `vw`.
    pub fn spawn_left_vw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(0.0..100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sequencer_fires_once() {
        let mut seq = SuccessSequencer::default();
        assert!(seq.begin());
        assert!(!seq.begin());
        assert!(seq.has_fired());
    }

    #[test]
    fn typewriter_reveals_multibyte_text_in_order() {
        let mut tw = Typewriter::new("hi ❤️!");
        let mut ticks = 0;
        while tw.next_char().is_some() {
            ticks += 1;
            assert!("hi ❤️!".starts_with(tw.revealed()));
        }
        assert!(tw.is_done());
        assert_eq!(tw.revealed(), "hi ❤️!");
        assert_eq!(ticks, tw.total_ticks());
        assert_eq!(tw.next_char(), None);
    }

    #[test]
    fn reveal_duration_is_chars_times_interval() {
        let plan = SuccessPlan::from_config(&ProposalConfig::default());
        let chars = plan.message.chars().count() as u64;
        assert_eq!(plan.reveal_duration_ms(), chars * 50);
    }

    #[test]
    fn hearts_start_across_the_viewport_width() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let rain = HeartRain { interval_ms: 150, lifetime_ms: 3000 };
        for _ in 0..200 {
            let left = rain.spawn_left_vw(&mut rng);
            assert!((0.0..100.0).contains(&left));
        }
    }
}
