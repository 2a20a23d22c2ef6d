//! Audio director: one taunt at a time, a global mute switch, and the ambient
//! success track on its own channel.

use rand::Rng;

use crate::content::{SoundKey, SoundRegistry};

/// Playback capability of a single clip. Implemented over `HtmlAudioElement`
/// in the page and by recording mocks in tests.
pub trait Clip {
    fn set_volume(&self, volume: f64);
    fn volume(&self) -> f64;
    /// Playback offset in seconds.
    fn seek(&self, secs: f64);
    fn pause(&self);
    /// Best-effort: a rejected play request is logged by the implementation
    /// and otherwise ignored.
    fn play(&self);
    fn set_looping(&self, looping: bool);

    fn stop(&self) {
        self.pause();
        self.seek(0.0);
    }

    fn play_from_start(&self) {
        self.seek(0.0);
        self.play();
    }
}

/// Linear volume ramp applied to the ambient track after success.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeFade {
    pub step: f64,
    pub cap: f64,
}

impl VolumeFade {
    /// Next volume, or `None` once `current` has reached the cap. A
    /// non-positive step never gets there and yields `None` straight away.
    pub fn next(&self, current: f64) -> Option<f64> {
        if current < self.cap && self.step > 0.0 {
            Some((current + self.step).min(self.cap))
        } else {
            None
        }
    }

    /// Number of ticks needed to climb from 0 to the cap.
    pub fn ticks_to_cap(&self) -> u32 {
        let mut v = 0.0;
        let mut n = 0;
        while let Some(next) = self.next(v) {
            v = next;
            n += 1;
        }
        n
    }
}

#[derive(Debug)]
pub struct AudioDirector<C> {
    sounds: SoundRegistry<C>,
    ambient: C,
    muted: bool,
    ambient_started: bool,
}

impl<C: Clip> AudioDirector<C> {
    /// Applies `clip_volume` to every registry clip once and marks the ambient
    /// track as looping.
    pub fn new(sounds: SoundRegistry<C>, ambient: C, clip_volume: f64) -> Self {
        for clip in sounds.clips() {
            clip.set_volume(clip_volume);
        }
        ambient.set_looping(true);
        Self {
            sounds,
            ambient,
            muted: false,
            ambient_started: false,
        }
    }

    pub fn stop_all(&self) {
        for clip in self.sounds.clips() {
            clip.stop();
        }
    }

    /// Stops every registry clip, then plays the next clip of `key` unless muted.
    pub fn play_exclusive<R: Rng + ?Sized>(&mut self, key: SoundKey, rng: &mut R) {
        self.stop_all();
        if self.muted {
            return;
        }
        self.sounds.pool_mut(key).next(rng).play_from_start();
    }

    /// Flips mute and returns the new state. Muting pauses the ambient track;
    /// unmuting resumes it only if success already started it.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.ambient.pause();
        } else if self.ambient_started {
            self.ambient.play();
        }
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Starts the ambient track silently from `offset_secs`; the caller ramps
    /// the volume with a [`VolumeFade`]. Marked started even when muted so an
    /// unmute picks it up.
    pub fn start_ambient(&mut self, offset_secs: f64) {
        self.ambient.set_volume(0.0);
        self.ambient.seek(offset_secs);
        self.ambient_started = true;
        if !self.muted {
            self.ambient.play();
        }
    }

    pub fn ambient_started(&self) -> bool {
        self.ambient_started
    }

    pub fn ambient(&self) -> &C {
        &self.ambient
    }

    pub fn sounds(&self) -> &SoundRegistry<C> {
        &self.sounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_climbs_to_cap_and_stops() {
        let fade = VolumeFade { step: 0.008, cap: 0.5 };
        let mut v = 0.0;
        let mut seen = vec![v];
        while let Some(next) = fade.next(v) {
            assert!(next > v);
            v = next;
            seen.push(v);
        }
        assert_eq!(v, 0.5);
        assert_eq!(fade.next(0.5), None);
        assert_eq!(fade.ticks_to_cap() as usize, seen.len() - 1);
    }

    #[test]
    fn fade_never_overshoots() {
        let fade = VolumeFade { step: 0.3, cap: 0.5 };
        assert_eq!(fade.next(0.0), Some(0.3));
        assert_eq!(fade.next(0.3), Some(0.5));
        assert_eq!(fade.ticks_to_cap(), 2);
    }

    #[test]
    fn zero_step_fade_stops_immediately() {
        let fade = VolumeFade { step: 0.0, cap: 0.5 };
        assert_eq!(fade.next(0.0), None);
        assert_eq!(fade.ticks_to_cap(), 0);
    }
}
