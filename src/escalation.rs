//! Escalation state machine driven by the attempt counter.
//!
//! Every hover / touch on the No button is one trigger. The controller bumps
//! `attempts`, derives the phase and every visual knob from it, draws the next
//! taunt and reports it all as a [`TriggerOutcome`] for the page to apply.
//!
//! | attempts | phase     | speed | subtitle color |
//! |----------|-----------|-------|----------------|
//! | 0-4      | cute      | 0.22s | black          |
//! | 5-9      | dramatic  | 0.15s | black          |
//! | 10-14    | emotional | 0.10s | #8b0000        |
//! | 15+      | unhinged  | 0.06s | red            |

use rand::Rng;

use crate::content::{Phase, PhraseRegistry, SoundKey};

pub const DRAMATIC_AT: u32 = 5;
pub const EMOTIONAL_AT: u32 = 10;
pub const UNHINGED_AT: u32 = 15;

/// Subtitle text forced on the trigger that enters the unhinged phase.
pub const FINAL_BANNER: &str = "FINAL PHASE.";

pub const BASE_SPEED_SECS: f64 = 0.22;
const SCALE_STEP: f64 = 0.15;
const SCALE_STEP_NARROW: f64 = 0.35;
const TINT_PER_ATTEMPT: u32 = 5;
const TINT_MAX: u32 = 120;

impl Phase {
    pub fn from_attempts(attempts: u32) -> Phase {
        if attempts < DRAMATIC_AT {
            Phase::Cute
        } else if attempts < EMOTIONAL_AT {
            Phase::Dramatic
        } else if attempts < UNHINGED_AT {
            Phase::Emotional
        } else {
            Phase::Unhinged
        }
    }

    /// Duration of the No button's reposition transition, in seconds.
    pub fn evasion_speed_secs(self) -> f64 {
        match self {
            Phase::Cute => BASE_SPEED_SECS,
            Phase::Dramatic => 0.15,
            Phase::Emotional => 0.10,
            Phase::Unhinged => 0.06,
        }
    }

    pub fn subtitle_color(self) -> &'static str {
        match self {
            Phase::Cute | Phase::Dramatic => "black",
            Phase::Emotional => "#8b0000",
            Phase::Unhinged => "red",
        }
    }
}

/// How much the Yes button grows on this trigger.
pub fn yes_scale_step(attempts: u32, narrow_viewport: bool) -> f64 {
    if narrow_viewport && attempts > EMOTIONAL_AT {
        SCALE_STEP_NARROW
    } else {
        SCALE_STEP
    }
}

/// Red background alpha (0..=1), or `None` before the emotional phase.
pub fn background_alpha(attempts: u32) -> Option<f64> {
    if attempts < EMOTIONAL_AT {
        return None;
    }
    let intensity = attempts.saturating_mul(TINT_PER_ATTEMPT).min(TINT_MAX);
    Some(intensity as f64 / 255.0)
}

/// Decoys appear at 10 and then at every multiple of 5 from 15 on.
pub fn spawns_decoy(attempts: u32) -> bool {
    attempts == EMOTIONAL_AT || (attempts >= UNHINGED_AT && attempts % 5 == 0)
}

/// Mutable session counters. Only the controller writes them.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub attempts: u32,
    pub phase: Phase,
    pub yes_scale: f64,
    pub is_flying: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            attempts: 0,
            phase: Phase::Cute,
            yes_scale: 1.0,
            is_flying: false,
        }
    }
}

/// Persistent escalation styling on the Yes button, frame and page background.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualEffects {
    pub yes_scale: f64,
    pub glow: bool,
    pub pulse: bool,
    pub shake: bool,
    pub background_alpha: Option<f64>,
}

impl Default for VisualEffects {
    fn default() -> Self {
        Self {
            yes_scale: 1.0,
            glow: false,
            pulse: false,
            shake: false,
            background_alpha: None,
        }
    }
}

impl VisualEffects {
    pub fn for_state(state: &SessionState) -> Self {
        Self {
            yes_scale: state.yes_scale,
            glow: state.attempts >= EMOTIONAL_AT,
            pulse: state.attempts >= UNHINGED_AT,
            shake: state.attempts >= UNHINGED_AT,
            background_alpha: background_alpha(state.attempts),
        }
    }
}

/// Everything one trigger changes; the page maps it onto styles and sounds.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerOutcome {
    pub attempts: u32,
    pub phase: Phase,
    pub phase_changed: bool,
    /// The No button leaves normal flow on this trigger.
    pub first_flight: bool,
    pub evasion_speed_secs: f64,
    pub yes_scale: f64,
    pub glow: bool,
    pub pulse: bool,
    pub shake: bool,
    pub final_banner: bool,
    pub subtitle: &'static str,
    pub subtitle_color: &'static str,
    pub background_alpha: Option<f64>,
    pub sound: SoundKey,
    pub spawn_decoy: bool,
    pub haptic_ms: u32,
}

impl TriggerOutcome {
    pub fn effects(&self) -> VisualEffects {
        VisualEffects {
            yes_scale: self.yes_scale,
            glow: self.glow,
            pulse: self.pulse,
            shake: self.shake,
            background_alpha: self.background_alpha,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EscalationController {
    state: SessionState,
    phrases: PhraseRegistry,
    narrow_breakpoint_px: f64,
    haptic_ms: u32,
}

impl EscalationController {
    pub fn new(phrases: PhraseRegistry, narrow_breakpoint_px: f64, haptic_ms: u32) -> Self {
        Self {
            state: SessionState::default(),
            phrases,
            narrow_breakpoint_px,
            haptic_ms,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn on_trigger<R: Rng + ?Sized>(&mut self, viewport_width: f64, rng: &mut R) -> TriggerOutcome {
        let st = &mut self.state;
        st.attempts = st.attempts.saturating_add(1);
        let attempts = st.attempts;

        let first_flight = !st.is_flying;
        st.is_flying = true;

        let phase = Phase::from_attempts(attempts);
        let phase_changed = phase != st.phase;
        st.phase = phase;

        let narrow = viewport_width < self.narrow_breakpoint_px;
        st.yes_scale += yes_scale_step(attempts, narrow);

        // The phrase is drawn even when the banner replaces it, so the pool keeps rotating.
        let phrase = self.phrases.next(phase, rng);
        let final_banner = attempts == UNHINGED_AT;

        TriggerOutcome {
            attempts,
            phase,
            phase_changed,
            first_flight,
            evasion_speed_secs: phase.evasion_speed_secs(),
            yes_scale: st.yes_scale,
            glow: attempts >= EMOTIONAL_AT,
            pulse: attempts >= UNHINGED_AT,
            shake: attempts >= UNHINGED_AT,
            final_banner,
            subtitle: if final_banner { FINAL_BANNER } else { phrase },
            subtitle_color: phase.subtitle_color(),
            background_alpha: background_alpha(attempts),
            sound: phase.into(),
            spawn_decoy: spawns_decoy(attempts),
            haptic_ms: self.haptic_ms,
        }
    }

    /// Success resets the Yes button scale; attempts and flight stay as they are.
    pub fn reset_for_success(&mut self) {
        self.state.yes_scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DESKTOP: f64 = 1280.0;
    const PHONE: f64 = 390.0;

    fn controller(rng: &mut ChaCha8Rng) -> EscalationController {
        EscalationController::new(PhraseRegistry::new(rng).unwrap(), 768.0, 40)
    }

    #[test]
    fn phase_thresholds() {
        assert_eq!(Phase::from_attempts(0), Phase::Cute);
        assert_eq!(Phase::from_attempts(4), Phase::Cute);
        assert_eq!(Phase::from_attempts(5), Phase::Dramatic);
        assert_eq!(Phase::from_attempts(9), Phase::Dramatic);
        assert_eq!(Phase::from_attempts(10), Phase::Emotional);
        assert_eq!(Phase::from_attempts(14), Phase::Emotional);
        assert_eq!(Phase::from_attempts(15), Phase::Unhinged);
        assert_eq!(Phase::from_attempts(100), Phase::Unhinged);
    }

    #[test]
    fn phase_is_monotonic() {
        let phases: Vec<Phase> = (0..60).map(Phase::from_attempts).collect();
        assert!(phases.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn speed_gets_faster_each_phase() {
        let speeds: Vec<f64> = Phase::ALL.iter().map(|p| p.evasion_speed_secs()).collect();
        assert_eq!(speeds, vec![0.22, 0.15, 0.10, 0.06]);
    }

    #[test]
    fn tint_starts_at_ten_and_caps() {
        assert_eq!(background_alpha(9), None);
        assert_eq!(background_alpha(10), Some(50.0 / 255.0));
        assert_eq!(background_alpha(24), Some(120.0 / 255.0));
        assert_eq!(background_alpha(500), Some(120.0 / 255.0));
    }

    #[test]
    fn decoy_schedule() {
        let spawned: Vec<u32> = (1..=40).filter(|&a| spawns_decoy(a)).collect();
        assert_eq!(spawned, vec![10, 15, 20, 25, 30, 35, 40]);
    }

    #[test]
    fn narrow_viewport_grows_faster_only_after_ten() {
        assert_eq!(yes_scale_step(10, true), 0.15);
        assert_eq!(yes_scale_step(11, true), 0.35);
        assert_eq!(yes_scale_step(11, false), 0.15);
    }

    #[test]
    fn first_trigger_starts_flight_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctl = controller(&mut rng);
        assert!(!ctl.state().is_flying);
        assert!(ctl.on_trigger(DESKTOP, &mut rng).first_flight);
        assert!(!ctl.on_trigger(DESKTOP, &mut rng).first_flight);
        assert!(ctl.state().is_flying);
    }

    #[test]
    fn yes_scale_strictly_increases() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ctl = controller(&mut rng);
        let mut last = ctl.state().yes_scale;
        for _ in 0..30 {
            let out = ctl.on_trigger(PHONE, &mut rng);
            assert!(out.yes_scale > last);
            last = out.yes_scale;
        }
        ctl.reset_for_success();
        assert_eq!(ctl.state().yes_scale, 1.0);
    }

    #[test]
    fn banner_only_on_fifteenth_trigger() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ctl = controller(&mut rng);
        let outs: Vec<TriggerOutcome> = (0..20).map(|_| ctl.on_trigger(DESKTOP, &mut rng)).collect();
        for out in &outs {
            assert_eq!(out.final_banner, out.attempts == 15);
            if out.attempts == 15 {
                assert_eq!(out.subtitle, FINAL_BANNER);
            } else {
                assert_ne!(out.subtitle, FINAL_BANNER);
            }
        }
    }

    #[test]
    fn phase_change_reported_on_boundaries() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut ctl = controller(&mut rng);
        let changed: Vec<u32> = (0..16)
            .map(|_| ctl.on_trigger(DESKTOP, &mut rng))
            .filter(|o| o.phase_changed)
            .map(|o| o.attempts)
            .collect();
        assert_eq!(changed, vec![5, 10, 15]);
    }

    #[test]
    fn outcome_effects_match_state_effects() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ctl = controller(&mut rng);
        for _ in 0..17 {
            let out = ctl.on_trigger(DESKTOP, &mut rng);
            assert_eq!(out.effects(), VisualEffects::for_state(ctl.state()));
        }
        assert_eq!(VisualEffects::for_state(&SessionState::default()), VisualEffects::default());
    }

    #[test]
    fn sound_follows_phase() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut ctl = controller(&mut rng);
        for _ in 0..16 {
            let out = ctl.on_trigger(DESKTOP, &mut rng);
            assert_eq!(out.sound, SoundKey::from(out.phase));
            assert_eq!(out.haptic_ms, 40);
        }
    }
}
