//! The single owned session record: escalation, audio, decoys and the success
//! guard behind one set of transition methods.

use rand::Rng;

use crate::audio::{AudioDirector, Clip};
use crate::config::ProposalConfig;
use crate::content::{PhraseRegistry, SOUND_MANIFEST, SoundKey, SoundRegistry};
use crate::error::ProposalError;
use crate::escalation::{EscalationController, SessionState, TriggerOutcome, VisualEffects};
use crate::evasion::DecoySet;
use crate::success::{SuccessPlan, SuccessSequencer};

/// What the page must undo and start after a successful "Yes".
#[derive(Debug)]
pub struct Acceptance<D> {
    /// Decoys to take off the page.
    pub decoys: Vec<D>,
    /// The No button was flying and must be hidden separately from the button row.
    pub hide_no_button: bool,
    pub plan: SuccessPlan,
}

#[derive(Debug)]
pub struct Proposal<C, D> {
    controller: EscalationController,
    audio: AudioDirector<C>,
    decoys: DecoySet<D>,
    sequencer: SuccessSequencer,
    plan: SuccessPlan,
}

impl<C: Clip, D> Proposal<C, D> {
    /// Builds registries from the built-in tables. `load` receives a clip URL
    /// (already joined with the asset root) and returns a handle for it.
    pub fn build<R, F>(cfg: &ProposalConfig, mut load: F, rng: &mut R) -> Result<Self, ProposalError>
    where
        R: Rng + ?Sized,
        F: FnMut(&str) -> Result<C, ProposalError>,
    {
        let phrases = PhraseRegistry::new(rng)?;
        let sounds = SoundRegistry::load(SOUND_MANIFEST, |_, path| load(&cfg.clip_url(path)), rng)?;
        let ambient = load(&cfg.ambient_url())?;
        let controller = EscalationController::new(phrases, cfg.narrow_breakpoint_px, cfg.haptic_ms);
        let audio = AudioDirector::new(sounds, ambient, cfg.clip_volume);
        Ok(Self::new(controller, audio, SuccessPlan::from_config(cfg)))
    }

    pub fn new(controller: EscalationController, audio: AudioDirector<C>, plan: SuccessPlan) -> Self {
        Self {
            controller,
            audio,
            decoys: DecoySet::default(),
            sequencer: SuccessSequencer::default(),
            plan,
        }
    }

    /// One evasion trigger. Ignored (returns `None`) once the proposal was accepted.
    pub fn trigger<R: Rng + ?Sized>(&mut self, viewport_width: f64, rng: &mut R) -> Option<TriggerOutcome> {
        if self.sequencer.has_fired() {
            return None;
        }
        let out = self.controller.on_trigger(viewport_width, rng);
        if out.phase_changed {
            log::info!("escalation entered {} phase at attempt {}", out.phase.name(), out.attempts);
        }
        log::debug!(
            "trigger #{}: scale {:.2}, speed {}s, decoy {}",
            out.attempts,
            out.yes_scale,
            out.evasion_speed_secs,
            out.spawn_decoy
        );
        self.audio.play_exclusive(out.sound, rng);
        Some(out)
    }

    pub fn add_decoy(&mut self, decoy: D) {
        self.decoys.push(decoy);
    }

    pub fn decoy_count(&self) -> usize {
        self.decoys.len()
    }

    /// The terminal transition. Returns `None` on any activation after the first.
    pub fn accept<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Acceptance<D>> {
        if !self.sequencer.begin() {
            log::warn!("yes activated again after success; ignoring");
            return None;
        }
        self.controller.reset_for_success();
        self.audio.start_ambient(self.plan.ambient_offset_secs);
        self.audio.play_exclusive(SoundKey::Yes, rng);
        let decoys = self.decoys.drain();
        log::info!(
            "proposal accepted after {} attempts; clearing {} decoys",
            self.controller.state().attempts,
            decoys.len()
        );
        Some(Acceptance {
            decoys,
            hide_no_button: self.controller.state().is_flying,
            plan: self.plan.clone(),
        })
    }

    pub fn is_accepted(&self) -> bool {
        self.sequencer.has_fired()
    }

    /// Escalation styling currently in force; all defaults after success.
    pub fn effects(&self) -> VisualEffects {
        if self.is_accepted() {
            VisualEffects::default()
        } else {
            VisualEffects::for_state(self.controller.state())
        }
    }

    /// One fade tick on the ambient track. `None` when the cap is reached and
    /// the caller should cancel its timer.
    pub fn fade_ambient_step(&self) -> Option<f64> {
        let ambient = self.audio.ambient();
        let next = self.plan.fade.next(ambient.volume())?;
        ambient.set_volume(next);
        Some(next)
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.audio.toggle_mute();
        log::info!("sound {}", if muted { "muted" } else { "unmuted" });
        muted
    }

    pub fn state(&self) -> &SessionState {
        self.controller.state()
    }

    pub fn audio(&self) -> &AudioDirector<C> {
        &self.audio
    }

    pub fn plan(&self) -> &SuccessPlan {
        &self.plan
    }
}
