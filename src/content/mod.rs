//! Content registries: taunt phrases per phase and sound clips per category.
//!
//! Both tables are fixed at compile time (see `phrases.rs` / `sounds.rs`) and
//! wrapped in [`ShufflePool`]s once at startup.
use rand::Rng;

use crate::error::ProposalError;
use crate::pool::ShufflePool;

mod phrases;
mod sounds;

pub use phrases::{CUTE_PHRASES, DRAMATIC_PHRASES, EMOTIONAL_PHRASES, UNHINGED_PHRASES};
pub use sounds::SOUND_MANIFEST;

/// Escalation tier, derived from the attempt counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Cute,
    Dramatic,
    Emotional,
    Unhinged,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Cute,
        Phase::Dramatic,
        Phase::Emotional,
        Phase::Unhinged,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Cute => "cute",
            Phase::Dramatic => "dramatic",
            Phase::Emotional => "emotional",
            Phase::Unhinged => "unhinged",
        }
    }
}

/// Sound categories: one per phase plus the success jingle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundKey {
    Yes,
    Cute,
    Dramatic,
    Emotional,
    Unhinged,
}

impl SoundKey {
    pub const ALL: [SoundKey; 5] = [
        SoundKey::Yes,
        SoundKey::Cute,
        SoundKey::Dramatic,
        SoundKey::Emotional,
        SoundKey::Unhinged,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoundKey::Yes => "yes",
            SoundKey::Cute => "cute",
            SoundKey::Dramatic => "dramatic",
            SoundKey::Emotional => "emotional",
            SoundKey::Unhinged => "unhinged",
        }
    }
}

impl From<Phase> for SoundKey {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Cute => SoundKey::Cute,
            Phase::Dramatic => SoundKey::Dramatic,
            Phase::Emotional => SoundKey::Emotional,
            Phase::Unhinged => SoundKey::Unhinged,
        }
    }
}

/// Phrase pools, one per phase.
#[derive(Debug, Clone)]
pub struct PhraseRegistry {
    cute: ShufflePool<&'static str>,
    dramatic: ShufflePool<&'static str>,
    emotional: ShufflePool<&'static str>,
    unhinged: ShufflePool<&'static str>,
}

impl PhraseRegistry {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, ProposalError> {
        Ok(Self {
            cute: ShufflePool::new("phrases.cute", CUTE_PHRASES.to_vec(), rng)?,
            dramatic: ShufflePool::new("phrases.dramatic", DRAMATIC_PHRASES.to_vec(), rng)?,
            emotional: ShufflePool::new("phrases.emotional", EMOTIONAL_PHRASES.to_vec(), rng)?,
            unhinged: ShufflePool::new("phrases.unhinged", UNHINGED_PHRASES.to_vec(), rng)?,
        })
    }

    pub fn pool(&self, phase: Phase) -> &ShufflePool<&'static str> {
        match phase {
            Phase::Cute => &self.cute,
            Phase::Dramatic => &self.dramatic,
            Phase::Emotional => &self.emotional,
            Phase::Unhinged => &self.unhinged,
        }
    }

    pub fn next<R: Rng + ?Sized>(&mut self, phase: Phase, rng: &mut R) -> &'static str {
        let pool = match phase {
            Phase::Cute => &mut self.cute,
            Phase::Dramatic => &mut self.dramatic,
            Phase::Emotional => &mut self.emotional,
            Phase::Unhinged => &mut self.unhinged,
        };
        *pool.next(rng)
    }
}

/// Clip pools, one per [`SoundKey`]. Generic over the clip handle so the page
/// can hold `HtmlAudioElement`s and tests can hold mocks.
#[derive(Debug)]
pub struct SoundRegistry<C> {
    yes: ShufflePool<C>,
    cute: ShufflePool<C>,
    dramatic: ShufflePool<C>,
    emotional: ShufflePool<C>,
    unhinged: ShufflePool<C>,
}

impl<C> SoundRegistry<C> {
    /// Loads every clip in `manifest` through `load`, which receives the
    /// category and the clip's relative path.
    pub fn load<R, F>(
        manifest: &[(SoundKey, &[&'static str])],
        mut load: F,
        rng: &mut R,
    ) -> Result<Self, ProposalError>
    where
        R: Rng + ?Sized,
        F: FnMut(SoundKey, &'static str) -> Result<C, ProposalError>,
    {
        let mut build = |key: SoundKey, what: &'static str| -> Result<ShufflePool<C>, ProposalError> {
            let clips = manifest
                .iter()
                .filter(|(k, _)| *k == key)
                .flat_map(|(_, paths)| paths.iter())
                .map(|path| load(key, *path))
                .collect::<Result<Vec<C>, ProposalError>>()?;
            ShufflePool::new(what, clips, &mut *rng)
        };
        Ok(Self {
            yes: build(SoundKey::Yes, "sounds.yes")?,
            cute: build(SoundKey::Cute, "sounds.cute")?,
            dramatic: build(SoundKey::Dramatic, "sounds.dramatic")?,
            emotional: build(SoundKey::Emotional, "sounds.emotional")?,
            unhinged: build(SoundKey::Unhinged, "sounds.unhinged")?,
        })
    }

    pub fn pool(&self, key: SoundKey) -> &ShufflePool<C> {
        match key {
            SoundKey::Yes => &self.yes,
            SoundKey::Cute => &self.cute,
            SoundKey::Dramatic => &self.dramatic,
            SoundKey::Emotional => &self.emotional,
            SoundKey::Unhinged => &self.unhinged,
        }
    }

    pub fn pool_mut(&mut self, key: SoundKey) -> &mut ShufflePool<C> {
        match key {
            SoundKey::Yes => &mut self.yes,
            SoundKey::Cute => &mut self.cute,
            SoundKey::Dramatic => &mut self.dramatic,
            SoundKey::Emotional => &mut self.emotional,
            SoundKey::Unhinged => &mut self.unhinged,
        }
    }

    /// Every clip across all categories.
    pub fn clips(&self) -> impl Iterator<Item = &C> {
        SoundKey::ALL
            .into_iter()
            .flat_map(move |key| self.pool(key).items().iter())
    }
}
