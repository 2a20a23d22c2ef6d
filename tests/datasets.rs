// Additional integration tests for the built-in content tables.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use be_my_valentine::content::{
    CUTE_PHRASES, DRAMATIC_PHRASES, EMOTIONAL_PHRASES, Phase, SOUND_MANIFEST, SoundKey,
    UNHINGED_PHRASES,
};

fn phrase_table(phase: Phase) -> &'static [&'static str] {
    match phase {
        Phase::Cute => &CUTE_PHRASES,
        Phase::Dramatic => &DRAMATIC_PHRASES,
        Phase::Emotional => &EMOTIONAL_PHRASES,
        Phase::Unhinged => &UNHINGED_PHRASES,
    }
}

#[test]
fn phrase_tables_are_unique_and_non_blank() {
    let mut seen = HashSet::new();
    for phase in Phase::ALL {
        let table = phrase_table(phase);
        assert!(!table.is_empty(), "no phrases for {}", phase.name());
        for p in table {
            assert!(!p.trim().is_empty(), "blank phrase in {}", phase.name());
            assert_eq!(p.trim(), *p, "phrase '{}' has stray whitespace", p);
            assert!(seen.insert(*p), "phrase '{}' appears twice", p);
        }
    }
}

#[test]
fn phrase_table_sizes() {
    assert_eq!(CUTE_PHRASES.len(), 5);
    assert_eq!(DRAMATIC_PHRASES.len(), 5);
    assert_eq!(EMOTIONAL_PHRASES.len(), 6);
    assert_eq!(UNHINGED_PHRASES.len(), 23);
}

#[test]
fn manifest_covers_every_sound_key_once() {
    let keys: Vec<SoundKey> = SOUND_MANIFEST.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys.len(), SoundKey::ALL.len());
    for key in SoundKey::ALL {
        assert_eq!(
            keys.iter().filter(|k| **k == key).count(),
            1,
            "sound key {} listed {} times",
            key.name(),
            keys.iter().filter(|k| **k == key).count()
        );
    }
}

#[test]
fn manifest_paths_are_mp3s_in_their_category_folder() {
    let mut seen = HashSet::new();
    for (key, paths) in SOUND_MANIFEST {
        assert!(!paths.is_empty(), "no clips for {}", key.name());
        let folder = match key {
            SoundKey::Yes => "yes/".to_string(),
            other => format!("no-{}/", other.name()),
        };
        for path in *paths {
            assert!(path.starts_with(&folder), "'{}' not under '{}'", path, folder);
            assert!(path.ends_with(".mp3"), "'{}' is not an mp3", path);
            assert!(!path.starts_with('/'), "'{}' must be relative", path);
            assert!(seen.insert(*path), "clip '{}' listed twice", path);
        }
    }
}

#[test]
fn manifest_clip_counts() {
    let count = |key: SoundKey| {
        SOUND_MANIFEST
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, p)| p.len())
            .unwrap_or(0)
    };
    assert_eq!(count(SoundKey::Yes), 3);
    assert_eq!(count(SoundKey::Cute), 4);
    assert_eq!(count(SoundKey::Dramatic), 5);
    assert_eq!(count(SoundKey::Emotional), 4);
    assert_eq!(count(SoundKey::Unhinged), 7);
}
