// Sound clip manifest: paths are relative to `ProposalConfig::asset_root`.
use super::SoundKey;

pub static SOUND_MANIFEST: &[(SoundKey, &[&str])] = &[
    (SoundKey::Yes, &["yes/1.mp3", "yes/2.mp3", "yes/3.mp3"]),
    (
        SoundKey::Cute,
        &[
            "no-cute/2.mp3",
            "no-cute/4.mp3",
            "no-cute/5.mp3",
            "no-cute/6.mp3",
        ],
    ),
    (
        SoundKey::Dramatic,
        &[
            "no-dramatic/8.mp3",
            "no-dramatic/10.mp3",
            "no-dramatic/11.mp3",
            "no-dramatic/13.mp3",
            "no-dramatic/15.mp3",
        ],
    ),
    (
        SoundKey::Emotional,
        &[
            "no-emotional/9.mp3",
            "no-emotional/14.mp3",
            "no-emotional/16.mp3",
            "no-emotional/18.mp3",
        ],
    ),
    (
        SoundKey::Unhinged,
        &[
            "no-unhinged/12.mp3",
            "no-unhinged/17.mp3",
            "no-unhinged/19.mp3",
            "no-unhinged/20.mp3",
            "no-unhinged/21.mp3",
            "no-unhinged/22.mp3",
            "no-unhinged/23.mp3",
        ],
    ),
];
