// `Clip` over an `<audio>` element. Play requests return a promise that the
// browser rejects without a prior user gesture; rejections are only logged.
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::audio::Clip;
use crate::error::ProposalError;

#[derive(Clone, Debug)]
pub struct AudioClip {
    el: HtmlAudioElement,
    src: String,
}

impl AudioClip {
    pub fn load(src: &str) -> Result<Self, ProposalError> {
        let el = HtmlAudioElement::new_with_src(src).map_err(ProposalError::js)?;
        el.set_preload("auto");
        Ok(Self {
            el,
            src: src.to_string(),
        })
    }
}

impl Clip for AudioClip {
    fn set_volume(&self, volume: f64) {
        self.el.set_volume(volume);
    }

    fn volume(&self) -> f64 {
        self.el.volume()
    }

    fn seek(&self, secs: f64) {
        self.el.set_current_time(secs);
    }

    fn pause(&self) {
        if let Err(err) = self.el.pause() {
            log::warn!("pause failed for {}: {err:?}", self.src);
        }
    }

    fn play(&self) {
        match self.el.play() {
            Ok(promise) => {
                let src = self.src.clone();
                spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        log::warn!("audio play failed for {src}: {err:?}");
                    }
                });
            }
            Err(err) => log::warn!("audio play failed for {}: {err:?}", self.src),
        }
    }

    fn set_looping(&self, looping: bool) {
        self.el.set_loop(looping);
    }
}
