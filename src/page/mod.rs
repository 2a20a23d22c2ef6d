//! Browser binding for the proposal letter.
//!
//! Looks up the page's elements, owns the single [`Proposal`] session in a
//! thread-local, and turns DOM events into session transitions:
//! - envelope click: open the letter
//! - hover / touch on No: one escalation trigger, then reposition and restyle
//! - click on Yes (or a decoy): the success sequence
//! - sound toggle: mute switch
//!
//! Handlers never hold the session borrow while doing something that can
//! synchronously dispatch another handler (decoys forward via `click()`
//! outside of it).
use std::cell::RefCell;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement,
    window,
};

use crate::config::ProposalConfig;
use crate::error::ProposalError;
use crate::escalation::{BASE_SPEED_SECS, TriggerOutcome, VisualEffects};
use crate::evasion::{Rect, Size, decoy_target, teleport_target};
use crate::session::Proposal;
use crate::success::{HeartRain, Typewriter};

mod clip;
mod timers;

use clip::AudioClip;
use timers::{Interval, Timers, after, next_frame};

const GLOW_FILTER: &str = "drop-shadow(0 0 10px red)";
const PULSE_ANIMATION: &str = "pulseYes 0.8s infinite";
const SHAKE_ANIMATION: &str = "screenShake 0.3s infinite";

struct Elements {
    body: HtmlElement,
    envelope: HtmlElement,
    letter: HtmlElement,
    no_btn: HtmlElement,
    yes_btn: HtmlElement,
    title: HtmlElement,
    subtitle: HtmlElement,
    image: HtmlImageElement,
    buttons: HtmlElement,
    final_text: HtmlElement,
    sound_toggle: HtmlElement,
    letter_window: HtmlElement,
    content_wrapper: HtmlElement,
}

impl Elements {
    fn find(doc: &Document, cfg: &ProposalConfig) -> Result<Self, ProposalError> {
        let ids = &cfg.elements;
        Ok(Self {
            body: doc
                .body()
                .ok_or_else(|| ProposalError::MissingElement("body".into()))?,
            envelope: by_id(doc, &ids.envelope)?,
            letter: by_id(doc, &ids.letter)?,
            no_btn: by_id(doc, &ids.no_button)?,
            yes_btn: by_selector(doc, &ids.yes_button_selector)?,
            title: by_id(doc, &ids.title)?,
            subtitle: by_id(doc, &ids.subtitle)?,
            image: by_id(doc, &ids.image)?,
            buttons: by_id(doc, &ids.buttons)?,
            final_text: by_id(doc, &ids.final_text)?,
            sound_toggle: by_id(doc, &ids.sound_toggle)?,
            letter_window: by_selector(doc, &ids.letter_window_selector)?,
            content_wrapper: by_selector(doc, &ids.content_wrapper_selector)?,
        })
    }
}

fn by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T, ProposalError> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| ProposalError::MissingElement(format!("#{id}")))
}

fn by_selector<T: JsCast>(doc: &Document, selector: &str) -> Result<T, ProposalError> {
    doc.query_selector(selector)
        .map_err(ProposalError::js)?
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| ProposalError::MissingElement(selector.to_string()))
}

/// Runtime page state.
struct Page {
    doc: Document,
    els: Elements,
    cfg: ProposalConfig,
    proposal: Proposal<AudioClip, HtmlElement>,
    rng: ChaCha8Rng,
    timers: Timers,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Runs `f` against the page state, if the page is started and not already
/// borrowed by an outer handler.
fn with_page<T>(f: impl FnOnce(&mut Page) -> T) -> Option<T> {
    PAGE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            log::warn!("page state busy; dropping event");
            None
        }
    })
}

pub fn start(cfg: ProposalConfig) -> Result<(), ProposalError> {
    cfg.validate()?;
    let win = window().ok_or_else(|| ProposalError::Js("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| ProposalError::Js("no document".into()))?;
    let els = Elements::find(&doc, &cfg)?;

    let mut rng = seeded_rng();
    let proposal = Proposal::build(&cfg, AudioClip::load, &mut rng)?;

    wire_envelope(&els, cfg.envelope_open_delay_ms)?;
    listen(&els.sound_toggle, "click", |_| {
        with_page(Page::toggle_sound);
    })?;
    listen(&els.no_btn, "mouseover", on_no_trigger)?;
    listen_active(&els.no_btn, "touchstart", on_no_trigger)?;
    listen(&els.yes_btn, "click", |_| {
        with_page(Page::accept);
    })?;
    listen(&win, "pagehide", |_| stop())?;

    let old = PAGE.with(|cell| {
        cell.borrow_mut().replace(Page {
            doc,
            els,
            cfg,
            proposal,
            rng,
            timers: Timers::default(),
        })
    });
    if let Some(mut old) = old {
        old.timers.cancel_all();
        log::warn!("proposal page started twice; previous state replaced");
    }
    log::info!("proposal page ready");
    Ok(())
}

/// Cancels every running celebration timer.
pub fn stop() {
    with_page(|page| {
        page.timers.cancel_all();
        log::info!("celebration timers stopped");
    });
}

fn seeded_rng() -> ChaCha8Rng {
    let mut seed = [0u8; 32];
    match getrandom::getrandom(&mut seed) {
        Ok(()) => ChaCha8Rng::from_seed(seed),
        Err(err) => {
            let fallback = js_sys::Date::now() as u64;
            log::warn!("no entropy source ({err}); seeding from clock {fallback}");
            ChaCha8Rng::seed_from_u64(fallback)
        }
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), ProposalError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(ProposalError::js)?;
    closure.forget();
    Ok(())
}

/// Non-passive listener, so the handler may `preventDefault` (touch scrolling).
fn listen_active<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), ProposalError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(false);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(ProposalError::js)?;
    closure.forget();
    Ok(())
}

fn wire_envelope(els: &Elements, open_delay_ms: i32) -> Result<(), ProposalError> {
    let envelope = els.envelope.clone();
    let letter = els.letter.clone();
    let window_el = els.letter_window.clone();
    listen(&els.envelope, "click", move |_| {
        set_style(&envelope, "display", "none");
        set_style(&letter, "display", "flex");
        let window_el = window_el.clone();
        after(open_delay_ms, move || {
            window_el.class_list().add_1("open").ok();
        });
    })
}

fn on_no_trigger(ev: Event) {
    if ev.type_() == "touchstart" && ev.cancelable() {
        ev.prevent_default();
    }
    let viewport = window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::MAX);
    with_page(|page| page.trigger(viewport));
}

fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    if let Err(err) = el.style().set_property(prop, value) {
        log::debug!("style {prop}={value} rejected: {err:?}");
    }
}

fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect {
        left: r.left(),
        top: r.top(),
        right: r.right(),
        bottom: r.bottom(),
    }
}

fn size_of(el: &HtmlElement) -> Size {
    Size {
        width: el.offset_width() as f64,
        height: el.offset_height() as f64,
    }
}

fn px(v: f64) -> String {
    format!("{v}px")
}

impl Page {
    fn trigger(&mut self, viewport_width: f64) {
        let Some(out) = self.proposal.trigger(viewport_width, &mut self.rng) else {
            return;
        };

        if out.first_flight {
            self.pin_no_button();
            // Two frames so the pinned position is painted before the transition starts.
            next_frame(|| {
                next_frame(|| {
                    with_page(Page::teleport_no_button);
                })
            });
        } else {
            self.teleport_no_button();
        }

        let speed = out.evasion_speed_secs;
        set_style(
            &self.els.no_btn,
            "transition",
            &format!("left {speed}s ease, top {speed}s ease"),
        );

        self.apply_effects(&out.effects());
        self.show_taunt(&out);

        if out.spawn_decoy {
            if let Err(err) = self.spawn_decoy() {
                log::warn!("decoy spawn failed: {err}");
            }
        }
        self.haptic(out.haptic_ms);
    }

    /// Switches the No button to fixed positioning at its current on-screen spot.
    fn pin_no_button(&self) {
        let rect = rect_of(&self.els.no_btn);
        set_style(&self.els.no_btn, "left", &px(rect.left));
        set_style(&self.els.no_btn, "top", &px(rect.top));
        set_style(&self.els.no_btn, "width", &px(rect.width()));
        self.els.no_btn.class_list().add_1("flying").ok();
    }

    fn teleport_no_button(&mut self) {
        let region = rect_of(&self.els.content_wrapper);
        let control = size_of(&self.els.no_btn);
        let at = teleport_target(region, control, self.cfg.teleport_margin_px, &mut self.rng);
        set_style(&self.els.no_btn, "left", &px(at.x));
        set_style(&self.els.no_btn, "top", &px(at.y));
    }

    fn show_taunt(&self, out: &TriggerOutcome) {
        let subtitle = &self.els.subtitle;
        subtitle.set_text_content(Some(out.subtitle));
        set_style(subtitle, "color", out.subtitle_color);
        if out.final_banner {
            set_style(subtitle, "font-weight", "bold");
            set_style(subtitle, "transform", "scale(1.2)");
        }
    }

    fn apply_effects(&self, fx: &VisualEffects) {
        let body = &self.els.body;
        match fx.background_alpha {
            Some(alpha) => {
                set_style(body, "background-color", &format!("rgba(255,0,0,{alpha})"));
                set_style(body, "background-blend-mode", "multiply");
            }
            None => {
                set_style(body, "background-color", "");
                set_style(body, "background-blend-mode", "");
            }
        }

        let yes = &self.els.yes_btn;
        set_style(yes, "--yes-scale", &fx.yes_scale.to_string());
        set_style(yes, "transform", &format!("scale({})", fx.yes_scale));
        set_style(yes, "filter", if fx.glow { GLOW_FILTER } else { "" });
        set_style(yes, "animation", if fx.pulse { PULSE_ANIMATION } else { "" });

        let shake = if fx.shake { SHAKE_ANIMATION } else { "" };
        set_style(&self.els.letter_window, "animation", shake);
    }

    fn spawn_decoy(&mut self) -> Result<(), ProposalError> {
        let region = rect_of(&self.els.content_wrapper);
        let subtitle = rect_of(&self.els.subtitle);
        let control = size_of(&self.els.yes_btn);

        let decoy: HtmlElement = self
            .els
            .yes_btn
            .clone_node_with_deep(true)
            .map_err(ProposalError::js)?
            .dyn_into()
            .map_err(|_| ProposalError::Js("yes button clone is not an element".into()))?;
        decoy.class_list().add_1("yes-clone").map_err(ProposalError::js)?;
        decoy.remove_attribute("style").map_err(ProposalError::js)?;

        let at = decoy_target(
            region,
            control,
            subtitle,
            self.cfg.decoy_margin_px,
            self.cfg.decoy_subtitle_gap_px,
            &mut self.rng,
        );
        set_style(&decoy, "position", "fixed");
        set_style(&decoy, "left", &px(at.x));
        set_style(&decoy, "top", &px(at.y));

        let real = self.els.yes_btn.clone();
        listen(&decoy, "click", move |_| real.click())?;
        self.els.body.append_child(&decoy).map_err(ProposalError::js)?;

        let shown = decoy.clone();
        next_frame(move || {
            shown.class_list().add_1("show").ok();
        });
        self.proposal.add_decoy(decoy);
        log::debug!("decoy #{} spawned", self.proposal.decoy_count());
        Ok(())
    }

    fn haptic(&self, duration_ms: u32) {
        let Some(win) = window() else { return };
        let navigator = win.navigator();
        // Calling a missing `navigator.vibrate` would throw; probe first.
        let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false);
        if supported {
            navigator.vibrate_with_duration(duration_ms);
        }
    }

    fn toggle_sound(&mut self) {
        let muted = self.proposal.toggle_mute();
        let classes = self.els.sound_toggle.class_list();
        if muted {
            classes.add_1("muted").ok();
            classes.remove_1("playing").ok();
        } else {
            classes.remove_1("muted").ok();
            classes.add_1("playing").ok();
        }
    }

    fn accept(&mut self) {
        let Some(acceptance) = self.proposal.accept(&mut self.rng) else {
            return;
        };
        let plan = acceptance.plan;

        self.apply_effects(&self.proposal.effects());
        for prop in ["transform", "font-weight", "color"] {
            set_style(&self.els.subtitle, prop, "");
        }
        set_style(
            &self.els.no_btn,
            "transition",
            &format!("left {BASE_SPEED_SECS}s ease, top {BASE_SPEED_SECS}s ease"),
        );

        self.start_timer(Interval::start("ambient-fade", plan.fade_interval_ms, || {
            with_page(|page| page.proposal.fade_ambient_step().is_some()).unwrap_or(false)
        }));

        for decoy in acceptance.decoys {
            decoy.remove();
        }

        self.els.title.set_text_content(Some(&plan.title));
        self.els.subtitle.set_text_content(Some(""));
        self.els.image.set_src(&plan.image);
        set_style(&self.els.buttons, "display", "none");
        if acceptance.hide_no_button {
            set_style(&self.els.no_btn, "display", "none");
        }

        let doc = self.doc.clone();
        let body = self.els.body.clone();
        let rain = plan.rain;
        let mut rain_rng = ChaCha8Rng::seed_from_u64(self.rng.next_u64());
        self.start_timer(Interval::start("heart-rain", rain.interval_ms, move || {
            if let Err(err) = spawn_heart(&doc, &body, &rain, &mut rain_rng) {
                log::warn!("heart spawn failed: {err}");
            }
            true
        }));

        let final_text = self.els.final_text.clone();
        final_text.set_text_content(Some(""));
        set_style(&final_text, "display", "block");
        set_style(&final_text, "color", "black");
        set_style(&final_text, "opacity", "0.85");
        let mut typewriter = Typewriter::new(&plan.message);
        let mut type_next = move || match typewriter.next_char() {
            Some(_) => {
                final_text.set_text_content(Some(typewriter.revealed()));
                true
            }
            None => false,
        };
        // First character shows immediately, the rest one per tick.
        if type_next() {
            self.start_timer(Interval::start(
                "typewriter",
                plan.typewriter_interval_ms,
                type_next,
            ));
        }
    }

    fn start_timer(&mut self, interval: Result<Interval, ProposalError>) {
        match interval {
            Ok(interval) => self.timers.push(interval),
            Err(err) => log::warn!("timer start failed: {err}"),
        }
    }
}

fn spawn_heart(
    doc: &Document,
    body: &HtmlElement,
    rain: &HeartRain,
    rng: &mut ChaCha8Rng,
) -> Result<(), ProposalError> {
    let heart: HtmlElement = doc
        .create_element("div")
        .map_err(ProposalError::js)?
        .dyn_into()
        .map_err(|_| ProposalError::Js("div is not an HtmlElement".into()))?;
    let left = rain.spawn_left_vw(rng);
    let lifetime = rain.lifetime_ms;
    heart
        .set_attribute(
            "style",
            &format!(
                "position:fixed; top:-20px; left:{left}vw; font-size:25px; z-index:1000; \
                 pointer-events:none; transform:translateY(0); transition:transform {lifetime}ms linear;"
            ),
        )
        .map_err(ProposalError::js)?;
    heart.set_text_content(Some(HeartRain::GLYPH));
    body.append_child(&heart).map_err(ProposalError::js)?;

    let falling = heart.clone();
    next_frame(move || {
        next_frame(move || set_style(&falling, "transform", "translateY(110vh)"));
    });
    after(lifetime, move || heart.remove());
    Ok(())
}
