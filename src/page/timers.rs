// Browser timer helpers. Repeating work is held as cancellable `Interval`s;
// one-shot callbacks (`after`, `next_frame`) free themselves once they run.
use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::error::ProposalError;

/// A `setInterval` registration. The tick returns `false` to stop itself;
/// dropping the handle also clears it.
pub struct Interval {
    name: &'static str,
    id: Rc<Cell<Option<i32>>>,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start<F>(name: &'static str, period_ms: i32, mut tick: F) -> Result<Self, ProposalError>
    where
        F: FnMut() -> bool + 'static,
    {
        let win = window().ok_or_else(|| ProposalError::Js("no window".into()))?;
        let id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let own_id = id.clone();
        let callback = Closure::wrap(Box::new(move || {
            if !tick() {
                // Only clear the registration here; the closure itself lives on in the handle.
                if let Some(handle) = own_id.take() {
                    clear_interval(handle);
                    log::debug!("interval `{name}` finished");
                }
            }
        }) as Box<dyn FnMut()>);
        let handle = win
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(ProposalError::js)?;
        id.set(Some(handle));
        Ok(Self {
            name,
            id,
            _callback: callback,
        })
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.id.take() {
            clear_interval(handle);
            log::debug!("interval `{}` cancelled", self.name);
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.get().is_some()
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn clear_interval(handle: i32) {
    if let Some(w) = window() {
        w.clear_interval_with_handle(handle);
    }
}

/// Intervals owned by the page, cancelled together on teardown.
#[derive(Default)]
pub struct Timers {
    intervals: Vec<Interval>,
}

impl Timers {
    pub fn push(&mut self, interval: Interval) {
        // Finished intervals only hold a dead closure; drop them as we go.
        self.intervals.retain(Interval::is_active);
        self.intervals.push(interval);
    }

    pub fn cancel_all(&mut self) {
        for interval in self.intervals.drain(..) {
            interval.cancel();
        }
    }
}

/// Runs `f` once after `delay_ms`.
pub fn after(delay_ms: i32, f: impl FnOnce() + 'static) {
    let Some(win) = window() else { return };
    let cb = Closure::once_into_js(f);
    if let Err(err) =
        win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)
    {
        log::warn!("setTimeout failed: {err:?}");
    }
}

/// Runs `f` on the next animation frame.
pub fn next_frame(f: impl FnOnce() + 'static) {
    let Some(win) = window() else { return };
    let cb = Closure::once_into_js(f);
    if let Err(err) = win.request_animation_frame(cb.unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {err:?}");
    }
}
