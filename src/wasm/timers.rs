use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::dom::describe;
use crate::error::{SiteError, SiteResult};
use crate::timer::{OnceTask, RepeatingTask, Scheduler, TimerHandle};

/// `setInterval` / `setTimeout` behind owned handles.
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    pub fn new() -> SiteResult<Self> {
        let window = web_sys::window().ok_or_else(|| SiteError::timer("no window"))?;
        Ok(Self { window })
    }
}

fn clamp_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

impl Scheduler for BrowserScheduler {
    fn every(&self, period_ms: u32, mut task: RepeatingTask) -> SiteResult<TimerHandle> {
        let closure = Closure::<dyn FnMut()>::new(move || task());
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                clamp_ms(period_ms),
            )
            .map_err(|err| SiteError::timer(format!("setInterval: {}", describe(&err))))?;

        let window = self.window.clone();
        // The closure stays owned by the handle: cancelling from inside the
        // tick only clears the interval, the closure is freed with the handle.
        Ok(TimerHandle::with_keep_alive(
            move || window.clear_interval_with_handle(id),
            closure,
        ))
    }

    fn after(&self, delay_ms: u32, task: OnceTask) -> SiteResult<TimerHandle> {
        // Owned by the handle like the interval closure, so a cancelled
        // timeout frees its task too. The handle may be dropped from inside
        // the callback; wasm-bindgen defers the free until the call returns.
        let closure: Closure<dyn FnMut()> = Closure::once(move || task());
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                clamp_ms(delay_ms),
            )
            .map_err(|err| SiteError::timer(format!("setTimeout: {}", describe(&err))))?;

        let window = self.window.clone();
        Ok(TimerHandle::with_keep_alive(
            move || window.clear_timeout_with_handle(id),
            closure,
        ))
    }
}
