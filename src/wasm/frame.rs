use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::dom::JsResultExt;
use crate::error::{SiteError, SiteResult};

/// Longest step handed to a frame callback, so a backgrounded tab does not
/// produce one huge jump when it comes back.
const MAX_FRAME_SECS: f64 = 0.1;

struct FrameState {
    window: Window,
    // Filled right after construction; the callback re-requests itself
    // through this slot.
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    request: Cell<Option<i32>>,
    running: Cell<bool>,
}

impl FrameState {
    fn request_next(&self) -> SiteResult<()> {
        let closure = self.closure.borrow();
        let Some(closure) = closure.as_ref() else {
            return Ok(());
        };
        let id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .js_context("requestAnimationFrame")?;
        self.request.set(Some(id));
        Ok(())
    }
}

/// A `requestAnimationFrame` loop that stops when dropped.
pub(crate) struct FrameLoop {
    state: Rc<FrameState>,
}

impl FrameLoop {
    /// Calls `on_frame(dt, elapsed)` every frame, both in seconds; `dt` is 0
    /// on the first frame.
    pub(crate) fn start(mut on_frame: impl FnMut(f64, f64) + 'static) -> SiteResult<Self> {
        let window = web_sys::window().ok_or_else(|| SiteError::render("no window"))?;
        let state = Rc::new(FrameState {
            window,
            closure: RefCell::new(None),
            request: Cell::new(None),
            running: Cell::new(true),
        });

        let weak = Rc::downgrade(&state);
        let mut start_ms: Option<f64> = None;
        let mut last_ms: Option<f64> = None;
        let closure = Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            if !state.running.get() {
                return;
            }
            let start = *start_ms.get_or_insert(now_ms);
            let dt = last_ms.map_or(0.0, |last| ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_SECS));
            last_ms = Some(now_ms);

            on_frame(dt, (now_ms - start) / 1000.0);

            if let Err(err) = state.request_next() {
                tracing::error!(%err, "frame loop stopped");
                state.running.set(false);
            }
        });
        *state.closure.borrow_mut() = Some(closure);
        state.request_next()?;

        Ok(Self { state })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.state.running.set(false);
        if let Some(id) = self.state.request.take() {
            let _ = self.state.window.cancel_animation_frame(id);
        }
        self.state.closure.borrow_mut().take();
    }
}
