//! One-shot scroll reveal for gallery cards.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom::JsResultExt;
use crate::error::SiteResult;
use crate::motion::{REVEAL_CLASS, REVEAL_ROOT_MARGIN};

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Adds [`REVEAL_CLASS`] to each observed element the first time it enters the
/// viewport, then stops watching it. Disconnects on drop.
pub(crate) struct RevealObserver {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl RevealObserver {
    pub(crate) fn new() -> SiteResult<Self> {
        let callback: EntriesCallback = Closure::new(|entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Err(err) = target.class_list().add_1(REVEAL_CLASS) {
                    tracing::warn!(err = ?err, "reveal class not applied");
                }
                observer.unobserve(&target);
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_root_margin(REVEAL_ROOT_MARGIN);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .js_context("IntersectionObserver")?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub(crate) fn observe(&self, el: &Element) {
        self.observer.observe(el);
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Shows elements straight away when no observer can be created.
pub(crate) fn reveal_now(elements: &[Element]) {
    for el in elements {
        let _ = el.class_list().add_1(REVEAL_CLASS);
    }
}
