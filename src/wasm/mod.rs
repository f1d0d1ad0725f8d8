//! Browser entry point.
//!
//! The page goes through three stages: the boot screen counts up, slides away,
//! then the site mounts. The current stage is kept in a thread-local slot so
//! it lives exactly as long as the page and is dropped, timers and all, when
//! the next stage replaces it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

mod boot_screen;
mod dom;
mod frame;
mod logging;
mod render;
mod reveal;
mod sections;
mod site;
mod timers;

use boot_screen::BootScreen;
use dom::Dom;
use site::Site;
pub use timers::BrowserScheduler;

use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::timer::{Scheduler, TimerHandle};

const CONFIG_ELEMENT_ID: &str = "site-config";

enum Stage {
    Booting(BootScreen),
    Exiting {
        _screen: BootScreen,
        _timer: TimerHandle,
    },
    Live(Site),
}

thread_local! {
    static STAGE: RefCell<Option<Stage>> = const { RefCell::new(None) };
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Shared by every stage transition.
#[derive(Clone)]
struct App {
    dom: Dom,
    config: Rc<SiteConfig>,
    scheduler: Rc<dyn Scheduler>,
    seed: u64,
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    start().map_err(|err| {
        tracing::error!(%err, "site failed to start");
        JsValue::from(err)
    })
}

fn start() -> SiteResult<()> {
    let dom = Dom::new()?;
    let config = load_config(&dom)?;
    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
    tracing::info!(seed, "starting");

    let app = App {
        dom,
        config: Rc::new(config),
        scheduler: Rc::new(BrowserScheduler::new()?),
        seed,
    };

    let on_complete = {
        let app = app.clone();
        move || app.on_boot_complete()
    };
    let screen = BootScreen::mount(
        &app.dom,
        app.scheduler.clone(),
        fastrand::Rng::with_seed(seed),
        &app.config.boot,
        on_complete,
    )?;
    replace_stage(Stage::Booting(screen));
    Ok(())
}

fn load_config(dom: &Dom) -> SiteResult<SiteConfig> {
    let Some(el) = dom.document().get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(SiteConfig::default());
    };
    let text = el.text_content().unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(SiteConfig::default());
    }
    SiteConfig::from_json(&text)
}

/// Installs `next` and returns whatever stage it replaced, so the caller
/// decides when the old one is dropped.
fn replace_stage(next: Stage) -> Option<Stage> {
    STAGE.with(|slot| slot.borrow_mut().replace(next))
}

fn take_stage() -> Option<Stage> {
    STAGE.with(|slot| slot.borrow_mut().take())
}

impl App {
    fn on_boot_complete(self) {
        let screen = match take_stage() {
            Some(Stage::Booting(screen)) => screen,
            other => {
                tracing::warn!("boot completion outside the booting stage");
                if let Some(stage) = other {
                    replace_stage(stage);
                }
                return;
            }
        };
        tracing::info!(progress = screen.progress(), "boot screen exiting");

        let exit_ms = self.config.boot.exit_ms;
        if let Err(err) = screen.begin_exit(exit_ms) {
            tracing::warn!(%err, "boot exit animation unavailable");
        }

        let app = self.clone();
        match self
            .scheduler
            .after(exit_ms, Box::new(move || app.mount_site()))
        {
            Ok(timer) => {
                replace_stage(Stage::Exiting {
                    _screen: screen,
                    _timer: timer,
                });
            }
            Err(err) => {
                tracing::error!(%err, "could not schedule site mount; mounting now");
                drop(screen);
                self.mount_site();
            }
        }
    }

    fn mount_site(self) {
        // Dropping the previous stage removes the boot overlay.
        drop(take_stage());

        let mut rng = fastrand::Rng::with_seed(self.seed.wrapping_add(1));
        match Site::mount(&self.dom, &self.config, &mut rng) {
            Ok(site) => {
                replace_stage(Stage::Live(site));
            }
            Err(err) => tracing::error!(%err, "site failed to mount"),
        }
    }
}
