use std::rc::Rc;

use web_sys::Element;

use super::dom::{append, as_html, set_attr, set_style, Dom, JsResultExt};
use crate::boot::{percent_label, BootController, IncrementSource, COMPLETE_PERCENT};
use crate::config::BootConfig;
use crate::content;
use crate::error::SiteResult;
use crate::layers::Layer;
use crate::motion::BOOT_EXIT;
use crate::timer::Scheduler;

const SCRIBBLE_PATH: &str = "M10,50 Q50,90 90,50 T180,50";

/// The full-screen loader. Dropping it tears down its controller and removes
/// the overlay from the page.
pub(crate) struct BootScreen {
    root: Element,
    controller: Option<BootController>,
}

impl BootScreen {
    #[tracing::instrument(skip_all)]
    pub(crate) fn mount(
        dom: &Dom,
        scheduler: Rc<dyn Scheduler>,
        source: impl IncrementSource + 'static,
        config: &BootConfig,
        on_complete: impl FnOnce() + 'static,
    ) -> SiteResult<Self> {
        let root = dom.layer(Layer::BootScreen, "div", "boot")?;

        let header = dom.el("div", "boot-row boot-header")?;
        append(
            &header,
            &[&dom.text("span", "", content::BOOT_TITLE)?, &dom.text("span", "", content::BOOT_VERSION)?],
        )?;

        let center = dom.el("div", "boot-center")?;
        let ghost = dom.text("h1", "boot-ghost font-impact", "LOADING")?;
        let counter_wrap = dom.el("div", "boot-counter-wrap")?;
        let counter = dom.text("span", "boot-counter", &percent_label(0))?;

        let svg = dom.svg("svg")?;
        set_attr(&svg, "class", "boot-scribble")?;
        set_attr(&svg, "viewBox", "0 0 200 100")?;
        let path = dom.svg("path")?;
        set_attr(&path, "d", SCRIBBLE_PATH)?;
        // Unit path length so the dash offset is simply 1 - progress.
        set_attr(&path, "pathLength", "1")?;
        set_attr(&path, "stroke-dasharray", "1")?;
        set_attr(&path, "stroke-dashoffset", "1")?;
        append(&svg, &[&path])?;

        append(&counter_wrap, &[&counter, &svg])?;
        append(&center, &[&ghost, &counter_wrap])?;

        let footer = dom.el("div", "boot-row boot-footer")?;
        let status = dom.el("div", "boot-status")?;
        append(
            &status,
            &[&dom.el("div", "boot-led pulse")?, &dom.text("span", "", content::BOOT_STATUS)?],
        )?;
        append(
            &footer,
            &[&status, &dom.text("span", "accent-purple", content::BOOT_LOCATION)?],
        )?;

        append(&root, &[&header, &center, &footer])?;
        dom.body()?
            .append_child(&root)
            .js_context("mount boot screen")?;

        let activated = BootController::activate(
            scheduler,
            source,
            config,
            move |progress| {
                counter.set_text_content(Some(&percent_label(progress)));
                let remaining = 1.0 - f64::from(progress) / f64::from(COMPLETE_PERCENT);
                if let Err(err) = set_attr(&path, "stroke-dashoffset", &format!("{remaining:.3}")) {
                    tracing::warn!(%err, "scribble update failed");
                }
            },
            on_complete,
        );
        let controller = match activated {
            Ok(controller) => controller,
            Err(err) => {
                root.remove();
                return Err(err);
            }
        };

        Ok(Self {
            root,
            controller: Some(controller),
        })
    }

    /// Starts the slide-up exit. The overlay stays in the page until dropped.
    pub(crate) fn begin_exit(&self, exit_ms: u32) -> SiteResult<()> {
        let html = as_html(&self.root)?;
        set_style(
            &html,
            "transition",
            &format!("transform {exit_ms}ms {}", BOOT_EXIT.to_css()),
        )?;
        set_style(&html, "transform", "translateY(-100%)")
    }

    pub(crate) fn progress(&self) -> u8 {
        self.controller.as_ref().map_or(COMPLETE_PERCENT, BootController::progress)
    }
}

impl Drop for BootScreen {
    fn drop(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.teardown();
        }
        self.root.remove();
    }
}
