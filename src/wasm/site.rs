use web_sys::{Element, HtmlElement};

use super::dom::{append, set_style, Dom, JsResultExt};
use super::frame::FrameLoop;
use super::render::ParticleRenderer;
use super::reveal::{reveal_now, RevealObserver};
use super::sections;
use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::layers::Layer;
use crate::motion::{hero_parallax, Ease, GlitchLoop, LoopTrack, HERO_ENTRANCE};
use crate::particles::ParticleField;

/// Everything shown after the boot screen. Owns its frame loop; dropping the
/// site stops all motion and removes it from the page.
pub(crate) struct Site {
    root: Element,
    _frames: FrameLoop,
    _reveal: Option<RevealObserver>,
}

struct Motion {
    words: (HtmlElement, LoopTrack),
    ticker: (HtmlElement, LoopTrack),
    parallax: HtmlElement,
    glitch: (HtmlElement, GlitchLoop),
}

impl Motion {
    fn apply(&self, elapsed: f64, scroll_y: f64) {
        let (words_el, words) = &self.words;
        let (ticker_el, ticker) = &self.ticker;
        let (glitch_el, glitch) = &self.glitch;
        let frame = glitch.sample(elapsed);

        let results = [
            set_style(words_el, "transform", &format!("translateX({:.2}px)", words.offset(elapsed))),
            set_style(ticker_el, "transform", &format!("translateX({:.2}px)", ticker.offset(elapsed))),
            set_style(
                &self.parallax,
                "transform",
                &format!("translateY({:.2}px)", hero_parallax(scroll_y)),
            ),
            set_style(glitch_el, "transform", &format!("translateX({:.2}px)", frame.x)),
            set_style(glitch_el, "opacity", &format!("{:.3}", frame.opacity)),
        ];
        for result in results {
            if let Err(err) = result {
                tracing::warn!(%err, "motion update failed");
            }
        }
    }
}

impl Site {
    #[tracing::instrument(skip_all)]
    pub(crate) fn mount(dom: &Dom, config: &SiteConfig, rng: &mut fastrand::Rng) -> SiteResult<Self> {
        let root = dom.el("div", "site")?;

        let canvas = sections::particle_canvas(dom)?;
        let content = dom.layer(Layer::Content, "main", "")?;
        let hero = sections::hero(dom)?;
        let (marquee, words_track) = sections::marquee(dom)?;
        let (tech, ticker_track) = sections::tech_specs(dom)?;
        let (gallery, cards) = sections::gallery(dom)?;
        append(
            &content,
            &[
                &hero.root,
                &marquee,
                &sections::philosophy(dom)?,
                &gallery,
                &tech,
                &sections::footer(dom)?,
            ],
        )?;

        // Document order follows the paint order of the layer stack.
        let canvas_el: &Element = canvas.as_ref();
        append(
            &root,
            &[
                canvas_el,
                &sections::camo(dom)?,
                &content,
                &sections::grain(dom)?,
                &sections::viewfinder(dom)?,
                &sections::navbar(dom)?,
            ],
        )?;
        dom.body()?.append_child(&root).js_context("mount site")?;

        // Entrance: start from the offset state, then let CSS transition to rest.
        let ease = HERO_ENTRANCE.to_css();
        set_style(&hero.title, "transition", &format!("transform 1s {ease}, opacity 1s {ease}"))?;
        set_style(&hero.tagline, "transition", &format!("opacity 1s {} 0.8s", Ease::Linear.to_css()))?;
        // Flush styles so the starting state is committed before the class flips.
        let _ = hero.title.offset_height();
        hero.root.class_list().add_1("is-entered").js_context("classList.add")?;

        let reveal = match RevealObserver::new() {
            Ok(observer) => {
                for card in &cards {
                    observer.observe(card);
                }
                Some(observer)
            }
            Err(err) => {
                tracing::warn!(%err, "scroll reveal unavailable; showing cards");
                reveal_now(&cards);
                None
            }
        };

        let mut field = ParticleField::generate(&config.particles, rng);
        let renderer = match ParticleRenderer::new(canvas, &field, &config.particles) {
            Ok(renderer) => Some(renderer),
            Err(err) => {
                tracing::warn!(%err, "particle field disabled");
                None
            }
        };

        let marquee_cfg = &config.marquee;
        let motion = Motion {
            words: (words_track, LoopTrack::new(marquee_cfg.distance_px, marquee_cfg.words_secs)),
            ticker: (ticker_track, LoopTrack::new(marquee_cfg.distance_px, marquee_cfg.ticker_secs)),
            parallax: hero.parallax,
            glitch: (hero.glitch, GlitchLoop::default()),
        };

        let window = web_sys::window();
        let frames = FrameLoop::start(move |dt, elapsed| {
            let scroll_y = window
                .as_ref()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or(0.0);
            motion.apply(elapsed, scroll_y);

            if let Some(renderer) = renderer.as_ref() {
                field.advance(dt as f32);
                renderer.draw(&field);
            }
        })?;

        tracing::info!("site mounted");
        Ok(Self {
            root,
            _frames: frames,
            _reveal: reveal,
        })
    }
}

impl Drop for Site {
    fn drop(&mut self) {
        self.root.remove();
    }
}
