//! KREA studio site.
//!
//! The target-independent modules hold everything with behavior worth
//! testing on the host: the boot sequence, timers, content, layer order and
//! the particle model. The browser layer lives in `wasm` and is only compiled
//! for wasm32.

pub mod boot;
pub mod color;
pub mod config;
pub mod content;
pub mod error;
pub mod layers;
pub mod motion;
pub mod particles;
pub mod timer;

pub use boot::{BootController, BootPhase, BootSequence, BootStep, IncrementSource, ScriptedIncrements};
pub use config::SiteConfig;
pub use error::{SiteError, SiteResult};
pub use timer::{Scheduler, TimerHandle, VirtualScheduler};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
