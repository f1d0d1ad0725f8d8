//! Stacking order of the page.
//!
//! Background layers sit at z 0 behind content, the grain and viewfinder
//! overlays float above it, and the boot screen covers everything. None of the
//! decorative layers take pointer input.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Particles,
    Camo,
    Content,
    Grain,
    Viewfinder,
    Navbar,
    BootScreen,
}

impl Layer {
    pub const ALL: [Layer; 7] = [
        Layer::Particles,
        Layer::Camo,
        Layer::Content,
        Layer::Grain,
        Layer::Viewfinder,
        Layer::Navbar,
        Layer::BootScreen,
    ];

    /// CSS `z-index`. Content uses 1 so that it paints over the fixed
    /// background layers that share z 0 but come first in document order.
    pub fn z_index(self) -> i32 {
        match self {
            Layer::Particles | Layer::Camo => 0,
            Layer::Content => 1,
            Layer::Grain => 5,
            Layer::Viewfinder => 40,
            Layer::Navbar => 50,
            Layer::BootScreen => 100,
        }
    }

    pub fn intercepts_pointer(self) -> bool {
        matches!(self, Layer::Content | Layer::Navbar | Layer::BootScreen)
    }

    pub fn is_decorative(self) -> bool {
        matches!(
            self,
            Layer::Particles | Layer::Camo | Layer::Grain | Layer::Viewfinder
        )
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Layer::Particles => "layer-particles",
            Layer::Camo => "layer-camo",
            Layer::Content => "layer-content",
            Layer::Grain => "layer-grain",
            Layer::Viewfinder => "layer-viewfinder",
            Layer::Navbar => "layer-navbar",
            Layer::BootScreen => "layer-boot",
        }
    }

    /// Inline style carrying the stacking contract, applied on mount so the
    /// order holds even if the stylesheet fails to load.
    pub fn inline_style(self) -> String {
        let pointer = if self.intercepts_pointer() { "auto" } else { "none" };
        format!("z-index:{};pointer-events:{pointer};", self.z_index())
    }
}

/// Layers in paint order, bottom first.
pub fn stack() -> Vec<Layer> {
    let mut layers = Layer::ALL.to_vec();
    layers.sort_by_key(|l| l.z_index());
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_style_disables_pointer_for_overlays() {
        assert_eq!(
            Layer::Grain.inline_style(),
            "z-index:5;pointer-events:none;"
        );
        assert!(Layer::Navbar.inline_style().contains("pointer-events:auto"));
    }
}
