//! Display copy. Everything here is `'static` and returned in a fixed order.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub category: &'static str,
    pub image: &'static str,
}

impl Project {
    /// Zero-padded position shown on a gallery card ("01", "02", ...).
    pub fn index_label(index: usize) -> String {
        format!("{:02}", index + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechSpec {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStyle {
    /// Black fill with a white stroke.
    Outline,
    Solid,
    Accent,
    /// The spinning disc glyph between words.
    Disc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarqueeWord {
    pub text: &'static str,
    pub style: WordStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub href: &'static str,
}

pub const BRAND: &str = "KREA";
pub const BRAND_MARK: &str = "KREA®";
pub const BOOT_TITLE: &str = "Krea® System Boot";
pub const BOOT_VERSION: &str = "V.2.0.24";
pub const BOOT_STATUS: &str = "Initializing Assets...";
pub const BOOT_LOCATION: &str = "Madrid, ES";
pub const HERO_BADGE: &str = "[EST. MMXXIV]";
pub const HERO_VIDEO: &str =
    "https://assets.mixkit.co/videos/preview/mixkit-urban-city-traffic-at-night-aerial-view-45084-large.mp4";
pub const MANIFESTO_IMAGE: &str =
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?q=80&w=1000&auto=format&fit=crop";
pub const CONTACT_LABEL: &str = "Contacto";
pub const FOOTER_CTA: &str = "CONTACTAR";
pub const FOOTER_LINE: &str = "Krea® Creative Corp • Madrid • 2024";
pub const BATTERY_PERCENT: u8 = 74;
/// How many times the word group repeats inside the marquee strip.
pub const MARQUEE_REPEAT: usize = 6;
/// How many times the spec list repeats inside the ticker strip.
pub const TICKER_REPEAT: usize = 4;

static PROJECTS: [Project; 4] = [
    Project {
        title: "NIGHTRUN",
        category: "AUTO",
        image: "https://images.unsplash.com/photo-1544620347-c4fd4a3d5957?q=80&w=1000&auto=format&fit=crop",
    },
    Project {
        title: "NEON",
        category: "FASHION",
        image: "https://images.unsplash.com/photo-1534528741775-53994a69daeb?q=80&w=1000&auto=format&fit=crop",
    },
    Project {
        title: "BLOCK",
        category: "URBAN",
        image: "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?q=80&w=1000&auto=format&fit=crop",
    },
    Project {
        title: "DRIFT",
        category: "DOC",
        image: "https://images.unsplash.com/photo-1600705722838-831e67aa24de?q=80&w=1000&auto=format&fit=crop",
    },
];

static TECH_SPECS: [TechSpec; 5] = [
    TechSpec { label: "CAM A", value: "KOMODO X" },
    TechSpec { label: "CAM B", value: "FX3" },
    TechSpec { label: "AIR", value: "MAVIC 3" },
    TechSpec { label: "GLASS", value: "ATLAS" },
    TechSpec { label: "STAB", value: "RONIN 4D" },
];

static NAV_LINKS: [&str; 3] = ["Estudio", "Portafolio", "Manifiesto"];

static MARQUEE_WORDS: [MarqueeWord; 5] = [
    MarqueeWord { text: "VISUALS ", style: WordStyle::Outline },
    MarqueeWord { text: "", style: WordStyle::Disc },
    MarqueeWord { text: "DIRECTING ", style: WordStyle::Solid },
    MarqueeWord { text: "///", style: WordStyle::Accent },
    MarqueeWord { text: "DRONE ", style: WordStyle::Outline },
];

static VIEWFINDER_READOUTS: [&str; 4] = ["● REC", "ISO 800", "4K/60FPS", "[RAW]"];

static SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink { name: "Instagram", href: "#" },
    SocialLink { name: "Twitter", href: "#" },
    SocialLink { name: "Mail", href: "#" },
];

pub fn projects() -> &'static [Project] {
    &PROJECTS
}

pub fn tech_specs() -> &'static [TechSpec] {
    &TECH_SPECS
}

/// The spec list repeated for the scrolling ticker.
pub fn tech_ticker() -> impl Iterator<Item = &'static TechSpec> {
    std::iter::repeat(tech_specs()).take(TICKER_REPEAT).flatten()
}

pub fn nav_links() -> &'static [&'static str] {
    &NAV_LINKS
}

pub fn marquee_words() -> &'static [MarqueeWord] {
    &MARQUEE_WORDS
}

pub fn viewfinder_readouts() -> &'static [&'static str] {
    &VIEWFINDER_READOUTS
}

pub fn social_links() -> &'static [SocialLink] {
    &SOCIAL_LINKS
}
