//! Energy-type lookups: color, icon key, and text symbol.
//!
//! Keys are matched case-insensitively, with the video-game aliases
//! (`electric`, `dark`, `steel`, `normal`) folded onto the card names.

/// An sRGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

const fn rgb(red: f32, green: f32, blue: f32) -> Rgb {
    Rgb { red, green, blue }
}

pub const GRAYSCALE_5: Rgb = rgb(0.22, 0.21, 0.25);
pub const GRAYSCALE_6: Rgb = rgb(0.28, 0.27, 0.31);

pub fn type_color(kind: &str) -> Rgb {
    match kind.to_lowercase().as_str() {
        "fire" => rgb(0.8, 0.2, 0.1),
        "water" => rgb(0.1, 0.6, 0.8),
        "grass" => rgb(0.2, 0.7, 0.1),
        "lightning" | "electric" => rgb(0.9, 0.7, 0.0),
        "psychic" => rgb(0.4, 0.2, 0.8),
        "fighting" => rgb(0.8, 0.4, 0.1),
        "darkness" | "dark" => GRAYSCALE_5,
        "metal" | "steel" => GRAYSCALE_6,
        "fairy" => rgb(0.8, 0.3, 0.7),
        "dragon" => rgb(0.3, 0.2, 0.8),
        "colorless" | "normal" => GRAYSCALE_6,
        "ground" => rgb(0.6, 0.4, 0.1),
        "rock" => rgb(0.5, 0.4, 0.2),
        "bug" => rgb(0.4, 0.6, 0.1),
        "ghost" => rgb(0.4, 0.2, 0.6),
        "ice" => rgb(0.3, 0.7, 0.9),
        "flying" => rgb(0.4, 0.6, 0.9),
        "poison" => rgb(0.6, 0.2, 0.6),
        _ => GRAYSCALE_6,
    }
}

/// Symbol-font icon name for a type badge.
pub fn type_icon(kind: &str) -> &'static str {
    match kind.to_lowercase().as_str() {
        "fire" => "flame.circle.fill",
        "water" => "drop.circle.fill",
        "grass" => "leaf.circle.fill",
        "lightning" | "electric" => "bolt.circle.fill",
        "psychic" => "eye.circle.fill",
        "fighting" => "fist.raised.circle.fill",
        "darkness" | "dark" => "moon.circle.fill",
        "metal" | "steel" => "gear.circle.fill",
        "fairy" => "sparkle",
        "dragon" => "hurricane.circle.fill",
        "colorless" | "normal" => "star.circle.fill",
        "ground" => "mountain.2.circle.fill",
        "rock" => "cube.fill",
        "bug" => "ant.circle.fill",
        "ghost" => "eye.trianglebadge.exclamationmark",
        "ice" => "snowflake.circle.fill",
        "flying" => "cloud.circle.fill",
        "poison" => "drop.triangle.fill",
        _ => "circle.fill",
    }
}

/// Emoji for an energy cost, or None where an icon is drawn instead.
pub fn energy_symbol(kind: &str) -> Option<&'static str> {
    match kind.to_lowercase().as_str() {
        "fire" => Some("🔥"),
        "water" => Some("💧"),
        "grass" => Some("🌿"),
        "lightning" | "electric" => Some("⚡"),
        "psychic" => Some("🔮"),
        "fighting" => Some("👊"),
        "darkness" | "dark" => Some("🌙"),
        "metal" | "steel" => Some("⚙️"),
        "fairy" => Some("✨"),
        "dragon" => Some("🐲"),
        "poison" => Some("☠️"),
        _ => None,
    }
}
