//! Color palette for the graph visualization.
//!
//! Category -> color resolution is a static lookup table, resolved once per
//! node at frame assembly, never recomputed dynamically during painting.

use egui::Color32;

// =============================================================================
// CATEGORY COLORS
// =============================================================================

/// Known research categories and their colors
const CATEGORY_PALETTE: &[(&str, Color32)] = &[
    ("nlp", Color32::from_rgb(124, 77, 255)),      // Deep purple
    ("vision", Color32::from_rgb(33, 150, 243)),   // Blue
    ("ml", Color32::from_rgb(76, 175, 80)),        // Green
    ("systems", Color32::from_rgb(255, 152, 0)),   // Orange
    ("theory", Color32::from_rgb(0, 188, 212)),    // Cyan
    ("robotics", Color32::from_rgb(233, 30, 99)),  // Pink
    ("biology", Color32::from_rgb(139, 195, 74)),  // Light green
    ("graphics", Color32::from_rgb(255, 87, 34)),  // Deep orange
];

/// Rotating fallback palette for categories outside the known set
const FALLBACK_PALETTE: &[Color32] = &[
    Color32::from_rgb(121, 134, 203),
    Color32::from_rgb(77, 182, 172),
    Color32::from_rgb(240, 98, 146),
    Color32::from_rgb(255, 183, 77),
    Color32::from_rgb(149, 117, 205),
];

/// Resolve a category to its display color.
///
/// Unknown categories take a stable fallback color derived from the category
/// string, so the same category always renders the same.
pub fn category_color(category: &str) -> Color32 {
    let lower = category.to_lowercase();
    for &(name, color) in CATEGORY_PALETTE {
        if name == lower {
            return color;
        }
    }
    let index = lower.bytes().map(usize::from).sum::<usize>() % FALLBACK_PALETTE.len();
    FALLBACK_PALETTE[index]
}

// =============================================================================
// EDGE COLORS
// =============================================================================

pub const EDGE_COLOR: Color32 = Color32::from_rgb(141, 153, 174);
pub const EDGE_HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(255, 202, 58);

/// Opacity applied to non-highlighted edges while any highlight is active
pub const DIMMED_EDGE_ALPHA: u8 = 60;

/// Apply an alpha to a color, preserving RGB.
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Parse a "#rrggbb" hex string as carried on cluster transport data.
///
/// Transport colors are provider-supplied; anything malformed (wrong
/// length, non-ASCII bytes) yields `None`, never a panic.
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}
