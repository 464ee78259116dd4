use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::GroupBy;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

/// `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Well-known group colours
// ---------------------------------------------------------------------------

/// The fixed colour for a well-known group key, if there is one.
pub fn known_color(by: GroupBy, key: &str) -> Option<Srgb<u8>> {
    let rgb = match (by, key) {
        (GroupBy::Grade, "A") => (0x2e, 0xcc, 0x71),
        (GroupBy::Grade, "B") => (0x27, 0xae, 0x60),
        (GroupBy::Grade, "C") => (0xf1, 0xc4, 0x0f),
        (GroupBy::Grade, "D") => (0xe6, 0x7e, 0x22),
        (GroupBy::Grade, "F") => (0xe7, 0x4c, 0x3c),
        (GroupBy::Gender, "Female") => (0xe7, 0x4c, 0x3c),
        (GroupBy::Gender, "Male") => (0x34, 0x98, 0xdb),
        (GroupBy::Department, "Engineering") => (0x2e, 0xcc, 0x71),
        (GroupBy::Department, "Business") => (0x34, 0x98, 0xdb),
        (GroupBy::Department, "CS") => (0xe7, 0x4c, 0x3c),
        (GroupBy::Department, "Mathematics") => (0xf1, 0xc4, 0x0f),
        _ => return None,
    };
    Some(Srgb::new(rgb.0, rgb.1, rgb.2))
}

/// Colour used when nothing else applies.
pub fn fallback_color(by: GroupBy) -> Srgb<u8> {
    match by {
        GroupBy::Grade | GroupBy::Gender => Srgb::new(0x9b, 0x59, 0xb6),
        GroupBy::Department => Srgb::new(0xe6, 0x7e, 0x22),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: group key → colour
// ---------------------------------------------------------------------------

/// Maps the group keys of one grouping attribute to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Srgb<u8>>,
    default_color: Srgb<u8>,
}

impl ColorMap {
    /// Well-known keys keep their fixed colour; the rest share a generated
    /// palette in key order.
    pub fn new<'a>(by: GroupBy, keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut mapping = BTreeMap::new();
        let mut unknown = Vec::new();
        for key in keys {
            match known_color(by, key) {
                Some(c) => {
                    mapping.insert(key.to_string(), c);
                }
                None => unknown.push(key.to_string()),
            }
        }
        unknown.sort();
        unknown.dedup();

        let palette = generate_palette(unknown.len());
        mapping.extend(unknown.into_iter().zip(palette));

        ColorMap {
            mapping,
            default_color: fallback_color(by),
        }
    }

    /// Look up the colour for a given group key.
    pub fn color_for(&self, key: &str) -> Srgb<u8> {
        self.mapping
            .get(key)
            .copied()
            .unwrap_or(self.default_color)
    }
}
