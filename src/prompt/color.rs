//! Deterministic category coloring.
//!
//! A category name hashes to a fixed slot of [`CATEGORY_PALETTE`]. The palette
//! is append-only: reordering or removing entries would move existing
//! categories to new colors in every regenerated script.

/// Palette revision embedded in generated scripts.
pub const PALETTE_VERSION: u32 = 1;

/// One palette slot: badge background and text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryColor {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
}

/// Ordered category palette. Append only.
pub const CATEGORY_PALETTE: [CategoryColor; 10] = [
    CategoryColor { name: "sky", background: "#e0f2fe", foreground: "#075985" },
    CategoryColor { name: "emerald", background: "#d1fae5", foreground: "#065f46" },
    CategoryColor { name: "amber", background: "#fef3c7", foreground: "#92400e" },
    CategoryColor { name: "rose", background: "#ffe4e6", foreground: "#9f1239" },
    CategoryColor { name: "violet", background: "#ede9fe", foreground: "#5b21b6" },
    CategoryColor { name: "pink", background: "#fce7f3", foreground: "#9d174d" },
    CategoryColor { name: "teal", background: "#ccfbf1", foreground: "#115e59" },
    CategoryColor { name: "fuchsia", background: "#fae8ff", foreground: "#86198f" },
    CategoryColor { name: "indigo", background: "#e0e7ff", foreground: "#3730a3" },
    CategoryColor { name: "lime", background: "#ecfccb", foreground: "#3f6212" },
];

/// Palette index for a category, or `None` for a blank name.
///
/// The hash walks UTF-16 code units with 32-bit wrapping arithmetic
/// (`h = h * 31 + unit`), so the web client and the generated script agree
/// on every name, including ones outside the BMP.
pub fn color_for(category: &str) -> Option<usize> {
    if category.trim().is_empty() {
        return None;
    }

    let hash = category
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32));

    let magnitude = (hash as i64).unsigned_abs();
    Some((magnitude % CATEGORY_PALETTE.len() as u64) as usize)
}

/// Palette entry for a category, or `None` for a blank name.
pub fn category_color(category: &str) -> Option<&'static CategoryColor> {
    color_for(category).map(|i| &CATEGORY_PALETTE[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_categories_have_no_color() {
        assert_eq!(color_for(""), None);
        assert_eq!(color_for("   "), None);
    }

    #[test]
    fn known_hashes_are_stable() {
        // "a" = 97; 97 % 10 = 7
        assert_eq!(color_for("a"), Some(7));
        // "ab" = 97 * 31 + 98 = 3105; 3105 % 10 = 5
        assert_eq!(color_for("ab"), Some(5));
    }

    #[test]
    fn same_name_same_color() {
        assert_eq!(color_for("Writing"), color_for("Writing"));
        assert_eq!(color_for("日本語"), color_for("日本語"));
    }

    #[test]
    fn overflowing_hash_stays_in_range() {
        let long = "category name that is long enough to wrap the hash many times over";
        let index = color_for(long).unwrap();
        assert!(index < CATEGORY_PALETTE.len());
    }

    #[test]
    fn astral_characters_hash_as_surrogate_pairs() {
        // U+1F600 is D83D DE00 in UTF-16.
        let expected = (0xD83Di64 * 31 + 0xDE00) % 10;
        assert_eq!(color_for("😀"), Some(expected as usize));
    }

    #[test]
    fn category_color_resolves_palette_entry() {
        let color = category_color("a").unwrap();
        assert_eq!(color.name, "fuchsia");
        assert!(category_color("").is_none());
    }
}
