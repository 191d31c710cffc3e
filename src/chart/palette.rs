//! Bar colours per application name.

use std::collections::BTreeMap;

/// Colour for applications without a palette entry
pub const FALLBACK_COLOUR: &str = "#999999";

/// Brand colours for the sample applications shipped with the comparison
const BUILTIN_COLOURS: [(&str, &str); 10] = [
    ("react-18", "#0A7EA5"),
    ("react-19", "#0A7EA5"),
    ("angular-21", "#DD0031"),
    ("vue", "#42B883"),
    ("nuxt-4", "#00DC82"),
    ("svelte", "#FF3E00"),
    ("sveltekit", "#FF3E00"),
    ("qwik", "#AC7EF4"),
    ("preact", "#673AB8"),
    ("solid", "#2C4F7C"),
];

/// Total mapping from application name to fill colour
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    overrides: BTreeMap<String, String>,
}

impl Palette {
    /// Built-in colours only
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in colours extended or overridden by `overrides`
    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Fill colour for `name`; never fails
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_compare::chart::{Palette, FALLBACK_COLOUR};
    ///
    /// let palette = Palette::new();
    /// assert_eq!(palette.colour_for("vue"), "#42B883");
    /// assert_eq!(palette.colour_for("my-new-framework"), FALLBACK_COLOUR);
    /// ```
    pub fn colour_for(&self, name: &str) -> &str {
        if let Some(colour) = self.overrides.get(name) {
            return colour;
        }
        BUILTIN_COLOURS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, colour)| *colour)
            .unwrap_or(FALLBACK_COLOUR)
    }
}
