//! Static note color palette.

/// One palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    /// Internal identifier, e.g. `lightBlue`.
    pub name: &'static str,
    /// Portuguese display name.
    pub localized_name: &'static str,
    pub hex_code: &'static str,
    /// Light colors are rendered with a white border.
    pub is_light: bool,
}

const fn entry(
    name: &'static str,
    localized_name: &'static str,
    hex_code: &'static str,
    is_light: bool,
) -> ColorEntry {
    ColorEntry {
        name,
        localized_name,
        hex_code,
        is_light,
    }
}

/// The built-in palette, in display order. White comes first and is the default.
pub const PALETTE: &[ColorEntry] = &[
    entry("white", "Branco", "#fff", false),
    entry("lightBlue", "Azul Claro", "#BAE2FF", true),
    entry("lightGreen", "Verde Claro", "#B9FFDD", true),
    entry("lightYellow", "Amarelo Claro", "#FFE8AC", true),
    entry("lightPink", "Rosa Claro", "#FFCAB9", true),
    entry("lightRed", "Vermelho Claro", "#F99494", true),
    entry("blue", "Azul", "#9DD6FF", false),
    entry("pink", "Rosa", "#ECA1FF", false),
    entry("yellow", "Amarelo", "#DAFF8B", false),
    entry("orange", "Laranja", "#FFA285", false),
    entry("lightGray", "Cinza Claro", "#CDCDCD", true),
    entry("darkerGray", "Cinza Escuro", "#979797", false),
    entry("brown", "Marrom", "#A99A7C", false),
];

/// Read-only lookup over a palette.
#[derive(Debug, Clone, Copy)]
pub struct ColorCatalog {
    entries: &'static [ColorEntry],
}

impl ColorCatalog {
    pub const fn new(entries: &'static [ColorEntry]) -> Self {
        Self { entries }
    }

    /// Catalog over [`PALETTE`].
    pub const fn builtin() -> Self {
        Self::new(PALETTE)
    }

    pub fn entries(&self) -> &'static [ColorEntry] {
        self.entries
    }

    /// Look up a color by hex code. Hex digits compare case-insensitively.
    pub fn by_hex(&self, hex_code: &str) -> Option<&'static ColorEntry> {
        self.entries
            .iter()
            .find(|e| e.hex_code.eq_ignore_ascii_case(hex_code))
    }

    /// Resolve user input: a hex code, an identifier or a localized name.
    pub fn resolve(&self, input: &str) -> Option<&'static ColorEntry> {
        let input = input.trim();
        self.by_hex(input).or_else(|| {
            self.entries.iter().find(|e| {
                e.name.eq_ignore_ascii_case(input) || e.localized_name.eq_ignore_ascii_case(input)
            })
        })
    }

    /// Whether the hex code belongs to a light palette color. Unknown colors are not light.
    pub fn is_light(&self, hex_code: &str) -> bool {
        self.by_hex(hex_code).map(|e| e.is_light).unwrap_or(false)
    }
}

impl Default for ColorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color_is_white() {
        let white = ColorCatalog::builtin().by_hex(notes_client::DEFAULT_COLOR).unwrap();
        assert_eq!(white.name, "white");
        assert!(!white.is_light);
    }

    #[test]
    fn test_light_flag_matches_light_identifiers() {
        for e in PALETTE {
            assert_eq!(e.is_light, e.name.contains("light"), "{}", e.name);
        }
    }

    #[test]
    fn test_hex_codes_are_unique() {
        let catalog = ColorCatalog::builtin();
        for e in catalog.entries() {
            assert_eq!(catalog.by_hex(e.hex_code), Some(e));
        }
    }

    #[test]
    fn test_resolve_accepts_names_and_hex() {
        let catalog = ColorCatalog::builtin();
        assert_eq!(catalog.resolve("#bae2ff").unwrap().name, "lightBlue");
        assert_eq!(catalog.resolve("lightblue").unwrap().hex_code, "#BAE2FF");
        assert_eq!(catalog.resolve("Laranja").unwrap().name, "orange");
        assert!(catalog.resolve("chartreuse").is_none());
    }

    #[test]
    fn test_unknown_hex_is_not_light() {
        assert!(!ColorCatalog::builtin().is_light("#123456"));
        assert!(ColorCatalog::builtin().is_light("#cdcdcd"));
    }
}
