/// Named colors used for primitive lines and faces.
///
/// Colors are persisted by name, so every color the kernel hands out comes
/// from [`PALETTE`].
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    name: &'static str,
    rgb: [u8; 3],
}

impl Color {
    const fn named(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self { name, rgb: [r, g, b] }
    }

    pub const BLACK: Color = Color::named("Black", 0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::named("White", 0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::named("Red", 0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::named("Green", 0x00, 0x80, 0x00);
    pub const BLUE: Color = Color::named("Blue", 0x00, 0x00, 0xFF);
    pub const YELLOW: Color = Color::named("Yellow", 0xFF, 0xFF, 0x00);
    pub const CYAN: Color = Color::named("Cyan", 0x00, 0xFF, 0xFF);
    pub const MAGENTA: Color = Color::named("Magenta", 0xFF, 0x00, 0xFF);
    pub const GRAY: Color = Color::named("Gray", 0x80, 0x80, 0x80);
    pub const ORANGE: Color = Color::named("Orange", 0xFF, 0xA5, 0x00);
    pub const BROWN: Color = Color::named("Brown", 0xA5, 0x2A, 0x2A);
    pub const PURPLE: Color = Color::named("Purple", 0x80, 0x00, 0x80);
    pub const LIME: Color = Color::named("Lime", 0x00, 0xFF, 0x00);
    pub const NAVY: Color = Color::named("Navy", 0x00, 0x00, 0x80);

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Resolve a color name (case-insensitive) against the palette.
    pub fn from_name(name: &str) -> Option<Color> {
        let name = name.trim();
        PALETTE
            .iter()
            .copied()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Short list of common colors, in the order the editor cycles through them.
pub const BASIC: &[Color] = &[
    Color::BLACK,
    Color::WHITE,
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::CYAN,
    Color::MAGENTA,
    Color::GRAY,
    Color::ORANGE,
    Color::BROWN,
    Color::PURPLE,
    Color::LIME,
    Color::NAVY,
];

/// Every color that can be written to or read from a model file: the
/// standard named brush set, sorted by name. `Transparent` reads back as
/// white since colors carry no alpha.
pub const PALETTE: &[Color] = &[
    Color::named("AliceBlue", 0xF0, 0xF8, 0xFF),
    Color::named("AntiqueWhite", 0xFA, 0xEB, 0xD7),
    Color::named("Aqua", 0x00, 0xFF, 0xFF),
    Color::named("Aquamarine", 0x7F, 0xFF, 0xD4),
    Color::named("Azure", 0xF0, 0xFF, 0xFF),
    Color::named("Beige", 0xF5, 0xF5, 0xDC),
    Color::named("Bisque", 0xFF, 0xE4, 0xC4),
    Color::named("Black", 0x00, 0x00, 0x00),
    Color::named("BlanchedAlmond", 0xFF, 0xEB, 0xCD),
    Color::named("Blue", 0x00, 0x00, 0xFF),
    Color::named("BlueViolet", 0x8A, 0x2B, 0xE2),
    Color::named("Brown", 0xA5, 0x2A, 0x2A),
    Color::named("BurlyWood", 0xDE, 0xB8, 0x87),
    Color::named("CadetBlue", 0x5F, 0x9E, 0xA0),
    Color::named("Chartreuse", 0x7F, 0xFF, 0x00),
    Color::named("Chocolate", 0xD2, 0x69, 0x1E),
    Color::named("Coral", 0xFF, 0x7F, 0x50),
    Color::named("CornflowerBlue", 0x64, 0x95, 0xED),
    Color::named("Cornsilk", 0xFF, 0xF8, 0xDC),
    Color::named("Crimson", 0xDC, 0x14, 0x3C),
    Color::named("Cyan", 0x00, 0xFF, 0xFF),
    Color::named("DarkBlue", 0x00, 0x00, 0x8B),
    Color::named("DarkCyan", 0x00, 0x8B, 0x8B),
    Color::named("DarkGoldenrod", 0xB8, 0x86, 0x0B),
    Color::named("DarkGray", 0xA9, 0xA9, 0xA9),
    Color::named("DarkGreen", 0x00, 0x64, 0x00),
    Color::named("DarkKhaki", 0xBD, 0xB7, 0x6B),
    Color::named("DarkMagenta", 0x8B, 0x00, 0x8B),
    Color::named("DarkOliveGreen", 0x55, 0x6B, 0x2F),
    Color::named("DarkOrange", 0xFF, 0x8C, 0x00),
    Color::named("DarkOrchid", 0x99, 0x32, 0xCC),
    Color::named("DarkRed", 0x8B, 0x00, 0x00),
    Color::named("DarkSalmon", 0xE9, 0x96, 0x7A),
    Color::named("DarkSeaGreen", 0x8F, 0xBC, 0x8F),
    Color::named("DarkSlateBlue", 0x48, 0x3D, 0x8B),
    Color::named("DarkSlateGray", 0x2F, 0x4F, 0x4F),
    Color::named("DarkTurquoise", 0x00, 0xCE, 0xD1),
    Color::named("DarkViolet", 0x94, 0x00, 0xD3),
    Color::named("DeepPink", 0xFF, 0x14, 0x93),
    Color::named("DeepSkyBlue", 0x00, 0xBF, 0xFF),
    Color::named("DimGray", 0x69, 0x69, 0x69),
    Color::named("DodgerBlue", 0x1E, 0x90, 0xFF),
    Color::named("Firebrick", 0xB2, 0x22, 0x22),
    Color::named("FloralWhite", 0xFF, 0xFA, 0xF0),
    Color::named("ForestGreen", 0x22, 0x8B, 0x22),
    Color::named("Fuchsia", 0xFF, 0x00, 0xFF),
    Color::named("Gainsboro", 0xDC, 0xDC, 0xDC),
    Color::named("GhostWhite", 0xF8, 0xF8, 0xFF),
    Color::named("Gold", 0xFF, 0xD7, 0x00),
    Color::named("Goldenrod", 0xDA, 0xA5, 0x20),
    Color::named("Gray", 0x80, 0x80, 0x80),
    Color::named("Green", 0x00, 0x80, 0x00),
    Color::named("GreenYellow", 0xAD, 0xFF, 0x2F),
    Color::named("Honeydew", 0xF0, 0xFF, 0xF0),
    Color::named("HotPink", 0xFF, 0x69, 0xB4),
    Color::named("IndianRed", 0xCD, 0x5C, 0x5C),
    Color::named("Indigo", 0x4B, 0x00, 0x82),
    Color::named("Ivory", 0xFF, 0xFF, 0xF0),
    Color::named("Khaki", 0xF0, 0xE6, 0x8C),
    Color::named("Lavender", 0xE6, 0xE6, 0xFA),
    Color::named("LavenderBlush", 0xFF, 0xF0, 0xF5),
    Color::named("LawnGreen", 0x7C, 0xFC, 0x00),
    Color::named("LemonChiffon", 0xFF, 0xFA, 0xCD),
    Color::named("LightBlue", 0xAD, 0xD8, 0xE6),
    Color::named("LightCoral", 0xF0, 0x80, 0x80),
    Color::named("LightCyan", 0xE0, 0xFF, 0xFF),
    Color::named("LightGoldenrodYellow", 0xFA, 0xFA, 0xD2),
    Color::named("LightGray", 0xD3, 0xD3, 0xD3),
    Color::named("LightGreen", 0x90, 0xEE, 0x90),
    Color::named("LightPink", 0xFF, 0xB6, 0xC1),
    Color::named("LightSalmon", 0xFF, 0xA0, 0x7A),
    Color::named("LightSeaGreen", 0x20, 0xB2, 0xAA),
    Color::named("LightSkyBlue", 0x87, 0xCE, 0xFA),
    Color::named("LightSlateGray", 0x77, 0x88, 0x99),
    Color::named("LightSteelBlue", 0xB0, 0xC4, 0xDE),
    Color::named("LightYellow", 0xFF, 0xFF, 0xE0),
    Color::named("Lime", 0x00, 0xFF, 0x00),
    Color::named("LimeGreen", 0x32, 0xCD, 0x32),
    Color::named("Linen", 0xFA, 0xF0, 0xE6),
    Color::named("Magenta", 0xFF, 0x00, 0xFF),
    Color::named("Maroon", 0x80, 0x00, 0x00),
    Color::named("MediumAquamarine", 0x66, 0xCD, 0xAA),
    Color::named("MediumBlue", 0x00, 0x00, 0xCD),
    Color::named("MediumOrchid", 0xBA, 0x55, 0xD3),
    Color::named("MediumPurple", 0x93, 0x70, 0xDB),
    Color::named("MediumSeaGreen", 0x3C, 0xB3, 0x71),
    Color::named("MediumSlateBlue", 0x7B, 0x68, 0xEE),
    Color::named("MediumSpringGreen", 0x00, 0xFA, 0x9A),
    Color::named("MediumTurquoise", 0x48, 0xD1, 0xCC),
    Color::named("MediumVioletRed", 0xC7, 0x15, 0x85),
    Color::named("MidnightBlue", 0x19, 0x19, 0x70),
    Color::named("MintCream", 0xF5, 0xFF, 0xFA),
    Color::named("MistyRose", 0xFF, 0xE4, 0xE1),
    Color::named("Moccasin", 0xFF, 0xE4, 0xB5),
    Color::named("NavajoWhite", 0xFF, 0xDE, 0xAD),
    Color::named("Navy", 0x00, 0x00, 0x80),
    Color::named("OldLace", 0xFD, 0xF5, 0xE6),
    Color::named("Olive", 0x80, 0x80, 0x00),
    Color::named("OliveDrab", 0x6B, 0x8E, 0x23),
    Color::named("Orange", 0xFF, 0xA5, 0x00),
    Color::named("OrangeRed", 0xFF, 0x45, 0x00),
    Color::named("Orchid", 0xDA, 0x70, 0xD6),
    Color::named("PaleGoldenrod", 0xEE, 0xE8, 0xAA),
    Color::named("PaleGreen", 0x98, 0xFB, 0x98),
    Color::named("PaleTurquoise", 0xAF, 0xEE, 0xEE),
    Color::named("PaleVioletRed", 0xDB, 0x70, 0x93),
    Color::named("PapayaWhip", 0xFF, 0xEF, 0xD5),
    Color::named("PeachPuff", 0xFF, 0xDA, 0xB9),
    Color::named("Peru", 0xCD, 0x85, 0x3F),
    Color::named("Pink", 0xFF, 0xC0, 0xCB),
    Color::named("Plum", 0xDD, 0xA0, 0xDD),
    Color::named("PowderBlue", 0xB0, 0xE0, 0xE6),
    Color::named("Purple", 0x80, 0x00, 0x80),
    Color::named("Red", 0xFF, 0x00, 0x00),
    Color::named("RosyBrown", 0xBC, 0x8F, 0x8F),
    Color::named("RoyalBlue", 0x41, 0x69, 0xE1),
    Color::named("SaddleBrown", 0x8B, 0x45, 0x13),
    Color::named("Salmon", 0xFA, 0x80, 0x72),
    Color::named("SandyBrown", 0xF4, 0xA4, 0x60),
    Color::named("SeaGreen", 0x2E, 0x8B, 0x57),
    Color::named("SeaShell", 0xFF, 0xF5, 0xEE),
    Color::named("Sienna", 0xA0, 0x52, 0x2D),
    Color::named("Silver", 0xC0, 0xC0, 0xC0),
    Color::named("SkyBlue", 0x87, 0xCE, 0xEB),
    Color::named("SlateBlue", 0x6A, 0x5A, 0xCD),
    Color::named("SlateGray", 0x70, 0x80, 0x90),
    Color::named("Snow", 0xFF, 0xFA, 0xFA),
    Color::named("SpringGreen", 0x00, 0xFF, 0x7F),
    Color::named("SteelBlue", 0x46, 0x82, 0xB4),
    Color::named("Tan", 0xD2, 0xB4, 0x8C),
    Color::named("Teal", 0x00, 0x80, 0x80),
    Color::named("Thistle", 0xD8, 0xBF, 0xD8),
    Color::named("Tomato", 0xFF, 0x63, 0x47),
    Color::named("Transparent", 0xFF, 0xFF, 0xFF),
    Color::named("Turquoise", 0x40, 0xE0, 0xD0),
    Color::named("Violet", 0xEE, 0x82, 0xEE),
    Color::named("Wheat", 0xF5, 0xDE, 0xB3),
    Color::named("White", 0xFF, 0xFF, 0xFF),
    Color::named("WhiteSmoke", 0xF5, 0xF5, 0xF5),
    Color::named("Yellow", 0xFF, 0xFF, 0x00),
    Color::named("YellowGreen", 0x9A, 0xCD, 0x32),
];
