//! Base16 palettes for the monitor panel.

use ratatui::style::{Color, Modifier, Style};

/// Theme used when a name is not recognized
pub const DEFAULT_THEME: &str = "ulisesjcf";

/// A base16 palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Palette name
    pub name: &'static str,
    /// base00..base0F
    pub base: [Color; 16],
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const fn palette(name: &'static str, hex: [u32; 16]) -> Theme {
    let mut base = [Color::Reset; 16];
    let mut i = 0;
    while i < 16 {
        base[i] = rgb(hex[i]);
        i += 1;
    }
    Theme { name, base }
}

const THEMES: [Theme; 5] = [
    palette(
        "ulisesjcf",
        [
            0x110e13, 0x17141a, 0x1f1b22, 0x4b4355, 0x6c6472, 0xb9b4be, 0xd2ced6, 0xe9e6ec,
            0xef7a8b, 0xee9e5e, 0xe6d56f, 0x86c57c, 0x6ec6c0, 0x75a8e0, 0xbd8de6, 0xc7737a,
        ],
    ),
    palette(
        "monokai",
        [
            0x272822, 0x383830, 0x49483e, 0x75715e, 0xa59f85, 0xf8f8f2, 0xf5f4f1, 0xf9f8f5,
            0xf92672, 0xfd971f, 0xf4bf75, 0xa6e22e, 0xa1efe4, 0x66d9ef, 0xae81ff, 0xcc6633,
        ],
    ),
    palette(
        "solarized",
        [
            0x002b36, 0x073642, 0x586e75, 0x657b83, 0x839496, 0x93a1a1, 0xeee8d5, 0xfdf6e3,
            0xdc322f, 0xcb4b16, 0xb58900, 0x859900, 0x2aa198, 0x268bd2, 0x6c71c4, 0xd33682,
        ],
    ),
    palette(
        "tomorrow",
        [
            0x1d1f21, 0x282a2e, 0x373b41, 0x969896, 0xb4b7b4, 0xc5c8c6, 0xe0e0e0, 0xffffff,
            0xcc6666, 0xde935f, 0xf0c674, 0xb5bd68, 0x8abeb7, 0x81a2be, 0xb294bb, 0xa3685a,
        ],
    ),
    palette(
        "twilight",
        [
            0x1e1e1e, 0x323537, 0x464b50, 0x5f5a60, 0x838184, 0xa7a7a7, 0xc3c3c3, 0xffffff,
            0xcf6a4c, 0xcda869, 0xf9ee98, 0x8f9d6a, 0xafc4db, 0x7587a6, 0x9b859d, 0x9b703f,
        ],
    ),
];

impl Theme {
    /// Look up a palette by name
    #[must_use]
    pub fn find(name: &str) -> Option<Theme> {
        THEMES.iter().copied().find(|theme| theme.name == name)
    }

    /// Look up a palette, falling back to the default with a warning
    #[must_use]
    pub fn resolve(name: &str) -> Theme {
        match Self::find(name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(theme = name, "theme not found, defaulting to {}", DEFAULT_THEME);
                Self::default()
            }
        }
    }

    /// Names of every built-in palette
    pub fn names() -> impl Iterator<Item = &'static str> {
        THEMES.iter().map(|theme| theme.name)
    }

    /// Panel background and body text
    #[must_use]
    pub fn panel(&self) -> Style {
        Style::default().bg(self.base[0x0]).fg(self.base[0x5])
    }

    /// Action label
    #[must_use]
    pub fn label(&self) -> Style {
        Style::default().fg(self.base[0xD]).add_modifier(Modifier::BOLD)
    }

    /// Skipped action
    #[must_use]
    pub fn skipped(&self) -> Style {
        Style::default()
            .fg(self.base[0x3])
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Highlighted entry
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default().bg(self.base[0x2])
    }

    /// State key whose value changed
    #[must_use]
    pub fn changed(&self) -> Style {
        Style::default().fg(self.base[0xB])
    }

    /// Key name
    #[must_use]
    pub fn key(&self) -> Style {
        Style::default().fg(self.base[0x8])
    }

    /// Button, enabled or not
    #[must_use]
    pub fn button(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().bg(self.base[0x1]).fg(self.base[0x6])
        } else {
            Style::default().bg(self.base[0x1]).fg(self.base[0x3])
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}
