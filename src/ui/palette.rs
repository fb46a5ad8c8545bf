// SPDX-License-Identifier: MPL-2.0
//! Color palette shared by every drawing surface.

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// The full set of interface colors.
///
/// A plain value: build one with [`Palette::DARK`] (or `Default`) and pass it
/// to whatever renders the transport bar and playlist panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba,
    pub panel: Rgba,
    pub panel_shadow: Rgba,
    pub panel_header: Rgba,
    pub panel_header_border: Rgba,
    pub list_background: Rgba,
    pub row_even: Rgba,
    pub row_odd: Rgba,
    pub row_selected_background: Rgba,
    pub row_selected_accent: Rgba,
    pub text_primary: Rgba,
    pub text_muted: Rgba,
    pub text_directory: Rgba,
    pub scrollbar_background: Rgba,
    pub scrollbar_handle: Rgba,
}

impl Palette {
    /// Slate-on-navy theme with a sky-blue accent.
    pub const DARK: Self = Self {
        background: Rgba::new(5, 8, 20, 255),
        panel: Rgba::new(15, 23, 42, 240),
        panel_shadow: Rgba::new(0, 0, 0, 120),
        panel_header: Rgba::new(30, 41, 59, 255),
        panel_header_border: Rgba::new(51, 65, 85, 255),
        list_background: Rgba::new(15, 23, 42, 255),
        row_even: Rgba::new(15, 23, 42, 255),
        row_odd: Rgba::new(17, 24, 39, 255),
        row_selected_background: Rgba::new(56, 189, 248, 50),
        row_selected_accent: Rgba::new(56, 189, 248, 255),
        text_primary: Rgba::new(226, 232, 240, 255),
        text_muted: Rgba::new(148, 163, 184, 255),
        text_directory: Rgba::new(129, 199, 212, 255),
        scrollbar_background: Rgba::new(30, 41, 59, 255),
        scrollbar_handle: Rgba::new(148, 163, 184, 220),
    };

    /// Row background for the playlist entry at `index`.
    #[must_use]
    pub fn row(&self, index: usize, selected: bool) -> Rgba {
        if selected {
            self.row_selected_background
        } else if index % 2 == 0 {
            self.row_even
        } else {
            self.row_odd
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DARK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dark() {
        assert_eq!(Palette::default(), Palette::DARK);
    }

    #[test]
    fn rows_alternate_unless_selected() {
        let palette = Palette::DARK;
        assert_eq!(palette.row(0, false), palette.row_even);
        assert_eq!(palette.row(1, false), palette.row_odd);
        assert_eq!(palette.row(1, true), palette.row_selected_background);
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let c = Palette::DARK.row_selected_accent.with_alpha(10);
        assert_eq!(c, Rgba::new(56, 189, 248, 10));
    }
}
