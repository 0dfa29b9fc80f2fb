//! Light and dark palettes for the lookup card.
//!
//! The active palette is built from a `ThemeMode` and handed to the renderer
//! on every frame, so switching modes only touches the app's own state.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark { ThemeMode::Dark } else { ThemeMode::Light }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "☀ Light",
            ThemeMode::Dark => "☾ Dark",
        }
    }
}

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub accent: Color,       // Focused borders, button, stat numbers
    pub danger: Color,       // Error line
    pub text: Color,         // Primary text
    pub text_dim: Color,     // Handle, labels, placeholder
    pub bg: Color,           // Whole-screen background
    pub panel: Color,        // Card background
    pub inactive: Color,     // Unfocused borders
    pub header: Color,       // Title
    pub toggle: Color,       // Theme switch track
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            accent: Color::Rgb(59, 130, 246),    // #3b82f6
            danger: Color::Rgb(239, 68, 68),     // #ef4444
            text: Color::Rgb(17, 24, 39),        // #111827
            text_dim: Color::Rgb(75, 85, 99),    // #4b5563
            bg: Color::Rgb(243, 244, 246),       // #f3f4f6
            panel: Color::Rgb(255, 255, 255),
            inactive: Color::Rgb(156, 163, 175), // #9ca3af
            header: Color::Rgb(17, 24, 39),
            toggle: Color::Rgb(209, 213, 219),   // #d1d5db
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            accent: Color::Rgb(137, 180, 250),
            danger: Color::Rgb(243, 139, 168),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg: Color::Rgb(30, 30, 46),
            panel: Color::Rgb(49, 50, 68),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(167, 215, 231),   // #a7d7e7
            toggle: Color::Rgb(126, 120, 120),   // #7e7878
        }
    }
}
