//! Text display for the countdown's remaining count.
//!
//! The countdown pushes plain strings into anything implementing
//! [`TextSink`]. [`Model`] is the sink used by default: it keeps the text
//! and renders it with a lipgloss style built from a [`Font`] and a
//! foreground colour.
//!
//! ```rust
//! use countdown_ring::label::{Font, Model, TextSink, Weight};
//!
//! let mut label = Model::new();
//! label.apply_style(&Font::new(Weight::Bold), "#ffffff");
//! label.set_text("42");
//!
//! assert_eq!(label.text(), "42");
//! assert_eq!(label.width(), 2);
//! ```

use lipgloss_extras::lipgloss::{Color, Style};
use unicode_width::UnicodeWidthStr;

/// Stroke weight of the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    /// Dimmed text.
    Faint,
    /// Terminal default weight.
    #[default]
    Regular,
    /// Bold text.
    Bold,
}

/// Terminal rendition of a font: weight plus the attributes a terminal can
/// express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Font {
    /// Stroke weight.
    pub weight: Weight,
    /// Render in italics where the terminal supports it.
    pub italic: bool,
    /// Underline the text.
    pub underline: bool,
}

impl Font {
    /// A plain font of the given weight.
    pub fn new(weight: Weight) -> Self {
        Self {
            weight,
            italic: false,
            underline: false,
        }
    }

    /// Returns the font with italics switched on or off.
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Returns the font with underlining switched on or off.
    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    fn style(&self, text_color: &str) -> Style {
        let mut style = Style::new().foreground(Color::from(text_color));
        match self.weight {
            Weight::Faint => style = style.faint(true),
            Weight::Regular => {}
            Weight::Bold => style = style.bold(true),
        }
        if self.italic {
            style = style.italic(true);
        }
        if self.underline {
            style = style.underline(true);
        }
        style
    }
}

/// Receiver for the countdown's text updates.
pub trait TextSink {
    /// Replaces the displayed text.
    fn set_text(&mut self, text: &str);

    /// The text currently displayed.
    fn text(&self) -> &str;

    /// Restyles the text. Does not change its content.
    fn apply_style(&mut self, font: &Font, text_color: &str);
}

/// Styled single-line label.
#[derive(Debug, Clone)]
pub struct Model {
    text: String,
    font: Font,
    text_color: String,
    style: Style,
}

impl Model {
    /// Creates an empty label with the regular font and white text.
    pub fn new() -> Self {
        let font = Font::default();
        let text_color = "#FFFFFF".to_string();
        let style = font.style(&text_color);
        Self {
            text: String::new(),
            font,
            text_color,
            style,
        }
    }

    /// The font applied most recently.
    pub fn font(&self) -> Font {
        self.font
    }

    /// The text colour applied most recently.
    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    /// Display width of the text in terminal columns, ignoring styling.
    pub fn width(&self) -> usize {
        self.text.width()
    }

    /// Renders the text with the current style.
    pub fn view(&self) -> String {
        if self.text.is_empty() {
            return String::new();
        }
        self.style.render(&self.text)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSink for Model {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn apply_style(&mut self, font: &Font, text_color: &str) {
        self.font = *font;
        self.text_color = text_color.to_string();
        self.style = font.style(text_color);
    }
}
