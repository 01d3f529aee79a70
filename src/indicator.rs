//! Circular progress indicator.
//!
//! The ring is drawn on a character grid, one row per unit vertically and
//! two columns per unit horizontally so that it looks round in a typical
//! terminal font. Progress fills the ring clockwise starting at 12 o'clock.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_ring::indicator::{new, with_radius, IndicatorConfig, ProgressSink};
//!
//! let mut ring = new(&[with_radius(4)]);
//! ring.apply_configuration(&IndicatorConfig {
//!     stroke_width: 2,
//!     track_color: "#404040".to_string(),
//!     fill_color: "#00ff00".to_string(),
//! });
//! ring.set_progress(0.25);
//! assert_eq!(ring.progress(), 0.25);
//!
//! let rendered = ring.view();
//! assert_eq!(rendered.lines().count(), 9);
//! ```

use lipgloss_extras::lipgloss::{Color, Style};
use std::f64::consts::TAU;

const DEFAULT_RADIUS: u16 = 3;

/// Stroke and colours of the ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorConfig {
    /// Ring thickness in grid units, measured inwards from the outer edge.
    pub stroke_width: u16,
    /// Colour of the unfilled part of the ring.
    pub track_color: String,
    /// Colour of the filled part of the ring.
    pub fill_color: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            stroke_width: 1,
            track_color: "#808080".to_string(),
            fill_color: "#FFFFFF".to_string(),
        }
    }
}

/// Receiver for the countdown's progress updates.
pub trait ProgressSink {
    /// Sets the displayed progress. Values outside `[0, 1]` are clamped.
    fn set_progress(&mut self, progress: f64);

    /// The progress currently displayed.
    fn progress(&self) -> f64;

    /// Restyles the indicator. Does not change its progress.
    fn apply_configuration(&mut self, config: &IndicatorConfig);
}

/// Construction options for [`Model`].
pub enum IndicatorOption {
    /// Sets the ring radius in grid units.
    WithRadius(u16),
    /// Sets stroke width and colours.
    WithConfiguration(IndicatorConfig),
    /// Sets the characters used for filled and unfilled ring cells.
    WithFillCharacters(char, char),
}

impl IndicatorOption {
    fn apply(&self, m: &mut Model) {
        match self {
            IndicatorOption::WithRadius(radius) => m.radius = *radius,
            IndicatorOption::WithConfiguration(config) => m.config = config.clone(),
            IndicatorOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
        }
    }
}

/// Sets the ring radius.
pub fn with_radius(radius: u16) -> IndicatorOption {
    IndicatorOption::WithRadius(radius)
}

/// Sets stroke width and colours.
pub fn with_configuration(config: IndicatorConfig) -> IndicatorOption {
    IndicatorOption::WithConfiguration(config)
}

/// Sets the filled and unfilled cell characters.
pub fn with_fill_characters(full: char, empty: char) -> IndicatorOption {
    IndicatorOption::WithFillCharacters(full, empty)
}

/// Ring-shaped progress indicator.
#[derive(Debug, Clone)]
pub struct Model {
    /// Radius in grid units. The grid is `2 * radius + 1` rows tall.
    pub radius: u16,
    /// Character for filled ring cells.
    pub full: char,
    /// Character for unfilled ring cells.
    pub empty: char,
    config: IndicatorConfig,
    progress: f64,
}

/// Creates a ring, applying `opts` in order.
pub fn new(opts: &[IndicatorOption]) -> Model {
    let mut m = Model {
        radius: DEFAULT_RADIUS,
        full: '█',
        empty: '░',
        config: IndicatorConfig::default(),
        progress: 0.0,
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Blank,
    Track,
    Fill,
}

impl Model {
    /// The configuration applied most recently.
    pub fn configuration(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Grid width in terminal columns.
    pub fn columns(&self) -> usize {
        self.units() * 2
    }

    /// Grid height in rows.
    pub fn rows(&self) -> usize {
        self.units()
    }

    fn units(&self) -> usize {
        2 * self.radius as usize + 1
    }

    fn cell(&self, row: usize, unit: usize) -> Cell {
        let r = self.radius as f64;
        let dx = unit as f64 - r;
        let dy = row as f64 - r;
        let dist = (dx * dx + dy * dy).sqrt();

        let outer = r + 0.5;
        let inner = outer - self.config.stroke_width as f64;
        if dist > outer || dist <= inner {
            return Cell::Blank;
        }

        // Clockwise from 12 o'clock; screen y grows downwards.
        let turn = (dx.atan2(-dy) / TAU).rem_euclid(1.0);
        if turn < self.progress {
            Cell::Fill
        } else {
            Cell::Track
        }
    }

    fn render_cell(&self, cell: Cell) -> String {
        match cell {
            Cell::Blank => " ".to_string(),
            Cell::Track => Style::new()
                .foreground(Color::from(self.config.track_color.as_str()))
                .render(&self.empty.to_string()),
            Cell::Fill => Style::new()
                .foreground(Color::from(self.config.fill_color.as_str()))
                .render(&self.full.to_string()),
        }
    }

    fn render_row(&self, row: usize) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.columns());
        for unit in 0..self.units() {
            let rendered = self.render_cell(self.cell(row, unit));
            columns.push(rendered.clone());
            columns.push(rendered);
        }
        columns
    }

    /// Renders the ring.
    pub fn view(&self) -> String {
        (0..self.rows())
            .map(|row| self.render_row(row).concat())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the ring with `center` placed in the middle of its middle
    /// row.
    ///
    /// `center_width` is the display width of `center` in columns; styled
    /// strings carry escape sequences, so the caller supplies it. A centre
    /// wider than the grid replaces the whole middle row.
    pub fn view_with_center(&self, center: &str, center_width: usize) -> String {
        let middle = self.radius as usize;
        let total = self.columns();

        (0..self.rows())
            .map(|row| {
                if row != middle || center_width == 0 {
                    return self.render_row(row).concat();
                }
                if center_width >= total {
                    return center.to_string();
                }

                let start = (total - center_width) / 2;
                let columns = self.render_row(row);
                let mut line = columns[..start].concat();
                line.push_str(center);
                line.push_str(&columns[start + center_width..].concat());
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

impl ProgressSink for Model {
    fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
    }

    fn progress(&self) -> f64 {
        self.progress
    }

    fn apply_configuration(&mut self, config: &IndicatorConfig) {
        self.config = config.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    fn count(s: &str, c: char) -> usize {
        plain(s).chars().filter(|&ch| ch == c).count()
    }

    #[test]
    fn test_new_with_no_options() {
        let ring = new(&[]);
        assert_eq!(ring.radius, DEFAULT_RADIUS);
        assert_eq!(ring.full, '█');
        assert_eq!(ring.empty, '░');
        assert_eq!(ring.progress(), 0.0);
        assert_eq!(ring.configuration(), &IndicatorConfig::default());
    }

    #[test]
    fn test_new_with_options() {
        let config = IndicatorConfig {
            stroke_width: 2,
            track_color: "#111111".to_string(),
            fill_color: "#222222".to_string(),
        };
        let ring = new(&[
            with_radius(5),
            with_configuration(config.clone()),
            with_fill_characters('#', '.'),
        ]);
        assert_eq!(ring.radius, 5);
        assert_eq!(ring.configuration(), &config);
        assert_eq!(ring.full, '#');
        assert_eq!(ring.empty, '.');
        assert_eq!(ring.rows(), 11);
        assert_eq!(ring.columns(), 22);
    }

    #[test]
    fn test_set_progress_clamps() {
        let mut ring = new(&[]);
        ring.set_progress(1.5);
        assert_eq!(ring.progress(), 1.0);
        ring.set_progress(-0.2);
        assert_eq!(ring.progress(), 0.0);
        ring.set_progress(f64::NAN);
        assert_eq!(ring.progress(), 0.0);
        ring.set_progress(0.4);
        assert_eq!(ring.progress(), 0.4);
    }

    #[test]
    fn test_full_and_empty_rings() {
        let mut ring = new(&[]);

        ring.set_progress(1.0);
        let full = ring.view();
        assert!(count(&full, '█') > 0);
        assert_eq!(count(&full, '░'), 0);

        ring.set_progress(0.0);
        let empty = ring.view();
        assert_eq!(count(&empty, '█'), 0);
        assert_eq!(count(&empty, '░'), count(&full, '█'));
    }

    #[test]
    fn test_partial_ring_fills_clockwise_from_top() {
        let mut ring = new(&[with_radius(3)]);
        ring.set_progress(0.25);
        let rendered = plain(&ring.view());
        let lines: Vec<&str> = rendered.lines().collect();

        // Top centre cell is the first to fill.
        let top: Vec<char> = lines[0].chars().collect();
        assert_eq!(top[6], '█');
        // Bottom centre is half way round and still empty.
        let bottom: Vec<char> = lines[6].chars().collect();
        assert_eq!(bottom[6], '░');
        // Left centre is three quarters round and still empty.
        let middle: Vec<char> = lines[3].chars().collect();
        assert_eq!(middle[0], '░');
    }

    #[test]
    fn test_fill_grows_with_progress() {
        let mut ring = new(&[]);
        let mut last = 0;
        for step in 0..=10 {
            ring.set_progress(step as f64 / 10.0);
            let filled = count(&ring.view(), '█');
            assert!(filled >= last);
            last = filled;
        }
    }

    #[test]
    fn test_thicker_stroke_draws_more_cells() {
        let mut thin = new(&[with_radius(4)]);
        thin.set_progress(1.0);
        let mut thick = new(&[
            with_radius(4),
            with_configuration(IndicatorConfig {
                stroke_width: 2,
                ..IndicatorConfig::default()
            }),
        ]);
        thick.set_progress(1.0);
        assert!(count(&thick.view(), '█') > count(&thin.view(), '█'));
    }

    #[test]
    fn test_view_dimensions() {
        let ring = new(&[with_radius(2)]);
        let rendered = plain(&ring.view());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            assert_eq!(line.chars().count(), 10);
        }
    }

    #[test]
    fn test_view_with_center() {
        let ring = new(&[with_radius(3)]);
        let rendered = plain(&ring.view_with_center("42", 2));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[3].chars().count(), 14);
        let center: String = lines[3].chars().skip(6).take(2).collect();
        assert_eq!(center, "42");
    }

    #[test]
    fn test_view_with_oversized_center() {
        let ring = new(&[with_radius(1)]);
        let rendered = plain(&ring.view_with_center("1234567", 7));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "1234567");
    }
}
