//! Text measurement
//!
//! Sizing only needs the pixel length and height of a string at a font
//! size. Callers with access to real font metrics implement [`TextMeasure`];
//! [`ApproximateMetrics`] estimates from per-character widths.

use super::error::LayoutError;

/// Measured extent of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Length of the longest line
    pub length: f64,
    /// Total height of all lines
    pub height: f64,
}

/// Source of text metrics
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> Result<TextExtent, LayoutError>;
}

/// Width estimate from a calibrated per-character table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateMetrics {
    /// Line height as a multiple of the font size
    pub line_height: f64,
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self { line_height: 1.2 }
    }
}

impl TextMeasure for ApproximateMetrics {
    fn measure(&self, text: &str, font_size: f64) -> Result<TextExtent, LayoutError> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(LayoutError::measurement(
                text,
                format!("invalid font size {}", font_size),
            ));
        }
        if text.is_empty() {
            return Ok(TextExtent::default());
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let length = lines
            .iter()
            .map(|line| line.chars().map(char_width_factor).sum::<f64>() * font_size)
            .fold(0.0, f64::max);
        let height = lines.len() as f64 * font_size * self.line_height;

        Ok(TextExtent { length, height })
    }
}

/// Width of a character as a fraction of the font size
fn char_width_factor(ch: char) -> f64 {
    match ch {
        ' ' => 0.306,
        '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.321,
        'I' | 'i' | 'j' | 'l' => 0.25,
        'f' | 'r' | 't' => 0.34,
        '1' => 0.396,
        'M' | 'W' => 0.93,
        'm' | 'w' => 0.84,
        '@' | '#' | '%' | '&' => 0.946,
        'A'..='Z' => 0.66,
        'a'..='z' => 0.56,
        '0'..='9' => 0.6,
        '_' | '-' => 0.5,
        _ => 0.568,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_extent() {
        let metrics = ApproximateMetrics::default();
        assert_eq!(metrics.measure("", 10.0).unwrap(), TextExtent::default());
    }

    #[test]
    fn test_length_scales_with_font_size() {
        let metrics = ApproximateMetrics::default();
        let small = metrics.measure("vcc", 10.0).unwrap();
        let large = metrics.measure("vcc", 20.0).unwrap();
        assert!((large.length - 2.0 * small.length).abs() < 1e-9);
        assert!((small.height - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiline_uses_longest_line() {
        let metrics = ApproximateMetrics::default();
        let single = metrics.measure("(Resistor)", 10.0).unwrap();
        let multi = metrics.measure("R1\n(Resistor)", 10.0).unwrap();
        assert_eq!(multi.length, single.length);
        assert_eq!(multi.height, 2.0 * single.height);
    }

    #[test]
    fn test_invalid_font_size_fails() {
        let metrics = ApproximateMetrics::default();
        assert!(metrics.measure("vcc", 0.0).is_err());
        assert!(metrics.measure("vcc", f64::NAN).is_err());
    }
}
