//! Stroke definitions for outlines, connection paths and grid lines.
//!
//! | Rust Property | SVG Attribute |
//! |--------------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` |

use crate::color::Color;

/// Line pattern of a stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Returns the SVG `stroke-dasharray` value, or `None` for solid lines.
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
            Self::Dotted => Some("2,3"),
        }
    }
}

/// Color, width and pattern of a line.
///
/// ```
/// use grapheditor_core::{color::Color, draw::{StrokeDefinition, StrokeStyle}};
///
/// let stroke = StrokeDefinition::dashed(Color::new("blue").unwrap(), 1.5);
/// assert_eq!(stroke.style(), StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a solid stroke (alias of [`StrokeDefinition::new`]).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            style: StrokeStyle::Dashed,
            ..Self::new(color, width)
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Applies all stroke attributes of a [`StrokeDefinition`] to an SVG element.
///
/// ```
/// use grapheditor_core::{color::Color, draw::StrokeDefinition};
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let line = grapheditor_core::apply_stroke!(svg_element::Line::new(), &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke: &$crate::draw::StrokeDefinition = $stroke;
        let mut element = $element
            .set("stroke", &stroke.color())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width());
        if let Some(dasharray) = stroke.style().to_svg_value() {
            element = element.set("stroke-dasharray", dasharray);
        }
        element
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_constructors() {
        let color = Color::new("red").unwrap();
        assert_eq!(StrokeDefinition::solid(color, 2.0).style(), StrokeStyle::Solid);
        assert_eq!(StrokeDefinition::dashed(color, 2.0).style(), StrokeStyle::Dashed);

        let mut dotted = StrokeDefinition::new(color, 1.0);
        dotted.set_style(StrokeStyle::Dotted);
        assert_eq!(dotted.style(), StrokeStyle::Dotted);
    }

    #[test]
    fn test_stroke_style_dasharray() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value(), Some("5,5"));
        assert_eq!(StrokeStyle::Dotted.to_svg_value(), Some("2,3"));
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let stroke = StrokeDefinition::dashed(Color::new("green").unwrap(), 3.0);
        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke);
        let rendered = line.to_string();

        assert!(rendered.contains("stroke=\"green\""));
        assert!(rendered.contains("stroke-width=\"3\""));
        assert!(rendered.contains("stroke-dasharray=\"5,5\""));
    }

    #[test]
    fn test_apply_stroke_solid_has_no_dasharray() {
        let stroke = StrokeDefinition::default();
        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke);
        assert!(!line.to_string().contains("stroke-dasharray"));
    }
}
