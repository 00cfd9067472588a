//! Typeface fonts.
//!
//! Reads the JSON typeface format (glyph outlines as compact command strings)
//! and lays text out into 2D [`Shape`]s ready for extrusion.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::shape::{Point, Shape, ShapePath};

/// Glyph used in place of characters the font lacks.
pub const FALLBACK_GLYPH: char = '?';

#[derive(Debug, Error)]
pub enum FontError {
    #[error("malformed typeface JSON")]
    Json(#[from] serde_json::Error),
    #[error("glyph {glyph:?}: unknown outline command {command:?}")]
    UnknownCommand { glyph: char, command: String },
    #[error("glyph {glyph:?}: {token:?} is not a number")]
    BadNumber { glyph: char, token: String },
    #[error("glyph {glyph:?}: outline command '{command}' is missing arguments")]
    MissingArgument { glyph: char, command: char },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypefaceData {
    glyphs: HashMap<String, GlyphData>,
    #[serde(default)]
    family_name: String,
    resolution: f32,
    bounding_box: FontBounds,
    #[serde(default)]
    underline_thickness: f32,
}

#[derive(Deserialize)]
struct GlyphData {
    ha: f32,
    #[serde(default)]
    x_min: f32,
    #[serde(default)]
    x_max: f32,
    #[serde(default)]
    o: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontBounds {
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

/// One outline command, in font units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    CubicTo { control1: Point, control2: Point, to: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Horizontal advance in font units.
    pub advance: f32,
    pub x_min: f32,
    pub x_max: f32,
    pub outline: Vec<OutlineCommand>,
}

#[derive(Clone, Debug)]
pub struct Font {
    family_name: String,
    resolution: f32,
    bounds: FontBounds,
    underline_thickness: f32,
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    pub fn parse(json: &str) -> Result<Self, FontError> {
        let data: TypefaceData = serde_json::from_str(json)?;
        let mut glyphs = HashMap::with_capacity(data.glyphs.len());
        for (key, glyph) in data.glyphs {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                log::warn!("ignoring glyph entry {:?}: not a single character", key);
                continue;
            };
            let outline = match &glyph.o {
                Some(o) => parse_outline(c, o)?,
                None => Vec::new(),
            };
            glyphs.insert(
                c,
                Glyph {
                    advance: glyph.ha,
                    x_min: glyph.x_min,
                    x_max: glyph.x_max,
                    outline,
                },
            );
        }
        log::debug!(
            "parsed typeface \"{}\" with {} glyphs",
            data.family_name,
            glyphs.len()
        );
        Ok(Self {
            family_name: data.family_name,
            resolution: data.resolution,
            bounds: data.bounding_box,
            underline_thickness: data.underline_thickness,
            glyphs,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn bounds(&self) -> FontBounds {
        self.bounds
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    pub fn line_height(&self, size: f32) -> f32 {
        (self.bounds.y_max - self.bounds.y_min + self.underline_thickness) * size / self.resolution
    }

    /// Lay out `text` at `size` world units per em.
    ///
    /// Glyphs advance along +x; `'\n'` starts a new line below. Characters
    /// with no glyph use [`FALLBACK_GLYPH`] and are skipped if that is
    /// missing too.
    pub fn generate_shapes(&self, text: &str, size: f32) -> Vec<Shape> {
        let scale = size / self.resolution;
        let line_height = self.line_height(size);
        let mut offset = Point::new(0.0, 0.0);
        let mut shapes = Vec::new();

        for c in text.chars() {
            if c == '\n' {
                offset = Point::new(0.0, offset.y - line_height);
                continue;
            }
            let Some(glyph) = self.glyph(c).or_else(|| self.glyph(FALLBACK_GLYPH)) else {
                log::error!(
                    "character {:?} does not exist in font family {}",
                    c,
                    self.family_name
                );
                continue;
            };

            let place = |p: Point| p * scale + offset;
            let mut path = ShapePath::new();
            for command in &glyph.outline {
                match *command {
                    OutlineCommand::MoveTo(p) => path.move_to(place(p)),
                    OutlineCommand::LineTo(p) => path.line_to(place(p)),
                    OutlineCommand::QuadTo { control, to } => {
                        path.quadratic_curve_to(place(control), place(to))
                    }
                    OutlineCommand::CubicTo {
                        control1,
                        control2,
                        to,
                    } => path.bezier_curve_to(place(control1), place(control2), place(to)),
                }
            }
            shapes.extend(path.to_shapes());
            offset.x += glyph.advance * scale;
        }
        shapes
    }
}

/// Parse a glyph's `o` string.
///
/// Tokens are whitespace separated. `q` lists its end point before the
/// control point and `b` lists its end point before both control points.
fn parse_outline(glyph: char, outline: &str) -> Result<Vec<OutlineCommand>, FontError> {
    let mut tokens = outline.split_whitespace();
    let mut commands = Vec::new();
    while let Some(token) = tokens.next() {
        let mut point = |command_char: char| -> Result<Point, FontError> {
            let mut number = || -> Result<f32, FontError> {
                let token = tokens.next().ok_or(FontError::MissingArgument {
                    glyph,
                    command: command_char,
                })?;
                token.parse::<f32>().map_err(|_| FontError::BadNumber {
                    glyph,
                    token: token.to_string(),
                })
            };
            Ok(Point::new(number()?, number()?))
        };
        let command = match token {
            "m" => OutlineCommand::MoveTo(point('m')?),
            "l" => OutlineCommand::LineTo(point('l')?),
            "q" => {
                let to = point('q')?;
                let control = point('q')?;
                OutlineCommand::QuadTo { control, to }
            }
            "b" => {
                let to = point('b')?;
                let control1 = point('b')?;
                let control2 = point('b')?;
                OutlineCommand::CubicTo {
                    control1,
                    control2,
                    to,
                }
            }
            // closing is implicit
            "z" => continue,
            other => {
                return Err(FontError::UnknownCommand {
                    glyph,
                    command: other.to_string(),
                });
            }
        };
        commands.push(command);
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TINY: &str = r#"{
        "glyphs": {
            "I": { "ha": 400, "x_min": 0, "x_max": 300,
                   "o": "m 0 0 l 0 700 l 300 700 l 300 0 l 0 0 z" },
            "?": { "ha": 500, "x_min": 0, "x_max": 400,
                   "o": "m 0 0 l 0 400 l 400 400 l 400 0 l 0 0" },
            " ": { "ha": 250, "x_min": 0, "x_max": 0, "o": "" }
        },
        "familyName": "Tiny",
        "resolution": 1000,
        "boundingBox": { "yMin": -200, "xMin": 0, "yMax": 800, "xMax": 500 },
        "underlineThickness": 50
    }"#;

    #[test]
    fn parses_commands_in_font_units() {
        let font = Font::parse(TINY).unwrap();
        assert_eq!(font.family_name(), "Tiny");
        let glyph = font.glyph('I').unwrap();
        assert_eq!(glyph.outline.len(), 5);
        assert_eq!(glyph.outline[1], OutlineCommand::LineTo(Point::new(0.0, 700.0)));
    }

    #[test]
    fn quadratic_lists_end_point_first() {
        let cmds = parse_outline('x', "m 0 0 q 10 0 5 5").unwrap();
        assert_eq!(
            cmds[1],
            OutlineCommand::QuadTo {
                control: Point::new(5.0, 5.0),
                to: Point::new(10.0, 0.0),
            }
        );
    }

    #[test]
    fn rejects_malformed_outlines() {
        assert!(matches!(
            parse_outline('x', "m 0"),
            Err(FontError::MissingArgument { command: 'm', .. })
        ));
        assert!(matches!(
            parse_outline('x', "m 0 zero"),
            Err(FontError::BadNumber { .. })
        ));
        assert!(matches!(
            parse_outline('x', "k 1 2"),
            Err(FontError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn advances_and_falls_back() {
        let font = Font::parse(TINY).unwrap();
        // 'I', ' ' (no outline), then '#' falls back to '?'
        let shapes = font.generate_shapes("I #", 1.0);
        assert_eq!(shapes.len(), 2);
        let fallback = shapes[1].contour.points(1);
        assert_relative_eq!(fallback[0].x, 0.65, epsilon = 1e-6);
        assert_eq!(fallback[0].y, 0.0);
    }

    #[test]
    fn newline_moves_down_one_line() {
        let font = Font::parse(TINY).unwrap();
        let shapes = font.generate_shapes("I\nI", 1.0);
        let second = shapes[1].contour.points(1);
        assert_eq!(second[0], Point::new(0.0, -1.05));
        assert_eq!(font.line_height(1.0), 1.05);
    }
}
