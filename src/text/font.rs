//! Typeface fonts: glyph outlines stored as JSON.
//!
//! A typeface file maps characters to an advance width `ha` and an outline
//! string `o` made of `m x y`, `l x y`, `q x y cpx cpy` and
//! `b x y cp1x cp1y cp2x cp2y` commands in font units. Outlines are parsed
//! once at load time so a malformed glyph fails the load instead of a frame.

use std::collections::HashMap;

use cgmath::Vector2;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("invalid typeface json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("font resolution must be positive, got {0}")]
    InvalidResolution(f32),
    #[error("glyph {glyph:?}: unknown outline command {command:?}")]
    UnknownCommand { glyph: char, command: String },
    #[error("glyph {glyph:?}: outline command {command:?} is missing coordinates")]
    MissingCoordinates { glyph: char, command: char },
    #[error("glyph {glyph:?}: {value:?} is not a number")]
    InvalidNumber { glyph: char, value: String },
}

#[derive(Deserialize)]
struct TypefaceJson {
    glyphs: HashMap<String, GlyphJson>,
    resolution: f32,
    #[serde(rename = "boundingBox")]
    bounding_box: BoundsJson,
    #[serde(rename = "underlineThickness", default)]
    underline_thickness: f32,
    #[serde(rename = "familyName", default)]
    family_name: String,
}

#[derive(Deserialize)]
struct GlyphJson {
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

#[derive(Deserialize)]
struct BoundsJson {
    #[serde(rename = "yMin")]
    y_min: f32,
    #[serde(rename = "yMax")]
    y_max: f32,
}

/// One outline command in font units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineCommand {
    MoveTo(Vector2<f32>),
    LineTo(Vector2<f32>),
    QuadTo {
        ctrl: Vector2<f32>,
        to: Vector2<f32>,
    },
    CubicTo {
        ctrl1: Vector2<f32>,
        ctrl2: Vector2<f32>,
        to: Vector2<f32>,
    },
}

#[derive(Clone, Debug)]
pub struct Glyph {
    pub advance: f32,
    pub outline: Vec<OutlineCommand>,
}

/// A closed polygon in text space. The last point connects back to the first.
pub type Contour = Vec<Vector2<f32>>;

#[derive(Clone, Debug)]
pub struct Font {
    pub family_name: String,
    glyphs: HashMap<char, Glyph>,
    resolution: f32,
    line_height: f32,
}

impl Font {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FontError> {
        let json: TypefaceJson = serde_json::from_slice(bytes)?;
        Self::from_typeface(json)
    }

    pub fn from_json(text: &str) -> Result<Self, FontError> {
        let json: TypefaceJson = serde_json::from_str(text)?;
        Self::from_typeface(json)
    }

    fn from_typeface(json: TypefaceJson) -> Result<Self, FontError> {
        if json.resolution <= 0.0 || !json.resolution.is_finite() {
            return Err(FontError::InvalidResolution(json.resolution));
        }
        let mut glyphs = HashMap::with_capacity(json.glyphs.len());
        for (key, glyph) in json.glyphs {
            // Keys are single characters; anything else is not addressable by text.
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                log::debug!("skipping typeface glyph with key {key:?}");
                continue;
            };
            let outline = match &glyph.o {
                Some(o) => parse_outline(ch, o)?,
                None => Vec::new(),
            };
            glyphs.insert(
                ch,
                Glyph {
                    advance: glyph.ha,
                    outline,
                },
            );
        }
        let line_height =
            json.bounding_box.y_max - json.bounding_box.y_min + json.underline_thickness;
        Ok(Self {
            family_name: json.family_name,
            glyphs,
            resolution: json.resolution,
            line_height,
        })
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Line height in font units.
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Lays out `text` at the given size and flattens every glyph outline into
    /// closed contours, sampling each curve with `curve_segments` points.
    pub fn contours(&self, text: &str, size: f32, curve_segments: u32) -> Vec<Contour> {
        let scale = size / self.resolution;
        let line_height = self.line_height * scale;
        let segments = curve_segments.max(1);
        let mut contours = Vec::new();
        let mut offset = Vector2::new(0.0, 0.0);

        for ch in text.chars() {
            if ch == '\n' {
                offset.x = 0.0;
                offset.y -= line_height;
                continue;
            }
            let Some(glyph) = self.glyph(ch).or_else(|| self.glyph('?')) else {
                log::warn!(
                    "character {ch:?} is missing from font {:?} and has no '?' fallback",
                    self.family_name
                );
                continue;
            };
            flatten_outline(&glyph.outline, scale, offset, segments, &mut contours);
            offset.x += glyph.advance * scale;
        }
        contours
    }
}

fn parse_outline(glyph: char, outline: &str) -> Result<Vec<OutlineCommand>, FontError> {
    let mut tokens = outline.split_whitespace();
    let mut commands = Vec::new();
    while let Some(token) = tokens.next() {
        let mut next_point = |command: char| -> Result<Vector2<f32>, FontError> {
            let mut coord = || -> Result<f32, FontError> {
                let value = tokens
                    .next()
                    .ok_or(FontError::MissingCoordinates { glyph, command })?;
                value.parse::<f32>().map_err(|_| FontError::InvalidNumber {
                    glyph,
                    value: value.to_string(),
                })
            };
            let x = coord()?;
            let y = coord()?;
            Ok(Vector2::new(x, y))
        };
        let command = match token {
            "m" => OutlineCommand::MoveTo(next_point('m')?),
            "l" => OutlineCommand::LineTo(next_point('l')?),
            // The end point comes before the control point.
            "q" => {
                let to = next_point('q')?;
                let ctrl = next_point('q')?;
                OutlineCommand::QuadTo { ctrl, to }
            }
            "b" => {
                let to = next_point('b')?;
                let ctrl1 = next_point('b')?;
                let ctrl2 = next_point('b')?;
                OutlineCommand::CubicTo { ctrl1, ctrl2, to }
            }
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

fn flatten_outline(
    outline: &[OutlineCommand],
    scale: f32,
    offset: Vector2<f32>,
    segments: u32,
    contours: &mut Vec<Contour>,
) {
    let place = |p: Vector2<f32>| p * scale + offset;
    let mut current: Contour = Vec::new();
    for command in outline {
        match *command {
            OutlineCommand::MoveTo(p) => {
                finish_contour(std::mem::take(&mut current), contours);
                current.push(place(p));
            }
            OutlineCommand::LineTo(p) => current.push(place(p)),
            OutlineCommand::QuadTo { ctrl, to } => {
                let Some(&from) = current.last() else {
                    current.push(place(to));
                    continue;
                };
                let (ctrl, to) = (place(ctrl), place(to));
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let mt = 1.0 - t;
                    current.push(from * (mt * mt) + ctrl * (2.0 * mt * t) + to * (t * t));
                }
            }
            OutlineCommand::CubicTo { ctrl1, ctrl2, to } => {
                let Some(&from) = current.last() else {
                    current.push(place(to));
                    continue;
                };
                let (ctrl1, ctrl2, to) = (place(ctrl1), place(ctrl2), place(to));
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let mt = 1.0 - t;
                    current.push(
                        from * (mt * mt * mt)
                            + ctrl1 * (3.0 * mt * mt * t)
                            + ctrl2 * (3.0 * mt * t * t)
                            + to * (t * t * t),
                    );
                }
            }
        }
    }
    finish_contour(current, contours);
}

/// Drops repeated points and the explicit closing point, keeps real polygons.
fn finish_contour(mut contour: Contour, contours: &mut Vec<Contour>) {
    const EPS: f32 = 1e-6;
    contour.dedup_by(|a, b| (*a - *b).x.abs() < EPS && (*a - *b).y.abs() < EPS);
    while contour.len() > 1 {
        let (first, last) = (contour[0], contour[contour.len() - 1]);
        if (first - last).x.abs() < EPS && (first - last).y.abs() < EPS {
            contour.pop();
        } else {
            break;
        }
    }
    if contour.len() >= 3 {
        contours.push(contour);
    }
}
