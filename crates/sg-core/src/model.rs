//! Configuration and color types shared across the Sigil crates.
//!
//! Everything here is plain data: the brush reads a [`BrushConfig`] once at
//! construction, the renderer reads a [`GuideLayout`] once when the board is
//! set up, and none of it is mutated afterwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Color ───────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a color string as the room service emits them: either a hex
    /// form (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) or `hsl(h, s%, l%)`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(body) = s.strip_prefix("hsl(").and_then(|r| r.strip_suffix(')')) {
            Self::from_hsl_args(body)
        } else {
            Self::from_hex(s)
        }
    }

    /// Parse a hex color string. The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut ch = [255u8; 4];
                for (i, b) in bytes.iter().enumerate() {
                    ch[i] = hex_val(*b)? * 17;
                }
                Some(Self::from_rgba8(ch[0], ch[1], ch[2], ch[3]))
            }
            6 | 8 => {
                let mut ch = [255u8; 4];
                for (i, pair) in bytes.chunks(2).enumerate() {
                    ch[i] = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                Some(Self::from_rgba8(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => None,
        }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// `h` in degrees, `s` and `l` in [0, 1].
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(360.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::rgba(r + m, g + m, b + m, 1.0)
    }

    /// Inner arguments of an `hsl(...)` string: `24, 15%, 45%`.
    fn from_hsl_args(body: &str) -> Option<Self> {
        let mut parts = body.split(',').map(str::trim);
        let h: f32 = parts.next()?.parse().ok()?;
        let s: f32 = parts.next()?.strip_suffix('%')?.parse().ok()?;
        let l: f32 = parts.next()?.strip_suffix('%')?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::from_hsl(h, s / 100.0, l / 100.0))
    }

    /// Emit as shortest valid hex string.
    pub fn to_hex(&self) -> String {
        let r = (self.r * 255.0).round() as u8;
        let g = (self.g * 255.0).round() as u8;
        let b = (self.b * 255.0).round() as u8;
        let a = (self.a * 255.0).round() as u8;
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Brush configuration ─────────────────────────────────────────────────

/// Parameters fixed at brush construction; read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Ink color.
    pub color: Color,
    /// Depletable ink budget, consumed as stroke length × width.
    pub ink: f32,
    /// Brush diameter: bristles spread over a disc of half this size.
    pub diameter: f32,
    /// How centered the bristle distribution is. 1 is flat, larger values
    /// pull bristles toward the middle of the brush.
    pub centered: u32,
    /// Number of bristles.
    pub bristles: u32,
    /// Pointer path smoothing factor (low-pass weight of the new sample).
    pub smoothing: f32,
    /// Velocity smoothing factor for the lift filter.
    pub lift_smoothing: f32,
    /// How quickly the stroke eases in after pen-down.
    pub start_smoothing: f32,
    /// Optional multiplicative bristle-weight jitter, as a ± fraction.
    /// 0.05–0.10 gives a lightly textured brush; 0 disables it.
    #[serde(default)]
    pub weight_jitter: f32,
}

impl Default for BrushConfig {
    /// The standalone (single-player) brush.
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            ink: 153_000.0,
            diameter: 72.0,
            centered: 9,
            bristles: 96,
            smoothing: 0.21,
            lift_smoothing: 0.06,
            start_smoothing: 0.021,
            weight_jitter: 0.0,
        }
    }
}

// ─── Guide pattern ───────────────────────────────────────────────────────

/// One ring of guide dots: the vertices of a regular polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideRing {
    pub color: Color,
    /// Number of dots on the ring.
    pub points: u32,
    /// Ring diameter as a ratio of the surface width.
    pub diameter_ratio: f32,
    /// Dot radius in pixels.
    pub dot_radius: f32,
    /// Vertex at the top when true, flat top edge when false.
    pub point_up: bool,
}

/// Ordered guide rings, rendered back to front into the background layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideLayout {
    pub rings: SmallVec<[GuideRing; 2]>,
}

// ─── Board setup ─────────────────────────────────────────────────────────

/// Everything a board needs for one session: fetched from the room service,
/// or synthesized locally when no room is reachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSetup {
    pub brush: BrushConfig,
    /// Background behind the drawing surface.
    pub background: Color,
    pub guides: GuideLayout,
    /// Whether this participant already submitted their stroke.
    pub submitted: bool,
}

impl BoardSetup {
    /// Local single-player fallback, used when no room service is
    /// reachable: default brush, slate background, one five-point ring.
    pub fn standalone() -> Self {
        let mut guides = GuideLayout::default();
        guides.rings.push(GuideRing {
            color: Color::BLACK,
            points: 5,
            diameter_ratio: 2.0 / 3.0,
            dot_radius: 3.0,
            point_up: true,
        });
        Self {
            brush: BrushConfig::default(),
            background: Color::from_rgba8(0x3f, 0x3f, 0x4d, 0xff),
            guides,
            submitted: false,
        }
    }
}
