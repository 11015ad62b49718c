use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::Path;
use svg::node::element::path::Data;

use binsim::geometry::primitives::{AARectangle, Point, SPolygon};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgTheme,
    ///Mark the reference point of every placed object
    #[serde(default)]
    pub reference_points: bool,
    ///Outline the placed objects on top of the heatmaps
    #[serde(default = "default_true")]
    pub heatmap_overlay: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgTheme::default(),
            reference_points: false,
            heatmap_overlay: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgTheme {
    pub stroke_width_multiplier: f64,
    pub bin_fill: Color,
    pub bin_opacity: f64,
    /// Placed objects get one of these, at random
    pub object_palette: [Color; 5],
    pub object_opacity: f64,
    /// Color of the lowest and highest reward of a heatmap
    pub heat_low: Color,
    pub heat_high: Color,
}

impl Default for SvgTheme {
    fn default() -> Self {
        SvgTheme::BRIGHT
    }
}

impl SvgTheme {
    pub const BRIGHT: SvgTheme = SvgTheme {
        stroke_width_multiplier: 2.0,
        bin_fill: Color(0x99, 0x99, 0x99),
        bin_opacity: 0.5,
        object_palette: [
            Color(0x32, 0xFF, 0xFB), // CYAN
            Color(0xFF, 0x33, 0x33), // RED
            Color(0x6F, 0xFF, 0x31), // GREEN
            Color(0x98, 0x30, 0xFF), // PURPLE
            Color(0xFF, 0xF1, 0x30), // YELLOW
        ],
        object_opacity: 0.9,
        heat_low: Color(0x2D, 0x2D, 0x2D),
        heat_high: Color(0xFF, 0xC8, 0x79),
    };

    pub const GRAY: SvgTheme = SvgTheme {
        stroke_width_multiplier: 2.5,
        bin_fill: Color(0xD3, 0xD3, 0xD3),
        bin_opacity: 1.0,
        object_palette: [Color(0x7A, 0x7A, 0x7A); 5],
        object_opacity: 0.9,
        heat_low: Color(0xFF, 0xFF, 0xFF),
        heat_high: Color(0x00, 0x00, 0x00),
    };
}

pub fn change_brightness(color: Color, fraction: f64) -> Color {
    let Color(r, g, b) = color;

    let r = (r as f64 * fraction) as u8;
    let g = (g as f64 * fraction) as u8;
    let b = (b as f64 * fraction) as u8;
    Color(r, g, b)
}

/// Linear interpolation between two colors, `t` is clamped to [0, 1]
pub fn interpolate_colors(color_1: Color, color_2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let Color(r_1, g_1, b_1) = color_1;
    let Color(r_2, g_2, b_2) = color_2;
    let lerp = |c_1: u8, c_2: u8| (c_1 as f64 * (1.0 - t) + c_2 as f64 * t).round() as u8;

    Color(lerp(r_1, r_2), lerp(g_1, g_2), lerp(b_1, b_2))
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<&str> for Color {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid color: {s}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("invalid color: {s}, {e}"))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

fn xy(Point(x, y): Point) -> (f32, f32) {
    (x as f32, y as f32)
}

pub fn simple_polygon_data(s_poly: &SPolygon) -> Data {
    let mut data = Data::new().move_to(xy(s_poly.vertex(0)));
    for i in 1..s_poly.n_vertices() {
        data = data.line_to(xy(s_poly.vertex(i)));
    }
    data.close()
}

pub fn aa_rect_data(rect: &AARectangle) -> Data {
    let [bl, tl, tr, br] = rect.corners();
    Data::new()
        .move_to(xy(bl))
        .line_to(xy(br))
        .line_to(xy(tr))
        .line_to(xy(tl))
        .close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

/// Stroke width proportional to the smallest side of the view box
pub fn stroke_width(vbox: &AARectangle, theme: &SvgTheme) -> f64 {
    f64::min(vbox.width(), vbox.height()) * 0.001 * theme.stroke_width_multiplier
}

/// `viewBox` attribute for a drawing in y-up coordinates, which is flipped by [`Y_UP`]
pub fn view_box(vbox: &AARectangle) -> (f64, f64, f64, f64) {
    (vbox.x_min, -vbox.y_max, vbox.width(), vbox.height())
}

/// Transform of the top-level group, flipping the y-axis so it points upwards
pub const Y_UP: &str = "scale(1,-1)";
