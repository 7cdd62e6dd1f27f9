//! Native colour values and the colour/opacity codec.
//!
//! Declarative symbolizers keep colour (`#rrggbb`) and opacity (0..1) apart;
//! the engine wants a single colour value. Alpha is always held in 0..1.

use std::fmt;

use serde::{Deserialize, Serialize};

/// RGB channels plus an alpha in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: clamp_unit(a),
        }
    }
}

/// Colour as the engine stores it: a CSS string or merged RGBA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// CSS colour string (e.g. "#ff0000", "rgba(255,0,0,0.5)", "red").
    Css(String),
    /// Colour merged with an opacity.
    Rgba(Rgba),
}

impl ColorValue {
    pub fn css(s: impl Into<String>) -> Self {
        ColorValue::Css(s.into())
    }

    /// Colour channels as lowercase `#rrggbb`, alpha dropped.
    pub fn hex(&self) -> Option<String> {
        let [r, g, b] = self.channels()?.rgb;
        Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
    }

    /// Explicit alpha in 0..1, if the value carries one.
    pub fn opacity(&self) -> Option<f64> {
        self.channels()?.alpha
    }

    /// The value in CSS form, verbatim for `Css`.
    pub fn to_css(&self) -> String {
        self.to_string()
    }

    fn channels(&self) -> Option<Channels> {
        match self {
            ColorValue::Css(s) => parse_color_string(s),
            ColorValue::Rgba(c) => Some(Channels {
                rgb: [c.r, c.g, c.b],
                alpha: Some(c.a),
            }),
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Css(s) => f.write_str(s),
            ColorValue::Rgba(c) => write!(f, "rgba({},{},{},{})", c.r, c.g, c.b, c.a),
        }
    }
}

impl From<&str> for ColorValue {
    fn from(s: &str) -> Self {
        ColorValue::Css(s.to_string())
    }
}

impl From<String> for ColorValue {
    fn from(s: String) -> Self {
        ColorValue::Css(s)
    }
}

impl From<Rgba> for ColorValue {
    fn from(c: Rgba) -> Self {
        ColorValue::Rgba(c)
    }
}

/// Merge a base colour and an opacity into one engine colour.
///
/// Colour alone passes through unchanged; no colour yields `None`. A colour
/// the codec cannot parse is passed through as-is and the opacity is lost.
pub fn merge(color: Option<&str>, opacity: Option<f64>) -> Option<ColorValue> {
    let color = color?;
    let Some(opacity) = opacity else {
        return Some(ColorValue::css(color));
    };
    match parse_color_string(color) {
        Some(Channels { rgb: [r, g, b], .. }) => Some(ColorValue::Rgba(Rgba::new(r, g, b, opacity))),
        None => {
            log::warn!("cannot merge opacity into unparseable colour {:?}", color);
            Some(ColorValue::css(color))
        }
    }
}

/// `#rrggbb` part of a native colour; `None` when absent or unparseable.
pub fn split_hex(value: Option<&ColorValue>) -> Option<String> {
    value?.hex()
}

/// Colour part of a native colour as a symbolizer stores it.
///
/// Parseable colours come back as `#rrggbb`; anything else is kept as its
/// verbatim CSS text.
pub fn split_color(value: Option<&ColorValue>) -> Option<String> {
    let value = value?;
    value.hex().or_else(|| {
        log::warn!("keeping unparseable colour {:?} verbatim", value.to_css());
        Some(value.to_css())
    })
}

/// Alpha of a native colour; `None` when absent or without an alpha channel.
pub fn split_opacity(value: Option<&ColorValue>) -> Option<f64> {
    value?.opacity()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Channels {
    rgb: [u8; 3],
    alpha: Option<f64>,
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        1.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Parse a CSS color string. Names and function names are case-insensitive.
fn parse_color_string(s: &str) -> Option<Channels> {
    let s = s.trim().to_ascii_lowercase();

    if s.starts_with('#') {
        return parse_hex_color(&s);
    }
    if let Some((name, args)) = split_function(&s) {
        return match name {
            "rgb" | "rgba" => parse_rgb_args(&args),
            "hsl" | "hsla" => parse_hsl_args(&args),
            _ => None,
        };
    }
    if s == "transparent" {
        return Some(Channels {
            rgb: [0, 0, 0],
            alpha: Some(0.0),
        });
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == s)
        .map(|&(_, packed)| Channels {
            rgb: [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8],
            alpha: None,
        })
}

fn parse_hex_color(s: &str) -> Option<Channels> {
    let hex = s.trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Channels {
            rgb: [short(0)?, short(1)?, short(2)?],
            alpha: None,
        }),
        4 => Some(Channels {
            rgb: [short(0)?, short(1)?, short(2)?],
            alpha: Some(short(3)? as f64 / 255.0),
        }),
        6 => Some(Channels {
            rgb: [long(0)?, long(2)?, long(4)?],
            alpha: None,
        }),
        8 => Some(Channels {
            rgb: [long(0)?, long(2)?, long(4)?],
            alpha: Some(long(6)? as f64 / 255.0),
        }),
        _ => None,
    }
}

/// `name(args)` split into the name and its arguments. Commas, spaces and
/// the `/` alpha separator all delimit arguments.
fn split_function(s: &str) -> Option<(&str, Vec<&str>)> {
    let (name, rest) = s.split_once('(')?;
    let inner = rest.strip_suffix(')')?;
    let args = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    Some((name.trim(), args))
}

/// Three channel arguments plus an optional alpha.
fn split_alpha<'a, 'b>(args: &'a [&'b str]) -> Option<(&'a [&'b str], Option<f64>)> {
    match args.len() {
        3 => Some((args, None)),
        4 => Some((&args[..3], Some(parse_alpha(args[3])?))),
        _ => None,
    }
}

fn parse_alpha(s: &str) -> Option<f64> {
    let v = match s.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => s.parse().ok()?,
    };
    Some(clamp_unit(v))
}

fn parse_rgb_args(args: &[&str]) -> Option<Channels> {
    let (channels, alpha) = split_alpha(args)?;

    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(channels) {
        *slot = match part.strip_suffix('%') {
            Some(pct) => to_channel(pct.parse::<f64>().ok()? * 2.55),
            None => to_channel(part.parse().ok()?),
        };
    }

    Some(Channels { rgb, alpha })
}

fn parse_hsl_args(args: &[&str]) -> Option<Channels> {
    let (channels, alpha) = split_alpha(args)?;

    let h: f64 = channels[0].trim_end_matches("deg").parse().ok()?;
    let s_val: f64 = channels[1].trim_end_matches('%').parse::<f64>().ok()? / 100.0;
    let l: f64 = channels[2].trim_end_matches('%').parse::<f64>().ok()? / 100.0;

    let (r, g, b) = hsl_to_rgb(
        (h / 360.0).rem_euclid(1.0),
        s_val.clamp(0.0, 1.0),
        l.clamp(0.0, 1.0),
    );
    Some(Channels {
        rgb: [to_channel(r * 255.0), to_channel(g * 255.0), to_channel(b * 255.0)],
        alpha,
    })
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// CSS named colours, packed as `0xRRGGBB`.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];
