//! Built-in colour and bit-packing helpers
//!
//! REAPER stores colours byte-swapped (`0xBBGGRR`) and packs blend settings
//! into an 18-bit field:
//!
//! ```text
//! 0b1 frac_____ mode____
//! 0b1 100000000 11111110
//! ```

use crate::error::ExprError;

/// Offset that turns a colour into its "no alpha" variant, see [`nrgb`]
pub const NRGB: i64 = 0x100_0000;

const BLEND_FLAG: i64 = 0b10_0000_0000_0000_0000;

const BYTE_RANGE: &str = "[0, 255]";

/// Blend modes understood by [`blend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Add,
    Dodge,
    Multiply,
    Overlay,
    Hsv,
}

impl BlendMode {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "normal" => BlendMode::Normal,
            "add" => BlendMode::Add,
            "dodge" => BlendMode::Dodge,
            "multiply" => BlendMode::Multiply,
            "overlay" => BlendMode::Overlay,
            "hsv" => BlendMode::Hsv,
            _ => return None,
        })
    }

    pub fn code(self) -> i64 {
        match self {
            BlendMode::Normal => 0,
            BlendMode::Add => 1,
            BlendMode::Dodge => 2,
            BlendMode::Multiply => 3,
            BlendMode::Overlay => 4,
            BlendMode::Hsv => 0xFE,
        }
    }
}

fn byte(function: &'static str, value: i64) -> Result<i64, ExprError> {
    if (0..=255).contains(&value) {
        Ok(value)
    } else {
        Err(ExprError::OutOfRange {
            function,
            value: value.to_string(),
            range: BYTE_RANGE,
        })
    }
}

fn non_negative(function: &'static str, value: i64) -> Result<i64, ExprError> {
    if value < 0 {
        Err(ExprError::OutOfRange {
            function,
            value: value.to_string(),
            range: "[0, 2^63)",
        })
    } else {
        Ok(value)
    }
}

/// `(b << 16) | (g << 8) | r`
pub fn rgb(r: i64, g: i64, b: i64) -> Result<i64, ExprError> {
    Ok((byte("rgb", b)? << 16) | (byte("rgb", g)? << 8) | byte("rgb", r)?)
}

/// [`rgb`] minus [`NRGB`], always negative
pub fn nrgb(r: i64, g: i64, b: i64) -> Result<i64, ExprError> {
    Ok(rgb(r, g, b)? - NRGB)
}

/// `(r << 24) + (g << 16) + (b << 8) + a`
pub fn rgba(r: i64, g: i64, b: i64, a: i64) -> Result<i64, ExprError> {
    let channel = |v| byte("rgba", v);
    Ok((channel(r)? << 24) + (channel(g)? << 16) + (channel(b)? << 8) + channel(a)?)
}

/// Pack bytes big-endian: `hex(0x11, 0x22, 0x33) == 0x112233`
pub fn hex(bytes: &[i64]) -> Result<i64, ExprError> {
    bytes.iter().try_fold(0i64, |acc, &b| {
        let b = byte("hex", b)?;
        acc.checked_mul(256)
            .and_then(|shifted| shifted.checked_add(b))
            .ok_or(ExprError::Overflow)
    })
}

/// Bytes of `value`, most significant first, as space separated decimals.
///
/// Leading zero bytes are not represented, so `arr(0)` is the empty string.
pub fn arr(value: i64) -> Result<String, ExprError> {
    let mut value = non_negative("arr", value)?;
    let mut bytes = Vec::new();
    while value > 0 {
        bytes.push(value & 0xFF);
        value >>= 8;
    }
    Ok(bytes
        .iter()
        .rev()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" "))
}

/// Reverse the byte order: `rev(0x112233) == 0x332211`
///
/// Only bytes up to the most significant non-zero byte take part, so
/// `rev(0x00AA)` is `0xAA` and `rev(0)` is `0`.
pub fn rev(value: i64) -> Result<i64, ExprError> {
    let mut value = non_negative("rev", value)?;
    let mut result: i64 = 0;
    while value > 0 {
        result = result
            .checked_mul(256)
            .and_then(|shifted| shifted.checked_add(value & 0xFF))
            .ok_or(ExprError::Overflow)?;
        value >>= 8;
    }
    Ok(result)
}

/// `0x20000 + (round(frac * 256) << 8) + mode`
pub fn blend(mode: &str, frac: f64) -> Result<i64, ExprError> {
    if !(0.0..=1.0).contains(&frac) {
        return Err(ExprError::OutOfRange {
            function: "blend",
            value: frac.to_string(),
            range: "[0, 1]",
        });
    }
    let mode = BlendMode::from_name(mode).ok_or_else(|| ExprError::UnknownBlendMode {
        mode: mode.to_string(),
    })?;

    #[allow(clippy::cast_possible_truncation)]
    let steps = (frac * 256.0).round_ties_even() as i64;
    Ok(BLEND_FLAG + (steps << 8) + mode.code())
}

/// Coordinate names of a layout list, in list order
pub const SET_COORDINATES: [&str; 8] = ["x", "y", "w", "h", "ls", "ts", "rs", "bs"];

const EMPTY_LIST: &str = "[. . . . . . . .]";

/// Arguments of [`set`], already rendered to text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetArgs {
    pub target: String,
    pub coordinates: [Option<String>; 8],
    pub condition: Option<String>,
    pub add: Option<String>,
    pub sub: Option<String>,
    pub otherwise: Option<String>,
}

/// Generate `set` lines for a layout element.
///
/// Coordinates that are a single token go straight into the list; longer
/// expressions are hoisted into `set __<name> ...` first, because a list only
/// holds single tokens. Missing coordinates become `.`.
///
/// ```text
/// set(tcp.label, 0, 0, w="w 0.5 *")
///
/// set __w w 0.5 *
/// set tcp.label [0 0 __w . . . . .]
/// ```
pub fn set(args: &SetArgs) -> String {
    let mut lines = Vec::new();
    let mut items = Vec::with_capacity(SET_COORDINATES.len());

    for (name, value) in SET_COORDINATES.iter().zip(&args.coordinates) {
        let tokens: Vec<&str> = value.as_deref().unwrap_or("").split_whitespace().collect();
        match tokens.as_slice() {
            [] => items.push(".".to_string()),
            [single] => items.push((*single).to_string()),
            many => {
                lines.push(format!("set __{name} {}", many.join(" ")));
                items.push(format!("__{name}"));
            }
        }
    }

    let mut expr = format!("[{}]", items.join(" "));
    if let Some(add) = &args.add {
        expr = format!("+ {expr} {add}");
    }
    if let Some(sub) = &args.sub {
        expr = format!("- {expr} {sub}");
    }
    if let Some(condition) = &args.condition {
        let fallback = args.otherwise.as_deref().unwrap_or(EMPTY_LIST);
        let count = condition.split_whitespace().count().max(1);
        expr = format!("{condition} {expr} {}", vec![fallback; count].join(" "));
    }

    lines.push(format!("set {} {expr}", args.target));
    lines.join("\n")
}
