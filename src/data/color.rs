use crate::foundation::core::Direction;
use crate::foundation::error::{FunnelError, FunnelResult};
use crate::foundation::math::Rng64;

use std::fmt;

/// A validated CSS hex color (`#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`).
///
/// The token keeps the caller's spelling so rendered markup matches the input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorToken(String);

impl ColorToken {
    /// Parse and validate a color token.
    pub fn parse(s: impl AsRef<str>) -> FunnelResult<Self> {
        let raw = s.as_ref().trim();
        let hex = raw.strip_prefix('#').ok_or_else(|| {
            FunnelError::validation(format!("color \"{raw}\" must start with '#'"))
        })?;
        if !matches!(hex.len(), 3 | 4 | 6 | 8) {
            return Err(FunnelError::validation(format!(
                "color \"{raw}\" must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA"
            )));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FunnelError::validation(format!(
                "color \"{raw}\" contains non-hex digits"
            )));
        }
        Ok(Self(raw.to_owned()))
    }

    /// The token as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Straight RGBA8 components.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let hex = &self.0[1..];
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).unwrap_or(0);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        match hex.len() {
            3 | 4 => {
                let a = if hex.len() == 4 { nibble(3) * 17 } else { 255 };
                [nibble(0) * 17, nibble(1) * 17, nibble(2) * 17, a]
            }
            _ => {
                let a = if hex.len() == 8 { byte(6) } else { 255 };
                [byte(0), byte(2), byte(4), a]
            }
        }
    }
}

impl TryFrom<String> for ColorToken {
    type Error = FunnelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ColorToken> for String {
    fn from(value: ColorToken) -> Self {
        value.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Color assignment for one segment: a solid color or a list of gradient stops.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// A single color.
    Solid(ColorToken),
    /// Gradient stops, in order.
    Stops(Vec<ColorToken>),
}

impl ColorSpec {
    /// Build a spec from a token list: one token is solid, more are gradient stops.
    pub fn from_tokens(mut tokens: Vec<ColorToken>) -> FunnelResult<Self> {
        match tokens.len() {
            0 => Err(FunnelError::validation("color spec must have at least one color")),
            1 => Ok(Self::Solid(tokens.remove(0))),
            _ => Ok(Self::Stops(tokens)),
        }
    }

    /// All tokens of this spec, in stop order.
    pub fn tokens(&self) -> &[ColorToken] {
        match self {
            Self::Solid(t) => std::slice::from_ref(t),
            Self::Stops(v) => v,
        }
    }

    /// Whether this spec renders as a single flat color.
    pub fn is_solid(&self) -> bool {
        self.tokens().len() == 1
    }

    fn validate(&self) -> FunnelResult<()> {
        if self.tokens().is_empty() {
            return Err(FunnelError::validation("color spec must have at least one color"));
        }
        Ok(())
    }
}

/// Stock funnel colors the default palette is drawn from.
pub const STOCK_COLORS: [&str; 10] = [
    "#FF4589", "#FF5050", "#05DF9D", "#4FF2FD", "#2D9CDB", "#A0BBFF", "#FFD76F", "#F2C94C",
    "#FF9A9A", "#FFB178",
];

/// Seed used by [`DefaultPalette::default`].
pub const DEFAULT_PALETTE_SEED: u64 = 0x00F0_4E11;

/// Deterministic permutation of [`STOCK_COLORS`].
///
/// Indexing wraps, so asking for more colors than the palette holds cycles
/// through it again instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultPalette {
    colors: Vec<ColorToken>,
}

impl DefaultPalette {
    /// Shuffle the stock colors with a seeded generator (same seed, same order).
    pub fn seeded(seed: u64) -> Self {
        let mut pool: Vec<&str> = STOCK_COLORS.to_vec();
        let mut rng = Rng64::new(seed);
        let mut colors = Vec::with_capacity(pool.len());
        while !pool.is_empty() {
            let i = rng.next_index(pool.len());
            colors.push(ColorToken(pool.remove(i).to_owned()));
        }
        Self { colors }
    }

    /// Number of distinct colors before wrapping.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette holds no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping past the end.
    pub fn get(&self, index: usize) -> &ColorToken {
        &self.colors[index % self.colors.len()]
    }

    /// `count` consecutive colors starting at `start` (wrapping).
    pub fn take_from(&self, start: usize, count: usize) -> Vec<ColorToken> {
        (start..start + count).map(|i| self.get(i).clone()).collect()
    }
}

impl Default for DefaultPalette {
    fn default() -> Self {
        Self::seeded(DEFAULT_PALETTE_SEED)
    }
}

/// Produce the definitive per-segment color assignment.
///
/// 2-D input holds one spec per segment; a short list is topped up from the
/// palette starting at position `segment_count`. 1-D input is a single token
/// list shared by every segment. Supplied entries are never reordered or
/// truncated.
#[tracing::instrument(skip(user_colors, palette), fields(supplied = user_colors.len()))]
pub fn resolve_colors(
    user_colors: &[ColorSpec],
    segment_count: usize,
    is_2d: bool,
    palette: &DefaultPalette,
) -> FunnelResult<Vec<ColorSpec>> {
    for spec in user_colors {
        spec.validate()?;
    }

    if !is_2d {
        let shared = if user_colors.is_empty() {
            ColorSpec::Stops(palette.take_from(0, 2))
        } else {
            let mut tokens = Vec::with_capacity(user_colors.len());
            for spec in user_colors {
                match spec {
                    ColorSpec::Solid(t) => tokens.push(t.clone()),
                    ColorSpec::Stops(_) => {
                        return Err(FunnelError::validation(
                            "nested color lists require 2-D values",
                        ));
                    }
                }
            }
            ColorSpec::from_tokens(tokens)?
        };
        return Ok(vec![shared; segment_count]);
    }

    if user_colors.is_empty() {
        return Ok(palette
            .take_from(0, segment_count)
            .into_iter()
            .map(ColorSpec::Solid)
            .collect());
    }

    if user_colors.len() < segment_count {
        let shortfall = segment_count - user_colors.len();
        tracing::debug!(shortfall, "topping up colors from default palette");
        let mut out = user_colors.to_vec();
        out.extend(
            palette
                .take_from(segment_count, shortfall)
                .into_iter()
                .map(ColorSpec::Solid),
        );
        return Ok(out);
    }

    Ok(user_colors.to_vec())
}

/// CSS background for a sub-label legend swatch.
pub fn legend_background(spec: &ColorSpec, direction: Direction) -> String {
    if let [only] = spec.tokens() {
        return format!("background-color: {only}");
    }
    let stops = spec
        .tokens()
        .iter()
        .map(ColorToken::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match direction {
        Direction::Horizontal => format!("background-image: linear-gradient(to right, {stops})"),
        Direction::Vertical => format!("background-image: linear-gradient({stops})"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/color.rs"]
mod tests;
