//! Visual theming for the showcase canvas.
//!
//! Provides the color type shared by every drawing pass plus the per-layer
//! styles (starfield, section background, halos).

use std::fmt;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with `a` clamped to `[0, 1]`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// `#rrggbb`, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RGB`, `#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if !hex.is_ascii() {
				return None;
			}
			return match hex.len() {
				6 => Some(Self::rgb(
					u8::from_str_radix(&hex[0..2], 16).ok()?,
					u8::from_str_radix(&hex[2..4], 16).ok()?,
					u8::from_str_radix(&hex[4..6], 16).ok()?,
				)),
				3 => {
					let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
					Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
				}
				_ => None,
			};
		}
		if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.map(str::trim)
				.collect();
			let r = nums.first()?.parse().ok()?;
			let g = nums.get(1)?.parse().ok()?;
			let b = nums.get(2)?.parse().ok()?;
			let a = nums.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.0);
			return Some(Self::rgba(r, g, b, a));
		}
		None
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_css())
	}
}

/// Starfield drawing style.
#[derive(Clone, Debug)]
pub struct StarStyle {
	/// Floor of the pulse-modulated opacity (0.3 = never dimmer than 30%).
	pub pulse_floor: f64,
	/// Stars strictly larger than this get a halo.
	pub halo_threshold: f64,
	/// Halo radius as a multiple of the star size.
	pub halo_radius: f64,
	/// Fixed halo alpha.
	pub halo_alpha: f64,
}

/// Section background particle style.
#[derive(Clone, Debug)]
pub struct AmbientStyle {
	/// Particle color before alpha.
	pub color: Color,
	/// Halo radius as a multiple of the particle size.
	pub halo_radius: f64,
	/// Halo alpha as a fraction of the particle alpha.
	pub halo_alpha_scale: f64,
	/// Distance outside the viewport a particle may drift before wrapping.
	pub wrap_margin: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Short identifier for logs.
	pub name: &'static str,
	/// Starfield color before any card has been activated.
	pub initial_color: Color,
	/// Burst color used by the secret key sequence.
	pub secret_color: Color,
	/// Starfield style.
	pub stars: StarStyle,
	/// Section background style.
	pub ambient: AmbientStyle,
}

impl Theme {
	/// Omnitrix green on black (default)
	pub fn omnitrix() -> Self {
		Self {
			name: "omnitrix",
			initial_color: Color::rgb(0, 255, 0),
			secret_color: Color::rgb(0, 255, 0),
			stars: StarStyle {
				pulse_floor: 0.3,
				halo_threshold: 1.5,
				halo_radius: 3.0,
				halo_alpha: 32.0 / 255.0,
			},
			ambient: AmbientStyle {
				color: Color::rgb(255, 42, 42),
				halo_radius: 3.2,
				halo_alpha_scale: 80.0 / 255.0,
				wrap_margin: 50.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::omnitrix()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_colors() {
		assert_eq!(Color::parse("#ff2a2a"), Some(Color::rgb(255, 42, 42)));
		assert_eq!(Color::parse("#0f0"), Some(Color::rgb(0, 255, 0)));
		assert_eq!(Color::parse("#12345"), None);
		assert_eq!(Color::parse("#gg0000"), None);
	}

	#[test]
	fn rejects_malformed_hex_without_panicking() {
		assert_eq!(Color::parse("#\u{e9}1"), None);
		assert_eq!(Color::parse("#ab\u{20ac}d"), None);
		assert_eq!(Color::parse("#\u{e9}\u{e9}\u{e9}"), None);
		assert_eq!(Color::parse("#"), None);
		assert_eq!(Color::parse("#1234"), None);
		assert_eq!(Color::parse("#+1+2+3"), None);
	}

	#[test]
	fn parses_functional_colors() {
		assert_eq!(
			Color::parse("rgba(10, 20, 30, 0.5)"),
			Some(Color::rgba(10, 20, 30, 0.5))
		);
		assert_eq!(Color::parse("rgb(1,2,3)"), Some(Color::rgb(1, 2, 3)));
		assert_eq!(Color::parse("hotpink"), None);
	}

	#[test]
	fn css_output_drops_opaque_alpha() {
		assert_eq!(Color::rgb(0, 255, 0).to_css(), "#00ff00");
		assert_eq!(
			Color::rgb(0, 255, 0).with_alpha(0.25).to_css(),
			"rgba(0, 255, 0, 0.25)"
		);
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(4.0).a, 1.0);
	}
}
