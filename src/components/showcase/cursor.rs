//! Custom cursor, cursor follower easing and pointer parallax.

use super::theme::Color;

/// Eases a follower point toward the pointer by a fixed fraction per frame.
#[derive(Clone, Debug)]
pub struct CursorFollower {
	/// Follower position in client px.
	pub x: f64,
	/// Follower position in client px, vertical.
	pub y: f64,
	target_x: f64,
	target_y: f64,
	easing: f64,
}

impl CursorFollower {
	/// Follower at the origin that covers `easing` of the gap each frame.
	pub fn new(easing: f64) -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			target_x: 0.0,
			target_y: 0.0,
			easing,
		}
	}

	/// Point the follower chases, usually the raw pointer.
	pub fn set_target(&mut self, x: f64, y: f64) {
		self.target_x = x;
		self.target_y = y;
	}

	/// Advance one frame.
	pub fn tick(&mut self) {
		self.x += (self.target_x - self.x) * self.easing;
		self.y += (self.target_y - self.y) * self.easing;
	}
}

/// Which interactive element the pointer is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorMode {
	/// Anywhere else.
	#[default]
	Default,
	/// Play/info buttons on a card.
	Button,
	/// Navbar links.
	Link,
}

impl CursorMode {
	/// Cursor dot diameter in px.
	pub fn size(self) -> f64 {
		match self {
			CursorMode::Default => 12.0,
			CursorMode::Button => 50.0,
			CursorMode::Link => 40.0,
		}
	}

	/// Scale applied to the follower ring.
	pub fn follower_scale(self) -> f64 {
		match self {
			CursorMode::Default => 1.0,
			CursorMode::Button => 1.5,
			CursorMode::Link => 1.3,
		}
	}

	/// Cursor fill. Buttons take the current scene color.
	pub fn background(self, current: Color) -> String {
		match self {
			CursorMode::Button => current.to_css_rgb(),
			_ => "#fff".to_string(),
		}
	}

	/// CSS `mix-blend-mode` for the cursor dot.
	pub fn blend_mode(self) -> &'static str {
		match self {
			CursorMode::Button => "normal",
			_ => "difference",
		}
	}

	/// Centre the follower and apply the hover scale.
	pub fn follower_transform(self) -> String {
		format!("translate(-50%, -50%) scale({})", self.follower_scale())
	}
}

/// Pointer position normalised to `[-1, 1]` on both axes, centre at 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parallax {
	/// Horizontal offset, -1 at the left edge.
	pub x: f64,
	/// Vertical offset, -1 at the top edge.
	pub y: f64,
}

impl Parallax {
	/// Normalise a client position against a viewport. A zero extent maps to 0.
	pub fn from_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> Self {
		let norm = |v: f64, extent: f64| {
			if extent > 0.0 {
				(v / extent - 0.5) * 2.0
			} else {
				0.0
			}
		};
		Self {
			x: norm(client_x, width),
			y: norm(client_y, height),
		}
	}

	/// Background title moves against the pointer.
	pub fn title_transform(self) -> String {
		format!("translate({}px, {}px)", self.x * -60.0, self.y * -30.0)
	}

	/// Aura drifts with the pointer.
	pub fn aura_transform(self) -> String {
		format!(
			"translate(-50%, -50%) translate({}px, {}px)",
			self.x * 20.0,
			self.y * 20.0
		)
	}

	/// Rings drift with the pointer, less than the aura.
	pub fn rings_transform(self) -> String {
		format!(
			"translate(-50%, -50%) translate({}px, {}px)",
			self.x * 15.0,
			self.y * 15.0
		)
	}
}

/// Character layer transform for the active card.
///
/// Pointer parallax and scroll scale compose: the pointer supplies the
/// translation and a 1.02 lift, the scroll position multiplies the scale.
pub fn character_transform(parallax: Option<Parallax>, scroll_scale: f64) -> String {
	match parallax {
		Some(p) => format!(
			"translate({}px, {}px) scale({})",
			p.x * 30.0,
			p.y * 15.0,
			1.02 * scroll_scale
		),
		None => format!("scale({scroll_scale})"),
	}
}

/// Position and size of a click ripple inside a button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
	/// Diameter in px.
	pub size: f64,
	/// Offset from the button's left edge.
	pub left: f64,
	/// Offset from the button's top edge.
	pub top: f64,
}

impl Ripple {
	/// Circle as large as the button's longer side, centred on the click.
	/// `rect` is `(left, top, width, height)` in client coordinates.
	pub fn at(rect: (f64, f64, f64, f64), client_x: f64, client_y: f64) -> Self {
		let (left, top, width, height) = rect;
		let size = width.max(height);
		Self {
			size,
			left: client_x - left - size / 2.0,
			top: client_y - top - size / 2.0,
		}
	}

	/// Inline style for the ripple span.
	pub fn css_text(self) -> String {
		format!(
			"position: absolute; width: {s}px; height: {s}px; left: {l}px; top: {t}px; \
			 background: rgba(255,255,255,0.5); border-radius: 50%; transform: scale(0); \
			 animation: ripple 0.6s ease-out; pointer-events: none;",
			s = self.size,
			l = self.left,
			t = self.top
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn follower_covers_fifteen_percent_per_frame() {
		let mut f = CursorFollower::new(0.15);
		f.set_target(100.0, -200.0);
		f.tick();
		assert!((f.x - 15.0).abs() < 1e-9);
		assert!((f.y + 30.0).abs() < 1e-9);
		f.tick();
		assert!((f.x - 27.75).abs() < 1e-9);

		for _ in 0..200 {
			f.tick();
		}
		assert!((f.x - 100.0).abs() < 1e-6);
		assert!((f.y + 200.0).abs() < 1e-6);
	}

	#[test]
	fn parallax_normalises_pointer() {
		let p = Parallax::from_pointer(0.0, 300.0, 800.0, 600.0);
		assert_eq!(p, Parallax { x: -1.0, y: 0.0 });
		let p = Parallax::from_pointer(800.0, 600.0, 800.0, 600.0);
		assert_eq!(p, Parallax { x: 1.0, y: 1.0 });
		assert_eq!(Parallax::from_pointer(5.0, 5.0, 0.0, 0.0), Parallax::default());
	}

	#[test]
	fn layer_transforms() {
		let p = Parallax { x: 1.0, y: -1.0 };
		assert_eq!(p.title_transform(), "translate(-60px, 30px)");
		assert_eq!(
			p.aura_transform(),
			"translate(-50%, -50%) translate(20px, -20px)"
		);
		assert_eq!(
			p.rings_transform(),
			"translate(-50%, -50%) translate(15px, -15px)"
		);
		assert_eq!(character_transform(None, 1.01), "scale(1.01)");
		assert_eq!(
			character_transform(Some(p), 1.0),
			"translate(30px, -15px) scale(1.02)"
		);
	}

	#[test]
	fn cursor_modes() {
		let green = Color::rgb(0, 255, 0);
		assert_eq!(CursorMode::Button.background(green), "#00ff00");
		assert_eq!(CursorMode::Link.background(green), "#fff");
		assert_eq!(CursorMode::Default.size(), 12.0);
		assert_eq!(CursorMode::Link.blend_mode(), "difference");
		assert_eq!(
			CursorMode::Button.follower_transform(),
			"translate(-50%, -50%) scale(1.5)"
		);
	}

	#[test]
	fn ripple_centres_on_click() {
		let r = Ripple::at((100.0, 50.0, 120.0, 40.0), 130.0, 70.0);
		assert_eq!(
			r,
			Ripple {
				size: 120.0,
				left: -30.0,
				top: -40.0
			}
		);
		assert!(r.css_text().contains("width: 120px"));
	}
}
