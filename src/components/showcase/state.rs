//! Application state shared by every frame, scroll, pointer and key callback.
//!
//! Everything that changes while the page runs lives in [`ShowcaseState`];
//! the component layer owns one behind `Rc<RefCell<..>>` and forwards
//! browser events into the methods here.

use fastrand::Rng;
use log::{debug, info, warn};

use super::cursor::{CursorFollower, Parallax};
use super::particles::{AmbientField, BurstPool, StarField};
use super::schedule::Deadline;
use super::scroll::{ScrollMapper, ScrollMetrics, ScrollUpdate};
use super::secret::SecretSequence;
use super::theme::{Color, Theme};
use super::types::{MotionConfig, ShowcaseData};

/// Whether a device should run with reduced effects.
///
/// Browsers that do not report a core count report 0, which is not low.
pub fn is_low_performance(hardware_concurrency: f64, threshold: u32) -> bool {
	hardware_concurrency > 0.0 && hardware_concurrency < threshold as f64
}

/// Side effects the host must apply after a frame tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameEffects {
	/// The secret-sequence filter has run its course and should be removed.
	pub filter_expired: bool,
}

/// Simulation state for the starfield, particles, cursor and scroll mapping.
pub struct ShowcaseState {
	/// Viewport size the fields were last built for.
	pub width: f64,
	/// Viewport height the fields were last built for.
	pub height: f64,
	/// Background starfield.
	pub stars: StarField,
	/// Section background particles.
	pub ambient: AmbientField,
	/// Live burst particles.
	pub bursts: BurstPool,
	/// Eased cursor follower.
	pub cursor: CursorFollower,
	/// Scroll-to-card mapping and the active card.
	pub scroll: ScrollMapper,
	/// Starfield color; follows the most recently activated card.
	pub current_color: Color,
	/// Section background particles are updated and drawn only while set.
	pub ambient_enabled: bool,
	/// Selects the reduced ambient particle count.
	pub low_performance: bool,
	/// Colors and halo styles used by the renderer.
	pub theme: Theme,
	motion: MotionConfig,
	card_colors: Vec<Color>,
	secret: SecretSequence,
	filter: Deadline,
	rng: Rng,
}

impl ShowcaseState {
	/// Build the fields for a `width` x `height` viewport.
	///
	/// Card colors that fail to parse are logged and replaced by the theme's
	/// initial color.
	pub fn new(
		data: &ShowcaseData,
		width: f64,
		height: f64,
		theme: Theme,
		seed: u64,
		low_performance: bool,
	) -> Self {
		let motion = data.motion.clone();
		let mut rng = Rng::with_seed(seed);

		let card_colors = data
			.cards
			.iter()
			.map(|card| {
				Color::parse(&card.color).unwrap_or_else(|| {
					warn!(
						"alien-showcase: card {} has invalid color {:?}, using default",
						card.name, card.color
					);
					theme.initial_color
				})
			})
			.collect();

		let stars = StarField::new(&mut rng, motion.star_count, width, height);
		let ambient = AmbientField::new(
			&mut rng,
			Self::ambient_count(&motion, low_performance),
			width,
			height,
			theme.ambient.wrap_margin,
		);

		Self {
			width,
			height,
			stars,
			ambient,
			bursts: BurstPool::with_capacity(motion.secret_burst.max(motion.card_burst)),
			cursor: CursorFollower::new(motion.follower_easing),
			scroll: ScrollMapper::new(data.cards.len(), &motion),
			current_color: theme.initial_color,
			ambient_enabled: false,
			low_performance,
			theme,
			motion,
			card_colors,
			secret: SecretSequence::default(),
			filter: Deadline::default(),
			rng,
		}
	}

	fn ambient_count(motion: &MotionConfig, low_performance: bool) -> usize {
		if low_performance {
			motion.ambient_count_low
		} else {
			motion.ambient_count
		}
	}

	/// Timings, counts and physics constants in use.
	pub fn motion(&self) -> &MotionConfig {
		&self.motion
	}

	/// Rebuild the starfield and section background for a new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.stars = StarField::new(&mut self.rng, self.motion.star_count, width, height);
		self.ambient = AmbientField::new(
			&mut self.rng,
			Self::ambient_count(&self.motion, self.low_performance),
			width,
			height,
			self.theme.ambient.wrap_margin,
		);
		debug!("alien-showcase: rebuilt starfield for {}x{}", width, height);
	}

	/// Advance every animated value by one frame.
	pub fn tick(&mut self, now_ms: f64) -> FrameEffects {
		self.stars.update();
		if self.ambient_enabled {
			self.ambient.update();
		}
		self.bursts.update(self.motion.gravity);
		self.cursor.tick();

		FrameEffects {
			filter_expired: self.filter.expired(now_ms),
		}
	}

	/// Map a scroll position onto cards. A newly activated card takes over the
	/// starfield color and bursts at the point `card_center` reports for it.
	pub fn on_scroll(
		&mut self,
		metrics: &ScrollMetrics,
		card_center: impl Fn(usize) -> Option<(f64, f64)>,
	) -> ScrollUpdate {
		let update = self.scroll.update(metrics);

		if let Some(enabled) = update.section_background {
			self.ambient_enabled = enabled;
		}

		if let Some(idx) = update.activated {
			if let Some(&color) = self.card_colors.get(idx) {
				self.current_color = color;
			}
			if let Some((x, y)) = card_center(idx) {
				let (color, count) = (self.current_color, self.motion.card_burst);
				self.bursts.burst(&mut self.rng, x, y, color, count);
			}
		}

		update
	}

	/// Scale for the active card's character layer at a given card progress.
	pub fn card_scale(&self, card_progress: f64) -> f64 {
		1.0 + card_progress * self.motion.card_scale_range
	}

	/// Track the raw pointer. Returns the parallax offset normalised against
	/// the live `viewport` size, or the last rebuilt size when it is unknown.
	pub fn on_pointer(
		&mut self,
		client_x: f64,
		client_y: f64,
		viewport: Option<(f64, f64)>,
	) -> Parallax {
		self.cursor.set_target(client_x, client_y);
		let (width, height) = viewport.unwrap_or((self.width, self.height));
		Parallax::from_pointer(client_x, client_y, width, height)
	}

	/// Feed a key press to the secret sequence. On a match, bursts at the
	/// viewport centre and arms the filter deadline. Returns whether it matched.
	pub fn on_key(&mut self, key: &str, now_ms: f64) -> bool {
		if !self.secret.push(key) {
			return false;
		}

		let (x, y) = (self.width / 2.0, self.height / 2.0);
		let (color, count) = (self.theme.secret_color, self.motion.secret_burst);
		self.bursts.burst(&mut self.rng, x, y, color, count);
		self.filter.arm(now_ms, self.motion.secret_filter_ms as f64);
		info!("\u{1f3ae} Omnitrix activated! All aliens unlocked!");
		true
	}

	/// Whether the secret-sequence filter is still pending removal.
	pub fn filter_active(&self) -> bool {
		self.filter.is_armed()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::showcase::secret::SECRET_SEQUENCE;

	const W: f64 = 1280.0;
	const H: f64 = 720.0;

	fn state() -> ShowcaseState {
		ShowcaseState::new(&ShowcaseData::default(), W, H, Theme::default(), 42, false)
	}

	fn at(scroll_y: f64) -> ScrollMetrics {
		ScrollMetrics {
			scroll_y,
			viewport_height: H,
			document_height: H * 6.0,
			section_top: Some(H - scroll_y),
		}
	}

	#[test]
	fn top_of_page_is_quiet() {
		let mut s = state();
		let up = s.on_scroll(&at(0.0), |_| Some((0.0, 0.0)));

		assert_eq!(up.active, None);
		assert_eq!(up.progress, 0.0);
		assert!(s.bursts.is_empty());
		assert_eq!(s.current_color, Theme::default().initial_color);
		assert!(!s.ambient_enabled);
	}

	#[test]
	fn entering_a_card_bursts_once_in_its_color() {
		let mut s = state();
		let center = |i: usize| Some((100.0 * i as f64, 360.0));

		let up = s.on_scroll(&at(H * 2.0), center);
		assert_eq!(up.activated, Some(1));
		assert_eq!(s.bursts.len(), 30);
		let four_arms = Color::parse("#ff2a2a").unwrap();
		assert_eq!(s.current_color, four_arms);
		assert!(s
			.bursts
			.iter()
			.all(|p| p.x == 100.0 && p.y == 360.0 && p.color == four_arms));
		assert!(s.ambient_enabled);

		// Scrolling within the same card does not burst again.
		s.on_scroll(&at(H * 2.5), center);
		assert_eq!(s.bursts.len(), 30);
	}

	#[test]
	fn missing_card_element_skips_burst_but_keeps_color() {
		let mut s = state();
		s.on_scroll(&at(H), |_| None);
		assert!(s.bursts.is_empty());
		assert_eq!(s.current_color, Color::parse("#ff6b00").unwrap());
	}

	#[test]
	fn secret_sequence_bursts_and_times_filter() {
		let mut s = state();
		let matched: Vec<bool> = SECRET_SEQUENCE.iter().map(|k| s.on_key(k, 1000.0)).collect();
		assert_eq!(matched.iter().filter(|&&m| m).count(), 1);

		assert_eq!(s.bursts.len(), 100);
		assert!(s.bursts.iter().all(|p| p.x == W / 2.0 && p.y == H / 2.0));
		assert!(s.bursts.iter().all(|p| p.color == Color::rgb(0, 255, 0)));
		assert!(s.filter_active());

		assert!(!s.tick(3999.0).filter_expired);
		assert!(s.tick(4000.0).filter_expired);
		assert!(!s.tick(4016.0).filter_expired);
		assert!(!s.filter_active());
	}

	#[test]
	fn ambient_only_moves_while_enabled() {
		let mut s = state();
		let before: Vec<f64> = s.ambient.particles.iter().map(|p| p.x).collect();
		s.tick(0.0);
		let after: Vec<f64> = s.ambient.particles.iter().map(|p| p.x).collect();
		assert_eq!(before, after);

		s.ambient_enabled = true;
		s.tick(16.0);
		assert!(s.ambient.particles.iter().zip(&before).any(|(p, x)| p.x != *x));
	}

	#[test]
	fn resize_rebuilds_within_new_bounds() {
		let mut s = state();
		s.resize(300.0, 200.0);
		assert_eq!(s.stars.stars.len(), 300);
		assert_eq!(s.stars.size(), (300.0, 200.0));
		assert!(s
			.stars
			.stars
			.iter()
			.all(|st| st.x <= 300.0 && st.y <= 200.0));
	}

	#[test]
	fn low_performance_mode() {
		assert!(is_low_performance(2.0, 4));
		assert!(!is_low_performance(4.0, 4));
		assert!(!is_low_performance(0.0, 4));

		let s = ShowcaseState::new(&ShowcaseData::default(), W, H, Theme::default(), 1, true);
		assert_eq!(s.ambient.particles.len(), 40);
		assert_eq!(state().ambient.particles.len(), 85);
	}

	#[test]
	fn pointer_and_scale() {
		let mut s = state();
		let p = s.on_pointer(W, 0.0, None);
		assert_eq!(p, Parallax { x: 1.0, y: -1.0 });
		s.tick(0.0);
		assert!((s.cursor.x - W * 0.15).abs() < 1e-9);
		assert!((s.card_scale(0.5) - 1.01).abs() < 1e-12);
	}

	#[test]
	fn pointer_uses_live_viewport_before_resize_settles() {
		let mut s = state();
		let p = s.on_pointer(W, H, Some((W * 2.0, H * 2.0)));
		assert_eq!(p, Parallax { x: 0.0, y: 0.0 });
		assert_eq!(s.width, W);
	}

	#[test]
	fn non_ascii_card_color_falls_back() {
		let mut data = ShowcaseData::default();
		data.cards[0].color = "#ab\u{20ac}d".into();
		data.cards[1].color = "#\u{e9}1".into();
		let mut s = ShowcaseState::new(&data, W, H, Theme::default(), 5, false);
		s.on_scroll(&at(H), |_| Some((1.0, 1.0)));
		assert_eq!(s.current_color, Theme::default().initial_color);
		s.on_scroll(&at(H * 2.0), |_| Some((1.0, 1.0)));
		assert_eq!(s.current_color, Theme::default().initial_color);
	}

	#[test]
	fn invalid_card_color_falls_back() {
		let mut data = ShowcaseData::default();
		data.cards[0].color = "not-a-color".into();
		let mut s = ShowcaseState::new(&data, W, H, Theme::default(), 3, false);
		s.on_scroll(&at(H), |_| Some((1.0, 1.0)));
		assert_eq!(s.current_color, Theme::default().initial_color);
	}
}
