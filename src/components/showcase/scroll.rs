//! Scroll offset to scene mapping.
//!
//! The page is one hero viewport followed by one viewport per card. Scroll
//! position picks at most one active card; everything the page derives from
//! scrolling (progress bar, navbar state, section background, active card
//! scale) comes out of a single [`ScrollMapper::update`] call.

use super::types::MotionConfig;

/// Raw scroll measurements taken from the window.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollMetrics {
	/// `window.scrollY` in px.
	pub scroll_y: f64,
	/// `window.innerHeight` in px.
	pub viewport_height: f64,
	/// Full scrollable height of the document.
	pub document_height: f64,
	/// Top edge of the character section relative to the viewport, if it exists.
	pub section_top: Option<f64>,
}

/// Everything derived from one scroll position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollUpdate {
	/// Progress bar width in percent.
	pub progress: f64,
	/// Scroll offset is past the navbar threshold.
	pub navbar_scrolled: bool,
	/// `None` when the character section is not on the page.
	pub section_background: Option<bool>,
	/// Card that is active after this update.
	pub active: Option<usize>,
	/// Set only when `active` changed to a new card on this update.
	pub activated: Option<usize>,
	/// How far through the active card's viewport the page is, in `[0, 1)`.
	pub card_progress: f64,
}

/// Scene index for a scroll offset. Negative while the hero is showing.
pub fn scene_index(scroll_y: f64, viewport_height: f64) -> i64 {
	if viewport_height <= 0.0 {
		return -1;
	}
	((scroll_y - viewport_height) / viewport_height).floor() as i64
}

/// `100 * scroll / (document - viewport)`, or 0 when nothing can scroll.
pub fn progress_percent(m: &ScrollMetrics) -> f64 {
	let max_scroll = m.document_height - m.viewport_height;
	if max_scroll <= 0.0 {
		return 0.0;
	}
	(m.scroll_y / max_scroll * 100.0).clamp(0.0, 100.0)
}

/// Scroll container height in `vh`: the hero plus one viewport per card.
pub fn scroll_length_vh(card_count: usize) -> usize {
	(1 + card_count) * 100
}

/// Document offset to scroll to when following an in-page anchor.
///
/// `target_top` is viewport-relative; `nav_height` is the rendered navbar height.
pub fn anchor_scroll_top(target_top: f64, page_offset: f64, nav_height: Option<f64>) -> f64 {
	let nav_offset = nav_height.map(|h| h + 10.0).unwrap_or(90.0);
	target_top + page_offset - nav_offset
}

/// Maps scroll offset to the active card and tracks activations.
#[derive(Clone, Debug)]
pub struct ScrollMapper {
	card_count: usize,
	active: Option<usize>,
	navbar_after: f64,
	background_trigger: f64,
}

impl ScrollMapper {
	/// Mapper for `card_count` cards with no card active yet.
	pub fn new(card_count: usize, motion: &MotionConfig) -> Self {
		Self {
			card_count,
			active: None,
			navbar_after: motion.navbar_scrolled_after,
			background_trigger: motion.ambient_trigger,
		}
	}

	/// Currently active card, if any.
	pub fn active(&self) -> Option<usize> {
		self.active
	}

	/// Map one scroll position. At most one card is active afterwards.
	pub fn update(&mut self, m: &ScrollMetrics) -> ScrollUpdate {
		let vh = m.viewport_height;
		let index = scene_index(m.scroll_y, vh);
		let active = usize::try_from(index).ok().filter(|&i| i < self.card_count);
		let activated = active.filter(|_| active != self.active);
		self.active = active;

		let card_progress = if active.is_some() && vh > 0.0 {
			(m.scroll_y - vh).rem_euclid(vh) / vh
		} else {
			0.0
		};

		ScrollUpdate {
			progress: progress_percent(m),
			navbar_scrolled: m.scroll_y > self.navbar_after,
			section_background: m.section_top.map(|top| top <= vh * self.background_trigger),
			active,
			activated,
			card_progress,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const VH: f64 = 800.0;

	fn metrics(scroll_y: f64) -> ScrollMetrics {
		ScrollMetrics {
			scroll_y,
			viewport_height: VH,
			document_height: VH * 6.0,
			section_top: Some(VH - scroll_y),
		}
	}

	#[test]
	fn top_of_page_has_no_active_card() {
		let mut mapper = ScrollMapper::new(5, &MotionConfig::default());
		let up = mapper.update(&metrics(0.0));

		assert!(scene_index(0.0, VH) < 0);
		assert_eq!(up.active, None);
		assert_eq!(up.activated, None);
		assert_eq!(up.progress, 0.0);
		assert!(!up.navbar_scrolled);
		assert_eq!(up.section_background, Some(false));
	}

	#[test]
	fn at_most_one_active_for_any_offset() {
		let mut mapper = ScrollMapper::new(5, &MotionConfig::default());
		let mut y = -200.0;
		while y < VH * 8.0 {
			let up = mapper.update(&metrics(y));
			let expected = scene_index(y, VH);
			match up.active {
				Some(i) => assert_eq!(i as i64, expected),
				None => assert!(!(0..5).contains(&expected)),
			}
			y += 37.0;
		}
	}

	#[test]
	fn activation_fires_once_per_entry() {
		let mut mapper = ScrollMapper::new(3, &MotionConfig::default());

		assert_eq!(mapper.update(&metrics(VH)).activated, Some(0));
		assert_eq!(mapper.update(&metrics(VH * 1.5)).activated, None);
		assert_eq!(mapper.update(&metrics(VH * 2.0)).activated, Some(1));
		assert_eq!(mapper.update(&metrics(0.0)).active, None);
		// Re-entering a card activates it again.
		assert_eq!(mapper.update(&metrics(VH * 2.2)).activated, Some(1));
		// Past the last card nothing is active.
		let past = mapper.update(&metrics(VH * 4.0));
		assert_eq!((past.active, past.activated), (None, None));
		assert_eq!(mapper.active(), None);
	}

	#[test]
	fn progress_follows_scroll_ratio() {
		let m = ScrollMetrics {
			scroll_y: 1000.0,
			viewport_height: 800.0,
			document_height: 4800.0,
			section_top: None,
		};
		assert!((progress_percent(&m) - 25.0).abs() < 1e-9);

		let flat = ScrollMetrics {
			document_height: 800.0,
			..m
		};
		assert_eq!(progress_percent(&flat), 0.0);
	}

	#[test]
	fn card_progress_and_flags() {
		let mut mapper = ScrollMapper::new(5, &MotionConfig::default());
		let up = mapper.update(&metrics(VH * 1.25));
		assert!((up.card_progress - 0.25).abs() < 1e-9);
		assert!(up.navbar_scrolled);
		assert_eq!(up.section_background, Some(true));

		let no_section = mapper.update(&ScrollMetrics {
			section_top: None,
			..metrics(10.0)
		});
		assert_eq!(no_section.section_background, None);
		assert!(!no_section.navbar_scrolled);
	}

	#[test]
	fn section_background_threshold() {
		let mut mapper = ScrollMapper::new(1, &MotionConfig::default());
		let at = |top| ScrollMetrics {
			section_top: Some(top),
			..metrics(0.0)
		};
		assert_eq!(mapper.update(&at(VH * 0.25)).section_background, Some(true));
		assert_eq!(mapper.update(&at(VH * 0.26)).section_background, Some(false));
	}

	#[test]
	fn layout_helpers() {
		assert_eq!(scroll_length_vh(5), 600);
		assert_eq!(scroll_length_vh(0), 100);
		assert_eq!(anchor_scroll_top(400.0, 1000.0, Some(70.0)), 1320.0);
		assert_eq!(anchor_scroll_top(400.0, 1000.0, None), 1310.0);
		assert_eq!(scene_index(500.0, 0.0), -1);
	}
}
