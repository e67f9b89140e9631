//! Showcase data structures loaded from the page or built in.

use serde::Deserialize;

/// A single labelled stat bar on a character card.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CardStat {
	/// Stat name shown beside the bar.
	pub label: String,
	/// Bar fill percentage (0-100).
	pub value: u8,
}

/// One full-viewport character scene.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CardData {
	/// Character name. Typed into the card's background title.
	pub name: String,
	/// CSS hex color. Becomes the starfield color while the card is active.
	pub color: String,
	/// Optional species line above the name.
	#[serde(default)]
	pub species: Option<String>,
	/// Optional blurb under the name.
	#[serde(default)]
	pub description: Option<String>,
	/// Stat bars, in display order.
	#[serde(default)]
	pub stats: Vec<CardStat>,
}

/// Tunable timings, counts and physics constants.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
	/// Stars in the background field.
	pub star_count: usize,
	/// Section background particles on capable devices.
	pub ambient_count: usize,
	/// Ambient count used on low-performance devices.
	pub ambient_count_low: usize,
	/// Devices reporting fewer cores than this run in low-performance mode.
	pub low_performance_cores: u32,
	/// Particles emitted when a card becomes active.
	pub card_burst: usize,
	/// Particles emitted by the secret key sequence.
	pub secret_burst: usize,
	/// Downward acceleration added to burst particle velocity every frame.
	pub gravity: f64,
	/// Fraction of the remaining distance the cursor follower covers per frame.
	pub follower_easing: f64,
	/// Scroll offset (px) after which the navbar is marked scrolled.
	pub navbar_scrolled_after: f64,
	/// Section background turns on once the section top passes this viewport fraction.
	pub ambient_trigger: f64,
	/// Extra scale reached by the active character layer over one card of scrolling.
	pub card_scale_range: f64,
	/// Quiet period after the last resize before the fields are rebuilt.
	pub resize_debounce_ms: u32,
	/// How long the hue-rotate filter stays on.
	pub secret_filter_ms: u32,
	/// Delay between a card becoming visible and its title typing.
	pub card_typing_delay_ms: u32,
	/// Per-character delay of the card title.
	pub card_typing_speed_ms: u32,
	/// Per-character delay while the footer types.
	pub footer_type_ms: u32,
	/// Per-character delay while the footer deletes.
	pub footer_delete_ms: u32,
	/// Pause with the full footer message shown.
	pub footer_hold_ms: u32,
	/// Pause on the empty footer before the next message.
	pub footer_next_ms: u32,
	/// Delay before the page fades in.
	pub fade_in_delay_ms: u32,
	/// Lifetime of a click ripple.
	pub ripple_ms: u32,
}

impl Default for MotionConfig {
	fn default() -> Self {
		Self {
			star_count: 300,
			ambient_count: 85,
			ambient_count_low: 40,
			low_performance_cores: 4,
			card_burst: 30,
			secret_burst: 100,
			gravity: 0.1,
			follower_easing: 0.15,
			navbar_scrolled_after: 50.0,
			ambient_trigger: 0.25,
			card_scale_range: 0.02,
			resize_debounce_ms: 250,
			secret_filter_ms: 3000,
			card_typing_delay_ms: 500,
			card_typing_speed_ms: 80,
			footer_type_ms: 100,
			footer_delete_ms: 50,
			footer_hold_ms: 2000,
			footer_next_ms: 500,
			fade_in_delay_ms: 100,
			ripple_ms: 600,
		}
	}
}

/// Complete page content: cards, footer ticker and motion tuning.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShowcaseData {
	/// Character scenes, one per screen height of scroll.
	pub cards: Vec<CardData>,
	/// Messages cycled by the footer ticker.
	pub footer_messages: Vec<String>,
	/// Motion tuning.
	pub motion: MotionConfig,
}

fn card(name: &str, color: &str, species: &str, description: &str, stats: [(&str, u8); 3]) -> CardData {
	CardData {
		name: name.to_string(),
		color: color.to_string(),
		species: Some(species.to_string()),
		description: Some(description.to_string()),
		stats: stats
			.into_iter()
			.map(|(label, value)| CardStat {
				label: label.to_string(),
				value,
			})
			.collect(),
	}
}

impl Default for ShowcaseData {
	fn default() -> Self {
		Self {
			cards: vec![
				card(
					"Heatblast",
					"#ff6b00",
					"Pyronite",
					"A living star of molten rock that hurls fireballs and rides columns of flame.",
					[("Power", 90), ("Speed", 60), ("Defense", 55)],
				),
				card(
					"Four Arms",
					"#ff2a2a",
					"Tetramand",
					"Twelve feet of muscle. Four fists, one shockwave clap.",
					[("Power", 95), ("Speed", 40), ("Defense", 80)],
				),
				card(
					"XLR8",
					"#00a8ff",
					"Kineceleran",
					"Faster than the eye can follow, able to run across water and up walls.",
					[("Power", 45), ("Speed", 100), ("Defense", 35)],
				),
				card(
					"Diamondhead",
					"#00ffcc",
					"Petrosapien",
					"Crystal body that reshapes into blades, shields and shards at will.",
					[("Power", 75), ("Speed", 50), ("Defense", 95)],
				),
				card(
					"Upgrade",
					"#39ff14",
					"Galvanic Mechamorph",
					"Living technology that merges with and upgrades any machine it touches.",
					[("Power", 65), ("Speed", 70), ("Defense", 60)],
				),
			],
			footer_messages: [
				"All Systems Online \u{2713}",
				"Omnitrix Database Active \u{2b21}",
				"24 Heroes Ready for Action \u{1f680}",
				"Protecting Earth from Alien Threats \u{1f30d}",
				"It's Hero Time! \u{26a1}",
			]
			.into_iter()
			.map(String::from)
			.collect(),
			motion: MotionConfig::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_falls_back_to_defaults() {
		let data: ShowcaseData = serde_json::from_str(
			r##"{ "cards": [{ "name": "Ghostfreak", "color": "#b0b0ff" }], "motion": { "card_burst": 12 } }"##,
		)
		.unwrap();

		assert_eq!(data.cards.len(), 1);
		assert_eq!(data.cards[0].species, None);
		assert!(data.cards[0].stats.is_empty());
		assert_eq!(data.motion.card_burst, 12);
		assert_eq!(data.motion.star_count, 300);
		assert_eq!(data.footer_messages, ShowcaseData::default().footer_messages);
	}

	#[test]
	fn card_requires_name_and_color() {
		let res = serde_json::from_str::<ShowcaseData>(r#"{ "cards": [{ "name": "Nameless" }] }"#);
		assert!(res.is_err());
	}

	#[test]
	fn default_cards_have_parseable_colors() {
		for card in ShowcaseData::default().cards {
			assert!(
				super::super::theme::Color::parse(&card.color).is_some(),
				"{} has bad color {}",
				card.name,
				card.color
			);
		}
	}
}
