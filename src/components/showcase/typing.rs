//! Typewriter state machines for card titles and the footer ticker.
//!
//! Both are driven by timers on the host side: each step yields the text to
//! display and how long to wait before asking for the next step.

use super::types::MotionConfig;

/// One frame of a typing animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeStep {
	/// Text to display after this step.
	pub text: String,
	/// Wait before the next step.
	pub delay_ms: u32,
}

fn prefix(s: &str, chars: usize) -> String {
	s.chars().take(chars).collect()
}

/// Types a string once, one character per step, then stops.
#[derive(Clone, Debug)]
pub struct TypeWriter {
	text: String,
	len: usize,
	typed: usize,
	speed_ms: u32,
}

impl TypeWriter {
	/// Writer that types `text` at `speed_ms` per character.
	pub fn new(text: impl Into<String>, speed_ms: u32) -> Self {
		let text = text.into();
		Self {
			len: text.chars().count(),
			text,
			typed: 0,
			speed_ms,
		}
	}

	/// Whether the whole text has been emitted.
	pub fn is_done(&self) -> bool {
		self.typed >= self.len
	}
}

impl Iterator for TypeWriter {
	type Item = TypeStep;

	fn next(&mut self) -> Option<TypeStep> {
		if self.is_done() {
			return None;
		}
		self.typed += 1;
		Some(TypeStep {
			text: prefix(&self.text, self.typed),
			delay_ms: self.speed_ms,
		})
	}
}

/// Footer ticker delays.
#[derive(Clone, Copy, Debug)]
pub struct CycleTiming {
	/// Per-character delay while typing.
	pub type_ms: u32,
	/// Per-character delay while deleting.
	pub delete_ms: u32,
	/// Pause with the full message shown.
	pub hold_ms: u32,
	/// Pause with the text empty before the next message.
	pub next_ms: u32,
}

impl From<&MotionConfig> for CycleTiming {
	fn from(m: &MotionConfig) -> Self {
		Self {
			type_ms: m.footer_type_ms,
			delete_ms: m.footer_delete_ms,
			hold_ms: m.footer_hold_ms,
			next_ms: m.footer_next_ms,
		}
	}
}

/// Types, holds, deletes and advances through messages forever.
#[derive(Clone, Debug)]
pub struct MessageCycler {
	messages: Vec<String>,
	index: usize,
	chars: usize,
	deleting: bool,
	timing: CycleTiming,
}

impl MessageCycler {
	/// Returns `None` when there is no non-empty message to show.
	pub fn new(messages: &[String], timing: CycleTiming) -> Option<Self> {
		let messages: Vec<String> = messages.iter().filter(|m| !m.is_empty()).cloned().collect();
		if messages.is_empty() {
			return None;
		}
		Some(Self {
			messages,
			index: 0,
			chars: 0,
			deleting: false,
			timing,
		})
	}

	/// Index of the message being typed or deleted.
	pub fn current_index(&self) -> usize {
		self.index
	}

	/// Advance by one character.
	pub fn step(&mut self) -> TypeStep {
		let message = &self.messages[self.index];
		let len = message.chars().count();

		let mut delay_ms;
		if self.deleting {
			self.chars -= 1;
			delay_ms = self.timing.delete_ms;
		} else {
			self.chars += 1;
			delay_ms = self.timing.type_ms;
		}
		let text = prefix(message, self.chars);

		if !self.deleting && self.chars == len {
			delay_ms = self.timing.hold_ms;
			self.deleting = true;
		} else if self.deleting && self.chars == 0 {
			self.deleting = false;
			self.index = (self.index + 1) % self.messages.len();
			delay_ms = self.timing.next_ms;
		}

		TypeStep { text, delay_ms }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn step(text: &str, delay_ms: u32) -> TypeStep {
		TypeStep {
			text: text.to_string(),
			delay_ms,
		}
	}

	#[test]
	fn typewriter_runs_once() {
		let steps: Vec<_> = TypeWriter::new("Ben", 80).collect();
		assert_eq!(steps, vec![step("B", 80), step("Be", 80), step("Ben", 80)]);

		let mut tw = TypeWriter::new("", 80);
		assert!(tw.is_done());
		assert_eq!(tw.next(), None);
	}

	#[test]
	fn typewriter_counts_characters_not_bytes() {
		let texts: Vec<_> = TypeWriter::new("\u{26a1}Go", 10).map(|s| s.text).collect();
		assert_eq!(texts, vec!["\u{26a1}", "\u{26a1}G", "\u{26a1}Go"]);
	}

	#[test]
	fn cycler_types_holds_deletes_and_advances() {
		let timing = CycleTiming::from(&MotionConfig::default());
		let messages = vec!["ab".to_string(), "c".to_string()];
		let mut c = MessageCycler::new(&messages, timing).unwrap();

		let got: Vec<_> = (0..10).map(|_| c.step()).collect();
		assert_eq!(
			got,
			vec![
				step("a", 100),
				step("ab", 2000),
				step("a", 50),
				step("", 500),
				step("c", 2000),
				step("", 500),
				step("a", 100),
				step("ab", 2000),
				step("a", 50),
				step("", 500),
			]
		);
		assert_eq!(c.current_index(), 1);
	}

	#[test]
	fn cycler_skips_empty_messages() {
		let timing = CycleTiming::from(&MotionConfig::default());
		assert!(MessageCycler::new(&[], timing).is_none());
		assert!(MessageCycler::new(&[String::new()], timing).is_none());

		let mut c = MessageCycler::new(&[String::new(), "x".into()], timing).unwrap();
		assert_eq!(c.step(), step("x", 2000));
	}
}
