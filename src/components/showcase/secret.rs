//! Secret key sequence detection.

use std::collections::VecDeque;

/// Up Up Down Down Left Right Left Right b a, as `KeyboardEvent.key` values.
pub const SECRET_SEQUENCE: [&str; 10] = [
	"ArrowUp",
	"ArrowUp",
	"ArrowDown",
	"ArrowDown",
	"ArrowLeft",
	"ArrowRight",
	"ArrowLeft",
	"ArrowRight",
	"b",
	"a",
];

/// Remembers the most recent keys and reports when they spell the sequence.
#[derive(Clone, Debug, Default)]
pub struct SecretSequence {
	recent: VecDeque<String>,
}

impl SecretSequence {
	/// Record a key press. Returns `true` when the last keys match the sequence.
	pub fn push(&mut self, key: &str) -> bool {
		if self.recent.len() == SECRET_SEQUENCE.len() {
			self.recent.pop_front();
		}
		self.recent.push_back(key.to_string());

		self.recent.len() == SECRET_SEQUENCE.len()
			&& self.recent.iter().zip(SECRET_SEQUENCE).all(|(k, s)| k == s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn matches_exact_sequence() {
		let mut seq = SecretSequence::default();
		let hits: Vec<bool> = SECRET_SEQUENCE.iter().map(|k| seq.push(k)).collect();
		assert_eq!(hits.iter().filter(|&&h| h).count(), 1);
		assert!(hits[9]);
	}

	#[test]
	fn tolerates_leading_noise_and_fires_once() {
		let mut seq = SecretSequence::default();
		for k in ["x", "ArrowUp", "Enter"] {
			assert!(!seq.push(k));
		}
		let last = SECRET_SEQUENCE.iter().map(|k| seq.push(k)).last();
		assert_eq!(last, Some(true));
		// Next key shifts the window; no repeat.
		assert!(!seq.push("a"));
	}

	#[test]
	fn case_sensitive_letters() {
		let mut seq = SecretSequence::default();
		for k in &SECRET_SEQUENCE[..8] {
			seq.push(k);
		}
		seq.push("B");
		assert!(!seq.push("A"));
	}
}
