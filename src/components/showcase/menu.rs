//! Mobile navigation menu state.

/// Inputs that can open or close the mobile menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
	/// The hamburger button.
	ToggleClicked,
	/// The dimmed area behind the open menu.
	ScrimClicked,
	/// Any link inside the menu.
	LinkClicked,
	/// A key press; only `Escape` closes the menu.
	Key,
}

/// Open/closed state plus the attributes derived from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
	/// Whether the mobile menu is shown.
	pub open: bool,
}

impl MenuState {
	/// Apply an event. `key` is only consulted for [`MenuEvent::Key`].
	/// Returns whether the state changed.
	pub fn handle(&mut self, event: MenuEvent, key: Option<&str>) -> bool {
		let next = match event {
			MenuEvent::ToggleClicked => !self.open,
			MenuEvent::ScrimClicked | MenuEvent::LinkClicked => false,
			MenuEvent::Key if key == Some("Escape") => false,
			MenuEvent::Key => self.open,
		};
		let changed = next != self.open;
		self.open = next;
		changed
	}

	/// Value for the toggle's `aria-expanded`.
	pub fn aria_expanded(self) -> &'static str {
		if self.open { "true" } else { "false" }
	}

	/// The scrim only catches clicks while the menu is open.
	pub fn scrim_pointer_events(self) -> &'static str {
		if self.open { "auto" } else { "none" }
	}

	/// Body `overflow` while the menu is in this state. Open locks scrolling.
	pub fn body_overflow(self) -> &'static str {
		if self.open { "hidden" } else { "" }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toggle_and_close_paths() {
		let mut m = MenuState::default();
		assert!(m.handle(MenuEvent::ToggleClicked, None));
		assert!(m.open);
		assert_eq!(m.aria_expanded(), "true");
		assert_eq!(m.body_overflow(), "hidden");

		assert!(!m.handle(MenuEvent::Key, Some("Enter")));
		assert!(m.open);
		assert!(m.handle(MenuEvent::Key, Some("Escape")));
		assert!(!m.open);
		assert_eq!(m.scrim_pointer_events(), "none");

		m.handle(MenuEvent::ToggleClicked, None);
		assert!(m.handle(MenuEvent::LinkClicked, None));
		m.handle(MenuEvent::ToggleClicked, None);
		assert!(m.handle(MenuEvent::ScrimClicked, None));
		assert!(m.handle(MenuEvent::ToggleClicked, None));
		assert!(m.handle(MenuEvent::ToggleClicked, None));
		assert!(!m.open);
	}

	#[test]
	fn closing_a_closed_menu_is_a_no_op() {
		let mut m = MenuState::default();
		assert!(!m.handle(MenuEvent::Key, Some("Escape")));
		assert!(!m.handle(MenuEvent::ScrimClicked, None));
		assert_eq!(m.body_overflow(), "");
	}
}
