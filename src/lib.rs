//! alien-showcase: Scroll-driven character showcase with a canvas starfield.
//!
//! This crate provides a WASM page component that maps scroll position onto a
//! playlist of alien characters, tinting an animated starfield and firing
//! particle bursts as each one takes the stage.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::showcase::{CardData, CardStat, MotionConfig, Showcase, ShowcaseData};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("alien-showcase: logging initialized");
}

/// Load page content from a script element with id="showcase-data".
/// Expected format: JSON with { cards: [...], footer_messages: [...], motion: {...} },
/// every key optional.
fn load_showcase_data() -> Option<ShowcaseData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("showcase-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<ShowcaseData>(&json_text) {
		Ok(data) => {
			info!(
				"alien-showcase: loaded {} cards, {} footer messages",
				data.cards.len(),
				data.footer_messages.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("alien-showcase: failed to parse showcase data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads showcase content from the DOM, falling back to the built-in roster.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_showcase_data().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Omnitrix Alien Showcase" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Showcase data=data />
	}
}
