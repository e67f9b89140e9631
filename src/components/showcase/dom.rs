//! Thin wrappers over the browser APIs the showcase touches.
//!
//! Every lookup returns `Option`; a missing window, document or element
//! simply turns the calling feature off.

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
	Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions, Window,
};

use super::cursor::Ripple;
use super::scroll::ScrollMetrics;

pub fn window() -> Option<Window> {
	web_sys::window()
}

pub fn document() -> Option<Document> {
	window()?.document()
}

pub fn body() -> Option<HtmlElement> {
	document()?.body()
}

/// Wall-clock milliseconds, used for timers polled from the frame loop.
pub fn now_ms() -> f64 {
	js_sys::Date::now()
}

/// Seed for the particle RNG.
pub fn random_seed() -> u64 {
	let noise = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
	noise ^ now_ms() as u64
}

pub fn window_size() -> Option<(f64, f64)> {
	let win = window()?;
	Some((
		win.inner_width().ok()?.as_f64()?,
		win.inner_height().ok()?.as_f64()?,
	))
}

/// Current scroll measurements. `section_top` is the viewport-relative top of
/// the character section, when it is on the page.
pub fn scroll_metrics(section_top: Option<f64>) -> Option<ScrollMetrics> {
	let win = window()?;
	let root = win.document()?.document_element()?;
	Some(ScrollMetrics {
		scroll_y: win.scroll_y().ok()?,
		viewport_height: win.inner_height().ok()?.as_f64()?,
		document_height: root.scroll_height() as f64,
		section_top,
	})
}

pub fn prefers_reduced_motion() -> bool {
	window()
		.and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
		.is_some_and(|mq| mq.matches())
}

/// `navigator.hardwareConcurrency`, or 0 when unknown.
pub fn hardware_concurrency() -> f64 {
	window()
		.map(|w| w.navigator().hardware_concurrency())
		.unwrap_or(0.0)
}

fn behavior(smooth: bool) -> ScrollBehavior {
	if smooth {
		ScrollBehavior::Smooth
	} else {
		ScrollBehavior::Auto
	}
}

pub fn scroll_to(top: f64, smooth: bool) {
	let Some(win) = window() else {
		return;
	};
	let opts = ScrollToOptions::new();
	opts.set_top(top);
	opts.set_behavior(behavior(smooth));
	win.scroll_to_with_scroll_to_options(&opts);
}

pub fn scroll_by(dy: f64, smooth: bool) {
	let Some(win) = window() else {
		return;
	};
	let opts = ScrollToOptions::new();
	opts.set_top(dy);
	opts.set_behavior(behavior(smooth));
	win.scroll_by_with_scroll_to_options(&opts);
}

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) {
	let Some(win) = window() else {
		return;
	};
	let cb = Closure::once_into_js(f);
	let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
		cb.unchecked_ref(),
		ms.min(i32::MAX as u32) as i32,
	);
}

/// Run `f` once before the next repaint.
pub fn request_frame(f: impl FnOnce() + 'static) {
	let Some(win) = window() else {
		return;
	};
	let cb = Closure::once_into_js(f);
	let _ = win.request_animation_frame(cb.unchecked_ref());
}

/// Register a page-lifetime listener on `target`.
pub fn listen<E: FromWasmAbi + 'static>(
	target: &web_sys::EventTarget,
	event: &str,
	handler: impl FnMut(E) + 'static,
) {
	let cb = Closure::<dyn FnMut(E)>::new(handler);
	let _ = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
	cb.forget();
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
	let _ = el.style().set_property(property, value);
}

pub fn set_body_style(property: &str, value: &str) {
	if let Some(body) = body() {
		set_style(&body, property, value);
	}
}

pub fn add_body_class(class: &str) {
	if let Some(body) = body() {
		let _ = body.class_list().add_1(class);
	}
}

/// Set a CSS custom property on the root element.
pub fn set_css_var(name: &str, value: &str) {
	let Some(root) = document()
		.and_then(|d| d.document_element())
		.and_then(|el| el.dyn_into::<HtmlElement>().ok())
	else {
		return;
	};
	set_style(&root, name, value);
}

pub fn query(selector: &str) -> Option<Element> {
	document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
	let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

/// Centre of a card's bounding box in viewport coordinates.
pub fn card_center(index: usize) -> Option<(f64, f64)> {
	let card = query(&format!(".character-card[data-index=\"{index}\"]"))?;
	let rect = card.get_bounding_client_rect();
	Some((
		rect.left() + rect.width() / 2.0,
		rect.top() + rect.height() / 2.0,
	))
}

/// Rendered height of the navbar, if there is one.
pub fn navbar_height() -> Option<f64> {
	query(".navbar")?
		.dyn_into::<HtmlElement>()
		.ok()
		.map(|nav| nav.offset_height() as f64)
}

/// Observe `targets`, calling `on_visible` for every entry that crosses
/// `threshold` into view. The observer is handed back so callers can disconnect.
pub fn observe_visible(
	targets: &[Element],
	threshold: f64,
	mut on_visible: impl FnMut(&Element, &IntersectionObserver) + 'static,
) -> Option<IntersectionObserver> {
	let cb = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
		move |entries: js_sys::Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				if entry.is_intersecting() {
					on_visible(&entry.target(), &observer);
				}
			}
		},
	);

	let init = IntersectionObserverInit::new();
	init.set_threshold(&JsValue::from_f64(threshold));
	let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init).ok()?;
	for target in targets {
		observer.observe(target);
	}
	cb.forget();
	Some(observer)
}

/// Drop a ripple span into the clicked element and remove it after `ttl_ms`.
pub fn spawn_ripple(ev: &MouseEvent, ttl_ms: u32) {
	let Some(button) = ev
		.current_target()
		.and_then(|t| t.dyn_into::<HtmlElement>().ok())
	else {
		return;
	};
	let Some(span) = document()
		.and_then(|d| d.create_element("span").ok())
		.and_then(|el| el.dyn_into::<HtmlElement>().ok())
	else {
		return;
	};

	let rect = button.get_bounding_client_rect();
	let ripple = Ripple::at(
		(rect.left(), rect.top(), rect.width(), rect.height()),
		ev.client_x() as f64,
		ev.client_y() as f64,
	);
	span.style().set_css_text(&ripple.css_text());
	if button.append_child(&span).is_ok() {
		set_timeout(ttl_ms, move || span.remove());
	}
}
