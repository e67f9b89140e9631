//! Leptos component wiring the showcase page to the browser.
//!
//! The component renders the page markup, then on mount creates the canvas
//! context and the shared [`ShowcaseState`]. A `requestAnimationFrame` loop
//! ticks and renders it each frame; scroll, resize, pointer and key listeners
//! forward into the same state and push the results into [`PageSignals`].

use std::cell::RefCell;
use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use leptos_meta::Style;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, Event, HtmlCanvasElement, HtmlElement,
	IntersectionObserver, KeyboardEvent, MouseEvent,
};

use super::dom;
use super::menu::MenuEvent;
use super::page::{CharacterCard, Cursor, Hero, NavBar, PageSignals, SiteFooter};
use super::render;
use super::schedule::{Debounce, FrameGate};
use super::scroll::{anchor_scroll_top, scroll_length_vh};
use super::state::{ShowcaseState, is_low_performance};
use super::theme::Theme;
use super::types::ShowcaseData;
use super::typing::{CycleTiming, MessageCycler, TypeWriter};

const PAGE_EFFECTS_CSS: &str = "
@keyframes ripple {
	to {
		transform: scale(4);
		opacity: 0;
	}
}

.btn-play, .btn-info {
	position: relative;
	overflow: hidden;
}

.low-performance .action-aura,
.low-performance .energy-rings,
.low-performance .stat-fill::after {
	display: none;
}
";

/// Simulation state plus the canvas it draws to.
struct ShowcaseContext {
	state: ShowcaseState,
	ctx: CanvasRenderingContext2d,
	canvas: HtmlCanvasElement,
	/// Held for the page's lifetime so the observers keep firing.
	_observers: Vec<IntersectionObserver>,
}

type Shared = Rc<RefCell<Option<ShowcaseContext>>>;

/// Node refs the listeners need after mount.
#[derive(Clone, Copy)]
struct PageRefs {
	cursor: NodeRef<html::Div>,
	follower: NodeRef<html::Div>,
	section: NodeRef<html::Section>,
	footer: NodeRef<html::Footer>,
}

/// The full showcase page: starfield canvas, navbar, hero, one scene per
/// card and the footer.
///
/// Card content and timing come from `data`; the page scrolls through
/// `(1 + cards) * 100vh`.
#[component]
pub fn Showcase(data: ShowcaseData) -> impl IntoView {
	let canvas_ref = NodeRef::<html::Canvas>::new();
	let refs = PageRefs {
		cursor: NodeRef::new(),
		follower: NodeRef::new(),
		section: NodeRef::new(),
		footer: NodeRef::new(),
	};

	let theme = Theme::default();
	let signals = PageSignals::new(theme.initial_color);
	let titles: Vec<RwSignal<String>> =
		data.cards.iter().map(|_| RwSignal::new(String::new())).collect();

	let context: Shared = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (data_init, titles_init) = (data.clone(), titles.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some((w, h)) = dom::window_size() else {
			return;
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("alien-showcase: 2d canvas context unavailable, effects disabled");
			return;
		};

		let motion = &data_init.motion;
		let low_performance =
			is_low_performance(dom::hardware_concurrency(), motion.low_performance_cores);
		if low_performance {
			dom::add_body_class("low-performance");
			info!("alien-showcase: low performance mode");
		}

		*context.borrow_mut() = Some(ShowcaseContext {
			state: ShowcaseState::new(
				&data_init,
				w,
				h,
				theme.clone(),
				dom::random_seed(),
				low_performance,
			),
			ctx,
			canvas,
			_observers: Vec::new(),
		});
		info!(
			"alien-showcase: mounted {} cards at {}x{}",
			data_init.cards.len(),
			w,
			h
		);

		start_animation(&context, &animate, refs.follower);
		wire_scroll(&context, signals, refs.section);
		wire_resize(&context, motion.resize_debounce_ms);
		wire_pointer(&context, signals, refs.cursor);
		wire_keys(&context, signals);
		wire_anchor_links();

		let observers = [
			observe_card_titles(&data_init, &titles_init),
			observe_footer(&data_init, signals.footer_text, refs.footer),
		];
		if let Some(ref mut c) = *context.borrow_mut() {
			c._observers.extend(observers.into_iter().flatten());
		}

		apply_scroll(&context, signals, refs.section);
		fade_in(motion.fade_in_delay_ms);
	});

	Effect::new(move |_| {
		dom::set_body_style("overflow", signals.menu.get().body_overflow());
	});

	let ripple_ms = data.motion.ripple_ms;
	let height = format!("{}vh", scroll_length_vh(data.cards.len()));
	let cards = data
		.cards
		.into_iter()
		.zip(titles)
		.enumerate()
		.map(|(index, (card, title))| {
			view! {
				<CharacterCard
					index=index
					card=card
					title=title
					signals=signals
					ripple_ms=ripple_ms
				/>
			}
		})
		.collect_view();

	view! {
		<Style>{PAGE_EFFECTS_CSS}</Style>
		<Cursor signals=signals cursor_ref=refs.cursor follower_ref=refs.follower />
		<canvas id="starCanvas" class="star-canvas" node_ref=canvas_ref />
		<NavBar signals=signals />
		<main class="scroll-container" style:height=height>
			<Hero />
			<section id="aliens" class="aliens" node_ref=refs.section>
				<div class="aliens-bg" class=("on", move || signals.section_background.get())></div>
				{cards}
			</section>
		</main>
		<SiteFooter text=signals.footer_text footer_ref=refs.footer />
	}
}

fn start_animation(
	context: &Shared,
	animate: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	follower_ref: NodeRef<html::Div>,
) {
	let (context_anim, animate_inner) = (context.clone(), animate.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		if let Some(ref mut c) = *context_anim.borrow_mut() {
			let effects = c.state.tick(dom::now_ms());
			render::render(&c.state, &c.ctx);
			if effects.filter_expired {
				dom::set_body_style("filter", "none");
			}
			if let Some(follower) = follower_ref.get_untracked() {
				let follower: HtmlElement = follower.into();
				dom::set_style(&follower, "left", &format!("{}px", c.state.cursor.x));
				dom::set_style(&follower, "top", &format!("{}px", c.state.cursor.y));
			}
		}
		if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), dom::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let (Some(cb), Some(win)) = (animate.borrow().as_ref(), dom::window()) {
		let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Map the current scroll position into state and signals.
fn apply_scroll(context: &Shared, signals: PageSignals, section_ref: NodeRef<html::Section>) {
	let section_top = section_ref
		.get_untracked()
		.map(|s| s.get_bounding_client_rect().top());
	let Some(metrics) = dom::scroll_metrics(section_top) else {
		return;
	};

	let (update, color, scale) = {
		let mut guard = context.borrow_mut();
		let Some(c) = guard.as_mut() else {
			return;
		};
		let update = c.state.on_scroll(&metrics, dom::card_center);
		let scale = c.state.card_scale(update.card_progress);
		(update, c.state.current_color, scale)
	};

	if update.activated.is_some() {
		dom::set_css_var("--primary", &color.to_css_rgb());
		signals.current_color.set(color);
	}
	if let Some(on) = update.section_background {
		signals.section_background.set(on);
	}
	signals.progress.set(update.progress);
	signals.navbar_scrolled.set(update.navbar_scrolled);
	signals.active_card.set(update.active);
	signals.card_scale.set(scale);
}

/// Coalesce scroll events to one update per animation frame.
fn wire_scroll(context: &Shared, signals: PageSignals, section_ref: NodeRef<html::Section>) {
	let Some(win) = dom::window() else {
		return;
	};
	let gate = Rc::new(FrameGate::default());
	let context = context.clone();
	dom::listen(&win, "scroll", move |_: Event| {
		if !gate.request() {
			return;
		}
		let (context, gate) = (context.clone(), gate.clone());
		dom::request_frame(move || {
			apply_scroll(&context, signals, section_ref);
			gate.release();
		});
	});
}

/// Resize the canvas and rebuild the fields once resizing settles.
fn wire_resize(context: &Shared, delay_ms: u32) {
	let Some(win) = dom::window() else {
		return;
	};
	let debounce = Rc::new(Debounce::default());
	let context = context.clone();
	dom::listen(&win, "resize", move |_: Event| {
		let generation = debounce.trigger();
		let (context, debounce) = (context.clone(), debounce.clone());
		dom::set_timeout(delay_ms, move || {
			if !debounce.is_current(generation) {
				return;
			}
			let Some((w, h)) = dom::window_size() else {
				return;
			};
			if let Some(ref mut c) = *context.borrow_mut() {
				c.canvas.set_width(w as u32);
				c.canvas.set_height(h as u32);
				c.state.resize(w, h);
			}
		});
	});
}

fn wire_pointer(context: &Shared, signals: PageSignals, cursor_ref: NodeRef<html::Div>) {
	let Some(doc) = dom::document() else {
		return;
	};
	let context = context.clone();
	dom::listen(&doc, "mousemove", move |ev: MouseEvent| {
		let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
		if let Some(cursor) = cursor_ref.get_untracked() {
			let cursor: HtmlElement = cursor.into();
			dom::set_style(&cursor, "left", &format!("{x}px"));
			dom::set_style(&cursor, "top", &format!("{y}px"));
		}

		let viewport = dom::window_size();
		let parallax = context
			.borrow_mut()
			.as_mut()
			.map(|c| c.state.on_pointer(x, y, viewport));
		if parallax.is_some() {
			signals.parallax.set(parallax);
		}
	});
}

/// Escape closes the menu, arrows page one scene, and every key feeds the
/// secret sequence.
fn wire_keys(context: &Shared, signals: PageSignals) {
	let Some(doc) = dom::document() else {
		return;
	};
	let context = context.clone();
	dom::listen(&doc, "keydown", move |ev: KeyboardEvent| {
		let key = ev.key();
		signals.dispatch_menu(MenuEvent::Key, Some(key.as_str()));

		let direction = match key.as_str() {
			"ArrowDown" => Some(1.0),
			"ArrowUp" => Some(-1.0),
			_ => None,
		};
		if let (Some(direction), Some((_, vh))) = (direction, dom::window_size()) {
			ev.prevent_default();
			dom::scroll_by(direction * vh, !dom::prefers_reduced_motion());
		}

		let unlocked = context
			.borrow_mut()
			.as_mut()
			.is_some_and(|c| c.state.on_key(&key, dom::now_ms()));
		if unlocked {
			dom::set_body_style("filter", "hue-rotate(180deg)");
		}
	});
}

/// In-page anchors scroll smoothly, stopping just below the navbar.
fn wire_anchor_links() {
	let Some(doc) = dom::document() else {
		return;
	};
	dom::listen(&doc, "click", move |ev: MouseEvent| {
		let Some(anchor) = ev
			.target()
			.and_then(|t| t.dyn_into::<Element>().ok())
			.and_then(|el| el.closest("a[href^=\"#\"]").ok().flatten())
		else {
			return;
		};
		let Some(target) = anchor
			.get_attribute("href")
			.filter(|href| href.len() > 1)
			.and_then(|href| dom::query(&href))
		else {
			return;
		};
		ev.prevent_default();

		let page_offset = dom::window()
			.and_then(|w| w.scroll_y().ok())
			.unwrap_or(0.0);
		let top = anchor_scroll_top(
			target.get_bounding_client_rect().top(),
			page_offset,
			dom::navbar_height(),
		);
		dom::scroll_to(top, !dom::prefers_reduced_motion());
	});
}

/// Type each card's background title the first time the card is half visible.
fn observe_card_titles(
	data: &ShowcaseData,
	titles: &[RwSignal<String>],
) -> Option<IntersectionObserver> {
	let cards = dom::query_all(".character-card");
	let names: Vec<String> = data.cards.iter().map(|c| c.name.clone()).collect();
	let titles = titles.to_vec();
	let mut started = vec![false; titles.len()];
	let (delay_ms, speed_ms) = (
		data.motion.card_typing_delay_ms,
		data.motion.card_typing_speed_ms,
	);

	dom::observe_visible(&cards, 0.5, move |card, _| {
		let Some(index) = card
			.get_attribute("data-index")
			.and_then(|i| i.parse::<usize>().ok())
		else {
			return;
		};
		let (Some(&title), Some(name), Some(begun)) =
			(titles.get(index), names.get(index), started.get_mut(index))
		else {
			return;
		};
		if *begun || name.is_empty() || !title.get_untracked().is_empty() {
			return;
		}
		*begun = true;

		let writer = TypeWriter::new(name.clone(), speed_ms);
		dom::set_timeout(delay_ms, move || run_typewriter(writer, title));
	})
}

/// Start the footer message loop once the footer is 30% visible.
fn observe_footer(
	data: &ShowcaseData,
	text: RwSignal<String>,
	footer_ref: NodeRef<html::Footer>,
) -> Option<IntersectionObserver> {
	let footer: Element = footer_ref.get_untracked()?.into();
	let cycler = MessageCycler::new(&data.footer_messages, CycleTiming::from(&data.motion))?;
	let mut pending = Some(cycler);

	dom::observe_visible(&[footer], 0.3, move |_, observer| {
		observer.disconnect();
		if let Some(cycler) = pending.take() {
			run_cycler(cycler, text);
		}
	})
}

fn run_typewriter(mut writer: TypeWriter, sink: RwSignal<String>) {
	let Some(step) = writer.next() else {
		return;
	};
	sink.set(step.text);
	dom::set_timeout(step.delay_ms, move || run_typewriter(writer, sink));
}

fn run_cycler(mut cycler: MessageCycler, sink: RwSignal<String>) {
	let step = cycler.step();
	sink.set(step.text);
	dom::set_timeout(step.delay_ms, move || run_cycler(cycler, sink));
}

fn fade_in(delay_ms: u32) {
	dom::set_body_style("opacity", "0");
	dom::set_timeout(delay_ms, || {
		dom::set_body_style("transition", "opacity 1s ease");
		dom::set_body_style("opacity", "1");
	});
}
