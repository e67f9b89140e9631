//! Page markup: cursor, navbar, hero, character cards and footer.
//!
//! Views only read [`PageSignals`]; the handlers in `component` write them.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use super::cursor::{CursorMode, Parallax, character_transform};
use super::dom;
use super::menu::{MenuEvent, MenuState};
use super::theme::Color;
use super::types::CardData;

const NAV_LINKS: [(&str, &str); 3] = [
	("#hero", "Home"),
	("#aliens", "Aliens"),
	("#footer", "Base"),
];

/// Reactive page state derived from scroll, pointer and key input.
#[derive(Clone, Copy)]
pub struct PageSignals {
	pub active_card: RwSignal<Option<usize>>,
	/// Scroll-driven scale of the active card's character layer.
	pub card_scale: RwSignal<f64>,
	/// `None` until the pointer first moves.
	pub parallax: RwSignal<Option<Parallax>>,
	pub progress: RwSignal<f64>,
	pub navbar_scrolled: RwSignal<bool>,
	pub section_background: RwSignal<bool>,
	pub menu: RwSignal<MenuState>,
	pub cursor_mode: RwSignal<CursorMode>,
	pub current_color: RwSignal<Color>,
	pub footer_text: RwSignal<String>,
}

impl PageSignals {
	pub fn new(initial_color: Color) -> Self {
		Self {
			active_card: RwSignal::new(None),
			card_scale: RwSignal::new(1.0),
			parallax: RwSignal::new(None),
			progress: RwSignal::new(0.0),
			navbar_scrolled: RwSignal::new(false),
			section_background: RwSignal::new(false),
			menu: RwSignal::new(MenuState::default()),
			cursor_mode: RwSignal::new(CursorMode::Default),
			current_color: RwSignal::new(initial_color),
			footer_text: RwSignal::new(String::new()),
		}
	}

	/// Route a menu event, notifying subscribers only on an actual change.
	pub fn dispatch_menu(&self, event: MenuEvent, key: Option<&str>) {
		self.menu.maybe_update(|m| m.handle(event, key));
	}
}

/// Whether a click landed on (or inside) a link.
fn clicked_link(ev: &MouseEvent) -> bool {
	ev.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.and_then(|el| el.closest("a").ok().flatten())
		.is_some()
}

/// Custom cursor dot and its eased follower ring.
///
/// Positions are written directly by the pointer handler and frame loop;
/// only the hover-dependent styling is reactive.
#[component]
pub fn Cursor(
	signals: PageSignals,
	cursor_ref: NodeRef<html::Div>,
	follower_ref: NodeRef<html::Div>,
) -> impl IntoView {
	let mode = signals.cursor_mode;
	let size = move || format!("{}px", mode.get().size());

	view! {
		<div
			class="custom-cursor"
			node_ref=cursor_ref
			style:width=size
			style:height=size
			style:background=move || mode.get().background(signals.current_color.get())
			style:mix-blend-mode=move || mode.get().blend_mode()
		/>
		<div
			class="cursor-follower"
			node_ref=follower_ref
			style:transform=move || mode.get().follower_transform()
		/>
	}
}

#[component]
pub fn NavBar(signals: PageSignals) -> impl IntoView {
	let menu = signals.menu;
	let links = NAV_LINKS
		.iter()
		.map(|&(href, label)| {
			view! {
				<li>
					<a
						class="nav-link-item"
						href=href
						on:mouseenter=move |_| signals.cursor_mode.set(CursorMode::Link)
						on:mouseleave=move |_| signals.cursor_mode.set(CursorMode::Default)
					>
						{label}
					</a>
				</li>
			}
		})
		.collect_view();

	view! {
		<nav
			class="navbar"
			class=("scrolled", move || signals.navbar_scrolled.get())
			class=("menu-open", move || menu.get().open)
		>
			<a class="nav-logo" href="#hero">"OMNITRIX"</a>
			<button
				class="nav-toggle"
				type="button"
				aria-label="Toggle navigation"
				aria-controls="navLinks"
				aria-expanded=move || menu.get().aria_expanded()
				on:click=move |_| signals.dispatch_menu(MenuEvent::ToggleClicked, None)
			>
				<span class="nav-toggle-bar"></span>
				<span class="nav-toggle-bar"></span>
				<span class="nav-toggle-bar"></span>
			</button>
			<ul
				id="navLinks"
				class="nav-links"
				on:click=move |ev: MouseEvent| {
					if clicked_link(&ev) {
						signals.dispatch_menu(MenuEvent::LinkClicked, None);
					}
				}
			>
				{links}
			</ul>
			<div class="nav-progress" style:width=move || format!("{}%", signals.progress.get())></div>
		</nav>
		<div
			class="nav-scrim"
			hidden=move || !menu.get().open
			style:pointer-events=move || menu.get().scrim_pointer_events()
			on:click=move |_| signals.dispatch_menu(MenuEvent::ScrimClicked, None)
		></div>
	}
}

#[component]
pub fn Hero() -> impl IntoView {
	view! {
		<section id="hero" class="hero scene">
			<div class="hero-content">
				<p class="hero-kicker">"Omnitrix online"</p>
				<h1 class="hero-title">"It's Hero Time"</h1>
				<p class="hero-subtitle">"Scroll to cycle through the playlist. One alien per screen."</p>
				<a class="btn-hero" href="#aliens">"Meet the aliens"</a>
			</div>
			<div class="scroll-hint">"Scroll"</div>
		</section>
	}
}

/// One full-viewport character scene.
///
/// The background title starts empty and is typed in by the visibility
/// observer; parallax layers only move while this card is active.
#[component]
pub fn CharacterCard(
	index: usize,
	card: CardData,
	title: RwSignal<String>,
	signals: PageSignals,
	ripple_ms: u32,
) -> impl IntoView {
	let is_active = move || signals.active_card.get() == Some(index);
	let layer = move |transform: fn(Parallax) -> String| {
		move || match signals.parallax.get() {
			Some(p) if is_active() => transform(p),
			_ => String::new(),
		}
	};
	let character = move || {
		if is_active() {
			character_transform(signals.parallax.get(), signals.card_scale.get())
		} else {
			String::new()
		}
	};
	let hover = move |mode: CursorMode| move |_: MouseEvent| signals.cursor_mode.set(mode);
	let ripple = move |ev: MouseEvent| dom::spawn_ripple(&ev, ripple_ms);

	let stats = card
		.stats
		.iter()
		.map(|stat| {
			let width = format!("{}%", stat.value.min(100));
			view! {
				<li class="stat">
					<span class="stat-label">{stat.label.clone()}</span>
					<div class="stat-bar">
						<div class="stat-fill" style:width=width></div>
					</div>
				</li>
			}
		})
		.collect_view();
	let glyph: String = card.name.chars().take(1).collect();

	view! {
		<article
			class="character-card"
			class=("active", is_active)
			data-index=index.to_string()
			data-name=card.name.clone()
			data-color=card.color.clone()
			style=format!("--card-color: {}", card.color)
		>
			<div class="bg-title" style:transform=layer(Parallax::title_transform)>
				{move || title.get()}
			</div>
			<div class="action-aura" style:transform=layer(Parallax::aura_transform)></div>
			<div class="energy-rings" style:transform=layer(Parallax::rings_transform)></div>
			<div class="character-layer" style:transform=character>
				<div class="character-glyph">{glyph}</div>
			</div>
			<div class="card-info">
				{card.species.clone().map(|s| view! { <span class="species">{s}</span> })}
				<h2 class="alien-name">{card.name.clone()}</h2>
				{card.description.clone().map(|d| view! { <p class="description">{d}</p> })}
				<ul class="stats">{stats}</ul>
				<div class="card-actions">
					<button
						class="btn-play"
						type="button"
						on:mouseenter=hover(CursorMode::Button)
						on:mouseleave=hover(CursorMode::Default)
						on:click=ripple
					>
						"Transform"
					</button>
					<button
						class="btn-info"
						type="button"
						on:mouseenter=hover(CursorMode::Button)
						on:mouseleave=hover(CursorMode::Default)
						on:click=ripple
					>
						"Details"
					</button>
				</div>
			</div>
		</article>
	}
}

#[component]
pub fn SiteFooter(text: RwSignal<String>, footer_ref: NodeRef<html::Footer>) -> impl IntoView {
	view! {
		<footer id="footer" class="site-footer" node_ref=footer_ref>
			<div class="footer-brand">"OMNITRIX DATABASE"</div>
			<p class="footer-status">
				<span id="footerTyping" class="footer-typing">{move || text.get()}</span>
				<span class="typing-caret">"|"</span>
			</p>
			<p class="footer-note">"Arrow keys jump one alien at a time."</p>
		</footer>
	}
}
