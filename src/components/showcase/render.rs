//! Canvas rendering for the starfield and particle layers.
//!
//! Drawing order, back to front:
//! 1. Stars (with halos for the larger ones) in the current scene color
//! 2. Section background particles, when enabled
//! 3. Burst particles

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::particles::{AmbientField, BurstPool, StarField};
use super::state::ShowcaseState;
use super::theme::{AmbientStyle, Color, StarStyle};

/// Renders one full frame to the canvas.
pub fn render(state: &ShowcaseState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);

	draw_stars(ctx, &state.stars, &state.theme.stars, state.current_color);

	if state.ambient_enabled {
		draw_ambient(ctx, &state.ambient, &state.theme.ambient);
	}

	draw_bursts(ctx, &state.bursts);
}

fn fill_circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: Color) {
	ctx.set_fill_style_str(&color.to_css());
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, TAU);
	ctx.fill();
}

fn draw_stars(ctx: &CanvasRenderingContext2d, field: &StarField, style: &StarStyle, color: Color) {
	for s in &field.stars {
		let opacity = s.opacity * (style.pulse_floor + s.pulse() * (1.0 - style.pulse_floor));
		fill_circle(ctx, s.x, s.y, s.size, color.with_alpha(opacity));

		if s.size > style.halo_threshold {
			fill_circle(
				ctx,
				s.x,
				s.y,
				s.size * style.halo_radius,
				color.with_alpha(style.halo_alpha),
			);
		}
	}
}

fn draw_ambient(ctx: &CanvasRenderingContext2d, field: &AmbientField, style: &AmbientStyle) {
	for p in &field.particles {
		let a = p.alpha();
		fill_circle(ctx, p.x, p.y, p.size, style.color.with_alpha(a));
		fill_circle(
			ctx,
			p.x,
			p.y,
			p.size * style.halo_radius,
			style.color.with_alpha(a * style.halo_alpha_scale),
		);
	}
}

fn draw_bursts(ctx: &CanvasRenderingContext2d, bursts: &BurstPool) {
	for p in bursts.iter() {
		fill_circle(ctx, p.x, p.y, p.size, p.color.with_alpha(p.life));
	}
}
