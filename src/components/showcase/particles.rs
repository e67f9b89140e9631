//! Starfield, section background and burst particle simulation.
//!
//! All three sets advance in fixed per-frame steps. None of them touch the
//! canvas; `render` reads them after each tick.

use std::f64::consts::TAU;

use fastrand::Rng;

use super::theme::Color;

/// Uniform sample in `[-half, half)`.
fn spread(rng: &mut Rng, half: f64) -> f64 {
	(rng.f64() - 0.5) * 2.0 * half
}

/// A single background star.
#[derive(Clone, Debug)]
pub struct Star {
	/// Position in canvas px.
	pub x: f64,
	/// Vertical position in canvas px.
	pub y: f64,
	/// Drift per frame.
	pub vx: f64,
	/// Vertical drift per frame.
	pub vy: f64,
	/// Radius in px.
	pub size: f64,
	/// Peak opacity before pulse modulation.
	pub opacity: f64,
	/// Pulse phase in radians.
	pub phase: f64,
	/// Phase advance per frame.
	pub pulse_speed: f64,
}

impl Star {
	/// Pulse intensity in `[0, 1]`.
	pub fn pulse(&self) -> f64 {
		(self.phase.sin() + 1.0) / 2.0
	}
}

/// The full-viewport starfield.
pub struct StarField {
	/// Every star, in draw order.
	pub stars: Vec<Star>,
	width: f64,
	height: f64,
}

impl StarField {
	/// Scatter `count` stars uniformly over a `width` x `height` viewport.
	pub fn new(rng: &mut Rng, count: usize, width: f64, height: f64) -> Self {
		let stars = (0..count)
			.map(|_| Star {
				x: rng.f64() * width,
				y: rng.f64() * height,
				vx: spread(rng, 0.25),
				vy: spread(rng, 0.25),
				size: rng.f64() * 2.5,
				opacity: rng.f64(),
				phase: rng.f64() * TAU,
				pulse_speed: 0.01 + rng.f64() * 0.02,
			})
			.collect();

		Self {
			stars,
			width,
			height,
		}
	}

	/// Advance every star by one frame, wrapping to the opposite edge.
	pub fn update(&mut self) {
		for s in &mut self.stars {
			s.phase += s.pulse_speed;
			s.x += s.vx;
			s.y += s.vy;

			if s.x < 0.0 {
				s.x = self.width;
			} else if s.x > self.width {
				s.x = 0.0;
			}
			if s.y < 0.0 {
				s.y = self.height;
			} else if s.y > self.height {
				s.y = 0.0;
			}
		}
	}

	/// Viewport size the field wraps within.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

/// A long-lived section background particle.
#[derive(Clone, Debug)]
pub struct AmbientParticle {
	/// Horizontal position in canvas px.
	pub x: f64,
	/// Vertical position in canvas px.
	pub y: f64,
	/// Horizontal drift per frame.
	pub vx: f64,
	/// Vertical drift per frame.
	pub vy: f64,
	/// Core radius in px; the halo scales from it.
	pub size: f64,
	/// Opacity at the middle of the pulse.
	pub base_opacity: f64,
	/// Pulse phase in radians.
	pub phase: f64,
	/// Phase advance per frame.
	pub pulse_speed: f64,
}

impl AmbientParticle {
	/// Pulse-modulated opacity clamped to `[0, 1]`.
	pub fn alpha(&self) -> f64 {
		let pulse = 0.55 + (self.phase.sin() + 1.0) * 0.225;
		(self.base_opacity * pulse).clamp(0.0, 1.0)
	}
}

/// Red drifting particles shown behind the character section.
pub struct AmbientField {
	/// Every particle, in draw order.
	pub particles: Vec<AmbientParticle>,
	width: f64,
	height: f64,
	margin: f64,
}

impl AmbientField {
	/// Scatter `count` particles; they wrap once `margin` px outside the viewport.
	pub fn new(rng: &mut Rng, count: usize, width: f64, height: f64, margin: f64) -> Self {
		let particles = (0..count)
			.map(|_| AmbientParticle {
				x: rng.f64() * width,
				y: rng.f64() * height,
				vx: spread(rng, 0.09),
				vy: spread(rng, 0.06),
				size: rng.f64() * 2.0 + 0.6,
				base_opacity: rng.f64() * 0.35 + 0.08,
				phase: rng.f64() * TAU,
				pulse_speed: 0.008 + rng.f64() * 0.02,
			})
			.collect();

		Self {
			particles,
			width,
			height,
			margin,
		}
	}

	/// Advance one frame. Particles may drift `margin` px past an edge before wrapping.
	pub fn update(&mut self) {
		let m = self.margin;
		for p in &mut self.particles {
			p.phase += p.pulse_speed;
			p.x += p.vx;
			p.y += p.vy;

			if p.x < -m {
				p.x = self.width + m;
			} else if p.x > self.width + m {
				p.x = -m;
			}
			if p.y < -m {
				p.y = self.height + m;
			} else if p.y > self.height + m {
				p.y = -m;
			}
		}
	}
}

/// A transient particle emitted by a burst.
#[derive(Clone, Debug)]
pub struct BurstParticle {
	/// Horizontal position in canvas px.
	pub x: f64,
	/// Vertical position in canvas px.
	pub y: f64,
	/// Velocity per frame; gravity accumulates into `vy`.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Radius in px.
	pub size: f64,
	/// Remaining life, starts at 1.0. The particle dies once this reaches 0.
	pub life: f64,
	/// Life lost per frame.
	pub decay: f64,
	/// Fill color; alpha follows `life`.
	pub color: Color,
}

impl BurstParticle {
	fn spawn(rng: &mut Rng, x: f64, y: f64, color: Color) -> Self {
		Self {
			x,
			y,
			vx: spread(rng, 2.0),
			vy: spread(rng, 2.0),
			size: rng.f64() * 3.0 + 1.0,
			life: 1.0,
			decay: 0.01 + rng.f64() * 0.02,
			color,
		}
	}

	/// Advance one frame. Returns whether the particle is still alive.
	pub fn update(&mut self, gravity: f64) -> bool {
		self.x += self.vx;
		self.y += self.vy;
		self.vy += gravity;
		self.life -= self.decay;
		self.life > 0.0
	}
}

/// Pool of live burst particles.
///
/// Dead particles are compacted out in place each frame, so the backing
/// allocation grows to the largest concurrent burst load and is then reused.
#[derive(Default)]
pub struct BurstPool {
	particles: Vec<BurstParticle>,
}

impl BurstPool {
	/// Empty pool with room for `capacity` particles.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			particles: Vec::with_capacity(capacity),
		}
	}

	/// Emit `count` particles at `(x, y)`.
	pub fn burst(&mut self, rng: &mut Rng, x: f64, y: f64, color: Color, count: usize) {
		self.particles.reserve(count);
		for _ in 0..count {
			self.particles.push(BurstParticle::spawn(rng, x, y, color));
		}
	}

	/// Advance every particle and drop the dead ones.
	pub fn update(&mut self, gravity: f64) {
		self.particles.retain_mut(|p| p.update(gravity));
	}

	/// Live particles in emission order.
	pub fn iter(&self) -> impl Iterator<Item = &BurstParticle> {
		self.particles.iter()
	}

	/// Live particle count.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether no particle is alive.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Allocated slots, live or not.
	pub fn capacity(&self) -> usize {
		self.particles.capacity()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stars_stay_inside_viewport() {
		let mut rng = Rng::with_seed(7);
		let mut field = StarField::new(&mut rng, 300, 320.0, 200.0);
		// Push a few stars right up against the edges, heading out.
		field.stars[0].x = 0.0;
		field.stars[0].vx = -0.25;
		field.stars[1].y = 200.0;
		field.stars[1].vy = 0.25;

		for _ in 0..5_000 {
			field.update();
			for s in &field.stars {
				assert!((0.0..=320.0).contains(&s.x), "x escaped: {}", s.x);
				assert!((0.0..=200.0).contains(&s.y), "y escaped: {}", s.y);
			}
		}
	}

	#[test]
	fn star_wraps_to_opposite_edge() {
		let mut rng = Rng::with_seed(1);
		let mut field = StarField::new(&mut rng, 1, 100.0, 50.0);
		let s = &mut field.stars[0];
		(s.x, s.y, s.vx, s.vy) = (0.1, 49.9, -0.2, 0.2);

		field.update();

		assert_eq!(field.stars[0].x, 100.0);
		assert_eq!(field.stars[0].y, 0.0);
	}

	#[test]
	fn star_attributes_in_range() {
		let mut rng = Rng::with_seed(99);
		let field = StarField::new(&mut rng, 500, 800.0, 600.0);
		for s in &field.stars {
			assert!((0.0..2.5).contains(&s.size));
			assert!((0.0..1.0).contains(&s.opacity));
			assert!(s.vx.abs() <= 0.25 && s.vy.abs() <= 0.25);
			assert!((0.01..0.03).contains(&s.pulse_speed));
			assert!((0.0..=1.0).contains(&s.pulse()));
		}
	}

	#[test]
	fn ambient_wraps_with_margin_and_alpha_is_bounded() {
		let mut rng = Rng::with_seed(3);
		let mut field = AmbientField::new(&mut rng, 85, 400.0, 300.0, 50.0);
		field.particles[0].x = -49.95;
		field.particles[0].vx = -0.09;

		field.update();
		assert_eq!(field.particles[0].x, 450.0);

		for _ in 0..2_000 {
			field.update();
			for p in &field.particles {
				assert!((-50.0..=450.0).contains(&p.x));
				assert!((-50.0..=350.0).contains(&p.y));
				assert!((0.0..=1.0).contains(&p.alpha()));
			}
		}
	}

	#[test]
	fn burst_life_strictly_decreases_until_removed() {
		let mut pool = BurstPool::default();
		pool.particles.push(BurstParticle {
			x: 0.0,
			y: 0.0,
			vx: 1.0,
			vy: 0.0,
			size: 2.0,
			life: 0.05,
			decay: 0.02,
			color: Color::rgb(0, 255, 0),
		});

		let mut last = 0.05;
		for _ in 0..2 {
			pool.update(0.1);
			let p = pool.iter().next().expect("still alive");
			assert!(p.life < last);
			last = p.life;
		}
		// 0.05 - 3 * 0.02 <= 0
		pool.update(0.1);
		assert!(pool.is_empty());
	}

	#[test]
	fn gravity_bends_trajectory_down() {
		let mut pool = BurstPool::default();
		let mut rng = Rng::with_seed(5);
		pool.burst(&mut rng, 0.0, 0.0, Color::rgb(255, 0, 0), 1);
		let vy0 = pool.iter().next().unwrap().vy;
		pool.update(0.1);
		pool.update(0.1);
		let p = pool.iter().next().unwrap();
		assert!((p.vy - (vy0 + 0.2)).abs() < 1e-9);
	}

	#[test]
	fn pool_reuses_allocation_between_bursts() {
		let mut rng = Rng::with_seed(11);
		let mut pool = BurstPool::with_capacity(30);
		pool.burst(&mut rng, 10.0, 10.0, Color::rgb(0, 168, 255), 30);
		assert_eq!(pool.len(), 30);
		let cap = pool.capacity();

		// Slowest decay is 0.01 per frame.
		for _ in 0..101 {
			pool.update(0.1);
		}
		assert!(pool.is_empty());

		pool.burst(&mut rng, 0.0, 0.0, Color::rgb(0, 168, 255), 30);
		assert_eq!(pool.capacity(), cap);
		assert!(pool.iter().all(|p| p.life == 1.0 && (1.0..4.0).contains(&p.size)));
	}
}
