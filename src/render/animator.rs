//! Background particle field.
//!
//! A fixed set of small dots drifting at constant velocity over the whole
//! window. Each frame moves every particle by its velocity, wraps it to the
//! opposite edge when it leaves the surface, and paints it.
//! - No interaction between particles, no spawn/despawn.
//! - Resizing changes the surface only; positions are not rescaled.
//! - Every `Animator::start` seeds an independent layer. Starting twice
//!   without stopping draws two overlapping sets.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use super::color::Rgba;

pub const PARTICLE_COUNT: usize = 100;
pub const PARTICLE_COLOR: Rgba = Rgba::rgb(0x58, 0x65, 0xF2);

const RADIUS_MIN: f32 = 1.0;
const RADIUS_MAX: f32 = 3.0;
const SPEED_MAX: f32 = 0.25;

/// Drawing surface dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

impl From<egui::Rect> for Surface {
    fn from(rect: egui::Rect) -> Self {
        Self::new(rect.width(), rect.height())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Rgba,
    pub vx: f32,
    pub vy: f32,
}

impl Particle {
    /// Uniform position on `surface`, radius in [1, 3), each velocity
    /// component in [-0.25, 0.25).
    pub fn random<R: Rng + ?Sized>(rng: &mut R, surface: Surface, color: Rgba) -> Self {
        Self {
            x: rng.gen::<f32>() * surface.width,
            y: rng.gen::<f32>() * surface.height,
            radius: rng.gen_range(RADIUS_MIN..RADIUS_MAX),
            color,
            vx: rng.gen_range(-SPEED_MAX..SPEED_MAX),
            vy: rng.gen_range(-SPEED_MAX..SPEED_MAX),
        }
    }

    /// Move by one velocity step and wrap into the surface.
    pub fn advance(&mut self, surface: Surface) {
        self.x = wrap(self.x + self.vx, surface.width);
        self.y = wrap(self.y + self.vy, surface.height);
    }
}

/// Toroidal wrap into `[0, extent)`.
///
/// Crossing the far edge lands exactly on `0`; crossing the near edge
/// re-enters from the far side. A zero-sized extent pins to `0`.
fn wrap(v: f32, extent: f32) -> f32 {
    if v >= extent {
        0.0
    } else if v < 0.0 {
        let w = v + extent;
        if (0.0..extent).contains(&w) {
            w
        } else {
            0.0
        }
    } else {
        v
    }
}

/// One seeded set of particles bound to a surface.
#[derive(Debug, Clone)]
pub struct ParticleField {
    surface: Surface,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn seed<R: Rng + ?Sized>(
        rng: &mut R,
        surface: Surface,
        count: usize,
        color: Rgba,
    ) -> Self {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(rng, surface, color));
        }
        Self { surface, particles }
    }

    /// Advance every particle once, in insertion order.
    pub fn step(&mut self) {
        let surface = self.surface;
        for p in &mut self.particles {
            p.advance(surface);
        }
    }

    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Paint as filled circles, offset by the surface's screen origin.
    pub fn paint(&self, painter: &egui::Painter, origin: egui::Pos2) {
        for p in &self.particles {
            painter.circle_filled(
                origin + egui::vec2(p.x, p.y),
                p.radius,
                p.color.to_color32(),
            );
        }
    }
}

/// Stop switch for one running layer. Clones share the same switch.
#[derive(Debug, Clone, Default)]
pub struct AnimationHandle {
    stopped: Arc<AtomicBool>,
}

impl AnimationHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Owns the running particle layers and drives them frame by frame.
pub struct Animator {
    count: usize,
    color: Rgba,
    layers: Vec<(ParticleField, AnimationHandle)>,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(PARTICLE_COUNT, PARTICLE_COLOR)
    }
}

impl Animator {
    pub fn new(count: usize, color: Rgba) -> Self {
        Self {
            count,
            color,
            layers: Vec::new(),
        }
    }

    /// Seed a new layer on `host`. Without a host there is nothing to draw
    /// on and the call is a no-op.
    pub fn start(&mut self, host: Option<Surface>) -> Option<AnimationHandle> {
        self.start_with_rng(host, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        host: Option<Surface>,
        rng: &mut R,
    ) -> Option<AnimationHandle> {
        let Some(surface) = host else {
            log::debug!("No background host; particle field not started");
            return None;
        };

        if self.is_running() {
            log::warn!(
                "Particle field already running; layering set #{}",
                self.layers.len() + 1
            );
        }

        let field = ParticleField::seed(rng, surface, self.count, self.color);
        let handle = AnimationHandle::default();
        self.layers.push((field, handle.clone()));
        log::info!(
            "Particle field started: {} particles on {}x{}",
            self.count,
            surface.width,
            surface.height
        );
        Some(handle)
    }

    /// Resize every layer's surface. Particle positions are left as they are.
    pub fn resize(&mut self, surface: Surface) {
        for (field, _) in &mut self.layers {
            field.resize(surface);
        }
    }

    /// Drop stopped layers and advance the rest by one frame.
    pub fn step(&mut self) {
        self.layers.retain(|(_, handle)| !handle.is_stopped());
        for (field, _) in &mut self.layers {
            field.step();
        }
    }

    /// One display frame: step, then paint every live layer.
    pub fn frame(&mut self, painter: &egui::Painter, origin: egui::Pos2) {
        self.step();
        for (field, _) in &self.layers {
            field.paint(painter, origin);
        }
    }

    pub fn is_running(&self) -> bool {
        self.layers.iter().any(|(_, handle)| !handle.is_stopped())
    }

    pub fn layers(&self) -> impl Iterator<Item = &ParticleField> {
        self.layers.iter().map(|(field, _)| field)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5865F2)
    }

    fn particle(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            x,
            y,
            radius: 2.0,
            color: PARTICLE_COLOR,
            vx,
            vy,
        }
    }

    #[test]
    fn seeding_respects_ranges() {
        let surface = Surface::new(800.0, 600.0);
        let field = ParticleField::seed(&mut rng(), surface, PARTICLE_COUNT, PARTICLE_COLOR);

        assert_eq!(field.particles().len(), 100);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!((1.0..3.0).contains(&p.radius));
            assert!((-0.25..0.25).contains(&p.vx));
            assert!((-0.25..0.25).contains(&p.vy));
            assert_eq!(p.color, PARTICLE_COLOR);
        }
    }

    #[test]
    fn crossing_far_edge_lands_on_zero() {
        let surface = Surface::new(100.0, 50.0);
        let mut p = particle(99.95, 49.95, 0.15, 0.15);
        p.advance(surface);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);

        let mut q = particle(100.1, 10.0, 0.0, 0.0);
        q.advance(surface);
        assert_eq!(q.x, 0.0);
    }

    #[test]
    fn crossing_near_edge_reenters_far_side() {
        let surface = Surface::new(100.0, 50.0);
        let mut p = particle(0.1, 0.05, -0.2, -0.1);
        p.advance(surface);
        assert!((p.x - 99.9).abs() < 1e-4);
        assert!((p.y - 49.95).abs() < 1e-4);
        assert!(p.x < surface.width && p.y < surface.height);
    }

    #[test]
    fn interior_motion_is_plain_addition() {
        let mut p = particle(10.0, 20.0, 0.25, -0.25);
        p.advance(Surface::new(100.0, 100.0));
        assert_eq!((p.x, p.y), (10.25, 19.75));
    }

    #[test]
    fn zero_surface_pins_to_origin() {
        let mut p = particle(5.0, 5.0, -0.1, 0.1);
        p.advance(Surface::new(0.0, 0.0));
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn positions_stay_in_bounds_over_many_frames() {
        let surface = Surface::new(320.0, 240.0);
        let mut field = ParticleField::seed(&mut rng(), surface, 50, PARTICLE_COLOR);
        for _ in 0..5_000 {
            field.step();
        }
        for p in field.particles() {
            assert!((0.0..320.0).contains(&p.x), "x out of bounds: {}", p.x);
            assert!((0.0..240.0).contains(&p.y), "y out of bounds: {}", p.y);
        }
    }

    #[test]
    fn missing_host_is_noop() {
        let mut animator = Animator::default();
        assert!(animator.start_with_rng(None, &mut rng()).is_none());
        assert_eq!(animator.layer_count(), 0);
        assert!(!animator.is_running());

        animator.resize(Surface::new(1024.0, 768.0));
        animator.step();
        assert_eq!(animator.layer_count(), 0);
    }

    #[test]
    fn resize_keeps_positions() {
        let mut animator = Animator::default();
        animator.start_with_rng(Some(Surface::new(800.0, 600.0)), &mut rng());
        let before: Vec<(f32, f32)> = animator
            .layers()
            .flat_map(|f| f.particles().iter().map(|p| (p.x, p.y)))
            .collect();

        animator.resize(Surface::new(200.0, 100.0));

        let field = animator.layers().next().unwrap();
        assert_eq!(field.surface(), Surface::new(200.0, 100.0));
        let after: Vec<(f32, f32)> = field.particles().iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn outside_after_shrink_wraps_on_next_step() {
        let mut field = ParticleField::seed(&mut rng(), Surface::new(800.0, 600.0), 1, PARTICLE_COLOR);
        field.particles_mut()[0] = particle(700.0, 500.0, 0.1, 0.1);
        field.resize(Surface::new(200.0, 100.0));
        assert_eq!(field.particles()[0].x, 700.0);

        field.step();
        assert_eq!((field.particles()[0].x, field.particles()[0].y), (0.0, 0.0));
    }

    #[test]
    fn double_start_layers_two_sets() {
        let mut animator = Animator::default();
        let surface = Some(Surface::new(640.0, 480.0));
        let first = animator.start_with_rng(surface, &mut rng()).unwrap();
        let _second = animator.start_with_rng(surface, &mut rng()).unwrap();
        assert_eq!(animator.layer_count(), 2);

        first.stop();
        assert!(animator.is_running());
        animator.step();
        assert_eq!(animator.layer_count(), 1);
    }

    #[test]
    fn stop_ends_animation() {
        let mut animator = Animator::new(10, PARTICLE_COLOR);
        let handle = animator
            .start_with_rng(Some(Surface::new(100.0, 100.0)), &mut rng())
            .unwrap();
        handle.clone().stop();
        assert!(handle.is_stopped());
        assert!(!animator.is_running());
        animator.step();
        assert_eq!(animator.layer_count(), 0);
    }

    #[test]
    fn zero_particles_resize_and_step() {
        let mut animator = Animator::new(0, PARTICLE_COLOR);
        animator.start_with_rng(Some(Surface::new(100.0, 100.0)), &mut rng());
        animator.resize(Surface::new(0.0, 0.0));
        animator.step();
        assert_eq!(animator.layers().next().unwrap().particles().len(), 0);
    }
}
