//! The per-tick particle state machine.

use std::time::Duration;

use rand::Rng;
use tracing::debug;
use wind_common::{FlowError, FlowResult};
use wind_field::{Field, FieldVector};

use crate::segment::{FrameBatches, Segment};

/// Animation tuning. Defaults are the reference deployment's values.
#[derive(Debug, Clone)]
pub struct ParticleSettings {
    /// Number of concurrently live particles.
    pub count: usize,
    /// Ticks a particle lives before it respawns at a random field cell.
    pub max_age: u32,
    /// Multiplier applied to the field vector per tick of travel.
    pub velocity_scale: f64,
    /// Speed mapped to the last style bucket; faster cells clamp to it.
    pub max_speed: f64,
    /// Number of style buckets segments are grouped into.
    pub style_count: usize,
    /// Alpha kept per frame by the trail fade.
    pub fade_retain: f32,
    /// Stroke width for trail segments.
    pub line_width: f32,
    /// Target interval between ticks.
    pub frame_interval: Duration,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 5000,
            max_age: 30,
            velocity_scale: 1.0,
            max_speed: 17.0,
            style_count: 186,
            fade_retain: 0.93,
            line_width: 0.75,
            frame_interval: Duration::from_millis(40),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    x: f64,
    y: f64,
    age: u32,
}

/// Advects particles through a completed [`Field`] and emits one batch of
/// drawable segments per tick. Particle state is exclusively owned here;
/// the field is only read.
pub struct ParticleSystem {
    settings: ParticleSettings,
    particles: Vec<Particle>,
    batches: FrameBatches,
}

impl ParticleSystem {
    /// Seed `settings.count` particles at random defined field cells with
    /// ages scattered over `[0, max_age)` so respawns stay staggered.
    ///
    /// Fails with [`FlowError::NoData`] when the field has no defined
    /// cells to spawn into.
    pub fn new<R: Rng + ?Sized>(
        field: &Field,
        settings: ParticleSettings,
        rng: &mut R,
    ) -> FlowResult<Self> {
        if field.defined_cells() == 0 {
            return Err(FlowError::NoData);
        }
        let particles = (0..settings.count)
            .map(|_| {
                let (x, y) = field
                    .random_point(rng)
                    .expect("non-empty field yields spawn points");
                Particle {
                    x: x as f64,
                    y: y as f64,
                    age: rng.gen_range(0..settings.max_age.max(1)),
                }
            })
            .collect();
        let batches = FrameBatches::new(settings.style_count);
        debug!(
            particles = settings.count,
            styles = settings.style_count,
            "particle system ready"
        );
        Ok(Self {
            settings,
            particles,
            batches,
        })
    }

    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Advance every particle one step and return this frame's batches.
    ///
    /// Per particle: respawn when over age; an `Absent` cell under the
    /// particle means it escaped the field, which forces a respawn on the
    /// next tick; otherwise move along the local vector, and emit a
    /// segment only when both the current cell and the rounded target cell
    /// are visible. Movement through hidden cells is silent.
    pub fn tick<R: Rng + ?Sized>(&mut self, field: &Field, rng: &mut R) -> &FrameBatches {
        self.batches.clear();
        let max_age = self.settings.max_age;
        let scale = self.settings.velocity_scale;
        let max_speed = self.settings.max_speed;
        let style_count = self.settings.style_count;
        let batches = &mut self.batches;

        for particle in &mut self.particles {
            if particle.age > max_age {
                if let Some((x, y)) = field.random_point(rng) {
                    particle.x = x as f64;
                    particle.y = y as f64;
                    particle.age = 0;
                }
            }

            let fx = particle.x.round() as i32;
            let fy = particle.y.round() as i32;
            let cell = field.at(fx, fy);
            let Some(v) = cell.vector() else {
                // Escaped the field entirely.
                particle.age = max_age + 1;
                continue;
            };

            let xt = particle.x + v.x * scale;
            let yt = particle.y + v.y * scale;

            if let FieldVector::Visible { magnitude, .. } = cell {
                let tx = xt.round() as i32;
                let ty = yt.round() as i32;
                if field.at(tx, ty).is_visible() {
                    let style = style_index(magnitude, max_speed, style_count);
                    batches.push(
                        style,
                        Segment {
                            x0: fx,
                            y0: fy,
                            x1: tx,
                            y1: ty,
                        },
                    );
                }
            }

            particle.x = xt;
            particle.y = yt;
            particle.age += 1;
        }

        &self.batches
    }

    #[cfg(test)]
    fn particle(&self, i: usize) -> (f64, f64, u32) {
        let p = self.particles[i];
        (p.x, p.y, p.age)
    }
}

/// Map a speed onto a style bucket: clamp to `[0, max_speed]`, then scale
/// linearly over the palette.
fn style_index(magnitude: f64, max_speed: f64, style_count: usize) -> usize {
    let clamped = magnitude.min(max_speed).max(0.0);
    let last = (style_count - 1) as f64;
    ((clamped / max_speed) * last).floor() as usize
}
