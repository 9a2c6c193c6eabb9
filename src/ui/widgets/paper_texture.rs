use femtovg::{Canvas, Color, Paint, Path, renderer::Renderer};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::{FrameContext, LayoutContext, ThemeTransition, Widget, WidgetGeometry};
use crate::settings::ThemeMode;
use crate::ui::theme::Theme;

// Fixed seed so the texture is identical across runs
const PAPER_SEED: u64 = 42;

const FIBER_COUNT: usize = 200;
const PULP_COUNT: usize = 80;
const GRAIN_COUNT: usize = 150;

struct Fiber {
    x1: f32,
    y1: f32,
    cx: f32,
    cy: f32,
    x2: f32,
    y2: f32,
    stroke_width: f32,
    alpha: u8,
}

struct Pulp {
    x: f32,
    y: f32,
    radius: f32,
    alpha: u8,
}

struct Grain {
    x: f32,
    y: f32,
    rx: f32,
    ry: f32,
    rotation: f32,
    alpha: u8,
}

/// Optional hand-made-paper backdrop: fibers, pulp clusters and grain
/// speckles, generated once from a fixed seed and redrawn as static
/// geometry. Regenerated only when the window size or theme mode changes.
pub struct PaperTexture {
    fibers: Vec<Fiber>,
    pulp: Vec<Pulp>,
    grain: Vec<Grain>,
    fiber_color: [u8; 3],
    pulp_color: [u8; 3],
    grain_color: [u8; 3],
    generated_for: Option<(u32, u32, ThemeMode)>,
}

impl PaperTexture {
    pub fn new() -> Self {
        Self {
            fibers: Vec::new(),
            pulp: Vec::new(),
            grain: Vec::new(),
            fiber_color: [255, 255, 255],
            pulp_color: [255, 255, 255],
            grain_color: [255, 255, 255],
            generated_for: None,
        }
    }

    /// Rebuild the speckle geometry if the window or theme mode changed.
    pub fn regenerate(&mut self, width: f32, height: f32, mode: ThemeMode) {
        let key = (width as u32, height as u32, mode);
        if self.generated_for == Some(key) {
            return;
        }
        self.generated_for = Some(key);

        // Dark paper gets faint white structure, light paper warm browns
        match mode {
            ThemeMode::Dark => {
                self.fiber_color = [255, 255, 255];
                self.pulp_color = [255, 255, 255];
                self.grain_color = [255, 255, 255];
            }
            ThemeMode::Light => {
                self.fiber_color = [139, 69, 19];
                self.pulp_color = [210, 180, 140];
                self.grain_color = [160, 130, 98];
            }
        }

        let mut rng = SmallRng::seed_from_u64(PAPER_SEED);

        self.fibers.clear();
        for _ in 0..FIBER_COUNT {
            let x1 = rng.gen_range(0.0..width);
            let y1 = rng.gen_range(0.0..height);
            let length = rng.gen_range(20.0..80.0_f32);
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let x2 = x1 + angle.cos() * length;
            let y2 = y1 + angle.sin() * length;
            // Bend the fiber midpoint a little so it reads as organic
            let cx = (x1 + x2) / 2.0 + rng.gen_range(-7.5..7.5);
            let cy = (y1 + y2) / 2.0 + rng.gen_range(-7.5..7.5);
            self.fibers.push(Fiber {
                x1,
                y1,
                cx,
                cy,
                x2,
                y2,
                stroke_width: rng.gen_range(0.2..1.0),
                alpha: (rng.gen_range(0.02..0.08_f32) * 255.0) as u8,
            });
        }

        self.pulp.clear();
        for _ in 0..PULP_COUNT {
            self.pulp.push(Pulp {
                x: rng.gen_range(0.0..width),
                y: rng.gen_range(0.0..height),
                radius: rng.gen_range(3.0..15.0),
                alpha: (rng.gen_range(0.01..0.06_f32) * 255.0) as u8,
            });
        }

        self.grain.clear();
        for _ in 0..GRAIN_COUNT {
            self.grain.push(Grain {
                x: rng.gen_range(0.0..width),
                y: rng.gen_range(0.0..height),
                rx: rng.gen_range(1.0..5.0),
                ry: rng.gen_range(0.5..2.5),
                rotation: rng.gen_range(0.0..std::f32::consts::PI),
                alpha: (rng.gen_range(0.005..0.035_f32) * 255.0) as u8,
            });
        }
    }
}

impl Widget for PaperTexture {
    fn render<R: Renderer>(&self, canvas: &mut Canvas<R>, _rect: WidgetGeometry, _frame: &FrameContext) {
        for grain in &self.grain {
            canvas.save();
            canvas.translate(grain.x, grain.y);
            canvas.rotate(grain.rotation);
            let mut path = Path::new();
            path.ellipse(0.0, 0.0, grain.rx, grain.ry);
            let c = self.grain_color;
            let paint = Paint::color(Color::rgba(c[0], c[1], c[2], grain.alpha));
            canvas.fill_path(&path, &paint);
            canvas.restore();
        }

        for pulp in &self.pulp {
            let mut path = Path::new();
            path.circle(pulp.x, pulp.y, pulp.radius);
            let c = self.pulp_color;
            let paint = Paint::color(Color::rgba(c[0], c[1], c[2], pulp.alpha));
            canvas.fill_path(&path, &paint);
        }

        for fiber in &self.fibers {
            let mut path = Path::new();
            path.move_to(fiber.x1, fiber.y1);
            path.quad_to(fiber.cx, fiber.cy, fiber.x2, fiber.y2);
            let c = self.fiber_color;
            let mut paint = Paint::color(Color::rgba(c[0], c[1], c[2], fiber.alpha));
            paint.set_line_width(fiber.stroke_width);
            paint.set_anti_alias(true);
            canvas.stroke_path(&path, &paint);
        }
    }

    fn on_theme_change(&mut self, _new_theme: &Theme, _transition: ThemeTransition) {
        // Colors are picked at regeneration time from the theme mode; the
        // next regenerate call after a mode flip rebuilds the texture.
    }

    fn update(&mut self, _dt: Duration) {}

    fn preferred_size(&self, ctx: &LayoutContext) -> WidgetGeometry {
        WidgetGeometry::new(0.0, 0.0, ctx.window_width, ctx.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let mut a = PaperTexture::new();
        let mut b = PaperTexture::new();
        a.regenerate(800.0, 600.0, ThemeMode::Dark);
        b.regenerate(800.0, 600.0, ThemeMode::Dark);
        assert_eq!(a.fibers.len(), FIBER_COUNT);
        assert_eq!(a.fibers[0].x1, b.fibers[0].x1);
        assert_eq!(a.grain[42].rotation, b.grain[42].rotation);
    }

    #[test]
    fn regenerate_is_a_no_op_for_same_key() {
        let mut texture = PaperTexture::new();
        texture.regenerate(800.0, 600.0, ThemeMode::Dark);
        let first = texture.fibers[0].x1;
        texture.regenerate(800.0, 600.0, ThemeMode::Dark);
        assert_eq!(texture.fibers[0].x1, first);
    }

    #[test]
    fn mode_flip_swaps_palette() {
        let mut texture = PaperTexture::new();
        texture.regenerate(800.0, 600.0, ThemeMode::Dark);
        assert_eq!(texture.fiber_color, [255, 255, 255]);
        texture.regenerate(800.0, 600.0, ThemeMode::Light);
        assert_eq!(texture.fiber_color, [139, 69, 19]);
    }
}
