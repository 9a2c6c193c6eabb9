use femtovg::{Canvas, Paint, Path, renderer::Renderer};
use std::time::Duration;

use super::{FrameContext, LayoutContext, ThemeTransition, Widget, WidgetGeometry};
use crate::clock::mapper::RotationTracker;
use crate::ui::theme::Theme;

const BORDER_INSET: f32 = 5.0;

/// The gradient border circle around the clock face.
///
/// The gradient axis rotates with the continuous second. A
/// [`RotationTracker`] keeps the angle cumulative so the sweep never snaps
/// backward when the seconds wrap from 59 to 0.
pub struct GradientRing {
    theme: Theme,
    tracker: RotationTracker,
    rotation_degrees: f64,
    theme_transition: Option<ThemeTransition>,
    theme_anim_time: f32,
}

impl GradientRing {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            tracker: RotationTracker::new(),
            rotation_degrees: 0.0,
            theme_transition: None,
            theme_anim_time: 1.0,
        }
    }

    /// Feed the frame's continuous time. Called once per tick, before
    /// render, only while animations are enabled; skipping it freezes the
    /// ring in place.
    pub fn advance(&mut self, continuous_time: f64) {
        self.rotation_degrees = self.tracker.displayed_degrees(continuous_time);
    }

    /// Drop accumulated rotation, e.g. when the frame driver restarts.
    /// The next `advance` starts a fresh run from whatever it samples.
    pub fn reset_motion(&mut self) {
        self.tracker.reset();
    }
}

impl Widget for GradientRing {
    fn render<R: Renderer>(&self, canvas: &mut Canvas<R>, rect: WidgetGeometry, _frame: &FrameContext) {
        let center_x = rect.center_x();
        let center_y = rect.center_y();
        let radius = rect.width.min(rect.height) * 0.5 - BORDER_INSET;

        // Gradient axis endpoints diametrically opposed at the current
        // rotation angle
        let angle = (self.rotation_degrees as f32).to_radians();
        let ax = center_x + angle.cos() * radius;
        let ay = center_y + angle.sin() * radius;
        let bx = center_x - angle.cos() * radius;
        let by = center_y - angle.sin() * radius;

        let mut ring_path = Path::new();
        ring_path.circle(center_x, center_y, radius);

        let mut ring_paint = Paint::linear_gradient(
            ax,
            ay,
            bx,
            by,
            Theme::color3(self.theme.gradient_start),
            Theme::color3(self.theme.gradient_end),
        );
        ring_paint.set_line_width(self.theme.line_width);
        ring_paint.set_anti_alias(true);
        canvas.stroke_path(&ring_path, &ring_paint);
    }

    fn on_theme_change(&mut self, _new_theme: &Theme, transition: ThemeTransition) {
        self.theme_transition = Some(transition);
        self.theme_anim_time = 0.0;
    }

    fn update(&mut self, dt: Duration) {
        if let Some(ref transition) = self.theme_transition {
            self.theme_anim_time += dt.as_secs_f32();
            let t = self.theme_anim_time.min(1.0);
            self.theme = Theme::interpolate(&transition.from, &transition.to, t);
            if t >= 1.0 {
                self.theme_transition = None;
                self.theme_anim_time = 1.0;
            }
        }
    }

    fn preferred_size(&self, ctx: &LayoutContext) -> WidgetGeometry {
        ctx.clock_face_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ColorScheme, ThemeMode};

    #[test]
    fn rotation_is_monotone_across_minute_wrap() {
        let mut ring = GradientRing::new(Theme::from_preset(ThemeMode::Dark, ColorScheme::Default));
        let mut prev = f64::NEG_INFINITY;
        for t in [58.5, 59.0, 59.5, 0.0, 0.5, 1.0] {
            ring.advance(t);
            assert!(ring.rotation_degrees > prev);
            prev = ring.rotation_degrees;
        }
    }

    #[test]
    fn reset_starts_a_fresh_run() {
        let mut ring = GradientRing::new(Theme::from_preset(ThemeMode::Dark, ColorScheme::Default));
        ring.advance(59.5);
        ring.advance(0.5); // cumulative offset engaged
        ring.reset_motion();
        ring.advance(0.5);
        assert!((ring.rotation_degrees - (0.5 * 6.0 - 90.0)).abs() < 1e-9);
    }
}
