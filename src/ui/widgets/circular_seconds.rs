use femtovg::{Align, Baseline, Canvas, Paint, Path, renderer::Renderer};
use std::time::Duration;

use super::{FrameContext, LayoutContext, ThemeTransition, Widget, WidgetGeometry};
use crate::clock::mapper;
use crate::ui::theme::Theme;

// Distance from the face edge to the marker ring, matching the border inset.
const MARKER_INSET: f32 = 20.0;

// Marker font sizes at the design reference diameter; the widget scales them
// to its rendered size.
const BASE_MARKER_FONT: f32 = 16.0;
const PEAK_MARKER_FONT: f32 = 20.0;
const DESIGN_REFERENCE_DIAMETER: f32 = 300.0;

// Markers further than this never light up when animations are off.
const RESTING_OPACITY: f32 = 0.1;

/// The ring of 60 second labels around the clock face.
///
/// Each label's size, opacity and color follow its proximity to the current
/// continuous second, so the emphasis sweeps smoothly around the ring rather
/// than jumping marker to marker.
pub struct CircularSeconds {
    theme: Theme,
    theme_transition: Option<ThemeTransition>,
    theme_anim_time: f32, // 0.0..=1.0
}

impl CircularSeconds {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            theme_transition: None,
            theme_anim_time: 1.0,
        }
    }

    /// Per-marker emphasis in [0, 1] for this frame.
    ///
    /// With animations enabled this is the mapper's smooth proximity; with
    /// them disabled only the marker of the current whole second is lit, the
    /// discrete behavior of a plain clock.
    fn emphasis(frame: &FrameContext, t: f64, index: u32) -> f64 {
        if frame.settings.animations_enabled {
            let d = mapper::circular_distance(t, f64::from(index), mapper::MARKER_COUNT);
            mapper::proximity(d, frame.settings.motion_sensitivity)
        } else if index == frame.sample.second {
            1.0
        } else {
            0.0
        }
    }
}

impl Widget for CircularSeconds {
    fn render<R: Renderer>(&self, canvas: &mut Canvas<R>, rect: WidgetGeometry, frame: &FrameContext) {
        let center_x = rect.center_x();
        let center_y = rect.center_y();
        let min_dimension = rect.width.min(rect.height);
        let radius = min_dimension * 0.5 - MARKER_INSET;
        let font_scale = min_dimension / DESIGN_REFERENCE_DIAMETER;

        let t = if frame.settings.animations_enabled {
            frame.sample.continuous_time()
        } else {
            f64::from(frame.sample.second)
        };

        // Indicator line from the center to the current continuous second
        if frame.settings.show_indicator_line {
            let angle = mapper::marker_angle(t, mapper::MARKER_COUNT) as f32;
            let tip_x = center_x + angle.cos() * radius * 0.88;
            let tip_y = center_y + angle.sin() * radius * 0.88;

            let mut line_path = Path::new();
            line_path.move_to(center_x, center_y);
            line_path.line_to(tip_x, tip_y);

            let mut line_paint = Paint::color(Theme::color3(self.theme.highlight_color));
            line_paint.set_line_width(self.theme.line_width * 0.5);
            line_paint.set_anti_alias(true);
            canvas.stroke_path(&line_path, &line_paint);
        }

        for i in 0..mapper::MARKER_COUNT {
            let angle = mapper::marker_angle(f64::from(i), mapper::MARKER_COUNT) as f32;
            let x = center_x + angle.cos() * radius;
            let y = center_y + angle.sin() * radius;

            let emphasis = Self::emphasis(frame, t, i) as f32;

            // Glow disc behind strongly emphasized markers
            if emphasis > 0.5 {
                let glow_alpha =
                    (f32::from(self.theme.highlight_glow[3]) * (emphasis - 0.5) * 2.0) as u8;
                let mut glow_path = Path::new();
                glow_path.circle(x, y, PEAK_MARKER_FONT * 1.25 * font_scale);
                let glow_paint = Paint::color(Theme::color4([
                    self.theme.highlight_glow[0],
                    self.theme.highlight_glow[1],
                    self.theme.highlight_glow[2],
                    glow_alpha,
                ]));
                canvas.fill_path(&glow_path, &glow_paint);
            }

            let font_size =
                (BASE_MARKER_FONT + (PEAK_MARKER_FONT - BASE_MARKER_FONT) * emphasis) * font_scale;
            let opacity = RESTING_OPACITY + (1.0 - RESTING_OPACITY) * emphasis;
            let rgb = Theme::blend3(
                [
                    self.theme.secondary_text_color[0],
                    self.theme.secondary_text_color[1],
                    self.theme.secondary_text_color[2],
                ],
                self.theme.highlight_color,
                emphasis,
            );

            let mut marker_paint = Paint::color(Theme::color4([
                rgb[0],
                rgb[1],
                rgb[2],
                (opacity * 255.0) as u8,
            ]));
            marker_paint.set_font_size(font_size);
            marker_paint.set_text_align(Align::Center);
            marker_paint.set_text_baseline(Baseline::Middle);
            marker_paint.set_anti_alias(true);

            let _ = canvas.fill_text(x, y, &format!("{:02}", i), &marker_paint);
        }
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
    use crate::clock::ClockSample;
    use crate::settings::Settings;

    const LAYOUT: LayoutContext = LayoutContext {
        window_width: 800.0,
        window_height: 600.0,
    };

    fn frame<'a>(settings: &'a Settings, second: u32, millisecond: u32) -> FrameContext<'a> {
        FrameContext {
            sample: ClockSample {
                hour: 12,
                minute: 0,
                second,
                millisecond,
            },
            settings,
            layout: &LAYOUT,
        }
    }

    #[test]
    fn emphasis_peaks_at_current_marker() {
        let settings = Settings::default();
        let frame = frame(&settings, 30, 0);
        assert_eq!(CircularSeconds::emphasis(&frame, 30.0, 30), 1.0);
        assert!(CircularSeconds::emphasis(&frame, 30.0, 31) < 1.0);
        assert_eq!(CircularSeconds::emphasis(&frame, 30.0, 45), 0.0);
    }

    #[test]
    fn emphasis_wraps_across_minute_boundary() {
        let settings = Settings::default();
        let frame = frame(&settings, 59, 900);
        // Marker 0 is 0.1 away around the wrap; marker 58 is 1.9 away
        let near = CircularSeconds::emphasis(&frame, 59.9, 0);
        let far = CircularSeconds::emphasis(&frame, 59.9, 58);
        assert!(near > far);
        assert!(near > 0.9);
    }

    #[test]
    fn animations_off_lights_only_current_second() {
        let mut settings = Settings::default();
        settings.animations_enabled = false;
        let frame = frame(&settings, 17, 500);
        assert_eq!(CircularSeconds::emphasis(&frame, 17.0, 17), 1.0);
        assert_eq!(CircularSeconds::emphasis(&frame, 17.0, 18), 0.0);
        assert_eq!(CircularSeconds::emphasis(&frame, 17.0, 16), 0.0);
    }

    #[test]
    fn zero_sensitivity_means_no_smooth_emphasis() {
        let mut settings = Settings::default();
        settings.motion_sensitivity = 0.0;
        let frame = frame(&settings, 30, 0);
        for i in 0..mapper::MARKER_COUNT {
            assert_eq!(CircularSeconds::emphasis(&frame, 30.0, i), 0.0);
        }
    }
}
