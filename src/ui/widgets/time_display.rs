use femtovg::{Align, Baseline, Canvas, Paint, renderer::Renderer};
use std::time::Duration;

use super::{FrameContext, LayoutContext, ThemeTransition, Widget, WidgetGeometry};
use crate::clock::{format_time, is_am};
use crate::ui::theme::Theme;

const MERIDIEM_FONT: f32 = 14.0;

/// The digital HH:MM readout in the center of the face, with an AM/PM tag
/// in 12-hour mode.
pub struct TimeDisplay {
    theme: Theme,
    theme_transition: Option<ThemeTransition>,
    theme_anim_time: f32,
}

impl TimeDisplay {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            theme_transition: None,
            theme_anim_time: 1.0,
        }
    }
}

impl Widget for TimeDisplay {
    fn render<R: Renderer>(&self, canvas: &mut Canvas<R>, rect: WidgetGeometry, frame: &FrameContext) {
        let center_x = rect.center_x();
        let center_y = rect.center_y();
        // Breakpoint-tiered font size, from the window rather than the face
        let time_font = frame.layout.time_font_size();

        let text = format_time(&frame.sample, frame.settings.is_24_hour);

        let mut time_paint = Paint::color(Theme::color3(self.theme.text_color));
        time_paint.set_font_size(time_font);
        time_paint.set_text_align(Align::Center);
        time_paint.set_text_baseline(Baseline::Middle);
        time_paint.set_anti_alias(true);
        let _ = canvas.fill_text(center_x, center_y, &text, &time_paint);

        if !frame.settings.is_24_hour {
            let tag = if is_am(&frame.sample) { "AM" } else { "PM" };
            let mut tag_paint = Paint::color(Theme::color4(self.theme.secondary_text_color));
            tag_paint.set_font_size(frame.layout.scale_font_size(MERIDIEM_FONT));
            tag_paint.set_text_align(Align::Center);
            tag_paint.set_text_baseline(Baseline::Top);
            tag_paint.set_anti_alias(true);
            let _ = canvas.fill_text(center_x, center_y + time_font * 0.55, tag, &tag_paint);
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
