use femtovg::{Canvas, renderer::Renderer};
use std::time::Duration;

use crate::clock::ClockSource;
use crate::settings::{ColorScheme, Settings, ThemeMode};
use crate::ui::theme::Theme;
use crate::ui::widgets::{
    FrameContext, LayoutContext, ThemeTransition, Widget, WidgetGeometry,
    circular_seconds::CircularSeconds, gradient_ring::GradientRing, paper_texture::PaperTexture,
    time_display::TimeDisplay,
};

/// Everything drawn on screen, plus the per-frame state that drives it.
///
/// Owned by the event loop; `tick` then `render` are called once per frame
/// with the settings resolved for that frame.
pub struct ClockUi {
    clock_source: ClockSource,
    paper: PaperTexture,
    ring: GradientRing,
    seconds: CircularSeconds,
    time: TimeDisplay,
    // Background clear color animates through theme changes like the widgets
    theme: Theme,
    theme_transition: Option<(Theme, Theme)>,
    theme_anim_time: f32,
    applied_preset: (ThemeMode, ColorScheme),
}

impl ClockUi {
    pub fn new(settings: &Settings) -> Self {
        let preset = (settings.theme_mode, settings.color_scheme);
        let theme = Theme::from_preset(preset.0, preset.1);
        Self {
            clock_source: ClockSource::new(&settings.time_zone),
            paper: PaperTexture::new(),
            ring: GradientRing::new(theme.clone()),
            seconds: CircularSeconds::new(theme.clone()),
            time: TimeDisplay::new(theme.clone()),
            theme,
            theme_transition: None,
            theme_anim_time: 1.0,
            applied_preset: preset,
        }
    }

    /// Apply settings changes and advance animations by `dt`.
    pub fn tick(&mut self, settings: &Settings, dt: Duration) {
        self.clock_source.set_time_zone(&settings.time_zone);

        let preset = (settings.theme_mode, settings.color_scheme);
        if preset != self.applied_preset {
            self.applied_preset = preset;
            let to = Theme::from_preset(preset.0, preset.1);
            let transition = ThemeTransition {
                from: self.theme.clone(),
                to: to.clone(),
                progress: 0.0,
            };
            self.ring.on_theme_change(&to, transition.clone());
            self.seconds.on_theme_change(&to, transition.clone());
            self.time.on_theme_change(&to, transition.clone());
            self.paper.on_theme_change(&to, transition.clone());
            self.theme_transition = Some((transition.from, to));
            self.theme_anim_time = 0.0;
        }

        if let Some((from, to)) = &self.theme_transition {
            self.theme_anim_time += dt.as_secs_f32();
            let t = self.theme_anim_time.min(1.0);
            self.theme = Theme::interpolate(from, to, t);
            if t >= 1.0 {
                self.theme_transition = None;
                self.theme_anim_time = 1.0;
            }
        }

        self.ring.update(dt);
        self.seconds.update(dt);
        self.time.update(dt);
        self.paper.update(dt);
    }

    /// Forget motion state so a restarted frame loop resumes from a fresh
    /// wall-clock sample instead of a stale rotation.
    pub fn reset_motion(&mut self) {
        self.ring.reset_motion();
    }

    pub fn render<R: Renderer>(&mut self, canvas: &mut Canvas<R>, settings: &Settings) {
        let width = canvas.width();
        let height = canvas.height();
        let layout = LayoutContext::new(width, height);

        let sample = self.clock_source.sample();
        if settings.animations_enabled {
            self.ring.advance(sample.continuous_time());
        }

        canvas.clear_rect(
            0,
            0,
            width as u32,
            height as u32,
            Theme::color3(self.theme.background_color),
        );

        let frame = FrameContext {
            sample,
            settings,
            layout: &layout,
        };
        let screen = WidgetGeometry::new(0.0, 0.0, width, height);
        let face = layout.clock_face_rect();

        if settings.paper_texture {
            self.paper.regenerate(width, height, settings.theme_mode);
            self.paper.render(canvas, screen, &frame);
        }

        self.ring.render(canvas, face, &frame);
        self.seconds.render(canvas, face, &frame);
        self.time.render(canvas, face, &frame);

        canvas.flush();
    }
}
