use femtovg::{Canvas, renderer::Renderer};
use std::time::Duration;

use crate::clock::ClockSample;
use crate::settings::Settings;
use crate::ui::theme::Theme;

pub mod circular_seconds;
pub mod gradient_ring;
pub mod paper_texture;
pub mod time_display;

/// Defines the position and size of a widget
#[derive(Debug, Clone, Copy)]
pub struct WidgetGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WidgetGeometry {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Everything a widget needs for one frame, resolved once per tick and
/// passed down explicitly. Widgets never reach into shared state; theme
/// colors live in the widgets themselves so transitions can animate.
pub struct FrameContext<'a> {
    pub sample: ClockSample,
    pub settings: &'a Settings,
    pub layout: &'a LayoutContext,
}

/// Information about the current layout context (window size, breakpoints)
#[derive(Debug, Clone)]
pub struct LayoutContext {
    pub window_width: f32,
    pub window_height: f32,
}

// Breakpoints and scaling carried over from the phone layout the design
// started on; 375 is the reference width the font sizes were tuned for.
const BASE_WIDTH: f32 = 375.0;
const TABLET_WIDTH: f32 = 768.0;
const LARGE_WIDTH: f32 = 1024.0;
const MAX_FONT_SCALE: f32 = 1.5;

impl LayoutContext {
    pub fn new(window_width: f32, window_height: f32) -> Self {
        Self {
            window_width,
            window_height,
        }
    }

    pub fn is_large(&self) -> bool {
        self.window_width >= LARGE_WIDTH
    }

    pub fn is_tablet(&self) -> bool {
        self.window_width >= TABLET_WIDTH
    }

    pub fn is_small(&self) -> bool {
        self.window_width < BASE_WIDTH
    }

    /// Scale a font designed for the reference width, capped so text does
    /// not balloon on wide windows.
    pub fn scale_font_size(&self, size: f32) -> f32 {
        let scale = (self.window_width / BASE_WIDTH).min(MAX_FONT_SCALE);
        (size * scale).round()
    }

    /// Diameter of the clock face. Proportionally smaller on larger
    /// windows so the face never dominates the screen.
    pub fn clock_diameter(&self) -> f32 {
        let min_dimension = self.window_width.min(self.window_height);
        let ratio = if self.is_large() {
            0.35
        } else if self.is_tablet() {
            0.4
        } else if self.is_small() {
            0.5
        } else {
            0.45
        };
        min_dimension * ratio
    }

    /// Font size for the central HH:MM readout.
    pub fn time_font_size(&self) -> f32 {
        let base = if self.is_large() {
            56.0
        } else if self.is_tablet() {
            52.0
        } else if self.is_small() {
            40.0
        } else {
            48.0
        };
        self.scale_font_size(base)
    }

    /// Square geometry for the clock face, centered in the window.
    pub fn clock_face_rect(&self) -> WidgetGeometry {
        let diameter = self.clock_diameter();
        WidgetGeometry::new(
            (self.window_width - diameter) / 2.0,
            (self.window_height - diameter) / 2.0,
            diameter,
            diameter,
        )
    }
}

/// Information about a theme transition (for interpolation)
#[derive(Debug, Clone)]
pub struct ThemeTransition {
    pub from: Theme,
    pub to: Theme,
    pub progress: f32, // 0.0..=1.0
}

/// Base trait for all clock widgets
pub trait Widget {
    /// Render the widget inside the given rectangle.
    fn render<R: Renderer>(
        &self,
        canvas: &mut Canvas<R>,
        rect: WidgetGeometry,
        frame: &FrameContext,
    );

    /// Called when the theme mode or color scheme changes.
    fn on_theme_change(&mut self, new_theme: &Theme, transition: ThemeTransition);

    /// Called every frame to update internal state (e.g., for animations).
    fn update(&mut self, dt: Duration);

    /// Widgets can suggest their preferred size for layout.
    fn preferred_size(&self, ctx: &LayoutContext) -> WidgetGeometry;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_tiers() {
        assert!(LayoutContext::new(320.0, 600.0).is_small());
        assert!(!LayoutContext::new(500.0, 600.0).is_small());
        assert!(LayoutContext::new(800.0, 600.0).is_tablet());
        assert!(LayoutContext::new(1280.0, 720.0).is_large());
        assert!(LayoutContext::new(1280.0, 720.0).is_tablet());
    }

    #[test]
    fn clock_diameter_follows_min_dimension() {
        // 800x600 window hits the tablet tier: 600 * 0.4
        let ctx = LayoutContext::new(800.0, 600.0);
        assert_eq!(ctx.clock_diameter(), 240.0);

        // Default tier: 500 * 0.45
        let ctx = LayoutContext::new(500.0, 700.0);
        assert_eq!(ctx.clock_diameter(), 225.0);
    }

    #[test]
    fn font_scaling_is_capped() {
        let narrow = LayoutContext::new(375.0, 600.0);
        assert_eq!(narrow.scale_font_size(48.0), 48.0);

        // 4x reference width still only scales 1.5x
        let wide = LayoutContext::new(1500.0, 900.0);
        assert_eq!(wide.scale_font_size(48.0), 72.0);
    }

    #[test]
    fn clock_face_rect_is_centered_square() {
        let ctx = LayoutContext::new(800.0, 600.0);
        let rect = ctx.clock_face_rect();
        assert_eq!(rect.width, rect.height);
        assert_eq!(rect.center_x(), 400.0);
        assert_eq!(rect.center_y(), 300.0);
    }
}
