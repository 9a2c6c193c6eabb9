mod window;
mod render;
pub mod widgets;
pub mod theme;

use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use glutin::surface::GlSurface;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use crate::logging::UI_NAMESPACE;
use crate::settings::{Settings, SharedSettings};
use log::{debug, info, warn};

// Animated: ~60 FPS. Static: the readout only changes once a second, so a
// slow cadence is plenty.
const ANIMATED_FRAME_INTERVAL: Duration = Duration::from_millis(16);
const STATIC_FRAME_INTERVAL: Duration = Duration::from_millis(250);

pub fn run_ui(event_loop: EventLoop<()>, shared_settings: SharedSettings) {
    info!(target: UI_NAMESPACE, "Creating application window...");
    let app_window = window::AppWindow::new(&event_loop);
    info!(target: UI_NAMESPACE, "Creating femtovg context...");
    let mut femto_ctx = window::create_femtovg_context(&app_window);

    // Per-frame copy of the shared settings. Refreshed with try_lock so a
    // busy command listener can never stall a frame.
    let mut settings: Settings = shared_settings
        .try_lock()
        .map(|state| state.settings().clone())
        .unwrap_or_default();

    let mut clock_ui = render::ClockUi::new(&settings);
    let mut last_frame = Instant::now();
    let mut last_tick = Instant::now();
    let mut was_animating = settings.animations_enabled;

    info!(target: UI_NAMESPACE, "Starting event loop...");
    event_loop.run(move |event, _, control_flow| {
        let frame_interval = if settings.animations_enabled {
            ANIMATED_FRAME_INTERVAL
        } else {
            STATIC_FRAME_INTERVAL
        };

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!(target: UI_NAMESPACE, "Window close requested");
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    debug!(target: UI_NAMESPACE, "Window resized: {}x{}", size.width, size.height);
                    let width = NonZeroU32::new(size.width.max(1)).unwrap();
                    let height = NonZeroU32::new(size.height.max(1)).unwrap();
                    femto_ctx.surface.resize(&femto_ctx.gl_context, width, height);
                    femto_ctx.canvas.set_size(width.get(), height.get(), app_window.window.scale_factor() as f32);
                    app_window.window.request_redraw();
                }
                _ => (),
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                if now.duration_since(last_frame) >= frame_interval {
                    // Pick up settings changed by the command listener
                    if let Ok(state) = shared_settings.try_lock() {
                        settings = state.settings().clone();
                    }

                    // Re-enabling animations is a restart of the motion
                    // driver: resume from a fresh sample, not stale state
                    if settings.animations_enabled && !was_animating {
                        clock_ui.reset_motion();
                    }
                    was_animating = settings.animations_enabled;

                    let dt = now.duration_since(last_tick);
                    last_tick = now;
                    clock_ui.tick(&settings, dt);
                    clock_ui.render(&mut femto_ctx.canvas, &settings);

                    // Swap buffers
                    if let Err(e) = femto_ctx.surface.swap_buffers(&femto_ctx.gl_context) {
                        warn!(target: UI_NAMESPACE, "Failed to swap buffers: {:?}", e);
                    }

                    last_frame = now;
                }

                // Request next frame
                *control_flow = ControlFlow::WaitUntil(last_frame + frame_interval);
                app_window.window.request_redraw();
            }
            Event::MainEventsCleared => {
                // Only request a redraw if enough time has passed since the last frame
                let now = Instant::now();
                if now.duration_since(last_frame) >= frame_interval {
                    app_window.window.request_redraw();
                }
            }
            _ => {
                *control_flow = ControlFlow::Poll;
            }
        }
    });
}
