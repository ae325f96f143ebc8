// ============================================================================
// DESKTOP HOST
// ============================================================================

use bon::Builder;
use pixels::{Pixels, SurfaceTexture};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::canvas::Canvas;
use crate::config::{Color, DisplayMetrics, GaugeAttributes};
use crate::error::Result;
use crate::gauge::StepGauge;
use crate::geometry::MeasureSpec;
use crate::scene::{DrawCommand, Scene};
use crate::text::GlyphFont;

/// Property updates sent to a running gauge from another thread
#[derive(Debug, Clone, PartialEq)]
pub enum GaugeCommand {
    SetCurrStep(u32),
    SetMaxStep(u32),
    SetInnerColor(Color),
    SetOuterColor(Color),
    SetTextColor(Color),
    /// Physical pixels
    SetBorderWidth(f32),
    /// Physical pixels
    SetTextSize(f32),
}

impl GaugeCommand {
    pub fn apply(self, gauge: &mut StepGauge) {
        match self {
            GaugeCommand::SetCurrStep(step) => gauge.set_curr_step(step),
            GaugeCommand::SetMaxStep(max) => gauge.set_max_step(max),
            GaugeCommand::SetInnerColor(color) => gauge.set_inner_color(color),
            GaugeCommand::SetOuterColor(color) => gauge.set_outer_color(color),
            GaugeCommand::SetTextColor(color) => gauge.set_text_color(color),
            GaugeCommand::SetBorderWidth(width) => gauge.set_border_width(width),
            GaugeCommand::SetTextSize(size) => gauge.set_text_size(size),
        }
    }
}

/// Apply every command queued on `receiver` without blocking
pub fn drain_commands(gauge: &mut StepGauge, receiver: &Receiver<GaugeCommand>) -> usize {
    let mut applied = 0;
    while let Ok(command) = receiver.try_recv() {
        log::debug!("Applying {:?}", command);
        command.apply(gauge);
        applied += 1;
    }
    applied
}

/// A window showing one step gauge
#[derive(Builder)]
pub struct GaugeWindow {
    font: GlyphFont,
    #[builder(default)]
    attributes: GaugeAttributes,
    #[builder(default = "Step Gauge".to_string())]
    title: String,
    /// Logical pixels
    #[builder(default = 300)]
    window_size: u32,
    #[builder(default = 60.0)]
    max_framerate: f64,
    #[builder(default = Color::WHITE)]
    background: Color,
}

impl GaugeWindow {
    pub fn show(self) -> Result<()> {
        self.run(None)
    }

    pub fn show_with_commands(self, receiver: Receiver<GaugeCommand>) -> Result<()> {
        self.run(Some(receiver))
    }

    fn run(self, receiver: Option<Receiver<GaugeCommand>>) -> Result<()> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(
                self.window_size as f64,
                self.window_size as f64,
            ))
            .build(&event_loop)?;
        let window = std::sync::Arc::new(window);

        let metrics = DisplayMetrics::from_scale_factor(window.scale_factor());
        log::debug!("Display density {}", metrics.density);
        let mut gauge = StepGauge::new(&self.attributes, metrics);

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width.max(1), size.height.max(1), surface_texture)?;
        let mut side = fit_to_surface(&mut gauge, &mut pixels, size).unwrap_or(1);

        let frame_duration = Duration::from_secs_f64(1.0 / self.max_framerate.max(1.0));
        let mut last_frame = Instant::now();
        let window_clone = window.clone();

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Some(new_side) = fit_to_surface(&mut gauge, &mut pixels, new_size) {
                        side = new_side;
                    }
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    log::debug!("Scale factor changed to {}", scale_factor);
                }
                WindowEvent::RedrawRequested => {
                    let mut scene = Scene::new();
                    scene.add_command(DrawCommand::Clear(self.background));
                    gauge.draw(&mut scene, &self.font);

                    let mut canvas = Canvas::new(pixels.frame_mut(), side as usize, side as usize);
                    scene.render(&mut canvas, &self.font);
                    if let Err(e) = pixels.render() {
                        log::error!("Render failed: {}", e);
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                if now.duration_since(last_frame) >= frame_duration {
                    last_frame = now;
                    if let Some(ref receiver) = receiver {
                        drain_commands(&mut gauge, receiver);
                    }
                    gauge.tick(now);
                    if gauge.take_redraw_request() {
                        window_clone.request_redraw();
                    }
                }
                window_target.set_control_flow(ControlFlow::WaitUntil(last_frame + frame_duration));
            }
            _ => {}
        })?;

        Ok(())
    }
}

/// Measure the gauge against the surface and size the pixel buffer to match.
/// Returns the new buffer side, or `None` for an empty surface.
fn fit_to_surface(
    gauge: &mut StepGauge,
    pixels: &mut Pixels,
    size: PhysicalSize<u32>,
) -> Option<u32> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let (side, _) = gauge.measure(
        MeasureSpec::exactly(size.width),
        MeasureSpec::exactly(size.height),
    );
    if let Err(e) = pixels.resize_surface(size.width, size.height) {
        log::warn!("Failed to resize surface: {}", e);
        return None;
    }
    if let Err(e) = pixels.resize_buffer(side, side) {
        log::warn!("Failed to resize buffer: {}", e);
        return None;
    }
    gauge.layout(side, side);
    Some(side)
}
