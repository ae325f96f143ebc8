//! The step counter gauge
//!
//! A track arc, a progress arc on top of it and the current step count in
//! the middle. The host drives it: [`StepGauge::measure`] and
//! [`StepGauge::layout`] when the available space changes,
//! [`StepGauge::tick`] once per frame, [`StepGauge::draw`] when a redraw is
//! due.

use std::time::Instant;

use crate::animation::IntAnimator;
use crate::config::{Color, DisplayMetrics, GaugeAttributes};
use crate::geometry::{
    arc_bounds, measure_square, progress_sweep, MeasureSpec, Padding, ARC_START_ANGLE,
    ARC_SWEEP_ANGLE,
};
use crate::scene::{DrawCommand, Scene};
use crate::text::{ellipsize_end, TextMeasure};

/// Gap kept between the label and the arc on each side, in dp
pub const TEXT_ARC_OFFSET_DP: f32 = 50.0;

/// Preferred arc diameter when the parent leaves the size open, in dp
pub const DEFAULT_ARC_SIZE_DP: f32 = 300.0;

#[derive(Debug, Clone)]
pub struct StepGauge {
    inner_color: Color,
    outer_color: Color,
    border_width: f32,
    curr_step: u32,
    max_step: u32,
    text_size: f32,
    text_color: Color,
    padding: Padding,

    text_offset: f32,
    default_size: u32,

    width: u32,
    height: u32,

    animator: Option<IntAnimator>,
    redraw_requested: bool,
}

impl StepGauge {
    /// Build a gauge from its attributes, converting dp/sp with `metrics`.
    ///
    /// With `start_with_anim` the gauge starts at zero and counts up to
    /// `curr_step` once the host begins ticking.
    pub fn new(attrs: &GaugeAttributes, metrics: DisplayMetrics) -> Self {
        let animator = attrs
            .start_with_anim
            .then(|| IntAnimator::entry(attrs.curr_step));
        let initial_step = if animator.is_some() { 0 } else { attrs.curr_step };

        let mut gauge = Self {
            inner_color: attrs.inner_color,
            outer_color: attrs.outer_color,
            border_width: metrics.dp_to_px(attrs.border_width),
            curr_step: 0,
            max_step: attrs.max_step,
            text_size: metrics.sp_to_px(attrs.step_text_size),
            text_color: attrs.step_text_color,
            padding: Padding::uniform(metrics.dp_to_px(attrs.padding)),
            text_offset: metrics.dp_to_px(TEXT_ARC_OFFSET_DP),
            default_size: metrics.dp_to_px(DEFAULT_ARC_SIZE_DP).round().max(0.0) as u32,
            width: 0,
            height: 0,
            animator,
            redraw_requested: true,
        };
        gauge.set_curr_step(initial_step);
        gauge
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// Footprint for the given constraints; always square
    pub fn measure(&self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> (u32, u32) {
        let size = measure_square(width_spec, height_spec, self.default_size, self.padding);
        log::debug!(
            "Measured {:?} x {:?} -> {}x{}",
            width_spec,
            height_spec,
            size,
            size
        );
        (size, size)
    }

    /// Assign the final size chosen by the host
    pub fn layout(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.invalidate();
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.invalidate();
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    // ------------------------------------------------------------------------
    // Animation and invalidation
    // ------------------------------------------------------------------------

    /// Advance the entry animation to `now`. Returns true while it is still
    /// running, so the host knows to keep delivering frames.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animator) = self.animator.as_mut() else {
            return false;
        };
        if let Some(value) = animator.tick(now) {
            self.set_curr_step(value);
        }
        if self.animator.as_ref().is_some_and(IntAnimator::is_finished) {
            self.animator = None;
        }
        self.animator.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_some()
    }

    /// Returns whether a repaint was requested since the last call, and clears it
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn invalidate(&mut self) {
        self.redraw_requested = true;
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Append this frame's draw commands to `scene`
    pub fn draw<M: TextMeasure + ?Sized>(&self, scene: &mut Scene, measure: &M) {
        let width = self.width as f32;
        let height = self.height as f32;
        let bounds = arc_bounds(width, height, self.padding, self.border_width);

        scene.add_command(DrawCommand::Arc {
            bounds,
            start_angle: ARC_START_ANGLE,
            sweep_angle: ARC_SWEEP_ANGLE,
            stroke_width: self.border_width,
            color: self.outer_color,
        });

        let Some(sweep_angle) = progress_sweep(self.curr_step, self.max_step) else {
            return;
        };
        let current = self.curr_step.min(self.max_step);

        scene.add_command(DrawCommand::Arc {
            bounds,
            start_angle: ARC_START_ANGLE,
            sweep_angle,
            stroke_width: self.border_width,
            color: self.inner_color,
        });

        let available = width - 2.0 * self.border_width - 2.0 * self.text_offset;
        let label = ellipsize_end(&current.to_string(), available, self.text_size, measure);
        if label.is_empty() {
            return;
        }
        let text_width = measure.measure(&label, self.text_size);
        let baseline = measure
            .metrics(self.text_size)
            .centered_baseline(height / 2.0);

        scene.add_command(DrawCommand::Text {
            x: (width - text_width) / 2.0,
            baseline,
            text: label,
            size: self.text_size,
            color: self.text_color,
        });
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    pub fn inner_color(&self) -> Color {
        self.inner_color
    }

    pub fn set_inner_color(&mut self, color: Color) {
        self.inner_color = color;
        self.invalidate();
    }

    pub fn outer_color(&self) -> Color {
        self.outer_color
    }

    pub fn set_outer_color(&mut self, color: Color) {
        self.outer_color = color;
        self.invalidate();
    }

    /// Stroke width of both arcs, physical pixels
    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    pub fn set_border_width(&mut self, width: f32) {
        self.border_width = width;
        self.invalidate();
    }

    pub fn curr_step(&self) -> u32 {
        self.curr_step
    }

    /// Set the step count. Clamped to `max_step` unless that is zero.
    pub fn set_curr_step(&mut self, step: u32) {
        self.curr_step = if self.max_step > 0 {
            step.min(self.max_step)
        } else {
            step
        };
        self.invalidate();
    }

    pub fn max_step(&self) -> u32 {
        self.max_step
    }

    pub fn set_max_step(&mut self, max: u32) {
        self.max_step = max;
        if max > 0 && self.curr_step > max {
            self.curr_step = max;
        }
        self.invalidate();
    }

    /// Label font size, physical pixels
    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.text_size = size;
        self.invalidate();
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonoMeasure;
    use std::time::Duration;

    fn gauge(curr: u32, max: u32) -> StepGauge {
        let attrs = GaugeAttributes::builder()
            .curr_step(curr)
            .max_step(max)
            .start_with_anim(false)
            .build();
        let mut gauge = StepGauge::new(&attrs, DisplayMetrics::default());
        gauge.layout(300, 300);
        gauge
    }

    fn scene_of(gauge: &StepGauge) -> Scene {
        let mut scene = Scene::new();
        gauge.draw(&mut scene, &MonoMeasure);
        scene
    }

    #[test]
    fn test_quarter_progress() {
        let scene = scene_of(&gauge(250, 1000));
        assert_eq!(scene.arc_sweeps(), vec![270.0, 67.5]);
        assert_eq!(scene.texts(), vec!["250"]);
    }

    #[test]
    fn test_zero_max_draws_track_only() {
        let gauge = gauge(5, 0);
        assert_eq!(gauge.curr_step(), 5);
        let scene = scene_of(&gauge);
        assert_eq!(scene.arc_sweeps(), vec![270.0]);
        assert!(scene.texts().is_empty());
    }

    #[test]
    fn test_overflow_is_clamped() {
        let gauge = gauge(150, 100);
        assert_eq!(gauge.curr_step(), 100);
        let scene = scene_of(&gauge);
        assert_eq!(scene.arc_sweeps(), vec![270.0, 270.0]);
        assert_eq!(scene.texts(), vec!["100"]);
    }

    #[test]
    fn test_sweep_matches_ratio() {
        let mut gauge = gauge(0, 7);
        for step in 0..=7u32 {
            gauge.set_curr_step(step);
            let scene = scene_of(&gauge);
            assert_eq!(scene.arc_sweeps()[1], step as f32 / 7.0 * 270.0);
            assert_eq!(scene.texts(), vec![step.to_string().as_str()]);
        }
    }

    #[test]
    fn test_arcs_share_geometry() {
        let scene = scene_of(&gauge(10, 20));
        let arcs: Vec<_> = scene
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Arc {
                    bounds,
                    start_angle,
                    stroke_width,
                    color,
                    ..
                } => Some((*bounds, *start_angle, *stroke_width, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].0, arcs[1].0);
        assert_eq!(arcs[0].0.left, 5.0);
        assert_eq!(arcs[0].0.right, 295.0);
        assert_eq!(arcs[0].1, 135.0);
        assert_eq!(arcs[0].2, 10.0);
        assert_eq!(arcs[0].3, Color::BLUE);
        assert_eq!(arcs[1].3, Color::RED);
    }

    #[test]
    fn test_label_is_centered() {
        let scene = scene_of(&gauge(250, 1000));
        let Some(DrawCommand::Text { x, baseline, .. }) = scene.commands().last() else {
            panic!("no label drawn");
        };
        // three chars at 10px each
        assert_eq!(*x, 135.0);
        // MonoMeasure at 20px: top -16, bottom 4
        assert_eq!(*baseline, 156.0);
    }

    #[test]
    fn test_long_label_is_ellipsized() {
        let mut gauge = gauge(1_234_567, 2_000_000);
        // 30px per char against 300 - 2*10 - 2*50 = 180px
        gauge.set_text_size(60.0);
        let scene = scene_of(&gauge);
        assert_eq!(scene.texts(), vec!["12345\u{2026}"]);
        let Some(DrawCommand::Text { x, .. }) = scene.commands().last() else {
            panic!("no label drawn");
        };
        assert_eq!(*x, 60.0);
    }

    #[test]
    fn test_measure_is_square() {
        let gauge = gauge(0, 0);
        assert_eq!(
            gauge.measure(MeasureSpec::at_most(1000), MeasureSpec::at_most(1000)),
            (300, 300)
        );
        assert_eq!(
            gauge.measure(MeasureSpec::exactly(480), MeasureSpec::exactly(200)),
            (200, 200)
        );
        assert_eq!(
            gauge.measure(MeasureSpec::exactly(120), MeasureSpec::at_most(1000)),
            (120, 120)
        );
    }

    #[test]
    fn test_density_scaling() {
        let attrs = GaugeAttributes::builder()
            .border_width(8.0)
            .step_text_size(20.0)
            .padding(4.0)
            .build();
        let metrics = DisplayMetrics {
            density: 2.0,
            font_scale: 1.25,
        };
        let gauge = StepGauge::new(&attrs, metrics);
        assert_eq!(gauge.border_width(), 16.0);
        assert_eq!(gauge.text_size(), 50.0);
        assert_eq!(gauge.padding(), Padding::uniform(8.0));
        assert_eq!(
            gauge.measure(MeasureSpec::unspecified(), MeasureSpec::unspecified()),
            (616, 616)
        );
    }

    #[test]
    fn test_lowering_max_clamps_current() {
        let mut gauge = gauge(80, 100);
        gauge.set_max_step(50);
        assert_eq!(gauge.curr_step(), 50);
        gauge.set_max_step(0);
        assert_eq!(gauge.curr_step(), 50);
        gauge.set_curr_step(500);
        assert_eq!(gauge.curr_step(), 500);
    }

    #[test]
    fn test_setters_request_redraw() {
        let mut gauge = gauge(1, 10);
        assert!(gauge.take_redraw_request());
        assert!(!gauge.take_redraw_request());

        gauge.set_curr_step(3);
        assert!(gauge.take_redraw_request());
        gauge.set_inner_color(Color::BLACK);
        assert!(gauge.take_redraw_request());
        gauge.layout(300, 300);
        assert!(!gauge.take_redraw_request());
        gauge.layout(200, 200);
        assert!(gauge.take_redraw_request());
    }

    #[test]
    fn test_arcs_rasterize_in_their_colors() {
        let mut gauge = gauge(0, 100);
        gauge.layout(120, 120);
        let mut frame = vec![0; 120 * 120 * 4];

        let paint = |gauge: &StepGauge, frame: &mut Vec<u8>| {
            let mut scene = Scene::new();
            scene.add_command(DrawCommand::Clear(Color::WHITE));
            gauge.draw(&mut scene, &MonoMeasure);
            let mut canvas = crate::Canvas::new(frame, 120, 120);
            for command in scene.commands() {
                match command {
                    DrawCommand::Clear(color) => canvas.clear(*color),
                    DrawCommand::Arc {
                        bounds,
                        start_angle,
                        sweep_angle,
                        stroke_width,
                        color,
                    } => canvas.stroke_arc(*bounds, *start_angle, *sweep_angle, *stroke_width, *color),
                    DrawCommand::Text { .. } => {}
                }
            }
            canvas.pixel(60, 5)
        };

        // top of the ring is track-colored with no progress
        assert_eq!(paint(&gauge, &mut frame), Some([0, 0, 0xff, 0xff]));
        gauge.set_curr_step(100);
        assert_eq!(paint(&gauge, &mut frame), Some([0xff, 0, 0, 0xff]));
    }

    #[test]
    fn test_entry_animation() {
        let attrs = GaugeAttributes::builder()
            .curr_step(400)
            .max_step(1000)
            .build();
        let mut gauge = StepGauge::new(&attrs, DisplayMetrics::default());
        gauge.layout(300, 300);
        assert_eq!(gauge.curr_step(), 0);
        assert!(gauge.is_animating());

        let start = Instant::now();
        assert!(gauge.tick(start));
        assert_eq!(gauge.curr_step(), 0);

        gauge.take_redraw_request();
        assert!(gauge.tick(start + Duration::from_millis(950)));
        assert!((1..400).contains(&gauge.curr_step()));
        assert!(gauge.take_redraw_request());

        assert!(!gauge.tick(start + Duration::from_millis(1700)));
        assert_eq!(gauge.curr_step(), 400);
        assert!(!gauge.is_animating());

        // runs once: later ticks and setters are left alone
        gauge.set_curr_step(10);
        assert!(!gauge.tick(start + Duration::from_secs(5)));
        assert_eq!(gauge.curr_step(), 10);
    }
}
