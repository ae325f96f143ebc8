//! Layout geometry: rectangles, padding, measurement and arc angles

/// Start angle of both arcs, degrees clockwise from 3 o'clock
pub const ARC_START_ANGLE: f32 = 135.0;

/// Angular extent of the full track
pub const ARC_SWEEP_ANGLE: f32 = 270.0;

/// Axis-aligned rectangle in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn inset(&self, by: f32) -> Self {
        Self::new(
            self.left + by,
            self.top + by,
            self.right - by,
            self.bottom - by,
        )
    }
}

/// Content padding in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Content box of a `width` x `height` widget
    pub fn content_box(&self, width: f32, height: f32) -> RectF {
        RectF::new(
            self.left,
            self.top,
            width - self.right,
            height - self.bottom,
        )
    }
}

/// How a parent constrains one dimension of a child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The child must be exactly this size
    Exactly,
    /// The child may be up to this size
    AtMost,
    /// No constraint, size is a hint only
    Unspecified,
}

/// One dimension's measurement constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: u32,
}

impl MeasureSpec {
    pub const fn exactly(size: u32) -> Self {
        Self {
            mode: MeasureMode::Exactly,
            size,
        }
    }

    pub const fn at_most(size: u32) -> Self {
        Self {
            mode: MeasureMode::AtMost,
            size,
        }
    }

    pub const fn unspecified() -> Self {
        Self {
            mode: MeasureMode::Unspecified,
            size: 0,
        }
    }

    /// Size this spec grants to a child that would like `desired` pixels
    pub fn resolve(&self, desired: u32) -> u32 {
        match self.mode {
            MeasureMode::Exactly => self.size,
            MeasureMode::AtMost => desired.min(self.size),
            MeasureMode::Unspecified => desired,
        }
    }
}

/// Square footprint for the given constraints.
///
/// Each dimension resolves against `desired` (plus its padding), then both
/// collapse to the smaller of the two.
pub fn measure_square(
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
    desired: u32,
    padding: Padding,
) -> u32 {
    let width = width_spec.resolve(desired + padding.horizontal().max(0.0).round() as u32);
    let height = height_spec.resolve(desired + padding.vertical().max(0.0).round() as u32);
    width.min(height)
}

/// Bounding box for the arcs: the content box inset by half the stroke, so
/// the stroke is centered on the box edge and never clipped.
pub fn arc_bounds(width: f32, height: f32, padding: Padding, border_width: f32) -> RectF {
    padding
        .content_box(width, height)
        .inset(border_width / 2.0)
}

/// Sweep of the progress arc for `current` out of `max` steps.
///
/// `None` when `max` is zero; `current` above `max` yields the full sweep.
pub fn progress_sweep(current: u32, max: u32) -> Option<f32> {
    if max == 0 {
        return None;
    }
    let ratio = current.min(max) as f32 / max as f32;
    Some(ratio * ARC_SWEEP_ANGLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_exactly_forces_square() {
        let size = measure_square(
            MeasureSpec::exactly(400),
            MeasureSpec::exactly(250),
            300,
            Padding::default(),
        );
        assert_eq!(size, 250);
    }

    #[test]
    fn test_measure_at_most_uses_default() {
        let size = measure_square(
            MeasureSpec::at_most(1000),
            MeasureSpec::at_most(1000),
            300,
            Padding::uniform(10.0),
        );
        assert_eq!(size, 320);
    }

    #[test]
    fn test_measure_at_most_is_bounded() {
        let size = measure_square(
            MeasureSpec::at_most(200),
            MeasureSpec::exactly(500),
            300,
            Padding::default(),
        );
        assert_eq!(size, 200);
    }

    #[test]
    fn test_measure_mixed_modes() {
        let size = measure_square(
            MeasureSpec::exactly(900),
            MeasureSpec::unspecified(),
            300,
            Padding::default(),
        );
        assert_eq!(size, 300);
    }

    #[test]
    fn test_measure_always_square() {
        let specs = [
            MeasureSpec::exactly(0),
            MeasureSpec::exactly(120),
            MeasureSpec::exactly(640),
            MeasureSpec::at_most(90),
            MeasureSpec::at_most(2000),
            MeasureSpec::unspecified(),
        ];
        for w in specs {
            for h in specs {
                let size = measure_square(w, h, 300, Padding::uniform(4.0));
                assert!(size <= w.resolve(308));
                assert!(size <= h.resolve(308));
                assert!(size == w.resolve(308) || size == h.resolve(308));
            }
        }
    }

    #[test]
    fn test_arc_bounds_inset_by_half_border() {
        let rect = arc_bounds(300.0, 300.0, Padding::default(), 20.0);
        assert_eq!(rect, RectF::new(10.0, 10.0, 290.0, 290.0));
        assert_eq!(rect.width(), rect.height());

        let rect = arc_bounds(300.0, 300.0, Padding::uniform(5.0), 10.0);
        assert_eq!(rect, RectF::new(10.0, 10.0, 290.0, 290.0));
    }

    #[test]
    fn test_progress_sweep() {
        assert_eq!(progress_sweep(250, 1000), Some(67.5));
        assert_eq!(progress_sweep(0, 1000), Some(0.0));
        assert_eq!(progress_sweep(1000, 1000), Some(270.0));
        assert_eq!(progress_sweep(150, 100), Some(270.0));
        assert_eq!(progress_sweep(5, 0), None);
    }
}
