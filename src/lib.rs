//! A circular step counter gauge.
//!
//! [`StepGauge`] holds the widget state and turns it into a [`Scene`] of
//! draw commands: a 270° track arc, a progress arc over it and the step
//! count centered inside. [`Canvas`] rasterizes scenes into an RGBA frame
//! and [`GaugeWindow`] hosts a gauge in a winit window.
//!
//! ```no_run
//! use stepgauge::{GaugeAttributes, GaugeWindow, GlyphFont};
//!
//! let attributes = GaugeAttributes::builder()
//!     .max_step(8000)
//!     .curr_step(4200)
//!     .build();
//! let font = GlyphFont::load("DejaVuSans.ttf")?;
//! GaugeWindow::builder()
//!     .font(font)
//!     .attributes(attributes)
//!     .build()
//!     .show()?;
//! # Ok::<(), stepgauge::GaugeError>(())
//! ```

pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod scene;
pub mod text;
pub mod window;

pub use canvas::Canvas;
pub use config::{Color, DisplayMetrics, GaugeAttributes};
pub use error::{ConfigError, GaugeError, Result};
pub use gauge::StepGauge;
pub use geometry::{MeasureMode, MeasureSpec, Padding, RectF};
pub use scene::{DrawCommand, Scene};
pub use text::{GlyphFont, TextMeasure};
pub use window::{GaugeCommand, GaugeWindow};
