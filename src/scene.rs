// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::canvas::Canvas;
use crate::config::Color;
use crate::geometry::RectF;
use crate::text::GlyphFont;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Arc {
        bounds: RectF,
        start_angle: f32,
        sweep_angle: f32,
        stroke_width: f32,
        color: Color,
    },
    Text {
        x: f32,
        baseline: f32,
        text: String,
        size: f32,
        color: Color,
    },
}

/// Draw commands for one frame, in paint order
#[derive(Debug, Default, Clone)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Sweep angles of every arc, in paint order
    pub fn arc_sweeps(&self) -> Vec<f32> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Arc { sweep_angle, .. } => Some(*sweep_angle),
                _ => None,
            })
            .collect()
    }

    /// Text of every label, in paint order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn render(&self, canvas: &mut Canvas, font: &GlyphFont) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    canvas.clear(*color);
                }
                DrawCommand::Arc {
                    bounds,
                    start_angle,
                    sweep_angle,
                    stroke_width,
                    color,
                } => {
                    canvas.stroke_arc(*bounds, *start_angle, *sweep_angle, *stroke_width, *color);
                }
                DrawCommand::Text {
                    x,
                    baseline,
                    text,
                    size,
                    color,
                } => {
                    canvas.fill_text(font, text, *x, *baseline, *size, *color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_follow_paint_order() {
        let bounds = RectF::new(0.0, 0.0, 10.0, 10.0);
        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Clear(Color::WHITE));
        scene.add_command(DrawCommand::Arc {
            bounds,
            start_angle: 135.0,
            sweep_angle: 270.0,
            stroke_width: 2.0,
            color: Color::BLUE,
        });
        scene.add_command(DrawCommand::Arc {
            bounds,
            start_angle: 135.0,
            sweep_angle: 90.0,
            stroke_width: 2.0,
            color: Color::RED,
        });
        scene.add_command(DrawCommand::Text {
            x: 1.0,
            baseline: 6.0,
            text: "42".into(),
            size: 8.0,
            color: Color::RED,
        });

        assert_eq!(scene.commands().len(), 4);
        assert_eq!(scene.arc_sweeps(), vec![270.0, 90.0]);
        assert_eq!(scene.texts(), vec!["42"]);
    }
}
