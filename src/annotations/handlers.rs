//! Editor command handlers
//!
//! Routes an EditorCommand to the matching engine call.

use crate::domain::{Point, Viewport};
use crate::editor::AnnotationEngine;
use crate::session::{BrushStyle, EditorCommand, TextStyle};

/// Handle a single EditorCommand against the engine
pub fn handle_command(engine: &mut AnnotationEngine, cmd: EditorCommand) {
    match cmd {
        EditorCommand::SetTool { tool } => engine.set_tool(tool),
        EditorCommand::SetBrush { color, size } => engine.set_brush(BrushStyle::new(color, size)),
        EditorCommand::SetTextStyle { color, font_size } => {
            engine.set_text_style(TextStyle::new(color, font_size))
        }
        EditorCommand::SetViewport { width, height } => {
            engine.set_viewport(Viewport::new(width, height))
        }
        EditorCommand::PointerEnter => engine.pointer_enter(),
        EditorCommand::PointerDown { x, y } => {
            engine.pointer_down(Point::new(x, y));
        }
        EditorCommand::PointerMove { x, y } => {
            engine.pointer_move(Point::new(x, y));
        }
        EditorCommand::PointerUp { x, y } => {
            engine.pointer_up(Point::new(x, y));
        }
        EditorCommand::PointerLeave => {
            engine.pointer_leave();
        }
        EditorCommand::AddText { text } => {
            if !engine.add_text(&text) {
                log::debug!("Ignored add_text with empty content or no image");
            }
        }
        EditorCommand::Clear => engine.clear(),
    }
}

/// Replay a script of commands in order
pub fn replay(engine: &mut AnnotationEngine, cmds: impl IntoIterator<Item = EditorCommand>) {
    for cmd in cmds {
        handle_command(engine, cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::domain::{ShapeKind, ToolMode};
    use crate::export::encode_png;
    use crate::render::Typeface;
    use crate::session::messages::parse_script;
    use image::{Rgba, RgbaImage};

    fn engine(w: u32, h: u32) -> AnnotationEngine {
        let mut engine =
            AnnotationEngine::with_typeface(EditorConfig::default(), Typeface::fallback());
        let png = encode_png(&RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))).unwrap();
        engine.load_image(&png).unwrap();
        engine
    }

    #[test]
    fn test_replay_script() {
        let mut e = engine(200, 100);
        let script = parse_script(
            r##"[
                {"op": "set_viewport", "width": 100, "height": 50},
                {"op": "set_tool", "tool": "arrow"},
                {"op": "set_brush", "color": "#0000ff", "size": 6},
                {"op": "pointer_enter"},
                {"op": "pointer_down", "x": 5, "y": 5},
                {"op": "pointer_move", "x": 20, "y": 20},
                {"op": "pointer_up", "x": 40, "y": 30},
                {"op": "set_text_style", "color": "#ffffff", "font_size": 18},
                {"op": "add_text", "text": "look here"},
                {"op": "add_text", "text": ""}
            ]"##,
        )
        .unwrap();
        replay(&mut e, script);

        assert_eq!(e.tool(), ToolMode::Arrow);
        assert!(e.cursor().visible);
        let session = e.session().unwrap();
        assert_eq!(session.shapes().len(), 1);
        let arrow = &session.shapes()[0];
        assert_eq!(arrow.kind, ShapeKind::Arrow);
        assert_eq!(arrow.start, Point::new(10.0, 10.0));
        assert_eq!(arrow.end, Point::new(80.0, 60.0));
        assert_eq!(arrow.stroke_width, 6.0);
        assert_eq!(session.labels().len(), 1);
        assert_eq!(session.labels()[0].font_size, 18.0);
    }

    #[test]
    fn test_clear_and_leave() {
        let mut e = engine(50, 50);
        replay(
            &mut e,
            [
                EditorCommand::pointer_down(1.0, 1.0),
                EditorCommand::pointer_move(10.0, 10.0),
                EditorCommand::PointerLeave,
                EditorCommand::pointer_up(20.0, 20.0),
            ],
        );
        assert_eq!(e.session().unwrap().shapes().len(), 1);

        handle_command(&mut e, EditorCommand::Clear);
        assert!(e.session().unwrap().shapes().is_empty());
    }
}
