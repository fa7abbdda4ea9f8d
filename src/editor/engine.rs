//! Annotation canvas engine
//!
//! Pointer and form events arrive as method calls. Each mutation redraws the
//! whole surface from the session's shape and label lists.

use crate::capture::BaseImage;
use crate::config::EditorConfig;
use crate::domain::{Point, Shape, TextLabel, ToolMode, Viewport};
use crate::error::EditorError;
use crate::export::{self, ExportedImage};
use crate::render::Typeface;
use crate::session::{BrushStyle, CursorPreview, EditorSession, InteractionState, TextStyle};

pub struct AnnotationEngine {
    config: EditorConfig,
    typeface: Typeface,
    session: Option<EditorSession>,
    tool: ToolMode,
    brush: BrushStyle,
    text_style: TextStyle,
    viewport: Option<Viewport>,
    cursor: CursorPreview,
}

impl AnnotationEngine {
    /// Create an engine with the typeface named by `config`
    pub fn new(config: EditorConfig) -> Self {
        let typeface = Typeface::from_config(&config);
        Self::with_typeface(config, typeface)
    }

    pub fn with_typeface(config: EditorConfig, typeface: Typeface) -> Self {
        let brush = BrushStyle::new(config.brush_color, config.brush_size);
        let text_style = TextStyle::new(config.text_color, config.font_size);
        Self {
            typeface,
            session: None,
            tool: ToolMode::default(),
            brush,
            text_style,
            viewport: None,
            cursor: CursorPreview::new(brush),
            config,
        }
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Start a new session on an uploaded image.
    ///
    /// Returns the natural size the surface now has. A decode failure leaves
    /// the current session as it was.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(u32, u32), EditorError> {
        let base = BaseImage::decode(bytes)?;
        Ok(self.start_session(base))
    }

    /// Start a new session on a base64 generation result (bare or `data:` URL)
    pub fn load_image_base64(&mut self, data: &str) -> Result<(u32, u32), EditorError> {
        let base = BaseImage::decode_base64(data)?;
        Ok(self.start_session(base))
    }

    fn start_session(&mut self, base: BaseImage) -> (u32, u32) {
        let mut session = EditorSession::new(base);
        session.redraw(&self.typeface, &self.config);
        let dims = session.dimensions();
        if self.session.replace(session).is_some() {
            log::debug!("Replaced editing session");
        }
        log::debug!("Editing session started on {}x{} image", dims.0, dims.1);
        dims
    }

    /// Empty shapes and labels, keep the image
    pub fn clear(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.clear();
            session.redraw(&self.typeface, &self.config);
        }
    }

    /// PNG of the current surface
    pub fn export_flattened(&self) -> Result<Vec<u8>, EditorError> {
        let session = self.session.as_ref().ok_or(EditorError::NoImage)?;
        export::encode_png(session.surface())
    }

    /// Hand the edited image off as a named PNG file and end the session
    pub fn take_export(&mut self) -> Result<ExportedImage, EditorError> {
        let bytes = self.export_flattened()?;
        self.session = None;
        log::debug!("Editing session handed off ({} bytes)", bytes.len());
        Ok(ExportedImage::png(bytes))
    }

    // ========================================================================
    // Controls
    // ========================================================================

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
    }

    /// Applies to shapes finalized from now on
    pub fn set_brush(&mut self, brush: BrushStyle) {
        self.brush = brush;
        self.cursor.diameter = brush.size;
        self.cursor.color = brush.color;
    }

    /// Applies to labels added from now on
    pub fn set_text_style(&mut self, style: TextStyle) {
        self.text_style = style;
    }

    /// Record the on-screen size of the surface for pointer mapping
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// Add a label at the default anchor. Empty content is ignored.
    pub fn add_text(&mut self, content: &str) -> bool {
        if content.is_empty() {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.push_label(TextLabel {
            text: content.to_string(),
            position: self.config.text_anchor,
            color: self.text_style.color,
            font_size: self.text_style.font_size,
        });
        session.redraw(&self.typeface, &self.config);
        true
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Display-space position to surface pixels
    pub fn to_surface(&self, display: Point) -> Point {
        match (&self.session, self.viewport) {
            (Some(session), Some(viewport)) => {
                let (w, h) = session.dimensions();
                viewport.to_surface(display, w, h)
            }
            _ => display,
        }
    }

    pub fn pointer_enter(&mut self) {
        self.cursor.visible = true;
    }

    pub fn pointer_down(&mut self, display: Point) -> InteractionState {
        let pos = self.to_surface(display);
        let Some(session) = self.session.as_mut() else {
            return InteractionState::Idle;
        };

        session.interaction = match session.label_at(pos, &self.typeface) {
            Some(index) => InteractionState::DraggingText {
                index,
                offset: pos - session.labels()[index].position,
            },
            None => InteractionState::Drawing {
                start: pos,
                last: pos,
            },
        };
        session.interaction
    }

    pub fn pointer_move(&mut self, display: Point) -> InteractionState {
        let pos = self.to_surface(display);
        self.cursor.center = pos;
        self.cursor.diameter = self.brush.size;
        self.cursor.color = self.brush.color;

        let Some(session) = self.session.as_mut() else {
            return InteractionState::Idle;
        };

        match session.interaction {
            InteractionState::Drawing { start, last } if self.tool == ToolMode::Pen => {
                session.push_shape(Shape {
                    kind: self.tool.shape_kind(),
                    color: self.brush.color,
                    stroke_width: self.brush.size,
                    start: last,
                    end: pos,
                });
                session.interaction = InteractionState::Drawing { start, last: pos };
                session.redraw(&self.typeface, &self.config);
            }
            InteractionState::DraggingText { index, offset } => {
                session.move_label(index, pos - offset);
                session.redraw(&self.typeface, &self.config);
            }
            _ => {}
        }
        session.interaction
    }

    pub fn pointer_up(&mut self, display: Point) -> InteractionState {
        let pos = self.to_surface(display);
        let Some(session) = self.session.as_mut() else {
            return InteractionState::Idle;
        };

        // Pen continues from its last segment; other tools span the whole gesture
        if let InteractionState::Drawing { last, .. } = session.interaction {
            session.push_shape(Shape {
                kind: self.tool.shape_kind(),
                color: self.brush.color,
                stroke_width: self.brush.size,
                start: last,
                end: pos,
            });
            session.redraw(&self.typeface, &self.config);
        }
        session.interaction = InteractionState::Idle;
        session.interaction
    }

    /// Abandon any gesture in progress and hide the cursor preview
    pub fn pointer_leave(&mut self) -> InteractionState {
        self.cursor.visible = false;
        if let Some(session) = self.session.as_mut() {
            session.interaction = InteractionState::Idle;
        }
        InteractionState::Idle
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn session(&self) -> Option<&EditorSession> {
        self.session.as_ref()
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn cursor(&self) -> &CursorPreview {
        &self.cursor
    }

    pub fn interaction(&self) -> InteractionState {
        self.session
            .as_ref()
            .map(|s| s.interaction)
            .unwrap_or_default()
    }
}
