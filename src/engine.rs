//! Drawing engine driven by the hosting view.
//!
//! [`DoodleEngine`] owns the brush, the in-progress gesture, the undo/redo
//! history and the raster. Every mutation takes `&mut self`, so a reader
//! borrowing the engine always sees each action either fully applied or not
//! at all.

use crate::config::Config;
use crate::draw::{
    Color, DirtyTracker, PaintState, RenderSurface, Stroke, SurfaceError, SurfaceSnapshot,
    TRANSPARENT, render_path,
};
use crate::history::{Action, History};
use crate::input::{InputSession, PointerEvent, PointerId};
use crate::util::Rect;
use log::{debug, info};
use std::io::Write;

/// Freehand drawing surface with linear undo/redo.
pub struct DoodleEngine {
    paint: PaintState,
    session: InputSession,
    history: History,
    surface: RenderSurface,
    dirty_tracker: DirtyTracker,
    /// Whether the host should repaint
    pub needs_redraw: bool,
}

impl DoodleEngine {
    /// Creates an engine with a transparent surface, default brush, no history
    /// cap and no point decimation.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Ok(Self::with_parts(
            RenderSurface::new(width, height, TRANSPARENT, true)?,
            PaintState::default(),
            InputSession::new(),
            History::new(),
        ))
    }

    /// Creates an engine from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self, SurfaceError> {
        let background = config
            .surface
            .background
            .as_ref()
            .map_or(TRANSPARENT, |spec| spec.to_color());
        let surface = RenderSurface::new(
            config.surface.width,
            config.surface.height,
            background,
            config.surface.antialias,
        )?;
        let paint = PaintState::new(
            config.drawing.default_width,
            config.drawing.default_alpha,
            config.drawing.default_color.to_color(),
        );

        let engine = Self::with_parts(
            surface,
            paint,
            InputSession::with_min_point_distance(config.input.min_point_distance),
            History::with_max_depth(config.history.max_depth),
        );
        info!(
            "Drawing engine ready: {}x{}, history depth {}, point distance {:.1}",
            engine.surface.width(),
            engine.surface.height(),
            if config.history.max_depth == 0 {
                "unlimited".to_string()
            } else {
                config.history.max_depth.to_string()
            },
            config.input.min_point_distance
        );
        Ok(engine)
    }

    fn with_parts(
        surface: RenderSurface,
        paint: PaintState,
        session: InputSession,
        history: History,
    ) -> Self {
        let mut dirty_tracker = DirtyTracker::new();
        dirty_tracker.mark_full();
        Self {
            paint,
            session,
            history,
            surface,
            dirty_tracker,
            needs_redraw: true,
        }
    }

    // ------------------------------------------------------------------
    // Brush
    // ------------------------------------------------------------------

    /// Sets the width for strokes started from now on.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.paint.set_stroke_width(width);
    }

    /// Sets the opacity (clamped to 0-255) for strokes started from now on.
    pub fn set_stroke_alpha(&mut self, alpha: i32) {
        self.paint.set_stroke_alpha(alpha);
    }

    /// Sets the color (`0xAARRGGBB`, alpha byte ignored) for strokes started
    /// from now on.
    pub fn set_stroke_color(&mut self, argb: u32) {
        self.paint.set_stroke_color(argb);
    }

    pub fn paint(&self) -> &PaintState {
        &self.paint
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Starts a stroke. Ignored while another pointer is drawing.
    pub fn pointer_down(&mut self, id: PointerId, x: f64, y: f64) {
        if self.session.pointer_down(id, x, y, &self.paint) {
            if let Some((points, paint)) = self.session.provisional() {
                self.dirty_tracker.mark_path(points, paint.width);
            }
            self.needs_redraw = true;
        }
    }

    /// Extends the active stroke.
    pub fn pointer_move(&mut self, id: PointerId, x: f64, y: f64) {
        if self.session.pointer_move(id, x, y) {
            if let Some((points, paint)) = self.session.provisional() {
                self.dirty_tracker.mark_path_tail(points, paint.width);
            }
            self.needs_redraw = true;
        }
    }

    /// Finishes the active stroke and records it.
    pub fn pointer_up(&mut self, id: PointerId, x: f64, y: f64) {
        if let Some(stroke) = self.session.pointer_up(id, x, y) {
            self.commit_stroke(stroke);
        }
    }

    /// Drops the active stroke without recording anything.
    pub fn pointer_cancel(&mut self) {
        if let Some((points, paint)) = self.session.provisional() {
            self.dirty_tracker.mark_path(points, paint.width);
        }
        if self.session.cancel() {
            self.needs_redraw = true;
        }
    }

    /// Dispatches a pointer event from the hosting view.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { id, x, y } => self.pointer_down(id, x, y),
            PointerEvent::Move { id, x, y } => self.pointer_move(id, x, y),
            PointerEvent::Up { id, x, y } => self.pointer_up(id, x, y),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.session.is_tracking()
    }

    /// The stroke being drawn, frozen as it stands now.
    pub fn provisional_stroke(&self) -> Option<Stroke> {
        self.session
            .provisional()
            .map(|(points, paint)| Stroke::new(points.to_vec(), *paint))
    }

    fn commit_stroke(&mut self, stroke: Stroke) {
        self.surface.draw_stroke(&stroke);
        self.dirty_tracker.mark_stroke(&stroke);
        self.history.push(Action::StrokeAdded(stroke));
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Records a clear of the whole canvas.
    ///
    /// The clear is always recorded and drops the redo branch. Returns
    /// `false` when no stroke was visible, so nothing on screen changed.
    pub fn clear_canvas(&mut self) -> bool {
        let had_strokes = self.history.visible_strokes().next().is_some();
        self.history.push(Action::CanvasCleared);
        if !had_strokes {
            debug!("Recorded clear of an already empty canvas");
            return false;
        }
        self.surface.clear();
        self.mark_full_redraw();
        true
    }

    /// Reverts the most recent action. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            debug!("Nothing to undo");
            return false;
        }
        self.rebuild_surface();
        true
    }

    /// Reapplies the most recently undone action. Returns `false` if there was
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(action) = self.history.redo() else {
            debug!("Nothing to redo");
            return false;
        };
        match action {
            Action::StrokeAdded(stroke) => self.surface.draw_stroke(stroke),
            Action::CanvasCleared => self.surface.clear(),
        }
        self.mark_full_redraw();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Strokes currently on the surface, in draw order.
    pub fn visible_strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.history.visible_strokes()
    }

    // ------------------------------------------------------------------
    // Surface
    // ------------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn background(&self) -> Color {
        self.surface.background()
    }

    /// Reallocates the surface at a new size and replays the visible strokes.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == self.surface.width() && height == self.surface.height() {
            return Ok(());
        }
        self.surface.resize(width, height)?;
        self.rebuild_surface();
        debug!("Surface resized to {width}x{height}");
        Ok(())
    }

    /// Paints the surface and the in-progress stroke onto a host context.
    pub fn render_frame(&self, ctx: &cairo::Context) -> Result<(), SurfaceError> {
        self.surface.paint_onto(ctx)?;
        if let Some((points, paint)) = self.session.provisional() {
            render_path(ctx, points, paint);
        }
        Ok(())
    }

    /// Copies the committed raster (without the in-progress stroke).
    pub fn snapshot(&self) -> Result<SurfaceSnapshot, SurfaceError> {
        self.surface.snapshot()
    }

    /// Encodes the committed raster as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        self.surface.write_png(writer)
    }

    /// Drains pending dirty rectangles for the current surface size.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let width = self.surface.width().min(i32::MAX as u32) as i32;
        let height = self.surface.height().min(i32::MAX as u32) as i32;
        self.needs_redraw = false;
        self.dirty_tracker.take_regions(width, height)
    }

    fn rebuild_surface(&mut self) {
        self.surface.rebuild(self.history.visible_strokes());
        self.mark_full_redraw();
    }

    fn mark_full_redraw(&mut self) {
        self.dirty_tracker.mark_full();
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_line(engine: &mut DoodleEngine, from: (f64, f64), to: (f64, f64)) {
        engine.pointer_down(0, from.0, from.1);
        engine.pointer_move(0, (from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        engine.pointer_up(0, to.0, to.1);
    }

    #[test]
    fn new_engine_uses_default_brush() {
        let engine = DoodleEngine::new(32, 32).unwrap();
        assert_eq!(engine.paint().width(), 10.0);
        assert_eq!(engine.paint().alpha(), 255);
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
        assert!(engine.snapshot().unwrap().is_blank());
    }

    #[test]
    fn finished_stroke_is_recorded_and_drawn() {
        let mut engine = DoodleEngine::new(40, 40).unwrap();
        draw_line(&mut engine, (5.0, 20.0), (35.0, 20.0));

        assert_eq!(engine.history().undo_depth(), 1);
        assert_eq!(engine.visible_strokes().count(), 1);
        assert_eq!(engine.snapshot().unwrap().alpha_at(20, 20), 255);
    }

    #[test]
    fn in_progress_stroke_stays_off_the_surface() {
        let mut engine = DoodleEngine::new(40, 40).unwrap();
        engine.pointer_down(0, 5.0, 20.0);
        engine.pointer_move(0, 35.0, 20.0);

        assert!(engine.is_drawing());
        assert!(engine.snapshot().unwrap().is_blank());
        assert_eq!(engine.provisional_stroke().unwrap().points().len(), 2);
    }

    #[test]
    fn cancel_leaves_no_trace() {
        let mut engine = DoodleEngine::new(40, 40).unwrap();
        engine.handle_pointer(PointerEvent::Down { id: 0, x: 5.0, y: 5.0 });
        engine.handle_pointer(PointerEvent::Move { id: 0, x: 30.0, y: 30.0 });
        engine.handle_pointer(PointerEvent::Cancel);
        engine.handle_pointer(PointerEvent::Up { id: 0, x: 30.0, y: 30.0 });

        assert!(!engine.can_undo());
        assert!(engine.snapshot().unwrap().is_blank());
    }

    #[test]
    fn clear_on_empty_canvas_is_still_recorded() {
        let mut engine = DoodleEngine::new(16, 16).unwrap();
        assert!(!engine.clear_canvas());
        assert!(engine.can_undo());
        assert_eq!(engine.history().applied(), &[Action::CanvasCleared]);
    }

    #[test]
    fn clear_after_undo_drops_redo_branch() {
        let mut engine = DoodleEngine::new(16, 16).unwrap();
        draw_line(&mut engine, (1.0, 8.0), (15.0, 8.0));
        engine.undo();
        assert!(engine.can_redo());

        assert!(!engine.clear_canvas());
        assert!(!engine.can_redo());
        assert!(!engine.redo());
        assert_eq!(engine.visible_strokes().count(), 0);
    }

    #[test]
    fn undo_redo_report_whether_they_had_effect() {
        let mut engine = DoodleEngine::new(16, 16).unwrap();
        assert!(!engine.undo());
        assert!(!engine.redo());

        draw_line(&mut engine, (1.0, 8.0), (15.0, 8.0));
        assert!(engine.undo());
        assert!(!engine.undo());
        assert!(engine.redo());
        assert!(!engine.redo());
    }

    #[test]
    fn dirty_regions_follow_stroke_then_full_damage() {
        let mut engine = DoodleEngine::new(100, 100).unwrap();
        engine.take_dirty_regions();

        draw_line(&mut engine, (10.0, 10.0), (20.0, 10.0));
        assert!(engine.needs_redraw);
        let regions = engine.take_dirty_regions();
        assert!(!regions.is_empty());
        assert!(regions.iter().all(|r| r.width < 100));
        assert!(!engine.needs_redraw);

        engine.undo();
        assert_eq!(
            engine.take_dirty_regions(),
            vec![Rect::new(0, 0, 100, 100).unwrap()]
        );
    }

    #[test]
    fn preview_damage_tracks_newest_segment() {
        let mut engine = DoodleEngine::new(100, 100).unwrap();
        engine.set_stroke_width(2.0);
        engine.pointer_down(0, 10.0, 10.0);
        engine.pointer_move(0, 60.0, 10.0);
        engine.take_dirty_regions();

        engine.pointer_move(0, 60.0, 20.0);
        assert_eq!(
            engine.take_dirty_regions(),
            vec![Rect::new(59, 9, 2, 12).unwrap()]
        );

        engine.pointer_cancel();
        assert_eq!(
            engine.take_dirty_regions(),
            vec![Rect::new(9, 9, 52, 12).unwrap()]
        );
    }

    #[test]
    fn extreme_pointer_coordinates_fall_back_to_full_damage() {
        let mut engine = DoodleEngine::new(20, 20).unwrap();
        engine.take_dirty_regions();

        engine.pointer_down(0, -3e9, 3e9);
        engine.pointer_move(0, 3e9, 3e9);
        engine.pointer_up(0, 3e9, -3e9);

        assert_eq!(engine.visible_strokes().count(), 1);
        assert_eq!(
            engine.take_dirty_regions(),
            vec![Rect::new(0, 0, 20, 20).unwrap()]
        );
    }

    #[test]
    fn resize_replays_visible_strokes() {
        let mut engine = DoodleEngine::new(40, 40).unwrap();
        draw_line(&mut engine, (5.0, 20.0), (35.0, 20.0));

        engine.resize(80, 60).unwrap();
        let snapshot = engine.snapshot().unwrap();
        assert_eq!((snapshot.width, snapshot.height), (80, 60));
        assert_eq!(snapshot.alpha_at(20, 20), 255);
        assert!(engine.resize(0, 60).is_err());
    }

    #[test]
    fn from_config_applies_brush_and_limits() {
        let config = Config::from_toml_str(
            r#"
            [drawing]
            default_color = "red"
            default_width = 3.0
            default_alpha = 100

            [surface]
            width = 64
            height = 48
            background = "white"

            [history]
            max_depth = 1
            "#,
        )
        .unwrap();
        let mut engine = DoodleEngine::from_config(&config).unwrap();

        assert_eq!((engine.width(), engine.height()), (64, 48));
        assert_eq!(engine.paint().width(), 3.0);
        assert_eq!(engine.paint().alpha(), 100);
        assert_eq!(engine.paint().color(), crate::draw::RED);
        assert_eq!(engine.snapshot().unwrap().pixel(0, 0), Some([255, 255, 255, 255]));

        draw_line(&mut engine, (1.0, 1.0), (10.0, 1.0));
        draw_line(&mut engine, (1.0, 5.0), (10.0, 5.0));
        assert_eq!(engine.history().undo_depth(), 1);
    }

    #[test]
    fn render_frame_includes_provisional_stroke() {
        let mut engine = DoodleEngine::new(40, 40).unwrap();
        engine.pointer_down(0, 5.0, 20.0);
        engine.pointer_move(0, 35.0, 20.0);

        let target = cairo::ImageSurface::create(cairo::Format::ARgb32, 40, 40).unwrap();
        let ctx = cairo::Context::new(&target).unwrap();
        engine.render_frame(&ctx).unwrap();
        drop(ctx);

        let mut pixels = Vec::new();
        target
            .with_data(|data| pixels.extend_from_slice(data))
            .unwrap();
        assert!(pixels.iter().any(|byte| *byte != 0));
    }
}
