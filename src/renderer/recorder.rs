//! In-memory canvas that records draw calls
//!
//! Used by tests to assert draw order and by the native headless runner.

use super::Canvas;

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    BeginPath,
    /// Center and radius; angles are not recorded
    Arc(f64, f64, f64),
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadraticCurveTo(f64, f64, f64, f64),
    ClosePath,
    Fill,
    Stroke,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    LineCap(String),
    LineJoin(String),
    GlobalAlpha(f64),
    ShadowBlur(f64),
    ShadowColor(String),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    pub commands: Vec<DrawCmd>,
    /// Number of `set_size` calls that changed the size
    pub resizes: u32,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Count recorded commands matching a predicate
    pub fn count(&self, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.resizes += 1;
        }
        self.width = width;
        self.height = height;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCmd::FillRect(x, y, w, h));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCmd::StrokeRect(x, y, w, h));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCmd::BeginPath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
        self.commands.push(DrawCmd::Arc(x, y, radius));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCmd::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCmd::LineTo(x, y));
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.commands.push(DrawCmd::QuadraticCurveTo(cpx, cpy, x, y));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCmd::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCmd::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCmd::Stroke);
    }

    fn save(&mut self) {
        self.commands.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCmd::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCmd::Translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCmd::Rotate(angle));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.commands.push(DrawCmd::FillStyle(color.to_owned()));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.commands.push(DrawCmd::StrokeStyle(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCmd::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: &str) {
        self.commands.push(DrawCmd::LineCap(cap.to_owned()));
    }

    fn set_line_join(&mut self, join: &str) {
        self.commands.push(DrawCmd::LineJoin(join.to_owned()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCmd::GlobalAlpha(alpha));
    }

    fn set_shadow_blur(&mut self, blur: f64) {
        self.commands.push(DrawCmd::ShadowBlur(blur));
    }

    fn set_shadow_color(&mut self, color: &str) {
        self.commands.push(DrawCmd::ShadowColor(color.to_owned()));
    }
}
