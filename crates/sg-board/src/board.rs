//! The board: one brush, one surface, one stroke.
//!
//! Lifecycle: construct against fixed pixel dimensions, `set_board` with a
//! fetched (or standalone) setup, `set_enabled(true)`, then feed pointer
//! events. The board disables itself when the brush runs dry and reports
//! it exactly once.

use crate::input::InputEvent;
use rand::Rng;
use sg_core::model::{BoardSetup, Color};
use sg_core::Brush;
use sg_render::{RenderError, Surface};

/// Height of the ink gauge bar, in pixels.
const GAUGE_HEIGHT: f32 = 15.0;

/// Lifecycle notifications, returned from [`Board::handle_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSignal {
    /// First frame actually rendered. One-shot; unlocks UI that should wait
    /// for real ink rather than for the surface being enabled.
    DrawingStarted,
    /// Ink exhausted; the board has disabled itself. One-shot. The finished
    /// raster is available via [`Board::capture_png`].
    StrokeComplete,
}

/// The ink-pot indicator: a brush-colored bar whose width tracks
/// remaining ink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkGauge {
    pub width_px: f32,
    pub height_px: f32,
    pub color: Color,
}

/// A drawing board bound to a fixed-size surface.
pub struct Board {
    surface: Surface,
    brush: Option<Brush>,
    enabled: bool,
    started: bool,
    completed: bool,
    gauge: InkGauge,
}

impl Board {
    /// A bare board with no brush yet; `set_board` arms it.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let surface = Surface::new(width, height, Color::rgba(0.0, 0.0, 0.0, 0.0))?;
        Ok(Self {
            surface,
            brush: None,
            enabled: false,
            started: false,
            completed: false,
            gauge: InkGauge {
                width_px: 0.0,
                height_px: GAUGE_HEIGHT,
                color: Color::BLACK,
            },
        })
    }

    /// Arm the board from a session setup: fresh brush, background color,
    /// guide pattern, full gauge. Uses the thread RNG for bristles.
    pub fn set_board(&mut self, setup: &BoardSetup) -> Result<(), RenderError> {
        self.set_board_with_rng(setup, &mut rand::thread_rng())
    }

    /// As [`Board::set_board`], with an explicit RNG for deterministic tests.
    pub fn set_board_with_rng<R: Rng + ?Sized>(
        &mut self,
        setup: &BoardSetup,
        rng: &mut R,
    ) -> Result<(), RenderError> {
        let (w, h) = (self.surface.width(), self.surface.height());
        self.surface = Surface::new(w, h, setup.background)?;
        self.surface.install_guides(&setup.guides);

        let brush = Brush::with_rng(&setup.brush, w as f32, h as f32, rng);
        self.gauge = InkGauge {
            width_px: w as f32,
            height_px: GAUGE_HEIGHT,
            color: setup.brush.color,
        };
        self.brush = Some(brush);
        self.started = false;
        self.completed = false;
        log::info!("board armed: {w}x{h}, ink {}", setup.brush.ink);
        Ok(())
    }

    /// Gate input routing. Disabling forces the brush to pen-up so a
    /// re-enable cannot resume a stale gesture.
    pub fn set_enabled(&mut self, on: bool) {
        self.enabled = on;
        if !on && let Some(brush) = self.brush.as_mut() {
            brush.up();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn gauge(&self) -> &InkGauge {
        &self.gauge
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn brush(&self) -> Option<&Brush> {
        self.brush.as_ref()
    }

    /// The submission artifact: stroke layer only.
    pub fn capture_png(&self) -> Result<Vec<u8>, RenderError> {
        self.surface.capture_png()
    }

    /// The download artifact: background, guides, and strokes flattened.
    pub fn composite_png(&self) -> Result<Vec<u8>, RenderError> {
        self.surface.composite_png()
    }

    /// Route one normalized pointer event.
    ///
    /// Disabled or unarmed boards ignore everything. Move events advance
    /// the brush; a returned frame is painted, the gauge updated, and the
    /// one-shot signals emitted as they latch.
    pub fn handle_input(&mut self, event: InputEvent) -> Vec<BoardSignal> {
        let mut signals = Vec::new();
        if !self.enabled {
            return signals;
        }
        let Some(brush) = self.brush.as_mut() else {
            log::warn!("input before set_board ignored");
            return signals;
        };

        match event {
            InputEvent::PointerDown { .. } => brush.down(),
            InputEvent::PointerUp { .. } => brush.up(),
            InputEvent::PointerMove { x, y } => {
                let Some(frame) = brush.advance(x, y) else {
                    return signals;
                };
                let color = brush.color();
                let ratio = brush.remaining_ink() / brush.ink_budget();
                let exhausted = brush.is_exhausted();

                self.surface.paint_frame(&frame, color);
                self.gauge.width_px = (ratio * self.surface.width() as f32).max(0.0);

                if !self.started {
                    self.started = true;
                    signals.push(BoardSignal::DrawingStarted);
                }
                if exhausted && !self.completed {
                    self.completed = true;
                    self.set_enabled(false);
                    signals.push(BoardSignal::StrokeComplete);
                }
            }
        }
        signals
    }
}
