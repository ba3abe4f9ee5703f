//! Animated progress bar.
//!
//! The reveal controller sets a target fraction; the bar then eases toward
//! it on its own frame clock using a critically damped spring, so the bar
//! glides even when the reveal jumps.

use std::time::Duration;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Animation frame cadence (60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Total bar width in cells, percentage included.
pub const BAR_WIDTH: usize = 40;

const FULL_CHAR: char = '█';
const EMPTY_CHAR: char = '░';
const GRADIENT_START: (u8, u8, u8) = (0x5A, 0x56, 0xE0);
const GRADIENT_END: (u8, u8, u8) = (0xEE, 0x6F, 0xF8);
const EMPTY_COLOR: Color = Color::Rgb(0x60, 0x60, 0x60);

const SPRING_FPS: f64 = 60.0;
const SPRING_FREQUENCY: f64 = 18.0;
const SETTLE_DISTANCE: f64 = 0.001;
const SETTLE_VELOCITY: f64 = 0.01;

/// Spring-animated progress position.
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    target: f64,
    shown: f64,
    velocity: f64,
    animating: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fraction to ease toward (clamped to `[0, 1]`).
    ///
    /// Returns true when this starts a new animation, i.e. the caller must
    /// schedule the first animation frame.
    pub fn set_target(&mut self, fraction: f64) -> bool {
        self.target = fraction.clamp(0.0, 1.0);
        let was_animating = self.animating;
        self.animating = !self.is_settled();
        self.animating && !was_animating
    }

    /// Advances the spring by one frame. Returns true while still moving.
    pub fn on_frame(&mut self) -> bool {
        if !self.animating {
            return false;
        }

        // Critically damped spring (damping ratio 1):
        // x(t) = (x0 + (v0 + w*x0) t) e^(-w t)
        let dt = 1.0 / SPRING_FPS;
        let w = SPRING_FREQUENCY;
        let exp_term = (-w * dt).exp();
        let time_exp = dt * exp_term;
        let time_exp_freq = time_exp * w;

        let offset = self.shown - self.target;
        let new_offset = offset * (time_exp_freq + exp_term) + self.velocity * time_exp;
        self.velocity = offset * (-w * time_exp_freq) + self.velocity * (exp_term - time_exp_freq);
        self.shown = self.target + new_offset;

        if self.is_settled() {
            self.shown = self.target;
            self.velocity = 0.0;
            self.animating = false;
        }
        self.animating
    }

    fn is_settled(&self) -> bool {
        (self.shown - self.target).abs() < SETTLE_DISTANCE && self.velocity.abs() < SETTLE_VELOCITY
    }

    /// Currently displayed fraction.
    pub fn shown(&self) -> f64 {
        self.shown
    }

    /// Renders the bar followed by the percentage.
    pub fn line(&self) -> Line<'static> {
        let percent = self.shown.clamp(0.0, 1.0);
        let label = format!(" {:>3.0}%", percent * 100.0);
        let bar_width = BAR_WIDTH.saturating_sub(label.chars().count());
        let filled = ((bar_width as f64) * percent).round() as usize;
        let filled = filled.min(bar_width);

        let mut spans = Vec::with_capacity(filled + 2);
        for i in 0..filled {
            let t = if bar_width > 1 {
                i as f64 / (bar_width - 1) as f64
            } else {
                0.0
            };
            spans.push(Span::styled(
                FULL_CHAR.to_string(),
                Style::default().fg(blend(GRADIENT_START, GRADIENT_END, t)),
            ));
        }
        if bar_width > filled {
            spans.push(Span::styled(
                EMPTY_CHAR.to_string().repeat(bar_width - filled),
                Style::default().fg(EMPTY_COLOR),
            ));
        }
        spans.push(Span::raw(label));
        Line::from(spans)
    }
}

fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> Color {
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
