//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! Events come from three independent sources (terminal input, the timer
//! queue, the interrupt flag) but are fed to the reducer one at a time, and
//! a `Redraw` effect draws immediately, before the next event is taken.

pub mod timers;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use codeflow_core::interrupt;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use self::timers::TimerQueue;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::SessionTerminal;
use crate::{render, terminal, update};

/// Longest time to block on input, so the interrupt flag is noticed.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen session runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop, panic, or a second interrupt.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: SessionTerminal,
    /// Session state.
    pub state: AppState,
    /// Pending timer deadlines.
    timers: TimerQueue,
    should_quit: bool,
    frames: u64,
}

impl TuiRuntime {
    /// Creates a runtime and enters the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            state,
            timers: TimerQueue::new(),
            should_quit: false,
            frames: 0,
        })
    }

    /// Runs the session until the user exits.
    ///
    /// # Errors
    /// Returns an error if reading input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::init(&mut self.state);
        self.execute_effects(effects)?;

        let started = Instant::now();
        let result = self.event_loop();
        tracing::info!(
            frames = self.frames,
            elapsed_ms = started.elapsed().as_millis() as u64,
            revealed = self.state.reveal.revealed_count(),
            total = self.state.reveal.len(),
            "session ended"
        );
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            // A signal ends the session exactly like Ctrl+C.
            if interrupt::is_interrupted() {
                let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
                self.dispatch(UiEvent::Terminal(Event::Key(key)))?;
                continue;
            }

            // Block until input arrives or the next timer is due.
            let poll_duration = self
                .timers
                .time_until_next(Instant::now())
                .map_or(IDLE_POLL_DURATION, |d| d.min(IDLE_POLL_DURATION));

            if event::poll(poll_duration)? {
                self.dispatch(UiEvent::Terminal(event::read()?))?;
            }

            for (kind, at) in self.timers.pop_due(Instant::now()) {
                if self.should_quit {
                    break;
                }
                self.dispatch(UiEvent::from_timer(kind, at))?;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects)
    }

    /// Executes effects returned by the reducer, in order.
    fn execute_effects(&mut self, effects: Vec<UiEffect>) -> Result<()> {
        for effect in effects {
            self.execute_effect(effect)?;
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: UiEffect) -> Result<()> {
        match effect {
            UiEffect::Schedule { timer, after } => {
                self.timers.schedule(timer, Instant::now(), after);
            }
            UiEffect::CancelTimers => self.timers.clear(),
            UiEffect::Redraw => self.draw()?,
            UiEffect::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let started = Instant::now();
        self.terminal.draw(|frame| {
            render::render(&self.state, frame);
        })?;
        self.frames += 1;
        tracing::trace!(
            frame = self.frames,
            micros = started.elapsed().as_micros() as u64,
            "frame drawn"
        );
        Ok(())
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
