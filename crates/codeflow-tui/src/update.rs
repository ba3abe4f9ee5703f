//! Session reducer (update function).
//!
//! All state mutations happen here. The runtime calls `init` once and then
//! `update(app, event)` for every event, executing the returned effects.
//! Events are handled strictly one at a time.
//!
//! | event           | Autoplay                  | Interactive               |
//! |-----------------|---------------------------|---------------------------|
//! | Esc / Ctrl+C    | Terminated                | Terminated                |
//! | other key       | ignored                   | reveal one char           |
//! | Tick            | reveal one char, re-arm   | ignored                   |
//! | CursorTick      | toggle, re-arm            | toggle, re-arm            |
//! | ProgressFrame   | step spring               | step spring               |
//!
//! Once `Terminated`, every event is ignored.

use codeflow_core::config::Mode;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::{TimerKind, UiEffect};
use crate::events::UiEvent;
use crate::features::progress::FRAME_DURATION;
use crate::state::{AppState, Phase};

/// Effects for the start of a session.
///
/// Arms the cursor blink and, in autoplay, the reveal timer. Empty content
/// starts out `Done`.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = vec![UiEffect::Schedule {
        timer: TimerKind::CursorBlink,
        after: app.mode().blink_interval(),
    }];

    if app.reveal.is_complete() {
        app.phase = Phase::Done;
    } else if app.mode() == Mode::Autoplay {
        effects.push(UiEffect::Schedule {
            timer: TimerKind::Reveal,
            after: app.config.speed.reveal_interval(),
        });
    }

    push_progress_target(app, &mut effects);
    effects.push(UiEffect::Redraw);

    tracing::debug!(
        mode = ?app.mode(),
        chars = app.reveal.len(),
        language = app.highlighter.language(),
        "session started"
    );
    effects
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    if app.is_terminated() {
        return vec![];
    }

    match event {
        UiEvent::Tick => handle_tick(app),
        UiEvent::CursorTick { at } => {
            app.cursor.toggle(at);
            vec![
                UiEffect::Schedule {
                    timer: TimerKind::CursorBlink,
                    after: app.mode().blink_interval(),
                },
                UiEffect::Redraw,
            ]
        }
        UiEvent::ProgressFrame => {
            let mut effects = Vec::with_capacity(2);
            if app.progress.on_frame() {
                effects.push(UiEffect::Schedule {
                    timer: TimerKind::ProgressFrame,
                    after: FRAME_DURATION,
                });
            }
            effects.push(UiEffect::Redraw);
            effects
        }
        UiEvent::Terminal(Event::Key(key)) => handle_key(app, key),
        UiEvent::Terminal(Event::Resize(..)) => vec![UiEffect::Redraw],
        UiEvent::Terminal(_) => vec![],
    }
}

fn handle_tick(app: &mut AppState) -> Vec<UiEffect> {
    // Keystrokes are the only pace in interactive mode.
    if app.mode() != Mode::Autoplay || app.phase != Phase::Running {
        return vec![];
    }

    let effects = reveal_next(app);
    if app.phase != Phase::Running {
        return effects;
    }

    // Armed ahead of Redraw: the pace excludes drawing time.
    let mut rearmed = Vec::with_capacity(effects.len() + 1);
    rearmed.push(UiEffect::Schedule {
        timer: TimerKind::Reveal,
        after: app.config.speed.reveal_interval(),
    });
    rearmed.extend(effects);
    rearmed
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return vec![];
    }

    if is_exit_key(&key) {
        return terminate(app);
    }

    if app.mode() == Mode::Interactive && app.phase == Phase::Running {
        return reveal_next(app);
    }

    vec![]
}

/// Esc or Ctrl+C.
pub fn is_exit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c' | 'C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn terminate(app: &mut AppState) -> Vec<UiEffect> {
    tracing::debug!(
        revealed = app.reveal.revealed_count(),
        total = app.reveal.len(),
        "session terminated"
    );
    app.phase = Phase::Terminated;
    vec![UiEffect::CancelTimers, UiEffect::Quit]
}

fn reveal_next(app: &mut AppState) -> Vec<UiEffect> {
    let (_, complete) = app.reveal.advance_one();
    if complete {
        app.phase = Phase::Done;
        tracing::debug!(chars = app.reveal.len(), "reveal complete");
    }

    let mut effects = Vec::with_capacity(3);
    push_progress_target(app, &mut effects);
    effects.push(UiEffect::Redraw);
    effects
}

fn push_progress_target(app: &mut AppState, effects: &mut Vec<UiEffect>) {
    if app.progress.set_target(app.reveal.fraction()) {
        effects.push(UiEffect::Schedule {
            timer: TimerKind::ProgressFrame,
            after: FRAME_DURATION,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::{Duration, Instant};

    use codeflow_core::config::{SessionConfig, Speed};
    use codeflow_core::highlight::Highlighter;
    use codeflow_core::themes::ThemeRegistry;
    use crossterm::event::KeyEventState;

    use super::*;
    use crate::runtime::timers::TimerQueue;

    fn app(mode: Mode, speed: i64, content: &str) -> AppState {
        let theme = ThemeRegistry::load(None)
            .unwrap()
            .get("base16-ocean.dark")
            .unwrap();
        let highlighter = Highlighter::for_path(Path::new("sample.txt"), theme);
        AppState::new(
            SessionConfig::new(mode, Speed::new(speed).unwrap()),
            content,
            highlighter,
        )
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl_c() -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
    }

    fn schedules(effects: &[UiEffect], timer: TimerKind) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, UiEffect::Schedule { timer: t, .. } if *t == timer))
    }

    fn redraws(effects: &[UiEffect]) -> usize {
        effects.iter().filter(|e| **e == UiEffect::Redraw).count()
    }

    /// Minimal stand-in for the runtime: executes effects against a fake clock.
    struct Harness {
        app: AppState,
        timers: TimerQueue,
        now: Instant,
        redraws: usize,
        ticks: usize,
        frames: usize,
        quit: bool,
    }

    impl Harness {
        fn new(app: AppState) -> Self {
            let mut harness = Self {
                app,
                timers: TimerQueue::new(),
                now: Instant::now(),
                redraws: 0,
                ticks: 0,
                frames: 0,
                quit: false,
            };
            let effects = init(&mut harness.app);
            harness.apply(effects);
            harness
        }

        fn apply(&mut self, effects: Vec<UiEffect>) {
            for effect in effects {
                match effect {
                    UiEffect::Schedule { timer, after } => {
                        self.timers.schedule(timer, self.now, after);
                    }
                    UiEffect::CancelTimers => self.timers.clear(),
                    UiEffect::Redraw => self.redraws += 1,
                    UiEffect::Quit => self.quit = true,
                }
            }
        }

        fn dispatch(&mut self, event: UiEvent) {
            match event {
                UiEvent::Tick => self.ticks += 1,
                UiEvent::ProgressFrame => self.frames += 1,
                _ => {}
            }
            let effects = update(&mut self.app, event);
            self.apply(effects);
        }

        /// Advances the fake clock to the next deadline and fires it.
        fn step(&mut self) -> bool {
            let Some(next) = self.timers.next_deadline() else {
                return false;
            };
            self.now = next;
            for (kind, at) in self.timers.pop_due(self.now) {
                self.dispatch(UiEvent::from_timer(kind, at));
            }
            true
        }
    }

    #[test]
    fn test_interactive_two_characters() {
        let mut h = Harness::new(app(Mode::Interactive, 20, "ab"));
        assert_eq!(h.app.reveal.revealed_count(), 0);
        assert!(!h.timers.is_scheduled(TimerKind::Reveal));

        let redraws_before = h.redraws;
        h.dispatch(key(KeyCode::Char('x')));
        assert_eq!(h.app.reveal.revealed_count(), 1);
        assert_eq!(h.redraws, redraws_before + 1);
        assert!(!h.app.reveal.is_complete());
        assert_eq!(h.app.phase, Phase::Running);

        h.dispatch(key(KeyCode::Enter));
        assert_eq!(h.app.reveal.revealed_count(), 2);
        assert!(h.app.reveal.is_complete());
        assert_eq!(h.app.phase, Phase::Done);

        h.dispatch(key(KeyCode::Char('y')));
        assert_eq!(h.app.reveal.revealed_count(), 2);
        assert_eq!(h.app.phase, Phase::Done);
    }

    #[test]
    fn test_interactive_ignores_ticks() {
        let mut a = app(Mode::Interactive, 20, "abc");
        init(&mut a);
        let effects = update(&mut a, UiEvent::Tick);
        assert!(effects.is_empty());
        assert_eq!(a.reveal.revealed_count(), 0);
    }

    #[test]
    fn test_autoplay_ignores_ordinary_keys() {
        let mut a = app(Mode::Autoplay, 20, "abc");
        init(&mut a);
        let effects = update(&mut a, key(KeyCode::Char('a')));
        assert!(effects.is_empty());
        assert_eq!(a.reveal.revealed_count(), 0);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut a = app(Mode::Interactive, 20, "abc");
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        let effects = update(&mut a, UiEvent::Terminal(Event::Key(release)));
        assert!(effects.is_empty());
        assert_eq!(a.reveal.revealed_count(), 0);
    }

    #[test]
    fn test_autoplay_tick_reschedules_until_done() {
        let mut a = app(Mode::Autoplay, 20, "ab");
        let effects = init(&mut a);
        assert!(effects.contains(&UiEffect::Schedule {
            timer: TimerKind::Reveal,
            after: Duration::from_millis(50),
        }));

        let effects = update(&mut a, UiEvent::Tick);
        assert!(schedules(&effects, TimerKind::Reveal));
        assert_eq!(redraws(&effects), 1);

        let effects = update(&mut a, UiEvent::Tick);
        assert!(!schedules(&effects, TimerKind::Reveal));
        assert_eq!(a.phase, Phase::Done);

        // A stray tick after completion does nothing.
        assert!(update(&mut a, UiEvent::Tick).is_empty());
        assert_eq!(a.reveal.revealed_count(), 2);
    }

    #[test]
    fn test_reveal_timer_is_armed_before_the_frame_is_drawn() {
        let mut a = app(Mode::Autoplay, 20, "abc");
        init(&mut a);

        let effects = update(&mut a, UiEvent::Tick);
        let armed = effects
            .iter()
            .position(|e| matches!(e, UiEffect::Schedule { timer: TimerKind::Reveal, .. }))
            .expect("reveal timer re-armed");
        let drawn = effects
            .iter()
            .position(|e| *e == UiEffect::Redraw)
            .expect("frame requested");
        assert!(armed < drawn, "effects: {effects:?}");
        assert_eq!(
            effects[armed],
            UiEffect::Schedule {
                timer: TimerKind::Reveal,
                after: Duration::from_millis(50),
            }
        );
    }

    #[test]
    fn test_autoplay_2000_chars_at_speed_20() {
        let content = "x".repeat(2000);
        let mut h = Harness::new(app(Mode::Autoplay, 20, &content));
        let start = h.now;

        let mut last_reveal_at = start;
        while h.app.phase == Phase::Running {
            let before = h.app.reveal.revealed_count();
            assert!(h.step());
            if h.app.reveal.revealed_count() > before {
                last_reveal_at = h.now;
            }
        }

        assert_eq!(h.ticks, 2000);
        assert_eq!(h.app.reveal.revealed_count(), 2000);
        assert_eq!(last_reveal_at - start, Duration::from_millis(50 * 2000));
        assert!(!h.timers.is_scheduled(TimerKind::Reveal));

        // Cursor keeps blinking after Done, but no reveal ticks come back.
        for _ in 0..20 {
            h.step();
        }
        assert_eq!(h.ticks, 2000);
        assert!(h.timers.is_scheduled(TimerKind::CursorBlink));
    }

    #[test]
    fn test_cursor_alternates_with_mode_cadence() {
        for (mode, cadence) in [
            (Mode::Autoplay, Duration::from_millis(250)),
            (Mode::Interactive, Duration::from_millis(500)),
        ] {
            let mut a = app(mode, 20, "abc");
            init(&mut a);
            let t0 = Instant::now();
            let mut expected = true;
            for i in 0..6 {
                let effects = update(&mut a, UiEvent::CursorTick { at: t0 });
                expected = !expected;
                assert_eq!(a.cursor.is_visible(), expected, "tick {i}");
                assert!(effects.contains(&UiEffect::Schedule {
                    timer: TimerKind::CursorBlink,
                    after: cadence,
                }));
                assert_eq!(redraws(&effects), 1);
            }
        }
    }

    #[test]
    fn test_exit_keys_terminate_from_any_phase() {
        for exit in [key(KeyCode::Esc), ctrl_c()] {
            for mode in [Mode::Autoplay, Mode::Interactive] {
                // Running
                let mut h = Harness::new(app(mode, 20, "abc"));
                h.dispatch(exit.clone());
                assert_eq!(h.app.phase, Phase::Terminated);
                assert!(h.quit);
                assert!(h.timers.is_empty());

                // Done
                let mut h = Harness::new(app(mode, 20, ""));
                assert_eq!(h.app.phase, Phase::Done);
                h.dispatch(exit.clone());
                assert_eq!(h.app.phase, Phase::Terminated);
                assert!(h.timers.is_empty());
            }
        }
    }

    #[test]
    fn test_terminated_ignores_everything() {
        let mut a = app(Mode::Interactive, 20, "abc");
        init(&mut a);
        update(&mut a, key(KeyCode::Esc));

        let visible = a.cursor.is_visible();
        for event in [
            UiEvent::Tick,
            UiEvent::CursorTick {
                at: Instant::now(),
            },
            UiEvent::ProgressFrame,
            key(KeyCode::Char('a')),
            key(KeyCode::Esc),
        ] {
            assert!(update(&mut a, event).is_empty());
        }
        assert_eq!(a.cursor.is_visible(), visible);
        assert_eq!(a.reveal.revealed_count(), 0);
    }

    #[test]
    fn test_plain_c_is_not_an_exit_key() {
        let mut a = app(Mode::Interactive, 20, "abc");
        init(&mut a);
        update(&mut a, key(KeyCode::Char('c')));
        assert_eq!(a.phase, Phase::Running);
        assert_eq!(a.reveal.revealed_count(), 1);
    }

    #[test]
    fn test_progress_frames_run_until_settled() {
        let mut h = Harness::new(app(Mode::Interactive, 20, "ab"));
        h.dispatch(key(KeyCode::Char('a')));
        assert!(h.timers.is_scheduled(TimerKind::ProgressFrame));

        while h.timers.is_scheduled(TimerKind::ProgressFrame) {
            assert!(h.step());
            assert!(h.frames < 500, "progress never settled");
        }
        assert!(h.frames > 1);
        assert!((h.app.progress.shown() - 0.5).abs() < 0.001);
        // Progress animation never reveals anything.
        assert_eq!(h.app.reveal.revealed_count(), 1);
    }

    #[test]
    fn test_every_reveal_requests_exactly_one_redraw() {
        let mut a = app(Mode::Interactive, 20, "hello");
        init(&mut a);
        for _ in 0..5 {
            let effects = update(&mut a, key(KeyCode::Char(' ')));
            assert_eq!(redraws(&effects), 1);
        }
    }

    #[test]
    fn test_resize_redraws_without_state_change() {
        let mut a = app(Mode::Interactive, 20, "abc");
        init(&mut a);
        let effects = update(&mut a, UiEvent::Terminal(Event::Resize(80, 24)));
        assert_eq!(effects, vec![UiEffect::Redraw]);
        assert_eq!(a.reveal.revealed_count(), 0);
    }

    #[test]
    fn test_empty_content_starts_done() {
        let mut a = app(Mode::Autoplay, 20, "");
        let effects = init(&mut a);
        assert_eq!(a.phase, Phase::Done);
        assert!(!schedules(&effects, TimerKind::Reveal));
        assert!(schedules(&effects, TimerKind::CursorBlink));
    }
}
