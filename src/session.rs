//! Game session: lifecycle, input events and the per-frame driver
//!
//! One `GameSession` owns the simulation, the direction queue and the frame
//! clock. Front ends feed it key presses and display refresh timestamps; it
//! reports HUD values and status lines through a `Presenter`.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::highscores::HighScore;
use crate::hud::{GameOverSummary, HudSnapshot, Presenter, Status, StatusKind};
use crate::layout::Layout;
use crate::persistence::KeyValueStore;
use crate::platform::{InputCommand, map_key};
use crate::scheduler::FrameClock;
use crate::settings::{Settings, Theme};
use crate::sim::{Difficulty, Direction, DirectionQueue, GamePhase, GameState, TickEvent, tick};

/// What happened during one display frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Logic ticks executed this frame
    pub ticks: u32,
    /// Interpolation progress to draw the board with, None on the idle screen
    pub render: Option<f32>,
}

pub struct GameSession {
    state: GameState,
    queue: DirectionQueue,
    clock: FrameClock,
    layout: Layout,
    /// Viewport changed mid-game; derive a new grid on the next start
    regrid_on_start: bool,
    settings: Settings,
    high_score: HighScore,
    seeder: Pcg32,
    store: Box<dyn KeyValueStore>,
    presenter: Box<dyn Presenter>,
}

impl GameSession {
    /// Create an idle session, loading preferences and the high score from `store`
    pub fn new(
        layout: Layout,
        seed: u64,
        store: Box<dyn KeyValueStore>,
        mut presenter: Box<dyn Presenter>,
    ) -> Self {
        let settings = Settings::load(store.as_ref());
        let high_score = HighScore::load(store.as_ref());
        let mut seeder = Pcg32::seed_from_u64(seed);
        let state = GameState::new(layout.cols, layout.rows, seeder.next_u64());

        presenter.theme_changed(settings.theme);

        let mut session = Self {
            state,
            queue: DirectionQueue::new(),
            clock: FrameClock::new(),
            layout,
            regrid_on_start: false,
            settings,
            high_score,
            seeder,
            store,
            presenter,
        };
        session.publish_hud();
        session.publish_status();
        log::info!(
            "Session ready on a {}x{} grid",
            session.layout.cols,
            session.layout.rows
        );
        session
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Directional input. Starts the game from idle, otherwise queues a turn.
    pub fn on_direction(&mut self, dir: Direction) {
        match self.state.phase {
            GamePhase::Idle => self.start(),
            GamePhase::Running => {
                if !self.queue.submit(dir, self.state.direction) {
                    log::trace!("Dropped turn {:?}", dir);
                }
            }
            GamePhase::Paused | GamePhase::Dead | GamePhase::Won => {}
        }
    }

    /// Pause or resume; ignored outside Running/Paused
    pub fn on_pause_toggle(&mut self) {
        match self.state.phase {
            GamePhase::Running => {
                self.state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Running;
                // Time spent paused must not turn into a burst of ticks
                self.clock.resync();
                log::info!("Resumed");
            }
            _ => return,
        }
        self.publish_status();
    }

    /// Start or restart; ignored while a game is in progress
    pub fn on_start(&mut self) {
        if matches!(
            self.state.phase,
            GamePhase::Idle | GamePhase::Dead | GamePhase::Won
        ) {
            self.start();
        }
    }

    /// Raw key press from the front end
    pub fn on_key(&mut self, key: &str) -> bool {
        match map_key(key) {
            Some(InputCommand::Turn(dir)) => self.on_direction(dir),
            Some(InputCommand::PauseToggle) => self.on_pause_toggle(),
            Some(InputCommand::Start) => self.on_start(),
            None => return false,
        }
        true
    }

    /// Switch difficulty; applies from the next tick interval lookup
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.settings.save(self.store.as_mut());
        log::info!("Difficulty: {}", difficulty.as_str());
        if matches!(self.state.phase, GamePhase::Running | GamePhase::Paused) {
            self.publish_status();
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.save(self.store.as_mut());
        self.presenter.theme_changed(self.settings.theme);
        self.settings.theme
    }

    /// Viewport changed. The grid only changes while idle or on the next start.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.state.phase == GamePhase::Idle {
            self.layout = Layout::from_viewport(width, height);
            self.state = GameState::new(self.layout.cols, self.layout.rows, self.seeder.next_u64());
            self.publish_hud();
        } else {
            self.layout = self.layout.rescaled(width, height);
            self.regrid_on_start = true;
        }
    }

    // ------------------------------------------------------------------
    // Loop
    // ------------------------------------------------------------------

    /// Display refresh callback.
    ///
    /// Runs as many logic ticks as the banked time allows and returns the
    /// progress to render with.
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let dt = self.clock.frame_delta(now_ms);
        let mut ticks = 0;

        if self.state.phase == GamePhase::Running {
            self.clock.accumulate(dt);
            while self.clock.consume(self.tick_interval_ms()) {
                self.step();
                ticks += 1;
                if self.state.phase != GamePhase::Running {
                    break;
                }
            }
            if self.state.phase == GamePhase::Running {
                self.clock.update_progress(self.tick_interval_ms());
            }
        }

        let render = match self.state.phase {
            GamePhase::Running | GamePhase::Paused => Some(self.clock.progress()),
            // Show the exact collision frame
            GamePhase::Dead => Some(0.0),
            // Filled board stays up under the win overlay
            GamePhase::Won => Some(1.0),
            GamePhase::Idle => None,
        };

        FrameReport { ticks, render }
    }

    /// Run one logic tick immediately
    pub fn step(&mut self) -> TickEvent {
        if self.state.phase != GamePhase::Running {
            return TickEvent::Skipped;
        }
        let level = self.state.level;
        let dir = self.queue.poll(self.state.direction);
        let event = tick(&mut self.state, dir);

        if matches!(event, TickEvent::Ate | TickEvent::Won) {
            self.presenter.scored(self.state.score);
        }

        match event {
            TickEvent::Died(collision) => {
                log::info!("Collision ({:?}) at score {}", collision, self.state.score);
                self.finish(false);
            }
            TickEvent::Won => {
                log::info!("Board filled at score {}", self.state.score);
                self.finish(true);
            }
            TickEvent::Ate if self.state.level != level => {
                log::info!("Level {}", self.state.level);
                self.publish_status();
            }
            _ => {}
        }
        self.publish_hud();
        event
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tooling and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn queue(&self) -> &DirectionQueue {
        &self.queue
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Current tick length, recomputed from difficulty and level every call
    pub fn tick_interval_ms(&self) -> f64 {
        self.state.tick_interval_ms(self.settings.difficulty)
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.state.score,
            high_score: self.high_score.best,
            length: self.state.len(),
            level: self.state.level,
            completion: self.state.completion(),
        }
    }

    pub fn status(&self) -> Status {
        let difficulty = self.settings.difficulty.as_str().to_uppercase();
        match self.state.phase {
            GamePhase::Idle => Status::new(
                StatusKind::Idle,
                "AWAITING INPUT · PRESS ENTER OR AN ARROW KEY",
            ),
            GamePhase::Running => Status::new(
                StatusKind::Running,
                format!("RUNNING · {} · LV {:02}", difficulty, self.state.level),
            ),
            GamePhase::Paused => Status::new(
                StatusKind::Paused,
                format!("SUSPENDED · {} · P OR SPACE TO RESUME", difficulty),
            ),
            GamePhase::Dead => {
                Status::new(StatusKind::Dead, "SYSTEM FAILURE · COLLISION DETECTED")
            }
            GamePhase::Won => Status::new(StatusKind::Won, "SINGULARITY ACHIEVED · MAX DENSITY"),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn start(&mut self) {
        if self.regrid_on_start {
            self.layout = Layout::from_viewport(self.layout.width, self.layout.height);
            self.regrid_on_start = false;
        }
        self.state = GameState::new(self.layout.cols, self.layout.rows, self.seeder.next_u64());
        self.state.phase = GamePhase::Running;
        self.queue.clear();
        self.clock.resync();
        log::info!(
            "New game ({}, {}x{})",
            self.settings.difficulty.as_str(),
            self.layout.cols,
            self.layout.rows
        );
        self.publish_hud();
        self.publish_status();
    }

    fn finish(&mut self, won: bool) {
        let new_record = self.high_score.submit(self.state.score);
        if new_record {
            self.high_score.save(self.store.as_mut());
        }
        self.queue.clear();
        self.presenter.game_over(&GameOverSummary {
            won,
            score: self.state.score,
            high_score: self.high_score.best,
            new_record,
        });
        self.publish_status();
    }

    fn publish_hud(&mut self) {
        let hud = self.hud();
        self.presenter.hud(&hud);
    }

    fn publish_status(&mut self) {
        let status = self.status();
        self.presenter.status(&status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::{Collision, Position};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        huds: Vec<HudSnapshot>,
        statuses: Vec<Status>,
        summaries: Vec<GameOverSummary>,
        themes: Vec<Theme>,
        scores: Vec<u64>,
    }

    struct RecordingPresenter(Rc<RefCell<Recorded>>);

    impl Presenter for RecordingPresenter {
        fn hud(&mut self, hud: &HudSnapshot) {
            self.0.borrow_mut().huds.push(*hud);
        }
        fn status(&mut self, status: &Status) {
            self.0.borrow_mut().statuses.push(status.clone());
        }
        fn game_over(&mut self, summary: &GameOverSummary) {
            self.0.borrow_mut().summaries.push(*summary);
        }
        fn theme_changed(&mut self, theme: Theme) {
            self.0.borrow_mut().themes.push(theme);
        }
        fn scored(&mut self, score: u64) {
            self.0.borrow_mut().scores.push(score);
        }
    }

    fn session_with(store: MemoryStore) -> (GameSession, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let session = GameSession::new(
            Layout::with_grid(20, 20, 400.0, 400.0),
            1234,
            Box::new(store),
            Box::new(RecordingPresenter(recorded.clone())),
        );
        (session, recorded)
    }

    fn session() -> (GameSession, Rc<RefCell<Recorded>>) {
        session_with(MemoryStore::new())
    }

    /// Serpentine walk over the whole board, row by row
    fn serpentine(cols: i32, rows: i32) -> Vec<Position> {
        (0..rows)
            .flat_map(|y| {
                let row: Vec<Position> = if y % 2 == 0 {
                    (0..cols).map(|x| Position::new(x, y)).collect()
                } else {
                    (0..cols).rev().map(|x| Position::new(x, y)).collect()
                };
                row
            })
            .collect()
    }

    #[test]
    fn test_idle_until_direction() {
        let (mut session, recorded) = session();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.frame(0.0).render, None);

        session.on_direction(Direction::Up);
        assert_eq!(session.phase(), GamePhase::Running);
        // The start signal is not queued as a turn
        assert!(session.queue().is_empty());
        assert_eq!(session.state().direction, Direction::Right);
        assert_eq!(
            recorded.borrow().statuses.last().unwrap().message,
            "RUNNING · EASY · LV 01"
        );
    }

    #[test]
    fn test_fixed_step_accumulation() {
        let (mut session, _) = session();
        session.on_start();
        session.state_mut().food = Position::new(0, 0);

        // First frame only sets the time origin
        assert_eq!(session.frame(1000.0).ticks, 0);
        // Easy: 200 ms per tick, frames are clamped to 100 ms
        assert_eq!(session.frame(1100.0).ticks, 0);
        let report = session.frame(1150.0);
        assert_eq!(report.ticks, 0);
        assert!((report.render.unwrap() - 0.75).abs() < 1e-6);

        let report = session.frame(1200.0);
        assert_eq!(report.ticks, 1);
        assert_eq!(report.render, Some(0.0));
        assert_eq!(session.state().head(), Position::new(11, 10));
    }

    #[test]
    fn test_stall_does_not_burst() {
        let (mut session, _) = session();
        session.set_difficulty(Difficulty::Insane);
        session.on_start();
        session.state_mut().food = Position::new(0, 0);
        session.frame(0.0);
        // Ten seconds late: only 100 ms are credited, two 42 ms ticks
        let report = session.frame(10_000.0);
        assert_eq!(report.ticks, 2);
    }

    #[test]
    fn test_pause_resyncs_clock() {
        let (mut session, recorded) = session();
        session.on_start();
        session.state_mut().food = Position::new(0, 0);
        session.frame(0.0);
        session.frame(100.0);
        session.frame(150.0);

        session.on_pause_toggle();
        assert_eq!(session.phase(), GamePhase::Paused);
        assert_eq!(recorded.borrow().statuses.last().unwrap().kind, StatusKind::Paused);

        // Progress is frozen while paused, no ticks run
        let paused = session.frame(5_000.0);
        assert_eq!(paused.ticks, 0);
        assert!((paused.render.unwrap() - 0.75).abs() < 1e-6);
        // Direction input has no effect while paused
        session.on_direction(Direction::Up);
        assert!(session.queue().is_empty());

        session.on_pause_toggle();
        assert_eq!(session.phase(), GamePhase::Running);
        let resumed = session.frame(60_000.0);
        assert_eq!(resumed.ticks, 0);
        assert_eq!(resumed.render, Some(0.0));
        assert_eq!(session.frame(60_100.0).ticks, 0);
        assert_eq!(session.frame(60_200.0).ticks, 1);
    }

    #[test]
    fn test_turn_rejected_and_queued() {
        let (mut session, _) = session();
        session.on_start();
        session.state_mut().direction = Direction::Up;

        session.on_direction(Direction::Up);
        session.on_direction(Direction::Down);
        assert!(session.queue().is_empty());

        session.on_direction(Direction::Left);
        assert_eq!(session.queue().len(), 1);
        session.state_mut().food = Position::new(0, 0);
        session.step();
        assert_eq!(session.state().direction, Direction::Left);
        assert!(session.queue().is_empty());
    }

    #[test]
    fn test_first_fruit_scenario() {
        let (mut session, recorded) = session();
        session.on_start();
        session.state_mut().food = Position::new(15, 10);

        for _ in 0..5 {
            session.step();
        }
        let state = session.state();
        assert_eq!(state.snake, vec![Position::new(15, 10), Position::new(14, 10)]);
        assert_eq!(state.score, 10);
        assert_eq!(state.level, 1);

        assert_eq!(recorded.borrow().scores, vec![10]);
        let hud = *recorded.borrow().huds.last().unwrap();
        assert_eq!(hud.score, 10);
        assert_eq!(hud.length, 2);
        assert!((hud.completion - 1.0 / 399.0).abs() < 1e-6);
    }

    #[test]
    fn test_wall_death_updates_high_score() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "30").unwrap();
        let (mut session, recorded) = session_with(store);
        assert_eq!(session.high_score(), 30);

        session.on_start();
        {
            let state = session.state_mut();
            state.snake = (0..4).map(|i| Position::new(19 - i, 3)).collect();
            state.food = Position::new(0, 0);
            state.score = 20;
        }
        assert_eq!(session.step(), TickEvent::Died(Collision::Wall));
        assert_eq!(session.phase(), GamePhase::Dead);
        assert_eq!(session.high_score(), 30);
        assert!(!recorded.borrow().summaries[0].new_record);
        assert_eq!(session.frame(0.0).render, Some(0.0));

        // Second run beats it
        session.on_start();
        {
            let state = session.state_mut();
            state.snake = (0..4).map(|i| Position::new(19 - i, 3)).collect();
            state.food = Position::new(0, 0);
            state.score = 50;
        }
        session.step();
        assert_eq!(session.high_score(), 50);
        assert!(recorded.borrow().summaries[1].new_record);
        assert_eq!(
            session.store().get(HighScore::STORAGE_KEY).unwrap().as_deref(),
            Some("50")
        );
        assert_eq!(
            recorded.borrow().statuses.last().unwrap().kind,
            StatusKind::Dead
        );
    }

    #[test]
    fn test_dead_ignores_direction_and_pause() {
        let (mut session, _) = session();
        session.on_start();
        session.state_mut().snake = vec![Position::new(19, 0)];
        session.step();
        assert_eq!(session.phase(), GamePhase::Dead);

        session.on_direction(Direction::Left);
        session.on_pause_toggle();
        assert_eq!(session.phase(), GamePhase::Dead);
        assert!(session.queue().is_empty());

        session.on_key("Enter");
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.state().len(), 1);
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let (mut session, _) = session();
        session.on_start();
        session.state_mut().score = 70;
        session.on_start();
        assert_eq!(session.state().score, 70);
    }

    #[test]
    fn test_difficulty_applies_to_interval() {
        let (mut session, recorded) = session();
        session.on_start();
        assert_eq!(session.tick_interval_ms(), 200.0);
        session.set_difficulty(Difficulty::Hard);
        assert_eq!(session.tick_interval_ms(), 80.0);
        session.state_mut().level = 3;
        assert_eq!(session.tick_interval_ms(), 68.0);
        assert_eq!(
            recorded.borrow().statuses.last().unwrap().message,
            "RUNNING · HARD · LV 01"
        );
    }

    #[test]
    fn test_theme_toggle_persists() {
        let (mut session, recorded) = session();
        assert_eq!(session.toggle_theme(), Theme::Light);
        assert_eq!(
            session.store().get(Settings::THEME_KEY).unwrap().as_deref(),
            Some("light")
        );
        assert_eq!(recorded.borrow().themes, vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_resize_mid_game_keeps_grid() {
        let (mut session, _) = session();
        session.on_start();
        session.resize(880.0, 440.0);
        assert_eq!(session.layout().cols, 20);
        assert_eq!(session.layout().rows, 20);
        assert!((session.layout().cell_w - 44.0).abs() < 1e-4);

        // Restart picks up the new viewport
        session.state_mut().snake = vec![Position::new(19, 0)];
        session.step();
        session.on_start();
        assert_eq!(session.layout().cols, 44);
        assert_eq!(session.state().cols, 44);
    }

    #[test]
    fn test_level_up_refreshes_status() {
        let (mut session, recorded) = session();
        session.on_start();
        session.state_mut().fruits_eaten = 4;
        let food = session.state().head().step(Direction::Right);
        session.state_mut().food = food;
        assert_eq!(session.step(), TickEvent::Ate);
        assert_eq!(
            recorded.borrow().statuses.last().unwrap().message,
            "RUNNING · EASY · LV 02"
        );
    }

    #[test]
    fn test_filling_board_wins_and_stops() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut session = GameSession::new(
            Layout::with_grid(16, 12, 320.0, 240.0),
            1234,
            Box::new(MemoryStore::new()),
            Box::new(RecordingPresenter(recorded.clone())),
        );
        session.on_start();
        let path = serpentine(16, 12);
        {
            let state = session.state_mut();
            state.snake = path[..191].iter().rev().copied().collect();
            state.food = path[191];
            state.direction = Direction::Left;
            state.score = 500;
        }

        assert_eq!(session.step(), TickEvent::Won);
        assert_eq!(session.phase(), GamePhase::Won);
        assert_eq!(session.state().len(), 192);
        assert_eq!(session.high_score(), 510);
        assert_eq!(
            session.store().get(HighScore::STORAGE_KEY).unwrap().as_deref(),
            Some("510")
        );
        {
            let recorded = recorded.borrow();
            assert_eq!(
                recorded.summaries.last(),
                Some(&GameOverSummary {
                    won: true,
                    score: 510,
                    high_score: 510,
                    new_record: true,
                })
            );
            assert_eq!(recorded.statuses.last().unwrap().kind, StatusKind::Won);
            assert_eq!(recorded.scores, vec![510]);
        }

        // No more ticks; the full board keeps being drawn
        let board = session.state().snake.clone();
        for now in [0.0, 1_000.0, 2_000.0] {
            assert_eq!(
                session.frame(now),
                FrameReport {
                    ticks: 0,
                    render: Some(1.0),
                }
            );
        }
        session.on_direction(Direction::Up);
        session.on_pause_toggle();
        assert_eq!(session.phase(), GamePhase::Won);
        assert!(session.queue().is_empty());
        assert_eq!(session.step(), TickEvent::Skipped);
        assert_eq!(session.state().snake, board);
    }

    #[test]
    fn test_difficulty_remembered_across_sessions() {
        let (mut session, _) = session();
        session.set_difficulty(Difficulty::Insane);

        let mut store = MemoryStore::new();
        for key in [Settings::STORAGE_KEY, Settings::THEME_KEY] {
            if let Some(value) = session.store().get(key).unwrap() {
                store.set(key, &value).unwrap();
            }
        }
        let (restored, _) = session_with(store);
        assert_eq!(restored.settings().difficulty, Difficulty::Insane);
        assert_eq!(restored.tick_interval_ms(), 42.0);
    }
}
