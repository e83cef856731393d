//! Session driver
//!
//! Owns one run at a time and everything that outlives a run: the best
//! score, the injected store and presenter, the input adapter and the seed
//! sequence. Hosts call `frame` once per animation frame and feed raw input
//! through `handle_input`.

use crate::highscores::HighScoreStore;
use crate::input::{InputAdapter, InputEvent};
use crate::settings::Settings;
use crate::sim::autopilot;
use crate::sim::{
    FrameContext, GameEvent, GamePhase, GameState, Intent, PlayMode, RenderSnapshot, tick,
};

/// Receives session callbacks (HUD, overlays, logging)
pub trait Presenter {
    fn on_score_changed(&mut self, score: u64);
    fn on_game_over(&mut self, final_score: u64);
    /// A new record was written to the store
    fn on_high_score(&mut self, _score: u64) {}
}

/// Step a seed to the next run's seed (PCG multiplier/increment)
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

pub struct Game<S: HighScoreStore, P: Presenter> {
    state: GameState,
    store: S,
    presenter: P,
    input: InputAdapter,
    settings: Settings,
    high_score: u64,
    /// Seed for the next restart when no fixed seed is configured
    seed_cursor: u64,
    autopilot: bool,
}

impl<S: HighScoreStore, P: Presenter> Game<S, P> {
    /// Build a session in the `Ready` phase, loading the best score
    pub fn new(settings: Settings, seed: u64, store: S, presenter: P) -> Self {
        let high_score = match store.load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not load high score, starting from 0: {}", e);
                0
            }
        };
        log::info!("High score: {}", high_score);

        let run_seed = settings.seed.unwrap_or(seed);
        Self {
            state: GameState::new(run_seed, settings.mode, settings.tuning.clone()),
            store,
            presenter,
            input: InputAdapter::new(settings.mode, settings.swipe_threshold_px),
            settings,
            high_score,
            seed_cursor: seed,
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.state.snapshot(self.high_score)
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.autopilot = enabled;
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.set_autopilot(!self.autopilot);
        self.autopilot
    }

    /// Begin the first run (no-op unless `Ready`)
    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    /// Throw away the current run and start a fresh one
    pub fn restart(&mut self) {
        self.seed_cursor = next_seed(self.seed_cursor);
        let seed = self.settings.seed.unwrap_or(self.seed_cursor);
        self.state = GameState::new(seed, self.settings.mode, self.settings.tuning.clone());
        self.input.clear_held();
        log::info!("Restarting with seed {}", seed);
        self.state.start();
        self.presenter.on_score_changed(0);
    }

    pub fn mode(&self) -> PlayMode {
        self.input.mode()
    }

    /// Switch play mode. A run in progress is abandoned and a fresh one in
    /// the new mode starts; before the first start the session stays `Ready`.
    pub fn set_mode(&mut self, mode: PlayMode) -> bool {
        if mode == self.settings.mode {
            return false;
        }
        log::info!("Play mode: {}", mode.as_str());
        self.settings.mode = mode;
        self.input.set_mode(mode);
        if self.state.phase == GamePhase::Ready {
            let seed = self.state.seed;
            self.state = GameState::new(seed, mode, self.settings.tuning.clone());
        } else {
            self.restart();
        }
        true
    }

    /// Pause if running (focus loss); releases anything held
    pub fn pause(&mut self) -> bool {
        self.input.clear_held();
        self.state.apply_intent(Intent::Duck(false));
        if self.state.is_running() {
            log::info!("Paused");
            return self.state.apply_intent(Intent::TogglePause);
        }
        false
    }

    /// Apply an intent; `Start` begins or restarts a run
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Start => match self.state.phase {
                GamePhase::Ready => self.start(),
                GamePhase::GameOver => {
                    self.restart();
                    true
                }
                GamePhase::Running | GamePhase::Paused => false,
            },
            other => self.state.apply_intent(other),
        }
    }

    /// Translate and apply one raw input event
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match self.input.translate(&event) {
            Some(intent) => self.apply_intent(intent),
            None => false,
        }
    }

    /// Advance one host frame and dispatch callbacks
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.autopilot {
            if let Some(intent) = autopilot::suggest(&self.state) {
                self.state.apply_intent(intent);
            }
        }

        let events = tick(&mut self.state, FrameContext::new(dt));
        for event in &events {
            match *event {
                GameEvent::ScoreChanged(score) => self.presenter.on_score_changed(score),
                GameEvent::GameOver { final_score, .. } => {
                    self.presenter.on_game_over(final_score);
                    self.record_high_score(final_score);
                }
                _ => {}
            }
        }
        events
    }

    /// Persist `score` if it beats the best; equal scores are not written
    fn record_high_score(&mut self, score: u64) {
        if score <= self.high_score {
            return;
        }
        self.high_score = score;
        match self.store.save(score) {
            Ok(()) => {
                log::info!("New high score: {}", score);
                self.presenter.on_high_score(score);
            }
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::highscores::{MemoryStore, StorageError};
    use crate::input::Key;
    use crate::sim::EntityKind;

    #[derive(Debug, Default)]
    struct Recorder {
        scores: Vec<u64>,
        game_overs: Vec<u64>,
        highs: Vec<u64>,
    }

    impl Presenter for Recorder {
        fn on_score_changed(&mut self, score: u64) {
            self.scores.push(score);
        }

        fn on_game_over(&mut self, final_score: u64) {
            self.game_overs.push(final_score);
        }

        fn on_high_score(&mut self, score: u64) {
            self.highs.push(score);
        }
    }

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<u64, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn save(&mut self, _score: u64) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn quiet_settings() -> Settings {
        let mut settings = Settings::default();
        settings.tuning.distance_score_interval = 0.0;
        settings
    }

    fn game(store: MemoryStore) -> Game<MemoryStore, Recorder> {
        Game::new(quiet_settings(), 7, store, Recorder::default())
    }

    /// Start a run that ends on a palm with exactly `score` points
    fn crash_with_score<S: HighScoreStore>(game: &mut Game<S, Recorder>, score: u64) {
        game.start();
        game.state.difficulty.max_entities = 1;
        game.state.entities.spawn(EntityKind::Palm, 0.0, -3.0);
        game.state.score = score;
        for _ in 0..120 {
            game.frame(SIM_DT);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_loads_high_score() {
        let g = game(MemoryStore::with_score(55));
        assert_eq!(g.high_score(), 55);
        assert_eq!(g.snapshot().high_score, 55);
        assert_eq!(g.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_load_failure_defaults_to_zero() {
        let mut g = Game::new(quiet_settings(), 1, BrokenStore, Recorder::default());
        assert_eq!(g.high_score(), 0);

        // Save failure is logged, the run still ends cleanly
        crash_with_score(&mut g, 12);
        assert_eq!(g.presenter().game_overs, vec![12]);
        assert!(g.presenter().highs.is_empty());
    }

    #[test]
    fn test_equal_score_not_written() {
        let mut g = game(MemoryStore::with_score(20));
        crash_with_score(&mut g, 20);
        assert_eq!(g.store().writes(), 0);
        assert_eq!(g.high_score(), 20);
        assert!(g.presenter().highs.is_empty());
    }

    #[test]
    fn test_greater_score_written_once() {
        let mut g = game(MemoryStore::with_score(20));
        crash_with_score(&mut g, 21);
        assert_eq!(g.store().writes(), 1);
        assert_eq!(g.store().stored(), Some(21));
        assert_eq!(g.high_score(), 21);
        assert_eq!(g.presenter().highs, vec![21]);

        // More frames after game over change nothing
        for _ in 0..30 {
            assert!(g.frame(SIM_DT).is_empty());
        }
        assert_eq!(g.presenter().game_overs, vec![21]);
        assert_eq!(g.store().writes(), 1);
    }

    #[test]
    fn test_enter_starts_and_restarts() {
        let mut g = game(MemoryStore::new());
        assert!(g.handle_input(InputEvent::KeyDown { key: Key::Confirm, repeat: false }));
        assert_eq!(g.phase(), GamePhase::Running);
        let first_seed = g.state().seed;

        // Enter mid-run does nothing
        g.handle_input(InputEvent::KeyUp { key: Key::Confirm });
        assert!(!g.handle_input(InputEvent::KeyDown { key: Key::Confirm, repeat: false }));

        g.state.phase = GamePhase::GameOver;
        g.handle_input(InputEvent::KeyUp { key: Key::Confirm });
        assert!(g.handle_input(InputEvent::KeyDown { key: Key::Confirm, repeat: false }));
        assert_eq!(g.phase(), GamePhase::Running);
        assert_eq!(g.state().score, 0);
        assert_ne!(g.state().seed, first_seed);
    }

    #[test]
    fn test_fixed_seed_repeats() {
        let settings = Settings {
            seed: Some(99),
            ..quiet_settings()
        };
        let mut g = Game::new(settings, 1, MemoryStore::new(), Recorder::default());
        assert_eq!(g.state().seed, 99);
        g.start();
        g.state.phase = GamePhase::GameOver;
        g.apply_intent(Intent::Start);
        assert_eq!(g.state().seed, 99);
    }

    #[test]
    fn test_score_callbacks() {
        let mut g = game(MemoryStore::new());
        g.start();
        g.state.difficulty.max_entities = 1;
        g.state.entities.spawn(EntityKind::Chest, 0.0, -2.0);
        for _ in 0..30 {
            g.frame(SIM_DT);
        }
        assert_eq!(g.presenter().scores, vec![10]);
    }

    #[test]
    fn test_pause_on_focus_loss() {
        let mut g = game(MemoryStore::new());
        g.start();
        g.handle_input(InputEvent::KeyDown { key: Key::Down, repeat: false });
        assert!(g.state().player.ducking);
        assert!(g.pause());
        assert_eq!(g.phase(), GamePhase::Paused);
        assert!(!g.state().player.ducking);
        assert!(!g.pause());
    }

    #[test]
    fn test_autopilot_drives_frames() {
        let mut g = game(MemoryStore::new());
        g.start();
        g.state.difficulty.max_entities = 1;
        g.state.entities.spawn(EntityKind::Palm, 0.0, -4.0);
        assert!(g.toggle_autopilot());
        for _ in 0..60 {
            g.frame(SIM_DT);
        }
        assert_eq!(g.phase(), GamePhase::Running);
        assert_ne!(g.state().player.lane, 0.0);
    }

    #[test]
    fn test_set_mode_before_start_stays_ready() {
        let mut g = game(MemoryStore::new());
        assert!(g.set_mode(PlayMode::FreeRoam));
        assert!(!g.set_mode(PlayMode::FreeRoam));
        assert_eq!(g.phase(), GamePhase::Ready);
        assert_eq!(g.state().mode, PlayMode::FreeRoam);
        assert_eq!(g.settings().mode, PlayMode::FreeRoam);

        g.start();
        assert!(g.handle_input(InputEvent::KeyDown { key: Key::Up, repeat: false }));
        assert_eq!(g.state().player.depth, -1.0);
    }

    #[test]
    fn test_set_mode_mid_run_restarts_in_new_mode() {
        let mut g = game(MemoryStore::new());
        g.start();
        g.state.score = 40;
        assert!(g.set_mode(g.mode().next()));
        assert_eq!(g.mode(), PlayMode::LanesOnly);
        assert_eq!(g.state().mode, PlayMode::LanesOnly);
        assert_eq!(g.phase(), GamePhase::Running);
        assert_eq!(g.state().score, 0);
        // An abandoned run is not a game over
        assert!(g.presenter().game_overs.is_empty());
        assert_eq!(g.store().writes(), 0);
        assert!(!g.handle_input(InputEvent::KeyDown { key: Key::Space, repeat: false }));
    }

    #[test]
    fn test_mode_from_settings() {
        let settings = Settings {
            mode: PlayMode::LanesOnly,
            ..quiet_settings()
        };
        let mut g = Game::new(settings, 3, MemoryStore::new(), Recorder::default());
        g.start();
        assert!(!g.handle_input(InputEvent::KeyDown { key: Key::Space, repeat: false }));
        assert!(g.handle_input(InputEvent::KeyDown { key: Key::Left, repeat: false }));
    }
}
