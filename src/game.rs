//! Session controller
//!
//! Ties the skin catalog, the active rule set and the simulation together.
//! The simulation itself only knows about sizes and rules; swapping skins,
//! music and persisting choices happens here.

use glam::Vec2;

use crate::assets::{AssetRole, ImageHandle, Skin, SkinCatalog, shared_life_icon};
use crate::audio::{MusicBackend, MusicDirector};
use crate::config::{DataPaths, GameConfig};
use crate::highscores::HighScores;
use crate::rules::RuleSet;
use crate::settings::Settings;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::{self, TickInput};

/// Art size the simulation should use for `role`
fn art_size(skin: Option<&Skin>, role: AssetRole) -> Vec2 {
    let size = match (skin, role) {
        (Some(skin), AssetRole::Pad) => skin.pad.size(),
        (Some(skin), AssetRole::Frog) => skin.frog.size(),
        _ => role.default_size(),
    };
    size.as_vec2()
}

/// Frog Pond game
pub struct Game {
    config: GameConfig,
    paths: DataPaths,
    catalog: SkinCatalog,
    /// Rules of the active skin
    rules: RuleSet,
    /// Current session; `None` until the first `start_game`
    session: Option<GameState>,
    high_scores: HighScores,
    music: MusicDirector,
    /// Life icon for skins that don't ship one
    shared_life_icon: ImageHandle,
    life_icon: ImageHandle,
    sessions_started: u64,
    score_submitted: bool,
}

impl Game {
    pub fn new(config: GameConfig, backend: Option<Box<dyn MusicBackend>>) -> Self {
        let paths = config.paths();
        let settings = Settings::load(&paths.settings);
        let catalog = SkinCatalog::load_or_fallback(&config.skins_root, &settings);
        let high_scores = HighScores::load(&paths.scores);
        let music = MusicDirector::new(backend, Some(config.fallback_music.clone()));

        let shared_life_icon = shared_life_icon(&config.shared_assets_dir);

        let skin = catalog.current();
        let rules = RuleSet::normalize(skin.and_then(|s| s.levels.as_ref()));
        let life_icon = skin
            .map(|s| s.life_icon_or(&shared_life_icon))
            .unwrap_or_else(|| shared_life_icon.clone());

        Self {
            config,
            paths,
            catalog,
            rules,
            session: None,
            high_scores,
            music,
            shared_life_icon,
            life_icon,
            sessions_started: 0,
            score_submitted: false,
        }
    }

    pub fn catalog(&self) -> &SkinCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn music(&self) -> &MusicDirector {
        &self.music
    }

    /// Icon drawn once per remaining life
    pub fn life_icon(&self) -> &ImageHandle {
        &self.life_icon
    }

    /// Session over and waiting for a score submission
    pub fn is_over(&self) -> bool {
        self.session.as_ref().is_some_and(GameState::is_over)
    }

    /// Begin a fresh session with the active skin
    pub fn start_game(&mut self) {
        self.activate_skin(None);

        let seed = self.config.seed.wrapping_add(self.sessions_started);
        self.sessions_started += 1;

        let skin = self.catalog.current();
        let mut state = GameState::new(
            seed,
            art_size(skin, AssetRole::Pad),
            art_size(skin, AssetRole::Frog),
        );
        tick::start_session(&mut state, &self.rules);
        log::info!(
            "Session started (seed {seed}, skin `{}`)",
            skin.map(|s| s.name.as_str()).unwrap_or_default()
        );

        self.session = Some(state);
        self.score_submitted = false;
    }

    /// Advance the session one tick
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let Some(mut state) = self.session.take() else {
            return Vec::new();
        };
        let events = self.step(&mut state, input);
        self.session = Some(state);
        events
    }

    fn step(&mut self, state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        // The rule is resolved against the skin active at the start of the tick
        let Some((changed, rule)) = tick::begin_tick(state, &self.rules, input, &mut events)
        else {
            return events;
        };
        if changed && self.catalog.auto_cycle() && self.catalog.len() > 1 {
            self.cycle_skin(state, &mut events);
        }
        tick::finish_tick(state, changed, &rule, &mut events);
        events
    }

    /// Advance to the next skin mid-session
    fn cycle_skin(&mut self, state: &mut GameState, events: &mut Vec<GameEvent>) {
        self.catalog.next();
        self.save_choice();
        self.activate_skin(Some(&mut *state));

        if let Some(skin) = self.catalog.current() {
            log::info!("Auto-cycled to skin `{}`", skin.name);
            events.push(GameEvent::SkinChanged {
                name: skin.name.clone(),
            });
        }
    }

    /// Adopt the active skin's rules, music and life icon; swap art sizes in
    /// `state` if a session is running
    ///
    /// The session's level index is re-resolved against the new rules without
    /// an event, so the switch itself never reads as a level change.
    fn activate_skin(&mut self, state: Option<&mut GameState>) {
        let skin = self.catalog.current();
        self.rules = RuleSet::normalize(skin.and_then(|s| s.levels.as_ref()));
        self.life_icon = skin
            .map(|s| s.life_icon_or(&self.shared_life_icon))
            .unwrap_or_else(|| self.shared_life_icon.clone());
        self.music.play_for_skin(skin.and_then(|s| s.music.as_deref()));

        if let Some(state) = state {
            state.pad.set_base_size(art_size(skin, AssetRole::Pad));
            state.set_frog_size(art_size(skin, AssetRole::Frog));
            state.level_index = self.rules.resolve(state.score).0;
        }
    }

    fn save_choice(&self) {
        if let Err(e) = Settings::update(&self.paths.settings, |settings| {
            self.catalog.write_choice(settings)
        }) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    /// Browse to the next skin without committing to it
    pub fn next_skin(&mut self) {
        self.catalog.next();
    }

    /// Browse to the previous skin without committing to it
    pub fn previous_skin(&mut self) {
        self.catalog.previous();
    }

    /// Commit the browsed skin: persist it and switch art and music over
    pub fn confirm_skin(&mut self) {
        self.save_choice();
        let mut session = self.session.take();
        self.activate_skin(session.as_mut());
        self.session = session;
    }

    /// Flip skin auto-cycling and persist it; returns the new setting
    pub fn toggle_auto_cycle(&mut self) -> bool {
        let enabled = !self.catalog.auto_cycle();
        self.catalog.set_auto_cycle(enabled);
        self.save_choice();
        enabled
    }

    /// Returns true if music is now muted
    pub fn toggle_mute(&mut self) -> bool {
        self.music.toggle_mute()
    }

    /// Record the finished session's score
    ///
    /// Only accepted once per session, after game over. Returns the rank
    /// reached, or `None` if the score didn't make the board.
    pub fn submit_score(&mut self, name: &str, timestamp: u64) -> Option<usize> {
        let score = match &self.session {
            Some(state) if state.is_over() && !self.score_submitted => state.score,
            _ => return None,
        };
        self.score_submitted = true;

        let rank = self.high_scores.insert(name, score, timestamp);
        if let Err(e) = self.high_scores.save(&self.paths.scores) {
            log::warn!("Failed to save high scores: {e}");
        }
        rank
    }

    /// Highest score on the leaderboard (0 if empty)
    pub fn best_score(&self) -> u64 {
        self.high_scores.best_score()
    }
}
