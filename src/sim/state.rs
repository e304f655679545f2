//! Game state and core simulation types
//!
//! Positions are sprite top-left corners in screen space (y grows downward).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;
use crate::rules::SpeedRange;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives; waiting for the score to be submitted
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A frog landed on the pad and bounced back up
    Caught { frog_id: u32 },
    /// A frog fell in the water; every frog was reset
    Missed { lives_left: u8 },
    /// The score crossed into a different level
    LevelChanged { from: usize, to: usize },
    /// The active skin advanced on a level change
    SkinChanged { name: String },
    /// The last life was lost
    GameOver { score: u64 },
}

/// The player's lily pad
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    /// Top-left corner
    pub pos: Vec2,
    /// Unscaled art size
    pub base_size: Vec2,
    /// Current collision/visual size
    pub size: Vec2,
    /// Scale factor applied to `base_size`
    pub scale: f32,
}

impl Pad {
    /// Pad centered horizontally, resting above the water line
    pub fn new(base_size: Vec2) -> Self {
        let mut pad = Self {
            pos: Vec2::ZERO,
            base_size,
            size: base_size,
            scale: 1.0,
        };
        pad.set_midbottom(Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT - PAD_BOTTOM_MARGIN));
        pad
    }

    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    fn set_midbottom(&mut self, midbottom: Vec2) {
        self.pos = Vec2::new(midbottom.x - self.size.x / 2.0, midbottom.y - self.size.y);
    }

    /// Swap the art; the pad returns to unscaled size, anchored at its midbottom
    pub fn set_base_size(&mut self, base_size: Vec2) {
        let anchor = self.midbottom();
        self.base_size = base_size;
        self.size = base_size;
        self.scale = 1.0;
        self.set_midbottom(anchor);
    }

    /// Rescale from the unscaled art size, never below the minimum pad size
    pub fn set_scale(&mut self, scale: f32) {
        let anchor = self.midbottom();
        self.scale = scale;
        self.size = Vec2::new(
            (self.base_size.x * scale).trunc().max(PAD_MIN_WIDTH),
            (self.base_size.y * scale).trunc().max(PAD_MIN_HEIGHT),
        );
        self.set_midbottom(anchor);
    }

    /// Move horizontally, staying inside the arena
    pub fn shift(&mut self, dx: f32) {
        self.pos.x = (self.pos.x + dx).min(ARENA_WIDTH - self.size.x).max(0.0);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// A falling frog
#[derive(Debug, Clone, PartialEq)]
pub struct Frog {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: Vec2,
    /// Range spawn and bounce speeds are drawn from
    pub speed: SpeedRange,
}

impl Frog {
    /// New frog at a random spot along the top of the arena
    pub fn spawn(id: u32, size: Vec2, speed: SpeedRange, rng: &mut Pcg32) -> Self {
        let mut frog = Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size,
            speed,
        };
        frog.reset(rng);
        frog
    }

    /// Back to the top with a fresh random position and velocity
    pub fn reset(&mut self, rng: &mut Pcg32) {
        let max_x = (ARENA_WIDTH as i32 - FROG_SPAWN_MARGIN).max(FROG_SPAWN_MARGIN);
        let center_x = rng.random_range(FROG_SPAWN_MARGIN..=max_x) as f32;
        self.pos = Vec2::new(center_x - self.size.x / 2.0, FROG_SPAWN_Y);

        let (lo, hi) = (self.speed.lo(), self.speed.hi());
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(
            direction * rng.random_range(lo..=hi) as f32,
            rng.random_range(lo..=hi) as f32,
        );
    }

    /// Swap the art, keeping the frog centered where it was
    pub fn set_size(&mut self, size: Vec2) {
        let center = self.bounds().center();
        self.size = size;
        self.pos = center - size / 2.0;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Bottom edge has dropped past the water line
    pub fn in_water(&self) -> bool {
        self.pos.y + self.size.y > ARENA_HEIGHT - WATER_MARGIN
    }
}

/// Forces from the active level rule
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Forces {
    /// Lateral acceleration on frogs, per tick
    pub current: f32,
    /// Steady wind drift on the pad, per tick
    pub wind_base: f32,
    /// Amplitude of the gust oscillation around `wind_base`
    pub wind_amplitude: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every spawn and bounce draws from it
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// One point per tick without a miss
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Index of the active rule in the active rule set
    pub level_index: usize,
    /// Player pad
    pub pad: Pad,
    /// Frogs in play (sorted by id)
    pub frogs: Vec<Frog>,
    /// Art size for frogs spawned from now on
    pub frog_size: Vec2,
    /// Active forces
    pub forces: Forces,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh session with no frogs yet; see [`super::tick::start_session`]
    pub fn new(seed: u64, pad_size: Vec2, frog_size: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            lives: START_LIVES,
            time_ticks: 0,
            level_index: 0,
            pad: Pad::new(pad_size),
            frogs: Vec::new(),
            frog_size,
            forces: Forces::default(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seconds of simulated play
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * TICK_DT
    }

    /// Spawn one frog using the given speed range
    pub fn spawn_frog(&mut self, speed: SpeedRange) {
        let id = self.next_entity_id();
        let frog = Frog::spawn(id, self.frog_size, speed, &mut self.rng);
        self.frogs.push(frog);
    }

    /// Apply new frog art to every frog in play and future spawns
    pub fn set_frog_size(&mut self, size: Vec2) {
        self.frog_size = size;
        for frog in &mut self.frogs {
            frog.set_size(size);
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_starts_centered_above_water() {
        let pad = Pad::new(Vec2::new(120.0, 24.0));
        assert_eq!(pad.midbottom(), Vec2::new(320.0, 440.0));
        assert_eq!(pad.pos, Vec2::new(260.0, 416.0));
    }

    #[test]
    fn test_pad_scale_keeps_midbottom_and_floor() {
        let mut pad = Pad::new(Vec2::new(120.0, 24.0));
        pad.set_scale(0.84);
        assert_eq!(pad.size, Vec2::new(100.0, 20.0));
        assert_eq!(pad.midbottom(), Vec2::new(320.0, 440.0));

        pad.set_scale(0.05);
        assert_eq!(pad.size, Vec2::new(PAD_MIN_WIDTH, PAD_MIN_HEIGHT));

        // Scaling always starts from the unscaled art
        pad.set_scale(1.0);
        assert_eq!(pad.size, Vec2::new(120.0, 24.0));
    }

    #[test]
    fn test_pad_set_base_size_resets_scale() {
        let mut pad = Pad::new(Vec2::new(120.0, 24.0));
        pad.set_scale(0.5);
        pad.set_base_size(Vec2::new(200.0, 40.0));
        assert_eq!(pad.size, Vec2::new(200.0, 40.0));
        assert_eq!(pad.scale, 1.0);
        assert_eq!(pad.midbottom(), Vec2::new(320.0, 440.0));
    }

    #[test]
    fn test_pad_shift_clamped() {
        let mut pad = Pad::new(Vec2::new(120.0, 24.0));
        pad.shift(-1000.0);
        assert_eq!(pad.pos.x, 0.0);
        pad.shift(1000.0);
        assert_eq!(pad.pos.x, ARENA_WIDTH - 120.0);

        // Wider than the arena: pinned to the left wall
        let mut wide = Pad::new(Vec2::new(900.0, 24.0));
        wide.shift(5.0);
        assert_eq!(wide.pos.x, 0.0);
    }

    #[test]
    fn test_frog_spawn_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let speed = SpeedRange::new(4, 8);
        for id in 0..200 {
            let frog = Frog::spawn(id, Vec2::new(40.0, 40.0), speed, &mut rng);
            let center_x = frog.bounds().center().x;
            assert!((20.0..=620.0).contains(&center_x));
            assert_eq!(frog.pos.y, FROG_SPAWN_Y);
            assert!((4.0..=8.0).contains(&frog.vel.x.abs()));
            assert!((4.0..=8.0).contains(&frog.vel.y));
        }
    }

    #[test]
    fn test_frog_set_size_keeps_center() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut frog = Frog::spawn(1, Vec2::new(40.0, 40.0), SpeedRange::default(), &mut rng);
        let center = frog.bounds().center();
        frog.set_size(Vec2::new(64.0, 30.0));
        assert_eq!(frog.bounds().center(), center);
    }

    #[test]
    fn test_in_water() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut frog = Frog::spawn(1, Vec2::new(40.0, 40.0), SpeedRange::default(), &mut rng);
        frog.pos.y = ARENA_HEIGHT - WATER_MARGIN - 40.0;
        assert!(!frog.in_water());
        frog.pos.y += 0.5;
        assert!(frog.in_water());
    }

    #[test]
    fn test_entity_ids_increment() {
        let mut state = GameState::new(3, Vec2::new(120.0, 24.0), Vec2::new(40.0, 40.0));
        state.spawn_frog(SpeedRange::default());
        state.spawn_frog(SpeedRange::default());
        let ids: Vec<u32> = state.frogs.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(state.lives, START_LIVES);
    }
}
