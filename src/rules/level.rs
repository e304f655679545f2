//! Canonical level rules and score-to-level lookup

use serde_json::Value;

use crate::consts::MIN_BOUNCE_SPEED;

/// Speeds above this are clamped so range arithmetic can't overflow
pub const SPEED_LIMIT: i32 = 1 << 16;

/// Most frogs a single rule may ask for
pub const MAX_FROGS: usize = 64;

/// Integer speed range a frog draws its velocities from
///
/// Always satisfies `1 <= lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRange {
    lo: i32,
    hi: i32,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SpeedRange {
    pub const DEFAULT: SpeedRange = SpeedRange { lo: 3, hi: 6 };

    /// Build a range, clamping `lo` to at least 1 and `hi` to at least `lo + 1`
    pub fn new(lo: i32, hi: i32) -> Self {
        let lo = lo.clamp(1, SPEED_LIMIT);
        let hi = hi.clamp(lo + 1, SPEED_LIMIT + 1);
        Self { lo, hi }
    }

    pub fn lo(&self) -> i32 {
        self.lo
    }

    pub fn hi(&self) -> i32 {
        self.hi
    }

    /// Inclusive magnitude bounds for the upward bounce of a caught frog
    ///
    /// The velocity assigned on a catch lies in `[-(hi + 1), -max(lo, 3)]`.
    pub fn bounce_bounds(&self) -> (i32, i32) {
        (self.lo.max(MIN_BOUNCE_SPEED), self.hi + 1)
    }
}

/// One normalized difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelRule {
    /// Score at which this tier becomes active
    pub score_threshold: u64,
    /// Number of frogs that should be in play
    pub frog_count: usize,
    /// Spawn/bounce speed range
    pub speed: SpeedRange,
    /// Lateral acceleration added to every frog each tick
    pub current: f32,
    /// Base wind drift applied to the pad each tick
    pub wind_gust: f32,
    /// Pad size multiplier
    pub pad_scale: f32,
}

impl LevelRule {
    /// Single tier used when a rule set has no rules at all
    pub const BASELINE: LevelRule = LevelRule {
        score_threshold: 0,
        frog_count: 1,
        speed: SpeedRange::DEFAULT,
        current: 0.0,
        wind_gust: 0.0,
        pad_scale: 1.0,
    };
}

impl Default for LevelRule {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Progression used by skins without a usable level configuration
pub const DEFAULT_PROGRESSION: [LevelRule; 5] = [
    LevelRule::BASELINE,
    LevelRule {
        score_threshold: 1500,
        frog_count: 2,
        speed: SpeedRange { lo: 3, hi: 7 },
        current: 0.05,
        wind_gust: 0.0,
        pad_scale: 0.95,
    },
    LevelRule {
        score_threshold: 3000,
        frog_count: 3,
        speed: SpeedRange { lo: 4, hi: 8 },
        current: 0.08,
        wind_gust: 0.03,
        pad_scale: 0.92,
    },
    LevelRule {
        score_threshold: 5000,
        frog_count: 4,
        speed: SpeedRange { lo: 5, hi: 9 },
        current: 0.12,
        wind_gust: 0.04,
        pad_scale: 0.88,
    },
    LevelRule {
        score_threshold: 7500,
        frog_count: 5,
        speed: SpeedRange { lo: 6, hi: 10 },
        current: 0.15,
        wind_gust: 0.05,
        pad_scale: 0.84,
    },
];

/// Ordered rule list, ascending by score threshold
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<LevelRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_progression()
    }
}

impl RuleSet {
    /// The built-in five tier progression
    pub fn default_progression() -> Self {
        Self {
            rules: DEFAULT_PROGRESSION.to_vec(),
        }
    }

    /// Wrap rules, sorting them by threshold (stable, ties keep input order)
    pub fn from_rules(mut rules: Vec<LevelRule>) -> Self {
        rules.sort_by_key(|r| r.score_threshold);
        Self { rules }
    }

    /// Normalize a raw level configuration; falls back to the default progression
    pub fn normalize(raw: Option<&Value>) -> Self {
        let rules = super::raw::parse_rules(raw);
        if rules.is_empty() {
            log::debug!("No usable level rules, using default progression");
            return Self::default_progression();
        }
        Self::from_rules(rules)
    }

    pub fn rules(&self) -> &[LevelRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the active tier for a score
    ///
    /// Returns the last rule whose threshold the score has reached; below every
    /// threshold the first rule applies. Among equal thresholds the later rule
    /// wins. An empty set yields [`LevelRule::BASELINE`] at index 0.
    pub fn resolve(&self, score: u64) -> (usize, LevelRule) {
        let Some(first) = self.rules.first() else {
            return (0, LevelRule::BASELINE);
        };

        let mut active = (0, *first);
        for (index, rule) in self.rules.iter().enumerate() {
            if score >= rule.score_threshold {
                active = (index, *rule);
            } else {
                break;
            }
        }
        active
    }
}
