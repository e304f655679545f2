//! Raw level configuration parsing
//!
//! Level files come in several shapes and use several spellings for the same
//! field. Parsing is tolerant: a field that can't be coerced falls back to its
//! own default without rejecting the rule.

use serde_json::{Map, Value};

use super::level::{LevelRule, MAX_FROGS, SpeedRange};

/// Object keys that may hold the rule list, in priority order
pub const LIST_KEYS: [&str; 3] = ["levels", "rules", "stages"];

/// Shape of a raw level configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawLevels<'a> {
    /// A bare, non-empty list of rule objects
    List(&'a [Value]),
    /// An object holding a non-empty rule list under `key`
    Keyed {
        key: &'static str,
        entries: &'a [Value],
    },
    /// Anything else; the default progression applies
    Unrecognized,
}

impl<'a> RawLevels<'a> {
    pub fn classify(raw: Option<&'a Value>) -> Self {
        match raw {
            Some(Value::Array(items)) if !items.is_empty() => RawLevels::List(items),
            Some(Value::Object(map)) => LIST_KEYS
                .iter()
                .find_map(|&key| match map.get(key) {
                    Some(Value::Array(items)) if !items.is_empty() => Some(RawLevels::Keyed {
                        key,
                        entries: items,
                    }),
                    _ => None,
                })
                .unwrap_or(RawLevels::Unrecognized),
            _ => RawLevels::Unrecognized,
        }
    }

    /// Raw rule entries (empty when unrecognized)
    pub fn entries(&self) -> &'a [Value] {
        match *self {
            RawLevels::List(entries) | RawLevels::Keyed { entries, .. } => entries,
            RawLevels::Unrecognized => &[],
        }
    }
}

/// One canonical field: synonym keys (first present wins), coercion, default
struct Field<T: Copy> {
    name: &'static str,
    synonyms: &'static [&'static str],
    coerce: fn(&Value) -> Option<T>,
    default: T,
}

impl<T: Copy> Field<T> {
    fn read(&self, obj: &Map<String, Value>) -> T {
        let Some(value) = self.synonyms.iter().find_map(|key| obj.get(*key)) else {
            return self.default;
        };
        match (self.coerce)(value) {
            Some(v) => v,
            None => {
                log::debug!("Level field `{}` unparseable ({value}), using default", self.name);
                self.default
            }
        }
    }
}

const SCORE: Field<u64> = Field {
    name: "score",
    synonyms: &["score", "threshold"],
    coerce: coerce_threshold,
    default: 0,
};

const FROGS: Field<usize> = Field {
    name: "frogs",
    synonyms: &["frogs", "num_frogs"],
    coerce: coerce_count,
    default: 1,
};

const SPEED: Field<SpeedRange> = Field {
    name: "speed",
    synonyms: &["speed", "speed_range"],
    coerce: coerce_speed,
    default: SpeedRange::DEFAULT,
};

const CURRENT: Field<f32> = Field {
    name: "currents",
    synonyms: &["currents", "current"],
    coerce: coerce_float,
    default: 0.0,
};

const WIND: Field<f32> = Field {
    name: "wind",
    synonyms: &["wind", "wind_gust"],
    coerce: coerce_float,
    default: 0.0,
};

const PAD_SCALE: Field<f32> = Field {
    name: "pad_scale",
    synonyms: &["pad_scale", "pad_size", "pad_factor"],
    coerce: coerce_pad_scale,
    default: 1.0,
};

/// Parse every object entry of a raw configuration into a rule
///
/// Non-object entries are dropped. The result is unsorted and may be empty.
pub fn parse_rules(raw: Option<&Value>) -> Vec<LevelRule> {
    let shape = RawLevels::classify(raw);
    if let RawLevels::Keyed { key, .. } = shape {
        log::debug!("Reading level rules from `{key}`");
    }
    shape
        .entries()
        .iter()
        .filter_map(Value::as_object)
        .map(rule_from_object)
        .collect()
}

/// Normalize a single rule object
pub fn rule_from_object(obj: &Map<String, Value>) -> LevelRule {
    LevelRule {
        score_threshold: SCORE.read(obj),
        frog_count: FROGS.read(obj),
        speed: SPEED.read(obj),
        current: CURRENT.read(obj),
        wind_gust: WIND.read(obj),
        pad_scale: PAD_SCALE.read(obj),
    }
}

/// Numbers, numeric strings and booleans; never NaN or infinite
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn coerce_int(value: &Value) -> Option<i32> {
    // `as` saturates out-of-range floats
    coerce_number(value).map(|n| n.trunc() as i32)
}

fn coerce_threshold(value: &Value) -> Option<u64> {
    coerce_number(value).map(|n| n.max(0.0).trunc() as u64)
}

fn coerce_count(value: &Value) -> Option<usize> {
    coerce_number(value).map(|n| n.trunc().clamp(1.0, MAX_FROGS as f64) as usize)
}

fn coerce_speed(value: &Value) -> Option<SpeedRange> {
    let (lo, hi) = match value {
        Value::Array(items) if items.len() >= 2 => {
            let lo = coerce_int(&items[0])?;
            let hi = coerce_int(&items[1]).unwrap_or(lo.saturating_add(3));
            (lo, hi)
        }
        _ => {
            let lo = coerce_int(value)?;
            (lo, lo.saturating_add(3))
        }
    };
    Some(SpeedRange::new(lo, hi))
}

fn coerce_float(value: &Value) -> Option<f32> {
    coerce_number(value)
        .map(|n| n as f32)
        .filter(|n| n.is_finite())
}

fn coerce_pad_scale(value: &Value) -> Option<f32> {
    coerce_float(value).filter(|n| *n > 0.0)
}
