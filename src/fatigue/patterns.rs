//! Movement pattern taxonomy and cardio modalities.
//!
//! Movements map to one or more pattern buckets. The table is a value owned
//! by whoever builds a `FatigueManager`, so alternate taxonomies can be
//! supplied without touching the model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Primary movement patterns for local fatigue tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    /// Pull-ups, rows, muscle-ups
    Pull,
    /// Push-ups, HSPU, presses
    Push,
    /// Squats, wall-balls, box jumps
    Squat,
    /// Deadlifts, KB swings, burpees
    Hinge,
    /// Sit-ups, toes-to-bar
    Core,
    /// Rope climbs, hanging work
    Grip,
    /// Catch-all for unmapped movements
    Mixed,
}

impl MovementPattern {
    /// All patterns in canonical order.
    pub fn all() -> [MovementPattern; 7] {
        [
            MovementPattern::Pull,
            MovementPattern::Push,
            MovementPattern::Squat,
            MovementPattern::Hinge,
            MovementPattern::Core,
            MovementPattern::Grip,
            MovementPattern::Mixed,
        ]
    }

    /// Lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            MovementPattern::Pull => "pull",
            MovementPattern::Push => "push",
            MovementPattern::Squat => "squat",
            MovementPattern::Hinge => "hinge",
            MovementPattern::Core => "core",
            MovementPattern::Grip => "grip",
            MovementPattern::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for MovementPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Monostructural cardio modality.
///
/// Bike, row and ski outputs are in watts; run and swim outputs are in
/// meters per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Bike,
    Row,
    Run,
    Swim,
    Ski,
}

impl Modality {
    /// All modalities.
    pub fn all() -> [Modality; 5] {
        [
            Modality::Bike,
            Modality::Row,
            Modality::Run,
            Modality::Swim,
            Modality::Ski,
        ]
    }

    /// Whether output is a speed (m/s) rather than a power (W).
    pub fn is_speed_based(&self) -> bool {
        matches!(self, Modality::Run | Modality::Swim)
    }

    /// Lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Bike => "bike",
            Modality::Row => "row",
            Modality::Run => "run",
            Modality::Swim => "swim",
            Modality::Ski => "ski",
        }
    }

    /// Resolve the modality of a movement name, if it is a cardio movement.
    pub fn from_movement(movement: &str) -> Option<Modality> {
        match normalize_movement(movement).as_str() {
            "run" | "running" | "sprint" | "shuttle-run" => Some(Modality::Run),
            "row" | "rowing" | "row-erg" | "rower" => Some(Modality::Row),
            "bike" | "air-bike" | "assault-bike" | "echo-bike" | "bike-erg" | "cycling" => {
                Some(Modality::Bike)
            }
            "swim" | "swimming" => Some(Modality::Swim),
            "ski" | "ski-erg" => Some(Modality::Ski),
            _ => None,
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Canonical movement key: trimmed, lowercase, spaces and underscores as hyphens.
pub fn normalize_movement(movement: &str) -> String {
    movement
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

const MIXED_ONLY: &[MovementPattern] = &[MovementPattern::Mixed];

/// Movement → pattern bucket mapping.
///
/// Deserialized tables go through the same normalization as
/// [`PatternTable::with_movement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<MovementPattern>>",
    into = "BTreeMap<String, Vec<MovementPattern>>"
)]
pub struct PatternTable {
    entries: BTreeMap<String, Vec<MovementPattern>>,
}

impl PatternTable {
    /// Empty table: every movement falls back to `Mixed`.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace a mapping. An empty pattern list maps to `Mixed`.
    pub fn with_movement(mut self, movement: &str, patterns: &[MovementPattern]) -> Self {
        self.insert(movement, patterns);
        self
    }

    fn insert(&mut self, movement: &str, patterns: &[MovementPattern]) {
        let mut patterns = patterns.to_vec();
        patterns.sort();
        patterns.dedup();
        if patterns.is_empty() {
            patterns.push(MovementPattern::Mixed);
        }
        self.entries.insert(normalize_movement(movement), patterns);
    }

    /// Buckets a movement loads. Never empty: unmapped movements load `Mixed`.
    pub fn patterns_for(&self, movement: &str) -> &[MovementPattern] {
        self.entries
            .get(&normalize_movement(movement))
            .filter(|patterns| !patterns.is_empty())
            .map(Vec::as_slice)
            .unwrap_or(MIXED_ONLY)
    }

    /// Whether the movement has an explicit mapping.
    pub fn is_mapped(&self, movement: &str) -> bool {
        self.entries.contains_key(&normalize_movement(movement))
    }

    /// Number of mapped movements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no mappings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, Vec<MovementPattern>>> for PatternTable {
    fn from(entries: BTreeMap<String, Vec<MovementPattern>>) -> Self {
        let mut table = Self::empty();
        for (movement, patterns) in &entries {
            table.insert(movement, patterns);
        }
        table
    }
}

impl From<PatternTable> for BTreeMap<String, Vec<MovementPattern>> {
    fn from(table: PatternTable) -> Self {
        table.entries
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        use MovementPattern::*;

        let table: &[(&str, &[MovementPattern])] = &[
            // Gymnastics
            ("pull-up", &[Pull, Grip]),
            ("chin-up", &[Pull, Grip]),
            ("chest-to-bar", &[Pull, Grip]),
            ("muscle-up", &[Pull, Push, Grip]),
            ("bar-muscle-up", &[Pull, Push, Grip]),
            ("rope-climb", &[Pull, Grip]),
            ("handstand-pushup", &[Push]),
            ("handstand-push-up", &[Push]),
            ("push-up", &[Push]),
            ("dip", &[Push]),
            ("ring-dip", &[Push]),
            ("toes-to-bar", &[Core, Grip]),
            ("knees-to-elbows", &[Core, Grip]),
            ("sit-up", &[Core]),
            ("l-sit", &[Core]),
            ("plank", &[Core]),
            // Weightlifting
            ("squat", &[Squat]),
            ("front-squat", &[Squat]),
            ("back-squat", &[Squat]),
            ("overhead-squat", &[Squat, Push]),
            ("deadlift", &[Hinge]),
            ("sumo-deadlift", &[Hinge]),
            ("clean", &[Hinge, Pull]),
            ("power-clean", &[Hinge, Pull]),
            ("hang-clean", &[Hinge, Pull]),
            ("clean-and-jerk", &[Hinge, Pull, Push]),
            ("snatch", &[Hinge, Pull, Push]),
            ("power-snatch", &[Hinge, Pull, Push]),
            ("overhead-press", &[Push]),
            ("push-press", &[Push, Squat]),
            ("push-jerk", &[Push, Squat]),
            ("bench-press", &[Push]),
            ("thruster", &[Squat, Push]),
            // Other common movements
            ("wall-ball", &[Squat]),
            ("box-jump", &[Squat]),
            ("burpee", &[Hinge, Push]),
            ("kettlebell-swing", &[Hinge]),
            ("double-under", &[Squat]),
            ("air-squat", &[Squat]),
            ("lunge", &[Squat]),
            // Monostructural
            ("run", &[Squat]),
            ("row", &[Pull, Hinge]),
            ("bike", &[Squat]),
            ("ski", &[Pull, Core]),
            ("swim", &[Pull, Push]),
        ];

        let mut patterns = Self::empty();
        for (movement, buckets) in table {
            patterns.insert(movement, buckets);
        }
        patterns
    }
}
