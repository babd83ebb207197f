//! Presentation cue log.
//!
//! Stands in for graphics and audio: cues are counted and the most recent
//! ones kept for inspection, but nothing ever reads them back to make a
//! decision.

use std::collections::{BTreeMap, VecDeque};

use game_core::geometry::Vec2;
use game_core::{Animation, EffectKind, EntityId, Sound, Tick};
use tracing::trace;

/// How many cues [`CueLog::recent`] keeps.
pub const RECENT_CUES: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    Sound(Sound),
    Animation {
        entity: EntityId,
        animation: Animation,
    },
    Effect {
        effect: EffectKind,
        position: Vec2,
    },
}

impl Cue {
    /// Stable label used for counting, e.g. `sound.splash`.
    pub fn label(&self) -> String {
        match self {
            Self::Sound(sound) => format!("sound.{sound}"),
            Self::Animation { animation, .. } => format!("animation.{animation}"),
            Self::Effect { effect, .. } => format!("effect.{effect}"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CueLog {
    recent: VecDeque<(Tick, Cue)>,
    counts: BTreeMap<String, u64>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, cue: Cue) {
        trace!(target: "presentation", %tick, ?cue, "cue");
        *self.counts.entry(cue.label()).or_default() += 1;
        if self.recent.len() == RECENT_CUES {
            self.recent.pop_front();
        }
        self.recent.push_back((tick, cue));
    }

    /// Latest cues, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &(Tick, Cue)> {
        self.recent.iter()
    }

    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    pub fn sounds(&self) -> impl Iterator<Item = Sound> + '_ {
        self.recent.iter().filter_map(|(_, cue)| match cue {
            Cue::Sound(sound) => Some(*sound),
            _ => None,
        })
    }
}
