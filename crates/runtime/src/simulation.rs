//! Headless driver that runs one room for a fixed number of ticks.

use std::collections::BTreeMap;

use game_content::{MonsterCatalog, RoomLayout};
use game_core::{GameConfig, compute_seed};
use serde::Serialize;
use tracing::info;

use crate::error::{Result, RuntimeError};
use crate::room::{Room, RoomStats};

/// Settings for a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Session seed. A random one is drawn when absent.
    pub seed: Option<u64>,
    /// Ticks [`Simulation::run`] advances.
    pub ticks: u64,
    /// Log a progress summary every this many ticks.
    pub summary_interval: Option<u64>,
    /// Respawn soft-killed monsters after this many ticks.
    pub respawn_delay: Option<u32>,
}

impl RuntimeConfig {
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// End-of-run report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub room: String,
    pub seed: u64,
    pub ticks: u64,
    pub monsters_alive: usize,
    pub player_damage_taken: u32,
    pub stats: RoomStats,
    /// Presentation cues by label.
    pub cues: BTreeMap<String, u64>,
}

pub struct Simulation {
    config: RuntimeConfig,
    seed: u64,
    room: Room,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn room_mut(&mut self) -> &mut Room {
        &mut self.room
    }

    pub fn step(&mut self) {
        self.room.step();
        let tick = self.room.tick().0;
        if let Some(interval) = self.config.summary_interval
            && interval > 0
            && tick % interval == 0
        {
            let stats = self.room.stats();
            info!(
                target: "simulation",
                tick,
                monsters = self.room.monsters().count(),
                interactions = stats.interactions,
                killed = stats.monsters_killed,
                "progress"
            );
        }
    }

    /// Advances the configured number of ticks and reports the result.
    pub fn run(&mut self) -> RunSummary {
        info!(
            target: "simulation",
            room = self.room.name(),
            seed = self.seed,
            ticks = self.config.ticks,
            "run started"
        );
        for _ in 0..self.config.ticks {
            self.step();
        }
        let summary = self.summary();
        info!(
            target: "simulation",
            room = %summary.room,
            ticks = summary.ticks,
            monsters_alive = summary.monsters_alive,
            player_damage_taken = summary.player_damage_taken,
            "run finished"
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            room: self.room.name().to_owned(),
            seed: self.seed,
            ticks: self.room.tick().0,
            monsters_alive: self.room.monsters().count(),
            player_damage_taken: self
                .room
                .player()
                .map_or(0, |player| player.damage_taken),
            stats: self.room.stats(),
            cues: self.room.world().cues().counts().clone(),
        }
    }
}

/// Builder for [`Simulation`].
pub struct SimulationBuilder {
    config: RuntimeConfig,
    game_config: GameConfig,
    catalog: MonsterCatalog,
    layout: Option<RoomLayout>,
}

impl SimulationBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            game_config: GameConfig::default(),
            catalog: MonsterCatalog::new(),
            layout: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    pub fn catalog(mut self, catalog: MonsterCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn layout(mut self, layout: RoomLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let layout = self.layout.ok_or(RuntimeError::MissingLayout)?;
        let seed = self.config.resolve_seed();
        let room = Room::from_layout(
            &layout,
            self.catalog,
            self.game_config,
            compute_seed(seed, 0, 0),
        )?
        .with_respawn_delay(self.config.respawn_delay);
        Ok(Simulation {
            config: self.config,
            seed,
            room,
        })
    }
}
