use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use maze_chase_core::PhaseClock;
use maze_chase_world::{MazeLayout, WorldConfig};
use serde::Deserialize;

/// Run configuration, loaded from a TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) tick_rate_hz: u32,
    pub(crate) death_pause_ms: u64,
    pub(crate) ready_ticks: u64,
    pub(crate) player_cadence: u64,
    pub(crate) pursuer_cadence: u64,
    pub(crate) starting_lives: u32,
    pub(crate) phase_clock: PhaseClock,
    pub(crate) layout: Option<MazeLayout>,
}

impl Default for Config {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            tick_rate_hz: 60,
            death_pause_ms: 2000,
            ready_ticks: world.ready_ticks,
            player_cadence: world.player_cadence,
            pursuer_cadence: world.pursuer_cadence,
            starting_lives: world.starting_lives,
            phase_clock: world.phase_clock,
            layout: None,
        }
    }
}

impl Config {
    /// Reads the file at `path`, or returns the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::parse(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.tick_rate_hz > 0, "tick_rate_hz must be positive");
        ensure!(self.starting_lives > 0, "starting_lives must be positive");
        ensure!(
            self.player_cadence > 0 && self.pursuer_cadence > 0,
            "movement cadences must be positive"
        );
        Ok(())
    }

    pub(crate) fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    pub(crate) fn death_pause(&self) -> Duration {
        Duration::from_millis(self.death_pause_ms)
    }

    pub(crate) fn world_config(&self) -> WorldConfig {
        WorldConfig {
            layout: self.layout.clone().unwrap_or_else(MazeLayout::classic),
            phase_clock: self.phase_clock.clone(),
            player_cadence: self.player_cadence,
            pursuer_cadence: self.pursuer_cadence,
            starting_lives: self.starting_lives,
            ready_ticks: self.ready_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::CellCoord;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").expect("defaults");
        assert_eq!(config, Config::default());
        assert_eq!(config.frame_interval(), Duration::from_secs(1) / 60);
        assert_eq!(config.death_pause(), Duration::from_millis(2000));
        assert_eq!(config.world_config(), WorldConfig::default());
    }

    #[test]
    fn overrides_and_custom_layout_are_applied() {
        let config = Config::parse(
            r#"
            tick_rate_hz = 30
            ready_ticks = 0
            starting_lives = 5

            [phase_clock]
            pursue_ticks = 300
            vulnerable_ticks = 120
            disperse = [{ from_level = 1, ticks = 60 }]

            [layout]
            rows = ['#####', '#*_G#', '#####']
            player_spawn = { column = 1, row = 1 }
            den_target = { column = 3, row = 1 }
            den_exit = { column = 2, row = 1 }
            chaser = { spawn = { column = 3, row = 1 }, corner = { column = 9, row = -1 } }
            ambusher = { spawn = { column = 3, row = 1 }, corner = { column = -1, row = -1 } }
            flanker = { spawn = { column = 3, row = 1 }, corner = { column = 9, row = 5 } }
            skulker = { spawn = { column = 3, row = 1 }, corner = { column = -1, row = 5 } }
            "#,
        )
        .expect("valid config");

        let world = config.world_config();
        assert_eq!(world.starting_lives, 5);
        assert_eq!(world.ready_ticks, 0);
        assert_eq!(world.phase_clock.disperse_ticks(4), 60);
        assert_eq!(world.layout.player_spawn, CellCoord::new(1, 1));
        assert_eq!(config.frame_interval(), Duration::from_secs(1) / 30);
    }

    #[test]
    fn unknown_keys_and_zero_rates_are_rejected() {
        assert!(Config::parse("tick_rate = 60").is_err());
        assert!(Config::parse("tick_rate_hz = 0").is_err());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = Config::load(Some(Path::new("/nonexistent/maze-chase.toml")))
            .expect_err("missing file");
        assert!(format!("{error:#}").contains("/nonexistent/maze-chase.toml"));
    }
}
