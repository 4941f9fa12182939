use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use maze_chase_core::{Direction, Event};
use maze_chase_rendering::{AudioSink, InputSource, RenderingBackend, Scene, SceneActor};
use maze_chase_simulation::Simulation;
use maze_chase_world::{query, World, WorldConfig};
use serde::Serialize;
use tracing::{debug, info, trace};

/// Knobs controlling how long and how fast sessions run.
#[derive(Clone, Debug)]
pub(crate) struct RunOptions {
    pub(crate) seed: u64,
    pub(crate) max_ticks: Option<u64>,
    pub(crate) max_sessions: u32,
    pub(crate) render_every: u64,
    pub(crate) frame_interval: Option<Duration>,
    pub(crate) death_pause: Option<Duration>,
}

/// Outcome of a single session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct SessionSummary {
    pub(crate) seed: u64,
    pub(crate) score: u64,
    pub(crate) level: u32,
    pub(crate) lives: u32,
    pub(crate) ticks: u64,
    pub(crate) ended: bool,
}

/// Outcome of a whole run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) ticks: u64,
    pub(crate) sessions: Vec<SessionSummary>,
}

/// Drives sessions tick by tick and forwards output to the collaborators.
pub(crate) struct Runner<R, A, I> {
    world_config: WorldConfig,
    options: RunOptions,
    renderer: R,
    audio: A,
    input: I,
}

impl<R, A, I> Runner<R, A, I>
where
    R: RenderingBackend,
    A: AudioSink,
    I: InputSource,
{
    pub(crate) fn new(
        world_config: WorldConfig,
        options: RunOptions,
        renderer: R,
        audio: A,
        input: I,
    ) -> Self {
        Self {
            world_config,
            options,
            renderer,
            audio,
            input,
        }
    }

    /// Runs sessions until quit is requested or a budget is exhausted.
    pub(crate) fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary {
            ticks: 0,
            sessions: Vec::new(),
        };
        let mut session_index = 0u32;
        let mut seed = self.options.seed;
        let mut simulation = self.start_session(seed)?;
        let mut session_started = 0u64;
        let mut events = Vec::new();
        let mut next_frame = Instant::now();

        loop {
            if self.input.quit_requested() {
                info!("quit requested");
                break;
            }
            if self
                .options
                .max_ticks
                .map_or(false, |limit| summary.ticks >= limit)
            {
                debug!(ticks = summary.ticks, "tick budget exhausted");
                break;
            }

            let requested = Direction::from_held(|direction| self.input.is_requested(direction));
            events.clear();
            simulation.step(requested, &mut events);
            self.input.advance();
            summary.ticks += 1;

            let caught = self.dispatch_cues(&events);
            if self.options.render_every > 0 && summary.ticks % self.options.render_every == 0 {
                self.renderer
                    .present(&scene(simulation.world()))
                    .context("failed to present frame")?;
            }

            if caught {
                if let Some(pause) = self.options.death_pause {
                    thread::sleep(pause);
                    next_frame = Instant::now();
                }
            }
            if let Some(interval) = self.options.frame_interval {
                next_frame += interval;
                let now = Instant::now();
                if next_frame > now {
                    thread::sleep(next_frame - now);
                } else {
                    next_frame = now;
                }
            }

            if simulation.is_over() {
                summary.sessions.push(summarize(
                    simulation.world(),
                    seed,
                    summary.ticks - session_started,
                ));
                session_index += 1;
                if session_index >= self.options.max_sessions {
                    break;
                }
                seed = seed.wrapping_add(1);
                simulation = self.start_session(seed)?;
                session_started = summary.ticks;
            }
        }

        if !simulation.is_over() {
            summary.sessions.push(summarize(
                simulation.world(),
                seed,
                summary.ticks - session_started,
            ));
        }
        Ok(summary)
    }

    fn start_session(&self, seed: u64) -> Result<Simulation> {
        let simulation = Simulation::new(self.world_config.clone(), seed)
            .context("failed to build the maze")?;
        info!(seed, "session started");
        Ok(simulation)
    }

    /// Forwards sound cues, returning whether the player was caught this tick.
    fn dispatch_cues(&mut self, events: &[Event]) -> bool {
        let mut caught = false;
        for event in events {
            if let Some(cue) = event.sound_cue() {
                trace!(?cue, "sound cue");
                self.audio.play(cue);
            }
            match event {
                Event::PlayerCaught { lives_remaining } => {
                    info!(lives_remaining, "player caught");
                    caught = true;
                }
                Event::LevelAdvanced { level } => info!(level, "level cleared"),
                Event::SessionEnded { score, level } => info!(score, level, "game over"),
                _ => {}
            }
        }
        caught
    }
}

fn summarize(world: &World, seed: u64, ticks: u64) -> SessionSummary {
    let session = query::session(world);
    SessionSummary {
        seed,
        score: session.score,
        level: session.level,
        lives: session.lives,
        ticks,
        ended: session.ended,
    }
}

/// Captures everything a backend needs to draw the current tick.
pub(crate) fn scene(world: &World) -> Scene {
    let maze = query::maze(world);
    let session = query::session(world);
    let actors = query::actors(world)
        .into_iter()
        .map(|actor| SceneActor {
            id: actor.id,
            cell: actor.cell,
            facing: actor.facing,
            phase: actor.phase,
        })
        .collect();

    Scene::new(
        maze.columns(),
        maze.rows(),
        maze.view().iter().collect(),
        actors,
        query::bonus(world),
        session.score,
        session.lives,
        session.level,
        session.tick,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::SoundCue;
    use maze_chase_rendering::{ScriptedInput, SilentAudio, TextBackend};
    use maze_chase_world::scaffolding;

    #[derive(Default)]
    struct RecordingAudio {
        cues: Vec<SoundCue>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }
    }

    struct QuitAfter {
        remaining: u32,
    }

    impl InputSource for QuitAfter {
        fn is_requested(&self, _direction: Direction) -> bool {
            false
        }

        fn quit_requested(&self) -> bool {
            self.remaining == 0
        }

        fn advance(&mut self) {
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    fn options(max_ticks: Option<u64>, max_sessions: u32, render_every: u64) -> RunOptions {
        RunOptions {
            seed: 9,
            max_ticks,
            max_sessions,
            render_every,
            frame_interval: None,
            death_pause: None,
        }
    }

    fn deadly_config() -> WorldConfig {
        let mut layout = scaffolding::compact_layout();
        layout.chaser.spawn = layout.player_spawn;
        WorldConfig {
            layout,
            ready_ticks: 0,
            starting_lives: 1,
            pursuer_cadence: 0,
            ..WorldConfig::default()
        }
    }

    #[test]
    fn tick_budget_stops_the_run() {
        let mut runner = Runner::new(
            WorldConfig::default(),
            options(Some(30), 1, 10),
            TextBackend::new(Vec::new()),
            RecordingAudio::default(),
            ScriptedInput::parse("L", 1).expect("script"),
        );
        let summary = runner.run().expect("run");

        assert_eq!(summary.ticks, 30);
        assert_eq!(summary.sessions.len(), 1);
        assert!(!summary.sessions[0].ended);
        assert_eq!(runner.audio.cues, vec![SoundCue::Intro]);

        let frames = String::from_utf8(runner.renderer.into_inner()).expect("utf8");
        assert_eq!(frames.matches("score 0 lives 3").count(), 3);
    }

    #[test]
    fn ended_sessions_are_replaced_until_the_budget() {
        let mut runner = Runner::new(
            deadly_config(),
            options(Some(100), 3, 0),
            TextBackend::new(Vec::new()),
            SilentAudio,
            ScriptedInput::parse("", 1).expect("script"),
        );
        let summary = runner.run().expect("run");

        assert_eq!(summary.ticks, 3);
        let seeds: Vec<u64> = summary.sessions.iter().map(|session| session.seed).collect();
        assert_eq!(seeds, vec![9, 10, 11]);
        assert!(summary
            .sessions
            .iter()
            .all(|session| session.ended && session.lives == 0 && session.ticks == 1));
    }

    #[test]
    fn quit_request_stops_between_ticks() {
        let mut runner = Runner::new(
            WorldConfig::default(),
            options(None, 1, 0),
            TextBackend::new(Vec::new()),
            SilentAudio,
            QuitAfter { remaining: 5 },
        );
        let summary = runner.run().expect("run");
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.sessions.len(), 1);
    }

    #[test]
    fn scene_mirrors_the_world() {
        let world = World::new(WorldConfig::default()).expect("classic");
        let scene = scene(&world);
        assert_eq!((scene.columns, scene.rows), (23, 25));
        assert_eq!(scene.actors.len(), 5);
        assert_eq!(scene.lives, 3);
        assert_eq!(scene.text_rows()[18].chars().nth(11), Some('P'));
    }
}
