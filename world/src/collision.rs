use maze_chase_core::{ActorId, Event, Phase, PursuerId, Tile};
use tracing::{debug, info};

use crate::World;

const DOT_POINTS: u64 = 10;
const POWER_ITEM_POINTS: u64 = 50;
const BONUS_POINTS: u64 = 200;
const CAPTURE_BASE_POINTS: u64 = 100;

/// Score that must be exceeded before the bonus item appears.
pub(crate) const BONUS_THRESHOLD: u64 = 700;

fn capture_points(streak: u32) -> u64 {
    2u64.checked_pow(streak)
        .map_or(u64::MAX, |factor| CAPTURE_BASE_POINTS.saturating_mul(factor))
}

impl World {
    /// Resolves everything the player touches after this tick's moves.
    pub(crate) fn resolve_collisions(&mut self, out_events: &mut Vec<Event>) {
        self.collect_at_player(out_events);
        self.collect_bonus(out_events);
        self.resolve_pursuer_contact(out_events);
    }

    fn collect_at_player(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player().cell;
        let Some(tile) = self.maze.take_collectible(cell) else {
            return;
        };

        let points = match tile {
            Tile::PowerItem => POWER_ITEM_POINTS,
            _ => DOT_POINTS,
        };
        self.session.score = self.session.score.saturating_add(points);
        out_events.push(Event::CollectibleTaken {
            cell,
            tile,
            points,
            remaining: self.maze.remaining_collectibles(),
        });

        if tile == Tile::PowerItem {
            self.broadcast_vulnerable(out_events);
        }
    }

    fn broadcast_vulnerable(&mut self, out_events: &mut Vec<Event>) {
        let level = self.session.level;
        let tick = self.session.tick;
        self.session.capture_streak = 0;
        for actor in &mut self.actors {
            if actor.id == ActorId::Player {
                continue;
            }
            let from = actor.enter_phase(Phase::Vulnerable, &self.clock, level, tick);
            if from != Phase::Vulnerable {
                out_events.push(Event::PhaseChanged {
                    actor: actor.id,
                    from,
                    to: Phase::Vulnerable,
                });
            }
        }
        debug!(tick, "pursuers vulnerable");
    }

    fn collect_bonus(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player().cell;
        if self.session.bonus.placed != Some(cell) {
            return;
        }

        self.session.bonus.placed = None;
        self.session.bonus.collected = true;
        self.session.score = self.session.score.saturating_add(BONUS_POINTS);
        debug!(?cell, score = self.session.score, "bonus collected");
        out_events.push(Event::BonusCollected {
            cell,
            points: BONUS_POINTS,
        });
    }

    fn resolve_pursuer_contact(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player().cell;
        let Some((pursuer, phase)) = PursuerId::ALL.into_iter().find_map(|id| {
            let actor = self.actor(ActorId::Pursuer(id));
            (actor.cell == cell).then_some((id, actor.phase))
        }) else {
            return;
        };

        match phase {
            Phase::Vulnerable => self.capture(pursuer, out_events),
            Phase::Disperse | Phase::Pursue => self.catch_player(pursuer, out_events),
            Phase::Captured => {}
        }
    }

    fn capture(&mut self, pursuer: PursuerId, out_events: &mut Vec<Event>) {
        let level = self.session.level;
        let tick = self.session.tick;
        let streak = self.session.capture_streak.saturating_add(1);
        let points = capture_points(streak);
        self.session.capture_streak = streak;
        self.session.score = self.session.score.saturating_add(points);

        let actor = &mut self.actors[pursuer.index()];
        let from = actor.enter_phase(Phase::Captured, &self.clock, level, tick);
        debug!(?pursuer, streak, points, "pursuer captured");
        out_events.push(Event::PhaseChanged {
            actor: ActorId::Pursuer(pursuer),
            from,
            to: Phase::Captured,
        });
        out_events.push(Event::PursuerCaptured {
            pursuer,
            streak,
            points,
        });
    }

    fn catch_player(&mut self, pursuer: PursuerId, out_events: &mut Vec<Event>) {
        self.session.lives = self.session.lives.saturating_sub(1);
        self.respawn_all();
        debug!(?pursuer, lives = self.session.lives, "player caught");
        out_events.push(Event::PlayerCaught {
            lives_remaining: self.session.lives,
        });

        if self.session.lives == 0 {
            self.session.ended = true;
            info!(
                score = self.session.score,
                level = self.session.level,
                tick = self.session.tick,
                "session ended"
            );
            out_events.push(Event::SessionEnded {
                score: self.session.score,
                level: self.session.level,
            });
        }
    }
}
