use maze_chase_core::{PursuerId, PursuerSnapshot, PursuitView, TargetPoint};

const AMBUSH_LEAD: i32 = 4;
const FLANK_LEAD: i32 = 2;
const SKULK_RADIUS_SQUARED: i64 = 64;

/// Target chosen by a pursuer's identity while pursuing.
pub(crate) fn pursue_target(pursuer: &PursuerSnapshot, view: &PursuitView<'_>) -> TargetPoint {
    let player = view.player();
    let player_point = player.cell.to_point();

    match pursuer.id {
        PursuerId::Chaser => player_point,
        PursuerId::Ambusher => player_point.ahead(player.facing, AMBUSH_LEAD),
        PursuerId::Flanker => {
            let pivot = player_point.ahead(player.facing, FLANK_LEAD);
            let chaser = view
                .pursuer(PursuerId::Chaser)
                .map_or(pursuer.cell, |chaser| chaser.cell)
                .to_point();
            reflect(chaser, pivot)
        }
        PursuerId::Skulker => {
            if pursuer.cell.to_point().distance_squared(player_point) < SKULK_RADIUS_SQUARED {
                pursuer.corner
            } else {
                player_point
            }
        }
    }
}

/// Reflects `point` through `pivot`.
fn reflect(point: TargetPoint, pivot: TargetPoint) -> TargetPoint {
    TargetPoint::new(
        pivot
            .column()
            .saturating_mul(2)
            .saturating_sub(point.column()),
        pivot.row().saturating_mul(2).saturating_sub(point.row()),
    )
}

#[cfg(test)]
mod tests {
    use super::pursue_target;
    use maze_chase_core::{
        CellCoord, Direction, MazeView, Phase, PlayerSnapshot, PursuerId, PursuerSnapshot,
        PursuitView, TargetPoint, Tile,
    };

    const OPEN: [Tile; 400] = [Tile::Open; 400];

    fn snapshot(id: PursuerId, column: u32, row: u32) -> PursuerSnapshot {
        PursuerSnapshot {
            id,
            cell: CellCoord::new(column, row),
            facing: Direction::Stop,
            phase: Phase::Pursue,
            corner: TargetPoint::new(-1, 21),
            due: true,
        }
    }

    fn view(pursuers: Vec<PursuerSnapshot>, facing: Direction) -> PursuitView<'static> {
        PursuitView::new(
            MazeView::new(&OPEN, 20, 20),
            pursuers,
            PlayerSnapshot {
                cell: CellCoord::new(10, 10),
                facing,
            },
            CellCoord::new(9, 9),
            CellCoord::new(9, 7),
        )
    }

    #[test]
    fn chaser_targets_the_player() {
        let chaser = snapshot(PursuerId::Chaser, 2, 2);
        let view = view(vec![chaser], Direction::Left);
        assert_eq!(pursue_target(&chaser, &view), TargetPoint::new(10, 10));
    }

    #[test]
    fn ambusher_leads_the_player_by_four_tiles() {
        let ambusher = snapshot(PursuerId::Ambusher, 2, 2);
        let view = view(vec![ambusher], Direction::Up);
        assert_eq!(pursue_target(&ambusher, &view), TargetPoint::new(10, 6));

        let still = self::view(vec![ambusher], Direction::Stop);
        assert_eq!(pursue_target(&ambusher, &still), TargetPoint::new(10, 10));
    }

    #[test]
    fn flanker_reflects_the_chaser_through_the_lead_point() {
        let chaser = snapshot(PursuerId::Chaser, 8, 14);
        let flanker = snapshot(PursuerId::Flanker, 0, 0);
        let view = view(vec![flanker, chaser], Direction::Right);
        // lead point (12, 10); 2 * (12, 10) - (8, 14) = (16, 6)
        assert_eq!(pursue_target(&flanker, &view), TargetPoint::new(16, 6));
    }

    #[test]
    fn skulker_retreats_when_close() {
        let far = snapshot(PursuerId::Skulker, 2, 2);
        let view_far = view(vec![far], Direction::Down);
        assert_eq!(pursue_target(&far, &view_far), TargetPoint::new(10, 10));

        let near = snapshot(PursuerId::Skulker, 10, 3);
        let view_near = view(vec![near], Direction::Down);
        assert_eq!(pursue_target(&near, &view_near), TargetPoint::new(-1, 21));

        let boundary = snapshot(PursuerId::Skulker, 10, 2);
        let view_boundary = view(vec![boundary], Direction::Down);
        assert_eq!(
            pursue_target(&boundary, &view_boundary),
            TargetPoint::new(10, 10)
        );
    }
}
