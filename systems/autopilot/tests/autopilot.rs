use garden_guardian_core::{Coin, CoinId, PlayField, Vec2};
use garden_guardian_system_autopilot::{Autopilot, Fallback, Pilot, Surroundings, Target};

const EMPTY: Surroundings<'static> = Surroundings {
    pickups: &[],
    coins: &[],
    pests: &[],
};

#[test]
fn companion_walks_to_guard_point_and_settles_inside_deadband() {
    let autopilot = Autopilot::default();
    let player = Vec2::new(400.0, 300.0);
    let fallback = Fallback::Guard {
        player,
        pointer: Vec2::new(400.0, 220.0),
    };
    let guard = Vec2::new(400.0, 380.0);
    let mut pilot = Pilot {
        position: Vec2::new(350.0, 300.0),
        radius: 20.0,
        speed: 135.0,
    };

    let mut last_distance = pilot.position.distance(guard);
    loop {
        let maneuver = autopilot.handle(&pilot, &EMPTY, fallback, 0.05, PlayField::default());
        assert_eq!(maneuver.target, None);
        if maneuver.position == pilot.position {
            break;
        }
        let distance = maneuver.position.distance(guard);
        assert!(distance < last_distance);
        last_distance = distance;
        pilot.position = maneuver.position;
    }

    assert!(pilot.position.distance(guard) <= 15.0);
}

#[test]
fn movement_is_clamped_to_the_field() {
    let autopilot = Autopilot::default();
    let coins = [Coin {
        id: CoinId::new(4),
        position: Vec2::new(5.0, 300.0),
        value: 6,
        lifetime: 10.0,
    }];
    let surroundings = Surroundings {
        pickups: &[],
        coins: &coins,
        pests: &[],
    };
    let pilot = Pilot {
        position: Vec2::new(25.0, 300.0),
        radius: 20.0,
        speed: 300.0,
    };

    let maneuver = autopilot.handle(&pilot, &surroundings, Fallback::Hold, 1.0, PlayField::default());

    assert_eq!(maneuver.target, Some(Target::Coin(CoinId::new(4))));
    assert_eq!(maneuver.position, Vec2::new(20.0, 300.0));
}
