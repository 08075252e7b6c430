use marsrover_core::{
    Direction, Environment, EnvironmentError, Heading, Located, Navigable, ObjectId,
    OccupancySnapshot, Placeable, Point, RoverBuilder, RoverError,
};
use marsrover_system_rover::{CollisionPolicy, Rover, RoverLauncher};
use marsrover_world::Plateau;
use proptest::prelude::*;

fn drive(rover: &mut Rover<'_>, commands: &str) -> Result<(), RoverError> {
    for symbol in commands.chars() {
        match symbol {
            'M' => rover.move_forward()?,
            other => rover.change_heading(Direction::from_letter(other).expect("turn letter")),
        }
    }
    Ok(())
}

#[test]
fn launch_registers_rover_at_requested_position() {
    let plateau = Plateau::new(Point::new(5, 5));
    let rover = Rover::launch(Heading::North, Point::new(1, 2), &plateau).expect("launch");

    assert_eq!(rover.current_position(), Ok(Point::new(1, 2)));
    assert_eq!(rover.current_heading(), Heading::North);
    assert_eq!(
        plateau.find_object(&rover).map(|located| located.id),
        Some(rover.id().clone())
    );
}

#[test]
fn launched_rovers_receive_distinct_identities() {
    let plateau = Plateau::new(Point::new(5, 5));
    let first = Rover::launch(Heading::North, Point::new(0, 0), &plateau).expect("first");
    let second = Rover::launch(Heading::North, Point::new(1, 0), &plateau).expect("second");

    assert_ne!(first.id(), second.id());
    assert!(!first.id().is_nil());
}

#[test]
fn launch_onto_occupied_position_is_rejected() {
    let plateau = Plateau::new(Point::new(5, 5));
    let first = Rover::launch(Heading::East, Point::new(2, 2), &plateau).expect("first");

    let second = Rover::launch_with_policy(
        Heading::West,
        Point::new(2, 2),
        &plateau,
        CollisionPolicy::Hold,
    );

    assert_eq!(
        second.map(|rover| rover.current_heading()),
        Err(RoverError::IncompatibleObjectDetected {
            position: Point::new(2, 2)
        })
    );
    assert_eq!(
        first.current_position(),
        Ok(Point::new(2, 2)),
        "first rover must stay registered and queryable"
    );
    assert_eq!(plateau.inspect_position(Point::new(2, 2)).map(|ids| ids.len()), Ok(1));
}

#[test]
fn launch_outside_bounds_surfaces_environment_error() {
    let plateau = Plateau::new(Point::new(5, 5));
    let result = Rover::launch(Heading::North, Point::new(6, 1), &plateau);

    assert_eq!(
        result.map(|rover| rover.current_heading()),
        Err(RoverError::Environment(
            EnvironmentError::PositionOutOfBounds {
                position: Point::new(6, 1)
            }
        ))
    );
    assert!(plateau.show_objects().is_empty());
}

#[test]
fn turning_never_touches_position() {
    let plateau = Plateau::new(Point::new(5, 5));
    let mut rover = Rover::launch(Heading::North, Point::new(3, 3), &plateau).expect("launch");

    rover.change_heading(Direction::Left);
    assert_eq!(rover.current_heading(), Heading::West);
    rover.change_heading(Direction::Right);
    rover.change_heading(Direction::Right);
    assert_eq!(rover.current_heading(), Heading::East);
    assert_eq!(rover.current_position(), Ok(Point::new(3, 3)));
}

#[test]
fn moves_follow_heading() {
    let plateau = Plateau::new(Point::new(5, 5));
    let mut rover = Rover::launch(Heading::North, Point::new(1, 2), &plateau).expect("launch");

    drive(&mut rover, "LMLMLMLMM").expect("route stays on the plateau");

    assert_eq!(rover.current_position(), Ok(Point::new(1, 3)));
    assert_eq!(rover.current_heading(), Heading::North);
}

#[test]
fn moving_off_the_edge_fails_and_keeps_position() {
    let plateau = Plateau::new(Point::new(2, 2));
    let mut rover = Rover::launch(Heading::South, Point::new(1, 0), &plateau).expect("launch");

    assert_eq!(
        rover.move_forward(),
        Err(RoverError::Environment(
            EnvironmentError::PositionOutOfBounds {
                position: Point::new(1, -1)
            }
        ))
    );
    assert_eq!(rover.current_position(), Ok(Point::new(1, 0)));
    assert_eq!(rover.current_heading(), Heading::South);
}

#[test]
fn moving_past_the_coordinate_range_names_the_edge() {
    let plateau = Plateau::new(Point::new(i32::MAX, i32::MAX));
    let mut rover =
        Rover::launch(Heading::East, Point::new(i32::MAX, 0), &plateau).expect("launch");

    assert_eq!(
        rover.move_forward(),
        Err(RoverError::EdgeOfCoordinateSpace {
            position: Point::new(i32::MAX, 0),
            heading: Heading::East,
        })
    );
    assert_eq!(rover.current_position(), Ok(Point::new(i32::MAX, 0)));
}

#[test]
fn moving_into_occupied_cell_aborts_by_default() {
    let plateau = Plateau::new(Point::new(5, 5));
    let _blocker = Rover::launch(Heading::North, Point::new(2, 3), &plateau).expect("blocker");
    let mut rover = Rover::launch(Heading::North, Point::new(2, 2), &plateau).expect("rover");

    assert_eq!(
        rover.move_forward(),
        Err(RoverError::IncompatibleObjectDetected {
            position: Point::new(2, 3)
        })
    );
    assert_eq!(rover.current_position(), Ok(Point::new(2, 2)));
}

#[test]
fn hold_policy_absorbs_blocked_moves() {
    let plateau = Plateau::new(Point::new(5, 5));
    let _blocker = Rover::launch(Heading::North, Point::new(2, 3), &plateau).expect("blocker");
    let mut rover =
        Rover::launch_with_policy(Heading::North, Point::new(2, 2), &plateau, CollisionPolicy::Hold)
            .expect("rover");

    assert_eq!(rover.move_forward(), Ok(()));
    assert_eq!(rover.current_position(), Ok(Point::new(2, 2)));
}

#[test]
fn hold_policy_still_rejects_leaving_the_plateau() {
    let plateau = Plateau::new(Point::new(1, 1));
    let mut rover =
        Rover::launch_with_policy(Heading::East, Point::new(1, 1), &plateau, CollisionPolicy::Hold)
            .expect("rover");

    assert!(matches!(
        rover.move_forward(),
        Err(RoverError::Environment(
            EnvironmentError::PositionOutOfBounds { .. }
        ))
    ));
}

#[test]
fn launcher_returns_navigable_rover() {
    let plateau = Plateau::new(Point::new(4, 4));
    let launcher = RoverLauncher::new(CollisionPolicy::Abort);
    let mut rover = launcher
        .launch_rover(Heading::East, Point::new(0, 0), &plateau)
        .expect("launch");

    rover.move_forward().expect("move east");
    let status = rover.status().expect("status");
    assert_eq!(status.to_string(), "1 0 E");
}

/// Environment that accepts everything but never remembers anything.
#[derive(Debug, Default)]
struct ForgetfulEnvironment;

impl Environment for ForgetfulEnvironment {
    fn dimensions(&self) -> Point {
        Point::new(10, 10)
    }

    fn place_object(
        &self,
        _object: &dyn Placeable,
        _position: Point,
    ) -> Result<(), EnvironmentError> {
        Ok(())
    }

    fn record_movement(
        &self,
        object: &dyn Placeable,
        _position: Point,
    ) -> Result<(), EnvironmentError> {
        Err(EnvironmentError::ObjectDoesNotExist {
            id: object.id().clone(),
        })
    }

    fn show_objects(&self) -> OccupancySnapshot {
        OccupancySnapshot::new()
    }

    fn find_object(&self, _object: &dyn Placeable) -> Option<Located> {
        None
    }

    fn inspect_position(&self, _position: Point) -> Result<Vec<ObjectId>, EnvironmentError> {
        Ok(Vec::new())
    }
}

#[test]
fn rover_forgotten_by_environment_reports_expulsion() {
    let environment = ForgetfulEnvironment;
    let mut rover =
        Rover::launch(Heading::North, Point::new(1, 1), &environment).expect("launch");

    let expected = RoverError::ExpelledFromEnvironment {
        id: rover.id().clone(),
    };
    assert_eq!(rover.current_position(), Err(expected.clone()));
    assert_eq!(rover.move_forward(), Err(expected));
}

fn arb_route() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('L'), Just('R'), Just('M')], 1..24)
        .prop_map(|symbols| symbols.into_iter().collect())
}

proptest! {
    #[test]
    fn failed_moves_leave_position_unchanged(route in arb_route()) {
        let plateau = Plateau::new(Point::new(3, 3));
        let _obstacle = Rover::launch(Heading::North, Point::new(2, 2), &plateau).expect("obstacle");
        let mut rover = Rover::launch(Heading::North, Point::new(0, 0), &plateau).expect("rover");

        for symbol in route.chars() {
            if symbol == 'M' {
                let before = rover.current_position().expect("registered");
                let heading = rover.current_heading();
                if rover.move_forward().is_err() {
                    prop_assert_eq!(rover.current_position().expect("registered"), before);
                    prop_assert_eq!(rover.current_heading(), heading);
                }
            } else {
                rover.change_heading(Direction::from_letter(symbol).expect("turn letter"));
            }
        }

        let occupied: usize = plateau.show_objects().values().map(Vec::len).sum();
        prop_assert_eq!(occupied, 2);
    }
}
