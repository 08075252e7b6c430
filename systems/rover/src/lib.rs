#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rover system that turns heading changes and move requests into
//! environment operations.
//!
//! A [`Rover`] owns only its identity and heading. Its position is always
//! derived from the environment it was launched into, so the two can never
//! disagree. The environment tolerates shared positions; rovers do not, and
//! inspect the cell ahead before committing anything.

use std::fmt;

use marsrover_core::{
    Direction, Environment, Heading, Navigable, ObjectId, Placeable, Point, RoverBuilder,
    RoverError,
};
use tracing::{debug, warn};
use uuid::Uuid;

/// Reaction of a rover when the cell ahead is already occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionPolicy {
    /// Fail the move with [`RoverError::IncompatibleObjectDetected`].
    #[default]
    Abort,
    /// Keep the current position and treat the move as complete.
    Hold,
}

/// Mobile unit registered within an environment.
pub struct Rover<'env> {
    id: ObjectId,
    heading: Heading,
    collision_policy: CollisionPolicy,
    environment: &'env dyn Environment,
}

impl<'env> Rover<'env> {
    /// Launches a rover that aborts on collisions.
    ///
    /// See [`Rover::launch_with_policy`].
    pub fn launch(
        heading: Heading,
        position: Point,
        environment: &'env dyn Environment,
    ) -> Result<Self, RoverError> {
        Self::launch_with_policy(heading, position, environment, CollisionPolicy::default())
    }

    /// Creates a rover with a fresh identity and registers it at `position`.
    ///
    /// Fails with [`RoverError::IncompatibleObjectDetected`] when any object
    /// already occupies `position`, regardless of `collision_policy`, and
    /// forwards every error reported by the environment.
    pub fn launch_with_policy(
        heading: Heading,
        position: Point,
        environment: &'env dyn Environment,
        collision_policy: CollisionPolicy,
    ) -> Result<Self, RoverError> {
        let rover = Self {
            id: ObjectId::new(Uuid::new_v4().to_string()),
            heading,
            collision_policy,
            environment,
        };

        if !environment.inspect_position(position)?.is_empty() {
            return Err(RoverError::IncompatibleObjectDetected { position });
        }
        environment.place_object(&rover, position)?;

        debug!(id = %rover.id, %position, %heading, "rover launched");
        Ok(rover)
    }
}

impl fmt::Debug for Rover<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rover")
            .field("id", &self.id)
            .field("heading", &self.heading)
            .field("collision_policy", &self.collision_policy)
            .finish_non_exhaustive()
    }
}

impl Placeable for Rover<'_> {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl Navigable for Rover<'_> {
    fn current_position(&self) -> Result<Point, RoverError> {
        self.environment
            .find_object(self)
            .map(|located| located.position)
            .ok_or_else(|| RoverError::ExpelledFromEnvironment {
                id: self.id.clone(),
            })
    }

    fn current_heading(&self) -> Heading {
        self.heading
    }

    fn change_heading(&mut self, direction: Direction) {
        let from = self.heading;
        self.heading = from.rotate(direction);
        debug!(id = %self.id, %from, to = %self.heading, "rover turned");
    }

    fn move_forward(&mut self) -> Result<(), RoverError> {
        let from = self.current_position()?;
        let target = from
            .step(self.heading)
            .ok_or(RoverError::EdgeOfCoordinateSpace {
                position: from,
                heading: self.heading,
            })?;

        if !self.environment.inspect_position(target)?.is_empty() {
            match self.collision_policy {
                CollisionPolicy::Abort => {
                    return Err(RoverError::IncompatibleObjectDetected { position: target });
                }
                CollisionPolicy::Hold => {
                    warn!(id = %self.id, %from, %target, "path blocked, holding position");
                    return Ok(());
                }
            }
        }

        self.environment.record_movement(&*self, target)?;
        debug!(id = %self.id, %from, to = %target, "rover moved");
        Ok(())
    }
}

/// Launches [`Rover`]s on behalf of mission control.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoverLauncher {
    collision_policy: CollisionPolicy,
}

impl RoverLauncher {
    /// Creates a launcher whose rovers apply `collision_policy`.
    #[must_use]
    pub const fn new(collision_policy: CollisionPolicy) -> Self {
        Self { collision_policy }
    }
}

impl RoverBuilder for RoverLauncher {
    fn launch_rover<'env>(
        &self,
        heading: Heading,
        position: Point,
        environment: &'env dyn Environment,
    ) -> Result<Box<dyn Navigable + 'env>, RoverError> {
        let rover =
            Rover::launch_with_policy(heading, position, environment, self.collision_policy)?;
        Ok(Box::new(rover))
    }
}
