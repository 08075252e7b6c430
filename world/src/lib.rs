#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative environment state for the Mars rover simulator.
//!
//! [`Plateau`] is the only place positions are stored. Objects register
//! themselves through [`Environment::place_object`], report moves through
//! [`Environment::record_movement`], and derive their own position by asking
//! [`Environment::find_object`]. The plateau enforces bounds and identity
//! uniqueness but lets distinct objects share a position.

use std::cell::RefCell;

use marsrover_core::{
    Environment, EnvironmentBuilder, EnvironmentError, Located, ObjectId, OccupancySnapshot,
    Placeable, Point,
};
use tracing::trace;

mod occupancy;

use occupancy::Occupancy;

/// Rectangular martian environment spanning `(0, 0)` to its dimensions inclusive.
///
/// The occupancy index lives behind a [`RefCell`] so rovers can share a plain
/// reference to the plateau while still committing moves. The plateau is
/// therefore confined to a single thread.
#[derive(Debug)]
pub struct Plateau {
    dimensions: Point,
    occupancy: RefCell<Occupancy>,
}

impl Plateau {
    /// Creates an empty plateau whose inclusive upper corner is `dimensions`.
    #[must_use]
    pub fn new(dimensions: Point) -> Self {
        Self {
            dimensions,
            occupancy: RefCell::new(Occupancy::new()),
        }
    }

    fn verify_position_is_legal(&self, position: Point) -> Result<(), EnvironmentError> {
        let within_x = (0..=self.dimensions.x()).contains(&position.x());
        let within_y = (0..=self.dimensions.y()).contains(&position.y());
        if within_x && within_y {
            Ok(())
        } else {
            Err(EnvironmentError::PositionOutOfBounds { position })
        }
    }
}

fn require_identity(object: &dyn Placeable) -> Result<&ObjectId, EnvironmentError> {
    let id = object.id();
    if id.is_nil() {
        Err(EnvironmentError::NilObject)
    } else {
        Ok(id)
    }
}

impl Environment for Plateau {
    fn dimensions(&self) -> Point {
        self.dimensions
    }

    fn place_object(
        &self,
        object: &dyn Placeable,
        position: Point,
    ) -> Result<(), EnvironmentError> {
        let id = require_identity(object)?;
        self.verify_position_is_legal(position)?;

        let mut occupancy = self.occupancy.borrow_mut();
        if occupancy.locate(id).is_some() {
            return Err(EnvironmentError::ObjectAlreadyExists { id: id.clone() });
        }
        occupancy.occupy(id.clone(), position);
        trace!(%id, %position, "object placed");
        Ok(())
    }

    fn record_movement(
        &self,
        object: &dyn Placeable,
        position: Point,
    ) -> Result<(), EnvironmentError> {
        let id = require_identity(object)?;
        self.verify_position_is_legal(position)?;

        let mut occupancy = self.occupancy.borrow_mut();
        let Some(from) = occupancy.locate(id) else {
            return Err(EnvironmentError::ObjectDoesNotExist { id: id.clone() });
        };
        occupancy.vacate(id, from);
        occupancy.occupy(id.clone(), position);
        trace!(%id, %from, to = %position, "movement recorded");
        Ok(())
    }

    fn show_objects(&self) -> OccupancySnapshot {
        self.occupancy.borrow().snapshot()
    }

    fn find_object(&self, object: &dyn Placeable) -> Option<Located> {
        let id = object.id();
        if id.is_nil() {
            return None;
        }
        let position = self.occupancy.borrow().locate(id)?;
        Some(Located {
            position,
            id: id.clone(),
        })
    }

    fn inspect_position(&self, position: Point) -> Result<Vec<ObjectId>, EnvironmentError> {
        self.verify_position_is_legal(position)?;
        Ok(self.occupancy.borrow().occupants(position).to_vec())
    }
}

/// Builds empty plateaus for mission control.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlateauBuilder;

impl EnvironmentBuilder for PlateauBuilder {
    fn new_environment(&self, bounds: Point) -> Box<dyn Environment> {
        Box::new(Plateau::new(bounds))
    }
}
