#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mars rover simulator.
//!
//! This crate defines the vocabulary that connects the authoritative
//! environment, the rover systems, and mission control. Environments own the
//! truth about which [`ObjectId`] occupies which [`Point`]; anything that wants
//! to live inside an environment only needs to implement [`Placeable`]. Rovers
//! implement [`Navigable`] and are constructed through a [`RoverBuilder`], while
//! environments are constructed through an [`EnvironmentBuilder`], so mission
//! logic never names a concrete type.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Location on a plateau expressed as integer coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate; grows toward the east.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate; grows toward the north.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring point one unit along the provided heading.
    ///
    /// Yields `None` when the neighbour cannot be represented.
    #[must_use]
    pub fn step(self, heading: Heading) -> Option<Self> {
        let (dx, dy) = heading.offset();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal orientation of an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward increasing `y`.
    North,
    /// Facing toward increasing `x`.
    East,
    /// Facing toward decreasing `y`.
    South,
    /// Facing toward decreasing `x`.
    West,
}

impl Heading {
    /// Every heading in clockwise order starting from north.
    pub const ALL: [Heading; 4] = [Self::North, Self::East, Self::South, Self::West];

    const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Rotates a quarter turn in the provided direction.
    ///
    /// Right advances clockwise (west wraps to north), left retreats
    /// counter-clockwise (north wraps to west).
    #[must_use]
    pub const fn rotate(self, direction: Direction) -> Self {
        let index = self.index();
        let next = match direction {
            Direction::Right => (index + 1) % Self::ALL.len(),
            Direction::Left => (index + Self::ALL.len() - 1) % Self::ALL.len(),
        };
        Self::ALL[next]
    }

    /// Single-letter code used by mission commands and status lines.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Decodes a single-letter heading code. Unknown letters yield `None`.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Heading {
    type Err = ParseHeadingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut letters = value.chars();
        let decoded = match (letters.next(), letters.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => None,
        };
        decoded.ok_or_else(|| ParseHeadingError {
            value: value.to_owned(),
        })
    }
}

/// Reported when text does not name one of the four cardinal headings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised heading '{value}'")]
pub struct ParseHeadingError {
    value: String,
}

/// Turn direction applied to a heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Quarter turn counter-clockwise.
    Left,
    /// Quarter turn clockwise.
    Right,
}

impl Direction {
    /// Decodes a single-letter turn code (`L` or `R`). Unknown letters yield `None`.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }

    /// Single-letter turn code used by navigation commands.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut letters = value.chars();
        let decoded = match (letters.next(), letters.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => None,
        };
        decoded.ok_or_else(|| ParseDirectionError {
            value: value.to_owned(),
        })
    }
}

/// Reported when text does not name a turn direction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised direction '{value}'")]
pub struct ParseDirectionError {
    value: String,
}

/// Stable identity of an object placed within an environment.
///
/// The empty identity is the nil object: environments refuse to place or move
/// it and never find it.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wraps the provided token as an object identity.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Identity that stands for "no object".
    #[must_use]
    pub const fn nil() -> Self {
        Self(String::new())
    }

    /// Reports whether this is the nil identity.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability required of anything placed in an environment.
pub trait Placeable {
    /// Identity assigned at creation; never changes.
    fn id(&self) -> &ObjectId;
}

impl Placeable for ObjectId {
    fn id(&self) -> &ObjectId {
        self
    }
}

/// Object identity paired with the position it occupies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Located {
    /// Position currently occupied by the object.
    pub position: Point,
    /// Identity of the located object.
    pub id: ObjectId,
}

/// Point-in-time copy of an environment's occupancy.
///
/// Only occupied positions appear as keys; every listed position holds at
/// least one identity.
pub type OccupancySnapshot = BTreeMap<Point, Vec<ObjectId>>;

/// Bounded space that is the single source of truth for object positions.
///
/// Operations take `&self` so that every object launched into the environment
/// can keep a shared reference to it for its whole lifetime.
pub trait Environment {
    /// Inclusive upper corner of the environment.
    fn dimensions(&self) -> Point;

    /// Registers a new object at `position`.
    ///
    /// Several distinct objects may share a position; collision policy belongs
    /// to the objects themselves.
    fn place_object(&self, object: &dyn Placeable, position: Point)
        -> Result<(), EnvironmentError>;

    /// Moves an already placed object to `position`.
    fn record_movement(
        &self,
        object: &dyn Placeable,
        position: Point,
    ) -> Result<(), EnvironmentError>;

    /// Captures every occupied position together with its objects.
    fn show_objects(&self) -> OccupancySnapshot;

    /// Locates the object sharing `object`'s identity, if registered.
    fn find_object(&self, object: &dyn Placeable) -> Option<Located>;

    /// Lists the objects at `position`; an empty list means the position is free.
    fn inspect_position(&self, position: Point) -> Result<Vec<ObjectId>, EnvironmentError>;
}

/// Mobile object that can be steered within its environment.
pub trait Navigable: Placeable {
    /// Position reported by the environment for this object.
    fn current_position(&self) -> Result<Point, RoverError>;

    /// Heading the object currently faces.
    fn current_heading(&self) -> Heading;

    /// Rotates a quarter turn; never fails.
    fn change_heading(&mut self, direction: Direction);

    /// Moves one unit forward along the current heading.
    fn move_forward(&mut self) -> Result<(), RoverError>;

    /// Captures the position and heading as a status report.
    fn status(&self) -> Result<RoverStatus, RoverError> {
        Ok(RoverStatus {
            position: self.current_position()?,
            heading: self.current_heading(),
        })
    }
}

/// Constructs environments on behalf of mission control.
pub trait EnvironmentBuilder {
    /// Creates an empty environment whose inclusive upper corner is `bounds`.
    fn new_environment(&self, bounds: Point) -> Box<dyn Environment>;
}

/// Launches rovers into an environment on behalf of mission control.
pub trait RoverBuilder {
    /// Creates a rover facing `heading` and registers it at `position`.
    ///
    /// A rover that fails to launch is never returned.
    fn launch_rover<'env>(
        &self,
        heading: Heading,
        position: Point,
        environment: &'env dyn Environment,
    ) -> Result<Box<dyn Navigable + 'env>, RoverError>;
}

/// Final report of a navigated rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverStatus {
    /// Position the rover occupies.
    pub position: Point,
    /// Heading the rover faces.
    pub heading: Heading,
}

impl fmt::Display for RoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.position.x(),
            self.position.y(),
            self.heading
        )
    }
}

/// Reasons an environment rejects an operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    /// The nil object was supplied.
    #[error("the environment cannot interact with a nil object")]
    NilObject,
    /// An object with the same identity is already registered.
    #[error("object with ID '{id}' already exists within the environment")]
    ObjectAlreadyExists {
        /// Identity that is already registered.
        id: ObjectId,
    },
    /// No object with the identity is registered.
    #[error("object with ID '{id}' does not exist within the environment")]
    ObjectDoesNotExist {
        /// Identity that could not be found.
        id: ObjectId,
    },
    /// The position lies outside `[0, bounds]` on at least one axis.
    #[error("position '{position}' is outside the bounds of the environment")]
    PositionOutOfBounds {
        /// Offending position.
        position: Point,
    },
}

/// Reasons a rover cannot launch or move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoverError {
    /// The environment rejected the operation.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    /// The environment no longer recognises the rover.
    #[error("rover '{id}' is no longer recognised by its environment")]
    ExpelledFromEnvironment {
        /// Identity of the rover.
        id: ObjectId,
    },
    /// Another object occupies the launch or move target.
    #[error("an incompatible object was detected at position '{position}'")]
    IncompatibleObjectDetected {
        /// Occupied position.
        position: Point,
    },
    /// The cell ahead lies past the representable coordinate range.
    #[error("no position exists beyond '{position}' heading {heading}")]
    EdgeOfCoordinateSpace {
        /// Position the rover holds.
        position: Point,
        /// Heading the rover attempted to move along.
        heading: Heading,
    },
}

/// Reasons a mission aborts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MissionError {
    /// The environment line is missing or malformed.
    #[error("error parsing environment command '{command}'")]
    ParsingEnvironmentCommand {
        /// Offending command text.
        command: String,
    },
    /// A rover block is incomplete or one of its lines is malformed.
    #[error("error parsing rover command '{command}'")]
    ParsingRoverCommand {
        /// Offending command text.
        command: String,
    },
    /// A rover failed to launch or move.
    #[error(transparent)]
    Rover(#[from] RoverError),
}
