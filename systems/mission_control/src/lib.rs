#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Mission control: interprets a flat command list into environment and
//! rover operations.
//!
//! The first command defines the plateau bounds (`"X Y"`). Every following
//! pair of commands deploys one rover (`"X Y H"`) and then navigates it with a
//! string of `L`, `R` and `M` symbols. Rovers are handled strictly one after
//! another, and each produces a `"{x} {y} {heading}"` status line. Any failure
//! aborts the whole mission and discards earlier statuses.
//!
//! Mission control only knows the builder and capability traits from
//! `marsrover-core`; concrete plateaus and rovers are supplied by the caller.

use marsrover_core::{
    Direction, Environment, EnvironmentBuilder, Heading, MissionError, Navigable, Point,
    RoverBuilder,
};
use tracing::{debug, info};

const MOVE_SYMBOL: char = 'M';

/// Interaction between rovers and the environment they explore.
#[derive(Clone, Debug, Default)]
pub struct Mission<E, R> {
    environment_builder: E,
    rover_builder: R,
}

impl<E, R> Mission<E, R>
where
    E: EnvironmentBuilder,
    R: RoverBuilder,
{
    /// Creates a mission that constructs its environment and rovers through
    /// the provided builders.
    #[must_use]
    pub const fn new(environment_builder: E, rover_builder: R) -> Self {
        Self {
            environment_builder,
            rover_builder,
        }
    }

    /// Runs the complete mission and returns one status line per rover, in
    /// input order.
    ///
    /// An empty command list is a valid mission without rovers.
    pub fn execute_mission<S: AsRef<str>>(
        &self,
        commands: &[S],
    ) -> Result<Vec<String>, MissionError> {
        if commands.is_empty() {
            return Ok(Vec::new());
        }

        let (environment, mut remaining) = self.establish_environment(commands)?;
        let mut statuses = Vec::new();
        while !remaining.is_empty() {
            let (status, rest) = self.deploy_and_navigate_rover(&*environment, remaining)?;
            statuses.push(status);
            remaining = rest;
        }

        info!(rovers = statuses.len(), "mission complete");
        Ok(statuses)
    }

    /// Builds the environment described by the first command and returns it
    /// together with the unconsumed commands.
    pub fn establish_environment<'c, S: AsRef<str>>(
        &self,
        commands: &'c [S],
    ) -> Result<(Box<dyn Environment>, &'c [S]), MissionError> {
        let Some((command, rest)) = commands.split_first() else {
            return Err(MissionError::ParsingEnvironmentCommand {
                command: String::new(),
            });
        };
        let command = command.as_ref();
        let malformed = || MissionError::ParsingEnvironmentCommand {
            command: command.to_owned(),
        };

        let [x, y] = fields::<2>(command).ok_or_else(malformed)?;
        let bounds = Point::new(
            x.parse().map_err(|_| malformed())?,
            y.parse().map_err(|_| malformed())?,
        );

        let environment = self.environment_builder.new_environment(bounds);
        info!(%bounds, "environment established");
        Ok((environment, rest))
    }

    /// Deploys one rover and navigates it, consuming exactly two commands.
    pub fn deploy_and_navigate_rover<'c, S: AsRef<str>>(
        &self,
        environment: &dyn Environment,
        commands: &'c [S],
    ) -> Result<(String, &'c [S]), MissionError> {
        if commands.len() < 2 {
            return Err(MissionError::ParsingRoverCommand {
                command: commands
                    .iter()
                    .map(AsRef::<str>::as_ref)
                    .collect::<Vec<_>>()
                    .join(" | "),
            });
        }

        let (mut rover, rest) = self.place_rover_in_environment(environment, commands)?;
        self.navigate_rover(&mut *rover, rest)
    }

    /// Launches a rover described by the first command (`"X Y H"`).
    pub fn place_rover_in_environment<'env, 'c, S: AsRef<str>>(
        &self,
        environment: &'env dyn Environment,
        commands: &'c [S],
    ) -> Result<(Box<dyn Navigable + 'env>, &'c [S]), MissionError> {
        let Some((command, rest)) = commands.split_first() else {
            return Err(MissionError::ParsingRoverCommand {
                command: String::new(),
            });
        };
        let command = command.as_ref();
        let malformed = || MissionError::ParsingRoverCommand {
            command: command.to_owned(),
        };

        let [x, y, heading] = fields::<3>(command).ok_or_else(malformed)?;
        let position = Point::new(
            x.parse().map_err(|_| malformed())?,
            y.parse().map_err(|_| malformed())?,
        );
        let heading: Heading = heading.parse().map_err(|_| malformed())?;

        debug!(%position, %heading, "deploying rover");
        let rover = self
            .rover_builder
            .launch_rover(heading, position, environment)?;
        Ok((rover, rest))
    }

    /// Steers `rover` with the symbols of the first command and reports its
    /// final status.
    ///
    /// Symbols run left to right; the first failing move stops the command.
    pub fn navigate_rover<'c, S, N>(
        &self,
        rover: &mut N,
        commands: &'c [S],
    ) -> Result<(String, &'c [S]), MissionError>
    where
        S: AsRef<str>,
        N: Navigable + ?Sized,
    {
        let Some((command, rest)) = commands.split_first() else {
            return Err(MissionError::ParsingRoverCommand {
                command: String::new(),
            });
        };
        let command = command.as_ref();
        let malformed = || MissionError::ParsingRoverCommand {
            command: command.to_owned(),
        };

        let symbols = command.trim();
        if symbols.is_empty() {
            return Err(malformed());
        }
        for symbol in symbols.chars() {
            if symbol == MOVE_SYMBOL {
                rover.move_forward()?;
                continue;
            }
            let direction = Direction::from_letter(symbol).ok_or_else(malformed)?;
            rover.change_heading(direction);
        }

        let status = rover.status()?;
        debug!(%status, "rover navigated");
        Ok((status.to_string(), rest))
    }
}

/// Splits `command` into exactly `N` whitespace-separated fields.
fn fields<const N: usize>(command: &str) -> Option<[&str; N]> {
    let mut parts = command.split_whitespace();
    let mut out = [""; N];
    for slot in &mut out {
        *slot = parts.next()?;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(out),
    }
}
