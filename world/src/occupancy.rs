use indexmap::IndexMap;
use marsrover_core::{ObjectId, OccupancySnapshot, Point};

/// Sparse position index; a position is a key only while something occupies it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Occupancy {
    cells: IndexMap<Point, Vec<ObjectId>>,
}

impl Occupancy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// First position holding `id`, scanning in placement order.
    pub(crate) fn locate(&self, id: &ObjectId) -> Option<Point> {
        self.cells
            .iter()
            .find(|(_, occupants)| occupants.contains(id))
            .map(|(position, _)| *position)
    }

    pub(crate) fn occupants(&self, position: Point) -> &[ObjectId] {
        self.cells
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn occupy(&mut self, id: ObjectId, position: Point) {
        self.cells.entry(position).or_default().push(id);
    }

    /// Removes `id` from `position`, dropping the key once it holds nothing.
    pub(crate) fn vacate(&mut self, id: &ObjectId, position: Point) {
        let Some(occupants) = self.cells.get_mut(&position) else {
            return;
        };
        occupants.retain(|occupant| occupant != id);
        if occupants.is_empty() {
            let _ = self.cells.shift_remove(&position);
        }
    }

    pub(crate) fn snapshot(&self) -> OccupancySnapshot {
        self.cells
            .iter()
            .map(|(position, occupants)| (*position, occupants.clone()))
            .collect()
    }
}
