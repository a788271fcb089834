//! World grid: a fixed `width x height` table of locations.
//!
//! Tiles are stored row-major (`index = y * width + x`) and the table is
//! never resized after construction, so a [`LocationId`] is simply the
//! tile's storage index and stays valid for the whole run. Portals refer to
//! their destination by that index, which keeps the graph free of reference
//! cycles.

use serde::{Deserialize, Serialize};
use textworld_types::{LocationId, LocationRecord};

use crate::error::WorldError;
use crate::location::LocationState;
use crate::portal::Portal;

/// The world grid holding every location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMap {
    width: usize,
    height: usize,
    tiles: Vec<LocationState>,
}

impl WorldMap {
    /// Build a grid from exactly `width * height` location records, in
    /// row-major order. Tiles start with no exits.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyGrid`] for a zero dimension,
    /// [`WorldError::ArithmeticOverflow`] if the tile count overflows, and
    /// [`WorldError::InvariantViolation`] if the record count disagrees with
    /// the grid size.
    pub fn from_records(
        width: usize,
        height: usize,
        records: Vec<LocationRecord>,
    ) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::EmptyGrid { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(WorldError::ArithmeticOverflow)?;
        if records.len() != expected {
            return Err(WorldError::InvariantViolation {
                expected,
                actual: records.len(),
            });
        }

        let mut tiles = Vec::with_capacity(expected);
        for (index, record) in records.into_iter().enumerate() {
            let id = LocationId::from_index(index).ok_or(WorldError::ArithmeticOverflow)?;
            let x = index.checked_rem(width).ok_or(WorldError::ArithmeticOverflow)?;
            let y = index.checked_div(width).ok_or(WorldError::ArithmeticOverflow)?;
            tiles.push(LocationState::from_record(id, record, x, y));
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Grid width in tiles.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of tiles.
    pub fn location_count(&self) -> usize {
        self.tiles.len()
    }

    // -------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------

    /// Storage index for a coordinate, or `None` if off the grid.
    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        y.checked_mul(self.width)?.checked_add(x)
    }

    /// Identifier of the tile at `(x, y)`.
    pub fn tile_id_at(&self, x: usize, y: usize) -> Option<LocationId> {
        self.index_of(x, y).and_then(LocationId::from_index)
    }

    /// The tile at `(x, y)`.
    pub fn get_tile_at(&self, x: usize, y: usize) -> Option<&LocationState> {
        self.index_of(x, y).and_then(|i| self.tiles.get(i))
    }

    /// Get an immutable reference to a location.
    pub fn location(&self, id: LocationId) -> Option<&LocationState> {
        self.tiles.get(id.index())
    }

    /// Get a mutable reference to a location.
    pub fn location_mut(&mut self, id: LocationId) -> Option<&mut LocationState> {
        self.tiles.get_mut(id.index())
    }

    /// Get a location or fail with [`WorldError::LocationNotFound`].
    pub fn require(&self, id: LocationId) -> Result<&LocationState, WorldError> {
        self.location(id).ok_or(WorldError::LocationNotFound(id))
    }

    /// Mutable variant of [`WorldMap::require`].
    pub fn require_mut(&mut self, id: LocationId) -> Result<&mut LocationState, WorldError> {
        self.location_mut(id).ok_or(WorldError::LocationNotFound(id))
    }

    /// All locations in storage order.
    pub fn locations(&self) -> impl Iterator<Item = &LocationState> {
        self.tiles.iter()
    }

    /// Mutable iteration over all locations in storage order.
    pub fn locations_mut(&mut self) -> impl Iterator<Item = &mut LocationState> {
        self.tiles.iter_mut()
    }

    /// All location identifiers in storage order.
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.tiles.iter().map(|t| t.id).collect()
    }

    // -------------------------------------------------------------------
    // Portals
    // -------------------------------------------------------------------

    /// Add a one-way exit from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`] if either end is missing.
    pub fn add_portal(
        &mut self,
        from: LocationId,
        name: &str,
        to: LocationId,
    ) -> Result<(), WorldError> {
        self.require(to)?;
        self.require_mut(from)?.add_exit(Portal::new(name, to));
        Ok(())
    }

    /// Connect every tile to its grid neighbours with `North`, `South`,
    /// `East` and `West` exits, added in that order. Edge tiles get no exit
    /// off the map.
    pub fn connect_grid(&mut self) -> Result<(), WorldError> {
        for y in 0..self.height {
            for x in 0..self.width {
                let here = self
                    .tile_id_at(x, y)
                    .ok_or(WorldError::TileOutOfBounds { x, y })?;
                let neighbours = [
                    ("North", y.checked_sub(1).and_then(|ny| self.tile_id_at(x, ny))),
                    ("South", y.checked_add(1).and_then(|ny| self.tile_id_at(x, ny))),
                    ("East", x.checked_add(1).and_then(|nx| self.tile_id_at(nx, y))),
                    ("West", x.checked_sub(1).and_then(|nx| self.tile_id_at(nx, y))),
                ];
                for (name, target) in neighbours {
                    if let Some(to) = target {
                        self.add_portal(here, name, to)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<LocationRecord> {
        (0..n)
            .map(|i| LocationRecord::named(format!("Tile {i}")))
            .collect()
    }

    #[test]
    fn rejects_record_count_mismatch() {
        let result = WorldMap::from_records(2, 2, records(3));
        assert!(matches!(
            result,
            Err(WorldError::InvariantViolation {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(
            WorldMap::from_records(0, 3, Vec::new()),
            Err(WorldError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn get_tile_at_is_row_major() {
        let map = WorldMap::from_records(3, 2, records(6));
        assert!(map.is_ok());
        if let Ok(map) = map {
            let tile = map.get_tile_at(1, 1);
            assert_eq!(tile.map(|t| t.name.as_str()), Some("Tile 4"));
            assert_eq!(tile.map(|t| (t.x, t.y)), Some((1, 1)));
            assert!(map.get_tile_at(3, 0).is_none());
            assert!(map.get_tile_at(0, 2).is_none());
        }
    }

    #[test]
    fn connect_grid_adds_neighbour_exits_in_order() {
        let map = WorldMap::from_records(3, 3, records(9)).and_then(|mut m| {
            m.connect_grid()?;
            Ok(m)
        });
        assert!(map.is_ok());
        if let Ok(map) = map {
            let centre = map.get_tile_at(1, 1).map(LocationState::exit_names);
            assert_eq!(
                centre,
                Some(vec![
                    "North".to_owned(),
                    "South".to_owned(),
                    "East".to_owned(),
                    "West".to_owned()
                ])
            );
            let corner = map.get_tile_at(0, 0).map(LocationState::exit_names);
            assert_eq!(corner, Some(vec!["South".to_owned(), "East".to_owned()]));
            let north_of_centre = map
                .get_tile_at(1, 1)
                .and_then(|t| t.find_exit("north"))
                .map(|p| p.destination);
            assert_eq!(north_of_centre, map.tile_id_at(1, 0));
        }
    }

    #[test]
    fn add_portal_rejects_unknown_destination() {
        let map = WorldMap::from_records(1, 1, records(1));
        assert!(map.is_ok());
        if let Ok(mut map) = map {
            let result = map.add_portal(LocationId(0), "Down", LocationId(7));
            assert!(matches!(result, Err(WorldError::LocationNotFound(_))));
        }
    }
}
