//! Forest generation: the default world layout.
//!
//! The authored location records are truncated or padded with generic
//! forest tiles to fill the grid, shuffled with the caller's RNG, then a
//! fixed set of landmarks is pinned to known coordinates. Leftover forest
//! tiles are named after their coordinates and every tile is linked to its
//! neighbours with compass exits.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use textworld_types::LocationRecord;
use tracing::{debug, info};

use crate::error::WorldError;
use crate::world_map::WorldMap;

/// Name given to filler tiles before they are renamed by coordinate.
pub const FOREST_NAME: &str = "The Forest";

const FOREST_ICON: &str = "\u{1f332}\u{1f333}\u{1f332}";
const FOREST_DESCRIPTION: &str = "A random stretch of forest, it's almost pleasant.";

/// A named location pinned to fixed grid coordinates after shuffling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    /// Location name.
    pub name: String,
    /// Grid column.
    pub x: usize,
    /// Grid row.
    pub y: usize,
    /// Prose description.
    #[serde(default = "default_landmark_description")]
    pub description: String,
    /// Map icon.
    #[serde(default = "default_landmark_icon")]
    pub display_icon: String,
    /// Renderer color name.
    #[serde(default = "default_landmark_color")]
    pub display_color: String,
}

impl Landmark {
    /// Create a landmark with default description and icon.
    pub fn new(name: impl Into<String>, x: usize, y: usize, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            description: default_landmark_description(),
            display_icon: default_landmark_icon(),
            display_color: color.into(),
        }
    }

    fn to_record(&self) -> LocationRecord {
        LocationRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            display_icon: self.display_icon.clone(),
            display_color: self.display_color.clone(),
        }
    }
}

fn default_landmark_description() -> String {
    "A location".to_owned()
}

fn default_landmark_icon() -> String {
    "\u{1f6ab}".to_owned()
}

fn default_landmark_color() -> String {
    "green".to_owned()
}

/// The three landmarks of the default forest.
pub fn default_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new("The Car", 2, 6, "white"),
        Landmark::new("The Well", 2, 3, "red"),
        Landmark::new("The Martin House", 2, 0, "yellow"),
    ]
}

/// Generate a connected forest grid.
///
/// # Errors
///
/// Returns [`WorldError::TileOutOfBounds`] if a landmark lies off the grid,
/// and any error of [`WorldMap::from_records`].
pub fn generate_forest<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    mut records: Vec<LocationRecord>,
    landmarks: &[Landmark],
    rng: &mut R,
) -> Result<WorldMap, WorldError> {
    if width == 0 || height == 0 {
        return Err(WorldError::EmptyGrid { width, height });
    }
    let total = width
        .checked_mul(height)
        .ok_or(WorldError::ArithmeticOverflow)?;
    let authored = records.len();

    records.truncate(total);
    records.resize_with(total, || LocationRecord::named(FOREST_NAME));
    records.shuffle(rng);

    for landmark in landmarks {
        if landmark.x >= width || landmark.y >= height {
            return Err(WorldError::TileOutOfBounds {
                x: landmark.x,
                y: landmark.y,
            });
        }
        let slot = landmark
            .y
            .checked_mul(width)
            .and_then(|row| row.checked_add(landmark.x))
            .and_then(|i| records.get_mut(i))
            .ok_or(WorldError::TileOutOfBounds {
                x: landmark.x,
                y: landmark.y,
            })?;
        debug!(landmark = %landmark.name, x = landmark.x, y = landmark.y, "Pinned landmark");
        *slot = landmark.to_record();
    }

    let mut map = WorldMap::from_records(width, height, records)?;
    for tile in map.locations_mut() {
        if tile.name == FOREST_NAME {
            tile.name = format!("{FOREST_NAME} ({}, {})", tile.x, tile.y);
            FOREST_ICON.clone_into(&mut tile.display_icon);
            FOREST_DESCRIPTION.clone_into(&mut tile.description);
        }
    }
    map.connect_grid()?;

    info!(
        width,
        height,
        authored,
        landmarks = landmarks.len(),
        "Generated forest"
    );
    Ok(map)
}
