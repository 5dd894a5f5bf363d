//! Dungeons: cobblestone rooms around an anchor room, joined by L-shaped corridors.

use glam::IVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strata_config::DungeonConfig;
use strata_voxel::{Chunk, Material};

use super::{count_between, fill_box, hollow_box};

/// Distance between the anchor room and a satellite room centre.
const ROOM_SPACING: i32 = 8;

/// Interior height of every room.
const ROOM_INTERIOR_HEIGHT: i32 = 3;

/// Clear height of a corridor above its floor.
pub const CORRIDOR_HEIGHT: i32 = 2;

/// Room with a `footprint`-wide square outline whose floor sits at `centre.y`.
///
/// Even footprints extend one cell further toward negative x and z.
fn room(chunk: &mut Chunk, centre: IVec3, footprint: i32) {
    let low = footprint / 2;
    let high = footprint - low - 1;
    let min = IVec3::new(centre.x - low, centre.y, centre.z - low);
    let max = IVec3::new(
        centre.x + high,
        centre.y + ROOM_INTERIOR_HEIGHT + 1,
        centre.z + high,
    );
    hollow_box(chunk, min, max, Material::Cobblestone);
}

/// One-wide corridor cell: cobblestone floor with clear space above.
fn corridor_cell(chunk: &mut Chunk, x: i32, floor_y: i32, z: i32) {
    chunk.set(x, floor_y, z, Material::Cobblestone);
    fill_box(
        chunk,
        IVec3::new(x, floor_y + 1, z),
        IVec3::new(x, floor_y + CORRIDOR_HEIGHT, z),
        Material::Air,
    );
}

/// Corridor from `from` to `to`: along x at `from.z`, then along z at `to.x`.
fn corridor(chunk: &mut Chunk, from: IVec3, to: IVec3) {
    let floor_y = from.y;
    for x in from.x.min(to.x)..=from.x.max(to.x) {
        corridor_cell(chunk, x, floor_y, from.z);
    }
    for z in from.z.min(to.z)..=from.z.max(to.z) {
        corridor_cell(chunk, to.x, floor_y, z);
    }
}

/// Stamp a dungeon at `anchor`. Returns the number of rooms, anchor room included.
///
/// The anchor room is 5×5; every further room is 4×4, centred eight cells
/// from the anchor in one of the nine directions of `{-1, 0, 1}²`. All rooms
/// share the anchor's floor level.
pub fn place_dungeon(
    chunk: &mut Chunk,
    rng: &mut ChaCha8Rng,
    anchor: IVec3,
    config: &DungeonConfig,
) -> u32 {
    let rooms = count_between(rng, config.min_rooms, config.max_rooms).max(1);

    room(chunk, anchor, 5);
    for _ in 1..rooms {
        let dx = rng.random_range(-1..=1);
        let dz = rng.random_range(-1..=1);
        let centre = anchor + IVec3::new(dx * ROOM_SPACING, 0, dz * ROOM_SPACING);
        room(chunk, centre, 4);
        corridor(chunk, anchor, centre);
    }

    rooms
}
