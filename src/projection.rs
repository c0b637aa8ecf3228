//! Isometric projection and depth ordering for the city board.
//!
//! Grid cells are mapped onto a 2:1 diamond layout. All functions here are pure:
//! the projected position of a cell depends only on the cell and the tile size.

use crate::types::*;

/// Projects a grid cell onto the screen using the 2:1 isometric diamond projection.
///
/// ```text
/// x = (gx - gy) * (tw / 2)
/// y = (gx + gy) * (th / 2)
/// ```
///
/// Off-board (including negative) cells are projected the same way. The arithmetic
/// is done in `f32`, so every `i32` cell has a finite projection.
///
/// # Example
///
/// ```
/// use focus_city::{project, GridCoordinate, ScreenOffset, TileSize};
///
/// let tile = TileSize { width: 64.0, height: 32.0 };
/// assert_eq!(project(tile, GridCoordinate::new(1, 0)), ScreenOffset::new(32.0, 16.0));
/// ```
pub fn project(tile: TileSize, grid: GridCoordinate) -> ScreenOffset {
    let half_w = tile.width / 2.0;
    let half_h = tile.height / 2.0;
    ScreenOffset {
        x: (grid.gx as f32 - grid.gy as f32) * half_w,
        y: (grid.gx as f32 + grid.gy as f32) * half_h,
    }
}

/// Returns the four vertices of a cell's background diamond (left, top, right, bottom).
pub fn tile_diamond(tile: TileSize, grid: GridCoordinate) -> [ScreenOffset; 4] {
    let ScreenOffset { x, y } = project(tile, grid);
    let (tw, th) = (tile.width, tile.height);
    [
        ScreenOffset::new(x, y + th / 2.0),
        ScreenOffset::new(x + tw / 2.0, y),
        ScreenOffset::new(x + tw, y + th / 2.0),
        ScreenOffset::new(x + tw / 2.0, y + th),
    ]
}

/// Iterates the background diamonds of every cell on the board, row by row.
pub fn grid_diamonds(config: BoardConfig) -> impl Iterator<Item = [ScreenOffset; 4]> {
    (0..config.height).flat_map(move |gy| {
        (0..config.width).map(move |gx| tile_diamond(config.tile, GridCoordinate::new(gx, gy)))
    })
}

/// Returns the (min, max) corners of an object's sprite.
///
/// Sprites are anchored bottom-centre on the projected point of their cell.
pub fn sprite_rect(tile: TileSize, object: &PlacedObject) -> (ScreenOffset, ScreenOffset) {
    let anchor = project(tile, object.grid);
    let min = ScreenOffset::new(anchor.x - object.width / 2.0, anchor.y - object.height);
    let max = ScreenOffset::new(min.x + object.width, anchor.y);
    (min, max)
}

/// Bounding box (min, max) of all background diamonds of the board.
pub fn board_bounds(config: BoardConfig) -> (ScreenOffset, ScreenOffset) {
    let (tw, th) = (config.tile.width, config.tile.height);
    let cols = config.width.max(0) as f32;
    let rows = config.height.max(0) as f32;
    // Leftmost diamond sits at (0, H-1), rightmost at (W-1, 0), bottom at (W-1, H-1).
    let min = ScreenOffset::new(-(rows - 1.0) * tw / 2.0, 0.0);
    let max = ScreenOffset::new((cols - 1.0) * tw / 2.0 + tw, (cols + rows - 2.0) * th / 2.0 + th);
    (min, max)
}

/// Orders objects back to front for rendering.
///
/// Objects with a smaller `gx + gy` come first. The sort is stable: objects on the
/// same anti-diagonal keep their input order. The input slice is left untouched.
pub fn depth_sorted(objects: &[PlacedObject]) -> Vec<&PlacedObject> {
    let mut ordered: Vec<&PlacedObject> = objects.iter().collect();
    ordered.sort_by_key(|object| object.grid.depth());
    ordered
}
