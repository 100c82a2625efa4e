use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity of a single grid cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

/// One addressable grid cell together with its search state.
///
/// The identity (`row`, `col`) never changes after construction; everything
/// else is mutated in place, either by the editor before a run or by the
/// search during one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_traversed: bool,
    pub is_path: bool,
    /// Tentative cost from the start tile, `None` until discovered.
    pub distance: Option<usize>,
    /// Predecessor on the best known route. Identity only — the grid owns
    /// the tile, reconstruction just needs the lookup.
    pub parent: Option<Point>,
}

impl Tile {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            is_wall: false,
            is_start: false,
            is_end: false,
            is_traversed: false,
            is_path: false,
            distance: None,
            parent: None,
        }
    }

    pub fn point(&self) -> Point {
        Point {
            row: self.row,
            col: self.col,
        }
    }
}

/// A rectangular grid of tiles.
///
/// The grid is the sole owner of its tiles. A search borrows it mutably for
/// the duration of one run and updates tile state in place; the caller keeps
/// the grid afterwards, with the traversal and route flags set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub columns: usize,
    // TODO: change from vec of vec to one single vec -> better cache friendlyness!
    pub tiles: Vec<Vec<Tile>>,
}

impl Grid {
    /// Create an all-open grid of the given dimensions.
    pub fn new(rows: usize, columns: usize) -> Self {
        let mut tiles = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut line = Vec::with_capacity(columns);
            for col in 0..columns {
                line.push(Tile::new(row, col));
            }
            tiles.push(line);
        }
        Self {
            rows,
            columns,
            tiles,
        }
    }

    pub fn is_valid(&self, node: Point) -> bool {
        node.row < self.rows && node.col < self.columns
    }

    pub fn tile(&self, node: Point) -> &Tile {
        &self.tiles[node.row][node.col]
    }

    pub fn tile_mut(&mut self, node: Point) -> &mut Tile {
        &mut self.tiles[node.row][node.col]
    }

    /// The tile currently flagged as start, if any.
    pub fn start(&self) -> Option<Point> {
        self.tiles
            .iter()
            .flatten()
            .find(|t| t.is_start)
            .map(Tile::point)
    }

    /// The tile currently flagged as end, if any.
    pub fn end(&self) -> Option<Point> {
        self.tiles
            .iter()
            .flatten()
            .find(|t| t.is_end)
            .map(Tile::point)
    }

    /// Editor mutator. Toggling a wall onto the start or end tile is refused
    /// and leaves the grid unchanged.
    pub fn set_wall(&mut self, node: Point, wall: bool) {
        let tile = &mut self.tiles[node.row][node.col];
        if tile.is_start || tile.is_end {
            return;
        }
        tile.is_wall = wall;
    }

    /// Move the start marker to `node`, clearing it from the previous
    /// holder. Wall tiles are refused.
    pub fn set_start(&mut self, node: Point) {
        if self.tiles[node.row][node.col].is_wall {
            return;
        }
        if let Some(old) = self.start() {
            self.tiles[old.row][old.col].is_start = false;
        }
        self.tiles[node.row][node.col].is_start = true;
    }

    /// Move the end marker to `node`, clearing it from the previous holder.
    /// Wall tiles are refused.
    pub fn set_end(&mut self, node: Point) {
        if self.tiles[node.row][node.col].is_wall {
            return;
        }
        if let Some(old) = self.end() {
            self.tiles[old.row][old.col].is_end = false;
        }
        self.tiles[node.row][node.col].is_end = true;
    }

    /// Clear all per-run state (distances, traversal and route flags, parent
    /// links) so the grid can be searched again. Walls and the start/end
    /// markers stay.
    pub fn reset_search(&mut self) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.distance = None;
            tile.is_traversed = false;
            tile.is_path = false;
            tile.parent = None;
        }
    }

    /// Neighbors eligible for expansion: orthogonally adjacent, in bounds,
    /// not walls and not yet traversed. The order is fixed (up, down, left,
    /// right) so traversal order is reproducible across runs.
    pub fn neighbors_of(&self, node: Point) -> impl Iterator<Item = Point> {
        let mut points = Vec::with_capacity(4);

        if node.row > 0 {
            points.push(Point {
                row: node.row - 1,
                col: node.col,
            });
        }
        if node.row < self.rows - 1 {
            points.push(Point {
                row: node.row + 1,
                col: node.col,
            });
        }
        if node.col > 0 {
            points.push(Point {
                col: node.col - 1,
                row: node.row,
            });
        }
        if node.col < self.columns - 1 {
            points.push(Point {
                col: node.col + 1,
                row: node.row,
            });
        }

        // keep only tiles the search may still expand into
        points.retain(|p| {
            let tile = &self.tiles[p.row][p.col];
            !tile.is_wall && !tile.is_traversed
        });

        points.into_iter()
    }

    /// Scales the wall layout by the given factor, i.e. to make it twice as
    /// large, pass 2. Start/end markers and search state are not carried
    /// over; callers place them again on the scaled grid.
    pub fn scale_up(&mut self, factor: usize) {
        let rows = self.rows * factor;
        let columns = self.columns * factor;

        let mut tiles = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut line = Vec::with_capacity(columns);
            for col in 0..columns {
                let mut tile = Tile::new(row, col);
                tile.is_wall = self.tiles[row / factor][col / factor].is_wall;
                line.push(tile);
            }
            tiles.push(line);
        }

        self.rows = rows;
        self.columns = columns;
        self.tiles = tiles;
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.tiles {
            for tile in row {
                let c = if tile.is_start {
                    'S'
                } else if tile.is_end {
                    'E'
                } else if tile.is_wall {
                    'X'
                } else if tile.is_path {
                    '*'
                } else if tile.is_traversed {
                    '.'
                } else {
                    ' '
                };
                write!(f, "{}", c)?;
            }
            write!(f, "\n")?;
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = anyhow::Error;

    /// Parse a grid from ASCII art: `X` or `#` for walls, `S`/`E` for the
    /// start and end markers, space or `.` for open tiles. All rows must
    /// have the same width; at most one `S` and one `E` may appear.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        let rows = lines.len();
        let columns = lines.first().map_or(0, |l| l.chars().count());

        let mut grid = Grid::new(rows, columns);

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != columns {
                return Err(anyhow::anyhow!(
                    "row {} has {} columns, expected {}",
                    row,
                    line.chars().count(),
                    columns
                ));
            }
            for (col, c) in line.chars().enumerate() {
                let node = Point { row, col };
                match c {
                    'X' | '#' => grid.tile_mut(node).is_wall = true,
                    'S' => {
                        if grid.start().is_some() {
                            return Err(anyhow::anyhow!("more than one start tile"));
                        }
                        grid.tile_mut(node).is_start = true;
                    }
                    'E' => {
                        if grid.end().is_some() {
                            return Err(anyhow::anyhow!("more than one end tile"));
                        }
                        grid.tile_mut(node).is_end = true;
                    }
                    ' ' | '.' => {}
                    _ => return Err(anyhow::anyhow!("unrecognized tile character {:?}", c)),
                }
            }
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn neighbor_order_is_up_down_left_right() {
        let grid = Grid::new(3, 3);
        let center = Point { row: 1, col: 1 };

        let neighbors: Vec<Point> = grid.neighbors_of(center).collect();
        assert_eq!(
            neighbors,
            vec![
                Point { row: 0, col: 1 },
                Point { row: 2, col: 1 },
                Point { row: 1, col: 0 },
                Point { row: 1, col: 2 },
            ]
        );
    }

    #[test]
    fn neighbors_exclude_bounds_walls_and_traversed() {
        let mut grid = Grid::new(3, 3);
        grid.set_wall(Point { row: 0, col: 1 }, true);
        grid.tile_mut(Point { row: 1, col: 0 }).is_traversed = true;

        let corner: Vec<Point> = grid.neighbors_of(Point { row: 0, col: 0 }).collect();
        assert!(corner.is_empty());

        let center: Vec<Point> = grid.neighbors_of(Point { row: 1, col: 1 }).collect();
        assert_eq!(
            center,
            vec![Point { row: 2, col: 1 }, Point { row: 1, col: 2 }]
        );
    }

    #[test]
    fn wall_toggle_is_refused_on_markers() {
        let mut grid = Grid::new(2, 2);
        grid.set_start(Point { row: 0, col: 0 });
        grid.set_end(Point { row: 1, col: 1 });

        grid.set_wall(Point { row: 0, col: 0 }, true);
        grid.set_wall(Point { row: 1, col: 1 }, true);

        assert!(!grid.tile(Point { row: 0, col: 0 }).is_wall);
        assert!(!grid.tile(Point { row: 1, col: 1 }).is_wall);
    }

    #[test]
    fn start_marker_is_unique() {
        let mut grid = Grid::new(2, 2);
        grid.set_start(Point { row: 0, col: 0 });
        grid.set_start(Point { row: 1, col: 0 });

        assert_eq!(grid.start(), Some(Point { row: 1, col: 0 }));
        assert!(!grid.tile(Point { row: 0, col: 0 }).is_start);
    }

    #[test]
    fn markers_refuse_wall_tiles() {
        let mut grid = Grid::new(2, 2);
        grid.set_wall(Point { row: 0, col: 0 }, true);
        grid.set_start(Point { row: 0, col: 0 });

        assert_eq!(grid.start(), None);
    }

    #[test]
    fn parses_ascii_layout() {
        let grid: Grid = "S.X\n..X\nX.E".parse().unwrap();

        assert_eq!(grid.rows, 3);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.start(), Some(Point { row: 0, col: 0 }));
        assert_eq!(grid.end(), Some(Point { row: 2, col: 2 }));
        assert!(grid.tile(Point { row: 0, col: 2 }).is_wall);
        assert!(grid.tile(Point { row: 2, col: 0 }).is_wall);
        assert!(!grid.tile(Point { row: 1, col: 1 }).is_wall);
    }

    #[test]
    fn rejects_ragged_rows_and_duplicate_markers() {
        assert!("..\n...".parse::<Grid>().is_err());
        assert!("SS".parse::<Grid>().is_err());
        assert!("EE".parse::<Grid>().is_err());
        assert!("?".parse::<Grid>().is_err());
    }

    #[test]
    fn reset_clears_search_state_only() {
        let mut grid: Grid = "S.E".parse().unwrap();
        let mid = Point { row: 0, col: 1 };
        grid.tile_mut(mid).distance = Some(1);
        grid.tile_mut(mid).is_traversed = true;
        grid.tile_mut(mid).is_path = true;
        grid.tile_mut(mid).parent = Some(Point { row: 0, col: 0 });

        grid.reset_search();

        let tile = grid.tile(mid);
        assert_eq!(tile.distance, None);
        assert!(!tile.is_traversed);
        assert!(!tile.is_path);
        assert_eq!(tile.parent, None);
        assert_eq!(grid.start(), Some(Point { row: 0, col: 0 }));
        assert_eq!(grid.end(), Some(Point { row: 0, col: 2 }));
    }

    #[test]
    fn scale_up_replicates_walls() {
        let mut grid: Grid = ".X\n..".parse().unwrap();
        grid.scale_up(2);

        assert_eq!(grid.rows, 4);
        assert_eq!(grid.columns, 4);
        for row in 0..2 {
            for col in 2..4 {
                assert!(grid.tile(Point { row, col }).is_wall);
            }
        }
        assert!(!grid.tile(Point { row: 2, col: 2 }).is_wall);
        // identity follows the scaled position
        assert_eq!(grid.tile(Point { row: 3, col: 1 }).row, 3);
    }

    #[test]
    fn serde_round_trip() {
        let grid: Grid = "S.X\n..E".parse().unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
