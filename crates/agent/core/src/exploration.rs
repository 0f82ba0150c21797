//! Coarse exploration grid and frontier search.
//!
//! The world rectangle is split into `size × size` cells. A cell becomes
//! discovered when the agent stands in it or looks at it from up close, and
//! stays discovered until [`ExplorationGrid::reset`].
//!
//! Frontier search scans the boundary of a square ring of cells, centered on
//! the oldest queued explore tile (usually a freshly found house) or on the
//! world center. Cells whose discovery is implied by their neighbors are
//! auto-discovered and skipped along the way. Once every ring comes up empty
//! the grid reports itself done, and the runtime switches to revisiting known
//! houses through the revisit queue.

use std::collections::VecDeque;

use glam::Vec2;

use crate::config::GridConfig;
use crate::interface::{Color, DebugDraw};
use crate::types::WorldInfo;

bitflags::bitflags! {
    /// Per-cell discovery state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellFlags: u8 {
        /// Seen by the agent or implied by its neighbors.
        const DISCOVERED = 1 << 0;
        /// Discovered by inference rather than observation.
        const AUTO_DISCOVERED = 1 << 1;
    }
}

/// Grid coordinates, `(0, 0)` being the lower-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn neighbors(self) -> [Cell; 4] {
        [
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x, self.y - 1),
            Cell::new(self.x, self.y + 1),
        ]
    }
}

fn cell_index(size: u32, cell: Cell) -> Option<usize> {
    let size = size as i32;
    if cell.x < 0 || cell.y < 0 || cell.x >= size || cell.y >= size {
        return None;
    }
    Some((cell.y * size + cell.x) as usize)
}

/// Iterates the boundary cells of the square ring of `radius` around `center`.
fn ring(center: Cell, radius: i32) -> impl Iterator<Item = Cell> {
    let (min_x, max_x) = (center.x - radius, center.x + radius);
    let (min_y, max_y) = (center.y - radius, center.y + radius);
    // Edge columns are walked in full, interior columns only at their ends.
    (min_x..=max_x).flat_map(move |x| {
        let step = if x == min_x || x == max_x { 1 } else { 2 * radius as usize };
        (min_y..=max_y).step_by(step).map(move |y| Cell::new(x, y))
    })
}

#[derive(Clone, Debug)]
pub struct ExplorationGrid {
    config: GridConfig,
    origin: Vec2,
    tile: Vec2,
    cells: Vec<CellFlags>,
    explore_tiles: VecDeque<Cell>,
    revisit_tiles: VecDeque<Cell>,
    /// Revisit tiles queued since the last reset.
    nr_houses: usize,
    revisiting: bool,
    done: bool,
}

impl ExplorationGrid {
    pub fn new(world: &WorldInfo, config: GridConfig) -> Self {
        let size = config.size.max(1);
        Self {
            origin: world.origin(),
            tile: world.dimensions / size as f32,
            cells: vec![CellFlags::empty(); (size * size) as usize],
            explore_tiles: VecDeque::new(),
            revisit_tiles: VecDeque::new(),
            nr_houses: 0,
            revisiting: false,
            done: false,
            config: GridConfig { size, ..config },
        }
    }

    pub fn size(&self) -> u32 {
        self.config.size
    }

    /// Cell containing `position`, or `None` outside the world.
    pub fn cell_at(&self, position: Vec2) -> Option<Cell> {
        let rel = (position - self.origin) / self.tile;
        let cell = Cell::new(rel.x.floor() as i32, rel.y.floor() as i32);
        cell_index(self.config.size, cell).map(|_| cell)
    }

    /// Cell containing `position`, clamped onto the grid.
    fn clamped_cell(&self, position: Vec2) -> Cell {
        let rel = (position - self.origin) / self.tile;
        let max = self.config.size as i32 - 1;
        Cell::new(
            (rel.x.floor() as i32).clamp(0, max),
            (rel.y.floor() as i32).clamp(0, max),
        )
    }

    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        self.origin + (Vec2::new(cell.x as f32, cell.y as f32) + 0.5) * self.tile
    }

    fn center_cell(&self) -> Cell {
        let half = self.config.size as i32 / 2;
        Cell::new(half, half)
    }

    pub fn flags(&self, cell: Cell) -> Option<CellFlags> {
        cell_index(self.config.size, cell).map(|index| self.cells[index])
    }

    pub fn is_cell_discovered(&self, cell: Cell) -> bool {
        self.flags(cell)
            .is_some_and(|flags| flags.contains(CellFlags::DISCOVERED))
    }

    pub fn is_discovered(&self, position: Vec2) -> bool {
        self.cell_at(position)
            .is_some_and(|cell| self.is_cell_discovered(cell))
    }

    /// Marks `cell` as directly observed. Out-of-grid cells are ignored.
    pub fn mark_discovered(&mut self, cell: Cell) {
        if let Some(index) = cell_index(self.config.size, cell) {
            let flags = &mut self.cells[index];
            flags.insert(CellFlags::DISCOVERED);
            flags.remove(CellFlags::AUTO_DISCOVERED);
        }
    }

    /// Marks the agent's own cell and the cell `probe_distance` ahead of it.
    pub fn observe(&mut self, position: Vec2, orientation: f32) {
        let probe = position + Vec2::from_angle(orientation) * self.config.probe_distance;
        for point in [position, probe] {
            if let Some(cell) = self.cell_at(point) {
                self.mark_discovered(cell);
            }
        }
    }

    /// Infers discovery of `cell` from its neighbors.
    ///
    /// A cell with at least two directly discovered 4-neighbors is marked
    /// discovered and auto-discovered. Auto-discovered neighbors do not count,
    /// so inference never cascades. Returns whether the cell changed.
    pub fn auto_discover(&mut self, cell: Cell) -> bool {
        let size = self.config.size;
        let Some(index) = cell_index(size, cell) else {
            return false;
        };
        if self.cells[index].contains(CellFlags::DISCOVERED) {
            return false;
        }

        let observed = cell
            .neighbors()
            .into_iter()
            .filter_map(|neighbor| cell_index(size, neighbor))
            .filter(|&i| {
                let flags = self.cells[i];
                flags.contains(CellFlags::DISCOVERED) && !flags.contains(CellFlags::AUTO_DISCOVERED)
            })
            .count();

        if observed < 2 {
            return false;
        }
        self.cells[index] = CellFlags::DISCOVERED | CellFlags::AUTO_DISCOVERED;
        true
    }

    /// World position of the next cell worth walking to, or `None` once there
    /// is nothing left in the current phase.
    pub fn nearest_undiscovered(&mut self, from: Vec2) -> Option<Vec2> {
        let cell = if self.revisiting {
            self.next_revisit_tile(from)?
        } else {
            self.next_frontier_cell(from)?
        };
        Some(self.cell_center(cell))
    }

    fn next_revisit_tile(&mut self, from: Vec2) -> Option<Cell> {
        // The first few tiles go in queue order, the rest nearest-first.
        while let Some(&front) = self.revisit_tiles.front() {
            let consumed = self.nr_houses.saturating_sub(self.revisit_tiles.len());
            if consumed >= self.config.eager_revisit_window {
                break;
            }
            if !self.is_cell_discovered(front) {
                return Some(front);
            }
            self.revisit_tiles.pop_front();
        }

        let (size, cells) = (self.config.size, &self.cells);
        self.revisit_tiles.retain(|&cell| {
            cell_index(size, cell).is_some_and(|i| !cells[i].contains(CellFlags::DISCOVERED))
        });

        self.revisit_tiles
            .iter()
            .copied()
            .map(|cell| (cell, self.cell_center(cell).distance_squared(from)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(cell, _)| cell)
    }

    fn next_frontier_cell(&mut self, from: Vec2) -> Option<Cell> {
        if self.done {
            return None;
        }

        let mut using_tiles = !self.explore_tiles.is_empty();
        let mut center = self.explore_tiles.front().copied().unwrap_or(self.center_cell());
        let mut radius = self.config.start_radius as i32;
        let mut expansions = 0;

        loop {
            if let Some(cell) = self.scan_ring(center, radius, from) {
                return Some(cell);
            }

            if using_tiles {
                self.explore_tiles.pop_front();
                match self.explore_tiles.front() {
                    Some(&next) => {
                        tracing::info!(remaining = self.explore_tiles.len(), "house surroundings explored");
                        center = next;
                    }
                    None => {
                        tracing::info!("house surroundings explored, continuing world exploration");
                        center = self.center_cell();
                        using_tiles = false;
                    }
                }
            } else if expansions < self.config.ring_expansions {
                expansions += 1;
                radius += self.config.radius_step as i32;
            } else {
                tracing::info!("exploration exhausted");
                self.done = true;
                return None;
            }
        }
    }

    /// Nearest undiscovered, non-inferable cell on the ring boundary.
    fn scan_ring(&mut self, center: Cell, radius: i32, from: Vec2) -> Option<Cell> {
        let mut best: Option<(Cell, f32)> = None;
        for cell in ring(center, radius) {
            match self.flags(cell) {
                None => continue,
                Some(flags) if flags.contains(CellFlags::DISCOVERED) => continue,
                Some(_) => {}
            }
            if self.auto_discover(cell) {
                continue;
            }
            let dist_sq = self.cell_center(cell).distance_squared(from);
            if best.is_none_or(|(_, best_sq)| dist_sq < best_sq) {
                best = Some((cell, dist_sq));
            }
        }
        best.map(|(cell, _)| cell)
    }

    /// Queues a search center around `position` and reopens exploration.
    pub fn add_explore_tile(&mut self, position: Vec2) {
        let cell = self.clamped_cell(position);
        self.explore_tiles.push_back(cell);
        self.done = false;
    }

    /// Queues a house to walk back to and enters the revisit phase.
    pub fn add_revisit_tile(&mut self, position: Vec2) {
        let cell = self.clamped_cell(position);
        self.revisit_tiles.push_back(cell);
        self.done = false;
        self.revisiting = true;
        self.nr_houses += 1;
    }

    pub fn is_done_exploring(&self) -> bool {
        (self.revisiting && self.revisit_tiles.is_empty()) || self.done
    }

    pub fn is_revisiting(&self) -> bool {
        self.revisiting
    }

    pub fn pending_explore_tiles(&self) -> usize {
        self.explore_tiles.len()
    }

    pub fn pending_revisit_tiles(&self) -> usize {
        self.revisit_tiles.len()
    }

    /// Forgets every discovered cell and queued tile and leaves the revisit
    /// phase. Memories outside the grid are untouched.
    pub fn reset(&mut self) {
        self.cells.fill(CellFlags::empty());
        self.explore_tiles.clear();
        self.revisit_tiles.clear();
        self.nr_houses = 0;
        self.revisiting = false;
        self.done = false;
    }

    fn cell_polygon(&self, cell: Cell) -> [Vec2; 4] {
        let min = self.origin + Vec2::new(cell.x as f32, cell.y as f32) * self.tile;
        [
            min,
            min + Vec2::new(self.tile.x, 0.0),
            min + self.tile,
            min + Vec2::new(0.0, self.tile.y),
        ]
    }

    /// Draws discovered cells and the cells the next search would consider.
    pub fn draw_debug(&self, draw: &mut dyn DebugDraw) {
        let size = self.config.size as i32;
        for y in 0..size {
            for x in 0..size {
                let cell = Cell::new(x, y);
                if self.is_cell_discovered(cell) {
                    draw.draw_polygon(&self.cell_polygon(cell), Color::BLUE);
                }
            }
        }

        let pending: Vec<Cell> = if !self.revisit_tiles.is_empty() {
            self.revisit_tiles.iter().copied().collect()
        } else if !self.explore_tiles.is_empty() {
            let radius = self.config.start_radius as i32;
            self.explore_tiles
                .iter()
                .flat_map(|&tile| ring(tile, radius))
                .collect()
        } else {
            let radius = (self.config.start_radius + self.config.radius_step) as i32;
            ring(self.center_cell(), radius).collect()
        };

        for cell in pending {
            if self.flags(cell).is_some_and(|flags| !flags.contains(CellFlags::DISCOVERED)) {
                draw.draw_polygon(&self.cell_polygon(cell), Color::GRAY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 51 × 51 world centered on the origin: one unit per cell, cell (25, 25)
    /// centered on (0, 0).
    fn grid() -> ExplorationGrid {
        let world = WorldInfo::new(Vec2::ZERO, Vec2::splat(51.0));
        ExplorationGrid::new(&world, GridConfig::default())
    }

    fn discover_all(grid: &mut ExplorationGrid) {
        let size = grid.size() as i32;
        for y in 0..size {
            for x in 0..size {
                grid.mark_discovered(Cell::new(x, y));
            }
        }
    }

    #[test]
    fn maps_positions_to_cells() {
        let grid = grid();
        assert_eq!(grid.cell_at(Vec2::ZERO), Some(Cell::new(25, 25)));
        assert_eq!(grid.cell_at(Vec2::new(-25.5, -25.5)), Some(Cell::new(0, 0)));
        assert_eq!(grid.cell_at(Vec2::new(25.6, 0.0)), None);
        assert_eq!(grid.cell_center(Cell::new(27, 25)), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn observe_marks_own_and_probe_cells() {
        let mut grid = grid();
        grid.observe(Vec2::ZERO, 0.0);

        assert!(grid.is_discovered(Vec2::ZERO));
        assert!(grid.is_discovered(Vec2::new(5.0, 0.0)));
        assert!(!grid.is_discovered(Vec2::new(2.0, 0.0)));

        // Near the edge the probe lands outside the world and is skipped.
        grid.observe(Vec2::new(24.0, 0.0), 0.0);
        assert!(grid.is_discovered(Vec2::new(24.0, 0.0)));
    }

    #[test]
    fn discovery_is_monotonic_until_reset() {
        let mut grid = grid();
        grid.observe(Vec2::new(3.0, 3.0), 1.0);
        for _ in 0..5 {
            let _ = grid.nearest_undiscovered(Vec2::ZERO);
            grid.observe(Vec2::new(-7.0, 2.0), 0.0);
        }
        assert!(grid.is_discovered(Vec2::new(3.0, 3.0)));

        grid.add_explore_tile(Vec2::new(10.0, 10.0));
        grid.add_revisit_tile(Vec2::new(3.0, 3.0));
        grid.reset();

        assert!(!grid.is_discovered(Vec2::new(3.0, 3.0)));
        assert!(!grid.is_revisiting());
        assert_eq!(grid.pending_explore_tiles(), 0);
        assert_eq!(grid.pending_revisit_tiles(), 0);
        assert!(!grid.is_done_exploring());
    }

    #[test]
    fn auto_discovery_needs_two_observed_neighbors() {
        let mut grid = grid();
        let target = Cell::new(11, 11);
        grid.mark_discovered(Cell::new(10, 11));
        assert!(!grid.auto_discover(target));

        grid.mark_discovered(Cell::new(12, 11));
        assert!(grid.auto_discover(target));
        assert_eq!(
            grid.flags(target),
            Some(CellFlags::DISCOVERED | CellFlags::AUTO_DISCOVERED)
        );

        // Fixpoint: nothing else changes on a second pass.
        assert!(!grid.auto_discover(target));
        assert!(!grid.auto_discover(Cell::new(11, 12)));

        // Direct observation clears the inferred flag.
        grid.mark_discovered(target);
        assert_eq!(grid.flags(target), Some(CellFlags::DISCOVERED));
    }

    #[test]
    fn ring_search_picks_nearest_boundary_cell() {
        let mut grid = grid();
        assert_eq!(grid.nearest_undiscovered(Vec2::new(10.0, 0.0)), Some(Vec2::new(2.0, 0.0)));
        assert_eq!(grid.nearest_undiscovered(Vec2::new(0.0, -9.0)), Some(Vec2::new(0.0, -2.0)));
    }

    #[test]
    fn ring_walks_only_the_boundary() {
        let center = Cell::new(10, 10);
        assert_eq!(ring(center, 0).collect::<Vec<_>>(), [center]);

        for radius in [1, 2, 12] {
            let cells: Vec<_> = ring(center, radius).collect();
            assert_eq!(cells.len(), 8 * radius as usize);
            assert!(cells.iter().all(|cell| {
                (cell.x - center.x).abs().max((cell.y - center.y).abs()) == radius
            }));
        }
    }

    #[test]
    fn explore_tiles_are_searched_first_and_dropped_when_clear() {
        let mut grid = grid();
        grid.add_explore_tile(Vec2::new(10.0, 10.0));
        assert_eq!(grid.nearest_undiscovered(Vec2::new(10.0, 0.0)), Some(Vec2::new(10.0, 8.0)));

        for cell in ring(Cell::new(35, 35), 2) {
            grid.mark_discovered(cell);
        }
        assert_eq!(grid.nearest_undiscovered(Vec2::new(10.0, 10.0)), Some(Vec2::new(2.0, 2.0)));
        assert_eq!(grid.pending_explore_tiles(), 0);
    }

    #[test]
    fn exhausted_grid_is_done_until_new_tile() {
        let mut grid = grid();
        discover_all(&mut grid);

        assert_eq!(grid.nearest_undiscovered(Vec2::ZERO), None);
        assert!(grid.is_done_exploring());

        grid.add_explore_tile(Vec2::ZERO);
        assert!(!grid.is_done_exploring());
    }

    #[test]
    fn revisit_tiles_go_in_order_then_nearest() {
        let mut grid = grid();
        let houses = [-20.0, -10.0, 0.0, 10.0, 20.0].map(|x| Vec2::new(x, 0.0));
        for house in houses {
            grid.add_revisit_tile(house);
        }
        assert!(grid.is_revisiting());

        let from = Vec2::new(19.0, 0.0);
        assert_eq!(grid.nearest_undiscovered(from), Some(houses[0]));
        for i in 0..2 {
            grid.observe(houses[i], core::f32::consts::FRAC_PI_2);
            assert_eq!(grid.nearest_undiscovered(from), Some(houses[i + 1]));
        }

        // Past the eager window the closest remaining house wins.
        grid.observe(houses[2], core::f32::consts::FRAC_PI_2);
        assert_eq!(grid.nearest_undiscovered(from), Some(houses[4]));

        grid.observe(houses[4], core::f32::consts::FRAC_PI_2);
        grid.observe(houses[3], core::f32::consts::FRAC_PI_2);
        assert_eq!(grid.nearest_undiscovered(from), None);
        assert!(grid.is_done_exploring());
    }

    #[derive(Default)]
    struct Recorder {
        polygons: Vec<Color>,
    }

    impl DebugDraw for Recorder {
        fn draw_polygon(&mut self, points: &[Vec2], color: Color) {
            assert_eq!(points.len(), 4);
            self.polygons.push(color);
        }
    }

    #[test]
    fn debug_draw_emits_discovered_and_pending_cells() {
        let mut grid = grid();
        grid.mark_discovered(Cell::new(0, 0));
        grid.add_revisit_tile(Vec2::new(10.0, 10.0));

        let mut recorder = Recorder::default();
        grid.draw_debug(&mut recorder);
        assert_eq!(recorder.polygons, vec![Color::BLUE, Color::GRAY]);
    }
}
