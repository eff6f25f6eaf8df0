//! Random maze generation.

use rand::Rng;
use robomaze_core::{Color, Direction, Grid, Point, Tile};
use robomaze_paths::Reachability;
use thiserror::Error;

use crate::settings::MazeSettings;

/// Rejected placements allowed per obstacle before a disconnecting one is
/// kept anyway.
pub const OBSTACLE_RETRIES: u32 = 1000;

/// Random draws tried before a placement falls back to picking among the
/// remaining free cells.
const PLACEMENT_DRAWS: u32 = 32;

/// Parameters of [`generate_random`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub padding: u32,
    pub background: Color,
    pub cell_size: u32,
    /// Upper bound of the obstacle count, as a share of the area.
    pub obstacle_share: f64,
    /// Upper bound of the marker count, as a share of the area.
    pub marker_share: f64,
    pub border: Color,
    pub fill: Color,
    /// Number of mazes drawn before giving up.
    pub max_attempts: u32,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            min_width: 5,
            max_width: 20,
            min_height: 5,
            max_height: 12,
            padding: 8,
            background: Color::WHITE,
            cell_size: 32,
            obstacle_share: 0.25,
            marker_share: 0.1,
            border: Color::BLACK,
            fill: Color(0x3F7FBF),
            max_attempts: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error(
        "cannot generate within {min_width}..={max_width} x {min_height}..={max_height} \
         with cell size {cell_size}"
    )]
    Bounds {
        min_width: u32,
        max_width: u32,
        min_height: u32,
        max_height: u32,
        cell_size: u32,
    },
    #[error("no valid maze after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl GenerateParams {
    fn check(&self) -> Result<(), GenerateError> {
        let max_area = u64::from(self.max_width.max(1)) * u64::from(self.max_height.max(1));
        let fits = i32::try_from(self.max_width).is_ok() && i32::try_from(self.max_height).is_ok();
        if self.min_width > self.max_width
            || self.min_height > self.max_height
            || self.cell_size == 0
            || max_area < 3
            || !fits
        {
            return Err(GenerateError::Bounds {
                min_width: self.min_width,
                max_width: self.max_width,
                min_height: self.min_height,
                max_height: self.max_height,
                cell_size: self.cell_size,
            });
        }
        Ok(())
    }
}

/// Draw random settings for a valid, fully connected maze.
///
/// Dimensions are drawn within the bounds (a zero side becomes 1). At least
/// one marker is placed, then obstacles one at a time, rejecting placements
/// that split the arena, then distinct home and start cells. Draws that do
/// not yield a valid maze are discarded and retried up to
/// [`GenerateParams::max_attempts`] times.
pub fn generate_random(
    params: &GenerateParams,
    rng: &mut impl Rng,
) -> Result<MazeSettings, GenerateError> {
    params.check()?;
    let mut checker = Reachability::new();
    for attempt in 1..=params.max_attempts {
        match generate_once(params, rng, &mut checker) {
            Some(settings) => {
                log::info!(
                    "generated {}x{} maze with {} markers and {} obstacles (attempt {attempt})",
                    settings.width,
                    settings.height,
                    settings.markers.len(),
                    settings.obstacles.len()
                );
                return Ok(settings);
            }
            None => log::warn!("generation attempt {attempt} produced no valid maze"),
        }
    }
    Err(GenerateError::Exhausted {
        attempts: params.max_attempts,
    })
}

fn generate_once(
    params: &GenerateParams,
    rng: &mut impl Rng,
    checker: &mut Reachability,
) -> Option<MazeSettings> {
    let width = rng.random_range(params.min_width..=params.max_width).max(1);
    let height = rng.random_range(params.min_height..=params.max_height).max(1);
    let area = width.checked_mul(height)?;
    if area < 3 {
        return None;
    }

    // Home and start need two free cells besides the markers and obstacles.
    let max_obstacles = ((f64::from(area) * params.obstacle_share) as u32).max(1);
    let max_markers = (f64::from(area) * params.marker_share) as u32;
    let markers = match max_markers {
        0 => 0,
        n => rng.random_range(0..n),
    }
    .clamp(1, area - 2);
    let obstacles = rng.random_range(0..max_obstacles).min(area - 2 - markers);
    log::debug!("drawing {width}x{height}: {markers} markers, {obstacles} obstacles");

    let mut grid = Grid::new(i32::try_from(width).ok()?, i32::try_from(height).ok()?)?;

    let mut marker_cells = Vec::with_capacity(markers as usize);
    for _ in 0..markers {
        let p = random_empty(&grid, rng, None)?;
        grid.set_marker(p);
        marker_cells.push(p);
    }

    let mut obstacle_cells = Vec::with_capacity(obstacles as usize);
    for _ in 0..obstacles {
        let mut rejected = 0;
        loop {
            let p = random_empty(&grid, rng, None)?;
            grid.set_obstacle(p);
            if rejected < OBSTACLE_RETRIES && !checker.all_connected(&grid) {
                grid.set_empty(p);
                rejected += 1;
                continue;
            }
            obstacle_cells.push(p);
            break;
        }
    }
    if !checker.all_connected(&grid) {
        return None;
    }

    let home = random_empty(&grid, rng, None)?;
    let start = random_empty(&grid, rng, Some(home))?;
    let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];

    let settings = MazeSettings {
        width,
        height,
        padding: params.padding,
        background: params.background,
        cell_size: params.cell_size,
        markers: marker_cells,
        obstacles: obstacle_cells,
        voids: Vec::new(),
        home,
        start,
        direction,
        border: params.border,
        fill: params.fill,
    };
    settings.validate().ok()?;
    Some(settings)
}

/// A uniformly drawn Empty cell other than `except`, or `None` if there is
/// none.
fn random_empty(grid: &Grid, rng: &mut impl Rng, except: Option<Point>) -> Option<Point> {
    let free = |p: Point| grid.at(p) == Some(Tile::Empty) && Some(p) != except;
    for _ in 0..PLACEMENT_DRAWS {
        let p = Point::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        if free(p) {
            return Some(p);
        }
    }
    let cells: Vec<Point> = grid.bounds().iter().filter(|&p| free(p)).collect();
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.random_range(0..cells.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Maze;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_mazes_are_valid() {
        let params = GenerateParams::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..40 {
            let s = generate_random(&params, &mut rng).unwrap();
            assert!((5..=20).contains(&s.width));
            assert!((5..=12).contains(&s.height));
            assert!(!s.markers.is_empty());
            assert!(s.voids.is_empty());
            assert_ne!(s.home, s.start);
            assert_eq!(s.cell_size, 32);

            let maze = Maze::build(s).unwrap();
            assert!(maze.validate());
            assert_eq!(maze.grid().count(Tile::Marker), maze.settings().markers.len());
        }
    }

    #[test]
    fn generated_mazes_are_solvable() {
        let params = GenerateParams::default();
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for _ in 0..20 {
            let s = generate_random(&params, &mut rng).unwrap();
            let mut maze = Maze::build(s).unwrap();
            let report = maze.solve(&mut crate::RenderContext::new(crate::NullCanvas));
            assert!(report.is_complete(), "{report}\n{}", maze.grid());
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let params = GenerateParams::default();
        let a = generate_random(&params, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate_random(&params, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_arenas_still_fit_robot_and_marker() {
        let params = GenerateParams {
            min_width: 0,
            max_width: 3,
            min_height: 1,
            max_height: 1,
            max_attempts: 200,
            ..GenerateParams::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let s = generate_random(&params, &mut rng).unwrap();
            assert_eq!((s.width, s.height), (3, 1));
            assert_eq!(s.markers.len(), 1);
            assert!(s.obstacles.is_empty());
        }
    }

    #[test]
    fn crowded_shares_are_capped() {
        let params = GenerateParams {
            min_width: 4,
            max_width: 4,
            min_height: 4,
            max_height: 4,
            obstacle_share: 5.0,
            marker_share: 5.0,
            ..GenerateParams::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let s = generate_random(&params, &mut rng).unwrap();
            assert!(s.markers.len() + s.obstacles.len() <= 14);
            assert!(Maze::build(s).unwrap().validate());
        }
    }

    #[test]
    fn bad_bounds_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let reversed = GenerateParams {
            min_width: 9,
            max_width: 4,
            ..GenerateParams::default()
        };
        assert!(matches!(
            generate_random(&reversed, &mut rng),
            Err(GenerateError::Bounds { .. })
        ));
        let too_small = GenerateParams {
            min_width: 1,
            max_width: 2,
            min_height: 1,
            max_height: 1,
            ..GenerateParams::default()
        };
        assert!(matches!(
            generate_random(&too_small, &mut rng),
            Err(GenerateError::Bounds { .. })
        ));
        let no_cells = GenerateParams {
            cell_size: 0,
            ..GenerateParams::default()
        };
        assert!(generate_random(&no_cells, &mut rng).is_err());
    }

    #[test]
    fn zero_attempts_exhaust_immediately() {
        let params = GenerateParams {
            max_attempts: 0,
            ..GenerateParams::default()
        };
        assert_eq!(
            generate_random(&params, &mut StdRng::seed_from_u64(1)),
            Err(GenerateError::Exhausted { attempts: 0 })
        );
    }
}
