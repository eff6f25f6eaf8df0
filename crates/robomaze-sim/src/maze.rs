//! A built maze and the marker-collecting run.

use std::fmt;

use robomaze_core::{Direction, Grid, Point, Robot, Tile};
use robomaze_paths::{Reachability, astar};

use crate::render::{ArenaStyle, Canvas, RenderContext, RobotStyle};
use crate::settings::{MazeSettings, SettingsError};

/// Why a run stopped collecting before every marker was picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStop {
    /// The robot was not standing on a usable cell.
    InvalidRobot,
    /// No listed marker is left on the grid.
    NoMarkerLeft,
    /// No route leads to the marker.
    Unreachable(Point),
    /// The route to the marker has no moves.
    EmptyRoute(Point),
    /// The robot could not take a step of its route.
    Blocked(Point),
}

impl fmt::Display for SolveStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStop::InvalidRobot => write!(f, "robot is not on the arena"),
            SolveStop::NoMarkerLeft => write!(f, "no marker left on the arena"),
            SolveStop::Unreachable(p) => write!(f, "no route to marker at {p}"),
            SolveStop::EmptyRoute(p) => write!(f, "empty route to marker at {p}"),
            SolveStop::Blocked(p) => write!(f, "route blocked at {p}"),
        }
    }
}

/// Outcome of [`Maze::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveReport {
    /// Number of listed markers.
    pub markers: u32,
    /// Markers picked up during the run.
    pub collected: u32,
    /// Markers banked at home at the end of the run.
    pub delivered: u32,
    pub stop: Option<SolveStop>,
    pub reached_home: bool,
    pub moves: u32,
    pub turns: u32,
}

impl SolveReport {
    /// Every marker was collected and brought home.
    pub fn is_complete(&self) -> bool {
        self.stop.is_none() && self.reached_home && self.delivered == self.markers
    }
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collected {}/{} markers, delivered {}, {} moves, {} turns, ",
            self.collected, self.markers, self.delivered, self.moves, self.turns
        )?;
        f.write_str(if self.reached_home {
            "back home"
        } else {
            "not home"
        })?;
        if let Some(stop) = self.stop {
            write!(f, " (stopped: {stop})")?;
        }
        Ok(())
    }
}

/// One arena, one robot and the settings they were built from.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    robot: Robot,
    settings: MazeSettings,
}

impl Maze {
    /// Build a maze from settings.
    ///
    /// Markers are stamped first, then obstacles, then voids, so a later list
    /// overrides an earlier one on shared cells. The robot is created on its
    /// home cell and placed on its start cell.
    pub fn build(settings: MazeSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let size_error = SettingsError::Size {
            width: settings.width,
            height: settings.height,
        };
        let (w, h) = settings.dimensions().ok_or(size_error.clone())?;
        let mut grid = Grid::new(w, h).ok_or(size_error)?;
        for &p in &settings.markers {
            grid.set_marker(p);
        }
        for &p in &settings.obstacles {
            grid.set_obstacle(p);
        }
        for &p in &settings.voids {
            grid.set_void(p);
        }
        let mut robot = Robot::new(&grid, settings.home, settings.direction)
            .ok_or(SettingsError::HomeBlocked(settings.home))?;
        robot.relocate(settings.start);
        log::info!(
            "built {w}x{h} maze: {} markers, {} obstacles, {} voids, home {}, start {}",
            settings.markers.len(),
            settings.obstacles.len(),
            settings.voids.len(),
            settings.home,
            settings.start
        );
        Ok(Self {
            grid,
            robot,
            settings,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn settings(&self) -> &MazeSettings {
        &self.settings
    }

    pub fn arena_style(&self) -> ArenaStyle {
        ArenaStyle {
            padding: self.settings.padding,
            background: self.settings.background,
            cell_size: self.settings.cell_size,
        }
    }

    pub fn robot_style(&self) -> RobotStyle {
        RobotStyle {
            border: self.settings.border,
            fill: self.settings.fill,
        }
    }

    /// Settings are valid, the robot stands on a usable cell and every
    /// traversable cell can reach every other one.
    pub fn validate(&self) -> bool {
        self.settings.validate().is_ok()
            && self.robot.is_valid(&self.grid)
            && Reachability::new().all_connected(&self.grid)
    }

    /// Wrap `canvas` in a context and draw the arena and the robot on it.
    pub fn render_context<C: Canvas>(&self, canvas: C) -> RenderContext<C> {
        let mut ctx = RenderContext::new(canvas);
        ctx.draw_arena(&self.grid, self.arena_style());
        ctx.draw_robot(&self.robot, &self.grid, self.robot_style());
        ctx
    }

    /// The listed marker still on the grid that is closest to the robot by
    /// Manhattan distance. The first listed wins ties.
    pub fn nearest_marker(&self) -> Option<Point> {
        let pos = self.robot.position();
        self.settings
            .markers
            .iter()
            .copied()
            .filter(|&m| self.grid.at(m) == Some(Tile::Marker))
            .min_by_key(|m| m.manhattan(pos))
    }

    /// Collect every listed marker, nearest first, then return home and drop
    /// them there.
    ///
    /// Collection stops early when no marker is left, a marker cannot be
    /// reached, or a route cannot be followed. The robot still tries to go
    /// home afterwards.
    pub fn solve<C: Canvas>(&mut self, ctx: &mut RenderContext<C>) -> SolveReport {
        let mut report = SolveReport {
            markers: self.settings.markers.len() as u32,
            ..SolveReport::default()
        };
        if !self.robot.is_valid(&self.grid) {
            report.stop = Some(SolveStop::InvalidRobot);
            log::warn!("not solving: robot at {} is not on the arena", self.robot.position());
            return report;
        }

        while self.robot.carried_markers() < report.markers {
            let Some(target) = self.nearest_marker() else {
                report.stop = Some(SolveStop::NoMarkerLeft);
                break;
            };
            let Some(path) = astar(&self.grid, self.robot.position(), target) else {
                report.stop = Some(SolveStop::Unreachable(target));
                break;
            };
            let dirs = path.directions();
            if dirs.is_empty() {
                report.stop = Some(SolveStop::EmptyRoute(target));
                break;
            }
            log::debug!("heading for marker at {target}, {} steps", dirs.len());
            if let Err(p) = self.drive(&dirs, ctx, &mut report) {
                report.stop = Some(SolveStop::Blocked(p));
                break;
            }
            if self.robot.pick_up_marker(&mut self.grid) {
                report.collected += 1;
            }
            ctx.update_robot(&self.robot, &self.grid);
        }
        if let Some(stop) = report.stop {
            log::warn!("collection stopped: {stop}");
        }

        let home = self.robot.home();
        match astar(&self.grid, self.robot.position(), home) {
            Some(path) => {
                let dirs = path.directions();
                if let Err(p) = self.drive(&dirs, ctx, &mut report) {
                    log::warn!("way home blocked at {p}");
                }
                report.delivered = self.robot.drop_marker(&mut self.grid);
                ctx.update_robot(&self.robot, &self.grid);
            }
            None => log::warn!("no route home from {}", self.robot.position()),
        }
        report.reached_home = self.robot.is_home();
        log::info!("solve finished: {report}");
        report
    }

    /// Follow `dirs`, turning the shortest way before each step and picking
    /// up any marker stepped on. Returns the blocked cell if a step fails.
    fn drive<C: Canvas>(
        &mut self,
        dirs: &[Direction],
        ctx: &mut RenderContext<C>,
        report: &mut SolveReport,
    ) -> Result<(), Point> {
        for &dir in dirs {
            let turns = self.robot.direction().turns_to(dir);
            for _ in 0..turns.unsigned_abs() {
                if turns > 0 {
                    self.robot.turn_right(&self.grid);
                } else {
                    self.robot.turn_left(&self.grid);
                }
                report.turns += 1;
                ctx.update_robot(&self.robot, &self.grid);
                ctx.pace();
            }
            if !self.robot.move_forward(&self.grid) {
                return Err(self.robot.ahead());
            }
            report.moves += 1;
            ctx.update_robot(&self.robot, &self.grid);
            ctx.pace();
            if self.robot.pick_up_marker(&mut self.grid) {
                report.collected += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullCanvas;
    use crate::render::tests::{Op, Recorder};
    use crate::settings::tests::sample;
    use robomaze_core::Color;

    fn settings(width: u32, height: u32) -> MazeSettings {
        MazeSettings {
            width,
            height,
            padding: 8,
            background: Color::WHITE,
            cell_size: 32,
            markers: Vec::new(),
            obstacles: Vec::new(),
            voids: Vec::new(),
            home: Point::new(0, 0),
            start: Point::new(0, 0),
            direction: Direction::Up,
            border: Color::BLACK,
            fill: Color(0x3F7FBF),
        }
    }

    #[test]
    fn build_stamps_tiles_and_places_robot() {
        let maze = Maze::build(sample()).unwrap();
        let g = maze.grid();
        assert_eq!((g.width(), g.height()), (6, 4));
        assert_eq!(g.count(Tile::Marker), 3);
        assert_eq!(g.at(Point::new(2, 1)), Some(Tile::Obstacle));
        assert_eq!(g.at(Point::new(5, 3)), Some(Tile::Void));
        assert_eq!(maze.robot().position(), Point::new(0, 3));
        assert_eq!(maze.robot().home(), Point::new(0, 0));
        assert_eq!(maze.robot().direction(), Direction::Right);
        assert!(maze.validate());
    }

    #[test]
    fn later_lists_override_earlier_ones() {
        let mut s = settings(3, 2);
        s.start = Point::new(0, 1);
        s.markers.push(Point::new(2, 0));
        s.voids.push(Point::new(2, 0));
        let maze = Maze::build(s).unwrap();
        assert_eq!(maze.grid().at(Point::new(2, 0)), Some(Tile::Void));
    }

    #[test]
    fn build_rejects_invalid_settings() {
        let mut s = sample();
        s.obstacles.push(s.home);
        assert!(matches!(
            Maze::build(s),
            Err(SettingsError::OnRobotCell { .. })
        ));
    }

    #[test]
    fn oversized_arena_fails_to_build() {
        let text = "2147483647 2147483647 8 0xFFFFFF 32\n0\n0\n0\n0 0 1 0 1 0x000000 0x3F7FBF";
        let s = MazeSettings::parse(text).unwrap();
        assert_eq!(s.validate(), Ok(()));
        assert_eq!(
            Maze::build(s).unwrap_err(),
            SettingsError::Size {
                width: 2147483647,
                height: 2147483647,
            }
        );
    }

    #[test]
    fn disconnected_maze_does_not_validate() {
        let mut s = settings(3, 1);
        s.start = Point::new(2, 0);
        s.obstacles.push(Point::new(1, 0));
        let maze = Maze::build(s).unwrap();
        assert!(!maze.validate());
    }

    #[test]
    fn nearest_marker_prefers_first_listed() {
        let mut s = settings(5, 5);
        s.start = Point::new(2, 2);
        s.markers = vec![Point::new(4, 4), Point::new(2, 0), Point::new(0, 2)];
        let maze = Maze::build(s).unwrap();
        assert_eq!(maze.nearest_marker(), Some(Point::new(2, 0)));
    }

    #[test]
    fn solves_sample_maze() {
        let mut maze = Maze::build(sample()).unwrap();
        let mut ctx = maze.render_context(Recorder::default());
        let report = maze.solve(&mut ctx);

        assert!(report.is_complete(), "{report}");
        assert_eq!(report.collected, 3);
        assert_eq!(report.delivered, 3);
        assert!(maze.robot().is_home());
        assert_eq!(maze.robot().carried_markers(), 0);
        assert_eq!(maze.grid().count(Tile::Marker), 0);

        let canvas = ctx.into_canvas();
        assert_eq!(canvas.ops[0], Op::Arena { markers: 3 });
        let robots: Vec<_> = canvas.robots().collect();
        assert_eq!(robots[0], (Point::new(0, 3), Direction::Right, 0));
        let last = robots[robots.len() - 1];
        assert_eq!((last.0, last.2), (Point::new(0, 0), 0));
        // Every drawn position is a traversable cell one step from the last.
        let grid = maze.grid();
        for w in robots.windows(2) {
            assert!(grid.is_traversable(w[1].0));
            assert!(w[0].0.manhattan(w[1].0) <= 1);
        }
    }

    #[test]
    fn up_to_down_takes_two_right_turns() {
        let mut s = settings(1, 3);
        s.home = Point::new(0, 2);
        s.start = Point::new(0, 0);
        s.markers.push(Point::new(0, 1));
        let mut maze = Maze::build(s).unwrap();
        let mut ctx = maze.render_context(Recorder::default());
        let report = maze.solve(&mut ctx);
        assert!(report.is_complete(), "{report}");
        assert_eq!(report.turns, 2);
        assert_eq!(report.moves, 2);
        let dirs: Vec<_> = ctx.canvas().robots().map(|r| r.1).collect();
        assert_eq!(&dirs[..3], [Direction::Up, Direction::Right, Direction::Down]);
    }

    #[test]
    fn nearer_marker_is_collected_first() {
        let mut s = settings(5, 1);
        s.start = Point::new(0, 0);
        s.home = Point::new(1, 0);
        s.direction = Direction::Right;
        s.markers = vec![Point::new(4, 0), Point::new(3, 0)];
        let mut maze = Maze::build(s).unwrap();
        let mut ctx = RenderContext::new(NullCanvas);
        let report = maze.solve(&mut ctx);
        assert!(report.is_complete(), "{report}");
        assert_eq!(report.collected, 2);
        assert_eq!(report.moves, 4 + 3);
        assert_eq!(report.turns, 2);
    }

    #[test]
    fn markers_on_the_way_are_collected() {
        // The only shortest route to (2, 0) passes over (1, 1).
        let mut s = settings(3, 3);
        s.home = Point::new(0, 2);
        s.start = Point::new(0, 0);
        s.markers = vec![Point::new(2, 0), Point::new(1, 1)];
        s.obstacles.push(Point::new(1, 0));
        let mut maze = Maze::build(s).unwrap();
        let report = maze.solve(&mut RenderContext::new(NullCanvas));
        assert!(report.is_complete(), "{report}");
        assert_eq!(report.collected, 2);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.moves, 4 + 4);
        assert_eq!(maze.grid().count(Tile::Marker), 0);
    }

    #[test]
    fn duplicate_markers_leave_nothing_to_collect() {
        let mut s = settings(3, 3);
        s.start = Point::new(1, 1);
        s.markers = vec![Point::new(2, 2), Point::new(2, 2)];
        let mut maze = Maze::build(s).unwrap();
        let report = maze.solve(&mut RenderContext::new(NullCanvas));
        assert_eq!(report.stop, Some(SolveStop::NoMarkerLeft));
        assert_eq!(report.collected, 1);
        assert_eq!(report.delivered, 1);
        assert!(report.reached_home);
        assert!(!report.is_complete());
    }

    #[test]
    fn unreachable_marker_still_goes_home() {
        let mut s = settings(5, 1);
        s.home = Point::new(0, 0);
        s.start = Point::new(1, 0);
        s.markers = vec![Point::new(2, 0), Point::new(4, 0)];
        s.obstacles.push(Point::new(3, 0));
        let mut maze = Maze::build(s).unwrap();
        assert!(!maze.validate());
        let report = maze.solve(&mut RenderContext::new(NullCanvas));
        assert_eq!(report.stop, Some(SolveStop::Unreachable(Point::new(4, 0))));
        assert_eq!(report.collected, 1);
        assert_eq!(report.delivered, 1);
        assert!(report.reached_home);
        assert_eq!(maze.grid().at(Point::new(4, 0)), Some(Tile::Marker));
    }

    #[test]
    fn no_markers_means_straight_home() {
        let mut s = settings(3, 3);
        s.start = Point::new(2, 2);
        let mut maze = Maze::build(s).unwrap();
        let report = maze.solve(&mut RenderContext::new(NullCanvas));
        assert!(report.is_complete());
        assert_eq!(report.moves, 4);
        assert_eq!(report.delivered, 0);
    }

    #[test]
    fn report_summary_line() {
        let report = SolveReport {
            markers: 2,
            collected: 1,
            delivered: 1,
            stop: Some(SolveStop::Unreachable(Point::new(4, 0))),
            reached_home: true,
            moves: 3,
            turns: 2,
        };
        assert_eq!(
            report.to_string(),
            "collected 1/2 markers, delivered 1, 3 moves, 2 turns, back home \
             (stopped: no route to marker at (4, 0))"
        );
    }
}
