//! Maze settings: validation and the whitespace-separated text format.
//!
//! ```text
//! width height padding background(hex) cell_size
//! marker_count
//! x y            (marker_count times)
//! obstacle_count
//! x y            (obstacle_count times)
//! void_count
//! x y            (void_count times)
//! home_x home_y start_x start_y direction border(hex) fill(hex)
//! ```
//!
//! Tokens may be separated by any whitespace, so line breaks are only a
//! convention. Hex colours accept an optional `0x`/`0X` prefix.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::{FromStr, SplitWhitespace};

use robomaze_core::{Color, Direction, Point};
use thiserror::Error;

/// Everything needed to build a [`Maze`](crate::Maze).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeSettings {
    pub width: u32,
    pub height: u32,
    /// Margin around the arena, in canvas units.
    pub padding: u32,
    pub background: Color,
    /// Side of one cell, in canvas units.
    pub cell_size: u32,
    pub markers: Vec<Point>,
    pub obstacles: Vec<Point>,
    pub voids: Vec<Point>,
    pub home: Point,
    pub start: Point,
    pub direction: Direction,
    pub border: Color,
    pub fill: Color,
}

/// The kind of a listed cell, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Marker,
    Obstacle,
    Void,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ItemKind::Marker => "marker",
            ItemKind::Obstacle => "obstacle",
            ItemKind::Void => "void",
        })
    }
}

/// Why a set of settings cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("arena size {width}x{height} is out of range")]
    Size { width: u32, height: u32 },
    #[error("cell size must be at least 1")]
    CellSize,
    #[error("home {0} is outside the arena")]
    HomeOutOfRange(Point),
    #[error("start {0} is outside the arena")]
    StartOutOfRange(Point),
    #[error("{kind} #{index} at {pos} is outside the arena")]
    OutOfRange {
        kind: ItemKind,
        index: usize,
        pos: Point,
    },
    #[error("{kind} #{index} at {pos} is on the robot's home or start cell")]
    OnRobotCell {
        kind: ItemKind,
        index: usize,
        pos: Point,
    },
    #[error("home {0} is not an empty cell")]
    HomeBlocked(Point),
}

/// A malformed settings text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing {field} (token {index})")]
    Missing { field: &'static str, index: usize },
    #[error("invalid {field} {token:?} (token {index})")]
    Invalid {
        field: &'static str,
        index: usize,
        token: String,
    },
    #[error("unexpected trailing token {token:?} (token {index})")]
    Trailing { index: usize, token: String },
}

/// Failure to read settings from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid settings: {0}")]
    Invalid(#[from] SettingsError),
}

impl MazeSettings {
    /// Arena dimensions as grid coordinates, if they fit.
    pub fn dimensions(&self) -> Option<(i32, i32)> {
        let w = i32::try_from(self.width).ok()?;
        let h = i32::try_from(self.height).ok()?;
        (w > 0 && h > 0).then_some((w, h))
    }

    fn in_range(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Check that the settings describe a buildable maze.
    ///
    /// Dimensions and cell size must be positive, home and start must lie in
    /// the arena, and every listed marker, obstacle and void must lie in the
    /// arena without covering the home or start cell.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.dimensions().is_none() {
            return Err(SettingsError::Size {
                width: self.width,
                height: self.height,
            });
        }
        if self.cell_size == 0 {
            return Err(SettingsError::CellSize);
        }
        if !self.in_range(self.home) {
            return Err(SettingsError::HomeOutOfRange(self.home));
        }
        if !self.in_range(self.start) {
            return Err(SettingsError::StartOutOfRange(self.start));
        }
        for (kind, items) in self.items() {
            for (index, &pos) in items.iter().enumerate() {
                if !self.in_range(pos) {
                    return Err(SettingsError::OutOfRange { kind, index, pos });
                }
                if pos == self.home || pos == self.start {
                    return Err(SettingsError::OnRobotCell { kind, index, pos });
                }
            }
        }
        Ok(())
    }

    /// The listed cells in stamping order.
    pub fn items(&self) -> [(ItemKind, &[Point]); 3] {
        [
            (ItemKind::Marker, self.markers.as_slice()),
            (ItemKind::Obstacle, self.obstacles.as_slice()),
            (ItemKind::Void, self.voids.as_slice()),
        ]
    }

    /// Parse settings from text. Same as [`str::parse`].
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        s.parse()
    }

    /// Read, parse and validate a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: MazeSettings = text.parse()?;
        settings.validate()?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write the settings in the text format.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.to_string())
    }
}

struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    index: usize,
}

impl<'a> Tokens<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            iter: s.split_whitespace(),
            index: 0,
        }
    }

    fn next(&mut self, field: &'static str) -> Result<(usize, &'a str), ParseError> {
        let index = self.index;
        let token = self
            .iter
            .next()
            .ok_or(ParseError::Missing { field, index })?;
        self.index += 1;
        Ok((index, token))
    }

    fn u32(&mut self, field: &'static str) -> Result<u32, ParseError> {
        let (index, token) = self.next(field)?;
        token.parse().map_err(|_| ParseError::Invalid {
            field,
            index,
            token: token.to_string(),
        })
    }

    fn coord(&mut self, field: &'static str) -> Result<i32, ParseError> {
        let (index, token) = self.next(field)?;
        token
            .parse::<u32>()
            .ok()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| ParseError::Invalid {
                field,
                index,
                token: token.to_string(),
            })
    }

    fn point(&mut self, x: &'static str, y: &'static str) -> Result<Point, ParseError> {
        Ok(Point::new(self.coord(x)?, self.coord(y)?))
    }

    fn color(&mut self, field: &'static str) -> Result<Color, ParseError> {
        let (index, token) = self.next(field)?;
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        u32::from_str_radix(digits, 16)
            .ok()
            .filter(|&v| v <= 0xFF_FFFF)
            .map(Color)
            .ok_or_else(|| ParseError::Invalid {
                field,
                index,
                token: token.to_string(),
            })
    }

    fn direction(&mut self) -> Result<Direction, ParseError> {
        let (index, token) = self.next("direction")?;
        token
            .parse::<u8>()
            .ok()
            .and_then(Direction::from_index)
            .ok_or_else(|| ParseError::Invalid {
                field: "direction",
                index,
                token: token.to_string(),
            })
    }

    fn list(
        &mut self,
        count: &'static str,
        x: &'static str,
        y: &'static str,
    ) -> Result<Vec<Point>, ParseError> {
        let n = self.u32(count)?;
        // The count is untrusted; grow as points actually arrive.
        let mut pts = Vec::new();
        for _ in 0..n {
            pts.push(self.point(x, y)?);
        }
        Ok(pts)
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.iter.next() {
            Some(token) => Err(ParseError::Trailing {
                index: self.index,
                token: token.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl FromStr for MazeSettings {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let mut t = Tokens::new(s);
        let width = t.u32("width")?;
        let height = t.u32("height")?;
        let padding = t.u32("padding")?;
        let background = t.color("background colour")?;
        let cell_size = t.u32("cell size")?;
        let markers = t.list("marker count", "marker x", "marker y")?;
        let obstacles = t.list("obstacle count", "obstacle x", "obstacle y")?;
        let voids = t.list("void count", "void x", "void y")?;
        let home = t.point("home x", "home y")?;
        let start = t.point("start x", "start y")?;
        let direction = t.direction()?;
        let border = t.color("border colour")?;
        let fill = t.color("fill colour")?;
        t.finish()?;
        Ok(Self {
            width,
            height,
            padding,
            background,
            cell_size,
            markers,
            obstacles,
            voids,
            home,
            start,
            direction,
            border,
            fill,
        })
    }
}

impl fmt::Display for MazeSettings {
    /// Writes the text format accepted by [`FromStr`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} {} 0x{:06x} {}",
            self.width, self.height, self.padding, self.background, self.cell_size
        )?;
        for (_, items) in self.items() {
            writeln!(f, "{}", items.len())?;
            for p in items {
                writeln!(f, "{} {}", p.x, p.y)?;
            }
        }
        writeln!(
            f,
            "{} {} {} {} {} 0x{:06x} 0x{:06x}",
            self.home.x,
            self.home.y,
            self.start.x,
            self.start.y,
            self.direction.index(),
            self.border,
            self.fill
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = "\
6 4 8 0xFFFFFF 32
3
1 0
4 1
2 3
2
2 1
3 2
1
5 3
0 0 0 3 1 0x000000 0x3F7FBF
";

    pub(crate) fn sample() -> MazeSettings {
        SAMPLE.parse().unwrap()
    }

    #[test]
    fn parses_sample() {
        let s = sample();
        assert_eq!((s.width, s.height, s.padding, s.cell_size), (6, 4, 8, 32));
        assert_eq!(s.background, Color::WHITE);
        assert_eq!(
            s.markers,
            vec![Point::new(1, 0), Point::new(4, 1), Point::new(2, 3)]
        );
        assert_eq!(s.obstacles, vec![Point::new(2, 1), Point::new(3, 2)]);
        assert_eq!(s.voids, vec![Point::new(5, 3)]);
        assert_eq!(s.home, Point::new(0, 0));
        assert_eq!(s.start, Point::new(0, 3));
        assert_eq!(s.direction, Direction::Right);
        assert_eq!(s.fill, Color(0x3F7FBF));
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn display_writes_parseable_text() {
        let s = sample();
        let text = s.to_string();
        assert!(text.starts_with("6 4 8 0xffffff 32\n3\n1 0\n"));
        assert_eq!(MazeSettings::parse(&text), Ok(s));
    }

    #[test]
    fn hex_prefix_is_optional() {
        let s: MazeSettings = "1 3 0 ff00ff 1 0 0 0 0 0 0 2 2 00ff00 0X0000FF"
            .parse()
            .unwrap();
        assert_eq!(s.background, Color(0xFF00FF));
        assert_eq!(s.border, Color(0x00FF00));
        assert_eq!(s.fill, Color(0x0000FF));
        assert_eq!(s.direction, Direction::Down);
    }

    #[test]
    fn parse_errors_name_the_field() {
        assert_eq!(
            MazeSettings::parse("5 5 8"),
            Err(ParseError::Missing {
                field: "background colour",
                index: 3
            })
        );
        assert_eq!(
            MazeSettings::parse("5 five"),
            Err(ParseError::Invalid {
                field: "height",
                index: 1,
                token: "five".into()
            })
        );
        assert_eq!(
            MazeSettings::parse("5 5 8 fff 32 1 -1 0"),
            Err(ParseError::Invalid {
                field: "marker x",
                index: 6,
                token: "-1".into()
            })
        );
        assert_eq!(
            MazeSettings::parse("5 5 8 fff 32 0 0 0 0 0 1 1 4 0 0"),
            Err(ParseError::Invalid {
                field: "direction",
                index: 12,
                token: "4".into()
            })
        );
        assert_eq!(
            MazeSettings::parse("5 5 8 fff 32 0 0 0 0 0 1 1 0 0 0 extra"),
            Err(ParseError::Trailing {
                index: 15,
                token: "extra".into()
            })
        );
    }

    #[test]
    fn colour_must_fit_24_bits() {
        let err = MazeSettings::parse("1 3 0 1000000 1 0 0 0 0 0 0 2 0 0 0").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Invalid {
                field: "background colour",
                ..
            }
        ));
    }

    #[test]
    fn validation_rejects_bad_geometry() {
        let mut s = sample();
        s.width = 0;
        assert_eq!(s.validate(), Err(SettingsError::Size { width: 0, height: 4 }));

        let mut s = sample();
        s.cell_size = 0;
        assert_eq!(s.validate(), Err(SettingsError::CellSize));

        let mut s = sample();
        s.home = Point::new(6, 0);
        assert_eq!(s.validate(), Err(SettingsError::HomeOutOfRange(Point::new(6, 0))));

        let mut s = sample();
        s.start = Point::new(0, 4);
        assert_eq!(s.validate(), Err(SettingsError::StartOutOfRange(Point::new(0, 4))));
    }

    #[test]
    fn validation_rejects_misplaced_items() {
        let mut s = sample();
        s.obstacles.push(Point::new(9, 9));
        assert_eq!(
            s.validate(),
            Err(SettingsError::OutOfRange {
                kind: ItemKind::Obstacle,
                index: 2,
                pos: Point::new(9, 9)
            })
        );

        let mut s = sample();
        s.voids.push(s.start);
        assert_eq!(
            s.validate(),
            Err(SettingsError::OnRobotCell {
                kind: ItemKind::Void,
                index: 1,
                pos: Point::new(0, 3)
            })
        );

        let mut s = sample();
        s.markers[0] = s.home;
        assert!(matches!(
            s.validate(),
            Err(SettingsError::OnRobotCell {
                kind: ItemKind::Marker,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn load_reports_each_failure() {
        let dir = std::env::temp_dir().join(format!("robomaze-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let ok = dir.join("ok.maze");
        sample().save(&ok).unwrap();
        assert_eq!(MazeSettings::load(&ok).unwrap(), sample());

        let malformed = dir.join("malformed.maze");
        fs::write(&malformed, "3 3 8").unwrap();
        assert!(matches!(MazeSettings::load(&malformed), Err(LoadError::Parse(_))));

        let invalid = dir.join("invalid.maze");
        fs::write(&invalid, "3 3 8 fff 0 0 0 0 0 0 1 1 0 0 0").unwrap();
        assert!(matches!(
            MazeSettings::load(&invalid),
            Err(LoadError::Invalid(SettingsError::CellSize))
        ));

        let missing = dir.join("missing.maze");
        let err = MazeSettings::load(&missing).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.maze"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
