//! Engine state management.
//!
//! Holds the current true map, both players' views, a reusable searcher,
//! and the engine configuration. Each query handler runs one search or scan
//! and writes its reply lines.

use std::io::{self, Write};

use tracing::debug;

use crate::board::{Grid, Loc, Player, RealMap, Terrain, ViewMap};
use crate::config::{ConfigError, EngineConfig};
use crate::inference::infer_unexplored;
use crate::protocol::notation::{encode_view_map, parse_real_map, parse_view_map, NotationError};
use crate::protocol::parser::{Coord, ScanSource};
use crate::region::{scan_continent, MapSource};
use crate::search::{choose_direction, mark_path, stock_profile, Mobility, Searcher, TerrainMask};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no position set")]
    NoPosition,

    #[error("failed to parse map: {0}")]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("view is {found_rows}x{found_cols} but the position is {rows}x{cols}")]
    GridMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("coordinate {0} is off the map")]
    OffMap(Coord),

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("failed to write reply: {0}")]
    Io(#[from] io::Error),
}

/// The maps of the game in progress.
struct Position {
    real: RealMap,
    views: [ViewMap; 2],
    searcher: Searcher,
}

impl Position {
    fn grid(&self) -> Grid {
        self.real.grid()
    }

    fn loc(&self, coord: Coord) -> Result<Loc, EngineError> {
        self.grid()
            .loc(coord.row, coord.col)
            .ok_or(EngineError::OffMap(coord))
    }

    fn coord(&self, loc: Loc) -> Coord {
        let (row, col) = self.grid().row_col(loc);
        Coord { row, col }
    }
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    config: EngineConfig,
    position: Option<Position>,
}

impl Engine {
    /// Creates an engine with no position.
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            config,
            position: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The true map, if a position is set.
    pub fn real_map(&self) -> Option<&RealMap> {
        self.position.as_ref().map(|p| &p.real)
    }

    pub fn view(&self, player: Player) -> Option<&ViewMap> {
        self.position.as_ref().map(|p| &p.views[player.index()])
    }

    /// Resets all engine state for a new game.
    pub fn new_game(&mut self) {
        self.position = None;
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), EngineError> {
        self.config.set_option(name, value)?;
        if let Some(p) = &mut self.position {
            p.searcher.set_trace(self.config.trace_settings());
        }
        Ok(())
    }

    /// Sets the true map; both views start unexplored.
    pub fn set_position(&mut self, notation: &str) -> Result<(), EngineError> {
        let real = parse_real_map(notation)?;
        let grid = real.grid();
        let mut searcher = Searcher::new(grid);
        searcher.set_trace(self.config.trace_settings());
        debug!(rows = grid.rows(), cols = grid.cols(), "position set");
        self.position = Some(Position {
            real,
            views: [ViewMap::unexplored(grid), ViewMap::unexplored(grid)],
            searcher,
        });
        Ok(())
    }

    /// Replaces one player's view.
    pub fn set_view(&mut self, player: Player, notation: &str) -> Result<(), EngineError> {
        let p = self.position.as_mut().ok_or(EngineError::NoPosition)?;
        let view = parse_view_map(notation)?;
        let (grid, found) = (p.grid(), view.grid());
        if grid != found {
            return Err(EngineError::GridMismatch {
                rows: grid.rows(),
                cols: grid.cols(),
                found_rows: found.rows(),
                found_cols: found.cols(),
            });
        }
        p.views[player.index()] = view;
        Ok(())
    }

    /// Shows one player the whole true map.
    pub fn reveal(&mut self, player: Player) -> Result<(), EngineError> {
        let p = self.position.as_mut().ok_or(EngineError::NoPosition)?;
        p.views[player.index()] = ViewMap::revealed(&p.real);
        Ok(())
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `objective`: finds the best objective for a stock profile,
    /// then marks the path to it and picks the first step.
    pub fn handle_objective<W: Write>(
        &mut self,
        mobility: Mobility,
        origin: Coord,
        profile: &str,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let p = self.position.as_mut().ok_or(EngineError::NoPosition)?;
        let profile = stock_profile(profile).ok_or_else(|| EngineError::UnknownProfile(profile.to_string()))?;
        let origin = p.loc(origin)?;
        let owner = profile.owner();
        let view = &p.views[owner.index()];

        let best = p.searcher.find_objective(view, &p.real, origin, &profile, mobility);
        if best.loc != origin {
            mark_path(p.searcher.path_map_mut(), best.loc);
        }
        let step = choose_direction(
            p.searcher.path_map(),
            view,
            origin,
            &mobility.step_terrain(owner),
            &profile.glyphs(),
        );

        writeln!(out, "bestloc {} cost {}", p.coord(best.loc), best.cost)?;
        writeln!(out, "move {}", p.coord(step))?;
        out.flush()?;
        Ok(())
    }

    /// Handles `route`: finds a path to a fixed destination and picks the
    /// first step.
    pub fn handle_route<W: Write>(
        &mut self,
        player: Player,
        mask: TerrainMask,
        origin: Coord,
        dest: Coord,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let p = self.position.as_mut().ok_or(EngineError::NoPosition)?;
        let (origin, dest) = (p.loc(origin)?, p.loc(dest)?);
        let view = &mut p.views[player.index()];

        let best = p.searcher.find_destination(view, &p.real, origin, dest, player, mask);
        if best.loc != origin {
            mark_path(p.searcher.path_map_mut(), best.loc);
        }
        let terrain = match mask {
            TerrainMask::Land => Mobility::Land,
            TerrainMask::Water => Mobility::Water,
            TerrainMask::Air => Mobility::Air,
        }
        .step_terrain(player);
        let step = choose_direction(p.searcher.path_map(), view, origin, &terrain, &[]);

        writeln!(out, "bestloc {} cost {}", p.coord(best.loc), best.cost)?;
        writeln!(out, "move {}", p.coord(step))?;
        out.flush()?;
        Ok(())
    }

    /// Handles `infer`: predicts unexplored terrain in a player's view and
    /// echoes the result.
    pub fn handle_infer<W: Write>(&mut self, player: Player, out: &mut W) -> Result<(), EngineError> {
        let p = self.position.as_mut().ok_or(EngineError::NoPosition)?;
        let view = &mut p.views[player.index()];
        infer_unexplored(view, &p.real);
        writeln!(out, "view {}", encode_view_map(view))?;
        out.flush()?;
        Ok(())
    }

    /// Handles `continent`: maps the continent around a cell and reports
    /// its scan as JSON.
    pub fn handle_continent<W: Write>(
        &self,
        source: ScanSource,
        origin: Coord,
        bad: Terrain,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let p = self.position.as_ref().ok_or(EngineError::NoPosition)?;
        let origin = p.loc(origin)?;
        let source = match source {
            ScanSource::Real => MapSource::Real(&p.real),
            ScanSource::View(player) => MapSource::View {
                view: &p.views[player.index()],
                real: &p.real,
            },
        };
        let (_, counts) = scan_continent(source, origin, bad);
        let json = serde_json::to_string(&counts).map_err(io::Error::from)?;
        writeln!(out, "scan {json}")?;
        out.flush()?;
        Ok(())
    }
}
