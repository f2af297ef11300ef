//! Condensed path-map rendering for diagnostics.
//!
//! The map is drawn in blocks of `zoom_rows` x `zoom_cols` cells, one
//! character per block, summarizing the averaged cost of the block. A block
//! shows as on-path when its top-left cell is.

use crate::board::ViewMap;

use super::path_map::{PathMap, INFINITY, UNKNOWN_PENALTY};

/// Whether and how to trace each expansion round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSettings {
    pub enabled: bool,
    pub zoom_rows: usize,
    pub zoom_cols: usize,
}

impl Default for TraceSettings {
    fn default() -> Self {
        TraceSettings {
            enabled: false,
            zoom_rows: 1,
            zoom_cols: 1,
        }
    }
}

/// Renders `path` one line per block row.
pub fn render_path_map(path: &PathMap, view: &ViewMap, zoom_rows: usize, zoom_cols: usize) -> String {
    let grid = path.grid();
    let (zr, zc) = (zoom_rows.max(1), zoom_cols.max(1));
    let mut out = String::with_capacity((grid.rows() / zr + 1) * (grid.cols() / zc + 2));

    for top in (0..grid.rows()).step_by(zr) {
        for left in (0..grid.cols()).step_by(zc) {
            out.push(block_char(path, view, top, left, zr, zc));
        }
        out.push('\n');
    }
    out
}

fn block_char(path: &PathMap, view: &ViewMap, top: usize, left: usize, zr: usize, zc: usize) -> char {
    let grid = path.grid();
    let corner = grid.loc(top, left);
    if corner.is_some_and(|l| path.is_on_path(l)) {
        return '-';
    }
    let mut sum: i64 = 0;
    let mut count: i64 = 0;
    for row in top..(top + zr).min(grid.rows()) {
        for col in left..(left + zc).min(grid.cols()) {
            let Some(loc) = grid.loc(row, col) else { continue };
            let cell = path.get(loc);
            sum += i64::from(cell.cost);
            count += 1;
        }
    }
    let avg = sum / count.max(1);
    match avg {
        a if a < 0 => '!',
        a if a == i64::from(UNKNOWN_PENALTY) => 'P',
        a if a == i64::from(INFINITY) => corner.map_or(' ', |l| view.get(l).to_char()),
        a if a > i64::from(UNKNOWN_PENALTY) => 'U',
        a => char::from_digit((a % 36) as u32, 36).unwrap_or('?'),
    }
}

/// Emits the condensed map at trace level when enabled.
pub(crate) fn trace_round(settings: &TraceSettings, path: &PathMap, view: &ViewMap, round: &str, cur_cost: i32) {
    if !settings.enabled || !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    let map = render_path_map(path, view, settings.zoom_rows, settings.zoom_cols);
    tracing::trace!(target: "wavefront::path_map", round, cur_cost, "\n{map}");
}
