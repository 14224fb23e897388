// SPDX-License-Identifier: MIT OR Apache-2.0

//! Positional urgency of a stone, for heuristic move biasing.
//!
//! Each axis through the stone is read up to four cells out in both
//! directions on the periodic view. Besides the solid run through the stone,
//! the scan may hop a single empty cell per side to catch split shapes such
//! as `X X X _ X`.

use crate::topology::{Axis, PeriodicView};
use crate::{board::Board, Cell, Coord, Player, WIN_LENGTH};
use serde::{Deserialize, Serialize};

/// How far each side of an axis is read
const REACH: isize = 4;

/// Threat classes, most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Threat {
    /// Five or more in a row
    Five,
    /// Four with both ends empty
    OpenFour,
    /// Two or more axes carrying a minor threat at once
    Fork,
}

impl Threat {
    /// Numeric priority, lower is more urgent
    pub fn priority(&self) -> u8 {
        match self {
            Threat::Five => 1,
            Threat::OpenFour => 3,
            Threat::Fork => 5,
        }
    }
}

/// Priority as a float with `+inf` standing for "no threat"
pub fn priority_value(threat: Option<Threat>) -> f64 {
    threat.map_or(f64::INFINITY, |t| f64::from(t.priority()))
}

/// What one side of an axis looks like from the stone
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct HalfLine {
    /// Own stones adjacent to the stone, before any gap
    run: usize,
    /// First non-own cell is empty
    open: bool,
    /// Own stones past the single gap
    beyond_gap: usize,
    /// Cell after the stones beyond the gap is empty as well
    open_beyond: bool,
}

/// Summary of one axis through the stone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisProfile {
    forward: HalfLine,
    backward: HalfLine,
}

impl AxisProfile {
    fn run(&self) -> usize {
        1 + self.forward.run + self.backward.run
    }

    fn gapped_total(&self) -> usize {
        self.run() + self.forward.beyond_gap.max(self.backward.beyond_gap)
    }

    fn open_ends(&self) -> usize {
        usize::from(self.forward.open) + usize::from(self.backward.open)
    }

    fn is_minor_threat(&self) -> bool {
        let run = self.run();
        let gapped = self.gapped_total();
        (run == 3 && self.open_ends() == 2)
            || (run == 4 && self.open_ends() == 1)
            || (gapped == 3 && self.forward.open_beyond && self.backward.open_beyond)
            || gapped >= 4
    }
}

fn scan_half(
    view: &PeriodicView<'_>,
    origin: Coord,
    axis: Axis,
    sign: isize,
    own: Cell,
) -> HalfLine {
    let (dr, dc) = axis.delta();
    let mut half = HalfLine::default();
    let mut crossed_gap = false;

    for distance in 1..=REACH {
        let cell = view.at(
            origin.row as isize + sign * dr * distance,
            origin.col as isize + sign * dc * distance,
        );
        if cell == own {
            if crossed_gap {
                half.beyond_gap += 1;
            } else {
                half.run += 1;
            }
            continue;
        }
        if cell.is_empty() {
            if !crossed_gap {
                crossed_gap = true;
                half.open = true;
                continue;
            }
            half.open_beyond = true;
        }
        break;
    }

    half
}

/// Urgency of a `player` stone at `origin`.
///
/// The origin is read as `player`'s stone whatever the board holds there, so
/// a candidate move can be scored without placing it first. Returns `None`
/// when no axis carries a threat.
pub fn threat_at(board: &Board, origin: Coord, player: Player) -> Option<Threat> {
    let view = PeriodicView::new(board);
    let own = Cell::from(player);
    let mut best: Option<Threat> = None;
    let mut minor_axes = 0;

    for axis in Axis::ALL {
        let profile = AxisProfile {
            forward: scan_half(&view, origin, axis, 1, own),
            backward: scan_half(&view, origin, axis, -1, own),
        };

        let found = if profile.run() >= WIN_LENGTH {
            Some(Threat::Five)
        } else if profile.run() == 4 && profile.open_ends() == 2 {
            Some(Threat::OpenFour)
        } else {
            None
        };

        if profile.is_minor_threat() {
            minor_axes += 1;
        }
        let fork = (minor_axes >= 2).then_some(Threat::Fork);

        for candidate in [found, fork].into_iter().flatten() {
            best = Some(best.map_or(candidate, |b| b.min(candidate)));
        }
    }

    best
}

/// Urgency of the stone already sitting at `origin`; `None` on an empty cell
pub fn threat_of_stone(board: &Board, origin: Coord) -> Option<Threat> {
    let player = board.get(origin)?.player()?;
    threat_at(board, origin, player)
}
