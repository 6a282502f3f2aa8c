use hashbrown::HashSet;
use thiserror::Error;

use crate::{dims::Pos, direction::Direction, exits::ExitSet, grid::Grid};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Running,
    Found,
    Exhausted,
}

/// Outcome of one [`PathSearcher::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Popped an entry for a cell that was visited meanwhile, nothing changed.
    Skipped,
    /// Moved onto `pos`. `explored` is false only for the start cell.
    Visited { pos: Pos, explored: bool },
    /// Reached an exit, `path` runs from the start to `pos` inclusive.
    Found { pos: Pos, path: Vec<Pos> },
    /// Frontier ran dry without reaching an exit.
    Exhausted,
}

impl Step {
    pub fn position(&self) -> Option<Pos> {
        match self {
            Step::Visited { pos, .. } | Step::Found { pos, .. } => Some(*pos),
            Step::Skipped | Step::Exhausted => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Found { .. } | Step::Exhausted)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search is not running ({0:?})")]
    NotRunning(SearchPhase),
}

#[derive(Debug, Clone)]
struct SearchRun {
    grid: Grid,
    start: Pos,
    exits: ExitSet,
    visited: HashSet<Pos>,
    frontier: Vec<(Pos, Vec<Pos>)>,
    current: Option<Pos>,
}

/// Depth-first search advanced one frontier pop at a time.
///
/// Each frontier entry carries the whole path leading to it, so the route to an exit is
/// known the moment the exit is popped.
#[derive(Debug, Clone, Default)]
pub struct PathSearcher {
    phase: SearchPhase,
    run: Option<SearchRun>,
}

impl PathSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SearchPhase::Running
    }

    /// Starts a search over a snapshot of `grid`.
    ///
    /// Only takes effect while idle, returns whether a search was started.
    pub fn start_search(&mut self, grid: &Grid, start: Pos, exits: &ExitSet) -> bool {
        if self.phase != SearchPhase::Idle {
            log::debug!("search start ignored while {:?}", self.phase);
            return false;
        }

        self.run = Some(SearchRun {
            grid: grid.clone(),
            start,
            exits: exits.clone(),
            visited: HashSet::new(),
            frontier: vec![(start, vec![start])],
            current: None,
        });
        self.phase = SearchPhase::Running;
        log::info!("searching from {:?} for {} exit(s)", start, exits.len());

        true
    }

    /// Drops any search state and goes back to idle.
    pub fn reset(&mut self) {
        self.run = None;
        self.phase = SearchPhase::Idle;
    }

    pub fn step(&mut self) -> Result<Step, SearchError> {
        let run = match (self.phase, self.run.as_mut()) {
            (SearchPhase::Running, Some(run)) => run,
            _ => return Err(SearchError::NotRunning(self.phase)),
        };

        let Some((pos, path)) = run.frontier.pop() else {
            self.phase = SearchPhase::Exhausted;
            log::info!("no path found after visiting {} cells", run.visited.len());
            return Ok(Step::Exhausted);
        };

        if !run.visited.insert(pos) {
            log::trace!("skipping stale entry {:?}", pos);
            return Ok(Step::Skipped);
        }
        run.current = Some(pos);

        if run.exits.contains(&pos) {
            self.phase = SearchPhase::Found;
            log::info!("exit {:?} found, path length {}", pos, path.len());
            return Ok(Step::Found { pos, path });
        }

        for dir in Direction::search_order() {
            let next = pos + dir.offset();
            if run.grid.is_open(next) && !run.visited.contains(&next) {
                let mut next_path = Vec::with_capacity(path.len() + 1);
                next_path.extend_from_slice(&path);
                next_path.push(next);
                run.frontier.push((next, next_path));
            }
        }

        log::trace!("visited {:?}, frontier {}", pos, run.frontier.len());

        Ok(Step::Visited {
            pos,
            explored: pos != run.start,
        })
    }

    /// Cell most recently moved onto.
    pub fn current(&self) -> Option<Pos> {
        self.run.as_ref().and_then(|run| run.current)
    }

    pub fn is_visited(&self, pos: Pos) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.visited.contains(&pos))
    }

    pub fn visited_count(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.visited.len())
    }

    pub fn frontier_len(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.frontier.len())
    }
}
