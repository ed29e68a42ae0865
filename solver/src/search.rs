//! Heuristic best-first search over the Shenzhen Solitaire state space.
//!
//! The frontier is a max-heap keyed by a score-derived priority (the
//! `priority-queue` crate's `PriorityQueue` plays the min-heap the
//! specification describes, just inverted: we push `score` directly and
//! always pop the highest). Ties are broken FIFO via a monotonic sequence
//! number folded into the priority, so two equally-promising nodes expand
//! in the order they were discovered.
//!
//! Positions are kept out of the long-lived `predecessors` map entirely —
//! only a fingerprint and the move that produced it are retained per visited
//! state. A live `Position` is only held for frontier entries that haven't
//! been expanded yet, and dropped the moment its node is popped. On success
//! the solution path is replayed from `start` using the recorded moves.

use fxhash::{FxHashMap, FxHashSet};
use priority_queue::PriorityQueue;
use shenzhen_engine::canonical::{fingerprint, Fingerprint};
use shenzhen_engine::r#move::Move;
use shenzhen_engine::position::Position;
use shenzhen_engine::rules;
use std::cmp::Reverse;

use crate::config::SearchConfig;

#[derive(Debug, Clone)]
pub struct SolutionStep {
    pub position: Position,
    /// The move applied to reach the *next* step; `None` on the final step.
    pub move_taken: Option<Move>,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub steps: Vec<SolutionStep>,
}

impl Solution {
    pub fn move_count(&self) -> usize {
        self.steps.iter().filter(|s| s.move_taken.is_some()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSolutionReason {
    FrontierExhausted,
    ExpansionCapReached(usize),
}

#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Solved(Solution),
    NoSolution(NoSolutionReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Priority(i64, Reverse<u64>);

/// score = total foundation progress minus the number of columns with at
/// least one dragon buried in them anywhere (not just on top).
fn heuristic(position: &Position) -> i64 {
    let foundation_progress = position.foundations().total() as i64;
    let dragon_columns = position
        .tableau()
        .columns()
        .filter(|column| column.iter().any(|card| card.is_dragon(None)))
        .count() as i64;
    foundation_progress - dragon_columns
}

/// Successors of `position`: the lone forced foundation move if one exists,
/// otherwise every legal move from the rules engine, each paired with the
/// position it produces.
fn expand(position: &Position) -> Vec<(Move, Position)> {
    if let Some(forced) = rules::find_forced_move(position) {
        let next = rules::apply(position, &forced).expect("forced move is always legal");
        return vec![(forced, next)];
    }
    rules::legal_moves(position)
        .into_iter()
        .filter_map(|mv| rules::apply(position, &mv).ok().map(|next| (mv, next)))
        .collect()
}

fn reconstruct_moves(predecessors: &FxHashMap<Fingerprint, (Fingerprint, Move)>, goal: &Fingerprint) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut current = goal.clone();
    while let Some((parent, mv)) = predecessors.get(&current) {
        moves.push(*mv);
        current = parent.clone();
    }
    moves.reverse();
    moves
}

fn replay(start: Position, moves: &[Move]) -> Solution {
    let mut steps = Vec::with_capacity(moves.len() + 1);
    let mut position = start;
    for &mv in moves {
        let next = rules::apply(&position, &mv).expect("reconstructed move is legal by construction");
        steps.push(SolutionStep { position, move_taken: Some(mv) });
        position = next;
    }
    steps.push(SolutionStep { position, move_taken: None });
    Solution { steps }
}

/// Runs best-first search from `start` until a winning position is popped,
/// the frontier empties, or `config.max_expansions` is reached.
pub fn solve(start: Position, config: &SearchConfig) -> SolveOutcome {
    let start_fp = fingerprint(&start);
    let start_clone = start.clone();

    let mut frontier: PriorityQueue<Fingerprint, Priority> = PriorityQueue::new();
    let mut pending_positions: FxHashMap<Fingerprint, Position> = FxHashMap::default();
    let mut predecessors: FxHashMap<Fingerprint, (Fingerprint, Move)> = FxHashMap::default();
    let mut visited: FxHashSet<Fingerprint> = FxHashSet::default();
    let mut next_seq: u64 = 0;

    visited.insert(start_fp.clone());
    let start_priority = Priority(heuristic(&start), Reverse(next_seq));
    next_seq += 1;
    pending_positions.insert(start_fp.clone(), start);
    frontier.push(start_fp, start_priority);

    let mut expansions = 0usize;

    while let Some((fp, _)) = frontier.pop() {
        let position = pending_positions.remove(&fp).expect("frontier entries retain their position until popped");

        if position.is_winning() {
            let moves = reconstruct_moves(&predecessors, &fp);
            return SolveOutcome::Solved(replay(start_clone, &moves));
        }

        if let Some(cap) = config.max_expansions {
            if expansions >= cap {
                return SolveOutcome::NoSolution(NoSolutionReason::ExpansionCapReached(cap));
            }
        }
        expansions += 1;

        for (mv, successor) in expand(&position) {
            let successor_fp = fingerprint(&successor);
            if !visited.insert(successor_fp.clone()) {
                continue;
            }
            predecessors.insert(successor_fp.clone(), (fp.clone(), mv));
            let priority = Priority(heuristic(&successor), Reverse(next_seq));
            next_seq += 1;
            pending_positions.insert(successor_fp.clone(), successor);
            frontier.push(successor_fp, priority);
        }
    }

    SolveOutcome::NoSolution(NoSolutionReason::FrontierExhausted)
}
