//! Neighborhood moves on a [`FlatSolution`].
//!
//! # Operators
//!
//! - [`Move::IntraSwap`] — exchange two stops of one route
//! - [`Move::Relocate`] — move one stop into another route
//! - [`Move::InterSwap`] — exchange one stop each between two routes
//!
//! Deltas are computed from the affected legs only, so evaluating a move is
//! O(1) regardless of route length.

use rand::Rng;

use crate::distance::DistanceMatrix;

use super::FlatSolution;

const DEPOT: usize = 0;

/// One perturbation of a candidate solution.
///
/// Positions are route-local; `Relocate::to_pos` is the insertion position in
/// the destination route before the stop is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Swap positions `i < j` of `route`.
    IntraSwap { route: usize, i: usize, j: usize },
    /// Move the stop at `from_pos` of `from` to `to_pos` of `to`.
    Relocate {
        from: usize,
        from_pos: usize,
        to: usize,
        to_pos: usize,
    },
    /// Exchange the stop at `pos_a` of `a` with the stop at `pos_b` of `b`.
    InterSwap {
        a: usize,
        pos_a: usize,
        b: usize,
        pos_b: usize,
    },
}

impl Move {
    /// Draws one random move on `sol`.
    ///
    /// Returns `None` when the draw is structurally impossible (too few
    /// stops or routes) or would overload a vehicle; callers re-draw.
    pub fn draw<R: Rng>(sol: &FlatSolution, demands: &[u32], capacity: u32, rng: &mut R) -> Option<Self> {
        let routes = sol.num_routes();
        match rng.random_range(0..3u8) {
            0 => {
                let route = rng.random_range(0..routes);
                let len = sol.route_len(route);
                if len < 2 {
                    return None;
                }
                let (i, j) = distinct_pair(len, rng);
                Some(Move::IntraSwap { route, i, j })
            }
            1 => {
                if routes < 2 {
                    return None;
                }
                let (from, to) = distinct_pair_unordered(routes, rng);
                let len = sol.route_len(from);
                if len == 0 {
                    return None;
                }
                let from_pos = rng.random_range(0..len);
                let demand = u64::from(demands[sol.route(from)[from_pos]]);
                if sol.load(to) + demand > u64::from(capacity) {
                    return None;
                }
                let to_pos = rng.random_range(0..=sol.route_len(to));
                Some(Move::Relocate {
                    from,
                    from_pos,
                    to,
                    to_pos,
                })
            }
            _ => {
                if routes < 2 {
                    return None;
                }
                let (a, b) = distinct_pair(routes, rng);
                let (len_a, len_b) = (sol.route_len(a), sol.route_len(b));
                if len_a == 0 || len_b == 0 {
                    return None;
                }
                let pos_a = rng.random_range(0..len_a);
                let pos_b = rng.random_range(0..len_b);
                let da = u64::from(demands[sol.route(a)[pos_a]]);
                let db = u64::from(demands[sol.route(b)[pos_b]]);
                let capacity = u64::from(capacity);
                if sol.load(a) - da + db > capacity || sol.load(b) - db + da > capacity {
                    return None;
                }
                Some(Move::InterSwap { a, pos_a, b, pos_b })
            }
        }
    }

    /// Change in total cost if this move were applied to `sol`.
    pub fn delta(&self, sol: &FlatSolution, distances: &DistanceMatrix) -> f64 {
        let d = |a: usize, b: usize| distances.get(a, b);
        match *self {
            Move::IntraSwap { route, i, j } => {
                let r = sol.route(route);
                let (a, b) = (r[i], r[j]);
                let prev_a = predecessor(r, i);
                let next_b = successor(r, j);
                if j == i + 1 {
                    (d(prev_a, b) + d(b, a) + d(a, next_b)) - (d(prev_a, a) + d(a, b) + d(b, next_b))
                } else {
                    let next_a = r[i + 1];
                    let prev_b = r[j - 1];
                    (d(prev_a, b) + d(b, next_a) + d(prev_b, a) + d(a, next_b))
                        - (d(prev_a, a) + d(a, next_a) + d(prev_b, b) + d(b, next_b))
                }
            }
            Move::Relocate {
                from,
                from_pos,
                to,
                to_pos,
            } => {
                let src = sol.route(from);
                let stop = src[from_pos];
                removal_cost(src, from_pos, distances) + insertion_cost(sol.route(to), to_pos, stop, distances)
            }
            Move::InterSwap { a, pos_a, b, pos_b } => {
                let (ra, rb) = (sol.route(a), sol.route(b));
                substitution_cost(ra, pos_a, rb[pos_b], distances)
                    + substitution_cost(rb, pos_b, ra[pos_a], distances)
            }
        }
    }

    /// Applies this move to `sol` in place, shifting its cost by `delta`.
    pub fn apply(&self, sol: &mut FlatSolution, demands: &[u32], delta: f64) {
        match *self {
            Move::IntraSwap { route, i, j } => sol.swap_within(route, i, j),
            Move::Relocate {
                from,
                from_pos,
                to,
                to_pos,
            } => {
                let demand = demands[sol.route(from)[from_pos]];
                sol.relocate(from, from_pos, to, to_pos, demand);
            }
            Move::InterSwap { a, pos_a, b, pos_b } => sol.swap_between(a, pos_a, b, pos_b, demands),
        }
        sol.shift_cost(delta);
    }
}

/// Two distinct values in `0..n`, ordered `first < second`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = distinct_pair_unordered(n, rng);
    (a.min(b), a.max(b))
}

/// Two distinct values in `0..n` in draw order.
fn distinct_pair_unordered<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

fn predecessor(route: &[usize], pos: usize) -> usize {
    if pos == 0 {
        DEPOT
    } else {
        route[pos - 1]
    }
}

fn successor(route: &[usize], pos: usize) -> usize {
    if pos + 1 == route.len() {
        DEPOT
    } else {
        route[pos + 1]
    }
}

/// Cost of removing the stop at `pos` from route.
fn removal_cost(route: &[usize], pos: usize, distances: &DistanceMatrix) -> f64 {
    let prev = predecessor(route, pos);
    let next = successor(route, pos);
    let cid = route[pos];

    // Old: prev → cid → next
    // New: prev → next
    distances.get(prev, next) - distances.get(prev, cid) - distances.get(cid, next)
}

/// Cost of inserting `stop` at `pos` in route.
fn insertion_cost(route: &[usize], pos: usize, stop: usize, distances: &DistanceMatrix) -> f64 {
    let prev = if pos == 0 { DEPOT } else { route[pos - 1] };
    let next = if pos == route.len() { DEPOT } else { route[pos] };

    // Old: prev → next
    // New: prev → stop → next
    distances.get(prev, stop) + distances.get(stop, next) - distances.get(prev, next)
}

/// Cost of replacing the stop at `pos` with `stop`.
fn substitution_cost(route: &[usize], pos: usize, stop: usize, distances: &DistanceMatrix) -> f64 {
    let prev = predecessor(route, pos);
    let next = successor(route, pos);
    let old = route[pos];
    distances.get(prev, stop) + distances.get(stop, next) - distances.get(prev, old) - distances.get(old, next)
}
