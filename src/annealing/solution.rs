//! Flat candidate representation used inside the annealing loop.
//!
//! All stops live in one `Vec<usize>` of solver indices; `offsets[r]..offsets[r + 1]`
//! delimits route `r`. Moves edit the buffer in place, so an iteration never
//! allocates and capturing a new best is a `clone_from` into an existing
//! buffer.

use crate::distance::DistanceMatrix;

/// A candidate assignment: one stop sequence per vehicle slot.
///
/// # Examples
///
/// ```
/// use u_dvrp::annealing::FlatSolution;
/// use u_dvrp::distance::DistanceMatrix;
///
/// // depot 0, customers 1 and 2, every leg costs 1
/// let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0])
///     .unwrap();
/// let sol = FlatSolution::new(&[vec![1, 2], vec![]], &[0, 4, 6], &dm);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.route(0), &[1, 2]);
/// assert_eq!(sol.load(0), 10);
/// assert!((sol.cost() - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlatSolution {
    stops: Vec<usize>,
    offsets: Vec<usize>,
    loads: Vec<u64>,
    cost: f64,
}

impl FlatSolution {
    /// Flattens per-vehicle stop sequences.
    ///
    /// `demands` is indexed by solver index (entry 0 is the depot).
    pub fn new(routes: &[Vec<usize>], demands: &[u32], distances: &DistanceMatrix) -> Self {
        let mut stops = Vec::with_capacity(routes.iter().map(Vec::len).sum());
        let mut offsets = Vec::with_capacity(routes.len() + 1);
        let mut loads = Vec::with_capacity(routes.len());
        offsets.push(0);
        for route in routes {
            stops.extend_from_slice(route);
            offsets.push(stops.len());
            loads.push(route.iter().map(|&i| u64::from(demands[i])).sum());
        }
        let mut sol = Self {
            stops,
            offsets,
            loads,
            cost: 0.0,
        };
        sol.recompute_cost(distances);
        sol
    }

    /// Number of vehicle slots, empty ones included.
    pub fn num_routes(&self) -> usize {
        self.loads.len()
    }

    /// Stops of route `r`.
    pub fn route(&self, r: usize) -> &[usize] {
        &self.stops[self.offsets[r]..self.offsets[r + 1]]
    }

    /// Number of stops on route `r`.
    pub fn route_len(&self, r: usize) -> usize {
        self.offsets[r + 1] - self.offsets[r]
    }

    /// Sum of demands on route `r`.
    pub fn load(&self, r: usize) -> u64 {
        self.loads[r]
    }

    /// Tracked total cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Total number of stops.
    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    /// Recomputes the total cost from scratch.
    pub fn recompute_cost(&mut self, distances: &DistanceMatrix) {
        self.cost = (0..self.num_routes())
            .map(|r| distances.tour_cost(0, self.route(r).iter().copied()))
            .sum();
    }

    /// Adds `delta` to the tracked cost.
    pub(crate) fn shift_cost(&mut self, delta: f64) {
        self.cost += delta;
    }

    /// Swaps two positions of route `r`.
    pub(crate) fn swap_within(&mut self, r: usize, i: usize, j: usize) {
        let base = self.offsets[r];
        self.stops.swap(base + i, base + j);
    }

    /// Moves the stop at `from_pos` of route `from` to position `to_pos` of
    /// route `to` (position counted in the destination before insertion).
    pub(crate) fn relocate(&mut self, from: usize, from_pos: usize, to: usize, to_pos: usize, demand: u32) {
        let src = self.offsets[from] + from_pos;
        let stop = self.stops[src];
        if from < to {
            // Destination lies after the source: shift the gap left by one.
            let dst = self.offsets[to] + to_pos - 1;
            self.stops[src..=dst].rotate_left(1);
            self.stops[dst] = stop;
            for offset in &mut self.offsets[from + 1..=to] {
                *offset -= 1;
            }
        } else {
            let dst = self.offsets[to] + to_pos;
            self.stops[dst..=src].rotate_right(1);
            self.stops[dst] = stop;
            for offset in &mut self.offsets[to + 1..=from] {
                *offset += 1;
            }
        }
        self.loads[from] -= u64::from(demand);
        self.loads[to] += u64::from(demand);
    }

    /// Exchanges position `pos_a` of route `a` with position `pos_b` of route `b`.
    pub(crate) fn swap_between(&mut self, a: usize, pos_a: usize, b: usize, pos_b: usize, demands: &[u32]) {
        let ia = self.offsets[a] + pos_a;
        let ib = self.offsets[b] + pos_b;
        let (da, db) = (u64::from(demands[self.stops[ia]]), u64::from(demands[self.stops[ib]]));
        self.stops.swap(ia, ib);
        self.loads[a] = self.loads[a] - da + db;
        self.loads[b] = self.loads[b] - db + da;
    }

    /// Copies the stop sequences out, one per vehicle slot.
    pub fn to_routes(&self) -> Vec<Vec<usize>> {
        (0..self.num_routes()).map(|r| self.route(r).to_vec()).collect()
    }
}

impl Default for FlatSolution {
    /// A solution with no routes.
    fn default() -> Self {
        Self {
            stops: Vec::new(),
            offsets: vec![0],
            loads: Vec::new(),
            cost: 0.0,
        }
    }
}
