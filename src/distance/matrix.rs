//! Dense distance matrix.

use crate::models::VrpInput;

use super::DistanceMetric;

/// A dense n×n distance matrix stored in row-major order.
///
/// Rows and columns follow solver indices: 0 is the depot, `1..=n` the
/// customers of the input.
///
/// # Examples
///
/// ```
/// use u_dvrp::models::{Location, VrpInput};
/// use u_dvrp::distance::{DistanceMatrix, Euclidean};
///
/// let input = VrpInput::new(
///     Location::depot(0, 0.0, 0.0),
///     vec![Location::new(1, 3.0, 4.0, 1), Location::new(2, 6.0, 8.0, 1)],
///     1,
///     10,
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_input(&input, &Euclidean);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the matrix for every location of an input under `metric`.
    pub fn from_input(input: &VrpInput, metric: &dyn DistanceMetric) -> Self {
        let locations: Vec<_> = input.locations().collect();
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    dm.set(i, j, metric.distance(locations[i], locations[j]));
                }
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cost of a closed tour `depot → stops… → depot`; zero for no stops.
    pub fn tour_cost<I>(&self, depot: usize, stops: I) -> f64
    where
        I: IntoIterator<Item = usize>,
    {
        let mut total = 0.0;
        let mut prev = depot;
        for stop in stops {
            total += self.get(prev, stop);
            prev = stop;
        }
        if prev == depot {
            return total;
        }
        total + self.get(prev, depot)
    }

    /// Returns the nearest of `candidates` to `from`.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_neighbor<I>(&self, from: usize, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        candidates
            .into_iter()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}
