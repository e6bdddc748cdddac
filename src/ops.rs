//! Matrix-style algebra over graphs.
//!
//! Binary operators between two graphs require equal vertex counts and
//! return `Result<Graph>`. Compound forms check sizes before touching the
//! receiver, so a failed call leaves it unchanged. Results are not
//! re-validated: incrementing or multiplying may put nonzero values on the
//! diagonal. All weight arithmetic wraps on `i32` overflow.

use std::cmp::Ordering;
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

use crate::{Graph, GraphError, Result};

impl Graph {
    fn ensure_same_size(&self, other: &Graph) -> Result<()> {
        if self.num_vertices() == other.num_vertices() {
            Ok(())
        } else {
            Err(GraphError::SizeMismatch {
                left: self.num_vertices(),
                right: other.num_vertices(),
            })
        }
    }

    fn map_weights(&mut self, f: impl Fn(i32) -> i32) {
        for val in self.adj.iter_mut().flat_map(|row| row.iter_mut()) {
            *val = f(*val);
        }
    }

    fn zip_weights(&mut self, other: &Graph, f: impl Fn(i32, i32) -> i32) -> Result<()> {
        self.ensure_same_size(other)?;
        for (row, other_row) in self.adj.iter_mut().zip(&other.adj) {
            for (val, &rhs) in row.iter_mut().zip(other_row) {
                *val = f(*val, rhs);
            }
        }
        Ok(())
    }

    /// In-place `+=`.
    pub fn try_add_assign(&mut self, other: &Graph) -> Result<&mut Self> {
        self.zip_weights(other, |a, b| a.wrapping_add(b))?;
        Ok(self)
    }

    /// In-place `-=`.
    pub fn try_sub_assign(&mut self, other: &Graph) -> Result<&mut Self> {
        self.zip_weights(other, |a, b| a.wrapping_sub(b))?;
        Ok(self)
    }

    /// Unary plus: an equal, independent copy.
    pub fn pos(&self) -> Graph {
        self.clone()
    }

    /// Prefix `++`: adds 1 to every entry.
    pub fn increment(&mut self) -> &mut Self {
        self.map_weights(|w| w.wrapping_add(1));
        self
    }

    /// Prefix `--`: subtracts 1 from every entry.
    pub fn decrement(&mut self) -> &mut Self {
        self.map_weights(|w| w.wrapping_sub(1));
        self
    }

    /// Postfix `++`: increments the receiver and returns its previous value.
    pub fn post_increment(&mut self) -> Graph {
        let before = self.clone();
        self.increment();
        before
    }

    /// Postfix `--`: decrements the receiver and returns its previous value.
    pub fn post_decrement(&mut self) -> Graph {
        let before = self.clone();
        self.decrement();
        before
    }
}

impl Add for &Graph {
    type Output = Result<Graph>;

    fn add(self, rhs: &Graph) -> Result<Graph> {
        let mut result = self.clone();
        result.try_add_assign(rhs)?;
        Ok(result)
    }
}

impl Sub for &Graph {
    type Output = Result<Graph>;

    fn sub(self, rhs: &Graph) -> Result<Graph> {
        let mut result = self.clone();
        result.try_sub_assign(rhs)?;
        Ok(result)
    }
}

impl Neg for &Graph {
    type Output = Graph;

    fn neg(self) -> Graph {
        -self.clone()
    }
}

impl Neg for Graph {
    type Output = Graph;

    fn neg(mut self) -> Graph {
        self.map_weights(i32::wrapping_neg);
        self
    }
}

impl MulAssign<i32> for Graph {
    fn mul_assign(&mut self, scalar: i32) {
        self.map_weights(|w| w.wrapping_mul(scalar));
    }
}

impl Mul<i32> for Graph {
    type Output = Graph;

    fn mul(mut self, scalar: i32) -> Graph {
        self *= scalar;
        self
    }
}

impl Mul<i32> for &Graph {
    type Output = Graph;

    fn mul(self, scalar: i32) -> Graph {
        self.clone() * scalar
    }
}

/// Matrix product.
impl Mul for &Graph {
    type Output = Result<Graph>;

    fn mul(self, rhs: &Graph) -> Result<Graph> {
        self.ensure_same_size(rhs)?;
        let n = self.num_vertices();
        let mut adj = vec![vec![0; n]; n];
        for (i, row) in adj.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..n).fold(0i32, |acc, k| {
                    acc.wrapping_add(self.adj[i][k].wrapping_mul(rhs.adj[k][j]))
                });
            }
        }
        Ok(Graph { adj })
    }
}

/// Orders graphs by edge count, then vertex count.
///
/// Only `lt` is computed directly; `le`, `gt` and `ge` are derived from it
/// and `==`. Two distinct matrices with equal edge and vertex counts are
/// neither less than each other, yet each is `>` and `>=` the other, and
/// `partial_cmp` yields `None` for them. Code that sorts or takes a maximum
/// through `partial_cmp` will not agree with `>` on such pairs.
impl PartialOrd for Graph {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.lt(other) {
            Some(Ordering::Less)
        } else if other.lt(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    fn lt(&self, other: &Self) -> bool {
        if self == other {
            return false;
        }
        let (edges, other_edges) = (self.num_edges(), other.num_edges());
        edges < other_edges
            || (edges == other_edges && self.num_vertices() < other.num_vertices())
    }

    fn le(&self, other: &Self) -> bool {
        self.lt(other) || self == other
    }

    fn gt(&self, other: &Self) -> bool {
        !self.le(other)
    }

    fn ge(&self, other: &Self) -> bool {
        !self.lt(other)
    }
}
