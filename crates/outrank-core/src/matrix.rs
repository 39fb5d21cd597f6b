//! Square pairwise matrices indexed by `(alternative, alternative)`.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Weighted concordance of `a` over `b`.
pub type ConcordanceMatrix = PairMatrix<f64>;

/// `true` where no criterion vetoes `a` outranking `b`.
pub type NonDiscordanceMatrix = PairMatrix<bool>;

/// An `n x n` grid stored row-major.
///
/// # Examples
///
/// ```
/// use outrank_core::PairMatrix;
///
/// let mut m = PairMatrix::filled(3, false);
/// m[(0, 2)] = true;
/// assert!(m[(0, 2)]);
/// assert!(!m[(2, 0)]);
/// assert_eq!(m.row(0), &[false, false, true]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairMatrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> PairMatrix<T> {
    /// Creates a `size x size` matrix with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// Returns `None` if the rows do not form a square grid.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl<T> PairMatrix<T> {
    /// Number of alternatives on each side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, a: usize, b: usize) -> &T {
        &self.cells[self.offset(a, b)]
    }

    #[inline]
    pub fn set(&mut self, a: usize, b: usize, value: T) {
        let offset = self.offset(a, b);
        self.cells[offset] = value;
    }

    /// Cells `(a, 0..n)`.
    pub fn row(&self, a: usize) -> &[T] {
        let start = a * self.size;
        &self.cells[start..start + self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks(0) panics, so an empty matrix yields nothing explicitly
        let chunk = self.size.max(1);
        self.cells.chunks(chunk).take(self.size)
    }

    /// Iterates over all ordered pairs `(a, b)` with `a != b`.
    pub fn off_diagonal(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.size;
        (0..n).flat_map(move |a| (0..n).filter(move |&b| b != a).map(move |b| (a, b)))
    }

    #[inline]
    fn offset(&self, a: usize, b: usize) -> usize {
        debug_assert!(a < self.size && b < self.size, "pair ({a}, {b}) out of range");
        a * self.size + b
    }
}

impl PairMatrix<bool> {
    /// Number of `true` cells.
    pub fn count_true(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Ordered pairs whose cell is `true`, in row-major order.
    pub fn true_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.size;
        (0..n)
            .flat_map(|a| (0..n).map(move |b| (a, b)))
            .filter(|&(a, b)| *self.get(a, b))
            .collect()
    }
}

impl<T> Index<(usize, usize)> for PairMatrix<T> {
    type Output = T;

    fn index(&self, (a, b): (usize, usize)) -> &T {
        self.get(a, b)
    }
}

impl<T> IndexMut<(usize, usize)> for PairMatrix<T> {
    fn index_mut(&mut self, (a, b): (usize, usize)) -> &mut T {
        let offset = self.offset(a, b);
        &mut self.cells[offset]
    }
}

impl<T: fmt::Display> fmt::Display for PairMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for cell in row {
                if !first {
                    f.write_str("\t")?;
                }
                write!(f, "{cell}")?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
