use std::ops::Index;
use std::ops::IndexMut;
use std::fmt;
use std::fmt::Debug;

/// A dense 2d array stored in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T: Default + Clone + Debug + PartialEq + Eq> {
    value: Vec<T>,
    n_row: usize,
    n_col: usize
}

impl<T: Default + Clone + Debug + PartialEq + Eq> Matrix<T> {
    pub fn new(n_row: usize, n_col: usize) -> Matrix<T> {
        Matrix {
            value: vec![T::default(); n_row * n_col],
            n_row,
            n_col,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_row, self.n_col)
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.value[self.n_col * i..self.n_col * (i + 1)]
    }
}

impl<T: Default + Clone + Debug + PartialEq + Eq> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index<'a>(&'a self, idx: (usize, usize)) -> &'a T {
        &self.value[self.n_col * idx.0 + idx.1]
    }
}

impl<T: Default + Clone + Debug + PartialEq + Eq> IndexMut<(usize, usize)> for Matrix<T> {

    #[inline]
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut T {
        &mut self.value[self.n_col * idx.0 + idx.1]
    }
}

impl<T: Default + Clone + Debug + PartialEq + Eq + fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.n_row {
            let cells = self.row(i).iter().map(|v| format!("{:>6}", v)).collect::<Vec<_>>();
            write!(f, "[{}]\n", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_matrix() {
        for &(n_rows, n_cols) in [(5, 7), (3, 2), (7, 3)].iter() {
            let mut matrix = Matrix::<usize>::new(n_rows, n_cols);
            let mut arr2: Vec<Vec<usize>> = Vec::new();

            for i in 0..n_rows {
                arr2.push(Vec::new());
                for j in 0..n_cols {
                    let val = i * n_rows * 2 + j;
                    arr2[i].push(val);
                    matrix[(i, j)] = val;
                }
            }

            assert_eq!(matrix.shape(), (n_rows, n_cols));
            for i in 0..n_rows {
                assert_eq!(matrix.row(i), arr2[i].as_slice());
                for j in 0..n_cols {
                    assert_eq!(matrix[(i, j)], arr2[i][j]);
                }
            }
        }
    }
}
