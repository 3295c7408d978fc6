//! Pure sequence transforms.
//!
//! Every function in this module borrows its inputs and returns a freshly
//! allocated output; nothing here mutates, stores, or schedules anything.

use std::fmt;

/// Error returned when a chunking precondition is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// Chunk size must be greater than zero
    ZeroSize,
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::ZeroSize => write!(f, "chunk size must be greater than 0"),
        }
    }
}

impl std::error::Error for ChunkError {}

/// Partition a slice left-to-right into groups of `size`.
///
/// The final group may be shorter than `size`. An empty input produces an
/// empty output.
///
/// # Errors
/// Returns [`ChunkError::ZeroSize`] if `size` is zero.
///
/// # Example
/// ```
/// use pacer::chunk;
///
/// let groups = chunk(&[1, 2, 3, 4, 5], 2).unwrap();
/// assert_eq!(groups, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>, ChunkError> {
    if size == 0 {
        return Err(ChunkError::ZeroSize);
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Truthiness classification for [`compact`].
///
/// Scalar "emptiness" is falsy: `false`, zero, NaN, the empty string, and
/// `None`. Containers are always truthy regardless of length.
pub trait Truthy {
    /// Whether this value survives [`compact`].
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_int {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}

/// Remove falsy elements, preserving the order of survivors.
///
/// Idempotent: `compact(&compact(items))` equals `compact(items)`.
///
/// # Example
/// ```
/// use pacer::compact;
///
/// assert_eq!(compact(&[0, 1, 0, 2, 3]), vec![1, 2, 3]);
/// ```
pub fn compact<T: Truthy + Clone>(items: &[T]) -> Vec<T> {
    items.iter().filter(|v| v.is_truthy()).cloned().collect()
}

/// Elements of `a` not present in `b`, in `a`'s order.
///
/// Duplicates in `a` are preserved. Membership in `b` is value equality.
///
/// # Example
/// ```
/// use pacer::difference;
///
/// assert_eq!(difference(&[1, 2, 3], &[2]), vec![1, 3]);
/// ```
pub fn difference<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|v| !b.contains(v)).cloned().collect()
}

/// Elements of `a` present in `b`, in `a`'s order.
///
/// Duplicates in `a` are preserved.
///
/// # Example
/// ```
/// use pacer::intersection;
///
/// assert_eq!(intersection(&[1, 2, 3], &[2, 3, 4]), vec![2, 3]);
/// ```
pub fn intersection<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|v| b.contains(v)).cloned().collect()
}
