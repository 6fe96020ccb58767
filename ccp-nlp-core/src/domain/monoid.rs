//! Associative aggregation of evaluation results
//!
//! Corpus-level scores are built by scoring documents independently and
//! merging the partial results. Because the merge is associative with an
//! identity element, partial results can be combined in any grouping, which
//! is what lets per-document work fan out across threads.

use smallvec::SmallVec;

/// A monoid: an associative `combine` with an identity element
///
/// - Associativity: `a.combine(&b).combine(&c) == a.combine(&b.combine(&c))`
/// - Identity: `a.combine(&Self::identity()) == a`
pub trait Monoid: Clone + Send + Sync {
    /// Returns the identity element
    fn identity() -> Self;

    /// Combines two elements
    fn combine(&self, other: &Self) -> Self;
}

/// Extension trait for reducing collections of monoid elements
pub trait MonoidReduce: Monoid {
    /// Reduces a collection to a single result
    ///
    /// Uses pairwise tree reduction, keeping combine depth logarithmic.
    fn reduce<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut items: SmallVec<[Self; 16]> = iter.into_iter().collect();

        while items.len() > 1 {
            let next_level: SmallVec<[Self; 16]> = items
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => left.combine(right),
                    [single] => single.clone(),
                    _ => Self::identity(),
                })
                .collect();
            items = next_level;
        }

        items.pop().unwrap_or_else(Self::identity)
    }
}

impl<T: Monoid> MonoidReduce for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Count(usize);

    impl Monoid for Count {
        fn identity() -> Self {
            Count(0)
        }

        fn combine(&self, other: &Self) -> Self {
            Count(self.0 + other.0)
        }
    }

    #[test]
    fn test_reduce_empty_is_identity() {
        assert_eq!(Count::reduce(Vec::new()), Count(0));
    }

    #[test]
    fn test_reduce_odd_length() {
        let items = (1..=7).map(Count).collect::<Vec<_>>();
        assert_eq!(Count::reduce(items), Count(28));
    }

    #[test]
    fn test_identity_law() {
        let a = Count(5);
        assert_eq!(a.combine(&Count::identity()), a);
        assert_eq!(Count::identity().combine(&a), a);
    }
}
