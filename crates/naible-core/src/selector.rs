//! Variant selection strategy.
//!
//! Wherever the product picks "one of several" canned texts, the choice goes
//! through a [`VariantSelector`] so tests can pin it.

use rand::Rng;

pub trait VariantSelector: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn select(&self, len: usize) -> usize;
}

/// Uniformly random choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl VariantSelector for RandomSelector {
    fn select(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len.max(1))
    }
}

/// Always picks the same index (modulo `len`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector(pub usize);

impl VariantSelector for FixedSelector {
    fn select(&self, len: usize) -> usize {
        self.0 % len.max(1)
    }
}

/// Picks `items[selector.select(items.len())]`, or `None` for an empty slice.
pub fn pick<'a, T>(selector: &dyn VariantSelector, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(selector.select(items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_selector_wraps() {
        assert_eq!(FixedSelector(0).select(3), 0);
        assert_eq!(FixedSelector(4).select(3), 1);
    }

    #[test]
    fn test_random_selector_in_range() {
        for _ in 0..100 {
            assert!(RandomSelector.select(5) < 5);
        }
        assert_eq!(RandomSelector.select(1), 0);
    }

    #[test]
    fn test_pick() {
        let items = ["a", "b", "c"];
        assert_eq!(pick(&FixedSelector(2), &items), Some(&"c"));
        let empty: [&str; 0] = [];
        assert_eq!(pick(&FixedSelector(0), &empty), None);
    }
}
