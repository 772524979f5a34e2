use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over per-section item counts.
///
/// Sections are inserted and removed in the middle of the list, which a Fenwick tree cannot do
/// in place; callers rebuild with [`Fenwick::from_counts`] on those (already `O(sections)`)
/// operations and use `add`/`push_value` for everything else.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<u64>, // 1-indexed
    total: u64,
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn new() -> Self {
        Self {
            tree: alloc::vec![0],
            total: 0,
            max_bit: 0,
        }
    }

    pub(crate) fn from_counts(counts: impl ExactSizeIterator<Item = usize>) -> Self {
        let n = counts.len();
        let mut tree = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for (i, count) in (1..=n).zip(counts) {
            let v = count as u64;
            total += v;
            tree[i] += v;
            let j = i + lsb(i);
            if j <= n {
                tree[j] += tree[i];
            }
        }
        Self {
            tree,
            total,
            max_bit: highest_power_of_two_leq(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    /// Appends a new section count in `O(log n)`.
    pub(crate) fn push_value(&mut self, value: usize) {
        let value = value as u64;
        let new_len = self.len() + 1;
        self.tree.push(0);
        self.total += value;

        // tree[i] stores the sum of the last lsb(i) values ending at i.
        let l = lsb(new_len);
        let start_exclusive = new_len - l;
        let before = self.prefix_sum_u64(new_len - 1) - self.prefix_sum_u64(start_exclusive);
        self.tree[new_len] = before + value;

        self.max_bit = highest_power_of_two_leq(new_len);
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n {
            return;
        }
        if delta > 0 {
            self.total += delta as u64;
        } else if delta < 0 {
            self.total = self.total.saturating_sub(delta.unsigned_abs());
        }
        let mut i = index + 1;
        while i <= n {
            let next = self.tree[i] as i128 + delta as i128;
            debug_assert!(
                next >= 0,
                "Fenwick underflow (idx={i}, cur={}, delta={delta})",
                self.tree[i]
            );
            self.tree[i] = next.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
    }

    /// Sum of the first `count` sections.
    pub(crate) fn prefix_sum(&self, count: usize) -> usize {
        self.prefix_sum_u64(count) as usize
    }

    fn prefix_sum_u64(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> usize {
        self.total as usize
    }

    /// Returns the largest `k` such that the first `k` sections hold at most `target` items.
    ///
    /// For a 0-based item rank `r < total`, `lower_bound(r)` is the section holding that item.
    pub(crate) fn lower_bound(&self, target: usize) -> usize {
        let n = self.len();
        if n == 0 {
            return 0;
        }

        let mut target = target as u64;
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
