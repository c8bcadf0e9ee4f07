//! Comparison sort for anything that can report its length, compare two
//! positions and swap two positions.

/// Three-capability interface for sequences the radix engine cannot handle.
pub trait Sortable {
    fn len(&self) -> usize;

    /// Whether the element at `i` must sort before the element at `j`.
    fn less(&self, i: usize, j: usize) -> bool;

    fn swap(&mut self, i: usize, j: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Ord> Sortable for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self[i] < self[j]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}

/// Below this many elements insertion sort beats heapsort.
const INSERTION_THRESHOLD: usize = 12;

/// Sorts `data` ascending by its `less` relation. Not stable.
pub fn sort_sortable(data: &mut dyn Sortable) {
    let n = data.len();
    if n < 2 {
        return;
    }
    if n < INSERTION_THRESHOLD {
        insertion_sort(data, 0, n);
    } else {
        heap_sort(data, n);
    }
}

/// Insertion sort for small ranges
fn insertion_sort(data: &mut dyn Sortable, lo: usize, hi: usize) {
    for i in lo + 1..hi {
        let mut j = i;
        while j > lo && data.less(j, j - 1) {
            data.swap(j, j - 1);
            j -= 1;
        }
    }
}

fn heap_sort(data: &mut dyn Sortable, n: usize) {
    for root in (0..n / 2).rev() {
        sift_down(data, root, n);
    }
    for end in (1..n).rev() {
        data.swap(0, end);
        sift_down(data, 0, end);
    }
}

fn sift_down(data: &mut dyn Sortable, mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            return;
        }
        if child + 1 < end && data.less(child, child + 1) {
            child += 1;
        }
        if !data.less(root, child) {
            return;
        }
        data.swap(root, child);
        root = child;
    }
}
