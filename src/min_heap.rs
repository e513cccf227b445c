/// Binary min-heap over a plain vector, 0-indexed.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeapErr {
    #[error("extract from empty heap")]
    HeapUnderflow,
}

impl<T: Ord> MinHeap<T> {
    pub fn build(source: Vec<T>) -> Self {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for i in (0..n / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn valid_min_heap(&self) -> bool {
        (1..self.heap_size()).all(|i| self.elements[Self::parent(i)] <= self.elements[i])
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap_size();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.heap_size() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[p] <= self.elements[i] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
        debug_assert!(self.valid_min_heap());
    }

    pub fn extract_min(&mut self) -> Result<T, HeapErr> {
        if self.is_empty() {
            return Err(HeapErr::HeapUnderflow);
        }
        let result = self.elements.swap_remove(0);
        if !self.is_empty() {
            self.sift_down(0);
        }
        Ok(result)
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extracts_in_ascending_order() {
        let mut heap = MinHeap::build(vec![7, 3, 9, 1, 4, 4, 0]);
        assert!(heap.valid_min_heap());
        heap.insert(2);

        let mut drained = Vec::new();
        while let Ok(x) = heap.extract_min() {
            drained.push(x);
        }
        assert_eq!(drained, vec![0, 1, 2, 3, 4, 4, 7, 9]);
    }

    #[test]
    fn ties_resolve_by_secondary_key() {
        let mut heap = MinHeap::new();
        for (freq, seq) in [(2u64, 5usize), (2, 1), (1, 9), (2, 3)] {
            heap.insert((freq, seq));
        }
        assert_eq!(heap.extract_min(), Ok((1, 9)));
        assert_eq!(heap.extract_min(), Ok((2, 1)));
        assert_eq!(heap.extract_min(), Ok((2, 3)));
        assert_eq!(heap.extract_min(), Ok((2, 5)));
    }

    #[test]
    fn underflow_is_an_error() {
        let mut heap: MinHeap<u8> = MinHeap::default();
        assert_eq!(heap.extract_min(), Err(HeapErr::HeapUnderflow));
        heap.insert(5);
        assert_eq!(heap.extract_min(), Ok(5));
        assert!(heap.is_empty());
    }
}
