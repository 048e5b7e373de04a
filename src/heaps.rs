use crate::bits::log2_floor;
use crate::types::{default_less, LessFn, SortKey};

/* Min-max heap. A complete binary tree in a vec whose levels alternate
 * ordering polarity: nodes on even levels are minimums of their sub-tree,
 * nodes on odd levels are maximums. Both extrema are readable in constant
 * time and removable in logarithmic time; insertion is logarithmic like in
 * a plain binary heap. */
pub struct MinMaxHeap<T, F: Fn(&T, &T) -> bool = LessFn<T>> {
	heap: Vec<T>,
	less: F,
}

impl<T: SortKey> MinMaxHeap<T> {
	/// Creates a new empty heap ordered by the type's natural less-than
	#[inline(always)]
	pub fn new() -> Self {
		Self::with_comparator(default_less::<T>)
	}
	/// Creates a new empty heap with a given preallocated capacity
	#[inline(always)]
	pub fn with_capacity(capacity: usize) -> Self {
		Self::with_capacity_and_comparator(capacity, default_less::<T>)
	}
	/// Builds a heap from the values of a vec in linear time
	#[inline(always)]
	pub fn from_vec(values: Vec<T>) -> Self {
		Self::from_vec_with_comparator(values, default_less::<T>)
	}
}
impl<T, F: Fn(&T, &T) -> bool> MinMaxHeap<T, F> {
	/// Creates a new empty heap ordered by a strict less-than comparator
	#[inline(always)]
	pub fn with_comparator(less: F) -> Self {
		Self{heap: Vec::new(), less: less}
	}
	#[inline(always)]
	pub fn with_capacity_and_comparator(capacity: usize, less: F) -> Self {
		Self{heap: Vec::with_capacity(capacity), less: less}
	}
	/// Builds a heap from the values of a vec in linear time by trickling
	/// down every sub-tree root from the last parent back to the root
	pub fn from_vec_with_comparator(mut values: Vec<T>, less: F) -> Self {
		/* One spare slot so the next push does not reallocate */
		values.reserve(1);
		let mut ret = Self{heap: values, less: less};
		let n = ret.heap.len();
		if n > 1 {
			(0..=((n-2)>>1)).rev().for_each(|pos| ret._trickle_down_from(pos));
		}
		ret
	}

	/* Offset arithmetic of the complete binary tree. The root lives at 0,
	 * children of i at 2i+1 and 2i+2, levels are numbered from 0 at the
	 * root with even levels carrying the min polarity. */
	#[inline(always)]
	fn _parent(pos: usize) -> usize {
		debug_assert!(pos > 0);
		(pos-1) >> 1
	}
	#[inline(always)]
	fn _left_child(pos: usize) -> usize {
		((pos+1) << 1) - 1
	}
	#[inline(always)]
	fn _is_min_level(pos: usize) -> bool {
		log2_floor(pos+1) & 1 == 0
	}

	/// Internal helper to compare two elements with the user's less-than.
	/// INVERT swaps the operands which turns the comparison into a greater-than.
	#[inline(always)]
	fn _less<const INVERT: bool>(&self, a: &T, b: &T) -> bool {
		if INVERT { (self.less)(b, a) } else { (self.less)(a, b) }
	}
	/// Internal helper to compare two elements by offset
	#[inline(always)]
	fn _less_idx<const INVERT: bool>(&self, i: usize, j: usize) -> bool {
		self._less::<INVERT>(&self.heap[i], &self.heap[j])
	}

	/// Internal helper to move a just appended leaf upwards until both
	/// ordering properties hold again. A single parent comparison decides
	/// which polarity chain the leaf belongs to, the rest of the climb
	/// happens along same-polarity grandparents.
	fn _bubble_up(&mut self, pos: usize) {
		if pos == 0 { return; }
		let parent = Self::_parent(pos);
		if Self::_is_min_level(pos) {
			/* A min level node larger than its parent belongs on the max
			 * level above */
			if self._less_idx::<true>(pos, parent) {
				self.heap.swap(pos, parent);
				self._bubble_up_ordered::<true>(parent);
			} else {
				self._bubble_up_ordered::<false>(pos);
			}
		} else {
			if self._less_idx::<false>(pos, parent) {
				self.heap.swap(pos, parent);
				self._bubble_up_ordered::<false>(parent);
			} else {
				self._bubble_up_ordered::<true>(pos);
			}
		}
	}
	/// Internal helper to swap a node with its grandparent for as long as
	/// its level polarity is violated, two levels per step
	#[inline(always)]
	fn _bubble_up_ordered<const INVERT: bool>(&mut self, mut pos: usize) {
		/* A grandparent exists for every offset above 2 */
		while pos > 2 {
			let grandparent = Self::_parent(Self::_parent(pos));
			if self._less_idx::<INVERT>(pos, grandparent) {
				self.heap.swap(pos, grandparent);
				pos = grandparent;
			} else {
				break;
			}
		}
	}

	/// Internal helper to dispatch trickle-down on the polarity of the
	/// sub-tree root's level
	#[inline(always)]
	fn _trickle_down_from(&mut self, pos: usize) {
		if Self::_is_min_level(pos) {
			self._trickle_down::<false>(pos);
		} else {
			self._trickle_down::<true>(pos);
		}
	}
	/// Internal helper to move a sub-tree root downwards until both ordering
	/// properties hold again. INVERT=false restores a min level root,
	/// INVERT=true a max level root. Descends two levels per step through
	/// the grandchildren.
	fn _trickle_down<const INVERT: bool>(&mut self, mut pos: usize) {
		let n = self.heap.len();
		loop {
			let lc = Self::_left_child(pos);
			/* The tree is complete, no left child means leaf */
			if lc >= n { return; }
			/* Scan the up to six descendants within two levels for the
			 * smallest (largest) value, first encountered wins ties */
			let rc = lc+1;
			let lclc = Self::_left_child(lc);
			let rclc = Self::_left_child(rc);
			let mut extremum = lc;
			for descendant in [lclc, lclc+1, rc, rclc, rclc+1] {
				if descendant < n && self._less_idx::<INVERT>(descendant, extremum) {
					extremum = descendant;
				}
			}
			if extremum >= lclc {
				/* The extremum is a grandchild and shares the root's level
				 * polarity */
				if !self._less_idx::<INVERT>(extremum, pos) { return; }
				self.heap.swap(extremum, pos);
				/* The swap may have broken the opposite ordering against
				 * the intermediate parent */
				let parent = Self::_parent(extremum);
				if self._less_idx::<INVERT>(parent, extremum) {
					self.heap.swap(extremum, parent);
				}
				pos = extremum;
			} else {
				/* The extremum is a direct child on the opposite polarity
				 * level, its own sub-trees are untouched */
				if self._less_idx::<INVERT>(extremum, pos) {
					self.heap.swap(extremum, pos);
				}
				return;
			}
		}
	}

	/// Internal helper to locate the offset of the maximum, None if empty
	#[inline(always)]
	fn _max_offset(&self) -> Option<usize> {
		match self.heap.len() {
			0 => None,
			/* With one or two nodes the last one is the maximum */
			1 | 2 => Some(self.heap.len()-1),
			/* Otherwise the maximum is the greater node of the first max
			 * level, which dominates all max levels below it */
			_ => Some(if self._less_idx::<false>(1, 2) { 2 } else { 1 }),
		}
	}

	/// Push a new value into the heap
	#[inline(always)]
	pub fn push(&mut self, value: T) {
		let n = self.heap.len();
		self.heap.push(value);
		self._bubble_up(n);
	}
	/// Pop the minimum value from the heap, returns None if empty
	#[inline(always)]
	pub fn pop_min(&mut self) -> Option<T> {
		let n = self.heap.len();
		if n == 0 {
			None
		} else {
			/* Move the last leaf over the root and re-establish order
			 * downwards */
			let value = self.heap.swap_remove(0);
			if n > 1 {
				self._trickle_down::<false>(0);
			}
			Some(value)
		}
	}
	/// Pop the maximum value from the heap, returns None if empty
	#[inline(always)]
	pub fn pop_max(&mut self) -> Option<T> {
		self._max_offset().map(|pos| {
			let value = self.heap.swap_remove(pos);
			if pos < self.heap.len() {
				self._trickle_down_from(pos);
			}
			value
		})
	}
	/// Peek at the minimum value in the heap, returns None if empty
	#[inline(always)]
	pub fn peek_min(&self) -> Option<&T> {
		self.heap.first()
	}
	/// Peek at the maximum value in the heap, returns None if empty
	#[inline(always)]
	pub fn peek_max(&self) -> Option<&T> {
		self._max_offset().map(|pos| &self.heap[pos])
	}

	/// Get the number of elements in the heap
	#[inline(always)]
	pub fn size(&self) -> usize {
		self.heap.len()
	}
	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.heap.is_empty()
	}
	/// Get the comparator the heap orders by
	#[inline(always)]
	pub fn comparator(&self) -> &F {
		&self.less
	}
	/// Create an iterator over the heap in memory order (not sorted)
	#[inline(always)]
	pub fn iter(&self) -> std::slice::Iter<T> {
		self.heap.iter()
	}
	#[inline(always)]
	pub fn as_slice(&self) -> &[T] {
		self.heap.as_slice()
	}
	/// Consume the heap into an iterator in memory order (not sorted)
	#[inline(always)]
	pub fn into_iter(self) -> std::vec::IntoIter<T> {
		self.heap.into_iter()
	}
	/// Consume the heap into an iterator popping the minimum (ASC) or the
	/// maximum (!ASC) value each step
	#[inline(always)]
	pub fn into_sorted_iter<const ASC: bool>(self) -> MinMaxHeapIter<T, F, ASC> {
		MinMaxHeapIter::new(self)
	}
	/// Create an iterator popping the minimum (ASC) or the maximum (!ASC)
	/// value each step (empties the heap)
	#[inline(always)]
	pub fn sorted_iter<const ASC: bool>(&mut self) -> MinMaxHeapRefIter<T, F, ASC> {
		MinMaxHeapRefIter::new(self)
	}
	/// Reserve additional capacity akin to std::vec::Vec::reserve
	#[inline(always)]
	pub fn reserve(&mut self, capacity: usize) {
		self.heap.reserve(capacity);
	}
	/// Clear the heap
	#[inline(always)]
	pub fn clear(&mut self) {
		self.heap.clear();
	}
}

pub struct MinMaxHeapIter<T, F: Fn(&T, &T) -> bool, const ASC: bool> {
	heap: MinMaxHeap<T, F>
}
impl<T, F: Fn(&T, &T) -> bool, const ASC: bool> MinMaxHeapIter<T, F, ASC> {
	#[inline(always)]
	fn new(heap: MinMaxHeap<T, F>) -> Self { Self{heap: heap} }
}
impl<T, F: Fn(&T, &T) -> bool, const ASC: bool> Iterator for MinMaxHeapIter<T, F, ASC> {
	type Item = T;
	#[inline(always)]
	fn next(&mut self) -> Option<Self::Item> {
		if ASC { self.heap.pop_min() } else { self.heap.pop_max() }
	}
}
pub struct MinMaxHeapRefIter<'a, T, F: Fn(&T, &T) -> bool, const ASC: bool> {
	heap: &'a mut MinMaxHeap<T, F>
}
impl<'a, T, F: Fn(&T, &T) -> bool, const ASC: bool> MinMaxHeapRefIter<'a, T, F, ASC> {
	#[inline(always)]
	fn new(heap: &'a mut MinMaxHeap<T, F>) -> Self { Self{heap: heap} }
}
impl<'a, T, F: Fn(&T, &T) -> bool, const ASC: bool> Iterator for MinMaxHeapRefIter<'a, T, F, ASC> {
	type Item = T;
	#[inline(always)]
	fn next(&mut self) -> Option<Self::Item> {
		if ASC { self.heap.pop_min() } else { self.heap.pop_max() }
	}
}




#[cfg(test)]
fn _make_data<T: Clone+PartialOrd>(n: usize) -> (Vec<T>,Vec<T>) where rand::distributions::Standard: rand::distributions::Distribution<T> {
	let data: Vec<T> = (0..n).map(|_| rand::random()).collect();
	let mut sorted_data = data.clone();
	sorted_data.sort_by(|a,b| a.partial_cmp(b).unwrap());
	(data,sorted_data)
}
#[cfg(test)]
fn _check_heap_property<T: PartialOrd+std::fmt::Debug, F: Fn(&T, &T) -> bool>(heap: &MinMaxHeap<T, F>) {
	let values = heap.as_slice();
	/* Checking every node against its parent and grandparent covers the
	 * full min-max property: relations along same-polarity ancestor chains
	 * compose transitively */
	(1..values.len()).for_each(|pos| {
		let parent = (pos-1) >> 1;
		if log2_floor(parent+1) & 1 == 0 {
			assert!(values[parent] <= values[pos], "min level violated at {}: {:?} > {:?}", parent, values[parent], values[pos]);
		} else {
			assert!(values[parent] >= values[pos], "max level violated at {}: {:?} < {:?}", parent, values[parent], values[pos]);
		}
		if parent > 0 {
			let grandparent = (parent-1) >> 1;
			if log2_floor(grandparent+1) & 1 == 0 {
				assert!(values[grandparent] <= values[pos], "min level violated at {}: {:?} > {:?}", grandparent, values[grandparent], values[pos]);
			} else {
				assert!(values[grandparent] >= values[pos], "max level violated at {}: {:?} < {:?}", grandparent, values[grandparent], values[pos]);
			}
		}
	});
}
#[test]
fn test_pop_min_sorted() {
	let n = 10_000;
	type T = f64;
	let (data,sorted_data) = _make_data::<T>(n);
	let mut heap = MinMaxHeap::new();
	data.iter().for_each(|&x| heap.push(x));
	_check_heap_property(&heap);
	let result = (0..n).map(|_| heap.pop_min().unwrap()).collect::<Vec<_>>();
	assert_eq!(result, sorted_data);
}
#[test]
fn test_pop_max_sorted() {
	let n = 10_000;
	type T = f64;
	let (data,sorted_data) = _make_data::<T>(n);
	let mut heap = MinMaxHeap::new();
	data.iter().for_each(|&x| heap.push(x));
	_check_heap_property(&heap);
	let result = (0..n).map(|_| heap.pop_max().unwrap()).collect::<Vec<_>>();
	assert_eq!(result, sorted_data.into_iter().rev().collect::<Vec<_>>());
}
#[test]
fn test_floyd_build() {
	let n = 10_000;
	type T = f64;
	let (data,sorted_data) = _make_data::<T>(n);
	let heap = MinMaxHeap::from_vec(data);
	_check_heap_property(&heap);
	let result = heap.into_sorted_iter::<true>().collect::<Vec<_>>();
	assert_eq!(result, sorted_data);
}
#[test]
fn test_alternating_drain() {
	let n = 10_000;
	type T = f64;
	let (data,sorted_data) = _make_data::<T>(n);
	let mut heap = MinMaxHeap::from_vec(data);
	/* Min and max pops interleaved fill the sorted sequence from both ends */
	let mut result = vec![0 as T; n];
	let mut i = 0;
	let mut j = n-1;
	while heap.size() > 0 {
		result[i] = heap.pop_min().unwrap();
		i += 1;
		if heap.size() > 0 {
			result[j] = heap.pop_max().unwrap();
			j -= 1;
		}
	}
	assert_eq!(result, sorted_data);
}
#[test]
fn test_sorted_iters() {
	let n = 1_000;
	type T = f64;
	let (data,sorted_data) = _make_data::<T>(n);
	let mut heap = MinMaxHeap::from_vec(data.clone());
	let descending = heap.sorted_iter::<false>().collect::<Vec<_>>();
	assert_eq!(descending, sorted_data.iter().copied().rev().collect::<Vec<_>>());
	assert!(heap.is_empty());
	/* Memory order iteration visits everything but promises no order */
	let heap = MinMaxHeap::from_vec(data);
	assert_eq!(heap.iter().count(), n);
	let mut raw = heap.into_iter().collect::<Vec<_>>();
	raw.sort_by(|a,b| a.partial_cmp(b).unwrap());
	assert_eq!(raw, sorted_data);
}
#[test]
fn test_known_sequence() {
	let data = vec![3,1,4,1,5,9,2,6,5,3,5,8,9,7,9];
	let heap = MinMaxHeap::from_vec(data.clone());
	_check_heap_property(&heap);
	assert_eq!(heap.peek_min(), Some(&1));
	assert_eq!(heap.peek_max(), Some(&9));
	let result = heap.into_sorted_iter::<true>().collect::<Vec<_>>();
	assert_eq!(result, vec![1,1,2,3,3,4,5,5,5,6,7,8,9,9,9]);
	let heap = MinMaxHeap::from_vec(data);
	let result = heap.into_sorted_iter::<false>().collect::<Vec<_>>();
	assert_eq!(result, vec![9,9,9,8,7,6,5,5,5,4,3,3,2,1,1]);
}
#[test]
fn test_empty_and_single() {
	let mut heap = MinMaxHeap::<i32>::new();
	assert_eq!(heap.peek_min(), None);
	assert_eq!(heap.peek_max(), None);
	assert_eq!(heap.pop_min(), None);
	assert_eq!(heap.pop_max(), None);
	heap.push(42);
	assert_eq!(heap.peek_min(), Some(&42));
	assert_eq!(heap.peek_max(), Some(&42));
	assert_eq!(heap.pop_max(), Some(42));
	assert_eq!(heap.pop_min(), None);
	/* With two nodes the maximum is the second one */
	heap.push(2);
	heap.push(1);
	assert_eq!(heap.peek_max(), Some(&2));
	assert_eq!(heap.peek_min(), Some(&1));
	heap.clear();
	heap.push(1);
	heap.push(2);
	assert_eq!(heap.peek_max(), Some(&2));
	assert_eq!(heap.peek_min(), Some(&1));
}
#[test]
fn test_all_equal() {
	let n = 100;
	let mut heap = MinMaxHeap::from_vec(vec![7i64; n]);
	_check_heap_property(&heap);
	(0..n/2).for_each(|_| {
		assert_eq!(heap.pop_min(), Some(7));
		assert_eq!(heap.pop_max(), Some(7));
	});
	assert!(heap.is_empty());
}
#[test]
fn test_random_ops_invariants() {
	use rand::Rng;
	let mut rng = rand::thread_rng();
	let mut heap = MinMaxHeap::new();
	let mut mirror: Vec<i32> = Vec::new();
	(0..2_000).for_each(|step| {
		match rng.gen_range(0..4) {
			0 | 1 => {
				let value = rng.gen_range(-1_000..1_000);
				heap.push(value);
				mirror.push(value);
			},
			2 => {
				let expected = mirror.iter().copied().reduce(|a,b| if b < a { b } else { a });
				assert_eq!(heap.pop_min(), expected);
				if let Some(value) = expected {
					let offset = mirror.iter().position(|&v| v == value).unwrap();
					mirror.swap_remove(offset);
				}
			},
			_ => {
				let expected = mirror.iter().copied().reduce(|a,b| if b > a { b } else { a });
				assert_eq!(heap.pop_max(), expected);
				if let Some(value) = expected {
					let offset = mirror.iter().position(|&v| v == value).unwrap();
					mirror.swap_remove(offset);
				}
			},
		}
		assert_eq!(heap.size(), mirror.len());
		if step % 100 == 0 { _check_heap_property(&heap); }
	});
	_check_heap_property(&heap);
	mirror.sort();
	let drained = heap.into_sorted_iter::<true>().collect::<Vec<_>>();
	assert_eq!(drained, mirror);
}
#[test]
fn test_custom_comparator() {
	/* Order entries by their score field only */
	let data = vec![
		(2usize, 3.0f64), (3, 2.0), (1, 5.0), (5, 7.0), (5, 23.0),
		(6, 3.0), (2, 6.0), (3, 7.0), (1, 1.0), (9, 0.0),
	];
	let mut heap = MinMaxHeap::with_comparator(|a: &(usize,f64), b: &(usize,f64)| a.1 < b.1);
	data.into_iter().for_each(|pair| heap.push(pair));
	assert_eq!(heap.peek_min().unwrap().1, 0.0);
	assert_eq!(heap.peek_max().unwrap().1, 23.0);
	let scores = heap.into_sorted_iter::<true>().map(|(_,score)| score).collect::<Vec<_>>();
	assert!((0..scores.len()-1).all(|i| scores[i] <= scores[i+1]), "scores: {:?}", scores);
}
#[test]
fn benchmark_alternating_drain() {
	use crate::random::RandomPermutationGenerator;
	let n = 10_000_000;
	let data = RandomPermutationGenerator::new(n, 4).map(|v| v+1).collect::<Vec<_>>();
	let build_time = std::time::Instant::now();
	let mut heap = MinMaxHeap::from_vec(data);
	println!("Floyd build of {}: {:?}", n, build_time.elapsed());
	let drain_time = std::time::Instant::now();
	(1..=n/2).for_each(|i| {
		assert_eq!(heap.pop_min(), Some(i));
		assert_eq!(heap.pop_max(), Some(n+1-i));
	});
	println!("Alternating drain of {}: {:?}", n, drain_time.elapsed());
	assert!(heap.is_empty());
}

