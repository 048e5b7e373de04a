use crate::heaps::MinMaxHeap;
use crate::types::{default_less, LessFn, SortKey};

/* Priority queue with a fixed capacity. Once the capacity is reached a new
 * value either displaces the current worst element or is handed back
 * unchanged, so the queue always holds the best values seen so far.
 * MAX_PRIORITY=false keeps the smallest values, MAX_PRIORITY=true the
 * largest. Backed by a min-max heap, which makes the worst element as cheap
 * to reach as the best one. */
pub struct BoundedPriorityQueue<T, F: Fn(&T, &T) -> bool, const MAX_PRIORITY: bool> {
	heap: MinMaxHeap<T, F>,
	capacity: usize,
}
pub type BoundedMinQueue<T, F = LessFn<T>> = BoundedPriorityQueue<T, F, false>;
pub type BoundedMaxQueue<T, F = LessFn<T>> = BoundedPriorityQueue<T, F, true>;

impl<T: SortKey, const MAX_PRIORITY: bool> BoundedPriorityQueue<T, LessFn<T>, MAX_PRIORITY> {
	/// Creates an empty queue retaining at most `capacity` values under the
	/// type's natural order
	#[inline(always)]
	pub fn new(capacity: usize) -> Self {
		Self::with_comparator(capacity, default_less::<T>)
	}
	/// Builds a queue from the values of a vec, retaining the best `capacity` of them
	#[inline(always)]
	pub fn from_vec(values: Vec<T>, capacity: usize) -> Self {
		Self::from_vec_with_comparator(values, capacity, default_less::<T>)
	}
}
impl<T, F: Fn(&T, &T) -> bool, const MAX_PRIORITY: bool> BoundedPriorityQueue<T, F, MAX_PRIORITY> {
	/// Creates an empty queue retaining at most `capacity` values under a
	/// strict less-than comparator
	#[inline(always)]
	pub fn with_comparator(capacity: usize, less: F) -> Self {
		Self{heap: MinMaxHeap::with_comparator(less), capacity: capacity}
	}
	/// Builds a queue from the values of a vec. The first min(len, capacity)
	/// values are heapified in linear time, the rest stream through the
	/// insertion guard, so the result matches pushing the whole vec one
	/// value at a time.
	pub fn from_vec_with_comparator(mut values: Vec<T>, capacity: usize, less: F) -> Self {
		let overflow = values.split_off(values.len().min(capacity));
		let mut ret = Self{heap: MinMaxHeap::from_vec_with_comparator(values, less), capacity: capacity};
		overflow.into_iter().for_each(|value| { ret.push(value); });
		ret
	}

	/// Internal helper deciding whether `a` belongs in the queue over `b`
	#[inline(always)]
	fn _better(&self, a: &T, b: &T) -> bool {
		if MAX_PRIORITY { (self.heap.comparator())(b, a) } else { (self.heap.comparator())(a, b) }
	}
	#[inline(always)]
	fn _peek_worst(&self) -> Option<&T> {
		if MAX_PRIORITY { self.heap.peek_min() } else { self.heap.peek_max() }
	}
	#[inline(always)]
	fn _pop_worst(&mut self) -> Option<T> {
		if MAX_PRIORITY { self.heap.pop_min() } else { self.heap.pop_max() }
	}

	/// Push a new value. Below capacity the value is always taken and None
	/// comes back. At capacity the value is compared against the worst
	/// element before any heap mutation: if it is strictly better it
	/// displaces the worst element, which is returned, otherwise the value
	/// itself comes back unchanged.
	#[inline(always)]
	pub fn push(&mut self, value: T) -> Option<T> {
		if self.heap.size() < self.capacity {
			self.heap.push(value);
			None
		} else {
			let accept = match self._peek_worst() {
				Some(worst) => self._better(&value, worst),
				/* Capacity zero, nothing is ever taken */
				None => false,
			};
			if accept {
				self.heap.push(value);
				self._pop_worst()
			} else {
				Some(value)
			}
		}
	}
	/// Peek at the best value under the queue's polarity, returns None if empty
	#[inline(always)]
	pub fn peek(&self) -> Option<&T> {
		if MAX_PRIORITY { self.heap.peek_max() } else { self.heap.peek_min() }
	}
	/// Pop the best value under the queue's polarity, returns None if empty
	#[inline(always)]
	pub fn pop(&mut self) -> Option<T> {
		if MAX_PRIORITY { self.heap.pop_max() } else { self.heap.pop_min() }
	}

	/// Get the number of values currently held
	#[inline(always)]
	pub fn size(&self) -> usize {
		self.heap.size()
	}
	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.heap.is_empty()
	}
	#[inline(always)]
	pub fn capacity(&self) -> usize {
		self.capacity
	}
	/// Change the capacity. Shrinking drops worst values until the new
	/// capacity is met, enlarging never touches the contents.
	pub fn set_capacity(&mut self, capacity: usize) {
		self.capacity = capacity;
		while self.heap.size() > self.capacity {
			self._pop_worst();
		}
	}
	/// Create an iterator over the queue in memory order (not sorted)
	#[inline(always)]
	pub fn iter(&self) -> std::slice::Iter<T> {
		self.heap.iter()
	}
	#[inline(always)]
	pub fn as_slice(&self) -> &[T] {
		self.heap.as_slice()
	}
	/// Consume the queue into an iterator popping the best value each step
	#[inline(always)]
	pub fn into_sorted_iter(self) -> BoundedQueueIter<T, F, MAX_PRIORITY> {
		BoundedQueueIter::new(self)
	}
	/// Clear the queue, the capacity stays
	#[inline(always)]
	pub fn clear(&mut self) {
		self.heap.clear();
	}
}

pub struct BoundedQueueIter<T, F: Fn(&T, &T) -> bool, const MAX_PRIORITY: bool> {
	queue: BoundedPriorityQueue<T, F, MAX_PRIORITY>
}
impl<T, F: Fn(&T, &T) -> bool, const MAX_PRIORITY: bool> BoundedQueueIter<T, F, MAX_PRIORITY> {
	#[inline(always)]
	fn new(queue: BoundedPriorityQueue<T, F, MAX_PRIORITY>) -> Self { Self{queue: queue} }
}
impl<T, F: Fn(&T, &T) -> bool, const MAX_PRIORITY: bool> Iterator for BoundedQueueIter<T, F, MAX_PRIORITY> {
	type Item = T;
	#[inline(always)]
	fn next(&mut self) -> Option<Self::Item> {
		self.queue.pop()
	}
}




#[cfg(test)]
fn _sorted_contents<T: Clone+PartialOrd, F: Fn(&T, &T) -> bool, const MAX_PRIORITY: bool>(queue: &BoundedPriorityQueue<T, F, MAX_PRIORITY>) -> Vec<T> {
	let mut contents = queue.as_slice().to_vec();
	contents.sort_by(|a,b| a.partial_cmp(b).unwrap());
	contents
}
#[cfg(test)]
fn _multiset<T: std::hash::Hash+Eq, I: IntoIterator<Item=T>>(values: I) -> foldhash::HashMap<T, usize> {
	let mut counts = foldhash::HashMap::default();
	values.into_iter().for_each(|value| *counts.entry(value).or_insert(0usize) += 1);
	counts
}
#[test]
fn test_min_keep_stream() {
	let mut queue = BoundedMinQueue::new(5);
	[2,3,1,5,5,6,2,3,1,9].into_iter().for_each(|v| { queue.push(v); });
	assert_eq!(queue.size(), 5);
	assert_eq!(_sorted_contents(&queue), vec![1,1,2,2,3]);
	assert_eq!(queue.pop(), Some(1));
	assert_eq!(queue.size(), 4);
}
#[test]
fn test_max_keep_stream() {
	let mut queue = BoundedMaxQueue::new(3);
	[4,1,7,7,2,8,3,9,5].into_iter().for_each(|v| { queue.push(v); });
	assert_eq!(_sorted_contents(&queue), vec![7,8,9]);
	assert_eq!(queue.pop(), Some(9));
	assert_eq!(queue.pop(), Some(8));
	assert_eq!(queue.pop(), Some(7));
	assert_eq!(queue.pop(), None);
}
#[test]
fn test_push_displaced() {
	let mut queue = BoundedMinQueue::new(2);
	assert_eq!(queue.push(5), None);
	assert_eq!(queue.push(3), None);
	/* Not better than the worst, comes back unchanged */
	assert_eq!(queue.push(7), Some(7));
	assert_eq!(queue.push(5), Some(5));
	/* Better, the worst is displaced */
	assert_eq!(queue.push(1), Some(5));
	assert_eq!(queue.pop(), Some(1));
	assert_eq!(queue.pop(), Some(3));
	assert_eq!(queue.pop(), None);
}
#[test]
fn test_capacity_zero() {
	let mut queue = BoundedMinQueue::new(0);
	(0..100).for_each(|v| { assert_eq!(queue.push(v), Some(v)); });
	assert!(queue.is_empty());
	assert_eq!(queue.peek(), None);
	assert_eq!(queue.pop(), None);
}
#[test]
fn test_set_capacity() {
	let mut queue = BoundedMinQueue::from_vec(vec![5,1,4,2,3], 5);
	queue.set_capacity(3);
	assert_eq!(_sorted_contents(&queue), vec![1,2,3]);
	/* Enlarging never touches the contents */
	queue.set_capacity(10);
	assert_eq!(queue.capacity(), 10);
	assert_eq!(_sorted_contents(&queue), vec![1,2,3]);
	queue.set_capacity(3);
	assert_eq!(_sorted_contents(&queue), vec![1,2,3]);
	queue.push(0);
	assert_eq!(_sorted_contents(&queue), vec![0,1,2]);
}
#[test]
fn test_min_keep_random() {
	use rand::Rng;
	let n = 10_000;
	let k = 100;
	let mut rng = rand::thread_rng();
	let data = (0..n).map(|_| rng.gen_range(-1_000_000i64..1_000_000)).collect::<Vec<_>>();
	let mut queue = BoundedMinQueue::new(k);
	data.iter().for_each(|&v| { queue.push(v); });
	assert_eq!(queue.size(), k);
	let mut expected = data;
	expected.sort();
	expected.truncate(k);
	assert_eq!(_multiset(queue.iter().copied()), _multiset(expected));
}
#[test]
fn test_max_keep_random() {
	use rand::Rng;
	let n = 10_000;
	let k = 100;
	let mut rng = rand::thread_rng();
	let data = (0..n).map(|_| rng.gen_range(-1_000_000i64..1_000_000)).collect::<Vec<_>>();
	let mut queue = BoundedMaxQueue::new(k);
	data.iter().for_each(|&v| { queue.push(v); });
	let mut expected = data;
	expected.sort_by(|a,b| b.cmp(a));
	expected.truncate(k);
	assert_eq!(_multiset(queue.iter().copied()), _multiset(expected.iter().copied()));
	/* Draining pops the best first */
	let drained = queue.into_sorted_iter().collect::<Vec<_>>();
	assert_eq!(drained, expected);
}
#[test]
fn test_bulk_matches_streaming() {
	let n = 10_000;
	let k = 64;
	let data = (0..n).map(|_| rand::random::<u32>()).collect::<Vec<_>>();
	let bulk = BoundedMinQueue::from_vec(data.clone(), k);
	let mut streamed = BoundedMinQueue::new(k);
	data.iter().for_each(|&v| { streamed.push(v); });
	assert_eq!(_sorted_contents(&bulk), _sorted_contents(&streamed));
	/* Bulk ingest below capacity is a plain linear build */
	let small = BoundedMinQueue::from_vec(data[..k/2].to_vec(), k);
	assert_eq!(small.size(), k/2);
	let mut expected = data[..k/2].to_vec();
	expected.sort();
	assert_eq!(_sorted_contents(&small), expected);
}
#[test]
fn test_shrink_keeps_best() {
	use rand::Rng;
	let n = 1_000;
	let k = 200;
	let mut rng = rand::thread_rng();
	let data = (0..n).map(|_| rng.gen_range(0i64..1_000_000)).collect::<Vec<_>>();
	let mut queue = BoundedMinQueue::from_vec(data.clone(), k);
	queue.set_capacity(k/2);
	let mut expected = data;
	expected.sort();
	expected.truncate(k/2);
	assert_eq!(_multiset(queue.iter().copied()), _multiset(expected));
}
#[test]
fn test_pop_order() {
	let n = 1_000;
	let k = 50;
	let data = (0..n).map(|_| rand::random::<f32>()).collect::<Vec<_>>();
	let mut queue = BoundedMinQueue::new(k);
	data.iter().for_each(|&v| { queue.push(v); });
	let drained = (0..k).map(|_| queue.pop().unwrap()).collect::<Vec<_>>();
	assert!(queue.is_empty());
	assert!((0..k-1).all(|i| drained[i] <= drained[i+1]), "drained: {:?}", drained);
}
#[test]
fn test_custom_comparator() {
	/* Keep the three entries with the highest score */
	let data = vec![
		(2usize, 3.0f64), (3, 2.0), (1, 5.0), (5, 7.0), (5, 23.0),
		(6, 3.0), (2, 6.0), (3, 7.0), (1, 1.0), (9, 0.0),
	];
	let mut queue = BoundedMaxQueue::with_comparator(3, |a: &(usize,f64), b: &(usize,f64)| a.1 < b.1);
	data.into_iter().for_each(|pair| { queue.push(pair); });
	let scores = queue.into_sorted_iter().map(|(_,score)| score).collect::<Vec<_>>();
	assert_eq!(scores, vec![23.0, 7.0, 7.0]);
}

