use num::Unsigned;
use num_traits::PrimInt;

#[macro_export]
macro_rules! trait_combiner {
	($combination_name: ident $([$($g: tt: $gc1: tt $(+ $gcn: tt)*),+])? $(: $t: tt $(+ $ts: tt)*)?) => {
		pub trait $combination_name$(<$($g: $gc1 $(+ $gcn)*,)+>)? $(: $t $(+ $ts)*)? {}
		impl<$($($g: $gc1 $(+ $gcn)*,)+)?T $(: $t $(+ $ts)*)?> $combination_name$(<$($g,)+>)? for T {}
	};
}
pub use trait_combiner;

/* Unsigned primitive integers usable for node offset arithmetic */
trait_combiner!(TreeOffset: PrimInt+Unsigned);
/* Values orderable by their natural less-than */
trait_combiner!(SortKey: PartialOrd);

/// Fn pointer type of the default comparator used by the comparator-free constructors
pub type LessFn<T> = fn(&T, &T) -> bool;

/// Natural strict less-than of a partially ordered type
#[inline(always)]
pub fn default_less<T: PartialOrd>(a: &T, b: &T) -> bool {
	a < b
}

