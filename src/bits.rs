use crate::types::TreeOffset;

/* Exact integer binary logarithms for tree level computations.
 * Levels must never be computed with floating point: log2f(16_777_205)
 * rounds to exactly 24.0 even though 16_777_205 < 2^24, which places the
 * node one level too deep and applies the wrong ordering polarity there.
 * Counting leading zeros is exact for every representable value. */

/// Floor of the base two logarithm of a positive unsigned integer
#[inline(always)]
pub fn log2_floor<U: TreeOffset>(value: U) -> u32 {
	debug_assert!(value > U::zero());
	let bit_width = (std::mem::size_of::<U>() * 8) as u32;
	bit_width - value.leading_zeros() - 1
}

/// Ceiling of the base two logarithm of a positive unsigned integer
#[inline(always)]
pub fn log2_ceil<U: TreeOffset>(value: U) -> u32 {
	debug_assert!(value > U::zero());
	if value == U::one() {
		0
	} else {
		log2_floor(value - U::one()) + 1
	}
}




#[cfg(test)]
fn _log2_floor_reference<U: TreeOffset>(value: U) -> u32 {
	/* Shift right until a single bit remains */
	let mut value = value;
	let mut powers = 0;
	while (value >> 1) > U::zero() {
		value = value >> 1;
		powers += 1;
	}
	powers
}
#[test]
fn test_log2_floor_exhaustive_small() {
	(1u64..(1<<20)).for_each(|value| {
		assert_eq!(log2_floor(value), _log2_floor_reference(value), "value: {}", value);
	});
}
#[test]
fn test_log2_floor_boundaries() {
	(1u32..64).for_each(|power| {
		let boundary = 1u64 << power;
		((boundary-2).max(1)..=boundary+2).for_each(|value| {
			assert_eq!(log2_floor(value), _log2_floor_reference(value), "value: {}", value);
		});
	});
	/* log2f would round this one up to the 2^24 boundary */
	assert_eq!(log2_floor(16_777_205u64), 23);
	assert_eq!(log2_floor(16_777_215u64), 23);
	assert_eq!(log2_floor(16_777_216u64), 24);
}
#[test]
fn test_log2_ceil() {
	assert_eq!(log2_ceil(1u64), 0);
	assert_eq!(log2_ceil(2u64), 1);
	(2u32..63).for_each(|power| {
		let boundary = 1u64 << power;
		assert_eq!(log2_ceil(boundary-1), power);
		assert_eq!(log2_ceil(boundary), power);
		assert_eq!(log2_ceil(boundary+1), power+1);
	});
}
#[cfg(test)]
macro_rules! make_width_tests {
	($($t:ty),*) => { paste::paste! { $(
		#[test]
		fn [<test_log2_floor_ $t>]() {
			assert_eq!(log2_floor(1 as $t), 0);
			assert_eq!(log2_floor(<$t>::MAX), <$t>::BITS - 1);
			(1..<$t>::BITS).for_each(|power| {
				let boundary = (1 as $t) << power;
				assert_eq!(log2_floor(boundary), power);
				assert_eq!(log2_floor(boundary - 1), power - 1);
			});
		}
	)* } };
}
#[cfg(test)]
make_width_tests!(u16, u32, u64, u128, usize);

