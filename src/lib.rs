
pub mod bits;
pub mod heaps;
pub mod queues;
pub mod random;
pub mod types;

