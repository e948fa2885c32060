//! Naive recursive utilities, kept slow on purpose so their timing is visible.
//!
//! Inputs are bounded by the caller; nothing here guards recursion depth.

/// Largest `n` whose factorial fits in a `u64`.
pub const FACTORIAL_U64_MAX: u32 = 20;

/// Largest `n` whose fibonacci number fits in a `u64`.
pub const FIBONACCI_U64_MAX: u32 = 93;

/// `n!`, or `None` once the product no longer fits in a `u64` (n > 20).
pub fn factorial(n: u32) -> Option<u64> {
    if n <= 1 {
        return Some(1);
    }
    factorial(n - 1)?.checked_mul(u64::from(n))
}

/// Double recursion without memoisation: fib(0)=0, fib(1)=1.
pub fn fibonacci(n: u32) -> u64 {
    if n <= 1 {
        return u64::from(n);
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}

/// Head plus the sum of the tail; 0 for an empty slice.
pub fn recursive_sum(values: &[f64]) -> f64 {
    match values {
        [] => 0.0,
        [head, tail @ ..] => head + recursive_sum(tail),
    }
}
