//! Checked-in-debug slice access for the solver hot loops
//!
//! The relaxation and advection passes index flat `W*H` slices with
//! neighbour offsets (`idx ± 1`, `idx ± W`) that are always interior by
//! construction of the `1..dim-1` loops. Debug builds keep the bounds check
//! so a broken loop bound panics with the offending index; release builds
//! drop it.
//!
//! ```rust
//! use fluidfield_engine::fast;
//!
//! let w = 3;
//! let mut p = vec![0.0f32; 9];
//! fast!(p, [w + 1] = 2.0);
//! fast!(p, [w + 1] += 0.5);
//! fast!(p, [w + 1] -= 1.0);
//! assert_eq!(*fast!(p, [w + 1]), 1.5);
//! ```

/// Slice access that is bounds checked only with `debug_assertions`.
///
/// - `fast!(slice, [i])` reads (yields a reference)
/// - `fast!(slice, [i] = v)` writes
/// - `fast!(slice, [i] += v)` accumulates
/// - `fast!(slice, [i] -= v)` subtracts
#[macro_export]
macro_rules! fast {
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) = $val;
            }
        }
    }};

    ($slice:expr, [$index:expr] += $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] += $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) += $val;
            }
        }
    }};

    ($slice:expr, [$index:expr] -= $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] -= $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) -= $val;
            }
        }
    }};
}
