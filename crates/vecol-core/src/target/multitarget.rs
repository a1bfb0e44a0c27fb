//! Compile one generic body once per [`TargetArch`](super::TargetArch).
//!
//! The body is an ordinary `#[inline(always)]` generic function. Each tier
//! entry generated by [`declare_multitarget!`](crate::declare_multitarget)
//! calls it from inside a `#[target_feature]` function, so the body is inlined
//! and code-generated again with that tier's instruction set enabled (wider
//! auto-vectorization, `popcnt`, masked loads...). Source text is shared; the
//! machine code is not.

/// Declares a module of per-tier entry points around one generic function.
///
/// For a parent-module function `body`, the generated module holds:
///
/// - `default`: the baseline entry, safe to call anywhere.
/// - `sse42`, `avx`, `avx2`, `avx512`: `unsafe` entries compiled with the
///   tier's target features on x86_64 (plain copies elsewhere).
/// - `call(arch, ..)`: safe selector that enters `arch`'s entry only when the
///   CPU supports it, and the baseline otherwise.
///
/// The body should be `#[inline(always)]`; a body that is not inlined runs
/// with the baseline feature set whichever entry called it.
///
/// # Example
///
/// ```
/// use vecol_core::declare_multitarget;
/// use vecol_core::target::TargetArch;
///
/// #[inline(always)]
/// fn count_matches<T: PartialEq>(values: &[T], probe: &T) -> usize {
///     values.iter().filter(|v| *v == probe).count()
/// }
///
/// declare_multitarget! {
///     mod count_matches_targets {
///         fn count_matches<T: PartialEq>(values: &[T], probe: &T) -> usize;
///     }
/// }
///
/// fn main() {
///     let values = [1, 2, 1, 3];
///     for arch in TargetArch::ALL {
///         assert_eq!(count_matches_targets::call(arch, &values, &1), 2);
///     }
/// }
/// ```
#[macro_export]
macro_rules! declare_multitarget {
    (
        $(#[$meta:meta])*
        $vis:vis mod $module:ident {
            fn $body:ident<$($gen:ident: $bound:path),* $(,)?>($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty;
        }
    ) => {
        $(#[$meta])*
        $vis mod $module {
            #[allow(unused_imports)]
            use super::*;

            /// Baseline entry.
            #[inline]
            pub fn default<$($gen: $bound),*>($($arg: $ty),*) -> $ret {
                super::$body::<$($gen),*>($($arg),*)
            }

            /// SSE4.2 entry.
            ///
            /// # Safety
            ///
            /// The CPU must support `TargetArch::Sse42`.
            #[cfg_attr(target_arch = "x86_64", target_feature(enable = "sse4.2,popcnt"))]
            pub unsafe fn sse42<$($gen: $bound),*>($($arg: $ty),*) -> $ret {
                super::$body::<$($gen),*>($($arg),*)
            }

            /// AVX entry.
            ///
            /// # Safety
            ///
            /// The CPU must support `TargetArch::Avx`.
            #[cfg_attr(target_arch = "x86_64", target_feature(enable = "sse4.2,popcnt,avx"))]
            pub unsafe fn avx<$($gen: $bound),*>($($arg: $ty),*) -> $ret {
                super::$body::<$($gen),*>($($arg),*)
            }

            /// AVX2 entry.
            ///
            /// # Safety
            ///
            /// The CPU must support `TargetArch::Avx2`.
            #[cfg_attr(
                target_arch = "x86_64",
                target_feature(enable = "sse4.2,popcnt,avx,avx2")
            )]
            pub unsafe fn avx2<$($gen: $bound),*>($($arg: $ty),*) -> $ret {
                super::$body::<$($gen),*>($($arg),*)
            }

            /// AVX-512 entry.
            ///
            /// # Safety
            ///
            /// The CPU must support `TargetArch::Avx512`.
            #[cfg_attr(
                target_arch = "x86_64",
                target_feature(enable = "sse4.2,popcnt,avx,avx2,avx512f,avx512bw")
            )]
            pub unsafe fn avx512<$($gen: $bound),*>($($arg: $ty),*) -> $ret {
                super::$body::<$($gen),*>($($arg),*)
            }

            /// Runs the entry compiled for `arch`, or the baseline when this
            /// CPU lacks it.
            #[inline]
            pub fn call<$($gen: $bound),*>(
                arch: $crate::target::TargetArch,
                $($arg: $ty),*
            ) -> $ret {
                use $crate::target::TargetArch;

                if !$crate::target::is_supported(arch) {
                    return default::<$($gen),*>($($arg),*);
                }
                // SAFETY: `is_supported` confirmed the CPU has every feature
                // enabled on the selected entry.
                unsafe {
                    match arch {
                        TargetArch::Default => default::<$($gen),*>($($arg),*),
                        TargetArch::Sse42 => sse42::<$($gen),*>($($arg),*),
                        TargetArch::Avx => avx::<$($gen),*>($($arg),*),
                        TargetArch::Avx2 => avx2::<$($gen),*>($($arg),*),
                        TargetArch::Avx512 => avx512::<$($gen),*>($($arg),*),
                    }
                }
            }
        }
    };
}
