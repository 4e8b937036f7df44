//! Missing-aware elementwise arithmetic over sentinel wrapper slices.
//!
//! Every operation is compute-then-patch: the wrapper slices are reinterpreted
//! as raw primitive slices (zero-copy), the raw kernel from
//! `kernels::arithmetic` runs over everything, and the correction pass from
//! `kernels::patch` writes the sentinel into every slot where an operand was
//! missing. The result agrees elementwise with the lifted scalar operators.

use crate::error::NumericsError;
use crate::kernels::arithmetic as raw;
use crate::kernels::patch::{patch_from_mask, patch_missing, record_missing_mask};
use crate::pool::with_mask_buffer;
use crate::traits::{NaValue, SentinelWrapper};
use crate::utils::ensure_same_len;

//==================================================================================
// 1. Private Core Logic
//==================================================================================

fn binary_patched<W, K>(op: &str, x: &[W], y: &[W], dst: &mut [W], kernel: K) -> Result<(), NumericsError>
where
    W: SentinelWrapper,
    K: FnOnce(&[W::Raw], &[W::Raw], &mut [W::Raw]) -> Result<(), NumericsError>,
{
    let x_raw = W::as_raw_slice(x);
    let y_raw = W::as_raw_slice(y);
    let out = W::as_raw_slice_mut(dst);
    // The kernel validates every length before it writes.
    kernel(x_raw, y_raw, out)?;
    let missing_x = patch_missing(x_raw, out);
    let missing_y = patch_missing(y_raw, out);
    log_metric!("op" = op, "len" = out.len(), "missing_x" = missing_x, "missing_y" = missing_y);
    Ok(())
}

fn binary_in_place_patched<W, K>(op: &str, x: &mut [W], y: &[W], kernel: K) -> Result<(), NumericsError>
where
    W: SentinelWrapper,
    K: FnOnce(&mut [W::Raw], &[W::Raw]) -> Result<(), NumericsError>,
{
    ensure_same_len(x.len(), y.len())?;
    with_mask_buffer(x.len(), |mask| -> Result<(), NumericsError> {
        let x_raw = W::as_raw_slice_mut(x);
        let y_raw = W::as_raw_slice(y);
        // The kernel overwrites `x`, so its missing slots are captured first.
        let missing_x = record_missing_mask(x_raw, mask);
        kernel(x_raw, y_raw)?;
        patch_from_mask(mask, x_raw);
        let missing_y = patch_missing(y_raw, x_raw);
        log_metric!("op" = op, "len" = x_raw.len(), "missing_x" = missing_x, "missing_y" = missing_y);
        Ok(())
    })
}

fn scalar_patched<W, K>(op: &str, x: &[W], scalar: W, dst: &mut [W], kernel: K) -> Result<(), NumericsError>
where
    W: SentinelWrapper,
    K: FnOnce(&[W::Raw], W::Raw, &mut [W::Raw]) -> Result<(), NumericsError>,
{
    ensure_same_len(x.len(), dst.len())?;
    if scalar.is_missing() {
        dst.fill(W::MISSING);
        log_metric!("op" = op, "len" = dst.len(), "missing_scalar" = true);
        return Ok(());
    }
    let x_raw = W::as_raw_slice(x);
    let out = W::as_raw_slice_mut(dst);
    kernel(x_raw, scalar.into_raw(), out)?;
    let missing_x = patch_missing(x_raw, out);
    log_metric!("op" = op, "len" = out.len(), "missing_x" = missing_x);
    Ok(())
}

fn scalar_in_place_patched<W, K>(op: &str, x: &mut [W], scalar: W, kernel: K)
where
    W: SentinelWrapper,
    K: FnOnce(&mut [W::Raw], W::Raw),
{
    if scalar.is_missing() {
        x.fill(W::MISSING);
        log_metric!("op" = op, "len" = x.len(), "missing_scalar" = true);
        return;
    }
    with_mask_buffer(x.len(), |mask| {
        let x_raw = W::as_raw_slice_mut(x);
        let missing_x = record_missing_mask(x_raw, mask);
        kernel(x_raw, scalar.into_raw());
        patch_from_mask(mask, x_raw);
        log_metric!("op" = op, "len" = x_raw.len(), "missing_x" = missing_x);
    });
}

//==================================================================================
// 2. Public API
//==================================================================================

macro_rules! impl_patched_ops {
    (
        $name:literal,
        $op:ident,
        $in_place:ident,
        $to_vec:ident,
        $scalar:ident,
        $scalar_in_place:ident
    ) => {
        /// Elementwise into `dst`. A missing operand yields a missing slot.
        ///
        /// # Errors
        /// `LengthMismatch` when `x`, `y` and `dst` differ in length. Nothing is
        /// written in that case.
        pub fn $op<W: SentinelWrapper>(x: &[W], y: &[W], dst: &mut [W]) -> Result<(), NumericsError> {
            binary_patched($name, x, y, dst, raw::$op::<W::Raw>)
        }

        /// Elementwise into `x`.
        pub fn $in_place<W: SentinelWrapper>(x: &mut [W], y: &[W]) -> Result<(), NumericsError> {
            binary_in_place_patched($name, x, y, raw::$in_place::<W::Raw>)
        }

        /// Elementwise into a newly allocated vector.
        pub fn $to_vec<W: SentinelWrapper>(x: &[W], y: &[W]) -> Result<Vec<W>, NumericsError> {
            ensure_same_len(x.len(), y.len())?;
            let mut dst = vec![W::MISSING; x.len()];
            $op(x, y, &mut dst)?;
            Ok(dst)
        }

        /// Every element against one scalar. A missing scalar makes every slot missing.
        pub fn $scalar<W: SentinelWrapper>(x: &[W], scalar: W, dst: &mut [W]) -> Result<(), NumericsError> {
            scalar_patched($name, x, scalar, dst, raw::$scalar::<W::Raw>)
        }

        pub fn $scalar_in_place<W: SentinelWrapper>(x: &mut [W], scalar: W) {
            scalar_in_place_patched($name, x, scalar, raw::$scalar_in_place::<W::Raw>)
        }
    };
}

impl_patched_ops!("add", add, add_in_place, add_to_vec, add_scalar, add_scalar_in_place);
impl_patched_ops!(
    "subtract",
    subtract,
    subtract_in_place,
    subtract_to_vec,
    subtract_scalar,
    subtract_scalar_in_place
);
impl_patched_ops!(
    "multiply",
    multiply,
    multiply_in_place,
    multiply_to_vec,
    multiply_scalar,
    multiply_scalar_in_place
);
impl_patched_ops!(
    "divide",
    divide,
    divide_in_place,
    divide_to_vec,
    divide_scalar,
    divide_scalar_in_place
);
