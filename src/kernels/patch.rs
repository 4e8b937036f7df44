//! The correction half of compute-then-patch.
//!
//! After a raw kernel has run, every destination slot whose operand held the
//! sentinel may contain garbage (a wrapped integer, for example). These passes
//! find those slots and write the sentinel back. They are cheap linear scans
//! and always run, whether or not the input holds any sentinel.

use crate::traits::NaPrimitive;

/// Writes the sentinel into `dst[i]` wherever `src[i]` is the sentinel.
/// Returns the number of patched slots. Lengths must already match.
#[inline]
pub fn patch_missing<T: NaPrimitive>(src: &[T], dst: &mut [T]) -> usize {
    debug_assert_eq!(src.len(), dst.len());
    let mut patched = 0;
    for (out, &v) in dst.iter_mut().zip(src) {
        if v.is_sentinel() {
            *out = T::SENTINEL;
            patched += 1;
        }
    }
    patched
}

/// Records which slots of `src` hold the sentinel, replacing `mask`'s contents.
/// Returns the number of sentinels found.
pub fn record_missing_mask<T: NaPrimitive>(src: &[T], mask: &mut Vec<bool>) -> usize {
    mask.clear();
    mask.extend(src.iter().map(|v| v.is_sentinel()));
    mask.iter().filter(|&&m| m).count()
}

/// Writes the sentinel into `dst[i]` wherever `mask[i]` is set.
pub fn patch_from_mask<T: NaPrimitive>(mask: &[bool], dst: &mut [T]) -> usize {
    debug_assert_eq!(mask.len(), dst.len());
    let mut patched = 0;
    for (out, &m) in dst.iter_mut().zip(mask) {
        if m {
            *out = T::SENTINEL;
            patched += 1;
        }
    }
    patched
}

pub fn count_sentinels<T: NaPrimitive>(src: &[T]) -> usize {
    src.iter().filter(|v| v.is_sentinel()).count()
}

pub fn contains_sentinel<T: NaPrimitive>(src: &[T]) -> bool {
    src.iter().any(|v| v.is_sentinel())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_marks_exactly_sentinel_slots() {
        let src = [1u16, u16::MAX, 3, u16::MAX];
        let mut dst = [10u16, 11, 12, 13];
        assert_eq!(patch_missing(&src, &mut dst), 2);
        assert_eq!(dst, [10, u16::MAX, 12, u16::MAX]);
    }

    #[test]
    fn test_mask_round_trip() {
        let src = [f32::NAN, 1.0, 2.0];
        let mut mask = vec![true; 10];
        assert_eq!(record_missing_mask(&src, &mut mask), 1);
        assert_eq!(mask, vec![true, false, false]);

        let mut dst = [5.0f32, 6.0, 7.0];
        assert_eq!(patch_from_mask(&mask, &mut dst), 1);
        assert!(dst[0].is_nan());
        assert_eq!(&dst[1..], &[6.0, 7.0]);
    }

    #[test]
    fn test_counts() {
        assert_eq!(count_sentinels(&[i8::MAX, 0, i8::MAX]), 2);
        assert!(!contains_sentinel::<i64>(&[]));
        assert!(contains_sentinel(&[0.0f64, f64::NAN]));
    }
}
