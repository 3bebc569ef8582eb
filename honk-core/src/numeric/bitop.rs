//! Circular right rotations of fixed-width words.
//!
//! Rotation amounts are expected to already be reduced modulo the word
//! width; a zero rotation returns the input unchanged.

#[inline]
pub const fn rotate64(value: u64, rotation: u64) -> u64 {
    if rotation != 0 {
        (value >> rotation) | (value << (64 - rotation))
    } else {
        value
    }
}

#[inline]
pub const fn rotate32(value: u32, rotation: u32) -> u32 {
    if rotation != 0 {
        (value >> rotation) | (value << (32 - rotation))
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_core_rotate_right() {
        let samples = [0u64, 1, 0xdead_beef_cafe_f00d, u64::MAX, 1 << 63];
        for value in samples {
            for rotation in 0..64 {
                assert_eq!(rotate64(value, rotation), value.rotate_right(rotation as u32));
            }
        }
        for value in [0u32, 1, 0x8000_0001, u32::MAX, 0x1234_5678] {
            for rotation in 0..32 {
                assert_eq!(rotate32(value, rotation), value.rotate_right(rotation));
            }
        }
    }

    #[test]
    fn zero_rotation_is_identity() {
        assert_eq!(rotate64(0x0123_4567_89ab_cdef, 0), 0x0123_4567_89ab_cdef);
        assert_eq!(rotate32(0x89ab_cdef, 0), 0x89ab_cdef);
    }
}
