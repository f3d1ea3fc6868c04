//! fixed-point numerical types

// shared between Fixed and F2Dot14
macro_rules! fixed_impl {
    ($name:ident, $bits:literal, $fract_bits:literal, $ty:ty, $raw:ty) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[doc = concat!(stringify!($bits), "-bit signed fixed point number with ", stringify!($fract_bits), " bits of fraction." )]
        pub struct $name($ty);
        impl $name {
            /// Minimum value.
            pub const MIN: Self = Self(<$ty>::MIN);

            /// Maximum value.
            pub const MAX: Self = Self(<$ty>::MAX);

            /// Representation of 0.0.
            pub const ZERO: Self = Self(0);

            /// Representation of 1.0.
            pub const ONE: Self = Self(1 << $fract_bits);

            const SCALE: f64 = (1u32 << $fract_bits) as f64;

            /// Creates a new fixed point value from the underlying bit representation.
            #[inline(always)]
            pub const fn from_bits(bits: $ty) -> Self {
                Self(bits)
            }

            /// Returns the underlying bit representation of the value.
            #[inline(always)]
            pub const fn to_bits(self) -> $ty {
                self.0
            }

            /// Creates a fixed point value from an integer.
            ///
            /// The integer part must fit in the available integer bits.
            pub const fn from_i32(int: i32) -> Self {
                Self((int << $fract_bits) as $ty)
            }

            /// Creates a fixed point value from an `f64`, failing if the value
            /// is not representable.
            ///
            /// The value is scaled and then rounded to the nearest integer,
            /// with ties rounded away from zero. Returns `None` for
            /// non-finite input and for values that round outside of the
            /// range [`MIN`](Self::MIN)..=[`MAX`](Self::MAX).
            pub fn checked_from_f64(x: f64) -> Option<Self> {
                let scaled = (x * Self::SCALE).round();
                if scaled.is_finite() && scaled >= <$ty>::MIN as f64 && scaled <= <$ty>::MAX as f64 {
                    Some(Self(scaled as $ty))
                } else {
                    None
                }
            }

            /// Creates a fixed point value from an `f64`.
            ///
            /// This operation is lossy; the float will be rounded to the nearest
            /// representable value, with ties rounded away from zero. Values
            /// outside of the representable range saturate.
            pub fn from_f64(x: f64) -> Self {
                // `as` saturates at the integer bounds and maps NaN to zero
                Self((x * Self::SCALE).round() as $ty)
            }

            /// Returns the value as an `f64`.
            ///
            /// This operation is lossless: all representable values can be
            /// round-tripped.
            pub fn to_f64(self) -> f64 {
                self.0 as f64 / Self::SCALE
            }

            /// The representation of this value as a big-endian byte array.
            #[inline]
            pub fn to_be_bytes(self) -> [u8; $bits / 8] {
                self.0.to_be_bytes()
            }
        }

        crate::newtype_scalar!($name, $raw);

        //hack: we can losslessly go to float, so use those fmt impls
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.to_f64().fmt(f)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.to_f64().fmt(f)
            }
        }
    };
}

fixed_impl!(F2Dot14, 16, 14, i16, [u8; 2]);
fixed_impl!(Fixed, 32, 16, i32, [u8; 4]);

#[cfg(test)]
mod tests {
    #![allow(overflowing_literals)] // we want to specify byte values directly
    use super::*;

    #[test]
    fn f2dot14_floats() {
        // Examples from https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types
        assert_eq!(F2Dot14(0x7fff), F2Dot14::from_f64(1.999939));
        assert_eq!(F2Dot14(0x7000), F2Dot14::from_f64(1.75));
        assert_eq!(F2Dot14(0x0001), F2Dot14::from_f64(0.0000610356));
        assert_eq!(F2Dot14(0x0000), F2Dot14::from_f64(0.0));
        assert_eq!(F2Dot14(0xffff), F2Dot14::from_f64(-0.000061));
        assert_eq!(F2Dot14(0x8000), F2Dot14::from_f64(-2.0));
    }

    #[test]
    fn roundtrip_f2dot14() {
        for i in i16::MIN..=i16::MAX {
            let val = F2Dot14(i);
            assert_eq!(Some(val), F2Dot14::checked_from_f64(val.to_f64()));
        }
    }

    #[test]
    fn lossy_f2dot14() {
        let val = F2Dot14::checked_from_f64(0.3).unwrap();
        assert_eq!(val.to_bits(), 0x1333);
        assert!((val.to_f64() - 0.2999878).abs() < 1e-6);
        assert_eq!(val.to_be_bytes(), [0x13, 0x33]);
    }

    #[test]
    fn f2dot14_ties_away_from_zero() {
        let half_step = 0.5 / 16384.0;
        assert_eq!(F2Dot14::from_f64(half_step).to_bits(), 1);
        assert_eq!(F2Dot14::from_f64(-half_step).to_bits(), -1);
        assert_eq!(F2Dot14::from_f64(3.0 * half_step).to_bits(), 2);
        assert_eq!(F2Dot14::from_f64(-3.0 * half_step).to_bits(), -2);
    }

    #[test]
    fn f2dot14_out_of_range() {
        assert_eq!(F2Dot14::checked_from_f64(2.0), None);
        assert_eq!(F2Dot14::checked_from_f64(-2.00004), None);
        assert_eq!(F2Dot14::checked_from_f64(f64::NAN), None);
        assert_eq!(F2Dot14::checked_from_f64(f64::INFINITY), None);
        // rounds up into range
        assert_eq!(F2Dot14::checked_from_f64(-2.00002), Some(F2Dot14::MIN));
        // saturating form clamps instead
        assert_eq!(F2Dot14::from_f64(5.0), F2Dot14::MAX);
    }

    #[test]
    fn fixed_floats() {
        assert_eq!(Fixed(0x7fff_0000), Fixed::from_f64(32767.));
        assert_eq!(Fixed(0x7000_0001), Fixed::from_f64(28672.00001525879));
        assert_eq!(Fixed(0x0001_0000), Fixed::from_f64(1.0));
        assert_eq!(Fixed(0x0000_0000), Fixed::from_f64(0.0));
        assert_eq!(
            Fixed(i32::from_be_bytes([0xff; 4])),
            Fixed::from_f64(-0.000015259)
        );
        assert_eq!(Fixed(0x7fff_ffff), Fixed::from_f64(32768.0));
        assert_eq!(Fixed::from_i32(400).to_f64(), 400.0);
    }

    #[test]
    fn display_as_float() {
        assert_eq!(F2Dot14::from_f64(-1.0).to_string(), "-1");
        assert_eq!(format!("{:?}", F2Dot14::from_f64(0.5)), "0.5");
    }
}
