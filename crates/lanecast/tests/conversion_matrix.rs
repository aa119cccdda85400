//! Lanewise conversion matrix
//!
//! Every (source type, target type) pair over every (source shape, target
//! shape) pair, including the platform max shape, checked against the scalar
//! oracle on 1024-lane fixtures. Results must match bit for bit, NaN payloads
//! included.

use lanecast::{Lane, Species, Vector, VectorShape};

#[cfg(test)]
mod test_utils;

#[cfg(test)]
use test_utils::*;

/// Check convert, convert_shape, cast_shape and every part for one type pair
fn check_pair<S: Lane, T: Lane>() {
    let data = fixture::<S>();

    for src_shape in VectorShape::all() {
        let src_species = Species::<S>::of(src_shape);
        let in_lanes = src_species.lane_count();

        for dst_shape in VectorShape::all() {
            let dst_species = Species::<T>::of(dst_shape);
            let limit = src_species.part_limit(dst_species, true);

            for offset in (0..=FIXTURE_LEN - in_lanes).step_by(in_lanes) {
                let src = Vector::from_slice_at(src_species, &data, offset);
                let context = format!(
                    "{} {} -> {} {} at offset {}",
                    S::LANE_TYPE,
                    src_shape,
                    T::LANE_TYPE,
                    dst_shape,
                    offset
                );

                // Lane count is preserved
                let converted = src.convert::<T>();
                let expected: Vec<T> = src
                    .as_slice()
                    .iter()
                    .map(|&x| ref_cast::<S, T>(x))
                    .collect();
                assert_eq!(converted.len(), in_lanes, "{}", context);
                assert_bits_eq(converted.as_slice(), &expected, &context);

                let shaped = src.convert_shape(dst_species);
                let cast = src.cast_shape(dst_species);
                assert_eq!(shaped.len(), dst_species.lane_count(), "{}", context);
                assert!(shaped.bitwise_eq(&cast), "{}: cast_shape differs", context);
                assert_bits_eq(
                    shaped.as_slice(),
                    &ref_convert_shape(src.as_slice(), dst_species, 0),
                    &context,
                );

                for part in part_range(limit) {
                    let result = src
                        .convert_shape_part(dst_species, part)
                        .unwrap_or_else(|err| panic!("{}: part {}: {}", context, part, err));
                    assert_bits_eq(
                        result.as_slice(),
                        &ref_convert_shape(src.as_slice(), dst_species, part),
                        &format!("{} part {}", context, part),
                    );
                }

                let parts = part_range(limit);
                assert!(src
                    .convert_shape_part(dst_species, *parts.end() + 1)
                    .is_err());
                assert!(src
                    .convert_shape_part(dst_species, *parts.start() - 1)
                    .is_err());
            }
        }
    }
}

#[test]
fn test_identity_keeps_every_nan_payload() {
    let quiet = [0x7FC0_0000u32, 0x7FC0_1234, 0xFFC0_0001];
    let signaling = [0x7FA0_0001u32, 0x7F80_0001, 0xFF80_BEEF];
    let lanes: Vec<f32> = quiet.iter().chain(&signaling).map(|&b| f32::from_bits(b)).collect();
    let src = Vector::from_lanes(&[lanes.as_slice(), &lanes[..2]].concat());

    assert_bits_eq(src.convert::<f32>().as_slice(), src.as_slice(), "convert");
    let species = Species::<f32>::of(VectorShape::S256);
    assert_bits_eq(
        src.convert_shape(species).as_slice(),
        src.as_slice(),
        "convert_shape",
    );

    let doubles = Vector::from_lanes(&[
        f64::from_bits(0x7FF4_0000_DEAD_BEEF),
        f64::from_bits(0xFFF8_0000_0000_0001),
    ]);
    let placed = doubles
        .convert_shape_part(Species::<f64>::of(VectorShape::S512), -2)
        .unwrap();
    assert_eq!(placed[4].to_bits(), 0x7FF4_0000_DEAD_BEEF);
    assert_eq!(placed[5].to_bits(), 0xFFF8_0000_0000_0001);
}

#[test]
#[should_panic(expected = "bits differ")]
fn test_distinct_nan_payloads_do_not_match() {
    let canonical = Vector::from_lanes(&[f32::NAN]);
    let payload = Vector::from_lanes(&[f32::from_bits(0x7FA0_0001)]);
    assert_bits_eq(payload.convert::<f32>().as_slice(), canonical.as_slice(), "payload");
}

macro_rules! conversion_matrix {
    ($($name:ident: $s:ty => $t:ty;)*) => {
        $(
            #[test]
            fn $name() {
                check_pair::<$s, $t>();
            }
        )*
    };
}

conversion_matrix! {
    i8_to_i8: i8 => i8;
    i8_to_i16: i8 => i16;
    i8_to_i32: i8 => i32;
    i8_to_i64: i8 => i64;
    i8_to_f32: i8 => f32;
    i8_to_f64: i8 => f64;
    i16_to_i8: i16 => i8;
    i16_to_i16: i16 => i16;
    i16_to_i32: i16 => i32;
    i16_to_i64: i16 => i64;
    i16_to_f32: i16 => f32;
    i16_to_f64: i16 => f64;
    i32_to_i8: i32 => i8;
    i32_to_i16: i32 => i16;
    i32_to_i32: i32 => i32;
    i32_to_i64: i32 => i64;
    i32_to_f32: i32 => f32;
    i32_to_f64: i32 => f64;
    i64_to_i8: i64 => i8;
    i64_to_i16: i64 => i16;
    i64_to_i32: i64 => i32;
    i64_to_i64: i64 => i64;
    i64_to_f32: i64 => f32;
    i64_to_f64: i64 => f64;
    f32_to_i8: f32 => i8;
    f32_to_i16: f32 => i16;
    f32_to_i32: f32 => i32;
    f32_to_i64: f32 => i64;
    f32_to_f32: f32 => f32;
    f32_to_f64: f32 => f64;
    f64_to_i8: f64 => i8;
    f64_to_i16: f64 => i16;
    f64_to_i32: f64 => i32;
    f64_to_i64: f64 => i64;
    f64_to_f32: f64 => f32;
    f64_to_f64: f64 => f64;
}
