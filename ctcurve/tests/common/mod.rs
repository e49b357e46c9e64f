//! Curves and points shared by the integration tests.

#![allow(dead_code)]

use ctcurve::{
    BigUint, Curve, CurveConfig, FieldElement, Formulas, PrimeField, ProjectivePoint,
    ScalarMulAlgorithm,
};
use hex_literal::hex;
use rand::{SeedableRng, rngs::StdRng};

pub const P256_P: [u8; 32] = hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
pub const P256_A: [u8; 32] = hex!("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc");
pub const P256_B: [u8; 32] = hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
pub const P256_N: [u8; 32] = hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");

pub const P256_G: [[u8; 32]; 2] = [
    hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
    hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
];
pub const P256_2G: [[u8; 32]; 2] = [
    hex!("7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978"),
    hex!("07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1"),
];
pub const P256_3G: [[u8; 32]; 2] = [
    hex!("5ecbe4d1a6330a44c8f7ef951d4bf165e6c6b721efada985fb41661bc6e7fd6c"),
    hex!("8734640c4998ff7e374b06ce1a64a2ecd82ab036384fb83d9a79b127a27d5032"),
];
pub const P256_5G: [[u8; 32]; 2] = [
    hex!("51590b7a515140d2d784c85608668fdfef8c82fd1f5be52421554a0dc3d033ed"),
    hex!("e0c17da8904a727d8ae1bf36bf8a79260d012f00d4d80888d1d0bb44fda16da4"),
];
pub const P256_N_MINUS_1_G: [[u8; 32]; 2] = [
    hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
    hex!("b01cbd1c01e58065711814b583f061e9d431cca994cea1313449bf97c840ae0a"),
];

/// Scalar `k` and the affine coordinates of `[k] G` on P-256.
pub const P256_K: [u8; 32] = hex!("c51e4753afdec1e6b6c6a5b992f43f8dd0c7a8933072708b6522468b2ffb06fd");
pub const P256_KG: [[u8; 32]; 2] = [
    hex!("942c9f408ead9d82d34a1b9a6a827ebe3e2ddf782b448d23be1b6143988ccef4"),
    hex!("8c9eaf6c0d14d992fc63bad3e2496be2eee61cb5b97f65f428ca94a5d0ee19a1"),
];

/// Every combination of law family and multiplication algorithm.
pub const CONFIGS: [CurveConfig; 6] = [
    config(Formulas::Complete, ScalarMulAlgorithm::DoubleAndAddAlways),
    config(Formulas::Complete, ScalarMulAlgorithm::DoubleAndAddAlwaysSmallStack),
    config(Formulas::Complete, ScalarMulAlgorithm::MontgomeryLadder),
    config(Formulas::Incomplete, ScalarMulAlgorithm::DoubleAndAddAlways),
    config(Formulas::Incomplete, ScalarMulAlgorithm::DoubleAndAddAlwaysSmallStack),
    config(Formulas::Incomplete, ScalarMulAlgorithm::MontgomeryLadder),
];

const fn config(formulas: Formulas, algorithm: ScalarMulAlgorithm) -> CurveConfig {
    CurveConfig {
        formulas,
        algorithm,
    }
}

pub fn p256_field() -> PrimeField {
    PrimeField::from_be_bytes(&P256_P).unwrap()
}

pub fn p256_curve(field: &PrimeField, config: CurveConfig) -> Curve<'_> {
    Curve::from_be_bytes(field, &P256_A, &P256_B, &P256_N)
        .unwrap()
        .with_config(config)
}

pub fn p256_order() -> BigUint {
    BigUint::from_bytes_be(&P256_N)
}

/// Affine coordinates on P-256 as a projective point with `Z = 1`.
pub fn p256_point<'c>(curve: &'c Curve<'c>, coordinates: &[[u8; 32]; 2]) -> ProjectivePoint<'c> {
    ProjectivePoint::from_bytes(curve, &coordinates.concat()).unwrap()
}

/// The curve `y² = x³ + x + 1` over GF(23), a cyclic group of order 28.
pub fn toy_field() -> PrimeField {
    PrimeField::new(&BigUint::from(23u32)).unwrap()
}

pub fn toy_curve(field: &PrimeField, config: CurveConfig) -> Curve<'_> {
    let one = FieldElement::one(field);
    Curve::new(field, one, one, BigUint::from(28u32))
        .unwrap()
        .with_config(config)
}

/// The same curve described by its subgroup of order 7 and cofactor 4.
pub fn toy_subgroup_curve(field: &PrimeField, config: CurveConfig) -> Curve<'_> {
    let one = FieldElement::one(field);
    Curve::new(field, one, one, BigUint::from(7u32))
        .unwrap()
        .with_cofactor(BigUint::from(4u32))
        .unwrap()
        .with_config(config)
}

pub fn toy_point<'c>(curve: &'c Curve<'c>, x: u64, y: u64) -> ProjectivePoint<'c> {
    let field = curve.field();
    let point = ProjectivePoint::from_coordinates(
        curve,
        FieldElement::from_u64(field, x),
        FieldElement::from_u64(field, y),
        FieldElement::one(field),
    )
    .unwrap();
    assert!(point.is_on_curve().unwrap());
    point
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}
