#![no_main]
// Targets: secp256r1 and a toy curve over GF(23), every multiplication algorithm
use ctcurve::{
    BigUint, Curve, CurveConfig, FieldElement, Formulas, PrimeField, ProjectivePoint,
    ScalarMulAlgorithm, Sensitivity,
};
use libfuzzer_sys::fuzz_target;
use chacha20::{ChaCha20Rng, rand_core::SeedableRng};

const P256_P: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
const P256_A: &str = "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc";
const P256_B: &str = "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b";
const P256_N: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";
const P256_GX: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
const P256_GY: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";

const ALGORITHMS: [ScalarMulAlgorithm; 3] = [
    ScalarMulAlgorithm::DoubleAndAddAlways,
    ScalarMulAlgorithm::DoubleAndAddAlwaysSmallStack,
    ScalarMulAlgorithm::MontgomeryLadder,
];

fn uint(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
}

fn test_mul(base: &ProjectivePoint<'_>, scalar: &BigUint, rng: &mut ChaCha20Rng) {
    let expected = base.mul_unprotected(scalar).unwrap();

    // Protected multiplication agrees with the plain double-and-add
    let result = base.mul(scalar, rng).unwrap();
    assert!(result.equals(&expected).unwrap());
    assert!(result.is_on_curve().unwrap());

    let blinded = base.mul_blinded(scalar, rng).unwrap();
    assert!(blinded.equals(&expected).unwrap());

    // Scalars act modulo the subgroup order
    let shifted = scalar + base.curve().order();
    assert!(base.mul(&shifted, rng).unwrap().equals(&expected).unwrap());

    // [k + 1] P = [k] P + P
    let next = base.mul(&(scalar + 1u32), rng).unwrap();
    assert!(next.equals(&expected.add(base).unwrap()).unwrap());

    assert!(base
        .check_order(base.curve().order(), Sensitivity::Sensitive, rng)
        .unwrap());
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }

    let mut rng = ChaCha20Rng::from_seed(data[0..32].try_into().unwrap());
    let scalar = BigUint::from_bytes_be(&data[32..]);

    let p256_field = PrimeField::new(&uint(P256_P)).unwrap();
    let toy_field = PrimeField::new(&BigUint::from(23u32)).unwrap();

    for algorithm in ALGORITHMS {
        for formulas in [Formulas::Complete, Formulas::Incomplete] {
            let config = CurveConfig {
                formulas,
                algorithm,
            };

            let p256 = Curve::new(
                &p256_field,
                FieldElement::from_uint(&p256_field, &uint(P256_A)),
                FieldElement::from_uint(&p256_field, &uint(P256_B)),
                uint(P256_N),
            )
            .unwrap()
            .with_config(config);
            let g = ProjectivePoint::from_coordinates(
                &p256,
                FieldElement::from_uint(&p256_field, &uint(P256_GX)),
                FieldElement::from_uint(&p256_field, &uint(P256_GY)),
                FieldElement::one(&p256_field),
            )
            .unwrap();
            test_mul(&g, &scalar, &mut rng);

            // (17, 3) generates the order-7 subgroup of y² = x³ + x + 1 over GF(23)
            let toy = Curve::new(
                &toy_field,
                FieldElement::one(&toy_field),
                FieldElement::one(&toy_field),
                BigUint::from(7u32),
            )
            .unwrap()
            .with_config(config);
            let p = ProjectivePoint::from_coordinates(
                &toy,
                FieldElement::from_u64(&toy_field, 17),
                FieldElement::from_u64(&toy_field, 3),
                FieldElement::one(&toy_field),
            )
            .unwrap();
            test_mul(&p, &scalar, &mut rng);
        }
    }
});
