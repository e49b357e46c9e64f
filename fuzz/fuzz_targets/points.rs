#![no_main]
// Targets: secp256r1 and a toy curve over GF(23)
use ctcurve::{
    BigUint, Curve, CurveConfig, Error, FieldElement, Formulas, PrimeField, ProjectivePoint,
};
use libfuzzer_sys::fuzz_target;

const P256_P: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
const P256_A: &str = "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc";
const P256_B: &str = "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b";
const P256_N: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";

fn uint(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
}

fn test_import(curve: &Curve<'_>, data: &[u8]) {
    let width = curve.field().byte_len();

    let Ok(point) = ProjectivePoint::from_bytes(curve, data) else {
        return;
    };

    // Accepted encodings are exactly the affine and projective sizes
    assert!(data.len() == 2 * width || data.len() == 3 * width);
    assert!(point.is_on_curve().unwrap());

    // Re-importing the export yields the same point
    let encoded = point.to_bytes().unwrap();
    assert_eq!(encoded.len(), 3 * width);
    let decoded = ProjectivePoint::from_bytes(curve, &encoded).unwrap();
    assert!(decoded.equals(&point).unwrap());

    if data.len() == 3 * width && !point.is_zero().unwrap() {
        assert_eq!(&encoded[..], data);
    }

    // Group laws on the imported point
    let doubled = point.double().unwrap();
    assert!(doubled.equals(&point.add(&point).unwrap()).unwrap());
    // P - P is exceptional for the complete law when P has order four
    match point.sub(&point) {
        Ok(zero) => assert!(zero.is_zero().unwrap()),
        Err(err) => {
            assert_eq!(err, Error::UnsoundResult);
            assert_eq!(curve.config().formulas, Formulas::Complete);
        }
    }
    assert!(point.to_unique().unwrap().equals(&point).unwrap());
}

fuzz_target!(|data: &[u8]| {
    let p256_field = PrimeField::new(&uint(P256_P)).unwrap();
    let toy_field = PrimeField::new(&BigUint::from(23u32)).unwrap();

    for formulas in [Formulas::Complete, Formulas::Incomplete] {
        let config = CurveConfig {
            formulas,
            ..Default::default()
        };

        let p256 = Curve::new(
            &p256_field,
            FieldElement::from_uint(&p256_field, &uint(P256_A)),
            FieldElement::from_uint(&p256_field, &uint(P256_B)),
            uint(P256_N),
        )
        .unwrap()
        .with_config(config);
        test_import(&p256, data);

        let toy = Curve::new(
            &toy_field,
            FieldElement::one(&toy_field),
            FieldElement::one(&toy_field),
            BigUint::from(28u32),
        )
        .unwrap()
        .with_config(config);
        test_import(&toy, data);
    }
});
