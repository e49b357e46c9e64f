//! Point import/export tests.

mod common;

use common::*;
use ctcurve::{AffinePoint, CurveConfig, Error, ProjectivePoint};
use proptest::{collection::vec, prelude::*};

#[test]
fn p256_roundtrip() {
    let field = p256_field();
    let curve = p256_curve(&field, CurveConfig::default());
    let affine_bytes = P256_G.concat();

    let g = ProjectivePoint::from_bytes(&curve, &affine_bytes).unwrap();
    let projective_bytes = g.double().unwrap().to_bytes().unwrap();
    assert_eq!(projective_bytes.len(), 96);
    let g2 = ProjectivePoint::from_bytes(&curve, &projective_bytes).unwrap();
    assert_eq!(g2, p256_point(&curve, &P256_2G));
    assert_eq!(g2.to_bytes().unwrap(), projective_bytes);

    let affine = AffinePoint::from_bytes(&curve, &affine_bytes).unwrap();
    assert_eq!(affine.to_bytes().unwrap(), affine_bytes);
    assert_eq!(affine.to_projective().unwrap(), g);
    assert_eq!(g.to_affine().unwrap().to_bytes().unwrap(), affine_bytes);
}

#[test]
fn identity_encoding() {
    let field = p256_field();
    let curve = p256_curve(&field, CurveConfig::default());
    let identity = ProjectivePoint::identity(&curve);

    let bytes = identity.to_bytes().unwrap();
    let mut expected = [0u8; 96];
    expected[63] = 1;
    assert_eq!(bytes, expected.to_vec());
    assert!(ProjectivePoint::from_bytes(&curve, &bytes).unwrap().is_zero().unwrap());

    // any (0, Y, 0) with Y ≠ 0 decodes to the canonical identity
    let mut scaled = [0u8; 96];
    scaled[63] = 7;
    let decoded = ProjectivePoint::from_bytes(&curve, &scaled).unwrap();
    assert_eq!(decoded.to_bytes().unwrap(), expected.to_vec());
}

#[test]
fn malformed_buffers() {
    let field = p256_field();
    let curve = p256_curve(&field, CurveConfig::default());
    let affine_bytes = P256_G.concat();

    for len in [0, 1, 32, 63, 65, 95, 97, 128] {
        let buf = vec![0u8; len];
        assert_eq!(ProjectivePoint::from_bytes(&curve, &buf).unwrap_err(), Error::InvalidArgument);
    }
    assert_eq!(
        AffinePoint::from_bytes(&curve, &[0u8; 96]).unwrap_err(),
        Error::InvalidArgument
    );

    // off the curve
    let mut tweaked = affine_bytes.clone();
    tweaked[63] ^= 1;
    assert_eq!(ProjectivePoint::from_bytes(&curve, &tweaked).unwrap_err(), Error::InvalidArgument);
    assert_eq!(AffinePoint::from_bytes(&curve, &tweaked).unwrap_err(), Error::InvalidArgument);

    // all-zero triple
    assert_eq!(ProjectivePoint::from_bytes(&curve, &[0u8; 96]).unwrap_err(), Error::InvalidArgument);

    // Z = 0 with X ≠ 0
    let mut infinite = [0u8; 96];
    infinite[31] = 1;
    infinite[63] = 1;
    assert_eq!(ProjectivePoint::from_bytes(&curve, &infinite).unwrap_err(), Error::InvalidArgument);

    // coordinate equal to the modulus
    let mut unreduced = affine_bytes.clone();
    unreduced[..32].copy_from_slice(&P256_P);
    assert_eq!(ProjectivePoint::from_bytes(&curve, &unreduced).unwrap_err(), Error::InvalidArgument);
}

#[test]
fn export_requires_exact_length() {
    let field = p256_field();
    let curve = p256_curve(&field, CurveConfig::default());
    let g = p256_point(&curve, &P256_G);
    let affine = g.to_affine().unwrap();

    for len in [0, 64, 95, 97, 100] {
        let mut buf = vec![0u8; len];
        assert_eq!(g.write_bytes(&mut buf), Err(Error::InvalidArgument));
    }
    for len in [0, 32, 63, 65, 96] {
        let mut buf = vec![0u8; len];
        assert_eq!(affine.write_bytes(&mut buf), Err(Error::InvalidArgument));
    }

    let mut buf = [0u8; 96];
    g.write_bytes(&mut buf).unwrap();
    assert_eq!(&buf[..64], P256_G.concat().as_slice());
}

#[test]
fn export_requires_valid_point() {
    let field = p256_field();
    let curve = p256_curve(&field, CurveConfig::default());
    let one = ctcurve::FieldElement::one(&field);

    let off_curve = ProjectivePoint::from_coordinates(&curve, one, one, one).unwrap();
    assert_eq!(off_curve.to_bytes().unwrap_err(), Error::InvalidArgument);
    let off_curve = AffinePoint::new(&curve, one, one).unwrap();
    assert_eq!(off_curve.to_bytes().unwrap_err(), Error::InvalidArgument);

    let mut dead = p256_point(&curve, &P256_G);
    dead.uninit();
    assert_eq!(dead.to_bytes().unwrap_err(), Error::InvalidState);
}

#[test]
fn toy_exhaustive_import() {
    let field = toy_field();
    let curve = toy_curve(&field, CurveConfig::default());

    let mut affine = 0;
    for x in 0u8..=255 {
        for y in 0u8..=255 {
            if let Ok(point) = ProjectivePoint::from_bytes(&curve, &[x, y]) {
                assert!(point.is_on_curve().unwrap());
                assert!(!point.is_zero().unwrap());
                affine += 1;
            }
        }
    }
    // every point but the point at infinity
    assert_eq!(affine, 27);

    let mut projective = 0;
    for x in 0u8..23 {
        for y in 0u8..23 {
            for z in 0u8..23 {
                if let Ok(point) = ProjectivePoint::from_bytes(&curve, &[x, y, z]) {
                    assert!(point.is_on_curve().unwrap());
                    projective += 1;
                }
            }
        }
    }
    // 27 affine points with 22 representatives each, plus (0, Y, 0)
    assert_eq!(projective, 27 * 22 + 22);
}

proptest! {
    #[test]
    fn import_never_yields_off_curve_points(bytes in vec(any::<u8>(), 64..=96)) {
        let field = p256_field();
        let curve = p256_curve(&field, CurveConfig::default());
        if let Ok(point) = ProjectivePoint::from_bytes(&curve, &bytes) {
            prop_assert!(point.is_valid());
            prop_assert!(point.is_on_curve().unwrap());
        }
        if let Ok(point) = AffinePoint::from_bytes(&curve, &bytes) {
            prop_assert!(point.is_on_curve().unwrap());
        }
    }

    #[test]
    fn projective_roundtrip(k in any::<[u8; 32]>(), z in any::<[u8; 32]>()) {
        let field = p256_field();
        let curve = p256_curve(&field, CurveConfig::default());
        let p = p256_point(&curve, &P256_G)
            .mul_unprotected(&ctcurve::BigUint::from_bytes_be(&k))
            .unwrap();
        prop_assume!(!p.is_zero().unwrap());

        let lambda = ctcurve::FieldElement::from_uint(&field, &ctcurve::BigUint::from_bytes_be(&z));
        prop_assume!(!bool::from(lambda.is_zero()));
        let (x, y, w) = p.coordinates().unwrap();
        let scaled = ProjectivePoint::from_coordinates(&curve, x * lambda, y * lambda, w * lambda).unwrap();

        let decoded = ProjectivePoint::from_bytes(&curve, &scaled.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(decoded, p);
        let affine = p.to_affine().unwrap();
        prop_assert_eq!(AffinePoint::from_bytes(&curve, &affine.to_bytes().unwrap()).unwrap(), affine);
    }
}
