//! Point arithmetic implementations for the two supported law families.

use crate::{Formulas, ProjectivePoint};
use subtle::Choice;

mod sealed {
    use crate::ProjectivePoint;
    use subtle::Choice;

    /// Elliptic point arithmetic implementation
    ///
    /// Provides implementation of point arithmetic (point addition, point doubling).
    pub trait PointArithmetic {
        /// Returns `lhs + rhs`, together with a flag set when the result has
        /// both `Y = 0` and `Z = 0`, i.e. when the inputs formed an
        /// exceptional pair.
        fn add<'c>(lhs: &ProjectivePoint<'c>, rhs: &ProjectivePoint<'c>)
        -> (ProjectivePoint<'c>, Choice);

        /// Returns `point + point`
        fn double<'c>(point: &ProjectivePoint<'c>) -> ProjectivePoint<'c>;
    }
}

/// Allow crate-local visibility
pub(crate) use sealed::PointArithmetic;

/// Complete formulas for curves with any `a`.
pub(crate) struct CompleteFormulas;

impl PointArithmetic for CompleteFormulas {
    /// Implements complete addition for any curve
    ///
    /// Implements the complete addition formula from [Renes-Costello-Batina 2015]
    /// (Algorithm 1). The comments after each line indicate which algorithm steps
    /// are being performed.
    ///
    /// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
    fn add<'c>(
        lhs: &ProjectivePoint<'c>,
        rhs: &ProjectivePoint<'c>,
    ) -> (ProjectivePoint<'c>, Choice) {
        let curve = lhs.curve();
        let a = curve.a();
        let b3 = curve.b3();

        let t0 = lhs.x * rhs.x; // 1
        let t1 = lhs.y * rhs.y; // 2
        let t2 = lhs.z * rhs.z; // 3
        let t3 = lhs.x + lhs.y; // 4
        let t4 = rhs.x + rhs.y; // 5
        let t3 = t3 * t4; // 6
        let t4 = t0 + t1; // 7
        let t3 = t3 - t4; // 8
        let t4 = lhs.x + lhs.z; // 9
        let t5 = rhs.x + rhs.z; // 10
        let t4 = t4 * t5; // 11
        let t5 = t0 + t2; // 12
        let t4 = t4 - t5; // 13
        let t5 = lhs.y + lhs.z; // 14
        let x3 = rhs.y + rhs.z; // 15
        let t5 = t5 * x3; // 16
        let x3 = t1 + t2; // 17
        let t5 = t5 - x3; // 18
        let z3 = a * t4; // 19
        let x3 = b3 * t2; // 20
        let z3 = x3 + z3; // 21
        let x3 = t1 - z3; // 22
        let z3 = t1 + z3; // 23
        let y3 = x3 * z3; // 24
        let t1 = t0 + t0; // 25
        let t1 = t1 + t0; // 26
        let t2 = a * t2; // 27
        let t4 = b3 * t4; // 28
        let t1 = t1 + t2; // 29
        let t2 = t0 - t2; // 30
        let t2 = a * t2; // 31
        let t4 = t4 + t2; // 32
        let t0 = t1 * t4; // 33
        let y3 = y3 + t0; // 34
        let t0 = t5 * t4; // 35
        let x3 = t3 * x3; // 36
        let x3 = x3 - t0; // 37
        let t0 = t3 * t1; // 38
        let z3 = t5 * z3; // 39
        let z3 = z3 + t0; // 40

        let degenerate = y3.is_zero() & z3.is_zero();
        (ProjectivePoint::from_raw(curve, x3, y3, z3), degenerate)
    }

    /// Implements point doubling for curves with any `a`
    ///
    /// Implements the exception-free point doubling formula from [Renes-Costello-Batina 2015]
    /// (Algorithm 3). The comments after each line indicate which algorithm
    /// steps are being performed.
    ///
    /// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
    fn double<'c>(point: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        let curve = point.curve();
        let a = curve.a();
        let b3 = curve.b3();

        let t0 = point.x * point.x; // 1
        let t1 = point.y * point.y; // 2
        let t2 = point.z * point.z; // 3
        let t3 = point.x * point.y; // 4
        let t3 = t3 + t3; // 5
        let z3 = point.x * point.z; // 6
        let z3 = z3 + z3; // 7
        let x3 = a * z3; // 8
        let y3 = b3 * t2; // 9
        let y3 = x3 + y3; // 10
        let x3 = t1 - y3; // 11
        let y3 = t1 + y3; // 12
        let y3 = x3 * y3; // 13
        let x3 = t3 * x3; // 14
        let z3 = b3 * z3; // 15
        let t2 = a * t2; // 16
        let t3 = t0 - t2; // 17
        let t3 = a * t3; // 18
        let t3 = t3 + z3; // 19
        let z3 = t0 + t0; // 20
        let t0 = z3 + t0; // 21
        let t0 = t0 + t2; // 22
        let t0 = t0 * t3; // 23
        let y3 = y3 + t0; // 24
        let t2 = point.y * point.z; // 25
        let t2 = t2 + t2; // 26
        let t0 = t2 * t3; // 27
        let x3 = x3 - t0; // 28
        let z3 = t2 * t1; // 29
        let z3 = z3 + z3; // 30
        let z3 = z3 + z3; // 31

        ProjectivePoint::from_raw(curve, x3, y3, z3)
    }
}

/// Incomplete formulas for curves with any `a`.
///
/// The trait methods are the checked entry points: they branch on the
/// identity and on equal or opposite operands before reaching the
/// unchecked formulas.
pub(crate) struct IncompleteFormulas;

impl IncompleteFormulas {
    /// Implements addition of distinct, non-opposite, non-identity points
    ///
    /// `add-1998-cmo-2` from the Explicit-Formulas Database.
    fn add_unchecked<'c>(lhs: &ProjectivePoint<'c>, rhs: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        let y1z2 = lhs.y * rhs.z;
        let x1z2 = lhs.x * rhs.z;
        let z1z2 = lhs.z * rhs.z;
        let u = rhs.y * lhs.z - y1z2;
        let uu = u.square();
        let v = rhs.x * lhs.z - x1z2;
        let vv = v.square();
        let vvv = v * vv;
        let r = vv * x1z2;
        let a = uu * z1z2 - vvv - r.double();

        let x3 = v * a;
        let y3 = u * (r - a) - vvv * y1z2;
        let z3 = vvv * z1z2;

        ProjectivePoint::from_raw(lhs.curve(), x3, y3, z3)
    }

    /// Implements doubling of a non-identity point
    ///
    /// `dbl-2007-bl` from the Explicit-Formulas Database.
    fn double_unchecked<'c>(point: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        let curve = point.curve();

        let xx = point.x.square();
        let zz = point.z.square();
        let w = curve.a() * zz + xx.double() + xx;
        let s = (point.y * point.z).double();
        let ss = s.square();
        let sss = s * ss;
        let r = point.y * s;
        let rr = r.square();
        let b = (point.x + r).square() - xx - rr;
        let h = w.square() - b.double();

        let x3 = h * s;
        let y3 = w * (b - h) - rr.double();
        let z3 = sss;

        ProjectivePoint::from_raw(curve, x3, y3, z3)
    }
}

impl PointArithmetic for IncompleteFormulas {
    fn add<'c>(
        lhs: &ProjectivePoint<'c>,
        rhs: &ProjectivePoint<'c>,
    ) -> (ProjectivePoint<'c>, Choice) {
        let sum = if bool::from(lhs.z.is_zero()) {
            *rhs
        } else if bool::from(rhs.z.is_zero()) {
            *lhs
        } else if bool::from(lhs.ct_equals_or_opposite(rhs)) {
            if bool::from(lhs.ct_equals(rhs)) {
                Self::double_unchecked(lhs)
            } else {
                ProjectivePoint::identity(lhs.curve())
            }
        } else {
            Self::add_unchecked(lhs, rhs)
        };

        (sum, Choice::from(0))
    }

    fn double<'c>(point: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        if bool::from(point.z.is_zero()) {
            ProjectivePoint::identity(point.curve())
        } else {
            Self::double_unchecked(point)
        }
    }
}

impl Formulas {
    /// Returns `lhs + rhs` with the exceptional pair flag.
    ///
    /// A result with `Z = 0` is replaced by the canonical identity `(0, 1, 0)`.
    pub(crate) fn add<'c>(
        self,
        lhs: &ProjectivePoint<'c>,
        rhs: &ProjectivePoint<'c>,
    ) -> (ProjectivePoint<'c>, Choice) {
        let (sum, degenerate) = match self {
            Formulas::Complete => CompleteFormulas::add(lhs, rhs),
            Formulas::Incomplete => IncompleteFormulas::add(lhs, rhs),
        };
        (sum.canonicalize_identity(), degenerate)
    }

    /// Returns `point + point`.
    pub(crate) fn double<'c>(self, point: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        let doubled = match self {
            Formulas::Complete => CompleteFormulas::double(point),
            Formulas::Incomplete => IncompleteFormulas::double(point),
        };
        doubled.canonicalize_identity()
    }

    /// Doubling step of the scalar multiplication loops.
    ///
    /// Complete formulas double through the addition law so that every step
    /// of the loop runs the same sequence of field operations.
    pub(crate) fn ladder_double<'c>(self, point: &ProjectivePoint<'c>) -> (ProjectivePoint<'c>, Choice) {
        match self {
            Formulas::Complete => self.add(point, point),
            Formulas::Incomplete => (self.double(point), Choice::from(0)),
        }
    }
}
