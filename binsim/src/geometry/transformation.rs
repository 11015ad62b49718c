use std::borrow::Borrow;
use std::ops::{Add, Mul};

use ordered_float::NotNan;

use crate::geometry::DTransformation;

#[derive(Clone, Debug, PartialEq)]
/// Proper rigid transformation in homogeneous matrix form:
/// a 2x2 rotation block with a 2x1 translation column.
pub struct Transformation {
    matrix: [[NotNan<f64>; 3]; 3],
}

impl Transformation {
    pub const fn empty() -> Self {
        Self {
            matrix: EMPTY_MATRIX,
        }
    }

    pub fn from_translation((tx, ty): (f64, f64)) -> Self {
        Self {
            matrix: transl_m((tx, ty)),
        }
    }

    pub fn from_rotation(angle: f64) -> Self {
        Self {
            matrix: rot_m(angle),
        }
    }

    /// Rotation around the origin, followed by a translation
    pub fn from_rotation_translation(angle: f64, (tx, ty): (f64, f64)) -> Self {
        Self {
            matrix: rot_transl_m(angle, (tx, ty)),
        }
    }

    pub fn from_dt(dt: &DTransformation) -> Self {
        Self::from_rotation_translation(dt.rotation(), dt.translation())
    }

    pub fn rotate(mut self, angle: f64) -> Self {
        self.matrix = dot_prod(&rot_m(angle), &self.matrix);
        self
    }

    pub fn translate(mut self, (tx, ty): (f64, f64)) -> Self {
        self.matrix = dot_prod(&transl_m((tx, ty)), &self.matrix);
        self
    }

    /// Applies `other` after `self`, resulting in `other ∘ self`
    pub fn transform(mut self, other: &Self) -> Self {
        self.matrix = dot_prod(&other.matrix, &self.matrix);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.matrix == EMPTY_MATRIX
    }

    pub fn matrix(&self) -> &[[NotNan<f64>; 3]; 3] {
        &self.matrix
    }

    /// The 2x2 rotation block
    pub fn rotation(&self) -> [[f64; 2]; 2] {
        let m = &self.matrix;
        [
            [m[0][0].into_inner(), m[0][1].into_inner()],
            [m[1][0].into_inner(), m[1][1].into_inner()],
        ]
    }

    /// The translation column
    pub fn translation(&self) -> (f64, f64) {
        (self.matrix[0][2].into_inner(), self.matrix[1][2].into_inner())
    }

    pub fn decompose(&self) -> DTransformation {
        let m = self.matrix();
        let angle = m[1][0].atan2(m[0][0].into_inner());
        DTransformation::new(angle, self.translation())
    }

    /// Element-wise comparison within an absolute tolerance
    pub fn almost_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.matrix
            .iter()
            .flatten()
            .zip(other.matrix.iter().flatten())
            .all(|(a, b)| (a.into_inner() - b.into_inner()).abs() <= tolerance)
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<T> for Transformation
where
    T: Borrow<DTransformation>,
{
    fn from(dt: T) -> Self {
        Self::from_dt(dt.borrow())
    }
}

const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
const _1: NotNan<f64> = unsafe { NotNan::new_unchecked(1.0) };

const EMPTY_MATRIX: [[NotNan<f64>; 3]; 3] = [[_1, _0, _0], [_0, _1, _0], [_0, _0, _1]];

fn rot_m(angle: f64) -> [[NotNan<f64>; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    let cos = NotNan::new(cos).expect("cos is NaN");
    let sin = NotNan::new(sin).expect("sin is NaN");

    [[cos, -sin, _0], [sin, cos, _0], [_0, _0, _1]]
}

fn transl_m((tx, ty): (f64, f64)) -> [[NotNan<f64>; 3]; 3] {
    let h = NotNan::new(tx).expect("tx is NaN");
    let k = NotNan::new(ty).expect("ty is NaN");

    [[_1, _0, h], [_0, _1, k], [_0, _0, _1]]
}

//rotation followed by translation
fn rot_transl_m(angle: f64, (tx, ty): (f64, f64)) -> [[NotNan<f64>; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    let cos = NotNan::new(cos).expect("cos is NaN");
    let sin = NotNan::new(sin).expect("sin is NaN");
    let h = NotNan::new(tx).expect("tx is NaN");
    let k = NotNan::new(ty).expect("ty is NaN");

    [[cos, -sin, h], [sin, cos, k], [_0, _0, _1]]
}

#[inline(always)]
fn dot_prod<T>(l: &[[T; 3]; 3], r: &[[T; 3]; 3]) -> [[T; 3]; 3]
where
    T: Add<Output = T> + Mul<Output = T> + Copy,
{
    let cell = |i: usize, j: usize| l[i][0] * r[0][j] + l[i][1] * r[1][j] + l[i][2] * r[2][j];
    [
        [cell(0, 0), cell(0, 1), cell(0, 2)],
        [cell(1, 0), cell(1, 1), cell(1, 2)],
        [cell(2, 0), cell(2, 1), cell(2, 2)],
    ]
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn transform_composes_right_to_left() {
        let t1 = Transformation::from_rotation(FRAC_PI_2);
        let t2 = Transformation::from_translation((3.0, -1.0));

        //rotate first, then translate
        let composed = t1.clone().transform(&t2);
        let expected = Transformation::from_rotation_translation(FRAC_PI_2, (3.0, -1.0));
        assert!(composed.almost_eq(&expected, 1e-12));

        //translate first, then rotate: translation gets rotated too
        let composed = t2.transform(&t1);
        assert!(composed.almost_eq(
            &Transformation::from_rotation_translation(FRAC_PI_2, (1.0, 3.0)),
            1e-12
        ));
    }

    #[test]
    fn decompose_round_trips_rotation_and_translation() {
        let t = Transformation::from_rotation_translation(0.7, (2.5, 4.0));
        let dt = t.decompose();
        assert!((dt.rotation() - 0.7).abs() < 1e-12);
        assert_eq!(dt.translation(), (2.5, 4.0));
        assert!(Transformation::from(dt).almost_eq(&t, 1e-12));
    }
}
