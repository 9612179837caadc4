//! Tagged uniform values.
//!
//! A [`Uniform`] carries one value of any type OpenGL can upload through
//! `glProgramUniform*`: `f32`, `i32`, `u32` and `f64` vectors of one to four
//! components, and `f32`/`f64` matrices from 2×2 to 4×4.
//!
//! Matrices are column-major. `Mat2x3` has two columns of three rows, the same
//! naming GLSL uses, so its payload holds six elements.

/// Element type of a uniform payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    F32,
    I32,
    U32,
    F64,
}

/// A single uniform value, tagged by type and shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    F32(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),

    I32(i32),
    IVec2([i32; 2]),
    IVec3([i32; 3]),
    IVec4([i32; 4]),

    U32(u32),
    UVec2([u32; 2]),
    UVec3([u32; 3]),
    UVec4([u32; 4]),

    F64(f64),
    DVec2([f64; 2]),
    DVec3([f64; 3]),
    DVec4([f64; 4]),

    Mat2([f32; 4]),
    Mat2x3([f32; 6]),
    Mat2x4([f32; 8]),
    Mat3x2([f32; 6]),
    Mat3([f32; 9]),
    Mat3x4([f32; 12]),
    Mat4x2([f32; 8]),
    Mat4x3([f32; 12]),
    Mat4([f32; 16]),

    DMat2([f64; 4]),
    DMat2x3([f64; 6]),
    DMat2x4([f64; 8]),
    DMat3x2([f64; 6]),
    DMat3([f64; 9]),
    DMat3x4([f64; 12]),
    DMat4x2([f64; 8]),
    DMat4x3([f64; 12]),
    DMat4([f64; 16]),
}

impl Uniform {
    /// The 4×4 identity matrix.
    pub const IDENTITY_MAT4: Uniform = Uniform::Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Element type of the payload.
    pub fn scalar_type(&self) -> ScalarType {
        use Uniform::*;
        match self {
            F32(_) | Vec2(_) | Vec3(_) | Vec4(_) => ScalarType::F32,
            Mat2(_) | Mat2x3(_) | Mat2x4(_) | Mat3x2(_) | Mat3(_) | Mat3x4(_) | Mat4x2(_)
            | Mat4x3(_) | Mat4(_) => ScalarType::F32,
            I32(_) | IVec2(_) | IVec3(_) | IVec4(_) => ScalarType::I32,
            U32(_) | UVec2(_) | UVec3(_) | UVec4(_) => ScalarType::U32,
            F64(_) | DVec2(_) | DVec3(_) | DVec4(_) => ScalarType::F64,
            DMat2(_) | DMat2x3(_) | DMat2x4(_) | DMat3x2(_) | DMat3(_) | DMat3x4(_)
            | DMat4x2(_) | DMat4x3(_) | DMat4(_) => ScalarType::F64,
        }
    }

    /// `(columns, rows)` of the value. Vectors are a single column.
    pub fn shape(&self) -> (usize, usize) {
        use Uniform::*;
        match self {
            F32(_) | I32(_) | U32(_) | F64(_) => (1, 1),
            Vec2(_) | IVec2(_) | UVec2(_) | DVec2(_) => (1, 2),
            Vec3(_) | IVec3(_) | UVec3(_) | DVec3(_) => (1, 3),
            Vec4(_) | IVec4(_) | UVec4(_) | DVec4(_) => (1, 4),
            Mat2(_) | DMat2(_) => (2, 2),
            Mat2x3(_) | DMat2x3(_) => (2, 3),
            Mat2x4(_) | DMat2x4(_) => (2, 4),
            Mat3x2(_) | DMat3x2(_) => (3, 2),
            Mat3(_) | DMat3(_) => (3, 3),
            Mat3x4(_) | DMat3x4(_) => (3, 4),
            Mat4x2(_) | DMat4x2(_) => (4, 2),
            Mat4x3(_) | DMat4x3(_) => (4, 3),
            Mat4(_) | DMat4(_) => (4, 4),
        }
    }

    /// Whether the value is a matrix (more than one column).
    pub fn is_matrix(&self) -> bool {
        self.shape().0 > 1
    }

    /// Number of scalar elements in the payload.
    pub fn len(&self) -> usize {
        let (columns, rows) = self.shape();
        columns * rows
    }

    /// Always `false`; every uniform carries at least one element.
    pub fn is_empty(&self) -> bool {
        false
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Uniform {
                fn from(value: $ty) -> Self {
                    Uniform::$variant(value)
                }
            }
        )*
    };
}

// Square and vector shapes only; non-square matrices share array lengths with
// other variants and must be built explicitly.
impl_from! {
    f32 => F32,
    [f32; 2] => Vec2,
    [f32; 3] => Vec3,
    [f32; 4] => Vec4,
    i32 => I32,
    [i32; 2] => IVec2,
    [i32; 3] => IVec3,
    [i32; 4] => IVec4,
    u32 => U32,
    [u32; 2] => UVec2,
    [u32; 3] => UVec3,
    [u32; 4] => UVec4,
    f64 => F64,
    [f64; 2] => DVec2,
    [f64; 3] => DVec3,
    [f64; 4] => DVec4,
    [f32; 9] => Mat3,
    [f32; 16] => Mat4,
    [f64; 9] => DMat3,
    [f64; 16] => DMat4,
}

impl From<[[f32; 4]; 4]> for Uniform {
    fn from(columns: [[f32; 4]; 4]) -> Self {
        let mut flat = [0.0; 16];
        for (column, values) in columns.iter().enumerate() {
            flat[column * 4..column * 4 + 4].copy_from_slice(values);
        }
        Uniform::Mat4(flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_and_vectors_convert_to_matching_variant() {
        assert_eq!(Uniform::from(1.5f32), Uniform::F32(1.5));
        assert_eq!(Uniform::from([1i32, 2, 3]), Uniform::IVec3([1, 2, 3]));
        assert_eq!(Uniform::from([1u32, 2]), Uniform::UVec2([1, 2]));
        assert_eq!(Uniform::from([0.5f64; 4]), Uniform::DVec4([0.5; 4]));
    }

    #[test]
    fn shape_and_len_follow_glsl_column_row_naming() {
        let m = Uniform::Mat2x3([0.0; 6]);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.len(), 6);
        assert!(m.is_matrix());

        let v = Uniform::Vec4([0.0; 4]);
        assert_eq!(v.shape(), (1, 4));
        assert!(!v.is_matrix());
    }

    #[test]
    fn scalar_type_covers_all_element_kinds() {
        assert_eq!(Uniform::Mat4x3([0.0; 12]).scalar_type(), ScalarType::F32);
        assert_eq!(Uniform::DMat3x4([0.0; 12]).scalar_type(), ScalarType::F64);
        assert_eq!(Uniform::UVec3([0; 3]).scalar_type(), ScalarType::U32);
        assert_eq!(Uniform::I32(7).scalar_type(), ScalarType::I32);
    }

    #[test]
    fn nested_columns_flatten_column_major() {
        let u = Uniform::from([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        match u {
            Uniform::Mat4(flat) => {
                assert_eq!(flat[0], 1.0);
                assert_eq!(flat[4], 5.0);
                assert_eq!(flat[15], 16.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn identity_has_ones_on_the_diagonal() {
        let Uniform::Mat4(m) = Uniform::IDENTITY_MAT4 else {
            panic!("identity is a mat4");
        };
        for i in 0..4 {
            assert_eq!(m[i * 4 + i], 1.0);
        }
        assert_eq!(m.iter().sum::<f32>(), 4.0);
    }
}
