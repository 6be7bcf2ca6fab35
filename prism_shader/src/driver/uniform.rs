/// Uniform values and their kinds

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

/// Value uploaded to a shader uniform
///
/// Vectors and matrices use `glam` types. Matrices are column-major, as
/// expected by the driver (no transpose on upload).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `bool` (uploaded as an int, 0 or 1)
    Bool(bool),
    /// `int`
    Int(i32),
    /// `float`
    Float(f32),
    /// `vec2`
    Vec2(Vec2),
    /// `vec3`
    Vec3(Vec3),
    /// `vec4`
    Vec4(Vec4),
    /// `mat2`
    Mat2(Mat2),
    /// `mat3`
    Mat3(Mat3),
    /// `mat4`
    Mat4(Mat4),
}

/// Payload-free discriminant of `UniformValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Bool,
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl UniformKind {
    /// Number of scalar components
    pub fn component_count(&self) -> usize {
        match self {
            UniformKind::Bool | UniformKind::Int | UniformKind::Float => 1,
            UniformKind::Vec2 => 2,
            UniformKind::Vec3 => 3,
            UniformKind::Vec4 | UniformKind::Mat2 => 4,
            UniformKind::Mat3 => 9,
            UniformKind::Mat4 => 16,
        }
    }

    /// Whether the driver stores this kind as integers
    pub fn is_integer(&self) -> bool {
        matches!(self, UniformKind::Bool | UniformKind::Int)
    }

    /// GLSL type keyword
    pub fn glsl_name(&self) -> &'static str {
        match self {
            UniformKind::Bool => "bool",
            UniformKind::Int => "int",
            UniformKind::Float => "float",
            UniformKind::Vec2 => "vec2",
            UniformKind::Vec3 => "vec3",
            UniformKind::Vec4 => "vec4",
            UniformKind::Mat2 => "mat2",
            UniformKind::Mat3 => "mat3",
            UniformKind::Mat4 => "mat4",
        }
    }

    /// Parse a GLSL type keyword (only the kinds above)
    pub fn from_glsl_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(UniformKind::Bool),
            "int" => Some(UniformKind::Int),
            "float" => Some(UniformKind::Float),
            "vec2" => Some(UniformKind::Vec2),
            "vec3" => Some(UniformKind::Vec3),
            "vec4" => Some(UniformKind::Vec4),
            "mat2" => Some(UniformKind::Mat2),
            "mat3" => Some(UniformKind::Mat3),
            "mat4" => Some(UniformKind::Mat4),
            _ => None,
        }
    }
}

impl UniformValue {
    /// Kind of this value
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Bool(_) => UniformKind::Bool,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Mat2(_) => UniformKind::Mat2,
            UniformValue::Mat3(_) => UniformKind::Mat3,
            UniformValue::Mat4(_) => UniformKind::Mat4,
        }
    }

    /// Rebuild a float-based value from driver read-back components
    ///
    /// Returns `None` for integer kinds or a short slice.
    pub fn from_f32_components(kind: UniformKind, c: &[f32]) -> Option<Self> {
        if kind.is_integer() || c.len() < kind.component_count() {
            return None;
        }
        Some(match kind {
            UniformKind::Float => UniformValue::Float(c[0]),
            UniformKind::Vec2 => UniformValue::Vec2(Vec2::from_slice(c)),
            UniformKind::Vec3 => UniformValue::Vec3(Vec3::from_slice(c)),
            UniformKind::Vec4 => UniformValue::Vec4(Vec4::from_slice(c)),
            UniformKind::Mat2 => UniformValue::Mat2(Mat2::from_cols_slice(c)),
            UniformKind::Mat3 => UniformValue::Mat3(Mat3::from_cols_slice(c)),
            UniformKind::Mat4 => UniformValue::Mat4(Mat4::from_cols_slice(c)),
            UniformKind::Bool | UniformKind::Int => return None,
        })
    }

    /// Rebuild an integer-based value from driver read-back components
    pub fn from_i32_components(kind: UniformKind, c: &[i32]) -> Option<Self> {
        match (kind, c.first()) {
            (UniformKind::Bool, Some(v)) => Some(UniformValue::Bool(*v != 0)),
            (UniformKind::Int, Some(v)) => Some(UniformValue::Int(*v)),
            _ => None,
        }
    }
}

// ===== CONVERSIONS =====

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        UniformValue::Bool(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<Mat2> for UniformValue {
    fn from(v: Mat2) -> Self {
        UniformValue::Mat2(v)
    }
}

impl From<Mat3> for UniformValue {
    fn from(v: Mat3) -> Self {
        UniformValue::Mat3(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        UniformValue::Mat4(v)
    }
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;
