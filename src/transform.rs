/// A 4x4 transformation matrix stored in row-major order.
///
/// Points are column vectors, so `a.then(&b)` applies `b` first. Besides the
/// 2D operations the matrix carries a Y-axis rotation and a perspective term,
/// which is enough to project a flipping card and tell which side faces the
/// viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Matrix data in row-major order: [row0, row1, row2, row3]
    pub data: [f32; 16],
}

impl Transform {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, 0.0, // row 1
            0.0, 0.0, 1.0, 0.0, // row 2
            0.0, 0.0, 0.0, 1.0, // row 3
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, x, // row 0
                0.0, 1.0, 0.0, y, // row 1
                0.0, 0.0, 1.0, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Rotation in the screen plane (around Z), in degrees.
    pub fn rotate_degrees(angle_degrees: f32) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self {
            data: [
                cos, -sin, 0.0, 0.0, // row 0
                sin, cos, 0.0, 0.0, // row 1
                0.0, 0.0, 1.0, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Rotation around the vertical axis, in degrees.
    pub fn rotate_y_degrees(angle_degrees: f32) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self {
            data: [
                cos, 0.0, sin, 0.0, // row 0
                0.0, 1.0, 0.0, 0.0, // row 1
                -sin, 0.0, cos, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Perspective with the viewer `distance` units in front of the plane.
    pub fn perspective(distance: f32) -> Self {
        let mut data = Self::IDENTITY.data;
        if distance > 0.0 {
            data[14] = -1.0 / distance;
        }
        Self { data }
    }

    pub fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    pub fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            data: [
                sx, 0.0, 0.0, 0.0, // row 0
                0.0, sy, 0.0, 0.0, // row 1
                0.0, 0.0, 1.0, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Compose this transform with another: self * other
    /// Applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let a = &self.data;
        let b = &other.data;
        let mut result = [0.0f32; 16];

        for i in 0..4 {
            for j in 0..4 {
                result[i * 4 + j] = (0..4).map(|k| a[i * 4 + k] * b[k * 4 + j]).sum();
            }
        }

        Transform { data: result }
    }

    /// Apply this transform around `(cx, cy)` instead of the origin.
    pub fn about(&self, cx: f32, cy: f32) -> Transform {
        Transform::translate(cx, cy)
            .then(self)
            .then(&Transform::translate(-cx, -cy))
    }

    /// Transform a point in the z = 0 plane and project it back onto it.
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let d = &self.data;
        let px = d[0] * x + d[1] * y + d[3];
        let py = d[4] * x + d[5] * y + d[7];
        let w = d[12] * x + d[13] * y + d[15];
        if w.abs() < 1e-6 {
            return (px, py);
        }
        (px / w, py / w)
    }

    /// True when the plane's front side points away from the viewer after
    /// projection, judged by the winding of the rectangle's corners.
    pub fn is_back_facing(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        let (ax, ay) = self.transform_point(x, y);
        let (bx, by) = self.transform_point(x + width, y);
        let (cx, cy) = self.transform_point(x, y + height);
        let cross = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
        cross < 0.0
    }

    /// Get the rows of the matrix
    pub fn rows(&self) -> [[f32; 4]; 4] {
        [
            [self.data[0], self.data[1], self.data[2], self.data[3]],
            [self.data[4], self.data[5], self.data[6], self.data[7]],
            [self.data[8], self.data[9], self.data[10], self.data[11]],
            [self.data[12], self.data[13], self.data[14], self.data[15]],
        ]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
