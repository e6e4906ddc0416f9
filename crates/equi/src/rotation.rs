/// Viewing angles in radians. No range is enforced; the values run free.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Roll,
    Pitch,
    Yaw,
}

pub type Mat3 = [[f32; 3]; 3];

impl Rotation {
    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Roll => self.roll,
            Axis::Pitch => self.pitch,
            Axis::Yaw => self.yaw,
        }
    }

    /// Adds `delta` to one axis, leaving the other two untouched.
    pub fn step(&mut self, axis: Axis, delta: f32) {
        match axis {
            Axis::Roll => self.roll += delta,
            Axis::Pitch => self.pitch += delta,
            Axis::Yaw => self.yaw += delta,
        }
    }

    /// `Rz(yaw) * Ry(pitch) * Rx(roll)` in a frame with x forward, y left, z up.
    ///
    /// Positive pitch tilts the view towards -z (down), positive yaw turns it towards +y (left).
    pub fn matrix(&self) -> Mat3 {
        let (sr, cr) = self.roll.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        let rx = [[1.0, 0.0, 0.0], [0.0, cr, -sr], [0.0, sr, cr]];
        let ry = [[cp, 0.0, sp], [0.0, 1.0, 0.0], [-sp, 0.0, cp]];
        let rz = [[cy, -sy, 0.0], [sy, cy, 0.0], [0.0, 0.0, 1.0]];
        mat_mul(&mat_mul(&rz, &ry), &rx)
    }
}

pub fn mat_mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

pub fn mat_vec(m: &Mat3, v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}
