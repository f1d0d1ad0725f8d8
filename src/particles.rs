//! Ambient particle field: a slowly tumbling group of dust motes inside a
//! star shell, seen from a fixed camera.
//!
//! Only the model lives here; `wasm::render` uploads it to WebGL.

use std::f32::consts::{FRAC_PI_4, PI};

use crate::color::Color;
use crate::config::ParticleConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dust {
    pub position: [f32; 3],
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: [f32; 3],
    /// Point size before perspective scaling.
    pub size: f32,
    pub brightness: f32,
}

/// Bob applied on top of the group rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPose {
    pub rotation: [f32; 3],
    pub lift: f32,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    pub dust: Vec<Dust>,
    pub stars: Vec<Star>,
    /// Group Euler rotation (x, y, z) in radians.
    pub rotation: [f32; 3],
    pub elapsed: f32,
    float_offset: f32,
}

const FLOAT_SPEED: f32 = 1.0;
const FLOAT_ROTATION_INTENSITY: f32 = 0.5;
const FLOAT_INTENSITY: f32 = 0.5;

impl ParticleField {
    pub fn generate(config: &ParticleConfig, rng: &mut fastrand::Rng) -> Self {
        let [sx, sy, sz] = config.dust_spread;
        let dust = (0..config.dust_count)
            .map(|_| Dust {
                position: [
                    (rng.f32() - 0.5) * sx,
                    (rng.f32() - 0.5) * sy,
                    (rng.f32() - 0.5) * sz,
                ],
                color: pick_color(&config.palette, rng),
            })
            .collect();

        // Shell radii shrink from radius + depth towards radius as stars are
        // added, so the field thins outwards.
        let mut r = config.star_radius + config.star_depth;
        let step = if config.star_count == 0 {
            0.0
        } else {
            config.star_depth / config.star_count as f32
        };
        let stars = (0..config.star_count)
            .map(|_| {
                r -= step * rng.f32();
                Star {
                    position: on_sphere(r, rng),
                    size: (0.5 + 0.5 * rng.f32()) * config.star_factor,
                    brightness: 0.9,
                }
            })
            .collect();

        Self {
            dust,
            stars,
            rotation: [0.0, 0.0, FRAC_PI_4],
            elapsed: 0.0,
            float_offset: rng.f32() * 10_000.0,
        }
    }

    /// Per-frame update; `dt` in seconds.
    pub fn advance(&mut self, dt: f32) {
        self.rotation[0] -= dt / 10.0;
        self.rotation[1] -= dt / 15.0;
        self.elapsed += dt;
    }

    pub fn float_pose(&self) -> FloatPose {
        let t = (self.float_offset + self.elapsed) * FLOAT_SPEED / 4.0;
        FloatPose {
            rotation: [
                (t.cos() / 8.0) * FLOAT_ROTATION_INTENSITY,
                (t.sin() / 8.0) * FLOAT_ROTATION_INTENSITY,
                (t.sin() / 20.0) * FLOAT_ROTATION_INTENSITY,
            ],
            lift: (t.sin() / 10.0) * FLOAT_INTENSITY,
        }
    }

    pub fn group_matrix(&self) -> Mat4 {
        Mat4::rotation_euler(self.rotation)
    }

    /// Matrix for the dust, which floats inside the rotating group.
    pub fn dust_matrix(&self) -> Mat4 {
        let pose = self.float_pose();
        self.group_matrix()
            .mul(&Mat4::translation([0.0, pose.lift, 0.0]))
            .mul(&Mat4::rotation_euler(pose.rotation))
    }
}

/// Uniform pick from the palette; white if the palette is empty.
fn pick_color(palette: &[Color], rng: &mut fastrand::Rng) -> Color {
    if palette.is_empty() {
        return Color::rgb(1.0, 1.0, 1.0);
    }
    palette[rng.usize(..palette.len())]
}

fn on_sphere(r: f32, rng: &mut fastrand::Rng) -> [f32; 3] {
    let phi = (2.0 * rng.f32() - 1.0).acos();
    let theta = rng.f32() * 2.0 * PI;
    [
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    ]
}

/// Column-major 4x4 matrix, laid out the way WebGL uniforms expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn mul(&self, rhs: &Mat4) -> Mat4 {
        let (a, b) = (&self.0, &rhs.0);
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
            }
        }
        Mat4(out)
    }

    pub fn translation(t: [f32; 3]) -> Mat4 {
        let mut m = Self::IDENTITY;
        m.0[12] = t[0];
        m.0[13] = t[1];
        m.0[14] = t[2];
        m
    }

    /// XYZ-order Euler rotation (applied x first).
    pub fn rotation_euler(r: [f32; 3]) -> Mat4 {
        let (sx, cx) = r[0].sin_cos();
        let (sy, cy) = r[1].sin_cos();
        let (sz, cz) = r[2].sin_cos();
        let rx = Mat4([
            1.0, 0.0, 0.0, 0.0, //
            0.0, cx, sx, 0.0, //
            0.0, -sx, cx, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let ry = Mat4([
            cy, 0.0, -sy, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            sy, 0.0, cy, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let rz = Mat4([
            cz, sz, 0.0, 0.0, //
            -sz, cz, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        rx.mul(&ry).mul(&rz)
    }

    pub fn perspective(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (fov_y_deg.to_radians() / 2.0).tan();
        let nf = 1.0 / (near - far);
        Mat4([
            f / aspect, 0.0, 0.0, 0.0, //
            0.0, f, 0.0, 0.0, //
            0.0, 0.0, (far + near) * nf, -1.0, //
            0.0, 0.0, 2.0 * far * near * nf, 0.0,
        ])
    }

    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        let mut out = [0.0; 3];
        for (row, o) in out.iter_mut().enumerate() {
            *o = m[row] * p[0] + m[4 + row] * p[1] + m[8 + row] * p[2] + m[12 + row];
        }
        out
    }
}

/// Fixed camera looking down -z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub z: f32,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(z: f32) -> Self {
        Self {
            z,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::translation([0.0, 0.0, -self.z])
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective(self.fov_y_deg, aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn identity_is_neutral() {
        let t = Mat4::translation([1.0, 2.0, 3.0]);
        assert_eq!(t.mul(&Mat4::IDENTITY), t);
        assert_eq!(Mat4::IDENTITY.mul(&t), t);
    }

    #[test]
    fn z_rotation_turns_x_into_y() {
        let m = Mat4::rotation_euler([0.0, 0.0, PI / 2.0]);
        assert!(approx(m.transform_point([1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]));
    }

    #[test]
    fn camera_moves_world_away() {
        let cam = Camera::new(5.0);
        assert!(approx(cam.view().transform_point([0.0, 0.0, 0.0]), [0.0, 0.0, -5.0]));
    }
}
