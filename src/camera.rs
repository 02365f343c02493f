use crate::core::Camera;
use glam::{Vec3, Vec4};

/// World-space ray from backing-store pixel coordinates through the current
/// interpolated camera.
pub fn screen_to_world_ray(
    camera: &Camera,
    width: f32,
    height: f32,
    sx: f32,
    sy: f32,
) -> (Vec3, Vec3) {
    let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
    let inv = camera.view_proj().inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p_far: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye;
    let rd = (p_far - ro).normalize_or_zero();
    (ro, rd)
}

/// Intersection of a ray with the plane z = `plane_z`. None when the ray is
/// parallel to the plane or points away from it.
pub fn ray_plane_z(ro: Vec3, rd: Vec3, plane_z: f32) -> Option<Vec3> {
    if rd.z.abs() < 1e-6 {
        return None;
    }
    let t = (plane_z - ro.z) / rd.z;
    (t > 0.0).then(|| ro + rd * t)
}

/// Pointer position on the scene's working plane (z = 0).
pub fn pointer_world_on_plane(
    camera: &Camera,
    width: f32,
    height: f32,
    sx: f32,
    sy: f32,
) -> Option<Vec3> {
    let (ro, rd) = screen_to_world_ray(camera, width, height, sx, sy);
    ray_plane_z(ro, rd, 0.0)
}
