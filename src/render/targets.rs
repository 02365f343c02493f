use super::helpers;
use wgpu;

/// Offscreen color targets for the post chain.
///
/// `scene_*` holds the freshly rendered dot pass; `hist_a`/`hist_b` are the
/// afterimage accumulation ping-pong pair. All Rgba16Float.
pub(crate) struct RenderTargets {
    pub(crate) scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
    pub(crate) hist_a: wgpu::Texture,
    pub(crate) hist_a_view: wgpu::TextureView,
    pub(crate) hist_b: wgpu::Texture,
    pub(crate) hist_b_view: wgpu::TextureView,
}

pub(crate) const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

const USAGE: wgpu::TextureUsages = wgpu::TextureUsages::RENDER_ATTACHMENT
    .union(wgpu::TextureUsages::TEXTURE_BINDING);

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let w = width.max(1);
        let h = height.max(1);
        let (scene_tex, scene_view) =
            helpers::create_color_texture(device, "scene_tex", w, h, OFFSCREEN_FORMAT, USAGE);
        let (hist_a, hist_a_view) =
            helpers::create_color_texture(device, "hist_a", w, h, OFFSCREEN_FORMAT, USAGE);
        let (hist_b, hist_b_view) =
            helpers::create_color_texture(device, "hist_b", w, h, OFFSCREEN_FORMAT, USAGE);
        Self {
            scene_tex,
            scene_view,
            hist_a,
            hist_a_view,
            hist_b,
            hist_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
