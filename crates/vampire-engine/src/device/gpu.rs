use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Surface choices made at startup.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface when one is offered.
    ///
    /// An sRGB target gamma-encodes shader output on write; a non-sRGB target
    /// stores colors exactly as the shader returns them.
    pub prefer_srgb: bool,

    /// Swap behavior. `Fifo` (vsync) is the only mode every backend supports.
    pub present_mode: wgpu::PresentMode,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
        }
    }
}

/// One acquired swapchain image plus the encoder recording into it.
///
/// Must be handed back to [`Gpu::submit`] before the next `begin_frame`.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the frame loop should do after a failed surface acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was configured again; the next frame can draw.
    Reconfigured,
    /// Drop this frame and try the next one.
    SkipFrame,
    /// The device cannot continue; the loop should stop.
    Fatal,
}

/// wgpu device, queue and the window surface.
///
/// The surface borrows the window for `'w`; the runtime keeps both in one
/// self-referencing entry so the window always outlives this value.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl<'w> Gpu<'w> {
    /// Picks an adapter for `window`, opens a device and configures the
    /// surface at the window's current physical size.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("using GPU adapter \"{}\" ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("vampire device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open GPU device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::debug!("surface {format:?} at {}x{}", size.width, size.height);

        Ok(Gpu {
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface for a new physical size.
    ///
    /// A 0x0 size (minimized window) is skipped: wgpu rejects it, and the old
    /// configuration stays valid until the window comes back.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquires the next swapchain image and opens an encoder for it.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vampire frame"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the image.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Recovers from a failed `begin_frame` where possible.
    pub fn handle_surface_error(&self, err: SurfaceError) -> SurfaceErrorAction {
        surface_error_action(&err, || self.surface.configure(&self.device, &self.config))
    }
}

fn surface_error_action(err: &SurfaceError, reconfigure: impl FnOnce()) -> SurfaceErrorAction {
    match err {
        SurfaceError::Lost | SurfaceError::Outdated => {
            reconfigure();
            SurfaceErrorAction::Reconfigured
        }
        SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

/// First format whose sRGB-ness matches `prefer_srgb`, at any bit depth.
/// Falls back to the first listed format.
fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat::{Bgra8Unorm, Bgra8UnormSrgb, Rgba16Float};

    #[test]
    fn empty_format_list_has_no_choice() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn srgb_preference_is_honored_in_both_directions() {
        let formats = [Bgra8UnormSrgb, Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, true), Some(Bgra8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(Bgra8Unorm));
    }

    #[test]
    fn non_srgb_match_may_be_any_bit_depth() {
        let formats = [Bgra8UnormSrgb, Rgba16Float, Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(Rgba16Float));
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(choose_surface_format(&[Bgra8UnormSrgb], false), Some(Bgra8UnormSrgb));
        assert_eq!(choose_surface_format(&[Rgba16Float], true), Some(Rgba16Float));
    }

    #[test]
    fn lost_surface_is_reconfigured() {
        let mut calls = 0;
        let action = surface_error_action(&SurfaceError::Lost, || calls += 1);
        assert_eq!(action, SurfaceErrorAction::Reconfigured);
        assert_eq!(calls, 1);
    }

    #[test]
    fn timeout_skips_and_oom_is_fatal() {
        let mut calls = 0;
        assert_eq!(
            surface_error_action(&SurfaceError::Timeout, || calls += 1),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            surface_error_action(&SurfaceError::OutOfMemory, || calls += 1),
            SurfaceErrorAction::Fatal
        );
        assert_eq!(calls, 0);
    }
}
