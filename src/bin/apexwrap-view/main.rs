//! Interactive pyramid viewer.
//!
//! Wraps an image seamlessly onto the four sides of a pyramid and shows the
//! result. Drop an image file onto the window to wrap a different picture.
//!
//! Controls:
//! - Left/Right arrows: Rotate the pyramid (5 degree steps)
//! - R: Reset rotation
//! - S: Save the current frame as pyramid_image.png
//! - Escape: Quit

mod camera;
mod mesh_gpu;
mod renderer;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use apexwrap::netmap::remap_to_net;
use apexwrap::policy::{Mutation, RedrawPolicy};
use apexwrap::pyramid::pyramid;
use apexwrap::upload::{UploadId, UploadTracker};

use camera::ViewCamera;
use mesh_gpu::GpuMesh;
use renderer::Renderer;

/// Output filename for saved frames.
const SCREENSHOT_NAME: &str = "pyramid_image.png";

/// Rotation step per arrow-key press, in degrees.
const YAW_STEP: i32 = 5;

#[derive(Parser)]
#[command(name = "apexwrap-view")]
#[command(author, version, about = "Wrap an image onto a four-sided pyramid", long_about = None)]
struct Cli {
    /// Image to wrap onto the pyramid (can also be dropped onto the window)
    image: Option<PathBuf>,

    /// Base radius of the pyramid
    #[arg(long, default_value_t = 2.0)]
    radius: f64,

    /// Height of the pyramid
    #[arg(long, default_value_t = 3.0)]
    height: f64,

    /// Initial rotation in degrees (0-360)
    #[arg(long, default_value_t = 45, value_parser = clap::value_parser!(i32).range(0..=360))]
    rotation: i32,
}

/// Completion notification from an image-decode worker thread.
#[derive(Debug)]
enum UserEvent {
    ImageDecoded {
        /// Which upload attempt this result belongs to.
        id: UploadId,
        /// The decoded pixels, or the decoder's error message.
        result: Result<image::RgbaImage, String>,
    },
}

/// Application state: the viewer context owning every handle.
struct App {
    proxy: EventLoopProxy<UserEvent>,
    /// Pyramid base radius.
    radius: f64,
    /// Pyramid height.
    height: f64,
    /// Current yaw in whole degrees, 0..=360.
    yaw_deg: i32,
    /// Yaw restored by the R key.
    initial_yaw_deg: i32,
    /// Image to load on startup, if any.
    initial_image: Option<PathBuf>,
    /// The window (created after resume).
    window: Option<Arc<Window>>,
    /// The renderer (created after window).
    renderer: Option<Renderer>,
    /// The currently attached mesh, if any.
    gpu_mesh: Option<GpuMesh>,
    /// The camera.
    camera: ViewCamera,
    /// Redraw scheduling.
    policy: RedrawPolicy,
    /// Staleness guard for in-flight uploads.
    uploads: UploadTracker,
}

impl App {
    fn new(cli: Cli, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            proxy,
            radius: cli.radius,
            height: cli.height,
            yaw_deg: cli.rotation,
            initial_yaw_deg: cli.rotation,
            initial_image: cli.image,
            window: None,
            renderer: None,
            gpu_mesh: None,
            camera: ViewCamera::default(),
            policy: RedrawPolicy::new(),
            uploads: UploadTracker::new(),
        }
    }

    /// Begin a new upload: decode the file on a worker thread and post the
    /// result back to the event loop tagged with its generation id.
    fn start_upload(&mut self, path: PathBuf) {
        let id = self.uploads.begin();
        let proxy = self.proxy.clone();
        log::info!("decoding {path:?}");

        std::thread::spawn(move || {
            let result = image::open(&path)
                .map(|img| img.to_rgba8())
                .map_err(|e| e.to_string());
            // The receiver may be gone if the window closed
            let _ = proxy.send_event(UserEvent::ImageDecoded { id, result });
        });
    }

    /// Build, remap, texture, and attach a pyramid for the decoded image.
    ///
    /// Each step must complete before the next begins; on any failure the
    /// previously displayed pyramid stays attached.
    fn attach_pyramid(&mut self, rgba: &image::RgbaImage) -> apexwrap::error::Result<()> {
        let renderer = self
            .renderer
            .as_mut()
            .expect("renderer exists once resumed");

        let mut mesh = pyramid(self.radius, self.height)?;
        remap_to_net(&mut mesh)?;

        let gpu_mesh = GpuMesh::from_textured_mesh(renderer.device(), &mut mesh);
        renderer.load_texture(rgba)?;
        self.gpu_mesh = Some(gpu_mesh);

        self.policy.on_mutation(Mutation::MeshReplaced);
        Ok(())
    }

    /// Ask winit for a redraw if the policy says one is due.
    fn schedule_redraw(&self) {
        if self.policy.redraw_pending() {
            if let Some(ref window) = self.window {
                window.request_redraw();
            }
        }
    }

    /// Change the yaw, clamped to 0..=360 degrees.
    fn set_yaw(&mut self, deg: i32) {
        let deg = deg.clamp(0, 360);
        if deg != self.yaw_deg {
            self.yaw_deg = deg;
            self.policy.on_mutation(Mutation::RotationChanged);
            self.schedule_redraw();
        }
    }

    fn save_screenshot(&mut self) {
        let (Some(renderer), Some(mesh)) = (self.renderer.as_mut(), self.gpu_mesh.as_ref())
        else {
            log::warn!("nothing to capture yet");
            return;
        };

        let yaw = yaw_radians(self.yaw_deg);
        match renderer
            .screenshot(mesh, &self.camera, yaw)
            .and_then(|frame| {
                frame
                    .save(SCREENSHOT_NAME)
                    .map_err(|e| apexwrap::error::PyramidError::EncodeFailed {
                        message: e.to_string(),
                    })
            }) {
            Ok(()) => log::info!("saved {SCREENSHOT_NAME}"),
            Err(e) => log::error!("screenshot failed: {e}"),
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Apexwrap")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let renderer = pollster::block_on(Renderer::new(window.clone()));

        self.window = Some(window);
        self.renderer = Some(renderer);

        // Show the untextured pyramid until an image arrives
        let mut mesh = pyramid(self.radius, self.height).expect("default dimensions are valid");
        remap_to_net(&mut mesh).expect("builder emits 4 lateral faces");
        let renderer = self.renderer.as_ref().expect("just created");
        self.gpu_mesh = Some(GpuMesh::from_textured_mesh(renderer.device(), &mut mesh));
        self.policy.on_mutation(Mutation::MeshReplaced);
        self.schedule_redraw();

        if let Some(path) = self.initial_image.take() {
            self.start_upload(path);
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        let UserEvent::ImageDecoded { id, result } = event;

        // A newer upload supersedes this one; its result must not touch
        // the displayed state.
        if !self.uploads.is_current(id) {
            log::info!("discarding stale upload {id:?}");
            return;
        }

        match result {
            Ok(rgba) => {
                if let Err(e) = self.attach_pyramid(&rgba) {
                    log::error!("failed to wrap image: {e}");
                }
                self.schedule_redraw();
            }
            Err(message) => {
                let err = apexwrap::error::PyramidError::DecodeFailed { message };
                log::error!("{err}");
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(ref mut renderer) = self.renderer {
                    renderer.resize(new_size);
                }
                self.policy.on_mutation(Mutation::ViewportResized);
                self.schedule_redraw();
            }

            WindowEvent::DroppedFile(path) => {
                self.start_upload(path);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.logical_key {
                        Key::Named(NamedKey::Escape) => {
                            event_loop.exit();
                        }
                        Key::Named(NamedKey::ArrowLeft) => {
                            self.set_yaw(self.yaw_deg - YAW_STEP);
                        }
                        Key::Named(NamedKey::ArrowRight) => {
                            self.set_yaw(self.yaw_deg + YAW_STEP);
                        }
                        Key::Character(ref c) if c == "r" || c == "R" => {
                            self.set_yaw(self.initial_yaw_deg);
                            log::info!("rotation reset to {} degrees", self.initial_yaw_deg);
                        }
                        Key::Character(ref c) if c == "s" || c == "S" => {
                            self.save_screenshot();
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                // One redraw satisfies however many mutations accumulated
                self.policy.take_redraw();

                if let (Some(ref mut renderer), Some(ref mesh)) =
                    (&mut self.renderer, &self.gpu_mesh)
                {
                    let yaw = yaw_radians(self.yaw_deg);
                    match renderer.render(mesh, &self.camera, yaw) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            if let Some(ref window) = self.window {
                                renderer.resize(window.inner_size());
                            }
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of memory");
                            event_loop.exit();
                        }
                        Err(e) => {
                            log::error!("Render error: {:?}", e);
                        }
                    }
                }
            }

            _ => {}
        }
    }
}

/// Convert a whole-degree yaw to radians.
fn yaw_radians(deg: i32) -> f32 {
    (deg as f32).to_radians()
}

fn main() {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let event_loop = EventLoop::<UserEvent>::with_user_event()
        .build()
        .expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);
    let proxy = event_loop.create_proxy();

    let mut app = App::new(cli, proxy);
    event_loop.run_app(&mut app).expect("Event loop error");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_degrees_to_radians() {
        assert!((yaw_radians(45) - std::f32::consts::FRAC_PI_4).abs() < 1e-7);
        assert_eq!(yaw_radians(0), 0.0);
        assert!((yaw_radians(360) - std::f32::consts::TAU).abs() < 1e-6);
    }
}
