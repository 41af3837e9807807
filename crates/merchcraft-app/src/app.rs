//! Core application state and lifecycle.

use peniko::Color;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::file_ops::{self, UploadMessage};
use crate::ui::{UiAction, UiState, render_ui};

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub background_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "MerchCraft".to_string(),
            width: 1280,
            height: 860,
            min_width: 1100,
            min_height: 720,
            background_color: Color::from_rgba8(249, 250, 251, 255),
        }
    }
}

impl AppConfig {
    /// Background as a wgpu clear color.
    fn clear_color(&self) -> wgpu::Color {
        let rgba = self.background_color.to_rgba8();
        wgpu::Color {
            r: f64::from(rgba.r) / 255.0,
            g: f64::from(rgba.g) / 255.0,
            b: f64::from(rgba.b) / 255.0,
            a: f64::from(rgba.a) / 255.0,
        }
    }
}

/// Surface and device.
struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl GpuState {
    fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, AppError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            compatible_surface: Some(&surface),
            ..Default::default()
        }))?;
        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))?;

        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(AppError::UnsupportedSurface)?;
        // egui blends in gamma space and expects a linear target format
        let capabilities = surface.get_capabilities(&adapter);
        if let Some(format) = capabilities.formats.iter().copied().find(|f| !f.is_srgb()) {
            config.format = format;
        }
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);

        log::info!(
            "GPU ready: {} ({:?}, {:?})",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    gpu: GpuState,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // Finished uploads from worker threads
    uploads_tx: Sender<UploadMessage>,
    uploads_rx: Receiver<UploadMessage>,

    config: AppConfig,
}

impl AppState {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_min_inner_size(LogicalSize::new(config.min_width, config.min_height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (config.width, config.height)
        } else {
            (size.width, size.height)
        };
        let gpu = GpuState::new(window.clone(), width, height)?;

        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::light());
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let (uploads_tx, uploads_rx) = mpsc::channel();

        log::info!("MerchCraft initialized - {}x{}", width, height);

        Ok(Self {
            window,
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            uploads_tx,
            uploads_rx,
            config: config.clone(),
        })
    }

    fn redraw(&mut self) {
        self.poll_uploads();

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut actions = Vec::new();
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            actions = render_ui(ctx, &mut self.ui_state);
        });
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        for action in actions {
            self.handle_action(action);
        }

        self.paint(
            &primitives,
            &egui_output.textures_delta,
            egui_output.pixels_per_point,
        );
        self.window.request_redraw();
    }

    fn paint(
        &mut self,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        pixels_per_point: f32,
    ) {
        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                self.gpu.reconfigure();
                return;
            }
            Err(err) => {
                log::warn!("Failed to get surface texture: {err}");
                return;
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui encoder"),
        });
        let callback_buffers = self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            primitives,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu needs a 'static pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, primitives, &screen_descriptor);
        }

        queue.submit(
            callback_buffers
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
    }

    fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::OpenDesigner(kind) => self.ui_state.open_designer(kind),
            UiAction::CloseDesigner => self.ui_state.close_designer(),
            UiAction::PickImage => self.start_upload(),
            UiAction::AddToCart(summary) => match summary.to_json() {
                Ok(json) => log::info!("Add to cart: {json}"),
                Err(err) => log::warn!("Failed to serialize design summary: {err}"),
            },
            UiAction::ScrollTo(section) => self.ui_state.scroll_to(section),
            UiAction::SubmitContact => {
                self.ui_state.submit_contact();
            }
        }
    }

    /// Ask for a file and read it off the UI thread.
    fn start_upload(&mut self) {
        let Some(dialog) = self.ui_state.designer.as_mut() else {
            return;
        };
        let Some(path) = file_ops::pick_image() else {
            log::debug!("Image upload cancelled");
            return;
        };
        log::info!("Uploading {}", file_ops::display_name(&path));

        let ticket = dialog.begin_upload();
        let limits = dialog.upload_limits();
        if let Err(err) = file_ops::spawn_upload(path, ticket, limits, self.uploads_tx.clone()) {
            log::error!("Failed to start upload worker: {err}");
            dialog.finish_upload(ticket, Err(err.into()));
        }
    }

    /// Hand finished uploads to the open designer.
    fn poll_uploads(&mut self) {
        while let Ok(message) = self.uploads_rx.try_recv() {
            match self.ui_state.designer.as_mut() {
                Some(dialog) => {
                    dialog.finish_upload(message.ticket, message.result);
                }
                None => log::debug!("Dropping upload that finished after its designer closed"),
            }
        }
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    init_error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            init_error: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run() -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new();
        event_loop.run_app(&mut app)?;
        match app.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match AppState::new(event_loop, &self.config) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(err) => {
                log::error!("Initialization failed: {err}");
                self.init_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                state.ui_state.close_designer();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                state.gpu.resize(size.width, size.height);
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => state.redraw(),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "MerchCraft");
        assert!(config.width >= config.min_width);
        assert!(config.height >= config.min_height);
    }

    #[test]
    fn test_clear_color() {
        let config = AppConfig {
            background_color: Color::from_rgba8(255, 0, 51, 255),
            ..AppConfig::default()
        };
        let clear = config.clear_color();
        assert_eq!(clear.r, 1.0);
        assert_eq!(clear.g, 0.0);
        assert!((clear.b - 0.2).abs() < 1e-9);
        assert_eq!(clear.a, 1.0);
    }
}
