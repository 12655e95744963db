//! Application window and event loop management.

mod egui_integration;
mod input;
mod panel;
mod render;

pub(super) use std::sync::Arc;

pub(super) use egui_wgpu::ScreenDescriptor;
pub(super) use pollster::FutureExt;
pub(super) use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowId},
};

pub(super) use sparseview_client::ApiClient;
pub(super) use sparseview_render::RenderEngine;
pub(super) use sparseview_structures::{CameraMarker, PointCloud};

pub(super) use egui_integration::EguiIntegration;

/// UI state for the left control panel. Display settings (sizes, background)
/// are not mirrored here; they live in the global `Options` so the panel and
/// the library API cannot diverge.
pub(super) struct PanelState {
    /// Workspace names fetched from the backend.
    pub workspaces: Vec<String>,
    /// Currently displayed workspace, if any.
    pub active: Option<String>,
    /// Status line shown at the top of the panel.
    pub status: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            workspaces: Vec::new(),
            active: None,
            status: "Not connected".to_string(),
        }
    }
}

/// The sparseview application state.
pub struct App {
    pub(super) window: Option<Arc<Window>>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) egui: Option<EguiIntegration>,
    pub(super) client: Option<ApiClient>,
    pub(super) close_requested: bool,
    // Mouse state for camera control. These track the physical button state,
    // updated on every press/release even when egui consumes the event.
    pub(super) mouse_pos: (f64, f64),
    pub(super) left_mouse_down: bool,
    pub(super) right_mouse_down: bool,
    pub(super) shift_down: bool,
    // Dynamic left panel width (updated each frame from egui)
    pub(super) left_panel_width: f64,
    // Whether the camera has been auto-fitted to the scene
    pub(super) camera_fitted: bool,
    pub(super) panel: PanelState,
}

impl App {
    /// Creates a new application, optionally connected to a backend.
    pub fn new(client: Option<ApiClient>) -> Self {
        Self {
            window: None,
            engine: None,
            egui: None,
            client,
            close_requested: false,
            mouse_pos: (0.0, 0.0),
            left_mouse_down: false,
            right_mouse_down: false,
            shift_down: false,
            left_panel_width: 300.0,
            camera_fitted: false,
            panel: PanelState::default(),
        }
    }
}

/// Runs the sparseview application.
pub fn run_app(client: Option<ApiClient>) {
    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App::new(client);

    event_loop.run_app(&mut app).expect("event loop error");
}
