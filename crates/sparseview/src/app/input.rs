use super::{
    ActiveEventLoop, App, ApplicationHandler, Arc, EguiIntegration, ElementState, FutureExt,
    KeyCode, LogicalSize, MouseButton, RenderEngine, Window, WindowEvent, WindowId,
};

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("sparseview")
            .with_inner_size(LogicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );

        let engine = RenderEngine::new_windowed(window.clone())
            .block_on()
            .expect("failed to create render engine");

        let egui = EguiIntegration::new(&engine.device, engine.surface_config.format, &window);

        self.window = Some(window);
        self.engine = Some(engine);
        self.egui = Some(egui);

        // Fetch the workspace list up front so the panel is populated on the
        // first frame.
        self.refresh_workspace_list();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Always track physical mouse button state, even if egui consumes the
        // event, so the state can't get stuck when egui intercepts a release.
        match &event {
            WindowEvent::MouseInput { state, button, .. } => match (button, state) {
                (MouseButton::Left, ElementState::Pressed) => {
                    self.left_mouse_down = true;
                }
                (MouseButton::Left, ElementState::Released) => {
                    self.left_mouse_down = false;
                }
                (MouseButton::Right, ElementState::Pressed) => {
                    self.right_mouse_down = true;
                }
                (MouseButton::Right, ElementState::Released) => {
                    self.right_mouse_down = false;
                }
                _ => {}
            },
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_down = modifiers.state().shift_key();
            }
            _ => {}
        }

        // Let egui handle events
        let egui_consumed = if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            egui.handle_event(window, &event)
        } else {
            false
        };

        let mouse_in_ui_panel = self.mouse_pos.0 <= self.left_panel_width;

        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let delta_x = position.x - self.mouse_pos.0;
                let delta_y = position.y - self.mouse_pos.1;
                self.mouse_pos = (position.x, position.y);

                // Camera control:
                // - Left drag (no Shift): turntable orbit
                // - Left drag + Shift OR right drag: pan
                if let Some(engine) = &mut self.engine {
                    let is_rotate = self.left_mouse_down && !self.shift_down && !egui_consumed;
                    let is_pan = (self.left_mouse_down && self.shift_down && !egui_consumed)
                        || self.right_mouse_down;

                    #[allow(clippy::cast_possible_truncation)]
                    if is_rotate {
                        engine
                            .camera
                            .orbit(delta_x as f32 * 0.01, delta_y as f32 * 0.01);
                    } else if is_pan {
                        let scale = engine.camera.position.distance(engine.camera.target) * 0.002;
                        engine
                            .camera
                            .pan(-delta_x as f32 * scale, delta_y as f32 * scale);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if mouse_in_ui_panel && egui_consumed {
                    return;
                }

                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    let scroll = match delta {
                        winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                        winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                    };
                    let scale = engine.camera.position.distance(engine.camera.target) * 0.1;
                    engine.camera.zoom(scroll * scale);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(KeyCode::Escape) = event.physical_key {
                    if event.state == ElementState::Pressed {
                        self.close_requested = true;
                    }
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}
