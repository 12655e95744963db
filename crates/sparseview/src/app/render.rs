use super::{App, CameraMarker, PointCloud, ScreenDescriptor};

impl App {
    /// Renders a single frame.
    pub(super) fn render(&mut self) {
        let (Some(engine), Some(_egui), Some(_window)) =
            (&mut self.engine, &mut self.egui, &self.window)
        else {
            return;
        };

        if engine.surface.is_none() {
            return;
        }

        // Auto-fit the camera once a scene is present, unless disabled.
        if !self.camera_fitted {
            let bbox = crate::with_context(|ctx| {
                if !ctx.options.auto_fit_camera || ctx.registry.is_empty() {
                    None
                } else {
                    Some(ctx.bounding_box)
                }
            });
            if let Some((min, max)) = bbox {
                engine.camera.look_at_box(min, max);
                self.camera_fitted = true;
            }
        }

        engine.update_camera_uniforms();

        // Initialize GPU resources for structures that need them, and push
        // per-frame uniforms.
        crate::with_context_mut(|ctx| {
            let length_scale = ctx.length_scale;
            for structure in ctx.registry.iter_mut() {
                if let Some(pc) = structure.as_any_mut().downcast_mut::<PointCloud>() {
                    if pc.render_data().is_none() {
                        pc.init_gpu_resources(
                            &engine.device,
                            engine.point_bind_group_layout(),
                            &engine.camera_buffer,
                        );
                    }
                    pc.update_gpu_buffers(&engine.queue);
                } else if let Some(marker) = structure.as_any_mut().downcast_mut::<CameraMarker>() {
                    // Frustum geometry depends on the scene length scale, so a
                    // new workspace or a slider change forces a rebuild.
                    if marker.needs_reinit(length_scale) {
                        marker.init_render_data(
                            &engine.device,
                            engine.frustum_bind_group_layout(),
                            &engine.camera_buffer,
                            &engine.queue,
                            length_scale,
                        );
                    }
                    marker.update_gpu_buffers(&engine.queue);
                }
            }
        });

        // Build UI (take engine/egui temporarily to satisfy borrow checker)
        let mut engine_temp = self.engine.take().unwrap();
        let mut egui_temp = self.egui.take().unwrap();
        let window_temp = self.window.clone().unwrap();

        let ui_result = self.build_ui(&mut engine_temp, &mut egui_temp, &window_temp);

        self.engine = Some(engine_temp);
        self.egui = Some(egui_temp);

        // A workspace selection replaces the scene; the new structures get
        // their GPU resources on the next frame.
        if let Some(name) = ui_result.load_requested {
            self.load_workspace(&name);
        }

        let engine = self.engine.as_mut().unwrap();
        let egui = self.egui.as_mut().unwrap();
        let window = self.window.as_ref().unwrap();

        let surface = engine.surface.as_ref().expect("surface checked above");
        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                engine.resize(engine.width, engine.height);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                self.close_requested = true;
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return;
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("Surface error: other");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = engine
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        let background = crate::with_context(|ctx| ctx.options.background_color);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(background.x),
                            g: f64::from(background.y),
                            b: f64::from(background.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &engine.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Draw point clouds (6 vertices per billboard quad, one instance
            // per point)
            if let Some(pipeline) = &engine.point_pipeline {
                render_pass.set_pipeline(pipeline);
                crate::with_context(|ctx| {
                    for structure in ctx.registry.iter() {
                        if !structure.is_enabled() {
                            continue;
                        }
                        if let Some(pc) = structure.as_any().downcast_ref::<PointCloud>() {
                            if let Some(render_data) = pc.render_data() {
                                render_pass.set_bind_group(0, &render_data.bind_group, &[]);
                                render_pass.draw(0..6, 0..render_data.num_points);
                            }
                        }
                    }
                });
            }

            // Draw camera frusta (2 vertices per edge, LineList topology)
            if let Some(pipeline) = &engine.frustum_pipeline {
                render_pass.set_pipeline(pipeline);
                crate::with_context(|ctx| {
                    for structure in ctx.registry.iter() {
                        if !structure.is_enabled() {
                            continue;
                        }
                        if let Some(marker) = structure.as_any().downcast_ref::<CameraMarker>() {
                            if let Some(render_data) = marker.render_data() {
                                render_pass.set_bind_group(0, &render_data.bind_group, &[]);
                                render_pass.draw(0..render_data.num_edges * 2, 0..1);
                            }
                        }
                    }
                });
            }
        }

        // Render egui on top
        #[allow(clippy::cast_possible_truncation)]
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [engine.width, engine.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        egui.render(
            &engine.device,
            &engine.queue,
            &mut encoder,
            &view,
            &screen_descriptor,
            ui_result.egui_output,
        );

        engine.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}
