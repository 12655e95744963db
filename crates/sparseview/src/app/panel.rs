use super::{App, EguiIntegration, RenderEngine, Window};

/// Result of building the UI for one frame.
pub(super) struct UiResult {
    pub egui_output: egui::FullOutput,
    pub load_requested: Option<String>,
}

impl App {
    /// Fetches the workspace list from the backend, updating the status line.
    pub(super) fn refresh_workspace_list(&mut self) {
        let Some(client) = &self.client else {
            self.panel.status = "No backend configured".to_string();
            return;
        };

        match client.list_workspaces() {
            Ok(workspaces) => {
                self.panel.status = format!(
                    "Connected to {} ({} workspaces)",
                    client.base_url(),
                    workspaces.len()
                );
                self.panel.workspaces = workspaces;
            }
            Err(err) => {
                log::error!("failed to list workspaces: {err}");
                self.panel.status = format!("Connection failed: {err}");
                self.panel.workspaces.clear();
            }
        }
    }

    /// Fetches and displays one workspace. A failed fetch leaves the current
    /// scene untouched.
    pub(super) fn load_workspace(&mut self, name: &str) {
        let Some(client) = &self.client else {
            return;
        };

        let workspace = match client.fetch_workspace(name) {
            Ok(ws) => ws,
            Err(err) => {
                log::error!("failed to fetch workspace '{name}': {err}");
                self.panel.status = format!("Load failed: {err}");
                return;
            }
        };

        match crate::apply_workspace(name, &workspace) {
            Ok(summary) => {
                // New structures pick up the current display options.
                let (radius, scale) = crate::with_context(|ctx| {
                    (ctx.options.point_radius, ctx.options.marker_scale)
                });
                crate::set_all_point_radii(radius);
                crate::set_all_marker_scales(scale);

                self.panel.active = Some(name.to_string());
                self.panel.status = format!(
                    "{name}: {} points, {} cameras",
                    summary.num_points, summary.num_markers
                );
                // Re-frame the view around the new scene.
                self.camera_fitted = false;
            }
            Err(err) => {
                log::error!("failed to build scene for '{name}': {err}");
                self.panel.status = format!("Load failed: {err}");
            }
        }
    }

    /// Builds the left control panel and per-structure UI for one frame.
    pub(super) fn build_ui(
        &mut self,
        _engine: &mut RenderEngine,
        egui: &mut EguiIntegration,
        window: &Window,
    ) -> UiResult {
        egui.begin_frame(window);

        let mut load_requested: Option<String> = None;
        let mut refresh_requested = false;

        // Display settings come from the global options each frame, so
        // library-side changes show up in the panel.
        let (initial_radius, initial_scale) = crate::with_context(|ctx| {
            (ctx.options.point_radius, ctx.options.marker_scale)
        });
        let mut point_radius = initial_radius;
        let mut marker_scale = initial_scale;

        let panel_response = egui::SidePanel::left("control_panel")
            .default_width(300.0)
            .show(&egui.context, |ui| {
                ui.heading("sparseview");
                ui.label(&self.panel.status);
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Workspaces");
                    if ui.small_button("Refresh").clicked() {
                        refresh_requested = true;
                    }
                });
                if self.panel.workspaces.is_empty() {
                    ui.weak("none available");
                }
                for name in &self.panel.workspaces {
                    let is_active = self.panel.active.as_deref() == Some(name.as_str());
                    if ui.selectable_label(is_active, name).clicked() {
                        load_requested = Some(name.clone());
                    }
                }

                ui.separator();
                ui.label("Display");
                ui.horizontal(|ui| {
                    ui.label("Point size:");
                    ui.add(
                        egui::Slider::new(&mut point_radius, 0.0005..=0.05)
                            .logarithmic(true)
                            .show_value(false),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Camera size:");
                    ui.add(egui::Slider::new(&mut marker_scale, 0.01..=0.5).show_value(false));
                });
                ui.horizontal(|ui| {
                    ui.label("Background:");
                    let background = crate::with_context(|ctx| ctx.options.background_color);
                    let mut color = [background.x, background.y, background.z];
                    if ui.color_edit_button_rgb(&mut color).changed() {
                        crate::with_context_mut(|ctx| {
                            ctx.options.background_color =
                                crate::Vec3::new(color[0], color[1], color[2]);
                        });
                    }
                });

                ui.separator();
                let (num_clouds, num_markers) = crate::with_context(|ctx| {
                    (
                        ctx.registry.count_of_type("PointCloud"),
                        ctx.registry.count_of_type("CameraMarker"),
                    )
                });
                ui.label(format!("{num_clouds} point clouds, {num_markers} cameras"));

                // Per-structure sub-panels
                crate::with_context_mut(|ctx| {
                    for structure in ctx.registry.iter_mut() {
                        let id = format!("{}::{}", structure.type_name(), structure.name());
                        egui::CollapsingHeader::new(structure.name())
                            .id_salt(id)
                            .show(ui, |ui| {
                                if let Some(pc) =
                                    structure.as_any_mut().downcast_mut::<super::PointCloud>()
                                {
                                    pc.build_egui_ui(ui);
                                } else if let Some(marker) =
                                    structure.as_any_mut().downcast_mut::<super::CameraMarker>()
                                {
                                    marker.build_egui_ui(ui);
                                }
                            });
                    }
                });
            });

        // Keep the camera-control dead zone in sync with the actual panel width.
        self.left_panel_width = f64::from(panel_response.response.rect.width());

        let egui_output = egui.end_frame(window);

        // Propagate slider changes through the options to all structures.
        if (point_radius - initial_radius).abs() > f32::EPSILON {
            crate::set_all_point_radii(point_radius);
        }
        if (marker_scale - initial_scale).abs() > f32::EPSILON {
            crate::set_all_marker_scales(marker_scale);
        }

        if refresh_requested {
            self.refresh_workspace_list();
        }

        UiResult {
            egui_output,
            load_requested,
        }
    }
}
