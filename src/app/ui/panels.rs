use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::tweets::{ColorMetric, TweetDataset};

use super::super::{SelectionSet, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(dataset: TweetDataset) -> Self {
        let path_input = dataset.source.clone();

        Self {
            dataset,
            metric: ColorMetric::Sentiment,
            search: String::new(),
            path_input,
            selection: SelectionSet::default(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            auto_fit: true,
            show_quadtree_overlay: false,
            scene_dirty: true,
            scene_revision: 0,
            scene: None,
            search_match_cache: None,
            visible_point_count: 0,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        pending_load: &mut Option<String>,
        is_loading: bool,
    ) {
        if self.scene_dirty {
            self.rebuild_scene();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("sentiswarm");
                    ui.separator();
                    ui.label("data:");
                    ui.add(egui::TextEdit::singleline(&mut self.path_input).desired_width(260.0));
                    let load_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Load dataset"));
                    if load_button.clicked() {
                        let path = self.path_input.trim();
                        if !path.is_empty() {
                            *pending_load = Some(path.to_owned());
                        }
                    }
                    ui.label(format!("tweets: {}", self.dataset.record_count()));
                    if self.dataset.skipped > 0 {
                        ui.label(format!("skipped: {}", self.dataset.skipped));
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("visible: {}", self.visible_point_count));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Loading tweet dataset...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_swarm(ui);
            }
        });
    }
}
