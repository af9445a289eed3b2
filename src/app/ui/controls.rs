use eframe::egui::{self, Ui};

use crate::tweets::ColorMetric;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("View Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search tweet text")
            .on_hover_text("Fuzzy-dim points whose tweet does not match.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();

        ui.label("Color points by");
        let mut metric_changed = false;
        ui.horizontal_wrapped(|ui| {
            metric_changed |= ui
                .selectable_value(&mut self.metric, ColorMetric::Sentiment, "Sentiment")
                .on_hover_text("Red for negative, green for positive tweets.")
                .changed();
            metric_changed |= ui
                .selectable_value(&mut self.metric, ColorMetric::Subjectivity, "Subjectivity")
                .on_hover_text("Blue for opinion-heavy, grey for factual tweets.")
                .changed();
        });
        if metric_changed {
            self.scene_dirty = true;
        }

        ui.separator();

        ui.checkbox(&mut self.show_quadtree_overlay, "Show quadtree overlay")
            .on_hover_text("Draw the collision quadtree over the canvas.");

        if ui.button("Reset view").clicked() {
            self.auto_fit = true;
        }

        ui.separator();

        egui::CollapsingHeader::new("Dataset")
            .default_open(true)
            .show(ui, |ui| {
                ui.label(format!("source: {}", self.dataset.source));
                ui.label(format!("{} tweets loaded", self.dataset.record_count()));
                if self.dataset.skipped > 0 {
                    ui.label(format!(
                        "{} rows skipped while parsing",
                        self.dataset.skipped
                    ));
                }
                if let Some(scene) = &self.scene {
                    if scene.dropped > 0 {
                        ui.label(format!("{} tweets outside known months", scene.dropped));
                    }
                    for band in &scene.bands {
                        ui.label(format!("{}: {} tweets", band.label, band.count));
                    }
                }
            });
    }
}
