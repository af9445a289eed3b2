use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selected Tweets");
        ui.add_space(6.0);

        if self.selection.is_empty() {
            ui.label("Click a point on the canvas to pin its tweet here.");
            return;
        }

        ui.label(format!("{} selected, newest first", self.selection.len()));
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .id_salt("selected_tweets_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for entry in self.selection.iter() {
                    ui.group(|ui| {
                        ui.label(RichText::new(format!("tweet {}", entry.id)).strong());
                        if entry.text.is_empty() {
                            ui.label(RichText::new("(no text)").weak());
                        } else {
                            ui.label(entry.text.as_str());
                        }
                    });
                    ui.add_space(4.0);
                }
            });
    }
}
