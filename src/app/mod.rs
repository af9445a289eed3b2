use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, Context, Pos2, Vec2};

use crate::plot::QuadCell;
use crate::tweets::{ColorMetric, TweetDataset, load_dataset};

mod interaction;
mod render_utils;
mod scene;
mod selection;
mod ui;
mod view;

use selection::SelectionSet;

pub struct SwarmApp {
    data_path: String,
    state: AppState,
    reload_rx: Option<Receiver<Result<TweetDataset, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<TweetDataset, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    dataset: TweetDataset,
    metric: ColorMetric,
    search: String,
    path_input: String,
    selection: SelectionSet,
    pan: Vec2,
    zoom: f32,
    auto_fit: bool,
    show_quadtree_overlay: bool,
    scene_dirty: bool,
    scene_revision: u64,
    scene: Option<SwarmScene>,
    search_match_cache: Option<SearchMatchCache>,
    visible_point_count: usize,
}

struct SearchMatchCache {
    query: String,
    scene_revision: u64,
    matches: Arc<HashSet<usize>>,
}

/// Everything the painter needs for one dataset + color scheme, rebuilt whole
/// whenever either changes. Selection toggles never touch it.
struct SwarmScene {
    points: Vec<ScenePoint>,
    bands: Vec<BandRow>,
    /// Records whose month matched no band row.
    dropped: usize,
    view_scratch: ViewScratch,
}

#[derive(Clone, Debug, PartialEq)]
struct ScenePoint {
    record: usize,
    pos: Vec2,
    fill: Color32,
}

struct BandRow {
    label: &'static str,
    center_y: f32,
    count: usize,
}

#[derive(Default)]
struct ViewScratch {
    screen_positions: Vec<Pos2>,
    visible_indices: Vec<usize>,
    quadtree_positions: Vec<Vec2>,
    quadtree_cells: Vec<QuadCell>,
}

impl SwarmApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: String) -> Self {
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: String) -> Receiver<Result<TweetDataset, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&data_path).map_err(|error| error.to_string());
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }
}

impl eframe::App for SwarmApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(dataset) => AppState::Ready(Box::new(ViewModel::new(dataset))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading tweet dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load tweet dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut pending_load = None;
                let is_loading = self.reload_rx.is_some();
                model.show(ctx, &mut pending_load, is_loading);

                if let Some(path) = pending_load
                    && self.reload_rx.is_none()
                {
                    self.data_path = path.clone();
                    self.reload_rx = Some(Self::spawn_load(path));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(dataset) => AppState::Ready(Box::new(ViewModel::new(dataset))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
