use crate::plot::{BandScale, MONTH_BANDS, SlotScale, metric_color, relax_band};
use crate::tweets::{ColorMetric, TweetDataset};

use super::{BandRow, ScenePoint, SwarmScene, ViewModel, ViewScratch};

impl SwarmScene {
    /// Lays out and colors the whole dataset. Records keep their input order
    /// within a band, so identical input always produces identical output.
    pub(in crate::app) fn build(dataset: &TweetDataset, metric: ColorMetric) -> Self {
        let band_scale = BandScale::new(MONTH_BANDS.len());
        let mut bands = Vec::with_capacity(MONTH_BANDS.len());
        let mut points = Vec::with_capacity(dataset.record_count());

        for (band_index, label) in MONTH_BANDS.iter().enumerate() {
            let members: Vec<usize> = dataset
                .records
                .iter()
                .enumerate()
                .filter_map(|(index, record)| (record.month == *label).then_some(index))
                .collect();

            let row_center = band_scale.center(band_index);
            bands.push(BandRow {
                label,
                center_y: row_center,
                count: members.len(),
            });

            if members.is_empty() {
                continue;
            }

            let slot_scale = SlotScale::new(members.len());
            let slots: Vec<f32> = (0..members.len())
                .map(|rank| slot_scale.slot(rank))
                .collect();
            let positions = relax_band(&slots, row_center);

            for (&record_index, position) in members.iter().zip(positions) {
                let record = &dataset.records[record_index];
                points.push(ScenePoint {
                    record: record_index,
                    pos: position,
                    fill: metric_color(metric, record.metric(metric)),
                });
            }
        }

        let dropped = dataset.record_count() - points.len();

        Self {
            points,
            bands,
            dropped,
            view_scratch: ViewScratch::default(),
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn rebuild_scene(&mut self) {
        self.scene_revision = self.scene_revision.wrapping_add(1);
        self.search_match_cache = None;
        self.scene = Some(SwarmScene::build(&self.dataset, self.metric));
        self.scene_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::MIN_SEPARATION;
    use crate::tweets::TweetRecord;
    use eframe::egui::Color32;

    fn record(id: &str, month: &str, sentiment: f32, subjectivity: f32) -> TweetRecord {
        TweetRecord {
            id: id.to_owned(),
            month: month.to_owned(),
            sentiment,
            subjectivity,
            text: format!("tweet {id}"),
        }
    }

    fn dataset(records: Vec<TweetRecord>) -> TweetDataset {
        TweetDataset {
            source: "test.json".to_owned(),
            records,
            skipped: 0,
        }
    }

    #[test]
    fn bands_group_records_in_input_order() {
        let data = dataset(vec![
            record("0", "March", 0.1, 0.1),
            record("1", "April", 0.2, 0.2),
            record("2", "March", 0.3, 0.3),
            record("3", "May", 0.4, 0.4),
            record("4", "March", 0.5, 0.5),
        ]);
        let scene = SwarmScene::build(&data, ColorMetric::Sentiment);

        let order: Vec<usize> = scene.points.iter().map(|point| point.record).collect();
        assert_eq!(order, [0, 2, 4, 1, 3]);

        // Sparse bands never collide, so ranks read left to right.
        assert!(scene.points[0].pos.x < scene.points[1].pos.x);
        assert!(scene.points[1].pos.x < scene.points[2].pos.x);

        let counts: Vec<usize> = scene.bands.iter().map(|band| band.count).collect();
        assert_eq!(counts, [3, 1, 1]);
    }

    #[test]
    fn unknown_months_are_dropped_but_counted() {
        let data = dataset(vec![
            record("0", "March", 0.0, 0.0),
            record("1", "June", 0.0, 0.0),
            record("2", "", 0.0, 0.0),
        ]);
        let scene = SwarmScene::build(&data, ColorMetric::Sentiment);

        assert_eq!(scene.points.len(), 1);
        assert_eq!(scene.dropped, 2);
    }

    #[test]
    fn empty_dataset_still_reserves_all_band_rows() {
        let scene = SwarmScene::build(&dataset(Vec::new()), ColorMetric::Sentiment);

        assert!(scene.points.is_empty());
        assert_eq!(scene.dropped, 0);
        assert_eq!(scene.bands.len(), MONTH_BANDS.len());
        assert!(scene.bands.iter().all(|band| band.count == 0));
        let labels: Vec<&str> = scene.bands.iter().map(|band| band.label).collect();
        assert_eq!(labels, MONTH_BANDS);
    }

    #[test]
    fn march_pair_and_lone_april_follow_the_fixed_scales() {
        let data = dataset(vec![
            record("a", "March", -1.0, 0.2),
            record("b", "March", 1.0, 0.9),
            record("c", "April", 0.0, 0.5),
        ]);
        let scene = SwarmScene::build(&data, ColorMetric::Sentiment);

        assert_eq!(scene.points.len(), 3);
        assert_eq!(scene.points[0].fill, Color32::from_rgb(255, 0, 0));
        assert_eq!(scene.points[1].fill, Color32::from_rgb(0, 128, 0));
        assert_eq!(scene.points[2].fill, Color32::from_rgb(236, 236, 236));

        let first = scene.points[0].pos;
        let second = scene.points[1].pos;
        assert_eq!(first.y, scene.bands[0].center_y);
        assert_eq!(second.y, scene.bands[0].center_y);
        assert!((second.x - first.x).abs() >= MIN_SEPARATION);

        let april = scene.points[2].pos;
        assert_eq!(april.y, scene.bands[1].center_y);
        assert_eq!(april.x, SlotScale::new(1).slot(0));
    }

    #[test]
    fn rebuilds_are_bit_identical() {
        let mut records = Vec::new();
        for index in 0..90 {
            records.push(record(
                &index.to_string(),
                "April",
                (index as f32 / 45.0) - 1.0,
                index as f32 / 90.0,
            ));
        }
        let data = dataset(records);

        let first = SwarmScene::build(&data, ColorMetric::Sentiment);
        let second = SwarmScene::build(&data, ColorMetric::Sentiment);
        assert_eq!(first.points, second.points);
    }

    #[test]
    fn scheme_switch_recolors_without_moving_points() {
        let data = dataset(vec![
            record("a", "March", -0.8, 0.1),
            record("b", "March", 0.4, 0.6),
            record("c", "April", 0.9, 1.0),
            record("d", "May", 0.0, 0.0),
        ]);

        let by_sentiment = SwarmScene::build(&data, ColorMetric::Sentiment);
        let by_subjectivity = SwarmScene::build(&data, ColorMetric::Subjectivity);

        assert_eq!(by_sentiment.points.len(), by_subjectivity.points.len());
        for (sentiment_point, subjectivity_point) in
            by_sentiment.points.iter().zip(&by_subjectivity.points)
        {
            assert_eq!(sentiment_point.pos, subjectivity_point.pos);

            let record = &data.records[subjectivity_point.record];
            assert_eq!(
                subjectivity_point.fill,
                metric_color(ColorMetric::Subjectivity, record.subjectivity)
            );
            assert_eq!(
                sentiment_point.fill,
                metric_color(ColorMetric::Sentiment, record.sentiment)
            );
        }
    }
}
