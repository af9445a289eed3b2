use eframe::egui::Color32;

use crate::tweets::ColorMetric;

const NEGATIVE_RED: Color32 = Color32::from_rgb(255, 0, 0);
const NEUTRAL_GREY: Color32 = Color32::from_rgb(236, 236, 236);
const POSITIVE_GREEN: Color32 = Color32::from_rgb(0, 128, 0);
const SUBJECTIVE_BLUE: Color32 = Color32::from_rgb(68, 103, 196);

/// Fill color for a metric value. Out-of-range values clamp to the scale
/// endpoints rather than extrapolating.
pub fn metric_color(metric: ColorMetric, value: f32) -> Color32 {
    match metric {
        ColorMetric::Sentiment => {
            let value = value.clamp(-1.0, 1.0);
            if value < 0.0 {
                mix_color(NEGATIVE_RED, NEUTRAL_GREY, value + 1.0)
            } else {
                mix_color(NEUTRAL_GREY, POSITIVE_GREEN, value)
            }
        }
        ColorMetric::Subjectivity => {
            mix_color(NEUTRAL_GREY, SUBJECTIVE_BLUE, value.clamp(0.0, 1.0))
        }
    }
}

/// Gradient description for the legend strip. Stop offsets run 0 at the low
/// end of the metric's domain to 1 at the high end.
pub struct LegendSpec {
    pub stops: &'static [(f32, Color32)],
    pub low_label: &'static str,
    pub high_label: &'static str,
}

impl LegendSpec {
    /// Samples the gradient at a normalized offset. Uses the same blend as
    /// `metric_color`, so the strip always matches the points it explains.
    pub fn color_at(&self, offset: f32) -> Color32 {
        let offset = offset.clamp(0.0, 1.0);
        for window in self.stops.windows(2) {
            let [(start, from), (end, to)] = window else {
                continue;
            };
            if offset <= *end {
                let span = (end - start).max(f32::EPSILON);
                return mix_color(*from, *to, (offset - start) / span);
            }
        }

        match self.stops.last() {
            Some((_, color)) => *color,
            None => NEUTRAL_GREY,
        }
    }
}

pub fn legend_spec(metric: ColorMetric) -> LegendSpec {
    match metric {
        ColorMetric::Sentiment => LegendSpec {
            stops: &[
                (0.0, NEGATIVE_RED),
                (0.5, NEUTRAL_GREY),
                (1.0, POSITIVE_GREEN),
            ],
            low_label: "negative",
            high_label: "positive",
        },
        ColorMetric::Subjectivity => LegendSpec {
            stops: &[(0.0, NEUTRAL_GREY), (1.0, SUBJECTIVE_BLUE)],
            low_label: "objective",
            high_label: "subjective",
        },
    }
}

fn mix_color(from: Color32, to: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgb(
        ((from.r() as f32 * inverse) + (to.r() as f32 * amount)) as u8,
        ((from.g() as f32 * inverse) + (to.g() as f32 * amount)) as u8,
        ((from.b() as f32 * inverse) + (to.b() as f32 * amount)) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_endpoints_hit_exact_colors() {
        assert_eq!(
            metric_color(ColorMetric::Sentiment, -1.0),
            Color32::from_rgb(255, 0, 0)
        );
        assert_eq!(
            metric_color(ColorMetric::Sentiment, 0.0),
            Color32::from_rgb(236, 236, 236)
        );
        assert_eq!(
            metric_color(ColorMetric::Sentiment, 1.0),
            Color32::from_rgb(0, 128, 0)
        );
    }

    #[test]
    fn subjectivity_endpoints_hit_exact_colors() {
        assert_eq!(
            metric_color(ColorMetric::Subjectivity, 0.0),
            Color32::from_rgb(236, 236, 236)
        );
        assert_eq!(
            metric_color(ColorMetric::Subjectivity, 1.0),
            Color32::from_rgb(68, 103, 196)
        );
    }

    #[test]
    fn out_of_range_values_clamp_to_endpoints() {
        assert_eq!(
            metric_color(ColorMetric::Sentiment, -3.5),
            metric_color(ColorMetric::Sentiment, -1.0)
        );
        assert_eq!(
            metric_color(ColorMetric::Sentiment, 2.0),
            metric_color(ColorMetric::Sentiment, 1.0)
        );
        assert_eq!(
            metric_color(ColorMetric::Subjectivity, -0.2),
            metric_color(ColorMetric::Subjectivity, 0.0)
        );
    }

    #[test]
    fn negative_half_blends_red_toward_grey() {
        let halfway = metric_color(ColorMetric::Sentiment, -0.5);
        assert_eq!(halfway, Color32::from_rgb(245, 118, 118));
    }

    #[test]
    fn legend_vocabulary_follows_the_metric() {
        let sentiment = legend_spec(ColorMetric::Sentiment);
        assert_eq!(sentiment.low_label, "negative");
        assert_eq!(sentiment.high_label, "positive");
        assert_eq!(sentiment.stops.len(), 3);

        let subjectivity = legend_spec(ColorMetric::Subjectivity);
        assert_eq!(subjectivity.low_label, "objective");
        assert_eq!(subjectivity.high_label, "subjective");
        assert_eq!(subjectivity.stops.len(), 2);
    }

    #[test]
    fn legend_gradient_matches_point_colors() {
        let sentiment = legend_spec(ColorMetric::Sentiment);
        for step in 0..=10 {
            let offset = step as f32 / 10.0;
            let value = offset * 2.0 - 1.0;
            assert_eq!(
                sentiment.color_at(offset),
                metric_color(ColorMetric::Sentiment, value),
                "sentiment offset {offset}"
            );
        }

        let subjectivity = legend_spec(ColorMetric::Subjectivity);
        for step in 0..=10 {
            let offset = step as f32 / 10.0;
            assert_eq!(
                subjectivity.color_at(offset),
                metric_color(ColorMetric::Subjectivity, offset),
                "subjectivity offset {offset}"
            );
        }
    }
}
