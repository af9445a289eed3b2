/// Which numeric tweet attribute drives point coloring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMetric {
    Sentiment,
    Subjectivity,
}

impl ColorMetric {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Subjectivity => "subjectivity",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TweetRecord {
    pub id: String,
    pub month: String,
    /// Sentiment score in [-1, 1].
    pub sentiment: f32,
    /// Subjectivity score in [0, 1].
    pub subjectivity: f32,
    pub text: String,
}

impl TweetRecord {
    pub fn metric(&self, metric: ColorMetric) -> f32 {
        match metric {
            ColorMetric::Sentiment => self.sentiment,
            ColorMetric::Subjectivity => self.subjectivity,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TweetDataset {
    pub source: String,
    pub records: Vec<TweetRecord>,
    /// Input entries dropped during parsing (missing or unusable fields).
    pub skipped: usize,
}

impl TweetDataset {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
