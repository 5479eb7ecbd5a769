//! Per-variant engagement counters and the patch type that updates them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Counter an experiment optimizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMetric {
    /// Content views
    Views,
    /// Likes/reactions
    Likes,
    /// Shares/reposts
    Shares,
    /// Comments
    Comments,
    /// Link clicks
    Clicks,
}

impl TargetMetric {
    /// All supported target metrics.
    pub const ALL: [Self; 5] = [
        Self::Views,
        Self::Likes,
        Self::Shares,
        Self::Comments,
        Self::Clicks,
    ];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Likes => "likes",
            Self::Shares => "shares",
            Self::Comments => "comments",
            Self::Clicks => "clicks",
        }
    }
}

impl fmt::Display for TargetMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| Error::UnknownTargetMetric(s.to_string()))
    }
}

/// Engagement counters for one variant.
///
/// `engagement_rate` is derived and only changes through [`Metrics::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Content views (also the variant's sample size)
    pub views: u64,
    /// Likes
    pub likes: u64,
    /// Shares
    pub shares: u64,
    /// Comments
    pub comments: u64,
    /// Link clicks
    pub clicks: u64,
    /// Saves/bookmarks
    pub saves: u64,
    /// Unique accounts reached
    pub reach: u64,
    /// Total impressions
    pub impressions: u64,
    engagement_rate: f64,
}

impl Metrics {
    /// Percentage engagement: `100 × (likes + shares + comments + saves) / D`,
    /// where `D` is reach, falling back to impressions, then views.
    #[must_use]
    pub const fn engagement_rate(&self) -> f64 {
        self.engagement_rate
    }

    /// Raw value of the given target counter.
    #[must_use]
    pub const fn value_of(&self, metric: TargetMetric) -> u64 {
        match metric {
            TargetMetric::Views => self.views,
            TargetMetric::Likes => self.likes,
            TargetMetric::Shares => self.shares,
            TargetMetric::Comments => self.comments,
            TargetMetric::Clicks => self.clicks,
        }
    }

    /// Overwrite every field present in `patch`, then recompute the
    /// engagement rate from the merged counters.
    ///
    /// Values replace the stored counters; they are never added to them.
    pub fn apply(&mut self, patch: &MetricsPatch) {
        let overwrite = |slot: &mut u64, value: Option<u64>| {
            if let Some(v) = value {
                *slot = v;
            }
        };

        overwrite(&mut self.views, patch.views);
        overwrite(&mut self.likes, patch.likes);
        overwrite(&mut self.shares, patch.shares);
        overwrite(&mut self.comments, patch.comments);
        overwrite(&mut self.clicks, patch.clicks);
        overwrite(&mut self.saves, patch.saves);
        overwrite(&mut self.reach, patch.reach);
        overwrite(&mut self.impressions, patch.impressions);

        self.engagement_rate = self.compute_engagement_rate();
    }

    #[allow(clippy::cast_precision_loss)]
    fn compute_engagement_rate(&self) -> f64 {
        let denominator = [self.reach, self.impressions, self.views]
            .into_iter()
            .find(|&d| d > 0)
            .unwrap_or(0);
        if denominator == 0 {
            return 0.0;
        }

        let engaged = self
            .likes
            .saturating_add(self.shares)
            .saturating_add(self.comments)
            .saturating_add(self.saves);
        100.0 * engaged as f64 / denominator as f64
    }
}

/// Partial metrics update. Absent fields leave stored values untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsPatch {
    /// New views value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    /// New likes value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// New shares value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
    /// New comments value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    /// New clicks value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<u64>,
    /// New saves value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saves: Option<u64>,
    /// New reach value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reach: Option<u64>,
    /// New impressions value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impressions: Option<u64>,
}

macro_rules! patch_setter {
    ($($field:ident),* $(,)?) => {
        $(
            #[doc = concat!("Set `", stringify!($field), "`.")]
            #[must_use]
            pub const fn $field(mut self, value: u64) -> Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

impl MetricsPatch {
    /// Empty patch (changes nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    patch_setter!(views, likes, shares, comments, clicks, saves, reach, impressions);

    /// True if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
