//! Review rating aggregation.

use serde::Serialize;

/// Rounds to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Returns the mean rating rounded to one decimal, or `None` without reviews.
pub fn average_rating(ratings: &[u8]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    Some(round_to_tenth(f64::from(sum) / ratings.len() as f64))
}

/// Number of reviews with a given star rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarCount {
    pub stars: u8,
    pub count: u32,
    /// Share of all reviews, 0 to 100.
    pub percentage: f64,
}

/// Ratings summary shown above a product's reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Displayed rating: the review mean, or the stored default without reviews.
    pub average: f64,
    pub count: u32,
    /// Five entries, from 5 stars down to 1.
    pub distribution: Vec<StarCount>,
}

impl RatingSummary {
    /// Summarises review ratings, falling back to `stored_rating` when there
    /// are none.
    pub fn from_ratings(ratings: &[u8], stored_rating: f64) -> Self {
        let count = ratings.len() as u32;
        let distribution = (1..=5u8)
            .rev()
            .map(|stars| {
                let matching = ratings.iter().filter(|&&r| r == stars).count() as u32;
                let percentage = if count == 0 {
                    0.0
                } else {
                    f64::from(matching) / f64::from(count) * 100.0
                };
                StarCount {
                    stars,
                    count: matching,
                    percentage,
                }
            })
            .collect();

        Self {
            average: average_rating(ratings).unwrap_or_else(|| round_to_tenth(stored_rating)),
            count,
            distribution,
        }
    }
}
