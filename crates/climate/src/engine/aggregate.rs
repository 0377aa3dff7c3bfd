use super::{dates::DateRange, model::Observation};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Summary {
    min: f64,
    avg: f64,
    max: f64,
}

/// Min, average and max temperature over a set of observations.
///
/// The three values are either all present or all absent; an empty set has
/// no average, so it has no min or max either.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureAggregate(Option<Summary>);

impl TemperatureAggregate {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn min(&self) -> Option<f64> {
        self.0.map(|s| s.min)
    }

    pub fn avg(&self) -> Option<f64> {
        self.0.map(|s| s.avg)
    }

    pub fn max(&self) -> Option<f64> {
        self.0.map(|s| s.max)
    }
}

/// Two decimal places, exact halves to the even neighbour (`0.125` -> `0.12`)
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Summarize temperatures that have already been filtered to a date range
pub fn summarize<I>(temperatures: I) -> TemperatureAggregate
where
    I: IntoIterator<Item = f64>,
{
    let mut temperatures = temperatures.into_iter();
    let Some(first) = temperatures.next() else {
        return TemperatureAggregate::empty();
    };

    let (min, max, sum, count) = temperatures.fold(
        (first, first, first, 1_usize),
        |(min, max, sum, count), t| (min.min(t), max.max(t), sum + t, count + 1),
    );

    TemperatureAggregate(Some(Summary {
        min: round2(min),
        avg: round2(sum / count as f64),
        max: round2(max),
    }))
}

pub fn aggregate(observations: &[Observation], range: &DateRange) -> TemperatureAggregate {
    summarize(
        observations
            .iter()
            .filter(|observation| range.contains(observation.date))
            .map(|observation| observation.temperature),
    )
}
