use super::{
    dates::DateWindow,
    model::{PrecipitationPoint, PrecipitationReading},
};

/// Build the date-ordered precipitation series for `window`.
///
/// A missing value means no rainfall was recorded and becomes `0`. Readings
/// sharing a date keep the order they were retrieved in.
pub fn series_in_window<I>(readings: I, window: &DateWindow) -> Vec<PrecipitationPoint>
where
    I: IntoIterator<Item = PrecipitationReading>,
{
    let mut series: Vec<PrecipitationPoint> = readings
        .into_iter()
        .filter(|reading| window.contains(reading.date))
        .map(|reading| PrecipitationPoint {
            date: reading.date,
            precipitation: reading.precipitation.unwrap_or(0.0),
        })
        .collect();

    // stable
    series.sort_by_key(|point| point.date);
    series
}
