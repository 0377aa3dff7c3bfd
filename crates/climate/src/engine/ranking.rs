use itertools::Itertools;

use super::model::{ActivityRank, Observation};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("No stations found in the dataset")]
pub struct NoActiveStation;

/// Count observations per station, ordered by station id
pub fn count_by_station(observations: &[Observation]) -> Vec<ActivityRank> {
    observations
        .iter()
        .counts_by(|observation| observation.station_id.as_str())
        .into_iter()
        .map(|(station_id, count)| ActivityRank {
            station_id: station_id.to_owned(),
            count: count as u64,
        })
        .sorted_by(|a, b| a.station_id.cmp(&b.station_id))
        .collect()
}

/// Pick the station with the most observations.
///
/// Equal counts resolve to the lexicographically smallest station id, so the
/// answer never depends on the order the store returned rows in.
pub fn most_active_station<I>(ranks: I) -> Result<ActivityRank, NoActiveStation>
where
    I: IntoIterator<Item = ActivityRank>,
{
    ranks
        .into_iter()
        .min_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.station_id.cmp(&b.station_id))
        })
        .ok_or(NoActiveStation)
}
