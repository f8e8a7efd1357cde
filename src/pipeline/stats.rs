//! Reduction of per-stop profiles to scalar observables
//!
//! For every stop in the canonical node-table order, each registered
//! observable maps the stop's profile (restricted to the analysis window)
//! to one scalar. Travel-time-like observables of an unreachable stop are
//! infinite, boarding counts of an empty profile are NaN; a negative
//! finite value is always a bug and aborts the reduction.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{JourneyAlternative, StopProfile, StopProfiles, TimeWindow};
use crate::{Error, StopId};

/// One profile restricted to journeys departing inside the analysis
/// window; the unit every observable is evaluated against.
pub struct ProfileAnalysis {
    journeys: Vec<JourneyAlternative>,
}

impl ProfileAnalysis {
    pub fn new(profile: &StopProfile, window: TimeWindow) -> Self {
        let journeys = profile
            .alternatives()
            .iter()
            .filter(|alt| window.contains(alt.dep_time))
            .copied()
            .collect();
        Self { journeys }
    }

    fn durations(&self) -> Vec<f64> {
        self.journeys
            .iter()
            .map(|alt| f64::from(alt.arr_time) - f64::from(alt.dep_time))
            .collect()
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn n_pareto_optimal_trips(&self) -> f64 {
        self.journeys.len() as f64
    }

    pub fn min_trip_duration(&self) -> f64 {
        self.durations().into_iter().fold(f64::INFINITY, f64::min)
    }

    pub fn max_trip_duration(&self) -> f64 {
        if self.journeys.is_empty() {
            return f64::INFINITY;
        }
        self.durations().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn mean_trip_duration(&self) -> f64 {
        if self.journeys.is_empty() {
            return f64::INFINITY;
        }
        let durations = self.durations();
        durations.iter().sum::<f64>() / durations.len() as f64
    }

    pub fn median_trip_duration(&self) -> f64 {
        if self.journeys.is_empty() {
            return f64::INFINITY;
        }
        median(self.durations())
    }

    pub fn min_n_boardings(&self) -> f64 {
        self.journeys
            .iter()
            .map(|alt| f64::from(alt.n_boardings))
            .fold(f64::NAN, f64::min)
    }

    pub fn max_n_boardings(&self) -> f64 {
        self.journeys
            .iter()
            .map(|alt| f64::from(alt.n_boardings))
            .fold(f64::NAN, f64::max)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn mean_n_boardings(&self) -> f64 {
        if self.journeys.is_empty() {
            return f64::NAN;
        }
        let total: f64 = self.journeys.iter().map(|alt| f64::from(alt.n_boardings)).sum();
        total / self.journeys.len() as f64
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

type ObservableFn = fn(&ProfileAnalysis) -> f64;

/// Registered observables, in the order their columns appear.
pub const OBSERVABLES: &[(&str, ObservableFn)] = &[
    ("n_pareto_optimal_trips", ProfileAnalysis::n_pareto_optimal_trips),
    ("min_trip_duration", ProfileAnalysis::min_trip_duration),
    ("mean_trip_duration", ProfileAnalysis::mean_trip_duration),
    ("median_trip_duration", ProfileAnalysis::median_trip_duration),
    ("max_trip_duration", ProfileAnalysis::max_trip_duration),
    ("min_n_boardings", ProfileAnalysis::min_n_boardings),
    ("mean_n_boardings", ProfileAnalysis::mean_n_boardings),
    ("max_n_boardings", ProfileAnalysis::max_n_boardings),
];

/// Observable name to one value per stop, positionally aligned with the
/// node-table stop order the table was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservableTable {
    columns: BTreeMap<String, Vec<f64>>,
}

impl ObservableTable {
    fn push(&mut self, observable: &str, value: f64) {
        self.columns.entry(observable.to_string()).or_default().push(value);
    }

    pub fn column(&self, observable: &str) -> Option<&[f64]> {
        self.columns.get(observable).map(Vec::as_slice)
    }

    pub fn observable_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn n_observables(&self) -> usize {
        self.columns.len()
    }
}

/// Reduces per-stop profiles to an [`ObservableTable`].
///
/// Stops missing from `profiles` (unreachable or excluded) are treated as
/// having a finalized empty profile. NaN values are reported at debug
/// level since they may flag an observable unintentionally left undefined
/// for a reachable stop.
///
/// # Errors
///
/// [`Error::NegativeObservable`] as soon as any value is finite and
/// negative; valid values are NaN, infinite or non-negative.
pub fn reduce_profiles(
    profiles: &StopProfiles,
    stop_order: &[StopId],
    analysis_window: TimeWindow,
) -> Result<ObservableTable, Error> {
    let empty = StopProfile::empty();
    let mut table = ObservableTable::default();
    for &stop in stop_order {
        let profile = profiles.get(&stop).unwrap_or(&empty);
        let analysis = ProfileAnalysis::new(profile, analysis_window);
        for &(observable, compute) in OBSERVABLES {
            let value = compute(&analysis);
            if value.is_nan() {
                debug!("observable '{observable}' is undefined for stop {stop}");
            }
            if !(value.is_nan() || value.is_infinite() || value >= 0.0) {
                return Err(Error::NegativeObservable {
                    observable,
                    stop,
                    value,
                });
            }
            table.push(observable, value);
        }
    }
    Ok(table)
}

/// JSON has no literal for non-finite floats, so columns round-trip
/// through this representation: finite values stay numbers, the rest
/// become the strings `"inf"`, `"-inf"` and `"nan"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ColumnValue {
    Finite(f64),
    Special(SpecialValue),
}

#[derive(Serialize, Deserialize)]
enum SpecialValue {
    #[serde(rename = "inf")]
    Inf,
    #[serde(rename = "-inf")]
    NegInf,
    #[serde(rename = "nan")]
    Nan,
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            ColumnValue::Special(SpecialValue::Nan)
        } else if value == f64::INFINITY {
            ColumnValue::Special(SpecialValue::Inf)
        } else if value == f64::NEG_INFINITY {
            ColumnValue::Special(SpecialValue::NegInf)
        } else {
            ColumnValue::Finite(value)
        }
    }
}

impl From<ColumnValue> for f64 {
    fn from(value: ColumnValue) -> Self {
        match value {
            ColumnValue::Finite(x) => x,
            ColumnValue::Special(SpecialValue::Inf) => f64::INFINITY,
            ColumnValue::Special(SpecialValue::NegInf) => f64::NEG_INFINITY,
            ColumnValue::Special(SpecialValue::Nan) => f64::NAN,
        }
    }
}

impl Serialize for ObservableTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded: BTreeMap<&str, Vec<ColumnValue>> = self
            .columns
            .iter()
            .map(|(name, column)| {
                (name.as_str(), column.iter().map(|&x| ColumnValue::from(x)).collect())
            })
            .collect();
        encoded.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObservableTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = BTreeMap::<String, Vec<ColumnValue>>::deserialize(deserializer)?;
        let columns = encoded
            .into_iter()
            .map(|(name, column)| (name, column.into_iter().map(f64::from).collect()))
            .collect();
        Ok(Self { columns })
    }
}
