//! On-disk blob cache keyed by target-set fingerprints
//!
//! Computed profile sets and observable tables are persisted as versioned
//! JSON blobs, one file per fingerprint. There is no TTL and no automatic
//! invalidation; staleness is the caller's responsibility via the
//! `recompute` flag. A cache miss is not an error, it is the normal
//! trigger for recomputation.

use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::TimeWindow;
use crate::pipeline::stats::{ObservableTable, reduce_profiles};
use crate::profiler::{ProfileData, ProfileEngine, Profiler};
use crate::{Error, StopId};

/// Bumped on every incompatible change to a persisted payload type.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, serde::Deserialize)]
struct CacheEnvelope<T> {
    schema_version: u32,
    payload: T,
}

#[derive(Debug, serde::Deserialize)]
struct VersionProbe {
    schema_version: u32,
}

/// Canonical cache key for a target set: ids sorted, deduplicated and
/// joined with underscores, so `{1, 2}` and `{2, 1}` address the same
/// entry.
pub fn target_fingerprint(targets: &[StopId]) -> String {
    let mut sorted = targets.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.iter().join("_")
}

pub fn profile_cache_path(results_dir: &Path, targets: &[StopId]) -> PathBuf {
    results_dir.join(format!("node_profile_{}.json", target_fingerprint(targets)))
}

pub fn statistics_cache_path(results_dir: &Path, targets: &[StopId]) -> PathBuf {
    results_dir.join(format!(
        "node_profile_statistics_{}.json",
        target_fingerprint(targets)
    ))
}

pub fn batch_statistics_path(results_dir: &Path, target: StopId) -> PathBuf {
    results_dir.join(format!("all_to_all_stats_target_{target}.json"))
}

/// Persists a versioned blob. The write goes through a sibling temp file
/// and an atomic rename so an interrupted write never leaves a torn blob
/// at `path`.
pub(crate) fn store<T: Serialize>(path: &Path, payload: &T) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let envelope = CacheEnvelope {
        schema_version: CACHE_SCHEMA_VERSION,
        payload,
    };
    let bytes = serde_json::to_vec(&envelope)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a versioned blob, failing loudly on a schema-version mismatch
/// instead of misreading a blob written by an incompatible writer.
pub(crate) fn load<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let bytes = fs::read(path)?;
    let probe: VersionProbe = serde_json::from_slice(&bytes)?;
    if probe.schema_version != CACHE_SCHEMA_VERSION {
        return Err(Error::CacheSchema {
            path: path.display().to_string(),
            found: probe.schema_version,
            expected: CACHE_SCHEMA_VERSION,
        });
    }
    let envelope: CacheEnvelope<T> = serde_json::from_slice(&bytes)?;
    Ok(envelope.payload)
}

/// Loads the blob at `path` unless `recompute` is set or the entry is
/// missing, in which case `compute` runs and its result is persisted
/// before being returned.
pub fn get_or_compute<T, F>(path: &Path, recompute: bool, compute: F) -> Result<T, Error>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Result<T, Error>,
{
    if !recompute && path.exists() {
        info!("Loading precomputed data from '{}'", path.display());
        return load(path);
    }
    info!("Recomputing '{}'", path.display());
    let value = compute()?;
    store(path, &value)?;
    Ok(value)
}

/// Per-stop profiles for `targets`, from cache or freshly computed.
pub fn get_profile_data<E: ProfileEngine>(
    profiler: &mut Profiler<E>,
    results_dir: &Path,
    targets: &[StopId],
    recompute: bool,
) -> Result<ProfileData, Error> {
    let path = profile_cache_path(results_dir, targets);
    get_or_compute(&path, recompute, || {
        profiler.retarget(targets);
        profiler.run()
    })
}

/// Observable table for `targets`, from cache or reduced from (possibly
/// cached) profiles. `recompute_profiles` implies recomputing the
/// statistics as well.
#[allow(clippy::too_many_arguments)]
pub fn get_node_profile_statistics<E: ProfileEngine>(
    profiler: &mut Profiler<E>,
    results_dir: &Path,
    targets: &[StopId],
    stop_order: &[StopId],
    analysis_window: TimeWindow,
    recompute: bool,
    recompute_profiles: bool,
) -> Result<ObservableTable, Error> {
    let recompute = recompute || recompute_profiles;
    let path = statistics_cache_path(results_dir, targets);
    get_or_compute(&path, recompute, || {
        let data = get_profile_data(profiler, results_dir, targets, recompute_profiles)?;
        reduce_profiles(&data.profiles, stop_order, analysis_window)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fingerprint_is_order_insensitive_and_deduplicated() {
        assert_eq!(target_fingerprint(&[2, 1]), "1_2");
        assert_eq!(target_fingerprint(&[1, 2]), "1_2");
        assert_eq!(target_fingerprint(&[3, 3]), "3");
        assert_eq!(target_fingerprint(&[115]), "115");
    }

    #[test]
    fn second_get_does_not_recompute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.json");
        let calls = Cell::new(0u32);
        let compute = || {
            calls.set(calls.get() + 1);
            Ok(vec![1u32, 2, 3])
        };

        let first: Vec<u32> = get_or_compute(&path, false, compute).unwrap();
        let second: Vec<u32> = get_or_compute(&path, false, || {
            calls.set(calls.get() + 1);
            Ok(vec![9u32])
        })
        .unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn recompute_overwrites_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.json");
        let _: Vec<u32> = get_or_compute(&path, false, || Ok(vec![1u32])).unwrap();
        let fresh: Vec<u32> = get_or_compute(&path, true, || Ok(vec![2u32])).unwrap();
        assert_eq!(fresh, vec![2]);
        let reloaded: Vec<u32> = get_or_compute(&path, false, || unreachable!()).unwrap();
        assert_eq!(reloaded, vec![2]);
    }

    #[test]
    fn schema_version_mismatch_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.json");
        fs::write(&path, r#"{"schema_version":999,"payload":[1]}"#).unwrap();
        let err = load::<Vec<u32>>(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::CacheSchema { found: 999, expected: CACHE_SCHEMA_VERSION, .. }
        ));
    }

    #[test]
    fn cached_profile_data_skips_the_engine() {
        use crate::model::{Connection, PartialRoutingConfig, TimeWindow, WalkGraph};
        use crate::profiler::stub::StubEngine;

        let dir = tempfile::tempdir().unwrap();
        let params = PartialRoutingConfig::default()
            .resolve(TimeWindow::new(0, 1000))
            .0;
        let connections = vec![Connection {
            dep_stop: 1,
            arr_stop: 2,
            dep_time: 100,
            arr_time: 200,
            trip: 1,
            seq: 0,
        }];
        let mut profiler =
            Profiler::new(connections, WalkGraph::new(), Some(vec![2]), params, StubEngine::trivial)
                .unwrap();

        let first = get_profile_data(&mut profiler, dir.path(), &[2, 1], false).unwrap();
        let second = get_profile_data(&mut profiler, dir.path(), &[2, 1], false).unwrap();
        assert_eq!(profiler.engine().runs, 1);
        assert_eq!(first.profiles, second.profiles);

        // Same set in a different order hits the same entry.
        let _ = get_profile_data(&mut profiler, dir.path(), &[1, 2], false).unwrap();
        assert_eq!(profiler.engine().runs, 1);

        let _ = get_profile_data(&mut profiler, dir.path(), &[2, 1], true).unwrap();
        assert_eq!(profiler.engine().runs, 2);
    }

    #[test]
    fn statistics_are_cached_and_recomputable() {
        use crate::model::{Connection, PartialRoutingConfig, TimeWindow, WalkGraph};
        use crate::profiler::stub::StubEngine;

        let dir = tempfile::tempdir().unwrap();
        let window = TimeWindow::new(0, 1000);
        let params = PartialRoutingConfig::default().resolve(window).0;
        let connections = vec![Connection {
            dep_stop: 1,
            arr_stop: 2,
            dep_time: 100,
            arr_time: 200,
            trip: 1,
            seq: 0,
        }];
        let mut profiler =
            Profiler::new(connections, WalkGraph::new(), Some(vec![2]), params, StubEngine::trivial)
                .unwrap();

        let stop_order = [1, 2];
        let stats = get_node_profile_statistics(
            &mut profiler, dir.path(), &[2], &stop_order, window, false, false,
        )
        .unwrap();
        assert_eq!(stats.column("n_pareto_optimal_trips"), Some(&[0.0, 1.0][..]));
        assert_eq!(profiler.engine().runs, 1);

        // Cached on the statistics level: neither profiles nor stats rerun.
        let again = get_node_profile_statistics(
            &mut profiler, dir.path(), &[2], &stop_order, window, false, false,
        )
        .unwrap();
        // NaN columns defeat direct equality, compare the encoded form.
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            serde_json::to_string(&again).unwrap()
        );
        assert_eq!(profiler.engine().runs, 1);

        // recompute_profiles forces the whole chain.
        let _ = get_node_profile_statistics(
            &mut profiler, dir.path(), &[2], &stop_order, window, false, true,
        )
        .unwrap();
        assert_eq!(profiler.engine().runs, 2);
    }

    #[test]
    fn store_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.json");
        store(&path, &vec![1u32, 2]).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
