//! All-to-all batch computation of per-target profile statistics
//!
//! Sweeps every stop (or a caller-provided subset) as a single-element
//! target set, reusing one engine instance across iterations, and writes
//! one versioned result file per target. A target whose reduction fails
//! the validity invariant is skipped and reported; the batch keeps going.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::model::{RoutingConfig, TimeWindow};
use crate::pipeline::cache::{batch_statistics_path, store};
use crate::pipeline::stats::{ObservableTable, reduce_profiles};
use crate::profiler::{ProfileEngine, Profiler};
use crate::{Error, StopId};

/// Contents of one per-target result file.
#[derive(Debug, Serialize, Deserialize)]
pub struct TargetStatistics {
    pub target: StopId,
    pub params: RoutingConfig,
    pub stats: ObservableTable,
}

/// What happened to one target of the batch.
#[derive(Debug, PartialEq, Eq)]
pub enum TargetOutcome {
    Written { target: StopId, path: PathBuf },
    Skipped { target: StopId, reason: String },
}

/// Runs the profile scan and statistics reduction for every target in
/// `targets` (default: all of `stop_order`), persisting one result file
/// per target under `results_dir`.
///
/// Engine failures and validity violations are isolated per target: the
/// target is skipped with a logged reason and the batch continues. I/O
/// and codec failures abort the whole batch. Duplicate target ids simply
/// overwrite their earlier file with identical content.
pub fn compute_all_to_all_statistics<E: ProfileEngine>(
    profiler: &mut Profiler<E>,
    stop_order: &[StopId],
    targets: Option<&[StopId]>,
    analysis_window: TimeWindow,
    results_dir: &Path,
) -> Result<Vec<TargetOutcome>, Error> {
    let targets = targets.unwrap_or(stop_order);
    let mut outcomes = Vec::with_capacity(targets.len());

    for (i, &target) in targets.iter().enumerate() {
        info!("batch target {target} ({}/{})", i + 1, targets.len());
        profiler.retarget(&[target]);

        let reduced = profiler
            .run()
            .and_then(|data| {
                let stats = reduce_profiles(&data.profiles, stop_order, analysis_window)?;
                Ok((data.params, stats))
            });

        match reduced {
            Ok((params, stats)) => {
                let path = batch_statistics_path(results_dir, target);
                store(&path, &TargetStatistics { target, params, stats })?;
                outcomes.push(TargetOutcome::Written { target, path });
            }
            Err(err @ (Error::NegativeObservable { .. } | Error::Engine(_))) => {
                warn!("skipping target {target}: {err}");
                outcomes.push(TargetOutcome::Skipped {
                    target,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(outcomes)
}
