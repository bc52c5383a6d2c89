use anyhow::Context;
use rayon::prelude::*;

use crate::{
    eval::resolver::{FrameResolver, ResolvedFrame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SegueError, SegueResult},
    timeline::schedule::Schedule,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Threading controls for [`resolve_range`].
pub struct ResolveThreading {
    /// Resolve chunks on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Frames handed to the pool per batch; `0` is treated as `1`.
    pub chunk_size: usize,
    /// Pool size; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for ResolveThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Counters collected by [`resolve_range`].
pub struct ResolveStats {
    /// Frames resolved.
    pub frames_total: u64,
    /// Frames that lay outside the timeline and were clamped.
    pub frames_clamped: u64,
    /// Frames with two active scenes.
    pub overlap_frames: u64,
}

impl ResolveStats {
    fn record(&mut self, frame: &ResolvedFrame) {
        self.frames_total += 1;
        self.frames_clamped += u64::from(frame.clamped);
        self.overlap_frames += u64::from(frame.in_transition());
    }
}

/// Resolve every frame of `range` in frame order.
///
/// Parallel output is identical to serial output; only wall-clock time differs.
#[tracing::instrument(skip(schedule, threading), fields(parallel = threading.parallel))]
pub fn resolve_range(
    schedule: &Schedule,
    range: FrameRange,
    threading: &ResolveThreading,
) -> SegueResult<(Vec<ResolvedFrame>, ResolveStats)> {
    if range.is_empty() {
        return Err(SegueError::validation("resolve range must be non-empty"));
    }

    let len = range.len_frames();
    let mut out = Vec::with_capacity(len.min(1 << 16) as usize);

    if !threading.parallel {
        for f in range.start.0..range.end.0 {
            out.push(FrameResolver::resolve(schedule, f as i64));
        }
    } else {
        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let mut frames: Vec<ResolvedFrame> = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| FrameResolver::resolve(schedule, f as i64))
                    .collect()
            });
            out.append(&mut frames);
            chunk_start = chunk_end;
        }
    }

    let mut stats = ResolveStats::default();
    for frame in &out {
        stats.record(frame);
    }
    tracing::debug!(
        frames = stats.frames_total,
        clamped = stats.frames_clamped,
        overlap = stats.overlap_frames,
        "range resolved"
    );
    Ok((out, stats))
}

/// Split `[0, total)` into at most `workers` contiguous, disjoint, non-empty ranges whose
/// lengths differ by at most one frame.
///
/// Fewer ranges come back when `total < workers`; `workers == 0` is treated as `1`.
pub fn partition_frames(total: u64, workers: usize) -> Vec<FrameRange> {
    let n = (workers.max(1) as u64).min(total);
    if n == 0 {
        return Vec::new();
    }
    let base = total / n;
    let rem = total % n;
    let mut out = Vec::with_capacity(n as usize);
    let mut start = 0u64;
    for i in 0..n {
        let len = base + u64::from(i < rem);
        out.push(FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(start + len),
        });
        start += len;
    }
    out
}

fn build_thread_pool(threads: Option<usize>) -> SegueResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SegueError::validation(
            "resolve threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    let pool = builder.build().context("failed to build rayon thread pool")?;
    Ok(pool)
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/batch.rs"]
mod tests;
