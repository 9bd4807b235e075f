use crate::error::{OperationError, Result};
use crate::geometry::Polyline;
use crate::math::vector_3d::lerp;
use crate::math::TOLERANCE;

/// Upper bound on the number of intervals a single resampling may produce.
pub const MAX_INTERVALS: usize = 1_000_000;

/// Redistributes a polyline's points at equal arc-length spacing.
///
/// The spacing is `total_length / count` with
/// `count = max(1, round(total_length / target_step))`, so the intervals
/// partition the path exactly. The first and last input points are copied
/// through unchanged; interior points are interpolated on the original
/// segments. `round` goes half away from zero: a ratio of `2.5` yields 3
/// intervals.
#[derive(Debug)]
pub struct Resample<'a> {
    polyline: &'a Polyline,
    target_step: f64,
}

impl<'a> Resample<'a> {
    /// Creates a new resampling operation.
    #[must_use]
    pub fn new(polyline: &'a Polyline, target_step: f64) -> Self {
        Self {
            polyline,
            target_step,
        }
    }

    /// Executes the resampling.
    ///
    /// Polylines with fewer than 2 points are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `target_step` is not a
    /// positive finite number, if the polyline's length is not finite, or
    /// if the step would cut it into more than [`MAX_INTERVALS`] intervals.
    pub fn execute(&self) -> Result<Polyline> {
        if !(self.target_step.is_finite() && self.target_step > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "target step must be positive and finite, got {}",
                self.target_step
            ))
            .into());
        }

        let points = &self.polyline.points;
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Ok(self.polyline.clone());
        };
        if points.len() < 2 {
            return Ok(self.polyline.clone());
        }

        let seg_lens = self.polyline.segment_lengths();
        let total_length: f64 = seg_lens.iter().sum();
        let count = interval_count(total_length, self.target_step)?;
        #[allow(clippy::cast_precision_loss)]
        let step = total_length / count as f64;

        let mut resampled = Vec::with_capacity(count + 1);
        resampled.push(*first);

        let mut seg_idx = 0;
        let mut seg_acc = 0.0;
        for n in 1..count {
            #[allow(clippy::cast_precision_loss)]
            let target = n as f64 * step;
            while seg_idx < seg_lens.len() && seg_acc + seg_lens[seg_idx] < target {
                seg_acc += seg_lens[seg_idx];
                seg_idx += 1;
            }
            if seg_idx >= seg_lens.len() {
                // Accumulated rounding overshot the path.
                resampled.push(*last);
                continue;
            }

            let seg_len = seg_lens[seg_idx];
            let t = if seg_len < TOLERANCE {
                0.0
            } else {
                (target - seg_acc) / seg_len
            };
            resampled.push(lerp(&points[seg_idx], &points[seg_idx + 1], t));
        }

        resampled.push(*last);

        tracing::debug!(
            input = points.len(),
            output = resampled.len(),
            total_length,
            step,
            "resampled polyline"
        );

        Ok(Polyline::new(resampled))
    }
}

/// Convenience wrapper around [`Resample`].
///
/// # Errors
///
/// See [`Resample::execute`].
pub fn resample(polyline: &Polyline, target_step: f64) -> Result<Polyline> {
    Resample::new(polyline, target_step).execute()
}

/// Number of equal intervals for a path of `total_length`, never below 1.
fn interval_count(total_length: f64, target_step: f64) -> Result<usize> {
    if !total_length.is_finite() {
        return Err(OperationError::InvalidInput(format!(
            "polyline length must be finite, got {total_length}"
        ))
        .into());
    }
    let ratio = (total_length / target_step).round();
    #[allow(clippy::cast_precision_loss)]
    let max_ratio = MAX_INTERVALS as f64;
    if ratio > max_ratio {
        return Err(OperationError::InvalidInput(format!(
            "step {target_step} would split a length of {total_length} into more than \
             {MAX_INTERVALS} intervals"
        ))
        .into());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = ratio as usize;
    Ok(n.max(1))
}
