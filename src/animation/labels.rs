use std::time::Duration;

/// Where a label is in its enter/leave cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPhase {
    /// Fading in.
    Entering,
    /// Fully shown.
    Present,
    /// Fading out; removed once its transition completes.
    Leaving,
}

/// One tracked label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelEntry {
    /// Stable identity of the label.
    pub key: String,
    /// Current phase.
    pub phase: LabelPhase,
    since: Duration,
}

/// Enter/leave bookkeeping for keyed labels.
///
/// Uses the same duration as the path tween so labels and shapes settle
/// together. With animation disabled every transition completes immediately.
#[derive(Clone, Debug)]
pub struct LabelTransitions {
    duration: Duration,
    animated: bool,
    entries: Vec<LabelEntry>,
}

/// Stable key for a stage label: lower-cased, spaces replaced by `-`.
pub fn label_key(label: &str) -> String {
    label.to_lowercase().replace(' ', "-")
}

impl LabelTransitions {
    /// Empty tracker.
    pub fn new(duration: Duration, animated: bool) -> Self {
        Self {
            duration,
            animated,
            entries: Vec::new(),
        }
    }

    /// Turn transitions on or off; turning them off settles everything now.
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
        if !animated {
            self.settle();
        }
    }

    /// Change the transition length for later syncs and ticks.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Replace the visible key set.
    ///
    /// New keys enter, missing keys leave, keys that come back while leaving
    /// enter again. Visible keys keep the given order; leaving keys follow.
    pub fn sync(&mut self, keys: &[String], now: Duration) {
        let mut next = Vec::with_capacity(keys.len() + self.entries.len());
        for key in keys {
            let entry = match self.entries.iter().find(|e| &e.key == key) {
                Some(e) if e.phase != LabelPhase::Leaving => e.clone(),
                _ => LabelEntry {
                    key: key.clone(),
                    phase: LabelPhase::Entering,
                    since: now,
                },
            };
            next.push(entry);
        }
        for old in &self.entries {
            if keys.contains(&old.key) {
                continue;
            }
            let since = if old.phase == LabelPhase::Leaving {
                old.since
            } else {
                now
            };
            next.push(LabelEntry {
                key: old.key.clone(),
                phase: LabelPhase::Leaving,
                since,
            });
        }
        self.entries = next;

        if !self.animated {
            self.settle();
        }
    }

    /// Advance transitions; returns whether any is still running.
    pub fn tick(&mut self, now: Duration) -> bool {
        let duration = self.duration;
        let done = |e: &LabelEntry| now.saturating_sub(e.since) >= duration;
        self.entries
            .retain(|e| !(e.phase == LabelPhase::Leaving && done(e)));
        for e in &mut self.entries {
            if e.phase == LabelPhase::Entering && done(&*e) {
                e.phase = LabelPhase::Present;
            }
        }
        !self.is_settled()
    }

    /// Whether nothing is entering or leaving.
    pub fn is_settled(&self) -> bool {
        self.entries.iter().all(|e| e.phase == LabelPhase::Present)
    }

    /// Tracked labels, visible order first, then leaving ones.
    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    /// Opacity of `key` at `now` (0 when unknown).
    pub fn opacity(&self, key: &str, now: Duration) -> f64 {
        let Some(e) = self.entries.iter().find(|e| e.key == key) else {
            return 0.0;
        };
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_sub(e.since).as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        match e.phase {
            LabelPhase::Present => 1.0,
            LabelPhase::Entering => progress,
            LabelPhase::Leaving => 1.0 - progress,
        }
    }

    fn settle(&mut self) {
        self.entries.retain(|e| e.phase != LabelPhase::Leaving);
        for e in &mut self.entries {
            e.phase = LabelPhase::Present;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/labels.rs"]
mod tests;
