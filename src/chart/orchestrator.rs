use crate::animation::morph::{MorphOptions, PathInterpolator, PathMorph, ShapeInterpolator};
use crate::animation::tween::{AnimationSettings, Tween, TweenState};
use crate::foundation::core::{BezPath, Origin};
use crate::foundation::error::{FunnelError, FunnelResult};
use crate::geometry::PathSynthesizer;
use crate::geometry::svg_path::to_svg_d;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Immutable snapshot of the rendered segment paths.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathSet {
    generation: u64,
    stages: usize,
    paths: Vec<BezPath>,
}

impl PathSet {
    /// Segment paths, in rendering order.
    pub fn paths(&self) -> &[BezPath] {
        &self.paths
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether there are no segments (before the first draw).
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Publication counter; strictly increases with every published snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of stages the paths were drawn for.
    pub fn stage_count(&self) -> usize {
        self.stages
    }

    /// SVG path data for every segment.
    pub fn to_svg(&self, precision: u8) -> Vec<String> {
        self.paths.iter().map(|p| to_svg_d(p, precision)).collect()
    }

    fn same_shape(&self, other: &PathSet) -> bool {
        self.len() == other.len() && self.stages == other.stages
    }
}

/// Orchestrator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in flight; the rendered set equals the target.
    Idle,
    /// A new target is being synthesized.
    Drawing,
    /// A tween is morphing the rendered set toward the target.
    Animating,
}

/// Pick the morph anchor for a draw.
///
/// Unchanged shapes morph around the center. When segments or stages were added
/// or removed, shapes grow from an edge instead: bottom-left for 1-D data,
/// bottom-right for vertical 2-D charts, middle-left otherwise.
pub fn select_origin(shape_changed: bool, vertical: bool, is_2d: bool) -> Origin {
    if !shape_changed {
        return Origin::CENTER;
    }
    if !is_2d {
        return Origin::new(0.0, 1.0);
    }
    if vertical {
        return Origin::new(1.0, 1.0);
    }
    Origin::new(0.0, 0.5)
}

/// Receives every published snapshot.
pub type SnapshotHandler = Box<dyn FnMut(&Arc<PathSet>)>;

struct ActiveTween {
    tween: Tween,
    interpolators: Vec<PathInterpolator>,
}

/// Drives the draw/animate cycle of the segment paths.
///
/// Owns the rendered, previous and target path sets. The rendered set is only
/// ever replaced by a new snapshot, so subscribers holding an `Arc<PathSet>`
/// never observe a partially updated set.
pub struct TransitionOrchestrator<I = PathMorph> {
    interpolator: I,
    settings: AnimationSettings,
    morph: MorphOptions,
    rendered: Arc<PathSet>,
    previous: Arc<PathSet>,
    target: Arc<PathSet>,
    active: Option<ActiveTween>,
    phase: Phase,
    generation: u64,
    last_origin: Option<Origin>,
    subscribers: Vec<SnapshotHandler>,
}

impl<I> fmt::Debug for TransitionOrchestrator<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionOrchestrator")
            .field("phase", &self.phase)
            .field("settings", &self.settings)
            .field("rendered_generation", &self.rendered.generation)
            .field("segments", &self.target.len())
            .field("last_origin", &self.last_origin)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for TransitionOrchestrator<PathMorph> {
    fn default() -> Self {
        Self::new(PathMorph, AnimationSettings::default())
    }
}

impl<I: ShapeInterpolator> TransitionOrchestrator<I> {
    /// An idle orchestrator with nothing drawn yet.
    pub fn new(interpolator: I, settings: AnimationSettings) -> Self {
        Self {
            interpolator,
            settings,
            morph: MorphOptions::default(),
            rendered: Arc::default(),
            previous: Arc::default(),
            target: Arc::default(),
            active: None,
            phase: Phase::Idle,
            generation: 0,
            last_origin: None,
            subscribers: Vec::new(),
        }
    }

    /// Replace tween timing; takes effect on the next animation.
    pub fn set_settings(&mut self, settings: AnimationSettings) {
        self.settings = settings;
    }

    /// Register a snapshot subscriber.
    pub fn subscribe(&mut self, handler: impl FnMut(&Arc<PathSet>) + 'static) {
        self.subscribers.push(Box::new(handler));
    }

    /// Currently rendered snapshot.
    pub fn rendered(&self) -> Arc<PathSet> {
        Arc::clone(&self.rendered)
    }

    /// Snapshot rendered right before the latest draw.
    pub fn previous(&self) -> Arc<PathSet> {
        Arc::clone(&self.previous)
    }

    /// Paths the current animation ends on.
    pub fn target(&self) -> Arc<PathSet> {
        Arc::clone(&self.target)
    }

    /// Current state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a tween is in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Anchor chosen by the most recent animation.
    pub fn last_origin(&self) -> Option<Origin> {
        self.last_origin
    }

    /// Run a Drawing pass, then either animate toward the new paths or show them
    /// immediately.
    ///
    /// On error the previous and target snapshots are restored and the rendered
    /// set is left as it was.
    pub fn redraw(
        &mut self,
        graph: &dyn PathSynthesizer,
        animate: bool,
        now: Duration,
    ) -> FunnelResult<()> {
        let (previous, target) = (Arc::clone(&self.previous), Arc::clone(&self.target));
        self.draw(graph)?;
        if animate {
            if let Err(err) = self.animate(graph, now) {
                self.previous = previous;
                self.target = target;
                return Err(err);
            }
            Ok(())
        } else {
            self.show_target();
            Ok(())
        }
    }

    /// Drawing: remember what is on screen and synthesize a fresh target.
    #[tracing::instrument(skip_all, fields(stages = graph.stage_count()))]
    pub fn draw(&mut self, graph: &dyn PathSynthesizer) -> FunnelResult<()> {
        let paths = graph.path_definitions()?;
        if let Some(i) = paths.iter().position(|p| p.elements().is_empty()) {
            return Err(FunnelError::geometry(format!(
                "path synthesizer returned an empty path for segment {i}"
            )));
        }

        self.phase = Phase::Drawing;
        self.previous = Arc::clone(&self.rendered);
        self.generation += 1;
        self.target = Arc::new(PathSet {
            generation: self.generation,
            stages: graph.stage_count(),
            paths,
        });
        tracing::debug!(
            segments = self.target.len(),
            previous = self.previous.len(),
            "drew target paths"
        );
        Ok(())
    }

    /// Animating: morph from the previous snapshot (or median slivers) to the target.
    #[tracing::instrument(skip_all)]
    pub fn animate(&mut self, graph: &dyn PathSynthesizer, now: Duration) -> FunnelResult<()> {
        if let Some(mut active) = self.active.take() {
            active.tween.stop();
            tracing::debug!("cancelled in-flight tween");
        }

        let shape_changed = !self.previous.same_shape(&self.target);
        let origin = select_origin(shape_changed, graph.is_vertical(), graph.is_2d());
        let options = MorphOptions {
            origin,
            ..self.morph
        };
        tracing::debug!(shape_changed, ?origin, "selected morph origin");

        let interpolators = match self.interpolators(graph, shape_changed, &options) {
            Ok(v) => v,
            Err(err) => {
                self.phase = Phase::Idle;
                return Err(err);
            }
        };

        let mut tween = Tween::new(self.settings);
        tween.start(now);
        self.active = Some(ActiveTween {
            tween,
            interpolators,
        });
        self.last_origin = Some(origin);
        self.phase = Phase::Animating;
        tracing::debug!(duration = ?self.settings.duration(), "tween started");

        self.tick(now);
        Ok(())
    }

    fn interpolators(
        &self,
        graph: &dyn PathSynthesizer,
        shape_changed: bool,
        options: &MorphOptions,
    ) -> FunnelResult<Vec<PathInterpolator>> {
        let mut out = Vec::with_capacity(self.target.len());
        for (i, new_path) in self.target.paths().iter().enumerate() {
            let old = match self.previous.paths().get(i) {
                Some(p) if !shape_changed => p.clone(),
                _ => graph.path_median(i)?,
            };
            out.push(self.interpolator.interpolate(&old, new_path, options)?);
        }
        Ok(out)
    }

    /// Advance the tween to `now`, publishing a snapshot; returns whether it is
    /// still running.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let Some(progress) = active.tween.sample(now) else {
            self.active = None;
            self.phase = Phase::Idle;
            return false;
        };

        if active.tween.state() == TweenState::Finished {
            self.active = None;
            self.show_target();
            tracing::debug!("tween finished");
            return false;
        }

        let paths: Vec<BezPath> = active.interpolators.iter().map(|f| f(progress)).collect();
        tracing::trace!(progress, "tween tick");
        let stages = self.target.stages;
        self.publish(paths, stages);
        true
    }

    /// Drop any tween and show the target as-is.
    fn show_target(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.tween.stop();
        }
        self.phase = Phase::Idle;
        let target = Arc::clone(&self.target);
        self.publish(target.paths.clone(), target.stages);
    }

    fn publish(&mut self, paths: Vec<BezPath>, stages: usize) {
        self.generation += 1;
        self.rendered = Arc::new(PathSet {
            generation: self.generation,
            stages,
            paths,
        });
        for handler in &mut self.subscribers {
            handler(&self.rendered);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/orchestrator.rs"]
mod tests;
