use crate::animation::labels::{LabelPhase, LabelTransitions, label_key};
use crate::animation::morph::{PathMorph, ShapeInterpolator};
use crate::chart::config::FunnelConfig;
use crate::chart::frame::{ChartFrame, LabelView, LegendView, SegmentShare, SubLabelView};
use crate::chart::orchestrator::{PathSet, Phase, TransitionOrchestrator};
use crate::data::color::{ColorSpec, DefaultPalette, legend_background, resolve_colors};
use crate::data::percent::{compute_2d_percentages, compute_percentages, format_number};
use crate::foundation::core::Origin;
use crate::foundation::error::FunnelResult;
use crate::geometry::funnel::FunnelGeometry;
use crate::paint::fill::{ColorSet, GradientDef};

use std::sync::Arc;
use std::time::Duration;

/// Key the sub-label legend block is tracked under.
pub const LEGEND_KEY: &str = "sub-labels";

/// Which parts of a configuration differ between two updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// `values` changed.
    pub values: bool,
    /// `direction`, `width` or `height` changed.
    pub layout: bool,
    /// `labels` or `subLabels` changed.
    pub labels: bool,
    /// `colors`, `gradientDirection` or `displayPercentage` changed.
    pub style: bool,
    /// `animated` or the transition timing changed.
    pub animation: bool,
}

impl ChangeSet {
    /// Diff two configurations.
    pub fn between(old: &FunnelConfig, new: &FunnelConfig) -> Self {
        Self {
            values: old.values != new.values,
            layout: old.direction != new.direction
                || old.width != new.width
                || old.height != new.height,
            labels: old.labels != new.labels || old.sub_labels != new.sub_labels,
            style: old.colors != new.colors
                || old.gradient_direction != new.gradient_direction
                || old.display_percentage != new.display_percentage,
            animation: old.animated != new.animated || old.animation != new.animation,
        }
    }

    /// Whether the paths must be drawn again.
    pub fn redraws(&self) -> bool {
        self.values || self.layout
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An animated funnel chart.
///
/// Owns the configuration, its geometry and the transition state. Hosts feed it
/// new configurations with [`FunnelChart::update`], call [`FunnelChart::tick`]
/// once per frame, and render [`FunnelChart::frame`].
pub struct FunnelChart<I = PathMorph> {
    config: FunnelConfig,
    geometry: FunnelGeometry,
    orchestrator: TransitionOrchestrator<I>,
    labels: LabelTransitions,
    legend: LabelTransitions,
    palette: DefaultPalette,
    retired_labels: Vec<LabelView>,
    retired_legend: Vec<SubLabelView>,
    now: Duration,
}

impl<I> std::fmt::Debug for FunnelChart<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunnelChart")
            .field("config", &self.config)
            .field("orchestrator", &self.orchestrator)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl FunnelChart<PathMorph> {
    /// Mount a chart with the built-in morph and the default palette.
    pub fn mount(config: FunnelConfig, now: Duration) -> FunnelResult<Self> {
        Self::mount_with(config, PathMorph, DefaultPalette::default(), now)
    }
}

impl<I: ShapeInterpolator> FunnelChart<I> {
    /// Mount a chart: validate, lay out, draw, and animate when `animated`.
    #[tracing::instrument(
        skip_all,
        fields(stages = config.values.stage_count(), is_2d = config.values.is_2d())
    )]
    pub fn mount_with(
        config: FunnelConfig,
        interpolator: I,
        palette: DefaultPalette,
        now: Duration,
    ) -> FunnelResult<Self> {
        config.validate()?;
        let geometry = FunnelGeometry::configure(config.direction, config.canvas()?, &config.values)?;
        let duration = config.animation.duration();

        let mut chart = Self {
            orchestrator: TransitionOrchestrator::new(interpolator, config.animation),
            labels: LabelTransitions::new(duration, config.animated),
            legend: LabelTransitions::new(duration, config.animated),
            geometry,
            palette,
            retired_labels: Vec::new(),
            retired_legend: Vec::new(),
            now,
            config,
        };
        chart
            .orchestrator
            .redraw(&chart.geometry, chart.config.animated, now)?;
        chart.sync_labels(now);
        tracing::debug!(segments = chart.geometry.segment_count(), "chart mounted");
        Ok(chart)
    }

    /// Apply a new configuration.
    ///
    /// Rejected configurations, and draws that fail, leave the chart on its
    /// previous configuration and paths. At most one Drawing
    /// pass runs per call: new values draw and animate (when animated), layout
    /// changes draw only, everything else only affects derived views.
    #[tracing::instrument(skip_all)]
    pub fn update(&mut self, config: FunnelConfig, now: Duration) -> FunnelResult<ChangeSet> {
        config.validate()?;
        let changes = ChangeSet::between(&self.config, &config);
        self.now = now;
        if changes.is_empty() {
            return Ok(changes);
        }
        tracing::debug!(?changes, "configuration changed");

        let geometry = if changes.redraws() {
            Some(FunnelGeometry::configure(
                config.direction,
                config.canvas()?,
                &config.values,
            )?)
        } else {
            None
        };
        let old_labels = self.current_labels(now);
        let old_legend = self.legend_entries()?;

        if changes.animation {
            self.orchestrator.set_settings(config.animation);
        }
        if let Some(geometry) = &geometry {
            let animate = changes.values && config.animated;
            if let Err(err) = self.orchestrator.redraw(geometry, animate, now) {
                self.orchestrator.set_settings(self.config.animation);
                return Err(err);
            }
        }

        self.config = config;
        if let Some(geometry) = geometry {
            self.geometry = geometry;
        }
        if changes.animation {
            let duration = self.config.animation.duration();
            for t in [&mut self.labels, &mut self.legend] {
                t.set_duration(duration);
                t.set_animated(self.config.animated);
            }
        }

        self.retire(old_labels, old_legend);
        self.sync_labels(now);
        Ok(changes)
    }

    /// Advance path and label transitions to `now`; returns whether anything is
    /// still moving.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.now = now;
        let paths = self.orchestrator.tick(now);
        let labels = self.labels.tick(now);
        let legend = self.legend.tick(now);

        let entries = self.labels.entries();
        self.retired_labels.retain(|v| {
            entries
                .iter()
                .any(|e| e.key == v.key && e.phase == LabelPhase::Leaving)
        });
        if self.legend.entries().is_empty() {
            self.retired_legend.clear();
        }
        paths || labels || legend
    }

    /// Register a path snapshot subscriber.
    pub fn subscribe(&mut self, handler: impl FnMut(&Arc<PathSet>) + 'static) {
        self.orchestrator.subscribe(handler);
    }

    /// Current configuration.
    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    /// Geometry of the current configuration.
    pub fn geometry(&self) -> &FunnelGeometry {
        &self.geometry
    }

    /// Currently rendered paths.
    pub fn paths(&self) -> Arc<PathSet> {
        self.orchestrator.rendered()
    }

    /// Orchestrator state.
    pub fn phase(&self) -> Phase {
        self.orchestrator.phase()
    }

    /// Morph anchor of the latest animation.
    pub fn last_origin(&self) -> Option<Origin> {
        self.orchestrator.last_origin()
    }

    /// Whether the data is 2-D.
    pub fn is_2d(&self) -> bool {
        self.config.values.is_2d()
    }

    /// Resolved color assignment, one entry per segment.
    pub fn color_specs(&self) -> FunnelResult<Vec<ColorSpec>> {
        resolve_colors(
            &self.config.colors,
            self.geometry.segment_count(),
            self.is_2d(),
            &self.palette,
        )
    }

    /// Classified fills for every segment.
    pub fn color_set(&self) -> FunnelResult<ColorSet> {
        Ok(ColorSet::classify_all(&self.color_specs()?))
    }

    /// Gradient definitions referenced by gradient-mode segments.
    pub fn gradient_set(&self) -> FunnelResult<Vec<GradientDef>> {
        Ok(self.color_set()?.gradients)
    }

    /// Stage percentages relative to the first stage.
    pub fn percentages(&self) -> Vec<u32> {
        compute_percentages(&self.config.values)
    }

    /// Per-stage sub-segment shares (empty for 1-D data).
    pub fn percentages_2d(&self) -> Vec<Vec<u32>> {
        compute_2d_percentages(&self.config.values)
    }

    /// Stage totals formatted for labels.
    pub fn formatted_values(&self) -> Vec<String> {
        self.config
            .values
            .stage_totals()
            .into_iter()
            .map(format_number)
            .collect()
    }

    /// Label keys of the current stages, in order.
    pub fn label_keys(&self) -> Vec<String> {
        let stages = self.config.values.stage_count();
        let mut keys: Vec<String> = Vec::with_capacity(stages);
        for i in 0..stages {
            let base = match self.config.labels.get(i) {
                Some(l) if !l.trim().is_empty() => label_key(l),
                _ => format!("stage-{}", i + 1),
            };
            let mut key = base.clone();
            let mut n = i + 1;
            while keys.contains(&key) {
                key = format!("{base}-{n}");
                n += 1;
            }
            keys.push(key);
        }
        keys
    }

    /// Snapshot of everything needed to render the chart at the latest tick.
    pub fn frame(&self) -> FunnelResult<ChartFrame> {
        let now = self.now;
        let mut labels = self.current_labels(now);
        for retired in &self.retired_labels {
            if self.label_phase(&retired.key) == Some(LabelPhase::Leaving) {
                labels.push(LabelView {
                    phase: LabelPhase::Leaving,
                    opacity: self.labels.opacity(&retired.key, now),
                    ..retired.clone()
                });
            }
        }

        let legend = match self.legend.entries().first() {
            Some(e) => {
                let entries = if e.phase == LabelPhase::Leaving {
                    self.retired_legend.clone()
                } else {
                    self.legend_entries()?
                };
                Some(LegendView {
                    entries,
                    phase: e.phase,
                    opacity: self.legend.opacity(LEGEND_KEY, now),
                })
            }
            None => None,
        };

        Ok(ChartFrame {
            canvas: self.geometry.canvas(),
            direction: self.config.direction,
            gradient_direction: self.config.gradient_direction,
            paths: self.paths(),
            colors: self.color_set()?,
            labels,
            legend,
        })
    }

    fn label_phase(&self, key: &str) -> Option<LabelPhase> {
        self.labels
            .entries()
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.phase)
    }

    fn current_labels(&self, now: Duration) -> Vec<LabelView> {
        let percentages = self.percentages();
        let shares = self.percentages_2d();
        let values = self.formatted_values();

        self.label_keys()
            .into_iter()
            .enumerate()
            .map(|(i, key)| {
                let pct = percentages.get(i).copied().unwrap_or(0);
                let percentage = (self.config.display_percentage && pct != 100).then_some(pct);
                let segments = shares
                    .get(i)
                    .map(|row| {
                        self.config
                            .sub_labels
                            .iter()
                            .zip(row)
                            .map(|(title, &percent)| SegmentShare {
                                title: title.clone(),
                                percent,
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                LabelView {
                    phase: self.label_phase(&key).unwrap_or(LabelPhase::Present),
                    opacity: self.labels.opacity(&key, now),
                    title: self.config.labels.get(i).cloned(),
                    value: values.get(i).cloned().unwrap_or_default(),
                    percentage,
                    segments,
                    key,
                }
            })
            .collect()
    }

    fn legend_entries(&self) -> FunnelResult<Vec<SubLabelView>> {
        if !self.is_2d() {
            return Ok(Vec::new());
        }
        let specs = self.color_specs()?;
        Ok(self
            .config
            .sub_labels
            .iter()
            .zip(&specs)
            .map(|(title, spec)| SubLabelView {
                title: title.clone(),
                background: legend_background(spec, self.config.gradient_direction),
            })
            .collect())
    }

    fn retire(&mut self, old_labels: Vec<LabelView>, old_legend: Vec<SubLabelView>) {
        let keys = self.label_keys();
        self.retired_labels.retain(|v| !keys.contains(&v.key));
        for view in old_labels {
            if keys.contains(&view.key) {
                continue;
            }
            self.retired_labels.retain(|v| v.key != view.key);
            self.retired_labels.push(view);
        }

        if self.is_2d() {
            self.retired_legend.clear();
        } else if !old_legend.is_empty() {
            self.retired_legend = old_legend;
        }
    }

    fn sync_labels(&mut self, now: Duration) {
        let keys = self.label_keys();
        self.labels.sync(&keys, now);
        let legend_keys = if self.is_2d() {
            vec![LEGEND_KEY.to_owned()]
        } else {
            Vec::new()
        };
        self.legend.sync(&legend_keys, now);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/funnel_chart.rs"]
mod tests;
