//! The chart component: configuration, transition orchestration, and frames.

pub(crate) mod config;
pub(crate) mod frame;
pub(crate) mod funnel_chart;
pub(crate) mod orchestrator;
