pub(crate) mod ease;
pub(crate) mod labels;
pub(crate) mod morph;
pub(crate) mod tween;
