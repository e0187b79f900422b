pub(crate) mod color;
pub(crate) mod percent;
pub(crate) mod values;
