pub(crate) mod background;
pub(crate) mod color;
pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod glyph;
pub(crate) mod projection;
pub(crate) mod surface;
