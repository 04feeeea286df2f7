// The leaf components of the extraction pipeline. Each module is a pure,
// stateless stage; orchestration lives in `crate::pipeline` and above.

pub mod background;
pub mod frame;
pub mod geometry;
pub mod grayscale;
pub mod hue;
