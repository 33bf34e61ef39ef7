//! Matrix helpers for model/view/projection composition.

mod transform;

pub use transform::Transform;
