//! Keymix Clip - engine animation-clip codec
//!
//! Converts between editor-side shape-key weights / object visibility and the
//! engine's single-keyframe `.anim` clip text:
//! - [`encode_blend_shape_clip`] / [`encode_toggle_clip`] build clip text
//! - [`decode_shape_mix`] reads blend-shape weights for one object path
//! - [`decode_clip`] recovers the full curve list
//!
//! The codec functions are pure. Reading and writing `.anim` files lives in
//! [`file`].

pub mod clip;
mod decode;
mod encode;
pub mod file;
pub mod format;
mod mix;
mod toggle;

pub use clip::{AnimationClip, AttributeBinding, ClassId, Curve, Keyframe};
pub use decode::{decode_clip, decode_shape_mix, decode_shape_mix_file};
pub use encode::{blend_shape_value, encode_blend_shape_clip, encode_clip, encode_toggle_clip};
pub use format::{strip_preamble, PREAMBLE};
pub use mix::{ShapeMix, EXPORT_MIN_WEIGHT};
pub use toggle::ToggleClipPair;
