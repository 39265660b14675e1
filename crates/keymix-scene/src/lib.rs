//! Keymix Scene - object hierarchy paths and editor utilities
//!
//! - [`SceneGraph`] holds objects, armatures and their joint trees; callers
//!   inspect it through borrowed [`NodeRef`] / [`JointRef`] views
//! - [`resolve_object_path`] computes the path the engine uses to address an
//!   object inside an animation clip
//! - the remaining modules hold the host-independent parts of the editor
//!   tools (bone connection, empty shape-key and vertex-group detection,
//!   applying a decoded shape mix)

pub mod bones;
mod description;
mod graph;
mod path;
pub mod shape_keys;
pub mod vertex_groups;

pub use description::{load_scene, load_scene_str, JointDef, ObjectDef, SceneDescription};
pub use graph::{
    JointId, JointRef, NodeId, NodeRef, ParentKind, ParentRef, SceneGraph, Skeleton,
};
pub use path::{resolve_bone_path, resolve_object_path};
