//! Bone connection tools for armature edit mode

use keymix_core::Vec3;

/// Default distance under which a bone's head counts as touching its parent's tail
pub const CONNECT_DISTANCE: f32 = 0.001;

/// An editable bone
#[derive(Debug, Clone, PartialEq)]
pub struct EditBone {
    pub name: String,
    pub head: Vec3,
    pub tail: Vec3,
    /// Index of the parent bone in the same slice
    pub parent: Option<usize>,
    pub use_connect: bool,
}

/// Set the connect flag on every selected bone.
pub fn set_connected(bones: &mut [EditBone], selected: &[usize], connected: bool) {
    for &i in selected {
        if let Some(bone) = bones.get_mut(i) {
            bone.use_connect = connected;
        }
    }
}

/// Connect (or disconnect) selected bones whose head lies within `threshold`
/// of their parent's tail. Returns how many bones changed.
pub fn connect_by_distance(
    bones: &mut [EditBone],
    selected: &[usize],
    threshold: f32,
    connected: bool,
) -> usize {
    let mut count = 0;
    for &i in selected {
        let Some(bone) = bones.get(i) else {
            continue;
        };
        let Some(parent) = bone.parent.and_then(|p| bones.get(p)) else {
            continue;
        };
        if bone.head.distance(&parent.tail) < threshold && bone.use_connect != connected {
            bones[i].use_connect = connected;
            count += 1;
        }
    }
    count
}

/// Status line for a connect-by-distance run
pub fn connect_summary(connected: bool, count: usize) -> String {
    let action = if connected { "Connected" } else { "Disconnected" };
    format!("{} {} bone(s)", action, count)
}
