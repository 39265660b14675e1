//! Engine object paths
//!
//! The engine addresses animated objects by slash-delimited paths relative to
//! the imported model root. For a skinned model that root is the armature:
//! objects directly under the armature start their path at themselves, while
//! objects attached to a bone are addressed through the armature and the
//! bone chain.

use crate::graph::{JointRef, NodeRef, ParentRef};

/// `<armature>/<root joint>/.../<joint>`
pub fn resolve_bone_path(armature: NodeRef<'_>, joint: JointRef<'_>) -> String {
    let mut segments = vec![joint.name()];
    let mut current = joint;
    while let Some(parent) = current.parent() {
        segments.push(parent.name());
        current = parent;
    }
    segments.push(armature.name());
    segments.reverse();
    segments.join("/")
}

/// Path of `node` relative to its nearest armature ancestor, or to the scene
/// root when there is none.
///
/// Walking stops at a top-level object, just below an armature, or at a
/// joint parent, whose bone path (armature included) becomes the prefix.
pub fn resolve_object_path(node: NodeRef<'_>) -> String {
    let mut path = node.name().to_string();
    let mut current = node;
    while let Some(parent) = current.parent() {
        match parent {
            ParentRef::Joint { armature, joint } => {
                return format!("{}/{}", resolve_bone_path(armature, joint), path);
            }
            ParentRef::Object(parent) if parent.is_armature() => break,
            ParentRef::Object(parent) => {
                path = format!("{}/{}", parent.name(), path);
                current = parent;
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{SceneGraph, Skeleton};

    fn leg_rig() -> SceneGraph {
        let mut skeleton = Skeleton::new();
        let root = skeleton.add_joint("Root", None).unwrap();
        let hip = skeleton.add_joint("Hip", Some(root)).unwrap();
        skeleton.add_joint("LegBone", Some(hip)).unwrap();
        skeleton.add_joint("Spine", Some(root)).unwrap();

        let mut graph = SceneGraph::new();
        let rig = graph.add_armature("Skeleton", skeleton).unwrap();
        let sock = graph.add_object("Sock").unwrap();
        graph.set_joint_parent(sock, rig, "LegBone").unwrap();
        let body = graph.add_object("Body").unwrap();
        graph.set_parent(body, rig).unwrap();
        let hat = graph.add_object("Hat").unwrap();
        graph.set_joint_parent(hat, rig, "Root").unwrap();
        graph
    }

    #[test]
    fn test_plain_chain() {
        let mut graph = SceneGraph::new();
        let a = graph.add_object("A").unwrap();
        let b = graph.add_object("B").unwrap();
        let c = graph.add_object("C").unwrap();
        graph.set_parent(b, a).unwrap();
        graph.set_parent(c, b).unwrap();

        assert_eq!(resolve_object_path(graph.node(c).unwrap()), "A/B/C");
        assert_eq!(resolve_object_path(graph.node(a).unwrap()), "A");
    }

    #[test]
    fn test_bone_path() {
        let graph = leg_rig();
        let rig = graph.find("Skeleton").unwrap();
        let skeleton = rig.skeleton().unwrap();
        let leg = skeleton.joint(skeleton.find("LegBone").unwrap()).unwrap();
        let root = skeleton.joint(skeleton.find("Root").unwrap()).unwrap();

        assert_eq!(resolve_bone_path(rig, leg), "Skeleton/Root/Hip/LegBone");
        assert_eq!(resolve_bone_path(rig, root), "Skeleton/Root");
    }

    #[test]
    fn test_joint_parented_object() {
        let graph = leg_rig();
        assert_eq!(
            resolve_object_path(graph.find("Sock").unwrap()),
            "Skeleton/Root/Hip/LegBone/Sock"
        );
        assert_eq!(
            resolve_object_path(graph.find("Hat").unwrap()),
            "Skeleton/Root/Hat"
        );
    }

    #[test]
    fn test_object_under_armature_excludes_armature() {
        let graph = leg_rig();
        assert_eq!(resolve_object_path(graph.find("Body").unwrap()), "Body");
    }

    #[test]
    fn test_descendant_of_armature_child() {
        let mut graph = leg_rig();
        let body = graph.get_id("Body").unwrap();
        let lashes = graph.add_object("Lashes").unwrap();
        graph.set_parent(lashes, body).unwrap();
        assert_eq!(resolve_object_path(graph.node(lashes).unwrap()), "Body/Lashes");
    }

    #[test]
    fn test_joint_parent_stops_at_armature() {
        let mut graph = leg_rig();
        let rig = graph.get_id("Skeleton").unwrap();
        let world = graph.add_object("World").unwrap();
        graph.set_parent(rig, world).unwrap();

        assert_eq!(
            resolve_object_path(graph.find("Sock").unwrap()),
            "Skeleton/Root/Hip/LegBone/Sock"
        );
        assert_eq!(resolve_object_path(graph.find("Skeleton").unwrap()), "World/Skeleton");
    }

    #[test]
    fn test_object_below_object_below_joint() {
        let mut graph = leg_rig();
        let sock = graph.get_id("Sock").unwrap();
        let pom = graph.add_object("Pompom").unwrap();
        graph.set_parent(pom, sock).unwrap();
        assert_eq!(
            resolve_object_path(graph.node(pom).unwrap()),
            "Skeleton/Root/Hip/LegBone/Sock/Pompom"
        );
    }
}
