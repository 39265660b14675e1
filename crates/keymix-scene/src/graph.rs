//! Scene graph storage and read-only views

use keymix_core::{KeymixError, Result};
use std::collections::HashMap;

/// Index of an object in a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Index of a joint in a [`Skeleton`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(usize);

#[derive(Debug, Clone)]
struct Joint {
    name: String,
    parent: Option<JointId>,
}

/// Joint tree of an armature. A joint's parent is always added before it.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    joints: Vec<Joint>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_joint(&mut self, name: impl Into<String>, parent: Option<JointId>) -> Result<JointId> {
        let name = name.into();
        if let Some(JointId(p)) = parent {
            if p >= self.joints.len() {
                return Err(KeymixError::Scene(format!(
                    "Joint '{}' has an unknown parent",
                    name
                )));
            }
        }
        if self.find(&name).is_some() {
            return Err(KeymixError::Scene(format!("Duplicate joint name: {}", name)));
        }
        self.joints.push(Joint { name, parent });
        Ok(JointId(self.joints.len() - 1))
    }

    pub fn find(&self, name: &str) -> Option<JointId> {
        self.joints.iter().position(|j| j.name == name).map(JointId)
    }

    pub fn joint(&self, id: JointId) -> Option<JointRef<'_>> {
        (id.0 < self.joints.len()).then_some(JointRef { skeleton: self, id })
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

/// Borrowed view of one joint
#[derive(Debug, Clone, Copy)]
pub struct JointRef<'s> {
    skeleton: &'s Skeleton,
    id: JointId,
}

impl<'s> JointRef<'s> {
    pub fn id(&self) -> JointId {
        self.id
    }

    pub fn name(&self) -> &'s str {
        &self.skeleton.joints[self.id.0].name
    }

    pub fn parent(&self) -> Option<JointRef<'s>> {
        self.skeleton.joints[self.id.0].parent.map(|id| JointRef {
            skeleton: self.skeleton,
            id,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Object(NodeId),
    Joint { armature: NodeId, joint: JointId },
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    skeleton: Option<Skeleton>,
    parent: Option<Parent>,
}

/// How an object is attached to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    None,
    Object,
    Joint,
}

/// Objects keyed by unique name, each optionally parented to another object
/// or to a joint of an armature
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<NodeData>,
    names: HashMap<String, NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: String, skeleton: Option<Skeleton>) -> Result<NodeId> {
        if self.names.contains_key(&name) {
            return Err(KeymixError::Scene(format!("Duplicate object name: {}", name)));
        }
        let id = NodeId(self.nodes.len());
        self.names.insert(name.clone(), id);
        self.nodes.push(NodeData {
            name,
            skeleton,
            parent: None,
        });
        Ok(id)
    }

    pub fn add_object(&mut self, name: impl Into<String>) -> Result<NodeId> {
        self.insert(name.into(), None)
    }

    pub fn add_armature(&mut self, name: impl Into<String>, skeleton: Skeleton) -> Result<NodeId> {
        self.insert(name.into(), Some(skeleton))
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(KeymixError::Scene(format!("Unknown object id {}", id.0)))
        }
    }

    /// Reject links that would make `child` its own ancestor.
    fn check_acyclic(&self, child: NodeId, parent: NodeId) -> Result<()> {
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return Err(KeymixError::Scene(format!(
                    "Parenting '{}' to '{}' would create a cycle",
                    self.nodes[child.0].name, self.nodes[parent.0].name
                )));
            }
            current = self.nodes[id.0].parent.map(|p| match p {
                Parent::Object(id) => id,
                Parent::Joint { armature, .. } => armature,
            });
        }
        Ok(())
    }

    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        self.check(child)?;
        self.check(parent)?;
        self.check_acyclic(child, parent)?;
        self.nodes[child.0].parent = Some(Parent::Object(parent));
        Ok(())
    }

    /// Parent `child` to the joint named `joint` of `armature`.
    pub fn set_joint_parent(&mut self, child: NodeId, armature: NodeId, joint: &str) -> Result<()> {
        self.check(child)?;
        self.check(armature)?;
        let data = &self.nodes[armature.0];
        let skeleton = data.skeleton.as_ref().ok_or_else(|| {
            KeymixError::Scene(format!("'{}' is not an armature", data.name))
        })?;
        let joint = skeleton.find(joint).ok_or_else(|| {
            KeymixError::Scene(format!("Armature '{}' has no joint '{}'", data.name, joint))
        })?;
        self.check_acyclic(child, armature)?;
        self.nodes[child.0].parent = Some(Parent::Joint { armature, joint });
        Ok(())
    }

    pub fn get_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { graph: self, id })
    }

    pub fn find(&self, name: &str) -> Option<NodeRef<'_>> {
        self.get_id(name).and_then(|id| self.node(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// What an object hangs from
#[derive(Debug, Clone, Copy)]
pub enum ParentRef<'g> {
    Object(NodeRef<'g>),
    Joint {
        armature: NodeRef<'g>,
        joint: JointRef<'g>,
    },
}

/// Borrowed view of one object
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'g> {
    graph: &'g SceneGraph,
    id: NodeId,
}

impl<'g> NodeRef<'g> {
    fn data(&self) -> &'g NodeData {
        &self.graph.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'g str {
        &self.data().name
    }

    pub fn is_armature(&self) -> bool {
        self.data().skeleton.is_some()
    }

    pub fn skeleton(&self) -> Option<&'g Skeleton> {
        self.data().skeleton.as_ref()
    }

    pub fn parent_kind(&self) -> ParentKind {
        match self.data().parent {
            None => ParentKind::None,
            Some(Parent::Object(_)) => ParentKind::Object,
            Some(Parent::Joint { .. }) => ParentKind::Joint,
        }
    }

    pub fn parent(&self) -> Option<ParentRef<'g>> {
        let graph = self.graph;
        match self.data().parent? {
            Parent::Object(id) => Some(ParentRef::Object(NodeRef { graph, id })),
            Parent::Joint { armature, joint } => {
                let armature = NodeRef {
                    graph,
                    id: armature,
                };
                let joint = armature.skeleton()?.joint(joint)?;
                Some(ParentRef::Joint { armature, joint })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_rejected() {
        let mut graph = SceneGraph::new();
        graph.add_object("Body").unwrap();
        assert!(graph.add_object("Body").is_err());
        assert!(graph.add_armature("Body", Skeleton::new()).is_err());
    }

    #[test]
    fn test_cycle_rejected() {
        let mut graph = SceneGraph::new();
        let a = graph.add_object("A").unwrap();
        let b = graph.add_object("B").unwrap();
        graph.set_parent(b, a).unwrap();
        assert!(graph.set_parent(a, b).is_err());
        assert!(graph.set_parent(a, a).is_err());
    }

    #[test]
    fn test_joint_parent_requires_armature_and_joint() {
        let mut skeleton = Skeleton::new();
        skeleton.add_joint("Root", None).unwrap();

        let mut graph = SceneGraph::new();
        let rig = graph.add_armature("Rig", skeleton).unwrap();
        let mesh = graph.add_object("Mesh").unwrap();
        let prop = graph.add_object("Prop").unwrap();

        assert!(graph.set_joint_parent(prop, mesh, "Root").is_err());
        assert!(graph.set_joint_parent(prop, rig, "Missing").is_err());
        graph.set_joint_parent(prop, rig, "Root").unwrap();

        let view = graph.node(prop).unwrap();
        assert_eq!(view.parent_kind(), ParentKind::Joint);
        match view.parent() {
            Some(ParentRef::Joint { armature, joint }) => {
                assert_eq!(armature.name(), "Rig");
                assert_eq!(joint.name(), "Root");
            }
            other => panic!("unexpected parent {:?}", other),
        }
    }

    #[test]
    fn test_skeleton_joint_links() {
        let mut skeleton = Skeleton::new();
        let root = skeleton.add_joint("Root", None).unwrap();
        let hip = skeleton.add_joint("Hip", Some(root)).unwrap();
        assert!(skeleton.add_joint("Hip", Some(root)).is_err());
        assert!(skeleton.add_joint("Floating", Some(JointId(9))).is_err());

        let hip = skeleton.joint(hip).unwrap();
        assert_eq!(hip.parent().map(|j| j.name()), Some("Root"));
        assert!(hip.parent().unwrap().parent().is_none());
    }

    #[test]
    fn test_lookup() {
        let mut graph = SceneGraph::new();
        graph.add_object("Hat").unwrap();
        let hat = graph.find("Hat").unwrap();
        assert_eq!(hat.name(), "Hat");
        assert_eq!(hat.parent_kind(), ParentKind::None);
        assert!(!hat.is_armature());
        assert!(graph.find("Cape").is_none());
    }
}
