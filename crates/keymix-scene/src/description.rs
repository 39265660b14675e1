//! TOML scene descriptions
//!
//! A small stand-in for the host editor's scene: enough to name objects,
//! armature joint trees, parent links and shape-key weights.
//!
//! ```toml
//! [[objects]]
//! name = "Skeleton"
//! armature = true
//! joints = [{ name = "Root" }, { name = "Hip", parent = "Root" }]
//!
//! [[objects]]
//! name = "Body"
//! parent = "Skeleton"
//! shape_keys = [{ name = "Basis" }, { name = "Smile", value = 0.5 }]
//! ```

use crate::graph::{SceneGraph, Skeleton};
use crate::shape_keys::ShapeKeyWeight;
use keymix_core::{KeymixError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root structure of a scene description file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
}

/// One object of the scene
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
    #[serde(default)]
    pub armature: bool,
    /// Joints of an armature; a joint's parent must be listed before it
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joints: Vec<JointDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Joint of `parent` this object is attached to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_joint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shape_keys: Vec<ShapeKeyWeight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JointDef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl SceneDescription {
    pub fn object(&self, name: &str) -> Option<&ObjectDef> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Build the scene graph: objects first, then parent links.
    pub fn to_graph(&self) -> Result<SceneGraph> {
        let mut graph = SceneGraph::new();

        for object in &self.objects {
            if object.armature {
                graph.add_armature(object.name.clone(), build_skeleton(object)?)?;
            } else {
                if !object.joints.is_empty() {
                    return Err(KeymixError::Scene(format!(
                        "'{}' lists joints but is not an armature",
                        object.name
                    )));
                }
                graph.add_object(object.name.clone())?;
            }
        }

        for object in &self.objects {
            let child = graph
                .get_id(&object.name)
                .ok_or_else(|| KeymixError::Scene(format!("Object '{}' vanished", object.name)))?;

            match (&object.parent, &object.parent_joint) {
                (None, None) => {}
                (None, Some(joint)) => {
                    return Err(KeymixError::Scene(format!(
                        "'{}' names parent joint '{}' without a parent",
                        object.name, joint
                    )));
                }
                (Some(parent), joint) => {
                    let parent_id = graph.get_id(parent).ok_or_else(|| {
                        KeymixError::Scene(format!(
                            "'{}' has unknown parent '{}'",
                            object.name, parent
                        ))
                    })?;
                    match joint {
                        Some(joint) => graph.set_joint_parent(child, parent_id, joint)?,
                        None => graph.set_parent(child, parent_id)?,
                    }
                }
            }
        }

        Ok(graph)
    }
}

fn build_skeleton(object: &ObjectDef) -> Result<Skeleton> {
    let mut skeleton = Skeleton::new();
    for joint in &object.joints {
        let parent = match &joint.parent {
            Some(name) => Some(skeleton.find(name).ok_or_else(|| {
                KeymixError::Scene(format!(
                    "Joint '{}' of '{}' has parent '{}' that is not listed before it",
                    joint.name, object.name, name
                ))
            })?),
            None => None,
        };
        skeleton.add_joint(joint.name.clone(), parent)?;
    }
    Ok(skeleton)
}

/// Load a scene description and build its graph
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(SceneGraph, SceneDescription)> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let loaded = load_scene_str(&content)?;
    tracing::debug!(
        "Loaded scene {} ({} objects)",
        path.display(),
        loaded.1.objects.len()
    );
    Ok(loaded)
}

/// Parse a scene description from a TOML string and build its graph
pub fn load_scene_str(content: &str) -> Result<(SceneGraph, SceneDescription)> {
    let description: SceneDescription = toml::from_str(content)?;
    let graph = description.to_graph()?;
    Ok((graph, description))
}
