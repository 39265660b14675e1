//! Vertex-group cleanup

/// A vertex group on a mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexGroup {
    pub name: String,
    /// Weight-locked groups are kept unless removal of locked groups is asked for
    pub locked: bool,
}

/// Indices of groups no vertex belongs to.
///
/// `memberships` yields the group index of every vertex/group assignment.
/// Out-of-range indices are ignored.
pub fn find_empty_vertex_groups<I>(
    groups: &[VertexGroup],
    memberships: I,
    remove_locked: bool,
) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut in_use = vec![false; groups.len()];
    for index in memberships {
        if let Some(used) = in_use.get_mut(index) {
            *used = true;
        }
    }

    groups
        .iter()
        .enumerate()
        .filter(|(i, group)| !in_use[*i] && (remove_locked || !group.locked))
        .map(|(i, _)| i)
        .collect()
}
