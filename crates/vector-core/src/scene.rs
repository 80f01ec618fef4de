use crate::errors::VectorError;
use crate::node::{ClipPath, FullPath, Group, SceneNode};
use std::collections::HashMap;
use tracing::warn;

pub type NodeId = usize;

/// What an animation target name refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// The vector itself; only its root alpha is animatable.
    Vector,
    Node(NodeId),
}

/// The retained scene: an arena of nodes rooted at a single group.
///
/// Structure (node kinds, names and child lists) is fixed once built. Only property values
/// can change afterwards, through [`group_mut`](Self::group_mut), [`path_mut`](Self::path_mut)
/// and [`clip_path_mut`](Self::clip_path_mut).
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    names: Vec<Option<String>>,
    children: Vec<Vec<NodeId>>,
    root: NodeId,
    root_name: Option<String>,
    width: f32,
    height: f32,
    viewport_width: f32,
    viewport_height: f32,
    root_alpha: u8,
    targets: HashMap<String, Target>,
}

impl SceneGraph {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_group(&self) -> &Group {
        match &self.nodes[self.root] {
            SceneNode::Group(g) => g,
            // The builder always places a group at the root slot and kinds never change.
            _ => unreachable!("scene root is not a group"),
        }
    }

    pub fn root_name(&self) -> Option<&str> {
        self.root_name.as_deref()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    pub fn group_mut(&mut self, id: NodeId) -> Option<&mut Group> {
        self.nodes.get_mut(id).and_then(SceneNode::as_group_mut)
    }

    pub fn path_mut(&mut self, id: NodeId) -> Option<&mut FullPath> {
        self.nodes.get_mut(id).and_then(SceneNode::as_path_mut)
    }

    pub fn clip_path_mut(&mut self, id: NodeId) -> Option<&mut ClipPath> {
        self.nodes.get_mut(id).and_then(SceneNode::as_clip_path_mut)
    }

    /// Name the node was built with.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id).and_then(Option::as_deref)
    }

    /// Children of a group in drawing order. Empty for leaves.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn intrinsic_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn root_alpha(&self) -> u8 {
        self.root_alpha
    }

    pub fn root_alpha_f32(&self) -> f32 {
        self.root_alpha as f32 / 255.0
    }

    pub fn set_root_alpha(&mut self, alpha: u8) {
        self.root_alpha = alpha;
    }

    /// Float convenience form; clamped to [0, 1].
    pub fn set_root_alpha_f32(&mut self, alpha: f32) {
        self.root_alpha = alpha_to_byte(alpha);
    }

    /// Looks up a named node (or the vector itself).
    pub fn resolve(&self, name: &str) -> Option<Target> {
        self.targets.get(name).copied()
    }

    /// Like [`resolve`](Self::resolve), but absence is a setup error.
    pub fn require_target(&self, name: &str) -> Result<Target, VectorError> {
        self.resolve(name)
            .ok_or_else(|| VectorError::UnresolvedAnimationTarget(name.to_string()))
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}

pub(crate) fn alpha_to_byte(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Builds the name lookup in one pre-order pass. Later nodes overwrite earlier ones with the
/// same name, and any node overwrites the vector's own name.
fn index_names(
    names: &[Option<String>],
    children: &[Vec<NodeId>],
    root: NodeId,
    root_name: Option<&str>,
) -> HashMap<String, Target> {
    let mut targets = HashMap::new();
    if let Some(name) = root_name {
        targets.insert(name.to_string(), Target::Vector);
    }

    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if let Some(Some(name)) = names.get(id) {
            if targets.insert(name.clone(), Target::Node(id)).is_some() {
                warn!(name = name.as_str(), "Duplicate node name; the later node replaces the earlier one");
            }
        }
        if let Some(kids) = children.get(id) {
            // Reverse so children pop in declaration order.
            stack.extend(kids.iter().rev());
        }
    }
    targets
}

/// Assembles a [`SceneGraph`] while keeping a stack of open groups.
#[derive(Debug)]
pub struct SceneBuilder {
    nodes: Vec<SceneNode>,
    names: Vec<Option<String>>,
    children: Vec<Vec<NodeId>>,
    open: Vec<NodeId>,
    root_name: Option<String>,
    width: f32,
    height: f32,
    viewport_width: f32,
    viewport_height: f32,
    root_alpha: u8,
    geometry_count: usize,
}

impl SceneBuilder {
    pub fn new(
        viewport_width: f32,
        viewport_height: f32,
        width: f32,
        height: f32,
    ) -> Result<Self, VectorError> {
        // Written as negations so NaN is rejected too.
        if !(viewport_width > 0.0) || !(viewport_height > 0.0) {
            return Err(VectorError::InvalidViewport {
                width: viewport_width,
                height: viewport_height,
            });
        }
        if !(width > 0.0) || !(height > 0.0) {
            return Err(VectorError::InvalidIntrinsicSize { width, height });
        }

        Ok(Self {
            nodes: vec![SceneNode::Group(Group::default())],
            names: vec![None],
            children: vec![Vec::new()],
            open: vec![0],
            root_name: None,
            width,
            height,
            viewport_width,
            viewport_height,
            root_alpha: 255,
            geometry_count: 0,
        })
    }

    pub fn name(mut self, name: Option<String>) -> Self {
        self.root_name = name;
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.root_alpha = alpha_to_byte(alpha);
        self
    }

    fn attach(&mut self, name: Option<String>, node: SceneNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.names.push(name);
        self.children.push(Vec::new());
        if let Some(&parent) = self.open.last() {
            self.children[parent].push(id);
        }
        id
    }

    /// Opens a group; following nodes become its children until [`end_group`](Self::end_group).
    pub fn begin_group(&mut self, name: Option<String>, group: Group) -> NodeId {
        let id = self.attach(name, SceneNode::Group(group));
        self.open.push(id);
        id
    }

    pub fn end_group(&mut self) -> Result<(), VectorError> {
        if self.open.len() <= 1 {
            return Err(VectorError::UnbalancedGroups("end_group without a matching begin_group"));
        }
        self.open.pop();
        Ok(())
    }

    pub fn add_path(&mut self, name: Option<String>, path: FullPath) -> NodeId {
        self.geometry_count += 1;
        self.attach(name, SceneNode::Path(path))
    }

    pub fn add_clip_path(&mut self, name: Option<String>, clip: ClipPath) -> NodeId {
        self.geometry_count += 1;
        self.attach(name, SceneNode::ClipPath(clip))
    }

    pub fn finish(self) -> Result<SceneGraph, VectorError> {
        if self.open.len() != 1 {
            return Err(VectorError::UnbalancedGroups("group left open at end of scene"));
        }
        if self.geometry_count == 0 {
            return Err(VectorError::MissingRequiredGeometry);
        }

        let root = 0;
        let targets = index_names(&self.names, &self.children, root, self.root_name.as_deref());
        Ok(SceneGraph {
            nodes: self.nodes,
            names: self.names,
            children: self.children,
            root,
            root_name: self.root_name,
            width: self.width,
            height: self.height,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            root_alpha: self.root_alpha,
            targets,
        })
    }
}
