//! Scene graph root.
//!
//! The scene is a flat, append-only list of nodes. Meshes hold their geometry
//! and material behind `Arc`s, so many meshes can share one of each while
//! owning their own [`Transform`].

use std::sync::Arc;

use crate::{
    data_structures::{instance::Transform, material::MatcapMaterial},
    geometry::Geometry,
};

/// Handle of a node, valid for the lifetime of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
pub struct Mesh {
    pub name: String,
    pub geometry: Arc<Geometry>,
    pub material: Arc<MatcapMaterial>,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(name: &str, geometry: Arc<Geometry>, material: Arc<MatcapMaterial>) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material,
            transform: Transform::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

#[derive(Clone, Debug)]
pub enum Node {
    Mesh(Mesh),
    /// Marks that the camera is part of the scene; its state lives with the
    /// application.
    Camera,
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeId {
        self.add(Node::Mesh(mesh))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn mesh(&self, id: NodeId) -> Option<&Mesh> {
        match self.nodes.get(id.0)? {
            Node::Mesh(mesh) => Some(mesh),
            Node::Camera => None,
        }
    }

    pub fn mesh_mut(&mut self, id: NodeId) -> Option<&mut Mesh> {
        match self.nodes.get_mut(id.0)? {
            Node::Mesh(mesh) => Some(mesh),
            Node::Camera => None,
        }
    }

    /// Meshes in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Mesh(mesh) => Some(mesh),
            Node::Camera => None,
        })
    }

    /// Meshes with their ids, in insertion order.
    pub fn mesh_entries(&self) -> impl Iterator<Item = (NodeId, &Mesh)> {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match node {
            Node::Mesh(mesh) => Some((NodeId(i), mesh)),
            Node::Camera => None,
        })
    }

    pub fn has_camera(&self) -> bool {
        self.nodes.iter().any(|node| matches!(node, Node::Camera))
    }
}
