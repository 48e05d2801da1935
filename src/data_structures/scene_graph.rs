//! Scene graph and hierarchical scene organization.
//!
//! The graph is an arena-backed tree with a single root group node. Nodes are
//! appended during initialization and never removed; children are referenced
//! by [`NodeId`], so cycles are unrepresentable by construction. Nodes carry
//! descriptors (geometry, material, lights, point clouds, the reflector
//! driver) that the render surface consumes as opaque data.

use cgmath::{Point3, Quaternion, Vector3};

use crate::{data_structures::color::Rgb, reflector::ReflectorSurface};

/// Handle to a node inside a [`SceneGraph`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// How a texture sampler should wrap outside [0, 1] coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Clamp,
    Repeat,
}

/// Reference to a named entry of the asset registry, resolved by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureRef {
    pub name: String,
    pub wrap: WrapMode,
}

impl TextureRef {
    pub fn clamped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            wrap: WrapMode::Clamp,
        }
    }

    pub fn repeated(name: &str) -> Self {
        Self {
            name: name.to_string(),
            wrap: WrapMode::Repeat,
        }
    }
}

/// Parametric geometry descriptors, generated backend-side.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometrySpec {
    Sphere { radius: f32, segments: u32 },
    Plane { width: f32, height: f32 },
    Torus { radius: f32, tube: f32 },
    Cone { radius: f32, height: f32 },
    Cylinder { radius: f32, height: f32 },
    Text { content: String, size: f32, depth: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum MaterialSpec {
    /// Unlit, optionally textured.
    Basic { color: Rgb, texture: Option<TextureRef> },
    /// Diffuse-lit.
    Lambert { color: Rgb },
}

/// Positions produced by the star-field generator.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Point3<f32>>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Sprite material applied to a whole point cloud.
#[derive(Clone, Debug, PartialEq)]
pub struct PointsMaterial {
    pub color: Rgb,
    pub size: f32,
    pub transparent: bool,
    pub texture: TextureRef,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Group,
    Mesh {
        geometry: GeometrySpec,
        material: MaterialSpec,
    },
    Points {
        cloud: PointCloud,
        material: PointsMaterial,
    },
    Reflector(ReflectorSurface),
    /// A loaded model attached by asset name; the backend parses the bytes.
    Model {
        asset: String,
    },
    DirectionalLight {
        intensity: f32,
        target: Point3<f32>,
    },
    AmbientLight,
}

/// Local transform of a node, decomposed.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub position: Point3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Continuous vertical bobbing around an anchor position, advanced by wall
/// time each frame (unlike the reflector, which counts frames).
#[derive(Clone, Copy, Debug)]
pub struct OrbitAnimation {
    pub speed: f32,
    pub range_y: f32,
    pub anchor: Point3<f32>,
    pub elapsed: f32,
}

impl OrbitAnimation {
    pub fn new(speed: f32, range_y: f32, anchor: Point3<f32>) -> Self {
        Self {
            speed,
            range_y,
            anchor,
            elapsed: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    /// Nodes with lower render order draw first; the star field uses -1 so it
    /// never occludes foreground content regardless of depth.
    pub render_order: i32,
    pub animation: Option<OrbitAnimation>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            transform: Transform::default(),
            render_order: 0,
            animation: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: &str) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn mesh(name: &str, geometry: GeometrySpec, material: MaterialSpec) -> Self {
        Self::new(name, NodeKind::Mesh { geometry, material })
    }

    pub fn at(mut self, position: Point3<f32>) -> Self {
        self.transform.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Quaternion<f32>) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: Vector3<f32>) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn ordered(mut self, render_order: i32) -> Self {
        self.render_order = render_order;
        self
    }

    pub fn animated(mut self, animation: OrbitAnimation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Acyclic tree of scene nodes plus the background colour.
#[derive(Debug)]
pub struct SceneGraph {
    background: Rgb,
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Creates a graph holding only the root group node.
    pub fn new(background: Rgb) -> Self {
        Self {
            background,
            nodes: vec![Node::group("scene")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.background = color;
    }

    /// Appends `node` under `parent` and returns its handle.
    pub fn attach(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// First node carrying `name`, in insertion order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    /// Visits every node in insertion order.
    pub fn walk(&self, mut visit: impl FnMut(NodeId, &Node)) {
        for (index, node) in self.nodes.iter().enumerate() {
            visit(NodeId(index), node);
        }
    }

    /// Mutable access to the reflector driver stored at `id`, if any.
    pub fn reflector_mut(&mut self, id: NodeId) -> Option<&mut ReflectorSurface> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Reflector(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn reflector(&self, id: NodeId) -> Option<&ReflectorSurface> {
        match &self.nodes[id.0].kind {
            NodeKind::Reflector(surface) => Some(surface),
            _ => None,
        }
    }

    /// Advances wall-time driven node animations by `dt` seconds.
    pub fn advance_animations(&mut self, dt: f32) {
        for node in &mut self.nodes {
            if let Some(animation) = &mut node.animation {
                animation.elapsed += dt;
                node.transform.position.y = animation.anchor.y
                    + (animation.elapsed * animation.speed).sin() * animation.range_y;
            }
        }
    }
}
