/**
 * Engine data models: colours and the scene graph arena.
 */
pub mod color;
pub mod scene_graph;

pub use color::Rgb;
pub use scene_graph::{
    GeometrySpec, MaterialSpec, Node, NodeId, NodeKind, OrbitAnimation, PointCloud,
    PointsMaterial, SceneGraph, TextureRef, Transform, WrapMode,
};
