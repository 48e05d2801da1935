//! Content modules of the moonlit-water night scene.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Point3, Quaternion, Rad, Rotation3, Vector3};

use crate::{
    content::{BuildContext, ContentModule},
    data_structures::{
        GeometrySpec, MaterialSpec, Node, NodeId, NodeKind, OrbitAnimation, PointsMaterial, Rgb,
        TextureRef,
    },
    reflector::ReflectorSurface,
    resources::LoadError,
    starfield::{self, StarBounds},
};

/// Deterministic module order for the shipped scene.
pub fn night_scene_modules(title: &str, star_count: usize) -> Vec<Box<dyn ContentModule>> {
    vec![
        Box::new(StarFieldModule { count: star_count }),
        Box::new(ReflectorModule),
        Box::new(LightRigModule),
        Box::new(MoonModule),
        Box::new(NameplateModule {
            title: title.to_string(),
        }),
        Box::new(SatellitesModule),
        Box::new(HullModule),
    ]
}

/// Point-cloud sky, drawn behind everything else.
pub struct StarFieldModule {
    pub count: usize,
}

impl ContentModule for StarFieldModule {
    fn name(&self) -> &str {
        "stars"
    }

    fn build(&self, ctx: &mut BuildContext) -> Result<NodeId, LoadError> {
        ctx.assets.require("starSprite")?;
        let cloud = starfield::generate(self.count, &StarBounds::default());
        let node = Node::new(
            "stars",
            NodeKind::Points {
                cloud,
                material: PointsMaterial {
                    color: Rgb::WHITE,
                    size: 12.0,
                    transparent: true,
                    texture: TextureRef::clamped("starSprite"),
                },
            },
        )
        .ordered(-1);
        Ok(ctx.scene.attach(ctx.scene.root(), node))
    }
}

/// The 700x700 water plane, rotated flat, carrying the mirror driver.
pub struct ReflectorModule;

impl ContentModule for ReflectorModule {
    fn name(&self) -> &str {
        "reflector"
    }

    fn build(&self, ctx: &mut BuildContext) -> Result<NodeId, LoadError> {
        ctx.assets.require("ripple")?;
        let surface = ReflectorSurface::new(
            ctx.config.sky_color,
            ctx.config.reflector_transmission,
            ctx.config.wave_strength,
            ctx.config.wave_speed,
            TextureRef::repeated("ripple"),
        );
        let node = Node::new("reflector", NodeKind::Reflector(surface))
            .rotated(Quaternion::from_angle_x(Rad(-FRAC_PI_2)));
        let id = ctx.scene.attach(ctx.scene.root(), node);
        ctx.reflector = Some(id);
        Ok(id)
    }
}

/// Three directional lights plus a soft ambient fill.
pub struct LightRigModule;

impl ContentModule for LightRigModule {
    fn name(&self) -> &str {
        "lights"
    }

    fn build(&self, ctx: &mut BuildContext) -> Result<NodeId, LoadError> {
        let rig = ctx.scene.attach(ctx.scene.root(), Node::group("lights"));
        let origin = Point3::new(0.0, 0.0, 0.0);
        let directionals = [
            ("back light", Point3::new(2.0, 10.0, -10.0), 1.5, origin),
            ("front light", Point3::new(2.0, 10.0, 10.0), 1.4, origin),
            // Side light grazes the water towards the moon.
            (
                "side light",
                Point3::new(40.0, 10.0, 0.0),
                3.4,
                Point3::new(37.0, -190.0, 80.0),
            ),
        ];
        for (name, position, intensity, target) in directionals {
            let node = Node::new(name, NodeKind::DirectionalLight { intensity, target }).at(position);
            ctx.scene.attach(rig, node);
        }
        ctx.scene.attach(rig, Node::new("ambient", NodeKind::AmbientLight));
        Ok(rig)
    }
}

/// Textured moon sphere low over the horizon.
pub struct MoonModule;

impl ContentModule for MoonModule {
    fn name(&self) -> &str {
        "moon"
    }

    fn build(&self, ctx: &mut BuildContext) -> Result<NodeId, LoadError> {
        ctx.assets.require("moon")?;
        let node = Node::mesh(
            "moon",
            GeometrySpec::Sphere {
                radius: 28.0,
                segments: 32,
            },
            MaterialSpec::Basic {
                color: Rgb::WHITE,
                texture: Some(TextureRef::clamped("moon")),
            },
        )
        .at(Point3::new(-190.0, 37.0, -80.0));
        Ok(ctx.scene.attach(ctx.scene.root(), node))
    }
}

/// Extruded title text; starts flattened and scales in via a timeline the
/// orchestrator plays at startup.
pub struct NameplateModule {
    pub title: String,
}

impl ContentModule for NameplateModule {
    fn name(&self) -> &str {
        "nameplate"
    }

    fn build(&self, ctx: &mut BuildContext) -> Result<NodeId, LoadError> {
        ctx.assets.require("titleFont")?;
        let size = 1.38;
        // Rough glyph-width centring; the backend recomputes from the real
        // bounding box when it extrudes the text.
        let center_offset = -0.5 * self.title.len() as f32 * size * 0.55;
        let node = Node::mesh(
            "nameplate",
            GeometrySpec::Text {
                content: self.title.clone(),
                size,
                depth: 0.2,
            },
            MaterialSpec::Lambert {
                color: Rgb::from_hex(0x777777),
            },
        )
        .at(Point3::new(center_offset, 0.0, -0.8))
        .scaled(Vector3::new(1.0, 0.0, 0.0));
        Ok(ctx.scene.attach(ctx.scene.root(), node))
    }
}

/// Orbiting primitives bobbing over the water. Kept off in the shipped
/// scene.
pub struct SatellitesModule;

impl ContentModule for SatellitesModule {
    fn name(&self) -> &str {
        "satellites"
    }

    fn enabled(&self) -> bool {
        false
    }

    fn build(&self, ctx: &mut BuildContext) -> Result<NodeId, LoadError> {
        let group = ctx.scene.attach(ctx.scene.root(), Node::group("satellites"));
        let white = MaterialSpec::Lambert { color: Rgb::WHITE };
        let shapes: [(&str, GeometrySpec, Point3<f32>, f32, f32, f32); 4] = [
            (
                "satellite sphere",
                GeometrySpec::Sphere { radius: 1.0, segments: 32 },
                Point3::new(6.0, 2.0, 7.0),
                1.0,
                1.0,
                0.8,
            ),
            (
                "satellite torus",
                GeometrySpec::Torus { radius: 1.0, tube: 0.3 },
                Point3::new(-4.0, 3.0, 4.0),
                1.2,
                0.6,
                1.0,
            ),
            (
                "satellite cone",
                GeometrySpec::Cone { radius: 1.0, height: 3.0 },
                Point3::new(-12.0, 2.0, -6.0),
                0.6,
                0.5,
                0.8,
            ),
            (
                "satellite cylinder",
                GeometrySpec::Cylinder { radius: 1.0, height: 3.0 },
                Point3::new(2.0, 4.0, -6.0),
                1.1,
                1.2,
                0.7,
            ),
        ];
        for (name, geometry, position, speed, range_y, scale) in shapes {
            let node = Node::mesh(name, geometry, white.clone())
                .at(position)
                .scaled(Vector3::new(scale, scale, scale))
                .animated(OrbitAnimation::new(speed, range_y, position));
            ctx.scene.attach(group, node);
        }
        Ok(group)
    }
}

/// Loaded hull model drifting in from the left. Disabled, but its asset
/// stays in the manifest.
pub struct HullModule;

impl ContentModule for HullModule {
    fn name(&self) -> &str {
        "hull"
    }

    fn enabled(&self) -> bool {
        false
    }

    fn build(&self, ctx: &mut BuildContext) -> Result<NodeId, LoadError> {
        ctx.assets.require("hull")?;
        let node = Node::new(
            "hull",
            NodeKind::Model {
                asset: "hull".to_string(),
            },
        )
        .at(Point3::new(-35.0, -0.7, -14.0));
        Ok(ctx.scene.attach(ctx.scene.root(), node))
    }
}
