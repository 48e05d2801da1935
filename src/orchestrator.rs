//! Top-level composition and the application frame loop.
//!
//! The [`SceneOrchestrator`] owns every core component and sequences the
//! whole lifecycle: await the asset load, build the scene graph in strict
//! order, wire the reactive bindings, subscribe to resize, start the frame
//! scheduler and play the intro timelines.
//!
//! # Lifecycle
//!
//! 1. `initialize().await` — the single asynchronous suspension point;
//!    aborts wholesale on any manifest failure
//! 2. `on_refresh(dt)` — called by the host once per display refresh;
//!    advances timelines and runs one scheduled frame
//! 3. resize notifications arrive through the subscribed [`ResizeSignal`]
//!    independently of the frame loop
//! 4. `shutdown()` — stops the scheduler and removes the resize listener

use std::{cell::RefCell, rc::Rc};

use cgmath::{Deg, Point3};
use instant::Duration;

use crate::{
    camera::CameraState,
    config::{self, ConfigField, Configuration, SharedConfig},
    content::{BuildContext, night::night_scene_modules, night_scene_manifest},
    context::{ControllerSettings, SceneContext},
    data_structures::{NodeId, SceneGraph},
    panel::ReactiveConfigPanel,
    resources::{AssetCatalog, AssetFetcher, LoadError, ManifestEntry},
    scheduler::{FrameScheduler, RenderLoopError},
    starfield,
    timeline::{self, Timeline, Tween},
    viewport::ViewportResizeAdapter,
};

const CAMERA_FOV: Deg<f32> = Deg(48.0);
const CAMERA_NEAR: f32 = 0.6;
const CAMERA_FAR: f32 = 1600.0;

/// Startup knobs. The defaults reproduce the shipped night scene.
pub struct OrchestratorOptions {
    pub manifest: Vec<ManifestEntry>,
    /// Nameplate text.
    pub title: String,
    pub config: Configuration,
    pub star_count: usize,
    pub controller: ControllerSettings,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            manifest: night_scene_manifest(),
            title: "Richard Lovelace".to_string(),
            config: Configuration::default(),
            star_count: starfield::STAR_COUNT,
            controller: ControllerSettings::default(),
        }
    }
}

pub struct SceneOrchestrator {
    context: SceneContext,
    catalog: AssetCatalog,
    options: OrchestratorOptions,
    config: SharedConfig,
    scene: Option<Rc<RefCell<SceneGraph>>>,
    camera: Option<Rc<RefCell<CameraState>>>,
    reflector: Option<NodeId>,
    scheduler: FrameScheduler,
    timelines: Vec<Timeline>,
    adapter: Rc<RefCell<ViewportResizeAdapter>>,
    resize_subscription: Option<usize>,
    panel: Option<ReactiveConfigPanel>,
}

impl SceneOrchestrator {
    pub fn new(
        context: SceneContext,
        fetcher: Box<dyn AssetFetcher>,
        options: OrchestratorOptions,
    ) -> Self {
        let config = config::shared(options.config);
        Self {
            context,
            catalog: AssetCatalog::new(fetcher),
            options,
            config,
            scene: None,
            camera: None,
            reflector: None,
            scheduler: FrameScheduler::new(),
            timelines: Vec::new(),
            adapter: Rc::new(RefCell::new(ViewportResizeAdapter::new())),
            resize_subscription: None,
            panel: None,
        }
    }

    /// Loads the manifest and builds the whole scene, or nothing at all.
    ///
    /// On any manifest failure the error propagates before a single node is
    /// committed: no partial scene graph, no running loop, no listeners.
    pub async fn initialize(&mut self) -> Result<(), LoadError> {
        log::info!(
            "initializing scene, {} manifest entries",
            self.options.manifest.len()
        );
        // The one asynchronous suspension point; nothing below runs until
        // every asset resolved.
        let registry = self.catalog.load(&self.options.manifest).await?;

        let initial = *self.config.borrow().values();

        // Render surface state first, matching the shipped init order.
        self.context
            .surface
            .borrow_mut()
            .set_clear_color(initial.sky_color);

        let mut scene = SceneGraph::new(initial.sky_color);

        let aspect = self.context.viewport_width.max(1) as f32
            / self.context.viewport_height.max(1) as f32;
        let mut camera = CameraState::new(CAMERA_FOV, aspect, CAMERA_NEAR, CAMERA_FAR);
        camera.position = Point3::new(9.0, 0.6, 10.0);
        camera.look_at(Point3::new(0.0, 0.0, 0.0));

        self.context
            .controller
            .borrow_mut()
            .apply_settings(&self.options.controller);

        // Content modules attach in deterministic order; an error here still
        // leaves `self` untouched since the graph only commits below.
        let mut build = BuildContext {
            scene: &mut scene,
            assets: &registry,
            config: &initial,
            reflector: None,
        };
        for module in night_scene_modules(&self.options.title, self.options.star_count) {
            if !module.enabled() {
                log::debug!("content module `{}` is disabled", module.name());
                continue;
            }
            module.build(&mut build)?;
        }
        let reflector = build.reflector;

        let scene = Rc::new(RefCell::new(scene));
        let camera = Rc::new(RefCell::new(camera));
        self.scene = Some(Rc::clone(&scene));
        self.camera = Some(Rc::clone(&camera));
        self.reflector = reflector;

        self.register_config_subscriptions(&scene, reflector);
        self.panel = Some(ReactiveConfigPanel::install(
            &self.context.panel,
            &self.config,
        ));

        self.register_resize(&camera);
        {
            // Initial sizing runs through the same adapter path as resizes.
            let mut camera = camera.borrow_mut();
            let mut surface = self.context.surface.borrow_mut();
            self.adapter.borrow_mut().apply(
                &mut camera,
                &mut *surface,
                self.context.viewport_width,
                self.context.viewport_height,
                self.context.pixel_ratio,
            );
        }

        self.scheduler.start();

        let mut intro = timeline::intro_camera_timeline(
            Rc::clone(&camera),
            Rc::clone(&self.context.controller),
        );
        intro.play();
        self.timelines.push(intro);
        self.play_nameplate_intro(&scene);

        log::info!("scene ready, {} nodes", scene.borrow().len());
        Ok(())
    }

    /// Hooks the store subscribers up: a sky-colour edit reaches the
    /// background, the clear colour and the reflector tint inside the same
    /// callback; reflector-field edits reach its uniforms directly.
    fn register_config_subscriptions(
        &self,
        scene: &Rc<RefCell<SceneGraph>>,
        reflector: Option<NodeId>,
    ) {
        let scene = Rc::clone(scene);
        let surface = Rc::clone(&self.context.surface);
        self.config
            .borrow_mut()
            .subscribe(move |values, field| match field {
                ConfigField::SkyColor => {
                    let mut scene = scene.borrow_mut();
                    scene.set_background(values.sky_color);
                    surface.borrow_mut().set_clear_color(values.sky_color);
                    if let Some(id) = reflector {
                        if let Some(mirror) = scene.reflector_mut(id) {
                            mirror.set_color(values.sky_color);
                        }
                    }
                }
                ConfigField::ReflectorTransmission => {
                    if let Some(id) = reflector {
                        if let Some(mirror) = scene.borrow_mut().reflector_mut(id) {
                            mirror.set_transmission(values.reflector_transmission);
                        }
                    }
                }
                ConfigField::WaveStrength => {
                    if let Some(id) = reflector {
                        if let Some(mirror) = scene.borrow_mut().reflector_mut(id) {
                            mirror.set_wave_strength(values.wave_strength);
                        }
                    }
                }
                ConfigField::WaveSpeed => {
                    if let Some(id) = reflector {
                        if let Some(mirror) = scene.borrow_mut().reflector_mut(id) {
                            mirror.set_wave_speed(values.wave_speed);
                        }
                    }
                }
            });
    }

    fn register_resize(&mut self, camera: &Rc<RefCell<CameraState>>) {
        let camera = Rc::clone(camera);
        let surface = Rc::clone(&self.context.surface);
        let adapter = Rc::clone(&self.adapter);
        let id = self
            .context
            .resize
            .borrow_mut()
            .subscribe(Box::new(move |width, height, pixel_ratio| {
                adapter.borrow_mut().apply(
                    &mut camera.borrow_mut(),
                    &mut *surface.borrow_mut(),
                    width,
                    height,
                    pixel_ratio,
                );
            }));
        self.resize_subscription = Some(id);
    }

    /// Scale-in of the title text: flattened at build time, eased up to full
    /// height (and slightly overshot depth) over 1.4 time-units.
    fn play_nameplate_intro(&mut self, scene: &Rc<RefCell<SceneGraph>>) {
        let Some(id) = scene.borrow().find("nameplate") else {
            return;
        };
        let scene = Rc::clone(scene);
        let tween = Tween::new(
            vec![0.0, 0.0],
            vec![1.0, 1.2],
            1.4,
            timeline::ease_out_expo,
            move |values| {
                let mut scene = scene.borrow_mut();
                let transform = &mut scene.node_mut(id).transform;
                transform.scale.y = values[0];
                transform.scale.z = values[1];
            },
        );
        let mut timeline = Timeline::new().then(tween);
        timeline.play();
        self.timelines.push(timeline);
    }

    /// One display refresh: advances live timelines by `dt`, then runs one
    /// scheduled frame (stats window, controller damping, render, entity
    /// advancement, clock increment). Returns whether the host should re-arm.
    ///
    /// A failing render is logged and the loop keeps scheduling.
    pub fn on_refresh(&mut self, dt: Duration) -> bool {
        if !self.scheduler.is_running() {
            return false;
        }
        let dt_secs = dt.as_secs_f32();
        for timeline in &mut self.timelines {
            timeline.advance(dt_secs);
        }
        self.timelines.retain(|timeline| !timeline.is_done());

        let (Some(scene), Some(camera)) = (self.scene.as_ref(), self.camera.as_ref()) else {
            return false;
        };
        let surface = &self.context.surface;
        let controller = &self.context.controller;
        let stats = &self.context.stats;
        let reflector = self.reflector;
        self.scheduler.run_frame(|_frame| {
            stats.borrow_mut().begin();
            controller.borrow_mut().update(&mut camera.borrow_mut());
            let rendered = {
                let scene = scene.borrow();
                let camera = camera.borrow();
                surface
                    .borrow_mut()
                    .render(&scene, &camera)
                    .map_err(RenderLoopError)
            };
            {
                let mut scene = scene.borrow_mut();
                if let Some(id) = reflector {
                    if let Some(mirror) = scene.reflector_mut(id) {
                        mirror.advance_frame();
                    }
                }
                scene.advance_animations(dt_secs);
            }
            stats.borrow_mut().end();
            rendered
        })
    }

    /// Deterministic teardown: stops the scheduler and removes the resize
    /// listener. Further refreshes are no-ops.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
        if let Some(id) = self.resize_subscription.take() {
            self.context.resize.borrow_mut().unsubscribe(id);
        }
        log::info!("shut down at frame {}", self.scheduler.frame_clock());
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn frame_clock(&self) -> u64 {
        self.scheduler.frame_clock()
    }

    pub fn scene(&self) -> Option<&Rc<RefCell<SceneGraph>>> {
        self.scene.as_ref()
    }

    pub fn camera(&self) -> Option<&Rc<RefCell<CameraState>>> {
        self.camera.as_ref()
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn reflector_node(&self) -> Option<NodeId> {
        self.reflector
    }
}

/// Initializes the platform logger, once.
pub fn bootstrap() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
