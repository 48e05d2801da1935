#![allow(dead_code)]

use std::{cell::RefCell, collections::HashSet, pin::Pin, rc::Rc, time::Duration};

use anyhow::anyhow;
use moonwake::{
    camera::CameraState,
    context::{
        ControllerSettings, FrameStats, InputController, PanelBinding, PanelHost, PanelValue,
        RenderSurface, ResizeCallback, ResizeSignal, SceneContext,
    },
    data_structures::{Rgb, SceneGraph},
    orchestrator::SceneOrchestrator,
    resources::{AssetFetcher, AssetKind, ManifestEntry, Resource},
};

/// Render surface double recording every call the orchestrator makes.
pub(crate) struct RecordingSurface {
    pub clear_colors: Vec<Rgb>,
    pub sizes: Vec<(u32, u32)>,
    pub pixel_ratios: Vec<f32>,
    pub render_calls: u32,
    /// Zero-based render invocations that should report a failure.
    pub fail_renders: HashSet<u32>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            clear_colors: Vec::new(),
            sizes: Vec::new(),
            pixel_ratios: Vec::new(),
            render_calls: 0,
            fail_renders: HashSet::new(),
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn set_clear_color(&mut self, color: Rgb) {
        self.clear_colors.push(color);
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratios.push(ratio);
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
    }

    fn render(&mut self, _scene: &SceneGraph, _camera: &CameraState) -> anyhow::Result<()> {
        let call = self.render_calls;
        self.render_calls += 1;
        if self.fail_renders.contains(&call) {
            return Err(anyhow!("simulated device loss on render {}", call));
        }
        Ok(())
    }
}

/// Input controller double counting updates and capturing applied settings.
#[derive(Default)]
pub(crate) struct CountingController {
    pub settings: Option<ControllerSettings>,
    pub updates: u32,
}

impl InputController for CountingController {
    fn apply_settings(&mut self, settings: &ControllerSettings) {
        self.settings = Some(*settings);
    }

    fn update(&mut self, _camera: &mut CameraState) {
        self.updates += 1;
    }
}

#[derive(Default)]
pub(crate) struct CountingStats {
    pub begins: u32,
    pub ends: u32,
}

impl FrameStats for CountingStats {
    fn begin(&mut self) {
        self.begins += 1;
    }

    fn end(&mut self) {
        self.ends += 1;
    }
}

/// Resize signal fired by hand from test bodies.
#[derive(Default)]
pub(crate) struct ManualResizeSignal {
    callbacks: Vec<Option<ResizeCallback>>,
}

impl ManualResizeSignal {
    pub fn live_count(&self) -> usize {
        self.callbacks.iter().flatten().count()
    }

    pub fn fire(&mut self, width: u32, height: u32, pixel_ratio: Option<f32>) {
        for callback in self.callbacks.iter_mut().flatten() {
            callback(width, height, pixel_ratio);
        }
    }
}

impl ResizeSignal for ManualResizeSignal {
    fn subscribe(&mut self, callback: ResizeCallback) -> usize {
        self.callbacks.push(Some(callback));
        self.callbacks.len() - 1
    }

    fn unsubscribe(&mut self, id: usize) {
        if let Some(slot) = self.callbacks.get_mut(id) {
            *slot = None;
        }
    }
}

pub(crate) enum WidgetKind {
    Color { initial: Rgb },
    Number { initial: f32, min: f32, max: f32 },
}

/// One registered panel widget, including the change callback the panel
/// installed.
pub(crate) struct Widget {
    pub field: String,
    pub kind: WidgetKind,
    pub label: Option<String>,
    pub callback: Option<Box<dyn FnMut(PanelValue)>>,
}

pub(crate) type PanelRecords = Rc<RefCell<Vec<Widget>>>;

/// Panel host double; widgets live in a shared record so tests can inspect
/// and fire them after the host handle moved into the context.
#[derive(Default)]
pub(crate) struct TestPanelHost {
    pub widgets: PanelRecords,
}

struct RecordBinding {
    widgets: PanelRecords,
    index: usize,
}

impl PanelBinding for RecordBinding {
    fn name(&mut self, label: &str) {
        self.widgets.borrow_mut()[self.index].label = Some(label.to_string());
    }

    fn on_change(&mut self, callback: Box<dyn FnMut(PanelValue)>) {
        self.widgets.borrow_mut()[self.index].callback = Some(callback);
    }
}

impl TestPanelHost {
    fn register(&mut self, field: &str, kind: WidgetKind) -> Box<dyn PanelBinding> {
        let index = self.widgets.borrow().len();
        self.widgets.borrow_mut().push(Widget {
            field: field.to_string(),
            kind,
            label: None,
            callback: None,
        });
        Box::new(RecordBinding {
            widgets: Rc::clone(&self.widgets),
            index,
        })
    }
}

impl PanelHost for TestPanelHost {
    fn add_color(&mut self, field: &str, initial: Rgb) -> Box<dyn PanelBinding> {
        self.register(field, WidgetKind::Color { initial })
    }

    fn add_number(
        &mut self,
        field: &str,
        initial: f32,
        min: f32,
        max: f32,
    ) -> Box<dyn PanelBinding> {
        self.register(field, WidgetKind::Number { initial, min, max })
    }
}

/// Simulates a user edit on the widget registered for `field`.
///
/// The callback is taken out for the duration of the call so the records can
/// be re-borrowed by whatever the change triggers.
pub(crate) fn fire_widget(widgets: &PanelRecords, field: &str, value: PanelValue) {
    let index = widgets
        .borrow()
        .iter()
        .position(|widget| widget.field == field)
        .unwrap_or_else(|| panic!("no widget registered for `{}`", field));
    let mut callback = widgets.borrow_mut()[index]
        .callback
        .take()
        .expect("widget has no change callback");
    callback(value);
    widgets.borrow_mut()[index].callback = Some(callback);
}

/// Fetcher producing stub resources, optionally failing one named entry.
/// Every requested name is recorded, including ones that later fail.
pub(crate) struct ScriptedFetcher {
    pub fail: Option<String>,
    pub fetched: Rc<RefCell<Vec<String>>>,
}

impl ScriptedFetcher {
    pub fn ok() -> Self {
        Self {
            fail: None,
            fetched: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            fail: Some(name.to_string()),
            fetched: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

pub(crate) fn stub_resource(kind: AssetKind) -> Resource {
    match kind {
        AssetKind::Texture => Resource::Texture(image::RgbaImage::new(2, 2)),
        AssetKind::Font => Resource::Font(b"{}".to_vec()),
        AssetKind::Model => Resource::Model(b"glTF".to_vec()),
    }
}

impl AssetFetcher for ScriptedFetcher {
    fn fetch(
        &self,
        entry: &ManifestEntry,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Resource>> + '_>> {
        self.fetched.borrow_mut().push(entry.name.clone());
        let fail = self.fail.as_deref() == Some(entry.name.as_str());
        let kind = entry.kind;
        let name = entry.name.clone();
        Box::pin(async move {
            if fail {
                Err(anyhow!("404 fetching `{}`", name))
            } else {
                Ok(stub_resource(kind))
            }
        })
    }
}

/// Typed handles to the collaborator doubles inside a [`SceneContext`].
pub(crate) struct TestHandles {
    pub surface: Rc<RefCell<RecordingSurface>>,
    pub controller: Rc<RefCell<CountingController>>,
    pub stats: Rc<RefCell<CountingStats>>,
    pub resize: Rc<RefCell<ManualResizeSignal>>,
    pub widgets: PanelRecords,
}

pub(crate) fn test_context(
    width: u32,
    height: u32,
    pixel_ratio: Option<f32>,
) -> (SceneContext, TestHandles) {
    let surface = Rc::new(RefCell::new(RecordingSurface::new()));
    let controller = Rc::new(RefCell::new(CountingController::default()));
    let stats = Rc::new(RefCell::new(CountingStats::default()));
    let resize = Rc::new(RefCell::new(ManualResizeSignal::default()));
    let panel_host = TestPanelHost::default();
    let widgets = Rc::clone(&panel_host.widgets);

    let context = SceneContext {
        surface: surface.clone(),
        controller: controller.clone(),
        stats: stats.clone(),
        resize: resize.clone(),
        panel: Rc::new(RefCell::new(panel_host)),
        viewport_width: width,
        viewport_height: height,
        pixel_ratio,
    };
    let handles = TestHandles {
        surface,
        controller,
        stats,
        resize,
        widgets,
    };
    (context, handles)
}

/// Runs `frames` refreshes of `dt` seconds each.
pub(crate) fn drive(orchestrator: &mut SceneOrchestrator, frames: u32, dt: f32) {
    for _ in 0..frames {
        orchestrator.on_refresh(Duration::from_secs_f32(dt));
    }
}
