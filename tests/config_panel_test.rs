use moonwake::{
    config::{self, ConfigField, Configuration},
    context::PanelValue,
    data_structures::Rgb,
    orchestrator::{OrchestratorOptions, SceneOrchestrator},
};

use crate::common::test_utils::{ScriptedFetcher, WidgetKind, fire_widget, test_context};

mod common;

#[tokio::test]
async fn the_panel_registers_one_widget_per_field() {
    let (context, handles) = test_context(800, 600, None);
    let mut orchestrator = SceneOrchestrator::new(
        context,
        Box::new(ScriptedFetcher::ok()),
        OrchestratorOptions::default(),
    );
    orchestrator.initialize().await.unwrap();

    let widgets = handles.widgets.borrow();
    assert_eq!(widgets.len(), 4);

    let fields: Vec<&str> = widgets.iter().map(|w| w.field.as_str()).collect();
    assert_eq!(
        fields,
        ["skyColor", "reflectorTransmission", "waveStrength", "waveSpeed"]
    );
    let labels: Vec<&str> = widgets
        .iter()
        .map(|w| w.label.as_deref().unwrap())
        .collect();
    assert_eq!(
        labels,
        ["sky color", "reflection", "wave strength", "wave speed"]
    );

    match &widgets[0].kind {
        WidgetKind::Color { initial } => assert_eq!(*initial, Rgb::from_hex(0x0d031a)),
        _ => panic!("skyColor should be a colour widget"),
    }
    match &widgets[3].kind {
        WidgetKind::Number { initial, min, max } => {
            assert_eq!(*initial, 1.4);
            assert_eq!(*min, 0.0);
            assert_eq!(*max, 5.0);
        }
        _ => panic!("waveSpeed should be a number widget"),
    }
    assert!(widgets.iter().all(|w| w.callback.is_some()));
}

#[tokio::test]
async fn a_sky_colour_edit_fans_out_in_one_invocation() {
    let (context, handles) = test_context(800, 600, None);
    let mut orchestrator = SceneOrchestrator::new(
        context,
        Box::new(ScriptedFetcher::ok()),
        OrchestratorOptions::default(),
    );
    orchestrator.initialize().await.unwrap();

    let red = Rgb::new(255, 0, 0);
    fire_widget(&handles.widgets, "skyColor", PanelValue::Color(red));

    // No frame ran in between: the edit reached all three dependents.
    assert_eq!(orchestrator.frame_clock(), 0);
    let scene = orchestrator.scene().unwrap().borrow();
    assert_eq!(scene.background(), red);
    let id = orchestrator.reflector_node().unwrap();
    assert_eq!(scene.reflector(id).unwrap().uniforms().color, red);
    assert_eq!(handles.surface.borrow().clear_colors.last(), Some(&red));
}

#[tokio::test]
async fn wave_speed_edits_reach_the_uniform_scaled_down() {
    let (context, handles) = test_context(800, 600, None);
    let mut orchestrator = SceneOrchestrator::new(
        context,
        Box::new(ScriptedFetcher::ok()),
        OrchestratorOptions::default(),
    );
    orchestrator.initialize().await.unwrap();
    let id = orchestrator.reflector_node().unwrap();

    fire_widget(&handles.widgets, "waveSpeed", PanelValue::Number(2.0));

    let scene = orchestrator.scene().unwrap().borrow();
    let uniforms = scene.reflector(id).unwrap().uniforms();
    assert!((uniforms.wave_speed - 0.002).abs() < 1e-9);
}

#[tokio::test]
async fn reflector_setters_reject_garbage_and_clamp_ranges() {
    let (context, handles) = test_context(800, 600, None);
    let mut orchestrator = SceneOrchestrator::new(
        context,
        Box::new(ScriptedFetcher::ok()),
        OrchestratorOptions::default(),
    );
    orchestrator.initialize().await.unwrap();
    let id = orchestrator.reflector_node().unwrap();

    // Panel bounds are advisory; the surface clamps for itself.
    fire_widget(
        &handles.widgets,
        "reflectorTransmission",
        PanelValue::Number(1.5),
    );
    {
        let scene = orchestrator.scene().unwrap().borrow();
        assert_eq!(scene.reflector(id).unwrap().uniforms().transmission, 1.0);
    }

    fire_widget(
        &handles.widgets,
        "waveStrength",
        PanelValue::Number(f32::NAN),
    );
    let scene = orchestrator.scene().unwrap().borrow();
    let uniforms = scene.reflector(id).unwrap().uniforms();
    assert_eq!(uniforms.wave_strength, 0.0715);
}

#[test]
fn store_subscribers_run_synchronously_inside_the_setter() {
    let store = config::shared(Configuration::default());
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = std::rc::Rc::clone(&seen);
    store.borrow_mut().subscribe(move |values, field| {
        log.borrow_mut().push((field, values.wave_strength));
    });

    store.borrow_mut().set_wave_strength(0.2);
    store.borrow_mut().set_sky_color(Rgb::WHITE);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    // The subscriber observed the already-updated record.
    assert_eq!(seen[0], (ConfigField::WaveStrength, 0.2));
    assert_eq!(seen[1].0, ConfigField::SkyColor);
}
