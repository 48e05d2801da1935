//! Reactive parameter binding.
//!
//! Registers one widget per Configuration field with the host panel toolkit
//! and routes change callbacks into the [`crate::config::ConfigStore`]. The
//! store's subscribers (background colour, reflector uniforms) then run
//! within the same callback invocation, so edits take effect with no frame
//! delay. Widget bounds are advisory; nothing here validates them.

use std::{cell::RefCell, rc::Rc};

use crate::{
    config::SharedConfig,
    context::{PanelBinding, PanelHost, PanelValue},
};

pub struct ReactiveConfigPanel {
    // Dropping a binding would tear the widget down host-side.
    bindings: Vec<Box<dyn PanelBinding>>,
}

impl ReactiveConfigPanel {
    /// Registers the four tunable fields and wires their callbacks.
    pub fn install(host: &Rc<RefCell<dyn PanelHost>>, config: &SharedConfig) -> Self {
        let mut host = host.borrow_mut();
        let initial = *config.borrow().values();
        let mut bindings = Vec::new();

        let mut binding = host.add_color("skyColor", initial.sky_color);
        binding.name("sky color");
        let store = Rc::clone(config);
        binding.on_change(Box::new(move |value| {
            if let PanelValue::Color(color) = value {
                store.borrow_mut().set_sky_color(color);
            }
        }));
        bindings.push(binding);

        let mut binding =
            host.add_number("reflectorTransmission", initial.reflector_transmission, 0.0, 1.0);
        binding.name("reflection");
        let store = Rc::clone(config);
        binding.on_change(Box::new(move |value| {
            if let PanelValue::Number(transmission) = value {
                store.borrow_mut().set_reflector_transmission(transmission);
            }
        }));
        bindings.push(binding);

        let mut binding = host.add_number("waveStrength", initial.wave_strength, 0.0, 0.5);
        binding.name("wave strength");
        let store = Rc::clone(config);
        binding.on_change(Box::new(move |value| {
            if let PanelValue::Number(strength) = value {
                store.borrow_mut().set_wave_strength(strength);
            }
        }));
        bindings.push(binding);

        let mut binding = host.add_number("waveSpeed", initial.wave_speed, 0.0, 5.0);
        binding.name("wave speed");
        let store = Rc::clone(config);
        binding.on_change(Box::new(move |value| {
            if let PanelValue::Number(speed) = value {
                store.borrow_mut().set_wave_speed(speed);
            }
        }));
        bindings.push(binding);

        Self { bindings }
    }

    pub fn widget_count(&self) -> usize {
        self.bindings.len()
    }
}
