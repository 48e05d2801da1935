//! Live-tunable visual parameters and their change subscriptions.
//!
//! The [`ConfigStore`] replaces hand-wired fan-out: dependents subscribe once
//! at construction and every field write emits a [`ConfigField`] event to all
//! subscribers within the same call, so a panel edit reaches the background
//! colour and the reflector uniforms with no frame delay.

use std::{cell::RefCell, rc::Rc};

use crate::data_structures::Rgb;

/// Which Configuration field changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigField {
    SkyColor,
    ReflectorTransmission,
    WaveStrength,
    WaveSpeed,
}

/// The tunable record. Declared ranges (transmission in [0,1], strength ≥ 0)
/// are advisory; the store never validates them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Configuration {
    pub sky_color: Rgb,
    pub reflector_transmission: f32,
    pub wave_strength: f32,
    pub wave_speed: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            sky_color: Rgb::from_hex(0x0d031a),
            reflector_transmission: 0.7,
            wave_strength: 0.0715,
            wave_speed: 1.4,
        }
    }
}

type Subscriber = Box<dyn FnMut(&Configuration, ConfigField)>;

/// Configuration plus its change subscribers.
///
/// Subscribers run synchronously inside the setter; they must not call back
/// into the store.
pub struct ConfigStore {
    values: Configuration,
    subscribers: Vec<Subscriber>,
}

impl ConfigStore {
    pub fn new(values: Configuration) -> Self {
        Self {
            values,
            subscribers: Vec::new(),
        }
    }

    pub fn values(&self) -> &Configuration {
        &self.values
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Configuration, ConfigField) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn set_sky_color(&mut self, color: Rgb) {
        self.values.sky_color = color;
        self.emit(ConfigField::SkyColor);
    }

    pub fn set_reflector_transmission(&mut self, transmission: f32) {
        self.values.reflector_transmission = transmission;
        self.emit(ConfigField::ReflectorTransmission);
    }

    pub fn set_wave_strength(&mut self, strength: f32) {
        self.values.wave_strength = strength;
        self.emit(ConfigField::WaveStrength);
    }

    pub fn set_wave_speed(&mut self, speed: f32) {
        self.values.wave_speed = speed;
        self.emit(ConfigField::WaveSpeed);
    }

    fn emit(&mut self, field: ConfigField) {
        let values = &self.values;
        for subscriber in &mut self.subscribers {
            subscriber(values, field);
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

pub type SharedConfig = Rc<RefCell<ConfigStore>>;

pub fn shared(values: Configuration) -> SharedConfig {
    Rc::new(RefCell::new(ConfigStore::new(values)))
}
