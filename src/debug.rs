//! Debug panel scaffolding.
//!
//! Holds tweakable numeric parameters by name. The scene creates the panel
//! with nothing bound; it only tracks visibility and values, drawing is left
//! to whatever overlay gets wired up later.

use std::ops::RangeInclusive;

#[derive(Clone, Debug, PartialEq)]
pub struct Controller {
    pub name: String,
    pub value: f32,
    pub range: RangeInclusive<f32>,
}

#[derive(Debug)]
pub struct DebugPanel {
    title: String,
    visible: bool,
    controllers: Vec<Controller>,
}

impl DebugPanel {
    pub fn new(title: &str) -> Self {
        log::debug!("debug panel \"{}\" created", title);
        Self {
            title: title.to_string(),
            visible: true,
            controllers: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    /// Bind a numeric parameter; the initial value is clamped into `range`.
    pub fn bind(&mut self, name: &str, value: f32, range: RangeInclusive<f32>) -> &mut Controller {
        let value = value.clamp(*range.start(), *range.end());
        self.controllers.push(Controller {
            name: name.to_string(),
            value,
            range,
        });
        let idx = self.controllers.len() - 1;
        &mut self.controllers[idx]
    }

    /// Set a bound parameter; returns the clamped value, or `None` if unbound.
    pub fn set(&mut self, name: &str, value: f32) -> Option<f32> {
        let controller = self.controllers.iter_mut().find(|c| c.name == name)?;
        controller.value = value.clamp(*controller.range.start(), *controller.range.end());
        Some(controller.value)
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.controllers
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!(
            "debug panel \"{}\" {}",
            self.title,
            if self.visible { "shown" } else { "hidden" }
        );
    }
}
