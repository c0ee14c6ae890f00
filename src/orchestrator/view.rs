//! View bindings: write-only sinks for readouts, indicators and controls.

use std::collections::{HashMap, HashSet};

use super::state::ControlAction;

/// Numeric/text readouts shown live
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Readout {
    /// Accelerometer X
    AccelX,
    /// Accelerometer Y
    AccelY,
    /// Accelerometer Z
    AccelZ,
    /// Compass bearing
    Heading,
    /// Steps counted by the active estimator
    StepCount,
    /// Address of the last beacon heard
    LastDevice,
    /// RSSI of the last beacon heard
    Rssi,
}

/// Capability indicators (the "enabled" status class)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Accelerometer came up
    Accelerometer,
    /// Compass came up
    Compass,
    /// Radio came up
    Radio,
}

/// Callback the view invokes when a control is activated
pub type ControlSink = Box<dyn FnMut(ControlAction)>;

/// Display surface for live values and controls.
///
/// Everything here is write-only from the orchestrator's perspective.
pub trait ViewBindings {
    /// Show a readout value
    fn set_readout(&mut self, readout: Readout, value: &str);

    /// Add (`true`) or remove (`false`) the enabled status of an indicator
    fn set_indicator(&mut self, indicator: Indicator, enabled: bool);

    /// Enable or disable a control
    fn set_control_enabled(&mut self, control: ControlAction, enabled: bool);

    /// Route control activations to `sink`.
    ///
    /// Views without interactive controls can ignore this.
    fn bind_controls(&mut self, _sink: ControlSink) {}
}

/// In-memory view that keeps the latest value of everything written.
///
/// Used headless and in tests. `press` simulates activating a control.
#[derive(Default)]
pub struct ViewState {
    readouts: HashMap<Readout, String>,
    indicators: HashSet<Indicator>,
    disabled: HashSet<ControlAction>,
    sinks: Vec<ControlSink>,
    writes: usize,
}

impl ViewState {
    /// Empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value of a readout
    pub fn readout(&self, readout: Readout) -> Option<&str> {
        self.readouts.get(&readout).map(String::as_str)
    }

    /// Whether an indicator shows enabled
    pub fn indicator(&self, indicator: Indicator) -> bool {
        self.indicators.contains(&indicator)
    }

    /// Whether a control is enabled
    pub fn control_enabled(&self, control: ControlAction) -> bool {
        !self.disabled.contains(&control)
    }

    /// Total number of writes received
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Activate a control. Disabled controls do nothing.
    ///
    /// Returns true if the activation reached at least one bound sink.
    pub fn press(&mut self, control: ControlAction) -> bool {
        if !self.control_enabled(control) {
            return false;
        }
        for sink in &mut self.sinks {
            sink(control);
        }
        !self.sinks.is_empty()
    }
}

impl ViewBindings for ViewState {
    fn set_readout(&mut self, readout: Readout, value: &str) {
        self.writes += 1;
        self.readouts.insert(readout, value.to_string());
    }

    fn set_indicator(&mut self, indicator: Indicator, enabled: bool) {
        self.writes += 1;
        if enabled {
            self.indicators.insert(indicator);
        } else {
            self.indicators.remove(&indicator);
        }
    }

    fn set_control_enabled(&mut self, control: ControlAction, enabled: bool) {
        self.writes += 1;
        if enabled {
            self.disabled.remove(&control);
        } else {
            self.disabled.insert(control);
        }
    }

    fn bind_controls(&mut self, sink: ControlSink) {
        self.sinks.push(sink);
    }
}
