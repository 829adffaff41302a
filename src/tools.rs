//! The master list of instrument tools the launcher can present.
//!
//! A [`Tool`] identifies one instrument panel type (oscilloscope, spectrum
//! analyzer, ...). Identity is the enum value; every tool also has a stable
//! integer index into [`Tool::ALL`] which is what gets persisted in the
//! ordering settings.

use serde::{Deserialize, Serialize};

use egui_phosphor::regular as icons;

/// One instrument panel type the application can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Oscilloscope,
    SpectrumAnalyzer,
    NetworkAnalyzer,
    SignalGenerator,
    LogicAnalyzer,
    PatternGenerator,
    DigitalIo,
    Voltmeter,
    PowerSupply,
    Debugger,
    Calibration,
    NewInstrument,
}

impl Tool {
    /// Every known tool, in canonical order. Persisted position lists store
    /// indices into this array.
    pub const ALL: [Tool; 12] = [
        Tool::Oscilloscope,
        Tool::SpectrumAnalyzer,
        Tool::NetworkAnalyzer,
        Tool::SignalGenerator,
        Tool::LogicAnalyzer,
        Tool::PatternGenerator,
        Tool::DigitalIo,
        Tool::Voltmeter,
        Tool::PowerSupply,
        Tool::Debugger,
        Tool::Calibration,
        Tool::NewInstrument,
    ];

    /// Stable index of this tool in [`Tool::ALL`].
    pub fn index(self) -> usize {
        Tool::ALL
            .iter()
            .position(|&t| t == self)
            .unwrap_or_default()
    }

    /// Inverse of [`Tool::index`]. Out-of-range indices yield `None`.
    pub fn from_index(index: usize) -> Option<Tool> {
        Tool::ALL.get(index).copied()
    }

    /// Machine-readable identifier, used by script commands.
    pub fn id(self) -> &'static str {
        match self {
            Tool::Oscilloscope => "oscilloscope",
            Tool::SpectrumAnalyzer => "spectrum-analyzer",
            Tool::NetworkAnalyzer => "network-analyzer",
            Tool::SignalGenerator => "signal-generator",
            Tool::LogicAnalyzer => "logic-analyzer",
            Tool::PatternGenerator => "pattern-generator",
            Tool::DigitalIo => "digital-io",
            Tool::Voltmeter => "voltmeter",
            Tool::PowerSupply => "power-supply",
            Tool::Debugger => "debugger",
            Tool::Calibration => "calibration",
            Tool::NewInstrument => "new-instrument",
        }
    }

    /// Parse a script identifier back into a tool.
    pub fn from_id(id: &str) -> Option<Tool> {
        Tool::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Translation-catalog key for the display label.
    pub fn label_key(self) -> &'static str {
        match self {
            Tool::Oscilloscope => "tool.oscilloscope",
            Tool::SpectrumAnalyzer => "tool.spectrum_analyzer",
            Tool::NetworkAnalyzer => "tool.network_analyzer",
            Tool::SignalGenerator => "tool.signal_generator",
            Tool::LogicAnalyzer => "tool.logic_analyzer",
            Tool::PatternGenerator => "tool.pattern_generator",
            Tool::DigitalIo => "tool.digital_io",
            Tool::Voltmeter => "tool.voltmeter",
            Tool::PowerSupply => "tool.power_supply",
            Tool::Debugger => "tool.debugger",
            Tool::Calibration => "tool.calibration",
            Tool::NewInstrument => "tool.new_instrument",
        }
    }

    /// Sidebar icon glyph (Phosphor).
    pub fn icon(self) -> &'static str {
        match self {
            Tool::Oscilloscope => icons::WAVE_SINE,
            Tool::SpectrumAnalyzer => icons::CHART_BAR,
            Tool::NetworkAnalyzer => icons::GRAPH,
            Tool::SignalGenerator => icons::WAVE_SQUARE,
            Tool::LogicAnalyzer => icons::PULSE,
            Tool::PatternGenerator => icons::WAVE_TRIANGLE,
            Tool::DigitalIo => icons::ARROWS_LEFT_RIGHT,
            Tool::Voltmeter => icons::GAUGE,
            Tool::PowerSupply => icons::BATTERY_CHARGING,
            Tool::Debugger => icons::BUG,
            Tool::Calibration => icons::WRENCH,
            Tool::NewInstrument => icons::FLASK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_tool() {
        for (i, tool) in Tool::ALL.iter().enumerate() {
            assert_eq!(tool.index(), i);
            assert_eq!(Tool::from_index(i), Some(*tool));
        }
        assert_eq!(Tool::from_index(Tool::ALL.len()), None);
    }

    #[test]
    fn script_ids_are_unique() {
        for a in Tool::ALL {
            assert_eq!(Tool::from_id(a.id()), Some(a));
        }
        assert_eq!(Tool::from_id("frobnicator"), None);
    }
}
