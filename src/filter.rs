//! Hardware compatibility filters.
//!
//! Each attached hardware profile supplies a [`ToolFilter`]: an opaque
//! predicate deciding which tools apply to the connected device, plus the
//! hardware identity string the tool menu uses to detect redundant
//! re-application.

use std::collections::HashSet;

use crate::tools::Tool;

/// Compatibility predicate for one hardware profile.
pub trait ToolFilter {
    /// Identity of the hardware this filter belongs to. Applying a filter
    /// with the same identity twice is a no-op in the tool menu.
    fn hw_name(&self) -> &str;

    /// Whether the given tool applies to this hardware.
    fn compatible(&self, tool: Tool) -> bool;
}

/// A concrete filter built from a hardware name and its supported tool set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    name: String,
    supported: HashSet<Tool>,
}

impl DeviceProfile {
    pub fn new(name: impl Into<String>, supported: impl IntoIterator<Item = Tool>) -> Self {
        Self {
            name: name.into(),
            supported: supported.into_iter().collect(),
        }
    }

    /// A profile that supports every known tool.
    pub fn all_tools(name: impl Into<String>) -> Self {
        Self::new(name, Tool::ALL)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Built-in demo profiles shown in the launcher's device selector until
    /// real device enumeration connects one.
    pub fn builtin() -> Vec<DeviceProfile> {
        vec![
            DeviceProfile::all_tools("adalm2000"),
            DeviceProfile::new(
                "adalm-pluto",
                [
                    Tool::SpectrumAnalyzer,
                    Tool::SignalGenerator,
                    Tool::NetworkAnalyzer,
                    Tool::Debugger,
                ],
            ),
            DeviceProfile::new(
                "generic-dmm",
                [Tool::Voltmeter, Tool::PowerSupply, Tool::Calibration],
            ),
        ]
    }
}

impl ToolFilter for DeviceProfile {
    fn hw_name(&self) -> &str {
        &self.name
    }

    fn compatible(&self, tool: Tool) -> bool {
        self.supported.contains(&tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_predicate_matches_its_tool_set() {
        let p = DeviceProfile::new("dmm", [Tool::Voltmeter]);
        assert!(p.compatible(Tool::Voltmeter));
        assert!(!p.compatible(Tool::Oscilloscope));
        assert_eq!(p.hw_name(), "dmm");
    }

    #[test]
    fn all_tools_profile_accepts_everything() {
        let p = DeviceProfile::all_tools("m2k");
        for t in Tool::ALL {
            assert!(p.compatible(t));
        }
    }
}
