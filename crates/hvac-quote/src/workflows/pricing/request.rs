use super::catalog::{Brand, SizeClass, SystemType};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What the homeowner cares about most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Budget,
    #[default]
    Value,
    Performance,
}

impl Priority {
    /// Matches the quiz option ids exactly; `"Budget"` is not `budget`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "budget" => Some(Self::Budget),
            "value" => Some(Self::Value),
            "performance" => Some(Self::Performance),
            _ => None,
        }
    }

    /// Only `Budget` selects the budget line; every other priority prices premium equipment.
    pub fn brand(self) -> Brand {
        match self {
            Priority::Budget => Brand::Budget,
            Priority::Value | Priority::Performance => Brand::Premium,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Budget => "lowest upfront cost",
            Priority::Value => "best value",
            Priority::Performance => "maximum performance",
        }
    }
}

/// Normalized pricing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub priority: Priority,
    pub size: SizeClass,
    pub system_type: SystemType,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            priority: Priority::default(),
            size: SizeClass::DEFAULT,
            system_type: SystemType::Split,
        }
    }
}

impl QuoteRequest {
    pub fn new(priority: Priority, size: SizeClass, system_type: SystemType) -> Self {
        Self {
            priority,
            size,
            system_type,
        }
    }

    /// Builds a request from loosely typed answers. Missing or unrecognized
    /// values take the defaults (value priority, 3 ton, split) and are logged.
    pub fn from_raw(priority: Option<&str>, size: Option<&str>, system_type: Option<&str>) -> Self {
        let priority = match priority.filter(|raw| !raw.trim().is_empty()) {
            None => Priority::default(),
            Some(raw) => Priority::parse(raw).unwrap_or_else(|| {
                warn!(priority = raw, "unrecognized priority, pricing premium equipment");
                Priority::default()
            }),
        };

        let size = match non_empty(size) {
            None => SizeClass::DEFAULT,
            Some(raw) => SizeClass::parse(raw).unwrap_or_else(|| {
                warn!(size = raw, "unrecognized system size, using 3ton");
                SizeClass::DEFAULT
            }),
        };

        let system_type = match non_empty(system_type) {
            None => SystemType::Split,
            Some(raw) => SystemType::parse(raw).unwrap_or_else(|| {
                warn!(system_type = raw, "unrecognized system type, using split");
                SystemType::Split
            }),
        };

        Self {
            priority,
            size,
            system_type,
        }
    }

    pub fn brand(&self) -> Brand {
        self.priority.brand()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
