use std::collections::BTreeMap;

use padbind_mapping::{InputMapping, LogicalInput, PhysicalBinding, MAPLE_PORTS};
use serde::{Deserialize, Serialize};

use super::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MappingV1 {
    pub version: u8,
    pub name: String,
    #[serde(default)]
    pub rumble_power: Option<u8>,
    #[serde(default)]
    pub dead_zone: Option<f32>,
    #[serde(default)]
    pub saturation: Option<f32>,
    #[serde(default)]
    pub ports: Vec<MappingV1Port>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MappingV1Port {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub buttons: BTreeMap<String, u32>, // input -> button code
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub axes: BTreeMap<String, String>, // input -> "<code>+" | "<code>-"
}

impl MappingV1 {
    pub fn from_mapping(mapping: &InputMapping) -> Self {
        let mut ports: Vec<MappingV1Port> = (0..MAPLE_PORTS)
            .map(|port| {
                let mut raw = MappingV1Port::default();
                for (input, binding) in mapping.bindings(port) {
                    match binding {
                        PhysicalBinding::Button(code) => {
                            raw.buttons.insert(input.name().to_string(), code);
                        }
                        PhysicalBinding::Axis { code, positive } => {
                            raw.axes.insert(input.name().to_string(), format_axis(code, positive));
                        }
                    }
                }
                raw
            })
            .collect();
        // Trailing empty ports carry no information.
        while ports.last().is_some_and(|p| p.buttons.is_empty() && p.axes.is_empty()) {
            ports.pop();
        }

        Self {
            version: 1,
            name: mapping.name.clone(),
            rumble_power: Some(mapping.rumble_power()),
            dead_zone: Some(mapping.dead_zone()),
            saturation: Some(mapping.saturation()),
            ports,
        }
    }

    pub fn to_mapping(&self) -> Result<InputMapping, Error> {
        if self.ports.len() > usize::from(MAPLE_PORTS) {
            return Err(Error::TooManyPorts(self.ports.len()));
        }

        let mut mapping = InputMapping::new(self.name.clone());
        for (port, raw) in (0..MAPLE_PORTS).zip(self.ports.iter()) {
            for (name, code) in &raw.buttons {
                let input = name.parse::<LogicalInput>()?;
                mapping.set_button(port, input, *code);
            }
            for (name, half) in &raw.axes {
                let input = name.parse::<LogicalInput>()?;
                let (code, positive) = parse_axis(half)?;
                mapping.set_axis(port, input, code, positive);
            }
        }
        if let Some(power) = self.rumble_power {
            mapping.set_rumble_power(power);
        }
        if let Some(dead_zone) = self.dead_zone {
            mapping.set_dead_zone(dead_zone);
        }
        if let Some(saturation) = self.saturation {
            mapping.set_saturation(saturation);
        }
        mapping.clear_dirty();
        Ok(mapping)
    }
}

fn format_axis(code: u32, positive: bool) -> String {
    format!("{code}{}", if positive { '+' } else { '-' })
}

/// Parse an axis half written as `<code>+` or `<code>-`.
fn parse_axis(raw: &str) -> Result<(u32, bool), Error> {
    let raw = raw.trim();
    let (digits, positive) = if let Some(d) = raw.strip_suffix('+') {
        (d, true)
    } else if let Some(d) = raw.strip_suffix('-') {
        (d, false)
    } else {
        return Err(Error::InvalidAxis(raw.to_string()));
    };
    let code = digits
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::InvalidAxis(raw.to_string()))?;
    Ok((code, positive))
}
