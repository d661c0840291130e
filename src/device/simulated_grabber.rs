use std::collections::BTreeMap;

use log::{debug, error};

use super::device_error::{DeviceResult, TransportError};
use super::interface_port::{InterfacePort, RegisterValue};
use super::registers::*;

/// One call as it reached the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortCall {
    Set(String, RegisterValue),
    Get(String),
}

/// In-memory CustomLogic register file behind an interface port.
///
/// Only calls that succeed are recorded in `calls`.
pub struct SimulatedGrabber {
    name: String,
    address: u32,
    registers: BTreeMap<u32, u32>,
    lut_armed: bool,
    lut_bypass_disabled: bool,
    lut_coefficients: Vec<u8>,
    threshold: u8,
    threshold_bypass_disabled: bool,
    memento_events: u32,
    calls: Vec<PortCall>,
    fail_after: Option<usize>,
}

impl SimulatedGrabber {
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            address: 0,
            registers: BTreeMap::new(),
            lut_armed: false,
            lut_bypass_disabled: false,
            lut_coefficients: Vec::with_capacity(LUT_SIZE),
            threshold: 0,
            threshold_bypass_disabled: false,
            memento_events: 0,
            calls: Vec::new(),
            fail_after: None,
        }
    }

    /// Drop the link once `n` calls have gone through: call `n` and every
    /// later one fails with `Disconnected`.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calls(&self) -> &[PortCall] {
        &self.calls
    }

    pub fn register(&self, address: u32) -> Option<u32> {
        self.registers.get(&address).copied()
    }

    /// Coefficients in the order they were pushed through the LUT port.
    pub fn lut_coefficients(&self) -> &[u8] {
        &self.lut_coefficients
    }

    pub fn lut_bypass_disabled(&self) -> bool {
        self.lut_bypass_disabled
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn threshold_bypass_disabled(&self) -> bool {
        self.threshold_bypass_disabled
    }

    pub fn memento_events(&self) -> u32 {
        self.memento_events
    }

    fn check_link(&self) -> DeviceResult<()> {
        match self.fail_after {
            Some(n) if self.calls.len() >= n => {
                error!("{}: link down after {} calls", self.name, n);
                Err(TransportError::Disconnected)
            }
            _ => Ok(()),
        }
    }

    fn write_data(&mut self, value: u32) -> DeviceResult<()> {
        match Register::from_address(self.address) {
            Some(Register::LutControl) => {
                self.lut_armed = value & LUT_PROGRAMMING_ENABLE != 0;
                self.lut_bypass_disabled = value & BYPASS_DISABLE != 0;
                if self.lut_armed {
                    self.lut_coefficients.clear();
                }
            }
            Some(Register::LutCoefficient) => {
                if !self.lut_armed {
                    return Err(TransportError::Nack(String::from(
                        "LUT coefficient write while programming is disabled",
                    )));
                }
                if self.lut_coefficients.len() == LUT_SIZE {
                    return Err(TransportError::Nack(String::from("LUT is full")));
                }
                self.lut_coefficients.push(value as u8);
            }
            Some(Register::PixelThreshold) => {
                if value & BYPASS_DISABLE != 0 {
                    self.threshold_bypass_disabled = true;
                } else {
                    self.threshold = value as u8;
                }
            }
            Some(Register::MementoEvent) => {
                if value == MEMENTO_EVENT_TRIGGER {
                    self.memento_events += 1;
                }
            }
            _ => {}
        }

        self.registers.insert(self.address, value);
        Ok(())
    }
}

fn normalize(value: &RegisterValue) -> DeviceResult<u32> {
    match *value {
        RegisterValue::Int(v) => Ok(v),
        RegisterValue::Str(ref s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| TransportError::Malformed(format!("\"{}\" is not a decimal u32", s))),
    }
}

impl InterfacePort for SimulatedGrabber {
    fn set(&mut self, name: &str, value: RegisterValue) -> DeviceResult<()> {
        self.check_link()?;
        let raw = normalize(&value)?;

        match name {
            CONTROL_ADDRESS => {
                self.address = raw;
            }
            CONTROL_DATA => {
                self.write_data(raw)?;
            }
            _ => {
                return Err(TransportError::Nack(format!("unknown feature {}", name)));
            }
        }

        debug!("{}: set {} = {}", self.name, name, value);
        self.calls.push(PortCall::Set(String::from(name), value));
        Ok(())
    }

    fn get(&mut self, name: &str) -> DeviceResult<u32> {
        self.check_link()?;

        let value = match name {
            CONTROL_ADDRESS => self.address,
            CONTROL_DATA => self.register(self.address).unwrap_or(0),
            _ => {
                return Err(TransportError::Nack(format!("unknown feature {}", name)));
            }
        };

        debug!("{}: get {} -> 0x{:08X}", self.name, name, value);
        self.calls.push(PortCall::Get(String::from(name)));
        Ok(value)
    }
}
