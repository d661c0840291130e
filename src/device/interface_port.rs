use std::fmt::Display;

use super::device_error::DeviceResult;

/// Payload of an interface-port write. The scratchpad test value travels
/// as a decimal string; every other write is numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterValue {
    Int(u32),
    Str(String),
}

impl From<u32> for RegisterValue {
    fn from(value: u32) -> Self {
        RegisterValue::Int(value)
    }
}

impl From<&str> for RegisterValue {
    fn from(value: &str) -> Self {
        RegisterValue::Str(String::from(value))
    }
}

impl Display for RegisterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            RegisterValue::Int(v) => write!(f, "0x{:08X}", v),
            RegisterValue::Str(ref s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Named-feature access to one frame-grabber's interface port.
///
/// Implementations own the transport. The address selected through
/// `CustomLogicControlAddress` is sticky state on the device, so calls on
/// one port must not be interleaved by several callers.
pub trait InterfacePort {
    fn set(&mut self, name: &str, value: RegisterValue) -> DeviceResult<()>;

    fn get(&mut self, name: &str) -> DeviceResult<u32>;
}

impl<P: InterfacePort + ?Sized> InterfacePort for &mut P {
    fn set(&mut self, name: &str, value: RegisterValue) -> DeviceResult<()> {
        (**self).set(name, value)
    }

    fn get(&mut self, name: &str) -> DeviceResult<u32> {
        (**self).get(name)
    }
}
