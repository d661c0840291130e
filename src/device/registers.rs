//! CustomLogic control register map, as exposed through the
//! frame-grabber interface port.

pub const CONTROL_ADDRESS: &str = "CustomLogicControlAddress";
pub const CONTROL_DATA: &str = "CustomLogicControlData";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Scratchpad = 0x0000,
    FrameToLine = 0x0001,
    TrafficGenerator = 0x0002,
    MementoEvent = 0x0003,
    LutControl = 0x0004,
    LutCoefficient = 0x0005,
    PixelThreshold = 0x0006,
}

impl Register {
    pub fn address(self) -> u32 {
        self as u32
    }

    pub fn from_address(address: u32) -> Option<Self> {
        let register = match address {
            0x0000 => Register::Scratchpad,
            0x0001 => Register::FrameToLine,
            0x0002 => Register::TrafficGenerator,
            0x0003 => Register::MementoEvent,
            0x0004 => Register::LutControl,
            0x0005 => Register::LutCoefficient,
            0x0006 => Register::PixelThreshold,
            _ => return None,
        };

        Some(register)
    }
}

pub const SCRATCHPAD_TEST: &str = "1234567890";

pub const FRAME_TO_LINE_BYPASS_DISABLE: u32 = 0x0000_0002;
pub const TRAFFIC_GENERATOR_ENABLE: u32 = 0x0000_0001;
pub const MEMENTO_EVENT_TRIGGER: u32 = 0x7E57_7E57;

// LUT control: bit 0 arms coefficient programming, bit 9 disables bypass.
// The threshold register shares the bit 9 bypass control.
pub const LUT_PROGRAMMING_ENABLE: u32 = 0x0000_0001;
pub const BYPASS_DISABLE: u32 = 0x0000_0200;

pub const DEFAULT_THRESHOLD: u8 = 0x7F;

pub const LUT_SIZE: usize = 256;
