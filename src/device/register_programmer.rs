use log::{error, info};

use super::cfg::Cfg;
use super::device_error::DeviceResult;
use super::interface_port::{InterfacePort, RegisterValue};
use super::registers::*;

/// Outcome of a configuration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureReport {
    /// Scratchpad value read back from the device. Not checked here.
    pub scratchpad: u32,
}

/// Drives the CustomLogic control interface of a frame-grabber.
///
/// Every step selects its register address before touching the data
/// register; the address is held on the device, not here.
pub struct RegisterProgrammer {
    cfg: Cfg,
}

impl RegisterProgrammer {
    pub fn new() -> Self {
        Self { cfg: Cfg::new() }
    }

    pub fn with_cfg(cfg: Cfg) -> Self {
        Self { cfg }
    }

    fn select<P: InterfacePort + ?Sized>(&self, port: &mut P, register: Register) -> DeviceResult<()> {
        port.set(CONTROL_ADDRESS, RegisterValue::Int(register.address()))
    }

    fn write_data<P: InterfacePort + ?Sized>(&self, port: &mut P, value: RegisterValue) -> DeviceResult<()> {
        port.set(CONTROL_DATA, value)
    }

    fn write_register<P: InterfacePort + ?Sized>(
        &self,
        port: &mut P,
        register: Register,
        value: u32,
    ) -> DeviceResult<()> {
        self.select(port, register)?;
        self.write_data(port, RegisterValue::Int(value))
    }

    /// Write the scratchpad test value and read it back.
    pub fn scratchpad_test<P: InterfacePort + ?Sized>(&self, port: &mut P) -> DeviceResult<u32> {
        self.select(port, Register::Scratchpad)?;
        self.write_data(port, RegisterValue::Str(self.cfg.scratchpad.clone()))?;

        self.select(port, Register::Scratchpad)?;
        let scratchpad = port.get(CONTROL_DATA)?;
        info!("Control Register Scratchpad value is: {}", scratchpad);

        Ok(scratchpad)
    }

    pub fn disable_frame_to_line_bypass<P: InterfacePort + ?Sized>(&self, port: &mut P) -> DeviceResult<()> {
        self.write_register(port, Register::FrameToLine, FRAME_TO_LINE_BYPASS_DISABLE)
    }

    pub fn enable_traffic_generator<P: InterfacePort + ?Sized>(&self, port: &mut P) -> DeviceResult<()> {
        self.write_register(port, Register::TrafficGenerator, TRAFFIC_GENERATOR_ENABLE)
    }

    /// Fire a one-shot Memento event.
    pub fn memento_event<P: InterfacePort + ?Sized>(&self, port: &mut P) -> DeviceResult<()> {
        self.write_register(port, Register::MementoEvent, MEMENTO_EVENT_TRIGGER)
    }

    /// Load the 8-bit pixel LUT and take it out of bypass.
    pub fn program_lut<P: InterfacePort + ?Sized>(&self, port: &mut P) -> DeviceResult<()> {
        self.write_register(port, Register::LutControl, LUT_PROGRAMMING_ENABLE)?;

        // Coefficient port auto-advances; select it once for all 256 writes.
        self.select(port, Register::LutCoefficient)?;
        for coefficient in self.cfg.lut.write_order() {
            self.write_data(port, RegisterValue::Int(coefficient as u32))?;
        }
        info!("Pixel LUT loaded: {} coefficients", LUT_SIZE);

        self.write_register(port, Register::LutControl, BYPASS_DISABLE)
    }

    /// Set the threshold level and take the threshold stage out of bypass.
    pub fn program_threshold<P: InterfacePort + ?Sized>(&self, port: &mut P) -> DeviceResult<()> {
        self.write_register(port, Register::PixelThreshold, self.cfg.threshold as u32)?;
        self.write_data(port, RegisterValue::Int(BYPASS_DISABLE))?;
        info!("Pixel threshold set to 0x{:02X}", self.cfg.threshold);

        Ok(())
    }

    /// Run the full configuration pass. The first transport error ends the
    /// pass; a failed pass has to be rerun from the start.
    pub fn configure<P: InterfacePort + ?Sized>(&self, port: &mut P) -> DeviceResult<ConfigureReport> {
        let scratchpad = self.scratchpad_test(port)?;
        self.disable_frame_to_line_bypass(port)?;
        self.enable_traffic_generator(port)?;
        self.memento_event(port)?;
        self.program_lut(port)?;
        self.program_threshold(port)?;

        info!("CustomLogic configured");
        Ok(ConfigureReport { scratchpad })
    }

    /// Configure each port in turn. Stops at the first port that fails and
    /// returns its error as is.
    pub fn configure_all<P, I>(&self, ports: I) -> DeviceResult<Vec<ConfigureReport>>
    where
        P: InterfacePort,
        I: IntoIterator<Item = P>,
    {
        let mut reports = Vec::new();

        for (index, mut port) in ports.into_iter().enumerate() {
            info!("Configuring grabber {}", index);
            let report = self.configure(&mut port).map_err(|e| {
                error!("Grabber {} configuration failed: {}", index, e);
                e
            })?;
            reports.push(report);
        }

        Ok(reports)
    }
}

impl Default for RegisterProgrammer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::cfg::Lut;
    use crate::device::device_error::TransportError;
    use crate::device::simulated_grabber::{PortCall, SimulatedGrabber};

    fn address(value: u32) -> PortCall {
        PortCall::Set(String::from(CONTROL_ADDRESS), RegisterValue::Int(value))
    }

    fn data(value: u32) -> PortCall {
        PortCall::Set(String::from(CONTROL_DATA), RegisterValue::Int(value))
    }

    fn expected_calls() -> Vec<PortCall> {
        let mut calls = vec![
            address(0x0000),
            PortCall::Set(String::from(CONTROL_DATA), RegisterValue::from("1234567890")),
            address(0x0000),
            PortCall::Get(String::from(CONTROL_DATA)),
            address(0x0001),
            data(0x0000_0002),
            address(0x0002),
            data(0x0000_0001),
            address(0x0003),
            data(0x7E57_7E57),
            address(0x0004),
            data(0x0000_0001),
            address(0x0005),
        ];
        calls.extend((0..=255u32).rev().map(data));
        calls.extend([
            address(0x0004),
            data(0x0000_0200),
            address(0x0006),
            data(0x0000_007F),
            data(0x0000_0200),
        ]);
        calls
    }

    #[test]
    fn test_configure_call_log() {
        let mut grabber = SimulatedGrabber::new("sim0");
        let report = RegisterProgrammer::new().configure(&mut grabber).unwrap();

        assert_eq!(report.scratchpad, 1234567890);
        assert_eq!(grabber.calls(), expected_calls().as_slice());

        let sets = grabber
            .calls()
            .iter()
            .filter(|c| matches!(c, PortCall::Set(..)))
            .count();
        let selects = grabber
            .calls()
            .iter()
            .filter(|c| matches!(c, PortCall::Set(name, _) if name == CONTROL_ADDRESS))
            .count();
        let gets = grabber.calls().len() - sets;
        assert_eq!(sets, 273);
        assert_eq!(gets, 1);
        // One select per step, the read-back reselects 0x0000.
        assert_eq!(selects, 9);
        assert_eq!(sets - selects, 264);
    }

    #[test]
    fn test_configure_device_state() {
        let mut grabber = SimulatedGrabber::new("sim0");
        RegisterProgrammer::new().configure(&mut grabber).unwrap();

        let coefficients: Vec<u8> = (0..=255u8).rev().collect();
        assert_eq!(grabber.lut_coefficients(), coefficients.as_slice());
        assert!(grabber.lut_bypass_disabled());
        assert_eq!(grabber.threshold(), 0x7F);
        assert!(grabber.threshold_bypass_disabled());
        assert_eq!(grabber.memento_events(), 1);
        assert_eq!(grabber.register(Register::FrameToLine.address()), Some(2));
        assert_eq!(grabber.register(Register::TrafficGenerator.address()), Some(1));
    }

    #[test]
    fn test_lut_has_no_reselect() {
        let mut grabber = SimulatedGrabber::new("sim0");
        RegisterProgrammer::new().program_lut(&mut grabber).unwrap();

        let calls = grabber.calls();
        assert_eq!(calls[2], address(0x0005));
        assert!(calls[3..259]
            .iter()
            .all(|c| matches!(c, PortCall::Set(name, _) if name == CONTROL_DATA)));
        assert_eq!(calls[259], address(0x0004));
    }

    #[test]
    fn test_threshold_pair() {
        let mut grabber = SimulatedGrabber::new("sim0");
        let programmer = RegisterProgrammer::with_cfg(Cfg::new().with_threshold(0x20));
        programmer.program_threshold(&mut grabber).unwrap();

        assert_eq!(
            grabber.calls(),
            &[address(0x0006), data(0x20), data(0x200)]
        );
        assert_eq!(grabber.threshold(), 0x20);
    }

    #[test]
    fn test_custom_lut_write_order() {
        let mut grabber = SimulatedGrabber::new("sim0");
        let programmer = RegisterProgrammer::with_cfg(Cfg::new().with_lut(Lut::inverted()));
        programmer.program_lut(&mut grabber).unwrap();

        let coefficients: Vec<u8> = (0..=255u8).collect();
        assert_eq!(grabber.lut_coefficients(), coefficients.as_slice());
    }

    #[test]
    fn test_failure_stops_sequence() {
        let expected = expected_calls();

        for k in [0, 1, 3, 4, 12, 100, 270, 273] {
            let mut grabber = SimulatedGrabber::new("sim0").fail_after(k);
            let result = RegisterProgrammer::new().configure(&mut grabber);

            assert_eq!(result, Err(TransportError::Disconnected));
            assert_eq!(grabber.calls(), &expected[..k]);
        }
    }

    #[test]
    fn test_configure_all() {
        let mut grabbers = vec![SimulatedGrabber::new("sim0"), SimulatedGrabber::new("sim1")];
        let reports = RegisterProgrammer::new()
            .configure_all(grabbers.iter_mut())
            .unwrap();

        assert_eq!(reports.len(), 2);
        for grabber in &grabbers {
            assert_eq!(grabber.calls(), expected_calls().as_slice());
        }
    }

    #[test]
    fn test_configure_all_stops_at_failure() {
        let mut grabbers = vec![
            SimulatedGrabber::new("sim0"),
            SimulatedGrabber::new("sim1").fail_after(5),
            SimulatedGrabber::new("sim2"),
        ];
        let result = RegisterProgrammer::new().configure_all(grabbers.iter_mut());

        assert_eq!(result, Err(TransportError::Disconnected));
        assert_eq!(grabbers[0].calls().len(), 274);
        assert_eq!(grabbers[1].calls().len(), 5);
        assert!(grabbers[2].calls().is_empty());
    }

    #[test]
    fn test_configure_all_empty() {
        let grabbers: Vec<SimulatedGrabber> = Vec::new();
        let reports = RegisterProgrammer::new().configure_all(grabbers).unwrap();
        assert!(reports.is_empty());
    }
}
