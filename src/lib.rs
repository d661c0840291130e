pub mod device;

pub use device::cfg::{Cfg, Lut};
pub use device::device_error::{DeviceResult, TransportError};
pub use device::interface_port::{InterfacePort, RegisterValue};
pub use device::register_programmer::{ConfigureReport, RegisterProgrammer};
pub use device::simulated_grabber::{PortCall, SimulatedGrabber};

pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

/// Apply the default CustomLogic configuration to every grabber, one after
/// the other.
pub fn configure_all<P, I>(grabbers: I) -> DeviceResult<Vec<ConfigureReport>>
where
    P: InterfacePort,
    I: IntoIterator<Item = P>,
{
    RegisterProgrammer::new().configure_all(grabbers)
}
