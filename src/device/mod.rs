pub mod cfg;
pub mod device_error;
pub mod interface_port;
pub mod register_programmer;
pub mod registers;
pub mod simulated_grabber;
