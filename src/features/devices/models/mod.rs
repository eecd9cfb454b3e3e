mod device;
mod device_message;

pub use device::Device;
pub use device_message::{DeviceMessage, DeviceMessageType};
