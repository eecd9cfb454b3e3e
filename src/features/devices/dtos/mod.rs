mod device_dto;

pub use device_dto::{
    DeviceMessagePayloadDto, DeviceMessageResponseDto, DeviceResponseDto, RegisterDeviceDto,
};
