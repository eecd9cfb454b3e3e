mod location_dto;

pub use location_dto::{LocationPayloadDto, LocationQuery, LocationResponseDto};
