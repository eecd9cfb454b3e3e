mod proximity_dto;

pub use proximity_dto::{NearFacilityDto, NearFacilityQuery, NearReportDto, NearReportQuery};
