pub mod export_dto;

pub use export_dto::{ActionType, ExportDownloadDto, ExportJobResponseDto, ExportRequestedDto};
