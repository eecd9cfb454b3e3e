mod user_report_dto;

pub use user_report_dto::{
    CompactUserReportDto, UserReportCreatedDto, UserReportPayloadDto, UserReportQuery,
    UserReportResponseDto,
};
