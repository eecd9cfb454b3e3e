pub mod user_role_dto;

pub use user_role_dto::{CreateUserRoleDto, UserRoleQuery, UserRoleResponseDto};
