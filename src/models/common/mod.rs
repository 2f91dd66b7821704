pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, PaginationInfo, paginate};
pub use response::ApiResponse;
