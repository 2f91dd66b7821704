//! 成绩统计与列表筛选
//!
//! 纯函数，只依赖传入的快照数据，不访问存储层，方便单独测试。

pub mod aggregate;
pub mod listing;

pub use aggregate::{
    StudentSummary, average, round2, student_averages, summarize_student, top_performer,
};
pub use listing::{ListingFilters, distinct_classes, filter_and_rank};
