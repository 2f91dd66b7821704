use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

enum PageParam {
    Number(i64),
    // 纯数字但超出 i64 范围
    Overflow,
    Invalid,
}

fn parse_page(raw: &str) -> PageParam {
    if let Ok(p) = raw.parse::<i64>() {
        return PageParam::Number(p);
    }
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        PageParam::Overflow
    } else {
        PageParam::Invalid
    }
}

/// 对已排序的结果集做内存分页（页码从 1 开始）
///
/// 页码解析是宽松的：
/// - 缺失或无法解析为整数 → 第 1 页
/// - 超出范围（小于 1 或大于总页数，包括超出 i64 的纯数字）→ 最后一页
/// - 空结果集仍然有 1 页（空页）
pub fn paginate<T: TS>(items: Vec<T>, page: Option<&str>, page_size: usize) -> PaginatedResponse<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);

    let page = match page.map(str::trim).map(parse_page) {
        None | Some(PageParam::Invalid) => 1,
        Some(PageParam::Overflow) => total_pages,
        Some(PageParam::Number(p)) if p < 1 || p as usize > total_pages => total_pages,
        Some(PageParam::Number(p)) => p as usize,
    };

    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    PaginatedResponse {
        items,
        pagination: PaginationInfo {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: i32) -> Vec<i32> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page_by_default() {
        let page = paginate(numbers(25), None, 10);
        assert_eq!(page.items, numbers(10));
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate(numbers(25), Some("3"), 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.pagination.page, 3);
    }

    #[test]
    fn test_non_numeric_page_falls_back_to_first() {
        let page = paginate(numbers(25), Some("abc"), 10);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.items.first(), Some(&1));
    }

    #[test]
    fn test_out_of_range_page_clamps_to_last() {
        let page = paginate(numbers(25), Some("99"), 10);
        assert_eq!(page.pagination.page, 3);

        let page = paginate(numbers(25), Some("0"), 10);
        assert_eq!(page.pagination.page, 3);

        let page = paginate(numbers(25), Some("99999999999999999999"), 10);
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let page = paginate(Vec::<i32>::new(), Some("2"), 10);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total_pages, 1);
    }
}
