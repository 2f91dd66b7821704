use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::aggregate::student_averages;
use crate::models::progress::entities::{ExamType, ProgressSheet};
use crate::models::students::entities::Student;
use crate::models::students::requests::StudentListParams;

/// 学生列表筛选条件（空字符串已归一为 `None`）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilters {
    pub search: Option<String>,
    pub class_batch: Option<String>,
    pub exam_type: Option<ExamType>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

impl ListingFilters {
    /// 从查询参数构建，未知考试类型返回错误信息
    pub fn from_params(params: &StudentListParams) -> Result<Self, String> {
        let exam_type = non_empty(&params.exam_type)
            .map(|raw| raw.parse::<ExamType>())
            .transpose()?;

        Ok(Self {
            search: non_empty(&params.search),
            class_batch: non_empty(&params.class_batch),
            exam_type,
        })
    }

    fn matches(&self, student: &Student) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !student.full_name.to_lowercase().contains(&needle)
                && !student.roll_number.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(class_batch) = &self.class_batch
            && &student.class_batch != class_batch
        {
            return false;
        }

        true
    }
}

/// 按筛选条件过滤学生
///
/// 指定考试类型时只保留在该考试中至少有一条成绩单的学生，并按该考试的平均分降序排列
/// （稳定排序）。未指定时保持传入顺序。
pub fn filter_and_rank(
    students: Vec<Student>,
    sheets: &[ProgressSheet],
    filters: &ListingFilters,
) -> Vec<Student> {
    let matched = students.into_iter().filter(|s| filters.matches(s));

    let Some(exam_type) = filters.exam_type else {
        return matched.collect();
    };

    let averages = student_averages(sheets, Some(exam_type));
    let mut ranked: Vec<(Student, f64)> = matched
        .filter_map(|s| averages.get(&s.id).map(|&avg| (s, avg)))
        .collect();

    ranked.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    ranked.into_iter().map(|(s, _)| s).collect()
}

/// 所有不同的班级名称（升序）
pub fn distinct_classes(students: &[Student]) -> Vec<String> {
    students
        .iter()
        .map(|s| s.class_batch.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate::tests::{sheet, student};
    use crate::models::progress::entities::Subject;

    fn ids(students: &[Student]) -> Vec<i64> {
        students.iter().map(|s| s.id).collect()
    }

    fn params(search: &str, class: &str, exam: &str) -> StudentListParams {
        StudentListParams {
            search: Some(search.to_string()),
            class_batch: Some(class.to_string()),
            exam_type: Some(exam.to_string()),
            page: None,
        }
    }

    #[test]
    fn test_empty_params_mean_no_filter() {
        let filters = ListingFilters::from_params(&params("", "", "")).unwrap();
        assert_eq!(filters, ListingFilters::default());
    }

    #[test]
    fn test_unknown_exam_type_is_rejected() {
        assert!(ListingFilters::from_params(&params("", "", "final")).is_err());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let students = vec![
            student(1, "Asha Rao", "R-01", "10A"),
            student(2, "Ben Ong", "R-02", "10B"),
            student(3, "Chen Li", "X-03", "11a"),
        ];
        let filters = ListingFilters::from_params(&params("ASHA", "", "")).unwrap();
        let result = filter_and_rank(students.clone(), &[], &filters);
        assert_eq!(ids(&result), vec![1]);

        // 搜索不匹配班级
        let filters = ListingFilters::from_params(&params("11a", "", "")).unwrap();
        assert!(filter_and_rank(students.clone(), &[], &filters).is_empty());

        let filters = ListingFilters::from_params(&params("r-0", "", "")).unwrap();
        let result = filter_and_rank(students, &[], &filters);
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn test_class_filter_is_exact() {
        let students = vec![
            student(1, "Asha", "R1", "10A"),
            student(2, "Ben", "R2", "10AB"),
        ];
        let filters = ListingFilters::from_params(&params("", "10A", "")).unwrap();
        assert_eq!(ids(&filter_and_rank(students, &[], &filters)), vec![1]);
    }

    #[test]
    fn test_without_exam_type_order_is_kept() {
        let students = vec![
            student(1, "A", "R1", "10A"),
            student(2, "B", "R2", "10A"),
            student(3, "C", "R3", "10A"),
        ];
        let sheets = vec![
            sheet(1, 1, ExamType::Quarterly, Subject::Mathematics, 10.0),
            sheet(2, 2, ExamType::Midterm, Subject::Science, 90.0),
        ];

        let result = filter_and_rank(students, &sheets, &ListingFilters::default());
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_exam_filter_excludes_students_without_that_exam() {
        let students = vec![
            student(1, "A", "R1", "10A"),
            student(2, "B", "R2", "10A"),
            student(3, "C", "R3", "10A"),
        ];
        let sheets = vec![
            sheet(1, 1, ExamType::Quarterly, Subject::Mathematics, 80.0),
            sheet(2, 1, ExamType::Quarterly, Subject::Science, 60.0),
            sheet(3, 2, ExamType::Quarterly, Subject::English, 90.0),
            sheet(4, 3, ExamType::Midterm, Subject::English, 99.0),
        ];

        let filters = ListingFilters::from_params(&params("", "", "quarterly")).unwrap();
        let result = filter_and_rank(students, &sheets, &filters);
        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn test_filters_combine_before_ranking() {
        let students = vec![
            student(1, "Asha", "R1", "10A"),
            student(2, "Ben", "R2", "10B"),
            student(3, "Asif", "R3", "10A"),
        ];
        let sheets = vec![
            sheet(1, 1, ExamType::Model, Subject::Science, 40.0),
            sheet(2, 2, ExamType::Model, Subject::Science, 100.0),
            sheet(3, 3, ExamType::Model, Subject::Science, 70.0),
        ];

        let filters = ListingFilters::from_params(&params("as", "10A", "model")).unwrap();
        let result = filter_and_rank(students, &sheets, &filters);
        assert_eq!(ids(&result), vec![3, 1]);
    }

    #[test]
    fn test_tied_averages_keep_every_student() {
        let students = vec![student(1, "A", "R1", "10A"), student(2, "B", "R2", "10A")];
        let sheets = vec![
            sheet(1, 1, ExamType::Midterm, Subject::English, 75.0),
            sheet(2, 2, ExamType::Midterm, Subject::English, 75.0),
        ];
        let filters = ListingFilters::from_params(&params("", "", "midterm")).unwrap();
        let mut result = ids(&filter_and_rank(students, &sheets, &filters));
        result.sort();
        assert_eq!(result, vec![1, 2]);
    }

    #[test]
    fn test_distinct_classes_sorted() {
        let students = vec![
            student(1, "A", "R1", "10B"),
            student(2, "B", "R2", "10A"),
            student(3, "C", "R3", "10B"),
        ];
        assert_eq!(distinct_classes(&students), vec!["10A", "10B"]);
        assert!(distinct_classes(&[]).is_empty());
    }
}
