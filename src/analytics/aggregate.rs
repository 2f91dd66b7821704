use std::collections::HashMap;

use crate::models::progress::entities::{ExamType, ProgressSheet};
use crate::models::students::entities::Student;
use crate::models::students::responses::ExamGroup;

/// 算术平均值，空集合为 0
pub fn average<I>(marks: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = marks
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), m| (sum + m, count + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 计算每个学生的平均分
///
/// 指定 `exam_type` 时只统计该考试类型的成绩单。没有任何（符合条件的）成绩单的学生
/// 不会出现在结果中。
pub fn student_averages(
    sheets: &[ProgressSheet],
    exam_type: Option<ExamType>,
) -> HashMap<i64, f64> {
    let mut totals: HashMap<i64, (f64, usize)> = HashMap::new();

    for sheet in sheets
        .iter()
        .filter(|s| exam_type.is_none_or(|exam| s.exam_type == exam))
    {
        let entry = totals.entry(sheet.student_id).or_insert((0.0, 0));
        entry.0 += sheet.marks;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(student_id, (sum, count))| (student_id, sum / count as f64))
        .collect()
}

/// 总平均分最高的学生
///
/// 没有成绩单的学生不参与比较；平均分相同时取遍历顺序中先出现的学生。
pub fn top_performer<'a>(
    students: &'a [Student],
    sheets: &[ProgressSheet],
) -> Option<(&'a Student, f64)> {
    let averages = student_averages(sheets, None);

    let mut best: Option<(&Student, f64)> = None;
    for student in students {
        let Some(&avg) = averages.get(&student.id) else {
            continue;
        };
        match best {
            Some((_, best_avg)) if avg <= best_avg => {}
            _ => best = Some((student, avg)),
        }
    }
    best
}

/// 学生详情页汇总
#[derive(Debug, Clone)]
pub struct StudentSummary {
    pub exam_data: Vec<ExamGroup>,
    pub total_marks: f64,
    pub average_score: f64,
}

/// 按考试类型分组并计算总分、平均分
///
/// 分组顺序为考试类型首次出现的顺序，组内保持传入顺序。
pub fn summarize_student(sheets: Vec<ProgressSheet>) -> StudentSummary {
    let total_marks: f64 = sheets.iter().map(|s| s.marks).sum();
    let average_score = round2(average(sheets.iter().map(|s| s.marks)));

    let mut exam_data: Vec<ExamGroup> = Vec::new();
    for sheet in sheets {
        match exam_data.iter_mut().find(|g| g.exam_type == sheet.exam_type) {
            Some(group) => group.sheets.push(sheet),
            None => exam_data.push(ExamGroup {
                exam_type: sheet.exam_type,
                label: sheet.exam_type.label().to_string(),
                sheets: vec![sheet],
            }),
        }
    }

    StudentSummary {
        exam_data,
        total_marks,
        average_score,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::progress::entities::Subject;
    use chrono::{NaiveDate, Utc};

    pub(crate) fn student(id: i64, name: &str, roll: &str, class_batch: &str) -> Student {
        Student {
            id,
            full_name: name.to_string(),
            email: format!("{roll}@school.test"),
            roll_number: roll.to_string(),
            class_batch: class_batch.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn sheet(
        id: i64,
        student_id: i64,
        exam_type: ExamType,
        subject: Subject,
        marks: f64,
    ) -> ProgressSheet {
        ProgressSheet {
            id,
            student_id,
            exam_type,
            subject,
            marks,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(average(Vec::new()), 0.0);
    }

    #[test]
    fn test_average_ignores_order() {
        assert_eq!(average([80.0, 60.0, 91.5]), average([91.5, 80.0, 60.0]));
        assert_eq!(average([80.0, 60.0]), 70.0);
    }

    #[test]
    fn test_student_averages_by_exam_type() {
        let sheets = vec![
            sheet(1, 1, ExamType::Quarterly, Subject::Mathematics, 80.0),
            sheet(2, 1, ExamType::Quarterly, Subject::Science, 60.0),
            sheet(3, 1, ExamType::Midterm, Subject::Science, 100.0),
            sheet(4, 2, ExamType::Midterm, Subject::English, 40.0),
        ];

        let quarterly = student_averages(&sheets, Some(ExamType::Quarterly));
        assert_eq!(quarterly.get(&1), Some(&70.0));
        assert!(!quarterly.contains_key(&2));

        let overall = student_averages(&sheets, None);
        assert_eq!(overall.get(&1), Some(&80.0));
        assert_eq!(overall.get(&2), Some(&40.0));
    }

    #[test]
    fn test_top_performer_skips_students_without_sheets() {
        let students = vec![
            student(1, "Asha", "R1", "10A"),
            student(2, "Ben", "R2", "10A"),
        ];
        let sheets = vec![sheet(1, 2, ExamType::Model, Subject::English, 0.0)];

        let (top, avg) = top_performer(&students, &sheets).expect("Ben has a sheet");
        assert_eq!(top.id, 2);
        assert_eq!(avg, 0.0);
    }

    #[test]
    fn test_top_performer_none_without_sheets() {
        let students = vec![student(1, "Asha", "R1", "10A")];
        assert!(top_performer(&students, &[]).is_none());
        assert!(top_performer(&[], &[]).is_none());
    }

    #[test]
    fn test_top_performer_picks_highest_average() {
        let students = vec![
            student(1, "Asha", "R1", "10A"),
            student(2, "Ben", "R2", "10B"),
            student(3, "Chen", "R3", "10B"),
        ];
        let sheets = vec![
            sheet(1, 1, ExamType::Quarterly, Subject::Mathematics, 70.0),
            sheet(2, 2, ExamType::Quarterly, Subject::Mathematics, 95.0),
            sheet(3, 2, ExamType::Midterm, Subject::Mathematics, 85.0),
            sheet(4, 3, ExamType::Quarterly, Subject::Mathematics, 89.0),
        ];

        let (top, avg) = top_performer(&students, &sheets).unwrap();
        assert_eq!(top.id, 2);
        assert_eq!(avg, 90.0);
    }

    #[test]
    fn test_top_performer_tie_is_one_of_the_tied() {
        let students = vec![
            student(1, "Asha", "R1", "10A"),
            student(2, "Ben", "R2", "10B"),
        ];
        let sheets = vec![
            sheet(1, 1, ExamType::Quarterly, Subject::Mathematics, 75.0),
            sheet(2, 2, ExamType::Quarterly, Subject::Mathematics, 75.0),
        ];

        let (top, _) = top_performer(&students, &sheets).unwrap();
        assert!([1, 2].contains(&top.id));
    }

    #[test]
    fn test_summarize_student() {
        let sheets = vec![
            sheet(1, 1, ExamType::Midterm, Subject::Mathematics, 80.0),
            sheet(2, 1, ExamType::Quarterly, Subject::Science, 60.0),
            sheet(3, 1, ExamType::Midterm, Subject::English, 55.5),
        ];

        let summary = summarize_student(sheets);
        assert_eq!(summary.total_marks, 195.5);
        assert_eq!(summary.average_score, 65.17);

        let exams: Vec<ExamType> = summary.exam_data.iter().map(|g| g.exam_type).collect();
        assert_eq!(exams, vec![ExamType::Midterm, ExamType::Quarterly]);
        let midterm_ids: Vec<i64> = summary.exam_data[0].sheets.iter().map(|s| s.id).collect();
        assert_eq!(midterm_ids, vec![1, 3]);
        assert_eq!(summary.exam_data[0].label, "Midterm");
    }

    #[test]
    fn test_summarize_without_sheets() {
        let summary = summarize_student(Vec::new());
        assert!(summary.exam_data.is_empty());
        assert_eq!(summary.total_marks, 0.0);
        assert_eq!(summary.average_score, 0.0);
    }
}
