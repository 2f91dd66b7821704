use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "progress.ts")]
pub enum ExamType {
    Quarterly, // 季考
    Midterm,   // 期中
    Model,     // 模拟考
    EndTerm,   // 期末
}

impl ExamType {
    pub const QUARTERLY: &'static str = "quarterly";
    pub const MIDTERM: &'static str = "midterm";
    pub const MODEL: &'static str = "model";
    pub const END_TERM: &'static str = "end_term";

    pub fn all() -> &'static [ExamType] {
        &[
            ExamType::Quarterly,
            ExamType::Midterm,
            ExamType::Model,
            ExamType::EndTerm,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExamType::Quarterly => Self::QUARTERLY,
            ExamType::Midterm => Self::MIDTERM,
            ExamType::Model => Self::MODEL,
            ExamType::EndTerm => Self::END_TERM,
        }
    }

    /// 展示名称
    pub fn label(&self) -> &'static str {
        match self {
            ExamType::Quarterly => "Quarterly",
            ExamType::Midterm => "Midterm",
            ExamType::Model => "Model",
            ExamType::EndTerm => "End-Term",
        }
    }
}

impl<'de> Deserialize<'de> for ExamType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid exam type: '{s}'. Supported: quarterly, midterm, model, end_term"
            ))
        })
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::QUARTERLY => Ok(ExamType::Quarterly),
            Self::MIDTERM => Ok(ExamType::Midterm),
            Self::MODEL => Ok(ExamType::Model),
            Self::END_TERM => Ok(ExamType::EndTerm),
            _ => Err(format!("Invalid exam type: {s}")),
        }
    }
}

// 科目
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "progress.ts")]
pub enum Subject {
    Mathematics,
    Science,
    English,
}

impl Subject {
    pub const MATHEMATICS: &'static str = "mathematics";
    pub const SCIENCE: &'static str = "science";
    pub const ENGLISH: &'static str = "english";

    pub fn all() -> &'static [Subject] {
        &[Subject::Mathematics, Subject::Science, Subject::English]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Mathematics => Self::MATHEMATICS,
            Subject::Science => Self::SCIENCE,
            Subject::English => Self::ENGLISH,
        }
    }

    /// 展示名称
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Mathematics => "Mathematics",
            Subject::Science => "Science",
            Subject::English => "English",
        }
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid subject: '{s}'. Supported: mathematics, science, english"
            ))
        })
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::MATHEMATICS => Ok(Subject::Mathematics),
            Self::SCIENCE => Ok(Subject::Science),
            Self::ENGLISH => Ok(Subject::English),
            _ => Err(format!("Invalid subject: {s}")),
        }
    }
}

// 成绩单：某学生某次考试某科目的分数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "progress.ts")]
pub struct ProgressSheet {
    pub id: i64,
    pub student_id: i64,
    pub exam_type: ExamType,
    pub subject: Subject,
    pub marks: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_type_round_trips_through_str() {
        for exam in ExamType::all() {
            assert_eq!(exam.as_str().parse::<ExamType>(), Ok(*exam));
        }
        assert!("final".parse::<ExamType>().is_err());
    }

    #[test]
    fn test_exam_type_serde() {
        let json = serde_json::to_string(&ExamType::EndTerm).unwrap();
        assert_eq!(json, "\"end_term\"");
        let exam: ExamType = serde_json::from_str("\"midterm\"").unwrap();
        assert_eq!(exam, ExamType::Midterm);

        let err = serde_json::from_str::<ExamType>("\"weekly\"").unwrap_err();
        assert!(err.to_string().contains("Invalid exam type"));
    }

    #[test]
    fn test_subject_rejects_unknown() {
        assert!(serde_json::from_str::<Subject>("\"history\"").is_err());
        assert_eq!(
            serde_json::from_str::<Subject>("\"english\"").unwrap(),
            Subject::English
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(ExamType::EndTerm.label(), "End-Term");
        assert_eq!(Subject::Mathematics.label(), "Mathematics");
    }
}
