use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub const FULL_NAME_MAX_LEN: usize = 100;
pub const ROLL_NUMBER_MAX_LEN: usize = 20;
pub const CLASS_BATCH_MAX_LEN: usize = 50;

/// 非空（去除首尾空白后）且不超过最大字符数
fn validate_text_field(value: &str, max_len: usize, name: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{name} must be at most {max_len} characters"));
    }
    Ok(())
}

/// 学生资料校验
pub fn validate_student_fields(
    full_name: &str,
    email: &str,
    roll_number: &str,
    class_batch: &str,
) -> Result<(), String> {
    validate_text_field(full_name, FULL_NAME_MAX_LEN, "Full name")?;
    validate_email(email.trim()).map_err(str::to_string)?;
    validate_text_field(roll_number, ROLL_NUMBER_MAX_LEN, "Roll number")?;
    validate_text_field(class_batch, CLASS_BATCH_MAX_LEN, "Class batch")?;
    Ok(())
}

/// 分数校验：有限值，0 到 100 之间，最多两位小数
pub fn validate_marks(marks: f64) -> Result<(), &'static str> {
    if !marks.is_finite() {
        return Err("Marks must be a number");
    }
    if !(0.0..=100.0).contains(&marks) {
        return Err("Marks must be between 0 and 100");
    }
    let scaled = marks * 100.0;
    if (scaled - scaled.round()).abs() > 1e-6 {
        return Err("Marks can have at most 2 decimal places");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("asha@school.edu").is_ok());
        assert!(validate_email("asha@school").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_marks_bounds() {
        assert!(validate_marks(0.0).is_ok());
        assert!(validate_marks(100.0).is_ok());
        assert!(validate_marks(85.55).is_ok());
        assert!(validate_marks(-0.01).is_err());
        assert!(validate_marks(100.01).is_err());
        assert!(validate_marks(150.0).is_err());
    }

    #[test]
    fn test_marks_precision_and_nan() {
        assert_eq!(
            validate_marks(85.555),
            Err("Marks can have at most 2 decimal places")
        );
        assert!(validate_marks(f64::NAN).is_err());
        assert!(validate_marks(f64::INFINITY).is_err());
    }

    #[test]
    fn test_student_fields() {
        assert!(validate_student_fields("Asha Rao", "asha@school.edu", "R-01", "10A").is_ok());
        assert!(validate_student_fields("   ", "asha@school.edu", "R-01", "10A").is_err());
        assert!(validate_student_fields("Asha", "asha", "R-01", "10A").is_err());

        let long_roll = "R".repeat(ROLL_NUMBER_MAX_LEN + 1);
        let err = validate_student_fields("Asha", "asha@school.edu", &long_roll, "10A").unwrap_err();
        assert!(err.contains("Roll number"));
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
