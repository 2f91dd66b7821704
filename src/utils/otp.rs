//! 一次性验证码
//!
//! 签发与校验拆成两个能力，分别由 `otp.issuer` / `otp.verifier` 配置选择：
//!
//! | issuer   | 行为                         |
//! |----------|------------------------------|
//! | `random` | 生成 `code_length` 位数字码  |
//! | `fixed`  | 始终返回 `fixed_code`        |
//!
//! | verifier     | 行为                       |
//! |--------------|----------------------------|
//! | `accept_all` | 无条件通过                 |
//! | `match`      | 提交的码必须与保存的码一致 |

use rand::Rng;

use crate::config::OtpConfig;
use crate::errors::{AppError, Result};

/// 验证码签发
pub trait CodeIssuer: Send + Sync {
    fn issue(&self) -> String;
}

/// 验证码校验
pub trait CodeVerifier: Send + Sync {
    fn verify(&self, submitted: Option<&str>, stored: Option<&str>) -> bool;
}

pub struct RandomCodeIssuer {
    length: usize,
}

impl RandomCodeIssuer {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }
}

impl CodeIssuer for RandomCodeIssuer {
    fn issue(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }
}

pub struct FixedCodeIssuer {
    code: String,
}

impl FixedCodeIssuer {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl CodeIssuer for FixedCodeIssuer {
    fn issue(&self) -> String {
        self.code.clone()
    }
}

pub struct AcceptAllVerifier;

impl CodeVerifier for AcceptAllVerifier {
    fn verify(&self, _submitted: Option<&str>, _stored: Option<&str>) -> bool {
        true
    }
}

pub struct MatchingCodeVerifier;

impl CodeVerifier for MatchingCodeVerifier {
    fn verify(&self, submitted: Option<&str>, stored: Option<&str>) -> bool {
        match (submitted.map(str::trim), stored) {
            (Some(submitted), Some(stored)) => !stored.is_empty() && submitted == stored,
            _ => false,
        }
    }
}

/// 按配置组装的签发 / 校验组合
pub struct OtpPolicy {
    pub issuer: Box<dyn CodeIssuer>,
    pub verifier: Box<dyn CodeVerifier>,
}

impl OtpPolicy {
    pub fn from_config(config: &OtpConfig) -> Result<Self> {
        let issuer: Box<dyn CodeIssuer> = match config.issuer.as_str() {
            "random" => Box::new(RandomCodeIssuer::new(config.code_length)),
            "fixed" => Box::new(FixedCodeIssuer::new(config.fixed_code.clone())),
            other => {
                return Err(AppError::validation(format!(
                    "Unknown OTP issuer '{other}', expected 'random' or 'fixed'"
                )));
            }
        };

        let verifier: Box<dyn CodeVerifier> = match config.verifier.as_str() {
            "accept_all" => Box::new(AcceptAllVerifier),
            "match" => Box::new(MatchingCodeVerifier),
            other => {
                return Err(AppError::validation(format!(
                    "Unknown OTP verifier '{other}', expected 'accept_all' or 'match'"
                )));
            }
        };

        Ok(Self { issuer, verifier })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(issuer: &str, verifier: &str) -> OtpConfig {
        OtpConfig {
            issuer: issuer.to_string(),
            verifier: verifier.to_string(),
            code_length: 6,
            fixed_code: "424242".to_string(),
        }
    }

    #[test]
    fn test_random_code_shape() {
        let code = RandomCodeIssuer::new(6).issue();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_accept_all_ignores_input() {
        assert!(AcceptAllVerifier.verify(None, None));
        assert!(AcceptAllVerifier.verify(Some("000000"), Some("123456")));
    }

    #[test]
    fn test_matching_verifier() {
        let v = MatchingCodeVerifier;
        assert!(v.verify(Some("123456"), Some("123456")));
        assert!(v.verify(Some(" 123456 "), Some("123456")));
        assert!(!v.verify(Some("123457"), Some("123456")));
        assert!(!v.verify(None, Some("123456")));
        assert!(!v.verify(Some(""), Some("")));
        assert!(!v.verify(Some("123456"), None));
    }

    #[test]
    fn test_policy_from_config() {
        let policy = OtpPolicy::from_config(&config("fixed", "match")).unwrap();
        let code = policy.issuer.issue();
        assert_eq!(code, "424242");
        assert!(policy.verifier.verify(Some("424242"), Some(&code)));

        assert!(OtpPolicy::from_config(&config("sms", "match")).is_err());
        assert!(OtpPolicy::from_config(&config("random", "never")).is_err());
    }
}
