use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{SignupRequest, SignupResponse},
    users::entities::NewAccount,
};
use crate::storage::Storage;
use crate::utils::otp::OtpPolicy;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

use super::AuthService;

pub async fn handle_signup(
    service: &AuthService,
    signup_request: SignupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let email = signup_request.email.trim().to_string();

    // 1. 两次输入的密码必须一致
    if signup_request.password != signup_request.confirm_password {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordMismatch,
            "Passwords do not match.",
        )));
    }

    // 2. 验证邮箱
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 3. 检查邮箱是否已注册
    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    // 4. 密码策略
    let policy = validate_password(&signup_request.password);
    if !policy.is_valid {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            policy.error_message(),
        )));
    }

    let password_hash = match hash_password(&signup_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed, please try again later",
                )),
            );
        }
    };

    // 5. 签发验证码
    let otp = match OtpPolicy::from_config(&service.get_config().otp) {
        Ok(policy) => policy.issuer.issue(),
        Err(e) => {
            error!("Invalid OTP configuration: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed, please try again later",
                )),
            );
        }
    };

    // 6. 创建账号与资料
    let new_account = NewAccount {
        email,
        password_hash,
        otp: Some(otp.clone()),
    };

    match storage.create_account(new_account).await {
        Ok((account, _profile)) => {
            info!("Account {} registered, pending verification", account.id);
            debug!("Verification code for account {}: {}", account.id, otp);

            let response = SignupResponse {
                account_id: account.id,
                email: account.email,
            };
            Ok(HttpResponse::Created().json(
                ApiResponse::success(
                    response,
                    "Signup successful. Please verify your account with the code sent to you.",
                )
                .redirect(format!("/api/v1/auth/verify-otp/{}", account.id)),
            ))
        }
        // 并发注册同一邮箱时由唯一索引拒绝
        Err(e) if e.is_conflict() => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::UserEmailAlreadyExists, "Email already exists"),
        )),
        Err(e) => {
            error!("Failed to create account: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed, please try again later",
                )),
            )
        }
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_account_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => {
            error!("Failed to look up account by email: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed, please try again later",
                )),
            )
        }
    }
}
