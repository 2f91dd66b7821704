use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{VerifyOtpRequest, VerifyOtpResponse},
};
use crate::utils::otp::OtpPolicy;

use super::AuthService;

pub async fn handle_verify_otp(
    service: &AuthService,
    account_id: i64,
    verify_request: VerifyOtpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let profile = match storage.get_profile_by_account_id(account_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AccountNotFound,
                "Account not found.",
            )));
        }
        Err(e) => {
            error!("Failed to load profile for account {}: {}", account_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Verification failed, please try again later",
                )),
            );
        }
    };

    let success = || -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(
            ApiResponse::success(
                VerifyOtpResponse {
                    account_id,
                    is_verified: true,
                },
                "Account verified successfully. You can now log in.",
            )
            .redirect("/api/v1/auth/login"),
        ))
    };

    // 已验证的账号重复提交直接成功
    if profile.is_verified {
        return success();
    }

    let policy = match OtpPolicy::from_config(&service.get_config().otp) {
        Ok(policy) => policy,
        Err(e) => {
            error!("Invalid OTP configuration: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Verification failed, please try again later",
                )),
            );
        }
    };

    if !policy
        .verifier
        .verify(verify_request.code.as_deref(), profile.otp.as_deref())
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::VerificationFailed,
            "Invalid verification code.",
        )));
    }

    match storage.mark_profile_verified(account_id).await {
        Ok(_) => {
            info!("Account {} verified", account_id);
            success()
        }
        Err(e) => {
            error!("Failed to mark account {} verified: {}", account_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Verification failed, please try again later",
                )),
            )
        }
    }
}
