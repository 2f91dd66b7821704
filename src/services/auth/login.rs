use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

// 凭据错误与未验证使用同一提示，不暴露账号状态
const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password.";

fn login_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        LOGIN_FAILED_MESSAGE,
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 根据邮箱获取账号
    let account = match storage
        .get_account_by_email(login_request.email.trim())
        .await
    {
        Ok(Some(account)) => account,
        Ok(None) => return Ok(login_failed()),
        Err(e) => {
            error!("Failed to look up account: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, please try again later",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &account.password_hash) {
        return Ok(login_failed());
    }

    // 3. 仅允许已验证的账号登录
    match storage.get_profile_by_account_id(account.id).await {
        Ok(Some(profile)) if profile.is_verified => {}
        Ok(_) => {
            warn!("Login attempt for unverified account {}", account.id);
            return Ok(login_failed());
        }
        Err(e) => {
            error!("Failed to load profile for account {}: {}", account.id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, please try again later",
                )),
            );
        }
    }

    // 4. 更新最后登录时间
    if let Err(e) = storage.update_last_login(account.id).await {
        warn!("Failed to update last login for account {}: {}", account.id, e);
    }

    // 5. 生成令牌对
    match account.generate_token_pair() {
        Ok(token_pair) => {
            info!("Account {} logged in successfully", account.id);

            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                account,
                created_at: chrono::Utc::now(),
            };

            // 6. 创建 refresh token cookie
            let refresh_cookie =
                jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful").redirect("/api/v1/dashboard")))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
