use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::models::auth::responses::RefreshTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

fn refresh_rejected(message: &str) -> HttpResponse {
    // 清除无效的 refresh token cookie
    let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();

    HttpResponse::Unauthorized()
        .cookie(empty_cookie)
        .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let claims = match jwt::JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            return Ok(refresh_rejected("Login expired or invalid, please login again"));
        }
    };

    let storage = service.get_storage(request);

    // 登出时注销的 refresh token 不能再换取 access token
    match storage.is_token_revoked(&claims.jti).await {
        Ok(false) => {}
        Ok(true) => {
            return Ok(refresh_rejected("Login expired or invalid, please login again"));
        }
        Err(e) => {
            warn!("Failed to check refresh token revocation: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unable to refresh token, please try again later",
                )),
            );
        }
    }

    let Some(account_id) = claims.account_id() else {
        return Ok(refresh_rejected("Login expired or invalid, please login again"));
    };

    // 账号必须仍然存在且已验证
    match storage.get_profile_by_account_id(account_id).await {
        Ok(Some(profile)) if profile.is_verified => {}
        Ok(_) => return Ok(refresh_rejected("Account is not available, please login again")),
        Err(e) => {
            warn!("Failed to load profile for account {}: {}", account_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unable to refresh token, please try again later",
                )),
            );
        }
    }

    match jwt::JwtUtils::generate_access_token(account_id) {
        Ok(access_token) => {
            let response = RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            warn!("Failed to generate access token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unable to refresh token, please try again later",
                )),
            )
        }
    }
}
