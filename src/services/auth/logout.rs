use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::account_cache_key;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::{Claims, JwtUtils};

use super::AuthService;

/// 处理登出
///
/// access token 与 refresh token 写入存储中的注销记录（保留到各自过期），
/// 删除账号缓存并清除 refresh_token cookie。
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let mut revoked: Vec<Claims> = Vec::with_capacity(2);

    if let Some(token) = RequireJWT::extract_bearer_token(request)
        && let Ok(claims) = JwtUtils::verify_access_token(&token)
    {
        cache.remove(&account_cache_key(&token)).await;
        revoked.push(claims);
    }

    if let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request)
        && let Ok(claims) = JwtUtils::verify_refresh_token(&refresh_token)
    {
        revoked.push(claims);
    }

    for claims in &revoked {
        let account_id = claims.account_id().unwrap_or_default();
        if let Err(e) = storage
            .revoke_token(&claims.jti, account_id, claims.exp as i64)
            .await
        {
            error!("Failed to revoke token for account {}: {}", account_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Logout failed, please try again later",
                )),
            );
        }
    }

    if let Some(account_id) = RequireJWT::extract_account_id(request) {
        info!("Account {} logged out", account_id);
    }

    // 创建空的 refresh_token cookie（max_age=0 会让浏览器删除该 cookie）
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok().cookie(empty_cookie).json(
        ApiResponse::<()>::success_empty("You have been logged out.").redirect("/api/v1/auth/login"),
    ))
}
