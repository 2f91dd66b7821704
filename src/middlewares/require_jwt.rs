/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>` 中的 access token，确保只有已验证的账号才能访问受保护的路由。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireJWT;
 *
 * cfg.service(
 *     web::scope("/api/v1/students")
 *         .wrap(RequireJWT)
 *         .route("", web::get().to(list_students)),
 * );
 *
 * async fn list_students(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let account = RequireJWT::extract_account(&req);
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 提取 Bearer token，校验签名、过期时间与 token 类型
 * 2. 已注销（存储中有注销记录）的 token 直接拒绝
 * 3. 优先从缓存读取账号，未命中时查询存储并检查账号已验证
 * 4. 将 `Account` 放入请求扩展，供后续处理程序使用
 *
 * 任一步失败返回 401。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::middlewares::create_error_response;
use crate::models::ErrorCode;
use crate::models::users::entities::Account;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

/// 缓存中账号信息的键
pub fn account_cache_key(token: &str) -> String {
    format!("account:{token}")
}

#[derive(Clone)]
pub struct RequireJWT;

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

// 辅助函数：提取并验证 JWT access token
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Account, String> {
    let token = bearer_token(req.request())
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not configured".to_string())?
        .get_ref()
        .clone();

    // 注销记录在存储中，不受缓存容量影响
    if storage
        .is_token_revoked(&claims.jti)
        .await
        .map_err(|_| "Failed to check token revocation".to_string())?
    {
        return Err("Token has been revoked".to_string());
    }

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .ok_or_else(|| "Cache not configured".to_string())?
        .get_ref()
        .clone();

    // 从缓存中获取账号信息
    let cache_key = account_cache_key(token);
    match cache.get_json::<Account>(&cache_key).await {
        CacheResult::Found(account) => return Ok(account),
        _ => debug!("Account not found in cache for token"),
    }

    let account_id = claims
        .account_id()
        .ok_or_else(|| "Invalid account ID in JWT".to_string())?;

    let account = storage
        .get_account_by_id(account_id)
        .await
        .map_err(|_| "Failed to retrieve account from storage".to_string())?
        .ok_or_else(|| "Account not found".to_string())?;

    let verified = storage
        .get_profile_by_account_id(account_id)
        .await
        .map_err(|_| "Failed to retrieve profile from storage".to_string())?
        .is_some_and(|p| p.is_verified);
    if !verified {
        return Err("Account is not verified".to_string());
    }

    // 缓存时间不超过 token 剩余有效期
    let ttl = claims
        .remaining_secs()
        .clamp(1, AppConfig::get().cache.default_ttl.max(1));
    cache.insert_json(cache_key, &account, ttl).await;

    Ok(account)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            // 验证 JWT token
            match extract_and_validate_jwt(&req).await {
                Ok(account) => {
                    debug!("JWT authentication successful for ID: {}", account.id);
                    req.extensions_mut().insert(account);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取账号信息
impl RequireJWT {
    /// 从请求扩展中提取账号
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_account(req: &HttpRequest) -> Option<Account> {
        req.extensions().get::<Account>().cloned()
    }

    /// 从请求扩展中提取账号ID
    pub fn extract_account_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<Account>().map(|account| account.id)
    }

    /// 提取请求携带的 access token
    pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
        bearer_token(req).map(str::to_string)
    }
}
