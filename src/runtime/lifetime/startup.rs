use crate::cache::{ObjectCache, register::create_object_cache};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use crate::utils::otp::OtpPolicy;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 内存缓存插件名，其他后端不可用时回退到它
const FALLBACK_CACHE: &str = "moka";

/// 创建缓存实例
async fn create_cache(cache_type: &str) -> Result<Arc<dyn ObjectCache>> {
    warn!("Attempting to create {} cache backend", cache_type);

    match create_object_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            return Ok(Arc::from(cache));
        }
        Err(e) if cache_type == FALLBACK_CACHE => return Err(e),
        Err(e) => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            warn!("Falling back to memory cache");
        }
    }

    let cache = create_object_cache(FALLBACK_CACHE).await?;
    warn!("Successfully created fallback Moka (in-memory) cache backend");
    Ok(Arc::from(cache))
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和验证码策略检查
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let config = AppConfig::get();

    // 配置错误时尽早失败，而不是等到第一次注册
    if let Err(e) = OtpPolicy::from_config(&config.otp) {
        panic!("Invalid OTP configuration: {e}");
    }
    info!(
        "OTP policy: issuer={}, verifier={}",
        config.otp.issuer, config.otp.verifier
    );

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let cache = create_cache(&config.cache.cache_type)
        .await
        .expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_unknown_backend_falls_back_to_memory() {
        let cache = create_cache("memcached").await.unwrap();
        cache.insert_raw("k".to_string(), "v".to_string(), 60).await;
        assert_eq!(
            cache.get_raw("k").await,
            crate::cache::CacheResult::Found("v".to_string())
        );
    }
}
