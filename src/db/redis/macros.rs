/// Read-through caching over an optional [`Cache`](crate::db::Cache).
///
/// With `Some(cache)`, a hit is returned directly. A miss or a failed cache
/// read runs `$block`, queues the computed value for a background write and
/// returns it. With `None` the block always runs.
///
/// # Arguments
/// * `$cache`: `Option<&Cache>`.
/// * `$key`: the [`CacheKey`](crate::db::CacheKey) for the value.
/// * `$ttl`: time-to-live in seconds.
/// * `$block`: future computing the value; its error is propagated.
///
/// # Example
/// ```rust,ignore
/// let page = cached!(self.cache.as_ref(), key, 3600, async move {
///     fetch_page().await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache {
            Some(cache) => {
                let key = $key;
                let hit = match cache.get_from_cache(&key).await {
                    Ok(hit) => hit,
                    Err(e) => {
                        tracing::warn!(error = %e, key = %key, "Cache read failed, treating as miss");
                        None
                    }
                };

                match hit {
                    Some(cached) => Ok(cached),
                    None => {
                        let value = $block.await?;
                        cache.set_in_background(&key, &value, $ttl);
                        Ok(value)
                    }
                }
            }
            None => $block.await,
        }
    }};
}
