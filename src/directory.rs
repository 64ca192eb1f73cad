use std::time::Duration;

use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use sqlx::MySqlPool;

use crate::model::employee::DirectoryEntry;

/// identity token => directory entry
pub type TokenCache = Cache<String, DirectoryEntry>;

/// Builds the resolve cache. Entries carry a short TTL because the employee
/// table is written by the HR system, not by this service.
pub fn token_cache() -> TokenCache {
    Cache::builder()
        .max_capacity(100_000) // tune based on memory
        .time_to_live(Duration::from_secs(300)) // 5 min TTL
        .build()
}

/// Resolves an identity token to the employee it belongs to.
///
/// Hits come straight from the cache; misses fall through to the directory
/// table and populate it. Unknown tokens are NOT cached, so an employee
/// created moments ago can clock in without waiting out a TTL.
pub async fn resolve(
    pool: &MySqlPool,
    cache: &TokenCache,
    token: &str,
) -> Result<Option<DirectoryEntry>, sqlx::Error> {
    if let Some(entry) = cache.get(token).await {
        return Ok(Some(entry));
    }

    let entry = sqlx::query_as::<_, DirectoryEntry>(
        "SELECT id AS employee_id, is_active FROM employees WHERE identity_number = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    if let Some(entry) = entry {
        cache.insert(token.to_string(), entry).await;
    }

    Ok(entry)
}

/// Number of employees currently marked active.
pub async fn active_count(pool: &MySqlPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE is_active = TRUE")
        .fetch_one(pool)
        .await
}

/// Batch insert directory entries
async fn batch_insert(cache: &TokenCache, entries: &[(String, DirectoryEntry)]) {
    let futures: Vec<_> = entries
        .iter()
        .map(|(token, entry)| cache.insert(token.clone(), *entry))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load the active directory into the in-memory cache (batched)
pub async fn warmup_token_cache(
    pool: &MySqlPool,
    cache: &TokenCache,
    batch_size: usize,
) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String, u64, bool)>(
        r#"
        SELECT identity_number, id, is_active
        FROM employees
        WHERE is_active = TRUE
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (token, employee_id, is_active) = row?;
        batch.push((
            token,
            DirectoryEntry {
                employee_id,
                is_active,
            },
        ));
        total_count += 1;

        if batch.len() >= batch_size {
            batch_insert(cache, &batch).await;
            batch.clear();
        }
    }

    // Insert any remaining entries
    if !batch.is_empty() {
        batch_insert(cache, &batch).await;
    }

    log::info!(
        "Token cache warmup complete: {} active employees",
        total_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn cache_returns_what_was_inserted() {
        let cache = token_cache();
        let entry = DirectoryEntry {
            employee_id: 42,
            is_active: true,
        };

        cache.insert("0801199012345".to_string(), entry).await;

        let hit = cache.get("0801199012345").await.expect("cached entry");
        assert_eq!(hit.employee_id, 42);
        assert!(hit.is_active);
        assert!(cache.get("missing").await.is_none());
    }
}
