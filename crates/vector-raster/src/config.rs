use serde::Deserialize;

/// Rasterization settings for a [`VectorDrawable`](crate::VectorDrawable).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterConfig {
    /// Upper bound for each dimension of the cached bitmap. Larger requests are clamped,
    /// which trades sharpness for memory.
    pub max_cached_bitmap_size: u32,
    pub anti_alias: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            max_cached_bitmap_size: 2048,
            anti_alias: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RasterConfig = serde_json::from_str(r#"{ "antiAlias": false }"#).unwrap();
        assert_eq!(config.max_cached_bitmap_size, 2048);
        assert!(!config.anti_alias);
    }
}
