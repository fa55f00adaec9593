use lifecycle_data::layer::LayerMetadata;

/// Decides whether a layer should be written, and which source's record to use, for a single
/// `(buildpack, layer name)` pair.
///
/// Write the layer if and only if the app-image record wants launch, or the cache record wants
/// caching. When both sources supply the layer and it passes that check, the app-image record
/// wins unconditionally, even if only the cache record was the one that satisfied the predicate.
#[must_use]
pub fn select<'a>(
    app: Option<&'a LayerMetadata>,
    cache: Option<&'a LayerMetadata>,
) -> Option<&'a LayerMetadata> {
    let app_wants_launch = app.is_some_and(|layer| layer.launch);
    let cache_wants_cache = cache.is_some_and(|layer| layer.cache);

    (app_wants_launch || cache_wants_cache)
        .then(|| app.or(cache))
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(launch: bool, cache: bool) -> LayerMetadata {
        LayerMetadata {
            sha: "sha256:x".to_string(),
            launch,
            cache,
            ..LayerMetadata::default()
        }
    }

    #[test]
    fn neither_source_wants_it() {
        let app = layer(false, false);
        let cache = layer(false, false);
        assert!(select(Some(&app), Some(&cache)).is_none());
    }

    #[test]
    fn only_build_true_in_app_is_dropped() {
        let app = LayerMetadata {
            build: true,
            ..layer(false, false)
        };
        assert!(select(Some(&app), None).is_none());
    }

    #[test]
    fn cache_only_with_cache_false_is_dropped() {
        let cache = layer(false, false);
        assert!(select(None, Some(&cache)).is_none());
    }

    #[test]
    fn app_wants_launch_app_only() {
        let app = layer(true, false);
        let selected = select(Some(&app), None).unwrap();
        assert_eq!(selected.sha, app.sha);
    }

    #[test]
    fn cache_wants_cache_cache_only() {
        let cache = layer(false, true);
        let selected = select(None, Some(&cache)).unwrap();
        assert_eq!(selected.sha, cache.sha);
    }

    #[test]
    fn both_present_and_passing_app_wins() {
        let mut app = layer(true, false);
        app.sha = "sha256:app".to_string();
        let mut cache = layer(false, true);
        cache.sha = "sha256:cache".to_string();

        let selected = select(Some(&app), Some(&cache)).unwrap();
        assert_eq!(selected.sha, "sha256:app");
    }

    #[test]
    fn both_present_cache_triggers_but_app_record_still_wins() {
        // Only the cache side satisfies the predicate (cache=true), but the app record is
        // present, so its data and sha are still the ones used.
        let mut app = layer(false, false);
        app.sha = "sha256:app".to_string();
        let mut cache = layer(false, true);
        cache.sha = "sha256:cache".to_string();

        let selected = select(Some(&app), Some(&cache)).unwrap();
        assert_eq!(selected.sha, "sha256:app");
    }

    #[test]
    fn absent_from_both_is_not_invoked_in_practice_but_returns_none() {
        assert!(select(None, None).is_none());
    }
}
