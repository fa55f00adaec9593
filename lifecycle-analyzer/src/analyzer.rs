use crate::cache::{read_cache, Cache, CacheError};
use crate::image::{read_layers, Image, ImageError};
use crate::selector::select;
use crate::writer::{write_layer, Owner, WriteLayerError};
use lifecycle_data::analyzed_metadata::{AnalyzedMetadata, ImageIdentifier};
use lifecycle_data::cache_metadata::CacheMetadata;
use lifecycle_data::group::GroupBuildpack;
use lifecycle_data::layer::BuildpackLayersMetadata;
use lifecycle_data::layers_metadata::LayersMetadata;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    WriteLayer(#[from] WriteLayerError),
}

/// Configures a single [`Analyzer::analyze`] run.
pub struct Analyzer<'a> {
    /// The active group of buildpacks, as written by the detect phase.
    pub group: &'a [GroupBuildpack],

    /// Where per-layer `.toml`/`.sha` files are written.
    pub layers_dir: PathBuf,

    /// When set, newly created paths under `layers_dir` are chowned to this UID:GID.
    ///
    /// Should be `Some` exactly when the process is running privileged; see
    /// [`crate::writer::running_as_root`].
    pub owner: Option<Owner>,

    /// When true, no files are written; only the summary is computed.
    pub skip_layers: bool,
}

impl<'a> Analyzer<'a> {
    /// Reconstructs, on disk, the per-buildpack layer metadata carried by a previously built app
    /// image and a build cache, and returns a summary of what was found.
    pub fn analyze(
        &self,
        image: &dyn Image,
        cache: Option<&dyn Cache>,
    ) -> Result<AnalyzedMetadata, AnalyzeError> {
        let (layers, image_present, image_identifier) = read_layers(image)?;

        if !image_present && cache.is_none() {
            return Ok(AnalyzedMetadata::default());
        }

        let analyzed_image = image_present
            .then(|| image_identifier.map(|id| ImageIdentifier { reference: id.0 }))
            .flatten();

        let analyzed_metadata = if image_present {
            layers.clone()
        } else {
            LayersMetadata::default()
        };

        if self.skip_layers {
            return Ok(AnalyzedMetadata {
                image: analyzed_image,
                metadata: analyzed_metadata,
            });
        }

        let cache_layers = read_cache(cache)?;

        let empty_layers = LayersMetadata::default();
        let source_layers = if image_present { &layers } else { &empty_layers };
        self.write_selected_layers(source_layers, &cache_layers)?;

        Ok(AnalyzedMetadata {
            image: analyzed_image,
            metadata: analyzed_metadata,
        })
    }

    fn write_selected_layers(
        &self,
        app_layers: &LayersMetadata,
        cache_layers: &CacheMetadata,
    ) -> Result<(), AnalyzeError> {
        let empty = BuildpackLayersMetadata::default();

        for buildpack in self.group {
            let app = app_layers.buildpacks.get(&buildpack.id).unwrap_or(&empty);
            let cached = cache_layers.buildpacks.get(&buildpack.id).unwrap_or(&empty);

            let layer_names: BTreeSet<&String> =
                app.layers.keys().chain(cached.layers.keys()).collect();

            for layer_name in layer_names {
                let chosen = select(app.layers.get(layer_name), cached.layers.get(layer_name));

                if let Some(chosen) = chosen {
                    write_layer(
                        &self.layers_dir,
                        &buildpack.id,
                        layer_name,
                        chosen,
                        self.owner,
                    )?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::image::{ImageIdentifier as ImgId, ImageInspection};
    use lifecycle_data::buildpack_id::BuildpackId;
    use lifecycle_data::layer::LayerMetadata;
    use std::collections::BTreeMap;
    use toml::value::Table;

    struct FixedImage(Option<ImageInspection>);

    impl Image for FixedImage {
        fn inspect(&self) -> Result<Option<ImageInspection>, ImageError> {
            Ok(self.0.clone())
        }
    }

    struct FixedCache(CacheMetadata);

    impl Cache for FixedCache {
        fn retrieve_metadata(&self) -> Result<CacheMetadata, CacheError> {
            Ok(self.0.clone())
        }
    }

    fn group(id: &str) -> Vec<GroupBuildpack> {
        vec![GroupBuildpack {
            id: id.parse().unwrap(),
            version: "1.0.0".to_string(),
            optional: false,
        }]
    }

    #[test]
    fn no_image_no_cache_returns_empty_with_no_side_effects() {
        let tmpdir = tempfile::tempdir().unwrap();
        let analyzer = Analyzer {
            group: &group("heroku/jvm"),
            layers_dir: tmpdir.path().join("layers"),
            owner: None,
            skip_layers: false,
        };

        let analyzed = analyzer.analyze(&FixedImage(None), None).unwrap();
        assert_eq!(analyzed, AnalyzedMetadata::default());
        assert!(!tmpdir.path().join("layers").exists());
    }

    #[test]
    fn image_missing_cache_present_enters_cache_only_mode() {
        let tmpdir = tempfile::tempdir().unwrap();
        let layers_dir = tmpdir.path().join("layers");
        std::fs::create_dir(&layers_dir).unwrap();

        let mut cache_layer = LayerMetadata::default();
        cache_layer.sha = "sha256:cache".to_string();
        cache_layer.cache = true;

        let mut bp_layers = BuildpackLayersMetadata::default();
        bp_layers.layers.insert("cache".to_string(), cache_layer);

        let mut cache_metadata = CacheMetadata::default();
        cache_metadata
            .buildpacks
            .insert("heroku/jvm".parse::<BuildpackId>().unwrap(), bp_layers);

        let analyzer = Analyzer {
            group: &group("heroku/jvm"),
            layers_dir: layers_dir.clone(),
            owner: None,
            skip_layers: false,
        };

        let analyzed = analyzer
            .analyze(&FixedImage(None), Some(&FixedCache(cache_metadata)))
            .unwrap();

        assert!(analyzed.image.is_none());
        assert_eq!(analyzed.metadata, LayersMetadata::default());
        assert!(layers_dir.join("heroku_jvm").join("cache.sha").exists());
    }

    #[test]
    fn skip_layers_writes_nothing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let layers_dir = tmpdir.path().join("layers");

        let mut labels = BTreeMap::new();
        labels.insert(
            crate::image::METADATA_LABEL.to_string(),
            r#"{"buildpacks":{"heroku/jvm":{"id":"heroku/jvm","version":"1.0.0","layers":{"jdk":{"sha":"sha256:jdk","launch":true}}}}}"#.to_string(),
        );
        let image = FixedImage(Some(ImageInspection {
            identifier: ImgId("registry.example/app@sha256:deadbeef".to_string()),
            labels,
        }));

        let analyzer = Analyzer {
            group: &group("heroku/jvm"),
            layers_dir: layers_dir.clone(),
            owner: None,
            skip_layers: true,
        };

        let analyzed = analyzer.analyze(&image, None).unwrap();
        assert!(analyzed.image.is_some());
        assert!(!layers_dir.exists());
    }

    #[test]
    fn app_and_cache_both_present_app_wins_on_tie() {
        let tmpdir = tempfile::tempdir().unwrap();
        let layers_dir = tmpdir.path().join("layers");

        let mut app_data = Table::new();
        app_data.insert(
            "source".to_string(),
            toml::Value::String("app".to_string()),
        );
        let mut labels = BTreeMap::new();
        labels.insert(
            crate::image::METADATA_LABEL.to_string(),
            serde_json::json!({
                "buildpacks": {
                    "heroku/jvm": {
                        "id": "heroku/jvm",
                        "version": "1.0.0",
                        "layers": {
                            "jdk": {"sha": "sha256:app", "launch": true, "data": {"source": "app"}}
                        }
                    }
                }
            })
            .to_string(),
        );
        let image = FixedImage(Some(ImageInspection {
            identifier: ImgId("registry.example/app@sha256:deadbeef".to_string()),
            labels,
        }));

        let mut cache_layer = LayerMetadata::default();
        cache_layer.sha = "sha256:cache".to_string();
        cache_layer.cache = true;
        let mut bp_layers = BuildpackLayersMetadata::default();
        bp_layers.layers.insert("jdk".to_string(), cache_layer);
        let mut cache_metadata = CacheMetadata::default();
        cache_metadata
            .buildpacks
            .insert("heroku/jvm".parse::<BuildpackId>().unwrap(), bp_layers);

        let analyzer = Analyzer {
            group: &group("heroku/jvm"),
            layers_dir: layers_dir.clone(),
            owner: None,
            skip_layers: false,
        };

        analyzer
            .analyze(&image, Some(&FixedCache(cache_metadata)))
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(layers_dir.join("heroku_jvm").join("jdk.sha")).unwrap(),
            "sha256:app"
        );
    }
}
