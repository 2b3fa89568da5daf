use crate::model::HeadwayError;
use std::fs;
use std::path::{Path, PathBuf};

/// serialize features into a GeoJSON FeatureCollection document
fn collection_body(features: Vec<geojson::Feature>) -> Result<String, HeadwayError> {
    let collection = geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    serde_json::to_string(&collection).map_err(|e| HeadwayError::OutputWriteError {
        filename: String::from("<in-memory feature collection>"),
        msg: format!("{e}"),
    })
}

/// write a single FeatureCollection document, creating parent directories
pub fn write_feature_collection(
    filename: &Path,
    features: Vec<geojson::Feature>,
) -> Result<(), HeadwayError> {
    let body = collection_body(features)?;
    if let Some(parent) = filename.parent() {
        fs::create_dir_all(parent).map_err(|e| HeadwayError::OutputWriteError {
            filename: filename.display().to_string(),
            msg: format!("creating output directory: {e}"),
        })?;
    }
    fs::write(filename, body).map_err(|e| HeadwayError::OutputWriteError {
        filename: filename.display().to_string(),
        msg: format!("{e}"),
    })
}

/// write one `output_<date>_<window>_<bucket>.geojson` document per bucket.
/// there is no partial-output mode: every document is serialized before the
/// first file is created, and files from this run are removed again if a
/// later write fails.
pub fn write_bucket_collections(
    output_directory: &Path,
    date: &str,
    window: &str,
    buckets: Vec<(String, Vec<geojson::Feature>)>,
) -> Result<Vec<PathBuf>, HeadwayError> {
    let mut documents: Vec<(PathBuf, String)> = Vec::with_capacity(buckets.len());
    for (bucket, features) in buckets {
        let filename = output_directory.join(format!("output_{date}_{window}_{bucket}.geojson"));
        documents.push((filename, collection_body(features)?));
    }

    fs::create_dir_all(output_directory).map_err(|e| HeadwayError::OutputWriteError {
        filename: output_directory.display().to_string(),
        msg: format!("creating output directory: {e}"),
    })?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(documents.len());
    for (filename, body) in documents {
        match fs::write(&filename, body) {
            Ok(()) => written.push(filename),
            Err(e) => {
                for file in &written {
                    let _ = fs::remove_file(file);
                }
                return Err(HeadwayError::OutputWriteError {
                    filename: filename.display().to_string(),
                    msg: format!("{e}"),
                });
            }
        }
    }
    Ok(written)
}
