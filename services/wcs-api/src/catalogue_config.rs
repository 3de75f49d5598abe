//! Service catalogue loader.
//!
//! The catalogue is a single YAML file holding the service metadata, the
//! registered output formats and the layers:
//!
//! ```yaml
//! name: demo
//! projection: "EPSG:4326"
//! metadata:
//!   ows_title: Demo coverages
//! output_formats:
//!   - { name: PNG, mime_type: image/png, extension: png, renderer: AGG }
//! layers:
//!   - name: dem
//!     data: rasters/dem.raw
//!     metadata:
//!       wcs_extent: "-180 -90 180 90"
//!       wcs_size: "360 180"
//! ```
//!
//! Relative `data` paths are resolved against the catalogue file's directory.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use wcs_common::ServiceCatalogue;

/// Load and check a catalogue file.
pub fn load_catalogue<P: AsRef<Path>>(path: P) -> Result<ServiceCatalogue> {
    let path = path.as_ref();

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalogue {}", path.display()))?;
    let mut catalogue = parse_catalogue(&content)
        .with_context(|| format!("Failed to parse catalogue {}", path.display()))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    for layer in &mut catalogue.layers {
        if let Some(data) = layer.data.as_mut() {
            if data.is_relative() {
                *data = base_dir.join(&*data);
            }
            if !data.exists() {
                warn!(layer = %layer.name, path = %data.display(), "Layer data file not found");
            }
        }
    }

    info!(
        path = %path.display(),
        layers = catalogue.layers.len(),
        output_formats = catalogue.output_formats.len(),
        "Loaded service catalogue"
    );

    Ok(catalogue)
}

/// Parse catalogue YAML. Layer names must be unique and non-empty.
pub fn parse_catalogue(content: &str) -> Result<ServiceCatalogue> {
    let catalogue: ServiceCatalogue = serde_yaml::from_str(content)?;

    let mut seen = HashSet::new();
    for layer in &catalogue.layers {
        if layer.name.is_empty() {
            bail!("Layer with empty name");
        }
        if !seen.insert(layer.name.as_str()) {
            bail!("Duplicate layer name '{}'", layer.name);
        }
    }

    for format in &catalogue.output_formats {
        if format.mime_type().is_none() {
            warn!(format = %format.name, "Output format has no mime type and will not be advertised");
        }
    }

    Ok(catalogue)
}
