//! Output format list derivation.
//!
//! Formats are advertised by MIME type. A layer may restrict its formats with
//! `formats` metadata (whitespace separated format names); otherwise every
//! registered format with a WCS capable renderer is offered.

use std::fmt;
use tracing::debug;

use wcs_common::{Layer, ServiceCatalogue};

use crate::fallback::FallbackChain;
use crate::ows::NAMESPACES;

/// Ordered, de-duplicated list of MIME types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatList(Vec<String>);

impl FormatList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Comma-joined form, e.g. `image/tiff,image/gif`.
impl fmt::Display for FormatList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// Resolve the MIME types offered for `layer`, or service-wide when `None`.
///
/// Never fails: unknown names, formats without a MIME type and duplicate
/// MIME types are dropped with a diagnostic. An empty list means the caller
/// should omit the section.
pub fn resolve_formats(catalogue: &ServiceCatalogue, layer: Option<&Layer>) -> FormatList {
    let candidates = FallbackChain::<Vec<String>>::new("formats")
        .then("layer", || {
            layer
                .and_then(|l| l.metadata.lookup(NAMESPACES, "formats"))
                .map(|value| value.split_whitespace().map(str::to_string).collect())
        })
        .then("service", || Some(eligible_format_names(catalogue)))
        .resolve()
        .unwrap_or_default();

    let mut mime_types: Vec<String> = Vec::new();

    for name in &candidates {
        let Some(format) = catalogue.output_format(name) else {
            debug!(format = %name, "Failed to find outputformat info on format, ignored");
            continue;
        };

        let Some(mime_type) = format.mime_type() else {
            debug!(format = %name, "No mimetype for format, ignored");
            continue;
        };

        if mime_types.iter().any(|m| m.eq_ignore_ascii_case(mime_type)) {
            debug!(
                format = %name,
                mime_type = %mime_type,
                "Format ignored since its mimetype duplicates another output format"
            );
            continue;
        }

        mime_types.push(mime_type.to_string());
    }

    FormatList(mime_types)
}

fn eligible_format_names(catalogue: &ServiceCatalogue) -> Vec<String> {
    catalogue
        .output_formats
        .iter()
        .filter(|f| f.renderer.is_wcs_eligible())
        .map(|f| f.name.clone())
        .collect()
}
