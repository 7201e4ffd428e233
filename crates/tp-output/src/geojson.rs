//! GeoJSON issue backend.
//!
//! Issues with a geometry are collected and written as one
//! `FeatureCollection` to `issues.geojson` on [`finish`](IssueWriter::finish).
//! Issues without geometry are skipped.  Output is a local file only.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::json;

use crate::writer::IssueWriter;
use crate::{Issue, OutputResult};

fn geometry(issue: &Issue) -> Option<Geometry> {
    let lon_lat = |p: &tp_core::GeoPoint| vec![p.lon, p.lat];
    let value = match issue.geometry.as_slice() {
        [] => return None,
        [p] => Value::Point(lon_lat(p)),
        pts => Value::LineString(pts.iter().map(lon_lat).collect()),
    };
    Some(Geometry::new(value))
}

/// Collects issue features and writes a GeoJSON `FeatureCollection`.
pub struct GeoJsonIssueWriter {
    path:     PathBuf,
    features: Vec<Feature>,
    finished: bool,
}

impl GeoJsonIssueWriter {
    /// Target `issues.geojson` in `dir`.  Nothing is written until `finish`.
    pub fn new(dir: &Path) -> Self {
        Self::to_path(dir.join("issues.geojson"))
    }

    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), features: Vec::new(), finished: false }
    }

    /// Features collected so far.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl IssueWriter for GeoJsonIssueWriter {
    fn write_issues(&mut self, issues: &[Issue]) -> OutputResult<()> {
        for issue in issues {
            let Some(geometry) = geometry(issue) else { continue };
            let id = self.features.len() as u64 + 1;
            self.features.push(Feature {
                bbox:            None,
                geometry:        Some(geometry),
                id:              Some(Id::Number(id.into())),
                properties:      Some(serde_json::Map::from_iter([
                    ("issueType".to_owned(), json!(issue.kind)),
                    ("message".to_owned(), json!(issue.message)),
                    ("priority".to_owned(), json!(issue.priority)),
                ])),
                foreign_members: None,
            });
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let collection = FeatureCollection {
            bbox:            None,
            features:        std::mem::take(&mut self.features),
            foreign_members: None,
        };
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, &collection)?;
        out.flush()?;
        log::debug!(
            "wrote {} issue features to {}",
            collection.features.len(),
            self.path.display()
        );
        Ok(())
    }
}
