//! Profile-driven statement parser.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DivmineError, ExtractionError};
use crate::layout::{normalize_page, OrderedFragments, DEFAULT_LINE_BUCKET};
use crate::models::config::{AnchorPolicy, DivmineConfig};
use crate::models::profile::DocumentProfile;
use crate::models::values::{ExtractedValues, FieldValue};
use crate::page::{PageDecoder, RawPage};

use super::anchor::{locate_anchor, AnchorIndex};
use super::keyword::extract_keyword_fields;
use super::offset::extract_offset_fields;
use super::{Result, StatementExtractor};

/// Result of one statement extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Id of the profile used.
    pub profile: String,
    /// Extracted values.
    pub values: ExtractedValues,
    /// Position of the document-type marker, if found.
    pub anchor: Option<AnchorIndex>,
    /// Non-fatal issues.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Profile fields absent from `values`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Extraction timestamp.
    pub extracted_at: DateTime<Utc>,
}

/// Statement parser for a single document profile.
///
/// Holds configuration only; every call to [`StatementExtractor::process`]
/// builds its own result.
#[derive(Debug, Clone)]
pub struct StatementParser {
    profile: DocumentProfile,
    line_bucket: f64,
    anchor_policy: AnchorPolicy,
}

impl StatementParser {
    /// Create a parser with default layout settings.
    pub fn new(profile: DocumentProfile) -> Self {
        Self {
            profile,
            line_bucket: DEFAULT_LINE_BUCKET,
            anchor_policy: AnchorPolicy::default(),
        }
    }

    /// Create a parser for profile `id` using the given configuration.
    pub fn from_config(config: &DivmineConfig, id: &str) -> std::result::Result<Self, DivmineError> {
        let profile = config.profile(id)?.clone();
        Ok(Self::new(profile)
            .with_line_bucket(config.layout.line_bucket)
            .with_anchor_policy(config.extraction.anchor_policy))
    }

    /// Set the vertical bucket width.
    pub fn with_line_bucket(mut self, bucket: f64) -> Self {
        self.line_bucket = bucket;
        self
    }

    /// Set the missing-anchor policy.
    pub fn with_anchor_policy(mut self, policy: AnchorPolicy) -> Self {
        self.anchor_policy = policy;
        self
    }

    pub fn profile(&self) -> &DocumentProfile {
        &self.profile
    }

    /// Normalize and order the page text.
    pub fn order_page(&self, page: &RawPage) -> OrderedFragments {
        OrderedFragments::new(normalize_page(page, self.line_bucket))
    }

    /// Run extraction on already ordered fragments.
    ///
    /// A page without text is handled like any page missing the marker.
    pub fn process_fragments(&self, fragments: &OrderedFragments) -> Result<ExtractionResult> {
        let start = Instant::now();
        let profile = &self.profile;

        let mut entries: Vec<(String, FieldValue)> = Vec::new();
        let mut warnings = Vec::new();

        let anchor = locate_anchor(fragments, &profile.marker);
        match anchor {
            Some(index) => {
                entries.push((
                    profile.type_field.clone(),
                    FieldValue::Text(fragments[index.get()].text.clone()),
                ));
                entries.extend(extract_offset_fields(fragments, index, &profile.offset_fields)?);
            }
            None if self.anchor_policy == AnchorPolicy::SkipOffsetFields => {
                warn!(
                    "Marker {:?} not found, skipping offset fields of profile {}",
                    profile.marker, profile.id
                );
                warnings.push(format!(
                    "document-type marker '{}' not found; offset fields skipped",
                    profile.marker
                ));
            }
            None => {
                return Err(ExtractionError::AnchorNotFound {
                    profile: profile.id.clone(),
                    marker: profile.marker.clone(),
                });
            }
        }

        entries.extend(extract_keyword_fields(fragments, &profile.keyword_fields)?);
        let values: ExtractedValues = entries.into_iter().collect();

        let missing_fields: Vec<String> = profile
            .field_names()
            .into_iter()
            .filter(|name| !values.contains(name))
            .map(str::to_string)
            .collect();

        if !missing_fields.is_empty() {
            debug!("Fields not present: {:?}", missing_fields);
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} fields with profile {} in {}ms",
            values.len(),
            profile.id,
            processing_time_ms
        );

        Ok(ExtractionResult {
            profile: profile.id.clone(),
            values,
            anchor,
            warnings,
            missing_fields,
            processing_time_ms,
            extracted_at: Utc::now(),
        })
    }
}

impl StatementExtractor for StatementParser {
    fn process(&self, page: &RawPage) -> Result<ExtractionResult> {
        let fragments = self.order_page(page);
        debug!("Page has {} horizontal text fragments", fragments.len());
        self.process_fragments(&fragments)
    }
}

/// Pick the first profile whose marker appears on the page.
pub fn identify_profile<'a>(
    profiles: &'a [DocumentProfile],
    page: &RawPage,
    line_bucket: f64,
) -> Option<&'a DocumentProfile> {
    let fragments = OrderedFragments::new(normalize_page(page, line_bucket));
    let found = profiles
        .iter()
        .find(|p| locate_anchor(&fragments, &p.marker).is_some());
    debug!("Identified profile: {:?}", found.map(|p| p.id.as_str()));
    found
}

/// Decode a page dump and extract its fields.
///
/// With `profile_id` unset the profile is picked by [`identify_profile`].
pub fn extract_statement<D: PageDecoder>(
    config: &DivmineConfig,
    decoder: &D,
    data: &[u8],
    profile_id: Option<&str>,
) -> crate::Result<ExtractionResult> {
    let page = decoder.first_page(data)?;

    let profile_id = match profile_id {
        Some(id) => id,
        None => identify_profile(&config.profiles, &page, config.layout.line_bucket)
            .map(|p| p.id.as_str())
            .ok_or(DivmineError::UnknownDocument)?,
    };

    let parser = StatementParser::from_config(config, profile_id)?;
    Ok(parser.process(&page)?)
}
