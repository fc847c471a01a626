//! JSON shapes exchanged with the provider and their conversion into the
//! domain model. Decoding happens once here; nothing past this module sees
//! the wire types.

use chrono::{DateTime, NaiveDate, Utc};
use picketline_domain::{
    ActionType, ActiveAction, BlocklistRecord, CachedRegion, ContentHash, Coordinates,
    DomainError, FieldReport, GeofenceDetails, GeofenceRecord, LocationReport, ReportReceipt,
    Snapshot, StrikeReport,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileDataResponse {
    pub version: String,
    pub cached_region: CachedRegionDto,
    pub suggested_refresh_interval: i64,
    pub geofences: GeofenceCollectionDto,
    pub blocklist: BlocklistDto,
    pub generated_at: String,
    #[serde(default)]
    pub content_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRegionDto {
    pub center: LatLngDto,
    pub radius_meters: i64,
    pub refresh_threshold_meters: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLngDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceCollectionDto {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub by_employer: Vec<EmployerGeofencesDto>,
    #[serde(default)]
    pub all: Vec<GeofenceDto>,
}

/// The same geofences grouped per employer. Only consulted when `all` is
/// empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerGeofencesDto {
    pub employer_id: String,
    pub employer_name: String,
    #[serde(default)]
    pub geofences: Vec<GeofenceDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceDto {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub action_id: String,
    pub employer_id: String,
    pub employer_name: String,
    pub action_type: String,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub coordinates: LatLngDto,
    #[serde(default)]
    pub distance: i64,
    pub notification_radius: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub demands: Option<String>,
    pub more_info_url: Option<String>,
    pub location_name: Option<String>,
    pub location_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocklistDto {
    #[serde(default)]
    pub total_urls: usize,
    #[serde(default)]
    pub total_employers: usize,
    pub urls: Vec<BlocklistEntryDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocklistEntryDto {
    pub url: String,
    pub employer: String,
    pub employer_id: String,
    pub action_type: String,
    pub action_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveStrikesResponse {
    #[serde(default)]
    pub count: usize,
    pub strikes: Vec<ActiveStrikeDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveStrikeDto {
    pub id: String,
    pub organization: Option<String>,
    pub action_type: String,
    pub location: Option<String>,
    pub employer_name: String,
    pub employer_id: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub message: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeSubmissionRequest<'a> {
    pub employer: EmployerSubmissionDto<'a>,
    pub action: ActionSubmissionDto<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerSubmissionDto<'a> {
    pub name: &'a str,
    pub industry: Option<&'a str>,
    pub website: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSubmissionDto<'a> {
    pub organization: &'a str,
    pub action_type: &'static str,
    pub location: &'a str,
    pub start_date: &'a str,
    pub duration_days: u32,
    pub description: &'a str,
    pub demands: Option<&'a str>,
    pub contact_info: Option<&'a str>,
    pub learn_more_url: Option<&'a str>,
    pub coordinates: Option<GpsCoordinatesDto>,
}

#[derive(Debug, Serialize)]
pub struct GpsCoordinatesDto {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsSnapshotRequest<'a> {
    pub action_id: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// Endpoint path and JSON body for a field report.
pub fn encode_report(report: &FieldReport) -> Result<(&'static str, Vec<u8>), DomainError> {
    let encoded = match report {
        FieldReport::Strike(strike) => (
            "/mobile/submit-strike",
            serde_json::to_vec(&strike_request(strike)),
        ),
        FieldReport::Location(location) => (
            "/mobile/gps-snapshot",
            serde_json::to_vec(&location_request(location)),
        ),
    };
    let (path, body) = encoded;
    let body = body.map_err(|e| DomainError::InvalidReport(e.to_string()))?;
    Ok((path, body))
}

fn strike_request(report: &StrikeReport) -> StrikeSubmissionRequest<'_> {
    let action = &report.action;
    StrikeSubmissionRequest {
        employer: EmployerSubmissionDto {
            name: &report.employer.name,
            industry: report.employer.industry.as_deref(),
            website: report.employer.website.as_deref(),
        },
        action: ActionSubmissionDto {
            organization: &action.organization,
            action_type: action.action_type.to_str(),
            location: &action.location,
            start_date: &action.start_date,
            duration_days: action.duration_days,
            description: &action.description,
            demands: action.demands.as_deref(),
            contact_info: action.contact_info.as_deref(),
            learn_more_url: action.learn_more_url.as_deref(),
            coordinates: action.coordinates.map(|c| GpsCoordinatesDto {
                latitude: c.lat,
                longitude: c.lng,
            }),
        },
    }
}

fn location_request(report: &LocationReport) -> GpsSnapshotRequest<'_> {
    GpsSnapshotRequest {
        action_id: &report.action_id,
        latitude: report.coordinates.lat,
        longitude: report.coordinates.lng,
        address: report.address.as_deref(),
        notes: report.notes.as_deref(),
    }
}

/// Decodes a `/mobile/data` body. The content hash comes from the body if
/// present, else `header_hash`, else a SHA-256 of the raw bytes.
pub fn decode_snapshot(body: &[u8], header_hash: Option<String>) -> Result<Snapshot, DomainError> {
    let response: MobileDataResponse =
        serde_json::from_slice(body).map_err(|e| DomainError::DecodeError(e.to_string()))?;

    let content_hash = response
        .content_hash
        .clone()
        .filter(|h| !h.is_empty())
        .or(header_hash)
        .unwrap_or_else(|| sha256_hex(body));

    response.into_snapshot(ContentHash::new(content_hash))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

impl MobileDataResponse {
    pub fn into_snapshot(self, content_hash: ContentHash) -> Result<Snapshot, DomainError> {
        let center = to_coordinates(self.cached_region.center)?;
        let region = CachedRegion {
            center,
            radius_meters: non_negative("radiusMeters", self.cached_region.radius_meters),
            refresh_threshold_meters: non_negative(
                "refreshThresholdMeters",
                self.cached_region.refresh_threshold_meters,
            ),
        };
        let generated_at = parse_timestamp(&self.generated_at)?;

        let geofence_dtos = if self.geofences.all.is_empty() {
            self.geofences
                .by_employer
                .into_iter()
                .flat_map(|group| group.geofences)
                .collect()
        } else {
            self.geofences.all
        };

        let mut geofences = Vec::with_capacity(geofence_dtos.len());
        for dto in geofence_dtos {
            match dto.into_record() {
                Ok(record) => geofences.push(record),
                Err(e) => warn!(error = %e, "Skipping geofence with invalid coordinates"),
            }
        }

        let blocklist = self
            .blocklist
            .urls
            .into_iter()
            .map(BlocklistEntryDto::into_record)
            .collect();

        Ok(Snapshot::new(
            self.version,
            region,
            u64::try_from(self.suggested_refresh_interval).unwrap_or(0),
            blocklist,
            geofences,
            generated_at,
            content_hash,
        ))
    }
}

impl GeofenceDto {
    fn into_record(self) -> Result<GeofenceRecord, DomainError> {
        let coordinates = to_coordinates(self.coordinates)?;
        let record = GeofenceRecord::new(
            Arc::from(self.id),
            Arc::from(self.action_id),
            Arc::from(self.employer_id),
            Arc::from(self.employer_name),
            ActionType::parse_lenient(&self.action_type),
            coordinates,
            non_negative("notificationRadius", self.notification_radius),
            non_negative("distance", self.distance),
        );

        Ok(record.with_details(GeofenceDetails {
            organization: self.organization.map(Arc::from),
            location: self.location.map(Arc::from),
            location_name: self.location_name.map(Arc::from),
            location_type: self.location_type.map(Arc::from),
            description: self.description.map(Arc::from),
            demands: self.demands.map(Arc::from),
            start_date: self.start_date.map(Arc::from),
            end_date: self.end_date.map(Arc::from),
            more_info_url: self.more_info_url.map(Arc::from),
        }))
    }
}

impl BlocklistEntryDto {
    fn into_record(self) -> BlocklistRecord {
        BlocklistRecord::new(
            Arc::from(self.url),
            Arc::from(self.employer_id),
            Arc::from(self.employer),
            ActionType::parse_lenient(&self.action_type),
            Arc::from(self.action_id),
        )
    }
}

impl ActiveStrikeDto {
    pub fn into_action(self) -> ActiveAction {
        ActiveAction {
            id: Arc::from(self.id),
            employer_id: Arc::from(self.employer_id),
            employer_name: Arc::from(self.employer_name),
            action_type: ActionType::parse_lenient(&self.action_type),
            organization: self.organization.map(Arc::from),
            location: self.location.map(Arc::from),
            start_date: self.start_date.map(Arc::from),
            end_date: self.end_date.map(Arc::from),
            description: self.description.map(Arc::from),
        }
    }
}

impl From<SubmissionResponse> for ReportReceipt {
    fn from(response: SubmissionResponse) -> Self {
        ReportReceipt {
            id: response.id,
            message: response.message,
        }
    }
}

fn to_coordinates(dto: LatLngDto) -> Result<Coordinates, DomainError> {
    Coordinates::new(dto.lat, dto.lng).map_err(|e| DomainError::DecodeError(e.to_string()))
}

fn non_negative(field: &str, value: i64) -> u32 {
    if value < 0 {
        warn!(field = field, value = value, "Negative value on the wire, using 0");
        return 0;
    }
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// RFC 3339 timestamps, with bare dates read as midnight UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::DecodeError(format!("invalid generatedAt '{}'", raw)))
}
