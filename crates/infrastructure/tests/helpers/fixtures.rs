use serde_json::{json, Value};

pub fn geofence_json(id: &str, lat: f64, lng: f64, radius: i64) -> Value {
    json!({
        "id": id,
        "type": "strike",
        "actionId": format!("act-{}", id),
        "employerId": "emp-exco",
        "employerName": "ExCo",
        "actionType": "picket",
        "organization": "Warehouse Workers United",
        "location": "123 Main St",
        "coordinates": { "lat": lat, "lng": lng },
        "distance": 420,
        "notificationRadius": radius,
        "startDate": "2025-01-01",
        "endDate": null,
        "description": "Picket at the loading dock",
        "demands": "Fair wages",
        "moreInfoUrl": "https://example.org/exco",
        "locationName": "Main St warehouse",
        "locationType": "warehouse"
    })
}

/// A `/mobile/data` body with two blocklist entries and one geofence.
pub fn mobile_data_json(content_hash: Option<&str>) -> Value {
    let mut body = json!({
        "version": "1.0",
        "cachedRegion": {
            "center": { "lat": 40.7128, "lng": -74.006 },
            "radiusMeters": 100000,
            "refreshThresholdMeters": 80000
        },
        "suggestedRefreshInterval": 3600000,
        "geofences": {
            "total": 1,
            "byEmployer": [],
            "all": [geofence_json("g-1", 40.7130, -74.0060, 250)]
        },
        "blocklist": {
            "totalUrls": 2,
            "totalEmployers": 1,
            "urls": [
                {
                    "url": "exco.com",
                    "employer": "ExCo",
                    "employerId": "emp-exco",
                    "actionType": "strike",
                    "actionId": "act-1"
                },
                {
                    "url": "https://www.excoshop.com/store",
                    "employer": "ExCo",
                    "employerId": "emp-exco",
                    "actionType": "boycott",
                    "actionId": "act-2"
                }
            ]
        },
        "generatedAt": "2025-03-01T12:00:00Z"
    });

    if let Some(hash) = content_hash {
        body["contentHash"] = json!(hash);
    }
    body
}

pub fn to_bytes(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}
