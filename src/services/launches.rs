/// Launch lookup service
use crate::clients::launch_library::{ApiLaunch, LaunchLibraryClient};
use crate::domain::{LaunchRecord, LaunchSummary};
use crate::utils::{format_datetime, num};
use tracing::warn;

pub struct LaunchService {
    client: LaunchLibraryClient,
}

impl LaunchService {
    pub fn new(client: LaunchLibraryClient) -> Self {
        Self { client }
    }

    /// Upcoming launches matching the given filters, in upstream order.
    ///
    /// `status_filter` and `provider_filter` are case-insensitive
    /// substring matches; `None` or an empty string disables a filter.
    /// A fetch failure degrades to an empty list.
    pub async fn upcoming(
        &self,
        status_filter: Option<&str>,
        provider_filter: Option<&str>,
        max_results: usize,
    ) -> Vec<LaunchRecord> {
        let payload = match self.client.upcoming().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to fetch launch data: {}", e);
                return Vec::new();
            }
        };

        collect_launches(&payload.results, status_filter, provider_filter, max_results)
    }

    /// Unfiltered upcoming launches with a reduced field set.
    pub async fn all_upcoming(&self, limit: usize) -> Vec<LaunchSummary> {
        let payload = match self.client.upcoming().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to fetch launch data: {}", e);
                return Vec::new();
            }
        };

        payload.results.iter().take(limit).map(to_summary).collect()
    }
}

fn filter_matches(filter: Option<&str>, value: &str) -> bool {
    match filter {
        Some(f) if !f.is_empty() => value.to_lowercase().contains(&f.to_lowercase()),
        _ => true,
    }
}

fn collect_launches(
    launches: &[ApiLaunch],
    status_filter: Option<&str>,
    provider_filter: Option<&str>,
    max_results: usize,
) -> Vec<LaunchRecord> {
    let mut retained = Vec::new();

    for launch in launches {
        let status_name = launch
            .status
            .as_ref()
            .and_then(|s| s.name.clone())
            .unwrap_or_default();
        if !filter_matches(status_filter, &status_name) {
            continue;
        }

        let provider_name = launch
            .launch_service_provider
            .as_ref()
            .and_then(|p| p.name.clone())
            .unwrap_or_default();
        if !filter_matches(provider_filter, &provider_name) {
            continue;
        }

        retained.push(to_record(launch, status_name, provider_name));

        if retained.len() >= max_results {
            break;
        }
    }

    retained
}

fn to_record(launch: &ApiLaunch, status_name: String, provider_name: String) -> LaunchRecord {
    let status = launch.status.as_ref();
    let mission = launch.mission.as_ref();
    let pad = launch.pad.as_ref();
    let pad_location = pad.and_then(|p| p.location.as_ref());

    LaunchRecord {
        id: launch.id.clone(),
        name: launch.name.clone(),
        status: status_name,
        status_abbrev: status.and_then(|s| s.abbrev.clone()),
        status_description: status.and_then(|s| s.description.clone()),
        net: format_datetime(launch.net.as_deref()),
        net_raw: launch.net.clone(),
        window_start: format_datetime(launch.window_start.as_deref()),
        window_start_raw: launch.window_start.clone(),
        window_end: format_datetime(launch.window_end.as_deref()),
        window_end_raw: launch.window_end.clone(),
        probability: launch.probability,
        launch_service_provider: provider_name,
        provider_type: launch
            .launch_service_provider
            .as_ref()
            .and_then(|p| p.provider_type.clone()),
        rocket: launch
            .rocket
            .as_ref()
            .and_then(|r| r.configuration.as_ref())
            .and_then(|c| c.full_name.clone()),
        mission_name: mission.and_then(|m| m.name.clone()),
        mission_description: mission.and_then(|m| m.description.clone()),
        mission_type: mission.and_then(|m| m.mission_type.clone()),
        orbit: mission
            .and_then(|m| m.orbit.as_ref())
            .and_then(|o| o.name.clone()),
        pad_name: pad.and_then(|p| p.name.clone()),
        location: pad_location.and_then(|l| l.name.clone()),
        latitude: pad.and_then(|p| p.latitude.as_ref()).and_then(num),
        longitude: pad.and_then(|p| p.longitude.as_ref()).and_then(num),
        country_code: pad_location.and_then(|l| l.country_code.clone()),
        image: launch.image.clone(),
        webcast_live: launch.webcast_live,
        url: launch.url.clone(),
        distance_km: None,
        weather_forecast: None,
        visibility: None,
    }
}

fn to_summary(launch: &ApiLaunch) -> LaunchSummary {
    LaunchSummary {
        id: launch.id.clone(),
        name: launch.name.clone(),
        status: launch.status.as_ref().and_then(|s| s.name.clone()),
        status_abbrev: launch.status.as_ref().and_then(|s| s.abbrev.clone()),
        net: format_datetime(launch.net.as_deref()),
        net_raw: launch.net.clone(),
        launch_service_provider: launch
            .launch_service_provider
            .as_ref()
            .and_then(|p| p.name.clone()),
        rocket: launch
            .rocket
            .as_ref()
            .and_then(|r| r.configuration.as_ref())
            .and_then(|c| c.full_name.clone()),
        mission_name: launch.mission.as_ref().and_then(|m| m.name.clone()),
        location: launch
            .pad
            .as_ref()
            .and_then(|p| p.location.as_ref())
            .and_then(|l| l.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Vec<ApiLaunch> {
        serde_json::from_value(json!([
            {
                "id": "a1",
                "name": "Falcon 9 Block 5 | Starlink",
                "status": {"name": "Go for Launch", "abbrev": "Go", "description": "Ready"},
                "net": "2025-11-06T20:56:00Z",
                "window_start": "2025-11-06T20:30:00Z",
                "window_end": "2025-11-06T22:00:00Z",
                "probability": 90,
                "launch_service_provider": {"name": "SpaceX", "type": "Commercial"},
                "rocket": {"configuration": {"full_name": "Falcon 9 Block 5"}},
                "mission": {"name": "Starlink", "description": "Batch", "type": "Communications",
                            "orbit": {"name": "Low Earth Orbit"}},
                "pad": {"name": "SLC-40", "latitude": "28.56194122", "longitude": "-80.57735736",
                        "location": {"name": "Cape Canaveral", "country_code": "USA"}},
                "webcast_live": false,
                "url": "https://example.test/launch/a1"
            },
            {
                "id": "a2",
                "name": "Electron | Capella",
                "status": {"name": "To Be Confirmed", "abbrev": "TBC"},
                "net": "2025-11-08T01:00:00Z",
                "launch_service_provider": {"name": "Rocket Lab", "type": "Commercial"},
                "pad": {"name": "LC-1A", "latitude": -39.262, "longitude": 177.865,
                        "location": {"name": "Mahia Peninsula", "country_code": "NZL"}}
            },
            {
                "id": "a3",
                "name": "Long March | Yaogan",
                "status": {"name": "Go for Launch", "abbrev": "Go"},
                "net": "2025-11-09T04:00:00Z",
                "launch_service_provider": {"name": "CASC", "type": "Government"},
                "mission": null,
                "pad": {"name": "LC-9"}
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_status_filter_is_case_insensitive_substring() {
        let launches = fixture();
        let records = collect_launches(&launches, Some("go"), None, 10);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.status == "Go for Launch"));
    }

    #[test]
    fn test_no_status_filter_returns_all() {
        let launches = fixture();
        let records = collect_launches(&launches, None, None, 10);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_empty_status_filter_behaves_like_none() {
        let launches = fixture();
        let records = collect_launches(&launches, Some(""), None, 10);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_provider_filter() {
        let launches = fixture();
        let records = collect_launches(&launches, None, Some("spacex"), 10);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].launch_service_provider, "SpaceX");
    }

    #[test]
    fn test_max_results_caps_in_upstream_order() {
        let launches = fixture();
        let records = collect_launches(&launches, Some("Go"), None, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("a1"));
    }

    #[test]
    fn test_record_keeps_raw_and_formatted_timestamps() {
        let launches = fixture();
        let records = collect_launches(&launches, Some("Go"), None, 10);
        assert_eq!(records[0].net_raw.as_deref(), Some("2025-11-06T20:56:00Z"));
        assert_eq!(records[0].net, "November 06, 2025 at 08:56 PM UTC");
    }

    #[test]
    fn test_pad_coordinates_coerced_from_strings() {
        let launches = fixture();
        let records = collect_launches(&launches, Some("Go"), None, 10);
        assert!((records[0].latitude.unwrap() - 28.56194122).abs() < 1e-9);
        assert!((records[0].longitude.unwrap() + 80.57735736).abs() < 1e-9);
    }

    #[test]
    fn test_missing_mission_and_coordinates_tolerated() {
        let launches = fixture();
        let records = collect_launches(&launches, Some("Go"), None, 10);
        let bare = &records[1];
        assert_eq!(bare.id.as_deref(), Some("a3"));
        assert!(bare.mission_name.is_none());
        assert!(bare.latitude.is_none());
        assert_eq!(bare.net, "November 09, 2025 at 04:00 AM UTC");
    }

    #[test]
    fn test_summary_field_set() {
        let launches = fixture();
        let summaries: Vec<LaunchSummary> = launches.iter().take(2).map(to_summary).collect();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].status.as_deref(), Some("To Be Confirmed"));
        assert_eq!(summaries[1].location.as_deref(), Some("Mahia Peninsula"));
    }
}
