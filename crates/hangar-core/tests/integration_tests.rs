use chrono::NaiveDate;
use hangar_core::config::CatalogConfig;
use hangar_core::query::{CatalogQuery, Highlights, QueryOutcome};
use hangar_core::rank::{self, TrendingView};
use hangar_core::summary::{self, Facets};
use hangar_core::{AircraftRecord, FilterCriteria, PriceType, SortKey, SortPreset, SortSpec};
use simplelog::{Config, LevelFilter, TestLogger};

/// What `/api/aircraft` returns, including the older delimited compatibility
/// documents and a few holes.
const SNAPSHOT: &str = r#"[
    {
        "id": "1", "name": "PMDG 737-800", "developer": "PMDG",
        "aircraft_manufacturer": "Boeing", "aircraft_model": "737-800", "variant": "737-800",
        "category": "Commercial", "price_type": "Paid", "price": "$69.99",
        "description": "Study level", "compatibility": ["MS2020", "MS2024"],
        "average_rating": 4.7, "total_reviews": 40, "view_count": 900,
        "release_date": "2022-09-01",
        "created_at": "2024-01-10T09:00:00", "last_viewed": "2024-06-09T12:00:00"
    },
    {
        "id": "2", "name": "Fenix A320", "developer": "Fenix",
        "aircraft_manufacturer": "Airbus", "aircraft_model": "A320", "variant": "A320ceo",
        "category": "Commercial", "price_type": "Paid", "price": "USD 59.99",
        "description": "Airliner", "compatibility": "MS2020, MSFS 2024",
        "average_rating": 4.7, "total_reviews": 55, "view_count": 1200,
        "release_date": "2022-05-20",
        "created_at": "2024-02-01T09:00:00", "last_viewed": "2024-05-01T12:00:00"
    },
    {
        "id": "3", "name": "Cessna 172 Classic", "developer": "Asobo",
        "aircraft_manufacturer": "Cessna", "aircraft_model": "172",
        "category": "General Aviation", "price_type": "Freeware",
        "description": "Trainer", "compatibility": null,
        "average_rating": 0, "total_reviews": 0,
        "created_at": "2024-03-01T09:00:00", "last_viewed": "2024-06-10T08:00:00"
    },
    {
        "id": "4", "name": "Beechcraft King Air", "developer": "Carenado",
        "aircraft_manufacturer": "Beechcraft", "aircraft_model": "King Air 350",
        "category": "General Aviation", "price_type": "Paid", "price": "Contact for pricing",
        "description": "Turboprop", "compatibility": ["MS2024"],
        "average_rating": 3.4, "total_reviews": 3, "view_count": 75,
        "last_viewed": "2024-06-08T08:00:00"
    },
    {
        "id": "5", "name": "Old F-14", "developer": "Heatblur",
        "aircraft_manufacturer": "Grumman", "aircraft_model": "F-14",
        "category": "Military", "price_type": "Paid", "price": "$79.99",
        "compatibility": ["MS2020"], "average_rating": 4.9, "view_count": 5000,
        "is_archived": true, "last_viewed": "2024-06-10T08:00:00"
    }
]"#;

fn snapshot() -> Vec<AircraftRecord> {
    // Fails once another test in this binary has installed the logger.
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    AircraftRecord::from_json_list(SNAPSHOT).expect("snapshot parses")
}

fn ids(records: &[&AircraftRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn test_snapshot_parses_heterogeneous_documents() {
    let records = snapshot();
    assert_eq!(records.len(), 5);
    assert_eq!(records[2].view_count, 0);
    assert_eq!(records[2].price_type, PriceType::Freeware);
    assert!(records[3].created_at.is_none());
    assert!(records[4].is_archived);
}

#[test]
fn test_browse_query_end_to_end() {
    let records = snapshot();
    let query = CatalogQuery::new(
        FilterCriteria::new()
            .with_compatibility("MS2024")
            .with_category("Commercial")
            .with_category("General Aviation"),
        Some(SortSpec::descending(SortKey::Price)),
    );

    let results = query.run(&records);
    assert_eq!(ids(&results), vec!["1", "2", "4"]);
}

#[test]
fn test_query_from_ui_state_json() {
    let records = snapshot();
    let query: CatalogQuery = serde_json::from_str(
        r#"{
            "criteria": {"search_text": "air", "price_range": {"min": 0, "max": 65}},
            "sort": {"key": "name", "direction": "ascending"}
        }"#,
    )
    .unwrap();

    // "air" hits Airbus, Airliner and King Air; the 737 matches neither.
    assert_eq!(ids(&query.run(&records)), vec!["4", "2"]);
}

#[test]
fn test_not_loaded_is_distinct_from_no_matches() {
    let records = snapshot();
    let query = CatalogQuery::new(FilterCriteria::new().with_developer("Nobody"), None);

    let pending = query.run_snapshot(None);
    assert_eq!(pending, QueryOutcome::NotLoaded);
    assert!(!pending.is_loaded());
    assert!(pending.records().is_empty());

    let empty = query.run_snapshot(Some(records.as_slice()));
    assert!(empty.is_loaded());
    assert!(empty.is_empty_result());
}

#[test]
fn test_presets_over_snapshot() {
    let records = snapshot();
    let all: Vec<&AircraftRecord> = records.iter().collect();

    let rating = hangar_core::sort_records(&all, &SortPreset::Rating.spec());
    assert_eq!(ids(&rating), vec!["5", "1", "2", "4", "3"]);

    let newest = hangar_core::sort_records(&all, &SortPreset::Newest.spec());
    assert_eq!(&ids(&newest)[..2], &["1", "2"]);

    let reviews = hangar_core::sort_records(&all, &SortPreset::Reviews.spec());
    assert_eq!(reviews[0].id, "2");
}

#[test]
fn test_highlights_ignore_active_filter_and_archive() {
    let records = snapshot();
    let config = CatalogConfig {
        most_viewed_limit: 2,
        ..CatalogConfig::default()
    };
    let now = NaiveDate::from_ymd_opt(2024, 6, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let trending = rank::trending_window(&records, now, config.trending_window_days);

    let highlights = Highlights::compute(&records, &config, Some(trending));
    assert_eq!(ids(&highlights.top_rated), vec!["1", "2", "4"]);
    assert_eq!(ids(&highlights.most_viewed), vec!["2", "1"]);
    assert_eq!(ids(&highlights.recent), vec!["3", "2", "1"]);

    // Fenix was last viewed more than a week ago; the F-14 is archived.
    assert_eq!(ids(&highlights.trending.records()), vec!["1", "4", "3"]);
}

#[test]
fn test_highlights_without_trending_data() {
    let records = snapshot();
    let highlights = Highlights::compute(&records, &CatalogConfig::default(), None);
    assert_eq!(highlights.trending, TrendingView::Unavailable);
}

#[test]
fn test_summaries_over_snapshot() {
    let records = snapshot();

    let categories = summary::category_summaries(&records);
    let names: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Commercial", "General Aviation"]);
    assert_eq!(categories[0].avg_rating, 4.7);
    assert_eq!(categories[1].avg_rating, 1.7);

    let stats = summary::catalog_stats(&records);
    assert_eq!((stats.total, stats.paid, stats.freeware), (4, 3, 1));

    let facets = Facets::collect(&records);
    assert_eq!(facets.compatibility, vec!["MS2020", "MS2024", "MSFS 2024"]);
    assert!(facets.developers.contains(&"Heatblur".to_string()));
}
