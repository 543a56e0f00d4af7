use chrono::{TimeZone, Utc};

use vid2mvp::domain::{Branding, CallToAction, ProjectSpec, Section, SectionBody};

fn sample_spec() -> ProjectSpec {
    ProjectSpec {
        title: "Habit Tracker".to_string(),
        description: "Track daily habits".to_string(),
        features: vec!["Streaks".to_string(), "Reminders".to_string()],
        cta: CallToAction {
            label: "Start".to_string(),
            href: "#pricing".to_string(),
        },
        branding: Branding {
            primary: "#10b981".to_string(),
            neutral: "#18181b".to_string(),
        },
        sections: vec![
            Section::new("hero", "Hero"),
            Section::new("pricing", "Pricing").with_body(SectionBody {
                tiers: vec!["Free".to_string(), "Pro".to_string()],
                ..SectionBody::default()
            }),
        ],
        generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn given_spec_when_serializing_then_exposes_expected_keys() {
    let json: serde_json::Value = serde_json::from_str(&sample_spec().to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["title"], "Habit Tracker");
    assert_eq!(json["cta"]["href"], "#pricing");
    assert_eq!(json["branding"]["primary"], "#10b981");
    assert_eq!(json["sections"][1]["id"], "pricing");
    assert_eq!(json["features"].as_array().unwrap().len(), 2);
    assert!(json["generated_at"].as_str().unwrap().starts_with("2024-05-01T12:00:00"));
}

#[test]
fn given_serialized_spec_when_parsing_back_then_equals_original() {
    let spec = sample_spec();
    let parsed: ProjectSpec = serde_json::from_str(&spec.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, spec);
}

#[test]
fn given_spec_json_without_timestamp_when_parsing_then_fails() {
    let raw = r##"{"title":"x","description":"y","features":[],"cta":{"label":"a","href":"#"},"branding":{"primary":"#000000","neutral":"#ffffff"},"sections":[]}"##;
    assert!(serde_json::from_str::<ProjectSpec>(raw).is_err());
}

#[test]
fn given_section_body_when_serializing_then_content_sits_beside_id_and_empty_parts_are_omitted() {
    let json: serde_json::Value = serde_json::from_str(&sample_spec().to_json_pretty().unwrap()).unwrap();

    let hero = json["sections"][0].as_object().unwrap();
    assert_eq!(hero.len(), 2);
    assert_eq!(json["sections"][1]["tiers"], serde_json::json!(["Free", "Pro"]));
    assert!(json["sections"][1].get("body").is_none());
}

#[test]
fn given_default_body_when_checking_then_reports_empty() {
    assert!(SectionBody::default().is_empty());
    assert!(!Section::new("how", "How")
        .with_body(SectionBody {
            steps: vec!["Paste URL".to_string()],
            ..SectionBody::default()
        })
        .body
        .is_empty());
}
