use serde_json::json;
use warden_domain::features::{Feature, IncludeIn, SubFeatureGroupType};

fn sample_definition() -> serde_json::Value {
    json!({
        "id": "discover",
        "name": "Discover",
        "app": ["discover"],
        "catalogue": ["discover"],
        "navLinkId": "discover",
        "privileges": {
            "all": {
                "api": ["search"],
                "app": ["discover"],
                "savedObject": { "all": ["search"], "read": ["index-pattern"] },
                "ui": ["show", "save"]
            },
            "read": {
                "savedObject": { "read": ["search", "index-pattern"] },
                "ui": ["show"]
            }
        },
        "subFeatures": [{
            "name": "Short URLs",
            "privilegeGroups": [{
                "groupType": "independent",
                "privileges": [{
                    "id": "url_create",
                    "name": "Create Short URLs",
                    "savedObject": { "all": ["url"] },
                    "ui": ["createShortUrl"],
                    "includeIn": "all"
                }]
            }]
        }]
    })
}

#[test]
fn feature_deserializes_from_camel_case_json() {
    let feature: Feature = serde_json::from_value(sample_definition()).expect("feature definition");

    assert_eq!(feature.id, "discover");
    assert_eq!(feature.nav_link_id.as_deref(), Some("discover"));
    assert!(!feature.exclude_from_base_privileges);

    let privileges = feature.privileges.as_ref().expect("privileges");
    assert_eq!(privileges["all"].saved_object.all, ["search"]);
    assert_eq!(privileges["read"].ui, ["show"]);

    let group = &feature.sub_features[0].privilege_groups[0];
    assert_eq!(group.group_type, SubFeatureGroupType::Independent);
    assert_eq!(group.privileges[0].include_in, IncludeIn::All);
}

#[test]
fn feature_roundtrips_through_json() {
    let feature: Feature = serde_json::from_value(sample_definition()).unwrap();
    let encoded = serde_json::to_value(&feature).unwrap();
    let decoded: Feature = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, feature);
}

#[test]
fn unknown_fields_are_rejected() {
    let mut raw = sample_definition();
    raw["unknownKnob"] = json!(true);

    let err = serde_json::from_value::<Feature>(raw).unwrap_err();
    assert!(err.to_string().contains("unknownKnob"));
}

#[test]
fn out_of_range_include_in_is_rejected() {
    let mut raw = sample_definition();
    raw["subFeatures"][0]["privilegeGroups"][0]["privileges"][0]["includeIn"] = json!("sometimes");

    assert!(serde_json::from_value::<Feature>(raw).is_err());
}

#[test]
fn missing_privileges_field_deserializes_as_none() {
    let raw = json!({ "id": "bare", "name": "Bare", "privileges": null });
    let feature: Feature = serde_json::from_value(raw).unwrap();
    assert!(feature.privileges.is_none());
    assert!(feature.sub_features.is_empty());
}
