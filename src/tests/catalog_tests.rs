//! Tests for the block catalog
//!
//! Every block kind is validated through the registry the same way the page
//! schema does it: required fields, length limits, choice membership and
//! explicit defaults.

use pretty_assertions::assert_eq;

use super::fixtures::*;
use crate::categories::hero::HeroHeight;
use crate::categories::projects::ProjectStatus;
use crate::categories::statistics::StatIcon;
use crate::core::block::{Block, BlockKind, ImageRef};
use crate::core::field::{FieldValue, StructValue};
use crate::core::registry::BlockRegistry;
use crate::core::validation::{ValidationConfig, ValidationErrorKind};

fn valid_instance(kind: BlockKind) -> StructValue {
    match kind {
        BlockKind::Hero => hero(),
        BlockKind::StatItem => stat("500"),
        BlockKind::ImpactStatistics => impact_statistics(),
        BlockKind::SectionHeader => section_header(),
        BlockKind::ProjectCard => project_card("Active"),
        BlockKind::ProjectCards => project_cards(),
        BlockKind::TeamMember => team_member(),
        BlockKind::TeamSection => team_section(),
    }
}

/// Every kind accepts an instance with all required fields within limits
#[test]
fn test_valid_instance_of_every_kind() {
    let registry = BlockRegistry::with_builtin_blocks();
    for kind in BlockKind::ALL {
        let result = registry.clean(kind, &valid_instance(kind));
        assert!(result.is_ok(), "{} rejected: {:?}", kind, result.err());
    }
}

/// Omitting a single required field reports exactly that field
#[test]
fn test_each_required_field_is_reported_alone() {
    let registry = BlockRegistry::with_builtin_blocks();
    for kind in BlockKind::ALL {
        let definition = registry.get_definition(kind).unwrap();
        for field in definition.required_fields() {
            let mut raw = valid_instance(kind);
            raw.remove(field);

            let errors = registry.clean(kind, &raw).unwrap_err();
            assert_eq!(errors.len(), 1, "{}.{}: {}", kind, field, errors);
            assert!(
                errors.has(field, |k| *k == ValidationErrorKind::MissingRequiredField),
                "{}.{}: {}",
                kind,
                field,
                errors
            );
        }
    }
}

#[test]
fn test_null_counts_as_missing() {
    let registry = BlockRegistry::with_builtin_blocks();
    let mut raw = hero();
    raw.insert("title".into(), FieldValue::Null);

    let errors = registry.clean(BlockKind::Hero, &raw).unwrap_err();
    assert!(errors.has("title", |k| *k == ValidationErrorKind::MissingRequiredField));
}

#[test]
fn test_stat_number_length_limit() {
    let registry = BlockRegistry::with_builtin_blocks();

    let exact = "1".repeat(20);
    assert!(registry.clean(BlockKind::StatItem, &stat(&exact)).is_ok());

    let over = "1".repeat(21);
    let errors = registry.clean(BlockKind::StatItem, &stat(&over)).unwrap_err();
    assert!(errors.has("number", |k| *k == ValidationErrorKind::LengthExceeded { max: 20, actual: 21 }));
}

#[test]
fn test_stat_suffix_and_label_limits() {
    let registry = BlockRegistry::with_builtin_blocks();
    let mut raw = stat("500");
    raw.insert("suffix".into(), "+++++".into());
    assert!(registry.clean(BlockKind::StatItem, &raw).is_ok());

    raw.insert("suffix".into(), "++++++".into());
    raw.insert("label".into(), "x".repeat(51).into());
    let errors = registry.clean(BlockKind::StatItem, &raw).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.has("suffix", |k| matches!(k, ValidationErrorKind::LengthExceeded { max: 5, .. })));
    assert!(errors.has("label", |k| matches!(k, ValidationErrorKind::LengthExceeded { max: 50, .. })));
}

#[test]
fn test_stat_icon_must_be_declared() {
    let registry = BlockRegistry::with_builtin_blocks();
    let mut raw = stat("500");
    raw.insert("icon_name".into(), "star".into());

    let errors = registry.clean(BlockKind::StatItem, &raw).unwrap_err();
    assert!(errors.has("icon_name", |k| *k == ValidationErrorKind::InvalidChoice { value: "star".into() }));
}

#[test]
fn test_project_status_choices() {
    let registry = BlockRegistry::with_builtin_blocks();

    for status in ["Active", "Ongoing", "Completed"] {
        assert!(registry.clean(BlockKind::ProjectCard, &project_card(status)).is_ok());
    }

    for status in ["active", "Paused", "COMPLETED"] {
        let errors = registry
            .clean(BlockKind::ProjectCard, &project_card(status))
            .unwrap_err();
        assert!(errors.has("status", |k| matches!(k, ValidationErrorKind::InvalidChoice { .. })));
    }
}

#[test]
fn test_project_status_defaults_to_active() {
    let registry = BlockRegistry::with_builtin_blocks();
    let mut raw = project_card("Active");
    raw.remove("status");

    let cleaned = registry.clean(BlockKind::ProjectCard, &raw).unwrap();
    assert_eq!(cleaned["status"], FieldValue::from("Active"));
}

#[test]
fn test_project_link_must_be_url() {
    let registry = BlockRegistry::with_builtin_blocks();
    let mut raw = project_card("Active");
    raw.insert("link".into(), "https://unityaid.org/projects/water".into());
    assert!(registry.clean(BlockKind::ProjectCard, &raw).is_ok());

    raw.insert("link".into(), "unityaid dot org".into());
    let errors = registry.clean(BlockKind::ProjectCard, &raw).unwrap_err();
    assert!(errors.has("link", |k| matches!(k, ValidationErrorKind::InvalidUrl { .. })));
}

#[test]
fn test_hero_height_defaults_to_full() {
    let registry = BlockRegistry::with_builtin_blocks();
    let mut raw = hero();
    raw.remove("height");

    let cleaned = registry.clean(BlockKind::Hero, &raw).unwrap();
    assert_eq!(cleaned["height"], FieldValue::from("full"));

    match Block::from_value(BlockKind::Hero, &cleaned).unwrap() {
        Block::Hero(hero) => assert_eq!(hero.height, HeroHeight::Full),
        other => panic!("unexpected block {:?}", other),
    }
}

#[test]
fn test_section_header_centered_default() {
    let registry = BlockRegistry::with_builtin_blocks();

    let cleaned = registry.clean(BlockKind::SectionHeader, &section_header()).unwrap();
    assert_eq!(cleaned["centered"], FieldValue::Boolean(true));

    let mut raw = section_header();
    raw.insert("centered".into(), "yes".into());
    let errors = registry.clean(BlockKind::SectionHeader, &raw).unwrap_err();
    assert!(errors.has("centered", |k| matches!(k, ValidationErrorKind::InvalidType { .. })));
}

#[test]
fn test_nested_errors_are_scoped_to_item() {
    let registry = BlockRegistry::with_builtin_blocks();
    let raw = obj(&[
        ("section_title", "Our Impact".into()),
        (
            "stats",
            vec![
                FieldValue::Object(stat("500")),
                FieldValue::Object(stat(&"9".repeat(25))),
                FieldValue::from("not a stat"),
            ]
            .into(),
        ),
    ]);

    let errors = registry.clean(BlockKind::ImpactStatistics, &raw).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.has("stats[1].number", |k| matches!(k, ValidationErrorKind::LengthExceeded { .. })));
    assert!(errors.has("stats[2]", |k| matches!(k, ValidationErrorKind::InvalidType { .. })));
}

#[test]
fn test_list_defaults_to_empty() {
    let registry = BlockRegistry::with_builtin_blocks();
    let raw = obj(&[("section_title", "Our Impact".into())]);

    let cleaned = registry.clean(BlockKind::ImpactStatistics, &raw).unwrap();
    assert_eq!(cleaned["stats"], FieldValue::List(Vec::new()));
}

#[test]
fn test_strict_config_rejects_unknown_nested_field() {
    let registry = BlockRegistry::with_builtin_blocks();
    let mut item = stat("500");
    item.insert("colour".into(), "red".into());
    let raw = obj(&[
        ("section_title", "Our Impact".into()),
        ("stats", vec![FieldValue::Object(item)].into()),
    ]);

    let cleaned = registry.clean(BlockKind::ImpactStatistics, &raw).unwrap();
    let first = &cleaned["stats"].as_list().unwrap()[0];
    assert!(!first.as_object().unwrap().contains_key("colour"));

    let strict = ValidationConfig::new().with_reject_unknown_fields(true);
    let errors = registry
        .clean_with(BlockKind::ImpactStatistics, &raw, &strict)
        .unwrap_err();
    assert!(errors.has("stats[0].colour", |k| *k == ValidationErrorKind::UnknownField));
}

#[test]
fn test_typed_blocks_round_trip_cleaned_values() {
    let registry = BlockRegistry::with_builtin_blocks();
    for kind in BlockKind::ALL {
        let cleaned = registry.clean(kind, &valid_instance(kind)).unwrap();
        let block = Block::from_value(kind, &cleaned).unwrap();
        assert_eq!(block.kind(), kind);
        assert_eq!(block.to_value().unwrap(), cleaned, "{}", kind);
    }
}

#[test]
fn test_typed_impact_statistics() {
    let registry = BlockRegistry::with_builtin_blocks();
    let cleaned = registry
        .clean(BlockKind::ImpactStatistics, &impact_statistics())
        .unwrap();

    match Block::from_value(BlockKind::ImpactStatistics, &cleaned).unwrap() {
        Block::ImpactStatistics(section) => {
            assert_eq!(section.section_title, "Our Impact");
            assert_eq!(section.stats.len(), 1);
            assert_eq!(section.stats[0].icon_name, StatIcon::Users);
            assert_eq!(section.stats[0].display_value(), "500");
        }
        other => panic!("unexpected block {:?}", other),
    }
}

#[test]
fn test_typed_project_cards() {
    let registry = BlockRegistry::with_builtin_blocks();
    let cleaned = registry.clean(BlockKind::ProjectCards, &project_cards()).unwrap();

    match Block::from_value(BlockKind::ProjectCards, &cleaned).unwrap() {
        Block::ProjectCards(section) => {
            assert_eq!(section.section_title, None);
            assert_eq!(section.projects[0].image, ImageRef(7));
            assert_eq!(section.projects[0].status, ProjectStatus::Ongoing);
            assert_eq!(section.with_status(ProjectStatus::Active).count(), 0);
        }
        other => panic!("unexpected block {:?}", other),
    }
}

#[test]
fn test_descriptor_tables_serialize_for_editing_surface() {
    let registry = BlockRegistry::with_builtin_blocks();
    let definition = registry.get_definition(BlockKind::StatItem).unwrap();

    let json = serde_json::to_value(&*definition).unwrap();
    assert_eq!(json["metadata"]["template"], "blocks/stats.html");
    assert_eq!(json["fields"][0]["name"], "icon_name");
    assert_eq!(json["fields"][0]["constraints"]["choices"]["options"][1]["value"], "utensils");
    assert_eq!(json["fields"][1]["constraints"]["max_length"], 20);
}
