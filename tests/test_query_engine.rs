//! Query engine tests: filter predicates, stable sorting, pagination
//! arithmetic and the page-reset rules of the table view state.

mod common;

use auditdesk::{FlagFilter, FlagSortKey, ReportFilter, ReportSortKey, ReportType, SortKey};
use common::*;

/// Six projects with enough variety to exercise every filter field.
fn sample_projects() -> Vec<Project> {
    let mut a = make_project("PRJ-A", "Harbor Dredging Works");
    a.county = "Mombasa".to_string();
    a.sector = "Transport".to_string();
    a.risk_level = Severity::High;
    a.entity = "Kenya Ports Authority".to_string();

    let mut b = make_project("PRJ-B", "Rural Electrification Wave 2");
    b.county = "Siaya".to_string();
    b.sector = "Energy".to_string();
    b.risk_level = Severity::Critical;
    b.status = ProjectStatus::Investigation;

    let mut c = make_project("PRJ-C", "County Referral Hospital Wing");
    c.county = "Nairobi / Kiambu".to_string();
    c.sector = "Health".to_string();
    c.risk_level = Severity::Medium;
    c.audit_status = AuditStatus::Verified;

    let mut d = make_project("PRJ-D", "Dam Rehabilitation Program");
    d.county = "Nairobi".to_string();
    d.sector = "Water & Sanitation".to_string();
    d.risk_level = Severity::Critical;
    d.status = ProjectStatus::OnHold;

    let mut e = make_project("PRJ-E", "harbor access road");
    e.county = "Mombasa".to_string();
    e.risk_level = Severity::Low;
    e.status = ProjectStatus::Completed;

    let f = make_project("PRJ-F", "Street Lighting Upgrade");

    vec![a, b, c, d, e, f]
}

#[test]
fn default_filter_keeps_everything_in_order() {
    let projects = sample_projects();
    let filter = ProjectFilter::default();

    let kept = filter_records(&projects, &filter);

    assert_eq!(ids(&kept), ids(&projects), "pass-through must keep order");
    assert_eq!(filter.active_count(), 0);
    assert!(!filter.is_active());
}

#[test]
fn constraints_compose_with_logical_and() {
    let projects = sample_projects();
    let filter = ProjectFilter {
        county: Some("Mombasa".to_string()),
        risk_level: Some(Severity::High),
        ..ProjectFilter::default()
    };

    let kept = filter_records(&projects, &filter);

    // Every survivor satisfies all active constraints.
    for project in &kept {
        assert!(project.county.contains("Mombasa"));
        assert_eq!(project.risk_level, Severity::High);
    }
    assert_eq!(ids(&kept), vec!["PRJ-A"]);

    // No excluded record satisfies all of them.
    for project in &projects {
        if !kept.iter().any(|k| k.id == project.id) {
            assert!(
                !(project.county.contains("Mombasa") && project.risk_level == Severity::High),
                "{} was excluded but satisfies every constraint",
                project.id
            );
        }
    }
}

#[test]
fn search_matches_name_id_and_entity_case_insensitively() {
    let projects = sample_projects();

    let by_name = ProjectFilter {
        search: "HARBOR".to_string(),
        ..ProjectFilter::default()
    };
    assert_eq!(ids(&filter_records(&projects, &by_name)), vec!["PRJ-A", "PRJ-E"]);

    let by_id = ProjectFilter {
        search: "prj-c".to_string(),
        ..ProjectFilter::default()
    };
    assert_eq!(ids(&filter_records(&projects, &by_id)), vec!["PRJ-C"]);

    let by_entity = ProjectFilter {
        search: "ports authority".to_string(),
        ..ProjectFilter::default()
    };
    assert_eq!(ids(&filter_records(&projects, &by_entity)), vec!["PRJ-A"]);
}

#[test]
fn county_filter_has_contains_semantics() {
    let projects = sample_projects();
    let filter = ProjectFilter {
        county: Some("Kiambu".to_string()),
        ..ProjectFilter::default()
    };

    // "Nairobi / Kiambu" stores two counties; either selection matches it.
    assert_eq!(ids(&filter_records(&projects, &filter)), vec!["PRJ-C"]);

    let nairobi = ProjectFilter {
        county: Some("Nairobi".to_string()),
        ..ProjectFilter::default()
    };
    assert_eq!(
        ids(&filter_records(&projects, &nairobi)),
        vec!["PRJ-C", "PRJ-D", "PRJ-F"]
    );
}

#[test]
fn active_filter_count_tracks_non_default_fields() {
    let mut filter = ProjectFilter::default();
    assert_eq!(filter.active_count(), 0);

    filter.search = "dam".to_string();
    filter.sector = Some("Water & Sanitation".to_string());
    assert_eq!(filter.active_count(), 2);

    filter.risk_level = Some(Severity::Critical);
    filter.status = Some(ProjectStatus::OnHold);
    assert_eq!(filter.active_count(), 4);
}

#[test]
fn sort_returns_a_monotonic_permutation() {
    let projects = sample_projects();
    for key in [
        ProjectSortKey::Name,
        ProjectSortKey::Status,
        ProjectSortKey::RiskLevel,
        ProjectSortKey::LastUpdated,
    ] {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let state = SortState {
                key: Some(key),
                direction,
            };
            let sorted = sort_records(&projects, &state);

            // Same multiset of ids.
            let mut before = ids(&projects);
            let mut after = ids(&sorted);
            before.sort();
            after.sort();
            assert_eq!(before, after);

            // Monotonic under the comparator and direction.
            for pair in sorted.windows(2) {
                let ordering = key.compare(&pair[0], &pair[1]);
                let ordering = match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                };
                assert_ne!(
                    ordering,
                    std::cmp::Ordering::Greater,
                    "{:?} {:?} produced out-of-order neighbors",
                    key,
                    direction
                );
            }
        }
    }
}

#[test]
fn risk_level_sorts_by_ordinal_not_lexical() {
    let projects = sample_projects();
    let state = SortState {
        key: Some(ProjectSortKey::RiskLevel),
        direction: SortDirection::Ascending,
    };

    let sorted = sort_records(&projects, &state);
    let risks: Vec<Severity> = sorted.iter().map(|p| p.risk_level).collect();

    // Lexically "critical" would sort before "high"; the ordinal scale
    // puts it last.
    assert_eq!(
        risks,
        vec![
            Severity::Low,
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
            Severity::Critical,
        ]
    );
}

#[test]
fn equal_keys_keep_input_order_and_resorting_is_idempotent() {
    let projects = sample_projects();
    let state = SortState {
        key: Some(ProjectSortKey::RiskLevel),
        direction: SortDirection::Descending,
    };

    let sorted = sort_records(&projects, &state);
    // PRJ-B and PRJ-D are both critical; descending must keep their
    // relative input order.
    assert_eq!(ids(&sorted)[..2], ["PRJ-B", "PRJ-D"]);

    let resorted = sort_records(&sorted, &state);
    assert_eq!(ids(&resorted), ids(&sorted), "sorting a sorted list must not reorder it");
}

#[test]
fn no_active_key_returns_input_order() {
    let projects = sample_projects();
    let state: SortState<ProjectSortKey> = SortState::unsorted();

    assert_eq!(ids(&sort_records(&projects, &state)), ids(&projects));
}

#[test]
fn selecting_columns_toggles_and_resets_direction() {
    let mut state: SortState<ProjectSortKey> = SortState::unsorted();

    state.select(ProjectSortKey::Name);
    assert_eq!(state.key, Some(ProjectSortKey::Name));
    assert_eq!(state.direction, SortDirection::Ascending);

    // Same column flips.
    state.select(ProjectSortKey::Name);
    assert_eq!(state.direction, SortDirection::Descending);

    // Different column resets to ascending.
    state.select(ProjectSortKey::RiskLevel);
    assert_eq!(state.key, Some(ProjectSortKey::RiskLevel));
    assert_eq!(state.direction, SortDirection::Ascending);
}

#[test]
fn concatenated_pages_reconstruct_the_sequence() {
    let projects = sample_projects();
    let page_size = 4;
    let first = paginate(&projects, page_size, 1);

    assert_eq!(first.total_items, 6);
    assert_eq!(first.total_pages, 2); // ceil(6 / 4)

    let mut reassembled = Vec::new();
    for page_number in 1..=first.total_pages {
        let page = paginate(&projects, page_size, page_number);
        reassembled.extend(page.items);
    }
    assert_eq!(ids(&reassembled), ids(&projects));
}

#[test]
fn out_of_range_pages_clamp_instead_of_failing() {
    let projects = sample_projects();

    let zero = paginate(&projects, 2, 0);
    assert_eq!(zero.page, 1);

    let beyond = paginate(&projects, 2, 99);
    assert_eq!(beyond.page, 3, "clamped to the last page");
    assert_eq!(ids(&beyond.items), vec!["PRJ-E", "PRJ-F"]);

    let empty: Vec<Project> = Vec::new();
    let page = paginate(&empty, 10, 5);
    assert!(page.is_empty());
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.display_start(), 0);
    assert_eq!(page.display_end(), 0);
}

#[test]
fn display_range_matches_table_footer() {
    let projects = sample_projects();
    let page = paginate(&projects, 4, 2);

    // "Showing 5 to 6 of 6"
    assert_eq!(page.display_start(), 5);
    assert_eq!(page.display_end(), 6);
    assert!(page.has_previous());
    assert!(!page.has_next());
}

#[test]
fn filter_sort_and_page_size_changes_reset_the_page() {
    let projects = sample_projects();
    let mut table: TableState<ProjectFilter, ProjectSortKey> = TableState::new(2);

    table.next_page(3);
    table.next_page(3);
    assert_eq!(table.page(), 3);

    // Filtering by county while on page 3 returns to page 1.
    table.set_filter(ProjectFilter {
        county: Some("Nairobi".to_string()),
        ..ProjectFilter::default()
    });
    assert_eq!(table.page(), 1);

    table.next_page(2);
    table.select_column(ProjectSortKey::Name);
    assert_eq!(table.page(), 1);

    table.next_page(2);
    table.set_page_size(5);
    assert_eq!(table.page(), 1);
    assert_eq!(table.page_size(), 5);

    // Edges are no-ops, not errors.
    table.previous_page();
    assert_eq!(table.page(), 1);
    table.go_to_page(99, 1);
    assert_eq!(table.page(), 1, "jumps clamp into the valid range");
    let view = table.view(&projects);
    table.next_page(view.total_pages);
    table.next_page(view.total_pages);
    table.next_page(view.total_pages);
    assert_eq!(table.page(), view.total_pages.max(1));
}

#[test]
fn table_view_composes_filter_sort_and_pagination() {
    let projects = sample_projects();
    let mut table: TableState<ProjectFilter, ProjectSortKey> = TableState::new(2);

    table.set_filter(ProjectFilter {
        county: Some("Nairobi".to_string()),
        ..ProjectFilter::default()
    });
    table.select_column(ProjectSortKey::RiskLevel);
    table.select_column(ProjectSortKey::RiskLevel); // descending

    let page = table.view(&projects);
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(ids(&page.items), vec!["PRJ-D", "PRJ-C"]);

    table.next_page(page.total_pages);
    let last = table.view(&projects);
    assert_eq!(ids(&last.items), vec!["PRJ-F"]);
}

#[tokio::test(start_paused = true)]
async fn flag_filter_and_severity_sort_drive_the_alerts_board() -> anyhow::Result<()> {
    let api = reliable_api();
    let flags = api.get_audit_flags().await?;

    let open_high = FlagFilter {
        severity: Some(Severity::High),
        status: Some(FlagStatus::Open),
        ..FlagFilter::default()
    };
    let kept = filter_records(&flags, &open_high);
    let kept_ids: Vec<&str> = kept.iter().map(|flag| flag.id.as_str()).collect();
    assert_eq!(kept_ids, vec!["FLAG-002", "FLAG-005"]);
    assert_eq!(open_high.active_count(), 2);

    let state = SortState {
        key: Some(FlagSortKey::Severity),
        direction: SortDirection::Descending,
    };
    let sorted = sort_records(&flags, &state);
    // Critical flags lead in fixture order, stable under descending.
    assert_eq!(sorted[0].id, "FLAG-001");
    assert_eq!(sorted[1].id, "FLAG-003");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn report_filter_selects_by_type_and_search() -> anyhow::Result<()> {
    let api = reliable_api();
    let reports = api.get_audit_reports().await?;

    let physical = ReportFilter {
        report_type: Some(ReportType::Physical),
        ..ReportFilter::default()
    };
    let kept = filter_records(&reports, &physical);
    let kept_ids: Vec<&str> = kept.iter().map(|report| report.id.as_str()).collect();
    assert_eq!(kept_ids, vec!["RPT-2024-002", "RPT-2024-004"]);

    let search = ReportFilter {
        search: "isiolo".to_string(),
        ..ReportFilter::default()
    };
    let kept = filter_records(&reports, &search);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "RPT-2024-004");

    let state = SortState {
        key: Some(ReportSortKey::UpdatedAt),
        direction: SortDirection::Descending,
    };
    let sorted = sort_records(&reports, &state);
    assert_eq!(sorted[0].id, "RPT-2024-004"); // most recently touched
    Ok(())
}

// Scenario tests over the fixture set served by the mock API.

#[tokio::test(start_paused = true)]
async fn searching_thika_finds_the_highway_project() -> anyhow::Result<()> {
    let api = reliable_api();
    let projects = api.get_projects().await?;

    let filter = ProjectFilter {
        search: "Thika".to_string(),
        ..ProjectFilter::default()
    };
    let kept = filter_records(&projects, &filter);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "PRJ-2024-001");
    assert_eq!(kept[0].name, "Nairobi-Thika Highway Expansion Phase III");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn critical_risk_filter_selects_the_two_critical_projects() -> anyhow::Result<()> {
    let api = reliable_api();
    let projects = api.get_projects().await?;

    let filter = ProjectFilter {
        risk_level: Some(Severity::Critical),
        ..ProjectFilter::default()
    };
    let kept = filter_records(&projects, &filter);

    assert_eq!(ids(&kept), vec!["PRJ-2024-001", "PRJ-2024-010"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn risk_descending_places_critical_projects_first_in_input_order() -> anyhow::Result<()> {
    let api = reliable_api();
    let projects = api.get_projects().await?;

    let state = SortState {
        key: Some(ProjectSortKey::RiskLevel),
        direction: SortDirection::Descending,
    };
    let sorted = sort_records(&projects, &state);

    // Both critical projects lead, keeping their fixture order, before
    // any high-risk project.
    assert_eq!(ids(&sorted)[..2], ["PRJ-2024-001", "PRJ-2024-010"]);
    assert_eq!(sorted[2].risk_level, Severity::High);
    Ok(())
}
